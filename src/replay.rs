//! Step-by-step playback of a finished search.
//!
//! [`TraceReplay`] walks a [`PathResult`] one step per call to
//! [`TraceReplay::tick`]: every traced relaxation first, then every segment of
//! the shortest path. It does no timing of its own; the caller decides when to
//! tick (a timer, a frame callback, a key press) and may cancel at any point.

use crate::graph::{Edge, NodeId};
use crate::graph_algos::PathResult;


/// One unit of playback
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReplayStep {
    /// An improving relaxation, in exploration order
    Explore(Edge),
    /// A segment of the final path, from start towards end
    PathSegment { from: NodeId, to: NodeId },
}

/// Cancellable cursor over a search result
#[derive(Clone, Debug)]
pub struct TraceReplay<'a> {
    trace: &'a [Edge],
    path: &'a [NodeId],
    cursor: usize,
    cancelled: bool,
}

impl<'a> TraceReplay<'a> {

    pub fn new(result: &'a PathResult) -> Self {
        Self {
            trace: result.trace.as_slice(),
            path: result.path.nodes(),
            cursor: 0,
            cancelled: false,
        }
    }

    fn segment_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Total number of steps, cancelled or not
    pub fn len(&self) -> usize {
        self.trace.len() + self.segment_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Steps already handed out
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        if self.cancelled {
            0
        } else {
            self.len() - self.cursor
        }
    }

    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }

    /// Stop playback, every later tick returns None
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Advance one step, or None when the replay is finished or cancelled
    pub fn tick(&mut self) -> Option<ReplayStep> {

        if self.is_finished() {
            return None;
        }

        let step = match self.trace.get(self.cursor) {
            Some(edge) => ReplayStep::Explore(*edge),
            None => {
                let segment = self.cursor - self.trace.len();
                ReplayStep::PathSegment {
                    from: self.path[segment],
                    to: self.path[segment + 1],
                }
            }
        };

        self.cursor += 1;
        Some(step)
    }
}

impl Iterator for TraceReplay<'_> {
    type Item = ReplayStep;

    fn next(&mut self) -> Option<ReplayStep> {
        self.tick()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}
