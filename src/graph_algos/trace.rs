use std::ops::Deref;

use crate::graph::{Edge, NodeId};


/// Ordered log of improving relaxations
/// Each edge is recorded at the moment it lowered a node's tentative distance
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplorationTrace {
    edges: Vec<Edge>,
}

impl ExplorationTrace {

    pub(crate) fn new(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    pub fn as_slice(&self) -> &[Edge] {
        &self.edges
    }

    pub fn into_inner(self) -> Vec<Edge> {
        self.edges
    }
}

impl Deref for ExplorationTrace {
    type Target = [Edge];

    fn deref(&self) -> &[Edge] {
        &self.edges
    }
}

impl<'a> IntoIterator for &'a ExplorationTrace {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}


/// Node ids from start to end inclusive, empty when the end is unreachable
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShortestPath {
    nodes: Vec<NodeId>,
    total_weight: f64,
}

impl ShortestPath {

    pub(crate) fn new(nodes: Vec<NodeId>, total_weight: f64) -> Self {
        Self { nodes, total_weight }
    }

    pub fn unreachable() -> Self {
        Self {
            nodes: Vec::new(),
            total_weight: f64::INFINITY,
        }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Sum of edge weights along the path, infinite when unreachable
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Consecutive (from, to) pairs along the path
    pub fn segments(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }
}


/// Output of a single search: the exploration trace and the path it led to
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    pub trace: ExplorationTrace,
    pub path: ShortestPath,
}

impl PathResult {

    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty()
    }
}
