//! Shortest paths over spatial graphs, with a replayable exploration trace.
//!
//! A [`Graph`] is built once from point data: nodes are sampled inside an
//! area (or supplied by the caller) and every pair of nodes closer than a
//! maximum distance is joined by an edge weighted by their Euclidean distance.
//! [`find_shortest_path`] then runs Dijkstra's algorithm between two nodes and
//! returns both the path and the ordered list of relaxations that found it,
//! which [`TraceReplay`] can hand back one step at a time.
//!
//! ```
//! use pathtrace::{build_graph_seeded, find_shortest_path, TraceReplay};
//!
//! let graph = build_graph_seeded(50, 100.0, 100.0, 30.0, 1);
//! let result = find_shortest_path(&graph, 0, 49).unwrap();
//!
//! for step in TraceReplay::new(&result) {
//!     // draw `step` on the next frame
//!     let _ = step;
//! }
//! ```

mod collections;
pub mod config;
pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;
pub mod replay;

pub use config::GraphConfig;
pub use errors::{GraphError, PathError};
pub use geometry::Point;
pub use graph::builder::{
    build_graph, build_graph_seeded, build_graph_with_rng, generate_edges, generate_nodes,
    graph_from_points, nodes_from_points,
};
pub use graph::{Edge, Graph, Node, NodeId};
pub use graph_algos::dijkstra::{find_shortest_path, find_shortest_path_until, shortest_distances};
pub use graph_algos::{ExplorationTrace, PathResult, ShortestPath, path_weight};
pub use replay::{ReplayStep, TraceReplay};

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
