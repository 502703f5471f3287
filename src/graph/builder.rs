//! Graph construction from point data.
//!
//! Nodes are either sampled uniformly inside a `width x height` area or taken
//! from caller-supplied coordinates. Edges join every pair of nodes closer than
//! a maximum distance and are stored once per direction.
//!
//! Edge generation compares every ordered pair of nodes, so it is O(n²) in the
//! node count. That is fine for hundreds to low thousands of nodes; larger
//! point sets need a spatial index before they reach this module.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::geometry::Point;
use super::{Edge, Graph, Node};


/// Sample `count` nodes uniformly from [0, width) x [0, height)
/// Ids are assigned in generation order; coincident positions are allowed
pub fn generate_nodes<R>(count: usize, width: f64, height: f64, rng: &mut R) -> Vec<Node>
where
    R: Rng + ?Sized,
    {
    (0..count)
        .map(|id| Node {
            id,
            x: rng.random::<f64>() * width,
            y: rng.random::<f64>() * height,
        })
        .collect()
}

/// Nodes from pre-supplied coordinates, ids follow input order
pub fn nodes_from_points<I, P>(points: I) -> Vec<Node>
where
    I: IntoIterator<Item = P>,
    P: Into<Point>,
    {
    points
        .into_iter()
        .enumerate()
        .map(|(id, p)| {
            let p: Point = p.into();
            Node { id, x: p.x, y: p.y }
        })
        .collect()
}

/// Connect every ordered pair of distinct nodes closer than `max_distance`
/// Both a->b and b->a are emitted, zero-length edges included
pub fn generate_edges(nodes: &[Node], max_distance: f64) -> Vec<Edge> {

    let mut edges = Vec::new();

    // non-positive thresholds can never be beaten by a distance
    if max_distance <= 0.0 {
        return edges;
    }

    for a in nodes {
        for b in nodes {
            if a.id == b.id {
                continue;
            }
            let edge = Edge::between(a, b);
            if edge.weight < max_distance {
                edges.push(edge);
            }
        }
    }

    edges
}

/// Graph over pre-supplied coordinates
pub fn graph_from_points<I, P>(points: I, max_edge_distance: f64) -> Graph
where
    I: IntoIterator<Item = P>,
    P: Into<Point>,
    {
    let nodes = nodes_from_points(points);
    let edges = generate_edges(&nodes, max_edge_distance);
    Graph::from_parts(nodes, edges)
}

/// Random graph using the thread-local generator
pub fn build_graph(node_count: usize, width: f64, height: f64, max_edge_distance: f64) -> Graph {
    build_graph_with_rng(node_count, width, height, max_edge_distance, &mut rand::rng())
}

/// Reproducible random graph, the same seed always yields the same graph
pub fn build_graph_seeded(node_count: usize, width: f64, height: f64, max_edge_distance: f64, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    build_graph_with_rng(node_count, width, height, max_edge_distance, &mut rng)
}

/// Random graph from a caller-owned generator
pub fn build_graph_with_rng<R>(node_count: usize, width: f64, height: f64, max_edge_distance: f64, rng: &mut R) -> Graph
where
    R: Rng + ?Sized,
    {
    let nodes = generate_nodes(node_count, width, height, rng);
    let edges = generate_edges(&nodes, max_edge_distance);
    Graph::from_parts(nodes, edges)
}
