pub mod builder;

use crate::errors::GraphError;
use crate::geometry::{Point, euclidean};


/// Node identifier - position of the node in the graph's node list
pub type NodeId = usize;

/// Relative slack allowed between a supplied edge weight and its endpoint distance
const WEIGHT_TOLERANCE: f64 = 1e-9;


/// Point on the graph
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
}

impl Node {

    pub fn new(id: NodeId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn distance_to(&self, other: &Node) -> f64 {
        euclidean(self.x, self.y, other.x, other.y)
    }
}


/// Undirected weighted connection between two nodes
/// The same connection may be stored twice, once per direction
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f64, // euclidean distance between the endpoints
}

impl Edge {

    /// Edge from a to b weighted by the distance between them
    pub fn between(a: &Node, b: &Node) -> Self {
        Self {
            source: a.id,
            target: b.id,
            weight: a.distance_to(b),
        }
    }

    /// Returns the opposite endpoint, or None if the edge does not touch `id`
    pub fn other(&self, id: NodeId) -> Option<NodeId> {
        if self.source == id {
            Some(self.target)
        } else if self.target == id {
            Some(self.source)
        } else {
            None
        }
    }

    pub fn touches(&self, id: NodeId) -> bool {
        self.source == id || self.target == id
    }
}


/// Immutable spatial graph
/// Each node keeps the indices of the edges touching it, in edge-list order
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    incident: Vec<Vec<usize>>,
}

impl Graph {

    /// Build a graph from an explicit node and edge list
    /// Node ids must match their position and every edge must join two distinct, existing nodes
    /// with a weight equal to the distance between them
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {

        if let Some((position, node)) = nodes.iter().enumerate().find(|(i, n)| n.id != *i) {
            return Err(GraphError::NodeIdMismatch { position, id: node.id });
        }

        for edge in &edges {
            if edge.source >= nodes.len() || edge.target >= nodes.len() {
                return Err(GraphError::MissingNode(edge.source, edge.target));
            }
            if edge.source == edge.target {
                return Err(GraphError::SelfEdge(edge.source));
            }
            if edge.weight.is_nan() || edge.weight < 0.0 {
                return Err(GraphError::InvalidWeight(edge.source, edge.target));
            }

            let distance = nodes[edge.source].distance_to(&nodes[edge.target]);
            if (edge.weight - distance).abs() > WEIGHT_TOLERANCE * distance.max(1.0) {
                return Err(GraphError::WeightMismatch {
                    source_id: edge.source,
                    target_id: edge.target,
                    weight: edge.weight,
                    distance,
                });
            }
        }

        Ok(Self::from_parts(nodes, edges))
    }

    /// Callers guarantee the invariants checked in `new`
    pub(crate) fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {

        let mut incident: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
        for (index, edge) in edges.iter().enumerate() {
            incident[edge.source].push(index);
            incident[edge.target].push(index);
        }

        log::debug!("graph built: {} nodes, {} edges", nodes.len(), edges.len());

        Self { nodes, edges, incident }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id < self.nodes.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every stored edge touching `id`, both directions included
    pub fn incident_edges(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.incident
            .get(id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&index| &self.edges[index])
    }

    /// Neighbors of `id` with the edge weight to reach them
    /// A neighbor appears once per stored edge record
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.incident_edges(id)
            .filter_map(move |edge| edge.other(id).map(|n| (n, edge.weight)))
    }

    /// Lightest stored edge weight between a and b
    pub fn edge_weight(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.incident_edges(a)
            .filter(|edge| edge.other(a) == Some(b))
            .map(|edge| edge.weight)
            .reduce(f64::min)
    }
}
