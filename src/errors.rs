use thiserror::Error;

use crate::graph::NodeId;


#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("node {0} is not in the graph")]
    InvalidNode(NodeId), // start or end id outside the graph
    #[error("search aborted by caller")]
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("node at position {position} has id {id}")]
    NodeIdMismatch { position: usize, id: NodeId }, // ids must be 0..n in order
    #[error("edge {0} -> {1} refers to a missing node")]
    MissingNode(NodeId, NodeId),
    #[error("self-edge on node {0}")]
    SelfEdge(NodeId),
    #[error("edge {0} -> {1} has a negative or NaN weight")]
    InvalidWeight(NodeId, NodeId),
    #[error("edge {source_id} -> {target_id} has weight {weight}, endpoints are {distance} apart")]
    WeightMismatch { source_id: NodeId, target_id: NodeId, weight: f64, distance: f64 },
}
