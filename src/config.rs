use crate::graph::Graph;
use crate::graph::builder::{build_graph, build_graph_seeded};


/// Parameters for generating a random spatial graph
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphConfig {
    /// Number of nodes to sample
    pub node_count: usize,
    /// Width of the sampling area
    pub width: f64,
    /// Height of the sampling area
    pub height: f64,
    /// Nodes strictly closer than this are connected
    pub max_edge_distance: f64,
    /// Fixed seed for reproducible graphs, None draws from the thread generator
    pub seed: Option<u64>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_count: 100,
            width: 800.0,
            height: 600.0,
            max_edge_distance: 100.0,
            seed: None,
        }
    }
}

impl GraphConfig {

    pub fn build(&self) -> Graph {
        match self.seed {
            Some(seed) => build_graph_seeded(self.node_count, self.width, self.height, self.max_edge_distance, seed),
            None => build_graph(self.node_count, self.width, self.height, self.max_edge_distance),
        }
    }
}
