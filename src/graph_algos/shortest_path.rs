use crate::graph::{Graph, NodeId};
use super::GraphNodeMap;

/// Construct the shortest path from the goal node to the start node
/// Returns the ordered path as a vector of nodes from start to goal
/// node_map: GraphNodeMap<N, C> - map of nodes with their parent index and cost
/// goal_index: usize - index of the goal node in the node_map
pub(crate) fn shortest_path<N, C>(node_map: &GraphNodeMap<N, C>, goal_index: usize) -> Vec<N>
where
    N: Clone,
{

    let mut path = Vec::new();
    let mut current_index = goal_index;

    // Trace back from goal to start, the start node's parent is usize::MAX
    while let Some((node, &(parent_index, _))) = node_map.get_index(current_index) {
        path.push(node.clone());
        current_index = parent_index;
    }

    // The path is in reverse order, so reverse it
    path.reverse();
    path
}

/// Total weight of walking `nodes` in order over the lightest stored edges
/// Returns None if two consecutive nodes are not connected
pub fn path_weight(graph: &Graph, nodes: &[NodeId]) -> Option<f64> {
    nodes
        .windows(2)
        .map(|w| graph.edge_weight(w[0], w[1]))
        .sum()
}
