use crate::errors::PathError;
use crate::collections::{FxIndexMap, FxHashSet};
use crate::graph::{Edge, Graph, NodeId};
use super::{ExplorationTrace, GraphNodeMap, PathResult, ShortestPath, shortest_path};

use std::{collections::BinaryHeap, cmp::Ordering};
use indexmap::map::Entry::{Occupied, Vacant};



/// Identify the shortest path between two nodes using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// Returns the exploration trace along with the path, an unreachable end yields an empty path
pub fn find_shortest_path(graph: &Graph, start: NodeId, end: NodeId) -> Result<PathResult, PathError> {
    find_shortest_path_until(graph, start, end, || false)
}


/// Same as `find_shortest_path`, `should_abort` is polled once per visited node
/// The whole result is discarded when it returns true
pub fn find_shortest_path_until<A>(graph: &Graph, start: NodeId, end: NodeId, should_abort: A) -> Result<PathResult, PathError>
where
    A: FnMut() -> bool,
    {

    check_node(graph, start)?;
    check_node(graph, end)?;

    // Explore the graph - terminates when the end node is visited
    let Exploration { node_map, trace } = explore(graph, start, Some(end), should_abort)?;

    // Only nodes with a finite distance are in the map
    let path = match node_map.get_full(&end) {
        Some((end_index, _, &(_, cost))) => ShortestPath::new(shortest_path(&node_map, end_index), cost),
        None => ShortestPath::unreachable(),
    };

    log::debug!(
        "search {start} -> {end}: {} relaxations, {}",
        trace.len(),
        if path.is_empty() { "unreachable".to_string() } else { format!("{} nodes, weight {}", path.len(), path.total_weight()) }
    );

    Ok(PathResult {
        trace: ExplorationTrace::new(trace),
        path,
    })
}


/// Returns the distance from start to every node, None for unreachable nodes
pub fn shortest_distances(graph: &Graph, start: NodeId) -> Result<Vec<Option<f64>>, PathError> {

    check_node(graph, start)?;

    // No goal - runs until every reachable node is visited
    let Exploration { node_map, .. } = explore(graph, start, None, || false)?;

    let mut distances = vec![None; graph.node_count()];
    for (&node, &(_, cost)) in node_map.iter() {
        distances[node] = Some(cost);
    }

    Ok(distances)
}


fn check_node(graph: &Graph, id: NodeId) -> Result<(), PathError> {
    if graph.contains(id) {
        Ok(())
    } else {
        log::warn!("node {id} is not in a graph of {} nodes", graph.node_count());
        Err(PathError::InvalidNode(id))
    }
}


/// Search state left behind by `explore`
struct Exploration {
    node_map: GraphNodeMap<NodeId, f64>,
    trace: Vec<Edge>,
}


/// Traverses the graph using Dijkstra's algorithm
/// Returns a map of nodes with their smallest costs along with every improving relaxation
fn explore<A>(graph: &Graph, start: NodeId, goal: Option<NodeId>, mut should_abort: A) -> Result<Exploration, PathError>
where
    A: FnMut() -> bool,
    {

    // Nodes to visit - binary heap sorts Biggest to Smallest
    // Candidate ordering is reversed so the smallest (cost, id) pops first
    let mut nodes_to_visit: BinaryHeap<Candidate> = BinaryHeap::new();

    // Nodes with a finite tentative distance, absent nodes are at infinity
    // The tuple contains (parent_index, cost) where parent_index is the index of the parent node in the map
    // for the start node, parent_index is set to usize::MAX to indicate it has no parent
    let mut node_map: GraphNodeMap<NodeId, f64> = FxIndexMap::default();

    // visited nodes - cost is final
    let mut visited: FxHashSet<NodeId> = FxHashSet::default();

    let mut trace: Vec<Edge> = Vec::new();

    node_map.insert(start, (usize::MAX, 0.0));
    nodes_to_visit.push(Candidate {
        node: start,
        cost: 0.0,
    });

    // An empty heap means every remaining node is at infinity
    while let Some(Candidate { node, cost }) = nodes_to_visit.pop() {

        let Some((index, _, &(_, best))) = node_map.get_full(&node) else {
            continue;
        };

        // Stale entry - a cheaper path was found after this one was queued
        if cost > best || !visited.insert(node) {
            continue;
        }

        if should_abort() {
            log::debug!("search from {start} aborted after {} visits", visited.len());
            return Err(PathError::Aborted);
        }

        // The goal's distance is final once it is selected
        if goal == Some(node) {
            break;
        }

        for edge in graph.incident_edges(node) {

            let Some(neighbor) = edge.other(node) else {
                continue;
            };
            if visited.contains(&neighbor) {
                continue;
            }

            // new cost to reach the neighbor = edge cost + node cost
            let new_cost = best + edge.weight;
            if !new_cost.is_finite() {
                continue;
            }

            // Strictly better paths only, the reverse record of an edge relaxed
            // this step finds an equal cost and is skipped here
            match node_map.entry(neighbor) {
                Vacant(e) => {
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if new_cost < e.get().1 {
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            log::trace!("relaxed {neighbor} via {node}: {new_cost}");
            trace.push(*edge);

            nodes_to_visit.push(Candidate {
                node: neighbor,
                cost: new_cost,
            });
        }
    }

    Ok(Exploration { node_map, trace })
}


/// Heap entry - lower cost first, then lower id
#[derive(Debug)]
struct Candidate {
    node: NodeId,
    cost: f64,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}
impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Candidate {}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;
    use crate::graph::builder::{build_graph_seeded, graph_from_points};
    use crate::graph_algos::path_weight;

    // Both directions of every pair, in the order given
    fn undirected(points: &[(f64, f64)], pairs: &[(NodeId, NodeId)]) -> Graph {
        let nodes: Vec<Node> = points.iter().enumerate().map(|(i, &(x, y))| Node::new(i, x, y)).collect();
        let mut edges = Vec::new();
        for &(a, b) in pairs {
            edges.push(Edge::between(&nodes[a], &nodes[b]));
            edges.push(Edge::between(&nodes[b], &nodes[a]));
        }
        Graph::new(nodes, edges).unwrap()
    }

    fn square_with_diagonal() -> Graph {
        undirected(
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (50.0, 50.0)],
            &[(0, 1), (1, 2), (2, 3), (0, 3), (0, 2)],
        )
    }

    // Lowest weight over every simple path, found by exhaustive search
    fn brute_force(graph: &Graph, start: NodeId, end: NodeId) -> Option<f64> {
        fn walk(graph: &Graph, node: NodeId, end: NodeId, cost: f64, on_path: &mut Vec<bool>, best: &mut Option<f64>) {
            if node == end {
                *best = Some(best.map_or(cost, |b| b.min(cost)));
                return;
            }
            // both records of a connection list the same neighbor
            let mut nexts: Vec<(NodeId, f64)> = graph.neighbors(node).collect();
            nexts.sort_by_key(|&(n, _)| n);
            nexts.dedup_by_key(|&mut (n, _)| n);

            for (next, weight) in nexts {
                if on_path[next] {
                    continue;
                }
                on_path[next] = true;
                walk(graph, next, end, cost + weight, on_path, best);
                on_path[next] = false;
            }
        }

        let mut on_path = vec![false; graph.node_count()];
        on_path[start] = true;
        let mut best = None;
        walk(graph, start, end, 0.0, &mut on_path, &mut best);
        best
    }

    #[test]
    fn test_prefers_lighter_edge_over_fewer_hops() {
        let graph = square_with_diagonal();
        let result = find_shortest_path(&graph, 0, 2).unwrap();

        assert_eq!(result.path.nodes(), &[0, 2]);
        assert!((result.path.total_weight() - 200f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_isolated_node_is_unreachable() {
        let graph = square_with_diagonal();
        let result = find_shortest_path(&graph, 0, 4).unwrap();

        assert!(!result.is_reachable());
        assert!(result.path.is_empty());
        // the whole component was explored before giving up
        assert_eq!(result.trace.len(), 3);
    }

    #[test]
    fn test_start_equals_end() {
        let graph = square_with_diagonal();
        for node in 0..graph.node_count() {
            let result = find_shortest_path(&graph, node, node).unwrap();
            assert_eq!(result.path.nodes(), &[node]);
            assert_eq!(result.path.total_weight(), 0.0);
            assert!(result.trace.is_empty());
        }
    }

    #[test]
    fn test_invalid_node() {
        let graph = square_with_diagonal();
        assert_eq!(find_shortest_path(&graph, 0, 5), Err(PathError::InvalidNode(5)));
        assert_eq!(find_shortest_path(&graph, 17, 0), Err(PathError::InvalidNode(17)));
        assert_eq!(shortest_distances(&graph, 5), Err(PathError::InvalidNode(5)));
    }

    #[test]
    fn test_empty_graph_rejects_any_node() {
        let graph = Graph::default();
        assert_eq!(find_shortest_path(&graph, 0, 0), Err(PathError::InvalidNode(0)));
    }

    #[test]
    fn test_reverse_edge_record_is_not_traced() {
        // graph_from_points stores 0->1 and 1->0
        let graph = graph_from_points([(0.0, 0.0), (1.0, 0.0)], 2.0);
        assert_eq!(graph.edge_count(), 2);

        let result = find_shortest_path(&graph, 0, 1).unwrap();
        assert_eq!(result.trace.as_slice(), &[Edge { source: 0, target: 1, weight: 1.0 }]);
        assert_eq!(result.path.nodes(), &[0, 1]);
    }

    #[test]
    fn test_each_neighbor_traced_once_per_visit() {
        let graph = build_graph_seeded(40, 100.0, 100.0, 35.0, 3);
        let result = find_shortest_path(&graph, 0, 39).unwrap();

        // work out which endpoint was being visited for every entry
        let mut distance = vec![f64::INFINITY; graph.node_count()];
        distance[0] = 0.0;
        let mut relaxed: FxHashSet<(NodeId, NodeId)> = FxHashSet::default();

        for edge in &result.trace {
            let (from, to) = if distance[edge.source] + edge.weight < distance[edge.target] {
                (edge.source, edge.target)
            } else {
                (edge.target, edge.source)
            };
            distance[to] = distance[from] + edge.weight;

            // a node is visited once, so (from, to) repeating means both records were traced
            assert!(relaxed.insert((from, to)), "{to} relaxed twice from {from}: {edge:?}");
        }

        // the graph stores both records of every connection
        assert!(graph.edges().iter().all(|e| graph.edges().iter().any(|r| r.source == e.target && r.target == e.source)));
        assert!(!result.trace.is_empty());
    }

    #[test]
    fn test_ties_break_by_lower_id() {
        // 0 reaches 2 first in edge order but 1 is selected first
        let nodes = vec![
            Node::new(0, 0.0, 0.0),
            Node::new(1, 5.0, 0.0),
            Node::new(2, 0.0, 5.0),
            Node::new(3, 5.0, 5.0),
        ];
        let edges = vec![
            Edge::between(&nodes[0], &nodes[2]),
            Edge::between(&nodes[0], &nodes[1]),
            Edge::between(&nodes[2], &nodes[3]),
            Edge::between(&nodes[1], &nodes[3]),
        ];
        let graph = Graph::new(nodes, edges).unwrap();

        let result = find_shortest_path(&graph, 0, 3).unwrap();
        let traced: Vec<(NodeId, NodeId)> = result.trace.iter().map(|e| (e.source, e.target)).collect();

        assert_eq!(traced, vec![(0, 2), (0, 1), (1, 3)]);
        assert_eq!(result.path.nodes(), &[0, 1, 3]);
    }

    #[test]
    fn test_stops_when_end_is_selected() {
        let graph = graph_from_points([(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)], 1.5);
        let result = find_shortest_path(&graph, 0, 1).unwrap();

        assert_eq!(result.path.nodes(), &[0, 1]);
        assert!(result.trace.iter().all(|e| !e.touches(2)), "explored past the end node");
    }

    #[test]
    fn test_trace_only_records_improvements() {
        for seed in 0..10 {
            let graph = build_graph_seeded(50, 100.0, 100.0, 30.0, seed);
            let result = find_shortest_path(&graph, 0, 49).unwrap();

            // replay the trace against a fresh distance table
            let mut distance = vec![f64::INFINITY; graph.node_count()];
            distance[0] = 0.0;
            for edge in &result.trace {
                let via_source = distance[edge.source] + edge.weight;
                let via_target = distance[edge.target] + edge.weight;
                if via_source < distance[edge.target] {
                    distance[edge.target] = via_source;
                } else if via_target < distance[edge.source] {
                    distance[edge.source] = via_target;
                } else {
                    panic!("seed {seed}: edge {edge:?} did not improve any distance");
                }
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let graph = build_graph_seeded(80, 200.0, 200.0, 40.0, 11);
        let first = find_shortest_path(&graph, 3, 70).unwrap();
        for _ in 0..5 {
            assert_eq!(find_shortest_path(&graph, 3, 70).unwrap(), first);
        }
    }

    #[test]
    fn test_matches_brute_force() {
        for seed in 0..20 {
            let graph = build_graph_seeded(8, 100.0, 100.0, 50.0, seed);

            for start in 0..graph.node_count() {
                for end in 0..graph.node_count() {
                    let result = find_shortest_path(&graph, start, end).unwrap();
                    let expected = brute_force(&graph, start, end);

                    match expected {
                        Some(best) => {
                            let nodes = result.path.nodes();
                            assert_eq!(nodes.first(), Some(&start));
                            assert_eq!(nodes.last(), Some(&end));

                            let walked = path_weight(&graph, nodes).unwrap();
                            assert!((walked - result.path.total_weight()).abs() < 1e-9);
                            assert!(
                                (best - result.path.total_weight()).abs() < 1e-9,
                                "seed {seed}, {start} -> {end}: got {} expected {best}",
                                result.path.total_weight()
                            );
                        }
                        None => assert!(!result.is_reachable(), "seed {seed}, {start} -> {end} should be unreachable"),
                    }
                }
            }
        }
    }

    #[test]
    fn test_abort() {
        let graph = graph_from_points([(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)], 1.5);

        // abort on the second visited node
        let mut polls = 0;
        let result = find_shortest_path_until(&graph, 0, 3, || {
            polls += 1;
            polls > 1
        });
        assert_eq!(result, Err(PathError::Aborted));
        assert_eq!(polls, 2);

        let result = find_shortest_path_until(&graph, 0, 3, || false);
        assert_eq!(result, find_shortest_path(&graph, 0, 3));
    }

    #[test]
    fn test_shortest_distances() {
        let graph = square_with_diagonal();
        let distances = shortest_distances(&graph, 0).unwrap();

        assert_eq!(distances[0], Some(0.0));
        assert_eq!(distances[1], Some(10.0));
        assert_eq!(distances[3], Some(10.0));
        assert!((distances[2].unwrap() - 200f64.sqrt()).abs() < 1e-9);
        assert_eq!(distances[4], None);
    }

    #[test]
    fn test_shortest_distances_agree_with_paths() {
        let graph = build_graph_seeded(40, 100.0, 100.0, 30.0, 8);
        let distances = shortest_distances(&graph, 0).unwrap();

        for end in 0..graph.node_count() {
            let result = find_shortest_path(&graph, 0, end).unwrap();
            match distances[end] {
                Some(d) => assert_eq!(result.path.total_weight(), d),
                None => assert!(!result.is_reachable()),
            }
        }
    }
}
