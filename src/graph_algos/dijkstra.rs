use crate::errors::PathPlannerError;
use super::{shortest_path, GraphNodeMap, NO_PARENT};

use std::{collections::BinaryHeap, hash::Hash, cmp::Ordering, fmt::Debug};
use num_traits::{CheckedAdd, Zero};
use indexmap::map::Entry::{Occupied, Vacant};
use tracing::{debug, trace};




/// Identify the shortest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// From start Node, traverse through graph until node meets goal criteria
/// Edge costs must be non-negative
pub fn dijkstra<N, C, IT, NN, G>(start: N, neighbors: NN, goal: G) -> Result<Vec<N>, PathPlannerError>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + CheckedAdd + Ord + Copy + Debug,
    G: Fn(&N) -> bool, // node qualifier for goal
    {

    // Build the graph - terminates when the goal is met
    let (node_map, goal_index) = build_dijkstra_graph([start], neighbors, goal);

    match goal_index {
        Some(goal_index) => shortest_path(&node_map, goal_index),
        None => Err(PathPlannerError::NoPathFound),
    }
}


/// Returns a full map of the graph, includes all (reachable) nodes and costs
pub fn dijkstra_nodes_full<N, C, IT, NN>(start: N, neighbors: NN) -> GraphNodeMap<N, C>
where
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, C)>,
    C: Zero + CheckedAdd + Ord + Copy + Debug,
    {

    dijkstra_nodes_multi([start], neighbors)
}


/// Full map of the graph seeded from several start nodes at once
/// Every start costs zero, so each node ends up with its distance to the closest start
/// Duplicate starts are ignored
pub fn dijkstra_nodes_multi<N, C, S, IT, NN>(starts: S, neighbors: NN) -> GraphNodeMap<N, C>
where
    N: Eq + Hash + Clone + Debug,
    S: IntoIterator<Item = N>,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, C)>,
    C: Zero + CheckedAdd + Ord + Copy + Debug,
    {

    // No goal - runs until every reachable node is settled
    let (node_map, _) = build_dijkstra_graph(starts, neighbors, |_| false);

    node_map
}


/// Traverses the graph using Dijkstra's algorithm
/// Returns a map of nodes with their smallest costs along with the index of the goal node
fn build_dijkstra_graph<N, C, S, IT, NN, G>(starts: S, neighbors: NN, goal_fn: G) -> (GraphNodeMap<N, C>, Option<usize>)
where
    N: Eq + Hash + Clone + Debug,
    S: IntoIterator<Item = N>,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + CheckedAdd + Ord + Copy + Debug,
    G: Fn(&N) -> bool // Returns true if goal is met
    {

    // Nodes to visit - binary heap sorts Biggest to Smallest
    // NodeId reverses the ordering so the cheapest node is popped first
    let mut nodes_to_visit: BinaryHeap<NodeId<C>> = BinaryHeap::new();

    // Every node seen so far
    // The tuple contains (parent_index, cost) where parent_index is the index of the parent node in the map
    // for start nodes, parent_index is NO_PARENT
    let mut nodes_map: GraphNodeMap<N, C> = GraphNodeMap::default();

    for start in starts {
        let (start_index, inserted) = nodes_map.insert_full(start, (NO_PARENT, Zero::zero()));
        if inserted.is_none() {
            nodes_to_visit.push(NodeId {
                index: start_index,
                cost: Zero::zero(),
            });
        }
    }

    debug!(starts = nodes_to_visit.len(), "running dijkstra");

    let mut settled = 0usize;

    // Loop over each node to visit, removing the smallest node
    while let Some(NodeId {cost, index}) = nodes_to_visit.pop() {

        // fetch current best cost for node
        let Some((node, &(_, c))) = nodes_map.get_index(index) else {
            continue;
        };

        // A cheaper entry for this node was already popped - it is settled
        if cost > c {
            continue;
        }

        settled += 1;
        trace!(?node, ?cost, "settled");

        // Check if we've reached the goal
        if goal_fn(node) {
            debug!(settled, seen = nodes_map.len(), "goal reached");
            return (nodes_map, Some(index));
        }

        for (neighbor, edge_cost) in neighbors(node) {

            // A cost past the range of C can never be a shortest path
            let Some(new_cost) = c.checked_add(&edge_cost) else {
                trace!(?neighbor, "edge cost overflows, skipped");
                continue;
            };

            // Settled nodes can never improve with non-negative edges,
            // so only strict improvements are recorded
            let neighbor_index = match nodes_map.entry(neighbor) {
                Vacant(e) => {
                    let i = e.index();
                    e.insert((index, new_cost));
                    i
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        e.insert((index, new_cost));
                        e.index()
                    } else {
                        continue;
                    }
                }
            };

            nodes_to_visit.push(NodeId {
                index: neighbor_index,
                cost: new_cost,
            });
        }
    }

    debug!(settled, "frontier exhausted");

    (nodes_map, None)
}


/// Node identifier
/// - for ordering we only need cost and a way to identify the node
/// - equal costs are broken by discovery order so results are reproducible
#[derive(Debug)]
struct NodeId<T> {
    index: usize,
    cost: T
}

impl<T: Ord> Ord for NodeId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.cmp(&self.cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}
impl<T: Ord> PartialOrd for NodeId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: PartialEq> PartialEq for NodeId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.index == other.index
    }
}
impl<T: Eq> Eq for NodeId<T> {}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    // Diamond-shaped graph: A -> B -> D and A -> C -> D
    fn create_test_graph() -> HashMap<String, Vec<(String, u32)>> {
        let mut graph = HashMap::new();

        graph.insert("A".to_string(), vec![
            ("B".to_string(), 1),
            ("C".to_string(), 3),
        ]);
        graph.insert("B".to_string(), vec![("D".to_string(), 5)]);
        graph.insert("C".to_string(), vec![("D".to_string(), 1)]);
        graph.insert("D".to_string(), vec![]);

        graph
    }

    fn create_neighbor_fn(graph: &HashMap<String, Vec<(String, u32)>>) -> impl Fn(&String) -> Vec<(String, u32)> + '_ {
        move |node: &String| {
            graph.get(node).cloned().unwrap_or_default()
        }
    }

    fn costs(node_map: &GraphNodeMap<String, u32>) -> HashMap<String, u32> {
        node_map.iter().map(|(node, (_, cost))| (node.clone(), *cost)).collect()
    }

    #[test]
    fn test_nodes_full_diamond() {
        let graph = create_test_graph();

        let result = dijkstra_nodes_full("A".to_string(), create_neighbor_fn(&graph));
        let costs = costs(&result);

        assert_eq!(costs["A"], 0);
        assert_eq!(costs["B"], 1);
        assert_eq!(costs["C"], 3);
        assert_eq!(costs["D"], 4); // A->C->D
    }

    #[test]
    fn test_nodes_full_with_cycle() {
        // A -> B -> C -> A
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("B".to_string(), 1)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1)]);
        graph.insert("C".to_string(), vec![("A".to_string(), 1), ("D".to_string(), 2)]);
        graph.insert("D".to_string(), vec![]);

        let result = dijkstra_nodes_full("A".to_string(), create_neighbor_fn(&graph));
        let costs = costs(&result);

        assert_eq!(costs["A"], 0);
        assert_eq!(costs["B"], 1);
        assert_eq!(costs["C"], 2);
        assert_eq!(costs["D"], 4);
        // start keeps no parent even though C -> A exists
        assert_eq!(result["A"].0, NO_PARENT);
    }

    #[test]
    fn test_dijkstra_finds_optimal_path() {
        let graph = create_test_graph();

        let path = dijkstra("A".to_string(), create_neighbor_fn(&graph), |node| node == "D").unwrap();

        assert_eq!(path, vec!["A", "C", "D"].into_iter().map(String::from).collect::<Vec<_>>());
    }

    #[test]
    fn test_dijkstra_start_is_goal() {
        let graph = create_test_graph();

        let path = dijkstra("A".to_string(), create_neighbor_fn(&graph), |node| node == "A").unwrap();

        assert_eq!(path, vec!["A".to_string()]);
    }

    #[test]
    fn test_dijkstra_handles_unreachable_goal() {
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("B".to_string(), 1)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1)]);
        graph.insert("C".to_string(), vec![]);
        graph.insert("D".to_string(), vec![]); // D is not connected

        let result = dijkstra("A".to_string(), create_neighbor_fn(&graph), |node| node == "D");

        assert_eq!(result, Err(PathPlannerError::NoPathFound));
    }

    #[test]
    fn test_dijkstra_complex_graph() {
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("B".to_string(), 4), ("C".to_string(), 2)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1), ("D".to_string(), 5)]);
        graph.insert("C".to_string(), vec![("D".to_string(), 8), ("E".to_string(), 10)]);
        graph.insert("D".to_string(), vec![("E".to_string(), 2), ("F".to_string(), 6)]);
        graph.insert("E".to_string(), vec![("F".to_string(), 3)]);
        graph.insert("F".to_string(), vec![]);

        let path = dijkstra("A".to_string(), create_neighbor_fn(&graph), |node| node == "F").unwrap();

        let total_cost: u32 = path.windows(2)
            .map(|pair| {
                graph[&pair[0]].iter()
                    .find(|(node, _)| node == &pair[1])
                    .map(|(_, cost)| *cost)
                    .unwrap()
            })
            .sum();

        // A->B->D->E->F
        assert_eq!(total_cost, 14);
    }

    #[test]
    fn test_nodes_multi_uses_closest_start() {
        // X -> A -> B -> C and Y -> C
        let mut graph = HashMap::new();
        graph.insert("X".to_string(), vec![("A".to_string(), 1)]);
        graph.insert("A".to_string(), vec![("B".to_string(), 1)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1)]);
        graph.insert("Y".to_string(), vec![("C".to_string(), 1)]);

        let result = dijkstra_nodes_multi(
            ["X".to_string(), "Y".to_string(), "X".to_string()],
            create_neighbor_fn(&graph),
        );
        let costs = costs(&result);

        assert_eq!(costs["X"], 0);
        assert_eq!(costs["Y"], 0);
        assert_eq!(costs["B"], 2);
        assert_eq!(costs["C"], 1);
    }

    #[test]
    fn test_equal_costs_pop_in_discovery_order() {
        let mut heap = BinaryHeap::new();
        heap.push(NodeId { index: 2, cost: 1u32 });
        heap.push(NodeId { index: 0, cost: 1u32 });
        heap.push(NodeId { index: 1, cost: 0u32 });

        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|n| n.index)).collect();

        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn test_overflowing_edge_is_skipped() {
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("B".to_string(), u32::MAX), ("C".to_string(), 2)]);
        graph.insert("B".to_string(), vec![("D".to_string(), 1)]);
        graph.insert("C".to_string(), vec![("D".to_string(), 3)]);

        let result = dijkstra_nodes_full("A".to_string(), create_neighbor_fn(&graph));
        let costs = costs(&result);

        assert_eq!(costs["B"], u32::MAX);
        assert_eq!(costs["D"], 5);
    }
}
