use crate::errors::PathPlannerError;
use super::{GraphNodeMap, NO_PARENT};

/// Construct the shortest path from the goal node to the start node
/// Returns the ordered path as a vector of nodes from start to goal
/// node_map: GraphNodeMap<N, C> - map of nodes with their parent index and cost
/// goal_index: usize - index of the goal node in the node_map
pub fn shortest_path<N, C>(node_map: &GraphNodeMap<N, C>, goal_index: usize) -> Result<Vec<N>, PathPlannerError>
where
    N: Clone,
{

    let mut path = Vec::new();
    let mut current_index = goal_index;

    // Trace back from goal to start
    while current_index != NO_PARENT {
        match node_map.get_index(current_index) {
            Some((node, &(parent_index, _))) => {
                path.push(node.clone());
                current_index = parent_index;
            }
            None => return Err(PathPlannerError::NoPathFound),
        }

        // A parent chain longer than the map means the map is corrupt
        if path.len() > node_map.len() {
            return Err(PathPlannerError::NoPathFound);
        }
    }

    path.reverse();

    if path.is_empty() {
        return Err(PathPlannerError::NoPathFound);
    }

    Ok(path)
}
