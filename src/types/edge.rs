use serde::{Deserialize, Serialize};

use crate::types::NodeId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: u64,
}

impl Edge {
    pub fn new(from: &str, to: &str, capacity: u64) -> Edge {
        Edge {
            from: NodeId::from(from),
            to: NodeId::from(to),
            capacity,
        }
    }

    pub fn to_json(&self) -> json::JsonValue {
        json::object! {
            from: self.from.as_str(),
            to: self.to.as_str(),
            capacity: self.capacity,
        }
    }
}

/// Sum of the capacities of all edges leaving `source`, an upper bound on any flow out of it.
pub fn outgoing_capacity(edges: &[Edge], source: &NodeId) -> u128 {
    edges
        .iter()
        .filter(|e| e.from == *source)
        .map(|e| u128::from(e.capacity))
        .sum()
}
