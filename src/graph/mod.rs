use std::fmt::{Display, Formatter};
use std::str::FromStr;

mod augmenting_path;
mod flow;
mod network;
mod residual;

pub use crate::graph::augmenting_path::augmenting_path;
pub use crate::graph::flow::{
    augment, check_answer, compare_strategies, flow_to_json, max_flow, AnswerCheck, FlowComparison,
    FlowResult,
};
pub use crate::graph::network::{
    generate_network, CapacityRangeError, DEFAULT_MAX_CAPACITY, DEFAULT_MIN_CAPACITY, SINK,
    SOURCE, TOPOLOGY,
};
pub use crate::graph::residual::ResidualGraph;

/// How augmenting paths are discovered in the residual graph.
///
/// Both strategies compute the same maximum flow; they differ only in which
/// path is picked per round and therefore in how many rounds are needed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// Depth-first search following the residual graph's neighbour order.
    FordFulkerson,
    /// Breadth-first search, always augmenting along a path with the fewest edges.
    EdmondsKarp,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::FordFulkerson, Strategy::EdmondsKarp];
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Strategy::FordFulkerson => write!(f, "Ford-Fulkerson"),
            Strategy::EdmondsKarp => write!(f, "Edmonds-Karp"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dfs" | "ford-fulkerson" | "fordfulkerson" => Ok(Strategy::FordFulkerson),
            "bfs" | "edmonds-karp" | "edmondskarp" => Ok(Strategy::EdmondsKarp),
            _ => Err(format!("Unknown strategy: {s}")),
        }
    }
}
