use crate::graph::augmenting_path::find_path;
use crate::graph::residual::ResidualGraph;
use crate::graph::Strategy;
use crate::rpc::call_context::CallContext;
use crate::types::{Edge, NodeId};
use json::JsonValue;
use std::collections::HashSet;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowResult {
    /// Sum of up to one `u64` capacity per edge leaving the source.
    pub max_flow: u128,
    pub execution_time_ms: f64,
}

/// Both strategies run over the same network.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowComparison {
    /// The depth-first result; equal to the breadth-first one whenever `agree()` holds.
    pub max_flow: u128,
    pub ford_fulkerson: FlowResult,
    pub edmonds_karp: FlowResult,
}

impl FlowComparison {
    pub fn agree(&self) -> bool {
        self.ford_fulkerson.max_flow == self.edmonds_karp.max_flow
    }

    pub fn to_json(&self) -> JsonValue {
        json::object! {
            maxFlow: flow_to_json(self.max_flow),
            fordFulkersonTime: self.ford_fulkerson.execution_time_ms,
            edmondsKarpTime: self.edmonds_karp.execution_time_ms,
            agree: self.agree(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnswerCheck {
    pub is_correct: bool,
    pub player_answer: u64,
    pub correct_answer: u128,
    pub ford_fulkerson_time_ms: f64,
    pub edmonds_karp_time_ms: f64,
}

/// JSON number when the flow fits into `u64`, decimal string otherwise.
pub fn flow_to_json(flow: u128) -> JsonValue {
    match u64::try_from(flow) {
        Ok(flow) => JsonValue::from(flow),
        Err(_) => JsonValue::from(flow.to_string()),
    }
}

/// Pushes the bottleneck capacity of `path` through the residual graph and
/// returns it. Paths with fewer than two nodes, with unknown nodes or visiting
/// a node twice carry no flow.
pub fn augment(graph: &mut ResidualGraph, path: &[NodeId]) -> u128 {
    let indices = path
        .iter()
        .map(|n| graph.index_of(n))
        .collect::<Option<Vec<usize>>>();
    match indices {
        Some(indices) if is_simple(&indices) => augment_indices(graph, &indices),
        _ => 0,
    }
}

fn is_simple(path: &[usize]) -> bool {
    let mut seen = HashSet::new();
    path.iter().all(|n| seen.insert(*n))
}

/// `path` must not repeat a node, otherwise an arc could be pushed past its capacity.
fn augment_indices(graph: &mut ResidualGraph, path: &[usize]) -> u128 {
    let bottleneck = path
        .windows(2)
        .map(|w| graph.capacity(w[0], w[1]))
        .min()
        .unwrap_or_default();
    if bottleneck == 0 {
        return 0;
    }
    for window in path.windows(2) {
        if let [from, to] = window {
            graph.push(*from, *to, bottleneck);
        }
    }
    bottleneck
}

/// Computes the maximum flow from `source` to `sink` on a fresh residual graph.
///
/// A missing source or sink, or `source == sink`, gives a flow of zero.
pub fn max_flow(edges: &[Edge], source: &NodeId, sink: &NodeId, strategy: Strategy) -> FlowResult {
    let start_time = Instant::now();
    let mut graph = ResidualGraph::new(edges);

    let mut flow = 0;
    if let (Some(source), Some(sink)) = (graph.index_of(source), graph.index_of(sink)) {
        while let Some(path) = find_path(&graph, source, sink, strategy) {
            let new_flow = augment_indices(&mut graph, &path);
            if new_flow == 0 {
                break;
            }
            flow += new_flow;
        }
    }

    FlowResult {
        max_flow: flow,
        execution_time_ms: start_time.elapsed().as_secs_f64() * 1000.0,
    }
}

pub fn compare_strategies(
    edges: &[Edge],
    source: &NodeId,
    sink: &NodeId,
    call_context: &CallContext,
) -> FlowComparison {
    let ford_fulkerson = max_flow(edges, source, sink, Strategy::FordFulkerson);
    call_context.log_message(&format!(
        "{}: max flow {} in {:.4} ms",
        Strategy::FordFulkerson,
        ford_fulkerson.max_flow,
        ford_fulkerson.execution_time_ms
    ));
    let edmonds_karp = max_flow(edges, source, sink, Strategy::EdmondsKarp);
    call_context.log_message(&format!(
        "{}: max flow {} in {:.4} ms",
        Strategy::EdmondsKarp,
        edmonds_karp.max_flow,
        edmonds_karp.execution_time_ms
    ));

    let comparison = FlowComparison {
        max_flow: ford_fulkerson.max_flow,
        ford_fulkerson,
        edmonds_karp,
    };
    if !comparison.agree() {
        call_context.log_message(&format!(
            "Strategies disagree on {source} -> {sink}: {} vs {}",
            ford_fulkerson.max_flow, edmonds_karp.max_flow
        ));
    }
    comparison
}

pub fn check_answer(
    edges: &[Edge],
    source: &NodeId,
    sink: &NodeId,
    player_answer: u64,
    call_context: &CallContext,
) -> AnswerCheck {
    let comparison = compare_strategies(edges, source, sink, call_context);
    AnswerCheck {
        is_correct: u128::from(player_answer) == comparison.max_flow,
        player_answer,
        correct_answer: comparison.max_flow,
        ford_fulkerson_time_ms: comparison.ford_fulkerson.execution_time_ms,
        edmonds_karp_time_ms: comparison.edmonds_karp.execution_time_ms,
    }
}
