use crate::graph::residual::ResidualGraph;
use crate::graph::Strategy;
use crate::types::NodeId;
use std::collections::VecDeque;

/// Finds a path from `source` to `sink` along arcs with positive residual
/// capacity, or `None` if the sink is unreachable.
///
/// The returned path starts at `source` and ends at `sink`.
pub fn augmenting_path(
    graph: &ResidualGraph,
    source: &NodeId,
    sink: &NodeId,
    strategy: Strategy,
) -> Option<Vec<NodeId>> {
    let source = graph.index_of(source)?;
    let sink = graph.index_of(sink)?;
    find_path(graph, source, sink, strategy)
        .map(|path| path.into_iter().map(|n| graph.label(n).clone()).collect())
}

pub(crate) fn find_path(
    graph: &ResidualGraph,
    source: usize,
    sink: usize,
    strategy: Strategy,
) -> Option<Vec<usize>> {
    if source == sink {
        return None;
    }
    match strategy {
        Strategy::FordFulkerson => depth_first(graph, source, sink),
        Strategy::EdmondsKarp => breadth_first(graph, source, sink),
    }
}

fn depth_first(graph: &ResidualGraph, source: usize, sink: usize) -> Option<Vec<usize>> {
    let mut visited = vec![false; graph.node_count()];
    visited[source] = true;
    // (node, position of the next neighbour to try)
    let mut stack = vec![(source, 0)];
    while let Some((node, cursor)) = stack.last_mut() {
        let node = *node;
        if node == sink {
            return Some(stack.iter().map(|(n, _)| *n).collect());
        }
        let next = graph.neighbors(node)[*cursor..]
            .iter()
            .enumerate()
            .find(|&(_, &n)| !visited[n] && graph.capacity(node, n) > 0)
            .map(|(offset, &n)| (offset, n));
        match next {
            Some((offset, target)) => {
                *cursor += offset + 1;
                visited[target] = true;
                stack.push((target, 0));
            }
            None => {
                stack.pop();
            }
        }
    }
    None
}

fn breadth_first(graph: &ResidualGraph, source: usize, sink: usize) -> Option<Vec<usize>> {
    let mut parent: Vec<Option<usize>> = vec![None; graph.node_count()];
    let mut visited = vec![false; graph.node_count()];
    visited[source] = true;
    let mut queue = VecDeque::from([source]);
    while let Some(node) = queue.pop_front() {
        for &target in graph.neighbors(node) {
            if !visited[target] && graph.capacity(node, target) > 0 {
                visited[target] = true;
                parent[target] = Some(node);
                if target == sink {
                    return Some(trace(&parent, source, sink));
                }
                queue.push_back(target);
            }
        }
    }
    None
}

fn trace(parent: &[Option<usize>], source: usize, sink: usize) -> Vec<usize> {
    let mut t = vec![sink];
    let mut node = sink;
    while node != source {
        match parent[node] {
            Some(prev) => {
                t.push(prev);
                node = prev;
            }
            None => break,
        }
    }
    t.reverse();
    t
}
