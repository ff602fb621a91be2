use crate::types::{Edge, NodeId};
use std::collections::{HashMap, HashSet};

/// Remaining capacity on every arc of a flow network.
///
/// Nodes are numbered in order of first appearance in the edge list and every
/// node keeps its neighbours in first-insertion order, so searches over the
/// graph are deterministic.
///
/// An input edge `(u, v, c)` sets `r(u, v) = c` and, unless some input edge
/// already set it, `r(v, u) = 0`. Repeated `(u, v)` pairs are not summed: the
/// last one wins.
///
/// Residual capacities are kept as `u128`: an arc and its reverse together never
/// hold more than the two input capacities, which always fits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResidualGraph {
    nodes: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    neighbors: Vec<Vec<usize>>,
    capacities: HashMap<(usize, usize), u128>,
}

impl ResidualGraph {
    pub fn new(edges: &[Edge]) -> Self {
        let mut graph = ResidualGraph::default();
        let mut set_by_input: HashSet<(usize, usize)> = HashSet::new();
        for edge in edges {
            let from = graph.intern(&edge.from);
            let to = graph.intern(&edge.to);
            graph.set_capacity(from, to, u128::from(edge.capacity));
            set_by_input.insert((from, to));
            if !set_by_input.contains(&(to, from)) {
                graph.set_capacity(to, from, 0);
            }
        }
        graph
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn contains(&self, node: &NodeId) -> bool {
        self.index.contains_key(node)
    }

    /// Residual capacity of the arc `from -> to`, if the arc exists.
    pub fn residual(&self, from: &NodeId, to: &NodeId) -> Option<u128> {
        let from = self.index_of(from)?;
        let to = self.index_of(to)?;
        self.capacities.get(&(from, to)).copied()
    }

    /// Outgoing arcs of `node` in iteration order, with their residual capacity.
    pub fn outgoing(&self, node: &NodeId) -> Vec<(&NodeId, u128)> {
        match self.index_of(node) {
            Some(i) => self.neighbors[i]
                .iter()
                .map(|&n| (&self.nodes[n], self.capacity(i, n)))
                .collect(),
            None => vec![],
        }
    }

    pub(crate) fn index_of(&self, node: &NodeId) -> Option<usize> {
        self.index.get(node).copied()
    }

    pub(crate) fn label(&self, node: usize) -> &NodeId {
        &self.nodes[node]
    }

    pub(crate) fn neighbors(&self, node: usize) -> &[usize] {
        &self.neighbors[node]
    }

    pub(crate) fn capacity(&self, from: usize, to: usize) -> u128 {
        self.capacities.get(&(from, to)).copied().unwrap_or_default()
    }

    /// Moves `amount` units of residual capacity from `from -> to` onto `to -> from`.
    pub(crate) fn push(&mut self, from: usize, to: usize, amount: u128) {
        *self.capacities.entry((from, to)).or_default() -= amount;
        *self.capacities.entry((to, from)).or_default() += amount;
    }

    fn intern(&mut self, node: &NodeId) -> usize {
        if let Some(i) = self.index.get(node) {
            return *i;
        }
        let i = self.nodes.len();
        self.nodes.push(node.clone());
        self.index.insert(node.clone(), i);
        self.neighbors.push(vec![]);
        i
    }

    fn set_capacity(&mut self, from: usize, to: usize, capacity: u128) {
        if self.capacities.insert((from, to), capacity).is_none() {
            self.neighbors[from].push(to);
        }
    }
}
