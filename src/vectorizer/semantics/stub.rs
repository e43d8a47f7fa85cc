//! In-memory `SenseProvider` used by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::vectorizer::semantics::provider::{Sense, SenseProvider};
use crate::vectorizer::word::LexicalCategory;

/// A tiny relation graph: a node list, explicit pair distances and a fixed
/// maximum distance. Distances are symmetric and a node reaches itself at
/// distance zero; pairs without an entry have no path.
#[derive(Debug, Clone, Default)]
pub struct StubGraph {
    nodes: Vec<String>,
    distances: HashMap<(String, String), f64>,
    max: f64,
}

impl StubGraph {
    pub fn new(nodes: &[&str], distances: &[((&str, &str), f64)], max: f64) -> Self {
        let mut table = HashMap::new();
        for ((from, to), value) in distances {
            table.insert((from.to_string(), to.to_string()), *value);
            table.insert((to.to_string(), from.to_string()), *value);
        }
        Self {
            nodes: nodes.iter().map(|n| n.to_string()).collect(),
            distances: table,
            max,
        }
    }

    /// Chain graph: consecutive nodes joined by `step`-weight edges;
    /// `max_distance` defaults to the step weight.
    pub fn chain(nodes: &[&str], step: f64) -> Self {
        let mut distances = Vec::new();
        for pair in nodes.windows(2) {
            distances.push(((pair[0], pair[1]), step));
        }
        Self::new(nodes, &distances, step)
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = max;
        self
    }

    fn contains(&self, token: &str) -> bool {
        self.nodes.iter().any(|n| n == token)
    }
}

#[derive(Debug, Default)]
pub struct StubProvider {
    senses: HashMap<(String, LexicalCategory), Sense<StubGraph>>,
    queries: AtomicUsize,
}

impl StubProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sense(&mut self, token: &str, lexical: LexicalCategory, sense: Sense<StubGraph>) {
        self.senses.insert((token.to_string(), lexical), sense);
    }

    /// How many `sense_for` calls this provider served.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

impl SenseProvider for StubProvider {
    type Graph = StubGraph;

    fn sense_for(&self, token: &str, lexical: LexicalCategory) -> Option<Sense<StubGraph>> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        self.senses.get(&(token.to_string(), lexical)).cloned()
    }

    fn common_vocabulary(&self, lhs: &StubGraph, rhs: &StubGraph) -> Vec<String> {
        lhs.nodes
            .iter()
            .filter(|node| rhs.contains(node))
            .cloned()
            .collect()
    }

    fn shortest_distance(&self, graph: &StubGraph, from: &str, to: &str) -> Option<f64> {
        if from == to {
            return graph.contains(from).then_some(0.0);
        }
        graph.distances.get(&(from.to_string(), to.to_string())).copied()
    }

    fn max_distance(&self, graph: &StubGraph) -> f64 {
        graph.max
    }
}
