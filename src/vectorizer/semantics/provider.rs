use crate::vectorizer::word::LexicalCategory;

/// Relation kinds a sense may carry, in delta evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Hypernym,
    Hyponym,
    Synonym,
}

impl RelationKind {
    /// Evaluation order used when ranking delta candidates.
    pub const ORDER: [RelationKind; 3] = [
        RelationKind::Hypernym,
        RelationKind::Hyponym,
        RelationKind::Synonym,
    ];
}

/// The relation graphs returned for one `(token, lexical)` query.
///
/// A word is *known* iff at least one graph came back non-empty; the
/// known/unknown split is computed once per corpus and never revisited.
#[derive(Debug, Clone, Default)]
pub struct Sense<G> {
    pub hypernyms: Option<G>,
    pub hyponyms: Option<G>,
    pub synonyms: Option<G>,
}

impl<G> Sense<G> {
    pub fn empty() -> Self {
        Self {
            hypernyms: None,
            hyponyms: None,
            synonyms: None,
        }
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        self.hypernyms.is_some() || self.hyponyms.is_some() || self.synonyms.is_some()
    }

    #[inline]
    pub fn graph(&self, kind: RelationKind) -> Option<&G> {
        match kind {
            RelationKind::Hypernym => self.hypernyms.as_ref(),
            RelationKind::Hyponym => self.hyponyms.as_ref(),
            RelationKind::Synonym => self.synonyms.as_ref(),
        }
    }
}

/// The semantic-graph capability the delta engine runs against.
///
/// The graph representation stays opaque. The engine only ever needs the
/// vocabulary two graphs share, shortest path distances inside one graph, and
/// a graph's maximum distance, so any backing store (WordNet, a test stub)
/// can implement this without committing to a node layout.
pub trait SenseProvider {
    type Graph;

    /// Query the sense for a token under one lexical category.
    /// `None` when the provider has no entry at all for the pair.
    fn sense_for(&self, token: &str, lexical: LexicalCategory) -> Option<Sense<Self::Graph>>;

    /// Surface tokens present in both graphs.
    fn common_vocabulary(&self, lhs: &Self::Graph, rhs: &Self::Graph) -> Vec<String>;

    /// Shortest distance between two node tokens, `None` when no path exists.
    fn shortest_distance(&self, graph: &Self::Graph, from: &str, to: &str) -> Option<f64>;

    /// Largest distance within the graph.
    fn max_distance(&self, graph: &Self::Graph) -> f64;
}
