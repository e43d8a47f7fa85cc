pub mod provider;
#[cfg(test)]
pub(crate) mod stub;

use ahash::RandomState;
use dashmap::DashMap;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::vectorizer::review::Review;
use crate::vectorizer::semantics::provider::{RelationKind, Sense, SenseProvider};
use crate::vectorizer::word::WordKey;

/// Normalization knobs for the delta computation.
///
/// The fixed divisor applies when no usable hypernym span exists. The span
/// floor is the smallest combined hypernym span still worth normalizing by;
/// at or below it the fixed divisor takes over, which also keeps a zero span
/// from ever reaching a division.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeltaConfig {
    pub fallback_divisor: f64,
    pub span_floor: f64,
}

impl Default for DeltaConfig {
    fn default() -> Self {
        Self {
            fallback_divisor: 10.0,
            span_floor: 1.0,
        }
    }
}

/// Cached, normalized word-pair similarity over WordNet-style relation
/// graphs.
///
/// Construction classifies every corpus word once: open-class words with at
/// least one non-empty relation graph are *known* (their sense is retained),
/// everything else is *unknown*. The split is immutable for the engine's
/// lifetime, and so is every cached delta, so one engine instance must not
/// outlive the corpus it classified.
///
/// The cache is keyed by the *ordered* `(from, to)` pair. The underlying
/// graph lookups are indexed by the `from` side, so the two directions are
/// computed and cached independently.
pub struct SemanticDeltaEngine<P>
where
    P: SenseProvider,
{
    provider: P,
    config: DeltaConfig,
    known: IndexSet<WordKey>,
    unknown: IndexSet<WordKey>,
    senses: IndexMap<WordKey, Sense<P::Graph>>,
    /// stores the normalized raw distance; the public value is `1 - x`
    deltas: DashMap<(WordKey, WordKey), f64, RandomState>,
}

impl<P> SemanticDeltaEngine<P>
where
    P: SenseProvider,
{
    /// Classify the corpus vocabulary against the semantic provider.
    ///
    /// Each distinct key is queried at most once; repeated occurrences are
    /// skipped through the known/unknown membership check. Closed-class tags
    /// go straight to unknown since the provider has no data for them.
    pub fn from_dataset<N>(provider: P, dataset: &[Review<N>], config: DeltaConfig) -> Self {
        let mut known = IndexSet::new();
        let mut unknown = IndexSet::new();
        let mut senses: IndexMap<WordKey, Sense<P::Graph>> = IndexMap::new();

        for review in dataset {
            for key in &review.words {
                let Some(lexical) = key.lexical() else {
                    unknown.insert(key.clone());
                    continue;
                };
                if known.contains(key) || unknown.contains(key) {
                    continue;
                }
                match provider.sense_for(&key.token, lexical) {
                    Some(sense) if sense.is_known() => {
                        known.insert(key.clone());
                        senses.insert(key.clone(), sense);
                    }
                    _ => {
                        unknown.insert(key.clone());
                    }
                }
            }
        }
        debug!(
            known = known.len(),
            unknown = unknown.len(),
            "classified corpus vocabulary"
        );

        Self {
            provider,
            config,
            known,
            unknown,
            senses,
            deltas: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// The injected semantic provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Keys with usable semantic relations.
    pub fn known_words(&self) -> &IndexSet<WordKey> {
        &self.known
    }

    /// Keys the provider has nothing for.
    pub fn unknown_words(&self) -> &IndexSet<WordKey> {
        &self.unknown
    }

    pub fn is_known(&self, key: &WordKey) -> bool {
        self.known.contains(key)
    }

    /// Number of cached delta records.
    pub fn cached_deltas(&self) -> usize {
        self.deltas.len()
    }

    /// Normalized similarity between two keys, 1.0 meaning maximally similar.
    ///
    /// The raw graph distance is normalized into `x` and cached; the public
    /// result is `1 - x` so that *smaller distance reads as larger
    /// similarity*. Cache hits re-invert the stored value, which reproduces
    /// the cold path bit for bit. A key without a sense yields 0.0 and
    /// caches nothing, as does a pair with no connecting path.
    pub fn make_delta(&self, from: &WordKey, to: &WordKey) -> f64 {
        let pair = (from.clone(), to.clone());
        if let Some(cached) = self.deltas.get(&pair) {
            return 1.0 - *cached;
        }

        let (Some(from_sense), Some(to_sense)) = (self.senses.get(from), self.senses.get(to))
        else {
            return 0.0;
        };

        // Hypernym span is fixed whenever both sides carry a hypernym graph,
        // even if the hypernym kind ends up contributing no candidate.
        let mut hypernym_span = None;
        if let (Some(lhs), Some(rhs)) = (&from_sense.hypernyms, &to_sense.hypernyms) {
            hypernym_span = Some(self.provider.max_distance(lhs) + self.provider.max_distance(rhs));
        }

        let mut candidates: Vec<f64> = Vec::with_capacity(3);
        for kind in RelationKind::ORDER {
            if let (Some(lhs), Some(rhs)) = (from_sense.graph(kind), to_sense.graph(kind)) {
                if let Some(found) = self.min_distance(from, to, lhs, rhs) {
                    candidates.push(found);
                }
            }
        }

        // 最初に見つかった最小値が勝つ (評価順: hypernym, hyponym, synonym)
        let Some(best) = candidates
            .into_iter()
            .reduce(|best, next| if next < best { next } else { best })
        else {
            return 0.0;
        };

        let x = match hypernym_span {
            Some(span) if span > self.config.span_floor => best / span,
            Some(span) => {
                debug!(span, "degenerate hypernym span, using fallback divisor");
                best / self.config.fallback_divisor
            }
            None => best / self.config.fallback_divisor,
        };

        self.deltas.insert(pair, x);
        1.0 - x
    }

    /// Smallest combined two-leg distance through the shared vocabulary of
    /// two graphs. Each common token contributes `from -> token` inside the
    /// from-graph plus `to -> token` inside the to-graph; a token either leg
    /// can't reach is discarded.
    fn min_distance(
        &self,
        from: &WordKey,
        to: &WordKey,
        from_graph: &P::Graph,
        to_graph: &P::Graph,
    ) -> Option<f64> {
        let common = self.provider.common_vocabulary(from_graph, to_graph);
        let mut best: Option<f64> = None;
        for token in &common {
            let from_leg = self.provider.shortest_distance(from_graph, &from.token, token);
            let to_leg = self.provider.shortest_distance(to_graph, &to.token, token);
            if let (Some(a), Some(b)) = (from_leg, to_leg) {
                let total = a + b;
                match best {
                    Some(current) if current <= total => {}
                    _ => best = Some(total),
                }
            }
        }
        best
    }
}
