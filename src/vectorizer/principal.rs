use std::fmt::Write as _;
use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::vectorizer::error::VectorizerError;
use crate::vectorizer::review::{write_atomic, Review};
use crate::vectorizer::semantics::{provider::SenseProvider, SemanticDeltaEngine};
use crate::vectorizer::word::WordKey;

/// Word-key occurrence counts across a dataset.
///
/// Counting is restricted to a membership set, usually the engine's known or
/// unknown vocabulary, since there is no point in mining keys that can never
/// become principals of the other kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyFrequency {
    key_count: IndexMap<WordKey, u32>,
    total_key_count: u64,
}

impl KeyFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add_key(&mut self, key: &WordKey) -> &mut Self {
        let count = self.key_count.entry(key.clone()).or_insert(0);
        *count += 1;
        self.total_key_count += 1;
        self
    }

    /// Count every dataset occurrence of the member keys.
    pub fn mine<N>(dataset: &[Review<N>], members: &IndexSet<WordKey>) -> Self {
        let mut freq = Self::new();
        for review in dataset {
            for key in &review.words {
                if members.contains(key) {
                    freq.add_key(key);
                }
            }
        }
        freq
    }

    #[inline]
    pub fn key_count(&self, key: &WordKey) -> u32 {
        self.key_count.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys seen.
    #[inline]
    pub fn key_num(&self) -> usize {
        self.key_count.len()
    }

    /// Sum of all counts.
    #[inline]
    pub fn total_count(&self) -> u64 {
        self.total_key_count
    }

    /// Keys appearing strictly more often than `threshold`, in first-seen
    /// order. Set position becomes the key's feature column.
    pub fn filter_principals(&self, threshold: u32) -> IndexSet<WordKey> {
        self.key_count
            .iter()
            .filter(|(_, &count)| count > threshold)
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Dump the stats as tab-separated `token  tag  count` lines.
    pub fn save_stats(&self, path: impl AsRef<Path>) -> Result<(), VectorizerError> {
        let mut out = String::new();
        for (key, count) in &self.key_count {
            let _ = writeln!(out, "{}\t{}\t{}\r", key.token, key.tag, count);
        }
        write_atomic(path.as_ref(), &out)
    }
}

/// The two principal vocabularies every review word is projected onto.
///
/// `encodable` keys carry usable semantic relations and get similarity
/// sub-vectors; `non_encodable` keys are frequent but semantically opaque and
/// get one-hot presence sub-vectors. Insertion order defines column order.
///
/// The sets must be disjoint. The compressor checks this per word and treats
/// a violation as fatal, so construction does not re-validate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrincipalSets {
    pub encodable: IndexSet<WordKey>,
    pub non_encodable: IndexSet<WordKey>,
}

impl PrincipalSets {
    pub fn new(encodable: IndexSet<WordKey>, non_encodable: IndexSet<WordKey>) -> Self {
        Self {
            encodable,
            non_encodable,
        }
    }

    /// Feature-row width: one column per principal key.
    #[inline]
    pub fn width(&self) -> usize {
        self.encodable.len() + self.non_encodable.len()
    }

    /// Mine both principal vocabularies from a classified dataset.
    ///
    /// Known keys above `enc_threshold` become encodable principals, unknown
    /// keys above `non_enc_threshold` become non-encodable principals.
    pub fn mine<N, P>(
        engine: &SemanticDeltaEngine<P>,
        dataset: &[Review<N>],
        enc_threshold: u32,
        non_enc_threshold: u32,
    ) -> Self
    where
        P: SenseProvider,
    {
        let known_stats = KeyFrequency::mine(dataset, engine.known_words());
        let unknown_stats = KeyFrequency::mine(dataset, engine.unknown_words());
        let sets = Self {
            encodable: known_stats.filter_principals(enc_threshold),
            non_encodable: unknown_stats.filter_principals(non_enc_threshold),
        };
        debug!(
            encodable = sets.encodable.len(),
            non_encodable = sets.non_encodable.len(),
            "mined principal sets"
        );
        sets
    }
}
