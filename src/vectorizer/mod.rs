pub mod compress;
pub mod error;
pub mod principal;
pub mod review;
pub mod semantics;
pub mod word;

use std::marker::PhantomData;

use num::Float;
use tracing::info;

use crate::vectorizer::compress::{CompressMode, VectorCompressor};
use crate::vectorizer::error::VectorizerError;
use crate::vectorizer::principal::PrincipalSets;
use crate::vectorizer::review::Review;
use crate::vectorizer::semantics::{provider::SenseProvider, DeltaConfig, SemanticDeltaEngine};

/// Whole-corpus driver.
///
/// Owns one delta engine and one pair of principal sets, both scoped to a
/// single corpus: the engine's known/unknown split and its delta cache are
/// only meaningful against the dataset they were built from, so build a fresh
/// vectorizer per corpus rather than sharing one across runs.
///
/// `DatasetVectorizer<P, N>` has the following generic parameters:
/// - `P`: the semantic graph provider
/// - `N`: matrix cell type (e.g. f32, f64)
pub struct DatasetVectorizer<P, N = f32>
where
    P: SenseProvider,
{
    engine: SemanticDeltaEngine<P>,
    principals: PrincipalSets,
    _cell: PhantomData<N>,
}

impl<P, N> DatasetVectorizer<P, N>
where
    P: SenseProvider + Sync,
    P::Graph: Sync,
    N: Float + Send + Sync,
{
    pub fn new(engine: SemanticDeltaEngine<P>, principals: PrincipalSets) -> Self {
        Self {
            engine,
            principals,
            _cell: PhantomData,
        }
    }

    /// The full pipeline in one call: classify the corpus vocabulary, mine
    /// key frequencies for both vocabularies, apply the two thresholds.
    pub fn from_corpus(
        provider: P,
        dataset: &[Review<N>],
        config: DeltaConfig,
        enc_threshold: u32,
        non_enc_threshold: u32,
    ) -> Self {
        let engine = SemanticDeltaEngine::from_dataset(provider, dataset, config);
        let principals = PrincipalSets::mine(&engine, dataset, enc_threshold, non_enc_threshold);
        Self::new(engine, principals)
    }

    pub fn engine(&self) -> &SemanticDeltaEngine<P> {
        &self.engine
    }

    pub fn principals(&self) -> &PrincipalSets {
        &self.principals
    }

    /// A compressor borrowing this vectorizer's engine and principal sets.
    pub fn compressor(&self) -> VectorCompressor<'_, P, N> {
        VectorCompressor::new(&self.engine, &self.principals)
    }

    /// Vectorize the dataset in place with the chosen compression mode.
    pub fn vectorize(
        &self,
        dataset: &mut [Review<N>],
        positions: usize,
        mode: CompressMode,
    ) -> Result<(), VectorizerError> {
        info!(reviews = dataset.len(), positions, ?mode, "vectorizing dataset");
        self.compressor().compress_dataset(dataset, positions, mode)
    }

    /// Vectorize the dataset with the uncompressed presence baseline.
    pub fn vectorize_baseline(&self, dataset: &mut [Review<N>], positions: usize) {
        info!(reviews = dataset.len(), positions, "vectorizing dataset (baseline)");
        self.compressor().uncompress_dataset(dataset, positions)
    }
}
