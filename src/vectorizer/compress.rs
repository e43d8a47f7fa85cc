use std::marker::PhantomData;

use num::Float;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::matrix::FeatureMatrix;
use crate::vectorizer::error::VectorizerError;
use crate::vectorizer::principal::PrincipalSets;
use crate::vectorizer::review::Review;
use crate::vectorizer::semantics::{provider::SenseProvider, SemanticDeltaEngine};
use crate::vectorizer::word::WordKey;

/// Compression strategy for encodable words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompressMode {
    /// Keep only the single best strictly positive delta per word.
    Sparse,
    /// Keep the full delta sub-vector per word.
    Dense,
}

/// Projects review words onto the principal vocabularies.
///
/// Every word at position `i` contributes one `width`-wide row at row `i` of
/// the review's matrix: encodable words a similarity sub-vector in the
/// encodable zone, non-encodable words a one-hot presence sub-vector in the
/// non-encodable zone. A word in neither set leaves its row zero; a word in
/// both sets aborts the pass.
pub struct VectorCompressor<'a, P, N = f32>
where
    P: SenseProvider,
{
    engine: &'a SemanticDeltaEngine<P>,
    principals: &'a PrincipalSets,
    _cell: PhantomData<N>,
}

impl<'a, P, N> VectorCompressor<'a, P, N>
where
    P: SenseProvider + Sync,
    P::Graph: Sync,
    N: Float + Send + Sync,
{
    pub fn new(engine: &'a SemanticDeltaEngine<P>, principals: &'a PrincipalSets) -> Self {
        Self {
            engine,
            principals,
            _cell: PhantomData,
        }
    }

    /// Compress one review into a zero-initialized `positions x width`
    /// matrix. Words past `positions` are dropped.
    pub fn compress_row(
        &self,
        review: &Review<N>,
        positions: usize,
        mode: CompressMode,
    ) -> Result<FeatureMatrix<N>, VectorizerError> {
        let mut matrix = FeatureMatrix::zeroed(positions, self.principals.width());
        for (i, key) in review.words.iter().enumerate().take(positions) {
            let encodable = self.principals.encodable.contains(key);
            let non_encodable = self.principals.non_encodable.contains(key);
            match (encodable, non_encodable) {
                // encodable: similarity sub-vector at the start of row `i`
                (true, false) => {
                    let block = match mode {
                        CompressMode::Sparse => self.best_delta_vector(key),
                        CompressMode::Dense => self.all_delta_vector(key),
                    };
                    matrix.write_block(i, 0, &block);
                }
                // non-encodable: presence sub-vector after the encodable zone
                (false, true) => {
                    let block = self.binary_vector(key);
                    matrix.write_block(i, self.principals.encodable.len(), &block);
                }
                (true, true) => return Err(VectorizerError::overlap(key)),
                (false, false) => {}
            }
        }
        Ok(matrix)
    }

    /// Compress every review in place, overwriting its matrix.
    ///
    /// Rows are independent so the pass fans out on the rayon pool; the delta
    /// cache is the only shared state, and duplicate concurrent writes there
    /// are idempotent. The first principal-set violation aborts the pass.
    pub fn compress_dataset(
        &self,
        dataset: &mut [Review<N>],
        positions: usize,
        mode: CompressMode,
    ) -> Result<(), VectorizerError> {
        dataset.par_iter_mut().try_for_each(|review| {
            let matrix = self.compress_row(review, positions, mode)?;
            review.matrix = matrix;
            Ok(())
        })
    }

    /// Baseline encoding with no compression at all: every word, regardless
    /// of principal membership, gets a full-width presence vector at its
    /// row. Never touches the delta engine.
    pub fn uncompress_dataset(&self, dataset: &mut [Review<N>], positions: usize) {
        let width = self.principals.width();
        dataset.par_iter_mut().for_each(|review| {
            let mut matrix = FeatureMatrix::zeroed(positions, width);
            for (i, key) in review.words.iter().enumerate().take(positions) {
                let block = self.presence_vector(key);
                matrix.write_block(i, 0, &block);
            }
            review.matrix = matrix;
        });
    }

    /// Full similarity sub-vector against every encodable principal.
    fn all_delta_vector(&self, lhs: &WordKey) -> Vec<N> {
        self.principals
            .encodable
            .iter()
            .map(|rhs| Self::cell(self.engine.make_delta(lhs, rhs)))
            .collect()
    }

    /// Best-match sub-vector: the single largest strictly positive delta,
    /// zero everywhere else. All-zero when no delta is positive.
    fn best_delta_vector(&self, lhs: &WordKey) -> Vec<N> {
        let mut vector = vec![N::zero(); self.principals.encodable.len()];
        let mut best: Option<(usize, f64)> = None;
        for (index, rhs) in self.principals.encodable.iter().enumerate() {
            let delta = self.engine.make_delta(lhs, rhs);
            if delta > 0.0 {
                match best {
                    // deltas are already inverted, so the best one is the max
                    Some((_, value)) if value >= delta => {}
                    _ => best = Some((index, delta)),
                }
            }
        }
        if let Some((index, value)) = best {
            vector[index] = Self::cell(value);
        }
        vector
    }

    /// One-hot presence sub-vector over the non-encodable principals.
    fn binary_vector(&self, lhs: &WordKey) -> Vec<N> {
        let mut vector = vec![N::zero(); self.principals.non_encodable.len()];
        if let Some(index) = self.principals.non_encodable.get_index_of(lhs) {
            vector[index] = N::one();
        }
        vector
    }

    /// Full-width presence vector across both zones, for the baseline mode.
    fn presence_vector(&self, lhs: &WordKey) -> Vec<N> {
        let mut vector = vec![N::zero(); self.principals.width()];
        if let Some(index) = self.principals.encodable.get_index_of(lhs) {
            vector[index] = N::one();
        }
        if let Some(index) = self.principals.non_encodable.get_index_of(lhs) {
            vector[self.principals.encodable.len() + index] = N::one();
        }
        vector
    }

    #[inline]
    fn cell(value: f64) -> N {
        N::from(value).unwrap_or_else(N::zero)
    }
}
