use std::fmt::{Display, Write as _};
use std::fs;
use std::path::Path;

use num::Float;
use serde::{Deserialize, Serialize};

use crate::utils::matrix::FeatureMatrix;
use crate::vectorizer::error::VectorizerError;
use crate::vectorizer::word::WordKey;

/// One review: original text, numeric score, tagged word sequence and the
/// derived feature matrix.
///
/// The matrix is overwritten, never appended to, on every vectorization run;
/// it can always be rebuilt from the words plus the engine and principal-set
/// state, so nothing else in the record depends on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review<N = f32> {
    pub text: String,
    pub score: f32,
    pub words: Vec<WordKey>,
    pub matrix: FeatureMatrix<N>,
}

impl<N> Review<N> {
    pub fn new(text: impl Into<String>, score: f32) -> Self {
        Self {
            text: text.into(),
            score,
            words: Vec::new(),
            matrix: FeatureMatrix::default(),
        }
    }
}

impl<N> Default for Review<N> {
    fn default() -> Self {
        Self::new("", 0.0)
    }
}

/// Part-of-speech tagging seam.
///
/// Produces the ordered `(token, tag)` sequence for one text, tags drawn from
/// the Penn Treebank set. Implementations are injected where needed; there is
/// no process-wide tagger instance.
pub trait PosTagger {
    fn tag(&self, text: &str) -> Vec<(String, String)>;
}

/// Populate every review's word sequence from its text.
pub fn tag_dataset<N>(tagger: &impl PosTagger, dataset: &mut [Review<N>]) {
    for review in dataset.iter_mut() {
        review.words = tagger
            .tag(&review.text)
            .into_iter()
            .map(|(token, tag)| WordKey::new(token, tag))
            .collect();
    }
}

/// Drop reviews with `max_words` or more words.
pub fn filter_by_len<N>(dataset: Vec<Review<N>>, max_words: usize) -> Vec<Review<N>> {
    dataset
        .into_iter()
        .filter(|review| review.words.len() < max_words)
        .collect()
}

/// Word count of the widest review, the natural `positions` argument for a
/// whole-dataset pass.
pub fn widest_review<N>(dataset: &[Review<N>]) -> usize {
    dataset
        .iter()
        .map(|review| review.words.len())
        .max()
        .unwrap_or(0)
}

/// Persist every review's matrix: cells whitespace-separated in row-major
/// order, one CRLF-terminated line per review.
///
/// The file appears atomically (temp file + rename) so a failed run never
/// leaves partial output behind.
pub fn save_vectorized<N>(dataset: &[Review<N>], path: impl AsRef<Path>) -> Result<(), VectorizerError>
where
    N: Float + Display,
{
    let mut out = String::new();
    for review in dataset {
        for cell in review.matrix.as_slice() {
            let _ = write!(out, "{} ", cell);
        }
        out.push_str("\r\n");
    }
    write_atomic(path.as_ref(), &out)
}

pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), VectorizerError> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents).map_err(|source| VectorizerError::io(path, source))?;
    fs::rename(&tmp, path).map_err(|source| VectorizerError::io(path, source))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SplitTagger;

    /// whitespace split, everything tagged `NN`
    impl PosTagger for SplitTagger {
        fn tag(&self, text: &str) -> Vec<(String, String)> {
            text.split_whitespace()
                .map(|token| (token.to_string(), "NN".to_string()))
                .collect()
        }
    }

    #[test]
    fn tagging_populates_word_sequences_in_order() {
        let mut dataset = vec![Review::<f32>::new("great little phone", 5.0)];
        tag_dataset(&SplitTagger, &mut dataset);
        assert_eq!(
            dataset[0].words,
            vec![
                WordKey::new("great", "NN"),
                WordKey::new("little", "NN"),
                WordKey::new("phone", "NN"),
            ]
        );
    }

    #[test]
    fn filter_drops_reviews_at_or_over_the_limit() {
        let mut dataset = vec![
            Review::<f32>::new("one two", 1.0),
            Review::<f32>::new("one two three", 2.0),
        ];
        tag_dataset(&SplitTagger, &mut dataset);

        let kept = filter_by_len(dataset, 3);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].words.len(), 2);
    }

    #[test]
    fn widest_review_is_the_largest_word_count() {
        let mut dataset = vec![
            Review::<f32>::new("a b c", 0.0),
            Review::<f32>::new("a", 0.0),
        ];
        tag_dataset(&SplitTagger, &mut dataset);
        assert_eq!(widest_review(&dataset), 3);

        let empty: Vec<Review<f32>> = Vec::new();
        assert_eq!(widest_review(&empty), 0);
    }

    #[test]
    fn saved_matrices_use_crlf_lines() {
        let mut review = Review::<f32>::new("r", 1.0);
        review.matrix = FeatureMatrix::zeroed(1, 2);
        let dataset = vec![review];

        let path = std::env::temp_dir().join(format!("sema_vec_save_{}.data", std::process::id()));
        save_vectorized(&dataset, &path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(contents, "0 0 \r\n");
    }

    #[test]
    fn saving_to_an_impossible_path_names_the_file() {
        let dataset: Vec<Review<f32>> = vec![Review::default()];
        let err = save_vectorized(&dataset, "/nonexistent-dir/vectors.data").unwrap_err();
        assert!(err.to_string().contains("/nonexistent-dir/vectors.data"));
    }
}
