/// This crate is a Semantic Word-Vector Compression Engine.
pub mod utils;
pub mod vectorizer;

/// Dataset Vectorizer
/// The top-level struct of this crate, driving the semantic compression of a
/// whole review corpus into feature matrices.
///
/// Internally, it holds:
/// - A semantic delta engine (known/unknown vocabulary split, sense store,
///   delta cache)
/// - The two principal vocabularies (encodable and non-encodable)
///
/// `DatasetVectorizer<P, N>` has the following generic parameters:
/// - `P`: Semantic graph provider type (anything implementing `SenseProvider`)
/// - `N`: Matrix cell type (e.g. f32, f64)
///
/// One instance is scoped to one corpus: the delta cache and the
/// known/unknown split are only consistent with the dataset the engine was
/// constructed from.
pub use vectorizer::DatasetVectorizer;

/// Semantic Delta Engine
/// Computes the normalized similarity between two word keys from their
/// hypernym/hyponym/synonym graph distances, 1.0 meaning maximally similar.
/// Results are cached per *ordered* key pair; the cache stores the inverted
/// raw value, so a cache hit reproduces the cold computation exactly.
///
/// # Thread Safety
/// `make_delta` takes `&self` and the cache is a concurrent map, so the
/// engine can be shared across the rayon pool during a dataset pass.
pub use vectorizer::semantics::SemanticDeltaEngine;

/// Normalization configuration for the delta engine: the fixed fallback
/// divisor and the minimum usable hypernym span.
pub use vectorizer::semantics::DeltaConfig;

/// Semantic graph capability seam
/// The provider hands out senses (up to one hypernym, hyponym and synonym
/// graph per queried word) and answers the three graph queries the engine
/// needs: common vocabulary, shortest distance and maximum distance. The
/// graph representation itself stays opaque.
pub use vectorizer::semantics::provider::{RelationKind, Sense, SenseProvider};

/// Vector Compressor
/// Projects one review's word sequence onto the principal vocabularies,
/// producing a `positions x width` feature matrix per review: similarity
/// sub-vectors for encodable words, one-hot presence sub-vectors for
/// non-encodable words, plus an uncompressed presence baseline.
pub use vectorizer::compress::{CompressMode, VectorCompressor};

/// Principal vocabularies and the frequency mining that produces them.
/// `KeyFrequency` counts key occurrences restricted to a membership set;
/// a strict threshold filter turns the counts into one principal set.
pub use vectorizer::principal::{KeyFrequency, PrincipalSets};

/// Review record and dataset helpers: POS-tagging seam, length filter,
/// widest-review query, and CRLF matrix persistence.
pub use vectorizer::review::{
    filter_by_len, save_vectorized, tag_dataset, widest_review, PosTagger, Review,
};

/// Word identity (surface token + Penn Treebank POS tag) and its mapping to
/// the WordNet lexical categories.
pub use vectorizer::word::{LexicalCategory, WordKey};

/// Errors a vectorization pass can surface: a key claimed by both principal
/// sets, or a failed file write.
pub use vectorizer::error::VectorizerError;

/// Dense row-major feature matrix, one row per review word position.
pub use utils::matrix::FeatureMatrix;
