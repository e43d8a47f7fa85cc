use std::path::{Path, PathBuf};

use crate::vectorizer::word::WordKey;

/// Failures that surface to the caller of a vectorization pass.
///
/// Only two things are allowed to abort a pass: a broken principal-set
/// partition and file I/O. A word without semantic data resolves to zero
/// similarity, and a degenerate normalization span falls back to the fixed
/// divisor; neither is representable here.
#[derive(Debug, thiserror::Error)]
pub enum VectorizerError {
    /// A key claimed by both principal vocabularies.
    ///
    /// The mining/threshold stage guarantees the two sets are disjoint, so an
    /// overlapping key means the upstream invariant broke. The pass aborts
    /// instead of silently picking a side.
    #[error("key `{token}`/`{tag}` exists in both principal sets")]
    PrincipalOverlap { token: String, tag: String },

    /// Failed to persist a dataset artifact.
    #[error("couldn't write to file `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VectorizerError {
    pub(crate) fn overlap(key: &WordKey) -> Self {
        Self::PrincipalOverlap {
            token: key.token.clone(),
            tag: key.tag.clone(),
        }
    }

    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_message_names_both_fields() {
        let err = VectorizerError::overlap(&WordKey::new("good", "JJ"));
        assert_eq!(
            err.to_string(),
            "key `good`/`JJ` exists in both principal sets"
        );
    }

    #[test]
    fn io_message_names_the_file() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = VectorizerError::io(Path::new("vectors.data"), source);
        assert!(err.to_string().contains("vectors.data"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VectorizerError>();
    }
}
