use std::fmt;

use serde::{Deserialize, Serialize};

/// Word identity used everywhere in the vectorizer.
///
/// Equality and hashing cover both the surface token and its POS tag, so the
/// same token under two different tags is two different keys. Vocabulary
/// membership, principal-set membership and delta caching all use this
/// identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordKey {
    pub token: String,
    pub tag: String,
}

impl WordKey {
    pub fn new(token: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            tag: tag.into(),
        }
    }

    /// WordNet lexical category of this key's tag, `None` for closed-class
    /// tags the semantic provider has no data for.
    #[inline]
    pub fn lexical(&self) -> Option<LexicalCategory> {
        LexicalCategory::from_penn_tag(&self.tag)
    }
}

impl fmt::Display for WordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token, self.tag)
    }
}

/// The open word classes WordNet covers.
///
/// Determiners, prepositions, pronouns, conjunctions and particles carry no
/// semantic relations and stay unmapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LexicalCategory {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl LexicalCategory {
    /// Map a Penn Treebank POS tag to a lexical category.
    ///
    /// The Penn tag set encodes the word class in the first letter: `N*` is a
    /// noun, `V*` a verb, `J*` an adjective and `R*` an adverb, except the
    /// literal tag `RP` which is a particle.
    pub fn from_penn_tag(tag: &str) -> Option<Self> {
        match tag.as_bytes().first() {
            Some(b'N') => Some(Self::Noun),
            Some(b'V') => Some(Self::Verb),
            Some(b'J') => Some(Self::Adjective),
            Some(b'R') if tag != "RP" => Some(Self::Adverb),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_covers_token_and_tag() {
        assert_eq!(WordKey::new("run", "VB"), WordKey::new("run", "VB"));
        assert_ne!(WordKey::new("run", "VB"), WordKey::new("run", "NN"));
        assert_ne!(WordKey::new("run", "VB"), WordKey::new("walk", "VB"));
    }

    #[test]
    fn penn_prefixes_map_to_open_classes() {
        for tag in ["NN", "NNS", "NNP", "NNPS"] {
            assert_eq!(LexicalCategory::from_penn_tag(tag), Some(LexicalCategory::Noun));
        }
        for tag in ["VB", "VBD", "VBG", "VBN", "VBP", "VBZ"] {
            assert_eq!(LexicalCategory::from_penn_tag(tag), Some(LexicalCategory::Verb));
        }
        for tag in ["JJ", "JJR", "JJS"] {
            assert_eq!(
                LexicalCategory::from_penn_tag(tag),
                Some(LexicalCategory::Adjective)
            );
        }
        for tag in ["RB", "RBR", "RBS"] {
            assert_eq!(
                LexicalCategory::from_penn_tag(tag),
                Some(LexicalCategory::Adverb)
            );
        }
    }

    #[test]
    fn particle_is_not_an_adverb() {
        assert_eq!(LexicalCategory::from_penn_tag("RP"), None);
    }

    #[test]
    fn closed_class_and_empty_tags_stay_unmapped() {
        for tag in ["DT", "IN", "PRP", "CC", "CD", "UH", ""] {
            assert_eq!(LexicalCategory::from_penn_tag(tag), None, "tag {tag:?}");
        }
    }
}
