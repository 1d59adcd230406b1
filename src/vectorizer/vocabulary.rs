use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::vectorizer::corpus::Corpus;

/// Sorted, deduplicated term list of a corpus.
///
/// The position of a term in sorted order is its matrix column. Lookups in
/// both directions are O(1). Ordering is plain byte-wise string order, so the
/// same cleaned corpus always yields the same vocabulary.
///
/// Serialized as a plain term list. Deserialization goes through
/// [`Vocabulary::from_terms`], so a payload is sorted and deduplicated again.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
}

impl Vocabulary {
    /// Collect every whitespace-delimited token of every document
    pub fn from_corpus(corpus: &Corpus) -> Self {
        Self::from_terms(corpus.documents().flat_map(|doc| doc.tokens()))
    }

    /// Sort and deduplicate `terms`
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sorted: Vec<Box<str>> = terms.into_iter().map(|t| Box::from(t.as_ref())).collect();
        sorted.sort_unstable();
        sorted.dedup();
        Self {
            terms: sorted.into_iter().collect(),
        }
    }

    /// Column index of `term`
    #[inline]
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    /// Term at column `index`
    #[inline]
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get_index(index).map(|t| &**t)
    }

    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| &**t)
    }

    pub fn terms(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }

    /// Keep only the given columns, in the given order.
    /// `columns` must be ascending for the result to stay sorted.
    pub(crate) fn select(&self, columns: &[usize]) -> Self {
        debug_assert!(columns.windows(2).all(|w| w[0] < w[1]));
        Self {
            terms: columns
                .iter()
                .filter_map(|&i| self.terms.get_index(i).cloned())
                .collect(),
        }
    }
}

/// Order-sensitive: two vocabularies are equal only if every column matches.
impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.terms.iter().eq(other.terms.iter())
    }
}

impl Eq for Vocabulary {}

impl From<Vec<String>> for Vocabulary {
    fn from(terms: Vec<String>) -> Self {
        Self::from_terms(terms)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.terms()
    }
}
