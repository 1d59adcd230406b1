use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::vectorizer::cleaner::{self, Cleaner};

/// One document of a corpus.
/// The index is its insertion position and never changes; the text is
/// replaced by every cleaning pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    index: usize,
    text: String,
}

impl Document {
    /// 0-based position in the corpus
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whitespace-delimited tokens of the current text
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }
}

/// Ordered collection of documents.
///
/// Documents are appended in order and never removed or reordered. The first
/// cleaning pass seals the corpus: statistics such as stop word or sparsity
/// filtering are corpus-wide, so a document arriving afterwards is rejected
/// with [`Error::CorpusSealed`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    documents: Vec<Document>,
    sealed: bool,
}

impl Corpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw document and return its index
    pub fn add_document(&mut self, text: impl Into<String>) -> Result<usize> {
        if self.sealed {
            return Err(Error::CorpusSealed {
                documents: self.documents.len(),
            });
        }
        let index = self.documents.len();
        self.documents.push(Document {
            index,
            text: text.into(),
        });
        Ok(index)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn document_text(&self, index: usize) -> Option<&str> {
        self.documents.get(index).map(Document::text)
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    /// true once any cleaning pass has run
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }
}

/// Bulk transforms. Each one visits every document in order and seals the corpus.
impl Corpus {
    /// Replace every document's text with `f(index, text)`
    pub fn map_documents<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(usize, String) -> String,
    {
        self.sealed = true;
        for doc in self.documents.iter_mut() {
            let text = std::mem::take(&mut doc.text);
            doc.text = f(doc.index, text);
        }
        self
    }

    /// Run the full cleaning pipeline of `cleaner` over every document
    pub fn for_each_document(&mut self, cleaner: &Cleaner) -> &mut Self {
        self.map_documents(|_, text| cleaner.clean(text))
    }

    /// Collapse whitespace runs and trim
    pub fn clean(&mut self) -> &mut Self {
        self.map_documents(|_, text| cleaner::collapse_whitespace(text))
    }

    /// Replace line breaks with a single space
    pub fn remove_newlines(&mut self) -> &mut Self {
        self.map_documents(|_, text| cleaner::remove_newlines(text, " "))
    }

    pub fn to_lower(&mut self) -> &mut Self {
        self.map_documents(|_, text| cleaner::lowercase(text))
    }

    pub fn remove_interpunctuation(&mut self) -> &mut Self {
        self.map_documents(|_, text| cleaner::strip_punctuation(text, false))
    }

    /// Remove whole-token matches of `words`
    pub fn remove_words(&mut self, words: &IndexSet<String>) -> &mut Self {
        self.map_documents(|_, text| cleaner::remove_words(text, words))
    }

    pub fn expand_contractions(&mut self, table: &IndexMap<String, String>) -> &mut Self {
        self.map_documents(|_, text| cleaner::expand_contractions(text, table))
    }

    pub fn normalize_terms(&mut self, map: &IndexMap<String, String>) -> &mut Self {
        self.map_documents(|_, text| cleaner::normalize_terms(text, map))
    }
}

impl<S> FromIterator<S> for Corpus
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let documents = iter
            .into_iter()
            .enumerate()
            .map(|(index, text)| Document {
                index,
                text: text.into(),
            })
            .collect();
        Self {
            documents,
            sealed: false,
        }
    }
}
