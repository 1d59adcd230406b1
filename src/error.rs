use thiserror::Error;

/// Result type alias for term-matrix operations
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by the corpus and matrix engine.
///
/// Only configuration mistakes and misuse of the corpus lifecycle are errors.
/// Empty corpora, documents that clean down to nothing and zero-norm rows are
/// all valid inputs with defined results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Sparsity threshold outside `[0, 1]`
    #[error("sparsity threshold must be within [0, 1], got {value}")]
    InvalidThreshold { value: f64 },

    /// Custom word list could not be split into words
    #[error("invalid custom word list {list:?}: {reason}")]
    InvalidWordList { list: String, reason: String },

    /// A document was added after cleaning started
    #[error("corpus is sealed after cleaning ({documents} documents), no more documents can be added")]
    CorpusSealed { documents: usize },
}

impl Error {
    pub(crate) fn word_list(list: &str, reason: impl Into<String>) -> Self {
        Error::InvalidWordList {
            list: list.to_string(),
            reason: reason.into(),
        }
    }
}
