/// This crate is a text corpus engine: it cleans a set of documents and builds
/// a term-document matrix from them.
pub mod error;
pub mod utils;
pub mod vectorizer;

/// Term-Document Matrix
/// The central structure of this crate. One row per document, one column per
/// vocabulary term, each cell the number of times the term occurs in the
/// document.
///
/// `TermDocumentMatrix<N>` is generic over its cell type:
/// - `u64`: raw counts, built from a `Corpus`
/// - `f64`: TF-IDF weights or L2-normalized document vectors
///
/// Derived matrices (sparse-term removal, TF-IDF, normalization) are new
/// values; the matrix they were computed from is never modified.
///
/// # Serialization
/// Supported.
pub use vectorizer::matrix::{Table, TermDocumentMatrix};

/// Corpus
/// An ordered collection of documents. Documents are added first, then
/// cleaned in place. Once cleaning has started no further documents can be
/// added.
pub use vectorizer::corpus::{Corpus, Document};

/// Cleaner and its configuration
/// Runs contraction expansion, term normalization, lowercasing, punctuation
/// stripping, word removal and whitespace normalization over a document.
pub use vectorizer::cleaner::{CleanConfig, Cleaner};

/// Vocabulary
/// The sorted, deduplicated term list of a cleaned corpus. A term's position is
/// its matrix column.
pub use vectorizer::vocabulary::Vocabulary;

/// Term Frequency structure
/// Occurrence counts of terms within a document or a whole corpus, with the
/// total kept alongside. Used for frequency charts and corpus statistics.
pub use vectorizer::term::TermFrequency;

/// TF IDF Calculation Engine Trait
/// By implementing this trait, you can plug a different weighting strategy
/// into `TermDocumentMatrix::tf_idf_with`.
/// `DefaultTfIdfEngine` uses the raw count as TF and `ln(n / df)` as IDF.
pub use vectorizer::tfidf::{DefaultTfIdfEngine, TfIdfEngine};

/// Pipeline
/// Collect, clean, index and weight a document set in one call, driven by a
/// `PipelineConfig`.
pub use vectorizer::pipeline::{Pipeline, PipelineConfig, PipelineOutput};

pub use error::{Error, Result};
