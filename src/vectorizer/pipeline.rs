//! End-to-end run: raw documents in, vocabulary and matrices out.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::vectorizer::{
    cleaner::{CleanConfig, Cleaner},
    corpus::Corpus,
    matrix::TermDocumentMatrix,
    vocabulary::Vocabulary,
};

/// Options chosen by the caller before a run.
///
/// Lowercasing, punctuation stripping, newline removal and whitespace collapse
/// always run. Everything here is opt-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub expand_contractions: bool,
    /// remove the built-in English stop words
    pub remove_stopwords: bool,
    /// comma-separated extra words to remove
    pub custom_words: Option<String>,
    /// replace country codes with country names
    pub normalize_terms: bool,
    pub apply_tfidf: bool,
    /// minimum fraction of documents a term must appear in
    pub sparse_threshold: Option<f64>,
    pub build_vectors: bool,
    pub build_frequency_chart: bool,
    /// smallest total count listed in the frequency chart
    pub frequency_min_count: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            expand_contractions: false,
            remove_stopwords: false,
            custom_words: None,
            normalize_terms: false,
            apply_tfidf: false,
            sparse_threshold: None,
            build_vectors: false,
            build_frequency_chart: false,
            frequency_min_count: 1,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expand_contractions(mut self, on: bool) -> Self {
        self.expand_contractions = on;
        self
    }

    pub fn remove_stopwords(mut self, on: bool) -> Self {
        self.remove_stopwords = on;
        self
    }

    pub fn custom_words(mut self, list: impl Into<String>) -> Self {
        self.custom_words = Some(list.into());
        self
    }

    pub fn normalize_terms(mut self, on: bool) -> Self {
        self.normalize_terms = on;
        self
    }

    pub fn apply_tfidf(mut self, on: bool) -> Self {
        self.apply_tfidf = on;
        self
    }

    pub fn sparse_threshold(mut self, threshold: f64) -> Self {
        self.sparse_threshold = Some(threshold);
        self
    }

    pub fn build_vectors(mut self, on: bool) -> Self {
        self.build_vectors = on;
        self
    }

    pub fn build_frequency_chart(mut self, min_count: u64) -> Self {
        self.build_frequency_chart = true;
        self.frequency_min_count = min_count;
        self
    }

    /// Reject invalid values before any stage runs
    pub fn validate(&self) -> Result<()> {
        if let Some(threshold) = self.sparse_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(Error::InvalidThreshold { value: threshold });
            }
        }
        if let Some(list) = &self.custom_words {
            parse_word_list(list)?;
        }
        Ok(())
    }

    /// Cleaner for this configuration, wired with the built-in word tables
    pub fn cleaner(&self) -> Result<Cleaner> {
        let mut config = CleanConfig::default();
        if self.expand_contractions {
            config = config.with_contractions();
        }
        if self.normalize_terms {
            config = config.with_country_codes();
        }
        if self.remove_stopwords {
            config = config.with_english_stopwords();
        }
        if let Some(list) = &self.custom_words {
            config = config.with_custom_words(parse_word_list(list)?);
        }
        Ok(Cleaner::new(config))
    }
}

/// Split a comma-separated word list.
///
/// Entries are trimmed and lowercased. An empty entry (`"a,,b"`, a trailing
/// comma, a blank list) or an entry containing whitespace is an error, since
/// removal works on single whitespace-delimited tokens.
pub fn parse_word_list(list: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    for entry in list.split(',') {
        let word = entry.trim();
        if word.is_empty() {
            return Err(Error::word_list(list, "empty entry"));
        }
        if word.contains(char::is_whitespace) {
            return Err(Error::word_list(list, format!("{word:?} is not a single word")));
        }
        words.push(word.to_ascii_lowercase());
    }
    Ok(words)
}

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// cleaned documents
    pub corpus: Corpus,
    /// columns of `counts` and `matrix`
    pub vocabulary: Vocabulary,
    /// raw counts, after sparse-term removal
    pub counts: TermDocumentMatrix<u64>,
    /// TF-IDF weights when enabled, otherwise the counts as `f64`
    pub matrix: TermDocumentMatrix<f64>,
    /// L2-normalized count vectors
    pub vectors: Option<TermDocumentMatrix<f64>>,
    /// (term, total) ranked by descending total, ties by term
    pub frequencies: Option<Vec<(String, u64)>>,
}

impl PipelineOutput {
    pub fn document_count(&self) -> usize {
        self.counts.n_docs()
    }

    pub fn term_count(&self) -> usize {
        self.vocabulary.len()
    }

    /// One-line description of the result
    pub fn summary(&self) -> String {
        format!("Documents: {}, Terms: {}", self.document_count(), self.term_count())
    }
}

/// Runs the stages in order: collect, clean, vocabulary, matrix, sparse
/// filter, TF-IDF, vectors, frequency chart. Each stage completes before the
/// next starts.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    cleaner: Cleaner,
}

impl Pipeline {
    /// Validate `config` and build the cleaner
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let cleaner = config.cleaner()?;
        Ok(Self { config, cleaner })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run<I, S>(&self, documents: I) -> Result<PipelineOutput>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut corpus = Corpus::new();
        for doc in documents {
            corpus.add_document(doc)?;
        }
        self.run_corpus(corpus)
    }

    /// Run on an already assembled corpus
    pub fn run_corpus(&self, mut corpus: Corpus) -> Result<PipelineOutput> {
        let _span = tracing::info_span!("pipeline", documents = corpus.document_count()).entered();

        tracing::debug!("cleaning documents");
        corpus.for_each_document(&self.cleaner);

        let vocabulary = Vocabulary::from_corpus(&corpus);
        tracing::debug!(terms = vocabulary.len(), "vocabulary built");

        let mut counts = TermDocumentMatrix::build(&corpus, &vocabulary);
        if let Some(threshold) = self.config.sparse_threshold {
            counts = counts.remove_sparse_terms(threshold)?;
        }

        let matrix = if self.config.apply_tfidf {
            counts.tf_idf()
        } else {
            counts.map_cells(|c| c as f64)
        };

        let vectors = self.config.build_vectors.then(|| counts.l2_normalize());

        let frequencies = self.config.build_frequency_chart.then(|| {
            let min_count = self.config.frequency_min_count;
            let mut totals = counts.term_totals();
            totals.remove_terms_by(|_, count| count < min_count);
            totals.sorted_frequency_vector()
        });

        tracing::info!(
            documents = counts.n_docs(),
            terms = counts.n_terms(),
            tfidf = self.config.apply_tfidf,
            "scanning complete"
        );

        Ok(PipelineOutput {
            corpus,
            vocabulary: counts.vocabulary().clone(),
            counts,
            matrix,
            vectors,
            frequencies,
        })
    }
}
