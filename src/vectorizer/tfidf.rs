use rayon::prelude::*;

use crate::vectorizer::matrix::TermDocumentMatrix;

/// TF-IDF calculation strategy.
///
/// An engine turns per-column document frequencies into an IDF vector and
/// combines a raw count with its column's IDF into a cell weight.
pub trait TfIdfEngine {
    /// Build the IDF vector
    /// # Arguments
    /// * `doc_freqs` - number of documents containing each term
    /// * `n_docs` - number of documents
    /// # Returns
    /// * `Vec<f64>` - one IDF value per term
    fn idf_vec(doc_freqs: &[usize], n_docs: usize) -> Vec<f64>;

    /// Weight of a cell holding `count` in a column with `idf`
    fn weight(count: u64, idf: f64) -> f64;
}

/// Textbook TF-IDF.
///
/// `tf` is the raw count, `idf = ln(n_docs / df)`. A term present in every
/// document has `idf = 0`, so its weight is zero everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTfIdfEngine;

impl TfIdfEngine for DefaultTfIdfEngine {
    fn idf_vec(doc_freqs: &[usize], n_docs: usize) -> Vec<f64> {
        let n = n_docs as f64;
        doc_freqs
            .iter()
            .map(|&df| if df == 0 { 0.0 } else { (n / df as f64).ln() })
            .collect()
    }

    #[inline]
    fn weight(count: u64, idf: f64) -> f64 {
        count as f64 * idf
    }
}

impl TermDocumentMatrix<u64> {
    /// TF-IDF weights with [`DefaultTfIdfEngine`]
    pub fn tf_idf(&self) -> TermDocumentMatrix<f64> {
        self.tf_idf_with::<DefaultTfIdfEngine>()
    }

    /// TF-IDF weights with a custom engine.
    /// The result has the same shape and vocabulary as `self`.
    pub fn tf_idf_with<E: TfIdfEngine>(&self) -> TermDocumentMatrix<f64> {
        let idf = E::idf_vec(&self.doc_frequencies(), self.n_docs());
        let n_terms = self.n_terms();
        let cells: Vec<f64> = self
            .cells()
            .par_iter()
            .enumerate()
            .map(|(i, &count)| E::weight(count, idf[i % n_terms]))
            .collect();
        tracing::debug!(documents = self.n_docs(), terms = n_terms, "tf-idf weights computed");
        TermDocumentMatrix::from_parts(self.vocabulary().clone(), self.n_docs(), cells)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::vectorizer::corpus::Corpus;

    fn counts(docs: &[&str]) -> TermDocumentMatrix<u64> {
        let corpus: Corpus = docs.iter().copied().collect();
        TermDocumentMatrix::from_corpus(&corpus)
    }

    #[test]
    fn term_in_every_document_has_zero_weight() {
        let m = counts(&["the cat sat", "the dog sat on the mat"]).tf_idf();
        let the = m.vocabulary().index_of("the").unwrap();
        let sat = m.vocabulary().index_of("sat").unwrap();
        for doc in 0..m.n_docs() {
            assert_eq!(m.get(doc, the), Some(0.0));
            assert_eq!(m.get(doc, sat), Some(0.0));
        }
    }

    #[test]
    fn weight_is_raw_count_times_log_idf() {
        let m = counts(&["a a b", "b c", "b"]).tf_idf();
        assert_relative_eq!(m.value(0, "a").unwrap(), 2.0 * 3f64.ln());
        assert_relative_eq!(m.value(1, "c").unwrap(), 3f64.ln());
        assert_eq!(m.value(1, "a"), Some(0.0));
        assert_eq!(m.value(2, "b"), Some(0.0));
    }

    #[test]
    fn weighting_keeps_shape_and_source() {
        let raw = counts(&["x y", "y z", "z"]);
        let weighted = raw.tf_idf();
        assert_eq!(weighted.shape(), raw.shape());
        assert_eq!(weighted.vocabulary(), raw.vocabulary());
        assert_eq!(raw.value(0, "x"), Some(1));
    }

    #[test]
    fn empty_matrix_weighting_is_a_no_op() {
        let weighted = counts(&[]).tf_idf();
        assert_eq!(weighted.shape(), (0, 0));
        let blank = counts(&["", ""]).tf_idf();
        assert_eq!(blank.shape(), (2, 0));
    }

    #[test]
    fn idf_vec_of_default_engine() {
        let idf = DefaultTfIdfEngine::idf_vec(&[1, 2, 4], 4);
        assert_relative_eq!(idf[0], 4f64.ln());
        assert_relative_eq!(idf[1], 2f64.ln());
        assert_eq!(idf[2], 0.0);
    }

    struct Binary;

    impl TfIdfEngine for Binary {
        fn idf_vec(doc_freqs: &[usize], _n_docs: usize) -> Vec<f64> {
            vec![1.0; doc_freqs.len()]
        }

        fn weight(count: u64, idf: f64) -> f64 {
            if count > 0 { idf } else { 0.0 }
        }
    }

    #[test]
    fn custom_engine_plugs_in() {
        let m = counts(&["a a b", "b"]).tf_idf_with::<Binary>();
        assert_eq!(m.row(0), Some(&[1.0, 1.0][..]));
        assert_eq!(m.row(1), Some(&[0.0, 1.0][..]));
    }
}
