use std::fmt::Display;

use num::Num;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::vectorizer::{corpus::Corpus, term::TermFrequency, vocabulary::Vocabulary};

/// Dense document × term matrix.
///
/// Row `d` is the `d`-th document of the corpus the matrix was built from,
/// column `t` is the `t`-th vocabulary term. Every cell is present; terms a
/// document does not contain read as zero.
///
/// A matrix is never resized. Transforms such as [`remove_sparse_terms`] and
/// TF-IDF weighting return a new matrix and leave `self` untouched.
///
/// `N` is the cell type: `u64` for raw counts, `f64` for weights.
///
/// [`remove_sparse_terms`]: TermDocumentMatrix::remove_sparse_terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermDocumentMatrix<N = u64> {
    vocabulary: Vocabulary,
    n_docs: usize,
    /// row-major, `n_docs * vocabulary.len()` cells
    cells: Vec<N>,
}

impl TermDocumentMatrix<u64> {
    /// Count every vocabulary term in every document of `corpus`.
    ///
    /// Tokens that are not part of `vocabulary` are ignored.
    pub fn build(corpus: &Corpus, vocabulary: &Vocabulary) -> Self {
        let n_terms = vocabulary.len();
        let n_docs = corpus.document_count();
        let mut cells = vec![0u64; n_docs * n_terms];
        for (row, doc) in cells.chunks_mut(n_terms.max(1)).zip(corpus.documents()) {
            let freq = TermFrequency::from_text(doc.text());
            for (term, count) in freq.iter() {
                if let Some(col) = vocabulary.index_of(term) {
                    row[col] = count;
                }
            }
        }
        tracing::debug!(documents = n_docs, terms = n_terms, "term-document matrix built");
        Self {
            vocabulary: vocabulary.clone(),
            n_docs,
            cells,
        }
    }

    /// Derive the vocabulary from `corpus` and count against it
    pub fn from_corpus(corpus: &Corpus) -> Self {
        Self::build(corpus, &Vocabulary::from_corpus(corpus))
    }

    /// Sum of every column
    fn column_totals(&self) -> Vec<u64> {
        let mut totals = vec![0u64; self.n_terms()];
        for row in self.rows() {
            for (total, &cell) in totals.iter_mut().zip(row) {
                *total += cell;
            }
        }
        totals
    }

    /// Total count of each term over all documents, in column order
    pub fn term_totals(&self) -> TermFrequency {
        let mut totals = TermFrequency::new();
        for (term, total) in self.vocabulary.iter().zip(self.column_totals()) {
            totals.set_term_count(term, total);
        }
        totals
    }

    /// Terms whose total count is at least `min_count`.
    ///
    /// Pairs come back in column order; callers that need a ranking sort
    /// them themselves.
    pub fn find_frequent_terms(&self, min_count: u64) -> Vec<(String, u64)> {
        self.vocabulary
            .iter()
            .zip(self.column_totals())
            .filter(|&(_, total)| total >= min_count)
            .map(|(term, total)| (term.to_string(), total))
            .collect()
    }
}

impl<N> TermDocumentMatrix<N>
where
    N: Num + Copy,
{
    pub(crate) fn from_parts(vocabulary: Vocabulary, n_docs: usize, cells: Vec<N>) -> Self {
        debug_assert_eq!(cells.len(), n_docs * vocabulary.len());
        Self {
            vocabulary,
            n_docs,
            cells,
        }
    }

    /// Row-major cell storage
    #[inline]
    pub(crate) fn cells(&self) -> &[N] {
        &self.cells
    }

    /// Number of rows
    #[inline]
    pub fn n_docs(&self) -> usize {
        self.n_docs
    }

    /// Number of columns
    #[inline]
    pub fn n_terms(&self) -> usize {
        self.vocabulary.len()
    }

    /// (rows, columns)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_docs, self.n_terms())
    }

    /// true if the matrix has no rows or no columns
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Column labels
    pub fn terms(&self) -> Vec<String> {
        self.vocabulary.terms()
    }

    /// Cell value, `None` when out of range
    #[inline]
    pub fn get(&self, doc: usize, term: usize) -> Option<N> {
        if doc >= self.n_docs || term >= self.n_terms() {
            return None;
        }
        Some(self.cells[doc * self.n_terms() + term])
    }

    /// Cell value by term text. A term outside the vocabulary reads as zero;
    /// `None` only when `doc` is out of range.
    pub fn value(&self, doc: usize, term: &str) -> Option<N> {
        if doc >= self.n_docs {
            return None;
        }
        Some(
            self.vocabulary
                .index_of(term)
                .map_or_else(N::zero, |col| self.cells[doc * self.n_terms() + col]),
        )
    }

    pub fn row(&self, doc: usize) -> Option<&[N]> {
        if doc >= self.n_docs {
            return None;
        }
        let n = self.n_terms();
        Some(&self.cells[doc * n..(doc + 1) * n])
    }

    /// Rows in document order
    pub fn rows(&self) -> impl Iterator<Item = &[N]> + '_ {
        let n = self.n_terms();
        (0..self.n_docs).map(move |doc| &self.cells[doc * n..(doc + 1) * n])
    }

    pub fn column(&self, term: usize) -> Option<Vec<N>> {
        if term >= self.n_terms() {
            return None;
        }
        Some(self.rows().map(|row| row[term]).collect())
    }

    /// Number of documents with a non-zero cell in column `term`
    pub fn doc_frequency(&self, term: usize) -> usize {
        if term >= self.n_terms() {
            return 0;
        }
        self.rows().filter(|row| !row[term].is_zero()).count()
    }

    /// [`doc_frequency`](Self::doc_frequency) of every column
    pub fn doc_frequencies(&self) -> Vec<usize> {
        let mut freqs = vec![0usize; self.n_terms()];
        for row in self.rows() {
            for (freq, cell) in freqs.iter_mut().zip(row) {
                if !cell.is_zero() {
                    *freq += 1;
                }
            }
        }
        freqs
    }

    /// New matrix of the same shape with `f` applied to every cell
    pub fn map_cells<M, F>(&self, f: F) -> TermDocumentMatrix<M>
    where
        M: Num + Copy,
        F: Fn(N) -> M,
    {
        TermDocumentMatrix::from_parts(
            self.vocabulary.clone(),
            self.n_docs,
            self.cells.iter().map(|&c| f(c)).collect(),
        )
    }

    /// New matrix with only the given columns, which must be ascending
    fn select_columns(&self, columns: &[usize]) -> Self {
        let mut cells = Vec::with_capacity(self.n_docs * columns.len());
        for row in self.rows() {
            cells.extend(columns.iter().map(|&col| row[col]));
        }
        Self::from_parts(self.vocabulary.select(columns), self.n_docs, cells)
    }

    /// Drop terms that occur in too few documents.
    ///
    /// A term survives when the fraction of documents with a non-zero count is
    /// at least `threshold`. `0.0` keeps everything, `1.0` keeps only terms
    /// present in every document. Surviving columns keep their relative order.
    ///
    /// # Errors
    /// [`Error::InvalidThreshold`] if `threshold` is NaN or outside `[0, 1]`.
    pub fn remove_sparse_terms(&self, threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::InvalidThreshold { value: threshold });
        }
        if self.n_docs == 0 {
            return Ok(self.clone());
        }
        let n_docs = self.n_docs as f64;
        let keep: Vec<usize> = self
            .doc_frequencies()
            .into_iter()
            .enumerate()
            .filter(|&(_, df)| df as f64 / n_docs >= threshold)
            .map(|(col, _)| col)
            .collect();
        tracing::debug!(
            threshold,
            before = self.n_terms(),
            after = keep.len(),
            "sparse terms removed"
        );
        Ok(self.select_columns(&keep))
    }

    /// Term-major table: one row per term, one column per document.
    pub fn to_table(&self) -> Table<N> {
        let mut header = Vec::with_capacity(self.n_docs + 1);
        header.push("Term".to_string());
        header.extend((1..=self.n_docs).map(|i| format!("Document {i}")));
        let rows = self
            .vocabulary
            .iter()
            .enumerate()
            .map(|(col, term)| (term.to_string(), self.rows().map(|row| row[col]).collect()))
            .collect();
        Table { header, rows }
    }
}

/// Labeled numeric table handed to output collaborators.
///
/// `header` is `["Term", "Document 1", "Document 2", ...]`; every row holds a
/// term followed by one value per document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table<N> {
    pub header: Vec<String>,
    pub rows: Vec<(String, Vec<N>)>,
}

impl<N> Table<N>
where
    N: Display,
{
    /// Header then rows, every field rendered as text
    pub fn records(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        std::iter::once(self.header.clone()).chain(self.rows.iter().map(|(term, values)| {
            std::iter::once(term.clone())
                .chain(values.iter().map(ToString::to_string))
                .collect()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(docs: &[&str]) -> TermDocumentMatrix<u64> {
        let corpus: Corpus = docs.iter().copied().collect();
        TermDocumentMatrix::from_corpus(&corpus)
    }

    #[test]
    fn counts_match_cleaned_text() {
        let m = matrix(&["the cat sat", "the dog sat on the mat"]);
        assert_eq!(m.terms(), vec!["cat", "dog", "mat", "on", "sat", "the"]);
        assert_eq!(m.row(0), Some(&[1, 0, 0, 0, 1, 1][..]));
        assert_eq!(m.row(1), Some(&[0, 1, 1, 1, 1, 2][..]));
        assert_eq!(m.shape(), (2, 6));
    }

    #[test]
    fn counting_is_whole_word() {
        let m = matrix(&["the theme then the"]);
        assert_eq!(m.value(0, "the"), Some(2));
        assert_eq!(m.value(0, "theme"), Some(1));
        assert_eq!(m.value(0, "absent"), Some(0));
        assert_eq!(m.value(1, "the"), None);
    }

    #[test]
    fn build_ignores_tokens_outside_vocabulary() {
        let corpus: Corpus = ["a b c", "c d"].into_iter().collect();
        let vocab = Vocabulary::from_terms(["c", "d"]);
        let m = TermDocumentMatrix::build(&corpus, &vocab);
        assert_eq!(m.row(0), Some(&[1, 0][..]));
        assert_eq!(m.row(1), Some(&[1, 1][..]));
    }

    #[test]
    fn empty_document_is_a_zero_row() {
        let m = matrix(&["a b", "", "b"]);
        assert_eq!(m.shape(), (3, 2));
        assert_eq!(m.row(1), Some(&[0, 0][..]));
    }

    #[test]
    fn empty_corpus_gives_empty_matrix() {
        let m = matrix(&[]);
        assert_eq!(m.shape(), (0, 0));
        assert!(m.is_empty());
        assert_eq!(m.rows().count(), 0);
        assert!(m.find_frequent_terms(0).is_empty());
        assert_eq!(m.remove_sparse_terms(0.5).unwrap().shape(), (0, 0));

        let blank = matrix(&["", ""]);
        assert_eq!(blank.shape(), (2, 0));
        assert_eq!(blank.rows().map(<[u64]>::len).collect::<Vec<_>>(), vec![0, 0]);
    }

    #[test]
    fn term_totals_cross_check_raw_text() {
        let docs = ["a b a", "b c", "a"];
        let m = matrix(&docs);
        let expected = TermFrequency::from_text(&docs.join(" "));
        let totals = m.term_totals();
        for (term, count) in expected.iter() {
            assert_eq!(totals.term_count(term), count);
        }
        assert_eq!(totals.term_sum(), expected.term_sum());
    }

    #[test]
    fn doc_frequencies_count_non_zero_rows() {
        let m = matrix(&["a b b", "b c", "b"]);
        assert_eq!(m.doc_frequencies(), vec![1, 3, 1]);
        assert_eq!(m.doc_frequency(1), 3);
        assert_eq!(m.doc_frequency(9), 0);
    }

    #[test]
    fn remove_sparse_terms_zero_is_a_no_op() {
        let m = matrix(&["a b", "b c", "d"]);
        assert_eq!(m.remove_sparse_terms(0.0).unwrap(), m);
    }

    #[test]
    fn remove_sparse_terms_one_keeps_ubiquitous_terms() {
        let m = matrix(&["a b x", "b c x", "x b"]);
        let kept = m.remove_sparse_terms(1.0).unwrap();
        assert_eq!(kept.terms(), vec!["b", "x"]);
        assert_eq!(kept.n_docs(), 3);
    }

    #[test]
    fn remove_sparse_terms_preserves_order_and_leaves_input_intact() {
        let m = matrix(&["a b c d", "a c", "c d", "a c d"]);
        let kept = m.remove_sparse_terms(0.5).unwrap();
        assert_eq!(kept.terms(), vec!["a", "c", "d"]);
        assert_eq!(kept.row(1), Some(&[1, 1, 0][..]));
        assert_eq!(m.n_terms(), 4);
    }

    #[test]
    fn remove_sparse_terms_rejects_bad_thresholds() {
        let m = matrix(&["a"]);
        assert_eq!(
            m.remove_sparse_terms(1.01),
            Err(Error::InvalidThreshold { value: 1.01 })
        );
        assert!(m.remove_sparse_terms(-0.1).is_err());
        assert!(m.remove_sparse_terms(f64::NAN).is_err());
    }

    #[test]
    fn find_frequent_terms_filters_by_total() {
        let m = matrix(&["a b a", "b a c"]);
        assert_eq!(
            m.find_frequent_terms(2),
            vec![("a".to_string(), 3), ("b".to_string(), 2)]
        );
        assert_eq!(m.find_frequent_terms(0).len(), 3);
        assert!(m.find_frequent_terms(4).is_empty());
    }

    #[test]
    fn table_is_term_major_with_document_header() {
        let m = matrix(&["x y", "y"]);
        let table = m.to_table();
        assert_eq!(table.header, vec!["Term", "Document 1", "Document 2"]);
        assert_eq!(table.rows[1], ("y".to_string(), vec![1, 1]));
        let records: Vec<Vec<String>> = table.records().collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], vec!["x", "1", "0"]);
    }

    #[test]
    fn map_cells_keeps_shape() {
        let m = matrix(&["a b", "b"]);
        let doubled = m.map_cells(|c| c as f64 * 2.0);
        assert_eq!(doubled.shape(), m.shape());
        assert_eq!(doubled.get(0, 1), Some(2.0));
        assert_eq!(doubled.get(2, 0), None);
        assert_eq!(m.column(1), Some(vec![1, 1]));
        assert_eq!(m.column(2), None);
    }
}
