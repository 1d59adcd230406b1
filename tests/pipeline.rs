use proptest::prelude::*;
use term_matrix::{
    CleanConfig, Cleaner, Corpus, Pipeline, PipelineConfig, TermDocumentMatrix, Vocabulary,
};

const DOCS: [&str; 2] = ["The cat sat.", "The dog sat on the mat."];

fn rows(m: &TermDocumentMatrix<u64>) -> Vec<Vec<u64>> {
    m.rows().map(<[u64]>::to_vec).collect()
}

#[test]
fn default_cleaning_builds_counts() {
    let mut corpus: Corpus = DOCS.into_iter().collect();
    corpus.for_each_document(&Cleaner::default());
    let texts: Vec<&str> = corpus.documents().map(|d| d.text()).collect();
    assert_eq!(texts, vec!["the cat sat", "the dog sat on the mat"]);

    let m = TermDocumentMatrix::from_corpus(&corpus);
    assert_eq!(m.terms(), vec!["cat", "dog", "mat", "on", "sat", "the"]);
    assert_eq!(rows(&m), vec![vec![1, 0, 0, 0, 1, 1], vec![0, 1, 1, 1, 1, 2]]);
}

#[test]
fn stopword_removal_builds_smaller_matrix() {
    let cleaner = Cleaner::new(CleanConfig::default().with_stopwords(["the", "on"]));
    let mut corpus: Corpus = DOCS.into_iter().collect();
    corpus.for_each_document(&cleaner);
    let texts: Vec<&str> = corpus.documents().map(|d| d.text()).collect();
    assert_eq!(texts, vec!["cat sat", "dog sat mat"]);

    let m = TermDocumentMatrix::from_corpus(&corpus);
    assert_eq!(m.terms(), vec!["cat", "dog", "mat", "sat"]);
    assert_eq!(rows(&m), vec![vec![1, 0, 0, 1], vec![0, 1, 1, 1]]);
}

#[test]
fn pipeline_with_custom_words_matches_manual_run() {
    let out = Pipeline::new(PipelineConfig::new().custom_words("the,on"))
        .unwrap()
        .run(DOCS)
        .unwrap();
    assert_eq!(out.vocabulary.terms(), vec!["cat", "dog", "mat", "sat"]);
    assert_eq!(rows(&out.counts), vec![vec![1, 0, 0, 1], vec![0, 1, 1, 1]]);
    assert_eq!(out.summary(), "Documents: 2, Terms: 4");
}

#[test]
fn sparse_thresholds() {
    let out = Pipeline::new(PipelineConfig::new()).unwrap().run(DOCS).unwrap();
    let m = &out.counts;

    assert_eq!(m.remove_sparse_terms(0.0).unwrap(), *m);
    let dense = m.remove_sparse_terms(1.0).unwrap();
    assert_eq!(dense.terms(), vec!["sat", "the"]);
    assert_eq!(rows(&dense), vec![vec![1, 1], vec![1, 2]]);
    assert!(m.remove_sparse_terms(1.01).is_err());
    assert_eq!(m.n_terms(), 6);
}

#[test]
fn table_is_labeled_per_document() {
    let out = Pipeline::new(PipelineConfig::new()).unwrap().run(DOCS).unwrap();
    let table = out.counts.to_table();
    assert_eq!(table.header, vec!["Term", "Document 1", "Document 2"]);
    assert_eq!(table.rows[5], ("the".to_string(), vec![1, 2]));
    let records: Vec<Vec<String>> = table.records().collect();
    assert_eq!(records.len(), 7);
    assert_eq!(records[1], vec!["cat", "1", "0"]);
}

#[test]
fn full_run_is_deterministic() {
    let config = PipelineConfig::new()
        .remove_stopwords(true)
        .apply_tfidf(true)
        .build_vectors(true)
        .build_frequency_chart(1);
    let pipeline = Pipeline::new(config).unwrap();
    let docs = [
        "Rust is fast. Rust is safe!",
        "Python is easy; Python is slow?",
        "Fast code, safe code.",
    ];
    let a = pipeline.run(docs).unwrap();
    let b = pipeline.run(docs).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        a.frequencies.as_ref().unwrap()[..3],
        [
            ("code".to_string(), 2),
            ("fast".to_string(), 2),
            ("python".to_string(), 2),
        ]
    );
}

proptest! {
    #[test]
    fn vocabulary_is_sorted_unique_tokens(docs in prop::collection::vec("[a-c ]{0,12}", 0..6)) {
        let corpus: Corpus = docs.iter().cloned().collect();
        let vocab = Vocabulary::from_corpus(&corpus);
        let mut expected: Vec<String> = docs
            .iter()
            .flat_map(|d| d.split_whitespace().map(str::to_string))
            .collect();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(vocab.terms(), expected);
    }

    #[test]
    fn cleaning_is_idempotent(
        text in "([ -~\t\n]|'|don't|We're|US){0,24}",
        keep_intra_word in any::<bool>(),
    ) {
        let cleaner = Cleaner::new(
            CleanConfig::default()
                .with_contractions()
                .with_country_codes()
                .with_english_stopwords()
                .keep_intra_word(keep_intra_word),
        );
        let once = cleaner.clean(text);
        let twice = cleaner.clean(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn cell_sums_match_token_counts(docs in prop::collection::vec("[a-d ]{0,16}", 0..6)) {
        let corpus: Corpus = docs.iter().cloned().collect();
        let m = TermDocumentMatrix::from_corpus(&corpus);
        prop_assert_eq!(m.shape(), (docs.len(), m.vocabulary().len()));
        for (row, doc) in m.rows().zip(&docs) {
            prop_assert_eq!(row.iter().sum::<u64>(), doc.split_whitespace().count() as u64);
        }
        let totals: u64 = m.term_totals().term_sum();
        let tokens: usize = docs.iter().map(|d| d.split_whitespace().count()).sum();
        prop_assert_eq!(totals, tokens as u64);
    }
}
