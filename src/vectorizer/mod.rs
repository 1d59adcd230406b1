pub mod cleaner;
pub mod corpus;
pub mod lexicon;
pub mod matrix;
pub mod normalize;
pub mod pipeline;
pub mod term;
pub mod tfidf;
pub mod vocabulary;
