//! Document text cleaning.
//!
//! A [`Cleaner`] runs a fixed sequence of text steps over one document:
//!
//! 1. contraction expansion (before lowercasing, so `Don't` keeps its case)
//! 2. term normalization (e.g. `US` -> `United States`)
//! 3. lowercasing
//! 4. punctuation stripping
//! 5. stop word and custom word removal
//! 6. newline removal and whitespace collapse
//!
//! Every step takes the text by value and returns the new text. Callers store
//! the returned value; there is no step that mutates through a reference.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::vectorizer::lexicon;

/// Which cleaning steps run, and the word tables they use.
///
/// Removal sets are merged by union, so overlapping stop words and custom
/// words are not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    pub lowercase: bool,
    pub strip_punctuation: bool,
    /// keep `-` and `'` when both neighbours are word characters
    pub keep_intra_word: bool,
    pub collapse_whitespace: bool,
    pub remove_newlines: bool,
    /// what `\r` / `\n` are replaced with
    pub newline_replacement: String,
    pub expand_contractions: bool,
    pub contractions: IndexMap<String, String>,
    pub remove_stopwords: bool,
    pub stopwords: IndexSet<String>,
    /// removed regardless of `remove_stopwords`
    pub custom_words: IndexSet<String>,
    pub normalize_terms: bool,
    pub term_map: IndexMap<String, String>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            strip_punctuation: true,
            keep_intra_word: false,
            collapse_whitespace: true,
            remove_newlines: true,
            newline_replacement: " ".to_string(),
            expand_contractions: false,
            contractions: IndexMap::new(),
            remove_stopwords: false,
            stopwords: IndexSet::new(),
            custom_words: IndexSet::new(),
            normalize_terms: false,
            term_map: IndexMap::new(),
        }
    }
}

impl CleanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable contraction expansion with the built-in English table
    pub fn with_contractions(mut self) -> Self {
        self.expand_contractions = true;
        self.contractions = lexicon::contractions();
        self
    }

    /// Enable contraction expansion with a caller supplied table
    pub fn with_contraction_table(mut self, table: IndexMap<String, String>) -> Self {
        self.expand_contractions = true;
        self.contractions = table;
        self
    }

    /// Enable stop word removal with the built-in English list
    pub fn with_english_stopwords(mut self) -> Self {
        self.remove_stopwords = true;
        self.stopwords = lexicon::english_stopwords();
        self
    }

    /// Enable stop word removal with a caller supplied list
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.remove_stopwords = true;
        self.stopwords = words.into_iter().map(|w| w.as_ref().to_ascii_lowercase()).collect();
        self
    }

    /// Extra words to remove, matched after lowercasing
    pub fn with_custom_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.custom_words
            .extend(words.into_iter().map(|w| w.as_ref().to_ascii_lowercase()));
        self
    }

    /// Enable term normalization with the built-in country code table
    pub fn with_country_codes(mut self) -> Self {
        self.normalize_terms = true;
        self.term_map = lexicon::country_codes();
        self
    }

    /// Enable term normalization with a caller supplied table
    pub fn with_term_map(mut self, map: IndexMap<String, String>) -> Self {
        self.normalize_terms = true;
        self.term_map = map;
        self
    }

    pub fn keep_intra_word(mut self, keep: bool) -> Self {
        self.keep_intra_word = keep;
        self
    }

    pub fn newline_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.newline_replacement = replacement.into();
        self
    }
}

/// Applies a [`CleanConfig`] to document text.
#[derive(Debug, Clone)]
pub struct Cleaner {
    config: CleanConfig,
    /// union of the active stop words and custom words
    removal: IndexSet<String>,
}

impl Cleaner {
    pub fn new(config: CleanConfig) -> Self {
        let mut removal = IndexSet::new();
        if config.remove_stopwords {
            removal.extend(config.stopwords.iter().cloned());
        }
        removal.extend(config.custom_words.iter().cloned());
        Self { config, removal }
    }

    pub fn config(&self) -> &CleanConfig {
        &self.config
    }

    /// Words removed in step 5
    pub fn removal_set(&self) -> &IndexSet<String> {
        &self.removal
    }

    /// Run every enabled step in order and return the cleaned text.
    #[must_use]
    pub fn clean(&self, text: String) -> String {
        let cfg = &self.config;
        let mut text = text;
        if cfg.expand_contractions && !cfg.contractions.is_empty() {
            text = expand_contractions(text, &cfg.contractions);
        }
        if cfg.normalize_terms && !cfg.term_map.is_empty() {
            text = normalize_terms(text, &cfg.term_map);
        }
        if cfg.lowercase {
            text = lowercase(text);
        }
        if cfg.strip_punctuation {
            text = strip_punctuation(text, cfg.keep_intra_word);
        }
        if !self.removal.is_empty() {
            text = remove_words(text, &self.removal);
        }
        if cfg.remove_newlines {
            text = remove_newlines(text, &cfg.newline_replacement);
        }
        if cfg.collapse_whitespace {
            text = collapse_whitespace(text);
        }
        text
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new(CleanConfig::default())
    }
}

/// Replace whole-word contractions.
///
/// The exact surface form is looked up first, then its lowercase form, so
/// `Don't` becomes `Do not` and `DON'T` becomes `do not`. Typographic
/// apostrophes are treated as `'`.
#[must_use]
pub fn expand_contractions(text: String, table: &IndexMap<String, String>) -> String {
    map_words(&text, |word| {
        let word = word.replace('\u{2019}', "'");
        if !word.contains('\'') {
            return None;
        }
        table
            .get(word.as_str())
            .or_else(|| table.get(word.to_lowercase().as_str()))
            .cloned()
    })
}

/// Replace whole words that exactly match a key of `map`.
///
/// Matching is case-sensitive: `US` is a country code, `us` is a pronoun.
#[must_use]
pub fn normalize_terms(text: String, map: &IndexMap<String, String>) -> String {
    map_words(&text, |word| map.get(word).cloned())
}

/// ASCII case fold
#[must_use]
pub fn lowercase(mut text: String) -> String {
    text.make_ascii_lowercase();
    text
}

/// Remove every character that is neither alphanumeric nor whitespace.
///
/// With `keep_intra_word`, a `-` or `'` whose neighbours are both alphanumeric
/// is kept (`state-of-the-art`, `o'clock`).
#[must_use]
pub fn strip_punctuation(text: String, keep_intra_word: bool) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        if c.is_alphanumeric() || c.is_whitespace() {
            out.push(c);
        } else if keep_intra_word
            && (c == '-' || c == '\'')
            && i > 0
            && chars[i - 1].is_alphanumeric()
            && chars.get(i + 1).is_some_and(|n| n.is_alphanumeric())
        {
            out.push(c);
        }
    }
    out
}

/// Drop whitespace-delimited tokens found in `words`. Surviving tokens are
/// joined with single spaces.
#[must_use]
pub fn remove_words(text: String, words: &IndexSet<String>) -> String {
    text.split_whitespace()
        .filter(|token| !words.contains(*token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replace `\r\n`, `\r` and `\n` with `replacement`
#[must_use]
pub fn remove_newlines(text: String, replacement: &str) -> String {
    if !text.contains(['\r', '\n']) {
        return text;
    }
    text.replace("\r\n", "\n").replace(['\r', '\n'], replacement)
}

/// Collapse whitespace runs to one space and trim both ends
#[must_use]
pub fn collapse_whitespace(text: String) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rewrite each whitespace-delimited word of `text`, keeping the whitespace
/// between words untouched.
///
/// `f` receives the word with leading and trailing punctuation removed and
/// returns a replacement for that core, or `None` to keep the word as is.
fn map_words<F>(text: &str, mut f: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while !rest.is_empty() {
        let space = rest.find(|c: char| !c.is_whitespace()).unwrap_or(rest.len());
        out.push_str(&rest[..space]);
        rest = &rest[space..];

        let word_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let word = &rest[..word_len];
        rest = &rest[word_len..];
        if word.is_empty() {
            continue;
        }

        let (prefix, core, suffix) = split_affixes(word);
        match (!core.is_empty()).then(|| f(core)).flatten() {
            Some(replaced) => {
                out.push_str(prefix);
                out.push_str(&replaced);
                out.push_str(suffix);
            }
            None => out.push_str(word),
        }
    }
    out
}

/// Split a word into leading punctuation, core, trailing punctuation.
/// The core starts and ends with an alphanumeric character; quotes around a
/// word (`'don't'`) belong to the affixes.
fn split_affixes(word: &str) -> (&str, &str, &str) {
    let start = match word.find(char::is_alphanumeric) {
        Some(start) => start,
        None => return (word, "", ""),
    };
    let end = word
        .char_indices()
        .rev()
        .find(|&(_, c)| c.is_alphanumeric())
        .map_or(start, |(i, c)| i + c.len_utf8());
    (&word[..start], &word[start..end], &word[end..])
}
