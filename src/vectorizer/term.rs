use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// TermFrequency struct
/// Counts how many times each term occurs.
///
/// Terms keep first-seen order, so iteration is deterministic.
///
/// # Examples
/// ```
/// use term_matrix::TermFrequency;
/// let mut term_freq = TermFrequency::new();
/// term_freq.add_term("term1");
/// term_freq.add_term("term2");
/// term_freq.add_term("term1");
///
/// assert_eq!(term_freq.term_count("term1"), 2);
/// assert_eq!(term_freq.term_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    term_count: IndexMap<String, u64>,
    total_term_count: u64,
}

/// Implementation for adding terms
impl TermFrequency {
    /// Create a new TermFrequency
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the whitespace-delimited tokens of `text`
    pub fn from_text(text: &str) -> Self {
        let mut tf = Self::new();
        for token in text.split_whitespace() {
            tf.add_term(token);
        }
        tf
    }

    /// Add a term
    ///
    /// # Arguments
    /// * `term` - term to add
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        match self.term_count.get_mut(term) {
            Some(count) => *count += 1,
            None => {
                self.term_count.insert(term.to_string(), 1);
            }
        }
        self.total_term_count += 1;
        self
    }

    /// Set the occurrence count for a term
    /// A count of zero removes the term.
    ///
    /// # Arguments
    /// * `term` - term
    /// * `count` - Occurrence count
    pub fn set_term_count(&mut self, term: &str, count: u64) -> &mut Self {
        let previous = if count == 0 {
            self.term_count.shift_remove(term).unwrap_or(0)
        } else {
            match self.term_count.get_mut(term) {
                Some(current) => std::mem::replace(current, count),
                None => {
                    self.term_count.insert(term.to_string(), count);
                    0
                }
            }
        };
        self.total_term_count = self.total_term_count - previous + count;
        self
    }
}

/// Implementation for retrieving information from TermFrequency
impl TermFrequency {
    /// Iterator over terms and their counts, in first-seen order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_count
            .iter()
            .map(|(term, &count)| (term.as_str(), count))
    }

    /// Get the total count of all terms
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    /// Get the occurrence count for a specific term
    /// Unknown terms count zero.
    #[inline]
    pub fn term_count(&self, term: &str) -> u64 {
        self.term_count.get(term).copied().unwrap_or(0)
    }

    /// Check if a term exists
    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.term_count.contains_key(term)
    }

    /// Get the number of unique terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }

    /// Remove terms by a condition
    ///
    /// # Arguments
    /// * `condition` - Closure to determine which terms to remove
    ///
    /// # Returns
    /// * `u64` - Total count of removed terms
    #[inline]
    pub fn remove_terms_by<F>(&mut self, condition: F) -> u64
    where
        F: Fn(&str, u64) -> bool,
    {
        let mut removed_total_count: u64 = 0;
        self.term_count.retain(|term, count| {
            if condition(term, *count) {
                removed_total_count += *count;
                false
            } else {
                true
            }
        });
        self.total_term_count -= removed_total_count;
        removed_total_count
    }

    /// Get a vector of terms sorted by frequency (descending)
    /// Equal counts are ordered by term.
    ///
    /// # Returns
    /// * `Vec<(String, u64)>` - Vector of terms sorted by frequency
    #[inline]
    pub fn sorted_frequency_vector(&self) -> Vec<(String, u64)> {
        let mut term_list: Vec<(String, u64)> = self
            .term_count
            .iter()
            .map(|(term, &count)| (term.clone(), count))
            .collect();

        term_list.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        term_list
    }
}
