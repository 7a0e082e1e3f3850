//! Verbal number table for 0..=99
//!
//! Entries are ordered: 0-20 first, then the "tens ones" compounds 21-99.
//! Round tens above twenty are single words since the ones-word is omitted.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use voice_ci_core::Locale;

use super::verbalizer::verbalizer_for;

/// Largest value covered by the table
pub const MAX_TABLE_VALUE: u64 = 99;

static RUSSIAN_TABLE: Lazy<NumberWordTable> =
    Lazy::new(|| NumberWordTable::build(Locale::Russian));
static ENGLISH_TABLE: Lazy<NumberWordTable> =
    Lazy::new(|| NumberWordTable::build(Locale::English));

/// One verbal number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberWord {
    pub words: String,
    pub value: u64,
    /// Number of space-separated words (1 or 2)
    pub word_count: usize,
}

/// Immutable verbal-number lookup
#[derive(Debug)]
pub struct NumberWordTable {
    locale: Locale,
    entries: Vec<NumberWord>,
    index: HashMap<String, u64>,
}

impl NumberWordTable {
    /// Process-wide table for a locale
    pub fn for_locale(locale: Locale) -> &'static NumberWordTable {
        match locale {
            Locale::Russian => &RUSSIAN_TABLE,
            Locale::English => &ENGLISH_TABLE,
        }
    }

    fn build(locale: Locale) -> Self {
        let verbalizer = verbalizer_for(locale);
        let entries: Vec<NumberWord> = (0..=MAX_TABLE_VALUE)
            .map(|value| {
                let words = verbalizer.verbalize(value);
                let word_count = words.split(' ').count();
                NumberWord {
                    words,
                    value,
                    word_count,
                }
            })
            .collect();
        let index = entries
            .iter()
            .map(|e| (e.words.clone(), e.value))
            .collect();

        tracing::debug!(locale = %locale, entries = entries.len(), "Built number word table");

        Self {
            locale,
            entries,
            index,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Entries in table order
    pub fn entries(&self) -> &[NumberWord] {
        &self.entries
    }

    /// Exact lookup
    pub fn get(&self, words: &str) -> Option<u64> {
        self.index.get(words).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_russian_table_contents() {
        let table = NumberWordTable::for_locale(Locale::Russian);
        assert_eq!(table.len(), 100);
        assert_eq!(table.get("ноль"), Some(0));
        assert_eq!(table.get("двадцать"), Some(20));
        assert_eq!(table.get("сорок два"), Some(42));
        assert_eq!(table.get("девяносто девять"), Some(99));
        assert_eq!(table.get("сто"), None);
    }

    #[test]
    fn test_compound_shape() {
        let table = NumberWordTable::for_locale(Locale::Russian);
        for entry in table.entries() {
            let compound = entry.value > 20 && entry.value % 10 != 0;
            let expected = if compound { 2 } else { 1 };
            assert_eq!(entry.word_count, expected, "{}", entry.words);
        }
        assert_eq!(table.get("тридцать"), Some(30));
    }

    #[test]
    fn test_order() {
        let table = NumberWordTable::for_locale(Locale::English);
        let values: Vec<u64> = table.entries().iter().map(|e| e.value).collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(table.get("twenty one"), Some(21));
    }
}
