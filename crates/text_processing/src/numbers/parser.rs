//! Number word parser for recognized speech
//!
//! Speech recognition spells numbers out ("сорок два") and often garbles
//! them. The parser replaces approximate matches with digits so that build
//! numbers reach the NLU as numerals.

use voice_ci_core::Locale;

use super::verbalizer::is_digits;
use super::word_table::{NumberWord, NumberWordTable};
use crate::fuzzy::scorer::ratio;

/// Default minimum similarity for a token to count as a number word
pub const DEFAULT_CUTOFF: f64 = 0.75;

/// Collapses verbal numbers back into numerals
#[derive(Debug, Clone, Copy)]
pub struct NumberWordParser {
    table: &'static NumberWordTable,
    cutoff: f64,
}

impl NumberWordParser {
    pub fn new(locale: Locale) -> Self {
        Self::with_cutoff(locale, DEFAULT_CUTOFF)
    }

    pub fn with_cutoff(locale: Locale, cutoff: f64) -> Self {
        Self {
            table: NumberWordTable::for_locale(locale),
            cutoff,
        }
    }

    /// Replace number words with digits, then merge adjacent numerals
    ///
    /// Adjacent numerals are merged by addition, so "двадцать два" split by
    /// the recognizer into two tokens still yields 22. The same rule turns
    /// two unrelated neighbours such as "один два" into 3.
    pub fn parse(&self, text: &str) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut out: Vec<String> = Vec::with_capacity(words.len());
        let mut i = 0;

        while i < words.len() {
            let word = words[i];
            match self.closest(word) {
                Some(entry) if entry.word_count == 1 => {
                    out.push(entry.value.to_string());
                    i += 1;
                }
                Some(entry) if self.spans(&words[i..], entry) => {
                    out.push(entry.value.to_string());
                    i += entry.word_count;
                }
                _ => {
                    out.push(word.to_string());
                    i += 1;
                }
            }
        }

        merge_adjacent_numerals(&out).join(" ")
    }

    /// Closest table entry at or above the cutoff; earlier entries win ties
    ///
    /// Scored by matching characters, 2*M / (len_a + len_b), so dropped and
    /// swapped letters still count as matches.
    fn closest(&self, word: &str) -> Option<&'static NumberWord> {
        let word = word.to_lowercase();
        let mut best: Option<(&'static NumberWord, f64)> = None;

        for entry in self.table.entries() {
            let score = ratio(&word, &entry.words) / 100.0;
            if score < self.cutoff {
                continue;
            }
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((entry, score));
            }
        }

        best.map(|(entry, _)| entry)
    }

    /// Whether the leading tokens spell a compound entry exactly
    fn spans(&self, words: &[&str], entry: &NumberWord) -> bool {
        if words.len() < entry.word_count {
            return false;
        }
        let joined = words[..entry.word_count]
            .iter()
            .map(|w| w.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        joined == entry.words
    }
}

/// Sum each run of adjacent numeral tokens into one token
pub fn merge_adjacent_numerals(tokens: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut run: Option<u64> = None;

    for token in tokens {
        let value = if is_digits(token) {
            token.parse::<u64>().ok()
        } else {
            None
        };
        match (value, run) {
            (Some(v), Some(total)) => run = Some(total.saturating_add(v)),
            (Some(v), None) => run = Some(v),
            (None, _) => {
                if let Some(total) = run.take() {
                    out.push(total.to_string());
                }
                out.push(token.clone());
            }
        }
    }
    if let Some(total) = run {
        out.push(total.to_string());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numbers::verbalizer::verbalizer_for;

    fn parse(text: &str) -> String {
        NumberWordParser::new(Locale::Russian).parse(text)
    }

    #[test]
    fn test_single_words() {
        assert_eq!(parse("сборка номер пять"), "сборка номер 5");
        assert_eq!(parse("задача семнадцать"), "задача 17");
    }

    #[test]
    fn test_compound_via_summation() {
        assert_eq!(
            parse("останови сборку задачи деплой номер сорок два"),
            "останови сборку задачи деплой номер 42"
        );
    }

    #[test]
    fn test_misrecognized_number_word() {
        // one substitution away from "восемь"
        assert_eq!(parse("сборка восемъ"), "сборка 8");
    }

    #[test]
    fn test_dropped_letter() {
        assert_eq!(parse("сборка дв"), "сборка 2");
        assert_eq!(parse("сборка тр"), "сборка 3");
    }

    #[test]
    fn test_swapped_letters() {
        assert_eq!(parse("сборка четрые"), "сборка 4");
    }

    #[test]
    fn test_near_words_below_cutoff() {
        // "сборка" shares four letters with "сорок", not enough
        assert_eq!(parse("сборка"), "сборка");
        assert_eq!(parse("все"), "все");
    }

    #[test]
    fn test_glued_compound_is_kept() {
        // close to "сорок два" but the next token does not complete it
        assert_eq!(parse("номер сорокдва"), "номер сорокдва");
    }

    #[test]
    fn test_non_number_words_untouched() {
        assert_eq!(parse("покажи все задачи"), "покажи все задачи");
        assert_eq!(parse(""), "");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(parse("Три"), "3");
    }

    #[test]
    fn test_adjacent_independent_numerals_are_summed() {
        // two separate digits are merged by addition, not concatenation
        assert_eq!(parse("один два"), "3");
        assert_eq!(parse("сборки 1 2 и 3"), "сборки 3 и 3");
    }

    #[test]
    fn test_verbalized_round_trip() {
        let words = verbalizer_for(Locale::Russian).verbalize(42);
        assert_eq!(words.split(' ').count(), 2);
        assert_eq!(parse(&words), "42");
    }

    #[test]
    fn test_english() {
        let parser = NumberWordParser::new(Locale::English);
        assert_eq!(parser.parse("stop build forty two"), "stop build 42");
    }

    #[test]
    fn test_merge_keeps_non_numerals() {
        let tokens: Vec<String> = ["a", "1", "2", "b", "7"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(merge_adjacent_numerals(&tokens), vec!["a", "3", "b", "7"]);
    }
}
