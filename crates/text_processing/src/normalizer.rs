//! Speech normalization for TTS
//!
//! Rewrites display text so that a speech synthesizer for the locale can read
//! it: numbers become words, Latin names are transliterated, and punctuation
//! that glues tokens together is split off.

use once_cell::sync::Lazy;
use regex::Regex;
use voice_ci_core::Locale;

use crate::numbers::verbalizer::{is_digits, verbalizer_for, NumberVerbalizer};
use crate::transliteration::Transliterator;

/// Text normalizer for a single locale
#[derive(Clone, Copy)]
pub struct TextNormalizer {
    locale: Locale,
    transliterator: &'static Transliterator,
    verbalizer: &'static dyn NumberVerbalizer,
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer")
            .field("locale", &self.locale)
            .finish()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl TextNormalizer {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            transliterator: Transliterator::for_locale(locale),
            verbalizer: verbalizer_for(locale),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn verbalizer(&self) -> &'static dyn NumberVerbalizer {
        self.verbalizer
    }

    /// Normalize text for speech synthesis
    pub fn normalize(&self, text: &str) -> String {
        let padded = pad_punctuation(text);
        padded
            .split_whitespace()
            .map(|token| self.normalize_token(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Transliterate a single name without touching its digits
    pub fn transliterate(&self, word: &str) -> String {
        self.transliterator.transliterate(word)
    }

    fn normalize_token(&self, token: &str) -> String {
        if is_version(token) {
            let point = format!(" {} ", self.verbalizer.point_word());
            token
                .split('.')
                .map(|part| self.verbalizer.verbalize_digits(part))
                .collect::<Vec<_>>()
                .join(&point)
        } else if is_digits(token) {
            self.verbalizer.verbalize_digits(token)
        } else {
            self.transliterator.transliterate(token)
        }
    }
}

/// Dot-separated digit groups such as `2.401.3`
static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+(?:\.[0-9]+)+$").unwrap()
});

fn is_version(token: &str) -> bool {
    VERSION_PATTERN.is_match(token)
}

/// Drop apostrophes and surround `.`, `:`, `,` and `/` with spaces
///
/// A dot between two digits stays attached so versions remain one token.
fn pad_punctuation(text: &str) -> String {
    let chars: Vec<char> = text.chars().filter(|c| !matches!(c, '\'' | '’')).collect();
    let mut out = String::with_capacity(text.len() + 16);

    for (i, &c) in chars.iter().enumerate() {
        let pad = match c {
            ':' | ',' | '/' => true,
            '.' => {
                let digit_before = i > 0 && chars[i - 1].is_ascii_digit();
                let digit_after = chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
                !(digit_before && digit_after)
            }
            _ => false,
        };
        if pad {
            out.push(' ');
            out.push(c);
            out.push(' ');
        } else {
            out.push(c);
        }
    }

    out
}
