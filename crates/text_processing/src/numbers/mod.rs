//! Numbers in both directions
//!
//! - `verbalizer`: numerals to words for speech synthesis
//! - `word_table`: the fixed 0-99 verbal number table
//! - `parser`: words back to numerals for recognized speech

pub mod parser;
pub mod verbalizer;
pub mod word_table;

pub use parser::{merge_adjacent_numerals, NumberWordParser};
pub use verbalizer::{verbalizer_for, EnglishVerbalizer, NumberVerbalizer, RussianVerbalizer};
pub use word_table::{NumberWord, NumberWordTable};
