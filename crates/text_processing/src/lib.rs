//! Text processing for the voice CI control surface
//!
//! This crate provides the locale-aware text machinery between speech and
//! the CI server:
//! - **Normalization**: display text to speech-safe text (numbers as words,
//!   Latin names transliterated)
//! - **Number words**: recognized speech number words back to numerals
//! - **Name resolution**: two-tier fuzzy matching of spoken job and parameter
//!   names against live names
//!
//! # Example
//!
//! ```
//! use voice_ci_core::Locale;
//! use voice_ci_text_processing::{NameResolver, ResolverConfig, TextNormalizer};
//!
//! let normalizer = TextNormalizer::new(Locale::Russian);
//! assert_eq!(normalizer.normalize("Сборка 42"), "Сборка сорок два");
//!
//! let resolver = NameResolver::new(normalizer, ResolverConfig::default());
//! let hit = resolver.resolve("деплой", &["backend", "deploy"]).unwrap();
//! assert_eq!(hit.name, "deploy");
//! ```

pub mod fuzzy;
pub mod normalizer;
pub mod numbers;
pub mod transliteration;

pub use fuzzy::{MatchTier, NameResolver, Resolution, ResolverConfig};
pub use normalizer::TextNormalizer;
pub use numbers::{NumberVerbalizer, NumberWordParser, NumberWordTable};
pub use transliteration::Transliterator;
