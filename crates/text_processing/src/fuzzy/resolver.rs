//! Two-tier name resolution
//!
//! Spoken job and parameter names arrive misheard and, usually, in the wrong
//! script. Resolution first scores the query against the live names as they
//! are; if nothing clears the direct threshold, every name is transliterated
//! into the speech locale and scored again with a lower threshold. A hit in
//! the second tier is mapped back to the original name by position.

use serde::{Deserialize, Serialize};

use super::scorer::weighted_ratio;
use crate::normalizer::TextNormalizer;

/// Which tier produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Direct,
    Transliterated,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Direct => "direct",
            MatchTier::Transliterated => "transliterated",
        }
    }
}

/// A resolved candidate in its original form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub name: String,
    /// Position in the candidate list
    pub index: usize,
    pub tier: MatchTier,
}

/// Acceptance thresholds, 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub direct_threshold: u8,
    pub transliterated_threshold: u8,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            direct_threshold: 70,
            transliterated_threshold: 60,
        }
    }
}

/// Fuzzy resolver for job and parameter names
#[derive(Debug, Clone, Copy)]
pub struct NameResolver {
    normalizer: TextNormalizer,
    config: ResolverConfig,
}

impl NameResolver {
    pub fn new(normalizer: TextNormalizer, config: ResolverConfig) -> Self {
        Self { normalizer, config }
    }

    pub fn config(&self) -> ResolverConfig {
        self.config
    }

    /// Resolve `query` against `candidates`
    ///
    /// When several candidates share the top score the earliest one wins.
    pub fn resolve<S: AsRef<str>>(&self, query: &str, candidates: &[S]) -> Option<Resolution> {
        if let Some((index, score)) =
            best_match(query, candidates.iter().map(AsRef::as_ref), self.config.direct_threshold)
        {
            tracing::debug!(query, index, score, tier = "direct", "Resolved name");
            return Some(Resolution {
                name: candidates[index].as_ref().to_string(),
                index,
                tier: MatchTier::Direct,
            });
        }

        // same length and order as `candidates`
        let transliterated: Vec<String> = candidates
            .iter()
            .map(|c| self.normalizer.normalize(c.as_ref()))
            .collect();

        let (index, score) = best_match(
            query,
            transliterated.iter().map(String::as_str),
            self.config.transliterated_threshold,
        )?;
        let original = candidates.get(index)?;

        tracing::debug!(
            query,
            index,
            score,
            transliterated = %transliterated[index],
            tier = "transliterated",
            "Resolved name"
        );

        Some(Resolution {
            name: original.as_ref().to_string(),
            index,
            tier: MatchTier::Transliterated,
        })
    }
}

/// Highest scoring choice at or above `cutoff`, first one on ties
fn best_match<'a>(
    query: &str,
    choices: impl Iterator<Item = &'a str>,
    cutoff: u8,
) -> Option<(usize, u8)> {
    let mut best: Option<(usize, u8)> = None;
    for (index, choice) in choices.enumerate() {
        let score = weighted_ratio(query, choice);
        if score >= cutoff && best.map_or(true, |(_, s)| score > s) {
            best = Some((index, score));
        }
    }
    best
}
