//! Fuzzy matching of spoken names against live CI names

pub mod resolver;
pub mod scorer;

pub use resolver::{MatchTier, NameResolver, Resolution, ResolverConfig};
pub use scorer::weighted_ratio;
