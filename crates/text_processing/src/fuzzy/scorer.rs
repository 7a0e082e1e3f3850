//! Token-aware fuzzy similarity, scored 0-100
//!
//! A weighted ratio over processed strings: plain similarity, token-sort and
//! token-set similarity, and best-window partial similarity when the lengths
//! differ a lot. Tolerates reordered words, extra words and small spelling
//! errors, which is what misheard job names look like.

/// Length ratio from which partial (windowed) scores are considered
const PARTIAL_LENGTH_RATIO: f64 = 1.5;
/// Length ratio above which partial scores are discounted further
const LONG_PARTIAL_LENGTH_RATIO: f64 = 8.0;
const TOKEN_SCALE: f64 = 0.95;
const PARTIAL_SCALE: f64 = 0.9;
const LONG_PARTIAL_SCALE: f64 = 0.6;

/// Lowercase, replace non-alphanumerics with spaces, trim
pub fn process(s: &str) -> String {
    let mapped: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    mapped.trim().to_lowercase()
}

/// Weighted similarity of two raw strings
pub fn weighted_ratio(a: &str, b: &str) -> u8 {
    let p1 = process(a);
    let p2 = process(b);
    if p1.is_empty() || p2.is_empty() {
        return 0;
    }

    let len1 = p1.chars().count() as f64;
    let len2 = p2.chars().count() as f64;
    let len_ratio = len1.max(len2) / len1.min(len2);

    let base = ratio(&p1, &p2);

    let best = if len_ratio < PARTIAL_LENGTH_RATIO {
        let sorted = token_sort_ratio(&p1, &p2) * TOKEN_SCALE;
        let set = token_set_ratio(&p1, &p2) * TOKEN_SCALE;
        base.max(sorted).max(set)
    } else {
        let scale = if len_ratio > LONG_PARTIAL_LENGTH_RATIO {
            LONG_PARTIAL_SCALE
        } else {
            PARTIAL_SCALE
        };
        let partial = partial_ratio(&p1, &p2) * scale;
        let sorted = partial_token_sort_ratio(&p1, &p2) * TOKEN_SCALE * scale;
        let set = partial_token_set_ratio(&p1, &p2) * TOKEN_SCALE * scale;
        base.max(partial).max(sorted).max(set)
    };

    best.round().clamp(0.0, 100.0) as u8
}

/// Indel similarity: 2 * LCS / (len_a + len_b), scaled to 0-100
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Longest common subsequence length, two-row DP
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Best ratio of the shorter string against every equal-length window of the longer
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }

    let mut best: f64 = 0.0;
    for window in long.windows(short.len()) {
        best = best.max(ratio_chars(&short, window));
        if best >= 100.0 {
            break;
        }
    }
    best
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn partial_token_sort_ratio(a: &str, b: &str) -> f64 {
    partial_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Compare the shared tokens against each side's full token set
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    token_set_with(a, b, ratio)
}

fn partial_token_set_ratio(a: &str, b: &str) -> f64 {
    token_set_with(a, b, partial_ratio)
}

fn token_set_with(a: &str, b: &str, scorer: fn(&str, &str) -> f64) -> f64 {
    use std::collections::BTreeSet;

    let ta: BTreeSet<&str> = a.split_whitespace().collect();
    let tb: BTreeSet<&str> = b.split_whitespace().collect();

    let intersection = ta.intersection(&tb).copied().collect::<Vec<_>>().join(" ");
    let diff_ab = ta.difference(&tb).copied().collect::<Vec<_>>().join(" ");
    let diff_ba = tb.difference(&ta).copied().collect::<Vec<_>>().join(" ");

    let combined_ab = join_nonempty(&intersection, &diff_ab);
    let combined_ba = join_nonempty(&intersection, &diff_ba);

    scorer(&intersection, &combined_ab)
        .max(scorer(&intersection, &combined_ba))
        .max(scorer(&combined_ab, &combined_ba))
}

fn join_nonempty(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, _) => b.to_string(),
        (_, true) => a.to_string(),
        _ => format!("{} {}", a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process() {
        assert_eq!(process("  Deploy-Prod_v2! "), "deploy prod v2");
        assert_eq!(process("!!!"), "");
    }

    #[test]
    fn test_identical() {
        assert_eq!(weighted_ratio("deploy", "deploy"), 100);
        assert_eq!(weighted_ratio("Deploy", "deploy"), 100);
        assert_eq!(weighted_ratio("сборка", "сборка"), 100);
    }

    #[test]
    fn test_empty_scores_zero() {
        assert_eq!(weighted_ratio("", "deploy"), 0);
        assert_eq!(weighted_ratio("---", "deploy"), 0);
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio("abcd", "abcd"), 100.0);
        assert_eq!(ratio("abcd", "wxyz"), 0.0);
        assert_eq!(ratio("ab", "abcd").round(), 67.0);
    }

    #[test]
    fn test_word_order_ignored() {
        assert!(weighted_ratio("prod deploy", "deploy prod") >= 95);
    }

    #[test]
    fn test_partial_match() {
        assert_eq!(partial_ratio("deploy", "nightly deploy job"), 100.0);
        assert!(weighted_ratio("deploy", "nightly-deploy-job") >= 85);
    }

    #[test]
    fn test_unrelated_low() {
        assert!(weighted_ratio("backend", "тест") < 30);
        assert!(weighted_ratio("deploy", "unit tests") < 50);
    }
}
