//! Fuzzy identity matching for party names across documents.
//!
//! Two names refer to the same entity when one normalized form contains the
//! other, or when their token-set overlap (Jaccard) clears the configured
//! threshold. Token comparison treats a 2-character-or-longer prefix as
//! equivalent to its expansion, so truncation-style abbreviations
//! ("Co." / "Company", "Corp" / "Corporation", "Int" / "International")
//! count as the same token.

use crate::patterns::collapse_whitespace;

/// Normalize a name for identity comparison: case-fold, strip punctuation,
/// collapse whitespace.
pub fn fold_identity(raw: &str) -> String {
    let folded: String = raw
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    collapse_whitespace(&folded)
}

fn tokens_equivalent(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    short.chars().count() >= 2 && long.starts_with(short)
}

fn unique_tokens(folded: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = Vec::new();
    for token in folded.split_whitespace() {
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens
}

/// Token-set overlap ratio |intersection| / |union| over word tokens of two
/// already-folded strings, with abbreviation-aware token equivalence.
/// Returns 0.0 when either side has no tokens.
pub fn token_overlap(folded_a: &str, folded_b: &str) -> f64 {
    let a_tokens = unique_tokens(folded_a);
    let b_tokens = unique_tokens(folded_b);

    if a_tokens.is_empty() || b_tokens.is_empty() {
        return 0.0;
    }

    let mut b_matched = vec![false; b_tokens.len()];
    let mut intersection = 0usize;

    for a_token in a_tokens.iter().copied() {
        for (i, b_token) in b_tokens.iter().copied().enumerate() {
            if !b_matched[i] && tokens_equivalent(a_token, b_token) {
                b_matched[i] = true;
                intersection += 1;
                break;
            }
        }
    }

    let union = a_tokens.len() + b_tokens.len() - intersection;
    intersection as f64 / union as f64
}

/// Decide whether two raw names identify the same party: pass when one
/// normalized form contains the other, or token overlap >= `threshold`.
pub fn identity_match(raw_a: &str, raw_b: &str, threshold: f64) -> bool {
    let a = fold_identity(raw_a);
    let b = fold_identity(raw_b);

    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a.contains(&b) || b.contains(&a) {
        return true;
    }
    token_overlap(&a, &b) >= threshold
}
