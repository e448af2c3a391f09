//! Text normalization shared by the matcher and its pack terms
//!
//! Both sides of a comparison go through [`normalize`], so a synonym like
//! `"Hashimoto's"` and a query containing `hashimotos` meet in the middle.

/// Lowercase, trim, drop punctuation other than `- / ( )`, collapse
/// whitespace runs to single spaces.
///
/// Only ASCII word characters survive, so accented letters are dropped
/// rather than folded.
pub fn normalize(s: &str) -> String {
    let lowered = s.to_lowercase();
    let kept: String = lowered.trim().chars().filter(|&c| is_kept(c)).collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[inline]
fn is_kept(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() || matches!(c, '-' | '/' | '(' | ')')
}

/// Distinct tokens of an already-normalized string, first-seen order
pub fn tokens_of(normalized: &str) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for tok in normalized.split(' ').filter(|t| !t.is_empty()) {
        if !out.contains(&tok) {
            out.push(tok);
        }
    }
    out
}

/// Normalize then tokenize
pub fn tokenize(s: &str) -> Vec<String> {
    tokens_of(&normalize(s))
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("  Hashimoto's, maybe?  "), "hashimotos maybe");
        assert_eq!(normalize("Kidney disease (CKD) / reduced"), "kidney disease (ckd) / reduced");
        assert_eq!(normalize("post-op\t\tpain"), "post-op pain");
        assert_eq!(normalize("65+ years"), "65 years");
    }

    #[test]
    fn test_normalize_empty_and_whitespace() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n "), "");
        assert_eq!(normalize("?!"), "");
    }

    #[test]
    fn test_non_ascii_letters_dropped() {
        assert_eq!(normalize("Sjögren"), "sjgren");
    }

    #[test]
    fn test_tokenize_dedupes_in_order() {
        assert_eq!(tokenize("low EGFR, low energy"), vec!["low", "egfr", "energy"]);
        assert!(tokenize("  ").is_empty());
    }
}
