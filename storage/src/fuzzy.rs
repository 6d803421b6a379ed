//! Token-order-insensitive similarity used for "did you mean" suggestions.

use rapidfuzz::distance::indel;

/// Lower-cases, turns every non-alphanumeric character into a space, sorts the tokens and joins
/// them with single spaces.
fn sorted_tokens(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .flat_map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().collect::<Vec<_>>()
            } else {
                vec![' ']
            }
        })
        .collect();
    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Similarity of `a` and `b` in `0..=100`, ignoring token order and case.
///
/// Indel ratio `2·M / (|a| + |b|)` over the sorted tokens, `M` being the number of matching
/// characters, rounded to the nearest integer. Empty input scores 0.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    let a = sorted_tokens(a);
    let b = sorted_tokens(b);
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    (indel::normalized_similarity(a.chars(), b.chars()) * 100.0).round() as u8
}

/// Highest-scoring candidate and its score. On equal scores the earliest candidate wins.
pub fn best_match<'a, I>(query: &str, candidates: I) -> Option<(&'a str, u8)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, u8)> = None;
    for candidate in candidates {
        let score = token_sort_ratio(query, candidate);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((candidate, score));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_sort_ratio_ignores_order_and_case() {
        assert_eq!(token_sort_ratio("new york", "York New"), 100);
        assert_eq!(token_sort_ratio("faq", "faq"), 100);
    }

    #[test]
    fn test_token_sort_ratio_typos() {
        assert_eq!(token_sort_ratio("fo", "foo"), 80);
        assert_eq!(token_sort_ratio("fqa", "faq"), 67);
        assert_eq!(token_sort_ratio("rulez", "rules"), 80);
        assert_eq!(token_sort_ratio("rules", "xyz"), 0);
    }

    #[test]
    fn test_token_sort_ratio_short_keys() {
        assert_eq!(token_sort_ratio("bot", "robot"), 75);
        assert_eq!(token_sort_ratio("a", "ab"), 67);
        assert_eq!(token_sort_ratio("ab", "ax"), 50);
    }

    #[test]
    fn test_token_sort_ratio_empty() {
        assert_eq!(token_sort_ratio("", "faq"), 0);
        assert_eq!(token_sort_ratio("--", "faq"), 0);
    }

    #[test]
    fn test_best_match_first_wins_on_tie() {
        let best = best_match("ab", ["ax", "ay", "zz"]).unwrap();
        assert_eq!(best, ("ax", 50));
        assert_eq!(best_match("ab", Vec::<&str>::new()), None);
    }
}
