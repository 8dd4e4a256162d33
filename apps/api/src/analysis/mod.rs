// Compatibility analysis engine.
// Vocabulary → extractors → similarity → breakdown → skills table → gaps,
// recommendations and motivation. All pure, in-memory, synchronous.

pub mod breakdown;
pub mod engine;
pub mod extract;
pub mod gaps;
pub mod handlers;
pub mod motivation;
pub mod similarity;
pub mod skills_table;
pub mod vocabulary;

/// Rounds to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The first `max_chars` characters of `text` (not bytes).
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(2.5), 2.5);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_truncate_chars_respects_multibyte() {
        assert_eq!(truncate_chars("привет", 3), "при");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 5), "");
    }
}
