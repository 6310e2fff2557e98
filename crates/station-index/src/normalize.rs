//! Shared name normalization for index build and query.
//!
//! Build and query must normalize identically or the index invariant breaks,
//! so this is the only place in the workspace that defines it.

/// Separators collapsed during normalization. Covers the dash and quote
/// variants the feed actually emits in compound area names.
fn is_separator(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '-' | '\u{2013}' | '\u{2014}' | ',' | '.' | '\'' | '"' | '(' | ')' | '/'
        )
}

/// Normalize an area or station name for matching: lowercase, trim, and
/// collapse every run of whitespace/punctuation into a single space.
pub fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_space = false;
    for c in name.chars() {
        if is_separator(c) {
            if !out.is_empty() {
                pending_space = true;
            }
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Split a normalized name into tokens eligible for whole-word matching.
///
/// Tokens of one or two characters are dropped: short fragments ("of",
/// single Hebrew particles) match far too many unrelated names.
pub fn match_tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized
        .split(' ')
        .filter(|token| token.chars().count() > 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_trim() {
        assert_eq!(normalize("  Ashdod  "), "ashdod");
        assert_eq!(normalize("ASHKELON"), "ashkelon");
    }

    #[test]
    fn test_collapses_punctuation_runs() {
        assert_eq!(normalize("North City - District 2"), "north city district 2");
        assert_eq!(normalize("Haifa -- Bay,  West"), "haifa bay west");
        assert_eq!(normalize("Yavne (Industrial)"), "yavne industrial");
    }

    #[test]
    fn test_em_and_en_dashes() {
        assert_eq!(
            normalize("Tel Aviv \u{2013} East"),
            normalize("Tel Aviv - East")
        );
        assert_eq!(
            normalize("Tel Aviv \u{2014} East"),
            normalize("Tel Aviv - East")
        );
    }

    #[test]
    fn test_hebrew_passthrough() {
        // Hebrew has no case; separators still collapse
        assert_eq!(normalize("תל אביב - מזרח"), "תל אביב מזרח");
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" --- "), "");
    }

    #[test]
    fn test_match_tokens_drop_short() {
        let tokens: Vec<&str> = match_tokens("ramat gan of 12").collect();
        // "of" and "12" are filtered, "gan" stays (3 chars)
        assert_eq!(tokens, vec!["ramat", "gan"]);
    }

    #[test]
    fn test_match_tokens_hebrew_length_in_chars() {
        // "תל" is two characters, many bytes; must still be dropped
        let tokens: Vec<&str> = match_tokens("תל אביב").collect();
        assert_eq!(tokens, vec!["אביב"]);
    }
}
