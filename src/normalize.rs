//! Text folding and keyword containment helpers.
//!
//! All keyword matching in the crate goes through `fold` (NFKC + lowercase)
//! so that full-width characters, odd casing and stray whitespace in PDS
//! payloads do not defeat the lookup tables.

use unicode_normalization::UnicodeNormalization;

/// NFKC-normalize and lowercase. The canonical form for all keyword lookups.
pub fn fold(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// Splits folded text into alphanumeric tokens.
pub fn tokens(text: &str) -> Vec<String> {
    fold(text)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Keyword hit test. Multi-word keywords and keywords of 4+ characters match
/// by substring; shorter keywords ("bs", "ab", "ra") match only as whole
/// tokens so they cannot fire inside unrelated words.
pub fn keyword_hit(haystack: &str, keyword: &str) -> bool {
    let needle = fold(keyword);
    if needle.is_empty() {
        return false;
    }
    if needle.contains(' ') || needle.len() >= 4 {
        fold(haystack).contains(&needle)
    } else {
        tokens(haystack).iter().any(|t| t == &needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_flattens_width_and_case() {
        assert_eq!(fold("Ｍａｓｔｅｒ of ARTS"), "master of arts");
    }

    #[test]
    fn short_keywords_match_whole_tokens_only() {
        assert!(keyword_hit("BS Accountancy", "bs"));
        assert!(!keyword_hit("several jobs held", "bs"));
    }

    #[test]
    fn long_keywords_match_by_substring() {
        assert!(keyword_hit("Master's degree required", "master"));
        assert!(keyword_hit("post-doctorate studies", "doctorate"));
    }

    #[test]
    fn tokens_split_on_punctuation() {
        assert_eq!(tokens("B.S. Accountancy"), vec!["b", "s", "accountancy"]);
    }
}
