//! Lexicon membership testing over analyzer output.

use crate::lexicon::Lexicon;

/// Tokens and phrases of one document found in one lexicon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermMatches {
    pub tokens: Vec<String>,
    pub phrases: Vec<String>,
}

impl TermMatches {
    /// Number of matched terms, tokens and phrases together.
    pub fn count(&self) -> usize {
        self.tokens.len() + self.phrases.len()
    }
}

/// Intersect tokens and phrases with a lexicon.
///
/// Repeated tokens count every time they occur. A phrase is kept only if it
/// is not already among the matched tokens.
pub fn match_terms(tokens: &[String], phrases: &[String], lexicon: &Lexicon) -> TermMatches {
    let matched_tokens: Vec<String> = tokens
        .iter()
        .filter(|t| lexicon.contains(t))
        .cloned()
        .collect();

    let matched_phrases = phrases
        .iter()
        .filter(|p| lexicon.contains(p) && !matched_tokens.contains(p))
        .cloned()
        .collect();

    TermMatches {
        tokens: matched_tokens,
        phrases: matched_phrases,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_duplicate_tokens_count_twice() {
        let lexicon: Lexicon = ["희망"].into_iter().collect();
        let matches = match_terms(&strings(&["희망", "있다", "희망"]), &[], &lexicon);
        assert_eq!(matches.tokens, strings(&["희망", "희망"]));
        assert_eq!(matches.count(), 2);
    }

    #[test]
    fn test_phrase_already_matched_as_token_is_dropped() {
        let lexicon: Lexicon = ["분노", "국민 분노"].into_iter().collect();
        let matches = match_terms(
            &strings(&["국민", "분노"]),
            &strings(&["분노", "국민 분노"]),
            &lexicon,
        );
        assert_eq!(matches.tokens, strings(&["분노"]));
        assert_eq!(matches.phrases, strings(&["국민 분노"]));
    }

    #[test]
    fn test_empty_inputs() {
        let lexicon: Lexicon = ["a"].into_iter().collect();
        assert_eq!(match_terms(&[], &[], &lexicon), TermMatches::default());
        assert_eq!(
            match_terms(&strings(&["a"]), &strings(&["a b"]), &Lexicon::new()),
            TermMatches::default()
        );
    }

    proptest! {
        #[test]
        fn prop_matches_are_subsets(
            tokens in prop::collection::vec("[a-d]{1,2}", 0..20),
            phrases in prop::collection::vec("[a-d]{1,2}( [a-d]{1,2})?", 0..20),
            terms in prop::collection::vec("[a-d]{1,2}( [a-d]{1,2})?", 0..10),
        ) {
            let lexicon: Lexicon = terms.iter().cloned().collect();
            let matches = match_terms(&tokens, &phrases, &lexicon);

            for t in &matches.tokens {
                prop_assert!(tokens.contains(t));
                prop_assert!(lexicon.contains(t));
            }
            for p in &matches.phrases {
                prop_assert!(phrases.contains(p));
                prop_assert!(!matches.tokens.contains(p));
            }
        }
    }
}
