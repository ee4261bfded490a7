//! Local stub explanation generator.
//!
//! The ultimate fallback: synthesizes a canonical explanation from the
//! input text alone, with no network access. Always succeeds and always
//! satisfies the schema invariant.

use lexipane_protocols::explanation::{
    AltEntry, CanonicalExplanation, Formality, Meaning, VocabEntry,
};

/// Build a deterministic explanation for the given text.
pub fn local_explanation(text: &str) -> CanonicalExplanation {
    let word_count = text.split_whitespace().count();

    CanonicalExplanation {
        meaning: Meaning {
            definition: "This is a local explanation of the selected text. For more \
                detailed explanations, please enable API in the settings."
                .to_string(),
            usage_context: vec![
                "This feature provides basic information about the selected text".to_string(),
                "For more comprehensive analysis, please enable an API in the settings"
                    .to_string(),
            ],
            grammar_structure: vec![
                "Local analysis is limited in scope".to_string(),
                "For detailed grammar analysis, please use API services".to_string(),
            ],
            usage_notes: vec![
                "This is a placeholder explanation".to_string(),
                "Enable API for enhanced features".to_string(),
            ],
        },
        vocabulary: vec![VocabEntry {
            word: "Word Count".to_string(),
            part_of_speech: "Information".to_string(),
            definition: format!("The text contains {word_count} words"),
            usage_example: "Used for basic text analysis".to_string(),
            synonyms: "Word length, text size".to_string(),
        }],
        alternatives: vec![AltEntry {
            phrase: "Enhanced Explanation Available".to_string(),
            description: "More detailed analysis available with API enabled".to_string(),
            formality: Formality::Informational,
            example: "For alternative expressions and detailed analysis, please enable \
                an API in the extension settings"
                .to_string(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_satisfies_schema_invariant() {
        let explanation = local_explanation("I couldn't care less");
        assert!(explanation.validate().is_ok());
    }

    #[test]
    fn test_stub_reports_word_count() {
        let explanation = local_explanation("one two three four");
        assert_eq!(
            explanation.vocabulary[0].definition,
            "The text contains 4 words"
        );
    }

    #[test]
    fn test_stub_is_deterministic() {
        assert_eq!(local_explanation("same text"), local_explanation("same text"));
    }

    #[test]
    fn test_stub_handles_extra_whitespace() {
        let explanation = local_explanation("  spaced   out  ");
        assert_eq!(
            explanation.vocabulary[0].definition,
            "The text contains 2 words"
        );
    }
}
