//! Prompt template.
//!
//! One fixed template across every provider so the normalizer can stay
//! uniform: the reply must be a strict JSON object with `meaning`,
//! `vocabulary` and `alternatives` keys.

/// System message sent with every chat-completion request.
pub const SYSTEM_INSTRUCTION: &str = "You are a professional English language assistant \
specializing in analyzing English text and providing detailed, structured explanations. \
Your responses should be clear, accurate, well-formatted, and easy to understand. \
Always respond in English.";

/// Build the user prompt for a piece of source text, embedded verbatim.
pub fn build_prompt(text: &str) -> String {
    format!(
        r#"Please analyze the following English text and return your analysis in a strict JSON format:

"{text}"

Your response MUST be a valid JSON object with the following structure:

{{
  "meaning": {{
    "definition": "Clear explanation of the core meaning",
    "usageContext": [
      "List of contexts where this text would be used",
      "Target audience and situations",
      "Communication style and register"
    ],
    "grammarStructure": [
      "Key grammatical features",
      "Sentence structure analysis",
      "Tense and mood usage"
    ],
    "usageNotes": [
      "Important usage notes",
      "Common mistakes to avoid",
      "Style and register considerations"
    ]
  }},
  "vocabulary": [
    {{
      "word": "Key word or phrase",
      "type": "Part of speech",
      "definition": "Clear definition",
      "usage": "Example usage",
      "synonyms": "Related words or phrases"
    }}
  ],
  "alternatives": [
    {{
      "phrase": "Alternative expression",
      "description": "How this alternative differs",
      "formality": "Formal/Informal/Neutral",
      "example": "Example usage"
    }}
  ]
}}

IMPORTANT:
1. Ensure the response is STRICTLY in this JSON format
2. Do not include any text outside the JSON structure
3. All string values should be properly escaped
4. Arrays should contain at least 2-3 items each
5. The vocabulary section should analyze 3-5 key terms
6. The alternatives section should provide 3-5 different expressions"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_text_verbatim() {
        let prompt = build_prompt("I couldn't care less");
        assert!(prompt.contains("\"I couldn't care less\""));
    }

    #[test]
    fn test_prompt_names_required_keys() {
        let prompt = build_prompt("x");
        assert!(prompt.contains("\"meaning\""));
        assert!(prompt.contains("\"vocabulary\""));
        assert!(prompt.contains("\"alternatives\""));
        assert!(prompt.contains("STRICTLY"));
    }

    #[test]
    fn test_system_instruction_is_english_only() {
        assert!(SYSTEM_INSTRUCTION.contains("English language assistant"));
        assert!(SYSTEM_INSTRUCTION.contains("respond in English"));
    }
}
