//! Canonical explanation record.
//!
//! Every explanation, whether it came from a provider endpoint or the local
//! stub generator, is normalized into this shape before rendering. The
//! record is immutable once built; the render layer may clone it to prefix
//! an error banner onto the meaning section.

use serde::{Deserialize, Serialize};

/// Upper bound on vocabulary and alternative entries accepted from a provider.
pub const MAX_SECTION_ENTRIES: usize = 5;

/// The normalized, schema-validated explanation consumed by rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalExplanation {
    pub meaning: Meaning,
    pub vocabulary: Vec<VocabEntry>,
    pub alternatives: Vec<AltEntry>,
}

/// Meaning & usage section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub definition: String,
    pub usage_context: Vec<String>,
    pub grammar_structure: Vec<String>,
    pub usage_notes: Vec<String>,
}

/// One key-vocabulary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub word: String,
    #[serde(rename = "type")]
    pub part_of_speech: String,
    pub definition: String,
    #[serde(rename = "usage")]
    pub usage_example: String,
    pub synonyms: String,
}

/// One alternative-expression entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltEntry {
    pub phrase: String,
    pub description: String,
    pub formality: Formality,
    pub example: String,
}

/// Register of an alternative expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Formality {
    Formal,
    Informal,
    Neutral,
    Informational,
}

impl CanonicalExplanation {
    /// Check the schema invariant: all three sections present and non-empty,
    /// with vocabulary and alternatives holding between 1 and
    /// [`MAX_SECTION_ENTRIES`] entries.
    ///
    /// A violated invariant is a malformed response, never a partial render.
    pub fn validate(&self) -> Result<(), String> {
        if self.meaning.definition.trim().is_empty() {
            return Err("meaning.definition is empty".to_string());
        }
        if self.meaning.usage_context.is_empty() {
            return Err("meaning.usageContext is empty".to_string());
        }
        if self.meaning.grammar_structure.is_empty() {
            return Err("meaning.grammarStructure is empty".to_string());
        }
        if self.meaning.usage_notes.is_empty() {
            return Err("meaning.usageNotes is empty".to_string());
        }
        Self::check_section("vocabulary", self.vocabulary.len())?;
        Self::check_section("alternatives", self.alternatives.len())?;
        Ok(())
    }

    fn check_section(name: &str, len: usize) -> Result<(), String> {
        if len == 0 {
            return Err(format!("{name} is empty"));
        }
        if len > MAX_SECTION_ENTRIES {
            return Err(format!(
                "{name} holds {len} entries, at most {MAX_SECTION_ENTRIES} allowed"
            ));
        }
        Ok(())
    }

    /// Clone for display augmentation, prefixing a banner line onto the
    /// meaning definition.
    pub fn with_meaning_banner(&self, banner: &str) -> Self {
        let mut augmented = self.clone();
        augmented.meaning.definition = format!("{banner}\n\n{}", self.meaning.definition);
        augmented
    }
}

#[cfg(test)]
#[path = "explanation_tests.rs"]
mod tests;
