use super::language::Language;

/// Diagnostics for the content/language pair that most recently produced
/// them. Superseded wholesale by newer checks, never merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsState {
    pub for_content: String,
    pub for_language: Language,
    pub entries: Vec<String>,
}

impl DiagnosticsState {
    /// True if these diagnostics still describe the given pair.
    pub fn describes(&self, content: &str, language: Language) -> bool {
        self.for_content == content && self.for_language == language
    }
}
