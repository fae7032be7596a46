//! Contracts for the best-effort and one-shot assistance collaborators:
//! autocomplete, compile, and code generation/review.

use serde::{Deserialize, Serialize};

use super::runtime::PortFuture;
use crate::kernel::language::Language;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestRequest {
    pub content: String,
    /// Character offset of the cursor, not row/column.
    pub offset: usize,
    pub language: Language,
}

/// Autocomplete failure. Best-effort: never surfaced past a log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestError(pub String);

impl std::fmt::Display for SuggestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Autocomplete failed: {}", self.0)
    }
}

impl std::error::Error for SuggestError {}

/// Compile/generate/debug failure. `message` is the collaborator's reported
/// error when it provided one; callers render a generic literal otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionError {
    pub message: Option<String>,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    pub fn unspecified() -> Self {
        Self { message: None }
    }
}

impl std::fmt::Display for ActionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{}", msg),
            None => write!(f, "action failed"),
        }
    }
}

impl std::error::Error for ActionError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    pub code: String,
    /// Accompanying unit tests / explanatory text, when the generator
    /// produced any.
    pub tests: Option<String>,
}

pub trait SuggestionEngine: Send + Sync {
    fn complete(&self, request: SuggestRequest) -> PortFuture<Result<Vec<String>, SuggestError>>;
}

pub trait Compiler: Send + Sync {
    /// Runs/compiles `content`; resolves to the program or compiler output.
    fn compile(&self, content: &str, language: Language) -> PortFuture<Result<String, ActionError>>;
}

pub trait CodeGenerator: Send + Sync {
    /// Generates code for a task description in the given language.
    fn generate(
        &self,
        task: &str,
        language: Language,
    ) -> PortFuture<Result<GeneratedCode, ActionError>>;

    /// Reviews `content` for bugs; resolves to actionable suggestions text.
    fn debug(&self, content: &str, language: Language) -> PortFuture<Result<String, ActionError>>;
}
