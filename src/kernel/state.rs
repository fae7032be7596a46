use compact_str::CompactString;

use super::diagnostics::DiagnosticsState;
use super::invoke::InvokeState;
use super::suggest::SuggestionsState;
use super::workspace::Workspace;

/// Everything the session shows: the known remote file list, the open tabs,
/// and the three result areas fed by asynchronous replies.
#[derive(Debug, Default)]
pub struct SessionState {
    pub files: Vec<CompactString>,
    pub workspace: Workspace,
    pub diagnostics: Option<DiagnosticsState>,
    pub suggestions: SuggestionsState,
    pub invoke: InvokeState,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}
