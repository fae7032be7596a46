use compact_str::CompactString;

use super::diagnostics::DiagnosticsState;
use super::language::Language;
use super::services::ports::{
    ActionError, CheckOutcome, CheckReply, FetchError, GeneratedCode, PersistError, SuggestError,
};
use super::workspace::Tab;
use super::{Action, Effect, SessionState};

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

/// Owns the session state and applies every action to it, synchronously and
/// in event order. Replies are validated against *current* state here: a
/// reply whose tag no longer matches what the user is looking at is dropped,
/// never merged.
pub struct Store {
    state: SessionState,
}

impl Store {
    pub fn new(state: SessionState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::RefreshFiles => DispatchResult {
                effects: vec![Effect::ListFiles],
                state_changed: false,
            },
            Action::OpenFile { filename } => self.open_file(filename),
            Action::CloseTab { filename } => self.close_tab(&filename),
            Action::SetActiveTab { filename } => self.activate_tab(&filename),
            Action::EditActiveContent { content } => self.edit_active_content(&content),
            Action::SetActiveLanguage { language } => self.set_active_language(language),
            Action::CreateFile { filename } => self.create_file(filename),
            Action::DeleteFile { filename } => DispatchResult {
                effects: vec![Effect::DeleteFile { filename }],
                state_changed: false,
            },
            Action::Save => self.save(),
            Action::CursorMoved { offset } => self.cursor_moved(offset),
            Action::Compile => self.compile(),
            Action::GenerateCode { task } => self.generate_code(task),
            Action::DebugCode => self.debug_code(),
            Action::CheckDebounceElapsed => self.check_debounce_elapsed(),
            Action::FilesListed { result } => self.files_listed(result),
            Action::FileFetched { filename, result } => self.file_fetched(filename, result),
            Action::FileCreated { filename, result } => self.file_created(&filename, result),
            Action::FileSaved { filename, result } => self.file_saved(&filename, result),
            Action::FileDeleted { filename, result } => self.file_deleted(&filename, result),
            Action::CheckArrived { reply } => self.check_arrived(reply),
            Action::SuggestionsArrived { request_id, result } => {
                self.suggestions_arrived(request_id, result)
            }
            Action::CompileFinished { request_id, result } => {
                self.compile_finished(request_id, result)
            }
            Action::GenerateFinished { request_id, result } => {
                self.generate_finished(request_id, result)
            }
            Action::DebugFinished { request_id, result } => {
                self.debug_finished(request_id, result)
            }
        }
    }

    // ── Workspace / tab management ──

    fn open_file(&mut self, filename: CompactString) -> DispatchResult {
        if self.state.workspace.contains(&filename) {
            // Already open: activate, no network call.
            return self.activate_tab(&filename);
        }
        DispatchResult {
            effects: vec![Effect::FetchFile { filename }],
            state_changed: false,
        }
    }

    fn activate_tab(&mut self, filename: &str) -> DispatchResult {
        if !self.state.workspace.set_active(filename) {
            return DispatchResult {
                effects: Vec::new(),
                state_changed: false,
            };
        }
        let (_, effects) = self.after_active_switch();
        DispatchResult {
            effects,
            state_changed: true,
        }
    }

    fn close_tab(&mut self, filename: &str) -> DispatchResult {
        let was_active = self.state.workspace.active_filename() == Some(filename);
        if !self.state.workspace.close(filename) {
            return DispatchResult {
                effects: Vec::new(),
                state_changed: false,
            };
        }
        let effects = if was_active {
            self.after_active_switch().1
        } else {
            Vec::new()
        };
        DispatchResult {
            effects,
            state_changed: true,
        }
    }

    fn edit_active_content(&mut self, content: &str) -> DispatchResult {
        if !self.state.workspace.edit_active_content(content) {
            return DispatchResult {
                effects: Vec::new(),
                state_changed: false,
            };
        }
        self.state.suggestions.invalidate();
        DispatchResult {
            effects: vec![Effect::ScheduleCheck],
            state_changed: true,
        }
    }

    fn set_active_language(&mut self, language: Language) -> DispatchResult {
        if !self.state.workspace.set_active_language(language) {
            return DispatchResult {
                effects: Vec::new(),
                state_changed: false,
            };
        }
        DispatchResult {
            effects: vec![Effect::ScheduleCheck],
            state_changed: true,
        }
    }

    fn create_file(&mut self, filename: CompactString) -> DispatchResult {
        if filename.is_empty() {
            return DispatchResult {
                effects: Vec::new(),
                state_changed: self.state.invoke.set_output("Filename is required."),
            };
        }
        if self.state.files.iter().any(|f| *f == filename) {
            let message = format!("File already exists: {}", filename);
            return DispatchResult {
                effects: Vec::new(),
                state_changed: self.state.invoke.set_output(message),
            };
        }
        DispatchResult {
            effects: vec![Effect::CreateFile { filename }],
            state_changed: false,
        }
    }

    fn save(&mut self) -> DispatchResult {
        let Some(tab) = self.state.workspace.active_tab() else {
            return DispatchResult {
                effects: Vec::new(),
                state_changed: self.state.invoke.set_output("Nothing to save."),
            };
        };
        DispatchResult {
            effects: vec![Effect::SaveFile {
                filename: tab.filename.clone(),
                content: tab.content.clone(),
            }],
            state_changed: false,
        }
    }

    // ── Suggestions ──

    fn cursor_moved(&mut self, offset: usize) -> DispatchResult {
        let Some(tab) = self.state.workspace.active_tab() else {
            return DispatchResult {
                effects: Vec::new(),
                state_changed: false,
            };
        };
        if tab.content.trim().is_empty() {
            // Nothing to complete against; don't bother the collaborator.
            return DispatchResult {
                effects: Vec::new(),
                state_changed: false,
            };
        }
        let content = tab.content.clone();
        let language = tab.language;
        let request_id = self.state.suggestions.next_request();
        DispatchResult {
            effects: vec![Effect::RequestSuggestions {
                request_id,
                content,
                offset,
                language,
            }],
            state_changed: false,
        }
    }

    fn suggestions_arrived(
        &mut self,
        request_id: u64,
        result: Result<Vec<String>, SuggestError>,
    ) -> DispatchResult {
        if !self.state.suggestions.is_latest(request_id) {
            tracing::debug!(
                target: "session.suggest",
                request_id,
                latest = self.state.suggestions.latest_request(),
                "drop superseded suggestions"
            );
            return DispatchResult {
                effects: Vec::new(),
                state_changed: false,
            };
        }
        match result {
            Ok(items) => {
                if self.state.suggestions.items == items {
                    return DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                }
                self.state.suggestions.items = items;
                DispatchResult {
                    effects: Vec::new(),
                    state_changed: true,
                }
            }
            Err(err) => {
                // Best-effort: keep whatever was on screen.
                tracing::warn!(target: "session.suggest", error = %err, "keeping previous suggestions");
                DispatchResult {
                    effects: Vec::new(),
                    state_changed: false,
                }
            }
        }
    }

    // ── Debounced diagnostics ──

    fn check_debounce_elapsed(&mut self) -> DispatchResult {
        // The pair in effect at fire time, not at edit time.
        let Some(tab) = self.state.workspace.active_tab() else {
            return DispatchResult {
                effects: Vec::new(),
                state_changed: false,
            };
        };
        DispatchResult {
            effects: vec![Effect::PublishCheck {
                content: tab.content.clone(),
                language: tab.language,
            }],
            state_changed: false,
        }
    }

    fn check_arrived(&mut self, reply: CheckReply) -> DispatchResult {
        let Some(tab) = self.state.workspace.active_tab() else {
            tracing::debug!(target: "session.check", "drop check reply (no active tab)");
            return DispatchResult {
                effects: Vec::new(),
                state_changed: false,
            };
        };
        if tab.content != reply.content || tab.language != reply.language {
            tracing::debug!(
                target: "session.check",
                language = reply.language.wire_id(),
                "drop stale check reply"
            );
            return DispatchResult {
                effects: Vec::new(),
                state_changed: false,
            };
        }
        let entries = match reply.outcome {
            CheckOutcome::Errors(entries) => entries,
            CheckOutcome::Failed(err) => vec![err.to_string()],
        };
        let next = DiagnosticsState {
            for_content: reply.content,
            for_language: reply.language,
            entries,
        };
        if self.state.diagnostics.as_ref() == Some(&next) {
            return DispatchResult {
                effects: Vec::new(),
                state_changed: false,
            };
        }
        self.state.diagnostics = Some(next);
        DispatchResult {
            effects: Vec::new(),
            state_changed: true,
        }
    }

    // ── One-shot actions ──

    fn compile(&mut self) -> DispatchResult {
        let Some(tab) = self.state.workspace.active_tab() else {
            tracing::debug!(target: "session.invoke", "compile with no active tab");
            return DispatchResult {
                effects: Vec::new(),
                state_changed: false,
            };
        };
        let content = tab.content.clone();
        let language = tab.language;
        let request_id = self.state.invoke.next_request();
        DispatchResult {
            effects: vec![Effect::Compile {
                request_id,
                content,
                language,
            }],
            state_changed: false,
        }
    }

    fn generate_code(&mut self, task: String) -> DispatchResult {
        if task.trim().is_empty() {
            tracing::debug!(target: "session.invoke", "generate with empty task");
            return DispatchResult {
                effects: Vec::new(),
                state_changed: false,
            };
        }
        let Some(tab) = self.state.workspace.active_tab() else {
            tracing::debug!(target: "session.invoke", "generate with no active tab");
            return DispatchResult {
                effects: Vec::new(),
                state_changed: false,
            };
        };
        let language = tab.language;
        let request_id = self.state.invoke.next_request();
        DispatchResult {
            effects: vec![Effect::Generate {
                request_id,
                task,
                language,
            }],
            state_changed: false,
        }
    }

    fn debug_code(&mut self) -> DispatchResult {
        let Some(tab) = self.state.workspace.active_tab() else {
            tracing::debug!(target: "session.invoke", "debug with no active tab");
            return DispatchResult {
                effects: Vec::new(),
                state_changed: false,
            };
        };
        let content = tab.content.clone();
        let language = tab.language;
        let request_id = self.state.invoke.next_request();
        DispatchResult {
            effects: vec![Effect::Debug {
                request_id,
                content,
                language,
            }],
            state_changed: false,
        }
    }

    fn compile_finished(
        &mut self,
        request_id: u64,
        result: Result<String, ActionError>,
    ) -> DispatchResult {
        if !self.state.invoke.is_latest(request_id) {
            tracing::debug!(target: "session.invoke", request_id, "drop superseded compile result");
            return DispatchResult {
                effects: Vec::new(),
                state_changed: false,
            };
        }
        let output = match result {
            Ok(output) if output.is_empty() => "Compilation successful, no output.".to_string(),
            Ok(output) => output,
            Err(err) => err
                .message
                .unwrap_or_else(|| "Compilation failed.".to_string()),
        };
        DispatchResult {
            effects: Vec::new(),
            state_changed: self.state.invoke.set_output(output),
        }
    }

    fn generate_finished(
        &mut self,
        request_id: u64,
        result: Result<GeneratedCode, ActionError>,
    ) -> DispatchResult {
        if !self.state.invoke.is_latest(request_id) {
            tracing::debug!(target: "session.invoke", request_id, "drop superseded generate result");
            return DispatchResult {
                effects: Vec::new(),
                state_changed: false,
            };
        }
        match result {
            Ok(generated) => {
                if self.state.workspace.active_tab().is_none() {
                    // The buffer it was meant for is gone.
                    tracing::debug!(target: "session.invoke", "drop generate result (no active tab)");
                    return DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                }
                // Explicit, user-visible replacement of the editing buffer.
                let replaced = self.state.workspace.edit_active_content(&generated.code);
                let mut effects = Vec::new();
                if replaced {
                    self.state.suggestions.invalidate();
                    effects.push(Effect::ScheduleCheck);
                }
                let text = generated
                    .tests
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| "No tests generated.".to_string());
                let changed = self.state.invoke.set_output(text) || replaced;
                DispatchResult {
                    effects,
                    state_changed: changed,
                }
            }
            Err(err) => {
                let message = err
                    .message
                    .unwrap_or_else(|| "Code generation failed.".to_string());
                DispatchResult {
                    effects: Vec::new(),
                    state_changed: self.state.invoke.set_output(message),
                }
            }
        }
    }

    fn debug_finished(
        &mut self,
        request_id: u64,
        result: Result<String, ActionError>,
    ) -> DispatchResult {
        if !self.state.invoke.is_latest(request_id) {
            tracing::debug!(target: "session.invoke", request_id, "drop superseded debug result");
            return DispatchResult {
                effects: Vec::new(),
                state_changed: false,
            };
        }
        let output = match result {
            Ok(text) => text,
            Err(err) => err
                .message
                .unwrap_or_else(|| "Debug analysis failed.".to_string()),
        };
        DispatchResult {
            effects: Vec::new(),
            state_changed: self.state.invoke.set_output(output),
        }
    }

    // ── Storage replies ──

    fn files_listed(
        &mut self,
        result: Result<Vec<CompactString>, FetchError>,
    ) -> DispatchResult {
        match result {
            Ok(files) => {
                if self.state.files == files {
                    return DispatchResult {
                        effects: Vec::new(),
                        state_changed: false,
                    };
                }
                self.state.files = files;
                DispatchResult {
                    effects: Vec::new(),
                    state_changed: true,
                }
            }
            Err(err) => {
                tracing::warn!(target: "session.files", error = %err, "file listing failed");
                DispatchResult {
                    effects: Vec::new(),
                    state_changed: self.state.invoke.set_output(err.to_string()),
                }
            }
        }
    }

    fn file_fetched(
        &mut self,
        filename: CompactString,
        result: Result<String, FetchError>,
    ) -> DispatchResult {
        match result {
            Ok(content) => {
                if self.state.workspace.contains(&filename) {
                    // A tab appeared while the fetch was in flight (double
                    // open); keep the one with the user's edits.
                    return self.activate_tab(&filename);
                }
                self.state.workspace.open(Tab::new(filename, content));
                let (_, effects) = self.after_active_switch();
                DispatchResult {
                    effects,
                    state_changed: true,
                }
            }
            Err(err) => {
                tracing::warn!(target: "session.files", error = %err, "open failed");
                DispatchResult {
                    effects: Vec::new(),
                    state_changed: self.state.invoke.set_output(err.to_string()),
                }
            }
        }
    }

    fn file_created(
        &mut self,
        filename: &str,
        result: Result<(), PersistError>,
    ) -> DispatchResult {
        match result {
            Ok(()) => DispatchResult {
                effects: vec![Effect::ListFiles],
                state_changed: false,
            },
            Err(err) => {
                tracing::warn!(target: "session.files", filename, error = %err, "create failed");
                DispatchResult {
                    effects: Vec::new(),
                    state_changed: self.state.invoke.set_output(err.to_string()),
                }
            }
        }
    }

    fn file_saved(&mut self, filename: &str, result: Result<(), PersistError>) -> DispatchResult {
        let output = match result {
            Ok(()) => format!("Saved {}", filename),
            Err(err) => {
                tracing::warn!(target: "session.files", filename, error = %err, "save failed");
                err.to_string()
            }
        };
        DispatchResult {
            effects: Vec::new(),
            state_changed: self.state.invoke.set_output(output),
        }
    }

    fn file_deleted(
        &mut self,
        filename: &str,
        result: Result<(), PersistError>,
    ) -> DispatchResult {
        match result {
            Ok(()) => {
                let mut result = self.close_tab(filename);
                result.effects.push(Effect::ListFiles);
                result
            }
            Err(err) => {
                tracing::warn!(target: "session.files", filename, error = %err, "delete failed");
                DispatchResult {
                    effects: Vec::new(),
                    state_changed: self.state.invoke.set_output(err.to_string()),
                }
            }
        }
    }

    /// The active (content, language) pair changed identity: per-tab results
    /// no longer apply, and the quiet period restarts for the new pair (or
    /// stops when nothing is active anymore).
    fn after_active_switch(&mut self) -> (bool, Vec<Effect>) {
        let mut changed = self.state.diagnostics.take().is_some();
        changed |= self.state.suggestions.invalidate();
        let effects = if self.state.workspace.active_tab().is_some() {
            vec![Effect::ScheduleCheck]
        } else {
            vec![Effect::CancelCheck]
        };
        (changed, effects)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
