use crate::kernel::services::ports::{
    ActionError, CheckError, CheckOutcome, CheckReply, FetchError, GeneratedCode, PersistError,
};
use crate::kernel::store::Store;
use crate::kernel::{Action, Effect, Language, SessionState};

fn store() -> Store {
    Store::new(SessionState::new())
}

fn open_tab(store: &mut Store, name: &str, content: &str) {
    let result = store.dispatch(Action::OpenFile {
        filename: name.into(),
    });
    assert_eq!(
        result.effects,
        vec![Effect::FetchFile {
            filename: name.into()
        }]
    );
    let _ = store.dispatch(Action::FileFetched {
        filename: name.into(),
        result: Ok(content.to_string()),
    });
}

fn action_output(store: &Store) -> &str {
    store
        .state()
        .invoke
        .result
        .as_ref()
        .map(|r| r.output.as_str())
        .unwrap_or("")
}

// ── Workspace / file operations ──

#[test]
fn open_file_fetches_then_opens_an_active_tab() {
    let mut store = store();
    open_tab(&mut store, "main.py", "print('hi')");

    let tab = store.state().workspace.active_tab().unwrap();
    assert_eq!(tab.filename, "main.py");
    assert_eq!(tab.content, "print('hi')");
    assert_eq!(tab.language, Language::Python);
}

#[test]
fn opening_an_open_file_issues_no_fetch() {
    let mut store = store();
    open_tab(&mut store, "a.py", "");
    open_tab(&mut store, "b.py", "");

    let result = store.dispatch(Action::OpenFile {
        filename: "a.py".into(),
    });
    assert!(result
        .effects
        .iter()
        .all(|e| !matches!(e, Effect::FetchFile { .. })));
    assert_eq!(store.state().workspace.active_filename(), Some("a.py"));
}

#[test]
fn duplicate_fetch_replies_never_duplicate_tabs() {
    let mut store = store();
    // Two opens race before the first reply lands.
    let _ = store.dispatch(Action::OpenFile {
        filename: "a.py".into(),
    });
    let _ = store.dispatch(Action::OpenFile {
        filename: "a.py".into(),
    });
    let _ = store.dispatch(Action::FileFetched {
        filename: "a.py".into(),
        result: Ok("one".to_string()),
    });
    let _ = store.dispatch(Action::FileFetched {
        filename: "a.py".into(),
        result: Ok("two".to_string()),
    });

    assert_eq!(store.state().workspace.tabs().len(), 1);
    // The copy holding the user's state wins; the late reply is dropped.
    assert_eq!(store.state().workspace.active_tab().unwrap().content, "one");
}

#[test]
fn open_failure_leaves_the_workspace_unchanged() {
    let mut store = store();
    let _ = store.dispatch(Action::OpenFile {
        filename: "gone.py".into(),
    });
    let result = store.dispatch(Action::FileFetched {
        filename: "gone.py".into(),
        result: Err(FetchError::NotFound("gone.py".into())),
    });

    assert!(result.state_changed);
    assert!(store.state().workspace.is_empty());
    assert_eq!(action_output(&store), "No such file: gone.py");
}

#[test]
fn create_rejects_empty_and_listed_names_without_network() {
    let mut store = store();
    let _ = store.dispatch(Action::FilesListed {
        result: Ok(vec!["a.py".into()]),
    });

    let result = store.dispatch(Action::CreateFile {
        filename: "".into(),
    });
    assert!(result.effects.is_empty());
    assert_eq!(action_output(&store), "Filename is required.");

    let result = store.dispatch(Action::CreateFile {
        filename: "a.py".into(),
    });
    assert!(result.effects.is_empty());
    assert_eq!(action_output(&store), "File already exists: a.py");
}

#[test]
fn successful_create_refreshes_the_listing_without_opening() {
    let mut store = store();
    let result = store.dispatch(Action::CreateFile {
        filename: "new.py".into(),
    });
    assert_eq!(
        result.effects,
        vec![Effect::CreateFile {
            filename: "new.py".into()
        }]
    );

    let result = store.dispatch(Action::FileCreated {
        filename: "new.py".into(),
        result: Ok(()),
    });
    assert_eq!(result.effects, vec![Effect::ListFiles]);
    assert!(store.state().workspace.is_empty());
}

#[test]
fn delete_closes_the_tab_and_refreshes_the_listing() {
    let mut store = store();
    open_tab(&mut store, "a.py", "");

    let result = store.dispatch(Action::DeleteFile {
        filename: "a.py".into(),
    });
    assert_eq!(
        result.effects,
        vec![Effect::DeleteFile {
            filename: "a.py".into()
        }]
    );

    let result = store.dispatch(Action::FileDeleted {
        filename: "a.py".into(),
        result: Ok(()),
    });
    assert_eq!(result.effects, vec![Effect::CancelCheck, Effect::ListFiles]);
    assert!(store.state().workspace.is_empty());
}

#[test]
fn save_without_an_active_tab_reports_nothing_to_save() {
    let mut store = store();
    let result = store.dispatch(Action::Save);

    assert!(result.effects.is_empty());
    assert_eq!(action_output(&store), "Nothing to save.");
}

#[test]
fn save_persists_the_active_content_and_reports() {
    let mut store = store();
    open_tab(&mut store, "a.py", "x = 1");

    let result = store.dispatch(Action::Save);
    assert_eq!(
        result.effects,
        vec![Effect::SaveFile {
            filename: "a.py".into(),
            content: "x = 1".to_string(),
        }]
    );

    let _ = store.dispatch(Action::FileSaved {
        filename: "a.py".into(),
        result: Ok(()),
    });
    assert_eq!(action_output(&store), "Saved a.py");
}

#[test]
fn save_failure_surfaces_the_persist_error() {
    let mut store = store();
    open_tab(&mut store, "a.py", "x = 1");
    let _ = store.dispatch(Action::Save);
    let _ = store.dispatch(Action::FileSaved {
        filename: "a.py".into(),
        result: Err(PersistError::Unreachable("socket closed".to_string())),
    });

    assert_eq!(action_output(&store), "Storage unreachable: socket closed");
}

#[test]
fn listing_failure_keeps_the_previous_file_list() {
    let mut store = store();
    let _ = store.dispatch(Action::FilesListed {
        result: Ok(vec!["a.py".into()]),
    });
    let _ = store.dispatch(Action::FilesListed {
        result: Err(FetchError::Unreachable("offline".to_string())),
    });

    assert_eq!(store.state().files, vec!["a.py"]);
    assert_eq!(action_output(&store), "Storage unreachable: offline");
}

// ── Debounced diagnostics ──

#[test]
fn edits_schedule_a_check_and_fire_with_the_final_content() {
    let mut store = store();
    open_tab(&mut store, "a.py", "");

    let result = store.dispatch(Action::EditActiveContent {
        content: "x =".to_string(),
    });
    assert_eq!(result.effects, vec![Effect::ScheduleCheck]);

    let result = store.dispatch(Action::CheckDebounceElapsed);
    assert_eq!(
        result.effects,
        vec![Effect::PublishCheck {
            content: "x =".to_string(),
            language: Language::Python,
        }]
    );
}

#[test]
fn stale_check_replies_are_discarded() {
    let mut store = store();
    open_tab(&mut store, "a.py", "B");

    let result = store.dispatch(Action::CheckArrived {
        reply: CheckReply {
            content: "A".to_string(),
            language: Language::Python,
            outcome: CheckOutcome::Errors(vec!["bad".to_string()]),
        },
    });
    assert!(!result.state_changed);
    assert!(store.state().diagnostics.is_none());

    let result = store.dispatch(Action::CheckArrived {
        reply: CheckReply {
            content: "B".to_string(),
            language: Language::Python,
            outcome: CheckOutcome::Errors(vec!["good".to_string()]),
        },
    });
    assert!(result.state_changed);
    let diagnostics = store.state().diagnostics.as_ref().unwrap();
    assert_eq!(diagnostics.entries, vec!["good"]);
    assert!(diagnostics.describes("B", Language::Python));
}

#[test]
fn stale_reply_never_overwrites_fresher_diagnostics() {
    let mut store = store();
    open_tab(&mut store, "a.py", "B");
    let _ = store.dispatch(Action::CheckArrived {
        reply: CheckReply {
            content: "B".to_string(),
            language: Language::Python,
            outcome: CheckOutcome::Errors(Vec::new()),
        },
    });

    // The reply for the content the user already left behind arrives late.
    let result = store.dispatch(Action::CheckArrived {
        reply: CheckReply {
            content: "A".to_string(),
            language: Language::Python,
            outcome: CheckOutcome::Errors(vec!["stale".to_string()]),
        },
    });
    assert!(!result.state_changed);
    assert!(store.state().diagnostics.as_ref().unwrap().entries.is_empty());
}

#[test]
fn language_mismatch_also_counts_as_stale() {
    let mut store = store();
    open_tab(&mut store, "a.py", "B");

    let result = store.dispatch(Action::CheckArrived {
        reply: CheckReply {
            content: "B".to_string(),
            language: Language::Ruby,
            outcome: CheckOutcome::Errors(vec!["bad".to_string()]),
        },
    });
    assert!(!result.state_changed);
    assert!(store.state().diagnostics.is_none());
}

#[test]
fn check_failure_renders_a_single_error_entry() {
    let mut store = store();
    open_tab(&mut store, "a.py", "code");

    let _ = store.dispatch(Action::CheckArrived {
        reply: CheckReply {
            content: "code".to_string(),
            language: Language::Python,
            outcome: CheckOutcome::Failed(CheckError("engine crashed".to_string())),
        },
    });
    assert_eq!(
        store.state().diagnostics.as_ref().unwrap().entries,
        vec!["Check failed: engine crashed"]
    );
}

#[test]
fn switching_tabs_clears_diagnostics_and_restarts_the_window() {
    let mut store = store();
    open_tab(&mut store, "a.py", "aa");
    open_tab(&mut store, "b.py", "bb");
    let _ = store.dispatch(Action::CheckArrived {
        reply: CheckReply {
            content: "bb".to_string(),
            language: Language::Python,
            outcome: CheckOutcome::Errors(vec!["warn".to_string()]),
        },
    });

    let result = store.dispatch(Action::SetActiveTab {
        filename: "a.py".into(),
    });
    assert!(result.state_changed);
    assert_eq!(result.effects, vec![Effect::ScheduleCheck]);
    assert!(store.state().diagnostics.is_none());
}

#[test]
fn closing_the_last_tab_cancels_the_pending_check() {
    let mut store = store();
    open_tab(&mut store, "a.py", "aa");

    let result = store.dispatch(Action::CloseTab {
        filename: "a.py".into(),
    });
    assert_eq!(result.effects, vec![Effect::CancelCheck]);

    // Nothing active anymore, so an elapsed window publishes nothing.
    let result = store.dispatch(Action::CheckDebounceElapsed);
    assert!(result.effects.is_empty());
}

// ── Suggestions ──

#[test]
fn cursor_moves_issue_requests_with_fresh_ids() {
    let mut store = store();
    open_tab(&mut store, "a.py", "import os");

    let result = store.dispatch(Action::CursorMoved { offset: 5 });
    assert_eq!(
        result.effects,
        vec![Effect::RequestSuggestions {
            request_id: 1,
            content: "import os".to_string(),
            offset: 5,
            language: Language::Python,
        }]
    );

    let result = store.dispatch(Action::CursorMoved { offset: 9 });
    assert!(matches!(
        result.effects.as_slice(),
        [Effect::RequestSuggestions { request_id: 2, .. }]
    ));
}

#[test]
fn whitespace_only_content_short_circuits_suggestions() {
    let mut store = store();
    open_tab(&mut store, "a.py", "  \n\t");

    let result = store.dispatch(Action::CursorMoved { offset: 1 });
    assert!(result.effects.is_empty());
}

#[test]
fn cursor_move_without_a_tab_issues_no_request() {
    let mut store = store();
    let result = store.dispatch(Action::CursorMoved { offset: 0 });
    assert!(result.effects.is_empty());
}

#[test]
fn out_of_order_replies_keep_the_latest_request() {
    let mut store = store();
    open_tab(&mut store, "a.py", "import os");
    let _ = store.dispatch(Action::CursorMoved { offset: 5 });
    let _ = store.dispatch(Action::CursorMoved { offset: 12 });

    // The later request resolves first; the earlier one must not regress it.
    let result = store.dispatch(Action::SuggestionsArrived {
        request_id: 2,
        result: Ok(vec!["os.path".to_string()]),
    });
    assert!(result.state_changed);
    let result = store.dispatch(Action::SuggestionsArrived {
        request_id: 1,
        result: Ok(vec!["old".to_string()]),
    });
    assert!(!result.state_changed);
    assert_eq!(store.state().suggestions.items, vec!["os.path"]);
}

#[test]
fn failed_suggestions_keep_the_previous_set() {
    let mut store = store();
    open_tab(&mut store, "a.py", "import os");
    let _ = store.dispatch(Action::CursorMoved { offset: 5 });
    let _ = store.dispatch(Action::SuggestionsArrived {
        request_id: 1,
        result: Ok(vec!["os.path".to_string()]),
    });

    let _ = store.dispatch(Action::CursorMoved { offset: 6 });
    let result = store.dispatch(Action::SuggestionsArrived {
        request_id: 2,
        result: Err(crate::kernel::services::ports::SuggestError(
            "timeout".to_string(),
        )),
    });
    assert!(!result.state_changed);
    assert_eq!(store.state().suggestions.items, vec!["os.path"]);
}

#[test]
fn editing_invalidates_the_suggestion_set() {
    let mut store = store();
    open_tab(&mut store, "a.py", "import os");
    let _ = store.dispatch(Action::CursorMoved { offset: 5 });
    let _ = store.dispatch(Action::SuggestionsArrived {
        request_id: 1,
        result: Ok(vec!["os.path".to_string()]),
    });

    let _ = store.dispatch(Action::EditActiveContent {
        content: "import sys".to_string(),
    });
    assert!(store.state().suggestions.items.is_empty());
}

// ── One-shot actions ──

#[test]
fn compile_without_an_active_tab_is_invalid() {
    let mut store = store();
    let result = store.dispatch(Action::Compile);
    assert!(result.effects.is_empty());
}

#[test]
fn compile_sends_the_active_pair_and_shows_output() {
    let mut store = store();
    open_tab(&mut store, "a.py", "print(42)");

    let result = store.dispatch(Action::Compile);
    assert_eq!(
        result.effects,
        vec![Effect::Compile {
            request_id: 1,
            content: "print(42)".to_string(),
            language: Language::Python,
        }]
    );

    let _ = store.dispatch(Action::CompileFinished {
        request_id: 1,
        result: Ok("42\n".to_string()),
    });
    assert_eq!(action_output(&store), "42\n");
}

#[test]
fn empty_compile_output_renders_the_literal() {
    let mut store = store();
    open_tab(&mut store, "a.py", "pass");
    let _ = store.dispatch(Action::Compile);
    let _ = store.dispatch(Action::CompileFinished {
        request_id: 1,
        result: Ok(String::new()),
    });

    assert_eq!(action_output(&store), "Compilation successful, no output.");
}

#[test]
fn compile_failure_renders_reported_or_generic_message() {
    let mut store = store();
    open_tab(&mut store, "a.py", "pass");

    let _ = store.dispatch(Action::Compile);
    let _ = store.dispatch(Action::CompileFinished {
        request_id: 1,
        result: Err(ActionError::new("SyntaxError: line 1")),
    });
    assert_eq!(action_output(&store), "SyntaxError: line 1");

    let _ = store.dispatch(Action::Compile);
    let _ = store.dispatch(Action::CompileFinished {
        request_id: 2,
        result: Err(ActionError::unspecified()),
    });
    assert_eq!(action_output(&store), "Compilation failed.");
}

#[test]
fn superseded_compile_replies_never_overwrite_newer_results() {
    let mut store = store();
    open_tab(&mut store, "a.py", "pass");
    let _ = store.dispatch(Action::Compile);
    let _ = store.dispatch(Action::Compile);

    let _ = store.dispatch(Action::CompileFinished {
        request_id: 2,
        result: Ok("fresh".to_string()),
    });
    let result = store.dispatch(Action::CompileFinished {
        request_id: 1,
        result: Ok("slow and stale".to_string()),
    });
    assert!(!result.state_changed);
    assert_eq!(action_output(&store), "fresh");
}

#[test]
fn generate_with_an_empty_task_is_a_noop() {
    let mut store = store();
    open_tab(&mut store, "a.py", "original");

    let result = store.dispatch(Action::GenerateCode {
        task: "   ".to_string(),
    });
    assert!(result.effects.is_empty());
    assert_eq!(store.state().workspace.active_tab().unwrap().content, "original");
}

#[test]
fn generate_replaces_the_buffer_and_shows_tests() {
    let mut store = store();
    open_tab(&mut store, "a.py", "original");

    let result = store.dispatch(Action::GenerateCode {
        task: "sort an array".to_string(),
    });
    assert_eq!(
        result.effects,
        vec![Effect::Generate {
            request_id: 1,
            task: "sort an array".to_string(),
            language: Language::Python,
        }]
    );

    let result = store.dispatch(Action::GenerateFinished {
        request_id: 1,
        result: Ok(GeneratedCode {
            code: "def sort(xs):\n    return sorted(xs)".to_string(),
            tests: Some("assert sort([2, 1]) == [1, 2]".to_string()),
        }),
    });
    assert!(result.state_changed);
    assert_eq!(result.effects, vec![Effect::ScheduleCheck]);
    assert_eq!(
        store.state().workspace.active_tab().unwrap().content,
        "def sort(xs):\n    return sorted(xs)"
    );
    assert_eq!(action_output(&store), "assert sort([2, 1]) == [1, 2]");
}

#[test]
fn generate_without_tests_renders_the_literal() {
    let mut store = store();
    open_tab(&mut store, "a.py", "");
    let _ = store.dispatch(Action::GenerateCode {
        task: "hello world".to_string(),
    });
    let _ = store.dispatch(Action::GenerateFinished {
        request_id: 1,
        result: Ok(GeneratedCode {
            code: "print('hello')".to_string(),
            tests: None,
        }),
    });

    assert_eq!(action_output(&store), "No tests generated.");
}

#[test]
fn generate_failure_leaves_the_buffer_untouched() {
    let mut store = store();
    open_tab(&mut store, "a.py", "original");
    let _ = store.dispatch(Action::GenerateCode {
        task: "sort".to_string(),
    });
    let _ = store.dispatch(Action::GenerateFinished {
        request_id: 1,
        result: Err(ActionError::unspecified()),
    });

    assert_eq!(store.state().workspace.active_tab().unwrap().content, "original");
    assert_eq!(action_output(&store), "Code generation failed.");
}

#[test]
fn generate_reply_after_the_tab_closed_is_dropped() {
    let mut store = store();
    open_tab(&mut store, "a.py", "original");
    let _ = store.dispatch(Action::GenerateCode {
        task: "sort".to_string(),
    });
    let _ = store.dispatch(Action::CloseTab {
        filename: "a.py".into(),
    });

    let result = store.dispatch(Action::GenerateFinished {
        request_id: 1,
        result: Ok(GeneratedCode {
            code: "code".to_string(),
            tests: None,
        }),
    });
    assert!(!result.state_changed);
    assert!(result.effects.is_empty());
}

#[test]
fn debug_requires_an_active_tab() {
    let mut store = store();
    let result = store.dispatch(Action::DebugCode);
    assert!(result.effects.is_empty());
}

#[test]
fn debug_shows_the_suggestions_text() {
    let mut store = store();
    open_tab(&mut store, "a.py", "x = [1,");

    let result = store.dispatch(Action::DebugCode);
    assert_eq!(
        result.effects,
        vec![Effect::Debug {
            request_id: 1,
            content: "x = [1,".to_string(),
            language: Language::Python,
        }]
    );

    let _ = store.dispatch(Action::DebugFinished {
        request_id: 1,
        result: Ok("Close the bracket on line 1.".to_string()),
    });
    assert_eq!(action_output(&store), "Close the bracket on line 1.");
}
