use compact_str::CompactString;

use crate::kernel::language::Language;
use crate::kernel::services::ports::{
    ActionError, CheckReply, FetchError, GeneratedCode, PersistError, SuggestError,
};

/// Everything that can happen to a session: user intents applied
/// synchronously in event order, and collaborator replies delivered later
/// over the bus. Reducers re-read current state when a reply arrives instead
/// of trusting what was captured at request time.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // User intents.
    RefreshFiles,
    OpenFile {
        filename: CompactString,
    },
    CloseTab {
        filename: CompactString,
    },
    SetActiveTab {
        filename: CompactString,
    },
    EditActiveContent {
        content: String,
    },
    SetActiveLanguage {
        language: Language,
    },
    CreateFile {
        filename: CompactString,
    },
    DeleteFile {
        filename: CompactString,
    },
    Save,
    CursorMoved {
        offset: usize,
    },
    Compile,
    GenerateCode {
        task: String,
    },
    DebugCode,
    /// The quiet period ended without further edits; check whatever the
    /// active tab holds now.
    CheckDebounceElapsed,

    // Collaborator replies.
    FilesListed {
        result: Result<Vec<CompactString>, FetchError>,
    },
    FileFetched {
        filename: CompactString,
        result: Result<String, FetchError>,
    },
    FileCreated {
        filename: CompactString,
        result: Result<(), PersistError>,
    },
    FileSaved {
        filename: CompactString,
        result: Result<(), PersistError>,
    },
    FileDeleted {
        filename: CompactString,
        result: Result<(), PersistError>,
    },
    CheckArrived {
        reply: CheckReply,
    },
    SuggestionsArrived {
        request_id: u64,
        result: Result<Vec<String>, SuggestError>,
    },
    CompileFinished {
        request_id: u64,
        result: Result<String, ActionError>,
    },
    GenerateFinished {
        request_id: u64,
        result: Result<GeneratedCode, ActionError>,
    },
    DebugFinished {
        request_id: u64,
        result: Result<String, ActionError>,
    },
}
