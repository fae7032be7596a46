use compact_str::CompactString;

use crate::kernel::language::Language;

/// Requests the reducers hand back to the outside world. The session
/// controller interprets `ScheduleCheck`/`CancelCheck` itself (they own the
/// debounce deadline); everything else goes to the effect driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ListFiles,
    FetchFile {
        filename: CompactString,
    },
    CreateFile {
        filename: CompactString,
    },
    SaveFile {
        filename: CompactString,
        content: String,
    },
    DeleteFile {
        filename: CompactString,
    },
    /// (Re)start the diagnostics quiet-period timer.
    ScheduleCheck,
    /// Drop any pending quiet-period timer.
    CancelCheck,
    PublishCheck {
        content: String,
        language: Language,
    },
    RequestSuggestions {
        request_id: u64,
        content: String,
        offset: usize,
        language: Language,
    },
    Compile {
        request_id: u64,
        content: String,
        language: Language,
    },
    Generate {
        request_id: u64,
        task: String,
        language: Language,
    },
    Debug {
        request_id: u64,
        content: String,
        language: Language,
    },
}
