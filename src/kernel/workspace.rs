//! Open tabs and the active-tab pointer. Pure state, no I/O.

use compact_str::CompactString;

use super::language::Language;

/// One open file's editable state. `content` is a local, possibly-unsaved
/// copy of the remote file and is the single source of truth for in-progress
/// edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub filename: CompactString,
    pub content: String,
    pub language: Language,
}

impl Tab {
    pub fn new(filename: impl Into<CompactString>, content: String) -> Self {
        let filename = filename.into();
        let language = Language::from_filename(&filename);
        Self {
            filename,
            content,
            language,
        }
    }
}

/// Ordered set of open tabs (open order) plus which one is active.
///
/// Invariants: at most one tab per filename; `active`, when set, names a tab
/// present in `tabs`.
#[derive(Debug, Default)]
pub struct Workspace {
    tabs: Vec<Tab>,
    active: Option<CompactString>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.tabs.iter().any(|t| t.filename == filename)
    }

    pub fn active_filename(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        let active = self.active.as_deref()?;
        self.tabs.iter().find(|t| t.filename == active)
    }

    pub(crate) fn active_tab_mut(&mut self) -> Option<&mut Tab> {
        let active = self.active.as_deref()?;
        let index = self.tabs.iter().position(|t| t.filename == active)?;
        self.tabs.get_mut(index)
    }

    /// Appends `tab` and makes it active. If a tab with the same filename is
    /// already open, that one is activated instead and `tab` is discarded.
    pub fn open(&mut self, tab: Tab) -> bool {
        if self.contains(&tab.filename) {
            return self.set_active(&tab.filename);
        }
        self.active = Some(tab.filename.clone());
        self.tabs.push(tab);
        true
    }

    /// Removes the tab for `filename`. Closing the active tab activates the
    /// first remaining tab in open order, or none if the workspace is empty.
    /// Idempotent when the filename is not open.
    pub fn close(&mut self, filename: &str) -> bool {
        let Some(index) = self.tabs.iter().position(|t| t.filename == filename) else {
            return false;
        };
        self.tabs.remove(index);
        if self.active.as_deref() == Some(filename) {
            self.active = self.tabs.first().map(|t| t.filename.clone());
        }
        true
    }

    /// No-op unless `filename` is an open tab.
    pub fn set_active(&mut self, filename: &str) -> bool {
        if !self.contains(filename) {
            return false;
        }
        if self.active.as_deref() == Some(filename) {
            return false;
        }
        self.active = Some(CompactString::from(filename));
        true
    }

    /// Replaces the active tab's content. Local only, no persistence.
    pub fn edit_active_content(&mut self, content: &str) -> bool {
        let Some(tab) = self.active_tab_mut() else {
            return false;
        };
        if tab.content == content {
            return false;
        }
        tab.content = content.to_string();
        true
    }

    /// User override of the guessed language for the active tab.
    pub fn set_active_language(&mut self, language: Language) -> bool {
        let Some(tab) = self.active_tab_mut() else {
            return false;
        };
        if tab.language == language {
            return false;
        }
        tab.language = language;
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/workspace.rs"]
mod tests;
