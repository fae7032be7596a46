use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    Java,
    C,
    Cpp,
    Rust,
    Go,
    TypeScript,
    Ruby,
    Php,
    #[serde(rename = "txt")]
    PlainText,
}

impl Language {
    /// Languages a file can be checked/compiled as, in selector order.
    pub const SUPPORTED: [Language; 10] = [
        Self::Python,
        Self::JavaScript,
        Self::Java,
        Self::C,
        Self::Cpp,
        Self::Rust,
        Self::Go,
        Self::TypeScript,
        Self::Ruby,
        Self::Php,
    ];

    /// Guesses a language from the filename's extension. Unrecognized
    /// extensions (and files without one) fall back to `PlainText`.
    pub fn from_filename(filename: &str) -> Self {
        let ext = filename.rsplit_once('.').map(|(_, e)| e).unwrap_or("");
        match ext {
            "py" | "pyi" | "python" => Self::Python,
            "js" | "mjs" | "cjs" | "javascript" => Self::JavaScript,
            "java" => Self::Java,
            "c" => Self::C,
            "cc" | "cpp" | "cxx" | "c++" | "hpp" | "hh" | "h" => Self::Cpp,
            "rs" | "rust" => Self::Rust,
            "go" => Self::Go,
            "ts" | "mts" | "cts" | "typescript" => Self::TypeScript,
            "rb" | "ruby" => Self::Ruby,
            "php" => Self::Php,
            _ => Self::PlainText,
        }
    }

    /// Identifier the collaborators expect on the wire.
    pub fn wire_id(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::Java => "java",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Rust => "rust",
            Self::Go => "go",
            Self::TypeScript => "typescript",
            Self::Ruby => "ruby",
            Self::Php => "php",
            Self::PlainText => "txt",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::JavaScript => "JavaScript",
            Self::Java => "Java",
            Self::C => "C",
            Self::Cpp => "C++",
            Self::Rust => "Rust",
            Self::Go => "Go",
            Self::TypeScript => "TypeScript",
            Self::Ruby => "Ruby",
            Self::Php => "PHP",
            Self::PlainText => "Plain Text",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/language.rs"]
mod tests;
