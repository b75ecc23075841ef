use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of entry a planned path is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Created with create-dir semantics; a no-op when already present.
    Directory,
    /// Created as an empty file when absent; never touched when present.
    Placeholder,
    /// Written with fixed literal content on every run.
    Template { name: String },
}

/// One entry of the scaffold plan. Paths are always relative to the
/// output root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaffoldAction {
    pub path: String,
    pub kind: ActionKind,
}

impl ScaffoldAction {
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: ActionKind::Directory,
        }
    }

    pub fn placeholder(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: ActionKind::Placeholder,
        }
    }

    pub fn template(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: ActionKind::Template { name: name.into() },
        }
    }
}

/// A file with its resolved bytes, ready to be applied.
#[derive(Debug, Clone)]
pub struct RenderedFile {
    pub path: String,
    pub contents: Vec<u8>,
    /// Templates overwrite, placeholders do not.
    pub overwrite: bool,
}

/// Output of the render stage: directories to ensure plus files to write.
/// Directories come first so apply never writes below a missing parent.
#[derive(Debug, Clone)]
pub struct RenderResult {
    pub directories: Vec<String>,
    pub files: Vec<RenderedFile>,
}

/// Existence probe result for a path in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Missing,
    File,
    Directory,
}

/// Summary of what the apply stage did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyReport {
    pub root: String,
    pub created_dirs: usize,
    pub created_placeholders: usize,
    pub skipped_placeholders: usize,
    pub written_templates: usize,
    pub finished_at: DateTime<Utc>,
}

impl ApplyReport {
    pub fn total_entries(&self) -> usize {
        self.created_dirs
            + self.created_placeholders
            + self.skipped_placeholders
            + self.written_templates
    }
}
