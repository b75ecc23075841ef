use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

/// Outcome of checking a scaffolded tree against its layout.
///
/// Missing directories/placeholders and modified templates are failures;
/// unexpected entries are reported but never fail the check, since a
/// scaffolded project is meant to grow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyReport {
    pub root: String,
    pub checked_directories: usize,
    pub checked_placeholders: usize,
    pub checked_templates: usize,
    pub missing_directories: Vec<String>,
    pub missing_placeholders: Vec<String>,
    pub modified_templates: Vec<String>,
    pub unexpected_entries: Vec<String>,
    pub verified_at: DateTime<Utc>,
}

impl VerifyReport {
    pub fn failures(&self) -> usize {
        self.missing_directories.len()
            + self.missing_placeholders.len()
            + self.modified_templates.len()
    }

    pub fn is_ok(&self) -> bool {
        self.failures() == 0
    }
}

/// Checks the tree below `config.output_path()`:
/// every directory exists, every placeholder exists, every template
/// matches its literal content byte-for-byte.
pub fn verify_tree<C: ConfigProvider>(config: &C) -> Result<VerifyReport> {
    let root = Path::new(config.output_path());

    let directories = config.directories();
    let placeholders = config.placeholders();
    let specs = config.templates();

    let mut missing_directories = Vec::new();
    let mut missing_placeholders = Vec::new();
    let mut modified_templates = Vec::new();

    for dir in &directories {
        if !root.join(dir).is_dir() {
            missing_directories.push(dir.clone());
        }
    }

    for file in &placeholders {
        if !root.join(file).is_file() {
            missing_placeholders.push(file.clone());
        }
    }

    for spec in &specs {
        match std::fs::read(root.join(spec.path)) {
            Ok(bytes) if bytes == spec.contents.as_bytes() => {}
            _ => modified_templates.push(spec.path.to_string()),
        }
    }

    let expected: HashSet<String> = directories
        .iter()
        .cloned()
        .chain(placeholders.iter().cloned())
        .chain(specs.iter().map(|t| t.path.to_string()))
        .collect();

    let mut unexpected_entries = Vec::new();
    if root.is_dir() {
        for entry in WalkDir::new(root).min_depth(1) {
            let entry = entry.map_err(|e| {
                std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
            })?;
            let rel = entry
                .path()
                .strip_prefix(root)
                .expect("walked entry is below root")
                .to_string_lossy()
                .to_string();
            if !expected.contains(&rel) {
                unexpected_entries.push(rel);
            }
        }
        unexpected_entries.sort();
    }

    let report = VerifyReport {
        root: config.output_path().to_string(),
        checked_directories: directories.len(),
        checked_placeholders: placeholders.len(),
        checked_templates: specs.len(),
        missing_directories,
        missing_placeholders,
        modified_templates,
        unexpected_entries,
        verified_at: Utc::now(),
    };

    tracing::debug!(
        "Verified {}: {} failure(s), {} unexpected entr(ies)",
        report.root,
        report.failures(),
        report.unexpected_entries.len()
    );

    Ok(report)
}
