use crate::utils::error::{Result, ScaffoldError};
use std::collections::HashSet;
use std::path::Component;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScaffoldError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_project_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;

    let mut chars = name.chars();
    let first = chars.next().unwrap();
    if !first.is_ascii_alphanumeric() {
        return Err(ScaffoldError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Project name must start with a letter or digit".to_string(),
        });
    }

    if let Some(bad) = name
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '_')
    {
        return Err(ScaffoldError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: format!("Unsupported character in project name: '{}'", bad),
        });
    }

    Ok(())
}

/// Paths inside a scaffold layout must stay below the output root.
pub fn validate_relative_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ScaffoldError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ScaffoldError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    for component in std::path::Path::new(path).components() {
        match component {
            Component::Normal(_) => {}
            Component::ParentDir => {
                return Err(ScaffoldError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: path.to_string(),
                    reason: "Path must not contain '..' components".to_string(),
                })
            }
            _ => {
                return Err(ScaffoldError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: path.to_string(),
                    reason: "Path must be relative".to_string(),
                })
            }
        }
    }

    Ok(())
}

pub fn validate_no_duplicates<'a, I>(field_name: &str, paths: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for path in paths {
        if !seen.insert(path) {
            return Err(ScaffoldError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: path.to_string(),
                reason: "Duplicate path in layout".to_string(),
            });
        }
    }
    Ok(())
}
