use crate::domain::ports::ConfigProvider;
use crate::templates::{self, TemplateSpec};
use crate::utils::error::{Result, ScaffoldError};
use crate::utils::validation::{
    validate_no_duplicates, validate_non_empty_string, validate_project_name,
    validate_relative_path, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// TOML manifest describing a scaffold run. Every section except
/// `[project]` and `[layout]` is optional; the defaults reproduce the
/// builtin Textocorrector ELE skeleton.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaffoldManifest {
    pub project: ProjectSection,
    pub layout: LayoutSection,
    pub templates: Option<TemplatesSection>,
    pub options: Option<OptionsSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSection {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSection {
    pub root: String,
    /// Full replacement for the builtin directory list.
    pub directories: Option<Vec<String>>,
    /// Full replacement for the builtin placeholder list.
    pub placeholders: Option<Vec<String>>,
    /// Appended to whichever directory list is in effect.
    pub extra_directories: Option<Vec<String>>,
}

/// Per-template toggles; a missing entry means enabled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplatesSection {
    pub requirements: Option<bool>,
    pub secrets: Option<bool>,
    pub dotenv: Option<bool>,
    pub gitignore: Option<bool>,
    pub stylesheet: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionsSection {
    pub monitoring: Option<bool>,
    pub verify_after: Option<bool>,
}

impl Default for ScaffoldManifest {
    fn default() -> Self {
        Self {
            project: ProjectSection {
                name: "textocorrector-ele".to_string(),
                description: Some(
                    "Herramienta de corrección y aprendizaje para Español como Lengua Extranjera"
                        .to_string(),
                ),
                version: Some("1.0.0".to_string()),
            },
            layout: LayoutSection {
                root: "./textocorrector-ele".to_string(),
                directories: None,
                placeholders: None,
                extra_directories: None,
            },
            templates: None,
            options: None,
        }
    }
}

impl ScaffoldManifest {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScaffoldError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScaffoldError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` occurrences with environment values.
    /// Unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_project_name("project.name", &self.project.name)?;
        validate_non_empty_string("layout.root", &self.layout.root)?;

        for dir in self.directories() {
            validate_relative_path("layout.directories", &dir)?;
        }
        for file in self.placeholders() {
            validate_relative_path("layout.placeholders", &file)?;
        }

        let dirs = self.directories();
        let files = self.placeholders();
        let template_paths: Vec<&str> = self.templates().iter().map(|t| t.path).collect();
        validate_no_duplicates(
            "layout",
            dirs.iter()
                .map(String::as_str)
                .chain(files.iter().map(String::as_str))
                .chain(template_paths),
        )?;

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.options
            .as_ref()
            .and_then(|o| o.monitoring)
            .unwrap_or(false)
    }

    pub fn verify_after(&self) -> bool {
        self.options
            .as_ref()
            .and_then(|o| o.verify_after)
            .unwrap_or(false)
    }

    fn template_enabled(&self, name: &str) -> bool {
        let Some(section) = &self.templates else {
            return true;
        };
        let flag = match name {
            "requirements" => section.requirements,
            "secrets" => section.secrets,
            "dotenv" => section.dotenv,
            "gitignore" => section.gitignore,
            "stylesheet" => section.stylesheet,
            _ => None,
        };
        flag.unwrap_or(true)
    }

    /// Starter manifest for `manifest-scaffold --example`.
    pub fn example_manifest() -> &'static str {
        r#"# ele-scaffold manifest
# Run with: manifest-scaffold --config ele-scaffold.toml

[project]
name = "textocorrector-ele"
description = "Herramienta de corrección para Español como Lengua Extranjera"
version = "1.0.0"

[layout]
root = "./textocorrector-ele"
# directories / placeholders default to the builtin application skeleton.
# Uncomment to replace them entirely:
# directories = ["config", "core", "ui"]
# placeholders = ["app.py", "config/settings.py"]
extra_directories = []

[templates]
# Each builtin template can be disabled individually.
requirements = true
secrets = true
dotenv = true
gitignore = true
stylesheet = true

[options]
monitoring = false
verify_after = true
"#
    }
}

impl ConfigProvider for ScaffoldManifest {
    fn project_name(&self) -> &str {
        &self.project.name
    }

    fn output_path(&self) -> &str {
        &self.layout.root
    }

    fn extra_directories(&self) -> &[String] {
        self.layout.extra_directories.as_deref().unwrap_or(&[])
    }

    fn directories(&self) -> Vec<String> {
        let mut dirs = match &self.layout.directories {
            Some(dirs) => dirs.clone(),
            None => templates::DEFAULT_DIRECTORIES
                .iter()
                .map(|d| d.to_string())
                .collect(),
        };
        dirs.extend(self.extra_directories().iter().cloned());
        dirs
    }

    fn placeholders(&self) -> Vec<String> {
        match &self.layout.placeholders {
            Some(files) => files.clone(),
            None => templates::DEFAULT_PLACEHOLDERS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }

    fn templates(&self) -> Vec<TemplateSpec> {
        templates::BUILTIN_TEMPLATES
            .iter()
            .filter(|t| self.template_enabled(t.name))
            .copied()
            .collect()
    }
}

impl Validate for ScaffoldManifest {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
