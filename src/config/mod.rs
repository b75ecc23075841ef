pub mod cli;
pub mod manifest;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    self, validate_project_name, validate_relative_path, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "ele-scaffold")]
#[command(about = "Scaffolds the Textocorrector ELE project skeleton")]
pub struct CliConfig {
    #[arg(long, default_value = "./textocorrector-ele")]
    pub output_path: String,

    #[arg(long, default_value = "textocorrector-ele")]
    pub project_name: String,

    #[arg(long, value_delimiter = ',')]
    pub extra_dirs: Vec<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process resource usage per stage")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn extra_directories(&self) -> &[String] {
        &self.extra_dirs
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_project_name("project_name", &self.project_name)?;
        validation::validate_non_empty_string("output_path", &self.output_path)?;

        for dir in &self.extra_dirs {
            validate_relative_path("extra_dirs", dir)?;
        }

        Ok(())
    }
}
