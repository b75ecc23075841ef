pub mod config;
pub mod core;
pub mod domain;
pub mod templates;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, manifest::ScaffoldManifest};

pub use core::{engine::ScaffoldEngine, pipeline::ScaffoldPipeline, verify::verify_tree};
pub use utils::error::{Result, ScaffoldError};
