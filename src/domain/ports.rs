use crate::domain::model::{ApplyReport, PathKind, RenderResult, ScaffoldAction};
use crate::templates::{self, TemplateSpec};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn create_dir(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
    fn probe(&self, path: &str) -> impl std::future::Future<Output = Result<PathKind>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn project_name(&self) -> &str;
    fn output_path(&self) -> &str;
    fn extra_directories(&self) -> &[String];

    /// Directories to create, in creation order. Extras go after the
    /// builtin layout.
    fn directories(&self) -> Vec<String> {
        let mut dirs: Vec<String> = templates::DEFAULT_DIRECTORIES
            .iter()
            .map(|d| d.to_string())
            .collect();
        dirs.extend(self.extra_directories().iter().cloned());
        dirs
    }

    /// Placeholder module files to create empty when absent.
    fn placeholders(&self) -> Vec<String> {
        templates::DEFAULT_PLACEHOLDERS
            .iter()
            .map(|p| p.to_string())
            .collect()
    }

    /// Template files to write with fixed literal content.
    fn templates(&self) -> Vec<TemplateSpec> {
        templates::BUILTIN_TEMPLATES.to_vec()
    }
}

#[async_trait]
pub trait Provision: Send + Sync {
    async fn plan(&self) -> Result<Vec<ScaffoldAction>>;
    async fn render(&self, actions: Vec<ScaffoldAction>) -> Result<RenderResult>;
    async fn apply(&self, result: RenderResult) -> Result<ApplyReport>;
}
