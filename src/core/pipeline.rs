use crate::core::{ConfigProvider, PathKind, Provision, Storage};
use crate::domain::model::{
    ActionKind, ApplyReport, RenderResult, RenderedFile, ScaffoldAction,
};
use crate::templates;
use crate::utils::error::{Result, ScaffoldError};
use crate::utils::validation::{validate_no_duplicates, validate_relative_path};
use chrono::Utc;

pub struct ScaffoldPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ScaffoldPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Provision for ScaffoldPipeline<S, C> {
    /// Builds the ordered plan: directories first, then placeholders,
    /// then templates, so no file is written below a missing parent.
    async fn plan(&self) -> Result<Vec<ScaffoldAction>> {
        let dirs = self.config.directories();
        let files = self.config.placeholders();
        let specs = self.config.templates();

        for path in dirs.iter() {
            validate_relative_path("layout.directories", path)?;
        }
        for path in files.iter() {
            validate_relative_path("layout.placeholders", path)?;
        }

        validate_no_duplicates(
            "layout",
            dirs.iter()
                .map(String::as_str)
                .chain(files.iter().map(String::as_str))
                .chain(specs.iter().map(|t| t.path)),
        )?;

        let mut actions = Vec::with_capacity(dirs.len() + files.len() + specs.len());
        actions.extend(dirs.into_iter().map(ScaffoldAction::directory));
        actions.extend(files.into_iter().map(ScaffoldAction::placeholder));
        actions.extend(
            specs
                .into_iter()
                .map(|t| ScaffoldAction::template(t.path, t.name)),
        );

        tracing::debug!("Planned {} scaffold actions", actions.len());
        Ok(actions)
    }

    /// Resolves template bytes and assigns the overwrite policy:
    /// placeholders never overwrite, templates always do.
    async fn render(&self, actions: Vec<ScaffoldAction>) -> Result<RenderResult> {
        let mut directories = Vec::new();
        let mut files = Vec::new();

        for action in actions {
            match action.kind {
                ActionKind::Directory => directories.push(action.path),
                ActionKind::Placeholder => files.push(RenderedFile {
                    path: action.path,
                    contents: Vec::new(),
                    overwrite: false,
                }),
                ActionKind::Template { name } => {
                    let spec = templates::template_by_name(&name)
                        .ok_or(ScaffoldError::UnknownTemplateError { name })?;
                    files.push(RenderedFile {
                        path: action.path,
                        contents: spec.contents.as_bytes().to_vec(),
                        overwrite: true,
                    });
                }
            }
        }

        Ok(RenderResult { directories, files })
    }

    async fn apply(&self, result: RenderResult) -> Result<ApplyReport> {
        let mut created_dirs = 0;
        let mut created_placeholders = 0;
        let mut skipped_placeholders = 0;
        let mut written_templates = 0;

        for dir in &result.directories {
            match self.storage.probe(dir).await? {
                PathKind::File => {
                    return Err(ScaffoldError::PathConflictError {
                        path: dir.clone(),
                        reason: "a file exists where a directory is expected".to_string(),
                    })
                }
                PathKind::Directory => {}
                PathKind::Missing => {
                    self.storage.create_dir(dir).await?;
                    created_dirs += 1;
                    tracing::debug!("Created directory: {}", dir);
                }
            }
        }

        for file in &result.files {
            match self.storage.probe(&file.path).await? {
                PathKind::Directory => {
                    return Err(ScaffoldError::PathConflictError {
                        path: file.path.clone(),
                        reason: "a directory exists where a file is expected".to_string(),
                    })
                }
                PathKind::File => {
                    if file.overwrite {
                        self.storage.write_file(&file.path, &file.contents).await?;
                        written_templates += 1;
                        tracing::debug!("Rewrote template: {}", file.path);
                    } else {
                        skipped_placeholders += 1;
                        tracing::debug!("Kept existing placeholder: {}", file.path);
                    }
                }
                PathKind::Missing => {
                    self.storage.write_file(&file.path, &file.contents).await?;
                    if file.overwrite {
                        written_templates += 1;
                    } else {
                        created_placeholders += 1;
                    }
                    tracing::debug!("Created file: {}", file.path);
                }
            }
        }

        Ok(ApplyReport {
            root: self.config.output_path().to_string(),
            created_dirs,
            created_placeholders,
            skipped_placeholders,
            written_templates,
            finished_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateSpec;
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        dirs: Arc<Mutex<HashSet<String>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
                dirs: Arc::new(Mutex::new(HashSet::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }

        async fn insert_file(&self, path: &str, data: &[u8]) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
        }

        async fn insert_dir(&self, path: &str) {
            let mut dirs = self.dirs.lock().await;
            dirs.insert(path.to_string());
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ScaffoldError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        async fn create_dir(&self, path: &str) -> Result<()> {
            let mut dirs = self.dirs.lock().await;
            dirs.insert(path.to_string());
            Ok(())
        }

        async fn probe(&self, path: &str) -> Result<PathKind> {
            let dirs = self.dirs.lock().await;
            if dirs.contains(path) {
                return Ok(PathKind::Directory);
            }
            let files = self.files.lock().await;
            if files.contains_key(path) {
                return Ok(PathKind::File);
            }
            Ok(PathKind::Missing)
        }
    }

    struct MockConfig {
        output_path: String,
        extra_dirs: Vec<String>,
        directories: Vec<String>,
        placeholders: Vec<String>,
        templates: Vec<TemplateSpec>,
    }

    impl MockConfig {
        fn small() -> Self {
            Self {
                output_path: "test_output".to_string(),
                extra_dirs: vec![],
                directories: vec!["config".to_string(), "assets/css".to_string()],
                placeholders: vec!["app.py".to_string(), "config/settings.py".to_string()],
                templates: vec![*crate::templates::template_by_name("gitignore").unwrap()],
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn project_name(&self) -> &str {
            "test-project"
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn extra_directories(&self) -> &[String] {
            &self.extra_dirs
        }

        fn directories(&self) -> Vec<String> {
            self.directories.clone()
        }

        fn placeholders(&self) -> Vec<String> {
            self.placeholders.clone()
        }

        fn templates(&self) -> Vec<TemplateSpec> {
            self.templates.clone()
        }
    }

    #[tokio::test]
    async fn test_plan_orders_dirs_then_placeholders_then_templates() {
        let pipeline = ScaffoldPipeline::new(MockStorage::new(), MockConfig::small());

        let actions = pipeline.plan().await.unwrap();

        assert_eq!(actions.len(), 5);
        assert_eq!(actions[0], ScaffoldAction::directory("config"));
        assert_eq!(actions[1], ScaffoldAction::directory("assets/css"));
        assert_eq!(actions[2], ScaffoldAction::placeholder("app.py"));
        assert_eq!(actions[4], ScaffoldAction::template(".gitignore", "gitignore"));
    }

    #[tokio::test]
    async fn test_plan_rejects_duplicate_paths() {
        let mut config = MockConfig::small();
        config.placeholders.push("app.py".to_string());
        let pipeline = ScaffoldPipeline::new(MockStorage::new(), config);

        let err = pipeline.plan().await.unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::InvalidConfigValueError { .. }
        ));
    }

    #[tokio::test]
    async fn test_plan_rejects_escaping_path() {
        let mut config = MockConfig::small();
        config.placeholders.push("../outside.py".to_string());
        let pipeline = ScaffoldPipeline::new(MockStorage::new(), config);

        assert!(pipeline.plan().await.is_err());
    }

    #[tokio::test]
    async fn test_render_assigns_overwrite_policy() {
        let pipeline = ScaffoldPipeline::new(MockStorage::new(), MockConfig::small());

        let actions = pipeline.plan().await.unwrap();
        let rendered = pipeline.render(actions).await.unwrap();

        assert_eq!(rendered.directories.len(), 2);
        assert_eq!(rendered.files.len(), 3);

        let placeholder = rendered.files.iter().find(|f| f.path == "app.py").unwrap();
        assert!(!placeholder.overwrite);
        assert!(placeholder.contents.is_empty());

        let template = rendered.files.iter().find(|f| f.path == ".gitignore").unwrap();
        assert!(template.overwrite);
        assert_eq!(template.contents, crate::templates::GITIGNORE.as_bytes());
    }

    #[tokio::test]
    async fn test_render_unknown_template_fails() {
        let pipeline = ScaffoldPipeline::new(MockStorage::new(), MockConfig::small());

        let actions = vec![ScaffoldAction::template("x.txt", "no-such-template")];
        let err = pipeline.render(actions).await.unwrap_err();

        assert!(matches!(err, ScaffoldError::UnknownTemplateError { .. }));
    }

    #[tokio::test]
    async fn test_apply_creates_everything_on_fresh_storage() {
        let storage = MockStorage::new();
        let pipeline = ScaffoldPipeline::new(storage.clone(), MockConfig::small());

        let actions = pipeline.plan().await.unwrap();
        let rendered = pipeline.render(actions).await.unwrap();
        let report = pipeline.apply(rendered).await.unwrap();

        assert_eq!(report.created_dirs, 2);
        assert_eq!(report.created_placeholders, 2);
        assert_eq!(report.skipped_placeholders, 0);
        assert_eq!(report.written_templates, 1);
        assert_eq!(report.root, "test_output");

        // Placeholders are zero bytes
        assert_eq!(storage.get_file("app.py").await.unwrap(), Vec::<u8>::new());
        // Template bytes are the literal
        assert_eq!(
            storage.get_file(".gitignore").await.unwrap(),
            crate::templates::GITIGNORE.as_bytes()
        );
    }

    #[tokio::test]
    async fn test_apply_keeps_existing_placeholder_content() {
        let storage = MockStorage::new();
        storage.insert_file("app.py", b"import streamlit").await;

        let pipeline = ScaffoldPipeline::new(storage.clone(), MockConfig::small());

        let actions = pipeline.plan().await.unwrap();
        let rendered = pipeline.render(actions).await.unwrap();
        let report = pipeline.apply(rendered).await.unwrap();

        assert_eq!(report.created_placeholders, 1);
        assert_eq!(report.skipped_placeholders, 1);
        assert_eq!(
            storage.get_file("app.py").await.unwrap(),
            b"import streamlit"
        );
    }

    #[tokio::test]
    async fn test_apply_restores_tampered_template() {
        let storage = MockStorage::new();
        storage.insert_file(".gitignore", b"tampered").await;

        let pipeline = ScaffoldPipeline::new(storage.clone(), MockConfig::small());

        let actions = pipeline.plan().await.unwrap();
        let rendered = pipeline.render(actions).await.unwrap();
        let report = pipeline.apply(rendered).await.unwrap();

        assert_eq!(report.written_templates, 1);
        assert_eq!(
            storage.get_file(".gitignore").await.unwrap(),
            crate::templates::GITIGNORE.as_bytes()
        );
    }

    #[tokio::test]
    async fn test_apply_is_idempotent_over_mock_storage() {
        let storage = MockStorage::new();
        let pipeline = ScaffoldPipeline::new(storage.clone(), MockConfig::small());

        let first = pipeline
            .apply(pipeline.render(pipeline.plan().await.unwrap()).await.unwrap())
            .await
            .unwrap();
        let second = pipeline
            .apply(pipeline.render(pipeline.plan().await.unwrap()).await.unwrap())
            .await
            .unwrap();

        assert_eq!(first.created_dirs, 2);
        assert_eq!(second.created_dirs, 0);
        assert_eq!(second.created_placeholders, 0);
        assert_eq!(second.skipped_placeholders, 2);
        // Templates rewrite every run
        assert_eq!(second.written_templates, 1);
    }

    #[tokio::test]
    async fn test_apply_fails_when_file_blocks_directory() {
        let storage = MockStorage::new();
        storage.insert_file("config", b"not a directory").await;

        let pipeline = ScaffoldPipeline::new(storage, MockConfig::small());

        let actions = pipeline.plan().await.unwrap();
        let rendered = pipeline.render(actions).await.unwrap();
        let err = pipeline.apply(rendered).await.unwrap_err();

        assert!(matches!(err, ScaffoldError::PathConflictError { .. }));
    }

    #[tokio::test]
    async fn test_apply_fails_when_directory_blocks_placeholder() {
        let storage = MockStorage::new();
        storage.insert_dir("app.py").await;

        let pipeline = ScaffoldPipeline::new(storage, MockConfig::small());

        let actions = pipeline.plan().await.unwrap();
        let rendered = pipeline.render(actions).await.unwrap();
        let err = pipeline.apply(rendered).await.unwrap_err();

        match err {
            ScaffoldError::PathConflictError { path, .. } => assert_eq!(path, "app.py"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
