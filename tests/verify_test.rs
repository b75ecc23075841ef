use ele_scaffold::domain::ports::ConfigProvider;
use ele_scaffold::{
    verify_tree, LocalStorage, ScaffoldEngine, ScaffoldManifest, ScaffoldPipeline,
};
use tempfile::TempDir;

async fn scaffold_into(root: &str) -> ScaffoldManifest {
    let toml = format!(
        r#"
[project]
name = "textocorrector-ele"

[layout]
root = "{}"
"#,
        root
    );
    let manifest = ScaffoldManifest::from_toml_str(&toml).unwrap();

    let storage = LocalStorage::new(manifest.output_path().to_string());
    let pipeline = ScaffoldPipeline::new(storage, manifest.clone());
    ScaffoldEngine::new(pipeline).run().await.unwrap();

    manifest
}

#[tokio::test]
async fn test_fresh_scaffold_passes_verification() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = scaffold_into(temp_dir.path().to_str().unwrap()).await;

    let report = verify_tree(&manifest).unwrap();

    assert!(report.is_ok());
    assert_eq!(report.failures(), 0);
    assert!(report.unexpected_entries.is_empty());
    assert_eq!(
        report.checked_directories + report.checked_placeholders + report.checked_templates,
        manifest.directories().len()
            + manifest.placeholders().len()
            + manifest.templates().len()
    );
}

#[tokio::test]
async fn test_verification_rejects_tampered_template() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = scaffold_into(temp_dir.path().to_str().unwrap()).await;

    std::fs::write(
        temp_dir.path().join("requirements.txt"),
        "streamlit==0.1.0\n",
    )
    .unwrap();

    let report = verify_tree(&manifest).unwrap();

    assert!(!report.is_ok());
    assert_eq!(
        report.modified_templates,
        vec!["requirements.txt".to_string()]
    );
}

#[tokio::test]
async fn test_verification_rejects_removed_entries() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = scaffold_into(temp_dir.path().to_str().unwrap()).await;

    std::fs::remove_file(temp_dir.path().join("app.py")).unwrap();
    std::fs::remove_dir_all(temp_dir.path().join("features")).unwrap();

    let report = verify_tree(&manifest).unwrap();

    assert!(!report.is_ok());
    assert!(report
        .missing_placeholders
        .contains(&"app.py".to_string()));
    assert!(report
        .missing_directories
        .contains(&"features".to_string()));
    // Files below the removed directory are missing too
    assert!(report
        .missing_placeholders
        .contains(&"features/correccion.py".to_string()));
}

#[tokio::test]
async fn test_verification_tolerates_user_files() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = scaffold_into(temp_dir.path().to_str().unwrap()).await;

    // Filled-in placeholder and a brand new module
    std::fs::write(temp_dir.path().join("app.py"), "import streamlit\n").unwrap();
    std::fs::write(temp_dir.path().join("utils/new_helper.py"), "pass\n").unwrap();

    let report = verify_tree(&manifest).unwrap();

    assert!(report.is_ok());
    assert_eq!(
        report.unexpected_entries,
        vec!["utils/new_helper.py".to_string()]
    );
}

#[tokio::test]
async fn test_rescaffold_after_damage_restores_verification() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_str().unwrap().to_string();
    let manifest = scaffold_into(&root).await;

    std::fs::remove_dir_all(temp_dir.path().join("ui")).unwrap();
    std::fs::write(temp_dir.path().join(".gitignore"), "broken").unwrap();
    assert!(!verify_tree(&manifest).unwrap().is_ok());

    // Re-running the scaffold repairs the tree
    scaffold_into(&root).await;
    assert!(verify_tree(&manifest).unwrap().is_ok());
}
