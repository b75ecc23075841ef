use anyhow::Result;
use clap::Parser;
use ele_scaffold::core::verify::verify_tree;
use ele_scaffold::domain::ports::ConfigProvider;
use ele_scaffold::utils::error::ErrorSeverity;
use ele_scaffold::utils::{logger, validation::Validate};
use ele_scaffold::{LocalStorage, ScaffoldEngine, ScaffoldManifest, ScaffoldPipeline};

#[derive(Parser)]
#[command(name = "manifest-scaffold")]
#[command(about = "Scaffold tool driven by a TOML manifest")]
struct Args {
    /// Path to the TOML manifest file
    #[arg(short, long, default_value = "ele-scaffold.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from the manifest
    #[arg(long)]
    monitor: Option<bool>,

    /// Dry run - show what would be created without touching the filesystem
    #[arg(long)]
    dry_run: bool,

    /// Verify the tree after scaffolding
    #[arg(long)]
    verify: bool,

    /// Print a starter manifest and exit
    #[arg(long)]
    example: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.example {
        println!("{}", ScaffoldManifest::example_manifest());
        return Ok(());
    }

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting manifest-driven scaffold");
    tracing::info!("📁 Loading manifest from: {}", args.config);

    let manifest = match ScaffoldManifest::from_file(&args.config) {
        Ok(manifest) => manifest,
        Err(e) => {
            eprintln!("❌ Failed to load manifest '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            eprintln!("💡 Run with --example to print a starter manifest");
            std::process::exit(1);
        }
    };

    if let Err(e) = manifest.validate() {
        tracing::error!("❌ Manifest validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Manifest loaded and validated successfully");

    display_manifest_summary(&manifest, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No filesystem changes will occur");
        perform_dry_run(&manifest);
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| manifest.monitoring_enabled());

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let verify_requested = args.verify || manifest.verify_after();

    let storage = LocalStorage::new(manifest.output_path().to_string());
    let pipeline = ScaffoldPipeline::new(storage, manifest.clone());

    let engine = ScaffoldEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(report) => {
            tracing::info!("✅ Scaffold completed successfully!");
            tracing::info!("📁 Project skeleton at: {}", report.root);
            println!("✅ Scaffold completed successfully!");
            println!("📁 Project skeleton at: {}", report.root);
        }
        Err(e) => {
            tracing::error!(
                "❌ Scaffold failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    if verify_requested {
        println!();
        println!("🔎 Verifying scaffolded tree...");
        let report = verify_tree(&manifest)?;

        println!(
            "  Checked: {} directories, {} placeholders, {} templates",
            report.checked_directories, report.checked_placeholders, report.checked_templates
        );

        for dir in &report.missing_directories {
            println!("  ❌ Missing directory: {}", dir);
        }
        for file in &report.missing_placeholders {
            println!("  ❌ Missing placeholder: {}", file);
        }
        for file in &report.modified_templates {
            println!("  ❌ Template differs from literal content: {}", file);
        }
        for entry in &report.unexpected_entries {
            println!("  ℹ️ Unexpected entry (not a failure): {}", entry);
        }

        if args.verbose {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        if report.is_ok() {
            println!("✅ Verification passed");
        } else {
            eprintln!("❌ Verification failed: {} check(s) did not pass", report.failures());
            std::process::exit(1);
        }
    }

    Ok(())
}

fn display_manifest_summary(manifest: &ScaffoldManifest, args: &Args) {
    use ele_scaffold::domain::ports::ConfigProvider;

    println!("📋 Manifest Summary:");
    println!(
        "  Project: {} v{}",
        manifest.project.name,
        manifest.project.version.as_deref().unwrap_or("0.0.0")
    );
    if let Some(description) = &manifest.project.description {
        println!("  Description: {}", description);
    }
    println!("  Root: {}", manifest.output_path());
    println!("  Directories: {}", manifest.directories().len());
    println!("  Placeholders: {}", manifest.placeholders().len());
    println!(
        "  Templates: {}",
        manifest
            .templates()
            .iter()
            .map(|t| t.name)
            .collect::<Vec<_>>()
            .join(", ")
    );

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(manifest: &ScaffoldManifest) {
    use ele_scaffold::domain::ports::ConfigProvider;

    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📂 Directories to ensure:");
    for dir in manifest.directories() {
        println!("  {}/", dir);
    }

    println!();
    println!("📄 Placeholders (created empty when absent, never overwritten):");
    for file in manifest.placeholders() {
        println!("  {}", file);
    }

    println!();
    println!("📝 Templates (written with fixed literal content on every run):");
    for spec in manifest.templates() {
        println!("  {} ({} bytes)", spec.path, spec.contents.len());
    }

    println!();
    println!("✅ Dry run analysis complete. Re-run without --dry-run to apply.");
}
