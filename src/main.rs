use clap::Parser;
use ele_scaffold::utils::{logger, validation::Validate};
use ele_scaffold::{CliConfig, LocalStorage, ScaffoldEngine, ScaffoldPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting ele-scaffold CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = ScaffoldPipeline::new(storage, config);

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
                ele_scaffold::utils::error::ErrorSeverity::Low => 0,
                ele_scaffold::utils::error::ErrorSeverity::Medium => 2,
                ele_scaffold::utils::error::ErrorSeverity::High => 1,
                ele_scaffold::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
