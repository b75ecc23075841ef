use crate::core::Provision;
use crate::domain::model::ApplyReport;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct ScaffoldEngine<P: Provision> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Provision> ScaffoldEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(enabled),
        }
    }

    pub async fn run(&self) -> Result<ApplyReport> {
        println!("Starting scaffold process...");

        // Plan
        println!("Planning layout...");
        let actions = self.pipeline.plan().await?;
        println!("Planned {} entries", actions.len());
        self.monitor.log_stats("Plan");

        // Render
        println!("Rendering templates...");
        let rendered = self.pipeline.render(actions).await?;
        println!(
            "Rendered {} files across {} directories",
            rendered.files.len(),
            rendered.directories.len()
        );
        self.monitor.log_stats("Render");

        // Apply
        println!("Applying to filesystem...");
        let report = self.pipeline.apply(rendered).await?;
        println!(
            "Created {} directories, {} placeholders ({} kept as-is), wrote {} templates",
            report.created_dirs,
            report.created_placeholders,
            report.skipped_placeholders,
            report.written_templates
        );
        self.monitor.log_final_stats();

        Ok(report)
    }
}
