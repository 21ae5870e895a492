use crate::core::{HarvestReport, Pipeline};
use crate::utils::error::HarvestError;
use crate::utils::monitor::SystemMonitor;

/// What a completed run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub report: HarvestReport,
    pub output_path: String,
}

/// A run whose snapshot could not be saved. The harvested report is kept.
#[derive(Debug)]
pub struct RunFailure {
    pub report: HarvestReport,
    pub error: HarvestError,
}

pub struct HarvestEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> HarvestEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunSummary, Box<RunFailure>> {
        tracing::info!("🚀 Starting vehicle harvest...");

        let report = match self.pipeline.harvest().await {
            Ok(report) => report,
            Err(error) => {
                return Err(Box::new(RunFailure {
                    report: HarvestReport::default(),
                    error,
                }))
            }
        };
        self.monitor.log_stats("Harvest");

        tracing::info!(
            "📋 Attempted {} plates, recorded {}, skipped {}",
            report.attempted,
            report.succeeded(),
            report.failed()
        );
        for failure in &report.failures {
            tracing::debug!("Skipped {}: {}", failure.plate, failure.reason);
        }

        // 寫檔失敗為致命錯誤，但保留已收集的結果
        let output_path = match self.pipeline.persist(&report.batch).await {
            Ok(path) => path,
            Err(error) => return Err(Box::new(RunFailure { report, error })),
        };
        self.monitor.log_stats("Persist");
        self.monitor.log_final_stats();

        tracing::info!("💾 Snapshot saved to: {}", output_path);

        Ok(RunSummary {
            report,
            output_path,
        })
    }
}
