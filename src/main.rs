use clap::Parser;
use vehicle_harvest::core::ConfigProvider;
use vehicle_harvest::utils::error::{ErrorSeverity, HarvestError};
use vehicle_harvest::utils::{logger, validation::Validate};
use vehicle_harvest::{CliConfig, HarvestEngine, HarvestPipeline, LocalStorage};

fn exit_with(e: &HarvestError) -> ! {
    tracing::error!(
        "❌ Vehicle harvest failed: {} (Category: {:?}, Severity: {:?})",
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
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose, config.log_format);

    tracing::info!("Starting vehicle-harvest CLI");

    if let Err(e) = config.resolve_plates() {
        exit_with(&e);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    if config.plates().is_empty() {
        tracing::warn!("No plates given; an empty snapshot will be written");
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path());
    let pipeline = match HarvestPipeline::new(storage, &config) {
        Ok(pipeline) => pipeline,
        Err(e) => exit_with(&e),
    };

    let engine = HarvestEngine::new_with_monitoring(pipeline, config.monitor);

    match engine.run().await {
        Ok(summary) => {
            let report = &summary.report;
            println!(
                "✅ Harvest completed: {} of {} plates recorded",
                report.succeeded(),
                report.attempted
            );
            for failure in &report.failures {
                println!("   ⚠️ {}: {}", failure.plate, failure.reason);
            }
            println!("📁 Output saved to: {}", summary.output_path);
        }
        Err(failure) => {
            eprintln!(
                "Collected {} of {} plates before the snapshot could be saved",
                failure.report.succeeded(),
                failure.report.attempted
            );
            exit_with(&failure.error);
        }
    }

    Ok(())
}
