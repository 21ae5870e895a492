use clap::Parser;
use std::path::Path;
use vehicle_harvest::core::ConfigProvider;
use vehicle_harvest::utils::error::ErrorSeverity;
use vehicle_harvest::utils::logger::{self, LogFormat};
use vehicle_harvest::utils::validation::Validate;
use vehicle_harvest::{HarvestEngine, HarvestPipeline, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-harvest")]
#[command(about = "Vehicle harvest driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "harvest.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the output directory from config
    #[arg(long)]
    output_path: Option<String>,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// List the plates that would be queried without calling the service
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose, args.log_format);

    tracing::info!("🚀 Starting TOML-based vehicle harvest");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // plates_file 以設定檔所在目錄為基準
    let base_dir = Path::new(&args.config)
        .parent()
        .unwrap_or_else(|| Path::new("."));
    config.resolve_plates(base_dir)?;

    // 應用命令列覆蓋設定
    if let Some(output_path) = args.output_path {
        tracing::info!("🔧 Output path overridden to: {}", output_path);
        config.load.output_path = output_path;
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    display_config_summary(&config, args.dry_run);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No lookups will be made");
        for (index, plate) in config.plates().iter().enumerate() {
            println!("  {:>3}. {}", index + 1, plate);
        }
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path());
    let pipeline = HarvestPipeline::new(storage, &config)?;
    let engine = HarvestEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(summary) => {
            println!(
                "✅ Harvest completed: {} of {} plates recorded",
                summary.report.succeeded(),
                summary.report.attempted
            );
            println!("📁 Output saved to: {}", summary.output_path);
        }
        Err(failure) => {
            let e = &failure.error;
            tracing::error!(
                "❌ Vehicle harvest failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
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

    Ok(())
}

fn display_config_summary(config: &TomlConfig, dry_run: bool) {
    println!("📋 Configuration Summary:");
    if let Some(name) = &config.harvest.name {
        println!("  Harvest: {}", name);
    }
    println!("  Source: {}", config.base_url());
    println!("  Plates: {}", config.plates().len());
    println!("  Output: {}", config.output_path());

    if dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
