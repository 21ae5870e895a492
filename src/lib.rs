pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use core::{
    client::RecordClient,
    etl::{HarvestEngine, RunFailure, RunSummary},
    harvest::Harvester,
    pipeline::HarvestPipeline,
    snapshot::SnapshotWriter,
};
pub use domain::model::{HarvestBatch, HarvestReport, LookupFailure, LookupResult, Plate, Snapshot};
pub use utils::error::{HarvestError, LookupError, Result};
