pub mod client;
pub mod etl;
pub mod harvest;
pub mod pipeline;
pub mod snapshot;

pub use crate::domain::model::{
    HarvestBatch, HarvestReport, LookupFailure, LookupResult, Plate, Snapshot,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, RecordSource, Storage};
pub use crate::utils::error::Result;
