use crate::domain::model::{HarvestBatch, HarvestReport, LookupResult, Plate};
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;
use std::path::PathBuf;

pub trait Storage: Send + Sync {
    /// Where `name` lands when written; used for reporting.
    fn full_path(&self, name: &str) -> PathBuf;

    fn read_file(&self, name: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;

    /// Replaces `name` as a whole or leaves the previous content untouched.
    fn write_file(
        &self,
        name: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn api_key(&self) -> &str;
    fn output_path(&self) -> &str;
    fn plates(&self) -> &[String];
}

/// One lookup per call, no retry.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self, plate: &Plate) -> std::result::Result<LookupResult, LookupError>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn harvest(&self) -> Result<HarvestReport>;
    async fn persist(&self, batch: &HarvestBatch) -> Result<String>;
}
