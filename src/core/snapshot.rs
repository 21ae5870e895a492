use crate::core::{HarvestBatch, Snapshot, Storage};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};

pub struct SnapshotWriter<S: Storage> {
    storage: S,
}

impl<S: Storage> SnapshotWriter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Stamps the batch with the current time and writes today's snapshot.
    pub async fn write(&self, batch: &HarvestBatch) -> Result<String> {
        self.write_at(batch, Utc::now()).await
    }

    /// Same-day writes share a file name, so a later run replaces the earlier one.
    pub async fn write_at(&self, batch: &HarvestBatch, now: DateTime<Utc>) -> Result<String> {
        let file_name = Snapshot::file_name(now.date_naive());
        let snapshot = Snapshot::new(batch, now);

        let json = serde_json::to_string_pretty(&snapshot)?;

        tracing::debug!(
            "Writing snapshot {} ({} vehicles, {} bytes)",
            file_name,
            snapshot.total,
            json.len()
        );
        self.storage.write_file(&file_name, json.as_bytes()).await?;

        Ok(self.storage.full_path(&file_name).display().to_string())
    }

    pub async fn read(&self, file_name: &str) -> Result<Snapshot<'static>> {
        let bytes = self.storage.read_file(file_name).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
