use crate::core::client::RecordClient;
use crate::core::harvest::Harvester;
use crate::core::snapshot::SnapshotWriter;
use crate::core::{
    ConfigProvider, HarvestBatch, HarvestReport, Pipeline, Plate, RecordSource, Storage,
};
use crate::utils::error::Result;

/// Plate list from the config, lookups through `R`, snapshot into `S`.
pub struct HarvestPipeline<R: RecordSource, S: Storage> {
    harvester: Harvester<R>,
    writer: SnapshotWriter<S>,
    plates: Vec<Plate>,
}

impl<S: Storage> HarvestPipeline<RecordClient, S> {
    pub fn new<C: ConfigProvider>(storage: S, config: &C) -> Result<Self> {
        let client = RecordClient::new(config.base_url(), config.api_key())?;
        Ok(Self::with_source(client, storage, config))
    }
}

impl<R: RecordSource, S: Storage> HarvestPipeline<R, S> {
    pub fn with_source<C: ConfigProvider>(source: R, storage: S, config: &C) -> Self {
        Self {
            harvester: Harvester::new(source),
            writer: SnapshotWriter::new(storage),
            plates: config.plates().iter().cloned().map(Plate::from).collect(),
        }
    }

    pub fn plates(&self) -> &[Plate] {
        &self.plates
    }
}

#[async_trait::async_trait]
impl<R: RecordSource, S: Storage> Pipeline for HarvestPipeline<R, S> {
    async fn harvest(&self) -> Result<HarvestReport> {
        tracing::debug!("Harvesting {} plates", self.plates.len());
        Ok(self.harvester.run(&self.plates).await)
    }

    async fn persist(&self, batch: &HarvestBatch) -> Result<String> {
        self.writer.write(batch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LookupResult;
    use crate::utils::error::{HarvestError, LookupError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct EchoSource;

    #[async_trait]
    impl RecordSource for EchoSource {
        async fn fetch(&self, plate: &Plate) -> std::result::Result<LookupResult, LookupError> {
            Ok(LookupResult::new(plate.clone(), json!({"echo": plate.as_str()})))
        }
    }

    #[derive(Clone, Default)]
    struct MockStorage {
        written: Arc<Mutex<Vec<String>>>,
    }

    impl Storage for MockStorage {
        fn full_path(&self, name: &str) -> PathBuf {
            PathBuf::from(name)
        }

        async fn read_file(&self, name: &str) -> Result<Vec<u8>> {
            Err(HarvestError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                name.to_string(),
            )))
        }

        async fn write_file(&self, name: &str, _data: &[u8]) -> Result<()> {
            self.written.lock().await.push(name.to_string());
            Ok(())
        }
    }

    struct MockConfig {
        plates: Vec<String>,
    }

    impl ConfigProvider for MockConfig {
        fn base_url(&self) -> &str {
            "http://localhost"
        }

        fn api_key(&self) -> &str {
            "k"
        }

        fn output_path(&self) -> &str {
            "."
        }

        fn plates(&self) -> &[String] {
            &self.plates
        }
    }

    #[tokio::test]
    async fn test_harvest_then_persist() {
        let storage = MockStorage::default();
        let config = MockConfig {
            plates: vec!["AAAA11".to_string(), "BBBB22".to_string()],
        };
        let pipeline = HarvestPipeline::with_source(EchoSource, storage.clone(), &config);

        let report = pipeline.harvest().await.unwrap();
        assert_eq!(report.attempted, 2);
        assert_eq!(report.succeeded(), 2);

        let path = pipeline.persist(&report.batch).await.unwrap();
        assert!(path.starts_with("vehiculos_metadata_"));
        assert_eq!(storage.written.lock().await.len(), 1);
    }

    #[test]
    fn test_new_builds_client_from_config() {
        let config = MockConfig {
            plates: vec!["KSLS76".to_string()],
        };
        let pipeline = HarvestPipeline::new(MockStorage::default(), &config).unwrap();
        assert_eq!(pipeline.plates(), [Plate::from("KSLS76")]);
    }
}
