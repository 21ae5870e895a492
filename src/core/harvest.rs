use crate::core::{HarvestBatch, HarvestReport, LookupFailure, Plate, RecordSource};

/// Drives the record source over a plate list, one lookup at a time.
pub struct Harvester<R: RecordSource> {
    source: R,
}

impl<R: RecordSource> Harvester<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Always consumes every plate. Failed lookups are reported, never fatal.
    pub async fn run(&self, plates: &[Plate]) -> HarvestReport {
        let mut batch = HarvestBatch::new();
        let mut failures = Vec::new();

        for (index, plate) in plates.iter().enumerate() {
            tracing::info!("🔎 Querying plate {} ({}/{})", plate, index + 1, plates.len());

            // 依序處理，下一筆要等這筆結束
            match self.source.fetch(plate).await {
                Ok(result) => batch.push(result),
                Err(e) => {
                    tracing::warn!("⚠️ Skipping plate {}: {}", plate, e);
                    failures.push(LookupFailure {
                        plate: plate.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        HarvestReport {
            attempted: plates.len(),
            batch,
            failures,
        }
    }
}
