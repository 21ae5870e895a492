use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A license plate as supplied by the caller. Never normalized or validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plate(String);

impl Plate {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Plate {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Plate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A plate paired with the raw payload the lookup service returned for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    #[serde(rename = "patente")]
    plate: Plate,
    data: serde_json::Value,
}

impl LookupResult {
    pub fn new(plate: Plate, data: serde_json::Value) -> Self {
        Self { plate, data }
    }

    pub fn plate(&self) -> &Plate {
        &self.plate
    }

    pub fn data(&self) -> &serde_json::Value {
        &self.data
    }
}

/// Successful lookups of one run, in the order the plates were processed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HarvestBatch {
    results: Vec<LookupResult>,
}

impl HarvestBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: LookupResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LookupResult> {
        self.results.iter()
    }

    pub fn plates(&self) -> impl Iterator<Item = &Plate> {
        self.results.iter().map(LookupResult::plate)
    }
}

impl<'a> IntoIterator for &'a HarvestBatch {
    type Item = &'a LookupResult;
    type IntoIter = std::slice::Iter<'a, LookupResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

impl FromIterator<LookupResult> for HarvestBatch {
    fn from_iter<I: IntoIterator<Item = LookupResult>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

/// A plate whose lookup did not make it into the batch, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
    pub plate: Plate,
    pub reason: String,
}

/// Outcome of one harvest run: the batch plus what was attempted and what failed.
#[derive(Debug, Clone, Default)]
pub struct HarvestReport {
    pub attempted: usize,
    pub batch: HarvestBatch,
    pub failures: Vec<LookupFailure>,
}

impl HarvestReport {
    pub fn succeeded(&self) -> usize {
        self.batch.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// The persisted artifact. Field names follow the file format consumed downstream.
///
/// Borrows the batch when written so the caller keeps its results even if the
/// write fails; owns it when read back from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<'a> {
    #[serde(rename = "fecha_extraccion")]
    pub extracted_at: String,
    #[serde(rename = "total_vehiculos")]
    pub total: usize,
    #[serde(rename = "vehiculos")]
    pub vehicles: Cow<'a, HarvestBatch>,
}

impl<'a> Snapshot<'a> {
    pub fn new(batch: &'a HarvestBatch, extracted_at: DateTime<Utc>) -> Self {
        Self {
            extracted_at: extracted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            total: batch.len(),
            vehicles: Cow::Borrowed(batch),
        }
    }

    pub fn file_name(date: NaiveDate) -> String {
        format!("vehiculos_metadata_{}.json", date.format("%Y-%m-%d"))
    }

    pub fn into_batch(self) -> HarvestBatch {
        self.vehicles.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_snapshot_wire_format() {
        let batch: HarvestBatch = vec![LookupResult::new(
            Plate::from("KSLS76"),
            json!({"marca": "TOYOTA", "anio": 2019}),
        )]
        .into_iter()
        .collect();

        let at = Utc.with_ymd_and_hms(2025, 10, 11, 1, 2, 3).unwrap();
        let snapshot = Snapshot::new(&batch, at);
        let value = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(
            value,
            json!({
                "fecha_extraccion": "2025-10-11T01:02:03.000Z",
                "total_vehiculos": 1,
                "vehiculos": [
                    {"patente": "KSLS76", "data": {"marca": "TOYOTA", "anio": 2019}}
                ]
            })
        );
    }

    #[test]
    fn test_total_matches_vehicle_count() {
        let batch: HarvestBatch = ["AAAA11", "BBBB22", "AAAA11"]
            .iter()
            .map(|p| LookupResult::new(Plate::from(*p), json!({})))
            .collect();

        let snapshot = Snapshot::new(&batch, Utc::now());
        assert_eq!(snapshot.total, 3);
        assert_eq!(snapshot.vehicles.len(), snapshot.total);
    }

    #[test]
    fn test_file_name_uses_calendar_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 9).unwrap();
        assert_eq!(Snapshot::file_name(date), "vehiculos_metadata_2025-01-09.json");
    }

    #[test]
    fn test_report_counts() {
        let mut report = HarvestReport {
            attempted: 2,
            ..Default::default()
        };
        report
            .batch
            .push(LookupResult::new(Plate::from("BBBB22"), json!({"ok": true})));
        report.failures.push(LookupFailure {
            plate: Plate::from("AAAA11"),
            reason: "connection refused".to_string(),
        });

        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
    }
}
