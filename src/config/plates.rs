use crate::utils::error::Result;
use std::io::Read;
use std::path::Path;

const HEADER_NAMES: [&str; 2] = ["patente", "plate"];

/// Reads a plate list: a CSV whose `patente`/`plate` column holds the plates,
/// or a plain list taking the first column of every row. File order is kept.
pub fn load_plates_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = std::fs::File::open(path.as_ref())?;
    read_plates(file)
}

pub fn read_plates<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut plates = Vec::new();
    let mut column = 0;

    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;

        if row == 0 {
            let header = record
                .iter()
                .position(|field| HEADER_NAMES.contains(&field.to_lowercase().as_str()));
            if let Some(index) = header {
                column = index;
                continue;
            }
        }

        match record.get(column) {
            Some(plate) if !plate.is_empty() => plates.push(plate.to_string()),
            _ => tracing::debug!("Skipping blank row {} in plate list", row + 1),
        }
    }

    Ok(plates)
}
