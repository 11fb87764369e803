use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// One labelled resume row from the training CSV.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabeledResume {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Resume")]
    pub resume: String,
}

/// Reads a CSV with `Category` and `Resume` header columns. Extra columns are ignored.
pub fn load_dataset(path: &Path) -> Result<Vec<LabeledResume>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open training data at {}", path.display()))?;
    read_dataset(file).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn read_dataset<R: Read>(reader: R) -> Result<Vec<LabeledResume>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for (line, row) in csv_reader.deserialize::<LabeledResume>().enumerate() {
        let record = row.with_context(|| format!("Invalid record at data row {}", line + 1))?;
        records.push(record);
    }
    Ok(records)
}
