//! Normalize command - turn raw records into CSL-JSON

use anyhow::{Context, Result};
use citegen::{Collection, Dialect, Encoding, GenerationOptions, Normalizer, Record};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::config::Config;

/// Serialization of a record file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Json,
    Yaml,
}

impl RecordFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                RecordFormat::Yaml
            }
            _ => RecordFormat::Json,
        }
    }
}

pub fn execute(
    file: &Path,
    dialect: Option<Dialect>,
    encoding: Option<Encoding>,
    config: Option<&Path>,
) -> Result<()> {
    let config = match config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let options = config.options(dialect, encoding);

    let source = fs::read_to_string(file)
        .with_context(|| format!("Failed to read records from {}", file.display()))?;
    let records = parse_records(&source, RecordFormat::from_path(file))
        .with_context(|| format!("Failed to parse records in {}", file.display()))?;

    info!(
        file = %file.display(),
        records = records.len(),
        dialect = %options.dialect,
        encoding = %options.encoding,
        "normalizing records"
    );

    println!("{}", normalize_records(records, options)?);
    Ok(())
}

pub fn parse_records(source: &str, format: RecordFormat) -> Result<Vec<Record>> {
    let records = match format {
        RecordFormat::Json => serde_json::from_str(source)?,
        RecordFormat::Yaml => serde_yaml::from_str(source)?,
    };
    Ok(records)
}

/// Normalize `records` against each other and render the maps as a JSON array.
pub fn normalize_records(records: Vec<Record>, options: GenerationOptions) -> Result<String> {
    let collection = Collection::with_records(options.dialect, records);
    let normalizer = Normalizer::new(options.dialect, options.encoding);
    let maps = normalizer.normalize_all(collection.records(), &collection);
    Ok(serde_json::to_string_pretty(&maps)?)
}
