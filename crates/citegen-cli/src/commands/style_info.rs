//! Style-info command - print metadata of style definitions

use anyhow::{Context, Result};
use citegen_style::{StyleCache, StyleInfo};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Serialize)]
struct StyleReport<'a> {
    name: &'a str,
    numeric: bool,
    #[serde(flatten)]
    info: &'a StyleInfo,
}

pub fn execute(files: &[PathBuf]) -> Result<()> {
    println!("{}", describe(files)?);
    Ok(())
}

/// Load each style once and render the metadata as a JSON array.
pub fn describe(files: &[PathBuf]) -> Result<String> {
    let mut cache = StyleCache::new();
    for file in files {
        let name = file.display().to_string();
        cache
            .get_or_load(&name, || fs::read_to_string(file))
            .with_context(|| format!("Failed to load style {}", name))?;
    }
    info!(styles = cache.len(), "loaded citation styles");

    let styles: Vec<_> = cache.names().filter_map(|name| cache.get(name)).collect();
    let reports: Vec<_> = styles
        .iter()
        .map(|style| StyleReport {
            name: style.name(),
            numeric: style.is_numeric(),
            info: style.info(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&reports)?)
}
