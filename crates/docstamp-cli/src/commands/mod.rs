//! Subcommand implementations.

pub mod analyze;
pub mod batch;
pub mod config;

use std::path::Path;

use chrono::NaiveDate;

use docstamp_core::{DocstampConfig, DocumentAnalyzer};

/// Load the config file if one was given, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DocstampConfig> {
    match config_path {
        Some(path) => Ok(DocstampConfig::from_file(Path::new(path))?),
        None => Ok(DocstampConfig::default()),
    }
}

/// Analyzer for the loaded config, with an optional pinned reference date.
pub fn build_analyzer(config: DocstampConfig, today: Option<NaiveDate>) -> DocumentAnalyzer {
    let analyzer = DocumentAnalyzer::with_config(config);
    match today {
        Some(today) => analyzer.with_today(today),
        None => analyzer,
    }
}
