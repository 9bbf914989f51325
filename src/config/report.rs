//! Configuration of the `region_report` diagnostic tool.
use super::load_json;
use crate::error::Result;
use crate::extractor::CompactorParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
pub struct ReportConfig {
    pub input_path: PathBuf,
    #[serde(default)]
    pub output: ReportOutput,
    #[serde(flatten)]
    pub params: CompactorParams,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReportOutput {
    /// Where to write the JSON report; printed to stdout when absent.
    pub json_out: Option<PathBuf>,
    /// Receives `analysis.png` and `overlay.png`.
    pub debug_dir: Option<PathBuf>,
    /// Also write the composed canvas here.
    pub compact_out: Option<PathBuf>,
}

pub fn load_report_config(path: &Path) -> Result<ReportConfig> {
    load_json(path)
}
