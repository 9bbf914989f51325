//! JSON configuration for the command-line tools.
//!
//! Files are flat objects: the stage options of [`CompactorParams`] sit at
//! the top level next to the tool-specific keys, and every stage key is
//! optional.
pub mod report;

use crate::error::{CompactError, Result};
use crate::extractor::CompactorParams;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `drawing_compactor` binary.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    #[serde(flatten)]
    pub params: CompactorParams,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig> {
    load_json(path)
}

pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path).map_err(|e| CompactError::io(path, e))?;
    serde_json::from_str(&contents).map_err(|source| CompactError::Config {
        path: path.to_path_buf(),
        source,
    })
}
