//! File and directory front-ends for the extractor.
//!
//! These are the only places where the pass-through contract touches disk:
//! when the input cannot be decoded or nothing is found, the output file is a
//! byte copy of the input.
use super::pipeline::{CompactOutcome, DenseRegionExtractor, PassThroughReason};
use crate::diagnostics::ExtractionReport;
use crate::error::{CompactError, Result};
use crate::image::io::{decode_raster, ensure_parent_dir, save_raster};
use log::{error, info, warn};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// What happened to one file.
#[derive(Clone, Debug)]
pub struct FileOutcome {
    /// `None` when the output was composed.
    pub pass_through: Option<PassThroughReason>,
    /// Absent only for undecodable inputs.
    pub report: Option<ExtractionReport>,
}

impl FileOutcome {
    pub fn is_composed(&self) -> bool {
        self.pass_through.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub processed: usize,
    pub composed: usize,
    pub passed_through: usize,
    pub failed: usize,
}

/// Compact the image at `input` into a PNG at `output`.
///
/// Errors only when the input cannot be read or the output cannot be
/// written; an undecodable input is copied through unchanged.
pub fn compact_png_file(
    extractor: &DenseRegionExtractor,
    input: &Path,
    output: &Path,
) -> Result<FileOutcome> {
    let bytes = fs::read(input).map_err(|e| CompactError::io(input, e))?;
    let raster = match decode_raster(&bytes) {
        Ok(raster) => raster,
        Err(err) => {
            warn!("{}: cannot decode ({err}), copying input unchanged", input.display());
            write_bytes(output, &bytes)?;
            return Ok(FileOutcome {
                pass_through: Some(PassThroughReason::Undecodable),
                report: None,
            });
        }
    };

    match extractor.compact(raster) {
        CompactOutcome::Composed { image, report } => {
            save_raster(&image, output)?;
            info!(
                "{} -> {} ({}x{})",
                input.display(),
                output.display(),
                image.w,
                image.h
            );
            Ok(FileOutcome {
                pass_through: None,
                report: Some(report),
            })
        }
        CompactOutcome::PassThrough { reason, report, .. } => {
            info!("{}: {:?}, copying input unchanged", input.display(), reason);
            write_bytes(output, &bytes)?;
            Ok(FileOutcome {
                pass_through: Some(reason),
                report: Some(report),
            })
        }
    }
}

/// Compact every `*.png` in `input_dir` into `output_dir/<stem>.png`.
///
/// Per-file failures are logged and counted; only an unreadable or empty
/// input directory is an error.
pub fn compact_directory(
    extractor: &DenseRegionExtractor,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<BatchSummary> {
    let files = list_pngs(input_dir)?;
    if files.is_empty() {
        return Err(CompactError::InvalidInput(format!(
            "no PNG files in {}",
            input_dir.display()
        )));
    }
    fs::create_dir_all(output_dir).map_err(|e| CompactError::io(output_dir, e))?;

    let mut summary = BatchSummary::default();
    for input in files {
        let Some(stem) = input.file_stem() else {
            continue;
        };
        let output = output_dir.join(stem).with_extension("png");
        summary.processed += 1;
        match compact_png_file(extractor, &input, &output) {
            Ok(outcome) if outcome.is_composed() => summary.composed += 1,
            Ok(_) => summary.passed_through += 1,
            Err(err) => {
                error!("{}: {err}", input.display());
                summary.failed += 1;
            }
        }
    }
    info!(
        "batch done: {} files, {} composed, {} unchanged, {} failed",
        summary.processed, summary.composed, summary.passed_through, summary.failed
    );
    Ok(summary)
}

fn list_pngs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| CompactError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| CompactError::io(dir, e))?.path();
        let is_png = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if is_png && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, bytes).map_err(|e| CompactError::io(path, e))
}
