use drawing_compactor::config::report::{load_report_config, ReportConfig};
use drawing_compactor::image::io::{load_raster, save_raster, write_json_file};
use drawing_compactor::image::{RasterRgba, Rgba};
use drawing_compactor::pyramid::build_analysis_level;
use drawing_compactor::{DenseRegionExtractor, ExtractionReport, Region};
use std::env;
use std::path::Path;

const KEPT: Rgba = [220, 30, 30, 255];
const DROPPED: Rgba = [40, 90, 220, 255];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    "Usage: region_report <config.json>".to_string()
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_report_config(Path::new(&config_path)).map_err(|e| e.to_string())?;
    let raster = load_raster(&config.input_path).map_err(|e| e.to_string())?;

    let extractor = DenseRegionExtractor::new(config.params.clone());
    let report = extractor.extract(&raster);
    report.print_text_summary();

    match &config.output.json_out {
        Some(path) => {
            write_json_file(path, &report).map_err(|e| e.to_string())?;
            println!("\nJSON report written to {}", path.display());
        }
        None => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
            println!("\nJSON report:\n{json}");
        }
    }

    if let Some(dir) = &config.output.debug_dir {
        save_debug_artifacts(dir, &raster, &report, &config)?;
        println!("Debug artifacts written to {}", dir.display());
    }

    if let Some(path) = &config.output.compact_out {
        let image = extractor.compose_regions(raster, report).into_image();
        save_raster(&image, path).map_err(|e| e.to_string())?;
        println!("Compacted image written to {}", path.display());
    }
    Ok(())
}

fn save_debug_artifacts(
    dir: &Path,
    raster: &RasterRgba,
    report: &ExtractionReport,
    config: &ReportConfig,
) -> Result<(), String> {
    let level = build_analysis_level(raster, config.params.analysis.max_analysis_dim);
    let analysis: &RasterRgba = level.image.as_ref();
    save_raster(analysis, &dir.join("analysis.png")).map_err(|e| e.to_string())?;

    // filtered candidates first, kept regions drawn over them
    let mut overlay = analysis.clone();
    if let Some(stage) = &report.regions {
        for r in &stage.filtered {
            stroke_rect(&mut overlay, r, 1, DROPPED);
        }
    }
    let factor = report.input.analysis_factor.max(1) as i64;
    for r in &report.kept {
        let at_level = Region::new(r.x / factor, r.y / factor, r.w / factor, r.h / factor, r.score);
        stroke_rect(&mut overlay, &at_level, 1, KEPT);
    }
    save_raster(&overlay, &dir.join("overlay.png")).map_err(|e| e.to_string())?;
    Ok(())
}

fn stroke_rect(img: &mut RasterRgba, r: &Region, half_width: i64, px: Rgba) {
    let (w, h) = (img.w as i64, img.h as i64);
    let x0 = r.x.clamp(0, w);
    let y0 = r.y.clamp(0, h);
    let x1 = r.right().clamp(0, w);
    let y1 = r.bottom().clamp(0, h);
    if x0 >= x1 || y0 >= y1 {
        return;
    }
    let t = (2 * half_width).max(1) as usize;
    let (x0, y0, x1, y1) = (x0 as usize, y0 as usize, x1 as usize, y1 as usize);
    img.fill_rect(x0, y0, x1 - x0, t, px);
    img.fill_rect(x0, y1.saturating_sub(t), x1 - x0, t, px);
    img.fill_rect(x0, y0, t, y1 - y0, px);
    img.fill_rect(x1.saturating_sub(t), y0, t, y1 - y0, px);
}
