use drawing_compactor::config::{load_config, RuntimeConfig};
use drawing_compactor::{compact_directory, compact_png_file, DenseRegionExtractor};
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    "Usage: drawing_compactor <input.png|input_dir> <output.png|output_dir> [config.json]\n       drawing_compactor <config.json>".to_string()
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (input, output, config) = match args.as_slice() {
        [config] => {
            let cfg = load_config(Path::new(config)).map_err(|e| e.to_string())?;
            let input = cfg.input_path.clone().ok_or_else(usage)?;
            let output = cfg.output_path.clone().ok_or_else(usage)?;
            (input, output, cfg)
        }
        [input, output] => (PathBuf::from(input), PathBuf::from(output), RuntimeConfig::default()),
        [input, output, config] => (
            PathBuf::from(input),
            PathBuf::from(output),
            load_config(Path::new(config)).map_err(|e| e.to_string())?,
        ),
        _ => return Err(usage()),
    };

    let extractor = DenseRegionExtractor::new(config.params);
    if input.is_dir() {
        let summary = compact_directory(&extractor, &input, &output).map_err(|e| e.to_string())?;
        println!(
            "{} files: {} compacted, {} unchanged, {} failed",
            summary.processed, summary.composed, summary.passed_through, summary.failed
        );
        if summary.failed > 0 {
            return Err(format!("{} files failed", summary.failed));
        }
    } else {
        let outcome = compact_png_file(&extractor, &input, &output).map_err(|e| e.to_string())?;
        match outcome.pass_through {
            None => println!("Compacted image written to {}", output.display()),
            Some(reason) => println!(
                "Input copied unchanged to {} ({:?})",
                output.display(),
                reason
            ),
        }
    }
    Ok(())
}
