mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use cli::Cli;
use loudgraph::export::json;
use loudgraph::report::format_report;
use loudgraph::{BatchAnalyzer, FileSource};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();
    let mut pretty = true;

    // Config values apply only when the CLI flag is at its default
    let config_path = cli.config.clone().or_else(config::find_config);
    if let Some(ref path) = config_path {
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            if cli.window == cli::DEFAULT_WINDOW { cli.window = cfg.analysis.window_seconds; }
            if !cli.bands { cli.bands = cfg.analysis.bands; }
            pretty = cfg.export.pretty;
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }
    if cli.compact {
        pretty = false;
    }

    for input in &cli.inputs {
        if !input.exists() {
            anyhow::bail!("Input file not found: {}", input.display());
        }
    }

    let sources: Vec<FileSource> = cli.inputs.iter().map(FileSource::new).collect();

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}% ({eta} remaining)")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut analyzer = BatchAnalyzer::new();
    let outcome = analyzer.analyze(
        &sources,
        |percent| pb.set_position(percent.round() as u64),
        cli.window,
    );
    match outcome {
        Ok(_) => pb.finish_with_message("Analysis complete"),
        Err(_) => pb.abandon(),
    }
    outcome.context("Analysis failed")?;

    if cli.bands {
        log::info!("Computing frequency bands...");
        analyzer.compute_all_frequency_bands();
    }

    let data = analyzer.data().context("No analysis data")?;

    if !cli.quiet {
        print!("{}", format_report(data));
    }

    if let Some(ref output) = cli.output {
        json::write_json(output, data, pretty)?;
    }

    Ok(())
}
