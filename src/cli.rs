use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_WINDOW: f64 = loudgraph::DEFAULT_LOUDNESS_WINDOW_SECONDS;

#[derive(Parser, Debug)]
#[command(name = "loudgraph", about = "Loudness-over-time analysis for audio files")]
pub struct Cli {
    /// Input audio files (WAV, MP3, FLAC, OGG, AAC)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Loudness window in seconds (1-10 is the tuned range)
    #[arg(short, long, default_value_t = DEFAULT_WINDOW)]
    pub window: f64,

    /// Write the full analysis as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also compute low/mid/high band levels
    #[arg(long)]
    pub bands: bool,

    /// Single-line JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Config file (default: ./loudgraph.toml or the user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Do not print the statistics report
    #[arg(short, long)]
    pub quiet: bool,
}
