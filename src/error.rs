use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while turning an audio file into a `SampleBuffer`.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to open audio file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Audio format error: {0}")]
    Format(#[from] symphonia::core::errors::Error),

    #[error("No audio tracks found")]
    NoTrack,

    #[error("Unknown sample rate")]
    UnknownSampleRate,
}

/// Errors raised by the analysis pipeline.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Loudness window must be a positive, finite number of seconds.
    #[error("Invalid loudness window: {0} seconds")]
    InvalidWindow(f64),

    #[error("Invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),

    #[error("Failed to decode {file}: {source}")]
    Decode {
        file: String,
        #[source]
        source: DecodeError,
    },

    #[error("Failed to analyze {file}: {source}")]
    File {
        file: String,
        #[source]
        source: Box<AnalysisError>,
    },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
