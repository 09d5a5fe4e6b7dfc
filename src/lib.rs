//! Loudness-over-time analysis of decoded audio.
//!
//! Whole-file peak/RMS/loudness, a 100ms-step time series with gated windowed
//! loudness and a heuristic spectral balance, lazily computed low/mid/high band
//! levels, and cross-file summary statistics. Loudness values are RMS plus a
//! fixed calibration offset, not EBU R128 measurements.

pub mod audio;
pub mod batch;
pub mod error;
pub mod export;
pub mod report;

pub use audio::analysis::{analyze_buffer, TimeSeriesGenerator, DEFAULT_LOUDNESS_WINDOW_SECONDS};
pub use audio::features::{
    AnalysisData, AnalysisSummary, AudioAnalysisResult, BandSlot, FrequencyBandPoint, Level,
    SampleBuffer, TimePoint,
};
pub use batch::{AudioSource, BatchAnalyzer, FileSource};
pub use error::{AnalysisError, DecodeError};
