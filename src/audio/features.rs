use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Decibel level, or silence where the amplitude was zero (or the window was
/// gated out). `Silence` orders below every finite level.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum Level {
    Silence,
    Db(f64),
}

const SILENCE_SYMBOL: &str = "-inf";

impl Level {
    /// `20 * log10(amplitude)`, or `Silence` for amplitude <= 0.
    pub fn from_amplitude(amplitude: f64) -> Self {
        if amplitude > 0.0 {
            Self::from_db(20.0 * amplitude.log10())
        } else {
            Self::Silence
        }
    }

    pub fn from_db(db: f64) -> Self {
        if db.is_finite() {
            Self::Db(db)
        } else {
            Self::Silence
        }
    }

    pub fn db(self) -> Option<f64> {
        match self {
            Self::Db(db) => Some(db),
            Self::Silence => None,
        }
    }

    pub fn is_silence(self) -> bool {
        matches!(self, Self::Silence)
    }

    /// Shift a finite level by `offset` dB. Silence stays silence.
    pub fn offset(self, offset: f64) -> Self {
        match self {
            Self::Db(db) => Self::from_db(db + offset),
            Self::Silence => Self::Silence,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Db(db) => match f.precision() {
                Some(p) => write!(f, "{:.*} dB", p, db),
                None => write!(f, "{} dB", db),
            },
            Self::Silence => f.write_str("-inf dB"),
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Db(db) => serializer.serialize_f64(*db),
            Self::Silence => serializer.serialize_str(SILENCE_SYMBOL),
        }
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Symbol(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(db) if db.is_finite() => Ok(Self::Db(db)),
            Repr::Number(db) => Err(serde::de::Error::custom(format!(
                "non-finite level {db}, silence must be encoded as \"{SILENCE_SYMBOL}\""
            ))),
            Repr::Symbol(s) if s == SILENCE_SYMBOL => Ok(Self::Silence),
            Repr::Symbol(s) => Err(serde::de::Error::custom(format!("unknown level symbol {s:?}"))),
        }
    }
}

/// Decoded single-channel audio handed to the analyzer.
#[derive(Clone)]
pub struct SampleBuffer {
    pub name: String,
    pub samples: Arc<[f32]>,
    pub sample_rate: u32,
}

impl SampleBuffer {
    pub fn new(name: impl Into<String>, samples: impl Into<Arc<[f32]>>, sample_rate: u32) -> Self {
        Self {
            name: name.into(),
            samples: samples.into(),
            sample_rate,
        }
    }

    /// Duration in seconds (sample count / sample rate).
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

impl fmt::Debug for SampleBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampleBuffer")
            .field("name", &self.name)
            .field("samples", &self.samples.len())
            .field("sample_rate", &self.sample_rate)
            .finish()
    }
}

/// One step of the loudness-over-time series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    /// Seconds from the start of the file
    pub time: f64,
    /// Peak over the 100ms window
    pub peak: Level,
    /// RMS over the 100ms window
    pub rms: Level,
    /// Gated loudness over the loudness window
    pub lufs: Level,
    /// Amplitude-histogram heuristic in [-1, 1]: -1 bass heavy, +1 bright.
    /// Not a frequency-domain measurement.
    pub spectral_balance: f64,
}

/// Heuristic low/mid/high split of one loudness window, in dB. Always finite.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrequencyBandPoint {
    pub time: f64,
    pub low_db: f64,
    pub mid_db: f64,
    pub high_db: f64,
}

/// Lazily computed band series. `Computed(vec![])` is distinct from `Unset`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "points", rename_all = "snake_case")]
pub enum BandSlot {
    #[default]
    Unset,
    Computed(Vec<FrequencyBandPoint>),
}

impl BandSlot {
    pub fn get(&self) -> Option<&[FrequencyBandPoint]> {
        match self {
            Self::Computed(points) => Some(points),
            Self::Unset => None,
        }
    }
}

/// Analysis of one input file.
#[derive(Clone, Serialize)]
pub struct AudioAnalysisResult {
    pub file_name: String,
    pub duration: f64,
    pub sample_rate: u32,
    pub loudness_window_seconds: f64,
    pub peak_amplitude: f64,
    pub peak_db: Level,
    pub rms: f64,
    pub rms_db: Level,
    pub lufs: Level,
    pub time_series: Vec<TimePoint>,
    pub frequency_bands: BandSlot,
    /// Analyzed channel, kept for playback and deferred band analysis
    #[serde(skip)]
    pub samples: Arc<[f32]>,
}

impl fmt::Debug for AudioAnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioAnalysisResult")
            .field("file_name", &self.file_name)
            .field("duration", &self.duration)
            .field("sample_rate", &self.sample_rate)
            .field("peak_db", &self.peak_db)
            .field("rms_db", &self.rms_db)
            .field("lufs", &self.lufs)
            .field("time_series", &self.time_series.len())
            .field("frequency_bands", &self.frequency_bands.get().map(|b| b.len()))
            .finish_non_exhaustive()
    }
}

/// Cross-file statistics over the whole-file values of every result.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub total_duration: f64,
    pub average_lufs: Level,
    pub average_peak_db: Level,
    pub max_peak_db: Level,
    pub min_lufs: Level,
    pub max_lufs: Level,
    /// `max_lufs - min_lufs`. `None` stands for an unbounded (+inf) range:
    /// the quietest file is silent and the loudest is not.
    pub lufs_range: Option<f64>,
}

impl Default for AnalysisSummary {
    fn default() -> Self {
        Self {
            total_duration: 0.0,
            average_lufs: Level::Db(0.0),
            average_peak_db: Level::Db(0.0),
            max_peak_db: Level::Db(0.0),
            min_lufs: Level::Db(0.0),
            max_lufs: Level::Db(0.0),
            lufs_range: Some(0.0),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct AnalysisData {
    pub results: Vec<AudioAnalysisResult>,
    pub summary: AnalysisSummary,
}
