use super::analysis::TimeSeriesGenerator;
use super::features::{AudioAnalysisResult, BandSlot, FrequencyBandPoint};

/// Lowest band RMS reported; keeps band levels finite (-80 dB).
pub const MIN_BAND_RMS: f64 = 1e-4;
/// Energy given to every band of a silent window.
const SILENT_BAND_ENERGY: f64 = 0.001;
/// Band RMS reported for an empty window (-60 dB).
const EMPTY_BAND_RMS: f64 = 0.001;

/// Windows peaking above this are treated as bass/kick material.
const PEAK_THRESHOLD: f64 = 0.05;
/// Mean sample-to-sample delta above which a window reads as high-frequency.
const FAST_CHANGE_THRESHOLD: f64 = 0.01;
/// Mean sample-to-sample delta above which a window reads as mid-frequency.
const MODERATE_CHANGE_THRESHOLD: f64 = 0.005;

/// Energy split (low, mid, high) applied to a window's total energy.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Split {
    low: f64,
    mid: f64,
    high: f64,
}

const LOUD_SPLIT: Split = Split { low: 0.7, mid: 0.2, high: 0.1 };
const FAST_SPLIT: Split = Split { low: 0.1, mid: 0.3, high: 0.6 };
const MODERATE_SPLIT: Split = Split { low: 0.2, mid: 0.6, high: 0.2 };
const SLOW_SPLIT: Split = Split { low: 0.6, mid: 0.3, high: 0.1 };

/// Band RMS values (linear) for one window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandLevels {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl BandLevels {
    const EMPTY: Self = Self {
        low: EMPTY_BAND_RMS,
        mid: EMPTY_BAND_RMS,
        high: EMPTY_BAND_RMS,
    };

    fn to_point(self, time: f64) -> FrequencyBandPoint {
        FrequencyBandPoint {
            time,
            low_db: 20.0 * self.low.log10(),
            mid_db: 20.0 * self.mid.log10(),
            high_db: 20.0 * self.high.log10(),
        }
    }
}

/// Heuristic low/mid/high decomposition of a window.
///
/// The window's energy is split by a fixed profile chosen from its peak
/// amplitude and mean rate of change; no frequency transform is involved.
pub fn estimate_bands(window: &[f32]) -> BandLevels {
    if window.is_empty() {
        return BandLevels::EMPTY;
    }

    let mut energy = 0.0f64;
    let mut peak = 0.0f64;
    let mut delta_sum = 0.0f64;
    let mut prev: Option<f64> = None;

    for &sample in window {
        let sample = sample as f64;
        energy += sample * sample;
        peak = peak.max(sample.abs());
        if let Some(p) = prev {
            delta_sum += (sample - p).abs();
        }
        prev = Some(sample);
    }

    let len = window.len() as f64;
    let band_rms = |band_energy: f64| (band_energy / len).sqrt().max(MIN_BAND_RMS);

    // Silent windows get a fixed energy per band, so their level depends on
    // the window length and only reaches the floor for long windows.
    if energy == 0.0 {
        return BandLevels {
            low: band_rms(SILENT_BAND_ENERGY),
            mid: band_rms(SILENT_BAND_ENERGY),
            high: band_rms(SILENT_BAND_ENERGY),
        };
    }

    let rate_of_change = if window.len() > 1 {
        delta_sum / (window.len() - 1) as f64
    } else {
        0.0
    };

    let split = select_split(peak, rate_of_change);
    BandLevels {
        low: band_rms(energy * split.low),
        mid: band_rms(energy * split.mid),
        high: band_rms(energy * split.high),
    }
}

fn select_split(peak: f64, rate_of_change: f64) -> Split {
    if peak > PEAK_THRESHOLD {
        LOUD_SPLIT
    } else if rate_of_change > FAST_CHANGE_THRESHOLD {
        FAST_SPLIT
    } else if rate_of_change > MODERATE_CHANGE_THRESHOLD {
        MODERATE_SPLIT
    } else {
        SLOW_SPLIT
    }
}

/// Band series over the same window grid as the time series.
pub fn band_series(samples: &[f32], generator: &TimeSeriesGenerator) -> Vec<FrequencyBandPoint> {
    generator
        .windows(samples)
        .map(|w| estimate_bands(w.loudness).to_point(w.time))
        .collect()
}

impl AudioAnalysisResult {
    /// Band series for this result, computed on first call and cached.
    pub fn frequency_bands(&mut self) -> &[FrequencyBandPoint] {
        if let BandSlot::Unset = self.frequency_bands {
            let points = match TimeSeriesGenerator::new(self.sample_rate, self.loudness_window_seconds) {
                Ok(generator) => band_series(&self.samples, &generator),
                // Results are only built from a valid generator
                Err(_) => Vec::new(),
            };
            log::debug!("{}: computed {} band points", self.file_name, points.len());
            self.frequency_bands = BandSlot::Computed(points);
        }
        match &self.frequency_bands {
            BandSlot::Computed(points) => points,
            BandSlot::Unset => &[],
        }
    }
}
