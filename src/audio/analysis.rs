use crate::error::{AnalysisError, Result};

use super::features::{AudioAnalysisResult, BandSlot, SampleBuffer, TimePoint};
use super::loudness::{whole_file_lufs, windowed_lufs};
use super::metrics::{peak, rms, to_db};
use super::spectral::spectral_balance;

pub const DEFAULT_LOUDNESS_WINDOW_SECONDS: f64 = 3.0;
/// Step between points, and the peak/RMS window length
const STEP_SECONDS: f64 = 0.1;

/// Slides a short peak/RMS window and a wider loudness window across a buffer
/// in 100ms steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeSeriesGenerator {
    sample_rate: u32,
    step_samples: usize,
    loudness_window_samples: usize,
}

/// Sub-windows starting at one step of the grid. Both are clamped at the end
/// of the buffer and may be shorter than nominal; they are empty only when the
/// buffer is.
#[derive(Clone, Copy, Debug)]
pub struct Window<'a> {
    pub time: f64,
    pub short: &'a [f32],
    pub loudness: &'a [f32],
}

impl TimeSeriesGenerator {
    pub fn new(sample_rate: u32, loudness_window_seconds: f64) -> Result<Self> {
        if !loudness_window_seconds.is_finite() || loudness_window_seconds <= 0.0 {
            return Err(AnalysisError::InvalidWindow(loudness_window_seconds));
        }
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidSampleRate(sample_rate));
        }

        let rate = sample_rate as f64;
        let step_samples = ((rate * STEP_SECONDS).floor() as usize).max(1);
        let loudness_window_samples = ((rate * loudness_window_seconds).floor() as usize).max(1);

        Ok(Self {
            sample_rate,
            step_samples,
            loudness_window_samples,
        })
    }

    pub fn step_samples(&self) -> usize {
        self.step_samples
    }

    pub fn loudness_window_samples(&self) -> usize {
        self.loudness_window_samples
    }

    /// Number of points produced for `len` samples. A buffer shorter than one
    /// step (including an empty one) still gets a point at time 0.
    pub fn point_count(&self, len: usize) -> usize {
        len.div_ceil(self.step_samples).max(1)
    }

    pub fn windows<'a>(&self, samples: &'a [f32]) -> impl Iterator<Item = Window<'a>> + 'a {
        let generator = *self;
        (0..self.point_count(samples.len())).map(move |i| {
            let start = (i * generator.step_samples).min(samples.len());
            let short_end = (start + generator.step_samples).min(samples.len());
            let loudness_end = (start + generator.loudness_window_samples).min(samples.len());
            Window {
                time: start as f64 / generator.sample_rate as f64,
                short: &samples[start..short_end],
                loudness: &samples[start..loudness_end],
            }
        })
    }

    pub fn generate(&self, samples: &[f32]) -> Vec<TimePoint> {
        self.windows(samples)
            .map(|w| TimePoint {
                time: w.time,
                peak: to_db(peak(w.short)),
                rms: to_db(rms(w.short)),
                lufs: windowed_lufs(w.loudness),
                spectral_balance: spectral_balance(w.loudness),
            })
            .collect()
    }
}

/// Whole-file metrics plus the time series for one decoded buffer.
pub fn analyze_buffer(buffer: &SampleBuffer, loudness_window_seconds: f64) -> Result<AudioAnalysisResult> {
    let generator = TimeSeriesGenerator::new(buffer.sample_rate, loudness_window_seconds)?;
    let samples = &buffer.samples;

    let peak_amplitude = peak(samples);
    let rms_value = rms(samples);
    let lufs = whole_file_lufs(samples);
    let time_series = generator.generate(samples);

    log::debug!(
        "{}: peak={:.2}, rms={:.2}, lufs={:.2}, points={}",
        buffer.name,
        to_db(peak_amplitude),
        to_db(rms_value),
        lufs,
        time_series.len()
    );

    Ok(AudioAnalysisResult {
        file_name: buffer.name.clone(),
        duration: buffer.duration(),
        sample_rate: buffer.sample_rate,
        loudness_window_seconds,
        peak_amplitude,
        peak_db: to_db(peak_amplitude),
        rms: rms_value,
        rms_db: to_db(rms_value),
        lufs,
        time_series,
        frequency_bands: BandSlot::Unset,
        samples: buffer.samples.clone(),
    })
}
