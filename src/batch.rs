use std::path::PathBuf;
use std::sync::Arc;

use crate::audio::analysis::analyze_buffer;
use crate::audio::decode::decode_audio;
use crate::audio::features::{AnalysisData, AudioAnalysisResult, SampleBuffer};
use crate::audio::summary::summarize;
use crate::error::{AnalysisError, DecodeError, Result};

/// Something the batch analyzer can turn into samples.
pub trait AudioSource {
    /// Identifier used in results and error messages
    fn name(&self) -> String;
    fn load(&self) -> std::result::Result<SampleBuffer, DecodeError>;
}

impl AudioSource for SampleBuffer {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn load(&self) -> std::result::Result<SampleBuffer, DecodeError> {
        Ok(self.clone())
    }
}

/// Audio file on disk, decoded with symphonia when the batch reaches it.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AudioSource for FileSource {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn load(&self) -> std::result::Result<SampleBuffer, DecodeError> {
        decode_audio(&self.path)
    }
}

/// Runs batches of files through the analysis pipeline and holds the latest
/// successful batch.
#[derive(Debug, Default)]
pub struct BatchAnalyzer {
    data: Option<AnalysisData>,
}

impl BatchAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze every source in order. `on_progress` receives the completed
    /// percentage after each file. Any failure discards the whole batch and
    /// leaves the previously held data untouched.
    pub fn analyze<S, F>(
        &mut self,
        sources: &[S],
        mut on_progress: F,
        loudness_window_seconds: f64,
    ) -> Result<&AnalysisData>
    where
        S: AudioSource,
        F: FnMut(f64),
    {
        if !loudness_window_seconds.is_finite() || loudness_window_seconds <= 0.0 {
            return Err(AnalysisError::InvalidWindow(loudness_window_seconds));
        }

        log::info!(
            "Analyzing {} file(s), loudness window {:.1}s",
            sources.len(),
            loudness_window_seconds
        );

        let total = sources.len();
        let mut results = Vec::with_capacity(total);

        for (i, source) in sources.iter().enumerate() {
            let file = source.name();
            let buffer = source.load().map_err(|source| AnalysisError::Decode {
                file: file.clone(),
                source,
            })?;

            let mut result =
                analyze_buffer(&buffer, loudness_window_seconds).map_err(|err| AnalysisError::File {
                    file: file.clone(),
                    source: Box::new(err),
                })?;
            result.file_name = file;

            log::info!(
                "[{}/{}] {}: peak {:.2}, lufs {:.2}",
                i + 1,
                total,
                result.file_name,
                result.peak_db,
                result.lufs
            );
            results.push(result);

            on_progress(((i + 1) as f64 / total as f64 * 100.0).min(100.0));
        }

        let summary = summarize(&results);
        Ok(self.replace(AnalysisData { results, summary }))
    }

    /// Swap in a new batch wholesale.
    pub fn replace(&mut self, data: AnalysisData) -> &AnalysisData {
        self.data.insert(data)
    }

    pub fn data(&self) -> Option<&AnalysisData> {
        self.data.as_ref()
    }

    pub fn reset(&mut self) {
        self.data = None;
    }

    pub fn result(&self, file_name: &str) -> Option<&AudioAnalysisResult> {
        self.data
            .as_ref()?
            .results
            .iter()
            .find(|r| r.file_name == file_name)
    }

    /// Samples retained for a file, for playback.
    pub fn samples(&self, file_name: &str) -> Option<Arc<[f32]>> {
        self.result(file_name).map(|r| r.samples.clone())
    }

    /// Populate the band cache of one result. Returns `false` if no such file.
    pub fn compute_frequency_bands(&mut self, file_name: &str) -> bool {
        let Some(data) = self.data.as_mut() else {
            return false;
        };
        match data.results.iter_mut().find(|r| r.file_name == file_name) {
            Some(result) => {
                result.frequency_bands();
                true
            }
            None => false,
        }
    }

    pub fn compute_all_frequency_bands(&mut self) {
        if let Some(data) = self.data.as_mut() {
            for result in &mut data.results {
                result.frequency_bands();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::features::{BandSlot, Level};

    struct BrokenSource;

    impl AudioSource for BrokenSource {
        fn name(&self) -> String {
            "broken.mp3".into()
        }

        fn load(&self) -> std::result::Result<SampleBuffer, DecodeError> {
            Err(DecodeError::NoTrack)
        }
    }

    enum Mixed {
        Good(SampleBuffer),
        Bad(BrokenSource),
    }

    impl AudioSource for Mixed {
        fn name(&self) -> String {
            match self {
                Self::Good(b) => b.name(),
                Self::Bad(b) => b.name(),
            }
        }

        fn load(&self) -> std::result::Result<SampleBuffer, DecodeError> {
            match self {
                Self::Good(b) => b.load(),
                Self::Bad(b) => b.load(),
            }
        }
    }

    fn buffer(name: &str, value: f32, seconds: usize) -> SampleBuffer {
        SampleBuffer::new(name, vec![value; 1000 * seconds], 1000)
    }

    #[test]
    fn two_files_report_progress_in_order() {
        let mut analyzer = BatchAnalyzer::new();
        let mut progress = Vec::new();
        let sources = [buffer("a.wav", 0.5, 2), buffer("b.wav", 0.25, 3)];

        let data = analyzer.analyze(&sources, |p| progress.push(p), 3.0).unwrap();

        assert_eq!(data.results.len(), 2);
        assert_eq!(data.results[0].file_name, "a.wav");
        assert_eq!(data.results[1].file_name, "b.wav");
        assert_eq!(data.summary.total_duration, 5.0);
        assert_eq!(progress, vec![50.0, 100.0]);
    }

    #[test]
    fn progress_is_monotonic_and_capped() {
        let mut analyzer = BatchAnalyzer::new();
        let mut progress = Vec::new();
        let sources: Vec<_> = (0..3).map(|i| buffer(&format!("{i}.wav"), 0.1, 1)).collect();

        analyzer.analyze(&sources, |p| progress.push(p), 1.0).unwrap();

        assert_eq!(progress.len(), 3);
        for pair in progress.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert!(progress.iter().all(|&p| p <= 100.0));
        assert_eq!(*progress.last().unwrap(), 100.0);
    }

    #[test]
    fn empty_batch_has_zero_summary_and_no_progress() {
        let mut analyzer = BatchAnalyzer::new();
        let mut calls = 0;
        let sources: [SampleBuffer; 0] = [];

        let data = analyzer.analyze(&sources, |_| calls += 1, 3.0).unwrap();

        assert!(data.results.is_empty());
        assert_eq!(data.summary.total_duration, 0.0);
        assert_eq!(data.summary.average_lufs, Level::Db(0.0));
        assert_eq!(calls, 0);
    }

    #[test]
    fn failure_names_the_file_and_keeps_previous_data() {
        let mut analyzer = BatchAnalyzer::new();
        analyzer
            .analyze(&[buffer("first.wav", 0.5, 1)], |_| {}, 3.0)
            .unwrap();

        let mut progress = Vec::new();
        let sources = [
            Mixed::Good(buffer("ok.wav", 0.5, 1)),
            Mixed::Bad(BrokenSource),
            Mixed::Good(buffer("never.wav", 0.5, 1)),
        ];
        let err = analyzer
            .analyze(&sources, |p| progress.push(p), 3.0)
            .unwrap_err();

        assert!(matches!(err, AnalysisError::Decode { ref file, .. } if file == "broken.mp3"));
        assert!(err.to_string().contains("broken.mp3"));
        assert_eq!(progress.len(), 1);

        let held = analyzer.data().unwrap();
        assert_eq!(held.results.len(), 1);
        assert_eq!(held.results[0].file_name, "first.wav");
    }

    #[test]
    fn invalid_sample_rate_is_reported_per_file() {
        let mut analyzer = BatchAnalyzer::new();
        let sources = [SampleBuffer::new("zero-rate.wav", vec![0.1f32; 10], 0)];
        let err = analyzer.analyze(&sources, |_| {}, 3.0).unwrap_err();
        assert!(matches!(err, AnalysisError::File { ref file, .. } if file == "zero-rate.wav"));
        assert!(analyzer.data().is_none());
    }

    #[test]
    fn invalid_window_fails_before_loading() {
        let mut analyzer = BatchAnalyzer::new();
        let err = analyzer
            .analyze(&[BrokenSource], |_| {}, 0.0)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidWindow(_)));
    }

    #[test]
    fn new_batch_replaces_old_one() {
        let mut analyzer = BatchAnalyzer::new();
        analyzer.analyze(&[buffer("old.wav", 0.5, 1)], |_| {}, 3.0).unwrap();
        analyzer.analyze(&[buffer("new.wav", 0.5, 1)], |_| {}, 3.0).unwrap();

        assert!(analyzer.result("old.wav").is_none());
        assert!(analyzer.result("new.wav").is_some());
        assert_eq!(analyzer.samples("new.wav").unwrap().len(), 1000);

        analyzer.reset();
        assert!(analyzer.data().is_none());
        assert!(analyzer.samples("new.wav").is_none());
    }

    #[test]
    fn frequency_bands_are_computed_on_demand() {
        let mut analyzer = BatchAnalyzer::new();
        let sources = [buffer("a.wav", 0.5, 1), buffer("b.wav", 0.02, 1)];
        analyzer.analyze(&sources, |_| {}, 3.0).unwrap();

        assert_eq!(analyzer.result("a.wav").unwrap().frequency_bands, BandSlot::Unset);
        assert!(analyzer.compute_frequency_bands("a.wav"));
        assert!(!analyzer.compute_frequency_bands("missing.wav"));

        let a = analyzer.result("a.wav").unwrap();
        let bands = a.frequency_bands.get().unwrap();
        assert_eq!(bands.len(), a.time_series.len());
        assert!(bands.iter().all(|b| b.low_db > b.high_db));
        assert_eq!(analyzer.result("b.wav").unwrap().frequency_bands, BandSlot::Unset);

        analyzer.compute_all_frequency_bands();
        assert!(analyzer.result("b.wav").unwrap().frequency_bands.get().is_some());
    }
}
