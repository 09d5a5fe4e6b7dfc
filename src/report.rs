use std::fmt::Write;

use crate::audio::features::{AnalysisData, AnalysisSummary};

/// Plain-text statistics: the summary followed by one row per file.
pub fn format_report(data: &AnalysisData) -> String {
    let mut out = String::new();
    write_summary(&mut out, &data.summary);

    if data.results.is_empty() {
        return out;
    }

    let name_width = data
        .results
        .iter()
        .map(|r| r.file_name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {:<name_width$}  {:>9}  {:>12}  {:>12}  {:>12}",
        "File", "Duration", "Peak", "RMS", "LUFS"
    );
    for result in &data.results {
        let _ = writeln!(
            out,
            "  {:<name_width$}  {:>9}  {:>12}  {:>12}  {:>12}",
            result.file_name,
            format_duration(result.duration),
            format!("{:.1}", result.peak_db),
            format!("{:.1}", result.rms_db),
            format!("{:.1}", result.lufs),
        );
    }
    out
}

fn write_summary(out: &mut String, summary: &AnalysisSummary) {
    let _ = writeln!(out, "Total duration: {}", format_duration(summary.total_duration));
    let _ = writeln!(out, "Average LUFS:   {:.1}", summary.average_lufs);
    let _ = writeln!(out, "Average peak:   {:.1}", summary.average_peak_db);
    let _ = writeln!(out, "Max peak:       {:.1}", summary.max_peak_db);
    let _ = writeln!(out, "LUFS min/max:   {:.1} / {:.1}", summary.min_lufs, summary.max_lufs);
    match summary.lufs_range {
        Some(range) => {
            let _ = writeln!(out, "LUFS range:     {:.1} dB", range);
        }
        None => {
            let _ = writeln!(out, "LUFS range:     unbounded (silent file)");
        }
    }
}

fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0);
    let mins = (total / 60.0).floor() as u64;
    let secs = total - mins as f64 * 60.0;
    format!("{}:{:04.1}", mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::features::SampleBuffer;
    use crate::batch::BatchAnalyzer;

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(0.0), "0:00.0");
        assert_eq!(format_duration(65.4), "1:05.4");
        assert_eq!(format_duration(600.0), "10:00.0");
    }

    #[test]
    fn empty_report_only_has_summary() {
        let report = format_report(&AnalysisData::default());
        assert!(report.contains("Total duration: 0:00.0"));
        assert!(report.contains("LUFS range:     0.0 dB"));
        assert!(!report.contains("File"));
    }

    #[test]
    fn lists_each_file() {
        let mut analyzer = BatchAnalyzer::new();
        let sources = [
            SampleBuffer::new("loud.wav", vec![0.5f32; 1000], 1000),
            SampleBuffer::new("quiet.wav", vec![0.0f32; 1000], 1000),
        ];
        let data = analyzer.analyze(&sources, |_| {}, 3.0).unwrap();
        let report = format_report(data);

        assert!(report.contains("loud.wav"));
        assert!(report.contains("-6.0 dB"));
        assert!(report.contains("-18.0 dB"));
        assert!(report.contains("quiet.wav"));
        assert!(report.contains("-inf dB"));
        assert!(report.contains("unbounded"));
    }
}
