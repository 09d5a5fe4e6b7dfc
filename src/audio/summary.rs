use super::features::{AnalysisSummary, AudioAnalysisResult, Level};

/// Cross-file statistics from the whole-file values of each result. An empty
/// set gives all-zero fields.
pub fn summarize(results: &[AudioAnalysisResult]) -> AnalysisSummary {
    if results.is_empty() {
        return AnalysisSummary::default();
    }

    let total_duration = results.iter().map(|r| r.duration).sum();
    let lufs: Vec<Level> = results.iter().map(|r| r.lufs).collect();
    let peaks: Vec<Level> = results.iter().map(|r| r.peak_db).collect();

    let min_lufs = min_level(&lufs);
    let max_lufs = max_level(&lufs);

    AnalysisSummary {
        total_duration,
        average_lufs: mean_level(&lufs),
        average_peak_db: mean_level(&peaks),
        max_peak_db: max_level(&peaks),
        min_lufs,
        max_lufs,
        lufs_range: level_range(min_lufs, max_lufs),
    }
}

/// Arithmetic mean; any silent input makes the mean silent.
fn mean_level(levels: &[Level]) -> Level {
    let mut sum = 0.0;
    for level in levels {
        match level {
            Level::Db(db) => sum += db,
            Level::Silence => return Level::Silence,
        }
    }
    Level::from_db(sum / levels.len() as f64)
}

fn max_level(levels: &[Level]) -> Level {
    levels
        .iter()
        .copied()
        .fold(Level::Silence, |acc, l| if l > acc { l } else { acc })
}

fn min_level(levels: &[Level]) -> Level {
    levels
        .iter()
        .copied()
        .reduce(|acc, l| if l < acc { l } else { acc })
        .unwrap_or(Level::Silence)
}

fn level_range(min: Level, max: Level) -> Option<f64> {
    match (min, max) {
        (Level::Db(lo), Level::Db(hi)) => Some(hi - lo),
        (Level::Silence, Level::Silence) => Some(0.0),
        _ => None,
    }
}
