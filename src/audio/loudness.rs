//! RMS-with-offset loudness estimates. These approximate integrated loudness;
//! there is no K-weighting and the whole-file value is ungated.

use super::features::Level;
use super::metrics::{rms, to_db};

/// Calibration offset for the whole-file estimate.
pub const WHOLE_FILE_OFFSET_DB: f64 = -12.0;
/// Calibration offset for the windowed estimate.
pub const WINDOW_OFFSET_DB: f64 = -13.0;
/// Windows with RMS below this are reported as silence.
pub const GATE_THRESHOLD_DB: f64 = -70.0;

pub fn whole_file_lufs(samples: &[f32]) -> Level {
    to_db(rms(samples)).offset(WHOLE_FILE_OFFSET_DB)
}

pub fn windowed_lufs(window: &[f32]) -> Level {
    if window.is_empty() {
        return Level::Silence;
    }
    match to_db(rms(window)) {
        Level::Db(db) if db >= GATE_THRESHOLD_DB => Level::from_db(db + WINDOW_OFFSET_DB),
        _ => Level::Silence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_file_uses_twelve_db_offset() {
        let samples = vec![0.5f32; 44100];
        let lufs = whole_file_lufs(&samples).db().unwrap();
        assert!((lufs + 18.0206).abs() < 1e-3);
    }

    #[test]
    fn whole_file_silence() {
        assert_eq!(whole_file_lufs(&[0.0; 100]), Level::Silence);
        assert_eq!(whole_file_lufs(&[]), Level::Silence);
    }

    #[test]
    fn window_uses_thirteen_db_offset() {
        let samples = vec![0.5f32; 4410];
        let lufs = windowed_lufs(&samples).db().unwrap();
        assert!((lufs + 19.0206).abs() < 1e-3);
    }

    #[test]
    fn empty_window_is_silence() {
        assert_eq!(windowed_lufs(&[]), Level::Silence);
    }

    #[test]
    fn quiet_window_is_gated() {
        // 1e-4 is -80 dB, below the -70 dB gate
        let samples = vec![1e-4f32; 1000];
        assert_eq!(windowed_lufs(&samples), Level::Silence);

        // 1e-3 is -60 dB, passes the gate
        let samples = vec![1e-3f32; 1000];
        let lufs = windowed_lufs(&samples).db().unwrap();
        assert!((lufs + 73.0).abs() < 1e-3);
    }
}
