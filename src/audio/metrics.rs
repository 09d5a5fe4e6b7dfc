use super::features::Level;

/// Largest absolute sample value. 0 for an empty slice.
pub fn peak(samples: &[f32]) -> f64 {
    samples.iter().map(|s| (*s as f64).abs()).fold(0.0f64, f64::max)
}

/// Root mean square. 0 for an empty slice.
pub fn rms(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_sq / samples.len() as f64).sqrt()
}

pub fn to_db(amplitude: f64) -> Level {
    Level::from_amplitude(amplitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slice_is_zero() {
        assert_eq!(peak(&[]), 0.0);
        assert_eq!(rms(&[]), 0.0);
        assert_eq!(to_db(rms(&[])), Level::Silence);
    }

    #[test]
    fn peak_uses_absolute_value() {
        assert!((peak(&[0.1, -0.8, 0.3]) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn rms_of_constant_is_constant() {
        let samples = vec![0.5f32; 1000];
        assert!((rms(&samples) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn rms_never_exceeds_peak() {
        let cases: [&[f32]; 4] = [
            &[0.3],
            &[1.0, -1.0, 0.0, 0.25],
            &[0.001, 0.002, -0.9],
            &[-0.4, -0.4, 0.1],
        ];
        for samples in cases {
            let r = rms(samples);
            assert!(r >= 0.0);
            assert!(peak(samples) >= r - 1e-12, "rms {r} above peak for {samples:?}");
        }
    }

    #[test]
    fn to_db_is_monotonic() {
        let amplitudes = [0.0, 1e-6, 0.001, 0.1, 0.5, 1.0];
        let levels: Vec<Level> = amplitudes.iter().map(|&a| to_db(a)).collect();
        assert_eq!(levels[0], Level::Silence);
        for pair in levels.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        let half = to_db(0.5).db().unwrap();
        assert!((half + 6.0206).abs() < 1e-3);
    }
}
