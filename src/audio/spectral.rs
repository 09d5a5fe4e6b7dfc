/// Samples louder than this count toward the "low" bucket.
const LOW_BUCKET_THRESHOLD: f64 = 0.05;
/// Samples louder than this (and not in the low bucket) count toward "mid".
const MID_BUCKET_THRESHOLD: f64 = 0.01;

/// Heuristic bass/brightness score of a window, in [-1, 1].
///
/// Each sample's magnitude is sorted into a low, mid or high bucket by fixed
/// amplitude thresholds: loud samples are taken as bass energy, quiet samples
/// as high-frequency detail. This is an amplitude histogram, not a
/// frequency-domain measurement, and says nothing about actual spectral
/// content. -1 means the loud bucket dominates, +1 the quiet one, 0 is
/// neutral (including silent and empty windows).
pub fn spectral_balance(window: &[f32]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }

    let mut low = 0.0f64;
    let mut mid = 0.0f64;
    let mut high = 0.0f64;

    for &sample in window {
        let magnitude = (sample as f64).abs();
        if magnitude > LOW_BUCKET_THRESHOLD {
            low += magnitude;
        } else if magnitude > MID_BUCKET_THRESHOLD {
            mid += magnitude;
        } else {
            high += magnitude;
        }
    }

    let len = window.len() as f64;
    low /= len;
    mid /= len;
    high /= len;

    let total = low + mid + high;
    if total == 0.0 {
        return 0.0;
    }

    (high / total - low / total).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_and_empty_windows_are_neutral() {
        assert_eq!(spectral_balance(&[]), 0.0);
        assert_eq!(spectral_balance(&[0.0; 64]), 0.0);
    }

    #[test]
    fn loud_constant_is_bass_heavy() {
        let balance = spectral_balance(&[0.2; 100]);
        assert_eq!(balance, -1.0);
    }

    #[test]
    fn quiet_constant_is_bright() {
        let balance = spectral_balance(&[-0.005; 100]);
        assert_eq!(balance, 1.0);
    }

    #[test]
    fn mid_constant_is_neutral() {
        let balance = spectral_balance(&[0.03; 100]);
        assert_eq!(balance, 0.0);
    }

    #[test]
    fn mixed_window_stays_in_range() {
        let window: Vec<f32> = (0..1000)
            .map(|i| ((i as f32) * 0.37).sin() * 0.3)
            .collect();
        let balance = spectral_balance(&window);
        assert!((-1.0..=1.0).contains(&balance));
        // Most samples of a 0.3 sine sit above the low-bucket threshold
        assert!(balance < 0.0);
    }

    #[test]
    fn ratios_weight_by_amplitude() {
        // low bucket: 0.1, high bucket: 0.01 -> (0.01 - 0.1) / 0.11
        let balance = spectral_balance(&[0.1, 0.01]);
        let expected = (0.01f32 as f64 - 0.1f32 as f64) / (0.1f32 as f64 + 0.01f32 as f64);
        assert!((balance - expected).abs() < 1e-9);
    }
}
