/// RSI (Relative Strength Index) series using Wilder's smoothed averages.
///
/// The first output entry requires `period + 1` closes (one full window of
/// price changes), so the output length is `max(0, closes.len() - period)`.
/// Values are always in `[0, 100]`.
pub fn relative_strength_index(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.len() < period + 1 {
        return Vec::new();
    }

    let changes: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    // Seed averages with the plain mean of the first `period` changes
    let initial = &changes[..period];
    let mut avg_gain = initial.iter().filter(|&&c| c > 0.0).sum::<f64>() / period as f64;
    let mut avg_loss = initial.iter().filter(|&&c| c < 0.0).map(|c| c.abs()).sum::<f64>()
        / period as f64;

    let mut out = Vec::with_capacity(changes.len() - period + 1);
    out.push(rsi_value(avg_gain, avg_loss));

    // Wilder smoothing over the remaining changes
    for &change in &changes[period..] {
        let gain = if change > 0.0 { change } else { 0.0 };
        let loss = if change < 0.0 { change.abs() } else { 0.0 };
        avg_gain = (avg_gain * (period - 1) as f64 + gain) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + loss) / period as f64;
        out.push(rsi_value(avg_gain, avg_loss));
    }

    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_empty_when_insufficient_data() {
        // Need at least period+1 = 15 values
        assert!(relative_strength_index(&vec![100.0; 14], 14).is_empty());
        assert!(relative_strength_index(&[], 14).is_empty());
    }

    #[test]
    fn rsi_output_length() {
        let closes: Vec<f64> = (0..100).map(|i| 100.0 + (i % 7) as f64).collect();
        assert_eq!(relative_strength_index(&closes, 14).len(), 86);
    }

    #[test]
    fn rsi_all_gains_is_100() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        for v in relative_strength_index(&closes, 14) {
            assert!((v - 100.0).abs() < 1e-9, "expected ~100, got {v}");
        }
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        for v in relative_strength_index(&closes, 14) {
            assert!(v.abs() < 1e-9, "expected ~0, got {v}");
        }
    }

    #[test]
    fn rsi_stays_in_range_on_mixed_series() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08, 45.89, 46.03,
            44.18, 44.22, 44.57, 43.42, 42.66, 43.13, 44.01, 44.96,
        ];
        let series = relative_strength_index(&closes, 14);
        assert!(!series.is_empty());
        for v in series {
            assert!((0.0..=100.0).contains(&v), "RSI out of range: {v}");
        }
    }
}
