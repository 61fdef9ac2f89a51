/// Simple moving average over each sliding window of length `period`.
///
/// Output length is `max(0, closes.len() - period + 1)`; the first output
/// entry corresponds to the close at index `period - 1`.
pub fn simple_moving_average(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.len() < period {
        return Vec::new();
    }

    closes
        .windows(period)
        .map(|w| w.iter().sum::<f64>() / period as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_empty_when_insufficient_data() {
        assert!(simple_moving_average(&[1.0, 2.0], 3).is_empty());
        assert!(simple_moving_average(&[], 1).is_empty());
    }

    #[test]
    fn sma_period_zero_is_empty() {
        assert!(simple_moving_average(&[1.0, 2.0, 3.0], 0).is_empty());
    }

    #[test]
    fn sma_output_length() {
        let closes: Vec<f64> = (0..300).map(|i| i as f64).collect();
        assert_eq!(simple_moving_average(&closes, 50).len(), 251);
        assert_eq!(simple_moving_average(&closes, 200).len(), 101);
    }

    #[test]
    fn sma_known_values() {
        let closes = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let sma = simple_moving_average(&closes, 3);
        assert_eq!(sma, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn sma_of_constant_series_is_constant() {
        let closes = vec![42.0; 60];
        for v in simple_moving_average(&closes, 14) {
            assert!((v - 42.0).abs() < 1e-12);
        }
    }
}
