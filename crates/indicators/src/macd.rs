use serde::Serialize;

use crate::ema::ema_series;

/// One aligned sample of the MACD family: the MACD line, its signal line,
/// and their difference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdPoint {
    pub value: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// MACD (Moving Average Convergence/Divergence) series.
///
/// MACD line = EMA(fast) − EMA(slow); signal line = EMA of the MACD line over
/// `signal` samples; histogram = line − signal. All three are emitted as
/// aligned triples, so the output starts where the signal line starts and its
/// length is `closes.len() - slow - signal + 2`. Returns an empty series when
/// `closes.len() < slow + signal`.
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal: usize) -> Vec<MacdPoint> {
    assert!(fast < slow, "MACD fast period must be less than slow period");
    if fast == 0 || signal == 0 || closes.len() < slow + signal {
        return Vec::new();
    }

    // Both EMA series are tail-aligned to the input; the slow one starts
    // `slow - fast` entries later.
    let fast_ema = ema_series(closes, fast);
    let slow_ema = ema_series(closes, slow);
    let offset = slow - fast;

    let macd_line: Vec<f64> = slow_ema
        .iter()
        .enumerate()
        .map(|(i, &s)| fast_ema[i + offset] - s)
        .collect();

    let signal_line = ema_series(&macd_line, signal);

    macd_line[signal - 1..]
        .iter()
        .zip(&signal_line)
        .map(|(&value, &signal)| MacdPoint {
            value,
            signal,
            histogram: value - signal,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macd_empty_when_insufficient_data() {
        // 12/26/9 needs at least 35 closes
        let closes = vec![100.0; 34];
        assert!(macd(&closes, 12, 26, 9).is_empty());
    }

    #[test]
    fn macd_output_length() {
        let closes: Vec<f64> = (0..300).map(|i| 100.0 + i as f64).collect();
        // 300 - 26 - 9 + 2
        assert_eq!(macd(&closes, 12, 26, 9).len(), 267);
    }

    #[test]
    #[should_panic(expected = "fast period must be less than slow period")]
    fn macd_rejects_inverted_periods() {
        macd(&[1.0; 50], 26, 12, 9);
    }

    #[test]
    fn macd_of_constant_series_is_zero() {
        for p in macd(&vec![50.0; 60], 12, 26, 9) {
            assert!(p.value.abs() < 1e-9);
            assert!(p.signal.abs() < 1e-9);
            assert!(p.histogram.abs() < 1e-9);
        }
    }

    #[test]
    fn macd_positive_on_steady_uptrend() {
        // Fast EMA sits above slow EMA on a rising series
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + i as f64 * 0.5).collect();
        let series = macd(&closes, 12, 26, 9);
        let last = series.last().unwrap();
        assert!(last.value > 0.0);
    }

    #[test]
    fn macd_histogram_equals_line_minus_signal() {
        let closes: Vec<f64> = (0..120).map(|i| 100.0 + (i as f64 * 0.37).sin() * 5.0).collect();
        for p in macd(&closes, 12, 26, 9) {
            assert!((p.histogram - (p.value - p.signal)).abs() < 1e-12);
        }
    }
}
