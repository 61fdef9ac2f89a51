use proptest::prelude::*;

use indicators::{macd, relative_strength_index, simple_moving_average};

proptest! {
    /// SMA output length is exactly max(0, len - period + 1) for any input.
    #[test]
    fn sma_length_contract(
        closes in proptest::collection::vec(0.01f64..10_000.0, 0..400),
        period in 1usize..250,
    ) {
        let out = simple_moving_average(&closes, period);
        let expected = closes.len().saturating_sub(period - 1);
        prop_assert_eq!(out.len(), if closes.len() < period { 0 } else { expected });
    }

    /// Every SMA of a constant series equals that constant.
    #[test]
    fn sma_constant_series_is_identity(
        value in 0.01f64..10_000.0,
        len in 1usize..300,
        period in 1usize..100,
    ) {
        for v in simple_moving_average(&vec![value; len], period) {
            prop_assert!((v - value).abs() < 1e-9 * value.max(1.0));
        }
    }

    /// RSI values stay in [0, 100] for arbitrary positive price paths.
    #[test]
    fn rsi_stays_in_range(
        closes in proptest::collection::vec(0.01f64..10_000.0, 0..300),
        period in 2usize..30,
    ) {
        for v in relative_strength_index(&closes, period) {
            prop_assert!((0.0..=100.0).contains(&v), "RSI out of range: {v}");
        }
    }

    /// MACD histogram is always the difference of line and signal, and the
    /// output length follows the warm-up contract.
    #[test]
    fn macd_alignment_contract(
        closes in proptest::collection::vec(0.01f64..10_000.0, 0..200),
    ) {
        let out = macd(&closes, 12, 26, 9);
        if closes.len() < 26 + 9 {
            prop_assert!(out.is_empty());
        } else {
            prop_assert_eq!(out.len(), closes.len() - 26 - 9 + 2);
        }
        for p in out {
            prop_assert!((p.histogram - (p.value - p.signal)).abs() < 1e-6);
        }
    }
}
