/// Exponential moving average series, seeded with the SMA of the first
/// `period` values (same convention as TradingView and the common JS
/// indicator libraries).
///
/// Output is aligned to the tail: the first entry corresponds to the value at
/// index `period - 1`, so the length is `max(0, values.len() - period + 1)`.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let seed = values[..period].iter().sum::<f64>() / period as f64;

    let mut out = Vec::with_capacity(values.len() - period + 1);
    out.push(seed);

    let mut prev = seed;
    for &v in &values[period..] {
        prev = v * k + prev * (1.0 - k);
        out.push(prev);
    }
    out
}
