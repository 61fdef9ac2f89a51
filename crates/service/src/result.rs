use serde::Serialize;

use common::{DailyBar, SymbolRecord};
use indicators::{macd, relative_strength_index, simple_moving_average, MacdPoint};

/// Number of most-recent bars feeding the 52-week summary statistics.
const STATS_WINDOW: usize = 252;

const SMA_SHORT: usize = 50;
const SMA_LONG: usize = 200;
const RSI_PERIOD: usize = 14;
const MACD_FAST: usize = 12;
const MACD_SLOW: usize = 26;
const MACD_SIGNAL: usize = 9;

/// Trailing-window summary statistics. Fields are `None` when no bar in the
/// window carries usable high/low/volume — "insufficient data", not an error.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    pub high52: Option<f64>,
    pub low52: Option<f64>,
    #[serde(rename = "avgVolume")]
    pub avg_volume: Option<u64>,
}

/// Derived indicator series, each aligned to the tail of the ascending closes.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorSet {
    pub sma50: Vec<f64>,
    pub sma200: Vec<f64>,
    pub rsi14: Vec<f64>,
    pub macd: Vec<MacdPoint>,
}

/// Composed response for one symbol, as served to the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesResult {
    #[serde(rename = "company")]
    pub display_name: String,
    pub symbol: String,
    /// Bars most-recent-first for display.
    #[serde(rename = "historical")]
    pub bars: Vec<DailyBar>,
    pub stats: SummaryStats,
    pub indicators: IndicatorSet,
}

impl SeriesResult {
    /// Assemble the display result from a stored record: reverse the bars,
    /// compute trailing-window statistics, and derive indicators from the
    /// ascending closes.
    pub fn compose(record: SymbolRecord) -> Self {
        let closes: Vec<f64> = record.bars.iter().map(|b| b.close).collect();

        let indicators = IndicatorSet {
            sma50: simple_moving_average(&closes, SMA_SHORT),
            sma200: simple_moving_average(&closes, SMA_LONG),
            rsi14: relative_strength_index(&closes, RSI_PERIOD),
            macd: macd(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL),
        };

        let mut bars = record.bars;
        bars.reverse();
        let stats = summary_stats(&bars);

        Self {
            display_name: record.display_name,
            symbol: record.symbol,
            bars,
            stats,
            indicators,
        }
    }
}

/// Statistics over the most recent `STATS_WINDOW` bars (all bars when history
/// is shorter). Bars without a positive high, low, and volume are excluded
/// before aggregation.
fn summary_stats(descending: &[DailyBar]) -> SummaryStats {
    let window = &descending[..descending.len().min(STATS_WINDOW)];
    let usable: Vec<&DailyBar> = window
        .iter()
        .filter(|b| b.high > 0.0 && b.low > 0.0 && b.volume > 0)
        .collect();

    if usable.is_empty() {
        return SummaryStats {
            high52: None,
            low52: None,
            avg_volume: None,
        };
    }

    let high52 = usable.iter().map(|b| b.high).fold(f64::MIN, f64::max);
    let low52 = usable.iter().map(|b| b.low).fold(f64::MAX, f64::min);
    let mean_volume =
        usable.iter().map(|b| b.volume as f64).sum::<f64>() / usable.len() as f64;

    SummaryStats {
        high52: Some(high52),
        low52: Some(low52),
        avg_volume: Some(mean_volume.round() as u64),
    }
}
