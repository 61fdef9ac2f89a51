//! Pure indicator math over closing-price series.
//!
//! Every function takes closes ascending by date and returns a series aligned
//! to the tail of the input: the warm-up prefix produces no output entries.
//! The series is treated as a dense index sequence; calendar gaps between
//! trading days are intentionally ignored.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use ema::ema_series;
pub use macd::{macd, MacdPoint};
pub use rsi::relative_strength_index;
pub use sma::simple_moving_average;
