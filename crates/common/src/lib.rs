pub mod config;
pub mod error;
pub mod types;
pub mod watchlist;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
pub use watchlist::Watchlist;
