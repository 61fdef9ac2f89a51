pub mod controller;
pub mod result;
pub mod seeder;

pub use controller::SeriesService;
pub use result::{IndicatorSet, SeriesResult, SummaryStats};
pub use seeder::seed_catalog;
