pub mod catalog;
pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod export;
pub mod i18n;
pub mod models;

pub use config::TrainerConfig;
pub use error::StoreError;
pub use models::{Attempt, Category, Pair, PairStats, ProgressMap, ProgressTracker};
