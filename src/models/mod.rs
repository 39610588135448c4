pub mod analytics;
pub mod attempt;
pub mod contrast;
pub mod difficulty;
pub mod pair;
pub mod progress_tracker;

pub use analytics::{ChartPoint, PairSummary};
pub use attempt::{Attempt, PairStats, ProgressMap};
pub use difficulty::{DifficultyController, GroupState, TierChange};
pub use pair::{Category, Pair};
pub use progress_tracker::ProgressTracker;
