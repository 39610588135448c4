pub mod attempt_log;
pub mod db;
pub mod preferences;
pub mod session_history;
pub mod store;

pub use attempt_log::AttemptLog;
pub use db::{SqliteStore, init_database};
pub use store::{KeyValueStore, MemoryStore};
