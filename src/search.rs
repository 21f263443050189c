//! Search sessions over recently used file records.

pub mod config;
pub mod session;

pub use self::config::SearchConfig;
pub use self::session::{SearchResults, SearchSession};
