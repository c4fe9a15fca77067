//! Per-poll navigation history for the entity selectors of a comparison,
//! with a suggestion pool to fall back on when the history runs out.

pub mod client;
pub mod command;
pub mod config;
pub mod history;
pub mod pool;
pub mod selector;
pub mod suggestion;

pub use history::{Side, UidHistory};
pub use pool::{BasePool, CachedSuggestionPool, CandidateSource};
pub use selector::{ComparisonSession, Selector};
pub use suggestion::{SuggestionHistory, SuggestionPool};
