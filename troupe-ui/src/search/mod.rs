//! Filter and suggestion engines
//!
//! Both engines are pure functions over the loaded artist list; all I/O
//! (fallback location search, suggestion enrichment) lives in the
//! controller.

pub mod filter;
pub mod suggest;

pub use filter::filter;
pub use suggest::{suggest, Suggestion, SuggestionKind, SUGGESTION_LIMIT};
