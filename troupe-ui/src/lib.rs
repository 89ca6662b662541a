//! troupe-ui library - artist directory client
//!
//! Loads artist records from the directory backend, keeps a TTL-bounded
//! in-memory snapshot, filters it with a debounced free-text query,
//! produces deduplicated autocomplete suggestions, and renders the result
//! as a pure display tree for the front end to print.

pub mod client;
pub mod controller;
pub mod keys;
pub mod loader;
pub mod search;
pub mod view;

pub use client::DirectoryClient;
pub use controller::SearchController;
