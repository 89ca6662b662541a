//! # Troupe Common Library
//!
//! Shared code for the Troupe artist directory client:
//! - Artist entity model and wire-shape normalization
//! - Error types
//! - Configuration loading

pub mod artist;
pub mod config;
pub mod error;

pub use artist::{Artist, CreationDate};
pub use config::UiConfig;
pub use error::{Error, Result};
