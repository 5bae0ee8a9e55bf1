//! GameStore Common Library
//!
//! Domain types, configuration and JSON accessors shared by the
//! Release-vs-Dev regression harness.

pub mod config;
pub mod error;
pub mod json;
pub mod types;

// Re-export commonly used types
pub use config::ApiConfig;
pub use error::{Error, Result};
pub use json::{JsonBody, ROOT_FIELD};
pub use types::*;
