//! # Error Types
//!
//! This module defines the error types for the cifra engine.
//!
//! Most of the engine never fails: a substring that is not a chord becomes lyric
//! text, a chord with no diagram resolves to `None`, and a document without a
//! credits block is all body. Errors are reserved for the edges where outside
//! data enters the engine.
//!
//! ## Error Types
//! - `ConfigError` - Invalid YAML engine configuration
//! - `ShapeDataError` - A shape dataset that cannot be parsed
//! - `ShapeSourceError` - A shape source that failed to answer a lookup
//! - `UnknownKey` - A key label with no recognizable root note
//!
//! ## Usage
//! ```rust
//! use cifra::{Engine, CifraError};
//!
//! let engine = Engine::new();
//! match engine.transpose_text_to_key("C G Am F", "C", "H") {
//!     Ok(text) => println!("{}", text),
//!     Err(CifraError::UnknownKey(label)) => eprintln!("No such key: {}", label),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CifraError {
    /// Invalid engine configuration.
    ///
    /// # Example
    /// ```
    /// # use cifra::CifraError;
    /// let err = CifraError::ConfigError("same-fret-min-strings must be at least 1".to_string());
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Invalid configuration: same-fret-min-strings must be at least 1"
    /// );
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The shape dataset could not be parsed.
    #[error("Invalid shape data: {0}")]
    ShapeDataError(String),

    /// A shape source failed to answer a lookup.
    ///
    /// # Example
    /// ```
    /// # use cifra::CifraError;
    /// let err = CifraError::ShapeSourceError {
    ///     source_name: "remote".to_string(),
    ///     message: "connection refused".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Shape source 'remote' failed: connection refused");
    /// ```
    #[error("Shape source '{source_name}' failed: {message}")]
    ShapeSourceError {
        source_name: String,
        message: String,
    },

    /// A key label whose root note could not be recognized.
    #[error("Unknown key: {0}")]
    UnknownKey(String),
}
