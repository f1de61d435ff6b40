//! # Public API
//!
//! This module contains the main entry point for the cifra library.
//!
//! ## Engine Operations
//!
//! - [`Engine::tokenize()`] - Split a line into chord and text tokens
//! - [`Engine::transpose_text()`] - Transpose a whole sheet by semitones
//! - [`Engine::transpose_text_to_key()`] - Transpose a sheet from one key to another
//! - [`Engine::diagram()`] - Fretboard diagram for a chord name
//! - [`Engine::chord_notes()`] - Note names for keyboard hints
//! - [`Engine::split_document()`] - Separate a scraped page into body and credits
//!
//! ## Typical Usage
//!
//! ```rust
//! use cifra::{Engine, Instrument};
//!
//! let engine = Engine::new();
//! let sheet = "G        D\nEu sei que vou\n";
//!
//! let up = engine.transpose_text(sheet, 2);
//! assert_eq!(up, "A        E\nEu sei que vou\n");
//!
//! let diagram = engine.diagram("Am", Instrument::Guitar).unwrap();
//! assert_eq!(diagram.shape.positions, vec![-1, 0, 2, 2, 1, 0]);
//! ```
//!
//! ## Custom Configuration
//!
//! ```rust
//! use cifra::{Engine, EngineConfig};
//!
//! let config = EngineConfig::from_yaml("document:\n  max-reviewers: 2\n")?;
//! let engine = Engine::with_config(config);
//! assert_eq!(engine.config().max_reviewers, 2);
//! # Ok::<(), cifra::CifraError>(())
//! ```
//!
//! An `Engine` is `Send + Sync`; share one behind an `Arc` so every caller
//! benefits from the same shape cache.

use crate::chord::Chord;
use crate::config::EngineConfig;
use crate::diagram::{build_diagram, BundledShapes, Diagram, Instrument, ShapeResolver, ShapeSource};
use crate::document::{split_document_with, ParsedDocument};
use crate::error::CifraError;
use crate::key::{key_root, semitone_delta};
use crate::lexer::{tokenize, Token};
use crate::notes::note_names;
use crate::transpose::transpose_text;

/// Chord notation and diagram engine.
pub struct Engine {
    config: EngineConfig,
    resolver: ShapeResolver,
}

impl Engine {
    /// Engine with the default configuration and the bundled shape dataset.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_source(config, BundledShapes::default())
    }

    /// Engine looking shapes up in `source`.
    ///
    /// Wrap a remote table in a [`FallbackSource`](crate::diagram::FallbackSource)
    /// to keep the bundled dataset as a backup.
    pub fn with_source(config: EngineConfig, source: impl ShapeSource + 'static) -> Self {
        let resolver = if config.cache_shapes {
            ShapeResolver::new(source)
        } else {
            ShapeResolver::uncached(source)
        };
        Self { config, resolver }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Split one line into chord and text tokens.
    ///
    /// # Example
    /// ```rust
    /// use cifra::Engine;
    ///
    /// let tokens = Engine::new().tokenize("[Intro] Em7 A7(9)");
    /// let chords: Vec<String> = tokens
    ///     .iter()
    ///     .filter_map(|t| t.chord())
    ///     .map(|c| c.to_string())
    ///     .collect();
    /// assert_eq!(chords, vec!["Em7", "A7(9)"]);
    /// ```
    pub fn tokenize(&self, line: &str) -> Vec<Token> {
        tokenize(line)
    }

    /// Transpose every chord of a sheet, keeping lyrics and column alignment.
    pub fn transpose_text(&self, text: &str, semitones: i32) -> String {
        transpose_text(text, semitones)
    }

    /// Transpose a sheet written in `from_key` so it sounds in `to_key`,
    /// moving by the shortest distance.
    ///
    /// # Example
    /// ```rust
    /// use cifra::Engine;
    ///
    /// let engine = Engine::new();
    /// assert_eq!(engine.transpose_text_to_key("C G Am F", "C", "D")?, "D A Bm G");
    /// # Ok::<(), cifra::CifraError>(())
    /// ```
    ///
    /// # Errors
    /// Returns [`CifraError::UnknownKey`] if either label has no recognizable root.
    pub fn transpose_text_to_key(
        &self,
        text: &str,
        from_key: &str,
        to_key: &str,
    ) -> Result<String, CifraError> {
        let (from, _) =
            key_root(from_key).ok_or_else(|| CifraError::UnknownKey(from_key.to_string()))?;
        let (to, _) = key_root(to_key).ok_or_else(|| CifraError::UnknownKey(to_key.to_string()))?;

        let semitones = semitone_delta(from, to);
        tracing::debug!(from = from_key, to = to_key, semitones, "Transposing to key");
        Ok(transpose_text(text, semitones))
    }

    /// Diagram for a chord name, or `None` if no shape is known.
    pub fn diagram(&self, name: &str, instrument: Instrument) -> Option<Diagram> {
        build_diagram(&self.resolver, &self.config.barre, name, instrument)
    }

    /// Note names of a chord, spelled in the chord's own accidental style.
    ///
    /// # Example
    /// ```rust
    /// use cifra::Engine;
    ///
    /// let notes = Engine::new().chord_notes("Bbm").unwrap();
    /// assert_eq!(notes, vec!["Bb", "Db", "F"]);
    /// assert!(Engine::new().chord_notes("lyrics").is_none());
    /// ```
    pub fn chord_notes(&self, name: &str) -> Option<Vec<String>> {
        Chord::parse_exact(name.trim()).map(|chord| note_names(&chord))
    }

    /// Separate a scraped page into body, composers and reviewers.
    pub fn split_document(&self, raw: &str) -> ParsedDocument {
        split_document_with(raw, self.config.max_reviewers)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
