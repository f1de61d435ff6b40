pub mod api;
pub mod canonical;
pub mod chord;
pub mod config;
pub mod diagram;
pub mod document;
pub mod error;
pub mod key;
pub mod lexer;
pub mod notes;
pub mod pitch;
pub mod transpose;

pub use api::Engine;
pub use canonical::{candidates, canonicalize};
pub use chord::{Chord, ChordQuality};
pub use config::{BarreRules, EngineConfig};
pub use diagram::{Barre, ChordShape, Diagram, Instrument, ShapeRecord, ShapeSource};
pub use document::{split_document, split_document_with, ParsedDocument};
pub use error::*;
pub use key::{is_minor, key_root, semitone_delta, transposition_between};
pub use lexer::{is_chord_line, tokenize, tokenize_document, Token, TokenKind};
pub use notes::{decompose, note_names};
pub use pitch::{Accidental, PitchClass};
pub use transpose::{transpose_chord, transpose_line, transpose_text, transpose_tokens};
