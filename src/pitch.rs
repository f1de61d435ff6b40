//! # Pitch Classes and Spelling
//!
//! The twelve chromatic pitch classes (C=0 … B=11) and the table that spells
//! them with letters and accidentals.
//!
//! ## Spelling Rules
//! - Natural pitch classes (C D E F G A B) always spell as their letter.
//! - Ambiguous pitch classes (1, 3, 6, 8, 10) follow the accidental style:
//!   `Sharp` → `C#`, `Flat` → `Db`.
//! - With no style (`Accidental::None`) the usual chord-sheet spelling is used:
//!   C#, Eb, F#, G#, Bb.

use serde::Serialize;
use std::fmt;

/// Written accidental of a root or bass note.
///
/// Acts as the spelling style of a chord: transposition copies it unchanged
/// and only the display of ambiguous pitch classes depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    #[default]
    None,
    Sharp,
    Flat,
}

impl Accidental {
    /// Recognize an accidental character (`#`, `b`, `♯`, `♭`).
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' | '♯' => Some(Accidental::Sharp),
            'b' | '♭' => Some(Accidental::Flat),
            _ => None,
        }
    }

    fn offset(self) -> i32 {
        match self {
            Accidental::None => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }
}

/// A chromatic pitch class, always in `0..12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PitchClass(u8);

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];
const DEFAULT_NAMES: [&str; 12] = [
    "C", "C#", "D", "Eb", "E", "F", "F#", "G", "G#", "A", "Bb", "B",
];

impl PitchClass {
    /// Build a pitch class from any integer, reducing it modulo 12.
    pub fn new(value: i32) -> Self {
        PitchClass(value.rem_euclid(12) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Pitch class of a note letter (case-insensitive) with an accidental.
    pub fn from_letter(letter: char, accidental: Accidental) -> Option<Self> {
        let base = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };
        Some(PitchClass::new(base + accidental.offset()))
    }

    /// Shift by a signed number of semitones.
    pub fn shift(self, semitones: i32) -> Self {
        PitchClass::new(self.0 as i32 + semitones)
    }

    /// True when the pitch class has both a sharp and a flat spelling.
    pub fn is_ambiguous(self) -> bool {
        matches!(self.0, 1 | 3 | 6 | 8 | 10)
    }

    /// Spell this pitch class in the given accidental style.
    pub fn spell(self, style: Accidental) -> &'static str {
        let i = self.0 as usize;
        match style {
            Accidental::Sharp => SHARP_NAMES[i],
            Accidental::Flat => FLAT_NAMES[i],
            Accidental::None => DEFAULT_NAMES[i],
        }
    }

    /// The other spelling of an ambiguous pitch class (`C#` ↔ `Db`), if any.
    pub fn enharmonic(self, name: &str) -> Option<&'static str> {
        if !self.is_ambiguous() {
            return None;
        }
        let i = self.0 as usize;
        if name == SHARP_NAMES[i] {
            Some(FLAT_NAMES[i])
        } else {
            Some(SHARP_NAMES[i])
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spell(Accidental::None))
    }
}

/// Read a note name (`F#`, `Bb`, `e`) from the start of `text`.
///
/// Returns the pitch class, the written accidental and the number of bytes
/// consumed.
pub fn read_note(text: &str) -> Option<(PitchClass, Accidental, usize)> {
    let mut chars = text.chars();
    let letter = chars.next()?;
    let mut accidental = Accidental::None;
    let mut len = letter.len_utf8();
    if let Some(c) = chars.next() {
        if let Some(acc) = Accidental::from_char(c) {
            accidental = acc;
            len += c.len_utf8();
        }
    }
    let pitch = PitchClass::from_letter(letter, accidental)?;
    Some((pitch, accidental, len))
}
