//! Diagram type definitions
//!
//! This module defines the fretboard values handed to the renderer.

use serde::{Deserialize, Serialize};

/// Fretted instruments with chord diagrams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Instrument {
    Guitar,
    Ukulele,
}

impl Instrument {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "guitar" | "violao" | "violão" => Some(Instrument::Guitar),
            "ukulele" | "uke" => Some(Instrument::Ukulele),
            _ => None,
        }
    }

    pub fn string_count(self) -> usize {
        match self {
            Instrument::Guitar => 6,
            Instrument::Ukulele => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Instrument::Guitar => "guitar",
            Instrument::Ukulele => "ukulele",
        }
    }
}

/// A fretboard shape for one chord
///
/// # Fields
/// - `positions`: One entry per string, lowest string first: `-1` muted, `0` open,
///   `n` fretted at fret `n` counted from `base_fret`
/// - `fingers`: Optional explicit fingering, same length as `positions` (`0` = none)
/// - `base_fret`: Fret shown on the diagram's top row (1 = nut)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordShape {
    pub instrument: Instrument,
    pub positions: Vec<i8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingers: Option<Vec<u8>>,
    pub base_fret: u8,
}

impl ChordShape {
    pub fn new(instrument: Instrument, positions: Vec<i8>) -> Self {
        Self {
            instrument,
            positions,
            fingers: None,
            base_fret: 1,
        }
    }
}

/// A single finger pressing several strings at one fret
///
/// `fret` uses the shape's own numbering, like `positions`. `finger` is `0`
/// when the shape gives no fingering for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Barre {
    pub fret: u8,
    pub first_string: usize,
    pub last_string: usize,
    pub finger: u8,
}

/// One row of shape data, as stored by a shape source
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ShapeRecord {
    pub name: String,
    pub instrument: Instrument,
    #[serde(default)]
    pub positions: Vec<i8>,
    #[serde(default)]
    pub fingers: Option<Vec<u8>>,
    #[serde(default)]
    pub base_fret: Option<u8>,
}

impl ShapeRecord {
    /// Check the record against its instrument and turn it into a shape.
    ///
    /// Records with no positions are not errors: they mark a chord the source
    /// knows about but has no diagram for, and yield `Ok(None)`.
    pub fn to_shape(&self) -> Result<Option<ChordShape>, String> {
        if self.positions.is_empty() {
            return Ok(None);
        }
        let strings = self.instrument.string_count();
        if self.positions.len() != strings {
            return Err(format!(
                "expected {} positions for {}, found {}",
                strings,
                self.instrument.name(),
                self.positions.len()
            ));
        }
        if let Some(fingers) = &self.fingers {
            if fingers.len() != strings {
                return Err(format!(
                    "expected {} fingers for {}, found {}",
                    strings,
                    self.instrument.name(),
                    fingers.len()
                ));
            }
        }
        if self.positions.iter().any(|&p| p < -1) {
            return Err("positions below -1".to_string());
        }
        Ok(Some(ChordShape {
            instrument: self.instrument,
            positions: self.positions.clone(),
            fingers: self.fingers.clone(),
            base_fret: self.base_fret.unwrap_or(1).max(1),
        }))
    }
}

/// Everything the renderer needs to draw one chord diagram
///
/// # Fields
/// - `name`: Chord name as requested
/// - `shape`: The resolved shape
/// - `barre`: Detected barre, if any
/// - `fingers`: Finger per string, explicit where the shape gives one and
///   assigned otherwise (`0` = muted/open)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    pub name: String,
    pub shape: ChordShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barre: Option<Barre>,
    pub fingers: Vec<u8>,
}
