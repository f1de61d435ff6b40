//! # Diagram Module
//!
//! Fretboard chord diagrams for guitar and ukulele.
//!
//! ## Purpose
//! Turns a chord name into everything a renderer needs to draw its diagram:
//! 1. **Shape** - which fret each string is played at (`resolver`)
//! 2. **Barre** - whether one finger lies across several strings (`barre`)
//! 3. **Fingers** - which finger presses each string (`fingers`)
//!
//! ## Sub-modules
//! - `types` - Instrument, ChordShape, Barre, ShapeRecord, Diagram
//! - `resolver` - Shape lookup with candidate fallback and caching
//! - `barre` - Barre detection heuristics
//! - `fingers` - Finger auto-assignment
//!
//! ## Entry Point
//! [`build_diagram()`] - Resolve a chord and derive its barre and fingering
//!
//! ## Example
//! ```rust
//! use cifra::diagram::{build_diagram, BundledShapes, Instrument, ShapeResolver};
//! use cifra::config::BarreRules;
//!
//! let resolver = ShapeResolver::new(BundledShapes::default());
//! let diagram = build_diagram(&resolver, &BarreRules::default(), "F", Instrument::Guitar).unwrap();
//!
//! assert_eq!(diagram.shape.positions, vec![1, 3, 3, 2, 1, 1]);
//! assert_eq!(diagram.barre.unwrap().fret, 1);
//! assert_eq!(diagram.fingers, vec![1, 3, 4, 2, 1, 1]);
//! ```
//!
//! ## Fret Numbering
//! Positions, barre frets and base frets all use the shape's own numbering:
//! a shape with `base_fret = 3` and a position of `1` is played at the third
//! fret of the instrument. Nothing in this module converts to absolute frets.
//!
//! ## Related Modules
//! - `canonical` - Chord spellings tried during lookup
//! - `config` - Barre thresholds

mod barre;
mod fingers;
mod resolver;
mod types;

#[cfg(test)]
mod tests;

pub use barre::detect_barre;
pub use fingers::{assign_fingers, merge_fingers};
pub use resolver::{BundledShapes, FallbackSource, ShapeResolver, ShapeSource};
pub use types::{Barre, ChordShape, Diagram, Instrument, ShapeRecord};

use crate::config::BarreRules;

/// Resolve a chord's shape and derive its barre and fingering.
///
/// Explicit fingers from the shape data serve as barre hints and take
/// precedence over assigned ones; strings the data leaves without a finger are
/// filled in.
pub fn build_diagram(
    resolver: &ShapeResolver,
    rules: &BarreRules,
    name: &str,
    instrument: Instrument,
) -> Option<Diagram> {
    let shape = resolver.resolve(name, instrument)?;
    let barre = rules.detect(&shape.positions, shape.fingers.as_deref());
    let assigned = assign_fingers(&shape.positions, barre.as_ref());
    let fingers = match &shape.fingers {
        Some(explicit) => merge_fingers(explicit, &assigned),
        None => assigned,
    };

    Some(Diagram {
        name: name.trim().to_string(),
        shape,
        barre,
        fingers,
    })
}
