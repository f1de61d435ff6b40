//! Key labels and the distance between keys.
//!
//! Key labels come from song metadata and key pickers: `G`, `Em`, `F# minor`,
//! `Bb major`, `c#m`.

use crate::pitch::{read_note, Accidental, PitchClass};

/// Root note of a key label.
pub fn key_root(label: &str) -> Option<(PitchClass, Accidental)> {
    let (pitch, accidental, _) = read_note(label.trim())?;
    Some((pitch, accidental))
}

/// True iff the label marks a minor key (`m`, `min`, `minor`, `-`), not
/// counting the `m` of `maj`/`major`.
pub fn is_minor(label: &str) -> bool {
    let trimmed = label.trim();
    let Some((_, _, len)) = read_note(trimmed) else {
        return false;
    };
    let quality = trimmed[len..].to_lowercase().replace("maj", "");
    quality.contains('m') || quality.contains('-')
}

/// Signed shortest distance in semitones from one root to another.
///
/// Defined as `((to - from + 6) mod 12) - 6`, so the result lies in `-6..=5`
/// and a tritone always resolves to `-6`.
///
/// # Examples
/// ```
/// use cifra::{semitone_delta, PitchClass};
///
/// let c = PitchClass::new(0);
/// let g = PitchClass::new(7);
/// assert_eq!(semitone_delta(c, g), -5);
/// assert_eq!(semitone_delta(g, c), 5);
/// ```
pub fn semitone_delta(from: PitchClass, to: PitchClass) -> i32 {
    (to.value() as i32 - from.value() as i32 + 6).rem_euclid(12) - 6
}

/// Semitones to transpose a sheet written in `from` so it sounds in `to`.
pub fn transposition_between(from: &str, to: &str) -> Option<i32> {
    let (from_root, _) = key_root(from)?;
    let (to_root, _) = key_root(to)?;
    Some(semitone_delta(from_root, to_root))
}
