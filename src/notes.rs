//! Chord tones for keyboard hints
//!
//! Maps a chord's root and quality to the pitch classes it contains.
//!
//! # Interval Sets
//! - **Sus2**: root, major 2nd, perfect 5th
//! - **Sus4**: root, perfect 4th, perfect 5th
//! - **Diminished**: root, minor 3rd, diminished 5th
//! - **Augmented**: root, major 3rd, augmented 5th
//! - **Minor**: root, minor 3rd, perfect 5th
//! - **Major** (and anything else): root, major 3rd, perfect 5th
//!
//! Sevenths are added on top: major 7th (+11) for `Major7`, minor 7th (+10)
//! for `Minor7` and `Dominant7`. A diminished chord with a 7 gets +10 when
//! half-diminished (`ø`, `m7b5`) and +9 otherwise. Any suffix mentioning a 9
//! adds the major 9th (+14).

use crate::chord::{Chord, ChordQuality};
use crate::pitch::PitchClass;

fn triad(quality: &ChordQuality) -> [i32; 3] {
    match quality {
        ChordQuality::Sus2 => [0, 2, 7],
        ChordQuality::Sus4 => [0, 5, 7],
        ChordQuality::Diminished => [0, 3, 6],
        ChordQuality::Augmented => [0, 4, 8],
        ChordQuality::Minor | ChordQuality::Minor7 => [0, 3, 7],
        _ => [0, 4, 7],
    }
}

fn seventh(chord: &Chord) -> Option<i32> {
    match chord.quality {
        ChordQuality::Major7 => Some(11),
        ChordQuality::Minor7 | ChordQuality::Dominant7 => Some(10),
        ChordQuality::Diminished if chord.suffix.contains('ø') || chord.suffix.contains("7b5") => {
            Some(10)
        }
        ChordQuality::Diminished if chord.suffix.contains('7') => Some(9),
        _ => None,
    }
}

/// Pitch classes sounding in a chord.
///
/// Root first, duplicates removed. The order is not a voicing.
///
/// # Examples
/// ```
/// use cifra::{decompose, Chord, PitchClass};
///
/// let g7 = Chord::parse_exact("G7").unwrap();
/// let notes: Vec<u8> = decompose(&g7).iter().map(|p| p.value()).collect();
/// assert_eq!(notes, vec![7, 11, 2, 5]); // G B D F
/// ```
pub fn decompose(chord: &Chord) -> Vec<PitchClass> {
    let mut intervals: Vec<i32> = triad(&chord.quality).to_vec();
    if let Some(seventh) = seventh(chord) {
        intervals.push(seventh);
    }
    if chord.suffix.contains('9') {
        intervals.push(14);
    }

    let mut notes: Vec<PitchClass> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        let note = chord.root.shift(interval);
        if !notes.contains(&note) {
            notes.push(note);
        }
    }
    notes
}

/// Note names of a chord, spelled in the chord's accidental style.
pub fn note_names(chord: &Chord) -> Vec<String> {
    decompose(chord)
        .into_iter()
        .map(|p| p.spell(chord.root_accidental).to_string())
        .collect()
}
