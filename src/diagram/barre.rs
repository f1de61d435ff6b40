//! Barre detection
//!
//! Decides whether a shape is played with a barre and where. Three strategies
//! are tried in order and the first hit wins:
//!
//! 1. **A-shape override** - 6-string shapes like `B` (`x24442`) show the barre
//!    only on strings 1 and 5, but the index finger covers the whole span.
//! 2. **Explicit fingers** - strings sharing both a fret and a finger number.
//! 3. **Same lowest fret** - enough strings on the lowest fretted fret.

use super::types::Barre;
use crate::config::BarreRules;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Detect a barre with the default thresholds.
///
/// # Examples
/// ```
/// use cifra::diagram::detect_barre;
///
/// let barre = detect_barre(&[-1, 2, 2, 2, 2, 4], None).unwrap();
/// assert_eq!(barre.fret, 2);
/// assert_eq!((barre.first_string, barre.last_string), (1, 4));
/// assert_eq!(barre.finger, 0);
///
/// // Open C has no barre
/// assert!(detect_barre(&[-1, 3, 2, 0, 1, 0], None).is_none());
/// ```
pub fn detect_barre(positions: &[i8], fingers: Option<&[u8]>) -> Option<Barre> {
    BarreRules::default().detect(positions, fingers)
}

impl BarreRules {
    /// Detect a barre using these thresholds.
    pub fn detect(&self, positions: &[i8], fingers: Option<&[u8]>) -> Option<Barre> {
        self.a_shape(positions)
            .or_else(|| fingers.and_then(|f| explicit_fingers(positions, f)))
            .or_else(|| self.same_lowest_fret(positions))
    }

    fn a_shape(&self, positions: &[i8]) -> Option<Barre> {
        if positions.len() != 6 || positions[0] != -1 {
            return None;
        }
        let fret = positions[1];
        if fret <= 0 || positions[5] != fret {
            return None;
        }
        let higher = positions[2..=4].iter().filter(|&&p| p > fret).count();
        if higher < self.a_shape_min_higher_strings {
            return None;
        }
        let lowest = positions.iter().copied().filter(|&p| p > 0).min()?;
        if lowest != fret {
            return None;
        }
        Some(Barre {
            fret: fret as u8,
            first_string: 1,
            last_string: 5,
            finger: 1,
        })
    }

    fn same_lowest_fret(&self, positions: &[i8]) -> Option<Barre> {
        let lowest = positions.iter().copied().filter(|&p| p > 0).min()?;
        let strings: Vec<usize> = positions
            .iter()
            .enumerate()
            .filter(|(_, &p)| p == lowest)
            .map(|(i, _)| i)
            .collect();

        let threshold = if positions.len() >= 6 {
            self.same_fret_min_strings
        } else {
            self.same_fret_min_strings_short
        };
        if strings.len() < threshold.max(2) {
            return None;
        }
        Some(Barre {
            fret: lowest as u8,
            first_string: strings[0],
            last_string: strings[strings.len() - 1],
            finger: 0,
        })
    }
}

fn explicit_fingers(positions: &[i8], fingers: &[u8]) -> Option<Barre> {
    if fingers.len() != positions.len() {
        return None;
    }

    let mut groups: BTreeMap<(i8, u8), Vec<usize>> = BTreeMap::new();
    for (string, (&fret, &finger)) in positions.iter().zip(fingers).enumerate() {
        if fret > 0 && finger > 0 {
            groups.entry((fret, finger)).or_default().push(string);
        }
    }

    groups
        .into_iter()
        .filter(|(_, strings)| strings.len() >= 2)
        .map(|((fret, finger), strings)| Barre {
            fret: fret as u8,
            first_string: strings[0],
            last_string: strings[strings.len() - 1],
            finger,
        })
        .min_by_key(|b| (b.finger != 1, b.fret, Reverse(b.last_string - b.first_string)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a_shape_override() {
        // B major: x24442
        let barre = detect_barre(&[-1, 2, 4, 4, 4, 2], None).unwrap();
        assert_eq!(
            barre,
            Barre { fret: 2, first_string: 1, last_string: 5, finger: 1 }
        );
    }

    #[test]
    fn test_a_shape_override_beats_explicit_fingers() {
        // Bm: x24432 with fingers that would group strings 2-3 on finger 3
        let barre = detect_barre(&[-1, 2, 4, 4, 3, 2], Some(&[0, 1, 3, 3, 2, 1])).unwrap();
        assert_eq!((barre.first_string, barre.last_string, barre.finger), (1, 5, 1));
    }

    #[test]
    fn test_a_shape_needs_enough_higher_strings() {
        // Only string 2 above the outer fret
        assert!(BarreRules::default().a_shape(&[-1, 2, 4, 2, 2, 2]).is_none());
        let relaxed = BarreRules { a_shape_min_higher_strings: 1, ..BarreRules::default() };
        assert!(relaxed.a_shape(&[-1, 2, 4, 2, 2, 2]).is_some());
    }

    #[test]
    fn test_a_shape_requires_lowest_fret() {
        // Last string matches string 1 but string 2 is lower still
        assert!(BarreRules::default().a_shape(&[-1, 3, 1, 5, 5, 3]).is_none());
    }

    #[test]
    fn test_same_fret_fallback_when_last_string_differs() {
        let barre = detect_barre(&[-1, 2, 2, 2, 2, 4], None).unwrap();
        assert_eq!(
            barre,
            Barre { fret: 2, first_string: 1, last_string: 4, finger: 0 }
        );
    }

    #[test]
    fn test_explicit_finger_majority() {
        // F major: 133211 with index finger across the first fret
        let barre = detect_barre(&[1, 3, 3, 2, 1, 1], Some(&[1, 3, 4, 2, 1, 1])).unwrap();
        assert_eq!(
            barre,
            Barre { fret: 1, first_string: 0, last_string: 5, finger: 1 }
        );
    }

    #[test]
    fn test_explicit_prefers_index_finger_over_lower_fret() {
        // Finger 2 covers fret 1 on two strings, finger 1 covers fret 2 on two strings
        let barre = detect_barre(&[-1, 1, 1, 2, 2, -1], Some(&[0, 2, 2, 1, 1, 0])).unwrap();
        assert_eq!((barre.fret, barre.finger), (2, 1));
    }

    #[test]
    fn test_explicit_prefers_widest_span_on_tie() {
        // Fingers 2 and 3 both lie flat on fret 2; finger 3 spans more strings
        let barre = detect_barre(&[2, 2, 2, 2, 2, -1], Some(&[2, 2, 3, 3, 3, 0])).unwrap();
        assert_eq!((barre.first_string, barre.last_string, barre.finger), (2, 4, 3));
    }

    #[test]
    fn test_mismatched_fingers_are_ignored() {
        let barre = detect_barre(&[1, 3, 3, 2, 1, 1], Some(&[1, 3])).unwrap();
        // Falls back to the same-fret strategy
        assert_eq!(barre.finger, 0);
        assert_eq!((barre.first_string, barre.last_string), (0, 5));
    }

    #[test]
    fn test_higher_shared_fret_is_not_a_barre() {
        // Three strings share fret 2 but fret 1 is lower
        assert!(detect_barre(&[0, 2, 2, 1, 0, 2], None).is_none());
    }

    #[test]
    fn test_open_and_muted_shapes() {
        assert!(detect_barre(&[0, 2, 2, 1, 0, 0], None).is_none());
        assert!(detect_barre(&[-1, -1, -1, -1, -1, -1], None).is_none());
        assert!(detect_barre(&[], None).is_none());
    }

    #[test]
    fn test_short_instrument_threshold() {
        // Ukulele Cm: 0333
        let barre = detect_barre(&[0, 3, 3, 3], None).unwrap();
        assert_eq!((barre.fret, barre.first_string, barre.last_string), (3, 1, 3));
        // Two strings are enough on four strings
        let barre = detect_barre(&[2, 2, 0, 0], None).unwrap();
        assert_eq!((barre.first_string, barre.last_string), (0, 1));
    }
}
