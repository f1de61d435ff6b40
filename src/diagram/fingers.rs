//! Finger assignment for shapes without explicit fingering.

use super::types::Barre;

const MAX_FINGER: u8 = 4;

/// Assign a finger (1-4) to every fretted string; muted and open strings get 0.
///
/// Strings under the barre take the barre finger (1 when unknown). The
/// remaining strings are taken fret by fret, lowest first, and within a fret
/// in string order, each getting the next free finger from 1 up, skipping the
/// barre finger. Fingers never exceed 4; shapes needing more simply repeat
/// finger 4.
///
/// # Examples
/// ```
/// use cifra::diagram::assign_fingers;
///
/// // Open C: x32010
/// assert_eq!(assign_fingers(&[-1, 3, 2, 0, 1, 0], None), vec![0, 3, 2, 0, 1, 0]);
/// ```
pub fn assign_fingers(positions: &[i8], barre: Option<&Barre>) -> Vec<u8> {
    let mut fingers = vec![0u8; positions.len()];
    let mut barre_finger = None;

    if let Some(barre) = barre {
        let finger = match barre.finger {
            0 => 1,
            f => f.min(MAX_FINGER),
        };
        let span = barre.first_string..=barre.last_string;
        for (string, &fret) in positions.iter().enumerate() {
            if fret > 0 && fret as u8 == barre.fret && span.contains(&string) {
                fingers[string] = finger;
            }
        }
        barre_finger = Some(finger);
    }

    let mut remaining: Vec<(i8, usize)> = positions
        .iter()
        .enumerate()
        .filter(|&(string, &fret)| fret > 0 && fingers[string] == 0)
        .map(|(string, &fret)| (fret, string))
        .collect();
    remaining.sort_unstable();

    let mut next = 1u8;
    for (_, string) in remaining {
        if barre_finger == Some(next) {
            next += 1;
        }
        fingers[string] = next.min(MAX_FINGER);
        next = next.saturating_add(1);
    }

    fingers
}

/// Fill the gaps of an explicit fingering from an assigned one.
///
/// Explicit fingers win wherever they are set; strings the data left at 0
/// take the assigned finger.
pub fn merge_fingers(explicit: &[u8], assigned: &[u8]) -> Vec<u8> {
    explicit
        .iter()
        .zip(assigned)
        .map(|(&given, &computed)| if given == 0 { computed } else { given })
        .collect()
}
