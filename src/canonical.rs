//! Canonical chord names for shape lookup.
//!
//! Chord sheets spell the same chord many ways (`C°`, `Cdim`, `C dim`,
//! `CM7`, `C7M`, `Cmaj7`, `C major`). Shape datasets are keyed by one
//! canonical spelling, and [`candidates`] lists the names worth trying in
//! order.

use crate::pitch::{read_note, Accidental};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PARENTHETICAL_RE: Regex = Regex::new(r"\([^)]*\)").unwrap();
    static ref MAJOR_WORD_RE: Regex = Regex::new(r"(?i)major").unwrap();
    static ref MINOR_WORD_RE: Regex = Regex::new(r"(?i)min(or)?").unwrap();
}

/// Normalize a chord spelling into its canonical lookup key.
///
/// # Examples
/// ```
/// use cifra::canonicalize;
///
/// assert_eq!(canonicalize("C°"), "Cdim");
/// assert_eq!(canonicalize("Cdim"), "Cdim");
/// assert_eq!(canonicalize("G7M"), "Gmaj7");
/// assert_eq!(canonicalize("A minor"), "Am");
/// assert_eq!(canonicalize("E7(9)"), "E7");
/// ```
pub fn canonicalize(raw: &str) -> String {
    let stripped = PARENTHETICAL_RE.replace_all(raw, "");
    let compact: String = stripped
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '♯' => '#',
            '♭' => 'b',
            other => other,
        })
        .collect();

    let words = MAJOR_WORD_RE.replace_all(&compact, "");
    let words = MINOR_WORD_RE.replace_all(&words, "m");

    let symbols = words
        .replace(&['°', 'º'][..], "dim")
        .replace("ø7", "m7b5")
        .replace('ø', "m7b5")
        .replace("7M", "maj7")
        .replace("M7", "maj7");

    // Root letter is always uppercase in the dataset
    let mut chars = symbols.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Lookup names for a chord, most specific first.
///
/// 1. The canonical name.
/// 2. For slash chords, the name without its bass note.
/// 3. Enharmonic respellings of the root (`A#m` → `Bbm`) of the above.
pub fn candidates(raw: &str) -> Vec<String> {
    let canonical = canonicalize(raw);
    let mut names = vec![canonical.clone()];

    if let Some(without_bass) = strip_bass(&canonical) {
        names.push(without_bass.to_string());
    }

    let respelled: Vec<String> = names.iter().filter_map(|n| respell_root(n)).collect();
    for name in respelled {
        if !names.contains(&name) {
            names.push(name);
        }
    }

    names
}

/// Drop a trailing `/Bass` note; `6/9` style suffixes are not bass notes.
fn strip_bass(name: &str) -> Option<&str> {
    let slash = name.rfind('/')?;
    let bass = &name[slash + 1..];
    read_note(bass)?;
    Some(&name[..slash])
}

fn respell_root(name: &str) -> Option<String> {
    let (pitch, accidental, len) = read_note(name)?;
    if accidental == Accidental::None {
        return None;
    }
    let other = pitch.enharmonic(&name[..len])?;
    Some(format!("{}{}", other, &name[len..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diminished_glyphs() {
        assert_eq!(canonicalize("C°"), "Cdim");
        assert_eq!(canonicalize("Cº"), "Cdim");
        assert_eq!(canonicalize("Cdim"), "Cdim");
        assert_eq!(canonicalize("Bø"), "Bm7b5");
        assert_eq!(canonicalize("Bø7"), "Bm7b5");
        assert_eq!(canonicalize("F#ø7"), "F#m7b5");
    }

    #[test]
    fn test_major_seventh_variants() {
        assert_eq!(canonicalize("CM7"), "Cmaj7");
        assert_eq!(canonicalize("C7M"), "Cmaj7");
        assert_eq!(canonicalize("Cmaj7"), "Cmaj7");
    }

    #[test]
    fn test_words() {
        assert_eq!(canonicalize("C major"), "C");
        assert_eq!(canonicalize("D minor"), "Dm");
        assert_eq!(canonicalize("Dmin7"), "Dm7");
        assert_eq!(canonicalize("Cmaj9"), "Cmaj9");
    }

    #[test]
    fn test_whitespace_and_annotations() {
        assert_eq!(canonicalize(" F# m "), "F#m");
        assert_eq!(canonicalize("A7(13)"), "A7");
        assert_eq!(canonicalize("G (riff)"), "G");
    }

    #[test]
    fn test_unicode_accidentals() {
        assert_eq!(canonicalize("B♭m"), "Bbm");
        assert_eq!(canonicalize("F♯"), "F#");
    }

    #[test]
    fn test_candidates_plain() {
        assert_eq!(candidates("Am"), vec!["Am"]);
        assert_eq!(candidates("am"), vec!["Am"]);
    }

    #[test]
    fn test_candidates_slash_chord() {
        assert_eq!(candidates("D/F#"), vec!["D/F#", "D"]);
        assert_eq!(candidates("C6/9"), vec!["C6/9"]);
    }

    #[test]
    fn test_candidates_enharmonic() {
        assert_eq!(candidates("A#m"), vec!["A#m", "Bbm"]);
        assert_eq!(candidates("Db/F"), vec!["Db/F", "Db", "C#/F", "C#"]);
    }
}
