//! # Chord Symbols
//!
//! Recognizes and decomposes chord symbols such as `C`, `F#m7`, `Bb7(9)`,
//! `Dsus4`, `G/B` or `C°`.
//!
//! ## Grammar
//! ```text
//! Chord  ::= Root Accidental? Suffix? ('/' Root Accidental?)?
//! Root   ::= [A-G] | [a-g]
//! Accidental ::= '#' | 'b' | '♯' | '♭'
//! Suffix ::= ( Word | Digits | Accidental Digit | '/' Digit | '(' ... ')' )*
//! Word   ::= maj | min | dim | aug | sus | add | omit | no | m | M | - | + | ° | º | ø
//! ```
//!
//! A chord must end at a boundary (end of text, whitespace, `)`, `]` or `|`).
//! Anything else means the text is not a chord: `Amazing` is rejected because
//! `a` is not a suffix component.
//!
//! The suffix text is kept verbatim so unknown qualities still display and
//! transpose correctly; the [`ChordQuality`] tag is derived from it.

use crate::pitch::{read_note, Accidental, PitchClass};
use serde::Serialize;
use std::fmt;

/// Quality tag derived from a chord suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChordQuality {
    Major,
    Minor,
    Dominant7,
    Major7,
    Minor7,
    Diminished,
    Augmented,
    Sus2,
    Sus4,
    /// Any suffix outside the known set, kept verbatim.
    Other(String),
}

impl ChordQuality {
    /// Classify a chord suffix.
    ///
    /// Case-insensitive, except that an uppercase `M` is a major marker
    /// (`CM`, `CM7`, `C7M`) and never a minor one.
    ///
    /// # Examples
    /// ```
    /// use cifra::ChordQuality;
    ///
    /// assert_eq!(ChordQuality::classify(""), ChordQuality::Major);
    /// assert_eq!(ChordQuality::classify("m7"), ChordQuality::Minor7);
    /// assert_eq!(ChordQuality::classify("7M"), ChordQuality::Major7);
    /// assert_eq!(ChordQuality::classify("°"), ChordQuality::Diminished);
    /// assert_eq!(ChordQuality::classify("6/9"), ChordQuality::Other("6/9".to_string()));
    /// ```
    pub fn classify(suffix: &str) -> Self {
        let s = normalize_suffix(suffix);

        if s.is_empty() {
            return ChordQuality::Major;
        }
        if s.contains("sus2") {
            return ChordQuality::Sus2;
        }
        if s.contains("sus") {
            return ChordQuality::Sus4;
        }
        if s.contains("dim") || s.contains("m7b5") {
            return ChordQuality::Diminished;
        }
        if s.contains("aug") || s.contains('+') || s.contains("#5") {
            return ChordQuality::Augmented;
        }
        if let Some(rest) = s.strip_prefix("maj") {
            return if rest.contains('7') {
                ChordQuality::Major7
            } else {
                ChordQuality::Major
            };
        }
        if let Some(rest) = s.strip_prefix('m').or_else(|| s.strip_prefix('-')) {
            // Minor-major chords (mmaj7) have no tag of their own
            if rest.starts_with("maj") {
                return ChordQuality::Other(suffix.to_string());
            }
            return if rest.contains('7') {
                ChordQuality::Minor7
            } else {
                ChordQuality::Minor
            };
        }
        if s.starts_with('7') {
            return ChordQuality::Dominant7;
        }
        ChordQuality::Other(suffix.to_string())
    }

    pub fn is_minor(&self) -> bool {
        matches!(self, ChordQuality::Minor | ChordQuality::Minor7)
    }
}

/// Lowercase a suffix after resolving the uppercase major marker and the
/// diminished glyphs.
fn normalize_suffix(suffix: &str) -> String {
    let s = suffix
        .replace("7M", "maj7")
        .replace("M7", "maj7")
        .replace('M', "maj")
        .to_lowercase();
    s.replace("min", "m")
        .replace(&['°', 'º'][..], "dim")
        .replace("ø7", "m7b5")
        .replace('ø', "m7b5")
}

/// A parsed chord symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chord {
    pub root: PitchClass,
    /// Spelling style of the root.
    pub root_accidental: Accidental,
    pub quality: ChordQuality,
    /// Suffix exactly as written (`m7`, `7(9)`, `sus4`).
    pub suffix: String,
    /// Bass note of a slash chord.
    pub bass: Option<(PitchClass, Accidental)>,
}

impl Chord {
    /// Parse a whole string as one chord (surrounding whitespace allowed).
    pub fn parse_exact(text: &str) -> Option<Chord> {
        let trimmed = text.trim();
        match parse(trimmed) {
            Some((chord, len)) if len == trimmed.len() => Some(chord),
            _ => None,
        }
    }

    /// Root name in the chord's spelling style.
    pub fn root_name(&self) -> &'static str {
        self.root.spell(self.root_accidental)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root_name(), self.suffix)?;
        if let Some((bass, style)) = self.bass {
            write!(f, "/{}", bass.spell(style))?;
        }
        Ok(())
    }
}

/// Parse a chord symbol at the start of `text`.
///
/// Returns the chord and the number of bytes it spans, or `None` when the text
/// does not start with a chord. A non-match is not an error: callers treat the
/// text as lyrics.
///
/// # Examples
/// ```
/// use cifra::chord::parse;
///
/// let (chord, len) = parse("Bm7/F# rest of line").unwrap();
/// assert_eq!(len, 6);
/// assert_eq!(chord.to_string(), "Bm7/F#");
///
/// assert!(parse("Amazing grace").is_none());
/// ```
pub fn parse(text: &str) -> Option<(Chord, usize)> {
    let (root, root_accidental, mut pos) = read_note(text)?;

    let suffix_end = pos + suffix_len(&text[pos..])?;
    let suffix = &text[pos..suffix_end];
    pos = suffix_end;

    let mut bass = None;
    if let Some(rest) = text[pos..].strip_prefix('/') {
        let (pitch, accidental, len) = read_note(rest)?;
        bass = Some((pitch, accidental));
        pos += 1 + len;
    }

    if !ends_at_boundary(&text[pos..]) {
        return None;
    }

    let chord = Chord {
        root,
        root_accidental,
        quality: ChordQuality::classify(suffix),
        suffix: suffix.to_string(),
        bass,
    };
    Some((chord, pos))
}

/// True when the character may directly follow a chord symbol.
pub(crate) fn is_end_boundary(c: char) -> bool {
    c.is_whitespace() || matches!(c, ')' | ']' | '|')
}

fn ends_at_boundary(rest: &str) -> bool {
    rest.chars().next().map_or(true, is_end_boundary)
}

const SUFFIX_WORDS: [&str; 13] = [
    "maj", "min", "dim", "aug", "sus", "add", "m", "M", "-", "+", "°", "º", "ø",
];

/// Length in bytes of the suffix component run at the start of `text`.
///
/// Returns `None` for an unbalanced parenthesis group.
fn suffix_len(text: &str) -> Option<usize> {
    let mut pos = 0;
    let mut depth = 0usize;

    while pos < text.len() {
        let rest = &text[pos..];
        let mut chars = rest.chars();
        let Some(c) = chars.next() else { break };
        let next_is_digit = chars.next().is_some_and(|n| n.is_ascii_digit());

        let step = if c.is_ascii_digit() {
            rest.find(|ch: char| !ch.is_ascii_digit()).unwrap_or(rest.len())
        } else if Accidental::from_char(c).is_some() && next_is_digit {
            c.len_utf8()
        } else if c == '/' && next_is_digit {
            1
        } else if c == '(' {
            depth += 1;
            1
        } else if c == ')' && depth > 0 {
            depth -= 1;
            1
        } else if c == ',' && depth > 0 {
            1
        } else if let Some(word) = ["omit", "no"].iter().find(|w| {
            rest.strip_prefix(**w)
                .is_some_and(|r| r.starts_with(|ch: char| ch.is_ascii_digit()))
        }) {
            word.len()
        } else if let Some(word) = SUFFIX_WORDS.iter().find(|w| rest.starts_with(**w)) {
            word.len()
        } else {
            break;
        };
        pos += step;
    }

    if depth > 0 {
        None
    } else {
        Some(pos)
    }
}
