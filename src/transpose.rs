use crate::chord::Chord;
use crate::lexer::{tokenize, Token, TokenKind};

/// Transpose a single chord by the given number of semitones.
///
/// Root and bass move independently; each keeps its own accidental style, so
/// `Bb` up two semitones reads `C` and up three reads `Db`, while `A#` up three
/// reads `C#`. The suffix is copied verbatim.
///
/// # Examples
/// ```
/// use cifra::{transpose_chord, Chord};
///
/// let chord = Chord::parse_exact("Bb7/D").unwrap();
/// assert_eq!(transpose_chord(&chord, 3).to_string(), "Db7/F");
/// assert_eq!(transpose_chord(&chord, -12), chord);
/// ```
pub fn transpose_chord(chord: &Chord, semitones: i32) -> Chord {
    Chord {
        root: chord.root.shift(semitones),
        root_accidental: chord.root_accidental,
        quality: chord.quality.clone(),
        suffix: chord.suffix.clone(),
        bass: chord
            .bass
            .map(|(pitch, accidental)| (pitch.shift(semitones), accidental)),
    }
}

/// Transpose every chord token of a line; text tokens pass through unchanged.
///
/// Chord tokens take the re-spelled chord as their text and offsets are
/// recomputed for the rendered line.
pub fn transpose_tokens(tokens: &[Token], semitones: i32) -> Vec<Token> {
    if semitones.rem_euclid(12) == 0 {
        return tokens.to_vec();
    }

    let mut offset = 0;
    tokens
        .iter()
        .map(|token| {
            let kind = match &token.kind {
                TokenKind::Chord(chord, _) => {
                    let moved = transpose_chord(chord, semitones);
                    let text = moved.to_string();
                    TokenKind::Chord(moved, text)
                }
                TokenKind::Text(text) => TokenKind::Text(text.clone()),
            };
            let token = Token { kind, offset };
            offset += token.text().len();
            token
        })
        .collect()
}

fn width(text: &str) -> isize {
    text.chars().count() as isize
}

/// Words that may share a line with chords without making it a lyric line:
/// section labels (`[Intro]`, `Refrão:`), repeat marks (`(2x)`) and bar lines.
fn is_decoration(word: &str) -> bool {
    let wrapped = (word.starts_with('[') && word.ends_with(']'))
        || (word.starts_with('(') && word.ends_with(')'));
    wrapped
        || word.ends_with(':')
        || word.chars().all(|c| matches!(c, '|' | '(' | ')' | '[' | ']' | ':' | '-' | '.'))
}

/// A line of chords, possibly with decorations around them.
fn is_chord_row(tokens: &[Token]) -> bool {
    tokens.iter().any(|t| t.chord().is_some())
        && tokens.iter().all(|t| match &t.kind {
            TokenKind::Chord(..) => true,
            TokenKind::Text(text) => text.split_whitespace().all(is_decoration),
        })
}

/// An inline chord written inside a lyric, as in `[G]casa` or `(D)`.
fn is_bracketed(tokens: &[Token], i: usize) -> bool {
    let before = i
        .checked_sub(1)
        .and_then(|j| tokens.get(j))
        .and_then(|t| t.text().chars().last());
    let after = tokens.get(i + 1).and_then(|t| t.text().chars().next());
    matches!((before, after), (Some('['), Some(']')) | (Some('('), Some(')')))
}

/// Transpose one line of text, keeping chords in their original columns.
///
/// When a chord gets longer (`C` → `C#`) the whitespace after it shrinks, and
/// when it gets shorter the whitespace grows, so chords stay above the
/// syllables they belong to. At least one space is kept between chords.
///
/// Lyric lines are left alone except for inline chords in brackets or
/// parentheses, so a verse opening with "E" or "A" is not read as a chord.
///
/// # Examples
/// ```
/// use cifra::transpose_line;
///
/// assert_eq!(transpose_line("[Intro] G  D", 2), "[Intro] A  E");
/// assert_eq!(transpose_line("E eu te amo", 2), "E eu te amo");
/// assert_eq!(transpose_line("[G]E eu te amo", 2), "[A]E eu te amo");
/// ```
pub fn transpose_line(line: &str, semitones: i32) -> String {
    let tokens = tokenize(line);
    let whole_line = is_chord_row(&tokens);
    let movable: Vec<bool> = (0..tokens.len())
        .map(|i| tokens[i].chord().is_some() && (whole_line || is_bracketed(&tokens, i)))
        .collect();
    if semitones.rem_euclid(12) == 0 || !movable.contains(&true) {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + 8);
    // Columns the output currently runs ahead of the source
    let mut drift: isize = 0;
    let last = tokens.len() - 1;

    for (i, token) in tokens.iter().enumerate() {
        match &token.kind {
            TokenKind::Chord(_, text) if !movable[i] => out.push_str(text),
            TokenKind::Chord(chord, text) => {
                let moved = transpose_chord(chord, semitones).to_string();
                drift += width(&moved) - width(text);
                out.push_str(&moved);
            }
            TokenKind::Text(text) => {
                let rest = text.trim_start();
                let lead = width(&text[..text.len() - rest.len()]);
                if lead == 0 {
                    out.push_str(text);
                    continue;
                }

                let trailing = i == last && rest.is_empty();
                let keep = if trailing { 0 } else { 1 };
                let mut spaces = lead;
                if drift > 0 {
                    let removed = drift.min(lead - keep).max(0);
                    spaces -= removed;
                    drift -= removed;
                } else if drift < 0 && !trailing {
                    spaces -= drift;
                    drift = 0;
                }

                if spaces == lead {
                    out.push_str(text);
                } else {
                    out.push_str(&" ".repeat(spaces as usize));
                    out.push_str(rest);
                }
            }
        }
    }

    out
}

/// Transpose a whole chord sheet line by line.
///
/// Lyric lines are copied unchanged apart from bracketed inline chords. Line
/// endings are normalized to `\n`.
pub fn transpose_text(text: &str, semitones: i32) -> String {
    let mut out = text
        .lines()
        .map(|line| transpose_line(line, semitones))
        .collect::<Vec<_>>()
        .join("\n");
    if text.ends_with('\n') {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord;
    use crate::lexer::render;
    use crate::pitch::Accidental;

    const SAMPLE: [&str; 14] = [
        "C", "C#m7", "Db", "Ebmaj7", "F#7(9)", "Gb/Bb", "Ab°", "A#sus4", "Bb6/9", "B7M",
        "E#", "Cb", "D/F#", "em",
    ];

    fn chord(text: &str) -> Chord {
        Chord::parse_exact(text).unwrap()
    }

    fn moved(text: &str, semitones: i32) -> String {
        transpose_chord(&chord(text), semitones).to_string()
    }

    #[test]
    fn test_round_trip_restores_chord() {
        for text in SAMPLE {
            let c = chord(text);
            for n in -30..=30 {
                let there = transpose_chord(&c, n);
                assert_eq!(transpose_chord(&there, -n), c, "{} by {}", text, n);
            }
        }
    }

    #[test]
    fn test_octave_is_identity() {
        for text in SAMPLE {
            let c = chord(text);
            assert_eq!(transpose_chord(&c, 12), c);
            assert_eq!(transpose_chord(&c, -24), c);
        }
    }

    #[test]
    fn test_negative_shift_wraps() {
        assert_eq!(moved("C", -1), "B");
        assert_eq!(moved("C", -13), "B");
    }

    #[test]
    fn test_spelling_follows_original_style() {
        assert_eq!(moved("Db", 2), "Eb");
        assert_eq!(moved("C#", 2), "D#");
        assert_eq!(moved("Bb", 2), "C");
        assert_eq!(moved("Bb", 3), "Db");
        assert_eq!(moved("A#", 3), "C#");
        // Naturals fall back to the usual chord-sheet spelling
        assert_eq!(moved("C", 1), "C#");
        assert_eq!(moved("F", 5), "Bb");
        assert_eq!(moved("G", 1), "G#");
    }

    #[test]
    fn test_bass_moves_independently() {
        assert_eq!(moved("D/F#", 2), "E/G#");
        assert_eq!(moved("Gb/Bb", 1), "G/B");
        let c = transpose_chord(&chord("Eb/G"), 1);
        assert_eq!(c.bass.map(|(_, style)| style), Some(Accidental::None));
        assert_eq!(c.root_accidental, Accidental::Flat);
    }

    #[test]
    fn test_suffix_is_untouched() {
        assert_eq!(moved("F#7(9)", 1), "G7(9)");
        assert_eq!(moved("Cadd9(11)", 2), "Dadd9(11)");
        assert_eq!(moved("Bb6/9", -2), "Ab6/9");
    }

    #[test]
    fn test_transpose_tokens_keeps_text() {
        let tokens = tokenize("[C]Olha que [G]coisa");
        let up = transpose_tokens(&tokens, 2);
        assert_eq!(render(&up), "[D]Olha que [A]coisa");
        assert_eq!(up[1].offset, 1);
        assert_eq!(up.len(), tokens.len());
    }

    #[test]
    fn test_transpose_tokens_recomputes_offsets() {
        let tokens = tokenize("C G");
        let up = transpose_tokens(&tokens, 1);
        assert_eq!(render(&up), "C# G#");
        assert_eq!(up[2].offset, 3);
    }

    #[test]
    fn test_transpose_line_keeps_columns() {
        assert_eq!(transpose_line("C       G", 1), "C#      G#");
        assert_eq!(transpose_line("C#  D", -1), "C   C#");
        assert_eq!(transpose_line("C G", 1), "C# G#");
    }

    #[test]
    fn test_transpose_line_leaves_lyrics() {
        let line = "Amazing grace, how sweet the sound";
        assert_eq!(transpose_line(line, 5), line);
    }

    #[test]
    fn test_lyric_line_starting_with_note_letter() {
        let text = "G        D\nE eu te amo\nA casa caiu\n";
        assert_eq!(transpose_text(text, 2), "A        E\nE eu te amo\nA casa caiu\n");
    }

    #[test]
    fn test_inline_chords_on_lyric_line() {
        assert_eq!(transpose_line("[C]Olha que [G]coisa", 2), "[D]Olha que [A]coisa");
        assert_eq!(transpose_line("E eu (G) te amo", 2), "E eu (A) te amo");
        assert_eq!(transpose_line("A casa [Em]caiu", -2), "A casa [Dm]caiu");
    }

    #[test]
    fn test_decorated_chord_lines() {
        assert_eq!(transpose_line("Intro: C  G", 2), "Intro: D  A");
        assert_eq!(transpose_line("| C | G | (2x)", 2), "| D | A | (2x)");
        assert_eq!(transpose_line("[Refrão] Am  F", 2), "[Refrão] Bm  G");
    }

    #[test]
    fn test_transpose_text() {
        let text = "   G        D/F#\nMinha canção\n";
        assert_eq!(transpose_text(text, 2), "   A        E/G#\nMinha canção\n");
    }

    #[test]
    fn test_parse_then_transpose_keeps_quality() {
        let (c, _) = chord::parse("Em7 ").unwrap();
        let up = transpose_chord(&c, 5);
        assert_eq!(up.quality, c.quality);
        assert_eq!(up.to_string(), "Am7");
    }
}
