use crate::chord::{self, Chord};
use serde::Serialize;

/// Token types for a chord-sheet line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenKind {
    /// A chord symbol and the text it was read from
    Chord(Chord, String),
    /// Lyrics, spacing, or anything else that is not a chord
    Text(String),
}

/// A token with its byte offset in the source line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

impl Token {
    /// Text this token renders as.
    pub fn text(&self) -> &str {
        match &self.kind {
            TokenKind::Chord(_, text) => text,
            TokenKind::Text(text) => text,
        }
    }

    pub fn chord(&self) -> Option<&Chord> {
        match &self.kind {
            TokenKind::Chord(chord, _) => Some(chord),
            TokenKind::Text(_) => None,
        }
    }
}

/// Lexer for one line of chord-sheet text
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    previous: Option<char>,
    // Lowercase roots only count on lines made entirely of chords
    allow_lowercase: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            previous: None,
            allow_lowercase: all_words_are_chords(input),
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.input[self.position..].chars().next()?;
        self.position += c.len_utf8();
        self.previous = Some(c);
        Some(c)
    }

    fn at_start_boundary(&self) -> bool {
        match self.previous {
            None => true,
            Some(c) => c.is_whitespace() || matches!(c, '(' | '[' | '|'),
        }
    }

    fn try_chord(&self) -> Option<(Chord, usize)> {
        if !self.at_start_boundary() {
            return None;
        }
        let rest = &self.input[self.position..];
        let (chord, len) = chord::parse(rest)?;
        let uppercase = rest.starts_with(|c: char| c.is_ascii_uppercase());
        if uppercase || self.allow_lowercase {
            Some((chord, len))
        } else {
            None
        }
    }

    /// Scan the line into chord and text tokens. Never fails: a line with no
    /// chords is a single text token.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut text_start: Option<usize> = None;

        while self.position < self.input.len() {
            if let Some((chord, len)) = self.try_chord() {
                if let Some(start) = text_start.take() {
                    tokens.push(Token {
                        kind: TokenKind::Text(self.input[start..self.position].to_string()),
                        offset: start,
                    });
                }
                let start = self.position;
                let text = &self.input[start..start + len];
                tokens.push(Token {
                    kind: TokenKind::Chord(chord, text.to_string()),
                    offset: start,
                });
                self.position += len;
                self.previous = text.chars().last();
                continue;
            }

            text_start.get_or_insert(self.position);
            self.advance();
        }

        if let Some(start) = text_start {
            tokens.push(Token {
                kind: TokenKind::Text(self.input[start..].to_string()),
                offset: start,
            });
        }

        tokens
    }
}

fn all_words_are_chords(line: &str) -> bool {
    let mut words = line
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| matches!(c, '(' | ')' | '[' | ']' | '|')))
        .filter(|w| !w.is_empty())
        .peekable();
    words.peek().is_some() && words.all(|w| Chord::parse_exact(w).is_some())
}

/// Tokenize one line of chord-sheet text.
///
/// # Examples
/// ```
/// use cifra::{tokenize, is_chord_line};
///
/// let tokens = tokenize("C G Am F");
/// assert_eq!(tokens.len(), 7);
/// assert!(is_chord_line(&tokens));
///
/// let lyrics = tokenize("Amazing grace");
/// assert_eq!(lyrics.len(), 1);
/// assert!(!is_chord_line(&lyrics));
/// ```
pub fn tokenize(line: &str) -> Vec<Token> {
    Lexer::new(line).tokenize()
}

/// Tokenize a whole document, one token list per line (`\n` or `\r\n`).
pub fn tokenize_document(text: &str) -> Vec<Vec<Token>> {
    text.lines().map(tokenize).collect()
}

/// A chord line holds at least one chord and nothing but whitespace besides.
pub fn is_chord_line(tokens: &[Token]) -> bool {
    let mut has_chord = false;
    for token in tokens {
        match &token.kind {
            TokenKind::Chord(..) => has_chord = true,
            TokenKind::Text(text) if !text.trim().is_empty() => return false,
            TokenKind::Text(_) => {}
        }
    }
    has_chord
}

/// Concatenate token texts back into a line.
pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(Token::text).collect()
}
