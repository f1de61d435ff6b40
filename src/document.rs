//! # Scraped Document Splitting
//!
//! Separates a scraped chord-sheet page into its musical body and the credits
//! block the site appends after it.
//!
//! ## Layout
//! ```text
//! [Intro] G  D/F#  Em          <- body
//! ...
//! Composição de Fulano / Sicrano. Essa informação está errada?   <- first junk line
//! Colaboração e revisão
//! Beltrano, Ciclano
//! 11.258 exibições
//! ```
//!
//! Everything before the first junk line is body; the rest is metadata, from
//! which composer and reviewer names are read. A page with no junk line is all
//! body.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// Default cap on reviewer names read from a credits block.
pub const DEFAULT_MAX_REVIEWERS: usize = 12;

lazy_static! {
    static ref COMPOSER_RE: Regex =
        Regex::new(r"(?i)^\s*composição(?:\s+de\b|\s*:)?\s*(.*)$").unwrap();
    static ref REVIEW_RE: Regex =
        Regex::new(r"(?i)^\s*colaboração\s+e\s+revisão\s*:?\s*(.*)$").unwrap();
    static ref VIEWS_RE: Regex =
        Regex::new(r"(?i)^\s*[\d.,]+\s*(?:mil\s+|mi\s+)?exibições\s*$").unwrap();
    static ref SITE_NOTE_RE: Regex =
        Regex::new(r"(?i)essa\s+informação\s+está\s+errada").unwrap();
    static ref NUMERIC_RE: Regex = Regex::new(r"^\s*[\d.,]+\s*$").unwrap();
    static ref URL_RE: Regex = Regex::new(r"(?i)https?://|www\.").unwrap();
    static ref UI_LABEL_RE: Regex = Regex::new(
        r"(?i)^\s*(?:enviar correção|imprimir|exibir cifra simplificada|adicionar à lista|aprenda a tocar.*|ver mais|outras versões|essa informação está errada\?.*)\s*$"
    )
    .unwrap();
}

/// A scraped page split into body and credits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDocument {
    pub body: String,
    pub composers: Vec<String>,
    pub reviewers: Vec<String>,
}

fn is_junk(line: &str) -> bool {
    UI_LABEL_RE.is_match(line)
        || VIEWS_RE.is_match(line)
        || URL_RE.is_match(line)
        || COMPOSER_RE.is_match(line)
        || REVIEW_RE.is_match(line)
}

fn ends_reviewer_block(line: &str) -> bool {
    is_junk(line) || NUMERIC_RE.is_match(line)
}

/// Split a scraped document with the default reviewer cap.
///
/// # Examples
/// ```
/// use cifra::split_document;
///
/// let raw = "G  D\nLetra\nComposição: Fulano, Sicrano\n11.258 exibições";
/// let doc = split_document(raw);
/// assert_eq!(doc.body, "G  D\nLetra");
/// assert_eq!(doc.composers, vec!["Fulano", "Sicrano"]);
/// assert!(doc.reviewers.is_empty());
/// ```
pub fn split_document(raw: &str) -> ParsedDocument {
    split_document_with(raw, DEFAULT_MAX_REVIEWERS)
}

/// Split a scraped document, reading at most `max_reviewers` reviewer names.
pub fn split_document_with(raw: &str, max_reviewers: usize) -> ParsedDocument {
    let lines: Vec<&str> = raw.lines().collect();
    let cut = lines.iter().position(|l| is_junk(l)).unwrap_or(lines.len());
    let (body, metadata) = lines.split_at(cut);

    ParsedDocument {
        body: clean_body(body),
        composers: read_composers(metadata),
        reviewers: read_reviewers(metadata, max_reviewers),
    }
}

fn clean_body(lines: &[&str]) -> String {
    let trimmed: Vec<&str> = lines.iter().map(|l| l.trim_end()).collect();
    let first = trimmed.iter().position(|l| !l.is_empty());
    let last = trimmed.iter().rposition(|l| !l.is_empty());
    match (first, last) {
        (Some(first), Some(last)) => trimmed[first..=last].join("\n"),
        _ => String::new(),
    }
}

fn read_composers(metadata: &[&str]) -> Vec<String> {
    let Some(caps) = metadata.iter().find_map(|l| COMPOSER_RE.captures(l)) else {
        return Vec::new();
    };
    let text = caps.get(1).map_or("", |m| m.as_str());
    // The site follows the names with a "wrong information?" sentence
    let names = match SITE_NOTE_RE.find(text) {
        Some(note) => &text[..note.start()],
        None => text,
    };
    let names = names.trim_end().trim_end_matches('.');

    let mut composers = Vec::new();
    for name in names.split(&['/', ','][..]) {
        push_unique(&mut composers, name);
    }
    composers
}

fn read_reviewers(metadata: &[&str], max_reviewers: usize) -> Vec<String> {
    let Some(start) = metadata.iter().position(|l| REVIEW_RE.is_match(l)) else {
        return Vec::new();
    };

    let mut reviewers = Vec::new();
    let inline = REVIEW_RE
        .captures(metadata[start])
        .and_then(|caps| caps.get(1))
        .map_or("", |m| m.as_str());

    let following = metadata[start + 1..]
        .iter()
        .take_while(|l| !ends_reviewer_block(l));

    for line in std::iter::once(&inline).chain(following) {
        for name in line.split(',') {
            if reviewers.len() >= max_reviewers {
                return reviewers;
            }
            push_unique(&mut reviewers, name);
        }
    }
    reviewers
}

fn push_unique(names: &mut Vec<String>, raw: &str) {
    let name = raw.trim();
    if !name.is_empty() && !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}
