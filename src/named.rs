//! Flattens the per-record name lists into the sorted lookup tables the
//! decoder embeds.

use lazy_static::lazy_static;
use regex::Regex;

use crate::table::{single_scalar, EntityRecord};
use crate::TableError;

/// Characters a decoder must handle even in minimal mode, besides whitespace.
const MINIMAL_SPECIALS: [char; 6] = ['"', '\'', '&', '\\', '<', '>'];

/// One (spelling, decoded character) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedEntry {
    /// The spelling as scraped, delimiters included (`"&amp;"`, `"&amp"`).
    pub name: String,
    pub ch: char,
}

/// The flattened lookup tables plus the sizing constant the decoder needs.
#[derive(Clone, Debug)]
pub struct NamedTables {
    /// Every (name, character) pair, sorted bytewise by name.
    pub entries: Vec<NamedEntry>,
    /// The subset whose character is whitespace or a markup special.
    pub minimal: Vec<NamedEntry>,
    /// Longest name in characters, delimiters included.
    pub max_name_length: usize,
}

lazy_static! {
    static ref IDENT: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Must a decoder that only handles the safety-critical set still decode
/// entities for this character?
pub fn is_minimal(ch: char) -> bool {
    ch.is_whitespace() || MINIMAL_SPECIALS.contains(&ch)
}

fn decoded_char(record: &EntityRecord) -> Result<char, TableError> {
    single_scalar(&record.character).ok_or_else(|| {
        TableError::MalformedInput(format!(
            "record \"{}\": character field {:?} is not a single scalar but has named spellings {:?}",
            record.desc, record.character, record.named
        ))
    })
}

/// Flatten, sort, and filter the named-entity spellings.
///
/// Names are compared as literal text, leading `&` and trailing `;` (or its
/// absence) included; nothing is normalized. Spellings whose interior is
/// not identifier-shaped are reported via `log::warn!` only.
pub fn named_tables(records: &[EntityRecord]) -> Result<NamedTables, TableError> {
    let mut entries = Vec::new();
    for record in records {
        if record.named.is_empty() {
            continue;
        }
        let ch = decoded_char(record)?;
        for name in &record.named {
            entries.push(NamedEntry {
                name: name.clone(),
                ch,
            });
        }
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    for entry in &entries {
        let interior = entry.name.strip_prefix('&').unwrap_or(&entry.name);
        let interior = interior.strip_suffix(';').unwrap_or(interior);
        if !IDENT.is_match(interior) {
            log::warn!("entity name {:?} has a non-identifier interior", entry.name);
        }
    }

    let minimal = entries
        .iter()
        .filter(|e| is_minimal(e.ch))
        .cloned()
        .collect();
    let max_name_length = entries
        .iter()
        .map(|e| e.name.chars().count())
        .max()
        .unwrap_or(0);

    Ok(NamedTables {
        entries,
        minimal,
        max_name_length,
    })
}
