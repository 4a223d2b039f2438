//! Generator for the static HTML character-entity tables embedded in the
//! lexer's entity decoder.
//!
//! Input is the scraped `table.json`: one row per code point, carrying the
//! rendered character, its named spellings (`&amp;`, `&amp`, ...), the hex
//! and decimal reference forms, and a description. From that table the
//! generator derives and renders Rust declarations:
//!
//! - the plain code-point list (`CODE_POINTS`),
//! - the same list collapsed into contiguous ranges (`CODE_RANGES`),
//! - the sorted `(name, char)` lookup tables (`NAMED_ENTITIES` plus the
//!   `MINIMAL_ENTITIES` subset a safety-minimal decoder still needs).
//!
//! Everything is a pure function of the loaded table; the binary writes a
//! single block of generated text and nothing else on success.

pub mod emit;
pub mod named;
pub mod ranges;
pub mod table;

use std::fmt;

/// Errors produced while loading or rendering the entity table.
///
/// Both kinds are fatal: the run aborts before any generated text is
/// written, and the message names the offending record or entry.
#[derive(Debug)]
pub enum TableError {
    /// Input file missing, unparseable, or a record failed validation.
    MalformedInput(String),
    /// A derived value cannot be rendered as a source literal.
    Format(String),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::MalformedInput(msg) => write!(f, "malformed entity table: {}", msg),
            TableError::Format(msg) => write!(f, "cannot render literal: {}", msg),
        }
    }
}

impl std::error::Error for TableError {}
