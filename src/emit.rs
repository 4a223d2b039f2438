//! Renders the derived tables as Rust declarations.
//!
//! Output is plain text on purpose: the generated block is pasted into the
//! lexer's entity-decoder module, so it has to be valid Rust source. Any
//! value that cannot be rendered safely is a hard error, never a silently
//! broken literal.

use crate::named::{NamedEntry, NamedTables};
use crate::ranges::CodeRange;
use crate::TableError;

const RANGES_PER_ROW: usize = 6;

/// Layout for wide numeric array literals.
#[derive(Clone, Copy, Debug)]
pub struct NumericLayout {
    pub per_row: usize,
    pub width: usize,
}

impl Default for NumericLayout {
    fn default() -> Self {
        // Matches the hand-maintained table this generator replaces.
        NumericLayout {
            per_row: 10,
            width: 8,
        }
    }
}

/// Render the code-point list as a fixed-width, multi-column array literal.
pub fn emit_code_points(codes: &[u32], layout: NumericLayout) -> String {
    let per_row = layout.per_row.max(1);
    let mut out = format!("pub static CODE_POINTS: [u32; {}] = [\n", codes.len());
    for row in codes.chunks(per_row) {
        let cells: Vec<String> = row
            .iter()
            .map(|code| format!("{:>w$}", code, w = layout.width))
            .collect();
        out.push_str("    ");
        out.push_str(&cells.join(", "));
        out.push_str(",\n");
    }
    out.push_str("];\n");
    out
}

/// Render the compressed ranges as an array of inclusive `(start, end)` pairs.
pub fn emit_code_ranges(ranges: &[CodeRange]) -> String {
    let mut out = format!(
        "pub static CODE_RANGES: [(u32, u32); {}] = [\n",
        ranges.len()
    );
    for row in ranges.chunks(RANGES_PER_ROW) {
        let cells: Vec<String> = row
            .iter()
            .map(|r| format!("({}, {})", r.start, r.end))
            .collect();
        out.push_str("    ");
        out.push_str(&cells.join(", "));
        out.push_str(",\n");
    }
    out.push_str("];\n");
    out
}

/// Render the named-entity tables: the length constant, the minimal subset,
/// and the full sorted table.
pub fn emit_named_tables(tables: &NamedTables) -> Result<String, TableError> {
    let mut out = format!(
        "pub static MAX_NAME_LENGTH: usize = {};\n\n",
        tables.max_name_length
    );
    push_entry_array(&mut out, "MINIMAL_ENTITIES", &tables.minimal)?;
    out.push('\n');
    out.push_str("/// Every named spelling, sorted for binary search.\n");
    push_entry_array(&mut out, "NAMED_ENTITIES", &tables.entries)?;
    Ok(out)
}

fn push_entry_array(
    out: &mut String,
    ident: &str,
    entries: &[NamedEntry],
) -> Result<(), TableError> {
    out.push_str(&format!(
        "pub static {}: [(&'static str, char); {}] = [\n",
        ident,
        entries.len()
    ));
    for entry in entries {
        out.push_str(&format!(
            "    ({}, {}),\n",
            name_literal(&entry.name)?,
            char_literal(entry.ch)
        ));
    }
    out.push_str("];\n");
    Ok(())
}

// Zero-width and BOM-class format characters render as nothing in a source
// file, so they must not appear verbatim inside a literal.
fn is_invisible(c: char) -> bool {
    matches!(c, '\u{200b}'..='\u{200f}' | '\u{2060}'..='\u{2064}' | '\u{feff}')
}

/// Escape one decoded character as a Rust `char` literal.
pub fn char_literal(c: char) -> String {
    match c {
        '\'' => "'\\''".to_string(),
        '\\' => "'\\\\'".to_string(),
        '\n' => "'\\n'".to_string(),
        '\r' => "'\\r'".to_string(),
        '\t' => "'\\t'".to_string(),
        c if c.is_whitespace() || c.is_control() || is_invisible(c) => {
            format!("'\\u{{{:x}}}'", c as u32)
        }
        c => format!("'{}'", c),
    }
}

/// Escape one entity spelling as a Rust string literal.
pub fn name_literal(name: &str) -> Result<String, TableError> {
    let mut lit = String::with_capacity(name.len() + 2);
    lit.push('"');
    for c in name.chars() {
        match c {
            '"' => lit.push_str("\\\""),
            '\\' => lit.push_str("\\\\"),
            c if c.is_control() => {
                return Err(TableError::Format(format!(
                    "entity name {:?} contains unprintable {:?}",
                    name, c
                )));
            }
            c => lit.push(c),
        }
    }
    lit.push('"');
    Ok(lit)
}
