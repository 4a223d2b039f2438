use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::TableError;

/// One row of the scraped character-entity table.
#[derive(Clone, Debug)]
pub struct EntityRecord {
    /// The rendered character(s) for this entity.
    pub character: String,
    /// Named spellings, in table order. May be empty.
    pub named: Vec<String>,
    /// Hexadecimal reference form, e.g. `"26"`.
    pub hex: String,
    /// Decimal reference form with sentinels, e.g. `"&#38;"`.
    pub dec: String,
    /// Human-readable description.
    pub desc: String,
    /// Code point parsed out of `dec` at load time.
    pub code: u32,
}

// The scrape emits exactly these fields; anything else means the source
// table changed shape and the run must stop rather than guess.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRecord {
    character: String,
    named: Vec<String>,
    hex: String,
    dec: String,
    desc: String,
    // Some dumps carry the derived code point too. Accepted, but it must
    // agree with what `dec` parses to.
    #[serde(default)]
    code: Option<u32>,
}

/// Recover the code point from the `&#NNN;` decimal reference form.
fn parse_code(dec: &str) -> Option<u32> {
    let digits = dec.strip_prefix("&#")?.strip_suffix(';')?;
    digits.parse().ok()
}

fn convert(raw: RawRecord) -> Result<EntityRecord, TableError> {
    let code = parse_code(&raw.dec).ok_or_else(|| {
        TableError::MalformedInput(format!(
            "record \"{}\": dec field {:?} is not of the form &#NNN;",
            raw.desc.trim(),
            raw.dec
        ))
    })?;

    if let Some(given) = raw.code {
        if given != code {
            return Err(TableError::MalformedInput(format!(
                "record \"{}\": code field {} disagrees with dec {:?}",
                raw.desc.trim(),
                given,
                raw.dec
            )));
        }
    }

    // The scrape prefixes multi-column cells with a separator space.
    let mut character = raw.character;
    if character.starts_with(' ') && character.chars().count() > 1 {
        character.remove(0);
    }

    if let Some(ch) = single_scalar(&character) {
        if ch as u32 != code {
            log::warn!(
                "record \"{}\": character {:?} is not U+{:04X}",
                raw.desc.trim(),
                character,
                code
            );
        }
    }

    Ok(EntityRecord {
        character,
        named: raw.named,
        hex: raw.hex,
        dec: raw.dec,
        desc: raw.desc.trim().to_string(),
        code,
    })
}

pub(crate) fn single_scalar(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// Load the entity table from a JSON file.
///
/// The result is treated as read-only for the rest of the run. Row order is
/// preserved; the scrape sorts rows ascending by code point and the
/// downstream derivations rely on that.
pub fn load_table(path: &Path) -> Result<Vec<EntityRecord>, TableError> {
    let text = fs::read_to_string(path).map_err(|e| {
        TableError::MalformedInput(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_table(&text)
}

/// Parse an entity table from JSON text.
pub fn parse_table(json: &str) -> Result<Vec<EntityRecord>, TableError> {
    let raw: Vec<RawRecord> = serde_json::from_str(json)
        .map_err(|e| TableError::MalformedInput(e.to_string()))?;
    raw.into_iter().map(convert).collect()
}

/// The code point of every record, in table order.
pub fn code_points(records: &[EntityRecord]) -> Vec<u32> {
    records.iter().map(|r| r.code).collect()
}

/// Shape summary of the loaded table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableStats {
    pub records: usize,
    pub names: usize,
    pub max_names_per_record: usize,
    pub with_one_name: usize,
    pub with_two_names: usize,
    pub with_more_names: usize,
}

pub fn table_stats(records: &[EntityRecord]) -> TableStats {
    let mut stats = TableStats {
        records: records.len(),
        ..TableStats::default()
    };
    for record in records {
        let n = record.named.len();
        stats.names += n;
        stats.max_names_per_record = stats.max_names_per_record.max(n);
        match n {
            0 => {}
            1 => stats.with_one_name += 1,
            2 => stats.with_two_names += 1,
            _ => stats.with_more_names += 1,
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = r#"[
        {"character":"&","named":["&amp;","&amp"],"hex":"26","dec":"&#38;","desc":"ampersand"},
        {"character":"<","named":["&lt;","&lt"],"hex":"3c","dec":"&#60;","desc":"less-than"}
    ]"#;

    #[test]
    fn parses_sample_and_derives_codes() {
        let records = parse_table(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].code, 38);
        assert_eq!(records[1].code, 60);
        assert_eq!(code_points(&records), vec![38, 60]);
        assert_eq!(records[0].named, vec!["&amp;", "&amp"]);
    }

    #[test]
    fn unknown_field_is_fatal() {
        let json = r#"[{"character":"&","named":[],"hex":"26","dec":"&#38;","desc":"x","foo":1}]"#;
        let err = parse_table(json).unwrap_err();
        assert!(matches!(err, TableError::MalformedInput(_)));
        assert!(err.to_string().contains("foo"), "{}", err);
    }

    #[test]
    fn bad_dec_is_fatal_and_names_the_record() {
        let json = r#"[{"character":"&","named":[],"hex":"26","dec":"38","desc":"ampersand"}]"#;
        let err = parse_table(json).unwrap_err();
        assert!(err.to_string().contains("ampersand"), "{}", err);
    }

    #[test]
    fn embedded_code_must_agree_with_dec() {
        let json =
            r#"[{"character":"&","named":[],"hex":"26","dec":"&#38;","desc":"x","code":39}]"#;
        assert!(parse_table(json).is_err());

        let json =
            r#"[{"character":"&","named":[],"hex":"26","dec":"&#38;","desc":"x","code":38}]"#;
        assert_eq!(parse_table(json).unwrap()[0].code, 38);
    }

    #[test]
    fn leading_separator_space_is_stripped() {
        let json = r#"[{"character":" <","named":[],"hex":"3c","dec":"&#60;","desc":"x"}]"#;
        let records = parse_table(json).unwrap();
        assert_eq!(records[0].character, "<");

        // A lone space is the character itself, not a separator.
        let json = r#"[{"character":" ","named":[],"hex":"20","dec":"&#32;","desc":"space"}]"#;
        let records = parse_table(json).unwrap();
        assert_eq!(records[0].character, " ");
    }

    #[test]
    fn desc_is_trimmed() {
        let json = r#"[{"character":"&","named":[],"hex":"26","dec":"&#38;","desc":"  amp  "}]"#;
        assert_eq!(parse_table(json).unwrap()[0].desc, "amp");
    }

    #[test]
    fn missing_file_is_malformed_input() {
        let err = load_table(Path::new("no-such-table.json")).unwrap_err();
        assert!(matches!(err, TableError::MalformedInput(_)));
    }

    #[test]
    fn stats_count_name_distribution() {
        let json = r#"[
            {"character":"&","named":["&amp;","&amp"],"hex":"26","dec":"&#38;","desc":"a"},
            {"character":"<","named":["&lt;"],"hex":"3c","dec":"&#60;","desc":"b"},
            {"character":">","named":[],"hex":"3e","dec":"&#62;","desc":"c"}
        ]"#;
        let stats = table_stats(&parse_table(json).unwrap());
        assert_eq!(stats.records, 3);
        assert_eq!(stats.names, 3);
        assert_eq!(stats.max_names_per_record, 2);
        assert_eq!(stats.with_one_name, 1);
        assert_eq!(stats.with_two_names, 1);
        assert_eq!(stats.with_more_names, 0);
    }

    proptest! {
        #[test]
        fn dec_form_round_trips(code in 0u32..=0x10FFFF) {
            let dec = format!("&#{};", code);
            prop_assert_eq!(parse_code(&dec), Some(code));
        }
    }
}
