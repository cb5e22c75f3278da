//! Parser for the flat-text records returned by the KEGG `get` operation.
//!
//! Every line of a record carries a section keyword left-aligned in the first 12
//! columns, or 12 blank columns when it continues the previous section. The data
//! follows from column 13 on:
//!
//! ```text
//! ENTRY       R00710                      Reaction
//! NAME        Acetaldehyde:NAD+ oxidoreductase
//! ENZYME      1.2.1.3         1.2.1.5
//! ORTHOLOGY   K00128  aldehyde dehydrogenase (NAD+) [EC:1.2.1.3]
//!             K00129  aldehyde dehydrogenase (NAD(P)+) [EC:1.2.1.5]
//! ///
//! ```
use crate::record::{KeggRecord, Presence};
use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use std::fmt;

/// Width of the keyword column.
pub const KEYWORD_WIDTH: usize = 12;

lazy_static! {
    static ref KO_ID: Regex = Regex::new(r"^K\d+").unwrap();
}

/// The section the scan is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Name,
    Enzyme,
    Orthology,
    /// Any section we don't extract anything from (ENTRY, DEFINITION, PATHWAY, ...).
    Other,
}

impl Section {
    fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "NAME" => Section::Name,
            "ENZYME" => Section::Enzyme,
            "ORTHOLOGY" => Section::Orthology,
            _ => Section::Other,
        }
    }
}

/// A problem found while handling one query, kept for the operator to review after
/// the batch has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Identifier in the caller's namespace (e.g. a ModelSEED reaction).
    pub source_id: String,
    /// Identifier that was sent to KEGG.
    pub query_id: String,
    pub message: String,
}

impl Diagnostic {
    pub fn new(source_id: &str, query_id: &str, message: impl Into<String>) -> Self {
        Diagnostic {
            source_id: source_id.to_string(),
            query_id: query_id.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.source_id.is_empty() || self.source_id == self.query_id {
            write!(f, "{}: {}", self.query_id, self.message)
        } else if self.query_id.is_empty() {
            write!(f, "{}: {}", self.source_id, self.message)
        } else {
            write!(f, "{}:{}: {}", self.source_id, self.query_id, self.message)
        }
    }
}

/// The result of parsing one response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Parsed {
    pub record: KeggRecord,
    pub diagnostics: Vec<Diagnostic>,
}

/// Which recognized keywords occur anywhere in `text`.
pub fn presence(text: &str) -> Presence {
    Presence::new(
        text.contains("NAME"),
        text.contains("ENZYME"),
        text.contains("ORTHOLOGY"),
    )
}

/// Split a line into its keyword and its data, both trimmed.
///
/// A line starting in column 1 carries a keyword: the leading token within the first
/// 12 columns, with everything after it as data. This also accepts keyword lines
/// padded with fewer spaces than the column width. A line starting with whitespace
/// is split at column 12.
///
/// The split is on characters rather than bytes so a stray multi-byte character in
/// the first columns can't cause a panic.
pub fn split_line(line: &str) -> (&str, &str) {
    let width = line
        .char_indices()
        .nth(KEYWORD_WIDTH)
        .map_or(line.len(), |(i, _)| i);
    if line.starts_with(char::is_whitespace) {
        return (line[..width].trim(), line[width..].trim());
    }
    let end = line[..width].find(char::is_whitespace).unwrap_or(width);
    (&line[..end], line[end..].trim())
}

fn ends_record(line: &str, keyword: &str) -> bool {
    line.trim() == "///" || keyword == "REFERENCES"
}

/// Parse one KEGG `get` response.
///
/// `source_id` and `query_id` are only used to attribute diagnostics. Malformed
/// ORTHOLOGY lines are reported and skipped, so this always produces a record; if
/// none of NAME, ENZYME and ORTHOLOGY occur in the text it is
/// [`KeggRecord::nothing`].
pub fn parse_response(text: &str, source_id: &str, query_id: &str) -> Parsed {
    let presence = presence(text);
    if presence.is_empty() {
        return Parsed::default();
    }

    let mut names = Vec::new();
    let mut enzymes = Vec::new();
    let mut orthology = Vec::new();
    let mut diagnostics = Vec::new();

    let mut section = Section::Other;
    // keep leading blanks, they mark a continuation line
    for line in text.trim_end().lines() {
        let (keyword, data) = split_line(line);
        if ends_record(line, keyword) {
            break;
        }
        if !keyword.is_empty() {
            section = Section::from_keyword(keyword);
        }
        if data.is_empty() {
            continue;
        }

        match section {
            Section::Name => {
                let name = data.trim_end_matches(';').trim_end();
                if !name.is_empty() {
                    names.push(name.to_string());
                }
            }
            Section::Enzyme => enzymes.extend(data.split_whitespace().map(String::from)),
            Section::Orthology => match KO_ID.find(data) {
                Some(ko) => orthology.push(ko.as_str().to_string()),
                None => {
                    let diagnostic = Diagnostic::new(
                        source_id,
                        query_id,
                        format!("malformed ORTHOLOGY line skipped: {:?}", data),
                    );
                    warn!("{}", diagnostic);
                    diagnostics.push(diagnostic);
                }
            },
            Section::Other => {}
        }
    }

    Parsed {
        record: KeggRecord {
            name: presence.contains(Presence::NAME).then_some(names),
            enzymes: presence.contains(Presence::ENZYME).then_some(enzymes),
            orthology: presence.contains(Presence::ORTHOLOGY).then_some(orthology),
        },
        diagnostics,
    }
}

/// The identifier on the ENTRY line of a record, if it has one.
pub fn entry_id(text: &str) -> Option<&str> {
    text.lines().find_map(|line| match split_line(line) {
        ("ENTRY", data) => data.split_whitespace().next(),
        _ => None,
    })
}

/// Split a flat file holding several records into the text of each record.
///
/// Records end with a `///` line; trailing text without a terminator is returned as
/// a final record unless it is blank.
pub fn split_records(text: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut start = 0;
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        offset += line.len();
        if line.trim() == "///" {
            records.push(&text[start..offset]);
            start = offset;
        }
    }
    if !text[start..].trim().is_empty() {
        records.push(&text[start..]);
    }
    records
}
