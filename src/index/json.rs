use crate::error::{PepsError, Result};
use crate::model::Pep;
use serde::ser::{Serialize, Serializer};
use serde_json::ser::{Formatter, PrettyFormatter};
use std::io::{self, Write};

/// The `peps.json` entry for one PEP.
#[derive(Debug, serde::Serialize)]
pub struct PepDetails<'a> {
    pub number: u32,
    pub title: &'a str,
    pub authors: String,
    pub discussions_to: Option<&'a str>,
    pub status: &'static str,
    #[serde(rename = "type")]
    pub pep_type: &'static str,
    pub topic: String,
    pub created: &'a str,
    pub python_version: Option<&'a str>,
    pub post_history: Option<&'a str>,
    pub resolution: Option<&'a str>,
    pub requires: Option<&'a str>,
    pub replaces: Option<&'a str>,
    pub superseded_by: Option<&'a str>,
    pub author_names: Vec<String>,
    pub url: String,
}

impl<'a> From<&'a Pep> for PepDetails<'a> {
    fn from(pep: &'a Pep) -> Self {
        Self {
            number: pep.number,
            title: &pep.title,
            authors: pep.author_names().join(", "),
            discussions_to: pep.discussions_to.as_deref(),
            status: pep.status.as_str(),
            pep_type: pep.pep_type.as_str(),
            topic: pep.topic.iter().cloned().collect::<Vec<_>>().join(", "),
            created: &pep.created,
            python_version: pep.python_version.as_deref(),
            post_history: pep.post_history.as_deref(),
            resolution: pep.resolution.as_deref(),
            requires: pep.requires.as_deref(),
            replaces: pep.replaces.as_deref(),
            superseded_by: pep.superseded_by.as_deref(),
            author_names: pep.author_names(),
            url: pep.url(),
        }
    }
}

/// PEPs keyed by their number, in the order given.
struct PepIndex<'a>(&'a [Pep]);

impl Serialize for PepIndex<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .map(|pep| (pep.number.to_string(), PepDetails::from(pep))),
        )
    }
}

/// Pretty printing with every non-ASCII character written as a `\uXXXX`
/// escape (surrogate pairs above the BMP).
struct AsciiFormatter<'a>(PrettyFormatter<'a>);

impl Formatter for AsciiFormatter<'_> {
    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (idx, c) in fragment.char_indices() {
            if c.is_ascii() {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..idx])?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = idx + c.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }

    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }
}

/// Render `peps.json`, pretty-printed with a one-space indent and
/// ASCII-only output.
pub fn create_pep_json(peps: &[Pep]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = AsciiFormatter(PrettyFormatter::with_indent(b" "));
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    PepIndex(peps).serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| PepsError::Parse(format!("Invalid UTF-8 in JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AuthorOverrides;
    use crate::storage::parse_pep;
    use serde_json::Value;
    use std::path::Path;

    fn pep(number: u32, extra: &str) -> Pep {
        let source = format!(
            "PEP: {number}\nTitle: Example {number}\nAuthor: Guido van Rossum <guido@python.org>, Barry Warsaw <barry@python.org>\nStatus: Final\nType: Standards Track\n{extra}Created: 01-Jan-2020\n\n"
        );
        parse_pep(
            Path::new(&format!("pep-{:04}.rst", number)),
            &source,
            &AuthorOverrides::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_pep_json_fields() {
        let peps = vec![pep(12, "Topic: Typing, Packaging\n")];
        let json: Value = serde_json::from_str(&create_pep_json(&peps).unwrap()).unwrap();
        let entry = &json["12"];

        assert_eq!(entry["number"], 12);
        assert_eq!(entry["title"], "Example 12");
        assert_eq!(entry["authors"], "Guido van Rossum, Barry Warsaw");
        assert_eq!(entry["status"], "Final");
        assert_eq!(entry["type"], "Standards Track");
        assert_eq!(entry["topic"], "packaging, typing");
        assert_eq!(entry["created"], "01-Jan-2020");
        assert_eq!(entry["discussions_to"], Value::Null);
        assert_eq!(entry["requires"], Value::Null);
        assert_eq!(
            entry["author_names"],
            serde_json::json!(["Guido van Rossum", "Barry Warsaw"])
        );
        assert_eq!(entry["url"], "https://peps.python.org/pep-0012/");
    }

    #[test]
    fn test_pep_json_keeps_numeric_order() {
        let peps = vec![pep(2, ""), pep(10, ""), pep(100, "")];
        let text = create_pep_json(&peps).unwrap();
        let two = text.find("\"2\":").unwrap();
        let ten = text.find("\"10\":").unwrap();
        let hundred = text.find("\"100\":").unwrap();
        assert!(two < ten && ten < hundred);
    }

    #[test]
    fn test_pep_json_indent() {
        let text = create_pep_json(&[pep(1, "")]).unwrap();
        assert!(text.starts_with("{\n \"1\": {\n  \"number\": 1,\n  \"title\": \"Example 1\","));
    }

    #[test]
    fn test_non_ascii_is_escaped() {
        let mut entry = pep(1, "");
        entry.title = "Caf\u{e9} \u{1f40d}".to_string();
        let text = create_pep_json(&[entry]).unwrap();
        assert!(text.is_ascii());
        assert!(text.contains(r#""title": "Caf\u00e9 \ud83d\udc0d""#));

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["1"]["title"], "Caf\u{e9} \u{1f40d}");
    }

    #[test]
    fn test_empty_index() {
        assert_eq!(create_pep_json(&[]).unwrap(), "{}");
    }
}
