use super::author::Author;
use super::types::{PepStatus, PepType, Topic};
use crate::lint::values::parse_date;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub const PEP_URL_BASE: &str = "https://peps.python.org";

/// A parsed PEP header block.
#[derive(Debug, Clone, PartialEq)]
pub struct Pep {
    pub number: u32,
    pub title: String,
    pub authors: Vec<Author>,
    pub status: PepStatus,
    pub pep_type: PepType,
    /// As written, `DD-Mmm-YYYY`.
    pub created: String,
    /// Lower-case topic slugs.
    pub topic: BTreeSet<String>,
    pub sponsor: Option<String>,
    pub delegate: Option<String>,
    pub discussions_to: Option<String>,
    pub python_version: Option<String>,
    pub post_history: Option<String>,
    pub resolution: Option<String>,
    pub requires: Option<String>,
    pub replaces: Option<String>,
    pub superseded_by: Option<String>,
    pub filename: PathBuf,
}

impl Pep {
    pub fn created_date(&self) -> Option<NaiveDate> {
        parse_date(&self.created)
    }

    pub fn has_topic(&self, topic: Topic) -> bool {
        self.topic.contains(topic.slug())
    }

    /// The title, cut at a word boundary or after an inner hyphen with
    /// ` ...` appended when it is longer than `width` characters.
    pub fn title_abbr(&self, width: usize) -> String {
        if self.title.chars().count() <= width {
            return self.title.clone();
        }

        let limit = width.saturating_sub(4);
        let mut line = String::new();
        let mut line_len = 0;
        for word in self.title.split_whitespace() {
            for (idx, chunk) in hyphen_chunks(word).into_iter().enumerate() {
                let chunk_len = chunk.chars().count();
                if line.is_empty() {
                    if chunk_len > limit {
                        line = chunk.chars().take(limit).collect();
                        return format!("{} ...", line);
                    }
                    line.push_str(chunk);
                    line_len = chunk_len;
                    continue;
                }
                let sep = usize::from(idx == 0);
                if line_len + sep + chunk_len > limit {
                    return format!("{} ...", line);
                }
                if sep == 1 {
                    line.push(' ');
                }
                line.push_str(chunk);
                line_len += sep + chunk_len;
            }
        }
        format!("{} ...", line)
    }

    /// Author nicknames, comma separated, for the index tables.
    pub fn author_nicks(&self) -> String {
        self.authors
            .iter()
            .map(|author| author.nick.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn author_names(&self) -> Vec<String> {
        self.authors
            .iter()
            .map(|author| author.full_name.clone())
            .collect()
    }

    pub fn url(&self) -> String {
        format!("{}/pep-{:04}/", PEP_URL_BASE, self.number)
    }
}

/// Split `word` after each hyphen that sits between letters, with at
/// least two letters before it: `Backwards-Compatible` becomes
/// `Backwards-` and `Compatible`.
fn hyphen_chunks(word: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let mut chunks = Vec::new();
    let mut start = 0;
    for (pos, &(offset, c)) in chars.iter().enumerate() {
        if c != '-' || pos < 2 {
            continue;
        }
        let before = chars[pos - 1].1.is_alphabetic() && chars[pos - 2].1.is_alphabetic();
        let after = chars.get(pos + 1).is_some_and(|&(_, next)| next.is_alphabetic());
        if before && after {
            let end = offset + c.len_utf8();
            chunks.push(&word[start..end]);
            start = end;
        }
    }
    chunks.push(&word[start..]);
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AuthorOverrides;

    fn pep(title: &str) -> Pep {
        let overrides = AuthorOverrides::default();
        Pep {
            number: 8,
            title: title.to_string(),
            authors: vec![
                Author::parse("Guido van Rossum", "guido@python.org", &overrides).unwrap(),
                Author::parse("Barry Warsaw", "barry@python.org", &overrides).unwrap(),
            ],
            status: PepStatus::Active,
            pep_type: PepType::Process,
            created: "05-Jul-2001".to_string(),
            topic: BTreeSet::from(["governance".to_string()]),
            sponsor: None,
            delegate: None,
            discussions_to: None,
            python_version: None,
            post_history: None,
            resolution: None,
            requires: None,
            replaces: None,
            superseded_by: None,
            filename: PathBuf::from("pep-0008.rst"),
        }
    }

    #[test]
    fn test_short_title_is_unchanged() {
        assert_eq!(pep("Style Guide").title_abbr(55), "Style Guide");
        let exact = "a".repeat(55);
        assert_eq!(pep(&exact).title_abbr(55), exact);
    }

    #[test]
    fn test_long_title_is_wrapped() {
        let title = "Adding a structured data type to the standard library for configuration";
        let abbr = pep(title).title_abbr(55);
        assert_eq!(abbr, "Adding a structured data type to the standard ...");
        assert!(abbr.chars().count() <= 55);
    }

    #[test]
    fn test_long_title_breaks_after_hyphen() {
        let title = "Adding a Backwards-Compatible Mechanism Cross-Platform Things";
        assert_eq!(
            pep(title).title_abbr(55),
            "Adding a Backwards-Compatible Mechanism Cross- ..."
        );
    }

    #[test]
    fn test_hyphen_chunks() {
        assert_eq!(hyphen_chunks("Cross-Platform"), vec!["Cross-", "Platform"]);
        assert_eq!(hyphen_chunks("a-b"), vec!["a-b"]);
        assert_eq!(hyphen_chunks("UTF-8"), vec!["UTF-8"]);
        assert_eq!(hyphen_chunks("--flag"), vec!["--flag"]);
    }

    #[test]
    fn test_long_single_word_is_cut() {
        let abbr = pep(&"x".repeat(60)).title_abbr(55);
        assert_eq!(abbr, format!("{} ...", "x".repeat(51)));
    }

    #[test]
    fn test_derived_fields() {
        let pep = pep("Style Guide");
        assert_eq!(pep.author_nicks(), "van Rossum, Warsaw");
        assert_eq!(pep.author_names(), vec!["Guido van Rossum", "Barry Warsaw"]);
        assert_eq!(pep.url(), "https://peps.python.org/pep-0008/");
        assert_eq!(pep.created_date(), NaiveDate::from_ymd_opt(2001, 7, 5));
        assert!(pep.has_topic(Topic::Governance));
        assert!(!pep.has_topic(Topic::Typing));
    }
}
