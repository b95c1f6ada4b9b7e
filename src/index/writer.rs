use super::{Bucket, classify};
use crate::error::{PepsError, Result};
use crate::lint::values::quoted;
use crate::model::{Pep, PepStatus, PepType, display_width, sort_key};
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;

pub const TITLE_LENGTH: usize = 55;
pub const AUTHOR_LENGTH: usize = 40;

/// Numbers held back from normal allocation, with their claimants.
pub const RESERVED: [(u32, &str); 1] = [(801, "Warsaw")];

pub const INTRO: &str = "\
This PEP contains the index of all Python Enhancement Proposals,
known as PEPs.  PEP numbers are assigned by the PEP editors, and
once assigned are never changed [1_].  The version control history [2_] of
the PEP texts represent their historical record.
";

pub const REFERENCES: &str = "\
.. [1] PEP 1: PEP Purpose and Guidelines
.. [2] View PEP history online: https://github.com/python/peps
";

/// Header block of PEP 0 itself.
pub fn pep_zero_header(today: NaiveDate) -> String {
    format!(
        "\
PEP: 0
Title: Index of Python Enhancement Proposals (PEPs)
Last-Modified: {}
Author: python-dev <python-dev@python.org>
Status: Active
Type: Informational
Content-Type: text/x-rst
Created: 13-Jul-2000
",
        today.format("%Y-%m-%d")
    )
}

fn table_separator() -> String {
    format!(
        "== ====  {} {}",
        "=".repeat(TITLE_LENGTH),
        "=".repeat(AUTHOR_LENGTH)
    )
}

fn column_format(
    pep_type: impl Display,
    status: impl Display,
    number: impl Display,
    title: &str,
    authors: &str,
) -> String {
    format!(
        "{}{}{:>5}  {:<width$} {}",
        pep_type,
        status,
        number,
        title,
        authors,
        width = TITLE_LENGTH
    )
}

fn pep_row(pep: &Pep) -> String {
    column_format(
        pep.pep_type.abbreviation(),
        pep.status.abbreviation(),
        pep.number,
        &pep.title_abbr(TITLE_LENGTH),
        &pep.author_nicks(),
    )
}

/// Accumulates the lines of one index document.
#[derive(Debug, Default)]
pub struct PepZeroWriter {
    output: Vec<String>,
}

impl PepZeroWriter {
    pub fn new() -> Self {
        Self::default()
    }

    fn emit(&mut self, content: impl Into<String>) {
        self.output.push(content.into());
    }

    fn emit_newline(&mut self) {
        self.emit("");
    }

    fn emit_table_separator(&mut self) {
        self.emit(table_separator());
    }

    fn emit_title(&mut self, text: &str, anchor: &str, symbol: char) {
        self.emit(format!(".. _{}:\n", anchor));
        self.emit(text);
        self.emit(symbol.to_string().repeat(text.chars().count()));
        self.emit_newline();
    }

    fn emit_column_headers(&mut self) {
        self.emit_table_separator();
        self.emit(column_format(".", ".", "PEP", "PEP Title", "PEP Author(s)"));
        self.emit_table_separator();
    }

    fn emit_pep_category(&mut self, bucket: Bucket, peps: &[&Pep]) {
        self.emit_title(bucket.title(), bucket.anchor(), '-');
        self.emit_column_headers();
        for pep in peps {
            self.emit(pep_row(pep));
        }
        self.emit_table_separator();
        self.emit_newline();
    }

    fn emit_author_table_separator(&mut self, name_width: usize) {
        self.emit(format!(
            "{}  {}",
            "=".repeat(name_width),
            "=".repeat("email address".len())
        ));
    }

    /// Render PEP 0. `peps` must be sorted by number.
    pub fn write_pep0(self, peps: &[Pep], today: NaiveDate) -> Result<String> {
        self.write(peps, &pep_zero_header(today), INTRO, true)
    }

    /// Render an index over `peps`. Sub-indices (`is_pep0 == false`) leave
    /// out empty categories, reserved numbers, authors and references.
    pub fn write(
        mut self,
        peps: &[Pep],
        header: &str,
        intro: &str,
        is_pep0: bool,
    ) -> Result<String> {
        self.emit(header);
        self.emit_newline();

        self.emit_title("Introduction", "intro", '=');
        self.emit(intro);
        self.emit_newline();

        self.emit_title("Index by Category", "by-category", '=');
        for bucket in Bucket::ALL {
            let in_bucket: Vec<&Pep> = peps.iter().filter(|pep| classify(pep) == bucket).collect();
            if in_bucket.is_empty() && !is_pep0 {
                continue;
            }
            self.emit_pep_category(bucket, &in_bucket);
        }
        self.emit_newline();

        self.emit_title("Numerical Index", "by-pep-number", '=');
        self.emit_column_headers();
        let mut previous = 0;
        for pep in peps {
            if pep.number > previous + 1 {
                self.emit_newline();
            }
            self.emit(pep_row(pep));
            previous = pep.number;
        }
        self.emit_table_separator();
        self.emit_newline();

        if is_pep0 {
            self.emit_title("Reserved PEP Numbers", "reserved", '=');
            self.emit_column_headers();
            let mut reserved = RESERVED;
            reserved.sort();
            for (number, claimants) in reserved {
                self.emit(column_format(".", ".", number, "RESERVED", claimants));
            }
            self.emit_table_separator();
            self.emit_newline();
        }

        self.emit_title("PEP Types Key", "type-key", '=');
        for pep_type in PepType::ALL {
            self.emit(format!(
                "    {} - {} PEP",
                pep_type.abbreviation(),
                pep_type
            ));
            self.emit_newline();
        }
        self.emit_newline();

        self.emit_title("PEP Status Key", "status-key", '=');
        for status in PepStatus::ALL {
            match status {
                PepStatus::Active | PepStatus::Draft => continue,
                PepStatus::Accepted => {
                    self.emit("    A - Accepted (Standards Track only) or Active proposal")
                }
                other => self.emit(format!(
                    "    {} - {} proposal",
                    other.abbreviation(),
                    other
                )),
            }
            self.emit_newline();
        }
        self.emit_newline();

        if is_pep0 {
            let authors = verify_email_addresses(peps)?;
            let name_width = authors
                .iter()
                .map(|(name, _)| display_width(name))
                .max()
                .unwrap_or(0)
                .max("Name".len());

            self.emit_title("Authors/Owners", "authors", '=');
            self.emit_author_table_separator(name_width);
            self.emit(format!("{}  Email Address", pad("Name", name_width)));
            self.emit_author_table_separator(name_width);
            for (name, email) in sort_authors(authors) {
                self.emit(format!("{}  {}", pad(&name, name_width), email));
            }
            self.emit_author_table_separator(name_width);
            self.emit_newline();
            self.emit_newline();

            self.emit_title("References", "references", '=');
            self.emit(REFERENCES);
        }

        Ok(self.output.join("\n"))
    }
}

/// Left-align `text` in `width` composed characters.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    format!("{}{}", text, " ".repeat(fill))
}

/// One `(last_first, email)` per distinct author, in first-seen order.
/// Fails when an author is listed with more than one email address.
pub fn verify_email_addresses(peps: &[Pep]) -> Result<Vec<(String, String)>> {
    let mut order: Vec<String> = Vec::new();
    let mut emails: HashMap<String, BTreeSet<String>> = HashMap::new();
    for author in peps.iter().flat_map(|pep| &pep.authors) {
        let seen = emails.entry(author.last_first.clone()).or_insert_with(|| {
            order.push(author.last_first.clone());
            BTreeSet::new()
        });
        if !author.email.is_empty() {
            seen.insert(author.email.clone());
        }
    }

    let mut valid = Vec::new();
    let mut too_many = Vec::new();
    for name in order {
        let addresses = emails.remove(&name).unwrap_or_default();
        if addresses.len() > 1 {
            let listed = addresses
                .iter()
                .map(|email| quoted(email))
                .collect::<Vec<_>>()
                .join(", ");
            too_many.push(format!("    {}: {{{}}}", name, listed));
        } else {
            let email = addresses.into_iter().next().unwrap_or_default();
            valid.push((name, email));
        }
    }

    if !too_many.is_empty() {
        return Err(PepsError::ConflictingEmails(too_many.join("\n")));
    }
    Ok(valid)
}

fn sort_authors(mut authors: Vec<(String, String)>) -> Vec<(String, String)> {
    authors.sort_by_cached_key(|(name, _)| sort_key(name));
    authors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Author, AuthorOverrides};
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn pep(number: u32, title: &str, status: PepStatus, pep_type: PepType, authors: &[(&str, &str)]) -> Pep {
        let overrides = AuthorOverrides::default();
        Pep {
            number,
            title: title.to_string(),
            authors: authors
                .iter()
                .map(|(name, email)| Author::parse(name, email, &overrides).unwrap())
                .collect(),
            status,
            pep_type,
            created: "01-Jan-2001".to_string(),
            topic: BTreeSet::new(),
            sponsor: None,
            delegate: None,
            discussions_to: None,
            python_version: None,
            post_history: None,
            resolution: None,
            requires: None,
            replaces: None,
            superseded_by: None,
            filename: PathBuf::from(format!("pep-{:04}.rst", number)),
        }
    }

    fn sample() -> Vec<Pep> {
        vec![
            pep(
                1,
                "PEP Purpose and Guidelines",
                PepStatus::Active,
                PepType::Process,
                &[("Barry Warsaw", "barry@python.org"), ("Guido van Rossum", "guido@python.org")],
            ),
            pep(
                8,
                "Style Guide for Python Code",
                PepStatus::Active,
                PepType::Process,
                &[("Guido van Rossum", "")],
            ),
            pep(
                484,
                "Type Hints",
                PepStatus::Final,
                PepType::StandardsTrack,
                &[("Guido van Rossum", "guido@python.org")],
            ),
        ]
    }

    #[test]
    fn test_row_format() {
        let rows = sample();
        assert_eq!(
            pep_row(&rows[2]),
            format!("SF  484  {:<55} van Rossum", "Type Hints")
        );
        assert_eq!(
            pep_row(&rows[0]),
            format!("P     1  {:<55} Warsaw, van Rossum", "PEP Purpose and Guidelines")
        );
    }

    #[test]
    fn test_column_headers_and_separator() {
        assert_eq!(table_separator().len(), 9 + 55 + 1 + 40);
        assert_eq!(
            column_format(".", ".", "PEP", "PEP Title", "PEP Author(s)"),
            format!("..  PEP  {:<55} PEP Author(s)", "PEP Title")
        );
    }

    #[test]
    fn test_write_pep0_sections() {
        let text = PepZeroWriter::new().write_pep0(&sample(), today()).unwrap();

        assert!(text.starts_with("PEP: 0\nTitle: Index of Python Enhancement Proposals (PEPs)\nLast-Modified: 2024-06-01\n"));
        let anchors = [
            ".. _intro:",
            ".. _by-category:",
            ".. _by-category-meta:",
            ".. _by-category-other-info:",
            ".. _by-category-abandoned:",
            ".. _by-pep-number:",
            ".. _reserved:",
            ".. _type-key:",
            ".. _status-key:",
            ".. _authors:",
            ".. _references:",
        ];
        let mut last = 0;
        for anchor in anchors {
            let pos = text.find(anchor).unwrap_or_else(|| panic!("missing {anchor}"));
            assert!(pos > last, "{anchor} out of order");
            last = pos;
        }
        assert!(text.contains(&column_format(".", ".", 801, "RESERVED", "Warsaw")));
        assert!(text.contains("    I - Informational PEP\n\n    P - Process PEP\n\n    S - Standards Track PEP\n"));
        assert!(text.contains("    A - Accepted (Standards Track only) or Active proposal\n"));
        assert!(!text.contains("    D - Draft proposal"));
        assert!(text.contains("    S - Superseded proposal\n"));
        assert!(text.ends_with(REFERENCES));
    }

    #[test]
    fn test_empty_categories_are_kept_in_pep0() {
        let text = PepZeroWriter::new().write_pep0(&sample(), today()).unwrap();
        let provisional = text
            .split(".. _by-category-provisional:\n")
            .nth(1)
            .unwrap();
        let title = Bucket::Provisional.title();
        let expected = format!(
            "\n{}\n{}\n\n{}\n{}\n{}\n{}\n",
            title,
            "-".repeat(title.len()),
            table_separator(),
            column_format(".", ".", "PEP", "PEP Title", "PEP Author(s)"),
            table_separator(),
            table_separator(),
        );
        assert!(provisional.starts_with(&expected), "{provisional}");
    }

    #[test]
    fn test_numerical_index_gaps() {
        let peps = sample();
        let text = PepZeroWriter::new().write_pep0(&peps, today()).unwrap();
        let numerical = text.split(".. _by-pep-number:\n").nth(1).unwrap();
        let expected = format!(
            "{}\n{}\n\n{}\n\n{}\n{}\n",
            table_separator(),
            pep_row(&peps[0]),
            pep_row(&peps[1]),
            pep_row(&peps[2]),
            table_separator()
        );
        assert!(numerical.contains(&expected), "{numerical}");
    }

    #[test]
    fn test_authors_table() {
        let text = PepZeroWriter::new().write_pep0(&sample(), today()).unwrap();
        let width = "van Rossum, Guido".len();
        let sep = format!("{}  {}", "=".repeat(width), "=".repeat(13));
        let expected = format!(
            "{sep}\n{:<width$}  Email Address\n{sep}\n{:<width$}  guido@python.org\n{:<width$}  barry@python.org\n{sep}\n",
            "Name", "van Rossum, Guido", "Warsaw, Barry"
        );
        assert!(text.contains(&expected), "{text}");
    }

    #[test]
    fn test_conflicting_emails() {
        let mut peps = sample();
        peps.push(pep(
            9,
            "Sample Plaintext PEP Template",
            PepStatus::Withdrawn,
            PepType::Process,
            &[("Barry Warsaw", "barry@example.com")],
        ));
        let err = verify_email_addresses(&peps).unwrap_err();
        assert_eq!(
            err.to_string(),
            "some authors have more than one email address listed:\n    Warsaw, Barry: {'barry@example.com', 'barry@python.org'}"
        );
    }

    #[test]
    fn test_subindex_omits_pep0_sections() {
        let text = PepZeroWriter::new()
            .write(&sample(), "Header\n", "Intro\n", false)
            .unwrap();
        assert!(text.contains(".. _by-category-meta:"));
        assert!(!text.contains(".. _by-category-open:"));
        assert!(!text.contains(".. _reserved:"));
        assert!(!text.contains(".. _authors:"));
        assert!(!text.contains(".. _references:"));
        assert!(text.contains(".. _status-key:"));
    }

    #[test]
    fn test_pad_uses_composed_width() {
        assert_eq!(pad("Lo\u{308}wis", 7), "Lo\u{308}wis  ");
        assert_eq!(pad("toolong", 3), "toolong");
    }
}
