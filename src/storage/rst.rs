use crate::error::{PepError, Result};
use crate::headers::{HeaderBlock, HeaderName, tokenize};
use crate::lint::number_from_filename;
use crate::model::{Author, AuthorOverrides, Pep, PepStatus, PepType};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

/// `Name <email>, ...`
static ANGLED_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<author>.+?) <(?P<email>.+?)>(,\s*)?").expect("valid angled author regex")
});

/// `email (Name), ...`
static PAREN_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<email>.+?) \((?P<author>.+?)\)(,\s*)?").expect("valid paren author regex")
});

/// `Name, ...`
static SIMPLE_AUTHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<author>[^,]+)(,\s*)?").expect("valid simple author regex")
});

/// Build a [`Pep`] from the header block of `content`. `path` supplies the
/// expected PEP number and is used in errors.
pub fn parse_pep(path: &Path, content: &str, overrides: &AuthorOverrides) -> Result<Pep> {
    let lines: Vec<&str> = content.lines().collect();
    let block = tokenize(&lines);

    let missing: Vec<&str> = HeaderName::REQUIRED
        .iter()
        .filter(|header| block.first(**header).is_none())
        .map(HeaderName::as_str)
        .collect();
    if !missing.is_empty() {
        return Err(PepError::new(
            format!("PEP is missing required headers ({})", missing.join(", ")),
            path,
        )
        .into());
    }

    let required = |header: HeaderName| header_value(&block, header).unwrap_or_default();

    let number: u32 = required(HeaderName::Pep)
        .parse()
        .map_err(|_| PepError::new("PEP number isn't an integer", path))?;
    let pep_error = |message: String| PepError::new(message, path).with_number(number);

    if number_from_filename(path) != Some(number) {
        return Err(pep_error(format!(
            "PEP number does not match file name ({})",
            path.display()
        ))
        .into());
    }

    let type_text = required(HeaderName::Type);
    let pep_type: PepType = type_text
        .parse()
        .map_err(|_| pep_error(format!("{} is not a valid Type value", type_text)))?;

    let status_text = required(HeaderName::Status);
    let status: PepStatus = status_text
        .parse()
        .map_err(|_| pep_error(format!("{} is not a valid Status value", status_text)))?;

    if status == PepStatus::Active
        && !matches!(pep_type, PepType::Process | PepType::Informational)
    {
        return Err(pep_error(
            "Only Process and Informational PEPs may have an Active status".to_string(),
        )
        .into());
    }
    if status == PepStatus::Provisional && pep_type != PepType::StandardsTrack {
        return Err(pep_error(
            "Only Standards Track PEPs may have a Provisional status".to_string(),
        )
        .into());
    }

    let author_entries = split_authors(&required(HeaderName::Author));
    if author_entries.is_empty() {
        return Err(pep_error("no authors found".to_string()).into());
    }
    let authors = author_entries
        .iter()
        .map(|(name, email)| Author::parse(name, email, overrides))
        .collect::<Result<Vec<_>>>()
        .map_err(|e| pep_error(e.to_string()))?;

    let topic: BTreeSet<String> = header_value(&block, HeaderName::Topic)
        .map(|value| {
            value
                .split(',')
                .map(|topic| topic.trim().to_lowercase())
                .filter(|topic| !topic.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let optional = |header: HeaderName| header_value(&block, header);

    Ok(Pep {
        number,
        title: required(HeaderName::Title),
        authors,
        status,
        pep_type,
        created: required(HeaderName::Created),
        topic,
        sponsor: optional(HeaderName::Sponsor),
        delegate: optional(HeaderName::BdflDelegate).or_else(|| optional(HeaderName::PepDelegate)),
        discussions_to: optional(HeaderName::DiscussionsTo),
        python_version: optional(HeaderName::PythonVersion),
        post_history: optional(HeaderName::PostHistory),
        resolution: optional(HeaderName::Resolution),
        requires: optional(HeaderName::Requires),
        replaces: optional(HeaderName::Replaces),
        superseded_by: optional(HeaderName::SupersededBy),
        filename: path.to_path_buf(),
    })
}

/// First occurrence of `header`, with folded whitespace collapsed.
fn header_value(block: &HeaderBlock, header: HeaderName) -> Option<String> {
    block.first(header).map(|field| unfold(&field.body))
}

fn unfold(body: &str) -> String {
    body.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split an `Author` header into `(name, email)` pairs. All entries are
/// expected to use the same style; the first style that matches wins.
pub fn split_authors(header: &str) -> Vec<(String, String)> {
    let mut found: Vec<(String, String)> = Vec::new();
    for pattern in [&*ANGLED_AUTHOR, &*PAREN_AUTHOR, &*SIMPLE_AUTHOR] {
        for caps in pattern.captures_iter(header) {
            let mut author = caps["author"].trim().to_string();
            let mut email = caps
                .name("email")
                .map_or("", |m| m.as_str())
                .trim()
                .to_string();

            // A bare `Jr.` split off by its comma belongs to the previous name.
            if !author.contains(' ') && author.ends_with('.') {
                if let Some((previous, previous_email)) = found.pop() {
                    author = format!("{}, {}", previous, author);
                    if email.is_empty() {
                        email = previous_email;
                    }
                }
            }
            found.push((author, email));
        }
        if !found.is_empty() {
            break;
        }
    }
    found
}
