//! One validator per recognised header.

use super::LintMessage;
use super::values::{self, ThreadKind};
use crate::headers::HeaderName;
use crate::model::{PepStatus, PepType, Topic};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

pub const MAX_TITLE_LENGTH: usize = 79;

/// `len("Author: ")`; continuation lines align with the first entry.
const AUTHOR_INDENT: usize = 8;

static MAILING_LIST_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w\-]+$").expect("valid list-name regex"));

const MAILING_LIST_DOMAINS: [&str; 2] = ["@python.org", "@googlegroups.com"];

const UNBALANCED_POST: &str =
    "post line must be a date or both start with “`” and end with “>`__”";
const UNBALANCED_RESOLUTION: &str =
    "Resolution line must be a link or both start with “`” and end with “>`__”";

/// Dispatch a header body to its validator.
pub fn validate_header(
    header: HeaderName,
    line: usize,
    body: &str,
    today: NaiveDate,
) -> Vec<LintMessage> {
    match header {
        // Checked against the first line of the file instead.
        HeaderName::Pep => Vec::new(),
        HeaderName::Title => validate_title(line, body),
        HeaderName::Author => validate_author(line, body),
        HeaderName::Sponsor => validate_sponsor(line, body),
        HeaderName::BdflDelegate | HeaderName::PepDelegate => validate_delegate(line, body),
        HeaderName::DiscussionsTo => validate_discussions_to(line, body),
        HeaderName::Status => validate_status(line, body),
        HeaderName::Type => validate_type(line, body),
        HeaderName::Topic => validate_topic(line, body),
        HeaderName::Requires | HeaderName::Replaces | HeaderName::SupersededBy => {
            validate_pep_references(line, body)
        }
        HeaderName::Created => values::date(line, body, "Created", today),
        HeaderName::PythonVersion => validate_python_version(line, body),
        HeaderName::PostHistory => validate_post_history(line, body, today),
        HeaderName::Resolution => validate_resolution(line, body, today),
    }
}

/// The file must open with `PEP: <number>`.
pub fn validate_pep_number(first_line: &str) -> Vec<LintMessage> {
    match first_line.strip_prefix("PEP: ") {
        Some(number) => values::pep_number(1, number.trim_start(), "'PEP:' header"),
        None => vec![LintMessage::new(1, "PEP must begin with the 'PEP:' header")],
    }
}

pub fn validate_title(line: usize, body: &str) -> Vec<LintMessage> {
    if body.trim().is_empty() {
        vec![LintMessage::new(line, "PEP must have a title")]
    } else if body.chars().count() > MAX_TITLE_LENGTH {
        vec![LintMessage::new(
            line,
            "PEP title must be less than 80 characters",
        )]
    } else {
        Vec::new()
    }
}

pub fn validate_author(line: usize, body: &str) -> Vec<LintMessage> {
    let lines: Vec<&str> = body.split('\n').collect();
    let mut messages = Vec::new();

    for (offset, text) in lines.iter().enumerate() {
        let line_num = line + offset;
        if offset >= 1 && is_over_indented(text) {
            messages.push(LintMessage::new(
                line_num,
                "Author line must not be over-indented",
            ));
        }
        if offset < lines.len() - 1 && !text.ends_with(',') {
            messages.push(LintMessage::new(
                line_num,
                "Author continuation lines must end with a comma",
            ));
        }
        let text = text.strip_suffix(',').unwrap_or(text);
        for entry in text.split(", ") {
            messages.extend(values::email(line_num, entry, "Author"));
        }
    }
    messages
}

fn is_over_indented(text: &str) -> bool {
    let head: Vec<char> = text.chars().take(AUTHOR_INDENT + 1).collect();
    !head.is_empty() && head.iter().all(|c| c.is_whitespace())
}

pub fn validate_sponsor(line: usize, body: &str) -> Vec<LintMessage> {
    if body.is_empty() {
        return Vec::new();
    }
    values::email(line, body, "Sponsor")
}

pub fn validate_delegate(line: usize, body: &str) -> Vec<LintMessage> {
    if body.is_empty() {
        return Vec::new();
    }
    if body.contains(", ") {
        let body = body.strip_suffix(',').unwrap_or(body);
        return body
            .split(", ")
            .flat_map(|entry| values::email(line, entry, "Delegate"))
            .collect();
    }
    values::email(line, body, "Delegate")
}

pub fn validate_discussions_to(line: usize, body: &str) -> Vec<LintMessage> {
    let mut messages = values::thread(line, body, "Discussions-To", ThreadKind::DiscussionsTo);
    if body.starts_with("https://") {
        return messages;
    }

    for domain in MAILING_LIST_DOMAINS {
        if let Some(list_name) = body.strip_suffix(domain) {
            if !MAILING_LIST_NAME.is_match(list_name) {
                messages.push(LintMessage::new(
                    line,
                    "Discussions-To must be a valid mailing list",
                ));
            }
            return messages;
        }
    }

    messages.push(LintMessage::new(
        line,
        "Discussions-To must be a valid thread URL or mailing list",
    ));
    messages
}

pub fn validate_status(line: usize, body: &str) -> Vec<LintMessage> {
    match body.parse::<PepStatus>() {
        Ok(_) => Vec::new(),
        Err(_) => vec![LintMessage::new(line, "Status must be a valid PEP status")],
    }
}

pub fn validate_type(line: usize, body: &str) -> Vec<LintMessage> {
    match body.parse::<PepType>() {
        Ok(_) => Vec::new(),
        Err(_) => vec![LintMessage::new(line, "Type must be a valid PEP type")],
    }
}

pub fn validate_topic(line: usize, body: &str) -> Vec<LintMessage> {
    let topics: Vec<&str> = body.split(", ").collect();
    let unique: BTreeSet<&str> = topics.iter().copied().collect();
    let mut messages = Vec::new();

    if topics.len() > unique.len() {
        messages.push(LintMessage::new(line, "Topic must not contain duplicates"));
    }

    if unique.iter().any(|topic| topic.parse::<Topic>().is_err()) {
        if !unique.iter().all(|topic| is_title_case(topic)) {
            messages.push(LintMessage::new(
                line,
                "Topic must be properly capitalised (Title Case)",
            ));
        }
        if unique
            .iter()
            .any(|topic| Topic::from_slug(&topic.to_lowercase()).is_none())
        {
            messages.push(LintMessage::new(
                line,
                "Topic must be for a valid sub-index",
            ));
        }
    }

    if topics.windows(2).any(|pair| pair[0] > pair[1]) {
        messages.push(LintMessage::new(
            line,
            "Topic must be sorted lexicographically",
        ));
    }
    messages
}

/// Every word starts with an upper-case letter followed by lower-case ones.
fn is_title_case(text: &str) -> bool {
    let mut cased = false;
    let mut previous_cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else {
            previous_cased = false;
        }
    }
    cased
}

pub fn validate_pep_references(line: usize, body: &str) -> Vec<LintMessage> {
    let body = body.strip_suffix(',').unwrap_or(body).trim_end();
    if body.matches(", ").count() != body.matches(',').count() {
        return vec![LintMessage::new(
            line,
            "PEP references must be separated by comma-spaces (', ')",
        )];
    }

    body.split(", ")
        .flat_map(|reference| values::pep_number(line, reference, "PEP reference"))
        .collect()
}

pub fn validate_python_version(line: usize, body: &str) -> Vec<LintMessage> {
    let mut messages = Vec::new();
    let mut push = |message: String| messages.push(LintMessage::new(line, message));

    for version in body.split(", ") {
        let dots = version.matches('.').count();
        if dots != 1 && dots != 2 {
            push(format!(
                "Python-Version must have two or three segments: {}",
                version
            ));
            continue;
        }

        let mut parts = version.splitn(3, '.');
        let major = parts.next().unwrap_or("");
        let minor = parts.next().unwrap_or("");
        let micro = parts.next().unwrap_or("");

        if !matches!(major, "1" | "2" | "3") {
            push(format!(
                "Python-Version major part must be 1, 2, or 3: {}",
                version
            ));
        }
        if !values::is_digits(minor) && minor != "x" {
            push(format!(
                "Python-Version minor part must be numeric: {}",
                version
            ));
        } else if minor != "0" && minor.starts_with('0') {
            push(format!(
                "Python-Version minor part must not have leading zeros: {}",
                version
            ));
        }

        if micro.is_empty() {
            continue;
        }
        if minor == "x" {
            push(format!(
                "Python-Version micro part must be empty if minor part is 'x': {}",
                version
            ));
        } else if micro.starts_with('0') {
            push(format!(
                "Python-Version micro part must not have leading zeros: {}",
                version
            ));
        } else if !values::is_digits(micro) {
            push(format!(
                "Python-Version micro part must be numeric: {}",
                version
            ));
        }
    }
    messages
}

/// A `Post-History` entry or a `Resolution` value.
#[derive(Debug, PartialEq, Eq)]
enum Reference<'a> {
    Bare(&'a str),
    Linked { date: &'a str, url: &'a str },
    Unbalanced,
}

/// Split `` `DD-Mmm-YYYY <url>`__ `` into its date and URL.
fn split_reference(text: &str) -> Reference<'_> {
    match (text.starts_with('`'), text.ends_with(">`__")) {
        (false, false) => Reference::Bare(text),
        (true, true) => match text[1..text.len() - 4].split_once(" <") {
            Some((date, url)) => Reference::Linked { date, url },
            None => Reference::Unbalanced,
        },
        _ => Reference::Unbalanced,
    }
}

pub fn validate_post_history(line: usize, body: &str, today: NaiveDate) -> Vec<LintMessage> {
    if body.is_empty() {
        return Vec::new();
    }

    let mut messages = Vec::new();
    let body = body.strip_suffix(',').unwrap_or(body);
    for (offset, text) in body.split('\n').enumerate() {
        let line_num = line + offset;
        let text = text.trim();
        let text = text.strip_suffix(',').unwrap_or(text);
        for post in text.split(", ") {
            match split_reference(post) {
                Reference::Bare(date) => {
                    messages.extend(values::date(line_num, date, "Post-History", today))
                }
                Reference::Linked { date, url } => {
                    messages.extend(values::date(line_num, date, "Post-History", today));
                    messages.extend(values::thread(
                        line_num,
                        url,
                        "Post-History",
                        ThreadKind::Post,
                    ));
                }
                Reference::Unbalanced => {
                    messages.push(LintMessage::new(line_num, UNBALANCED_POST))
                }
            }
        }
    }
    messages
}

pub fn validate_resolution(line: usize, body: &str, today: NaiveDate) -> Vec<LintMessage> {
    match split_reference(body) {
        Reference::Bare(url) => values::thread(line, url, "Resolution", ThreadKind::Resolution),
        Reference::Linked { date, url } => {
            let mut messages = values::date(line, date, "Resolution", today);
            messages.extend(values::thread(
                line,
                url,
                "Resolution",
                ThreadKind::Resolution,
            ));
            messages
        }
        Reference::Unbalanced => vec![LintMessage::new(line, UNBALANCED_RESOLUTION)],
    }
}
