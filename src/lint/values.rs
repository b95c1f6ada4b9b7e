//! Grammars shared by several header validators.

use super::LintMessage;
use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

// Letters plus the punctuation found in real names.
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L} ',.\-]+$").expect("valid name regex"));

static EMAIL_LOCAL_PART_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_!#$%&'*+\-/=?^{|}~.]+$").expect("valid local-part regex")
});

static MAILMAN_2_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9_\-]+/[0-9]{4}-[a-z]+/[0-9]+\.html$").expect("valid mailman 2 regex")
});

static MAILMAN_3_THREAD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9_\-]+@python\.org/thread/[a-z0-9]+/?$")
        .expect("valid mailman 3 thread regex")
});

static MAILMAN_3_MESSAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9_\-]+@python\.org/message/[a-z0-9]+/?(#[a-z0-9]+)?$")
        .expect("valid mailman 3 message regex")
});

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{2})-([A-Za-z]{3})-([0-9]{4})$").expect("valid date regex")
});

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const DISCOURSE_PREFIX: &str = "https://discuss.python.org/t/";
const PIPERMAIL_PREFIX: &str = "https://mail.python.org/pipermail/";
const HYPERKITTY_PREFIX: &str = "https://mail.python.org/archives/list/";

/// Dates may be at most this many days ahead of today.
pub const FUTURE_DATE_GRACE_DAYS: u64 = 14;

/// Which header a thread URL appears in; each accepts a slightly different set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadKind {
    /// Post-History links: threads or posts.
    Post,
    /// Discussions-To: the thread itself, never a post. Non-URLs are left to
    /// the mailing-list check.
    DiscussionsTo,
    /// Resolution: threads, posts, or individual archived messages.
    Resolution,
}

/// Quote a value the way diagnostics display it: `'value'`.
pub fn quoted(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Non-empty run of ASCII digits.
pub fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(char::is_alphanumeric)
}

pub fn pep_number(line: usize, value: &str, prefix: &str) -> Vec<LintMessage> {
    let mut messages = Vec::new();
    if value.is_empty() {
        messages.push(LintMessage::new(
            line,
            format!("{} must not be blank: {}", prefix, quoted(value)),
        ));
        return messages;
    }
    if value.starts_with('0') && value != "0" {
        messages.push(LintMessage::new(
            line,
            format!("{} must not contain leading zeros: {}", prefix, quoted(value)),
        ));
    }
    if !is_digits(value) {
        messages.push(LintMessage::new(
            line,
            format!("{} must be numeric: {}", prefix, quoted(value)),
        ));
    } else if value.parse::<u32>().map_or(true, |n| n > 9999) {
        messages.push(LintMessage::new(
            line,
            format!("{} must be between 0 and 9999: {}", prefix, quoted(value)),
        ));
    }
    messages
}

/// Check a `Name` or `Name <local@domain>` entry.
pub fn email(line: usize, entry: &str, prefix: &str) -> Vec<LintMessage> {
    let entry = entry.trim();
    let mut messages = Vec::new();
    let mut push = |message: String| messages.push(LintMessage::new(line, message));

    for symbol in ['<', '>', '@'] {
        if entry.matches(symbol).count() > 1 {
            push(format!(
                "{} entries must not contain multiple '{}': {}",
                prefix,
                symbol,
                quoted(entry)
            ));
        }
    }

    let name = entry
        .split_once('<')
        .map_or(entry, |(name, _)| name)
        .trim_end();
    if !NAME_PATTERN.is_match(name) {
        push(format!(
            "{} entries must begin with a valid 'Name': {}",
            prefix,
            quoted(entry)
        ));
        return messages;
    }

    let email_text = &entry[name.len()..];
    if email_text.is_empty() {
        return messages;
    }

    if !email_text.starts_with(" <") || !email_text.ends_with('>') {
        push(format!(
            "{} entries must be formatted as 'Name <email@example.com>': {}",
            prefix,
            quoted(entry)
        ));
    }
    let address = email_text.strip_prefix(" <").unwrap_or(email_text);
    let address = address.strip_suffix('>').unwrap_or(address);

    let parts = address
        .rsplit_once('@')
        .or_else(|| address.rsplit_once(" at "));
    let valid = match parts {
        Some((local, domain)) => EMAIL_LOCAL_PART_PATTERN.is_match(local) && valid_domain(domain),
        None => false,
    };
    if !valid {
        push(format!(
            "{} entries must contain a valid email address: {}",
            prefix,
            quoted(entry)
        ));
    }
    messages
}

fn valid_domain(domain: &str) -> bool {
    let Some((labels, root)) = domain.rsplit_once('.') else {
        return false;
    };
    labels
        .split('.')
        .all(|label| is_alphanumeric(&label.replace('-', "")))
        && is_alphanumeric(root)
        && root.is_ascii()
}

pub fn thread(line: usize, url: &str, prefix: &str, kind: ThreadKind) -> Vec<LintMessage> {
    if is_thread_url(url, kind) {
        return Vec::new();
    }
    if kind == ThreadKind::DiscussionsTo && !url.starts_with("https://") {
        return Vec::new();
    }
    vec![LintMessage::new(
        line,
        format!("{} must be a valid thread URL", prefix),
    )]
}

pub fn is_thread_url(url: &str, kind: ThreadKind) -> bool {
    if let Some(rest) = url.strip_prefix(DISCOURSE_PREFIX) {
        let rest = rest.strip_suffix('/').unwrap_or(rest);
        if is_discourse_path(rest, kind) {
            return true;
        }
    }

    if let Some(rest) = url.strip_prefix(PIPERMAIL_PREFIX) {
        if MAILMAN_2_PATTERN.is_match(rest) {
            return true;
        }
    }

    if let Some(rest) = url.strip_prefix(HYPERKITTY_PREFIX) {
        if kind == ThreadKind::Resolution && MAILMAN_3_MESSAGE_PATTERN.is_match(rest) {
            return true;
        }
        if MAILMAN_3_THREAD_PATTERN.is_match(rest) {
            return true;
        }
    }

    false
}

/// A Discourse topic slug: word characters and hyphens, not purely numeric.
fn is_topic_name(name: &str) -> bool {
    let name = name.replace(['-', '_'], "0");
    !is_digits(&name) && is_alphanumeric(&name)
}

fn is_discourse_path(rest: &str, kind: ThreadKind) -> bool {
    if kind == ThreadKind::DiscussionsTo {
        let (name, id) = rest.rsplit_once('/').unwrap_or(("", rest));
        if name.is_empty() {
            return is_digits(id);
        }
        return is_topic_name(name) && is_digits(id);
    }

    let parts: Vec<&str> = rest.split('/').collect();
    match parts.as_slice() {
        [name, topic_id, post_id] => {
            is_topic_name(name) && is_digits(topic_id) && is_digits(post_id)
        }
        // `name/topic-id` or `topic-id/post-id`
        [left, right] => (is_topic_name(left) || is_digits(left)) && is_digits(right),
        [topic_id] => is_digits(topic_id),
        _ => false,
    }
}

/// Parse a `DD-Mmm-YYYY` date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let caps = DATE_PATTERN.captures(value)?;
    let day: u32 = caps[1].parse().ok()?;
    let month = MONTHS
        .iter()
        .position(|month| month.eq_ignore_ascii_case(&caps[2]))?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month as u32 + 1, day)
}

pub fn date(line: usize, value: &str, prefix: &str, today: NaiveDate) -> Vec<LintMessage> {
    let Some(parsed) = parse_date(value) else {
        return vec![LintMessage::new(
            line,
            format!("{} must be a 'DD-mmm-YYYY' date: {}", prefix, quoted(value)),
        )];
    };

    let mut messages = Vec::new();
    if parsed.year() < 1990 {
        messages.push(LintMessage::new(
            line,
            format!(
                "{} must not be before Python was invented: {}",
                prefix,
                quoted(value)
            ),
        ));
    }
    if parsed > today + Days::new(FUTURE_DATE_GRACE_DAYS) {
        messages.push(LintMessage::new(
            line,
            format!("{} must not be in the future: {}", prefix, quoted(value)),
        ));
    }
    messages
}
