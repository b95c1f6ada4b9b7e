//! PEP source linter.
//!
//! [`Linter::check_source`] runs every header validator over one file and
//! returns its [`LintMessage`]s; [`FileReport`] renders them in the
//! `path:line:  message` format editors and CI understand.

pub mod validators;
pub mod values;

use crate::headers::{HeaderBlock, HeaderName, tokenize};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// PEPs that legitimately link to other PEPs or RFCs by URL.
pub const DEFAULT_SKIP_DIRECT_LINK_CHECK: [u32; 5] = [9, 287, 676, 684, 8001];

/// A single problem found in a PEP. Line 0 refers to the file as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintMessage {
    pub line: usize,
    pub message: String,
}

impl LintMessage {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Lint results for one file, along with its lines for detailed output.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub lines: Vec<String>,
    pub messages: Vec<LintMessage>,
}

impl FileReport {
    pub fn is_clean(&self) -> bool {
        self.messages.is_empty()
    }

    /// Render all messages, using `display` as the file name.
    pub fn render(&self, display: &str, detailed: bool) -> String {
        let mut out = String::new();
        for msg in &self.messages {
            let _ = writeln!(out, "{}:{}:  {}", display, msg.line, msg.message);
            if !detailed {
                continue;
            }
            let source = msg
                .line
                .checked_sub(1)
                .and_then(|idx| self.lines.get(idx))
                .map(String::as_str)
                .unwrap_or("");
            let _ = writeln!(out, "     |");
            let _ = writeln!(out, "{:>4} | '{}'", msg.line, source);
            let _ = writeln!(out, "     |");
        }
        out
    }
}

/// Show `path` relative to `cwd` when it lives below it.
pub fn display_path(path: &Path, cwd: &Path) -> String {
    if path.is_absolute() {
        if let Ok(relative) = path.strip_prefix(cwd) {
            return relative.display().to_string();
        }
    }
    path.display().to_string()
}

/// The number in a `pep-NNNN.rst` file name.
pub fn number_from_filename(path: &Path) -> Option<u32> {
    path.file_stem()?
        .to_str()?
        .strip_prefix("pep-")?
        .parse()
        .ok()
}

#[derive(Debug, Clone)]
pub struct Linter {
    today: NaiveDate,
    skip_direct_link_check: BTreeSet<u32>,
}

impl Linter {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            skip_direct_link_check: DEFAULT_SKIP_DIRECT_LINK_CHECK.into_iter().collect(),
        }
    }

    pub fn with_skip_list(mut self, numbers: impl IntoIterator<Item = u32>) -> Self {
        self.skip_direct_link_check = numbers.into_iter().collect();
        self
    }

    /// Lint one file. An unreadable file yields a single line-0 message.
    pub fn check_file(&self, path: &Path) -> FileReport {
        tracing::debug!(path = %path.display(), "Checking PEP");
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Could not read file");
                return FileReport {
                    path: path.to_path_buf(),
                    lines: vec![String::new()],
                    messages: vec![LintMessage::new(0, "Could not read PEP!")],
                };
            }
        };

        let messages = self.check_source(number_from_filename(path), &content);
        FileReport {
            path: path.to_path_buf(),
            lines: content.lines().map(str::to_string).collect(),
            messages,
        }
    }

    /// Lint PEP source text. `number` is taken from the file name and only
    /// decides whether the direct-link check applies.
    pub fn check_source(&self, number: Option<u32>, content: &str) -> Vec<LintMessage> {
        let lines: Vec<&str> = content.lines().collect();
        let block = tokenize(&lines);

        let mut messages = validators::validate_pep_number(lines.first().copied().unwrap_or(""));
        messages.extend(check_headers(&block));

        for field in &block.fields {
            if let Some(header) = field.header() {
                messages.extend(validators::validate_header(
                    header,
                    field.line,
                    &field.body,
                    self.today,
                ));
            }
        }

        let skip_links = number.is_some_and(|n| self.skip_direct_link_check.contains(&n));
        if !skip_links {
            for (idx, line) in lines.iter().enumerate().skip(block.end_line) {
                messages.extend(check_direct_links(idx + 1, line.trim_start()));
            }
        }

        messages.sort_by_key(|msg| msg.line);
        messages
    }
}

/// Structural checks over the whole header block: spacing, duplicates,
/// unknown names, required headers and their order.
fn check_headers(block: &HeaderBlock) -> Vec<LintMessage> {
    let mut messages: Vec<LintMessage> = block
        .unspaced
        .iter()
        .map(|(line, name)| {
            LintMessage::new(
                *line,
                format!("Headers must have a space after the colon: {}", name),
            )
        })
        .collect();

    let mut found: Vec<HeaderName> = Vec::new();
    for field in &block.fields {
        match field.header() {
            Some(header) if found.contains(&header) => messages.push(LintMessage::new(
                field.line,
                format!("Must not have duplicate header: {}", header),
            )),
            Some(header) => found.push(header),
            None => messages.push(LintMessage::new(
                field.line,
                format!("Must not have invalid header: {}", field.name),
            )),
        }
    }

    for required in HeaderName::REQUIRED {
        if !found.contains(&required) {
            messages.push(LintMessage::new(
                1,
                format!("Must have required header: {}", required),
            ));
        }
    }

    let mut ordered = found.clone();
    ordered.sort();
    if ordered != found {
        let order = ordered
            .iter()
            .map(HeaderName::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        messages.push(LintMessage::new(
            1,
            format!("Headers must be in PEP 12 order. Correct order: {}", order),
        ));
    }

    messages
}

fn check_direct_links(line: usize, text: &str) -> Vec<LintMessage> {
    let text = text.to_lowercase();
    let mut messages = Vec::new();
    if text.contains("dev/peps/pep-") || text.contains("peps.python.org/pep-") {
        messages.push(LintMessage::new(
            line,
            "Use the :pep:`NNN` role to refer to PEPs",
        ));
    }
    if text.contains("rfc-editor.org/rfc/") || text.contains("ietf.org/doc/html/rfc") {
        messages.push(LintMessage::new(
            line,
            "Use the :rfc:`NNN` role to refer to RFCs",
        ));
    }
    messages
}
