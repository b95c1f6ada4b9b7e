use super::HeaderName;
use regex::Regex;
use std::sync::LazyLock;

/// A letter-or-hyphen run followed by a colon, at the very start of a line.
static HEADER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z\-]+):(.*)$").expect("valid header regex"));

/// One `Name: body` record from the header block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    pub name: String,
    /// Text after the colon with leading whitespace removed. Continuation
    /// lines are joined with `\n` and keep their indentation.
    pub body: String,
    /// 1-based line the header starts on.
    pub line: usize,
}

impl HeaderField {
    /// The recognised header this field names, if any.
    pub fn header(&self) -> Option<HeaderName> {
        self.name.parse().ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBlock {
    pub fields: Vec<HeaderField>,
    /// Line number of the blank line ending the block, or of the last line
    /// when the file has no blank line.
    pub end_line: usize,
    /// `(line, name)` of unindented `Name:value` lines missing the space
    /// after the colon. Those lines are folded into the previous field.
    pub unspaced: Vec<(usize, String)>,
}

impl HeaderBlock {
    pub fn first(&self, header: HeaderName) -> Option<&HeaderField> {
        self.fields
            .iter()
            .find(|field| field.name == header.as_str())
    }
}

/// Split the leading header block of a PEP into fields.
pub fn tokenize(lines: &[&str]) -> HeaderBlock {
    let mut block = HeaderBlock {
        end_line: lines.len(),
        ..HeaderBlock::default()
    };

    for (idx, line) in lines.iter().enumerate() {
        let line_num = idx + 1;
        if line.trim().is_empty() {
            block.end_line = line_num;
            break;
        }

        if let Some(caps) = HEADER_PATTERN.captures(line) {
            let rest = &caps[2];
            if rest.is_empty() || rest.starts_with(' ') {
                block.fields.push(HeaderField {
                    name: caps[1].to_string(),
                    body: rest.to_string(),
                    line: line_num,
                });
                continue;
            }
            block.unspaced.push((line_num, caps[1].to_string()));
        }

        if let Some(field) = block.fields.last_mut() {
            field.body.push('\n');
            field.body.push_str(line);
        }
    }

    for field in &mut block.fields {
        field.body = field.body.trim_start().to_string();
    }

    block
}
