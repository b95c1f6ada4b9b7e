//! RFC 2822 style header block of a PEP source.
//!
//! - [`HeaderName`]: the recognised headers, declared in PEP 12 order
//! - [`tokenize`]: split the leading lines of a file into [`HeaderField`]s

mod tokenizer;

pub use tokenizer::{HeaderBlock, HeaderField, tokenize};

use std::{fmt, str::FromStr};

/// A recognised PEP header.
///
/// Variants are declared in canonical (PEP 12) order, so the derived `Ord`
/// is the order headers must appear in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeaderName {
    Pep,
    Title,
    Author,
    Sponsor,
    BdflDelegate,
    PepDelegate,
    DiscussionsTo,
    Status,
    Type,
    Topic,
    Requires,
    Created,
    PythonVersion,
    PostHistory,
    Replaces,
    SupersededBy,
    Resolution,
}

impl HeaderName {
    pub const ALL: [HeaderName; 17] = [
        HeaderName::Pep,
        HeaderName::Title,
        HeaderName::Author,
        HeaderName::Sponsor,
        HeaderName::BdflDelegate,
        HeaderName::PepDelegate,
        HeaderName::DiscussionsTo,
        HeaderName::Status,
        HeaderName::Type,
        HeaderName::Topic,
        HeaderName::Requires,
        HeaderName::Created,
        HeaderName::PythonVersion,
        HeaderName::PostHistory,
        HeaderName::Replaces,
        HeaderName::SupersededBy,
        HeaderName::Resolution,
    ];

    pub const REQUIRED: [HeaderName; 6] = [
        HeaderName::Pep,
        HeaderName::Title,
        HeaderName::Author,
        HeaderName::Status,
        HeaderName::Type,
        HeaderName::Created,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderName::Pep => "PEP",
            HeaderName::Title => "Title",
            HeaderName::Author => "Author",
            HeaderName::Sponsor => "Sponsor",
            HeaderName::BdflDelegate => "BDFL-Delegate",
            HeaderName::PepDelegate => "PEP-Delegate",
            HeaderName::DiscussionsTo => "Discussions-To",
            HeaderName::Status => "Status",
            HeaderName::Type => "Type",
            HeaderName::Topic => "Topic",
            HeaderName::Requires => "Requires",
            HeaderName::Created => "Created",
            HeaderName::PythonVersion => "Python-Version",
            HeaderName::PostHistory => "Post-History",
            HeaderName::Replaces => "Replaces",
            HeaderName::SupersededBy => "Superseded-By",
            HeaderName::Resolution => "Resolution",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header names are case sensitive.
impl FromStr for HeaderName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|header| header.as_str() == s)
            .ok_or_else(|| format!("Invalid header: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_sorted_canonically() {
        let mut sorted = HeaderName::ALL;
        sorted.sort();
        assert_eq!(sorted, HeaderName::ALL);
    }

    #[test]
    fn test_from_str_roundtrip() {
        for header in HeaderName::ALL {
            assert_eq!(header.as_str().parse::<HeaderName>(), Ok(header));
        }
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        assert!("title".parse::<HeaderName>().is_err());
        assert!("Content-Type".parse::<HeaderName>().is_err());
    }

    #[test]
    fn test_required_headers() {
        assert!(HeaderName::Created.is_required());
        assert!(!HeaderName::Topic.is_required());
    }
}
