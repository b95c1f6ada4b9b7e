use crate::error::{PepsError, Result};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PepType {
    StandardsTrack,
    Informational,
    Process,
}

impl PepType {
    pub const ALL: [PepType; 3] = [
        PepType::Informational,
        PepType::Process,
        PepType::StandardsTrack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PepType::StandardsTrack => "Standards Track",
            PepType::Informational => "Informational",
            PepType::Process => "Process",
        }
    }

    /// Single-letter code used in the index tables.
    pub fn abbreviation(&self) -> char {
        match self {
            PepType::StandardsTrack => 'S',
            PepType::Informational => 'I',
            PepType::Process => 'P',
        }
    }
}

impl fmt::Display for PepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PepType {
    type Err = PepsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Standards Track" => Ok(PepType::StandardsTrack),
            "Informational" => Ok(PepType::Informational),
            "Process" => Ok(PepType::Process),
            _ => Err(PepsError::Parse(format!("{} is not a valid Type value", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PepStatus {
    Accepted,
    Active,
    Deferred,
    Draft,
    Final,
    Provisional,
    Rejected,
    Superseded,
    Withdrawn,
}

impl PepStatus {
    /// Sorted by name.
    pub const ALL: [PepStatus; 9] = [
        PepStatus::Accepted,
        PepStatus::Active,
        PepStatus::Deferred,
        PepStatus::Draft,
        PepStatus::Final,
        PepStatus::Provisional,
        PepStatus::Rejected,
        PepStatus::Superseded,
        PepStatus::Withdrawn,
    ];

    /// Joke status from PEP 401, stored as `Rejected`.
    pub const APRIL_FOOL: &'static str = "April Fool!";

    pub fn as_str(&self) -> &'static str {
        match self {
            PepStatus::Accepted => "Accepted",
            PepStatus::Active => "Active",
            PepStatus::Deferred => "Deferred",
            PepStatus::Draft => "Draft",
            PepStatus::Final => "Final",
            PepStatus::Provisional => "Provisional",
            PepStatus::Rejected => "Rejected",
            PepStatus::Superseded => "Superseded",
            PepStatus::Withdrawn => "Withdrawn",
        }
    }

    /// Single-letter code used in the index tables. Draft and Active are the
    /// default states of their types and show as a blank.
    pub fn abbreviation(&self) -> char {
        match self {
            PepStatus::Draft | PepStatus::Active => ' ',
            other => other.as_str().chars().next().unwrap_or(' '),
        }
    }

    pub fn is_dead(&self) -> bool {
        matches!(
            self,
            PepStatus::Rejected | PepStatus::Withdrawn | PepStatus::Superseded
        )
    }
}

impl fmt::Display for PepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PepStatus {
    type Err = PepsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Accepted" => Ok(PepStatus::Accepted),
            "Active" => Ok(PepStatus::Active),
            "Deferred" => Ok(PepStatus::Deferred),
            "Draft" => Ok(PepStatus::Draft),
            "Final" => Ok(PepStatus::Final),
            "Provisional" => Ok(PepStatus::Provisional),
            "Rejected" | PepStatus::APRIL_FOOL => Ok(PepStatus::Rejected),
            "Superseded" => Ok(PepStatus::Superseded),
            "Withdrawn" => Ok(PepStatus::Withdrawn),
            _ => Err(PepsError::Parse(format!("{} is not a valid Status value", s))),
        }
    }
}

/// Sub-index a PEP can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topic {
    Governance,
    Packaging,
    Release,
    Typing,
}

impl Topic {
    pub const ALL: [Topic; 4] = [
        Topic::Governance,
        Topic::Packaging,
        Topic::Release,
        Topic::Typing,
    ];

    /// Title-case name as written in the `Topic:` header.
    pub fn title(&self) -> &'static str {
        match self {
            Topic::Governance => "Governance",
            Topic::Packaging => "Packaging",
            Topic::Release => "Release",
            Topic::Typing => "Typing",
        }
    }

    /// Lower-case name used for file names and stored topic sets.
    pub fn slug(&self) -> &'static str {
        match self {
            Topic::Governance => "governance",
            Topic::Packaging => "packaging",
            Topic::Release => "release",
            Topic::Typing => "typing",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Topic> {
        Self::ALL.into_iter().find(|topic| topic.slug() == slug)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Topic {
    type Err = PepsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|topic| topic.title() == s)
            .ok_or_else(|| PepsError::Parse(format!("Invalid topic: {}", s)))
    }
}
