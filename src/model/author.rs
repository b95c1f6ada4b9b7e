use crate::error::{PepsError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::io::Read;
use unicode_normalization::UnicodeNormalization;

const NAME_SUFFIXES: [&str; 4] = ["Jr", "Jr.", "II", "III"];

/// One row of `AUTHOR_OVERRIDES.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthorOverride {
    #[serde(rename = "Overridden Name")]
    pub overridden_name: String,
    #[serde(rename = "Surname First")]
    pub surname_first: String,
    #[serde(rename = "Name Reference")]
    pub name_reference: String,
}

/// Hand-written name splits for names the heuristics get wrong, keyed by the
/// name as written in the `Author` header.
#[derive(Debug, Clone, Default)]
pub struct AuthorOverrides(HashMap<String, AuthorOverride>);

impl AuthorOverrides {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let overrides = csv::Reader::from_reader(reader)
            .deserialize::<AuthorOverride>()
            .collect::<std::result::Result<Self, _>>()?;
        Ok(overrides)
    }

    pub fn get(&self, full_name: &str) -> Option<&AuthorOverride> {
        self.0.get(full_name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<AuthorOverride> for AuthorOverrides {
    fn from_iter<I: IntoIterator<Item = AuthorOverride>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|row| (row.overridden_name.trim().to_string(), row))
                .collect(),
        )
    }
}

/// A PEP author. Two authors are the same person when their `last_first`
/// forms match.
#[derive(Debug, Clone)]
pub struct Author {
    /// Name as written in the header.
    pub full_name: String,
    /// `Surname, Forename[, Suffix]`.
    pub last_first: String,
    /// Short form used in index tables.
    pub nick: String,
    /// Lower-cased; empty when none was given.
    pub email: String,
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.last_first == other.last_first
    }
}

impl Eq for Author {}

impl Hash for Author {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.last_first.hash(state);
    }
}

impl Author {
    pub fn parse(full_name: &str, email: &str, overrides: &AuthorOverrides) -> Result<Self> {
        let full_name = full_name.trim();
        let email = email.to_lowercase();

        if let Some(row) = overrides.get(full_name) {
            return Ok(Self {
                full_name: full_name.to_string(),
                last_first: row.surname_first.clone(),
                nick: row.name_reference.clone(),
                email,
            });
        }

        let (last_first, nick) = match NameParts::parse(full_name)? {
            NameParts::Mononym(name) => (name.clone(), name),
            NameParts::Full {
                forename,
                surname,
                suffix,
            } => {
                // `v. Löwis` would otherwise render as an enumerated list item.
                let surname = if surname.chars().nth(1) == Some('.') {
                    format!("\\{}", surname)
                } else {
                    surname
                };
                let last_first = if suffix.is_empty() {
                    format!("{}, {}", surname, forename)
                } else {
                    format!("{}, {}, {}", surname, forename, suffix)
                };
                (last_first, surname)
            }
        };

        Ok(Self {
            full_name: full_name.to_string(),
            last_first,
            nick,
            email,
        })
    }

    pub fn sort_key(&self) -> String {
        sort_key(&self.last_first)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum NameParts {
    Mononym(String),
    Full {
        forename: String,
        surname: String,
        suffix: String,
    },
}

impl NameParts {
    fn parse(full_name: &str) -> Result<Self> {
        let (name, suffix) = full_name.split_once(',').unwrap_or((full_name, ""));
        let mut parts: Vec<&str> = name.split_whitespace().collect();
        let mut suffix = suffix.trim().to_string();

        match parts.len() {
            0 => return Err(PepsError::Parse("Name is empty!".to_string())),
            1 => return Ok(NameParts::Mononym(parts[0].to_string())),
            2 => {
                return Ok(NameParts::Full {
                    forename: parts[0].to_string(),
                    surname: parts[1].to_string(),
                    suffix,
                });
            }
            _ => {}
        }

        if parts.last().is_some_and(|last| NAME_SUFFIXES.contains(last)) {
            let last = parts.pop().unwrap_or_default();
            suffix = format!("{} {}", last, suffix).trim().to_string();
        }

        // Surname particles such as `van`, `von` or `v.`
        let split_at = if is_lowercase_word(parts[parts.len() - 2]) {
            parts.len() - 2
        } else if let Some(initial) = parts.iter().rposition(|part| part.ends_with('.')) {
            initial + 1
        } else {
            parts.len() - 1
        };

        Ok(NameParts::Full {
            forename: parts[..split_at].join(" "),
            surname: parts[split_at..].join(" "),
            suffix,
        })
    }
}

/// Has at least one cased character and no upper-case ones.
fn is_lowercase_word(word: &str) -> bool {
    word.chars().any(char::is_lowercase) && !word.chars().any(char::is_uppercase)
}

/// Sort key for a `Surname, Forename` string: leading lower-case particles
/// of the surname are skipped, then the rest is lower-cased and decomposed.
pub fn sort_key(last_first: &str) -> String {
    let surname = last_first.split(',').next().unwrap_or(last_first);
    let parts: Vec<&str> = surname.split_whitespace().collect();
    let base = match parts
        .iter()
        .position(|part| part.chars().next().is_some_and(char::is_uppercase))
    {
        Some(idx) => parts[idx..].join(" ").to_lowercase(),
        None => surname.to_lowercase(),
    };
    base.nfkd().collect()
}

/// Number of characters after canonical composition.
pub fn display_width(text: &str) -> usize {
    text.nfc().count()
}
