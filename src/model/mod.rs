//! Data models for PEPs.
//!
//! - [`Pep`]: a parsed PEP header block
//! - [`PepType`], [`PepStatus`]: the closed sets of types and statuses
//! - [`Topic`]: sub-indices a PEP can be filed under
//! - [`Author`]: an author name split into sortable parts

mod author;
mod pep;
mod types;

pub use author::{Author, AuthorOverride, AuthorOverrides, display_width, sort_key};
pub use pep::{PEP_URL_BASE, Pep};
pub use types::{PepStatus, PepType, Topic};
