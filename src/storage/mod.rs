//! File-based storage for PEP sources and generated indices.
//!
//! PEPs are reStructuredText files named `pep-NNNN.rst`, opening with an
//! RFC 2822 style header block:
//!
//! ```text
//! PEP: 8
//! Title: Style Guide for Python Code
//! Author: Guido van Rossum <guido@python.org>,
//!         Barry Warsaw <barry@python.org>
//! Status: Active
//! Type: Process
//! Created: 05-Jul-2001
//!
//! Introduction
//! ============
//! ```
//!
//! ## Components
//!
//! - [`PepRepository`]: enumerate sources and write generated files
//! - [`parse_pep`]: build a [`Pep`](crate::model::Pep) from a source file
//! - [`load_author_overrides`]: read `AUTHOR_OVERRIDES.csv`

mod repository;
mod rst;

pub use repository::{PepRepository, atomic_write, load_author_overrides};
pub use rst::{parse_pep, split_authors};
