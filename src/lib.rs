//! # Peps - PEP header linter and index generator
//!
//! Python Enhancement Proposals live as `pep-NNNN.rst` files whose first
//! lines are an RFC 2822 style header block. This crate checks those headers
//! and builds the generated indices from them.
//!
//! ## Quick Start
//!
//! ```bash
//! # Check every PEP in the source directory
//! peps check
//!
//! # Check specific files, showing the offending lines
//! check-peps --detailed peps/pep-0008.rst
//!
//! # Write PEP 0, the topic pages and peps.json into build/
//! peps index
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: `peps.toml` loading
//! - [`error`]: Error types and result aliases
//! - [`headers`]: Header block tokenizer
//! - [`index`]: PEP 0, topic indices and `peps.json`
//! - [`lint`]: Header validators and the file linter
//! - [`model`]: PEP records, authors, statuses and types
//! - [`storage`]: Source discovery, parsing and output writing

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading.
///
/// Handles `peps.toml` files and project root discovery.
pub mod config;

/// Error types and result aliases.
///
/// Defines `PepsError`, `PepError` and the `Result<T>` type alias.
pub mod error;

/// Header block tokenizer shared by the linter and the parser.
pub mod headers;

pub mod index;

/// Header validation.
pub mod lint;

pub mod logging;

/// Data models for PEPs.
///
/// Includes `Pep`, `Author`, `PepStatus`, `PepType` and `Topic`.
pub mod model;

/// File-based storage layer.
///
/// Finds `pep-NNNN.rst` sources, parses them into records and writes
/// generated output atomically.
pub mod storage;
