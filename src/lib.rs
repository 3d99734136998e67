//! `convlog` turns a git history written with conventional commit messages
//! into a markdown changelog.
//!
//! The pipeline is `git log` -> [`parser::parse_commit`] -> [`SectionMap`]
//! -> [`fmt::MarkdownWriter`]. The last commit hash seen is embedded in the
//! output so a later run can pick up where this one stopped (see
//! [`marker`]).

extern crate indexmap;
extern crate regex;
extern crate time;
extern crate toml;

#[macro_use]
mod macros;
mod changelog;
pub mod config;
pub mod error;
pub mod fmt;
pub mod git;
mod link_style;
pub mod marker;
pub mod parser;
mod sectionmap;

pub use changelog::Changelog;
pub use link_style::LinkStyle;
pub use sectionmap::SectionMap;

// The default config file
const DEFAULT_CONFIG_FILE: &str = ".convlog.toml";

/// The changelog file written when nothing else is requested
pub const DEFAULT_OUTPUT: &str = "CHANGELOG.md";

/// Type assigned to commits whose subject is not a conventional commit
pub const FALLBACK_TYPE: &str = "chore";

/// The pseudo type of the group collecting every breaking commit
pub const BREAKING_TYPE: &str = "breaking";
