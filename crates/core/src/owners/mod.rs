//! Ownership declaration files.
//!
//! Parsing of CODEOWNERS-style files and the optional allow-list of owners
//! the report should be filtered to.

mod known;
mod parser;

pub use known::{KnownOwners, KnownOwnersError};
pub use parser::{is_comment, parse_owners};

/// Owner value recorded when a repository has no usable owner file.
pub const NO_OWNER: &str = "None";
