//! Testing utilities and mock implementations.
//!
//! Provides an in-memory `RepositoryHost` so the collector and the full
//! report run can be exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use repo_owners_core::testing::MockRepositoryHost;
//!
//! let host = MockRepositoryHost::new();
//! host.add_repository("widgets").await;
//! host.set_file("widgets", ".github/CODEOWNERS", "* @alice").await;
//! ```

mod mock_host;

pub use mock_host::{MockRepositoryHost, RecordedFetch};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::host::Repository;

    /// `count` repositories named `<prefix>-0` .. `<prefix>-<count-1>`.
    pub fn repositories(prefix: &str, count: usize) -> Vec<Repository> {
        (0..count)
            .map(|i| Repository::new(format!("{}-{}", prefix, i)))
            .collect()
    }

    /// Render a CODEOWNERS file from (pattern, owners) rules.
    pub fn codeowners(rules: &[(&str, &[&str])]) -> String {
        rules
            .iter()
            .map(|(pattern, owners)| {
                let mut line = pattern.to_string();
                for owner in owners.iter() {
                    line.push(' ');
                    line.push_str(owner);
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

}
