//! Types shared by repository host backends.

/// A repository of an organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repository {
    /// Repository name, unique within the organization.
    pub name: String,
}

impl Repository {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Canonical browser URL of a repository: `https://<site>.com/<org>/<repo>`.
pub fn repository_url(site: &str, org: &str, repo: &str) -> String {
    format!("https://{}.com/{}/{}", site, org, repo)
}
