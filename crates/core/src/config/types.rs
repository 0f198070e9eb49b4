use serde::{Deserialize, Serialize};

/// Default ceiling on concurrently running repository lookups.
pub const DEFAULT_MAX_CONCURRENT: usize = 20;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub collector: CollectorConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// GitHub API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubConfig {
    /// REST API base URL (default: https://api.github.com)
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Site name used in report URLs: https://<site>.com/<org>/<repo>
    #[serde(default = "default_site")]
    pub site: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            site: default_site(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_site() -> String {
    "github".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "find_repo_owner".to_string()
}

/// Collector configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CollectorConfig {
    /// Maximum repositories looked up at the same time (default: 20)
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    /// Owner file locations, tried in order
    #[serde(default = "default_owner_file_paths")]
    pub owner_file_paths: Vec<String>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            owner_file_paths: default_owner_file_paths(),
        }
    }
}

fn default_max_concurrent() -> usize {
    DEFAULT_MAX_CONCURRENT
}

fn default_owner_file_paths() -> Vec<String> {
    vec!["CODEOWNERS".to_string(), ".github/CODEOWNERS".to_string()]
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Report file name without the `.csv` extension
    #[serde(default = "default_base_name")]
    pub base_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_name: default_base_name(),
        }
    }
}

fn default_base_name() -> String {
    "results_from_repos".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.github.site, "github");
        assert_eq!(config.github.timeout_secs, 30);
        assert_eq!(config.collector.max_concurrent, 20);
        assert_eq!(
            config.collector.owner_file_paths,
            vec!["CODEOWNERS", ".github/CODEOWNERS"]
        );
        assert_eq!(config.output.base_name, "results_from_repos");
    }

    #[test]
    fn test_deserialize_overrides() {
        let toml = r#"
[github]
api_url = "https://ghe.example.com/api/v3"
site = "ghe.example"

[collector]
max_concurrent = 5
owner_file_paths = ["docs/CODEOWNERS"]

[output]
base_name = "owners"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.github.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.github.site, "ghe.example");
        assert_eq!(config.github.timeout_secs, 30); // default
        assert_eq!(config.collector.max_concurrent, 5);
        assert_eq!(config.collector.owner_file_paths, vec!["docs/CODEOWNERS"]);
        assert_eq!(config.output.base_name, "owners");
    }

    #[test]
    fn test_deserialize_partial_section() {
        let toml = r#"
[collector]
max_concurrent = 8
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.collector.max_concurrent, 8);
        assert_eq!(config.collector.owner_file_paths.len(), 2);
    }

    #[test]
    fn test_deserialize_wrong_type_fails() {
        let toml = r#"
[collector]
max_concurrent = "many"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }
}
