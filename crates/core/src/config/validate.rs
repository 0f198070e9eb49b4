use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Concurrency ceiling is not 0
/// - At least one owner file path is configured
/// - API URL, site and output name are not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.collector.max_concurrent == 0 {
        return Err(ConfigError::ValidationError(
            "collector.max_concurrent cannot be 0".to_string(),
        ));
    }

    if config.collector.owner_file_paths.is_empty() {
        return Err(ConfigError::ValidationError(
            "collector.owner_file_paths cannot be empty".to_string(),
        ));
    }

    if config.github.api_url.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "github.api_url cannot be empty".to_string(),
        ));
    }

    if config.github.site.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "github.site cannot be empty".to_string(),
        ));
    }

    if config.output.base_name.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "output.base_name cannot be empty".to_string(),
        ));
    }

    Ok(())
}
