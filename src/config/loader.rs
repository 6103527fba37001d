//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ImporterConfig;
use super::secret::secret_string;
use crate::domain::errors::ImportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ImporterConfig
/// 4. Applies environment variable overrides (ADO_BATCH_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`ImportError::Configuration`] if the file cannot be read, a referenced
/// environment variable is unset, TOML parsing fails or validation fails.
///
/// # Examples
///
/// ```no_run
/// use ado_batch::config::loader::load_config;
///
/// let config = load_config("ado-batch.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ImporterConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ImportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ImportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ImporterConfig = toml::from_str(&contents)
        .map_err(|e| ImportError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        ImportError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ImportError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ImportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the ADO_BATCH_* prefix
///
/// Environment variables follow the pattern: ADO_BATCH_<SECTION>_<KEY>
/// For example: ADO_BATCH_DEVOPS_PAT, ADO_BATCH_IMPORT_ITEMS_PATH
fn apply_env_overrides(config: &mut ImporterConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("ADO_BATCH_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Azure DevOps overrides
    if let Ok(val) = std::env::var("ADO_BATCH_DEVOPS_ORGANIZATION") {
        config.devops.organization = val;
    }
    if let Ok(val) = std::env::var("ADO_BATCH_DEVOPS_PROJECT") {
        config.devops.project = val;
    }
    if let Ok(val) = std::env::var("ADO_BATCH_DEVOPS_PAT") {
        config.devops.pat = secret_string(val);
    }
    if let Ok(val) = std::env::var("ADO_BATCH_DEVOPS_SERVICE_URL") {
        config.devops.service_url = val;
    }
    if let Ok(val) = std::env::var("ADO_BATCH_DEVOPS_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.devops.timeout_seconds = timeout;
        }
    }

    // Import overrides
    if let Ok(val) = std::env::var("ADO_BATCH_IMPORT_ITEMS_PATH") {
        config.import.items_path = val;
    }
    if let Ok(val) = std::env::var("ADO_BATCH_IMPORT_MAX_CONCURRENCY") {
        if let Ok(concurrency) = val.parse() {
            config.import.max_concurrency = concurrency;
        }
    }
    if let Ok(val) = std::env::var("ADO_BATCH_IMPORT_DRY_RUN") {
        config.import.dry_run = val.parse().unwrap_or(false);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("ADO_BATCH_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("ADO_BATCH_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("ADO_LOADER_TEST_VAR", "test_value");
        let input = "pat = \"${ADO_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "pat = \"test_value\"\n");
        std::env::remove_var("ADO_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("ADO_LOADER_MISSING_VAR");
        let input = "pat = \"${ADO_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("ADO_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("ADO_LOADER_COMMENTED_VAR");
        let input = "# pat = \"${ADO_LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(ImportError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[devops]
organization = "my-org"
project = "my-project"
pat = "pat-value"

[import]
items_path = "data/items.json"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.devops.organization, "my-org");
        assert_eq!(config.devops.service_url, "https://dev.azure.com");
        assert_eq!(config.import.items_path, "data/items.json");
        assert_eq!(config.import.max_concurrency, 1);
    }

    #[test]
    fn test_load_config_rejects_missing_organization() {
        let toml_content = r#"
[devops]
project = "my-project"
pat = "pat-value"

[import]
items_path = "items.json"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("devops.organization"));
    }
}
