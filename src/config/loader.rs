//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ConverterConfig;
use crate::domain::errors::Fast5Error;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ConverterConfig
/// 4. Applies environment variable overrides (FAST5_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use fast5_split::config::loader::load_config;
///
/// let config = load_config("fast5-split.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ConverterConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Fast5Error::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        Fast5Error::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ConverterConfig = toml::from_str(&contents)
        .map_err(|e| Fast5Error::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;
    validate(&config)?;

    Ok(config)
}

/// Builds the configuration without a file
///
/// Starts from the defaults and applies the FAST5_* environment overrides.
pub fn load_default() -> Result<ConverterConfig> {
    let mut config = ConverterConfig::default();
    apply_env_overrides(&mut config)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ConverterConfig) -> Result<()> {
    config
        .validate()
        .map_err(|e| Fast5Error::Configuration(format!("Configuration validation failed: {}", e)))
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| Fast5Error::Configuration(format!("Invalid placeholder pattern: {}", e)))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

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
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(Fast5Error::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    value.trim().parse().map_err(|_| {
        Fast5Error::Configuration(format!("{} must be true or false, got '{}'", name, value))
    })
}

/// Applies environment variable overrides using FAST5_* prefix
///
/// Environment variables follow the pattern: FAST5_<SECTION>_<KEY>
/// For example: FAST5_CONVERSION_BATCH_SIZE, FAST5_LOGGING_LOCAL_PATH
fn apply_env_overrides(config: &mut ConverterConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("FAST5_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val.to_lowercase();
    }

    // Conversion overrides
    if let Ok(val) = std::env::var("FAST5_CONVERSION_BATCH_SIZE") {
        config.conversion.batch_size = val.trim().parse().map_err(|_| {
            Fast5Error::Configuration(format!(
                "FAST5_CONVERSION_BATCH_SIZE must be an integer, got '{}'",
                val
            ))
        })?;
    }
    if let Ok(val) = std::env::var("FAST5_CONVERSION_RECURSIVE") {
        config.conversion.recursive = parse_bool("FAST5_CONVERSION_RECURSIVE", &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("FAST5_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_bool("FAST5_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("FAST5_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        temp_file.flush().unwrap();
        temp_file
    }

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("FAST5_LOADER_TEST_DIR", "/var/log/fast5");
        let input = "local_path = \"${FAST5_LOADER_TEST_DIR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "local_path = \"/var/log/fast5\"\n");
        std::env::remove_var("FAST5_LOADER_TEST_DIR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("FAST5_LOADER_MISSING_VAR");
        let input = "local_path = \"${FAST5_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("FAST5_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("FAST5_LOADER_COMMENTED_VAR");
        let input = "# local_path = \"${FAST5_LOADER_COMMENTED_VAR}\"\nrecursive = true";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${FAST5_LOADER_COMMENTED_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(Fast5Error::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let file = write_config(
            r#"
[application]
log_level = "debug"
show_progress = false

[conversion]
batch_size = 250
recursive = true
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert!(!config.application.show_progress);
        assert_eq!(config.conversion.batch_size, 250);
        assert!(config.conversion.recursive);
        assert_eq!(config.logging.local_rotation, "daily");
    }

    #[test]
    fn test_load_config_rejects_zero_batch_size() {
        let file = write_config("[conversion]\nbatch_size = 0\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("batch_size"));
    }

    #[test]
    fn test_load_config_rejects_malformed_toml() {
        let file = write_config("[conversion\nbatch_size = ");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", "true").unwrap());
        assert!(!parse_bool("X", " false ").unwrap());
        assert!(parse_bool("X", "yes").is_err());
    }
}
