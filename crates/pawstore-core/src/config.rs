use crate::app_config::{
    AppConfig, AttributeVocabulary, Environment, DEFAULT_MAX_ATTRIBUTES, DEFAULT_MAX_COMBINATIONS,
};
use crate::products::DEFAULT_SKU_PATTERN;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; absent ones fall back to the defaults in
/// [`AppConfig::default`].
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_limit = |var: &str, default: usize| -> Result<usize, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(default);
        };
        let value = raw
            .trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(value)
    };

    let parse_list = |var: &str, default: Vec<String>| -> Result<Vec<String>, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(default);
        };
        let names = split_names(&raw);
        if names.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must list at least one attribute name".to_string(),
            });
        }
        Ok(names)
    };

    let env = parse_environment(&or_default("PAWSTORE_ENV", "development"));
    let log_level = or_default("PAWSTORE_LOG_LEVEL", "info");

    let max_combinations = parse_limit("PAWSTORE_MAX_COMBINATIONS", DEFAULT_MAX_COMBINATIONS)?;
    let max_attributes = parse_limit("PAWSTORE_MAX_ATTRIBUTES", DEFAULT_MAX_ATTRIBUTES)?;

    let sku_pattern = or_default("PAWSTORE_SKU_PATTERN", DEFAULT_SKU_PATTERN);
    if sku_pattern.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "PAWSTORE_SKU_PATTERN".to_string(),
            reason: "must not be blank".to_string(),
        });
    }

    let defaults = AttributeVocabulary::default();
    let vocabulary = AttributeVocabulary {
        size: parse_list("PAWSTORE_SIZE_SYNONYMS", defaults.size)?,
        color: parse_list("PAWSTORE_COLOR_SYNONYMS", defaults.color)?,
        material: parse_list("PAWSTORE_MATERIAL_SYNONYMS", defaults.material)?,
    };

    Ok(AppConfig {
        env,
        log_level,
        max_combinations,
        max_attributes,
        sku_pattern,
        vocabulary,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

/// Split a comma-separated synonym list, dropping blank entries.
fn split_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
