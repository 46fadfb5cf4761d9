use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_ENDPOINT_URL: &str = "https://api.zoppl.com/api/fashion/find";

/// 16 MiB, the upload ceiling enforced by the analysis service.
const DEFAULT_MAX_IMAGE_BYTES: &str = "16777216";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("ZOPPL_ENV", "development"))?;

    let endpoint_url = or_default("ZOPPL_ENDPOINT_URL", DEFAULT_ENDPOINT_URL);
    if !(endpoint_url.starts_with("https://") || endpoint_url.starts_with("http://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "ZOPPL_ENDPOINT_URL".to_string(),
            reason: format!("\"{endpoint_url}\" is not an http(s) URL"),
        });
    }

    let user_agent = or_default("ZOPPL_USER_AGENT", "zoppl/0.1 (fashion-finder)");
    let log_level = or_default("ZOPPL_LOG_LEVEL", "info");

    let max_image_bytes = parse_u64("ZOPPL_MAX_IMAGE_BYTES", DEFAULT_MAX_IMAGE_BYTES)?;
    if max_image_bytes == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "ZOPPL_MAX_IMAGE_BYTES".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        endpoint_url,
        user_agent,
        log_level,
        max_image_bytes,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ZOPPL_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}
