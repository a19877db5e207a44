//! Configuration resolution for a single run.
//!
//! Every setting resolves once at startup with the same precedence: explicit
//! CLI flag, then environment variable, then built-in default. The resolved
//! [`Config`] is an immutable value passed to every component that needs it;
//! there are no global lookups. The only settings that change after startup
//! are the model and the personality flag, both through explicit UI controls.

use std::time::Duration;

use crate::errors::ChatError;

/// Models the completion service is known to accept. The first entry is the
/// default; the context tab cycles through the list in order.
pub const MODELS: &[&str] = &["gpt-3.5-turbo", "gpt-4", "gpt-4-32k"];

pub const DEFAULT_MAX_TOKENS: u32 = 4097;
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const API_BASE_ENV: &str = "SWOLE_API_BASE";
pub const MAX_TOKENS_ENV: &str = "SWOLE_MAX_TOKENS";
pub const DISABLE_PERSONALITY_ENV: &str = "SWOLE_DISABLE_PERSONALITY";

/// Settings provided on the command line. `None` means the flag was absent
/// and the environment (then the default) decides.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub no_personality: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    pub personality: bool,
    pub timeout: Duration,
}

impl Config {
    /// Resolves the full configuration from CLI overrides and an environment
    /// lookup. The lookup is injected so precedence is testable without
    /// touching the process environment.
    pub fn resolve(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Config, ChatError> {
        let api_key = overrides
            .api_key
            .or_else(|| env(API_KEY_ENV))
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ChatError::Config(format!(
                    "No API key found. Pass one with --key or set {API_KEY_ENV}"
                ))
            })?;

        let api_base = overrides
            .api_base
            .or_else(|| env(API_BASE_ENV))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let model = overrides
            .model
            .unwrap_or_else(|| MODELS[0].to_string());
        if !MODELS.contains(&model.as_str()) {
            return Err(ChatError::Config(format!(
                "Unknown model '{model}'. Known models are: {}",
                MODELS.join(", ")
            )));
        }

        let max_tokens = match overrides.max_tokens {
            Some(value) => value,
            None => match env(MAX_TOKENS_ENV) {
                Some(raw) => raw.parse::<u32>().map_err(|_| {
                    ChatError::Config(format!("{MAX_TOKENS_ENV} is not a number: {raw}"))
                })?,
                None => DEFAULT_MAX_TOKENS,
            },
        };

        let disabled_by_env = env(DISABLE_PERSONALITY_ENV)
            .map(|value| is_truthy(&value))
            .unwrap_or(false);
        let personality = !overrides.no_personality && !disabled_by_env;

        Ok(Config {
            api_key,
            api_base,
            model,
            max_tokens,
            personality,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Resolves against the real process environment.
    pub fn from_env(overrides: ConfigOverrides) -> Result<Config, ChatError> {
        Config::resolve(overrides, |key| std::env::var(key).ok())
    }
}

fn is_truthy(value: &str) -> bool {
    value == "1" || value.to_lowercase().starts_with('t')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_missing_api_key_is_a_config_error() {
        let result = Config::resolve(ConfigOverrides::default(), no_env);
        assert!(matches!(result, Err(ChatError::Config(_))));
    }

    #[test]
    fn test_cli_flag_beats_environment() {
        let overrides = ConfigOverrides {
            api_key: Some("flag-key".to_string()),
            max_tokens: Some(512),
            ..Default::default()
        };
        let config = Config::resolve(overrides, |key| match key {
            API_KEY_ENV => Some("env-key".to_string()),
            MAX_TOKENS_ENV => Some("1024".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.api_key, "flag-key");
        assert_eq!(config.max_tokens, 512);
    }

    #[test]
    fn test_environment_beats_defaults() {
        let config = Config::resolve(ConfigOverrides::default(), |key| match key {
            API_KEY_ENV => Some("env-key".to_string()),
            API_BASE_ENV => Some("http://localhost:8080/v1/".to_string()),
            MAX_TOKENS_ENV => Some("2048".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.api_base, "http://localhost:8080/v1");
        assert_eq!(config.max_tokens, 2048);
        assert_eq!(config.model, MODELS[0]);
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        let overrides = ConfigOverrides {
            api_key: Some("key".to_string()),
            model: Some("gpt-99".to_string()),
            ..Default::default()
        };
        let result = Config::resolve(overrides, no_env);
        assert!(matches!(result, Err(ChatError::Config(_))));
    }

    #[test]
    fn test_invalid_max_tokens_env_is_rejected() {
        let result = Config::resolve(
            ConfigOverrides {
                api_key: Some("key".to_string()),
                ..Default::default()
            },
            |key| match key {
                MAX_TOKENS_ENV => Some("plenty".to_string()),
                _ => None,
            },
        );
        assert!(matches!(result, Err(ChatError::Config(_))));
    }

    #[test]
    fn test_personality_disabled_by_flag_or_env() {
        let by_flag = Config::resolve(
            ConfigOverrides {
                api_key: Some("key".to_string()),
                no_personality: true,
                ..Default::default()
            },
            no_env,
        )
        .unwrap();
        assert!(!by_flag.personality);

        for value in ["1", "true", "True", "t"] {
            let by_env = Config::resolve(
                ConfigOverrides {
                    api_key: Some("key".to_string()),
                    ..Default::default()
                },
                |key| match key {
                    DISABLE_PERSONALITY_ENV => Some(value.to_string()),
                    _ => None,
                },
            )
            .unwrap();
            assert!(!by_env.personality, "expected {value} to disable");
        }

        let default = Config::resolve(
            ConfigOverrides {
                api_key: Some("key".to_string()),
                ..Default::default()
            },
            no_env,
        )
        .unwrap();
        assert!(default.personality);
    }
}
