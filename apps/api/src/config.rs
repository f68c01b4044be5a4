use std::str::FromStr;

use anyhow::{Context, Result};

use crate::matching::{MatchingConfig, ScoreBlend, StrategyKind};

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("unknown log format '{other}' (expected 'pretty' or 'json')"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub llm_api_url: String,
    pub llm_api_key: String,
    pub llm_model: String,
    pub port: u16,
    pub rust_log: String,
    pub log_format: LogFormat,
    pub matching: MatchingConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = MatchingConfig::default();
        let matching = MatchingConfig {
            blend: ScoreBlend {
                skills_weight: env_or("ATS_SKILLS_WEIGHT", defaults.blend.skills_weight)?,
                alignment_weight: env_or("ATS_ALIGNMENT_WEIGHT", defaults.blend.alignment_weight)?,
            },
            relevance_threshold: env_or("ATS_RELEVANCE_THRESHOLD", defaults.relevance_threshold)?,
            experience_mention_credit: env_or(
                "ATS_EXPERIENCE_MENTION_CREDIT",
                defaults.experience_mention_credit,
            )?,
            strategy: std::env::var("ATS_RELEVANCE_STRATEGY")
                .ok()
                .map(|s| s.parse::<StrategyKind>())
                .transpose()
                .map_err(anyhow::Error::msg)
                .context("ATS_RELEVANCE_STRATEGY is invalid")?
                .unwrap_or(defaults.strategy),
        };
        matching
            .validate()
            .context("Matching configuration is invalid")?;

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            llm_api_url: std::env::var("LLM_API_URL")
                .unwrap_or_else(|_| "https://api.perplexity.ai/chat/completions".to_string()),
            llm_api_key: require_env("LLM_API_KEY")?,
            llm_model: std::env::var("LLM_MODEL").unwrap_or_else(|_| "sonar-pro".to_string()),
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: env_or("LOG_FORMAT", LogFormat::Pretty)?,
            matching,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Parses `key` when set, otherwise returns `default`.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_uses_default_when_unset() {
        let value: f64 = env_or("ATS_TEST_UNSET_VARIABLE", 0.7).unwrap();
        assert_eq!(value, 0.7);
    }

    #[test]
    fn test_env_or_parses_set_value() {
        std::env::set_var("ATS_TEST_PORT_VALUE", " 9090 ");
        let port: u16 = env_or("ATS_TEST_PORT_VALUE", 8080).unwrap();
        assert_eq!(port, 9090);
    }

    #[test]
    fn test_env_or_reports_bad_value() {
        std::env::set_var("ATS_TEST_BAD_WEIGHT", "heavy");
        let err = env_or::<f64>("ATS_TEST_BAD_WEIGHT", 0.7).unwrap_err();
        assert!(err.to_string().contains("ATS_TEST_BAD_WEIGHT"));
    }

    #[test]
    fn test_log_format_parses() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
