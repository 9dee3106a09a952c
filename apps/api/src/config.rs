use anyhow::{Context, Result};

use crate::analysis::sections::SplitMode;

const DEFAULT_EMBEDDINGS_URL: &str = "http://localhost:1234/v1/embeddings";
const DEFAULT_CHAT_URL: &str = "http://localhost:1234/v1/chat/completions";
const DEFAULT_EMBED_MODEL: &str = "text-embedding-nomic-embed-text-v1.5";
const DEFAULT_CHAT_MODEL: &str = "phi-3.1-mini-4k-instruct";

/// Application configuration loaded from environment variables.
/// Every value has a local-model default, so an empty environment starts
/// against an LM Studio style server on localhost.
#[derive(Debug, Clone)]
pub struct Config {
    pub embeddings_url: String,
    pub chat_url: String,
    pub embed_model: String,
    pub chat_model: String,
    pub split_mode: SplitMode,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, falling back to defaults for
    /// missing keys. Values that are present but malformed are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            embeddings_url: get("EMBEDDINGS_URL", DEFAULT_EMBEDDINGS_URL),
            chat_url: get("CHAT_URL", DEFAULT_CHAT_URL),
            embed_model: get("EMBED_MODEL", DEFAULT_EMBED_MODEL),
            chat_model: get("CHAT_MODEL", DEFAULT_CHAT_MODEL),
            split_mode: get("SECTION_SPLIT_MODE", "ordered")
                .parse::<SplitMode>()
                .context("SECTION_SPLIT_MODE must be 'ordered' or 'legacy'")?,
            port: get("PORT", "5000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG", "info"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_environment_uses_local_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.embeddings_url, DEFAULT_EMBEDDINGS_URL);
        assert_eq!(config.chat_url, DEFAULT_CHAT_URL);
        assert_eq!(config.embed_model, DEFAULT_EMBED_MODEL);
        assert_eq!(config.chat_model, DEFAULT_CHAT_MODEL);
        assert_eq!(config.split_mode, SplitMode::Ordered);
        assert_eq!(config.port, 5000);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_values_override_defaults() {
        let config = config_from(&[
            ("CHAT_MODEL", "llama-3-8b"),
            ("SECTION_SPLIT_MODE", "legacy"),
            ("PORT", "8080"),
        ])
        .unwrap();
        assert_eq!(config.chat_model, "llama-3-8b");
        assert_eq!(config.split_mode, SplitMode::Legacy);
        assert_eq!(config.port, 8080);
        assert_eq!(config.embed_model, DEFAULT_EMBED_MODEL);
    }

    #[test]
    fn test_unparsable_port_is_an_error() {
        for port in ["abc", "70000", ""] {
            let err = config_from(&[("PORT", port)]).unwrap_err();
            assert!(err.to_string().contains("PORT"), "{port:?}: {err}");
        }
    }

    #[test]
    fn test_unknown_split_mode_is_an_error() {
        let err = config_from(&[("SECTION_SPLIT_MODE", "fuzzy")]).unwrap_err();
        assert!(err.to_string().contains("SECTION_SPLIT_MODE"));
    }
}
