use std::env;

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_OLLAMA_MODEL: &str = "deepseek-coder:latest";
const DEFAULT_OLLAMA_BIN: &str = "ollama";
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub ollama_bin: String,
    pub ollama_model: String,
    pub model_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_env_with(|key| env::var(key).ok())
    }

    fn from_env_with(mut get_var: impl FnMut(&str) -> Option<String>) -> Self {
        Self {
            gemini_api_key: get_var("GEMINI_API_KEY").filter(|key| !key.trim().is_empty()),
            gemini_base_url: get_var("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_model: get_var("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            ollama_bin: get_var("OLLAMA_BIN").unwrap_or_else(|| DEFAULT_OLLAMA_BIN.to_string()),
            ollama_model: get_var("OLLAMA_MODEL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
            model_timeout_secs: parse_model_timeout_secs(get_var("MODEL_TIMEOUT_SECS").as_deref()),
        }
    }
}

fn parse_positive_u64(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

fn parse_model_timeout_secs(raw: Option<&str>) -> u64 {
    parse_positive_u64(raw, DEFAULT_MODEL_TIMEOUT_SECS)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{
        Config, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_MODEL_TIMEOUT_SECS,
        DEFAULT_OLLAMA_BIN, DEFAULT_OLLAMA_MODEL, parse_model_timeout_secs,
    };

    fn config_from_pairs(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        Config::from_env_with(|key| vars.get(key).cloned())
    }

    #[test]
    fn from_env_uses_defaults_when_vars_are_missing() {
        let cfg = config_from_pairs(&[]);
        assert_eq!(cfg.gemini_api_key, None);
        assert_eq!(cfg.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(cfg.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(cfg.ollama_bin, DEFAULT_OLLAMA_BIN);
        assert_eq!(cfg.ollama_model, DEFAULT_OLLAMA_MODEL);
        assert_eq!(cfg.model_timeout_secs, DEFAULT_MODEL_TIMEOUT_SECS);
    }

    #[test]
    fn from_env_reads_configured_values() {
        let cfg = config_from_pairs(&[
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_BASE_URL", "http://localhost:9999/v1beta"),
            ("GEMINI_MODEL", "gemini-1.5-pro"),
            ("OLLAMA_BIN", "/opt/ollama/bin/ollama"),
            ("OLLAMA_MODEL", "qwen2.5:3b"),
            ("MODEL_TIMEOUT_SECS", "15"),
        ]);

        assert_eq!(cfg.gemini_api_key.as_deref(), Some("secret"));
        assert_eq!(cfg.gemini_base_url, "http://localhost:9999/v1beta");
        assert_eq!(cfg.gemini_model, "gemini-1.5-pro");
        assert_eq!(cfg.ollama_bin, "/opt/ollama/bin/ollama");
        assert_eq!(cfg.ollama_model, "qwen2.5:3b");
        assert_eq!(cfg.model_timeout_secs, 15);
    }

    #[test]
    fn from_env_treats_blank_api_key_as_unset() {
        let cfg = config_from_pairs(&[("GEMINI_API_KEY", "   ")]);
        assert_eq!(cfg.gemini_api_key, None);
    }

    #[test]
    fn parse_model_timeout_secs_uses_default_for_missing_or_invalid_values() {
        assert_eq!(parse_model_timeout_secs(None), DEFAULT_MODEL_TIMEOUT_SECS);
        assert_eq!(
            parse_model_timeout_secs(Some("")),
            DEFAULT_MODEL_TIMEOUT_SECS
        );
        assert_eq!(
            parse_model_timeout_secs(Some("not-a-number")),
            DEFAULT_MODEL_TIMEOUT_SECS
        );
        assert_eq!(
            parse_model_timeout_secs(Some("0")),
            DEFAULT_MODEL_TIMEOUT_SECS
        );
    }

    #[test]
    fn parse_model_timeout_secs_accepts_positive_integer() {
        assert_eq!(parse_model_timeout_secs(Some("45")), 45);
        assert_eq!(parse_model_timeout_secs(Some("  90  ")), 90);
    }
}
