//! Runtime configuration read from the environment.

use std::time::Duration;

use tracing::warn;

pub const DEFAULT_MODEL: &str = "gpt-5-nano";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a helpful quiz writer.
Return ONLY JSON that matches this schema exactly (no extra text):

{
  "topic": "string",
  "questions": [
    {
      "question": "string",
      "options": ["optA", "optB", "optC", "optD"],
      "correct_index": 0,
      "explanation": "string"
    }
  ]
}

Rules:
- Produce exactly N multiple-choice questions for the given topic.
- Each question MUST have exactly 4 distinct options.
- correct_index must be 0..3.
- Keep questions fun, Halloween-themed (PG-13 / kid-safe).
"#;

/// Settings for the question service.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Credential for the service. `None` forces offline questions.
    pub api_key: Option<String>,
    pub model_name: String,
    pub temperature: f32,
    pub system_prompt: String,
    pub api_base: String,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Unset, blank or unparsable values
    /// fall back to defaults; nothing here fails.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();

        let temperature = match get("TEMPERATURE") {
            Some(raw) => match raw.parse::<f32>() {
                Ok(value) if value.is_finite() && (0.0..=2.0).contains(&value) => value,
                _ => {
                    warn!(value = %raw, "ignoring invalid TEMPERATURE");
                    defaults.temperature
                }
            },
            None => defaults.temperature,
        };

        let request_timeout = match get("GENERATION_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(value = %raw, "ignoring invalid GENERATION_TIMEOUT_SECS");
                    defaults.request_timeout
                }
            },
            None => defaults.request_timeout,
        };

        Self {
            api_key: get("OPENAI_API_KEY").or_else(|| get("API_KEY")),
            model_name: get("MODEL_NAME").unwrap_or(defaults.model_name),
            temperature,
            system_prompt: get("GEN_SYSTEM_PROMPT").unwrap_or(defaults.system_prompt),
            api_base: get("OPENAI_BASE_URL")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            request_timeout,
        }
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}
