use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Which generation service writes the narrative summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NarrativeProvider {
    #[default]
    OpenAi,
    Anthropic,
}

impl fmt::Display for NarrativeProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NarrativeProvider::OpenAi => write!(f, "openai"),
            NarrativeProvider::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl FromStr for NarrativeProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(NarrativeProvider::OpenAi),
            "anthropic" | "claude" => Ok(NarrativeProvider::Anthropic),
            _ => Err(()),
        }
    }
}

/// What to do when the repository listing fails after the profile succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectListPolicy {
    /// Treat the listing as empty and keep going.
    #[default]
    Lenient,
    /// Fail the whole request as not found.
    Strict,
}

impl FromStr for ProjectListPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(ProjectListPolicy::Lenient),
            "strict" => Ok(ProjectListPolicy::Strict),
            _ => Err(()),
        }
    }
}

/// Application configuration loaded from environment variables.
///
/// Read once at process start and passed by value into constructors;
/// nothing re-reads the environment afterwards.
#[derive(Clone)]
pub struct Config {
    // Directory service
    pub github_api_url: String,
    pub project_list_policy: ProjectListPolicy,

    // Generation service
    pub narrative_provider: NarrativeProvider,
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    /// `None` means the provider's default model.
    pub narrative_model: Option<String>,

    // Outbound HTTP
    pub http_timeout: Duration,

    // Web server
    pub web_host: String,
    pub web_port: u16,

    // Logging
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            project_list_policy: ProjectListPolicy::default(),
            narrative_provider: NarrativeProvider::default(),
            openai_api_key: None,
            anthropic_api_key: None,
            narrative_model: None,
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            web_host: "0.0.0.0".to_string(),
            web_port: 3000,
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let narrative_provider = match get("NARRATIVE_PROVIDER") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
                key: "NARRATIVE_PROVIDER",
                expected: "one of openai, anthropic",
                value: v,
            })?,
            None => defaults.narrative_provider,
        };

        let project_list_policy = match get("PROJECT_LIST_POLICY") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
                key: "PROJECT_LIST_POLICY",
                expected: "one of lenient, strict",
                value: v,
            })?,
            None => defaults.project_list_policy,
        };

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(v) => match v.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "HTTP_TIMEOUT_SECS",
                        expected: "a positive integer",
                        value: v,
                    })
                }
            },
            None => defaults.http_timeout,
        };

        let web_port = match get("WEB_PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
                key: "WEB_PORT",
                expected: "a port number",
                value: v,
            })?,
            None => defaults.web_port,
        };

        Ok(Self {
            github_api_url: get("GITHUB_API_URL").unwrap_or(defaults.github_api_url),
            project_list_policy,
            narrative_provider,
            openai_api_key: get("OPENAI_API_KEY"),
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
            narrative_model: get("NARRATIVE_MODEL"),
            http_timeout,
            web_host: get("WEB_HOST").unwrap_or(defaults.web_host),
            web_port,
            log_json: get("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json")),
        })
    }

    /// Credential for the selected provider, if one is configured.
    pub fn narrative_api_key(&self) -> Option<&str> {
        match self.narrative_provider {
            NarrativeProvider::OpenAi => self.openai_api_key.as_deref(),
            NarrativeProvider::Anthropic => self.anthropic_api_key.as_deref(),
        }
    }
}

// Keys never reach logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("github_api_url", &self.github_api_url)
            .field("project_list_policy", &self.project_list_policy)
            .field("narrative_provider", &self.narrative_provider)
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<set>"))
            .field("anthropic_api_key", &self.anthropic_api_key.as_ref().map(|_| "<set>"))
            .field("narrative_model", &self.narrative_model)
            .field("http_timeout", &self.http_timeout)
            .field("web_host", &self.web_host)
            .field("web_port", &self.web_port)
            .field("log_json", &self.log_json)
            .finish()
    }
}
