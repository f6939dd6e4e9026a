//! Configuration settings for vidbrief.

use super::Prompts;
use crate::error::{Result, VidbriefError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the Twelve Labs API key.
pub const TWELVELABS_API_KEY_ENV: &str = "TWELVELABS_API_KEY";

/// Environment variable holding the Kindo API key.
pub const KINDO_API_KEY_ENV: &str = "KINDO_API_KEY";

/// API keys for the two vendors. Never written to the config file.
#[derive(Clone, Default)]
pub struct ApiKeys {
    pub twelvelabs: Option<String>,
    pub kindo: Option<String>,
}

impl ApiKeys {
    /// Read both keys from the environment, ignoring empty values.
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|k| !k.is_empty());
        Self {
            twelvelabs: read(TWELVELABS_API_KEY_ENV),
            kindo: read(KINDO_API_KEY_ENV),
        }
    }

    /// The Twelve Labs key, or a configuration error naming the variable.
    pub fn require_twelvelabs(&self) -> Result<&str> {
        Self::require(self.twelvelabs.as_deref(), TWELVELABS_API_KEY_ENV)
    }

    /// The Kindo key, or a configuration error naming the variable.
    pub fn require_kindo(&self) -> Result<&str> {
        Self::require(self.kindo.as_deref(), KINDO_API_KEY_ENV)
    }

    fn require<'a>(key: Option<&'a str>, name: &str) -> Result<&'a str> {
        key.filter(|k| !k.trim().is_empty())
            .ok_or_else(|| VidbriefError::Config(format!("{} not set", name)))
    }
}

impl std::fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mask = |k: &Option<String>| if k.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("ApiKeys")
            .field("twelvelabs", &mask(&self.twelvelabs))
            .field("kindo", &mask(&self.kindo))
            .finish()
    }
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub twelvelabs: TwelveLabsSettings,
    pub kindo: KindoSettings,
    pub prompts: Prompts,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory where report files are written.
    pub output_dir: String,
    /// Directory holding one sub-directory of videos per index.
    pub videos_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            output_dir: "./twelve_output".to_string(),
            videos_dir: "./videos".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Twelve Labs API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TwelveLabsSettings {
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,
    /// Engine used when creating an index.
    pub engine: String,
    /// Engine options (visual, conversation, text_in_video, logo).
    pub engine_options: Vec<String>,
    /// Spoken language passed along with each upload.
    pub language: String,
    /// Seconds between task status polls while a video is indexing.
    pub poll_interval_seconds: u64,
    /// Extension of the video files picked up for upload.
    pub video_extension: String,
}

impl Default for TwelveLabsSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.twelvelabs.io/v1.2".to_string(),
            engine: "pegasus1.1".to_string(),
            engine_options: vec!["visual".to_string(), "conversation".to_string()],
            language: "en".to_string(),
            poll_interval_seconds: 50,
            video_extension: "mp4".to_string(),
        }
    }
}

/// Kindo chat-completion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KindoSettings {
    /// Full URL of the chat-completion endpoint.
    pub api_url: String,
    /// Model name sent with every request.
    pub model: String,
}

impl Default for KindoSettings {
    fn default() -> Self {
        Self {
            api_url: "https://llm.kindo.ai/v1/chat/completions".to_string(),
            model: "azure/gpt-4o".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            settings.validate()?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| VidbriefError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings that would only fail later, mid-request.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.twelvelabs.api_url).map_err(|e| {
            VidbriefError::Config(format!("twelvelabs.api_url is not a valid URL: {}", e))
        })?;
        url::Url::parse(&self.kindo.api_url).map_err(|e| {
            VidbriefError::Config(format!("kindo.api_url is not a valid URL: {}", e))
        })?;
        if self.twelvelabs.poll_interval_seconds == 0 {
            return Err(VidbriefError::Config(
                "twelvelabs.poll_interval_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vidbrief")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded output directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.output_dir)
    }

    /// Get the expanded videos directory path.
    pub fn videos_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.videos_dir)
    }
}
