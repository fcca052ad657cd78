use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{defaults, endpoints, models, paths, persona};
use crate::context::{Persona, ResetMode, ResetWindow};
use crate::error::{Result, StarError};
use crate::gateway::CompletionGateway;
use crate::llm::OpenAIClient;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub chat: ChatSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub api_key_env: String,
    pub base_url: String,
    pub use_alternate_model: bool,
    /// Explicit model id; wins over `use_alternate_model` when set.
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    pub persona_name: String,
    pub system_prompt: String,
    pub temperature: f32,
    pub minimum_request_interval_ms: i64,
    pub reset_window_ms: i64,
    pub reset_mode: ResetMode,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key_env: endpoints::DEFAULT_API_KEY_ENV.to_string(),
            base_url: endpoints::OPENAI_BASE_URL.to_string(),
            use_alternate_model: false,
            model: None,
        }
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            persona_name: persona::NAME.to_string(),
            system_prompt: persona::SYSTEM_PROMPT.to_string(),
            temperature: defaults::TEMPERATURE,
            minimum_request_interval_ms: defaults::MINIMUM_REQUEST_INTERVAL_MS,
            reset_window_ms: defaults::RESET_WINDOW_MS,
            reset_mode: ResetMode::AsWritten,
        }
    }
}

impl ChatSettings {
    pub fn persona(&self) -> Persona {
        Persona::new(&self.persona_name, &self.system_prompt)
    }

    pub fn reset_window(&self) -> ResetWindow {
        ResetWindow::new(self.reset_window_ms, self.reset_mode)
    }
}

impl ProviderSettings {
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| model_for_tier(self.use_alternate_model))
    }
}

/// Model id for the default or the alternate tier.
pub fn model_for_tier(use_alternate_model: bool) -> &'static str {
    if use_alternate_model {
        models::ALTERNATE_MODEL
    } else {
        models::DEFAULT_MODEL
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(paths::CONFIG_DIR)
            .join(paths::CONFIG_FILE)
    }

    /// Load from the default config path, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load_from(&config_path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring config at {}: {}", config_path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| StarError::Config(e.to_string()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| StarError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the API key from the environment variable specified in settings.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.provider.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Build an OpenAI-backed gateway from these settings.
    pub fn build_gateway(&self) -> Result<CompletionGateway> {
        let api_key = self.api_key().ok_or_else(|| {
            StarError::Config(format!(
                "API key not found, set the {} environment variable",
                self.provider.api_key_env
            ))
        })?;
        let client = OpenAIClient::new(api_key).with_base_url(&self.provider.base_url);
        Ok(CompletionGateway::new(
            Box::new(client),
            self.model(),
            &self.chat,
        ))
    }
}
