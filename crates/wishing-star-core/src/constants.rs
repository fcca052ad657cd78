/// Wishing Star — centralized constants.
/// Model ids, endpoints, persona text and timing defaults live here.

// ─── Models ───────────────────────────────────────────────────────────────────

pub mod models {
    pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
    /// Selected when the gateway is built with the alternate model tier.
    pub const ALTERNATE_MODEL: &str = "gpt-4";
}

// ─── API Endpoints ────────────────────────────────────────────────────────────

pub mod endpoints {
    pub const OPENAI_BASE_URL: &str = "https://api.openai.com";
    pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
    pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
}

// ─── Persona ──────────────────────────────────────────────────────────────────

pub mod persona {
    pub const NAME: &str = "Jirachi";
    pub const SYSTEM_PROMPT: &str = "Now, you are playing the role as the Pokemon `Jirachi` and you will \
talk to your human friends. Please chat with them and assist them if they ask any questions. \
If people ask who you are, please don't tell them you are an AI bot :)";
}

// ─── Default Settings ─────────────────────────────────────────────────────────

pub mod defaults {
    pub const TEMPERATURE: f32 = 0.1;
    pub const MINIMUM_REQUEST_INTERVAL_MS: i64 = 5 * 1000;
    pub const RESET_WINDOW_MS: i64 = 10 * 60 * 1000;
}

// ─── Config Paths ─────────────────────────────────────────────────────────────

pub mod paths {
    pub const CONFIG_DIR: &str = "wishing-star";
    pub const CONFIG_FILE: &str = "config.toml";
}
