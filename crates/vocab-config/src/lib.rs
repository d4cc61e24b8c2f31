use serde::{Deserialize, Serialize};

use self::api::ApiConfig;
use self::session::SessionConfig;
use self::ui::UiConfig;

pub mod api;
pub mod session;
pub mod ui;

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Defaults overridden by `VOCAB_*` environment variables
    pub fn new() -> Self {
        Config {
            api: ApiConfig::new(),
            session: SessionConfig::new(),
            ui: UiConfig::new(),
        }
    }
}

pub(crate) fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}
