use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::env_parse;

fn default_error_dismiss_ms() -> u64 {
    5000
}

fn default_page_size() -> usize {
    5
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// How long an error banner stays up
    #[serde(default = "default_error_dismiss_ms")]
    pub error_dismiss_ms: u64,
    /// Rows per page on the categories screen
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            error_dismiss_ms: default_error_dismiss_ms(),
            page_size: default_page_size(),
        }
    }
}

impl UiConfig {
    pub fn new() -> Self {
        Self {
            error_dismiss_ms: env_parse("VOCAB_ERROR_DISMISS_MS")
                .unwrap_or_else(default_error_dismiss_ms),
            page_size: env_parse("VOCAB_PAGE_SIZE")
                .filter(|size: &usize| *size > 0)
                .unwrap_or_else(default_page_size),
        }
    }

    pub fn error_dismiss(&self) -> Duration {
        Duration::from_millis(self.error_dismiss_ms)
    }
}
