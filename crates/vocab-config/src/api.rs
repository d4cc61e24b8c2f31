use std::env;

use serde::{Deserialize, Serialize};

use crate::env_parse;

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    /// REST backend serving `/users`, `/categories` and `/vocab`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout; `None` keeps the transport default
    pub request_timeout_ms: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: None,
        }
    }
}

impl ApiConfig {
    pub fn new() -> Self {
        let base_url = env::var("VOCAB_API_URL").unwrap_or_else(|_| default_base_url());
        let request_timeout_ms = env_parse("VOCAB_REQUEST_TIMEOUT_MS");

        Self {
            base_url,
            request_timeout_ms,
        }
    }
}
