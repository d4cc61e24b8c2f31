use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_key() -> String {
    "currentUser".to_string()
}

fn default_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vocab")
        .join("session.json")
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    /// Key the session record is stored under
    #[serde(default = "default_key")]
    pub key: String,
    /// Backing file for durable storage
    #[serde(default = "default_file")]
    pub file: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            key: default_key(),
            file: default_file(),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        let key = env::var("VOCAB_SESSION_KEY").unwrap_or_else(|_| default_key());
        let file = env::var("VOCAB_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_file());

        Self { key, file }
    }
}
