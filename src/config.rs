//! Runtime configuration for the Scoutbase server.

use once_cell::sync::Lazy;
use std::env;

#[derive(Debug)]
pub struct Settings {
    /// Bearer-token lifetime (seconds).
    pub token_ttl_secs: u64,
    /// Base URL of the football-data.org API.
    pub football_api_base: String,
    /// Directory article photo uploads are written to.
    pub uploads_dir: String,
}

impl Settings {
    fn from_env() -> Self {
        let token_ttl_secs = env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(3600); // 1 h

        let football_api_base = env::var("FOOTBALL_API_BASE")
            .unwrap_or_else(|_| "https://api.football-data.org/v4".into());

        let uploads_dir = env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".into());

        Settings {
            token_ttl_secs,
            football_api_base,
            uploads_dir,
        }
    }
}

static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

pub fn settings() -> &'static Settings {
    &SETTINGS
}
