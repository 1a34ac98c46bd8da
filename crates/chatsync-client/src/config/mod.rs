//! Client config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use chatsync_core::error::{ChatSyncError, Result};

pub use schema::{CanvasSection, ClientConfig, ServerSection};

/// Overrides `server.base_url` when set.
pub const ENV_WS_URL: &str = "CHATSYNC_WS_URL";

pub fn load_from_file(path: &str) -> Result<ClientConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ChatSyncError::BadConfig(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<ClientConfig> {
    let cfg: ClientConfig = serde_yaml::from_str(s)
        .map_err(|e| ChatSyncError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Like `load_from_file`, but a missing file yields the defaults.
pub fn load_or_default(path: &str) -> Result<ClientConfig> {
    match fs::read_to_string(path) {
        Ok(s) => load_from_str(&s),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path, "no config file, using defaults");
            Ok(ClientConfig::default())
        }
        Err(e) => Err(ChatSyncError::BadConfig(format!("read config failed: {e}"))),
    }
}

/// Apply environment overrides, then re-validate.
pub fn apply_env_overrides<F>(cfg: &mut ClientConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_WS_URL).filter(|u| !u.trim().is_empty()) {
        cfg.server.base_url = url.trim().to_string();
    }
    cfg.validate()
}
