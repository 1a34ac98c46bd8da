//! Join identity and endpoint construction.

use std::fmt;

use url::Url;

use crate::error::{ChatSyncError, Result};

pub const MIN_IDENTITY_CHARS: usize = 2;
pub const MAX_IDENTITY_CHARS: usize = 20;

/// A validated, trimmed username.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Trim and validate a user-supplied name.
    pub fn parse(raw: &str) -> Result<Self> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(ChatSyncError::InvalidIdentity("identity is empty".into()));
        }
        let len = name.chars().count();
        if !(MIN_IDENTITY_CHARS..=MAX_IDENTITY_CHARS).contains(&len) {
            return Err(ChatSyncError::InvalidIdentity(format!(
                "identity must be {MIN_IDENTITY_CHARS}..={MAX_IDENTITY_CHARS} chars, got {len}"
            )));
        }
        // "." and ".." would be resolved away as path segments.
        if name.chars().all(|c| c == '.') {
            return Err(ChatSyncError::InvalidIdentity(format!(
                "identity {name:?} is not a usable path segment"
            )));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<base>/<percent-encoded identity>`.
    pub fn endpoint(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| ChatSyncError::Transport(format!("base url cannot take a path: {base}")))?
            .pop_if_empty()
            .push(&self.0);
        Ok(url)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
