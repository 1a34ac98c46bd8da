use serde::Deserialize;
use url::Url;

use chatsync_core::canvas::Rgba;
use chatsync_core::error::{ChatSyncError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub canvas: CanvasSection,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            canvas: CanvasSection::default(),
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ChatSyncError::BadConfig(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.canvas.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// Endpoint prefix; the url-encoded identity is appended as a path segment.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.parsed_base_url().map(|_| ())
    }

    pub fn parsed_base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ChatSyncError::BadConfig(format!("server.base_url invalid: {e}")))?;
        // TLS is not compiled into the transport.
        if url.scheme() != "ws" {
            return Err(ChatSyncError::BadConfig(format!(
                "server.base_url scheme must be ws, got {}",
                url.scheme()
            )));
        }
        if url.cannot_be_a_base() {
            return Err(ChatSyncError::BadConfig(
                "server.base_url cannot take a path".into(),
            ));
        }
        Ok(url)
    }
}

fn default_base_url() -> String {
    "ws://localhost:8000/ws".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanvasSection {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_line_width")]
    pub line_width: f64,

    #[serde(default = "default_color")]
    pub default_color: String,
}

impl Default for CanvasSection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            line_width: default_line_width(),
            default_color: default_color(),
        }
    }
}

impl CanvasSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=8192).contains(&self.width) || !(1..=8192).contains(&self.height) {
            return Err(ChatSyncError::BadConfig(
                "canvas.width and canvas.height must be between 1 and 8192".into(),
            ));
        }
        if !(self.line_width > 0.0 && self.line_width <= 64.0) {
            return Err(ChatSyncError::BadConfig(
                "canvas.line_width must be in (0, 64]".into(),
            ));
        }
        if Rgba::parse_hex(&self.default_color).is_none() {
            return Err(ChatSyncError::BadConfig(format!(
                "canvas.default_color must be #rgb or #rrggbb, got {}",
                self.default_color
            )));
        }
        Ok(())
    }
}

fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    500
}
fn default_line_width() -> f64 {
    2.0
}
fn default_color() -> String {
    "#000000".into()
}
