//! Socket message classification.
//!
//! - Text frames (and UTF-8 binary frames) => `Inbound::Text`
//! - Close => `Inbound::Close` with the peer's reason, if any
//! - Ping/Pong/raw frames are handled by tungstenite itself

use tokio_tungstenite::tungstenite::Message;

use chatsync_core::error::{ChatSyncError, Result};

#[derive(Debug)]
pub enum Inbound {
    Text(String),
    Close(Option<String>),
    Control,
}

pub fn decode(msg: Message) -> Result<Inbound> {
    match msg {
        Message::Text(s) => Ok(Inbound::Text(s.as_str().to_owned())),
        Message::Binary(b) => std::str::from_utf8(&b)
            .map(|s| Inbound::Text(s.to_owned()))
            .map_err(|e| ChatSyncError::MalformedFrame(format!("binary frame is not utf-8: {e}"))),
        Message::Close(frame) => Ok(Inbound::Close(
            frame
                .map(|f| f.reason.as_str().to_owned())
                .filter(|r| !r.is_empty()),
        )),
        Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => Ok(Inbound::Control),
    }
}
