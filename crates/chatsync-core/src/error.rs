//! Shared error type across chatsync crates.

use thiserror::Error;

/// Stable error codes (used in logs and by presentation layers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Frame was not valid JSON or did not match the envelope shape.
    MalformedFrame,
    /// Envelope `type` is not one of the known channels.
    UnknownChannel,
    /// Join identity empty or out of bounds.
    InvalidIdentity,
    /// Session is not open.
    NotOpen,
    /// A session is already connecting or open.
    AlreadyActive,
    /// Transport could not be started or written to.
    Transport,
    /// Config file could not be read or is invalid.
    BadConfig,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MalformedFrame => "MALFORMED_FRAME",
            ErrorCode::UnknownChannel => "UNKNOWN_CHANNEL",
            ErrorCode::InvalidIdentity => "INVALID_IDENTITY",
            ErrorCode::NotOpen => "NOT_OPEN",
            ErrorCode::AlreadyActive => "ALREADY_ACTIVE",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ChatSyncError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum ChatSyncError {
    #[error("malformed frame: {0}")]
    MalformedFrame(String),
    #[error("unknown channel: {0}")]
    UnknownChannel(String),
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),
    #[error("session not open")]
    NotOpen,
    #[error("session already connecting or open")]
    AlreadyActive,
    #[error("transport: {0}")]
    Transport(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl ChatSyncError {
    /// Map to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            ChatSyncError::MalformedFrame(_) => ErrorCode::MalformedFrame,
            ChatSyncError::UnknownChannel(_) => ErrorCode::UnknownChannel,
            ChatSyncError::InvalidIdentity(_) => ErrorCode::InvalidIdentity,
            ChatSyncError::NotOpen => ErrorCode::NotOpen,
            ChatSyncError::AlreadyActive => ErrorCode::AlreadyActive,
            ChatSyncError::Transport(_) => ErrorCode::Transport,
            ChatSyncError::BadConfig(_) => ErrorCode::BadConfig,
            ChatSyncError::Internal(_) => ErrorCode::Internal,
        }
    }
}
