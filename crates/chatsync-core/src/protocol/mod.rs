//! Wire protocol: envelope model, JSON shapes, and the decode-once codec.
//!
//! One UTF-8 JSON envelope per text frame, tagged by `type` (the channel).
//! Decoding never panics: malformed input surfaces as `ChatSyncError` and the
//! caller drops the frame without touching client state.

pub mod codec;
pub mod draw;
pub mod envelope;
pub mod wire;

pub use codec::{decode_frame, encode_intent};
pub use draw::{DrawEvent, Point};
pub use envelope::{Channel, ChatPayload, Content, Envelope, Intent, PayloadKind};
