//! Message payload format for GG Time.
//!
//! A session travels between devices as the URL of a message bubble. This
//! crate turns a [`Session`] into that URL and back:
//!
//! - **Payload** ([`SessionCodec`], [`PayloadConfig`]): the
//!   `ggtime://session?data=<blob>` envelope and its validation.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how the session record
//!   becomes bytes before base64 wraps them.
//! - **Errors** ([`ProtocolError`]): every reason a payload can be rejected.
//!
//! # Architecture
//!
//! ```text
//! Session → Codec (JSON bytes) → base64url → ggtime://session?data=…
//! ```
//!
//! The free functions below use the default codec and are what most callers
//! need.

mod codec;
mod error;
mod payload;
mod uri;
mod wire;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use payload::{AUTHORITY, DATA_PARAM, PayloadConfig, QuickInfo, SCHEME, SessionCodec};
pub use wire::FORMAT_VERSION;

use ggtime_session::Session;

/// Encodes `session` with the default [`SessionCodec`].
pub fn encode(session: &Session) -> Option<String> {
    SessionCodec::default().encode(session)
}

/// Decodes `payload` with the default [`SessionCodec`].
pub fn decode<'a>(payload: impl Into<Option<&'a str>>) -> Option<Session> {
    SessionCodec::default().decode(payload)
}

/// `true` when `payload` decodes to a session.
pub fn is_valid_payload<'a>(payload: impl Into<Option<&'a str>>) -> bool {
    SessionCodec::default().is_valid_payload(payload)
}

/// Game name and start time of `payload`, if it decodes.
pub fn extract_quick_info<'a>(payload: impl Into<Option<&'a str>>) -> Option<QuickInfo> {
    SessionCodec::default().extract_quick_info(payload)
}
