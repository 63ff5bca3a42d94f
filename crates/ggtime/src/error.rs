//! Unified error type for GG Time.

use ggtime_protocol::ProtocolError;

/// Top-level error for the `ggtime` crate.
///
/// Payload errors from `ggtime-protocol` convert automatically through
/// `#[from]`, so `?` works on any `try_*` codec call. The other variants
/// are host events the [`Conversation`](crate::Conversation) can't act on.
#[derive(Debug, thiserror::Error)]
pub enum GgTimeError {
    /// A payload couldn't be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A response arrived while no session was open.
    #[error("no session is open to respond to")]
    NoActiveSession,

    /// The create form was submitted with an empty game name.
    #[error("game name must not be blank")]
    BlankGameName,
}
