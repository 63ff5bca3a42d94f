//! Error types for the protocol layer.
//!
//! Every way a payload can be rejected has its own variant, so the
//! diagnostic `try_*` API can say exactly why. The plain `decode` API
//! collapses all of them to `None`.

/// Errors that can occur while encoding or decoding a session payload.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a session into bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// The blob decoded to bytes that aren't a valid session.
    ///
    /// Common causes: malformed JSON, missing required fields, wrong data
    /// types, an unknown status token, or an unparseable timestamp.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// No payload was attached to the message at all.
    #[error("no payload to decode")]
    MissingPayload,

    /// The payload isn't shaped like `scheme://authority?query`, or holds a
    /// broken percent escape.
    #[error("malformed payload uri: {0}")]
    MalformedUri(String),

    /// The payload belongs to some other scheme.
    #[error("unexpected scheme {found:?}, expected {expected:?}")]
    SchemeMismatch { expected: String, found: String },

    /// The payload has the right scheme but the wrong authority.
    #[error("unexpected authority {found:?}, expected {expected:?}")]
    AuthorityMismatch { expected: String, found: String },

    /// The query string doesn't carry the session parameter.
    #[error("query parameter {0:?} is missing")]
    MissingParameter(String),

    /// The parameter value isn't base64 in either alphabet.
    #[error("invalid session blob: {0}")]
    InvalidBlob(#[source] base64::DecodeError),

    /// The payload was written by a newer format than this build reads.
    #[error("unsupported payload format version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}
