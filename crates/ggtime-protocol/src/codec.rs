//! Codec trait and implementations for serializing/deserializing the
//! session record.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The payload layer doesn't care HOW the record is serialized; it just
//! needs something that implements the [`Codec`] trait, then wraps the
//! bytes in base64 and a `ggtime://` URI.
//!
//! Currently we provide [`JsonCodec`], which is what every GG Time client
//! reads today.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// ## Trait bounds explained
///
/// - `Send + Sync` → a [`SessionCodec`](crate::SessionCodec) holding it can
///   be shared between threads.
/// - `'static` → the codec doesn't borrow temporary data.
///
/// `DeserializeOwned` (vs plain `Deserialize`) means the result doesn't
/// borrow from the input bytes, which matters here because the bytes are a
/// temporary buffer produced by base64 decoding.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Field names follow the record's serde attributes (`gameName`,
/// `startTime`, ...), and chrono writes timestamps as RFC 3339 strings.
///
/// ## Example
///
/// ```rust
/// use chrono::Utc;
/// use ggtime_protocol::{Codec, JsonCodec};
/// use ggtime_session::Session;
///
/// let codec = JsonCodec;
/// let session = Session::new("Valorant", Utc::now(), "Alex");
///
/// let bytes = codec.encode(&session).unwrap();
/// let decoded: Session = codec.decode(&bytes).unwrap();
/// assert_eq!(session, decoded);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
