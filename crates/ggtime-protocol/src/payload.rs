//! Session ⇄ payload conversion.
//!
//! A payload is the URL attached to a message:
//!
//! ```text
//! ggtime://session?data=<base64url(JSON session)>
//! ```
//!
//! Encoding goes session → [`Codec`] bytes → base64 → URI. Decoding walks
//! the same steps backwards and rejects the payload at the first step that
//! doesn't check out. Every step is a pure function of its input, so a
//! [`SessionCodec`] can be shared freely and called from anywhere.

use base64::Engine;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, URL_SAFE_NO_PAD};
use base64::engine::DecodePaddingMode;
use chrono::{DateTime, Utc};
use ggtime_session::Session;
use serde::{Deserialize, Serialize};

use crate::uri::{self, PayloadUri};
use crate::wire::{FORMAT_VERSION, WireSession, WireSessionRef};
use crate::{Codec, JsonCodec, ProtocolError};

/// Scheme of every GG Time payload.
pub const SCHEME: &str = "ggtime";

/// Authority of every GG Time payload.
pub const AUTHORITY: &str = "session";

/// Query parameter that carries the session blob.
pub const DATA_PARAM: &str = "data";

/// Accepts padded and unpadded input.
const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// What we write: `-` and `_`, no padding.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// What the first GG Time clients wrote: `+` and `/`, padded.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

// ---------------------------------------------------------------------------
// PayloadConfig
// ---------------------------------------------------------------------------

/// The fixed tokens of the payload URI, plus the version tag switch.
///
/// The defaults are the values every GG Time client uses; change them only
/// to run a separate, non-interoperating deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadConfig {
    /// URI scheme. Default: `ggtime`.
    pub scheme: String,

    /// URI authority. Default: `session`.
    pub authority: String,

    /// Query parameter holding the blob. Default: `data`.
    pub param: String,

    /// Whether encoded sessions carry `formatVersion`. Default: `true`.
    ///
    /// `false` leaves the key out of the JSON, nothing more. The blob is
    /// still unpadded URL-safe base64 and timestamps still carry sub-second
    /// digits, so the earliest clients (standard base64, whole-second
    /// timestamps) can't read it either way. Compatibility with them only
    /// goes one direction: their payloads decode here.
    pub emit_version: bool,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            scheme: SCHEME.to_owned(),
            authority: AUTHORITY.to_owned(),
            param: DATA_PARAM.to_owned(),
            emit_version: true,
        }
    }
}

// ---------------------------------------------------------------------------
// QuickInfo
// ---------------------------------------------------------------------------

/// The two fields a compact message preview needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickInfo {
    pub game_name: String,
    pub start_time: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// SessionCodec
// ---------------------------------------------------------------------------

/// Encodes sessions into payloads and decodes them back.
///
/// There are two flavors of each operation:
/// - `try_encode` / `try_decode` return a [`ProtocolError`] naming the
///   reason for a failure;
/// - `encode` / `decode` return `None` instead, logging the reason at
///   `debug` level. This is what message handling code normally wants:
///   an unreadable payload is just "no session".
///
/// ```rust
/// use chrono::Utc;
/// use ggtime_protocol::SessionCodec;
/// use ggtime_session::Session;
///
/// let codec = SessionCodec::default();
/// let session = Session::new("Valorant", Utc::now(), "Alex");
///
/// let payload = codec.encode(&session).unwrap();
/// assert!(payload.starts_with("ggtime://session?data="));
/// assert_eq!(codec.decode(payload.as_str()), Some(session));
/// assert_eq!(codec.decode(None), None);
/// ```
#[derive(Debug, Clone)]
pub struct SessionCodec<C: Codec = JsonCodec> {
    config: PayloadConfig,
    codec: C,
}

impl SessionCodec<JsonCodec> {
    /// A JSON codec with the given URI tokens.
    pub fn new(config: PayloadConfig) -> Self {
        Self::with_codec(config, JsonCodec)
    }
}

impl Default for SessionCodec<JsonCodec> {
    fn default() -> Self {
        Self::new(PayloadConfig::default())
    }
}

impl<C: Codec> SessionCodec<C> {
    /// A codec that serializes the record with `codec`.
    pub fn with_codec(config: PayloadConfig, codec: C) -> Self {
        Self { config, codec }
    }

    pub fn config(&self) -> &PayloadConfig {
        &self.config
    }

    // -- Encoding -----------------------------------------------------------

    /// Encodes `session` into a payload URI.
    ///
    /// # Errors
    /// [`ProtocolError::Encode`] if the record can't be serialized.
    pub fn try_encode(&self, session: &Session) -> Result<String, ProtocolError> {
        let wire = WireSessionRef {
            format_version: self.config.emit_version.then_some(FORMAT_VERSION),
            session,
        };
        let bytes = self.codec.encode(&wire)?;
        let blob = URL_SAFE_NO_PAD.encode(bytes);

        tracing::debug!(
            session_id = %session.id(),
            participants = session.participants().len(),
            blob_len = blob.len(),
            "session encoded"
        );

        Ok(uri::build(
            &self.config.scheme,
            &self.config.authority,
            &self.config.param,
            &blob,
        ))
    }

    /// Encodes `session`, or returns `None` if that fails.
    pub fn encode(&self, session: &Session) -> Option<String> {
        self.try_encode(session)
            .inspect_err(|e| tracing::warn!(error = %e, "failed to encode session"))
            .ok()
    }

    // -- Decoding -----------------------------------------------------------

    /// Decodes a payload, explaining any rejection.
    ///
    /// Steps, in order: payload present → URI shape → scheme → authority →
    /// query parameter → base64 → record → format version.
    ///
    /// # Errors
    /// One [`ProtocolError`] variant per step above.
    pub fn try_decode(&self, payload: Option<&str>) -> Result<Session, ProtocolError> {
        let payload = payload.ok_or(ProtocolError::MissingPayload)?;
        let uri = PayloadUri::parse(payload)?;

        if uri.scheme() != self.config.scheme {
            return Err(ProtocolError::SchemeMismatch {
                expected: self.config.scheme.clone(),
                found: uri.scheme().to_owned(),
            });
        }
        if uri.authority() != self.config.authority {
            return Err(ProtocolError::AuthorityMismatch {
                expected: self.config.authority.clone(),
                found: uri.authority().to_owned(),
            });
        }

        let blob = uri
            .query_param(&self.config.param)?
            .ok_or_else(|| ProtocolError::MissingParameter(self.config.param.clone()))?;
        let bytes = decode_blob(&blob)?;

        let wire: WireSession = self.codec.decode(&bytes)?;
        wire.into_session()
    }

    /// Decodes a payload, or returns `None` if it isn't a valid session.
    ///
    /// Accepts `&str`, `Option<&str>`, or `None`, so a message without a URL
    /// can be passed straight through.
    pub fn decode<'a>(&self, payload: impl Into<Option<&'a str>>) -> Option<Session> {
        match self.try_decode(payload.into()) {
            Ok(session) => {
                tracing::debug!(session_id = %session.id(), "session decoded");
                Some(session)
            }
            Err(e) => {
                tracing::debug!(error = %e, "rejected session payload");
                None
            }
        }
    }

    /// `true` exactly when [`decode`](Self::decode) would return a session.
    pub fn is_valid_payload<'a>(&self, payload: impl Into<Option<&'a str>>) -> bool {
        self.decode(payload).is_some()
    }

    /// Game name and start time of a payload, for compact previews.
    ///
    /// Runs a full [`decode`](Self::decode), so it accepts and rejects
    /// exactly the same payloads.
    pub fn extract_quick_info<'a>(
        &self,
        payload: impl Into<Option<&'a str>>,
    ) -> Option<QuickInfo> {
        self.decode(payload).map(|session| QuickInfo {
            game_name: session.game_name().to_owned(),
            start_time: session.start_time(),
        })
    }
}

/// Tries the URL-safe alphabet first, then the standard one.
fn decode_blob(blob: &str) -> Result<Vec<u8>, ProtocolError> {
    URL_SAFE_LENIENT
        .decode(blob)
        .or_else(|_| STANDARD_LENIENT.decode(blob))
        .map_err(ProtocolError::InvalidBlob)
}
