//! The JSON object that actually travels inside the payload blob.
//!
//! It is the [`Session`] itself with one optional extra key,
//! `formatVersion`. `#[serde(flatten)]` inlines the session's fields next to
//! it, so a tagged payload is still readable by clients that only know the
//! session fields (unknown keys are ignored), and an untagged payload from
//! before the tag existed is still readable by us.
//!
//! ```text
//! { "formatVersion": 1, "id": "...", "gameName": "Valorant", ... }
//! ```

use ggtime_session::Session;
use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// The newest payload format this build writes and reads.
pub const FORMAT_VERSION: u32 = 1;

/// Borrowed form used for encoding, so encoding never clones the session.
#[derive(Debug, Serialize)]
pub(crate) struct WireSessionRef<'a> {
    #[serde(rename = "formatVersion", skip_serializing_if = "Option::is_none")]
    pub(crate) format_version: Option<u32>,

    #[serde(flatten)]
    pub(crate) session: &'a Session,
}

/// Owned form used for decoding.
#[derive(Debug, Deserialize)]
pub(crate) struct WireSession {
    /// Missing in version-less payloads; `default` turns that into `None`.
    #[serde(rename = "formatVersion", default)]
    pub(crate) format_version: Option<u32>,

    #[serde(flatten)]
    pub(crate) session: Session,
}

impl WireSession {
    /// Unwraps the session, refusing formats newer than [`FORMAT_VERSION`].
    pub(crate) fn into_session(self) -> Result<Session, ProtocolError> {
        match self.format_version {
            Some(found) if found > FORMAT_VERSION => Err(ProtocolError::UnsupportedVersion {
                found,
                supported: FORMAT_VERSION,
            }),
            _ => Ok(self.session),
        }
    }
}
