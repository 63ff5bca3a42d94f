//! Identity and status types shared by sessions and participants.
//!
//! These are the small, `Copy`-able values that travel inside every
//! payload: the two id newtypes and the participation status token.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Generates a random (version 4) UUID from 16 bytes of `rand` output.
///
/// `uuid::Builder::from_random_bytes` sets the version and variant bits for
/// us, so the result is indistinguishable from `Uuid::new_v4()`.
fn random_uuid() -> Uuid {
    let bytes: [u8; 16] = rand::rng().random();
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

/// The unique identifier of a gaming session.
///
/// A newtype over [`Uuid`], so a `SessionId` can never be passed where a
/// [`ParticipantId`] is expected. `#[serde(transparent)]` keeps the wire
/// form a plain UUID string rather than `{ "0": "..." }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generates a fresh random session id.
    pub fn random() -> Self {
        Self(random_uuid())
    }
}

/// Prints the hyphenated UUID, e.g. `"67e55044-10b1-426f-9247-bb680e5fe0c8"`.
impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The unique identifier of one participant record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub Uuid);

impl ParticipantId {
    /// Generates a fresh random participant id.
    pub fn random() -> Self {
        Self(random_uuid())
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ParticipantStatus
// ---------------------------------------------------------------------------

/// How a participant answered the session invite.
///
/// `#[serde(rename_all = "camelCase")]` produces the wire tokens
/// `"confirmed"`, `"maybe"`, `"differentTime"` and `"cantJoin"`. Any other
/// token fails deserialization, which makes the whole payload invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParticipantStatus {
    /// Definitely joining at the planned start time.
    Confirmed,

    /// Might join.
    Maybe,

    /// Joining, but at a different time (carried in `joinTime`).
    DifferentTime,

    /// Not joining.
    CantJoin,
}

impl ParticipantStatus {
    /// Every status, in the order the bubble lists them.
    pub const ALL: [Self; 4] = [
        Self::Confirmed,
        Self::Maybe,
        Self::DifferentTime,
        Self::CantJoin,
    ];

    /// The wire token for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Maybe => "maybe",
            Self::DifferentTime => "differentTime",
            Self::CantJoin => "cantJoin",
        }
    }
}

impl fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
