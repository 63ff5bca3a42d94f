//! Session types: the record that describes one proposed gaming session.
//!
//! A [`Session`] tracks:
//! - WHAT is being played (`game_name`) and WHEN (`start_time`)
//! - WHO proposed it (`host_name`)
//! - WHO answered, and how (`participants`)
//!
//! Sessions are values. Every "mutation" (`add_or_update_participant`,
//! `remove_participant`, ...) borrows the current session and returns a
//! brand-new one, leaving the original untouched. Callers keep whichever
//! value is the latest; there is no shared reference to update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::roster::Lookup;
use crate::{ParticipantId, ParticipantStatus, SessionId};

// ---------------------------------------------------------------------------
// Participant
// ---------------------------------------------------------------------------

/// One respondent on a session's roster.
///
/// The display `name` is the lookup key for every roster operation. The
/// `id` is assigned once and survives any number of status changes.
///
/// Fields are private so the id and `joined_at` can't be rewritten after
/// construction; use the accessors to read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    id: ParticipantId,
    name: String,
    status: ParticipantStatus,

    /// When the participant first reacted to the session.
    joined_at: DateTime<Utc>,

    /// The alternate start time proposed with `DifferentTime`.
    ///
    /// `skip_serializing_if` leaves the key out entirely for every other
    /// status, and `default` lets payloads without the key decode as `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    join_time: Option<DateTime<Utc>>,

    /// Caller-assigned stable identity, only consulted with
    /// [`RosterKey::Identity`](crate::RosterKey::Identity).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identity: Option<String>,
}

impl Participant {
    /// Creates a participant with a fresh id, reacting right now.
    pub fn new(name: impl Into<String>, status: ParticipantStatus) -> Self {
        Self::with_id(ParticipantId::random(), name, status, Utc::now())
    }

    /// Creates a participant with a known id and join timestamp.
    ///
    /// Used when restoring a roster whose ids were assigned elsewhere.
    pub fn with_id(
        id: ParticipantId,
        name: impl Into<String>,
        status: ParticipantStatus,
        joined_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            status,
            joined_at,
            join_time: None,
            identity: None,
        }
    }

    /// Attaches the proposed alternate start time.
    pub fn with_join_time(mut self, join_time: DateTime<Utc>) -> Self {
        self.join_time = Some(join_time);
        self
    }

    /// Attaches a caller-assigned identity.
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> ParticipantStatus {
        self.status
    }

    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    /// The alternate start time exactly as stored, if any.
    pub fn join_time(&self) -> Option<DateTime<Utc>> {
        self.join_time
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// The time this participant plans to show up.
    ///
    /// Older payloads stored the alternate time in `joinedAt`, so a
    /// `DifferentTime` participant without `joinTime` falls back to it.
    pub fn proposed_time(&self) -> DateTime<Utc> {
        self.join_time.unwrap_or(self.joined_at)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A proposed gaming session and everyone who answered it.
///
/// `#[serde(rename_all = "camelCase")]` gives the wire field names
/// `id`, `gameName`, `startTime`, `hostName`, `participants` and
/// `createdAt`. chrono serializes every timestamp as RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    id: SessionId,
    game_name: String,
    start_time: DateTime<Utc>,
    host_name: String,
    participants: Vec<Participant>,
    created_at: DateTime<Utc>,
}

impl Session {
    /// Creates a new session with an empty roster, created right now.
    pub fn new(
        game_name: impl Into<String>,
        start_time: DateTime<Utc>,
        host_name: impl Into<String>,
    ) -> Self {
        Self::builder(game_name, start_time, host_name).build()
    }

    /// Starts a [`SessionBuilder`] for sessions with a known id, creation
    /// time or roster.
    pub fn builder(
        game_name: impl Into<String>,
        start_time: DateTime<Utc>,
        host_name: impl Into<String>,
    ) -> SessionBuilder {
        SessionBuilder {
            id: None,
            game_name: game_name.into(),
            start_time,
            host_name: host_name.into(),
            participants: Vec::new(),
            created_at: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn game_name(&self) -> &str {
        &self.game_name
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The roster, in the order participants first answered.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    // -- Roster transformations --------------------------------------------

    /// Adds a participant, or updates the status of an existing one.
    ///
    /// Names match exactly (case-sensitive). An existing participant keeps
    /// its `id` and `joined_at`; a new one gets a fresh id and the current
    /// time. `join_time` is only kept for
    /// [`DifferentTime`](ParticipantStatus::DifferentTime); switching to
    /// `DifferentTime` without a time keeps the previously proposed one.
    pub fn add_or_update_participant(
        &self,
        name: &str,
        status: ParticipantStatus,
        join_time: Option<DateTime<Utc>>,
    ) -> Session {
        self.upsert(Lookup::Name(name), name, None, status, join_time)
    }

    /// Returns a session without any participant named `name`.
    ///
    /// Removing someone who isn't on the roster is not an error; the
    /// returned session simply equals this one.
    pub fn remove_participant(&self, name: &str) -> Session {
        self.without(Lookup::Name(name))
    }

    /// Shared implementation of every add/update operation.
    pub(crate) fn upsert(
        &self,
        lookup: Lookup<'_>,
        name: &str,
        identity: Option<&str>,
        status: ParticipantStatus,
        join_time: Option<DateTime<Utc>>,
    ) -> Session {
        let lookup = lookup.resolve(&self.participants);
        let mut participants = self.participants.clone();

        match participants.iter().position(|p| lookup.matches(p)) {
            Some(index) => {
                let existing = &participants[index];
                let join_time = match status {
                    ParticipantStatus::DifferentTime => {
                        join_time.or(existing.join_time)
                    }
                    _ => None,
                };
                let updated = Participant {
                    id: existing.id,
                    name: name.to_owned(),
                    status,
                    joined_at: existing.joined_at,
                    join_time,
                    identity: identity
                        .map(str::to_owned)
                        .or_else(|| existing.identity.clone()),
                };
                tracing::debug!(
                    session_id = %self.id,
                    participant_id = %updated.id,
                    %status,
                    "participant updated"
                );
                participants[index] = updated;
            }
            None => {
                let mut added = Participant::new(name, status);
                if status == ParticipantStatus::DifferentTime {
                    added.join_time = join_time;
                }
                added.identity = identity.map(str::to_owned);
                tracing::debug!(
                    session_id = %self.id,
                    participant_id = %added.id,
                    %status,
                    "participant added"
                );
                participants.push(added);
            }
        }

        self.with_roster(participants)
    }

    /// Shared implementation of every removal operation.
    pub(crate) fn without(&self, lookup: Lookup<'_>) -> Session {
        let lookup = lookup.resolve(&self.participants);
        let participants = self
            .participants
            .iter()
            .filter(|p| !lookup.matches(p))
            .cloned()
            .collect();
        self.with_roster(participants)
    }

    /// Copies every field except the roster, which is replaced.
    fn with_roster(&self, participants: Vec<Participant>) -> Session {
        Session {
            id: self.id,
            game_name: self.game_name.clone(),
            start_time: self.start_time,
            host_name: self.host_name.clone(),
            participants,
            created_at: self.created_at,
        }
    }

    // -- Roster queries ----------------------------------------------------

    /// Returns `true` if someone named exactly `name` is on the roster.
    pub fn has_participant(&self, name: &str) -> bool {
        self.participant(name).is_some()
    }

    /// Looks up a participant by exact name.
    pub fn participant(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    /// The status of the participant named `name`, or `None`.
    pub fn participant_status(&self, name: &str) -> Option<ParticipantStatus> {
        self.participant(name).map(Participant::status)
    }

    /// Number of participants with the given status.
    pub fn count(&self, status: ParticipantStatus) -> usize {
        self.participants
            .iter()
            .filter(|p| p.status == status)
            .count()
    }

    pub fn confirmed_count(&self) -> usize {
        self.count(ParticipantStatus::Confirmed)
    }

    pub fn maybe_count(&self) -> usize {
        self.count(ParticipantStatus::Maybe)
    }

    pub fn different_time_count(&self) -> usize {
        self.count(ParticipantStatus::DifferentTime)
    }

    pub fn cant_join_count(&self) -> usize {
        self.count(ParticipantStatus::CantJoin)
    }

    /// Names of participants with the given status, in roster order.
    pub fn names_with(&self, status: ParticipantStatus) -> Vec<&str> {
        self.participants
            .iter()
            .filter(|p| p.status == status)
            .map(Participant::name)
            .collect()
    }

    pub fn confirmed_names(&self) -> Vec<&str> {
        self.names_with(ParticipantStatus::Confirmed)
    }

    pub fn maybe_names(&self) -> Vec<&str> {
        self.names_with(ParticipantStatus::Maybe)
    }

    pub fn cant_join_names(&self) -> Vec<&str> {
        self.names_with(ParticipantStatus::CantJoin)
    }

    /// `(name, proposed time)` for every `DifferentTime` participant, in
    /// roster order.
    pub fn different_time_participants(&self) -> Vec<(&str, DateTime<Utc>)> {
        self.participants
            .iter()
            .filter(|p| p.status == ParticipantStatus::DifferentTime)
            .map(|p| (p.name(), p.proposed_time()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// SessionBuilder
// ---------------------------------------------------------------------------

/// Builds a [`Session`] whose id, creation time or roster are already known.
///
/// ```rust
/// use chrono::Utc;
/// use ggtime_session::{Participant, ParticipantStatus, Session, SessionId};
///
/// let id = SessionId::random();
/// let session = Session::builder("Valorant", Utc::now(), "Alex")
///     .id(id)
///     .participant(Participant::new("Sam", ParticipantStatus::Confirmed))
///     .build();
///
/// assert_eq!(session.id(), id);
/// assert_eq!(session.confirmed_names(), vec!["Sam"]);
/// ```
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    id: Option<SessionId>,
    game_name: String,
    start_time: DateTime<Utc>,
    host_name: String,
    participants: Vec<Participant>,
    created_at: Option<DateTime<Utc>>,
}

impl SessionBuilder {
    pub fn id(mut self, id: SessionId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Replaces the roster. Names are not de-duplicated here.
    pub fn participants(mut self, participants: Vec<Participant>) -> Self {
        self.participants = participants;
        self
    }

    /// Appends one participant to the roster.
    pub fn participant(mut self, participant: Participant) -> Self {
        self.participants.push(participant);
        self
    }

    /// Finishes the session. Missing ids and timestamps are generated now.
    pub fn build(self) -> Session {
        Session {
            id: self.id.unwrap_or_else(SessionId::random),
            game_name: self.game_name,
            start_time: self.start_time,
            host_name: self.host_name,
            participants: self.participants,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
