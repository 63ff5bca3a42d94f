//! Roster keying: deciding which participant record a respondent owns.
//!
//! By default a participant is whoever has the same display name, exactly as
//! [`Session::add_or_update_participant`] does. Two friends who share a
//! display name will overwrite each other's answers under that rule, so the
//! host layer can opt into [`RosterKey::Identity`] and key records by a stable
//! identity it assigns (for example the messaging host's local participant
//! identifier) instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Participant, ParticipantStatus, Session};

/// Which field identifies a respondent's record on the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RosterKey {
    /// Exact, case-sensitive display name.
    #[default]
    Name,

    /// Caller-assigned identity. Respondents without one, and roster entries
    /// written before identities existed, still match by name.
    Identity,
}

/// The person answering a session: a display name plus, optionally, the
/// identity the host layer knows them by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Respondent {
    pub name: String,
    pub identity: Option<String>,
}

impl Respondent {
    /// A respondent known only by display name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identity: None,
        }
    }

    /// A respondent with a stable identity.
    pub fn with_identity(
        name: impl Into<String>,
        identity: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            identity: Some(identity.into()),
        }
    }

    fn lookup(&self, key: RosterKey) -> Lookup<'_> {
        match (key, self.identity.as_deref()) {
            (RosterKey::Identity, Some(identity)) => Lookup::Identity {
                identity,
                name: &self.name,
            },
            _ => Lookup::Name(&self.name),
        }
    }
}

/// A matching rule for one roster operation.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Lookup<'a> {
    Name(&'a str),

    /// Matches the stored identity. Entries without one fall back to `name`,
    /// but only while no entry carries `identity`; see [`Lookup::resolve`].
    Identity { identity: &'a str, name: &'a str },

    /// An identity-less entry called `name`.
    Unclaimed(&'a str),
}

impl<'a> Lookup<'a> {
    /// Fixes the rule against the current roster.
    ///
    /// A record that already carries the identity always wins. Only when
    /// there is none may an identity-less entry with the same name be
    /// claimed, so one identity never ends up on two records.
    pub(crate) fn resolve(self, participants: &[Participant]) -> Lookup<'a> {
        match self {
            Lookup::Identity { identity, name }
                if !participants.iter().any(|p| p.identity() == Some(identity)) =>
            {
                Lookup::Unclaimed(name)
            }
            other => other,
        }
    }

    pub(crate) fn matches(&self, participant: &Participant) -> bool {
        match *self {
            Lookup::Name(name) => participant.name() == name,
            Lookup::Identity { identity, .. } => participant.identity() == Some(identity),
            Lookup::Unclaimed(name) => {
                participant.identity().is_none() && participant.name() == name
            }
        }
    }
}

impl Session {
    /// Adds or updates `respondent`'s record, matched according to `key`.
    ///
    /// With [`RosterKey::Name`] this is exactly
    /// [`add_or_update_participant`](Self::add_or_update_participant), plus
    /// the respondent's identity is stored when present. With
    /// [`RosterKey::Identity`] a match by identity also refreshes the stored
    /// display name.
    pub fn respond(
        &self,
        respondent: &Respondent,
        status: ParticipantStatus,
        join_time: Option<DateTime<Utc>>,
        key: RosterKey,
    ) -> Session {
        self.upsert(
            respondent.lookup(key),
            &respondent.name,
            respondent.identity.as_deref(),
            status,
            join_time,
        )
    }

    /// Removes `respondent`'s record, matched according to `key`.
    pub fn withdraw(&self, respondent: &Respondent, key: RosterKey) -> Session {
        self.without(respondent.lookup(key))
    }
}
