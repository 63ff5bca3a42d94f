//! The answers a recipient can give from the session bubble.

use chrono::{DateTime, Utc};

use crate::{ParticipantStatus, Respondent, RosterKey, Session};

/// One tap on the session bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// "Join": confirmed at the planned time.
    Join,
    Maybe,
    /// "Leave": drop off the roster entirely.
    Leave,
    /// "Join at a different time", with the proposed time.
    JoinAt(DateTime<Utc>),
    CantJoin,
}

impl Response {
    /// The status this response records, or `None` for [`Response::Leave`].
    pub fn status(self) -> Option<ParticipantStatus> {
        match self {
            Self::Join => Some(ParticipantStatus::Confirmed),
            Self::Maybe => Some(ParticipantStatus::Maybe),
            Self::JoinAt(_) => Some(ParticipantStatus::DifferentTime),
            Self::CantJoin => Some(ParticipantStatus::CantJoin),
            Self::Leave => None,
        }
    }
}

impl Session {
    /// Applies `respondent`'s answer and returns the resulting session.
    pub fn apply_response(
        &self,
        respondent: &Respondent,
        response: Response,
        key: RosterKey,
    ) -> Session {
        let status = match response {
            Response::Leave => return self.withdraw(respondent, key),
            Response::JoinAt(time) => {
                return self.respond(
                    respondent,
                    ParticipantStatus::DifferentTime,
                    Some(time),
                    key,
                );
            }
            Response::Join => ParticipantStatus::Confirmed,
            Response::Maybe => ParticipantStatus::Maybe,
            Response::CantJoin => ParticipantStatus::CantJoin,
        };
        self.respond(respondent, status, None, key)
    }
}
