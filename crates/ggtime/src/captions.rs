//! The text shown on a session's message bubble.
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Today at 7:30 PM                     │  caption
//! │ Alex is dropping in at 7:30 PM       │  subcaption
//! │                          2 confirmed │  trailing caption
//! └──────────────────────────────────────┘
//!   Alex wants to play Valorant at 7:30 PM   summary
//! ```
//!
//! The summary is what the conversation list shows. A new session announces
//! the host's plan; an updated one counts who answered.

use std::fmt;

use chrono::{DateTime, Local, TimeZone};
use ggtime_session::{ClockStyle, Session};

/// All the text of one message bubble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCaptions {
    pub caption: String,
    pub subcaption: String,
    pub trailing_caption: String,
    pub summary: String,
}

/// Which summary line a bubble carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    /// `"<host> wants to play <game> at <time>"`
    Announce,

    /// See [`update_summary`].
    Update,
}

impl MessageCaptions {
    /// Captions rendered in the local time zone against the current clock.
    pub fn local(session: &Session, style: ClockStyle, kind: SummaryKind) -> Self {
        Self::relative_to(session, &Local::now(), style, kind)
    }

    /// Captions rendered in `now`'s time zone, with "Today"/"Tomorrow"
    /// decided against `now`.
    pub fn relative_to<Tz>(
        session: &Session,
        now: &DateTime<Tz>,
        style: ClockStyle,
        kind: SummaryKind,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let time = session.formatted_time_in(&now.timezone(), style);
        let date = session.formatted_date_relative_to(now);

        let summary = match kind {
            SummaryKind::Announce => format!(
                "{} wants to play {} at {time}",
                session.host_name(),
                session.game_name()
            ),
            SummaryKind::Update => update_summary(session, &time),
        };

        Self {
            caption: format!("{date} at {time}"),
            subcaption: format!("{} is dropping in at {time}", session.host_name()),
            trailing_caption: participants_summary(session),
            summary,
        }
    }
}

/// One-line roster summary: the first non-empty group, in the order
/// confirmed, different time, maybe, can't join.
pub fn participants_summary(session: &Session) -> String {
    let groups = [
        (session.confirmed_count(), "confirmed"),
        (session.different_time_count(), "different time"),
        (session.maybe_count(), "maybe"),
        (session.cant_join_count(), "can't join"),
    ];

    groups
        .into_iter()
        .find(|(count, _)| *count > 0)
        .map_or_else(
            || "No one joined yet".to_owned(),
            |(count, label)| format!("{count} {label}"),
        )
}

/// `"N people interested in <game>"`, or `"<game> session at <time>"` while
/// nobody has answered. `time` is the already-rendered start time.
pub fn update_summary(session: &Session, time: &str) -> String {
    match session.participants().len() {
        0 => format!("{} session at {time}", session.game_name()),
        total => format!("{total} people interested in {}", session.game_name()),
    }
}
