//! Human-friendly start time labels ("Today", "7:30 PM", "Dec 25").
//!
//! Labels are computed on every call from the current clock, never stored:
//! a session created for "Tomorrow" reads "Today" once midnight passes.
//! The `*_in` / `*_relative_to` variants take the time zone or "now"
//! explicitly, which is what tests and non-local renderers use.

use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::Session;

/// How times of day are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClockStyle {
    /// `"7:30 PM"`
    #[default]
    TwelveHour,

    /// `"19:30"`
    TwentyFourHour,
}

impl ClockStyle {
    /// The chrono `strftime` pattern for this style.
    ///
    /// `%-I` is the hour without zero padding, so 7 PM prints as `7`, not `07`.
    fn pattern(self) -> &'static str {
        match self {
            Self::TwelveHour => "%-I:%M %p",
            Self::TwentyFourHour => "%H:%M",
        }
    }
}

/// Renders `time` as a short time of day in `tz`.
pub fn format_time_of_day<Tz>(time: DateTime<Utc>, tz: &Tz, style: ClockStyle) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    time.with_timezone(tz).format(style.pattern()).to_string()
}

impl Session {
    /// The start time of day in the local time zone, e.g. `"7:30 PM"`.
    pub fn formatted_time(&self) -> String {
        self.formatted_time_in(&Local, ClockStyle::default())
    }

    /// The start time of day in `tz`, rendered with `style`.
    pub fn formatted_time_in<Tz>(&self, tz: &Tz, style: ClockStyle) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        format_time_of_day(self.start_time(), tz, style)
    }

    /// `"Today"`, `"Tomorrow"`, or an abbreviated date like `"Dec 25"`,
    /// compared against the local calendar right now.
    pub fn formatted_date(&self) -> String {
        self.formatted_date_relative_to(&Local::now())
    }

    /// Like [`formatted_date`](Self::formatted_date), but against an explicit
    /// `now`. Calendar days are taken in `now`'s time zone.
    pub fn formatted_date_relative_to<Tz>(&self, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let start = self.start_time().with_timezone(&now.timezone());
        let today = now.date_naive();
        let day = start.date_naive();

        if day == today {
            "Today".to_owned()
        } else if today.succ_opt() == Some(day) {
            "Tomorrow".to_owned()
        } else {
            start.format("%b %-d").to_string()
        }
    }
}
