//! Gaming session model for GG Time.
//!
//! This crate holds the record that every GG Time message carries:
//!
//! 1. **Session** ([`Session`]): what is being played, when, and by whom
//! 2. **Roster** ([`Participant`], [`ParticipantStatus`]): who answered and
//!    how, keyed by display name (or by identity, see [`RosterKey`])
//! 3. **Responses** ([`Response`]): the bubble's Join / Maybe / Leave /
//!    Join-at / Can't-join buttons mapped onto roster changes
//! 4. **Labels** ([`ClockStyle`]): "Today at 7:30 PM" style rendering
//!
//! Everything here is a value. Roster operations borrow a session and return
//! a new one; nothing is cached or shared between calls.
//!
//! # How it fits in the stack
//!
//! ```text
//! Conversation (ggtime)  ← turns host events into sessions and payloads
//!     ↕
//! Protocol (ggtime-protocol)  ← session ⇄ ggtime://session?data=... payload
//!     ↕
//! Session Model (this crate)  ← the record itself
//! ```

mod format;
mod response;
mod roster;
mod session;
mod types;

pub use format::{ClockStyle, format_time_of_day};
pub use response::Response;
pub use roster::{Respondent, RosterKey};
pub use session::{Participant, Session, SessionBuilder};
pub use types::{ParticipantId, ParticipantStatus, SessionId};
