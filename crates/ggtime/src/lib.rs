//! # GG Time
//!
//! Propose a gaming session in a message thread and collect everyone's
//! answers on the same bubble.
//!
//! The session lives entirely inside the message: each bubble's URL carries
//! the whole session, and every answer sends a new bubble with the updated
//! roster. This crate ties the layers together for a messaging host:
//!
//! ```text
//! ggtime (Conversation, captions) → ggtime-protocol (payload) → ggtime-session (model)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use ggtime::prelude::*;
//!
//! // Alex proposes a session.
//! let mut alex = Conversation::new(Respondent::named("Alex"));
//! let invite = alex
//!     .handle(HostEvent::Submit {
//!         game_name: "Valorant".into(),
//!         start_time: Utc::now() + Duration::hours(2),
//!     })
//!     .unwrap();
//!
//! // Sam opens the bubble and joins.
//! let mut sam = Conversation::new(Respondent::named("Sam"));
//! sam.open(invite.payload.as_str());
//! let reply = sam.handle(HostEvent::Respond(Response::Join)).unwrap();
//!
//! assert_eq!(reply.session.confirmed_names(), vec!["Sam"]);
//! assert_eq!(reply.captions.trailing_caption, "1 confirmed");
//! ```

mod captions;
mod config;
mod conversation;
mod error;

pub use captions::{MessageCaptions, SummaryKind, participants_summary, update_summary};
pub use config::{ConversationConfig, POPULAR_GAMES};
pub use conversation::{
    Conversation, ConversationBuilder, HostEvent, MessageKind, OutgoingMessage,
};
pub use error::GgTimeError;

pub use ggtime_protocol as protocol;
pub use ggtime_session as session;

/// Everything a host integration usually needs.
pub mod prelude {
    pub use crate::{
        Conversation, ConversationBuilder, ConversationConfig, GgTimeError, HostEvent,
        MessageCaptions, MessageKind, OutgoingMessage, POPULAR_GAMES,
    };
    pub use ggtime_protocol::{PayloadConfig, ProtocolError, SessionCodec};
    pub use ggtime_session::{
        ClockStyle, Participant, ParticipantStatus, Respondent, Response, RosterKey, Session,
    };
}
