//! The conversation driver: what the messaging host calls into.
//!
//! A [`Conversation`] stands in for one open extension view. It holds the
//! viewer's identity and the session currently on screen, turns host events
//! into new sessions, and packages each one as an [`OutgoingMessage`] ready
//! to hand back to the host.
//!
//! ```text
//!  selected message ──open()──▶ current session ──handle(Respond)──▶ Update
//!  (nothing selected)           None            ──handle(Submit)───▶ Insert
//! ```
//!
//! Nothing here is shared: each host instance builds its own
//! `Conversation`, and the latest payload in the thread is the only copy of
//! the session that outlives it.

use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};
use ggtime_protocol::SessionCodec;
use ggtime_session::{Respondent, Response, Session};

use crate::captions::{MessageCaptions, SummaryKind};
use crate::{ConversationConfig, GgTimeError};

/// Something the user did in the extension view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The create form was submitted.
    Submit {
        game_name: String,
        start_time: DateTime<Utc>,
    },

    /// One of the response buttons on a session bubble was tapped.
    Respond(Response),
}

/// Whether an outgoing message starts a new bubble or replaces the
/// selected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Insert,
    Update,
}

/// A message ready for the host to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub kind: MessageKind,
    pub session: Session,
    /// The message URL.
    pub payload: String,
    pub captions: MessageCaptions,
}

// ---------------------------------------------------------------------------
// ConversationBuilder
// ---------------------------------------------------------------------------

/// Builder for a [`Conversation`].
///
/// # Example
///
/// ```rust
/// use ggtime::prelude::*;
///
/// let conversation = Conversation::builder(Respondent::named("Alex"))
///     .roster_key(RosterKey::Identity)
///     .clock_style(ClockStyle::TwentyFourHour)
///     .build();
///
/// assert!(conversation.current().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ConversationBuilder {
    viewer: Respondent,
    config: ConversationConfig,
}

impl ConversationBuilder {
    /// Creates a builder with default settings for `viewer`.
    pub fn new(viewer: Respondent) -> Self {
        Self {
            viewer,
            config: ConversationConfig::default(),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ConversationConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets how the viewer is matched on the roster.
    pub fn roster_key(mut self, key: ggtime_session::RosterKey) -> Self {
        self.config.roster_key = key;
        self
    }

    /// Sets how caption times are rendered.
    pub fn clock_style(mut self, style: ggtime_session::ClockStyle) -> Self {
        self.config.clock_style = style;
        self
    }

    /// Sets the payload URI tokens.
    pub fn payload(mut self, payload: ggtime_protocol::PayloadConfig) -> Self {
        self.config.payload = payload;
        self
    }

    pub fn build(self) -> Conversation {
        Conversation {
            codec: SessionCodec::new(self.config.payload.clone()),
            viewer: self.viewer,
            config: self.config,
            current: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

/// One viewer's view of a message thread.
#[derive(Debug, Clone)]
pub struct Conversation {
    viewer: Respondent,
    config: ConversationConfig,
    codec: SessionCodec,
    current: Option<Session>,
}

impl Conversation {
    /// Creates a new builder for `viewer`.
    pub fn builder(viewer: Respondent) -> ConversationBuilder {
        ConversationBuilder::new(viewer)
    }

    /// A conversation for `viewer` with default settings.
    pub fn new(viewer: Respondent) -> Self {
        ConversationBuilder::new(viewer).build()
    }

    pub fn viewer(&self) -> &Respondent {
        &self.viewer
    }

    pub fn config(&self) -> &ConversationConfig {
        &self.config
    }

    /// The session on screen, if any.
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Presents the view for the selected message's payload.
    ///
    /// A payload that decodes becomes the current session. Anything else,
    /// including no selection at all, leaves no session and the host shows
    /// the create form.
    pub fn open<'a>(&mut self, selected: impl Into<Option<&'a str>>) -> Option<&Session> {
        self.current = self.codec.decode(selected);

        match &self.current {
            Some(session) => tracing::info!(
                session_id = %session.id(),
                game = session.game_name(),
                viewer = %self.viewer.name,
                "opened session"
            ),
            None => tracing::info!(viewer = %self.viewer.name, "no session selected"),
        }

        self.current.as_ref()
    }

    /// Takes in a message that arrived while the view is open.
    ///
    /// Replaces the current session when `payload` decodes; otherwise the
    /// current session stays as it was.
    pub fn receive(&mut self, payload: &str) -> Option<&Session> {
        if let Some(session) = self.codec.decode(payload) {
            tracing::info!(
                session_id = %session.id(),
                participants = session.participants().len(),
                "received session update"
            );
            self.current = Some(session);
        }
        self.current.as_ref()
    }

    /// Handles `event` with captions rendered for the local clock.
    ///
    /// # Errors
    /// See [`handle_at`](Self::handle_at).
    pub fn handle(&mut self, event: HostEvent) -> Result<OutgoingMessage, GgTimeError> {
        self.handle_at(event, &Local::now())
    }

    /// Handles `event`, rendering captions in `now`'s time zone with
    /// "Today"/"Tomorrow" decided against `now`.
    ///
    /// On success the new session becomes the current one.
    ///
    /// # Errors
    /// - [`GgTimeError::BlankGameName`] for a submit with a blank game name.
    /// - [`GgTimeError::NoActiveSession`] for a response with no session open.
    /// - [`GgTimeError::Protocol`] if the session can't be encoded.
    pub fn handle_at<Tz>(
        &mut self,
        event: HostEvent,
        now: &DateTime<Tz>,
    ) -> Result<OutgoingMessage, GgTimeError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let (session, kind) = match event {
            HostEvent::Submit {
                game_name,
                start_time,
            } => (self.create(&game_name, start_time)?, MessageKind::Insert),
            HostEvent::Respond(response) => (self.respond(response)?, MessageKind::Update),
        };

        let payload = self.codec.try_encode(&session)?;
        let summary = match kind {
            MessageKind::Insert => SummaryKind::Announce,
            MessageKind::Update => SummaryKind::Update,
        };
        let captions =
            MessageCaptions::relative_to(&session, now, self.config.clock_style, summary);

        self.current = Some(session.clone());

        Ok(OutgoingMessage {
            kind,
            session,
            payload,
            captions,
        })
    }

    fn create(&self, game_name: &str, start_time: DateTime<Utc>) -> Result<Session, GgTimeError> {
        let game_name = game_name.trim();
        if game_name.is_empty() {
            return Err(GgTimeError::BlankGameName);
        }

        let session = Session::new(game_name, start_time, self.viewer.name.as_str());
        tracing::info!(
            session_id = %session.id(),
            game = game_name,
            host = %self.viewer.name,
            %start_time,
            "session created"
        );
        Ok(session)
    }

    fn respond(&self, response: Response) -> Result<Session, GgTimeError> {
        let current = self.current.as_ref().ok_or(GgTimeError::NoActiveSession)?;
        let session = current.apply_response(&self.viewer, response, self.config.roster_key);

        tracing::info!(
            session_id = %session.id(),
            viewer = %self.viewer.name,
            ?response,
            confirmed = session.confirmed_count(),
            "response recorded"
        );
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use ggtime_session::{ParticipantStatus, RosterKey};

    use super::*;

    fn submit(game: &str) -> HostEvent {
        HostEvent::Submit {
            game_name: game.into(),
            start_time: Utc::now() + Duration::hours(1),
        }
    }

    // =====================================================================
    // open / receive
    // =====================================================================

    #[test]
    fn test_open_without_selection_has_no_session() {
        let mut conversation = Conversation::new(Respondent::named("Sam"));
        assert!(conversation.open(None).is_none());
    }

    #[test]
    fn test_open_invalid_payload_clears_session() {
        let mut conversation = Conversation::new(Respondent::named("Alex"));
        conversation.handle(submit("Fortnite")).unwrap();

        assert!(conversation.open("ggtime://session?data=invalid!!!").is_none());
        assert!(conversation.current().is_none());
    }

    #[test]
    fn test_receive_invalid_payload_keeps_session() {
        let mut conversation = Conversation::new(Respondent::named("Alex"));
        let sent = conversation.handle(submit("Fortnite")).unwrap();

        let kept = conversation.receive("https://example.com").cloned();

        assert_eq!(kept, Some(sent.session));
    }

    // =====================================================================
    // handle
    // =====================================================================

    #[test]
    fn test_handle_submit_creates_session_hosted_by_viewer() {
        let mut conversation = Conversation::new(Respondent::named("Alex"));

        let message = conversation.handle(submit("  Minecraft  ")).unwrap();

        assert_eq!(message.kind, MessageKind::Insert);
        assert_eq!(message.session.game_name(), "Minecraft");
        assert_eq!(message.session.host_name(), "Alex");
        assert!(message.session.participants().is_empty());
        assert_eq!(conversation.current(), Some(&message.session));
    }

    #[test]
    fn test_handle_submit_blank_name_returns_error() {
        let mut conversation = Conversation::new(Respondent::named("Alex"));

        let result = conversation.handle(submit(" \t "));

        assert!(matches!(result, Err(GgTimeError::BlankGameName)));
        assert!(conversation.current().is_none());
    }

    #[test]
    fn test_handle_respond_without_session_returns_error() {
        let mut conversation = Conversation::new(Respondent::named("Sam"));
        let result = conversation.handle(HostEvent::Respond(Response::Join));
        assert!(matches!(result, Err(GgTimeError::NoActiveSession)));
    }

    #[test]
    fn test_handle_respond_updates_current_session() {
        let mut conversation = Conversation::new(Respondent::named("Sam"));
        let start = Utc::now() + Duration::hours(2);
        let session = Session::new("Among Us", start, "Alex");
        let payload = ggtime_protocol::encode(&session).unwrap();
        conversation.open(payload.as_str());

        let message = conversation.handle(HostEvent::Respond(Response::Maybe)).unwrap();

        assert_eq!(message.kind, MessageKind::Update);
        assert_eq!(message.session.id(), session.id());
        assert_eq!(
            message.session.participant_status("Sam"),
            Some(ParticipantStatus::Maybe)
        );
        assert_eq!(message.captions.trailing_caption, "1 maybe");
        assert_eq!(
            ggtime_protocol::decode(message.payload.as_str()),
            Some(message.session.clone())
        );
    }

    #[test]
    fn test_handle_respond_leave_removes_viewer() {
        let mut conversation = Conversation::new(Respondent::named("Alex"));
        conversation.handle(submit("Valorant")).unwrap();
        conversation.handle(HostEvent::Respond(Response::Join)).unwrap();

        let message = conversation.handle(HostEvent::Respond(Response::Leave)).unwrap();

        assert!(!message.session.has_participant("Alex"));
        assert_eq!(message.captions.trailing_caption, "No one joined yet");
    }

    #[test]
    fn test_builder_identity_key_follows_renamed_viewer() {
        let mut before = Conversation::builder(Respondent::with_identity("Sam", "p-1"))
            .roster_key(RosterKey::Identity)
            .build();
        let start = Utc::now() + Duration::hours(2);
        before.open(ggtime_protocol::encode(&Session::new("Apex Legends", start, "Alex")).unwrap().as_str());
        let first = before.handle(HostEvent::Respond(Response::Join)).unwrap();

        let mut after = Conversation::builder(Respondent::with_identity("Samuel", "p-1"))
            .roster_key(RosterKey::Identity)
            .build();
        after.open(first.payload.as_str());
        let second = after.handle(HostEvent::Respond(Response::CantJoin)).unwrap();

        assert_eq!(second.session.participants().len(), 1);
        assert_eq!(second.session.cant_join_names(), vec!["Samuel"]);
    }
}
