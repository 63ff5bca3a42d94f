use chrono::{Duration, Utc};
use ggtime::prelude::*;

// ---------------------------------------------------------------------------
// Thread script
// ---------------------------------------------------------------------------

/// Prints one bubble the way it would appear in the thread.
fn show(from: &str, message: &OutgoingMessage) {
    let captions = &message.captions;
    println!("── {from} sent ({:?}) ──", message.kind);
    println!("  {}", captions.caption);
    println!("  {}", captions.subcaption);
    println!("  {:>40}", captions.trailing_caption);
    println!("  [{}]", captions.summary);
    println!("  {}\n", message.payload);
}

fn main() -> Result<(), GgTimeError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let start = Utc::now() + Duration::hours(2);
    let game = POPULAR_GAMES[0];

    // Alex opens the extension with nothing selected and fills in the form.
    let mut alex = Conversation::new(Respondent::named("Alex"));
    alex.open(None);
    let invite = alex.handle(HostEvent::Submit {
        game_name: game.to_owned(),
        start_time: start,
    })?;
    show("Alex", &invite);

    // Sam taps the bubble and joins.
    let mut sam = Conversation::new(Respondent::named("Sam"));
    sam.open(invite.payload.as_str());
    let joined = sam.handle(HostEvent::Respond(Response::Join))?;
    show("Sam", &joined);

    // Jo would rather play an hour later.
    let mut jo = Conversation::builder(Respondent::named("Jo"))
        .clock_style(ClockStyle::TwentyFourHour)
        .build();
    jo.open(joined.payload.as_str());
    let later = jo.handle(HostEvent::Respond(Response::JoinAt(start + Duration::hours(1))))?;
    show("Jo", &later);

    // Ray can't make it, then changes their mind.
    let mut ray = Conversation::new(Respondent::named("Ray"));
    ray.open(later.payload.as_str());
    ray.handle(HostEvent::Respond(Response::CantJoin))?;
    let maybe = ray.handle(HostEvent::Respond(Response::Maybe))?;
    show("Ray", &maybe);

    // Back on Alex's screen.
    if let Some(session) = alex.receive(&maybe.payload) {
        tracing::info!(
            session_id = %session.id(),
            confirmed = ?session.confirmed_names(),
            maybe = ?session.maybe_names(),
            different_time = session.different_time_count(),
            "final roster"
        );
    }

    // Links that aren't sessions are ignored.
    let codec = SessionCodec::default();
    for payload in ["https://example.com", "ggtime://session?data=invalid!!!"] {
        if let Err(e) = codec.try_decode(Some(payload)) {
            tracing::warn!(payload, error = %e, "not a session");
        }
    }

    Ok(())
}
