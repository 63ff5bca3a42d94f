//! Integration tests for session payloads: what goes in comes back out,
//! and anything that isn't a session payload is turned away.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use chrono::{Duration, TimeZone, Utc};
use ggtime_protocol::{
    FORMAT_VERSION, PayloadConfig, ProtocolError, SessionCodec, decode, encode,
    extract_quick_info, is_valid_payload,
};
use ggtime_session::{Participant, ParticipantStatus, Respondent, Response, RosterKey, Session};

fn session_at(game: &str, host: &str) -> Session {
    Session::new(game, Utc::now() + Duration::hours(2), host)
}

fn payload_with_json(json: &serde_json::Value) -> String {
    let blob = URL_SAFE_NO_PAD.encode(serde_json::to_vec(json).unwrap());
    format!("ggtime://session?data={blob}")
}

// =========================================================================
// Round trip
// =========================================================================

#[test]
fn test_round_trip_empty_roster() {
    let session = session_at("Valorant", "Alex");
    let payload = encode(&session).unwrap();

    assert_eq!(decode(payload.as_str()), Some(session));
}

#[test]
fn test_round_trip_every_status() {
    let later = Utc::now() + Duration::hours(5);
    let session = session_at("Rocket League", "Alex")
        .add_or_update_participant("Sam", ParticipantStatus::Confirmed, None)
        .add_or_update_participant("Jo", ParticipantStatus::Maybe, None)
        .add_or_update_participant("Kit", ParticipantStatus::DifferentTime, Some(later))
        .add_or_update_participant("Ray", ParticipantStatus::CantJoin, None);

    let decoded = decode(encode(&session).unwrap().as_str()).unwrap();

    assert_eq!(decoded, session);
    assert_eq!(decoded.different_time_participants(), vec![("Kit", later)]);
}

#[test]
fn test_round_trip_long_and_non_ascii_names() {
    let long_name = "x".repeat(2_000);
    let session = session_at("マインクラフト 🎮", "Zoë")
        .add_or_update_participant(&long_name, ParticipantStatus::Maybe, None)
        .add_or_update_participant("🔥 Sam 🔥", ParticipantStatus::Confirmed, None)
        .add_or_update_participant("Ñandú", ParticipantStatus::CantJoin, None)
        .add_or_update_participant("", ParticipantStatus::Confirmed, None);

    let decoded = decode(encode(&session).unwrap().as_str()).unwrap();

    assert_eq!(decoded, session);
    assert_eq!(decoded.game_name(), "マインクラフト 🎮");
    assert!(decoded.has_participant(&long_name));
}

#[test]
fn test_round_trip_preserves_identities() {
    let session = session_at("Among Us", "Alex").apply_response(
        &Respondent::with_identity("Sam", "device-7"),
        Response::Join,
        RosterKey::Identity,
    );

    let decoded = decode(encode(&session).unwrap().as_str()).unwrap();

    assert_eq!(decoded.participants()[0].identity(), Some("device-7"));
}

#[test]
fn test_round_trip_builder_restored_session() {
    let created = Utc.with_ymd_and_hms(2025, 12, 24, 18, 0, 0).unwrap();
    let session = Session::builder("Minecraft", created + Duration::days(1), "Alex")
        .created_at(created)
        .participant(Participant::new("Sam", ParticipantStatus::Confirmed))
        .build();

    assert_eq!(decode(encode(&session).unwrap().as_str()), Some(session));
}

// =========================================================================
// Rejection
// =========================================================================

#[test]
fn test_decode_rejects_non_session_payloads() {
    let not_a_session = payload_with_json(&serde_json::json!({ "hello": "world" }));

    let rejected: [Option<&str>; 8] = [
        None,
        Some(""),
        Some("https://session?data=abc"),
        Some("ggtime://invalid?data=abc"),
        Some("ggtime://session"),
        Some("ggtime://session?other=abc"),
        Some("ggtime://session?data=invalid!!!"),
        Some(not_a_session.as_str()),
    ];

    for payload in rejected {
        assert_eq!(decode(payload), None, "accepted {payload:?}");
        assert!(!is_valid_payload(payload));
        assert_eq!(extract_quick_info(payload), None);
    }
}

#[test]
fn test_decode_rejects_unknown_status_token() {
    let session = session_at("Fortnite", "Alex")
        .add_or_update_participant("Sam", ParticipantStatus::Confirmed, None);
    let mut json = serde_json::to_value(&session).unwrap();
    json["participants"][0]["status"] = serde_json::json!("busy");

    let result = SessionCodec::default().try_decode(Some(&payload_with_json(&json)));

    assert!(matches!(result, Err(ProtocolError::Decode(_))));
}

#[test]
fn test_decode_rejects_malformed_timestamp() {
    let mut json = serde_json::to_value(session_at("Fortnite", "Alex")).unwrap();
    json["startTime"] = serde_json::json!("not-a-date");
    let payload = payload_with_json(&json);

    let result = SessionCodec::default().try_decode(Some(&payload));

    assert!(matches!(result, Err(ProtocolError::Decode(_))));
    assert_eq!(decode(payload.as_str()), None);
}

#[test]
fn test_decode_rejects_wrong_field_type() {
    let mut json = serde_json::to_value(session_at("Fortnite", "Alex")).unwrap();
    json["gameName"] = serde_json::json!(42);
    let payload = payload_with_json(&json);

    let result = SessionCodec::default().try_decode(Some(&payload));

    assert!(matches!(result, Err(ProtocolError::Decode(_))));
    assert_eq!(decode(payload.as_str()), None);
}

#[test]
fn test_decode_rejects_future_format_version() {
    let mut json = serde_json::to_value(session_at("Fortnite", "Alex")).unwrap();
    json["formatVersion"] = serde_json::json!(FORMAT_VERSION + 1);

    let result = SessionCodec::default().try_decode(Some(&payload_with_json(&json)));

    assert!(matches!(result, Err(ProtocolError::UnsupportedVersion { .. })));
}

// =========================================================================
// Earlier payload formats
// =========================================================================

#[test]
fn test_decode_accepts_untagged_standard_base64_payload() {
    // Shape written by the first clients: no formatVersion, no joinTime,
    // standard alphabet with padding.
    let json = serde_json::json!({
        "id": "6f1c2a4e-3b5d-4c7e-9f10-112233445566",
        "gameName": "Apex Legends",
        "startTime": "2025-12-25T20:00:00Z",
        "hostName": "Alex",
        "createdAt": "2025-12-24T09:15:00Z",
        "participants": [
            {
                "id": "0a0b0c0d-0e0f-4a1b-8c2d-3e4f5a6b7c8d",
                "name": "Sam",
                "status": "differentTime",
                "joinedAt": "2025-12-25T21:30:00Z"
            }
        ]
    });
    let blob = STANDARD.encode(serde_json::to_vec(&json).unwrap());
    let payload = format!("ggtime://session?data={blob}");

    let session = decode(payload.as_str()).unwrap();

    let proposed = Utc.with_ymd_and_hms(2025, 12, 25, 21, 30, 0).unwrap();
    assert_eq!(session.game_name(), "Apex Legends");
    assert_eq!(session.host_name(), "Alex");
    assert_eq!(session.participants()[0].join_time(), None);
    assert_eq!(session.different_time_participants(), vec![("Sam", proposed)]);
}

#[test]
fn test_untagged_encoding_decodes_with_tagging_codec() {
    let untagged = SessionCodec::new(PayloadConfig {
        emit_version: false,
        ..PayloadConfig::default()
    });
    let session = session_at("Call of Duty", "Alex");

    let payload = untagged.encode(&session).unwrap();

    assert_eq!(decode(payload.as_str()), Some(session));
}

// =========================================================================
// Quick info
// =========================================================================

#[test]
fn test_extract_quick_info_returns_game_and_start() {
    let session = session_at("League of Legends", "Alex");
    let payload = encode(&session).unwrap();

    let info = extract_quick_info(payload.as_str()).unwrap();

    assert_eq!(info.game_name, "League of Legends");
    assert_eq!(info.start_time, session.start_time());
}

// =========================================================================
// End to end
// =========================================================================

#[test]
fn test_end_to_end_host_creates_and_friend_confirms() {
    let start = Utc::now() + Duration::hours(3);

    // Alex proposes a session and sends it.
    let created = Session::new("Valorant", start, "Alex");
    let sent = encode(&created).unwrap();

    // Sam opens the message: same session, nobody on the roster yet.
    let received = decode(sent.as_str()).unwrap();
    assert_eq!(received, created);
    assert!(received.participants().is_empty());

    // Sam taps "Join" and sends the update back.
    let updated = received.apply_response(&Respondent::named("Sam"), Response::Join, RosterKey::Name);
    let reply = encode(&updated).unwrap();

    // Alex opens the update.
    let seen = decode(reply.as_str()).unwrap();
    assert_eq!(seen.id(), created.id());
    assert_eq!(seen.confirmed_count(), 1);
    assert_eq!(seen.confirmed_names(), vec!["Sam"]);
}
