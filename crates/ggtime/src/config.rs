//! Configuration for a [`Conversation`](crate::Conversation).

use ggtime_protocol::PayloadConfig;
use ggtime_session::{ClockStyle, RosterKey};
use serde::{Deserialize, Serialize};

/// Games offered as one-tap choices on the create form, most popular first.
pub const POPULAR_GAMES: [&str; 8] = [
    "Valorant",
    "League of Legends",
    "Call of Duty",
    "Fortnite",
    "Apex Legends",
    "Minecraft",
    "Rocket League",
    "Among Us",
];

/// Settings for one conversation driver.
///
/// The defaults match every shipping client: the standard `ggtime://`
/// payload, roster entries keyed by display name, and 12-hour times.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// URI tokens and version tagging for outgoing payloads.
    pub payload: PayloadConfig,

    /// How the viewer is matched against existing roster entries.
    pub roster_key: RosterKey,

    /// How times of day are rendered in captions.
    pub clock_style: ClockStyle,
}
