//! Transient user-facing notifications and the chat log.

use std::collections::VecDeque;

use crate::config::GameConfig;
use crate::state::types::{NoticeId, Timestamp};

/// Short-lived banner shown to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Popup {
    pub id: NoticeId,
    pub text: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none", default))]
    pub icon: Option<String>,
    pub timestamp: Timestamp,
}

impl Popup {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.millis_since(self.timestamp) >= GameConfig::POPUP_TTL_MS
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FloatingTextStyle {
    MonsterDamage,
    PlayerDamage,
    Heal,
}

/// Combat number drawn above a position for a moment.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloatingText {
    pub id: NoticeId,
    pub x: f32,
    pub y: f32,
    pub text: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub style: FloatingTextStyle,
    pub timestamp: Timestamp,
}

impl FloatingText {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now.millis_since(self.timestamp) >= GameConfig::FLOATING_TEXT_TTL_MS
    }
}

/// Bounded chat and system log. Pushing past the cap evicts the oldest line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MessageLog {
    lines: VecDeque<String>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self {
            lines: VecDeque::with_capacity(GameConfig::MAX_MESSAGES),
        }
    }

    pub fn with_welcome() -> Self {
        let mut log = Self::new();
        log.push("Welcome to EcoExplore!");
        log.push("Use the joystick to move.");
        log.push("Walk up to things and press the action button to interact.");
        log
    }

    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == GameConfig::MAX_MESSAGES {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_log_evicts_oldest_past_cap() {
        let mut log = MessageLog::new();
        for index in 0..GameConfig::MAX_MESSAGES + 5 {
            log.push(format!("line {index}"));
        }

        assert_eq!(log.len(), GameConfig::MAX_MESSAGES);
        assert_eq!(log.iter().next(), Some("line 5"));
        assert_eq!(log.last(), Some("line 54"));
    }

    #[test]
    fn popups_expire_at_ttl() {
        let popup = Popup {
            id: NoticeId(1),
            text: "hi".into(),
            icon: None,
            timestamp: Timestamp(100),
        };
        assert!(!popup.is_expired(Timestamp(3_099)));
        assert!(popup.is_expired(Timestamp(3_100)));
    }

    #[test]
    fn floating_text_expires_at_ttl() {
        let text = FloatingText {
            id: NoticeId(2),
            x: 10.0,
            y: 20.0,
            text: "-20".into(),
            style: FloatingTextStyle::MonsterDamage,
            timestamp: Timestamp(100),
        };
        assert!(!text.is_expired(Timestamp(1_099)));
        assert!(text.is_expired(Timestamp(1_100)));
    }
}
