//! # Message Records
//!
//! One turn of the conversation. Records are built through the constructors
//! below so that user messages never carry emotion or crisis data.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Seeded as the first record of every session.
pub const WELCOME_TEXT: &str = "Hello! I'm MindMate, your AI companion for mental health support. \
    I'm here to listen and provide a safe space for you to share your thoughts and feelings. \
    How are you feeling today?";

/// Appended in place of a reply when the service call fails.
pub const FALLBACK_TEXT: &str =
    "I'm sorry, I'm having trouble responding right now. Please try again in a moment.";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Emotion tag attached to assistant replies by the remote service.
///
/// Deserialization never fails on an unknown tag: anything outside the
/// known set becomes [`Emotion::Neutral`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Love,
    Surprise,
    Crisis,
    #[default]
    Neutral,
}

impl Emotion {
    pub const ALL: [Emotion; 8] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Love,
        Emotion::Surprise,
        Emotion::Crisis,
        Emotion::Neutral,
    ];

    /// Parses a wire tag. Case and surrounding whitespace are ignored;
    /// unrecognized tags map to `Neutral`.
    pub fn from_wire(tag: &str) -> Emotion {
        match tag.trim().to_ascii_lowercase().as_str() {
            "joy" => Emotion::Joy,
            "sadness" => Emotion::Sadness,
            "anger" => Emotion::Anger,
            "fear" => Emotion::Fear,
            "love" => Emotion::Love,
            "surprise" => Emotion::Surprise,
            "crisis" => Emotion::Crisis,
            _ => Emotion::Neutral,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Love => "love",
            Emotion::Surprise => "surprise",
            Emotion::Crisis => "crisis",
            Emotion::Neutral => "neutral",
        }
    }
}

impl From<String> for Emotion {
    fn from(tag: String) -> Self {
        Emotion::from_wire(&tag)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub text: String,
    /// Assistant messages only.
    pub emotion: Option<Emotion>,
    /// Assistant replies from the service only; `None` on welcome and fallback records.
    pub crisis: Option<bool>,
    /// Client clock at creation time.
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            emotion: None,
            crisis: None,
            timestamp: Local::now(),
        }
    }

    pub fn assistant(text: impl Into<String>, emotion: Emotion, crisis: bool) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            emotion: Some(emotion),
            crisis: Some(crisis),
            timestamp: Local::now(),
        }
    }

    pub fn welcome() -> Self {
        Self {
            role: Role::Assistant,
            text: WELCOME_TEXT.to_string(),
            emotion: Some(Emotion::Neutral),
            crisis: None,
            timestamp: Local::now(),
        }
    }

    pub fn fallback() -> Self {
        Self {
            role: Role::Assistant,
            text: FALLBACK_TEXT.to_string(),
            emotion: Some(Emotion::Neutral),
            crisis: None,
            timestamp: Local::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_emotion_tags {
        ( $($name:ident: $input:expr => $expected:expr,)+ ) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!(Emotion::from_wire($input), $expected);
                }
            )+
        };
    }

    test_emotion_tags! {
        tag_joy: "joy" => Emotion::Joy,
        tag_sadness: "sadness" => Emotion::Sadness,
        tag_anger: "anger" => Emotion::Anger,
        tag_fear: "fear" => Emotion::Fear,
        tag_love: "love" => Emotion::Love,
        tag_surprise: "surprise" => Emotion::Surprise,
        tag_crisis: "crisis" => Emotion::Crisis,
        tag_neutral: "neutral" => Emotion::Neutral,
        tag_uppercase: "JOY" => Emotion::Joy,
        tag_padded: "  fear " => Emotion::Fear,
        tag_unknown: "ecstatic" => Emotion::Neutral,
        tag_empty: "" => Emotion::Neutral,
    }

    #[test]
    fn as_str_round_trips_through_from_wire() {
        for emotion in Emotion::ALL {
            assert_eq!(Emotion::from_wire(emotion.as_str()), emotion);
        }
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Emotion::Surprise).unwrap(), "\"surprise\"");
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
    }

    #[test]
    fn user_message_has_no_emotion() {
        let msg = Message::user("hi");
        assert!(msg.is_user());
        assert_eq!(msg.emotion, None);
        assert_eq!(msg.crisis, None);
    }

    #[test]
    fn welcome_is_neutral_without_crisis_flag() {
        let msg = Message::welcome();
        assert!(msg.is_assistant());
        assert_eq!(msg.text, WELCOME_TEXT);
        assert_eq!(msg.emotion, Some(Emotion::Neutral));
        assert_eq!(msg.crisis, None);
    }

    #[test]
    fn fallback_is_neutral_without_crisis_flag() {
        let msg = Message::fallback();
        assert_eq!(msg.text, FALLBACK_TEXT);
        assert_eq!(msg.emotion, Some(Emotion::Neutral));
        assert_eq!(msg.crisis, None);
    }

    #[test]
    fn assistant_carries_tag_and_flag() {
        let msg = Message::assistant("Glad to hear!", Emotion::Joy, false);
        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.emotion, Some(Emotion::Joy));
        assert_eq!(msg.crisis, Some(false));
    }
}
