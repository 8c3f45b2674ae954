//! # Presentation Mapping
//!
//! Pure, table-driven mapping from an assistant message's emotion tag and
//! crisis flag to what the view shows: an optional label, a glyph, and a
//! style class. Adapters translate [`StyleClass`] into their own styling.
//!
//! Rules:
//! - `crisis == Some(true)` wins over everything: crisis glyph, crisis style,
//!   "Crisis Detected" label.
//! - `neutral` and `love` get no label but keep their own style.
//! - No emotion at all (user messages) renders as neutral.

use crate::core::message::{Emotion, Message};

pub const CRISIS_LABEL: &str = "Crisis Detected";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleClass {
    Joy,
    Sadness,
    Anger,
    Fear,
    Love,
    Surprise,
    Crisis,
    Neutral,
}

impl StyleClass {
    pub fn as_str(self) -> &'static str {
        match self {
            StyleClass::Joy => "emotion-joy",
            StyleClass::Sadness => "emotion-sadness",
            StyleClass::Anger => "emotion-anger",
            StyleClass::Fear => "emotion-fear",
            StyleClass::Love => "emotion-love",
            StyleClass::Surprise => "emotion-surprise",
            StyleClass::Crisis => "emotion-crisis",
            StyleClass::Neutral => "emotion-neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    /// `None` means the label row is suppressed.
    pub label: Option<&'static str>,
    pub glyph: &'static str,
    pub style: StyleClass,
}

const CRISIS: Presentation = Presentation {
    label: Some(CRISIS_LABEL),
    glyph: "🚨",
    style: StyleClass::Crisis,
};

fn table(emotion: Emotion) -> Presentation {
    match emotion {
        Emotion::Joy => Presentation {
            label: Some("Joy"),
            glyph: "😊",
            style: StyleClass::Joy,
        },
        Emotion::Sadness => Presentation {
            label: Some("Sadness"),
            glyph: "😢",
            style: StyleClass::Sadness,
        },
        Emotion::Anger => Presentation {
            label: Some("Anger"),
            glyph: "😠",
            style: StyleClass::Anger,
        },
        Emotion::Fear => Presentation {
            label: Some("Fear"),
            glyph: "😰",
            style: StyleClass::Fear,
        },
        Emotion::Love => Presentation {
            label: None,
            glyph: "❤️",
            style: StyleClass::Love,
        },
        Emotion::Surprise => Presentation {
            label: Some("Surprise"),
            glyph: "😲",
            style: StyleClass::Surprise,
        },
        Emotion::Crisis => CRISIS,
        Emotion::Neutral => Presentation {
            label: None,
            glyph: "💭",
            style: StyleClass::Neutral,
        },
    }
}

pub fn map_emotion(emotion: Option<Emotion>, crisis: Option<bool>) -> Presentation {
    if crisis == Some(true) {
        return CRISIS;
    }
    table(emotion.unwrap_or_default())
}

/// Presentation for a stored record.
pub fn present(message: &Message) -> Presentation {
    map_emotion(message.emotion, message.crisis)
}
