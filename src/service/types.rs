use serde::{Deserialize, Serialize};

use crate::core::message::Emotion;

/// Request body for `POST /chat`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest<'a> {
    pub session_id: &'a str,
    pub message: &'a str,
}

/// Success body returned by `POST /chat`.
///
/// `response` is mandatory; a body without it is a parse failure.
/// A missing `emotion` falls back to `neutral` and a missing `crisis` to `false`.
/// Unrecognized emotion strings are mapped to `neutral` by [`Emotion`]'s deserializer.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub emotion: Emotion,
    #[serde(default)]
    pub crisis: bool,
    /// Echo of the request's session id (the service may omit it).
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Body of `GET /health`. Only the status code matters to the client;
/// the body is decoded when present for logging.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_wire_field_names() {
        let req = ChatRequest {
            session_id: "session_1_abc",
            message: "hello",
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"session_id": "session_1_abc", "message": "hello"})
        );
    }

    #[test]
    fn reply_full_payload() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"session_id":"s","response":"Glad to hear!","emotion":"joy","crisis":false}"#,
        )
        .unwrap();
        assert_eq!(reply.response, "Glad to hear!");
        assert_eq!(reply.emotion, Emotion::Joy);
        assert!(!reply.crisis);
        assert_eq!(reply.session_id.as_deref(), Some("s"));
    }

    #[test]
    fn reply_missing_emotion_defaults_to_neutral() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"response":"ok","crisis":false}"#).unwrap();
        assert_eq!(reply.emotion, Emotion::Neutral);
    }

    #[test]
    fn reply_missing_crisis_defaults_to_false() {
        let reply: ChatReply = serde_json::from_str(r#"{"response":"ok","emotion":"fear"}"#).unwrap();
        assert!(!reply.crisis);
        assert_eq!(reply.emotion, Emotion::Fear);
    }

    #[test]
    fn reply_unknown_emotion_fails_closed_to_neutral() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"response":"ok","emotion":"ecstatic","crisis":false}"#)
                .unwrap();
        assert_eq!(reply.emotion, Emotion::Neutral);
    }

    #[test]
    fn reply_missing_response_is_rejected() {
        let result = serde_json::from_str::<ChatReply>(r#"{"emotion":"joy","crisis":false}"#);
        assert!(result.is_err());
    }

    #[test]
    fn reply_mistyped_crisis_is_rejected() {
        let result =
            serde_json::from_str::<ChatReply>(r#"{"response":"ok","emotion":"joy","crisis":"yes"}"#);
        assert!(result.is_err());
    }
}
