//! Webhook wire types.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Body of an incoming webhook request.
///
/// Decoding is lenient: keys match case-insensitively, unknown keys are
/// skipped, `null` fields (or a `null` body) decode as empty strings, and a
/// repeated key keeps its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InboundMessage {
    /// Free-form message kind; accepted and ignored.
    #[serde(rename = "type")]
    pub kind: String,

    /// Payload the action operates on, usually a URL. `text` is accepted as
    /// an alias.
    pub content: String,

    /// Selects the handler.
    pub action: String,
}

enum Field {
    Kind,
    Content,
    Action,
    Other,
}

impl Field {
    fn from_key(key: &str) -> Self {
        match key.to_ascii_lowercase().as_str() {
            "type" => Field::Kind,
            "content" | "text" => Field::Content,
            "action" => Field::Action,
            _ => Field::Other,
        }
    }
}

impl<'de> Deserialize<'de> for InboundMessage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MessageVisitor)
    }
}

struct MessageVisitor;

impl<'de> Visitor<'de> for MessageVisitor {
    type Value = InboundMessage;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a webhook message object")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(InboundMessage::default())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut msg = InboundMessage::default();
        while let Some(key) = map.next_key::<String>()? {
            let slot = match Field::from_key(&key) {
                Field::Kind => &mut msg.kind,
                Field::Content => &mut msg.content,
                Field::Action => &mut msg.action,
                Field::Other => {
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
            };
            *slot = map.next_value::<Option<String>>()?.unwrap_or_default();
        }
        Ok(msg)
    }
}

/// Body of every structured webhook response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutboundResponse {
    pub success: bool,
    pub message: String,
}

impl OutboundResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
