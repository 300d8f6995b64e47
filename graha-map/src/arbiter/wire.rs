//! JSON envelope used on the mothership topics
//!
//! Every message travels as one JSON object:
//!
//! ```text
//! { "from": "client" | "server" | "debug", "type": "<name>", "payload": { ... } }
//! ```
//!
//! `type` and `payload` come from the adjacently tagged message enums; the
//! `from` field is added on encode and stripped on decode.
//!
//! ## Error Handling
//!
//! - **Not JSON / not an object**: [`Error::Json`]
//! - **Unknown `from`**: [`Error::Link`]
//! - **Own client messages echoed back**: decoded as [`Inbound::Echo`] and ignored by the mailbox

use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};

use super::messages::{ClientMessage, DebugMessage, ServerMessage};

const FROM: &str = "from";

/// Sender of an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Client,
    Server,
    Debug,
}

impl Origin {
    /// Wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::Client => "client",
            Origin::Server => "server",
            Origin::Debug => "debug",
        }
    }

    fn parse(from: &str) -> Option<Self> {
        match from {
            "client" => Some(Origin::Client),
            "server" => Some(Origin::Server),
            "debug" => Some(Origin::Debug),
            _ => None,
        }
    }
}

/// A decoded message as seen by the robot.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// Message from the mothership
    Server(ServerMessage),
    /// Validator feedback for development
    Debug(DebugMessage),
    /// One of our own messages, echoed by the broker
    Echo,
}

/// Encode a client message into an envelope.
pub fn encode_client(message: &ClientMessage) -> Result<Vec<u8>> {
    encode(Origin::Client, message)
}

/// Encode a server message into an envelope.
pub fn encode_server(message: &ServerMessage) -> Result<Vec<u8>> {
    encode(Origin::Server, message)
}

/// Encode a debug message into an envelope.
pub fn encode_debug(message: &DebugMessage) -> Result<Vec<u8>> {
    encode(Origin::Debug, message)
}

fn encode<T: Serialize>(origin: Origin, message: &T) -> Result<Vec<u8>> {
    let mut value = serde_json::to_value(message)?;
    let Value::Object(fields) = &mut value else {
        return Err(Error::Link("message did not encode to an object".to_string()));
    };
    fields.insert(FROM.to_string(), Value::String(origin.as_str().to_string()));
    Ok(serde_json::to_vec(&value)?)
}

/// Split an envelope into its origin and the remaining tagged message.
fn open(bytes: &[u8]) -> Result<(Origin, Value)> {
    let mut value: Value = serde_json::from_slice(bytes)?;
    let from = match &mut value {
        Value::Object(fields) => fields.remove(FROM),
        _ => None,
    };

    let origin = match from {
        Some(Value::String(from)) => Origin::parse(&from)
            .ok_or_else(|| Error::Link(format!("unknown sender '{from}'")))?,
        _ => return Err(Error::Link("envelope without 'from'".to_string())),
    };
    Ok((origin, value))
}

/// Decode an envelope received on a robot topic.
pub fn decode_inbound(bytes: &[u8]) -> Result<Inbound> {
    let (origin, value) = open(bytes)?;
    match origin {
        Origin::Client => Ok(Inbound::Echo),
        Origin::Server => Ok(Inbound::Server(serde_json::from_value(value)?)),
        Origin::Debug => Ok(Inbound::Debug(serde_json::from_value(value)?)),
    }
}

/// Decode a client envelope, as the mothership does.
pub fn decode_client(bytes: &[u8]) -> Result<ClientMessage> {
    let (origin, value) = open(bytes)?;
    if origin != Origin::Client {
        return Err(Error::Link(format!(
            "expected a client message, got one from {}",
            origin.as_str()
        )));
    }
    Ok(serde_json::from_value(value)?)
}
