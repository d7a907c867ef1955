use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Acknowledgement body returned by every write endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub success: bool,
    pub message: String,
}

impl Ack {
    pub fn ok(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into() }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into() }
    }
}
