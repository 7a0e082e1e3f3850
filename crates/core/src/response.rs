//! Command response

use serde::{Deserialize, Serialize};

/// Response to a command: one string for display, one for speech synthesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub message: String,
    pub for_tts: String,
}

impl CommandResponse {
    pub fn new(message: impl Into<String>, for_tts: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            for_tts: for_tts.into(),
        }
    }
}
