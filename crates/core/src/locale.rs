//! Supported output locales

use serde::{Deserialize, Serialize};

/// Locale used for response messages and speech normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    /// Russian (Cyrillic speech output)
    #[default]
    #[serde(rename = "ru", alias = "russian")]
    Russian,
    /// English (Latin speech output)
    #[serde(rename = "en", alias = "english")]
    English,
}

impl Locale {
    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Russian => "ru",
            Locale::English => "en",
        }
    }

    /// Parse from ISO code or name
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "ru" | "russian" => Some(Locale::Russian),
            "en" | "english" => Some(Locale::English),
            _ => None,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
