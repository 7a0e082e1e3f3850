//! NLU result types
//!
//! Mirrors the structure returned by the NLU collaborator:
//! `{intent: {name, confidence}, entities: [{entity, value, confidence}]}`.

use serde::{Deserialize, Deserializer, Serialize};

/// Recognized intent with its confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NluIntent {
    /// Intent name from the fixed registry
    #[serde(default)]
    pub name: String,
    /// Confidence in 0.0..=1.0
    #[serde(default)]
    pub confidence: f64,
}

impl NluIntent {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence,
        }
    }
}

/// Extracted entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NluEntity {
    /// Entity type tag (e.g. `job_name`)
    pub entity: String,
    /// Surface value
    #[serde(deserialize_with = "scalar_as_string")]
    pub value: String,
    /// Extractor confidence; Rasa's DIET reports it as `confidence_entity`
    #[serde(default, alias = "confidence_entity")]
    pub confidence: f64,
}

impl NluEntity {
    pub fn new(entity: impl Into<String>, value: impl Into<String>, confidence: f64) -> Self {
        Self {
            entity: entity.into(),
            value: value.into(),
            confidence,
        }
    }
}

/// Full NLU parse result
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NluResult {
    /// Text the NLU saw
    #[serde(default)]
    pub text: String,
    /// Declared intent, absent when the model produced none
    #[serde(default)]
    pub intent: Option<NluIntent>,
    #[serde(default)]
    pub entities: Vec<NluEntity>,
}

impl NluResult {
    pub fn new(intent: NluIntent, entities: Vec<NluEntity>) -> Self {
        Self {
            text: String::new(),
            intent: Some(intent),
            entities,
        }
    }
}

// Entity values arrive as strings most of the time, but extractors such as
// duckling emit numbers.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}
