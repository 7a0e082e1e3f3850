//! Closed slot model
//!
//! Entity types form a fixed set. Anything else coming out of the NLU is
//! rejected at extraction time instead of leaking into handlers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Entity types the handlers understand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    JobName,
    BuildNumber,
    ParameterName,
}

impl SlotKind {
    pub const ALL: [SlotKind; 3] = [
        SlotKind::JobName,
        SlotKind::BuildNumber,
        SlotKind::ParameterName,
    ];

    /// Map an NLU entity tag to a slot kind
    pub fn from_entity(tag: &str) -> Option<Self> {
        match tag {
            "job_name" => Some(SlotKind::JobName),
            "build_number" => Some(SlotKind::BuildNumber),
            "parameter_name" => Some(SlotKind::ParameterName),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKind::JobName => "job_name",
            SlotKind::BuildNumber => "build_number",
            SlotKind::ParameterName => "parameter_name",
        }
    }
}

/// A typed slot value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Slot {
    JobName(String),
    /// Kept raw; handlers report unparsable numbers to the user
    BuildNumber(String),
    ParameterName(String),
}

impl Slot {
    pub fn new(kind: SlotKind, value: impl Into<String>) -> Self {
        let value = value.into();
        match kind {
            SlotKind::JobName => Slot::JobName(value),
            SlotKind::BuildNumber => Slot::BuildNumber(value),
            SlotKind::ParameterName => Slot::ParameterName(value),
        }
    }

    pub fn kind(&self) -> SlotKind {
        match self {
            Slot::JobName(_) => SlotKind::JobName,
            Slot::BuildNumber(_) => SlotKind::BuildNumber,
            Slot::ParameterName(_) => SlotKind::ParameterName,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Slot::JobName(v) | Slot::BuildNumber(v) | Slot::ParameterName(v) => v,
        }
    }
}

/// Slot map keyed by kind; inserting an existing kind replaces its value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotMap {
    slots: HashMap<SlotKind, Slot>,
}

impl SlotMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slot: Slot) {
        self.slots.insert(slot.kind(), slot);
    }

    pub fn with(mut self, slot: Slot) -> Self {
        self.insert(slot);
        self
    }

    pub fn get(&self, kind: SlotKind) -> Option<&Slot> {
        self.slots.get(&kind)
    }

    pub fn job_name(&self) -> Option<&str> {
        self.value(SlotKind::JobName)
    }

    pub fn build_number(&self) -> Option<&str> {
        self.value(SlotKind::BuildNumber)
    }

    pub fn parameter_name(&self) -> Option<&str> {
        self.value(SlotKind::ParameterName)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.values()
    }

    fn value(&self, kind: SlotKind) -> Option<&str> {
        self.slots
            .get(&kind)
            .map(Slot::value)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }
}
