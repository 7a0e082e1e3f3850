//! Slot extraction from NLU entities

use voice_ci_core::{NluEntity, Slot, SlotKind, SlotMap};

/// Build the slot map for a request
///
/// Every entity of a known kind at or above `min_confidence` becomes a slot;
/// a later entity of the same kind replaces an earlier one. If that leaves
/// the map empty while entities were detected, the single most confident
/// entity of a known kind is used as the only slot.
pub fn extract_slots(entities: &[NluEntity], min_confidence: f64) -> SlotMap {
    let mut slots = SlotMap::new();

    for entity in entities {
        let Some(kind) = SlotKind::from_entity(&entity.entity) else {
            tracing::warn!(entity = %entity.entity, "Dropping entity of unknown type");
            continue;
        };
        if entity.confidence < min_confidence {
            tracing::debug!(
                entity = %entity.entity,
                confidence = entity.confidence,
                "Entity below confidence floor"
            );
            continue;
        }
        slots.insert(Slot::new(kind, entity.value.clone()));
    }

    if slots.is_empty() && !entities.is_empty() {
        if let Some((kind, entity)) = most_confident(entities) {
            tracing::debug!(
                entity = %entity.entity,
                confidence = entity.confidence,
                "Falling back to most confident entity"
            );
            slots.insert(Slot::new(kind, entity.value.clone()));
        }
    }

    slots
}

/// First entity with the highest confidence among known kinds
fn most_confident(entities: &[NluEntity]) -> Option<(SlotKind, &NluEntity)> {
    let mut best: Option<(SlotKind, &NluEntity)> = None;
    for entity in entities {
        let Some(kind) = SlotKind::from_entity(&entity.entity) else {
            continue;
        };
        if best.map_or(true, |(_, b)| entity.confidence > b.confidence) {
            best = Some((kind, entity));
        }
    }
    best
}
