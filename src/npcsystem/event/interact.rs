//! Entity interaction reactions: npc bodies cannot be manipulated or
//! damaged, and clicks resolve back to the owning npc.

use crate::host::types::{EntityId, Hand};
use crate::npcsystem::registry::NpcRegistry;

/// Result of a click or attack on a world entity.
#[derive(Debug, PartialEq, Eq)]
pub enum InteractOutcome {
    /// Not an npc body; the host handles the event normally.
    NotNpc,
    /// An npc body was targeted but the event carries no interaction
    /// (armor-stand manipulation, or the off-hand duplicate). The host
    /// event is cancelled.
    Cancelled,
    /// An npc was interacted with.
    Interact { npc_id: String },
}

/// Armor-stand manipulation of an npc body is always cancelled.
pub fn on_armor_stand_manipulate(registry: &NpcRegistry, entity: EntityId) -> bool {
    registry.is_entity_npc(entity)
}

/// A click or attack on a world entity. Off-hand events are duplicates of
/// the main-hand event and are suppressed.
pub fn on_entity_interact(registry: &NpcRegistry, entity: EntityId, hand: Hand) -> InteractOutcome {
    let Some(npc_id) = registry.npc_id_from_entity(entity) else {
        return InteractOutcome::NotNpc;
    };
    if hand == Hand::Off {
        return InteractOutcome::Cancelled;
    }
    InteractOutcome::Interact {
        npc_id: npc_id.to_string(),
    }
}
