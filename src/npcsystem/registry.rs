//! A registry for all existing [`Npc`]s.
//!
//! Alongside the id map, the registry keeps the reverse index from a spawned
//! body entity to its npc id so interaction and packet callbacks can resolve
//! host entities back to domain objects. Both maps are instance state owned
//! by the plugin composition root.

use indexmap::IndexMap;

use crate::host::types::EntityId;
use crate::npcsystem::npc::Npc;

#[derive(Debug, Default)]
pub struct NpcRegistry {
    npcs: IndexMap<String, Npc>,
    entities: IndexMap<EntityId, String>,
}

impl NpcRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an npc by adding it to the registry.
    pub fn register_npc(&mut self, npc: Npc) {
        self.npcs.insert(npc.id().to_string(), npc);
    }

    /// Unregister an npc by removing it from the registry, preserving the
    /// order of the remaining entries.
    pub fn unregister_npc(&mut self, id: &str) -> Option<Npc> {
        self.entities.retain(|_, npc_id| npc_id.as_str() != id);
        self.npcs.shift_remove(id)
    }

    pub fn npc_from_id(&self, id: &str) -> Option<&Npc> {
        self.npcs.get(id)
    }

    pub fn npc_from_id_mut(&mut self, id: &str) -> Option<&mut Npc> {
        self.npcs.get_mut(id)
    }

    /// Register a spawned body entity for reverse lookup.
    pub fn register_npc_entity(&mut self, entity_id: EntityId, npc_id: impl Into<String>) {
        self.entities.insert(entity_id, npc_id.into());
    }

    /// Drop a body entity from the reverse index.
    pub fn unregister_npc_entity(&mut self, entity_id: EntityId) {
        self.entities.shift_remove(&entity_id);
    }

    /// Resolve a body entity to its npc id.
    pub fn npc_id_from_entity(&self, entity_id: EntityId) -> Option<&str> {
        self.entities.get(&entity_id).map(String::as_str)
    }

    pub fn npc_from_entity(&self, entity_id: EntityId) -> Option<&Npc> {
        self.npc_id_from_entity(entity_id)
            .and_then(|id| self.npcs.get(id))
    }

    pub fn is_entity_npc(&self, entity_id: EntityId) -> bool {
        self.entities.contains_key(&entity_id)
    }

    /// All registered npcs, in insertion order.
    pub fn npcs(&self) -> impl Iterator<Item = &Npc> {
        self.npcs.values()
    }

    pub fn npcs_mut(&mut self) -> impl Iterator<Item = &mut Npc> {
        self.npcs.values_mut()
    }

    /// All registry keys, in insertion order.
    pub fn ids(&self) -> Vec<String> {
        self.npcs.keys().cloned().collect()
    }

    /// All spawned body entity ids, in registration order.
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.entities.keys().copied().collect()
    }

    pub fn is_id_valid(&self, id: &str) -> bool {
        self.npcs.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }
}
