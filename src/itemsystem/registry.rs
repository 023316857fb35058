//! A registry for all existing [`Item`]s.

use indexmap::IndexMap;

use crate::itemsystem::item::Item;

/// In-memory authoritative collection of items, keyed by id. Insertion order
/// is preserved so listings are deterministic. Lookups return `Option`;
/// callers decide how to surface a missing id.
#[derive(Debug, Default)]
pub struct ItemRegistry {
    items: IndexMap<String, Item>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item by adding it to the registry.
    pub fn register_item(&mut self, item: Item) {
        self.items.insert(item.id().to_string(), item);
    }

    /// Unregister an item by removing it from the registry, preserving the
    /// order of the remaining entries.
    pub fn unregister_item(&mut self, id: &str) -> Option<Item> {
        self.items.shift_remove(id)
    }

    pub fn item_from_id(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn item_from_id_mut(&mut self, id: &str) -> Option<&mut Item> {
        self.items.get_mut(id)
    }

    /// All registered items, in insertion order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// All registry keys, in insertion order.
    pub fn ids(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }

    pub fn is_id_valid(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
