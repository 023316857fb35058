//! The base item with all common fields and methods.
//!
//! The heart and the core of the entire ItemSystem.

use std::collections::BTreeMap;

use crate::core::item_builder::StackBuilder;
use crate::core::text::strip_tags;
use crate::host::stack::ItemStack;
use crate::itemsystem::types::{ItemStat, ItemType, Rarity};

/// Data tag keys carried by every built stack.
pub const KEY_ID: &str = "skylands:id";
pub const KEY_TYPE: &str = "skylands:type";
pub const KEY_RARITY: &str = "skylands:rarity";

/// A catalog item: identity, classification, and the opaque stack it renders
/// from. Owned exclusively by the [`ItemRegistry`](super::ItemRegistry) for
/// its lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// The unique id of the item. Immutable after creation.
    id: String,
    /// The type of the item. Immutable after creation.
    item_type: ItemType,
    rarity: Rarity,
    stack: ItemStack,
    /// Sparse stat values; absence means "not present", never zero.
    stats: BTreeMap<ItemStat, f64>,
}

impl Item {
    pub fn new(id: impl Into<String>, item_type: ItemType, rarity: Rarity, stack: ItemStack) -> Self {
        Self {
            id: id.into(),
            item_type,
            rarity,
            stack,
            stats: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    pub fn set_rarity(&mut self, rarity: Rarity) {
        self.rarity = rarity;
    }

    /// The internal stack, as stored. Cloned so callers cannot mutate the
    /// catalog copy in place.
    pub fn stack(&self) -> ItemStack {
        self.stack.clone()
    }

    pub fn set_stack(&mut self, stack: ItemStack) {
        self.stack = stack;
    }

    /// Plain visible name of the internal stack.
    pub fn display_name(&self) -> String {
        self.stack
            .display_name
            .as_deref()
            .map(strip_tags)
            .unwrap_or_default()
    }

    pub fn stats(&self) -> impl Iterator<Item = (ItemStat, f64)> + '_ {
        self.stats.iter().map(|(s, v)| (*s, *v))
    }

    pub fn stat(&self, stat: ItemStat) -> Option<f64> {
        self.stats.get(&stat).copied()
    }

    pub fn has_stat(&self, stat: ItemStat) -> bool {
        self.stats.contains_key(&stat)
    }

    pub fn set_stat(&mut self, stat: ItemStat, value: f64) {
        self.stats.insert(stat, value);
    }

    pub fn remove_stat(&mut self, stat: ItemStat) {
        self.stats.remove(&stat);
    }

    /// The final built stack with all data and styles: rarity-colored name,
    /// type and stat lore, the description carried by the internal stack,
    /// and the bold rarity footer.
    pub fn build_stack(&self) -> ItemStack {
        let name = self
            .stack
            .display_name
            .clone()
            .unwrap_or_else(|| self.id.clone());

        let mut lore = Vec::new();
        lore.push(self.item_type.name().to_string());
        lore.push(String::new());

        let mut builder = StackBuilder::from(self.stack.clone());
        for (stat, value) in &self.stats {
            let sign = if *value > 0.0 { "+" } else { "" };
            lore.push(format!("{}: {}{}{}", stat.name(), sign, value, stat.suffix()));
            builder = builder.data_double(stat.data_key(), *value);
        }
        if !self.stats.is_empty() {
            lore.push(String::new());
        }

        if !self.stack.lore.is_empty() {
            lore.extend(self.stack.lore.iter().cloned());
            lore.push(String::new());
        }

        lore.push(self.rarity.apply_color(&format!("<b>{}</b>", self.rarity.name())));

        builder
            .name(self.rarity.apply_color(&name))
            .lore(lore)
            .unbreakable(true)
            .hide_flags()
            .data_str(KEY_ID, self.id.as_str())
            .data_str(KEY_TYPE, self.item_type.as_str())
            .data_str(KEY_RARITY, self.rarity.as_str())
            .build()
    }
}
