//! Fluent construction of [`ItemStack`]s.
//!
//! One builder covers every capability (name, lore, flags, data tags, skull
//! textures, leather dye) selected by composition; capabilities that do not
//! apply to a material are simply left unset.

use crate::host::stack::{DataValue, ItemStack, Material};

/// Builder over an [`ItemStack`].
#[derive(Debug, Clone)]
pub struct StackBuilder {
    stack: ItemStack,
}

impl StackBuilder {
    /// Start from a bare stack of the given material.
    pub fn of(material: Material) -> Self {
        Self {
            stack: ItemStack::of(material),
        }
    }

    /// Start from an existing stack, keeping all its metadata.
    pub fn from(stack: ItemStack) -> Self {
        Self { stack }
    }

    pub fn amount(mut self, amount: u8) -> Self {
        self.stack.amount = amount;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.stack.display_name = Some(name.into());
        self
    }

    /// Replace the lore with the given lines.
    pub fn lore(mut self, lines: Vec<String>) -> Self {
        self.stack.lore = lines;
        self
    }

    /// Append a single lore line.
    pub fn lore_line(mut self, line: impl Into<String>) -> Self {
        self.stack.lore.push(line.into());
        self
    }

    pub fn unbreakable(mut self, unbreakable: bool) -> Self {
        self.stack.unbreakable = unbreakable;
        self
    }

    /// Hide all item flags (attributes, unbreakable marker, dye) on clients.
    pub fn hide_flags(mut self) -> Self {
        self.stack.flags_hidden = true;
        self
    }

    pub fn data_str(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.stack
            .data
            .insert(key.into(), DataValue::Str(value.into()));
        self
    }

    pub fn data_double(mut self, key: impl Into<String>, value: f64) -> Self {
        self.stack.data.insert(key.into(), DataValue::Double(value));
        self
    }

    /// Texture reference for player-head stacks.
    pub fn skull_texture(mut self, texture: impl Into<String>) -> Self {
        self.stack.skull_texture = Some(texture.into());
        self
    }

    /// Dye color for leather armor stacks.
    pub fn leather_color(mut self, rgb: [u8; 3]) -> Self {
        self.stack.leather_color = Some(rgb);
        self
    }

    pub fn build(self) -> ItemStack {
        self.stack
    }
}
