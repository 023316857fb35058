//! The plugin's view of host world state: spawned entities, online players,
//! their inventories, and per-connection packet outboxes.
//!
//! A real host feeds and drains this surface; the standalone binary and the
//! test suite drive it directly.

use std::collections::HashSet;

use indexmap::IndexMap;
use uuid::Uuid;

use crate::host::packet::ServerPacket;
use crate::host::stack::ItemStack;
use crate::host::types::{EntityId, Location};

/// A spawned armor-stand entity anchoring an npc's presence.
#[derive(Debug, Clone)]
pub struct WorldEntity {
    pub id: EntityId,
    pub uuid: Uuid,
    pub location: Location,
    pub custom_name: Option<String>,
    pub custom_name_visible: bool,
    pub gravity: bool,
    pub can_pickup_items: bool,
    pub invulnerable: bool,
    pub visible: bool,
}

/// An online player: identity, position, permissions, and held items.
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub uuid: Uuid,
    pub location: Location,
    pub permissions: HashSet<String>,
    pub main_hand: ItemStack,
    pub inventory: Vec<ItemStack>,
}

impl Player {
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            uuid: Uuid::new_v4(),
            location,
            permissions: HashSet::new(),
            main_hand: ItemStack::air(),
            inventory: Vec::new(),
        }
    }

    pub fn with_permission(mut self, node: &str) -> Self {
        self.permissions.insert(node.to_string());
        self
    }

    /// Permission check with wildcard support: `skylands.itemsystem.give` is
    /// granted by the exact node, by `skylands.itemsystem.*`, by
    /// `skylands.*`, or by `*`.
    pub fn has_permission(&self, node: &str) -> bool {
        if self.permissions.contains("*") || self.permissions.contains(node) {
            return true;
        }
        let mut prefix = node;
        while let Some(idx) = prefix.rfind('.') {
            prefix = &prefix[..idx];
            if self.permissions.contains(&format!("{}.*", prefix)) {
                return true;
            }
        }
        false
    }
}

/// Notification that the host is about to tell `viewer`'s client to spawn an
/// entity. Packet listeners get the chance to cancel and substitute.
#[derive(Debug, Clone)]
pub struct SpawnNotification {
    pub viewer: String,
    pub packet: ServerPacket,
}

/// In-process host world the plugin reads and mutates.
#[derive(Debug, Default)]
pub struct World {
    next_entity_id: i32,
    entities: IndexMap<EntityId, WorldEntity>,
    players: IndexMap<String, Player>,
    outboxes: IndexMap<String, Vec<ServerPacket>>,
    chat: IndexMap<String, Vec<String>>,
    pending_spawns: Vec<SpawnNotification>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an armor stand at `location` and queue the host's default spawn
    /// packet toward every online player.
    pub fn spawn_armor_stand(&mut self, location: Location) -> EntityId {
        self.next_entity_id += 1;
        let id = EntityId(self.next_entity_id);
        let entity = WorldEntity {
            id,
            uuid: Uuid::new_v4(),
            location: location.clone(),
            custom_name: None,
            custom_name_visible: false,
            gravity: true,
            can_pickup_items: true,
            invulnerable: false,
            visible: true,
        };
        let packet = ServerPacket::SpawnLivingEntity {
            entity_id: id,
            entity_uuid: entity.uuid,
            location,
        };
        self.entities.insert(id, entity);
        for name in self.players.keys() {
            self.pending_spawns.push(SpawnNotification {
                viewer: name.clone(),
                packet: packet.clone(),
            });
        }
        id
    }

    pub fn remove_entity(&mut self, id: EntityId) -> Option<WorldEntity> {
        self.entities.shift_remove(&id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&WorldEntity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut WorldEntity> {
        self.entities.get_mut(&id)
    }

    pub fn teleport_entity(&mut self, id: EntityId, location: Location) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.location = location;
        }
    }

    /// Spawn notifications produced since the last drain. The plugin loop
    /// routes these through the npc spawn-packet listener.
    pub fn take_spawn_notifications(&mut self) -> Vec<SpawnNotification> {
        std::mem::take(&mut self.pending_spawns)
    }

    pub fn add_player(&mut self, player: Player) {
        let name = player.name.clone();
        self.outboxes.entry(name.clone()).or_default();
        self.chat.entry(name.clone()).or_default();
        self.players.insert(name, player);
    }

    pub fn remove_player(&mut self, name: &str) -> Option<Player> {
        self.outboxes.shift_remove(name);
        self.chat.shift_remove(name);
        self.players.shift_remove(name)
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.get(name)
    }

    pub fn player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.get_mut(name)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn online_names(&self) -> Vec<String> {
        self.players.keys().cloned().collect()
    }

    /// Queue a packet on one player's connection.
    pub fn send_packet(&mut self, player: &str, packet: ServerPacket) {
        if let Some(outbox) = self.outboxes.get_mut(player) {
            outbox.push(packet);
        }
    }

    /// Queue a packet on every online player's connection.
    pub fn broadcast_packet(&mut self, packet: ServerPacket) {
        for outbox in self.outboxes.values_mut() {
            outbox.push(packet.clone());
        }
    }

    pub fn outbox(&self, player: &str) -> &[ServerPacket] {
        self.outboxes.get(player).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn clear_outbox(&mut self, player: &str) {
        if let Some(outbox) = self.outboxes.get_mut(player) {
            outbox.clear();
        }
    }

    /// Deliver a chat message to one player.
    pub fn send_chat(&mut self, player: &str, message: String) {
        if let Some(chat) = self.chat.get_mut(player) {
            chat.push(message);
        }
    }

    pub fn chat_log(&self, player: &str) -> &[String] {
        self.chat.get(player).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Add a stack to a player's inventory.
    pub fn give_item(&mut self, player: &str, stack: ItemStack) {
        if let Some(p) = self.players.get_mut(player) {
            p.inventory.push(stack);
        }
    }
}
