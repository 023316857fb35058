//! Outbound packets the plugin hands to player connections.
//!
//! Only the packets the npc illusion needs are modeled: tab-list player info,
//! player/entity spawning, metadata, head rotation, and scoreboard teams.

use uuid::Uuid;

use crate::host::types::{EntityId, Location};

/// A skin texture pair attached to a fake-player profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureProperty {
    pub value: String,
    pub signature: String,
}

/// Tab-list profile the client needs before it will render a player model.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProfile {
    pub uuid: Uuid,
    /// Profile name; npc profiles use the entity id's decimal form.
    pub name: String,
    pub textures: Option<TextureProperty>,
}

/// Name tag visibility rule carried by a team packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameTagVisibility {
    Always,
    Never,
}

/// Collision rule carried by a team packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionRule {
    Always,
    Never,
}

/// Scoreboard team parameters for the npc name-tag suppression team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamInfo {
    pub name: String,
    pub name_tag_visibility: NameTagVisibility,
    pub collision_rule: CollisionRule,
}

/// Server-to-client packets the plugin emits or intercepts.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerPacket {
    /// The host's default spawn notification for a non-player entity. The
    /// spawn listener cancels this for npc bodies.
    SpawnLivingEntity {
        entity_id: EntityId,
        entity_uuid: Uuid,
        location: Location,
    },
    /// Add a profile to the client tab list.
    PlayerInfoAdd { profile: PlayerProfile },
    /// Remove a profile from the client tab list (skin stays applied).
    PlayerInfoRemove { profile_uuid: Uuid },
    /// Render a player model for an already-listed profile.
    SpawnPlayer {
        entity_id: EntityId,
        entity_uuid: Uuid,
        location: Location,
    },
    /// Entity metadata update; `skin_sections` enables all skin layers.
    EntityMetadata {
        entity_id: EntityId,
        skin_sections: u8,
    },
    /// Head yaw update, packed protocol angle.
    EntityHeadLook { entity_id: EntityId, yaw: i8 },
    /// Body rotation update, packed protocol angles.
    EntityRotation {
        entity_id: EntityId,
        yaw: i8,
        pitch: i8,
        on_ground: bool,
    },
    /// Create the npc team with its current member entries.
    TeamsCreate {
        team: TeamInfo,
        entries: Vec<String>,
    },
    /// Add entries to an existing team.
    TeamsAddEntities {
        team_name: String,
        entries: Vec<String>,
    },
}

/// All skin sections enabled (cape through hat).
pub const SKIN_SECTIONS_ALL: u8 = 0x7f;
