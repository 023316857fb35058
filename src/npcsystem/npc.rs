//! The base npc with all common fields and methods.
//!
//! The heart and the core of the entire NpcSystem. An npc is anchored by an
//! armor-stand body plus two hologram stands for its name and title; the
//! fake-player illusion is layered on top by the spawn-packet listener.

use uuid::Uuid;

use crate::host::packet::{PlayerProfile, ServerPacket, TextureProperty};
use crate::host::types::{angle_byte, EntityId, Location};
use crate::host::world::{Player, World};
use crate::npcsystem::types::NpcType;

/// Default skin applied to newly created npcs.
pub const DEFAULT_TEXTURE_VALUE: &str = "eyJ0aW1lc3RhbXAiOjE1NjgzNDg5MDEwNjMsInByb2ZpbGVJZCI6ImMxYWYxODI5MDYwZTQ0OGRhNjYwOWRmZGM2OGEzOWE4IiwicHJvZmlsZU5hbWUiOiJCQVJLeDQiLCJzaWduYXR1cmVSZXF1aXJlZCI6dHJ1ZSwidGV4dHVyZXMiOnsiU0tJTiI6eyJ1cmwiOiJodHRwOi8vdGV4dHVyZXMubWluZWNyYWZ0Lm5ldC90ZXh0dXJlLzhhNzMyODFiNDQyMjBlYTI5ZGE3OTBkNDE4ZjY4YWVmMzE2OGQwYzkzYjhhZGFkZjg0NTFlNTk5NzUxMjJlN2YifX19";
pub const DEFAULT_TEXTURE_SIGNATURE: &str = "xdcaPiVlhJJkCshslagshClk3EX/sC52TQGB0yQ2xYdta7ARKuxtnUrx3vQ/IcAy10VCU8gqXkc01RIU01SyszMatkcobuVBIy0f5XLkQmJQ0W5xiOjIciLDJPBdcOkLyu9j9szrrawLPZ3rL9AuIqm5RxjUrh7iARpABUDPZeEkJ6G5b+lLw9HS5va54AERRFKyu5FPtfZU+hQkXFzLx+opmBfRq+ks1eJwPqzx3TJ7CSOCXPxZpk3BZqTfftybB9bsV8Kxgj3itEevpis94Myd/fEdUz2lHKhshXoFH9XObS00Ci60H2V99npU0ck/YtQ3kZGIC4ItWwRKJhpg6w2Sta6eC3XoMByor0kyKp2rQfa9jIc3E4sMWYl+EkXxNJQQR6+y0CBd1TUGYpBkrWlDz/hWN0FskqrGUMTPtvu9DKqbnXKa6fqgKzfrFsbyQXW3e7wIlug+Gkyg1OZRQJpZ+xJzhstt9Sr12LzM+Iglq/pI6qwjR+FICsGdUPVSk3E92/Vr4T/J748dE4t0p6pDC+OzkCaEFWGwY0w3YnDZ0FcB6JNL4E3Zteukj7GAjC2P6uyYbO6It9iBLoHTqLuX/mk11xtas5MeOurSYFJ6XA9DULSF9vpEryefUkjR/Z1c1iAhpD/KW7nlwbfVFJBkTdzMBDw7wobf1KtjgkU=";

/// Default title shown under a newly created npc's name.
pub const DEFAULT_TITLE: &str = "Npc";

/// Vertical offsets of the hologram stands relative to the body.
const TITLE_OFFSET_Y: f64 = -0.2;
const NAME_OFFSET_Y: f64 = 0.1;

/// Host-side entity ids of a spawned npc. Present iff the npc is fully
/// spawned; there is no partially spawned resting state.
#[derive(Debug, Clone, Copy)]
pub struct SpawnedEntities {
    pub body: EntityId,
    pub name_stand: EntityId,
    pub title_stand: EntityId,
    /// Profile uuid the fake-player packets are keyed by.
    pub profile_uuid: Uuid,
}

#[derive(Debug)]
pub struct Npc {
    /// The unique id of the npc. Immutable after creation.
    id: String,
    /// The type of the npc. Immutable after creation.
    npc_type: NpcType,
    texture_value: String,
    texture_signature: String,
    name: String,
    title: String,
    location: Location,
    spawned: Option<SpawnedEntities>,
}

impl Npc {
    /// Construct a new npc with the default skin and title.
    pub fn new(id: impl Into<String>, npc_type: NpcType, name: impl Into<String>, location: Location) -> Self {
        Self::with_all(
            id,
            npc_type,
            DEFAULT_TEXTURE_VALUE,
            DEFAULT_TEXTURE_SIGNATURE,
            name,
            DEFAULT_TITLE,
            location,
        )
    }

    /// Construct an npc from fully persisted state.
    #[allow(clippy::too_many_arguments)]
    pub fn with_all(
        id: impl Into<String>,
        npc_type: NpcType,
        texture_value: impl Into<String>,
        texture_signature: impl Into<String>,
        name: impl Into<String>,
        title: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            id: id.into(),
            npc_type,
            texture_value: texture_value.into(),
            texture_signature: texture_signature.into(),
            name: name.into(),
            title: title.into(),
            location,
            spawned: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn npc_type(&self) -> NpcType {
        self.npc_type
    }

    pub fn texture_value(&self) -> &str {
        &self.texture_value
    }

    pub fn texture_signature(&self) -> &str {
        &self.texture_signature
    }

    /// Set the skin pair. Callers respawn afterwards; the profile is built
    /// from these values at spawn time.
    pub fn set_textures(&mut self, value: impl Into<String>, signature: impl Into<String>) {
        self.texture_value = value.into();
        self.texture_signature = signature.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn is_spawned(&self) -> bool {
        self.spawned.is_some()
    }

    pub fn spawned_entities(&self) -> Option<SpawnedEntities> {
        self.spawned
    }

    /// Spawn the armor-stand trio representing the npc. Returns the body
    /// entity id for reverse-index registration.
    pub fn spawn(&mut self, world: &mut World) -> EntityId {
        let body = world.spawn_armor_stand(self.location.clone());
        let profile_uuid = {
            let entity = world.entity_mut(body).expect("just spawned");
            entity.gravity = false;
            entity.can_pickup_items = false;
            entity.custom_name_visible = false;
            entity.uuid
        };

        let title_stand = world.spawn_armor_stand(self.location.offset_y(TITLE_OFFSET_Y));
        if let Some(entity) = world.entity_mut(title_stand) {
            entity.gravity = false;
            entity.can_pickup_items = false;
            entity.invulnerable = true;
            entity.visible = false;
            entity.custom_name_visible = true;
            entity.custom_name = Some(self.title.clone());
        }

        let name_stand = world.spawn_armor_stand(self.location.offset_y(NAME_OFFSET_Y));
        if let Some(entity) = world.entity_mut(name_stand) {
            entity.gravity = false;
            entity.can_pickup_items = false;
            entity.invulnerable = true;
            entity.visible = false;
            entity.custom_name_visible = true;
            entity.custom_name = Some(self.name.clone());
        }

        self.spawned = Some(SpawnedEntities {
            body,
            name_stand,
            title_stand,
            profile_uuid,
        });
        body
    }

    /// Remove the spawned representation. Returns the body id that was
    /// despawned, if the npc was spawned at all.
    pub fn remove(&mut self, world: &mut World) -> Option<EntityId> {
        let entities = self.spawned.take()?;
        world.remove_entity(entities.body);
        world.remove_entity(entities.name_stand);
        world.remove_entity(entities.title_stand);
        Some(entities.body)
    }

    /// Teleport the spawned representation along with the location field.
    pub fn set_location(&mut self, world: &mut World, location: Location) {
        if let Some(entities) = self.spawned {
            world.teleport_entity(entities.body, location.clone());
            world.teleport_entity(entities.title_stand, location.offset_y(TITLE_OFFSET_Y));
            world.teleport_entity(entities.name_stand, location.offset_y(NAME_OFFSET_Y));
        }
        self.location = location;
    }

    /// The fake-player profile the spawn-packet listener advertises.
    /// Available only while spawned: the profile is keyed by the body uuid.
    pub fn player_profile(&self) -> Option<PlayerProfile> {
        let entities = self.spawned?;
        Some(PlayerProfile {
            uuid: entities.profile_uuid,
            name: entities.body.to_string(),
            textures: Some(TextureProperty {
                value: self.texture_value.clone(),
                signature: self.texture_signature.clone(),
            }),
        })
    }

    /// Head-look and rotation packets that turn the npc toward a player.
    pub fn face_player(&self, player: &Player) -> Option<[ServerPacket; 2]> {
        let entities = self.spawned?;
        let (yaw, pitch) = self.location.angles_toward(&player.location);
        let yaw = angle_byte(yaw);
        let pitch = angle_byte(pitch);
        Some([
            ServerPacket::EntityHeadLook {
                entity_id: entities.body,
                yaw,
            },
            ServerPacket::EntityRotation {
                entity_id: entities.body,
                yaw,
                pitch,
                on_ground: true,
            },
        ])
    }
}
