//! The manager for everything npc related.
//!
//! Binds the [`NpcRegistry`] to the relational store and to the host world:
//! rows load on the server-load event (spawning needs live worlds), creation
//! and deletion write through, and every mutation that changes the
//! client-visible representation (skin, name, title) removes and respawns
//! the host entities. Location changes teleport in place.

use std::str::FromStr;

use sqlx::Row;
use uuid::Uuid;

use crate::core::database::DatabaseManager;
use crate::core::error::SystemError;
use crate::host::packet::{CollisionRule, NameTagVisibility, ServerPacket, TeamInfo};
use crate::host::types::{EntityId, Location};
use crate::host::world::World;
use crate::npcsystem::npc::Npc;
use crate::npcsystem::registry::NpcRegistry;
use crate::npcsystem::types::NpcType;

pub struct NpcManager {
    registry: NpcRegistry,
    database: DatabaseManager,
    /// Scoreboard team suppressing npc name tags client-side. The name is
    /// random per process; clients only ever see this one team.
    team_info: TeamInfo,
}

impl NpcManager {
    /// Construct the manager and provision tables. Npcs are loaded later via
    /// [`NpcManager::load_npcs`], once the host reports its worlds ready.
    pub async fn new(database: DatabaseManager) -> Result<Self, SystemError> {
        let manager = Self {
            registry: NpcRegistry::new(),
            database,
            team_info: TeamInfo {
                name: Uuid::new_v4().to_string(),
                name_tag_visibility: NameTagVisibility::Never,
                collision_rule: CollisionRule::Never,
            },
        };
        manager.setup_tables().await?;
        Ok(manager)
    }

    /// Set up the required table for the npc data, if needed.
    async fn setup_tables(&self) -> Result<(), SystemError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS npc ( \
                 id VARCHAR(30) NOT NULL, \
                 npc_type VARCHAR(30) NOT NULL, \
                 npc_texture_value VARCHAR(1000) NOT NULL, \
                 npc_texture_signature VARCHAR(1000) NOT NULL, \
                 npc_name VARCHAR(30) NOT NULL, \
                 npc_title VARCHAR(16) NOT NULL, \
                 npc_world VARCHAR(30) NOT NULL, \
                 npc_x DOUBLE NOT NULL, \
                 npc_y DOUBLE NOT NULL, \
                 npc_z DOUBLE NOT NULL, \
                 npc_yaw FLOAT NOT NULL, \
                 npc_pitch FLOAT NOT NULL, \
                 PRIMARY KEY (id))",
        )
        .execute(self.database.pool())
        .await?;
        Ok(())
    }

    pub fn registry(&self) -> &NpcRegistry {
        &self.registry
    }

    pub fn team_info(&self) -> &TeamInfo {
        &self.team_info
    }

    /// Load all existing npcs into the registry and spawn them. Invoked on
    /// the host's server-load event.
    pub async fn load_npcs(&mut self, world: &mut World) -> Result<(), SystemError> {
        let rows = sqlx::query(
            "SELECT id, npc_type, npc_texture_value, npc_texture_signature, npc_name, \
             npc_title, npc_world, npc_x, npc_y, npc_z, npc_yaw, npc_pitch FROM npc",
        )
        .fetch_all(self.database.pool())
        .await?;

        for row in rows {
            let id: String = row.try_get("id")?;
            let npc_type = NpcType::from_str(&row.try_get::<String, _>("npc_type")?)?;
            let location = Location {
                world: row.try_get("npc_world")?,
                x: row.try_get("npc_x")?,
                y: row.try_get("npc_y")?,
                z: row.try_get("npc_z")?,
                yaw: row.try_get("npc_yaw")?,
                pitch: row.try_get("npc_pitch")?,
            };
            let mut npc = Npc::with_all(
                &id,
                npc_type,
                row.try_get::<String, _>("npc_texture_value")?,
                row.try_get::<String, _>("npc_texture_signature")?,
                row.try_get::<String, _>("npc_name")?,
                row.try_get::<String, _>("npc_title")?,
                location,
            );
            let body = npc.spawn(world);
            self.registry.register_npc(npc);
            self.registry.register_npc_entity(body, &id);
            self.broadcast_team_add(world, body);
        }
        log::info!("loaded {} npcs from storage", self.registry.len());
        Ok(())
    }

    /// Create an npc: insert the row with default skin and title, register,
    /// spawn, and broadcast the team registration.
    pub async fn create_npc(
        &mut self,
        id: &str,
        npc_type: NpcType,
        name: &str,
        location: Location,
        world: &mut World,
    ) -> Result<(), SystemError> {
        let mut npc = Npc::new(id, npc_type, name, location);
        sqlx::query(
            "INSERT INTO npc (id, npc_type, npc_texture_value, npc_texture_signature, npc_name, \
             npc_title, npc_world, npc_x, npc_y, npc_z, npc_yaw, npc_pitch) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(npc_type.as_str())
        .bind(npc.texture_value())
        .bind(npc.texture_signature())
        .bind(npc.name())
        .bind(npc.title())
        .bind(&npc.location().world)
        .bind(npc.location().x)
        .bind(npc.location().y)
        .bind(npc.location().z)
        .bind(npc.location().yaw)
        .bind(npc.location().pitch)
        .execute(self.database.pool())
        .await?;

        let body = npc.spawn(world);
        self.registry.register_npc(npc);
        self.registry.register_npc_entity(body, id);
        self.broadcast_team_add(world, body);
        Ok(())
    }

    /// Delete an npc: remove the row, despawn the host representation, and
    /// unregister it.
    pub async fn delete_npc(&mut self, id: &str, world: &mut World) -> Result<(), SystemError> {
        sqlx::query("DELETE FROM npc WHERE id = ?")
            .bind(id)
            .execute(self.database.pool())
            .await?;

        let npc = self
            .registry
            .npc_from_id_mut(id)
            .ok_or_else(|| unknown_npc(id))?;
        let removed = npc.remove(world);
        if let Some(body) = removed {
            self.registry.unregister_npc_entity(body);
        }
        self.registry.unregister_npc(id);
        Ok(())
    }

    /// Set the skin of an npc. The representation is rebuilt so the new
    /// textures apply.
    pub fn set_skin(
        &mut self,
        id: &str,
        texture_value: &str,
        texture_signature: &str,
        world: &mut World,
    ) -> Result<(), SystemError> {
        self.mutate_and_respawn(id, world, |npc| {
            npc.set_textures(texture_value, texture_signature)
        })
    }

    /// Set the name of an npc. The representation is rebuilt so the hologram
    /// reflects the new name.
    pub fn set_name(&mut self, id: &str, name: &str, world: &mut World) -> Result<(), SystemError> {
        self.mutate_and_respawn(id, world, |npc| npc.set_name(name))
    }

    /// Set the title of an npc. The representation is rebuilt so the
    /// hologram reflects the new title.
    pub fn set_title(&mut self, id: &str, title: &str, world: &mut World) -> Result<(), SystemError> {
        self.mutate_and_respawn(id, world, |npc| npc.set_title(title))
    }

    /// Move an npc. Spawned entities teleport in place; no respawn.
    pub fn set_location(
        &mut self,
        id: &str,
        location: Location,
        world: &mut World,
    ) -> Result<(), SystemError> {
        let npc = self
            .registry
            .npc_from_id_mut(id)
            .ok_or_else(|| unknown_npc(id))?;
        npc.set_location(world, location);
        Ok(())
    }

    /// Apply a visual mutation under the remove-then-respawn policy.
    fn mutate_and_respawn(
        &mut self,
        id: &str,
        world: &mut World,
        mutate: impl FnOnce(&mut Npc),
    ) -> Result<(), SystemError> {
        let npc = self
            .registry
            .npc_from_id_mut(id)
            .ok_or_else(|| unknown_npc(id))?;
        let old_body = npc.remove(world);
        mutate(npc);
        let body = npc.spawn(world);
        if let Some(old) = old_body {
            self.registry.unregister_npc_entity(old);
        }
        self.registry.register_npc_entity(body, id);
        self.broadcast_team_add(world, body);
        Ok(())
    }

    /// Save every registered npc back to the store. One UPDATE per npc, no
    /// dirty tracking.
    pub async fn save_npcs(&self) -> Result<(), SystemError> {
        for npc in self.registry.npcs() {
            self.save_npc(npc).await?;
        }
        log::debug!("saved {} npcs", self.registry.len());
        Ok(())
    }

    async fn save_npc(&self, npc: &Npc) -> Result<(), SystemError> {
        sqlx::query(
            "UPDATE npc SET npc_type = ?, npc_texture_value = ?, npc_texture_signature = ?, \
             npc_name = ?, npc_title = ?, npc_world = ?, npc_x = ?, npc_y = ?, npc_z = ?, \
             npc_yaw = ?, npc_pitch = ? WHERE id = ?",
        )
        .bind(npc.npc_type().as_str())
        .bind(npc.texture_value())
        .bind(npc.texture_signature())
        .bind(npc.name())
        .bind(npc.title())
        .bind(&npc.location().world)
        .bind(npc.location().x)
        .bind(npc.location().y)
        .bind(npc.location().z)
        .bind(npc.location().yaw)
        .bind(npc.location().pitch)
        .bind(npc.id())
        .execute(self.database.pool())
        .await?;
        Ok(())
    }

    /// Shut the npc system down: flush the registry to storage, then despawn
    /// every host representation.
    pub async fn disable(&mut self, world: &mut World) -> Result<(), SystemError> {
        self.save_npcs().await?;
        let mut removed = Vec::new();
        for npc in self.registry.npcs_mut() {
            if let Some(body) = npc.remove(world) {
                removed.push(body);
            }
        }
        for body in removed {
            self.registry.unregister_npc_entity(body);
        }
        Ok(())
    }

    /// Broadcast the add-entities team packet for one body entity so client
    /// name-tag suppression applies to it.
    fn broadcast_team_add(&self, world: &mut World, body: EntityId) {
        world.broadcast_packet(ServerPacket::TeamsAddEntities {
            team_name: self.team_info.name.clone(),
            entries: vec![body.to_string()],
        });
    }
}

fn unknown_npc(id: &str) -> SystemError {
    SystemError::UnknownId {
        kind: "npc",
        id: id.to_string(),
    }
}
