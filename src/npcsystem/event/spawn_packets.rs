//! Spawn-packet substitution: the fake-player illusion.
//!
//! When the host notifies a client about a freshly spawned npc body (an
//! armor stand), the default packet is cancelled and replaced with an
//! add-player-info packet followed by a spawn-player packet, so the client
//! renders a full player model with the npc's skin. A delayed follow-up
//! removes the profile from the tab list again (the skin stays applied once
//! the model is rendered), enables all skin layers, and adds the body to the
//! name-tag suppression team. The add → spawn → remove ordering is what
//! keeps the skin applied without polluting the tab list.

use std::time::Duration;

use crate::host::packet::{ServerPacket, TeamInfo, SKIN_SECTIONS_ALL};
use crate::host::types::EntityId;
use crate::npcsystem::registry::NpcRegistry;

/// Delay before the tab-list cleanup follow-up runs. The client needs the
/// profile present while it renders the model.
pub const FOLLOW_UP_DELAY: Duration = Duration::from_secs(1);

/// Deferred cleanup for one viewer and one npc body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUp {
    pub viewer: String,
    pub entity_id: EntityId,
}

/// Decision for one outbound spawn notification.
#[derive(Debug)]
pub enum PacketDecision {
    /// Not an npc body: deliver the original packet unchanged.
    PassThrough,
    /// Cancel the original packet and send these instead; the follow-up is
    /// due after [`FOLLOW_UP_DELAY`].
    Substitute {
        packets: Vec<ServerPacket>,
        follow_up: FollowUp,
    },
}

/// Inspect a spawn notification headed for `viewer`.
pub fn on_spawn_packet(
    registry: &NpcRegistry,
    viewer: &str,
    packet: &ServerPacket,
) -> PacketDecision {
    let ServerPacket::SpawnLivingEntity {
        entity_id,
        entity_uuid,
        location,
    } = packet
    else {
        return PacketDecision::PassThrough;
    };
    let Some(npc) = registry.npc_from_entity(*entity_id) else {
        return PacketDecision::PassThrough;
    };
    let Some(profile) = npc.player_profile() else {
        return PacketDecision::PassThrough;
    };

    PacketDecision::Substitute {
        packets: vec![
            ServerPacket::PlayerInfoAdd { profile },
            ServerPacket::SpawnPlayer {
                entity_id: *entity_id,
                entity_uuid: *entity_uuid,
                location: location.clone(),
            },
        ],
        follow_up: FollowUp {
            viewer: viewer.to_string(),
            entity_id: *entity_id,
        },
    }
}

/// Packets for the deferred cleanup: tab-list removal, skin layers, and team
/// membership. Returns nothing if the npc despawned in the meantime.
pub fn follow_up_packets(
    registry: &NpcRegistry,
    team: &TeamInfo,
    entity_id: EntityId,
) -> Vec<ServerPacket> {
    let Some(npc) = registry.npc_from_entity(entity_id) else {
        return Vec::new();
    };
    let Some(profile) = npc.player_profile() else {
        return Vec::new();
    };
    vec![
        ServerPacket::PlayerInfoRemove {
            profile_uuid: profile.uuid,
        },
        ServerPacket::EntityMetadata {
            entity_id,
            skin_sections: SKIN_SECTIONS_ALL,
        },
        ServerPacket::TeamsAddEntities {
            team_name: team.name.clone(),
            entries: vec![entity_id.to_string()],
        },
    ]
}
