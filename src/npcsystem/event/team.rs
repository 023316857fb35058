//! Team registration on join: every player must know the npc team before
//! name-tag suppression applies to the fake players.

use crate::host::packet::{ServerPacket, TeamInfo};
use crate::npcsystem::registry::NpcRegistry;

/// The full team-create packet for a newly joined player, listing every
/// spawned npc body.
pub fn team_create_packet(registry: &NpcRegistry, team: &TeamInfo) -> ServerPacket {
    ServerPacket::TeamsCreate {
        team: team.clone(),
        entries: registry
            .entity_ids()
            .into_iter()
            .map(|id| id.to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::packet::{CollisionRule, NameTagVisibility};
    use crate::host::types::Location;
    use crate::host::world::World;
    use crate::npcsystem::npc::Npc;
    use crate::npcsystem::types::NpcType;

    #[test]
    fn create_packet_lists_all_bodies() {
        let mut world = World::new();
        let mut registry = NpcRegistry::new();
        for id in ["a", "b"] {
            let mut npc = Npc::new(id, NpcType::Merchant, "M", Location::new("hub", 0.0, 64.0, 0.0));
            let body = npc.spawn(&mut world);
            registry.register_npc(npc);
            registry.register_npc_entity(body, id);
        }
        let team = TeamInfo {
            name: "npc-team".to_string(),
            name_tag_visibility: NameTagVisibility::Never,
            collision_rule: CollisionRule::Never,
        };
        match team_create_packet(&registry, &team) {
            ServerPacket::TeamsCreate { entries, .. } => assert_eq!(entries.len(), 2),
            other => panic!("unexpected packet {:?}", other),
        }
    }
}
