//! Player-move reaction: nearby npcs turn to face the moving player.

use crate::host::world::World;
use crate::npcsystem::registry::NpcRegistry;

/// Radius within which an npc tracks a moving player.
pub const NPC_DISTANCE_LOOK_CLOSE: f64 = 6.0;

/// For every spawned npc in the player's world within the look-close radius,
/// queue face-the-player packets on that player's connection. Fire and
/// forget, one pair per npc, no batching.
pub fn on_player_move(world: &mut World, registry: &NpcRegistry, player_name: &str) {
    let Some(player) = world.player(player_name).cloned() else {
        return;
    };
    let mut packets = Vec::new();
    for npc in registry.npcs() {
        if npc.location().world != player.location.world {
            continue;
        }
        if npc.location().distance(&player.location) > NPC_DISTANCE_LOOK_CLOSE {
            continue;
        }
        if let Some(pair) = npc.face_player(&player) {
            packets.extend(pair);
        }
    }
    for packet in packets {
        world.send_packet(player_name, packet);
    }
}
