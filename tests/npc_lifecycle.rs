//! End-to-end npc catalog flows: spawn-on-create, the fake-player packet
//! sequence, mutation policies, and the restart round trip.

mod common;

use std::time::{Duration, Instant};

use tempfile::TempDir;

use common::{alice, enabled_plugin, run_command};
use skylands::host::event::{CommandSender, HostEvent};
use skylands::host::packet::ServerPacket;
use skylands::host::types::Location;
use skylands::host::world::Player;

#[tokio::test]
async fn guide1_scenario() {
    let dir = TempDir::new().unwrap();
    let mut plugin = enabled_plugin(&dir).await;

    run_command(
        &mut plugin,
        &alice(),
        "npc",
        &["create", "guide1", "quest_giver", "Guide"],
    )
    .await;

    // Immediately spawned and listed.
    let npc = plugin.npcs().registry().npc_from_id("guide1").expect("registered");
    assert!(npc.is_spawned());
    let body = npc.spawned_entities().unwrap().body;
    assert!(plugin.world().entity(body).is_some());

    run_command(&mut plugin, &alice(), "npc", &["delete", "guide1"]).await;
    assert!(plugin.npcs().registry().npc_from_id("guide1").is_none());
    assert!(plugin.world().entity(body).is_none());
}

#[tokio::test]
async fn spawn_packets_render_a_fake_player() {
    let dir = TempDir::new().unwrap();
    let mut plugin = enabled_plugin(&dir).await;
    plugin.world_mut().clear_outbox("alice");

    run_command(
        &mut plugin,
        &alice(),
        "npc",
        &["create", "guide1", "quest_giver", "Guide"],
    )
    .await;

    let outbox: Vec<ServerPacket> = plugin.world().outbox("alice").to_vec();
    // The body spawn is substituted with the add-then-spawn pair; the two
    // hologram stands pass through; team add is broadcast on create.
    assert!(outbox.iter().any(|p| matches!(p, ServerPacket::PlayerInfoAdd { .. })));
    assert!(outbox.iter().any(|p| matches!(p, ServerPacket::SpawnPlayer { .. })));
    assert_eq!(
        outbox.iter().filter(|p| matches!(p, ServerPacket::SpawnLivingEntity { .. })).count(),
        2
    );
    assert!(outbox.iter().any(|p| matches!(p, ServerPacket::TeamsAddEntities { .. })));
    let add_index = outbox
        .iter()
        .position(|p| matches!(p, ServerPacket::PlayerInfoAdd { .. }))
        .unwrap();
    let spawn_index = outbox
        .iter()
        .position(|p| matches!(p, ServerPacket::SpawnPlayer { .. }))
        .unwrap();
    assert!(add_index < spawn_index, "profile must precede the player spawn");

    // The tab-list cleanup runs after the follow-up delay.
    plugin.world_mut().clear_outbox("alice");
    plugin.process_follow_ups(Instant::now() + Duration::from_secs(2));
    let outbox: Vec<ServerPacket> = plugin.world().outbox("alice").to_vec();
    assert!(outbox.iter().any(|p| matches!(p, ServerPacket::PlayerInfoRemove { .. })));
    assert!(outbox.iter().any(|p| matches!(p, ServerPacket::EntityMetadata { .. })));
}

#[tokio::test]
async fn joining_player_receives_team_and_spawn_state() {
    let dir = TempDir::new().unwrap();
    let mut plugin = enabled_plugin(&dir).await;
    run_command(
        &mut plugin,
        &alice(),
        "npc",
        &["create", "guide1", "merchant", "Shopkeeper"],
    )
    .await;

    plugin
        .handle_event(HostEvent::PlayerJoin(Player::new(
            "bob",
            Location::new("hub", 1.0, 64.0, 1.0),
        )))
        .await
        .expect("join");
    let outbox = plugin.world().outbox("bob");
    assert!(outbox
        .iter()
        .any(|p| matches!(p, ServerPacket::TeamsCreate { entries, .. } if entries.len() == 1)));
}

#[tokio::test]
async fn nearby_movement_turns_the_npc() {
    let dir = TempDir::new().unwrap();
    let mut plugin = enabled_plugin(&dir).await;
    run_command(
        &mut plugin,
        &alice(),
        "npc",
        &["create", "guide1", "quest_giver", "Guide"],
    )
    .await;
    plugin.world_mut().clear_outbox("alice");

    plugin
        .handle_event(HostEvent::PlayerMove {
            name: "alice".to_string(),
            to: Location::new("hub", 2.0, 64.0, 2.0),
        })
        .await
        .expect("move");
    let outbox = plugin.world().outbox("alice");
    assert!(outbox.iter().any(|p| matches!(p, ServerPacket::EntityHeadLook { .. })));
    assert!(outbox.iter().any(|p| matches!(p, ServerPacket::EntityRotation { .. })));

    // Far away movement triggers nothing.
    plugin.world_mut().clear_outbox("alice");
    plugin
        .handle_event(HostEvent::PlayerMove {
            name: "alice".to_string(),
            to: Location::new("hub", 100.0, 64.0, 100.0),
        })
        .await
        .expect("move");
    assert!(plugin.world().outbox("alice").is_empty());
}

#[tokio::test]
async fn restart_respawns_persisted_npcs() {
    let dir = TempDir::new().unwrap();
    {
        let mut plugin = enabled_plugin(&dir).await;
        run_command(
            &mut plugin,
            &alice(),
            "npc",
            &["create", "guide1", "quest_giver", "Guide"],
        )
        .await;
        run_command(
            &mut plugin,
            &CommandSender::Console,
            "npc",
            &["set", "title", "guide1", "Mayor"],
        )
        .await;
        plugin.disable().await.expect("disable saves and despawns");
        assert!(!plugin
            .npcs()
            .registry()
            .npc_from_id("guide1")
            .unwrap()
            .is_spawned());
    }

    let plugin = enabled_plugin(&dir).await;
    let npc = plugin.npcs().registry().npc_from_id("guide1").expect("persisted");
    assert_eq!(npc.title(), "Mayor");
    assert!(npc.is_spawned());
    assert_eq!(npc.location(), &common::spawn_point());
}
