//! End-to-end item catalog flows: command-driven creation, stat handling,
//! and the save → restart → load round trip.

mod common;

use tempfile::TempDir;

use common::{alice, enabled_plugin, run_command};
use skylands::core::item_builder::StackBuilder;
use skylands::host::stack::Material;
use skylands::itemsystem::{ItemStat, ItemType, Rarity};

fn hold_named(plugin: &mut skylands::plugin::Skylands, name: &str) {
    plugin.world_mut().player_mut("alice").unwrap().main_hand =
        StackBuilder::of(Material::IronSword).name(name).build();
}

#[tokio::test]
async fn sword1_scenario() {
    let dir = TempDir::new().unwrap();
    let mut plugin = enabled_plugin(&dir).await;
    hold_named(&mut plugin, "Squire's Blade");

    run_command(
        &mut plugin,
        &alice(),
        "item",
        &["create", "sword1", "melee_weapon", "common"],
    )
    .await;

    assert_eq!(plugin.items().registry().ids(), ["sword1"]);
    let item = plugin.items().registry().item_from_id("sword1").unwrap();
    assert_eq!(item.item_type(), ItemType::MeleeWeapon);
    assert_eq!(item.rarity(), Rarity::Common);

    let built = item.build_stack();
    assert!(built.lore.iter().any(|l| l.contains("Melee Weapon")));
    assert!(built.lore.iter().any(|l| l.contains("Common")));
}

#[tokio::test]
async fn save_restart_load_preserves_ids_and_stats() {
    let dir = TempDir::new().unwrap();
    {
        let mut plugin = enabled_plugin(&dir).await;
        hold_named(&mut plugin, "Squire's Blade");
        run_command(
            &mut plugin,
            &alice(),
            "item",
            &["create", "sword1", "melee_weapon", "epic"],
        )
        .await;
        hold_named(&mut plugin, "Longshot");
        run_command(
            &mut plugin,
            &alice(),
            "item",
            &["create", "bow1", "ranged_weapon", "rare"],
        )
        .await;

        run_command(
            &mut plugin,
            &alice(),
            "item",
            &["set", "stat", "sword1", "attack_damage", "12.5"],
        )
        .await;
        // Zero-valued stats are indistinguishable from absent ones.
        run_command(
            &mut plugin,
            &alice(),
            "item",
            &["set", "stat", "sword1", "mana", "0"],
        )
        .await;
        run_command(&mut plugin, &alice(), "item", &["set", "rarity", "bow1", "mythic"]).await;

        plugin.disable().await.expect("disable saves");
    }

    let plugin = enabled_plugin(&dir).await;
    assert_eq!(plugin.items().registry().ids(), ["sword1", "bow1"]);

    let sword = plugin.items().registry().item_from_id("sword1").unwrap();
    assert_eq!(sword.stat(ItemStat::AttackDamage), Some(12.5));
    assert!(!sword.has_stat(ItemStat::Mana));
    assert_eq!(sword.rarity(), Rarity::Epic);

    let bow = plugin.items().registry().item_from_id("bow1").unwrap();
    assert_eq!(bow.rarity(), Rarity::Mythic);
}

#[tokio::test]
async fn zeroing_a_stat_removes_it_across_restarts() {
    let dir = TempDir::new().unwrap();
    {
        let mut plugin = enabled_plugin(&dir).await;
        hold_named(&mut plugin, "Edge");
        run_command(
            &mut plugin,
            &alice(),
            "item",
            &["create", "sword1", "melee_weapon", "common"],
        )
        .await;
        run_command(
            &mut plugin,
            &alice(),
            "item",
            &["set", "stat", "sword1", "defense", "4"],
        )
        .await;
        run_command(
            &mut plugin,
            &alice(),
            "item",
            &["set", "stat", "sword1", "defense", "0"],
        )
        .await;
        plugin.disable().await.expect("disable");
    }

    let plugin = enabled_plugin(&dir).await;
    let sword = plugin.items().registry().item_from_id("sword1").unwrap();
    assert!(!sword.has_stat(ItemStat::Defense));
}

#[tokio::test]
async fn delete_removes_item_and_its_validity() {
    let dir = TempDir::new().unwrap();
    let mut plugin = enabled_plugin(&dir).await;
    hold_named(&mut plugin, "Edge");
    run_command(
        &mut plugin,
        &alice(),
        "item",
        &["create", "sword1", "melee_weapon", "common"],
    )
    .await;
    assert!(plugin.items().registry().is_id_valid("sword1"));

    run_command(&mut plugin, &alice(), "item", &["delete", "sword1"]).await;
    assert!(!plugin.items().registry().is_id_valid("sword1"));

    // Feedback reached the sender.
    let chat = plugin.world().chat_log("alice");
    assert!(chat.iter().any(|m| m.contains("Successfully deleted the item sword1")));
}

#[tokio::test]
async fn give_places_built_stack_in_inventory() {
    let dir = TempDir::new().unwrap();
    let mut plugin = enabled_plugin(&dir).await;
    hold_named(&mut plugin, "Edge");
    run_command(
        &mut plugin,
        &alice(),
        "item",
        &["create", "sword1", "melee_weapon", "legendary"],
    )
    .await;

    run_command(&mut plugin, &alice(), "item", &["give", "sword1"]).await;
    let inventory = &plugin.world().player("alice").unwrap().inventory;
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory[0].data_str("skylands:id"), Some("sword1"));
    assert_eq!(inventory[0].data_str("skylands:rarity"), Some("LEGENDARY"));
}
