//! Menu flows through the plugin loop: opening from the command root,
//! paging, filter cycling, search, and entry clicks.

mod common;

use tempfile::TempDir;

use common::{alice, enabled_plugin, run_command};
use skylands::core::item_builder::StackBuilder;
use skylands::host::event::HostEvent;
use skylands::host::stack::Material;
use skylands::host::types::ClickType;
use skylands::menu;

async fn create_item(plugin: &mut skylands::plugin::Skylands, id: &str, name: &str, item_type: &str) {
    plugin.world_mut().player_mut("alice").unwrap().main_hand =
        StackBuilder::of(Material::IronSword).name(name).build();
    run_command(plugin, &alice(), "item", &["create", id, item_type, "common"]).await;
}

async fn click(plugin: &mut skylands::plugin::Skylands, slot: usize, click: ClickType) {
    plugin
        .handle_event(HostEvent::InventoryClick {
            player: "alice".to_string(),
            slot,
            click,
        })
        .await
        .expect("click");
}

#[tokio::test]
async fn bare_root_opens_the_items_menu() {
    let dir = TempDir::new().unwrap();
    let mut plugin = enabled_plugin(&dir).await;
    create_item(&mut plugin, "sword1", "Squire's Blade", "melee_weapon").await;

    run_command(&mut plugin, &alice(), "item", &[]).await;
    let view = plugin.open_menu_view("alice").expect("menu open");
    assert_eq!(view.title, "Items Menu");
    let entry = view.stack_at(menu::content_slot(0)).expect("entry");
    assert_eq!(entry.data_str("skylands:id"), Some("sword1"));
}

#[tokio::test]
async fn type_filter_cycles_and_rebuilds_the_menu() {
    let dir = TempDir::new().unwrap();
    let mut plugin = enabled_plugin(&dir).await;
    create_item(&mut plugin, "sword1", "Blade", "melee_weapon").await;
    create_item(&mut plugin, "bow1", "Longshot", "ranged_weapon").await;

    run_command(&mut plugin, &alice(), "item", &[]).await;

    // One left click on the type filter: Melee Weapon only.
    click(&mut plugin, menu::SLOT_TYPE, ClickType::Left).await;
    let view = plugin.open_menu_view("alice").expect("menu open");
    assert!(view.stack_at(menu::content_slot(0)).is_some());
    assert!(view.stack_at(menu::content_slot(1)).is_none());

    // A right click steps back to no filter: both entries again.
    click(&mut plugin, menu::SLOT_TYPE, ClickType::Right).await;
    let view = plugin.open_menu_view("alice").expect("menu open");
    assert!(view.stack_at(menu::content_slot(1)).is_some());
}

#[tokio::test]
async fn search_input_filters_entries() {
    let dir = TempDir::new().unwrap();
    let mut plugin = enabled_plugin(&dir).await;
    create_item(&mut plugin, "sword1", "Blade", "melee_weapon").await;
    create_item(&mut plugin, "bow1", "Longshot", "ranged_weapon").await;

    run_command(&mut plugin, &alice(), "item", &[]).await;
    plugin
        .handle_event(HostEvent::SearchInput {
            player: "alice".to_string(),
            text: "longshot".to_string(),
        })
        .await
        .expect("search");

    let view = plugin.open_menu_view("alice").expect("menu open");
    let entry = view.stack_at(menu::content_slot(0)).expect("entry");
    assert_eq!(entry.data_str("skylands:id"), Some("bow1"));
    assert!(view.stack_at(menu::content_slot(1)).is_none());
}

#[tokio::test]
async fn clicking_an_entry_gives_the_display_stack() {
    let dir = TempDir::new().unwrap();
    let mut plugin = enabled_plugin(&dir).await;
    create_item(&mut plugin, "sword1", "Blade", "melee_weapon").await;

    run_command(&mut plugin, &alice(), "item", &[]).await;
    click(&mut plugin, menu::content_slot(0), ClickType::Left).await;

    let inventory = &plugin.world().player("alice").unwrap().inventory;
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory[0].data_str("skylands:id"), Some("sword1"));
}

#[tokio::test]
async fn close_button_closes_the_menu() {
    let dir = TempDir::new().unwrap();
    let mut plugin = enabled_plugin(&dir).await;
    run_command(&mut plugin, &alice(), "item", &[]).await;
    assert!(plugin.open_menu_view("alice").is_some());

    click(&mut plugin, menu::SLOT_CLOSE, ClickType::Left).await;
    assert!(plugin.open_menu_view("alice").is_none());
}

#[tokio::test]
async fn npc_menu_lists_heads() {
    let dir = TempDir::new().unwrap();
    let mut plugin = enabled_plugin(&dir).await;
    run_command(
        &mut plugin,
        &alice(),
        "npc",
        &["create", "guide1", "quest_giver", "Guide"],
    )
    .await;

    run_command(&mut plugin, &alice(), "npc", &[]).await;
    let view = plugin.open_menu_view("alice").expect("menu open");
    assert_eq!(view.title, "Npcs Menu");
    let head = view.stack_at(menu::content_slot(0)).expect("entry");
    assert_eq!(head.material, Material::PlayerHead);
    assert_eq!(head.display_name.as_deref(), Some("Guide"));
}
