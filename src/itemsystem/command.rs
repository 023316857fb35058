//! A command for everything item related.
//!
//! Makes the [`ItemManager`] operations accessible to users: parses chat
//! arguments, re-validates the domain constraints the parser cannot express
//! (id uniqueness and length, "id must exist", "sender must hold a named,
//! non-air stack"), then delegates to exactly one manager call.

use std::str::FromStr;

use crate::command::{
    has_permission, id_suggestions, no_permission, players_only, CommandAction, CommandResponse,
    ROOT_ITEMSYSTEM,
};
use crate::core::error::SystemError;
use crate::core::item_builder::StackBuilder;
use crate::host::event::CommandSender;
use crate::host::stack::ItemStack;
use crate::host::world::World;
use crate::itemsystem::manager::ItemManager;
use crate::itemsystem::types::{ItemStat, ItemType, Rarity};

/// Root aliases routed to this command.
pub const ALIASES: [&str; 3] = ["item", "items", "itemsystem"];

/// Maximum item id length.
const MAX_ID_LEN: usize = 30;

pub struct ItemCommand;

impl ItemCommand {
    /// Handle one invocation of the item root command.
    pub async fn handle(
        manager: &mut ItemManager,
        world: &mut World,
        sender: &CommandSender,
        args: &[String],
    ) -> Result<CommandResponse, SystemError> {
        match args.first().map(String::as_str) {
            None => Ok(Self::open_menu(world, sender, &[])),
            Some("open") => {
                if !has_permission(world, sender, &format!("{}.open", ROOT_ITEMSYSTEM)) {
                    return Ok(no_permission());
                }
                Ok(Self::open_menu(world, sender, &args[1..]))
            }
            Some("give") => {
                if !has_permission(world, sender, &format!("{}.give", ROOT_ITEMSYSTEM)) {
                    return Ok(no_permission());
                }
                Ok(Self::give(manager, world, sender, &args[1..]))
            }
            Some("create") => {
                if !has_permission(world, sender, &format!("{}.create", ROOT_ITEMSYSTEM)) {
                    return Ok(no_permission());
                }
                Self::create(manager, world, sender, &args[1..]).await
            }
            Some("modify") => {
                Self::modify(world, sender, &args[1..])
            }
            Some("get") => {
                if args.get(1).map(String::as_str) != Some("itemstack") {
                    return Ok(usage());
                }
                if !has_permission(world, sender, &format!("{}.get.itemstack", ROOT_ITEMSYSTEM)) {
                    return Ok(no_permission());
                }
                Ok(Self::get_stack(manager, world, sender, &args[2..]))
            }
            Some("set") => Self::set(manager, world, sender, &args[1..]).await,
            Some("delete") => {
                if !has_permission(world, sender, &format!("{}.delete", ROOT_ITEMSYSTEM)) {
                    return Ok(no_permission());
                }
                Self::delete(manager, &args[1..]).await
            }
            Some(_) => Ok(usage()),
        }
    }

    /// Item id suggestions for tab completion.
    pub fn suggestions(manager: &ItemManager, input: &str) -> Vec<String> {
        id_suggestions(manager.registry().ids(), input)
    }

    fn open_menu(world: &World, sender: &CommandSender, args: &[String]) -> CommandResponse {
        let CommandSender::Player(player) = sender else {
            return players_only();
        };
        match args.first() {
            Some(target) => {
                if world.player(target).is_none() {
                    return CommandResponse::message("There is no online player with such a name.");
                }
                CommandResponse::message(format!("Opened the items menu for {}", target))
                    .with_action(CommandAction::OpenItemMenu {
                        viewer: target.clone(),
                    })
            }
            None => CommandResponse::none().with_action(CommandAction::OpenItemMenu {
                viewer: player.clone(),
            }),
        }
    }

    fn give(
        manager: &ItemManager,
        world: &mut World,
        sender: &CommandSender,
        args: &[String],
    ) -> CommandResponse {
        let Some(id) = args.first() else {
            return usage();
        };
        if !manager.registry().is_id_valid(id) {
            return CommandResponse::message("There is no existing item with such an id.");
        }
        let target = match args.get(1) {
            Some(target) => {
                if world.player(target).is_none() {
                    return CommandResponse::message("There is no online player with such a name.");
                }
                target.clone()
            }
            None => match sender {
                CommandSender::Player(name) => name.clone(),
                CommandSender::Console => return players_only(),
            },
        };
        let Some(item) = manager.registry().item_from_id(id) else {
            return CommandResponse::message("There is no existing item with such an id.");
        };
        let stack = item.build_stack();
        world.give_item(&target, stack);
        if target != sender.name() {
            CommandResponse::message(format!("Gave the build itemstack of {} to {}", id, target))
        } else {
            CommandResponse::none()
        }
    }

    async fn create(
        manager: &mut ItemManager,
        world: &World,
        sender: &CommandSender,
        args: &[String],
    ) -> Result<CommandResponse, SystemError> {
        let (Some(id), Some(type_arg), Some(rarity_arg)) = (args.first(), args.get(1), args.get(2))
        else {
            return Ok(usage());
        };
        let Ok(item_type) = ItemType::from_str(type_arg) else {
            return Ok(CommandResponse::message(format!("Unknown item type {}.", type_arg)));
        };
        let Ok(rarity) = Rarity::from_str(rarity_arg) else {
            return Ok(CommandResponse::message(format!("Unknown rarity {}.", rarity_arg)));
        };
        let stack = match held_named_stack(world, sender) {
            Ok(stack) => stack,
            Err(response) => return Ok(response),
        };
        if manager.registry().is_id_valid(id) {
            return Ok(CommandResponse::message(
                "There is already an existing item with such an id.",
            ));
        }
        if id.len() > MAX_ID_LEN {
            return Ok(CommandResponse::message(
                "The id of an item may not be longer than 30 characters.",
            ));
        }
        manager.create_item(id, item_type, rarity, stack).await?;
        Ok(CommandResponse::message(format!("Successfully created the item {}", id)))
    }

    fn modify(
        world: &mut World,
        sender: &CommandSender,
        args: &[String],
    ) -> Result<CommandResponse, SystemError> {
        let CommandSender::Player(player) = sender else {
            return Ok(players_only());
        };
        match args.first().map(String::as_str) {
            Some("name") => {
                if !has_permission(world, sender, &format!("{}.modify.name", ROOT_ITEMSYSTEM)) {
                    return Ok(no_permission());
                }
                let name = args[1..].join(" ");
                if name.is_empty() {
                    return Ok(usage());
                }
                let held = world.player(player).map(|p| p.main_hand.clone()).unwrap_or_else(ItemStack::air);
                if held.is_air() {
                    return Ok(CommandResponse::message(
                        "Hold the to be modified itemstack in your hand.",
                    ));
                }
                let rebuilt = StackBuilder::from(held).name(name.as_str()).build();
                if let Some(p) = world.player_mut(player) {
                    p.main_hand = rebuilt;
                }
                Ok(CommandResponse::message(format!("Set the name to {}", name)))
            }
            Some("addlore") => {
                if !has_permission(world, sender, &format!("{}.modify.addlore", ROOT_ITEMSYSTEM)) {
                    return Ok(no_permission());
                }
                let text = args[1..].join(" ");
                if text.is_empty() {
                    return Ok(usage());
                }
                let held = world.player(player).map(|p| p.main_hand.clone()).unwrap_or_else(ItemStack::air);
                if held.is_air() {
                    return Ok(CommandResponse::message(
                        "Hold the to be modified itemstack in your hand.",
                    ));
                }
                let rebuilt = StackBuilder::from(held).lore_line(text.as_str()).build();
                if let Some(p) = world.player_mut(player) {
                    p.main_hand = rebuilt;
                }
                Ok(CommandResponse::message(format!("Added the line {}", text)))
            }
            Some("removelore") => {
                if !has_permission(world, sender, &format!("{}.modify.removelore", ROOT_ITEMSYSTEM)) {
                    return Ok(no_permission());
                }
                let Some(Ok(index)) = args.get(1).map(|a| a.parse::<usize>()) else {
                    return Ok(usage());
                };
                let held = world.player(player).map(|p| p.main_hand.clone()).unwrap_or_else(ItemStack::air);
                if held.is_air() {
                    return Ok(CommandResponse::message(
                        "Hold the to be modified itemstack in your hand.",
                    ));
                }
                if index >= held.lore.len() {
                    return Ok(CommandResponse::message(format!(
                        "There is no existing line at index {}",
                        index
                    )));
                }
                let mut rebuilt = held;
                rebuilt.lore.remove(index);
                if let Some(p) = world.player_mut(player) {
                    p.main_hand = rebuilt;
                }
                Ok(CommandResponse::message(format!("Removed the line at index {}", index)))
            }
            _ => Ok(usage()),
        }
    }

    fn get_stack(
        manager: &ItemManager,
        world: &mut World,
        sender: &CommandSender,
        args: &[String],
    ) -> CommandResponse {
        let CommandSender::Player(player) = sender else {
            return players_only();
        };
        let Some(id) = args.first() else {
            return usage();
        };
        match manager.registry().item_from_id(id) {
            Some(item) => {
                let stack = item.stack();
                world.give_item(player, stack);
                CommandResponse::message(format!("You were given the internal itemstack of {}", id))
            }
            None => CommandResponse::message("There is no existing item with such an id."),
        }
    }

    async fn set(
        manager: &mut ItemManager,
        world: &World,
        sender: &CommandSender,
        args: &[String],
    ) -> Result<CommandResponse, SystemError> {
        match args.first().map(String::as_str) {
            Some("rarity") => {
                if !has_permission(world, sender, &format!("{}.set.rarity", ROOT_ITEMSYSTEM)) {
                    return Ok(no_permission());
                }
                let (Some(id), Some(rarity_arg)) = (args.get(1), args.get(2)) else {
                    return Ok(usage());
                };
                let Ok(rarity) = Rarity::from_str(rarity_arg) else {
                    return Ok(CommandResponse::message(format!("Unknown rarity {}.", rarity_arg)));
                };
                if !manager.registry().is_id_valid(id) {
                    return Ok(CommandResponse::message("There is no existing item with such an id."));
                }
                manager.set_rarity(id, rarity)?;
                Ok(CommandResponse::message(format!("Set the rarity of {}", id)))
            }
            Some("itemstack") => {
                if !has_permission(world, sender, &format!("{}.set.itemstack", ROOT_ITEMSYSTEM)) {
                    return Ok(no_permission());
                }
                let Some(id) = args.get(1) else {
                    return Ok(usage());
                };
                let stack = match held_named_stack(world, sender) {
                    Ok(stack) => stack,
                    Err(response) => return Ok(response),
                };
                if !manager.registry().is_id_valid(id) {
                    return Ok(CommandResponse::message("There is no existing item with such an id."));
                }
                manager.set_stack(id, stack)?;
                Ok(CommandResponse::message(format!("Set the internal itemstack of {}", id)))
            }
            Some("stat") => {
                if !has_permission(world, sender, &format!("{}.set.stat", ROOT_ITEMSYSTEM)) {
                    return Ok(no_permission());
                }
                let (Some(id), Some(stat_arg), Some(value_arg)) =
                    (args.get(1), args.get(2), args.get(3))
                else {
                    return Ok(usage());
                };
                let Ok(stat) = ItemStat::from_str(stat_arg) else {
                    return Ok(CommandResponse::message(format!("Unknown item stat {}.", stat_arg)));
                };
                let Ok(value) = value_arg.parse::<f64>() else {
                    return Ok(CommandResponse::message(format!("Invalid stat value {}.", value_arg)));
                };
                if !manager.registry().is_id_valid(id) {
                    return Ok(CommandResponse::message("There is no existing item with such an id."));
                }
                manager.set_stat(id, stat, value).await?;
                Ok(CommandResponse::message(format!(
                    "Set the stat {} of {} to {}",
                    stat.name(),
                    id,
                    value
                )))
            }
            _ => Ok(usage()),
        }
    }

    async fn delete(manager: &mut ItemManager, args: &[String]) -> Result<CommandResponse, SystemError> {
        let Some(id) = args.first() else {
            return Ok(usage());
        };
        if !manager.registry().is_id_valid(id) {
            return Ok(CommandResponse::message("There is no existing item with such an id."));
        }
        manager.delete_item(id).await?;
        Ok(CommandResponse::message(format!("Successfully deleted the item {}", id)))
    }
}

/// The stack the sender holds, required to be non-air with a display name.
fn held_named_stack(world: &World, sender: &CommandSender) -> Result<ItemStack, CommandResponse> {
    let CommandSender::Player(player) = sender else {
        return Err(players_only());
    };
    let held = world
        .player(player)
        .map(|p| p.main_hand.clone())
        .unwrap_or_else(ItemStack::air);
    if held.is_air() {
        return Err(CommandResponse::message(
            "Hold an itemstack for the item in your hand.",
        ));
    }
    if !held.has_display_name() {
        return Err(CommandResponse::message(
            "The itemstack may need to have a display name.",
        ));
    }
    Ok(held)
}

fn usage() -> CommandResponse {
    CommandResponse::message(
        "Usage: /item [open|give|create|modify|get itemstack|set|delete]",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::DatabaseManager;
    use crate::host::stack::Material;
    use crate::host::types::Location;
    use crate::host::world::Player;
    use tempfile::TempDir;

    async fn setup(dir: &TempDir) -> (ItemManager, World) {
        let database = DatabaseManager::open(dir.path()).await.expect("database");
        let manager = ItemManager::new(database).await.expect("manager");
        let mut world = World::new();
        world.add_player(
            Player::new("alice", Location::new("hub", 0.0, 64.0, 0.0)).with_permission("skylands.*"),
        );
        (manager, world)
    }

    fn hold(world: &mut World, player: &str, stack: ItemStack) {
        world.player_mut(player).unwrap().main_hand = stack;
    }

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn create_requires_named_stack_in_hand() {
        let dir = TempDir::new().unwrap();
        let (mut manager, mut world) = setup(&dir).await;
        let sender = CommandSender::Player("alice".into());

        let response = ItemCommand::handle(
            &mut manager,
            &mut world,
            &sender,
            &args(&["create", "sword1", "melee_weapon", "common"]),
        )
        .await
        .unwrap();
        assert!(response.messages[0].contains("Hold an itemstack"));
        assert!(manager.registry().is_empty());

        hold(&mut world, "alice", ItemStack::of(Material::IronSword));
        let response = ItemCommand::handle(
            &mut manager,
            &mut world,
            &sender,
            &args(&["create", "sword1", "melee_weapon", "common"]),
        )
        .await
        .unwrap();
        assert!(response.messages[0].contains("display name"));
        assert!(manager.registry().is_empty());
    }

    #[tokio::test]
    async fn create_then_duplicate_is_rejected() {
        let dir = TempDir::new().unwrap();
        let (mut manager, mut world) = setup(&dir).await;
        let sender = CommandSender::Player("alice".into());
        hold(
            &mut world,
            "alice",
            StackBuilder::of(Material::IronSword).name("Blade").build(),
        );

        let response = ItemCommand::handle(
            &mut manager,
            &mut world,
            &sender,
            &args(&["create", "sword1", "melee_weapon", "common"]),
        )
        .await
        .unwrap();
        assert!(response.messages[0].contains("Successfully created"));
        assert!(manager.registry().is_id_valid("sword1"));

        let response = ItemCommand::handle(
            &mut manager,
            &mut world,
            &sender,
            &args(&["create", "sword1", "melee_weapon", "common"]),
        )
        .await
        .unwrap();
        assert!(response.messages[0].contains("already an existing item"));
    }

    #[tokio::test]
    async fn long_ids_are_rejected() {
        let dir = TempDir::new().unwrap();
        let (mut manager, mut world) = setup(&dir).await;
        let sender = CommandSender::Player("alice".into());
        hold(
            &mut world,
            "alice",
            StackBuilder::of(Material::IronSword).name("Blade").build(),
        );
        let long_id = "x".repeat(31);
        let response = ItemCommand::handle(
            &mut manager,
            &mut world,
            &sender,
            &args(&["create", &long_id, "melee_weapon", "common"]),
        )
        .await
        .unwrap();
        assert!(response.messages[0].contains("longer than 30 characters"));
        assert!(manager.registry().is_empty());
    }

    #[tokio::test]
    async fn give_requires_existing_id() {
        let dir = TempDir::new().unwrap();
        let (mut manager, mut world) = setup(&dir).await;
        let sender = CommandSender::Player("alice".into());
        let response =
            ItemCommand::handle(&mut manager, &mut world, &sender, &args(&["give", "ghost"]))
                .await
                .unwrap();
        assert!(response.messages[0].contains("no existing item"));
    }

    #[tokio::test]
    async fn permission_is_required() {
        let dir = TempDir::new().unwrap();
        let (mut manager, mut world) = setup(&dir).await;
        world.add_player(Player::new("mallory", Location::new("hub", 0.0, 64.0, 0.0)));
        let sender = CommandSender::Player("mallory".into());
        let response =
            ItemCommand::handle(&mut manager, &mut world, &sender, &args(&["delete", "sword1"]))
                .await
                .unwrap();
        assert!(response.messages[0].contains("permission"));
    }

    #[tokio::test]
    async fn bare_root_opens_menu_for_sender() {
        let dir = TempDir::new().unwrap();
        let (mut manager, mut world) = setup(&dir).await;
        let sender = CommandSender::Player("alice".into());
        let response = ItemCommand::handle(&mut manager, &mut world, &sender, &[])
            .await
            .unwrap();
        assert_eq!(
            response.action,
            CommandAction::OpenItemMenu {
                viewer: "alice".into()
            }
        );
    }

    #[tokio::test]
    async fn modify_name_renames_held_stack() {
        let dir = TempDir::new().unwrap();
        let (mut manager, mut world) = setup(&dir).await;
        let sender = CommandSender::Player("alice".into());
        hold(
            &mut world,
            "alice",
            StackBuilder::of(Material::IronSword).name("Old").build(),
        );
        let response = ItemCommand::handle(
            &mut manager,
            &mut world,
            &sender,
            &args(&["modify", "name", "New", "Blade"]),
        )
        .await
        .unwrap();
        assert!(response.messages[0].contains("Set the name to New Blade"));
        assert_eq!(
            world.player("alice").unwrap().main_hand.display_name.as_deref(),
            Some("New Blade")
        );
    }

    #[tokio::test]
    async fn removelore_checks_bounds() {
        let dir = TempDir::new().unwrap();
        let (mut manager, mut world) = setup(&dir).await;
        let sender = CommandSender::Player("alice".into());
        hold(
            &mut world,
            "alice",
            StackBuilder::of(Material::IronSword)
                .name("Blade")
                .lore_line("only line")
                .build(),
        );
        let response = ItemCommand::handle(
            &mut manager,
            &mut world,
            &sender,
            &args(&["modify", "removelore", "3"]),
        )
        .await
        .unwrap();
        assert!(response.messages[0].contains("no existing line at index 3"));

        let response = ItemCommand::handle(
            &mut manager,
            &mut world,
            &sender,
            &args(&["modify", "removelore", "0"]),
        )
        .await
        .unwrap();
        assert!(response.messages[0].contains("Removed the line at index 0"));
        assert!(world.player("alice").unwrap().main_hand.lore.is_empty());
    }

    #[tokio::test]
    async fn suggestions_complete_ids() {
        let dir = TempDir::new().unwrap();
        let (mut manager, mut world) = setup(&dir).await;
        let sender = CommandSender::Player("alice".into());
        hold(
            &mut world,
            "alice",
            StackBuilder::of(Material::IronSword).name("Blade").build(),
        );
        for id in ["sword1", "sword2", "bow1"] {
            ItemCommand::handle(
                &mut manager,
                &mut world,
                &sender,
                &args(&["create", id, "melee_weapon", "common"]),
            )
            .await
            .unwrap();
        }
        assert_eq!(ItemCommand::suggestions(&manager, "sword"), ["sword1", "sword2"]);
    }
}
