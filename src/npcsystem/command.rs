//! A command for everything npc related.
//!
//! Makes the [`NpcManager`] operations accessible to users: parses chat
//! arguments, re-validates domain constraints (id uniqueness and length,
//! name/title visible-length ceilings, "id must exist"), then delegates to
//! exactly one manager call.

use std::str::FromStr;

use crate::command::{
    has_permission, id_suggestions, no_permission, players_only, CommandAction, CommandResponse,
    ROOT_NPCSYSTEM,
};
use crate::core::error::SystemError;
use crate::core::text::visible_len;
use crate::host::event::CommandSender;
use crate::host::world::World;
use crate::npcsystem::manager::NpcManager;
use crate::npcsystem::types::NpcType;

/// Root aliases routed to this command.
pub const ALIASES: [&str; 3] = ["npc", "npcs", "npcsystem"];

/// Maximum npc id length.
const MAX_ID_LEN: usize = 30;

/// Maximum visible length of names and titles, after markup stripping.
const MAX_NAME_LEN: usize = 16;

pub struct NpcCommand;

impl NpcCommand {
    /// Handle one invocation of the npc root command.
    pub async fn handle(
        manager: &mut NpcManager,
        world: &mut World,
        sender: &CommandSender,
        args: &[String],
    ) -> Result<CommandResponse, SystemError> {
        match args.first().map(String::as_str) {
            None => Ok(Self::open_menu(world, sender, &[])),
            Some("open") => {
                if !has_permission(world, sender, &format!("{}.open", ROOT_NPCSYSTEM)) {
                    return Ok(no_permission());
                }
                Ok(Self::open_menu(world, sender, &args[1..]))
            }
            Some("create") => {
                if !has_permission(world, sender, &format!("{}.create", ROOT_NPCSYSTEM)) {
                    return Ok(no_permission());
                }
                Self::create(manager, world, sender, &args[1..]).await
            }
            Some("movehere") => {
                if !has_permission(world, sender, &format!("{}.movehere", ROOT_NPCSYSTEM)) {
                    return Ok(no_permission());
                }
                Self::move_here(manager, world, sender, &args[1..])
            }
            Some("set") => Self::set(manager, world, sender, &args[1..]),
            Some("delete") => {
                if !has_permission(world, sender, &format!("{}.delete", ROOT_NPCSYSTEM)) {
                    return Ok(no_permission());
                }
                Self::delete(manager, world, &args[1..]).await
            }
            Some(_) => Ok(usage()),
        }
    }

    /// Npc id suggestions for tab completion.
    pub fn suggestions(manager: &NpcManager, input: &str) -> Vec<String> {
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
                CommandResponse::message(format!("Opened the npcs menu for {}", target))
                    .with_action(CommandAction::OpenNpcMenu {
                        viewer: target.clone(),
                    })
            }
            None => CommandResponse::none().with_action(CommandAction::OpenNpcMenu {
                viewer: player.clone(),
            }),
        }
    }

    async fn create(
        manager: &mut NpcManager,
        world: &mut World,
        sender: &CommandSender,
        args: &[String],
    ) -> Result<CommandResponse, SystemError> {
        let CommandSender::Player(player) = sender else {
            return Ok(players_only());
        };
        let (Some(id), Some(type_arg)) = (args.first(), args.get(1)) else {
            return Ok(usage());
        };
        let Ok(npc_type) = NpcType::from_str(type_arg) else {
            return Ok(CommandResponse::message(format!("Unknown npc type {}.", type_arg)));
        };
        let name = args[2..].join(" ");
        if name.is_empty() {
            return Ok(usage());
        }
        if visible_len(&name) > MAX_NAME_LEN {
            return Ok(CommandResponse::message(
                "The name of a npc may not be longer than 16 characters.",
            ));
        }
        if manager.registry().is_id_valid(id) {
            return Ok(CommandResponse::message(
                "There is already an existing npc with such an id.",
            ));
        }
        if id.len() > MAX_ID_LEN {
            return Ok(CommandResponse::message(
                "The id of a npc may not be longer than 30 characters.",
            ));
        }
        let Some(location) = world.player(player).map(|p| p.location.clone()) else {
            return Ok(players_only());
        };
        let id = id.clone();
        manager
            .create_npc(&id, npc_type, &name, location, world)
            .await?;
        Ok(CommandResponse::message(format!("Successfully created the npc {}", id)))
    }

    fn move_here(
        manager: &mut NpcManager,
        world: &mut World,
        sender: &CommandSender,
        args: &[String],
    ) -> Result<CommandResponse, SystemError> {
        let CommandSender::Player(player) = sender else {
            return Ok(players_only());
        };
        let Some(id) = args.first() else {
            return Ok(usage());
        };
        if !manager.registry().is_id_valid(id) {
            return Ok(CommandResponse::message("There is no existing npc with such an id."));
        }
        let Some(location) = world.player(player).map(|p| p.location.clone()) else {
            return Ok(players_only());
        };
        manager.set_location(id, location, world)?;
        Ok(CommandResponse::message(format!("Set the location of {}", id)))
    }

    fn set(
        manager: &mut NpcManager,
        world: &mut World,
        sender: &CommandSender,
        args: &[String],
    ) -> Result<CommandResponse, SystemError> {
        match args.first().map(String::as_str) {
            Some("skin") => {
                if !has_permission(world, sender, &format!("{}.set.skin", ROOT_NPCSYSTEM)) {
                    return Ok(no_permission());
                }
                // Texture pairs are far beyond chat length limits; the
                // original binds this to the console sender only.
                if !sender.is_console() {
                    return Ok(CommandResponse::message(
                        "The skin of a npc can only be set from the console.",
                    ));
                }
                let (Some(id), Some(value), Some(signature)) =
                    (args.get(1), args.get(2), args.get(3))
                else {
                    return Ok(usage());
                };
                if !manager.registry().is_id_valid(id) {
                    return Ok(CommandResponse::message("There is no existing npc with such an id."));
                }
                manager.set_skin(id, value, signature, world)?;
                Ok(CommandResponse::message(format!("Set the skin of {}", id)))
            }
            Some("name") => {
                if !has_permission(world, sender, &format!("{}.set.name", ROOT_NPCSYSTEM)) {
                    return Ok(no_permission());
                }
                let Some(id) = args.get(1) else {
                    return Ok(usage());
                };
                let name = args[2..].join(" ");
                if name.is_empty() {
                    return Ok(usage());
                }
                if visible_len(&name) > MAX_NAME_LEN {
                    return Ok(CommandResponse::message(
                        "The name of a npc may not be longer than 16 characters.",
                    ));
                }
                if !manager.registry().is_id_valid(id) {
                    return Ok(CommandResponse::message("There is no existing npc with such an id."));
                }
                manager.set_name(id, &name, world)?;
                Ok(CommandResponse::message(format!("Set the name of {} to {}", id, name)))
            }
            Some("title") => {
                if !has_permission(world, sender, &format!("{}.set.title", ROOT_NPCSYSTEM)) {
                    return Ok(no_permission());
                }
                let Some(id) = args.get(1) else {
                    return Ok(usage());
                };
                let title = args[2..].join(" ");
                if title.is_empty() {
                    return Ok(usage());
                }
                if visible_len(&title) > MAX_NAME_LEN {
                    return Ok(CommandResponse::message(
                        "The title of a npc may not be longer than 16 characters.",
                    ));
                }
                if !manager.registry().is_id_valid(id) {
                    return Ok(CommandResponse::message("There is no existing npc with such an id."));
                }
                manager.set_title(id, &title, world)?;
                Ok(CommandResponse::message(format!("Set the title of {} to {}", id, title)))
            }
            _ => Ok(usage()),
        }
    }

    async fn delete(
        manager: &mut NpcManager,
        world: &mut World,
        args: &[String],
    ) -> Result<CommandResponse, SystemError> {
        let Some(id) = args.first() else {
            return Ok(usage());
        };
        if !manager.registry().is_id_valid(id) {
            return Ok(CommandResponse::message("There is no existing npc with such an id."));
        }
        manager.delete_npc(id, world).await?;
        Ok(CommandResponse::message(format!("Successfully deleted the npc {}", id)))
    }
}

fn usage() -> CommandResponse {
    CommandResponse::message("Usage: /npc [open|create|movehere|set skin|set name|set title|delete]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::DatabaseManager;
    use crate::host::types::Location;
    use crate::host::world::Player;
    use tempfile::TempDir;

    async fn setup(dir: &TempDir) -> (NpcManager, World) {
        let database = DatabaseManager::open(dir.path()).await.expect("database");
        let manager = NpcManager::new(database).await.expect("manager");
        let mut world = World::new();
        world.add_player(
            Player::new("alice", Location::new("hub", 3.0, 64.0, -2.0)).with_permission("skylands.*"),
        );
        (manager, world)
    }

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn create_spawns_at_sender_location() {
        let dir = TempDir::new().unwrap();
        let (mut manager, mut world) = setup(&dir).await;
        let sender = CommandSender::Player("alice".into());

        let response = NpcCommand::handle(
            &mut manager,
            &mut world,
            &sender,
            &args(&["create", "guide1", "quest_giver", "Guide"]),
        )
        .await
        .unwrap();
        assert!(response.messages[0].contains("Successfully created the npc guide1"));

        let npc = manager.registry().npc_from_id("guide1").expect("created");
        assert!(npc.is_spawned());
        assert_eq!(npc.location(), &Location::new("hub", 3.0, 64.0, -2.0));
    }

    #[tokio::test]
    async fn long_visible_names_are_rejected_after_stripping() {
        let dir = TempDir::new().unwrap();
        let (mut manager, mut world) = setup(&dir).await;
        let sender = CommandSender::Player("alice".into());

        // Raw length is over the limit, but the visible part is short.
        let response = NpcCommand::handle(
            &mut manager,
            &mut world,
            &sender,
            &args(&["create", "guide1", "quest_giver", "<gradient:#aa0000:#00aaff>Guide</gradient>"]),
        )
        .await
        .unwrap();
        assert!(response.messages[0].contains("Successfully created"));

        let response = NpcCommand::handle(
            &mut manager,
            &mut world,
            &sender,
            &args(&["create", "guide2", "quest_giver", "A", "name", "well", "over", "limit"]),
        )
        .await
        .unwrap();
        assert!(response.messages[0].contains("longer than 16 characters"));
        assert!(!manager.registry().is_id_valid("guide2"));
    }

    #[tokio::test]
    async fn set_skin_is_console_only() {
        let dir = TempDir::new().unwrap();
        let (mut manager, mut world) = setup(&dir).await;
        let player = CommandSender::Player("alice".into());
        NpcCommand::handle(
            &mut manager,
            &mut world,
            &player,
            &args(&["create", "guide1", "merchant", "Guide"]),
        )
        .await
        .unwrap();

        let response = NpcCommand::handle(
            &mut manager,
            &mut world,
            &player,
            &args(&["set", "skin", "guide1", "value", "signature"]),
        )
        .await
        .unwrap();
        assert!(response.messages[0].contains("console"));

        let response = NpcCommand::handle(
            &mut manager,
            &mut world,
            &CommandSender::Console,
            &args(&["set", "skin", "guide1", "value", "signature"]),
        )
        .await
        .unwrap();
        assert!(response.messages[0].contains("Set the skin of guide1"));
        let npc = manager.registry().npc_from_id("guide1").unwrap();
        assert_eq!(npc.texture_value(), "value");
    }

    #[tokio::test]
    async fn movehere_teleports_to_sender() {
        let dir = TempDir::new().unwrap();
        let (mut manager, mut world) = setup(&dir).await;
        let sender = CommandSender::Player("alice".into());
        NpcCommand::handle(
            &mut manager,
            &mut world,
            &sender,
            &args(&["create", "guide1", "quest_giver", "Guide"]),
        )
        .await
        .unwrap();

        world.player_mut("alice").unwrap().location = Location::new("hub", 50.0, 65.0, 50.0);
        let response =
            NpcCommand::handle(&mut manager, &mut world, &sender, &args(&["movehere", "guide1"]))
                .await
                .unwrap();
        assert!(response.messages[0].contains("Set the location of guide1"));
        assert_eq!(
            manager.registry().npc_from_id("guide1").unwrap().location(),
            &Location::new("hub", 50.0, 65.0, 50.0)
        );
    }

    #[tokio::test]
    async fn delete_requires_existing_id() {
        let dir = TempDir::new().unwrap();
        let (mut manager, mut world) = setup(&dir).await;
        let sender = CommandSender::Player("alice".into());
        let response =
            NpcCommand::handle(&mut manager, &mut world, &sender, &args(&["delete", "ghost"]))
                .await
                .unwrap();
        assert!(response.messages[0].contains("no existing npc"));
    }
}
