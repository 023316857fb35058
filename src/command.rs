//! Plumbing shared by the item and npc command roots: permission checks,
//! responses, and the actions a handler can ask the plugin loop to take.
//!
//! Command handlers validate input, delegate to exactly one manager call,
//! and emit one prefixed feedback message. Validation failures abort with a
//! friendly message and no state change.

use crate::core::text::apply_prefix;
use crate::host::event::CommandSender;
use crate::host::world::World;

/// Permission node roots.
pub const ROOT_PLUGIN: &str = "skylands";
pub const ROOT_ITEMSYSTEM: &str = "skylands.itemsystem";
pub const ROOT_NPCSYSTEM: &str = "skylands.npcsystem";

/// Side effect a handler requests beyond chat feedback.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandAction {
    None,
    /// Open the item catalog menu for a viewer.
    OpenItemMenu { viewer: String },
    /// Open the npc catalog menu for a viewer.
    OpenNpcMenu { viewer: String },
}

/// Outcome of a handled command: feedback lines plus an optional action.
#[derive(Debug)]
pub struct CommandResponse {
    pub messages: Vec<String>,
    pub action: CommandAction,
}

impl CommandResponse {
    pub fn none() -> Self {
        Self {
            messages: Vec::new(),
            action: CommandAction::None,
        }
    }

    pub fn message(text: impl Into<String>) -> Self {
        Self {
            messages: vec![apply_prefix(&text.into())],
            action: CommandAction::None,
        }
    }

    pub fn with_action(mut self, action: CommandAction) -> Self {
        self.action = action;
        self
    }

    pub fn and_message(mut self, text: impl Into<String>) -> Self {
        self.messages.push(apply_prefix(&text.into()));
        self
    }
}

/// Whether the sender holds a permission node. The console holds every node.
pub fn has_permission(world: &World, sender: &CommandSender, node: &str) -> bool {
    match sender {
        CommandSender::Console => true,
        CommandSender::Player(name) => world
            .player(name)
            .map(|p| p.has_permission(node))
            .unwrap_or(false),
    }
}

/// Standard refusal for a missing permission node.
pub fn no_permission() -> CommandResponse {
    CommandResponse::message("You do not have permission to use this command.")
}

/// Standard refusal for console use of a player-only command.
pub fn players_only() -> CommandResponse {
    CommandResponse::message("Only players can use this command.")
}

/// Prefix-filtered id suggestions for tab completion.
pub fn id_suggestions(ids: Vec<String>, input: &str) -> Vec<String> {
    ids.into_iter().filter(|id| id.starts_with(input)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::types::Location;
    use crate::host::world::Player;

    #[test]
    fn console_holds_every_node() {
        let world = World::new();
        assert!(has_permission(&world, &CommandSender::Console, "skylands.itemsystem.create"));
    }

    #[test]
    fn offline_player_holds_nothing() {
        let world = World::new();
        let sender = CommandSender::Player("ghost".into());
        assert!(!has_permission(&world, &sender, "skylands.itemsystem.open"));
    }

    #[test]
    fn player_nodes_are_checked() {
        let mut world = World::new();
        world.add_player(
            Player::new("alice", Location::new("hub", 0.0, 64.0, 0.0))
                .with_permission("skylands.itemsystem.open"),
        );
        let sender = CommandSender::Player("alice".into());
        assert!(has_permission(&world, &sender, "skylands.itemsystem.open"));
        assert!(!has_permission(&world, &sender, "skylands.itemsystem.delete"));
    }

    #[test]
    fn suggestions_filter_by_prefix() {
        let ids = vec!["sword1".to_string(), "sword2".to_string(), "bow1".to_string()];
        assert_eq!(id_suggestions(ids, "sw"), ["sword1", "sword2"]);
    }
}
