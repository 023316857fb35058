//! Events the host dispatches into the plugin loop.

use crate::host::types::{ClickType, EntityId, Hand, Location};
use crate::host::world::Player;

/// Originator of a chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSender {
    Player(String),
    Console,
}

impl CommandSender {
    pub fn name(&self) -> &str {
        match self {
            CommandSender::Player(name) => name,
            CommandSender::Console => "console",
        }
    }

    pub fn is_console(&self) -> bool {
        matches!(self, CommandSender::Console)
    }
}

/// Host-dispatched events. All gameplay logic hangs off these.
#[derive(Debug)]
pub enum HostEvent {
    /// The server finished loading its worlds.
    ServerLoad,
    /// A player connected.
    PlayerJoin(Player),
    /// A player disconnected.
    PlayerQuit { name: String },
    /// A player moved to a new position.
    PlayerMove { name: String, to: Location },
    /// A chat command, already split from the leading slash:
    /// `root` is the alias typed, `args` the remaining whitespace-split words.
    ChatCommand {
        sender: CommandSender,
        root: String,
        args: Vec<String>,
    },
    /// A click inside the open catalog menu.
    InventoryClick {
        player: String,
        slot: usize,
        click: ClickType,
    },
    /// Text confirmed in the search prompt.
    SearchInput { player: String, text: String },
    /// A player clicked or attacked a world entity.
    EntityInteract {
        player: String,
        entity: EntityId,
        hand: Hand,
        click: ClickType,
    },
}
