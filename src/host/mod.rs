//! # Host Platform Surface
//!
//! The slice of the game host the plugin reads and mutates: locations and
//! entity ids, item stacks, world state with online players, the outbound
//! packet set the npc illusion needs, and the event stream the host
//! dispatches into the plugin loop.
//!
//! This is the boundary a real server embeds; it is deliberately minimal.
//! The types here exist so the plugin's behavior (spawn substitution, team
//! registration, menu rendering) is concrete and testable without a live
//! server, not to reproduce the host protocol.

pub mod event;
pub mod packet;
pub mod stack;
pub mod types;
pub mod world;

pub use event::{CommandSender, HostEvent};
pub use packet::{PlayerProfile, ServerPacket, TeamInfo, TextureProperty};
pub use stack::{ItemStack, Material};
pub use types::{ClickType, EntityId, Hand, Location};
pub use world::{Player, World};
