//! # NpcSystem
//!
//! The scripted npc catalog: domain entity with its host-world stand-in
//! entities, in-memory registry with the entity reverse index, the manager
//! binding both to the relational store, the chat command surface, the
//! browsing gui, and the host event reactions.

pub mod command;
pub mod event;
pub mod gui;
pub mod manager;
pub mod npc;
pub mod registry;
pub mod types;

pub use command::NpcCommand;
pub use gui::{NpcGui, NpcSort};
pub use manager::NpcManager;
pub use npc::Npc;
pub use registry::NpcRegistry;
pub use types::NpcType;
