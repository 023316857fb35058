//! # ItemSystem
//!
//! The persistent item catalog: domain entity, in-memory registry, the
//! manager binding the registry to the relational store, the chat command
//! surface, and the browsing gui.

pub mod command;
pub mod gui;
pub mod item;
pub mod manager;
pub mod registry;
pub mod types;

pub use command::ItemCommand;
pub use gui::{ItemGui, ItemSort};
pub use item::Item;
pub use manager::ItemManager;
pub use registry::ItemRegistry;
pub use types::{ItemStat, ItemType, Rarity};
