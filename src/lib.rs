//! # Skylands - Item and Npc Catalog Systems for Voxel Game Servers
//!
//! Skylands is a server-side systems plugin providing a persistent item
//! catalog (ItemSystem) and a scripted non-player-character catalog
//! (NpcSystem), each with CRUD chat commands, an inventory-based browsing
//! menu, and database-backed persistence.
//!
//! ## Features
//!
//! - **Item catalog**: typed, rarity-weighted items over opaque host item
//!   stacks, with sparse per-item stats and decorated display stacks.
//! - **Npc catalog**: skinned, titled npcs anchored by armor-stand trios and
//!   rendered client-side as full player models via packet substitution.
//! - **Write-through persistence**: pooled relational storage with
//!   provisioned tables, startup loading, and a periodic bulk save.
//! - **Browsing menus**: paginated, filterable catalog views rebuilt as
//!   immutable instances on every filter change.
//! - **Single-writer dispatch**: one event loop owns all registries; the
//!   periodic save is a tick inside that loop, never a competing task.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use skylands::config::Config;
//! use skylands::plugin::Skylands;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let plugin = Skylands::enable(config).await?;
//!
//!     let (_tx, rx) = tokio::sync::mpsc::channel(64);
//!     plugin.run(rx).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`itemsystem`] - Item entity, registry, manager, command, and menu
//! - [`npcsystem`] - Npc entity, registry, manager, command, menu, and host
//!   event reactions
//! - [`core`] - Database pool, error taxonomy, stack building/serialization,
//!   save scheduling, text helpers
//! - [`host`] - The slice of the game host the plugin reads and mutates
//! - [`config`] - Configuration management
//!
//! ## Architecture
//!
//! ```text
//! host event ──▶ listener / command handler ──▶ manager
//!                                                │
//!                              ┌─────────────────┼──────────────┐
//!                              ▼                 ▼              ▼
//!                        SQL statement     registry mutation   host-world
//!                        (pooled store)    (in-memory)         side effect
//! ```

pub mod command;
pub mod config;
pub mod core;
pub mod host;
pub mod itemsystem;
pub mod menu;
pub mod npcsystem;
pub mod plugin;
