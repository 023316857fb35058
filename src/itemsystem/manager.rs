//! The manager for everything item related.
//!
//! Binds the [`ItemRegistry`] to the relational store: provisions tables and
//! loads persisted rows at construction, then exposes write-through CRUD and
//! the bulk save. Validation is the command layer's job; operations here
//! assume pre-validated input and return [`SystemError::UnknownId`] if that
//! contract is broken.

use std::str::FromStr;

use sqlx::Row;

use crate::core::database::DatabaseManager;
use crate::core::error::SystemError;
use crate::core::serializer::{stack_from_base64, stack_to_base64};
use crate::host::stack::ItemStack;
use crate::itemsystem::item::Item;
use crate::itemsystem::registry::ItemRegistry;
use crate::itemsystem::types::{ItemStat, ItemType, Rarity};

pub struct ItemManager {
    registry: ItemRegistry,
    database: DatabaseManager,
}

impl ItemManager {
    /// Construct the manager: provision tables, then load every persisted
    /// item into the registry.
    pub async fn new(database: DatabaseManager) -> Result<Self, SystemError> {
        let mut manager = Self {
            registry: ItemRegistry::new(),
            database,
        };
        manager.setup_tables().await?;
        manager.load_items().await?;
        Ok(manager)
    }

    /// Set up the required tables for the item data, if needed.
    async fn setup_tables(&self) -> Result<(), SystemError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS item ( \
                 id VARCHAR(30) NOT NULL, \
                 item_type VARCHAR(30) NOT NULL, \
                 item_rarity VARCHAR(30) NOT NULL, \
                 item_item_stack VARCHAR(1000) NOT NULL, \
                 PRIMARY KEY (id))",
        )
        .execute(self.database.pool())
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS item_stat ( \
                 item_id VARCHAR(30) NOT NULL, \
                 item_stat_type VARCHAR(30) NOT NULL, \
                 item_stat_value DOUBLE NOT NULL, \
                 PRIMARY KEY (item_id, item_stat_type), \
                 FOREIGN KEY (item_id) REFERENCES item (id))",
        )
        .execute(self.database.pool())
        .await?;
        Ok(())
    }

    /// Load all existing items and their stat rows into the registry. Runs
    /// once at startup.
    async fn load_items(&mut self) -> Result<(), SystemError> {
        let rows = sqlx::query("SELECT id, item_type, item_rarity, item_item_stack FROM item")
            .fetch_all(self.database.pool())
            .await?;

        for row in rows {
            let id: String = row.try_get("id")?;
            let item_type = ItemType::from_str(&row.try_get::<String, _>("item_type")?)?;
            let rarity = Rarity::from_str(&row.try_get::<String, _>("item_rarity")?)?;
            let stack = stack_from_base64(&row.try_get::<String, _>("item_item_stack")?)?;

            let mut item = Item::new(id.as_str(), item_type, rarity, stack);

            let stat_rows =
                sqlx::query("SELECT item_stat_type, item_stat_value FROM item_stat WHERE item_id = ?")
                    .bind(&id)
                    .fetch_all(self.database.pool())
                    .await?;
            for stat_row in stat_rows {
                let stat = ItemStat::from_str(&stat_row.try_get::<String, _>("item_stat_type")?)?;
                let value: f64 = stat_row.try_get("item_stat_value")?;
                item.set_stat(stat, value);
            }
            self.registry.register_item(item);
        }
        log::info!("loaded {} items from storage", self.registry.len());
        Ok(())
    }

    pub fn registry(&self) -> &ItemRegistry {
        &self.registry
    }

    /// Create an item: insert the row, then construct and register the
    /// in-memory entity.
    pub async fn create_item(
        &mut self,
        id: &str,
        item_type: ItemType,
        rarity: Rarity,
        stack: ItemStack,
    ) -> Result<(), SystemError> {
        sqlx::query("INSERT INTO item (id, item_type, item_rarity, item_item_stack) VALUES (?, ?, ?, ?)")
            .bind(id)
            .bind(item_type.as_str())
            .bind(rarity.as_str())
            .bind(stack_to_base64(&stack)?)
            .execute(self.database.pool())
            .await?;

        self.registry
            .register_item(Item::new(id, item_type, rarity, stack));
        Ok(())
    }

    /// Delete an item: remove its rows (stats included, one transaction),
    /// then unregister it.
    pub async fn delete_item(&mut self, id: &str) -> Result<(), SystemError> {
        let mut tx = self.database.pool().begin().await?;
        sqlx::query("DELETE FROM item_stat WHERE item_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM item WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.registry.unregister_item(id);
        Ok(())
    }

    /// Set the rarity of an item. Picked up by the next save.
    pub fn set_rarity(&mut self, id: &str, rarity: Rarity) -> Result<(), SystemError> {
        let item = self
            .registry
            .item_from_id_mut(id)
            .ok_or_else(|| unknown_item(id))?;
        item.set_rarity(rarity);
        Ok(())
    }

    /// Set the internal stack of an item. Picked up by the next save.
    pub fn set_stack(&mut self, id: &str, stack: ItemStack) -> Result<(), SystemError> {
        let item = self
            .registry
            .item_from_id_mut(id)
            .ok_or_else(|| unknown_item(id))?;
        item.set_stack(stack);
        Ok(())
    }

    /// Set the value of a stat. A zero value means "absent": the stat row is
    /// deleted and the in-memory entry removed; a non-zero value inserts or
    /// updates the row before mutating the entity.
    pub async fn set_stat(&mut self, id: &str, stat: ItemStat, value: f64) -> Result<(), SystemError> {
        let has_stat = self
            .registry
            .item_from_id(id)
            .ok_or_else(|| unknown_item(id))?
            .has_stat(stat);

        if has_stat {
            if value != 0.0 {
                sqlx::query(
                    "UPDATE item_stat SET item_stat_value = ? WHERE item_id = ? AND item_stat_type = ?",
                )
                .bind(value)
                .bind(id)
                .bind(stat.as_str())
                .execute(self.database.pool())
                .await?;
            } else {
                sqlx::query("DELETE FROM item_stat WHERE item_id = ? AND item_stat_type = ?")
                    .bind(id)
                    .bind(stat.as_str())
                    .execute(self.database.pool())
                    .await?;
            }
        } else {
            if value == 0.0 {
                return Ok(());
            }
            sqlx::query(
                "INSERT INTO item_stat (item_id, item_stat_type, item_stat_value) VALUES (?, ?, ?)",
            )
            .bind(id)
            .bind(stat.as_str())
            .bind(value)
            .execute(self.database.pool())
            .await?;
        }

        let item = self
            .registry
            .item_from_id_mut(id)
            .ok_or_else(|| unknown_item(id))?;
        if value != 0.0 {
            item.set_stat(stat, value);
        } else {
            item.remove_stat(stat);
        }
        Ok(())
    }

    /// Save every registered item back to the store. No dirty tracking:
    /// every row round-trips, one transaction per item.
    pub async fn save_items(&self) -> Result<(), SystemError> {
        for item in self.registry.items() {
            let mut tx = self.database.pool().begin().await?;
            sqlx::query(
                "UPDATE item SET item_type = ?, item_rarity = ?, item_item_stack = ? WHERE id = ?",
            )
            .bind(item.item_type().as_str())
            .bind(item.rarity().as_str())
            .bind(stack_to_base64(&item.stack())?)
            .bind(item.id())
            .execute(&mut *tx)
            .await?;

            for (stat, value) in item.stats() {
                sqlx::query(
                    "UPDATE item_stat SET item_stat_value = ? WHERE item_id = ? AND item_stat_type = ?",
                )
                .bind(value)
                .bind(item.id())
                .bind(stat.as_str())
                .execute(&mut *tx)
                .await?;
            }
            tx.commit().await?;
        }
        log::debug!("saved {} items", self.registry.len());
        Ok(())
    }

    /// Shut the item system down, flushing the registry to storage.
    pub async fn disable(&self) -> Result<(), SystemError> {
        self.save_items().await
    }
}

fn unknown_item(id: &str) -> SystemError {
    SystemError::UnknownId {
        kind: "item",
        id: id.to_string(),
    }
}
