//! Plugin composition root and event loop.
//!
//! [`Skylands`] owns both systems, the host world surface, and the open
//! menus, and consumes host events on a single task. The periodic save runs
//! as a tick inside the same loop, so registries are only ever touched from
//! one place.

use std::time::Instant;

use chrono::Utc;
use indexmap::IndexMap;
use tokio::sync::mpsc;

use crate::command::{CommandAction, CommandResponse};
use crate::config::Config;
use crate::core::database::DatabaseManager;
use crate::core::error::SystemError;
use crate::core::save_scheduler::SaveScheduler;
use crate::core::text::escape_log;
use crate::host::event::{CommandSender, HostEvent};
use crate::host::types::ClickType;
use crate::host::world::World;
use crate::itemsystem::command as item_command;
use crate::itemsystem::{ItemCommand, ItemGui, ItemManager};
use crate::menu::{MenuAction, MenuView};
use crate::npcsystem::command as npc_command;
use crate::npcsystem::event::{
    follow_up_packets, on_armor_stand_manipulate, on_entity_interact, on_player_move,
    on_spawn_packet, team_create_packet, FollowUp, InteractOutcome, PacketDecision,
    FOLLOW_UP_DELAY,
};
use crate::npcsystem::{NpcCommand, NpcGui, NpcManager};

/// A menu a player currently has open.
enum OpenMenu {
    Item(ItemGui),
    Npc(NpcGui),
}

pub struct Skylands {
    config: Config,
    items: ItemManager,
    npcs: NpcManager,
    world: World,
    open_menus: IndexMap<String, OpenMenu>,
    scheduler: SaveScheduler,
    follow_ups: Vec<(Instant, FollowUp)>,
}

impl Skylands {
    /// Enable the plugin: open the database pool, provision tables, and load
    /// the item registry. Npcs load on the server-load event.
    pub async fn enable(config: Config) -> Result<Self, SystemError> {
        let database = DatabaseManager::open(std::path::Path::new(&config.plugin.data_dir)).await?;
        let items = ItemManager::new(database.clone()).await?;
        let npcs = NpcManager::new(database).await?;
        let scheduler = SaveScheduler::new(config.save.clone());
        log::info!("{} systems enabled", config.plugin.name);
        Ok(Self {
            config,
            items,
            npcs,
            world: World::new(),
            open_menus: IndexMap::new(),
            scheduler,
            follow_ups: Vec::new(),
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn items(&self) -> &ItemManager {
        &self.items
    }

    pub fn npcs(&self) -> &NpcManager {
        &self.npcs
    }

    /// Rendered view of the menu a player has open, if any.
    pub fn open_menu_view(&self, player: &str) -> Option<MenuView> {
        match self.open_menus.get(player)? {
            OpenMenu::Item(gui) => Some(gui.view()),
            OpenMenu::Npc(gui) => Some(gui.view()),
        }
    }

    /// Dispatch one host event. Infrastructure errors propagate so the loop
    /// can log the failed callback and continue.
    pub async fn handle_event(&mut self, event: HostEvent) -> Result<(), SystemError> {
        match event {
            HostEvent::ServerLoad => {
                self.npcs.load_npcs(&mut self.world).await?;
                for name in self.world.online_names() {
                    let packet = team_create_packet(self.npcs.registry(), self.npcs.team_info());
                    self.world.send_packet(&name, packet);
                }
            }
            HostEvent::PlayerJoin(player) => {
                let name = player.name.clone();
                self.world.add_player(player);
                let packet = team_create_packet(self.npcs.registry(), self.npcs.team_info());
                self.world.send_packet(&name, packet);
            }
            HostEvent::PlayerQuit { name } => {
                self.open_menus.shift_remove(&name);
                self.world.remove_player(&name);
            }
            HostEvent::PlayerMove { name, to } => {
                if let Some(player) = self.world.player_mut(&name) {
                    player.location = to;
                }
                on_player_move(&mut self.world, self.npcs.registry(), &name);
            }
            HostEvent::ChatCommand { sender, root, args } => {
                self.handle_command(&sender, &root, &args).await?;
            }
            HostEvent::InventoryClick { player, slot, click } => {
                self.handle_menu_click(&player, slot, click);
            }
            HostEvent::SearchInput { player, text } => {
                if let Some(menu) = self.open_menus.get_mut(&player) {
                    match menu {
                        OpenMenu::Item(gui) => {
                            *gui = gui.apply_search(self.items.registry(), text);
                        }
                        OpenMenu::Npc(gui) => {
                            *gui = gui.apply_search(self.npcs.registry(), text);
                        }
                    }
                }
            }
            HostEvent::EntityInteract { player, entity, hand, .. } => {
                if on_armor_stand_manipulate(self.npcs.registry(), entity) {
                    match on_entity_interact(self.npcs.registry(), entity, hand) {
                        InteractOutcome::Interact { npc_id } => {
                            log::debug!("{} interacted with npc {}", player, npc_id);
                        }
                        InteractOutcome::Cancelled | InteractOutcome::NotNpc => {}
                    }
                }
            }
        }
        self.process_spawn_notifications();
        Ok(())
    }

    async fn handle_command(
        &mut self,
        sender: &CommandSender,
        root: &str,
        args: &[String],
    ) -> Result<(), SystemError> {
        let root = root.to_lowercase();
        let response = if item_command::ALIASES.contains(&root.as_str()) {
            ItemCommand::handle(&mut self.items, &mut self.world, sender, args).await?
        } else if npc_command::ALIASES.contains(&root.as_str()) {
            NpcCommand::handle(&mut self.npcs, &mut self.world, sender, args).await?
        } else {
            return Ok(());
        };
        self.deliver(sender, response);
        Ok(())
    }

    fn deliver(&mut self, sender: &CommandSender, response: CommandResponse) {
        for message in response.messages {
            match sender {
                CommandSender::Player(name) => self.world.send_chat(name, message),
                CommandSender::Console => log::info!("{}", escape_log(&message)),
            }
        }
        match response.action {
            CommandAction::None => {}
            CommandAction::OpenItemMenu { viewer } => {
                let gui = ItemGui::new(self.items.registry());
                self.open_menus.insert(viewer, OpenMenu::Item(gui));
            }
            CommandAction::OpenNpcMenu { viewer } => {
                let gui = NpcGui::new(self.npcs.registry());
                self.open_menus.insert(viewer, OpenMenu::Npc(gui));
            }
        }
    }

    fn handle_menu_click(&mut self, player: &str, slot: usize, click: ClickType) {
        let Some(menu) = self.open_menus.get_mut(player) else {
            return;
        };
        enum Effect {
            None,
            Close,
            Give(crate::host::stack::ItemStack),
        }
        let effect = match menu {
            OpenMenu::Item(gui) => match gui.handle_click(self.items.registry(), slot, click) {
                MenuAction::Close => Effect::Close,
                MenuAction::Give(stack) => Effect::Give(stack),
                MenuAction::Reopen(next) => {
                    *gui = next;
                    Effect::None
                }
                MenuAction::None | MenuAction::Redraw | MenuAction::OpenSearch => Effect::None,
            },
            OpenMenu::Npc(gui) => match gui.handle_click(self.npcs.registry(), slot, click) {
                MenuAction::Close => Effect::Close,
                MenuAction::Give(stack) => Effect::Give(stack),
                MenuAction::Reopen(next) => {
                    *gui = next;
                    Effect::None
                }
                MenuAction::None | MenuAction::Redraw | MenuAction::OpenSearch => Effect::None,
            },
        };
        match effect {
            Effect::None => {}
            Effect::Close => {
                self.open_menus.shift_remove(player);
            }
            Effect::Give(stack) => self.world.give_item(player, stack),
        }
    }

    /// Route queued spawn notifications through the spawn-packet listener,
    /// delivering either the original packet or the fake-player substitute.
    fn process_spawn_notifications(&mut self) {
        let notifications = self.world.take_spawn_notifications();
        let now = Instant::now();
        for notification in notifications {
            match on_spawn_packet(self.npcs.registry(), &notification.viewer, &notification.packet) {
                PacketDecision::PassThrough => {
                    self.world
                        .send_packet(&notification.viewer, notification.packet);
                }
                PacketDecision::Substitute { packets, follow_up } => {
                    for packet in packets {
                        self.world.send_packet(&notification.viewer, packet);
                    }
                    self.follow_ups.push((now + FOLLOW_UP_DELAY, follow_up));
                }
            }
        }
    }

    /// Flush follow-ups whose delay has elapsed.
    pub fn process_follow_ups(&mut self, now: Instant) {
        let due: Vec<FollowUp> = {
            let mut due = Vec::new();
            self.follow_ups.retain(|(deadline, follow_up)| {
                if *deadline <= now {
                    due.push(follow_up.clone());
                    false
                } else {
                    true
                }
            });
            due
        };
        for follow_up in due {
            let packets =
                follow_up_packets(self.npcs.registry(), self.npcs.team_info(), follow_up.entity_id);
            for packet in packets {
                self.world.send_packet(&follow_up.viewer, packet);
            }
        }
    }

    /// One scheduler tick: run the periodic save when a boundary is crossed.
    pub async fn tick(&mut self) -> Result<(), SystemError> {
        self.process_follow_ups(Instant::now());
        if self.scheduler.due(Utc::now()) {
            log::info!("running periodic save");
            self.items.save_items().await?;
            self.npcs.save_npcs().await?;
        }
        Ok(())
    }

    /// Disable the plugin: flush both registries to storage and despawn all
    /// npc representations.
    pub async fn disable(&mut self) -> Result<(), SystemError> {
        self.items.disable().await?;
        self.npcs.disable(&mut self.world).await?;
        log::info!("{} systems disabled", self.config.plugin.name);
        Ok(())
    }

    /// Consume host events until the channel closes, then disable. The save
    /// tick shares this loop; nothing else touches the registries.
    pub async fn run(mut self, mut events: mpsc::Receiver<HostEvent>) -> Result<(), SystemError> {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(1));
        loop {
            tokio::select! {
                event = events.recv() => {
                    match event {
                        Some(event) => {
                            if let Err(e) = self.handle_event(event).await {
                                log::error!("event callback failed: {}", e);
                            }
                        }
                        None => break,
                    }
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.tick().await {
                        log::error!("periodic save failed: {}", e);
                    }
                }
            }
        }
        self.disable().await
    }
}
