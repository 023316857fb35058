//! Test utilities & fixtures.
//!
//! Builds an enabled plugin against a scratch data directory. Tests drive
//! [`Skylands::handle_event`] directly, the way the host loop would.

use tempfile::TempDir;

use skylands::config::Config;
use skylands::host::event::{CommandSender, HostEvent};
use skylands::host::types::Location;
use skylands::host::world::Player;
use skylands::plugin::Skylands;

/// Scratch config rooted in a temp dir the caller keeps alive.
pub fn scratch_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.plugin.data_dir = dir.path().to_string_lossy().to_string();
    config
}

/// Enabled plugin with one fully permitted player ("alice") online and the
/// server-load event already dispatched.
pub async fn enabled_plugin(dir: &TempDir) -> Skylands {
    let mut plugin = Skylands::enable(scratch_config(dir)).await.expect("enable");
    plugin
        .handle_event(HostEvent::PlayerJoin(
            Player::new("alice", spawn_point()).with_permission("skylands.*"),
        ))
        .await
        .expect("join");
    plugin
        .handle_event(HostEvent::ServerLoad)
        .await
        .expect("server load");
    plugin
}

pub fn spawn_point() -> Location {
    Location::new("hub", 0.5, 64.0, 0.5)
}

pub fn alice() -> CommandSender {
    CommandSender::Player("alice".to_string())
}

/// Dispatch a chat command and panic on infrastructure errors.
pub async fn run_command(plugin: &mut Skylands, sender: &CommandSender, root: &str, args: &[&str]) {
    plugin
        .handle_event(HostEvent::ChatCommand {
            sender: sender.clone(),
            root: root.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        })
        .await
        .expect("command dispatch");
}
