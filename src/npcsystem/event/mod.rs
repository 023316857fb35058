//! Host event reactions for the npc system: look-close tracking, interaction
//! guarding, spawn-packet substitution, and team registration.

pub mod interact;
pub mod look_close;
pub mod spawn_packets;
pub mod team;

pub use interact::{on_armor_stand_manipulate, on_entity_interact, InteractOutcome};
pub use look_close::{on_player_move, NPC_DISTANCE_LOOK_CLOSE};
pub use spawn_packets::{follow_up_packets, on_spawn_packet, FollowUp, PacketDecision, FOLLOW_UP_DELAY};
pub use team::team_create_packet;
