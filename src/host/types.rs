use serde::{Deserialize, Serialize};

/// Numeric id the host assigns to every spawned world entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub i32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A position in a named world, with view angles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub world: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl Location {
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    pub fn with_angles(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// Copy of this location shifted on the vertical axis. Used for the
    /// hologram stands floating above and below an npc's head.
    pub fn offset_y(&self, dy: f64) -> Self {
        let mut out = self.clone();
        out.y += dy;
        out
    }

    /// Euclidean distance to another location. Only meaningful within the
    /// same world; callers compare worlds first.
    pub fn distance(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// View angles that point from this location toward `target`.
    pub fn angles_toward(&self, target: &Location) -> (f32, f32) {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        let dz = target.z - self.z;
        let horizontal = (dx * dx + dz * dz).sqrt();
        let yaw = (-dx).atan2(dz).to_degrees() as f32;
        let pitch = (-dy).atan2(horizontal).to_degrees() as f32;
        (yaw, pitch)
    }
}

/// Pack a degree angle into the protocol's 1/256th-turn byte form.
pub fn angle_byte(degrees: f32) -> i8 {
    ((degrees % 360.0) * 256.0 / 360.0) as i8
}

/// Mouse button used on an inventory slot or an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickType {
    Left,
    Right,
}

impl ClickType {
    pub fn is_right(self) -> bool {
        matches!(self, ClickType::Right)
    }
}

/// Hand used for an entity interaction. Off-hand interactions are duplicates
/// of the main-hand event and are suppressed by listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Main,
    Off,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Location::new("hub", 0.0, 0.0, 0.0);
        let b = Location::new("hub", 3.0, 0.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn angles_toward_faces_positive_z() {
        let a = Location::new("hub", 0.0, 0.0, 0.0);
        let b = Location::new("hub", 0.0, 0.0, 10.0);
        let (yaw, pitch) = a.angles_toward(&b);
        assert!(yaw.abs() < 1e-3);
        assert!(pitch.abs() < 1e-3);
    }

    #[test]
    fn angle_byte_wraps_full_turns() {
        assert_eq!(angle_byte(0.0), 0);
        assert_eq!(angle_byte(360.0), 0);
        assert_eq!(angle_byte(90.0), 64);
    }
}
