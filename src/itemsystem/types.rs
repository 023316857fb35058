//! Classification enums for the item catalog: type, rarity, and stat kinds.
//! The `as_str` forms are the persisted column values; parsing accepts both
//! the persisted form and lowercase user input.

use std::str::FromStr;

use crate::core::error::SystemError;
use crate::menu::FilterValue;

/// Holds all the item types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemType {
    MeleeWeapon,
    RangedWeapon,
    MagicWeapon,
    Helmet,
    Chestplate,
    Leggings,
    Boots,
}

impl ItemType {
    pub const ALL: [ItemType; 7] = [
        ItemType::MeleeWeapon,
        ItemType::RangedWeapon,
        ItemType::MagicWeapon,
        ItemType::Helmet,
        ItemType::Chestplate,
        ItemType::Leggings,
        ItemType::Boots,
    ];

    /// Localized display name.
    pub fn name(self) -> &'static str {
        match self {
            ItemType::MeleeWeapon => "Melee Weapon",
            ItemType::RangedWeapon => "Ranged Weapon",
            ItemType::MagicWeapon => "Magic Weapon",
            ItemType::Helmet => "Helmet",
            ItemType::Chestplate => "Chestplate",
            ItemType::Leggings => "Leggings",
            ItemType::Boots => "Boots",
        }
    }

    /// Persisted column value.
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::MeleeWeapon => "MELEE_WEAPON",
            ItemType::RangedWeapon => "RANGED_WEAPON",
            ItemType::MagicWeapon => "MAGIC_WEAPON",
            ItemType::Helmet => "HELMET",
            ItemType::Chestplate => "CHESTPLATE",
            ItemType::Leggings => "LEGGINGS",
            ItemType::Boots => "BOOTS",
        }
    }
}

impl FromStr for ItemType {
    type Err = SystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == upper)
            .ok_or(SystemError::InvalidEnum {
                kind: "item type",
                value: s.to_string(),
            })
    }
}

impl FilterValue for ItemType {
    fn values() -> &'static [Self] {
        &Self::ALL
    }

    fn label(&self) -> &'static str {
        self.name()
    }
}

/// Holds all the rarities, ordered from worst to best by weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
    Special,
}

impl Rarity {
    pub const ALL: [Rarity; 7] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
        Rarity::Special,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Mythic => "Mythic",
            Rarity::Special => "Special",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "COMMON",
            Rarity::Uncommon => "UNCOMMON",
            Rarity::Rare => "RARE",
            Rarity::Epic => "EPIC",
            Rarity::Legendary => "LEGENDARY",
            Rarity::Mythic => "MYTHIC",
            Rarity::Special => "SPECIAL",
        }
    }

    /// Order of the rarities, from worst to best.
    pub fn weight(self) -> i32 {
        match self {
            Rarity::Common => 0,
            Rarity::Uncommon => 1,
            Rarity::Rare => 2,
            Rarity::Epic => 3,
            Rarity::Legendary => 4,
            Rarity::Mythic => 5,
            Rarity::Special => 6,
        }
    }

    /// Wrap text in this rarity's color markup. Gradient rarities use a
    /// two-color gradient tag.
    pub fn apply_color(self, text: &str) -> String {
        match self {
            Rarity::Common => format!("<#dedede>{}", text),
            Rarity::Uncommon => format!("<#43fc3d>{}", text),
            Rarity::Rare => format!("<gradient:#5151ed:#5980ff>{}</gradient>", text),
            Rarity::Epic => format!("<gradient:#af0db8:#ff29ff>{}</gradient>", text),
            Rarity::Legendary => format!("<gradient:#ff9500:#fcc51e>{}</gradient>", text),
            Rarity::Mythic => format!("<gradient:#f558f0:#8e3dff>{}</gradient>", text),
            Rarity::Special => format!("<gradient:#fc7979:#f53b7c>{}</gradient>", text),
        }
    }
}

impl FromStr for Rarity {
    type Err = SystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == upper)
            .ok_or(SystemError::InvalidEnum {
                kind: "rarity",
                value: s.to_string(),
            })
    }
}

impl FilterValue for Rarity {
    fn values() -> &'static [Self] {
        &Self::ALL
    }

    fn label(&self) -> &'static str {
        self.name()
    }
}

/// Holds all the item stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemStat {
    AttackDamage,
    AttackSpeed,
    MagicDamage,
    Defense,
    Health,
    Mana,
    CritChance,
    CritDamage,
    Speed,
}

impl ItemStat {
    pub const ALL: [ItemStat; 9] = [
        ItemStat::AttackDamage,
        ItemStat::AttackSpeed,
        ItemStat::MagicDamage,
        ItemStat::Defense,
        ItemStat::Health,
        ItemStat::Mana,
        ItemStat::CritChance,
        ItemStat::CritDamage,
        ItemStat::Speed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ItemStat::AttackDamage => "Attack Damage",
            ItemStat::AttackSpeed => "Attack Speed",
            ItemStat::MagicDamage => "Magic Damage",
            ItemStat::Defense => "Defense",
            ItemStat::Health => "Health",
            ItemStat::Mana => "Mana",
            ItemStat::CritChance => "Crit Chance",
            ItemStat::CritDamage => "Crit Damage",
            ItemStat::Speed => "Speed",
        }
    }

    /// Suffix appended to the stat line in item lore.
    pub fn suffix(self) -> &'static str {
        match self {
            ItemStat::MagicDamage | ItemStat::CritChance | ItemStat::CritDamage => "%",
            _ => "",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemStat::AttackDamage => "ATTACK_DAMAGE",
            ItemStat::AttackSpeed => "ATTACK_SPEED",
            ItemStat::MagicDamage => "MAGIC_DAMAGE",
            ItemStat::Defense => "DEFENSE",
            ItemStat::Health => "HEALTH",
            ItemStat::Mana => "MANA",
            ItemStat::CritChance => "CRIT_CHANCE",
            ItemStat::CritDamage => "CRIT_DAMAGE",
            ItemStat::Speed => "SPEED",
        }
    }

    /// Data tag key carrying the stat value on built stacks.
    pub fn data_key(self) -> &'static str {
        match self {
            ItemStat::AttackDamage => "skylands:attack_damage",
            ItemStat::AttackSpeed => "skylands:attack_speed",
            ItemStat::MagicDamage => "skylands:magic_damage",
            ItemStat::Defense => "skylands:defense",
            ItemStat::Health => "skylands:health",
            ItemStat::Mana => "skylands:mana",
            ItemStat::CritChance => "skylands:crit_chance",
            ItemStat::CritDamage => "skylands:crit_damage",
            ItemStat::Speed => "skylands:speed",
        }
    }
}

impl FromStr for ItemStat {
    type Err = SystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == upper)
            .ok_or(SystemError::InvalidEnum {
                kind: "item stat",
                value: s.to_string(),
            })
    }
}
