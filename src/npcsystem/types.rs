//! Classification enum for the npc catalog.

use std::str::FromStr;

use crate::core::error::SystemError;
use crate::menu::FilterValue;

/// Holds all the npc types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NpcType {
    QuestGiver,
    Merchant,
}

impl NpcType {
    pub const ALL: [NpcType; 2] = [NpcType::QuestGiver, NpcType::Merchant];

    /// Localized display name.
    pub fn name(self) -> &'static str {
        match self {
            NpcType::QuestGiver => "Quest Giver",
            NpcType::Merchant => "Merchant",
        }
    }

    /// Persisted column value.
    pub fn as_str(self) -> &'static str {
        match self {
            NpcType::QuestGiver => "QUEST_GIVER",
            NpcType::Merchant => "MERCHANT",
        }
    }
}

impl FromStr for NpcType {
    type Err = SystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == upper)
            .ok_or(SystemError::InvalidEnum {
                kind: "npc type",
                value: s.to_string(),
            })
    }
}

impl FilterValue for NpcType {
    fn values() -> &'static [Self] {
        &Self::ALL
    }

    fn label(&self) -> &'static str {
        self.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_round_trip() {
        for t in NpcType::ALL {
            assert_eq!(t.as_str().parse::<NpcType>().unwrap(), t);
        }
        assert_eq!("quest_giver".parse::<NpcType>().unwrap(), NpcType::QuestGiver);
        assert!("dragon".parse::<NpcType>().is_err());
    }
}
