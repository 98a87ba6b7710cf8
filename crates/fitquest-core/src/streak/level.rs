use serde::{Deserialize, Serialize};

/// Rank shown next to "LVL n". The level number is the streak itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelTier {
    Citizen,
    Warrior,
    Knight,
    King,
    Wizard,
}

impl LevelTier {
    pub fn for_streak(streak: u32) -> Self {
        match streak {
            20.. => LevelTier::Wizard,
            15.. => LevelTier::King,
            10.. => LevelTier::Knight,
            5.. => LevelTier::Warrior,
            _ => LevelTier::Citizen,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LevelTier::Citizen => "Citizen",
            LevelTier::Warrior => "Warrior",
            LevelTier::Knight => "Knight",
            LevelTier::King => "King",
            LevelTier::Wizard => "Wizard",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            LevelTier::Citizen => "👤",
            LevelTier::Warrior => "🛡️",
            LevelTier::Knight => "⚔️",
            LevelTier::King => "👑",
            LevelTier::Wizard => "🧙‍♂️",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_change_every_five_levels() {
        assert_eq!(LevelTier::for_streak(1), LevelTier::Citizen);
        assert_eq!(LevelTier::for_streak(4), LevelTier::Citizen);
        assert_eq!(LevelTier::for_streak(5), LevelTier::Warrior);
        assert_eq!(LevelTier::for_streak(14), LevelTier::Knight);
        assert_eq!(LevelTier::for_streak(15), LevelTier::King);
        assert_eq!(LevelTier::for_streak(365), LevelTier::Wizard);
    }
}
