// Skills: timed abilities used by the player and by AI
//
// A skill has a one-shot activation and a per-tick update. Activation goes
// through `BattleField::use_skill`, which also locks the owner for the
// skill's cast time.

pub mod player;
pub mod ragworm;

use std::fmt;

use super::character::{BattleCharacter, CharacterId};
use super::field::BattleField;
use super::services::BattleServices;

pub use player::{Avenger, DoubleThrow, FlashJump};
pub use ragworm::{Burst, Meteor, Teleport};

/// Identifies which skill a character is locked into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillKind {
    FlashJump,
    DoubleThrow,
    Avenger,
    Meteor,
    Burst,
    Teleport,
}

pub trait Skill: fmt::Debug {
    fn kind(&self) -> SkillKind;

    fn name(&self) -> &'static str;

    /// Ticks before the skill may be used again
    fn cooldown(&self) -> u32 {
        0
    }

    /// Ticks the owner is locked after activation; 0 means instant
    fn cast_time(&self) -> u32 {
        0
    }

    /// Whether `owner` may activate this skill right now
    fn can_use(&self, owner: &BattleCharacter) -> bool {
        owner.can_act()
    }

    /// One-shot effect of using the skill
    fn activate(&mut self, field: &mut BattleField, owner: CharacterId, services: &mut BattleServices<'_>);

    /// Runs every tick whether or not the skill is active
    fn update(&mut self, _field: &mut BattleField, _owner: CharacterId, _services: &mut BattleServices<'_>) {}
}
