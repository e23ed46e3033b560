// AI controllers
//
// Each non-player character owns one controller, which is asked to think
// once per tick before the character's physics update.

pub mod bat;
pub mod ghost;
pub mod ragworm;
pub mod skeleton;
pub mod slime;

use std::fmt;

use super::character::CharacterId;
use super::field::BattleField;
use super::services::BattleServices;

pub use bat::BatController;
pub use ghost::GhostController;
pub use ragworm::RagwormController;
pub use skeleton::SkeletonController;
pub use slime::SlimeController;

pub trait Controller: fmt::Debug {
    /// Decide and apply this tick's actions for character `me`.
    ///
    /// The controller is detached from its character while this runs, so it
    /// may freely read and mutate the whole field.
    fn think(&mut self, me: CharacterId, field: &mut BattleField, services: &mut BattleServices<'_>);
}
