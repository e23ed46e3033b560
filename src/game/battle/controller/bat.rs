// Bat: alternates between hovering above the player and diving at them

use glam::Vec2;

use super::Controller;
use crate::game::battle::character::CharacterId;
use crate::game::battle::field::BattleField;
use crate::game::battle::services::BattleServices;

const HOVER_TICKS: u32 = 90;
const CHASE_TICKS: u32 = 30;
/// Height above the floor line the bat hovers at
const HOVER_HEIGHT: f32 = 64.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatPhase {
    Hover,
    Chase,
}

#[derive(Debug)]
pub struct BatController {
    phase: BatPhase,
    phase_ticks: u32,
}

impl BatController {
    pub fn new() -> Self {
        Self {
            phase: BatPhase::Chase,
            phase_ticks: 0,
        }
    }

    pub fn phase(&self) -> BatPhase {
        self.phase
    }
}

impl Default for BatController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for BatController {
    fn think(&mut self, me: CharacterId, field: &mut BattleField, _services: &mut BattleServices<'_>) {
        field.character_mut(me).set_fly_state(true);

        if !field.character(me).can_act() {
            return;
        }

        let target = Vec2::new(field.player().pos.x, 0.0);
        let bat = field.character_mut(me);
        match self.phase {
            BatPhase::Hover => bat.fly_towards(target + Vec2::new(0.0, HOVER_HEIGHT), 1.0),
            BatPhase::Chase => bat.fly_towards(target, 0.5),
        }

        if self.phase_ticks == 0 {
            (self.phase, self.phase_ticks) = match self.phase {
                BatPhase::Hover => (BatPhase::Chase, CHASE_TICKS),
                BatPhase::Chase => (BatPhase::Hover, HOVER_TICKS),
            };
            log::trace!("bat #{me} -> {:?}", self.phase);
        } else {
            self.phase_ticks -= 1;
        }
    }
}
