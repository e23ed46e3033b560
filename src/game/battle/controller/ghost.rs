// Ghost: idles, then rushes to a random spot on the stage

use glam::Vec2;

use super::Controller;
use crate::game::battle::character::CharacterId;
use crate::game::battle::field::BattleField;
use crate::game::battle::services::BattleServices;

const IDLE_TICKS: u32 = 90;
const RUSH_TICKS: u32 = 30;
/// Close enough to the rush target to stop dead
const ARRIVE_DISTANCE: f32 = 8.0;
/// Rush targets are picked up to this far above the floor
const RUSH_CEILING: f32 = 64.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostPhase {
    Idle,
    Rush,
}

#[derive(Debug)]
pub struct GhostController {
    phase: GhostPhase,
    phase_ticks: u32,
    target: Vec2,
}

impl GhostController {
    pub fn new() -> Self {
        Self {
            phase: GhostPhase::Idle,
            phase_ticks: IDLE_TICKS,
            target: Vec2::ZERO,
        }
    }

    pub fn phase(&self) -> GhostPhase {
        self.phase
    }
}

impl Default for GhostController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for GhostController {
    fn think(&mut self, me: CharacterId, field: &mut BattleField, services: &mut BattleServices<'_>) {
        field.character_mut(me).set_fly_state(true);

        if !field.character(me).can_act() {
            return;
        }

        let ghost = field.character_mut(me);
        if self.phase == GhostPhase::Rush {
            ghost.fly_towards(self.target, 1.0);
        }
        if ghost.pos.distance(self.target) < ARRIVE_DISTANCE {
            ghost.vel = Vec2::ZERO;
        }

        if self.phase_ticks > 0 {
            self.phase_ticks -= 1;
            return;
        }

        match self.phase {
            GhostPhase::Idle => {
                let bounds = field.bounds();
                self.target = services
                    .rng
                    .rand_vec2_xy(bounds.left, bounds.right, bounds.floor, RUSH_CEILING);
                self.phase = GhostPhase::Rush;
                self.phase_ticks = RUSH_TICKS;
            }
            GhostPhase::Rush => {
                self.phase = GhostPhase::Idle;
                self.phase_ticks = IDLE_TICKS;
            }
        }
        log::trace!("ghost #{me} -> {:?}", self.phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::audio::NullAudio;
    use crate::engine::random::GameRng;
    use crate::game::battle::character_info::Archetype;

    #[test]
    fn test_idle_then_rush() {
        let mut rng = GameRng::seeded(2);
        let mut field = BattleField::for_tests();
        let player = field.spawn_character(Archetype::Player, Vec2::ZERO, &mut rng);
        let ghost = field.spawn_character(Archetype::Ghost, Vec2::new(100.0, 20.0), &mut rng);
        field.set_player_index(player);

        let mut audio = NullAudio;
        let mut services = BattleServices::new(&mut audio, &mut rng);
        let mut controller = GhostController::new();

        for _ in 0..IDLE_TICKS {
            controller.think(ghost, &mut field, &mut services);
            assert_eq!(field.character(ghost).vel, Vec2::ZERO);
        }
        controller.think(ghost, &mut field, &mut services);
        assert_eq!(controller.phase(), GhostPhase::Rush);
        assert!(field.character(ghost).flying);

        controller.think(ghost, &mut field, &mut services);
        assert_ne!(field.character(ghost).vel, Vec2::ZERO);
    }

    #[test]
    fn test_stops_at_target() {
        let mut rng = GameRng::seeded(2);
        let mut field = BattleField::for_tests();
        let player = field.spawn_character(Archetype::Player, Vec2::ZERO, &mut rng);
        let ghost = field.spawn_character(Archetype::Ghost, Vec2::new(100.0, 20.0), &mut rng);
        field.set_player_index(player);

        let mut audio = NullAudio;
        let mut services = BattleServices::new(&mut audio, &mut rng);
        let mut controller = GhostController {
            phase: GhostPhase::Rush,
            phase_ticks: 10,
            target: Vec2::new(103.0, 20.0),
        };
        controller.think(ghost, &mut field, &mut services);
        assert_eq!(field.character(ghost).vel, Vec2::ZERO);
    }
}
