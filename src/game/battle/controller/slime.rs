// Slime: shuffles toward the player, hops now and then

use super::Controller;
use crate::engine::random::GameRng;
use crate::game::battle::character::CharacterId;
use crate::game::battle::field::BattleField;
use crate::game::battle::services::BattleServices;

const JUMP_DELAY_MIN: i32 = 100;
const JUMP_DELAY_MAX: i32 = 200;

#[derive(Debug)]
pub struct SlimeController {
    jump_timer: u32,
}

impl SlimeController {
    pub fn new(rng: &mut GameRng) -> Self {
        Self {
            jump_timer: Self::roll_jump_delay(rng),
        }
    }

    fn roll_jump_delay(rng: &mut GameRng) -> u32 {
        rng.rand_int(JUMP_DELAY_MIN, JUMP_DELAY_MAX) as u32
    }

    pub fn jump_timer(&self) -> u32 {
        self.jump_timer
    }
}

impl Controller for SlimeController {
    fn think(&mut self, me: CharacterId, field: &mut BattleField, services: &mut BattleServices<'_>) {
        if !field.character(me).can_act() {
            return;
        }

        self.jump_timer = self.jump_timer.saturating_sub(1);

        let player_x = field.player().pos.x;
        let slime = field.character_mut(me);
        slime.move_towards_x(player_x);

        if slime.grounded && self.jump_timer == 0 {
            let cue = format!("slime{}", services.rng.rand_int(0, 2));
            services.play_sound(&cue);
            slime.jump();
            self.jump_timer = Self::roll_jump_delay(services.rng);
        }
    }
}
