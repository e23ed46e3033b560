// Skeleton: closes distance, then paces; jumps when the player does

use super::Controller;
use crate::common::Direction;
use crate::game::battle::character::CharacterId;
use crate::game::battle::field::BattleField;
use crate::game::battle::services::BattleServices;

/// Beyond this range the skeleton heads straight for the player
const CHASE_RANGE: f32 = 100.0;

#[derive(Debug, Default)]
pub struct SkeletonController;

impl SkeletonController {
    pub fn new() -> Self {
        Self
    }
}

impl Controller for SkeletonController {
    fn think(&mut self, me: CharacterId, field: &mut BattleField, _services: &mut BattleServices<'_>) {
        if !field.character(me).can_act() {
            return;
        }

        let player = field.player();
        let player_pos = player.pos;
        let player_grounded = player.grounded;

        let skeleton = field.character_mut(me);
        if skeleton.pos.distance(player_pos) >= CHASE_RANGE {
            skeleton.move_towards_x(player_pos.x);
        } else if skeleton.facing == Direction::Left {
            skeleton.move_left();
        } else {
            skeleton.move_right();
        }

        if !player_grounded && skeleton.grounded {
            skeleton.jump();
        }
    }
}
