// Ragworm: the final boss. Picks a different attack each time it recovers.

use glam::Vec2;

use super::Controller;
use crate::game::battle::character::CharacterId;
use crate::game::battle::field::BattleField;
use crate::game::battle::services::BattleServices;
use crate::game::battle::skill::{Burst, Meteor, Skill, Teleport};

/// Rest period after every action
const EXHAUST_TICKS: u32 = 30;
/// Walking gives up and teleports after this long
const MAX_WALK_TICKS: u32 = 60;
/// Close enough to the walk target to stop walking
const ARRIVE_DISTANCE: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RagwormState {
    Deciding,
    Exhausted,
    Walking,
}

#[derive(Debug)]
pub struct RagwormController {
    meteor: Meteor,
    burst: Burst,
    teleport: Teleport,
    state: RagwormState,
    exhaust_timer: u32,
    could_act_last_tick: bool,
    last_choice: Option<i32>,
    walk_target: Vec2,
    walk_ticks: u32,
}

impl RagwormController {
    pub fn new() -> Self {
        Self {
            meteor: Meteor::new(),
            burst: Burst::new(),
            teleport: Teleport::new(),
            state: RagwormState::Deciding,
            exhaust_timer: 0,
            could_act_last_tick: true,
            last_choice: None,
            walk_target: Vec2::ZERO,
            walk_ticks: 0,
        }
    }

    pub fn state(&self) -> RagwormState {
        self.state
    }

    fn exhaust(&mut self) {
        self.state = RagwormState::Exhausted;
        self.exhaust_timer = EXHAUST_TICKS;
    }

    fn walk(&mut self, me: CharacterId, field: &mut BattleField, services: &mut BattleServices<'_>) {
        let worm = field.character_mut(me);
        if worm.pos.distance(self.walk_target) < ARRIVE_DISTANCE {
            self.exhaust();
        }
        worm.move_towards_x(self.walk_target.x);

        self.walk_ticks += 1;
        if self.walk_ticks == MAX_WALK_TICKS {
            field.use_skill(me, &mut self.teleport, services);
            self.exhaust();
        }
    }

    /// Pick an action other than the previous one
    fn decide(&mut self, me: CharacterId, field: &mut BattleField, services: &mut BattleServices<'_>) {
        let choice = loop {
            let roll = services.rng.rand_int(0, 3);
            if Some(roll) != self.last_choice {
                break roll;
            }
        };
        self.last_choice = Some(choice);

        match choice {
            0 => {
                field.use_skill(me, &mut self.meteor, services);
            }
            1 => {
                field.use_skill(me, &mut self.burst, services);
            }
            2 => {
                field.use_skill(me, &mut self.teleport, services);
            }
            _ => {
                self.state = RagwormState::Walking;
                self.walk_ticks = 0;
                self.walk_target = Vec2::new(field.player().pos.x, field.bounds().floor);
                services.play_sound("die");
            }
        }
        log::debug!("ragworm #{me} chose action {choice}");
    }
}

impl Default for RagwormController {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller for RagwormController {
    fn think(&mut self, me: CharacterId, field: &mut BattleField, services: &mut BattleServices<'_>) {
        // Skill timers run even while resting
        self.meteor.update(field, me, services);
        self.burst.update(field, me, services);
        self.teleport.update(field, me, services);

        if self.exhaust_timer > 0 {
            self.exhaust_timer -= 1;
        } else if self.state == RagwormState::Exhausted {
            self.state = RagwormState::Deciding;
        }

        if self.state == RagwormState::Exhausted {
            return;
        }

        if !field.character(me).can_act() {
            self.could_act_last_tick = false;
            return;
        }

        // Just came out of a skill or hit-stun
        if !self.could_act_last_tick {
            self.could_act_last_tick = true;
            self.exhaust();
            return;
        }

        if self.state == RagwormState::Walking {
            self.walk(me, field, services);
        } else {
            self.decide(me, field, services);
        }
    }
}
