// Player skills: flash jump, double throw, avenger

use glam::Vec2;

use crate::common::Direction;
use crate::engine::sprites::ids;

use super::{Skill, SkillKind};
use crate::game::battle::character::{BattleCharacter, CharacterId};
use crate::game::battle::field::BattleField;
use crate::game::battle::projectile::{BattleProjectile, ProjectileBehavior};
use crate::game::battle::services::BattleServices;

/// Airborne ticks required before a flash jump
const FLASH_JUMP_DELAY: u32 = 3;
/// Flash jumps available per stay in the air
const FLASH_JUMP_CHARGES: u32 = 2;
const FLASH_JUMP_SPEED: f32 = 7.0;
const FLASH_JUMP_LIFT: f32 = 2.0;

/// Mid-air dash in the facing direction
#[derive(Debug, Default)]
pub struct FlashJump {
    remaining: u32,
}

impl FlashJump {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl Skill for FlashJump {
    fn kind(&self) -> SkillKind {
        SkillKind::FlashJump
    }

    fn name(&self) -> &'static str {
        "Flash Jump"
    }

    fn can_use(&self, owner: &BattleCharacter) -> bool {
        !owner.grounded && owner.frames_since_jump >= FLASH_JUMP_DELAY && self.remaining > 0
    }

    fn activate(&mut self, field: &mut BattleField, owner: CharacterId, services: &mut BattleServices<'_>) {
        self.remaining -= 1;
        services.play_sound("flashjump");

        let c = field.character_mut(owner);
        let sign = c.facing.horizontal_sign();
        c.vel.x = sign * FLASH_JUMP_SPEED;
        c.vel.y += FLASH_JUMP_LIFT;

        // Puff trails behind the dash
        let pos = c.pos + Vec2::new(-sign * 8.0, 0.0);
        let facing = c.facing;
        field.spawn_fx(ids::FLASH_JUMP_FX, facing, pos);
    }

    fn update(&mut self, field: &mut BattleField, owner: CharacterId, _services: &mut BattleServices<'_>) {
        if field.character(owner).grounded {
            self.remaining = FLASH_JUMP_CHARGES;
        }
    }
}

static SPIKE_BEHAVIOR: ProjectileBehavior = ProjectileBehavior {
    acceleration: Vec2::new(0.0, -0.06),
    script: None,
};

/// Delay between the first and second spike
const SECOND_THROW_DELAY: u32 = 6;

/// Two spikes thrown in quick succession
#[derive(Debug, Default)]
pub struct DoubleThrow {
    thrown: u32,
    timer: u32,
    direction: Direction,
}

impl DoubleThrow {
    pub fn new() -> Self {
        Self::default()
    }

    fn throw_spike(&mut self, field: &mut BattleField, owner: CharacterId, services: &mut BattleServices<'_>) {
        let (pos, power) = {
            let c = field.character(owner);
            (c.pos, c.power)
        };
        let direction = self.direction;

        let p = field.spawn_projectile(ids::SPIKE);
        p.set_position(pos);
        p.owner = Some(owner);
        p.pierce = 0;
        p.angle_to_velocity = true;
        p.behavior = Some(&SPIKE_BEHAVIOR);
        p.power = power;
        p.dir = direction;
        p.vel = Vec2::new(direction.horizontal_sign() * 5.0, 0.5);

        services.play_sound("throw1");
        self.thrown += 1;
    }
}

impl Skill for DoubleThrow {
    fn kind(&self) -> SkillKind {
        SkillKind::DoubleThrow
    }

    fn name(&self) -> &'static str {
        "Double Throw"
    }

    fn cast_time(&self) -> u32 {
        12
    }

    fn activate(&mut self, field: &mut BattleField, owner: CharacterId, services: &mut BattleServices<'_>) {
        self.thrown = 0;
        self.timer = 0;
        self.direction = field.character(owner).facing;

        self.throw_spike(field, owner, services);

        let offset = Vec2::new(self.direction.horizontal_sign() * 16.0, 0.0);
        field
            .spawn_fx(ids::DOUBLE_THROW_FX, self.direction, offset)
            .attach(owner);
    }

    fn update(&mut self, field: &mut BattleField, owner: CharacterId, services: &mut BattleServices<'_>) {
        self.timer += 1;
        if self.thrown == 1 && self.timer == SECOND_THROW_DELAY {
            self.throw_spike(field, owner, services);
        }
    }
}

/// Chance per roll that a flying avenger sheds a trail particle
const AVENGER_TRAIL_RATE: f32 = 0.25;
const AVENGER_TRAIL_ROLLS: u32 = 4;

fn avenger_trail(field: &mut BattleField, p: &mut BattleProjectile, services: &mut BattleServices<'_>) {
    for _ in 0..AVENGER_TRAIL_ROLLS {
        if services.rng.chance(AVENGER_TRAIL_RATE) {
            let vel = -p.vel * 0.4 + services.rng.rand_vec2(-1.0, 1.0);
            field.emit_particle(ids::TRAIL_PARTICLE, p.pos, vel, 1.0);
        }
    }
}

static AVENGER_BEHAVIOR: ProjectileBehavior = ProjectileBehavior {
    acceleration: Vec2::new(0.0, 0.1),
    script: Some(avenger_trail),
};

/// Ticks of windup before the star is thrown
const AVENGER_WINDUP: u32 = 15;
/// Effectively unlimited
const AVENGER_PIERCE: u32 = 999_999;

/// Charged throw of a large piercing star
#[derive(Debug)]
pub struct Avenger {
    windup: u32,
    thrown: bool,
}

impl Avenger {
    pub fn new() -> Self {
        Self {
            windup: 0,
            thrown: true,
        }
    }
}

impl Default for Avenger {
    fn default() -> Self {
        Self::new()
    }
}

impl Skill for Avenger {
    fn kind(&self) -> SkillKind {
        SkillKind::Avenger
    }

    fn name(&self) -> &'static str {
        "Avenger"
    }

    fn cast_time(&self) -> u32 {
        30
    }

    fn activate(&mut self, _field: &mut BattleField, _owner: CharacterId, services: &mut BattleServices<'_>) {
        services.play_sound("avenger");
        self.windup = AVENGER_WINDUP;
        self.thrown = false;
    }

    fn update(&mut self, field: &mut BattleField, owner: CharacterId, services: &mut BattleServices<'_>) {
        if self.thrown {
            return;
        }

        let (pos, facing, power) = {
            let c = field.character(owner);
            (c.pos, c.facing, c.power)
        };

        if self.windup > 0 {
            if self.windup % 2 == 0 {
                let vel = services.rng.rand_vec2(-2.0, 2.0);
                field.emit_particle(ids::TRAIL_PARTICLE, pos, vel, 1.0);
            }
            self.windup -= 1;
        }

        if self.windup == 0 {
            let p = field.spawn_projectile(ids::AVENGER);
            p.set_position(pos);
            p.owner = Some(owner);
            p.pierce = AVENGER_PIERCE;
            p.behavior = Some(&AVENGER_BEHAVIOR);
            p.power = power;
            p.dir = facing;
            p.vel = Vec2::new(facing.horizontal_sign() * 6.0, 0.0);
            self.thrown = true;
            log::debug!("Avenger thrown by #{owner}");
        }
    }
}
