// Boss skills: meteor, burst, teleport

use glam::Vec2;

use crate::common::Direction;
use crate::engine::sprites::ids;

use super::{Skill, SkillKind};
use crate::game::battle::character::CharacterId;
use crate::game::battle::field::BattleField;
use crate::game::battle::projectile::{BattleProjectile, ProjectileBehavior};
use crate::game::battle::services::BattleServices;

const METEOR_COUNT: u32 = 10;

/// Flames rain down across the whole stage
#[derive(Debug, Default)]
pub struct Meteor;

impl Meteor {
    pub fn new() -> Self {
        Self
    }
}

impl Skill for Meteor {
    fn kind(&self) -> SkillKind {
        SkillKind::Meteor
    }

    fn name(&self) -> &'static str {
        "Meteor"
    }

    fn cooldown(&self) -> u32 {
        150
    }

    fn cast_time(&self) -> u32 {
        150
    }

    fn activate(&mut self, field: &mut BattleField, owner: CharacterId, services: &mut BattleServices<'_>) {
        let bounds = field.bounds();
        for _ in 0..METEOR_COUNT {
            let pos = services
                .rng
                .rand_vec2_xy(bounds.left, bounds.right, 100.0, 200.0);
            let fall = -1.0 - services.rng.rand_real();

            let p = field.spawn_projectile(ids::FLAME);
            p.set_position(pos);
            p.vel = Vec2::new(0.0, fall);
            p.owner = Some(owner);
        }
        services.play_sound("torch");
    }

    fn update(&mut self, field: &mut BattleField, owner: CharacterId, services: &mut BattleServices<'_>) {
        let c = field.character(owner);
        if c.current_skill().map(|s| s.kind) != Some(SkillKind::Meteor) {
            return;
        }

        let pos = c.pos;
        let vel = services.rng.rand_vec2_xy(-1.0, 1.0, 0.0, 2.0);
        field.emit_particle(ids::FLAME, pos, vel, 1.0);
    }
}

/// Ticks a burst knife hangs in the air before locking on
const KNIFE_HANG_TICKS: u32 = 30;

fn burst_knife(field: &mut BattleField, p: &mut BattleProjectile, services: &mut BattleServices<'_>) {
    if p.age < KNIFE_HANG_TICKS {
        p.vel *= 0.97;
    } else if p.age == KNIFE_HANG_TICKS {
        services.play_sound("knifedraw");
        p.vel = (field.player().pos - p.pos).normalize_or_zero();
    } else {
        p.vel *= 1.08;
    }
}

static BURST_BEHAVIOR: ProjectileBehavior = ProjectileBehavior {
    acceleration: Vec2::ZERO,
    script: Some(burst_knife),
};

const BURST_KNIVES: u32 = 10;

/// A fan of knives that stall, then home in on the player
#[derive(Debug, Default)]
pub struct Burst {
    knives: u32,
}

impl Burst {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Skill for Burst {
    fn kind(&self) -> SkillKind {
        SkillKind::Burst
    }

    fn name(&self) -> &'static str {
        "Burst"
    }

    fn cooldown(&self) -> u32 {
        150
    }

    fn cast_time(&self) -> u32 {
        90
    }

    fn activate(&mut self, _field: &mut BattleField, _owner: CharacterId, _services: &mut BattleServices<'_>) {
        self.knives = BURST_KNIVES;
    }

    fn update(&mut self, field: &mut BattleField, owner: CharacterId, services: &mut BattleServices<'_>) {
        if self.knives == 0 {
            return;
        }
        self.knives -= 1;

        let pos = field.character(owner).pos;
        let vel = Vec2::new(services.rng.rand_range(-0.5, 0.5), 2.5);

        let p = field.spawn_projectile(ids::GOLD_SPIKE);
        p.set_position(pos);
        p.vel = vel;
        p.owner = Some(owner);
        p.pierce = 0;
        p.angle_to_velocity = true;
        p.behavior = Some(&BURST_BEHAVIOR);

        services.play_sound("throw1");
    }
}

/// Minimum distance between the teleport destination and the player
const TELEPORT_CLEARANCE: f32 = 32.0;
const TELEPORT_ATTEMPTS: u32 = 64;

/// Blink to a random spot near the middle of the stage
#[derive(Debug, Default)]
pub struct Teleport;

impl Teleport {
    pub fn new() -> Self {
        Self
    }
}

impl Skill for Teleport {
    fn kind(&self) -> SkillKind {
        SkillKind::Teleport
    }

    fn name(&self) -> &'static str {
        "Teleport"
    }

    fn activate(&mut self, field: &mut BattleField, owner: CharacterId, services: &mut BattleServices<'_>) {
        let bounds = field.bounds();
        let center_x = bounds.center_x();
        let player_pos = field.player().pos;
        let src = field.character(owner).pos;

        let mut dst = src;
        for _ in 0..TELEPORT_ATTEMPTS {
            dst = Vec2::new(
                center_x + services.rng.rand_range(-100.0, 100.0),
                services.rng.rand_range(bounds.floor, bounds.floor + 32.0),
            );
            if dst.distance(player_pos) >= TELEPORT_CLEARANCE {
                break;
            }
        }

        field.spawn_fx(ids::FLASH_JUMP_FX, Direction::Right, src);
        field.spawn_fx(ids::FLASH_JUMP_FX, Direction::Right, dst);
        field.character_mut(owner).warp(dst);
        services.play_sound("warpspell");
        log::debug!("#{owner} teleported to ({:.1}, {:.1})", dst.x, dst.y);
    }
}
