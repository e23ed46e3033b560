// Battle character: kinematics, movement, damage and skill lock

use glam::Vec2;

use crate::common::{Direction, FRect, IRect};
use crate::engine::animation::{AnimationLibrary, Animator};
use crate::engine::sprites::DEAD_CLIP;

use super::character_info::{Archetype, CharacterInfo};
use super::controller::Controller;
use super::skill::SkillKind;

/// Index of a character inside its field. Characters are never removed
/// during a battle, so ids stay valid until the field is cleared.
pub type CharacterId = usize;

/// Downward acceleration per tick for non-flying characters
pub const GRAVITY: f32 = 0.4;
/// Fraction of speed that can be added per tick while airborne
pub const AIR_CONTROL: f32 = 0.01;
/// Side of the square world hitbox and render rect
pub const CHARACTER_SIZE: i32 = 16;

/// The skill a character is currently locked into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSkill {
    pub kind: SkillKind,
    /// Lock length in ticks
    pub cast_time: u32,
}

/// A combatant on the battle field
#[derive(Debug)]
pub struct BattleCharacter {
    pub id: CharacterId,
    pub archetype: Archetype,
    pub info: &'static CharacterInfo,

    // Kinematics
    pub pos: Vec2,
    pub prev_pos: Vec2,
    pub vel: Vec2,
    pub facing: Direction,
    pub grounded: bool,
    pub flying: bool,
    /// Ticks spent airborne since last touching the floor
    pub frames_since_jump: u32,

    // Combat
    pub life: i32,
    pub alive: bool,
    pub power: i32,
    /// Remaining ticks of hit-stun; no control and no further hits while > 0
    pub hitstun_frames: u32,

    pub anim: Animator,
    pub controller: Option<Box<dyn Controller>>,

    current_skill: Option<ActiveSkill>,
    frames_since_skill_start: u32,
}

impl BattleCharacter {
    /// Create a character of `archetype` at `pos`, idle and at full life.
    ///
    /// The controller is left empty; the field installs one from the
    /// archetype's factory.
    pub fn new(
        id: CharacterId,
        archetype: Archetype,
        pos: Vec2,
        library: &AnimationLibrary,
    ) -> Self {
        let info = archetype.info();
        let mut anim = Animator::new(library.get(info.sprite_id));
        anim.set_animation(Direction::Down.animation_name());

        Self {
            id,
            archetype,
            info,
            pos,
            prev_pos: pos,
            vel: Vec2::ZERO,
            facing: Direction::Down,
            grounded: true,
            flying: false,
            frames_since_jump: 0,
            life: info.max_life,
            alive: true,
            power: 1,
            hitstun_frames: 0,
            anim,
            controller: None,
            current_skill: None,
            frames_since_skill_start: 0,
        }
    }

    /// Advance one tick of physics and bookkeeping against a floor height
    pub fn update(&mut self, floor: f32) {
        self.prev_pos = self.pos;
        self.pos += self.vel;

        if !self.alive {
            self.flying = false;
        }

        if !self.flying {
            self.vel.y -= GRAVITY;
        }

        if self.pos.y <= floor {
            self.pos.y = floor;
            self.vel.y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }

        if self.flying {
            self.grounded = false;
        }

        if self.grounded {
            self.vel.x *= self.info.friction;
            self.frames_since_jump = 0;
        } else {
            self.frames_since_jump += 1;
        }

        if self.alive {
            self.anim.update();
        }

        self.hitstun_frames = self.hitstun_frames.saturating_sub(1);

        self.frames_since_skill_start = self.frames_since_skill_start.saturating_add(1);
        if let Some(active) = self.current_skill {
            if self.frames_since_skill_start == active.cast_time {
                self.current_skill = None;
            }
        }
    }

    pub fn move_left(&mut self) {
        self.move_horizontal(Direction::Left);
    }

    pub fn move_right(&mut self) {
        self.move_horizontal(Direction::Right);
    }

    /// Accelerate toward `dir`; strong on the ground, a nudge in the air
    fn move_horizontal(&mut self, dir: Direction) {
        if !self.alive {
            return;
        }

        let sign = dir.horizontal_sign();
        let speed = self.info.speed;

        if self.grounded {
            self.vel.x = (self.vel.x + sign * speed * self.info.thrust).clamp(-speed, speed);
        } else {
            // Cap applies on the pushed side only
            let nudged = self.vel.x + sign * speed * AIR_CONTROL;
            let within = if sign > 0.0 { nudged <= speed } else { nudged >= -speed };
            if within {
                self.vel.x = nudged;
            }
        }

        self.facing = dir;
        self.anim.set_animation(dir.animation_name());
    }

    /// Move toward a world x coordinate
    pub fn move_towards_x(&mut self, x: f32) {
        if x < self.pos.x {
            self.move_left();
        } else {
            self.move_right();
        }
    }

    /// Jump if standing on the floor
    pub fn jump(&mut self) {
        if self.grounded {
            self.vel.y = self.info.jump;
            self.grounded = false;
        }
    }

    /// Steer toward `target` without gravity, capped at `speed` per axis
    pub fn fly_towards(&mut self, target: Vec2, speed_multiplier: f32) {
        if self.pos == target {
            return;
        }

        let dir = (target - self.pos).normalize_or_zero();
        let speed = self.info.speed;
        self.vel += dir * speed * speed_multiplier;
        self.vel = self.vel.clamp(Vec2::splat(-speed), Vec2::splat(speed));

        // Picks the clip only; `facing` stays where walking left it
        let clip = if dir.x < 0.0 {
            Direction::Left
        } else {
            Direction::Right
        };
        self.anim.set_animation(clip.animation_name());
    }

    pub fn set_fly_state(&mut self, flying: bool) {
        self.flying = flying;
    }

    /// Lose `amount` life; dies at zero
    pub fn hurt(&mut self, amount: i32) {
        self.life -= amount;
        if self.life <= 0 {
            self.life = 0;
            self.kill();
        }
    }

    pub fn kill(&mut self) {
        if self.alive {
            log::debug!("{} #{} died", self.info.name, self.id);
        }
        self.alive = false;
        self.flying = false;
        self.anim.set_animation(DEAD_CLIP);
    }

    /// Alive, out of hit-stun and not locked into a skill
    pub fn can_act(&self) -> bool {
        self.alive && self.hitstun_frames == 0 && self.current_skill.is_none()
    }

    pub fn current_skill(&self) -> Option<ActiveSkill> {
        self.current_skill
    }

    pub fn frames_since_skill_start(&self) -> u32 {
        self.frames_since_skill_start
    }

    /// Start the skill clock; skills with a cast time also lock the character
    pub fn begin_skill(&mut self, kind: SkillKind, cast_time: u32) {
        self.frames_since_skill_start = 0;
        if cast_time > 0 {
            self.current_skill = Some(ActiveSkill { kind, cast_time });
        }
    }

    pub fn worldspace_hitbox(&self) -> IRect {
        IRect::centered(self.pos, CHARACTER_SIZE)
    }

    pub fn interp_pos(&self, alpha: f32) -> Vec2 {
        self.prev_pos.lerp(self.pos, alpha)
    }

    pub fn worldspace_interp_rect(&self, alpha: f32) -> FRect {
        FRect::centered(self.interp_pos(alpha), CHARACTER_SIZE as f32)
    }

    /// Snap onto the floor with no interpolation from the old position
    pub fn init_position(&mut self, floor: f32) {
        self.pos.y = floor;
        self.prev_pos = self.pos;
    }

    /// Teleport: no interpolation, no momentum
    pub fn warp(&mut self, pos: Vec2) {
        self.pos = pos;
        self.prev_pos = pos;
        self.vel = Vec2::ZERO;
    }
}
