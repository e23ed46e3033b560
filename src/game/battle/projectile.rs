// Projectiles: kinematics, optional scripted behavior

use std::fmt;
use std::sync::Arc;

use glam::Vec2;

use crate::common::math::lerp_angle;
use crate::common::{Direction, FRect, IRect};
use crate::engine::animation::{AnimationSet, Animator};

use super::character::CharacterId;
use super::field::BattleField;
use super::services::BattleServices;

/// Default side of a projectile's square hitbox
pub const DEFAULT_COLLISION_SIZE: i32 = 4;
/// Side of the render rect
pub const PROJECTILE_RENDER_SIZE: f32 = 16.0;

/// Per-tick hook run after a behavior's acceleration is applied
pub type ProjectileScript = fn(&mut BattleField, &mut BattleProjectile, &mut BattleServices<'_>);

/// Shared movement profile for a family of projectiles
pub struct ProjectileBehavior {
    /// Added to velocity every tick
    pub acceleration: Vec2,
    pub script: Option<ProjectileScript>,
}

impl fmt::Debug for ProjectileBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectileBehavior")
            .field("acceleration", &self.acceleration)
            .field("scripted", &self.script.is_some())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct BattleProjectile {
    /// Character that fired this; decides which side it can hit
    pub owner: Option<CharacterId>,
    pub pos: Vec2,
    pub prev_pos: Vec2,
    pub vel: Vec2,
    pub anim: Animator,
    pub alive: bool,
    pub collision_size: i32,
    /// Extra characters this can pass through before dying
    pub pierce: u32,
    pub dir: Direction,
    pub behavior: Option<&'static ProjectileBehavior>,
    /// Rotation in radians
    pub angle: f32,
    pub prev_angle: f32,
    pub angular_velocity: f32,
    /// Point along the direction of travel instead of spinning
    pub angle_to_velocity: bool,
    /// Damage dealt per hit
    pub power: i32,
    /// Ticks since spawn
    pub age: u32,
}

impl BattleProjectile {
    pub fn new(set: Option<Arc<AnimationSet>>) -> Self {
        Self {
            owner: None,
            pos: Vec2::ZERO,
            prev_pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            anim: Animator::new(set),
            alive: true,
            collision_size: DEFAULT_COLLISION_SIZE,
            pierce: 0,
            dir: Direction::Right,
            behavior: None,
            angle: 0.0,
            prev_angle: 0.0,
            angular_velocity: 0.0,
            angle_to_velocity: false,
            power: 1,
            age: 0,
        }
    }

    /// Place at `pos` with no interpolation from the origin
    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
        self.prev_pos = pos;
    }

    /// Advance one tick.
    ///
    /// The field is passed in for scripted behaviors; the projectile itself is
    /// not reachable through it while this runs.
    pub fn update(&mut self, field: &mut BattleField, services: &mut BattleServices<'_>) {
        self.prev_pos = self.pos;
        self.prev_angle = self.angle;
        self.age += 1;

        self.pos += self.vel;

        if self.angle_to_velocity {
            self.angle = self.vel.y.atan2(self.vel.x);
        } else {
            self.angle += self.angular_velocity;
        }

        if let Some(behavior) = self.behavior {
            self.vel += behavior.acceleration;
            if let Some(script) = behavior.script {
                script(field, self, services);
            }
        }

        self.anim.update();
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn worldspace_hitbox(&self) -> IRect {
        IRect::centered(self.pos, self.collision_size)
    }

    pub fn interp_pos(&self, alpha: f32) -> Vec2 {
        self.prev_pos.lerp(self.pos, alpha)
    }

    pub fn interp_angle(&self, alpha: f32) -> f32 {
        lerp_angle(self.prev_angle, self.angle, alpha)
    }

    pub fn worldspace_interp_rect(&self, alpha: f32) -> FRect {
        FRect::centered(self.interp_pos(alpha), PROJECTILE_RENDER_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::audio::NullAudio;
    use crate::engine::random::GameRng;
    use approx::assert_abs_diff_eq;

    static FALLING: ProjectileBehavior = ProjectileBehavior {
        acceleration: Vec2::new(0.0, -0.5),
        script: None,
    };

    fn speed_up(_field: &mut BattleField, p: &mut BattleProjectile, _services: &mut BattleServices<'_>) {
        p.vel *= 2.0;
    }

    static SPEEDING: ProjectileBehavior = ProjectileBehavior {
        acceleration: Vec2::ZERO,
        script: Some(speed_up),
    };

    fn step(p: &mut BattleProjectile) {
        let mut field = BattleField::for_tests();
        let mut audio = NullAudio;
        let mut rng = GameRng::seeded(0);
        let mut services = BattleServices::new(&mut audio, &mut rng);
        p.update(&mut field, &mut services);
    }

    #[test]
    fn test_moves_and_spins() {
        let mut p = BattleProjectile::new(None);
        p.vel = Vec2::new(2.0, 0.0);
        p.angular_velocity = 0.25;
        step(&mut p);
        assert_eq!(p.pos, Vec2::new(2.0, 0.0));
        assert_eq!(p.prev_pos, Vec2::ZERO);
        assert_abs_diff_eq!(p.angle, 0.25);
        assert_eq!(p.age, 1);
    }

    #[test]
    fn test_angle_follows_velocity() {
        let mut p = BattleProjectile::new(None);
        p.vel = Vec2::new(0.0, 3.0);
        p.angle_to_velocity = true;
        step(&mut p);
        assert_abs_diff_eq!(p.angle, std::f32::consts::FRAC_PI_2, epsilon = 1e-5);
    }

    #[test]
    fn test_behavior_acceleration() {
        let mut p = BattleProjectile::new(None);
        p.behavior = Some(&FALLING);
        step(&mut p);
        assert_eq!(p.pos, Vec2::ZERO);
        assert_abs_diff_eq!(p.vel.y, -0.5);
        step(&mut p);
        assert_abs_diff_eq!(p.pos.y, -0.5);
    }

    #[test]
    fn test_behavior_script_runs() {
        let mut p = BattleProjectile::new(None);
        p.vel = Vec2::new(1.0, 0.0);
        p.behavior = Some(&SPEEDING);
        step(&mut p);
        assert_eq!(p.vel, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_hitbox_uses_collision_size() {
        let mut p = BattleProjectile::new(None);
        p.set_position(Vec2::new(50.0, 0.0));
        assert_eq!(p.worldspace_hitbox(), IRect::new(48, -2, 4, 4));
        p.collision_size = 8;
        assert_eq!(p.worldspace_hitbox(), IRect::new(46, -4, 8, 8));
    }

    #[test]
    fn test_interp_angle_wraps() {
        let mut p = BattleProjectile::new(None);
        p.prev_angle = 3.0;
        p.angle = -3.0;
        assert!(p.interp_angle(0.5).abs() > 3.0);
    }
}
