// Short-lived cosmetic particles

use std::sync::Arc;

use glam::Vec2;

use crate::common::FRect;
use crate::engine::animation::{AnimationSet, Animator};

/// Lifetime of a freshly emitted particle in ticks
pub const PARTICLE_LIFETIME: u32 = 30;
/// Base side of a particle's render rect before scaling
const PARTICLE_BASE_SIZE: f32 = 16.0;
/// Horizontal velocity kept after touching the floor
const FLOOR_DAMPING: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct BattleParticle {
    pub pos: Vec2,
    pub prev_pos: Vec2,
    pub vel: Vec2,
    /// Added to velocity every tick
    pub acc: Vec2,
    pub life: u32,
    pub max_life: u32,
    pub alive: bool,
    pub anim: Animator,
    /// Remaining life fraction, shrinks the particle as it ages
    pub size: f32,
    pub scale: f32,
}

impl BattleParticle {
    fn new(set: Option<Arc<AnimationSet>>, pos: Vec2, vel: Vec2, scale: f32) -> Self {
        Self {
            pos,
            prev_pos: pos,
            vel,
            acc: Vec2::ZERO,
            life: PARTICLE_LIFETIME,
            max_life: PARTICLE_LIFETIME,
            alive: true,
            anim: Animator::new(set),
            size: 1.0,
            scale,
        }
    }

    /// Half the current rendered side length
    fn half_extent(&self) -> f32 {
        self.scale * self.size * PARTICLE_BASE_SIZE / 2.0
    }

    pub fn update(&mut self, floor: f32) {
        self.prev_pos = self.pos;
        self.pos += self.vel;
        self.vel += self.acc;

        let half = self.half_extent();
        if self.pos.y - half <= floor {
            self.pos.y = floor + half;
            self.vel.x *= FLOOR_DAMPING;
        }

        self.life = self.life.saturating_sub(1);
        self.alive = self.life > 0;
        self.size = self.life as f32 / self.max_life as f32;

        self.anim.update();
    }

    pub fn interp_pos(&self, alpha: f32) -> Vec2 {
        self.prev_pos.lerp(self.pos, alpha)
    }

    pub fn worldspace_interp_rect(&self, alpha: f32) -> FRect {
        FRect::centered(self.interp_pos(alpha), self.size * self.scale * PARTICLE_BASE_SIZE)
    }
}

/// Pool of live particles
#[derive(Debug, Default)]
pub struct ParticleSystem {
    particles: Vec<BattleParticle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a particle with a full lifetime; returns it for further tweaks
    pub fn emit(
        &mut self,
        set: Option<Arc<AnimationSet>>,
        pos: Vec2,
        vel: Vec2,
        scale: f32,
    ) -> &mut BattleParticle {
        self.particles.push(BattleParticle::new(set, pos, vel, scale));
        let last = self.particles.len() - 1;
        &mut self.particles[last]
    }

    /// Advance every particle and drop the expired ones
    pub fn update(&mut self, floor: f32) {
        for particle in &mut self.particles {
            particle.update(floor);
        }
        self.particles.retain(|p| p.alive);
    }

    pub fn iter(&self) -> impl Iterator<Item = &BattleParticle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
