// One-shot visual effects, optionally attached to a character

use std::sync::Arc;

use glam::Vec2;

use crate::common::{Direction, FRect};
use crate::engine::animation::{AnimationSet, Animator};

use super::character::{BattleCharacter, CharacterId};

/// Side of an effect's render rect
pub const FX_SIZE: f32 = 16.0;

/// A self-terminating animation.
///
/// When attached, `pos` is an offset from the owner's interpolated center
/// rather than a world position.
#[derive(Debug, Clone)]
pub struct BattleFx {
    pub owner: Option<CharacterId>,
    pub pos: Vec2,
    pub prev_pos: Vec2,
    pub vel: Vec2,
    pub anim: Animator,
    pub alive: bool,
    pub dir: Direction,
    /// Clip that marks the animation as finished
    terminal_clip: &'static str,
}

impl BattleFx {
    pub fn new(
        set: Option<Arc<AnimationSet>>,
        dir: Direction,
        pos: Vec2,
        terminal_clip: &'static str,
    ) -> Self {
        Self {
            owner: None,
            pos,
            prev_pos: pos,
            vel: Vec2::ZERO,
            anim: Animator::new(set),
            alive: true,
            dir,
            terminal_clip,
        }
    }

    /// Follow `owner`, treating `pos` as an offset
    pub fn attach(&mut self, owner: CharacterId) -> &mut Self {
        self.owner = Some(owner);
        self
    }

    pub fn update(&mut self) {
        self.prev_pos = self.pos;
        self.pos += self.vel;
        self.anim.update();

        if self.anim.current_animation() == self.terminal_clip {
            self.alive = false;
        }
    }

    pub fn interp_pos(&self, alpha: f32) -> Vec2 {
        self.prev_pos.lerp(self.pos, alpha)
    }

    /// Render rect in world space; attached effects ride on their owner
    pub fn worldspace_interp_rect(&self, alpha: f32, characters: &[BattleCharacter]) -> FRect {
        let mut rect = FRect::centered(self.interp_pos(alpha), FX_SIZE);
        if let Some(owner) = self.owner.and_then(|id| characters.get(id)) {
            let anchor = owner.worldspace_interp_rect(alpha).center();
            rect.x += anchor.x;
            rect.y += anchor.y;
        }
        rect
    }
}

/// Pool of live effects
#[derive(Debug, Default)]
pub struct FxSystem {
    effects: Vec<BattleFx>,
}

impl FxSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(
        &mut self,
        set: Option<Arc<AnimationSet>>,
        dir: Direction,
        pos: Vec2,
        terminal_clip: &'static str,
    ) -> &mut BattleFx {
        self.effects.push(BattleFx::new(set, dir, pos, terminal_clip));
        let last = self.effects.len() - 1;
        &mut self.effects[last]
    }

    /// Advance every effect and drop the finished ones
    pub fn update(&mut self) {
        for fx in &mut self.effects {
            fx.update();
        }
        self.effects.retain(|fx| fx.alive);
    }

    pub fn iter(&self) -> impl Iterator<Item = &BattleFx> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}
