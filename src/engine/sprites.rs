// Built-in sprite sheet content
//
// Every battle archetype, projectile, particle and effect refers to its
// animation set by index into this table.

use crate::common::IRect;

use super::animation::{AnimationClip, AnimationFrame, AnimationLibrary, AnimationSet};

/// Well-known sprite ids used by the battle code
pub mod ids {
    pub const HUMAN_1: u32 = 0;
    pub const SKELETON: u32 = 3;
    pub const SLIME: u32 = 4;
    pub const BAT: u32 = 5;
    pub const GHOST: u32 = 6;
    pub const SPIDER: u32 = 7;
    pub const FLAME: u32 = 8;
    pub const SPIKE: u32 = 9;
    pub const DOUBLE_THROW_FX: u32 = 10;
    pub const BLOOD: u32 = 11;
    pub const HIT_SPARK_FX: u32 = 12;
    pub const FLASH_JUMP_FX: u32 = 13;
    pub const AVENGER: u32 = 14;
    pub const SLIME_BLOOD: u32 = 15;
    pub const BONE_PARTICLE: u32 = 16;
    pub const GHOST_PARTICLE: u32 = 17;
    pub const GOLD_SPIKE: u32 = 18;
    pub const TRAIL_PARTICLE: u32 = 19;
}

/// Clip name one-shot effects must chain into when they finish
pub const DEAD_CLIP: &str = "dead";

/// Frame duration for character walk cycles
const WALK_FRAME_TICKS: u32 = 8;

fn rect(x: i32, y: i32, w: i32, h: i32) -> IRect {
    IRect::new(x, y, w, h)
}

/// Four-frame ping-pong walk cycle: 0, 1, 2, 1
fn walk_cycle(x: i32, y: i32) -> AnimationClip {
    ping_pong(x, y, WALK_FRAME_TICKS)
}

fn single(x: i32, y: i32) -> AnimationClip {
    AnimationClip::single_frame(rect(x, y, 16, 16), WALK_FRAME_TICKS)
}

/// "down"/"left"/"right"/"up" rows starting at (x, y)
fn directional(x: i32, y: i32) -> AnimationSet {
    AnimationSet::new()
        .with_clip("down", walk_cycle(x, y))
        .with_clip("left", walk_cycle(x, y + 16))
        .with_clip("right", walk_cycle(x, y + 32))
        .with_clip("up", walk_cycle(x, y + 48))
}

/// Horizontal strip of 16x16 frames, `ticks` each
fn strip(x: i32, y: i32, count: i32, step: i32, ticks: u32) -> AnimationClip {
    AnimationClip::new(
        (0..count)
            .map(|i| AnimationFrame::new(rect(x + i * step, y, 16, 16), ticks))
            .collect(),
    )
}

/// Plays `clip` once, then parks on an empty "dead" clip
fn one_shot(clip: AnimationClip) -> AnimationSet {
    AnimationSet::new()
        .with_clip("", clip.with_next(DEAD_CLIP))
        .with_clip(DEAD_CLIP, AnimationClip::single_frame(rect(0, 0, 16, 16), 8))
}

fn looping(clip: AnimationClip) -> AnimationSet {
    AnimationSet::new().with_clip("", clip)
}

fn ping_pong(x: i32, y: i32, ticks: u32) -> AnimationClip {
    AnimationClip::new(
        [0, 16, 32, 16]
            .into_iter()
            .map(|dx| AnimationFrame::new(rect(x + dx, y, 16, 16), ticks))
            .collect(),
    )
}

/// Build the standard sprite table
pub fn standard_library() -> AnimationLibrary {
    let sets = vec![
        // 00-02: player variants
        directional(320, 0)
            .with_clip(DEAD_CLIP, single(320, 128))
            .with_clip("dead2", single(320, 144)),
        directional(368, 0)
            .with_clip(DEAD_CLIP, single(336, 128))
            .with_clip("dead2", single(336, 144)),
        directional(416, 0)
            .with_clip(DEAD_CLIP, single(352, 128))
            .with_clip("dead2", single(352, 144)),
        // 03-07: monsters
        directional(464, 0).with_clip(DEAD_CLIP, single(320, 160)),
        directional(320, 64).with_clip(DEAD_CLIP, single(336, 160)),
        directional(368, 64).with_clip(DEAD_CLIP, single(352, 160)),
        directional(416, 64).with_clip(DEAD_CLIP, single(320, 176)),
        directional(464, 64).with_clip(DEAD_CLIP, single(336, 176)),
        // 08: flame
        looping(ping_pong(112, 160, 2)),
        // 09: spike
        looping(single(96, 160)),
        // 10: double throw
        one_shot(strip(160, 160, 7, 16, 2)),
        // 11: blood
        looping(single(16, 16)),
        // 12: hit spark
        one_shot(strip(160, 176, 3, 16, 2)),
        // 13: flash jump
        one_shot(strip(160, 192, 5, 16, 2)),
        // 14: avenger
        looping(AnimationClip::new(vec![
            AnimationFrame::new(rect(160, 208, 17, 17), 2),
            AnimationFrame::new(rect(192, 208, 17, 17), 2),
        ])),
        // 15-17: small particles
        looping(AnimationClip::single_frame(rect(150, 150, 4, 4), 2)),
        looping(AnimationClip::single_frame(rect(160, 144, 4, 3), 2)),
        looping(AnimationClip::single_frame(rect(176, 144, 3, 3), 2)),
        // 18: gold spike
        looping(single(192, 144)),
        // 19: trail
        looping(ping_pong(224, 192, 2)),
    ];

    AnimationLibrary::new(sets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::Animator;

    #[test]
    fn test_library_has_every_known_id() {
        let library = standard_library();
        assert_eq!(library.len(), 20);
        assert!(library.get(ids::TRAIL_PARTICLE).is_some());
        assert!(library.get(20).is_none());
    }

    #[test]
    fn test_characters_have_directional_and_dead_clips() {
        let library = standard_library();
        for id in [ids::HUMAN_1, ids::SKELETON, ids::SLIME, ids::BAT, ids::GHOST, ids::SPIDER] {
            let set = library.get(id).expect("character set");
            for clip in ["down", "left", "right", "up", DEAD_CLIP] {
                assert!(set.contains(clip), "sprite {id} missing {clip}");
            }
        }
    }

    #[test]
    fn test_one_shot_effects_end_on_dead_clip() {
        let library = standard_library();
        let mut anim = Animator::new(library.get(ids::HIT_SPARK_FX));

        // 3 frames x 2 ticks
        for _ in 0..5 {
            anim.update();
            assert_eq!(anim.current_animation(), "");
        }
        anim.update();
        assert_eq!(anim.current_animation(), DEAD_CLIP);
    }
}
