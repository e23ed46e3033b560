// Frame-based sprite animation

use std::collections::HashMap;
use std::sync::Arc;

use crate::common::IRect;

/// A single frame: where on the sprite sheet, and for how many ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationFrame {
    /// Source region on the sprite sheet
    pub rect: IRect,
    /// Number of ticks this frame stays on screen
    pub duration: u32,
}

impl AnimationFrame {
    pub const fn new(rect: IRect, duration: u32) -> Self {
        Self { rect, duration }
    }
}

/// An ordered sequence of frames, optionally chaining into another clip
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationClip {
    pub frames: Vec<AnimationFrame>,
    /// Clip to switch to once this one wraps (empty = keep looping)
    pub next: String,
}

impl AnimationClip {
    /// Create a looping clip
    pub fn new(frames: Vec<AnimationFrame>) -> Self {
        Self {
            frames,
            next: String::new(),
        }
    }

    /// Create a clip with exactly one frame
    pub fn single_frame(rect: IRect, duration: u32) -> Self {
        Self::new(vec![AnimationFrame::new(rect, duration)])
    }

    /// Chain into `next` after the last frame
    pub fn with_next(mut self, next: &str) -> Self {
        self.next = next.to_string();
        self
    }

    /// Total length of one cycle in ticks
    pub fn total_duration(&self) -> u32 {
        self.frames.iter().map(|f| f.duration).sum()
    }
}

/// Named clips for one sprite archetype
#[derive(Debug, Clone, Default)]
pub struct AnimationSet {
    clips: HashMap<String, AnimationClip>,
}

impl AnimationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style clip registration
    pub fn with_clip(mut self, name: &str, clip: AnimationClip) -> Self {
        self.add_clip(name, clip);
        self
    }

    pub fn add_clip(&mut self, name: &str, clip: AnimationClip) {
        self.clips.insert(name.to_string(), clip);
    }

    pub fn get(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Read-only collection of animation sets, indexed by sprite id
#[derive(Debug, Clone, Default)]
pub struct AnimationLibrary {
    sets: Vec<Arc<AnimationSet>>,
}

impl AnimationLibrary {
    pub fn new(sets: Vec<AnimationSet>) -> Self {
        Self {
            sets: sets.into_iter().map(Arc::new).collect(),
        }
    }

    /// Look up the set for a sprite id; `None` for out-of-range ids
    pub fn get(&self, sprite_id: u32) -> Option<Arc<AnimationSet>> {
        self.sets.get(sprite_id as usize).cloned()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Playback state over a shared animation set.
///
/// The set itself is shared content; the animator only owns the cursor. Clip
/// names that are not in the set are ignored rather than reported.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    set: Option<Arc<AnimationSet>>,
    current: String,
    frame_index: usize,
    counter: u32,
}

impl Animator {
    /// Create an animator bound to `set`, starting on the unnamed clip
    pub fn new(set: Option<Arc<AnimationSet>>) -> Self {
        Self {
            set,
            current: String::new(),
            frame_index: 0,
            counter: 0,
        }
    }

    /// Rebind the set without touching playback state
    pub fn set_animation_set(&mut self, set: Option<Arc<AnimationSet>>) {
        self.set = set;
    }

    /// Switch to `name` from its first frame.
    ///
    /// Does nothing when already playing `name` or when the set has no such
    /// clip.
    pub fn set_animation(&mut self, name: &str) {
        if self.current == name {
            return;
        }

        let Some(set) = &self.set else {
            return;
        };

        if set.contains(name) {
            self.current = name.to_string();
            self.reset();
        }
    }

    /// Rewind the current clip to its first frame
    pub fn reset(&mut self) {
        self.frame_index = 0;
        self.counter = 0;
    }

    /// Advance one tick
    pub fn update(&mut self) {
        let Some(set) = &self.set else {
            return;
        };
        let Some(clip) = set.get(&self.current) else {
            return;
        };
        let Some(frame) = clip.frames.get(self.frame_index) else {
            return;
        };

        self.counter += 1;
        if self.counter < frame.duration {
            return;
        }

        self.counter = 0;
        self.frame_index += 1;

        if self.frame_index >= clip.frames.len() {
            self.frame_index = 0;
            if !clip.next.is_empty() && set.contains(&clip.next) {
                self.current = clip.next.clone();
            }
        }
    }

    /// Name of the clip being played
    pub fn current_animation(&self) -> &str {
        &self.current
    }

    pub fn current_frame(&self) -> usize {
        self.frame_index
    }

    pub fn current_clip(&self) -> Option<&AnimationClip> {
        self.set.as_ref()?.get(&self.current)
    }

    /// Source rectangle of the frame on screen, if a valid clip is bound
    pub fn current_rect(&self) -> Option<IRect> {
        self.current_clip()?
            .frames
            .get(self.frame_index)
            .map(|frame| frame.rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn door_set() -> Arc<AnimationSet> {
        Arc::new(
            AnimationSet::new()
                .with_clip("closed", AnimationClip::single_frame(IRect::new(0, 0, 16, 16), 8))
                .with_clip("open", AnimationClip::single_frame(IRect::new(0, 48, 16, 16), 8))
                .with_clip(
                    "closed-open",
                    AnimationClip::new(vec![
                        AnimationFrame::new(IRect::new(0, 16, 16, 16), 1),
                        AnimationFrame::new(IRect::new(0, 32, 16, 16), 1),
                    ])
                    .with_next("open"),
                ),
        )
    }

    fn walk_set() -> Arc<AnimationSet> {
        Arc::new(AnimationSet::new().with_clip(
            "walk",
            AnimationClip::new(vec![
                AnimationFrame::new(IRect::new(0, 0, 16, 16), 3),
                AnimationFrame::new(IRect::new(16, 0, 16, 16), 3),
                AnimationFrame::new(IRect::new(32, 0, 16, 16), 3),
            ]),
        ))
    }

    #[test]
    fn test_clip_duration() {
        let set = walk_set();
        assert_eq!(set.get("walk").map(|c| c.total_duration()), Some(9));
    }

    #[test]
    fn test_set_animation_resets_playback() {
        let mut anim = Animator::new(Some(door_set()));
        anim.set_animation("closed-open");
        anim.update();
        assert_eq!(anim.current_frame(), 1);

        anim.set_animation("closed");
        assert_eq!(anim.current_animation(), "closed");
        assert_eq!(anim.current_frame(), 0);
    }

    #[test]
    fn test_set_same_animation_is_noop() {
        let mut anim = Animator::new(Some(walk_set()));
        anim.set_animation("walk");
        for _ in 0..3 {
            anim.update();
        }
        assert_eq!(anim.current_frame(), 1);

        anim.set_animation("walk");
        assert_eq!(anim.current_frame(), 1);
    }

    #[test]
    fn test_unknown_animation_ignored() {
        let mut anim = Animator::new(Some(walk_set()));
        anim.set_animation("walk");
        anim.set_animation("fly");
        assert_eq!(anim.current_animation(), "walk");
    }

    #[test]
    fn test_loop_without_next_clip() {
        let mut anim = Animator::new(Some(walk_set()));
        anim.set_animation("walk");

        // 3 frames x 3 ticks
        for _ in 0..8 {
            anim.update();
        }
        assert_eq!(anim.current_frame(), 2);

        anim.update();
        assert_eq!(anim.current_frame(), 0);
        assert_eq!(anim.current_animation(), "walk");
        assert_eq!(anim.current_rect(), Some(IRect::new(0, 0, 16, 16)));
    }

    #[test]
    fn test_chains_into_next_clip() {
        let mut anim = Animator::new(Some(door_set()));
        anim.set_animation("closed-open");

        anim.update();
        assert_eq!(anim.current_animation(), "closed-open");
        assert_eq!(anim.current_frame(), 1);

        anim.update();
        assert_eq!(anim.current_animation(), "open");
        assert_eq!(anim.current_frame(), 0);
        assert_eq!(anim.current_rect(), Some(IRect::new(0, 48, 16, 16)));
    }

    #[test]
    fn test_missing_next_clip_keeps_looping() {
        let set = Arc::new(AnimationSet::new().with_clip(
            "spin",
            AnimationClip::single_frame(IRect::new(0, 0, 4, 4), 1).with_next("nowhere"),
        ));
        let mut anim = Animator::new(Some(set));
        anim.set_animation("spin");
        anim.update();
        anim.update();
        assert_eq!(anim.current_animation(), "spin");
    }

    #[test]
    fn test_rebinding_set_keeps_cursor() {
        let mut anim = Animator::new(Some(walk_set()));
        anim.set_animation("walk");
        for _ in 0..3 {
            anim.update();
        }
        anim.set_animation_set(Some(walk_set()));
        assert_eq!(anim.current_frame(), 1);
    }

    #[test]
    fn test_unbound_animator_is_inert() {
        let mut anim = Animator::new(None);
        anim.set_animation("walk");
        anim.update();
        assert_eq!(anim.current_animation(), "");
        assert!(anim.current_rect().is_none());
    }

    #[test]
    fn test_library_lookup() {
        let library = AnimationLibrary::new(vec![AnimationSet::new(), AnimationSet::new()]);
        assert_eq!(library.len(), 2);
        assert!(library.get(1).is_some());
        assert!(library.get(2).is_none());
    }
}
