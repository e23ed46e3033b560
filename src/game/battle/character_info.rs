// Static per-archetype character data

use std::fmt;

use crate::engine::random::GameRng;
use crate::engine::sprites::ids;

use super::controller::{
    BatController, Controller, GhostController, RagwormController, SkeletonController,
    SlimeController,
};

/// Builds a fresh controller for a newly spawned character
pub type ControllerFactory = fn(&mut GameRng) -> Box<dyn Controller>;

/// Immutable data shared by every character of one archetype
pub struct CharacterInfo {
    /// Display name
    pub name: &'static str,

    // Combat
    pub max_life: i32,
    /// Experience granted when the battle is won
    pub exp: i32,

    // Movement
    /// Maximum horizontal speed (units/tick)
    pub speed: f32,
    /// Vertical impulse applied by a jump
    pub jump: f32,
    /// Horizontal velocity multiplier applied every grounded tick
    pub friction: f32,
    /// Fraction of `speed` added per tick of ground movement
    pub thrust: f32,

    // Presentation
    pub sprite_id: u32,
    /// Cue played when this character is struck
    pub hurt_sound: &'static str,
    /// Particle sprite sprayed when this character is struck
    pub hurt_particle_sprite_id: u32,

    /// AI factory; `None` for externally driven characters
    pub controller: Option<ControllerFactory>,
}

impl fmt::Debug for CharacterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharacterInfo")
            .field("name", &self.name)
            .field("max_life", &self.max_life)
            .field("speed", &self.speed)
            .field("sprite_id", &self.sprite_id)
            .field("has_controller", &self.controller.is_some())
            .finish_non_exhaustive()
    }
}

/// Every kind of character that can take part in a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    Player,
    Slime,
    Skeleton,
    Bat,
    Ghost,
    Spider,
    Ragworm,
}

impl Archetype {
    pub const ALL: [Archetype; 7] = [
        Archetype::Player,
        Archetype::Slime,
        Archetype::Skeleton,
        Archetype::Bat,
        Archetype::Ghost,
        Archetype::Spider,
        Archetype::Ragworm,
    ];

    /// The shared table entry for this archetype
    pub fn info(self) -> &'static CharacterInfo {
        match self {
            Archetype::Player => &PLAYER,
            Archetype::Slime => &SLIME,
            Archetype::Skeleton => &SKELETON,
            Archetype::Bat => &BAT,
            Archetype::Ghost => &GHOST,
            Archetype::Spider => &SPIDER,
            Archetype::Ragworm => &RAGWORM,
        }
    }
}

fn create_slime(rng: &mut GameRng) -> Box<dyn Controller> {
    Box::new(SlimeController::new(rng))
}

fn create_skeleton(_rng: &mut GameRng) -> Box<dyn Controller> {
    Box::new(SkeletonController::new())
}

fn create_bat(_rng: &mut GameRng) -> Box<dyn Controller> {
    Box::new(BatController::new())
}

fn create_ghost(_rng: &mut GameRng) -> Box<dyn Controller> {
    Box::new(GhostController::new())
}

fn create_ragworm(_rng: &mut GameRng) -> Box<dyn Controller> {
    Box::new(RagwormController::new())
}

pub static PLAYER: CharacterInfo = CharacterInfo {
    name: "Player",
    max_life: 5,
    exp: 0,
    speed: 4.0,
    jump: 4.0,
    friction: 0.65,
    thrust: 0.5,
    sprite_id: ids::HUMAN_1,
    hurt_sound: "stab",
    hurt_particle_sprite_id: ids::BLOOD,
    controller: None,
};

pub static SLIME: CharacterInfo = CharacterInfo {
    name: "Slime",
    max_life: 5,
    exp: 1,
    // Slides around, big hops
    speed: 2.0,
    jump: 5.0,
    friction: 0.98,
    thrust: 0.1,
    sprite_id: ids::SLIME,
    hurt_sound: "slime0",
    hurt_particle_sprite_id: ids::SLIME_BLOOD,
    controller: Some(create_slime),
};

pub static SKELETON: CharacterInfo = CharacterInfo {
    name: "Skeleton",
    max_life: 15,
    exp: 3,
    speed: 2.5,
    jump: 3.0,
    friction: 0.65,
    thrust: 0.7,
    sprite_id: ids::SKELETON,
    hurt_sound: "bone",
    hurt_particle_sprite_id: ids::BONE_PARTICLE,
    controller: Some(create_skeleton),
};

pub static BAT: CharacterInfo = CharacterInfo {
    name: "Bat",
    max_life: 15,
    exp: 5,
    speed: 3.0,
    jump: 0.0,
    friction: 0.98,
    thrust: 1.0,
    sprite_id: ids::BAT,
    hurt_sound: "stab",
    hurt_particle_sprite_id: ids::BLOOD,
    controller: Some(create_bat),
};

pub static GHOST: CharacterInfo = CharacterInfo {
    name: "Ghost",
    max_life: 30,
    exp: 10,
    speed: 2.5,
    jump: 3.0,
    friction: 0.65,
    thrust: 0.7,
    sprite_id: ids::GHOST,
    hurt_sound: "stab",
    hurt_particle_sprite_id: ids::GHOST_PARTICLE,
    controller: Some(create_ghost),
};

/// Walks like a skeleton
pub static SPIDER: CharacterInfo = CharacterInfo {
    name: "Spider",
    max_life: 15,
    exp: 10,
    speed: 2.5,
    jump: 3.0,
    friction: 0.65,
    thrust: 0.7,
    sprite_id: ids::SPIDER,
    hurt_sound: "stab",
    hurt_particle_sprite_id: ids::BLOOD,
    controller: Some(create_skeleton),
};

pub static RAGWORM: CharacterInfo = CharacterInfo {
    name: "Ragworm",
    max_life: 1000,
    exp: 1000,
    speed: 4.0,
    jump: 4.0,
    friction: 0.65,
    thrust: 0.5,
    sprite_id: ids::HUMAN_1,
    hurt_sound: "stab",
    hurt_particle_sprite_id: ids::BLOOD,
    controller: Some(create_ragworm),
};
