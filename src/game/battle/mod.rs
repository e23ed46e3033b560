// Side-view battle: field, characters, projectiles, skills and AI
//
// `BattleSession` is the entry point. It builds a `BattleField` from a
// stage and an encounter, then advances it one tick at a time.

pub mod character;
pub mod character_info;
pub mod controller;
pub mod encounter;
pub mod error;
pub mod field;
pub mod fx;
pub mod particle;
pub mod player;
pub mod projectile;
pub mod services;
pub mod session;
pub mod skill;
pub mod stage;

pub use character::{BattleCharacter, CharacterId};
pub use character_info::{Archetype, CharacterInfo};
pub use encounter::{encounter_set, Encounter, EncounterSet};
pub use error::{BattleError, Result};
pub use field::{BattleField, FieldBounds};
pub use player::{BattleInput, PlayerLoadout, PlayerStats};
pub use services::BattleServices;
pub use session::{BattleConfig, BattleOutcome, BattlePhase, BattleSession, EncounterChoice};
pub use stage::{BuiltinStages, MeshFileSource, StageGeometrySource};
