// Encounter tables: which monsters make up a wave

use crate::engine::random::GameRng;

use super::character_info::Archetype;
use super::character_info::Archetype::{Bat, Ghost, Ragworm, Skeleton, Slime};
use super::error::{BattleError, Result};

/// Most monsters a single encounter can hold
pub const ENCOUNTER_CAPACITY: usize = 8;

/// One wave of monsters; unused slots are `None`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encounter {
    pub enemies: [Option<Archetype>; ENCOUNTER_CAPACITY],
}

impl Encounter {
    /// Build from a list of monsters; anything past the capacity is dropped
    pub const fn of<const N: usize>(monsters: [Archetype; N]) -> Self {
        let mut enemies = [None; ENCOUNTER_CAPACITY];
        let mut i = 0;
        while i < N && i < ENCOUNTER_CAPACITY {
            enemies[i] = Some(monsters[i]);
            i += 1;
        }
        Self { enemies }
    }

    pub fn from_slice(monsters: &[Archetype]) -> Result<Self> {
        if monsters.is_empty() {
            return Err(BattleError::EmptyEncounter);
        }
        if monsters.len() > ENCOUNTER_CAPACITY {
            log::warn!(
                "Encounter of {} monsters truncated to {ENCOUNTER_CAPACITY}",
                monsters.len()
            );
        }

        let mut enemies = [None; ENCOUNTER_CAPACITY];
        for (slot, monster) in enemies.iter_mut().zip(monsters) {
            *slot = Some(*monster);
        }
        Ok(Self { enemies })
    }

    /// Monsters in spawn order
    pub fn monsters(&self) -> impl Iterator<Item = Archetype> + '_ {
        self.enemies.iter().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.monsters().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Encounters available on one stage
#[derive(Debug)]
pub struct EncounterSet {
    pub name: &'static str,
    pub encounters: &'static [Encounter],
}

impl EncounterSet {
    /// Pick one encounter uniformly at random
    pub fn random_encounter(&self, rng: &mut GameRng) -> &'static Encounter {
        let last = self.encounters.len() as i32 - 1;
        let index = rng.rand_int(0, last.max(0)) as usize;
        &self.encounters[index]
    }
}

static DUNGEON_ENCOUNTERS: [Encounter; 6] = [
    Encounter::of([Slime, Slime]),
    Encounter::of([Slime, Slime, Slime, Slime]),
    Encounter::of([Skeleton]),
    Encounter::of([Skeleton, Skeleton]),
    Encounter::of([Bat]),
    Encounter::of([Skeleton, Slime]),
];

static SANCTUM_ENCOUNTERS: [Encounter; 4] = [
    Encounter::of([Ghost, Slime, Ghost, Slime]),
    Encounter::of([Skeleton, Skeleton, Skeleton, Skeleton]),
    Encounter::of([Slime, Slime, Slime, Slime, Slime, Slime, Slime, Slime]),
    Encounter::of([Skeleton, Skeleton, Ghost, Ghost]),
];

static LAIR_ENCOUNTERS: [Encounter; 3] = [
    Encounter::of([Ghost, Ghost, Ghost, Ghost, Ghost]),
    Encounter::of([Ghost, Ghost, Ghost]),
    Encounter::of([Bat, Ghost, Ghost, Bat]),
];

pub static ENCOUNTER_SETS: [EncounterSet; 3] = [
    EncounterSet {
        name: "dungeon",
        encounters: &DUNGEON_ENCOUNTERS,
    },
    EncounterSet {
        name: "sanctum",
        encounters: &SANCTUM_ENCOUNTERS,
    },
    EncounterSet {
        name: "lair",
        encounters: &LAIR_ENCOUNTERS,
    },
];

pub static FINAL_BOSS_ENCOUNTER: Encounter = Encounter::of([Ragworm]);

/// Look up an encounter set by id
pub fn encounter_set(id: u32) -> Result<&'static EncounterSet> {
    ENCOUNTER_SETS
        .get(id as usize)
        .ok_or(BattleError::UnknownEncounterSet(id))
}
