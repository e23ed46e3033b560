// Battle session: sets up a field from config and runs it to an outcome

use std::sync::Arc;

use glam::Vec2;

use crate::engine::audio::{AudioHandle, AudioService};
use crate::engine::game_loop::TickTimer;
use crate::engine::random::GameRng;
use crate::engine::renderer::{BattleCamera, DrawList};
use crate::engine::sprites;

use super::character_info::Archetype;
use super::encounter::{encounter_set, Encounter, FINAL_BOSS_ENCOUNTER};
use super::error::{BattleError, Result};
use super::field::BattleField;
use super::player::{BattleInput, PlayerDriver, PlayerLoadout, DEFAULT_SHADOW_ECHO_DELAY};
use super::services::BattleServices;
use super::stage::{stage, StageGeometrySource, StageMesh, StageProperties};

pub const BATTLE_MUSIC: &str = "make_your_stand";
/// Player spawns this far in from the left wall
const PLAYER_SPAWN_INSET: f32 = 16.0;
/// First monster spawns this far in from the right wall
const MONSTER_SPAWN_INSET: f32 = 16.0;
/// Gap between consecutive monster spawns
const MONSTER_SPAWN_SPACING: f32 = 32.0;
/// Camera looks slightly above its subject
const CAMERA_LIFT: Vec2 = Vec2::new(0.0, 8.0);

/// How the monsters for a battle are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterChoice {
    /// Uniformly from the encounter set with this id
    Random(u32),
    Fixed(Encounter),
    FinalBoss,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BattleConfig {
    pub stage: String,
    pub encounter: EncounterChoice,
    /// Fixed seed for reproducible battles
    pub seed: Option<u64>,
    pub fade_in_seconds: f64,
    pub fade_out_seconds: f64,
    pub shadow_echo_delay: f64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            stage: "bf_dungeon".to_string(),
            encounter: EncounterChoice::Random(0),
            seed: None,
            fade_in_seconds: 3.0,
            fade_out_seconds: 1.0,
            shadow_echo_delay: DEFAULT_SHADOW_ECHO_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Win { exp: i32 },
    Lose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    /// Opening transition; nobody thinks
    FadeIn,
    Fighting,
    /// Result decided, fading out
    FadeOut(BattleOutcome),
    Finished(BattleOutcome),
}

/// One battle from setup to result
#[derive(Debug)]
pub struct BattleSession<A: AudioService> {
    field: BattleField,
    driver: PlayerDriver,
    camera: BattleCamera,
    stage: &'static StageProperties,
    mesh: StageMesh,
    encounter: Encounter,
    audio: A,
    rng: GameRng,
    music: AudioHandle,
    phase: BattlePhase,
    fade_timer: TickTimer,
    fade_out_seconds: f64,
    tick: u32,
}

impl<A: AudioService> BattleSession<A> {
    /// Build the field for `config` and start the opening transition
    pub fn enter(
        config: &BattleConfig,
        loadout: PlayerLoadout,
        mut audio: A,
        geometry: &mut dyn StageGeometrySource,
    ) -> Result<Self> {
        let stage = stage(&config.stage)?;
        let mesh = geometry.load(stage)?;
        let bounds = mesh.playable_bounds(stage);

        let mut rng = match config.seed {
            Some(seed) => GameRng::seeded(seed),
            None => GameRng::from_entropy(),
        };

        let encounter = match config.encounter {
            EncounterChoice::Random(set_id) => *encounter_set(set_id)?.random_encounter(&mut rng),
            EncounterChoice::Fixed(encounter) => encounter,
            EncounterChoice::FinalBoss => FINAL_BOSS_ENCOUNTER,
        };
        if encounter.is_empty() {
            return Err(BattleError::EmptyEncounter);
        }

        let library = Arc::new(sprites::standard_library());
        for archetype in std::iter::once(Archetype::Player).chain(encounter.monsters()) {
            let sprite_id = archetype.info().sprite_id;
            if library.get(sprite_id).is_none() {
                return Err(BattleError::UnknownSprite(sprite_id));
            }
        }

        let mut field = BattleField::new(library, bounds);
        let player = field.spawn_character(
            Archetype::Player,
            Vec2::new(bounds.left + PLAYER_SPAWN_INSET, 0.0),
            &mut rng,
        );

        let mut x = bounds.right - MONSTER_SPAWN_INSET;
        for monster in encounter.monsters() {
            field.spawn_character(monster, bounds.clamp_to_bounds(Vec2::new(x, 0.0)), &mut rng);
            x -= MONSTER_SPAWN_SPACING;
        }

        field.set_player_index(player);
        let p = field.player_mut();
        p.life = loadout.stats.max_life();
        p.power = loadout.stats.power();

        field.settle();

        let mut camera = BattleCamera::new();
        camera.tracking_rate = BattleCamera::TRACK_RATE_OPENING;
        if let Some(last) = field.characters().last() {
            camera.center_on(last.pos + CAMERA_LIFT);
            camera.set_target(last.pos + CAMERA_LIFT);
        }

        let music = audio.play_music(BATTLE_MUSIC);

        log::info!(
            "Battle on {} against {} monster(s), player level {}",
            stage.name,
            encounter.len(),
            loadout.stats.level
        );

        Ok(Self {
            field,
            driver: PlayerDriver::new(loadout, config.shadow_echo_delay),
            camera,
            stage,
            mesh,
            encounter,
            audio,
            rng,
            music,
            phase: BattlePhase::FadeIn,
            fade_timer: TickTimer::from_seconds(0, config.fade_in_seconds),
            fade_out_seconds: config.fade_out_seconds,
            tick: 0,
        })
    }

    /// Advance one tick with this tick's input
    pub fn update(&mut self, input: &BattleInput) -> BattlePhase {
        let now = self.tick;

        match self.phase {
            BattlePhase::Finished(_) => return self.phase,
            BattlePhase::FadeIn if self.fade_timer.expired(now) => {
                self.camera.tracking_rate = BattleCamera::TRACK_RATE_NORMAL;
                self.phase = BattlePhase::Fighting;
                log::info!("Battle started");
            }
            BattlePhase::FadeOut(outcome) => {
                if self.fade_timer.expired(now) {
                    self.music.set_volume(0.0);
                    self.music.stop();
                    self.phase = BattlePhase::Finished(outcome);
                    log::info!("Battle finished: {:?}", outcome);
                    return self.phase;
                }
                self.music
                    .set_volume(1.0 - self.fade_timer.progress(now) as f32);
            }
            _ => {}
        }

        let fighting = self.phase == BattlePhase::Fighting;
        let mut services = BattleServices::new(&mut self.audio, &mut self.rng);

        if fighting {
            self.driver
                .handle_presses(&mut self.field, input, now, &mut services);
        }

        self.field
            .update(self.phase == BattlePhase::FadeIn, &mut services);

        if fighting {
            self.driver.apply_movement(&mut self.field, input);
        }

        self.driver.update(&mut self.field, now, &mut services);

        if matches!(self.phase, BattlePhase::Fighting | BattlePhase::FadeOut(_)) {
            self.camera.set_target(self.field.player().pos + CAMERA_LIFT);
        }
        self.camera.update();

        if fighting {
            if !self.field.hostiles_alive() {
                self.begin_fade_out(BattleOutcome::Win {
                    exp: self.field.calc_exp_value(),
                });
            } else if !self.field.player().alive {
                self.begin_fade_out(BattleOutcome::Lose);
            }
        }

        self.tick += 1;
        self.phase
    }

    fn begin_fade_out(&mut self, outcome: BattleOutcome) {
        log::info!("Battle decided: {:?}", outcome);
        self.phase = BattlePhase::FadeOut(outcome);
        self.fade_timer = TickTimer::from_seconds(self.tick, self.fade_out_seconds);
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::FadeOut(outcome) | BattlePhase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, BattlePhase::Finished(_))
    }

    /// Ticks run so far
    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn field(&self) -> &BattleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut BattleField {
        &mut self.field
    }

    pub fn camera(&self) -> &BattleCamera {
        &self.camera
    }

    pub fn stage(&self) -> &'static StageProperties {
        self.stage
    }

    pub fn mesh(&self) -> &StageMesh {
        &self.mesh
    }

    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn music_volume(&self) -> f32 {
        self.music.volume()
    }

    /// Opacity of the black fade overlay
    pub fn fade_alpha(&self) -> f32 {
        let progress = self.fade_timer.progress(self.tick).clamp(0.0, 1.0) as f32;
        match self.phase {
            BattlePhase::FadeIn => 1.0 - progress,
            BattlePhase::FadeOut(_) => progress,
            BattlePhase::Fighting => 0.0,
            BattlePhase::Finished(_) => 1.0,
        }
    }

    pub fn draw_list(&self, alpha: f32) -> DrawList {
        self.field
            .draw_list(alpha, self.driver.loadout().has_shadow_partner)
    }
}
