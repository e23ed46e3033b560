use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use ragworm_battle::common::Direction;
use ragworm_battle::engine::audio::NullAudio;
use ragworm_battle::engine::game_loop::{GameLoop, TICK_RATE};
use ragworm_battle::game::battle::{
    BattleConfig, BattleField, BattleInput, BattleOutcome, BattleSession, BuiltinStages,
    EncounterChoice, MeshFileSource, PlayerLoadout, PlayerStats, StageGeometrySource,
};

mod cli;

/// Closer than this and the autopilot stops walking in
const ENGAGE_DISTANCE: f32 = 80.0;
/// Hop when a hostile gets this close
const DODGE_DISTANCE: f32 = 24.0;

/// Scripted player: walk up to the nearest hostile and keep throwing
#[derive(Debug, Default)]
struct Autopilot {
    tick: u32,
}

impl Autopilot {
    fn input(&mut self, field: &BattleField) -> BattleInput {
        self.tick += 1;
        let mut input = BattleInput::default();

        let player = field.player();
        if !player.alive {
            return input;
        }

        let nearest = field
            .characters()
            .iter()
            .enumerate()
            .filter(|(i, c)| *i != field.player_index() && c.alive)
            .map(|(_, c)| c.pos.x - player.pos.x)
            .min_by(|a, b| a.abs().total_cmp(&b.abs()));

        let Some(dx) = nearest else {
            return input;
        };

        let towards = if dx < 0.0 {
            Direction::Left
        } else {
            Direction::Right
        };
        if dx.abs() > ENGAGE_DISTANCE || player.facing != towards {
            input.left = towards == Direction::Left;
            input.right = towards == Direction::Right;
        }

        input.jump = dx.abs() < DODGE_DISTANCE && self.tick % 30 == 0;
        input.skill1 = self.tick % 10 == 0;
        input.skill2 = self.tick % 90 == 45;
        input
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = cli::parse_args();

    let config = BattleConfig {
        stage: args.stage.clone(),
        encounter: if args.boss {
            EncounterChoice::FinalBoss
        } else {
            EncounterChoice::Random(args.encounter_set)
        },
        seed: args.seed,
        ..Default::default()
    };

    let mut loadout = if args.unlock_all {
        PlayerLoadout::unlocked(args.level)
    } else {
        PlayerLoadout {
            stats: PlayerStats::new(args.level),
            ..Default::default()
        }
    };

    let mut geometry: Box<dyn StageGeometrySource> = match &args.assets {
        Some(root) => Box::new(MeshFileSource::new(root)),
        None => Box::new(BuiltinStages),
    };

    let mut session = BattleSession::enter(&config, loadout, NullAudio, geometry.as_mut())
        .with_context(|| format!("Failed to set up battle on {}", args.stage))?;

    info!(
        "Fighting {:?} on {}",
        session.encounter().monsters().collect::<Vec<_>>(),
        session.stage().name
    );

    let mut autopilot = Autopilot::default();

    if args.realtime {
        let mut game_loop = GameLoop::new();
        while !session.is_finished() && session.tick() < args.ticks {
            for _ in 0..game_loop.begin_frame() {
                let input = autopilot.input(session.field());
                session.update(&input);
            }
            let frame = session.draw_list(game_loop.alpha());
            log::trace!("frame {}: {} quads", game_loop.frame_count(), frame.len());
            std::thread::sleep(Duration::from_millis(4));
        }
    } else {
        while !session.is_finished() && session.tick() < args.ticks {
            let input = autopilot.input(session.field());
            session.update(&input);
        }
    }

    let seconds = session.tick() as f32 / TICK_RATE as f32;
    match session.outcome() {
        Some(BattleOutcome::Win { exp }) => {
            let gained = loadout.stats.add_exp(exp);
            info!(
                "Won after {:.1}s: {} exp, {} level(s) gained, now level {}",
                seconds, exp, gained, loadout.stats.level
            );
        }
        Some(BattleOutcome::Lose) => info!("Lost after {:.1}s", seconds),
        None => info!("No result after {:.1}s", seconds),
    }

    Ok(())
}
