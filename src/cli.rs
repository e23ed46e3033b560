//! Command-line interface for the headless battle runner

use clap::Parser;
use std::path::PathBuf;

/// Run one battle without a window and report the result
#[derive(Parser, Debug)]
#[command(name = "ragworm-battle")]
#[command(about = "Headless side-view battle simulator")]
#[command(version)]
pub struct Args {
    /// Stage to fight on
    #[arg(long, default_value = "bf_dungeon")]
    pub stage: String,

    /// Encounter set to roll monsters from
    #[arg(long, default_value = "0")]
    pub encounter_set: u32,

    /// Fight the final boss instead of a random encounter
    #[arg(long)]
    pub boss: bool,

    /// Seed for a reproducible battle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Give up after this many ticks
    #[arg(long, default_value = "9000")]
    pub ticks: u32,

    /// Player level
    #[arg(long, default_value = "1")]
    pub level: i32,

    /// Unlock flash jump, avenger and shadow partner
    #[arg(long)]
    pub unlock_all: bool,

    /// Asset directory containing models/<stage>.bin; builtin geometry if omitted
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Pace ticks against the wall clock instead of running flat out
    #[arg(long)]
    pub realtime: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}
