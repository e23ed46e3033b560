//! Battle simulation core for a side-view 2D action RPG.
//!
//! The simulation is tick based and deterministic for a given seed and
//! input sequence. It produces draw lists and audio cues but never touches
//! a window, GPU or sound device itself.

pub mod common;
pub mod engine;
pub mod game;
