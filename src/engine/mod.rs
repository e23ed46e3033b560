// Engine modules: timing, animation, audio, randomness, render snapshots

pub mod animation;
pub mod audio;
pub mod game_loop;
pub mod random;
pub mod renderer;
pub mod sprites;
