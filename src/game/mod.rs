// Game rules built on top of the engine

pub mod battle;
