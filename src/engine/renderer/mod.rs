// Render-facing data produced by the simulation
//
// Nothing here touches the GPU. The battle exposes interpolated quads and a
// camera; the presentation layer uploads them however it likes.

pub mod camera;
pub mod sprite;

pub use camera::BattleCamera;
pub use sprite::{DrawList, SpriteQuad};
