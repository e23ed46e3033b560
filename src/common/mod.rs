// Shared primitives: math helpers, rectangles, facing

pub mod direction;
pub mod math;
pub mod rect;

pub use direction::Direction;
pub use rect::{FRect, IRect};
