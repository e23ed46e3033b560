// Cardinal facing directions

/// One of the four cardinal directions a battle object can face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Right,
    Up,
    Left,
    #[default]
    Down,
}

impl Direction {
    /// The opposite direction
    pub fn invert(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Horizontal sign: -1 for left, 1 for everything else
    pub fn horizontal_sign(self) -> f32 {
        if self == Self::Left {
            -1.0
        } else {
            1.0
        }
    }

    /// Name of the directional animation clip for this facing
    pub fn animation_name(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Up => "up",
            Self::Left => "left",
            Self::Down => "down",
        }
    }

    /// Sprites face right on the sheet; left-facing ones are mirrored
    pub fn should_flip(self) -> bool {
        self == Self::Left
    }
}
