// Battle camera: eases toward a target every tick

use glam::{Mat4, Vec2, Vec3};

/// Side-on perspective camera that trails a target point
#[derive(Debug, Clone)]
pub struct BattleCamera {
    /// Current center in world space
    pub center: Vec2,
    /// Center at the previous tick, for interpolation
    pub prev_center: Vec2,
    /// Point the camera is easing toward
    pub target: Vec2,
    /// Fraction of the remaining distance covered each tick
    pub tracking_rate: f32,
}

impl BattleCamera {
    /// Slow drift used while the battle fades in
    pub const TRACK_RATE_OPENING: f32 = 0.02;
    /// Normal follow rate
    pub const TRACK_RATE_NORMAL: f32 = 0.2;

    /// Distance of the eye from the battle plane
    const EYE_DISTANCE: f32 = 150.0;
    /// Eye is raised slightly above the look-at point
    const EYE_LIFT: f32 = 10.0;

    pub fn new() -> Self {
        Self {
            center: Vec2::ZERO,
            prev_center: Vec2::ZERO,
            target: Vec2::ZERO,
            tracking_rate: Self::TRACK_RATE_NORMAL,
        }
    }

    /// Snap to `pos` with no interpolation from the old position
    pub fn center_on(&mut self, pos: Vec2) {
        self.center = pos;
        self.prev_center = pos;
    }

    pub fn set_target(&mut self, pos: Vec2) {
        self.target = pos;
    }

    /// Advance one tick
    pub fn update(&mut self) {
        self.prev_center = self.center;
        self.center = self.center.lerp(self.target, self.tracking_rate);
    }

    /// Center blended between the last two ticks
    pub fn interp_center(&self, alpha: f32) -> Vec2 {
        self.prev_center.lerp(self.center, alpha)
    }

    /// View matrix looking at the interpolated center
    pub fn view_matrix(&self, alpha: f32) -> Mat4 {
        let c = self.interp_center(alpha);
        let eye = Vec3::new(c.x, c.y + Self::EYE_LIFT, Self::EYE_DISTANCE);
        Mat4::look_at_rh(eye, c.extend(0.0), Vec3::Y)
    }

    /// Projection used by the battle view (2:1 internal resolution)
    pub fn projection_matrix() -> Mat4 {
        Mat4::perspective_rh_gl(std::f32::consts::FRAC_PI_4, 2.0, 1.0, 10_000.0)
    }
}

impl Default for BattleCamera {
    fn default() -> Self {
        Self::new()
    }
}
