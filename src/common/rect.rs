// Axis-aligned rectangles for sprite regions and hitboxes

use glam::Vec2;

/// Integer rectangle, used for sprite sheet regions and world hitboxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl IRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// A `size` x `size` box centered on a world position (corner truncated toward zero)
    pub fn centered(center: Vec2, size: i32) -> Self {
        let half = (size / 2) as f32;
        Self::new(
            (center.x - half) as i32,
            (center.y - half) as i32,
            size,
            size,
        )
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Center point in world space
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.w as f32 / 2.0,
            self.y as f32 + self.h as f32 / 2.0,
        )
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.left() && px < self.right() && py >= self.top() && py <= self.bottom()
    }

    /// Grow the rectangle by `dx`/`dy` on every side
    pub fn inflate(&mut self, dx: i32, dy: i32) {
        self.x -= dx;
        self.w += 2 * dx;
        self.y -= dy;
        self.h += 2 * dy;
    }

    /// Overlapping region of two rectangles.
    ///
    /// Edges are inclusive: rectangles that merely touch produce a zero-width
    /// (or zero-height) intersection rather than `None`.
    pub fn intersect(&self, other: &IRect) -> Option<IRect> {
        let xmin = self.x.max(other.x);
        let ymin = self.y.max(other.y);
        let xmax = self.right().min(other.right());
        let ymax = self.bottom().min(other.bottom());

        if xmax < xmin || ymax < ymin {
            None
        } else {
            Some(IRect::new(xmin, ymin, xmax - xmin, ymax - ymin))
        }
    }

    pub fn intersects(&self, other: &IRect) -> bool {
        self.intersect(other).is_some()
    }
}

/// Floating point rectangle, used for interpolated render placement
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl FRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// A square of side `size` centered on `center`
    pub fn centered(center: Vec2, size: f32) -> Self {
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = IRect::new(2, 3, 10, 20);
        assert_eq!(r.left(), 2);
        assert_eq!(r.top(), 3);
        assert_eq!(r.right(), 12);
        assert_eq!(r.bottom(), 23);
    }

    #[test]
    fn test_centered_hitbox() {
        let r = IRect::centered(Vec2::new(50.0, 20.0), 16);
        assert_eq!(r, IRect::new(42, 12, 16, 16));
        assert_eq!(r.center(), Vec2::new(50.0, 20.0));
    }

    #[test]
    fn test_intersect_overlap() {
        let a = IRect::new(0, 0, 10, 10);
        let b = IRect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Some(IRect::new(5, 5, 5, 5)));
    }

    #[test]
    fn test_intersect_touching_edges_counts() {
        let a = IRect::new(0, 0, 10, 10);
        let b = IRect::new(10, 0, 10, 10);
        assert_eq!(a.intersect(&b), Some(IRect::new(10, 0, 0, 10)));
    }

    #[test]
    fn test_intersect_disjoint() {
        let a = IRect::new(0, 0, 10, 10);
        let b = IRect::new(11, 0, 10, 10);
        assert!(a.intersect(&b).is_none());
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_inflate_and_translate() {
        let mut r = IRect::new(0, 0, 4, 4);
        r.inflate(1, 2);
        assert_eq!(r, IRect::new(-1, -2, 6, 8));
        r.translate(1, 2);
        assert_eq!(r, IRect::new(0, 0, 6, 8));
    }

    #[test]
    fn test_contains() {
        let r = IRect::new(0, 0, 4, 4);
        assert!(r.contains(0, 0));
        assert!(!r.contains(4, 0));
    }
}
