// GPU-ready sprite quads

use bytemuck::{Pod, Zeroable};

use crate::common::{FRect, IRect};

/// One textured quad in world space
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteQuad {
    /// Destination rectangle (x, y, w, h) in world units
    pub dest: [f32; 4],
    /// Source rectangle on the sprite sheet in pixels
    pub src: [f32; 4],
    /// Rotation about the quad center, radians
    pub rotation: f32,
    /// Non-zero to mirror horizontally
    pub flip: u32,
    /// Non-zero to draw as a solid white silhouette
    pub flash: u32,
    /// Opacity
    pub alpha: f32,
}

impl SpriteQuad {
    pub fn new(dest: FRect, src: IRect) -> Self {
        Self {
            dest: [dest.x, dest.y, dest.w, dest.h],
            src: [src.x as f32, src.y as f32, src.w as f32, src.h as f32],
            rotation: 0.0,
            flip: 0,
            flash: 0,
            alpha: 1.0,
        }
    }

    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    pub fn with_flip(mut self, flip: bool) -> Self {
        self.flip = flip as u32;
        self
    }

    pub fn with_flash(mut self, flash: bool) -> Self {
        self.flash = flash as u32;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }
}

/// Quads for one rendered frame, grouped by draw layer
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    pub characters: Vec<SpriteQuad>,
    pub projectiles: Vec<SpriteQuad>,
    pub effects: Vec<SpriteQuad>,
    pub particles: Vec<SpriteQuad>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// All quads in back-to-front draw order
    pub fn iter(&self) -> impl Iterator<Item = &SpriteQuad> {
        self.characters
            .iter()
            .chain(&self.projectiles)
            .chain(&self.effects)
            .chain(&self.particles)
    }

    pub fn len(&self) -> usize {
        self.characters.len() + self.projectiles.len() + self.effects.len() + self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattened bytes ready for a vertex/instance buffer upload
    pub fn to_bytes(&self) -> Vec<u8> {
        let quads: Vec<SpriteQuad> = self.iter().copied().collect();
        bytemuck::cast_slice(&quads).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_layout() {
        assert_eq!(std::mem::size_of::<SpriteQuad>(), 48);
    }

    #[test]
    fn test_builder_flags() {
        let quad = SpriteQuad::new(FRect::new(0.0, 0.0, 16.0, 16.0), IRect::new(1, 2, 3, 4))
            .with_flip(true)
            .with_flash(true)
            .with_alpha(0.1)
            .with_rotation(1.5);
        assert_eq!(quad.src, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(quad.flip, 1);
        assert_eq!(quad.flash, 1);
        assert_eq!(quad.alpha, 0.1);
        assert_eq!(quad.rotation, 1.5);
    }

    #[test]
    fn test_draw_list_bytes() {
        let mut list = DrawList::new();
        assert!(list.is_empty());
        let quad = SpriteQuad::new(FRect::default(), IRect::default());
        list.characters.push(quad);
        list.particles.push(quad);
        assert_eq!(list.len(), 2);
        assert_eq!(list.to_bytes().len(), 96);
    }
}
