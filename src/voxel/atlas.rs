//! Texture atlas tile lookup (16x16 tiles on one sheet)

use crate::core::types::Vec2;

/// Tiles per atlas side
pub const ATLAS_TILES: u8 = 16;

/// Inset applied to tiles on the last row/column so sampling never reaches
/// past the edge of the sheet
const EDGE_INSET: f32 = 0.0001;

/// One tile of the block atlas, addressed by column and row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AtlasTile {
    pub col: u8,
    pub row: u8,
}

impl AtlasTile {
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Normalized (min, max) texture coordinates of this tile
    pub fn uv_rect(&self) -> (Vec2, Vec2) {
        let step = 1.0 / ATLAS_TILES as f32;
        let min = Vec2::new(self.col as f32 * step, self.row as f32 * step);
        let inset = Vec2::new(
            if self.col < ATLAS_TILES - 1 { 0.0 } else { EDGE_INSET },
            if self.row < ATLAS_TILES - 1 { 0.0 } else { EDGE_INSET },
        );
        (min, min + Vec2::splat(step) - inset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tile() {
        let (min, max) = AtlasTile::new(0, 0).uv_rect();
        assert_eq!(min, Vec2::ZERO);
        assert_eq!(max, Vec2::splat(1.0 / 16.0));
    }

    #[test]
    fn test_edge_tiles_are_inset() {
        let (_, max) = AtlasTile::new(15, 3).uv_rect();
        assert!(max.x < 1.0);
        assert!((max.x - (1.0 - EDGE_INSET)).abs() < 1e-6);
        assert!((max.y - 4.0 / 16.0).abs() < 1e-6);

        let (_, max) = AtlasTile::new(15, 15).uv_rect();
        assert!(max.x < 1.0 && max.y < 1.0);
    }
}
