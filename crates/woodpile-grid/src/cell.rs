use serde::{Deserialize, Serialize};
use woodpile_core::{Point, Rect};

/// One addressable cell of the grid.
///
/// `rect` is in the same space as the tap that resolved it (image pixels).
/// Two cells are equal when row, column and rect all match.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
}

/// Integer pixel window `[left, right) × [top, bottom)` of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBounds {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl PixelBounds {
    #[inline]
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

impl GridCell {
    /// Position of `p` inside the cell as fractions of its size, clamped to `[0, 1]`.
    pub fn percent_offset(&self, p: Point) -> Point {
        let frac = |v: f32, lo: f32, extent: f32| {
            if extent > 0.0 {
                ((v - lo) / extent).clamp(0.0, 1.0)
            } else {
                0.0
            }
        };
        Point::new(
            frac(p.x, self.rect.left, self.rect.width()),
            frac(p.y, self.rect.top, self.rect.height()),
        )
    }

    /// Inverse of [`GridCell::percent_offset`].
    pub fn point_at(&self, offset: Point) -> Point {
        Point::new(
            self.rect.left + offset.x * self.rect.width(),
            self.rect.top + offset.y * self.rect.height(),
        )
    }

    /// Whole-pixel window covering the cell, for zooming into it.
    ///
    /// The window always lies inside the image and is at least 1×1.
    /// Returns `None` for an empty image.
    pub fn pixel_bounds(&self, image_width: u32, image_height: u32) -> Option<PixelBounds> {
        if image_width == 0 || image_height == 0 {
            return None;
        }
        let left = clamp_px(self.rect.left.floor(), 0, image_width - 1);
        let top = clamp_px(self.rect.top.floor(), 0, image_height - 1);
        let right = clamp_px(self.rect.right.ceil(), left + 1, image_width);
        let bottom = clamp_px(self.rect.bottom.ceil(), top + 1, image_height);
        Some(PixelBounds {
            left,
            top,
            right,
            bottom,
        })
    }
}

fn clamp_px(v: f32, lo: u32, hi: u32) -> u32 {
    if v.is_nan() || v <= lo as f32 {
        lo
    } else if v >= hi as f32 {
        hi
    } else {
        v as u32
    }
}
