//! Interactive crop-rectangle editing.
//!
//! The crop rect lives in canvas coordinates while the user drags it; the UI
//! converts it into image space with [`crate::ImageFit::canvas_rect_to_image`]
//! once confirmed.

use serde::{Deserialize, Serialize};

use crate::{Point, Rect};

/// Touch tolerance around corners and edges, in canvas pixels.
pub const DEFAULT_HANDLE_TOLERANCE: f32 = 30.0;
/// Smallest width/height a crop rect may be dragged down to.
pub const DEFAULT_MIN_CROP_SIZE: f32 = 20.0;

/// Part of the crop rect grabbed by a drag gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DragHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
    Move,
    #[default]
    None,
}

/// Crop-rect editing rules for one displayed image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropEditor {
    /// Area the crop rect must stay inside (the drawn image, canvas space).
    pub bounds: Rect,
    pub tolerance: f32,
    pub min_size: f32,
}

impl CropEditor {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            tolerance: DEFAULT_HANDLE_TOLERANCE,
            min_size: DEFAULT_MIN_CROP_SIZE,
        }
    }

    /// Which handle of `rect` sits under `p`.
    ///
    /// Corners win over edges, edges over the interior.
    pub fn hit_test(&self, p: Point, rect: &Rect) -> DragHandle {
        let tol = self.tolerance;
        let near = |a: f32, b: f32| (a - b).abs() <= tol;
        let within_x = p.x > rect.left && p.x < rect.right;
        let within_y = p.y > rect.top && p.y < rect.bottom;

        if near(p.x, rect.left) && near(p.y, rect.top) {
            return DragHandle::TopLeft;
        }
        if near(p.x, rect.right) && near(p.y, rect.top) {
            return DragHandle::TopRight;
        }
        if near(p.x, rect.left) && near(p.y, rect.bottom) {
            return DragHandle::BottomLeft;
        }
        if near(p.x, rect.right) && near(p.y, rect.bottom) {
            return DragHandle::BottomRight;
        }

        if near(p.y, rect.top) && within_x {
            return DragHandle::Top;
        }
        if near(p.y, rect.bottom) && within_x {
            return DragHandle::Bottom;
        }
        if near(p.x, rect.left) && within_y {
            return DragHandle::Left;
        }
        if near(p.x, rect.right) && within_y {
            return DragHandle::Right;
        }

        if within_x && within_y {
            return DragHandle::Move;
        }
        DragHandle::None
    }

    /// Start a brand-new crop at `p`: a zero-sized rect dragged by its
    /// bottom-right corner.
    pub fn begin_at(&self, p: Point) -> (Rect, DragHandle) {
        (Rect::new(p.x, p.y, p.x, p.y), DragHandle::BottomRight)
    }

    /// Apply a drag of `delta` (total offset since drag start) to `initial`.
    pub fn drag(&self, initial: &Rect, handle: DragHandle, delta: Point) -> Rect {
        let b = &self.bounds;
        let min = self.min_size;
        let r = *initial;

        let left = || coerce(r.left + delta.x, b.left, r.right - min);
        let right = || coerce(r.right + delta.x, r.left + min, b.right);
        let top = || coerce(r.top + delta.y, b.top, r.bottom - min);
        let bottom = || coerce(r.bottom + delta.y, r.top + min, b.bottom);

        match handle {
            DragHandle::TopLeft => Rect::new(left(), top(), r.right, r.bottom),
            DragHandle::TopRight => Rect::new(r.left, top(), right(), r.bottom),
            DragHandle::BottomLeft => Rect::new(left(), r.top, r.right, bottom()),
            DragHandle::BottomRight => Rect::new(r.left, r.top, right(), bottom()),
            DragHandle::Top => Rect::new(r.left, top(), r.right, r.bottom),
            DragHandle::Bottom => Rect::new(r.left, r.top, r.right, bottom()),
            DragHandle::Left => Rect::new(left(), r.top, r.right, r.bottom),
            DragHandle::Right => Rect::new(r.left, r.top, right(), r.bottom),
            DragHandle::Move => {
                let new_left = coerce(r.left + delta.x, b.left, b.right - r.width());
                let new_top = coerce(r.top + delta.y, b.top, b.bottom - r.height());
                Rect::new(
                    new_left,
                    new_top,
                    new_left + r.width(),
                    new_top + r.height(),
                )
            }
            DragHandle::None => r,
        }
    }
}

/// Clamp without panicking when the range is inverted; `hi` wins then.
#[inline]
fn coerce(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}
