use serde::{Deserialize, Serialize};

use crate::Point;

/// Factors mapping payload coordinates onto the displayed bitmap.
///
/// `image = payload * scale`. The factors are fixed once the bitmap has been
/// decoded and resized to the screen width.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalingInfo {
    pub scale_x: f32,
    pub scale_y: f32,
    pub original_width: u32,
    pub original_height: u32,
}

/// Errors raised when scaling factors cannot be derived.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScalingError {
    #[error("original image dimensions must be positive (width={width}, height={height})")]
    InvalidOriginalSize { width: u32, height: u32 },
    #[error("screen width must be positive")]
    InvalidScreenWidth,
    #[error("scale factors must be finite and positive (scale_x={scale_x}, scale_y={scale_y})")]
    InvalidScale { scale_x: f32, scale_y: f32 },
}

impl ScalingInfo {
    /// Validated constructor for explicit factors.
    pub fn new(
        scale_x: f32,
        scale_y: f32,
        original_width: u32,
        original_height: u32,
    ) -> Result<Self, ScalingError> {
        if original_width == 0 || original_height == 0 {
            return Err(ScalingError::InvalidOriginalSize {
                width: original_width,
                height: original_height,
            });
        }
        let positive = |s: f32| s.is_finite() && s > 0.0;
        if !positive(scale_x) || !positive(scale_y) {
            return Err(ScalingError::InvalidScale { scale_x, scale_y });
        }
        Ok(Self {
            scale_x,
            scale_y,
            original_width,
            original_height,
        })
    }

    /// Re-run the constructor checks, for values that bypassed [`Self::new`]
    /// (deserialized configs, struct literals).
    pub fn validated(&self) -> Result<Self, ScalingError> {
        Self::new(
            self.scale_x,
            self.scale_y,
            self.original_width,
            self.original_height,
        )
    }

    /// Unit factors, for payloads produced at the displayed resolution.
    pub fn identity(original_width: u32, original_height: u32) -> Result<Self, ScalingError> {
        Self::new(1.0, 1.0, original_width, original_height)
    }

    /// Factors for a bitmap resized to `screen_width`, keeping aspect ratio.
    ///
    /// The scaled height is truncated to whole pixels, so `scale_y` may differ
    /// slightly from `scale_x`.
    pub fn fit_width(
        original_width: u32,
        original_height: u32,
        screen_width: u32,
    ) -> Result<Self, ScalingError> {
        if original_width == 0 || original_height == 0 {
            return Err(ScalingError::InvalidOriginalSize {
                width: original_width,
                height: original_height,
            });
        }
        if screen_width == 0 {
            return Err(ScalingError::InvalidScreenWidth);
        }
        let aspect = original_height as f32 / original_width as f32;
        let scaled_height = (screen_width as f32 * aspect) as u32;
        if scaled_height == 0 {
            return Err(ScalingError::InvalidScale {
                scale_x: screen_width as f32 / original_width as f32,
                scale_y: 0.0,
            });
        }
        Self::new(
            screen_width as f32 / original_width as f32,
            scaled_height as f32 / original_height as f32,
            original_width,
            original_height,
        )
    }

    /// Displayed bitmap size `(width, height)` in whole pixels.
    pub fn scaled_size(&self) -> (u32, u32) {
        (
            (self.original_width as f32 * self.scale_x).round() as u32,
            (self.original_height as f32 * self.scale_y).round() as u32,
        )
    }

    #[inline]
    pub fn to_scaled(&self, payload: Point) -> Point {
        Point::new(payload.x * self.scale_x, payload.y * self.scale_y)
    }

    #[inline]
    pub fn to_payload(&self, image: Point) -> Point {
        Point::new(image.x / self.scale_x, image.y / self.scale_y)
    }
}
