use serde::{Deserialize, Serialize};

use crate::{Point, Rect};

/// Placement of an image drawn into a canvas with uniform "contain" scaling.
///
/// The image is scaled by `scale` and centered, leaving letterbox margins
/// `left`/`top` on one axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageFit {
    pub left: f32,
    pub top: f32,
    pub scale: f32,
    pub image_width: f32,
    pub image_height: f32,
}

impl ImageFit {
    /// Fit an `image_width × image_height` image inside a canvas.
    ///
    /// Returns `None` when any dimension is not positive.
    pub fn contain(
        canvas_width: f32,
        canvas_height: f32,
        image_width: f32,
        image_height: f32,
    ) -> Option<Self> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !(positive(canvas_width)
            && positive(canvas_height)
            && positive(image_width)
            && positive(image_height))
        {
            return None;
        }
        let scale = (canvas_width / image_width).min(canvas_height / image_height);
        Some(Self {
            left: (canvas_width - image_width * scale) / 2.0,
            top: (canvas_height - image_height * scale) / 2.0,
            scale,
            image_width,
            image_height,
        })
    }

    /// Canvas tap to image pixels, clamped to the image bounds.
    pub fn canvas_to_image(&self, canvas: Point) -> Point {
        Point::new(
            ((canvas.x - self.left) / self.scale).clamp(0.0, self.image_width),
            ((canvas.y - self.top) / self.scale).clamp(0.0, self.image_height),
        )
    }

    pub fn image_to_canvas(&self, image: Point) -> Point {
        Point::new(
            image.x * self.scale + self.left,
            image.y * self.scale + self.top,
        )
    }

    /// Canvas rect (e.g. a crop drawn by the user) to image pixels, unclamped.
    pub fn canvas_rect_to_image(&self, rect: Rect) -> Rect {
        Rect::new(
            (rect.left - self.left) / self.scale,
            (rect.top - self.top) / self.scale,
            (rect.right - self.left) / self.scale,
            (rect.bottom - self.top) / self.scale,
        )
    }

    /// Bounds of the drawn image in canvas coordinates.
    pub fn canvas_bounds(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.image_width * self.scale,
            self.top + self.image_height * self.scale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn contain_letterboxes_the_short_axis() {
        let fit = ImageFit::contain(1000.0, 1000.0, 500.0, 250.0).unwrap();
        assert_relative_eq!(fit.scale, 2.0);
        assert_relative_eq!(fit.left, 0.0);
        assert_relative_eq!(fit.top, 250.0);
        assert_eq!(fit.canvas_bounds(), Rect::new(0.0, 250.0, 1000.0, 750.0));
    }

    #[test]
    fn canvas_taps_are_clamped_into_the_image() {
        let fit = ImageFit::contain(1000.0, 1000.0, 500.0, 250.0).unwrap();
        let p = fit.canvas_to_image(Point::new(500.0, 500.0));
        assert_relative_eq!(p.x, 250.0);
        assert_relative_eq!(p.y, 125.0);

        // tap in the top letterbox margin
        let p = fit.canvas_to_image(Point::new(-20.0, 10.0));
        assert_eq!(p, Point::new(0.0, 0.0));
        let p = fit.canvas_to_image(Point::new(2000.0, 990.0));
        assert_eq!(p, Point::new(500.0, 250.0));
    }

    #[test]
    fn crop_rect_maps_back_to_image_space() {
        let fit = ImageFit::contain(1000.0, 1000.0, 500.0, 250.0).unwrap();
        let img = fit.canvas_rect_to_image(Rect::new(100.0, 350.0, 300.0, 450.0));
        assert_eq!(img, Rect::new(50.0, 50.0, 150.0, 100.0));
        let c = fit.image_to_canvas(Point::new(50.0, 50.0));
        assert_eq!(c, Point::new(100.0, 350.0));
    }

    #[test]
    fn rejects_empty_sizes() {
        assert!(ImageFit::contain(0.0, 100.0, 10.0, 10.0).is_none());
        assert!(ImageFit::contain(100.0, 100.0, 10.0, f32::NAN).is_none());
    }
}
