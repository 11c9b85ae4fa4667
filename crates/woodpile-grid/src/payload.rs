//! Detector grid payload (JSON) and loading helpers.
//!
//! All coordinates here are in *payload* space: the reference resolution the
//! detector worked at. Use [`woodpile_core::ScalingInfo`] to move them onto
//! the displayed bitmap.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use woodpile_core::{Point, Rect};

#[derive(thiserror::Error, Debug)]
pub enum GridIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Line segment between two `[x, y]` points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub p1: [f32; 2],
    pub p2: [f32; 2],
}

impl GridLine {
    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.p1[0], self.p1[1])
    }

    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.p2[0], self.p2[1])
    }
}

/// Outer region the grid is defined in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionBox {
    #[serde(default)]
    pub label: String,
    pub top_left: [f32; 2],
    pub bottom_right: [f32; 2],
}

impl DetectionBox {
    /// The box as a rect, edges kept as given (may be degenerate).
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.top_left[0],
            self.top_left[1],
            self.bottom_right[0],
            self.bottom_right[1],
        )
    }
}

/// Grid lines inside the detection box.
///
/// Vertical lines split columns (their `p1.x` is the position), horizontal
/// lines split rows (`p1.y`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GridLineSet {
    #[serde(default)]
    pub vertical: Vec<GridLine>,
    #[serde(default)]
    pub horizontal: Vec<GridLine>,
}

impl GridLineSet {
    /// Column split positions (`p1.x` of every vertical line).
    pub fn vertical_positions(&self) -> impl Iterator<Item = f32> + '_ {
        self.vertical.iter().map(|l| l.p1[0])
    }

    /// Row split positions (`p1.y` of every horizontal line).
    pub fn horizontal_positions(&self) -> impl Iterator<Item = f32> + '_ {
        self.horizontal.iter().map(|l| l.p1[1])
    }
}

/// Grid description as produced by the pile detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridDescription {
    pub image_dimensions: ImageDimensions,
    #[serde(default)]
    pub px_per_meter: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segmentation_line: Option<GridLine>,
    pub detection_box: DetectionBox,
    #[serde(default)]
    pub grid_lines: GridLineSet,
}

impl GridDescription {
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Load a grid description from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, GridIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(Self::from_json_str(&raw)?)
    }

    /// Write this description to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), GridIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Number of columns in the uniform interpretation.
    #[inline]
    pub fn vertical_count(&self) -> usize {
        self.grid_lines.vertical.len()
    }

    /// Number of rows in the uniform interpretation.
    #[inline]
    pub fn horizontal_count(&self) -> usize {
        self.grid_lines.horizontal.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = r#"{
        "image_dimensions": {"width": 1200, "height": 900},
        "px_per_meter": 250,
        "segmentation_line": {"p1": [0, 850], "p2": [1200, 860]},
        "detection_box": {"label": "woodpile", "top_left": [100, 50], "bottom_right": [1100, 800]},
        "grid_lines": {
            "vertical": [{"p1": [350, 50], "p2": [350, 800]}, {"p1": [600, 50], "p2": [600, 800]}],
            "horizontal": [{"p1": [100, 300], "p2": [1100, 300]}]
        },
        "model_version": "v3"
    }"#;

    #[test]
    fn parses_detector_payload_and_ignores_unknown_keys() {
        let grid = GridDescription::from_json_str(RAW).unwrap();
        assert_eq!(
            grid.image_dimensions,
            ImageDimensions {
                width: 1200,
                height: 900
            }
        );
        assert_eq!(grid.px_per_meter, 250.0);
        assert_eq!(grid.detection_box.label, "woodpile");
        assert_eq!(grid.detection_box.rect(), Rect::new(100.0, 50.0, 1100.0, 800.0));
        assert_eq!(grid.vertical_count(), 2);
        assert_eq!(grid.horizontal_count(), 1);
        let xs: Vec<f32> = grid.grid_lines.vertical_positions().collect();
        assert_eq!(xs, vec![350.0, 600.0]);
        assert!(grid.segmentation_line.is_some());
    }

    #[test]
    fn missing_grid_lines_default_to_empty() {
        let raw = r#"{
            "image_dimensions": {"width": 10, "height": 10},
            "detection_box": {"label": "x", "top_left": [0, 0], "bottom_right": [10, 10]}
        }"#;
        let grid = GridDescription::from_json_str(raw).unwrap();
        assert_eq!(grid.vertical_count(), 0);
        assert_eq!(grid.px_per_meter, 0.0);
    }

    #[test]
    fn malformed_points_are_rejected() {
        let raw = r#"{
            "image_dimensions": {"width": 10, "height": 10},
            "detection_box": {"label": "x", "top_left": [0], "bottom_right": [10, 10]}
        }"#;
        assert!(GridDescription::from_json_str(raw).is_err());
    }
}
