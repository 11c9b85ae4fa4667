//! Grid resolution for woodpile inspection images.
//!
//! Maps a tap on the displayed image to a logical grid cell, using the grid
//! description produced by the upstream detector, and mediates recording
//! abnormality tags against resolved cells.
//!
//! ```
//! use woodpile_core::{Point, ScalingInfo};
//! use woodpile_grid::{GridDescription, GridResolver, ResolverMode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let grid = GridDescription::from_json_str(r#"{
//!     "image_dimensions": {"width": 600, "height": 500},
//!     "px_per_meter": 100,
//!     "detection_box": {"label": "pile", "top_left": [0, 0], "bottom_right": [600, 500]},
//!     "grid_lines": {
//!         "vertical": [{"p1": [300, 0], "p2": [300, 500]}],
//!         "horizontal": [{"p1": [0, 250], "p2": [600, 250]}]
//!     }
//! }"#)?;
//! let scaling = ScalingInfo::identity(600, 500)?;
//! let resolver = GridResolver::new(&grid, scaling);
//! let cell = resolver.resolve(Point::new(450.0, 100.0), ResolverMode::ExplicitLines, None);
//! assert_eq!(cell.map(|c| (c.row, c.col)), Some((0, 1)));
//! # Ok(())
//! # }
//! ```

mod cell;
mod payload;
mod resolver;
mod tagging;

pub use cell::{GridCell, PixelBounds};
pub use payload::{
    DetectionBox, GridDescription, GridIoError, GridLine, GridLineSet, ImageDimensions,
};
pub use resolver::{resolve_cell, GridLayout, GridResolver, ResolverMode};
pub use tagging::{register_tag, DuplicateTag, TagSession, TaggedPoint};
