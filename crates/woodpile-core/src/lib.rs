//! Core types for woodpile abnormality tagging.
//!
//! This crate is intentionally small and purely geometric. It knows nothing
//! about grid payloads or penalty rules; those live in `woodpile-grid` and
//! `woodpile-penalty`.
//!
//! Coordinate spaces used across the workspace:
//! - *canvas*: pixels of the widget the image is drawn into,
//! - *image*: pixels of the displayed (already scaled) bitmap,
//! - *payload*: the reference resolution the detector JSON was produced at.

mod crop;
mod fit;
mod logger;
mod rect;
mod scaling;
mod tag;

pub use crop::{CropEditor, DragHandle, DEFAULT_HANDLE_TOLERANCE, DEFAULT_MIN_CROP_SIZE};
pub use fit::ImageFit;
pub use rect::Rect;
pub use scaling::{ScalingError, ScalingInfo};
pub use tag::TagKind;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{default_directives, init_with_level, parse_level, WOODPILE_TARGETS};

/// 2D point. Which coordinate space it lives in is up to the caller.
pub type Point = nalgebra::Point2<f32>;
