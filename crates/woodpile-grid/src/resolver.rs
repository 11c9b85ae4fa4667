//! Tap → grid cell resolution.
//!
//! Taps are expected in *image* space (the displayed bitmap, after undoing the
//! canvas fit). Returned cell rects live in the same space.

use log::debug;
use serde::{Deserialize, Serialize};
use woodpile_core::{Point, Rect, ScalingInfo};

use crate::{GridCell, GridDescription};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// How the grid lines of a [`GridDescription`] are interpreted.
///
/// The payload does not say which interpretation applies; the caller picks
/// it based on how the detector produced the grid.
///
/// Both uniform modes split their area into `count` equal bands per axis
/// (one band per line) and treat the far edge as part of the last band, so a
/// tap exactly on the right/bottom border resolves to the last column/row.
/// The older `count + 1` split and the unclamped far-edge behaviour of the
/// uniform-box mode are not supported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResolverMode {
    /// Line positions are real split positions; cells may be irregular.
    #[default]
    ExplicitLines,
    /// Only line counts matter; the detection box is split evenly.
    UniformBox,
    /// Only line counts matter; the user's crop rect is split evenly.
    CropRelative,
}

/// Cell boundaries of a grid, in image space.
///
/// `columns` holds `cols + 1` x positions and `rows` holds `rows + 1`
/// y positions, both ascending.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub columns: Vec<f32>,
    pub rows: Vec<f32>,
}

impl GridLayout {
    #[inline]
    pub fn cols(&self) -> usize {
        self.columns.len().saturating_sub(1)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Rect of the cell at `(row, col)`, if it exists.
    pub fn cell_rect(&self, row: usize, col: usize) -> Option<Rect> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        Some(Rect::new(
            self.columns[col],
            self.rows[row],
            self.columns[col + 1],
            self.rows[row + 1],
        ))
    }
}

/// Resolves taps against one grid description at one display scaling.
#[derive(Clone, Copy, Debug)]
pub struct GridResolver<'a> {
    grid: &'a GridDescription,
    scaling: ScalingInfo,
}

impl<'a> GridResolver<'a> {
    pub fn new(grid: &'a GridDescription, scaling: ScalingInfo) -> Self {
        Self { grid, scaling }
    }

    pub fn grid(&self) -> &GridDescription {
        self.grid
    }

    pub fn scaling(&self) -> ScalingInfo {
        self.scaling
    }

    /// Detection box moved into image space.
    pub fn detection_rect(&self) -> Rect {
        self.grid
            .detection_box
            .rect()
            .scaled(self.scaling.scale_x, self.scaling.scale_y)
    }

    /// Map a tap to the cell containing it.
    ///
    /// `crop` is only read in [`ResolverMode::CropRelative`]. Returns `None`
    /// when the tap misses the addressable area or the geometry is unusable.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "trace", skip(self, crop), fields(x = tap.x, y = tap.y))
    )]
    pub fn resolve(&self, tap: Point, mode: ResolverMode, crop: Option<&Rect>) -> Option<GridCell> {
        match mode {
            ResolverMode::ExplicitLines => self.resolve_explicit(tap),
            ResolverMode::UniformBox => {
                let area = self.detection_rect();
                uniform_cell(tap, &area, self.grid.vertical_count(), self.grid.horizontal_count())
            }
            ResolverMode::CropRelative => {
                let Some(area) = crop else {
                    debug!("crop-relative resolution without a crop rect");
                    return None;
                };
                uniform_cell(tap, area, self.grid.vertical_count(), self.grid.horizontal_count())
            }
        }
    }

    /// Cell boundaries the resolver uses for `mode`, for drawing the grid.
    pub fn layout(&self, mode: ResolverMode, crop: Option<&Rect>) -> Option<GridLayout> {
        match mode {
            ResolverMode::ExplicitLines => {
                let (xs, ys) = self.explicit_boundaries()?;
                Some(GridLayout {
                    columns: xs.iter().map(|x| x * self.scaling.scale_x).collect(),
                    rows: ys.iter().map(|y| y * self.scaling.scale_y).collect(),
                })
            }
            ResolverMode::UniformBox => uniform_layout(
                &self.detection_rect(),
                self.grid.vertical_count(),
                self.grid.horizontal_count(),
            ),
            ResolverMode::CropRelative => uniform_layout(
                crop?,
                self.grid.vertical_count(),
                self.grid.horizontal_count(),
            ),
        }
    }

    /// Sorted, distinct split positions in payload space, box edges included.
    fn explicit_boundaries(&self) -> Option<(Vec<f32>, Vec<f32>)> {
        let bx = self.grid.detection_box.rect();
        if bx.is_degenerate() {
            debug!("degenerate detection box {bx:?}");
            return None;
        }
        let lines = &self.grid.grid_lines;
        let xs = sorted_boundaries(bx.left, bx.right, lines.vertical_positions());
        let ys = sorted_boundaries(bx.top, bx.bottom, lines.horizontal_positions());
        Some((xs, ys))
    }

    fn resolve_explicit(&self, tap: Point) -> Option<GridCell> {
        let (xs, ys) = self.explicit_boundaries()?;
        let p = self.scaling.to_payload(tap);

        let col = band_index(&xs, p.x)?;
        let row = band_index(&ys, p.y)?;

        let sx = self.scaling.scale_x;
        let sy = self.scaling.scale_y;
        Some(GridCell {
            row,
            col,
            rect: Rect::new(xs[col] * sx, ys[row] * sy, xs[col + 1] * sx, ys[row + 1] * sy),
        })
    }
}

/// Free-function form of [`GridResolver::resolve`].
pub fn resolve_cell(
    tap: Point,
    grid: &GridDescription,
    scaling: ScalingInfo,
    mode: ResolverMode,
    crop: Option<&Rect>,
) -> Option<GridCell> {
    GridResolver::new(grid, scaling).resolve(tap, mode, crop)
}

fn sorted_boundaries(lo: f32, hi: f32, inner: impl Iterator<Item = f32>) -> Vec<f32> {
    let mut out: Vec<f32> = std::iter::once(lo)
        .chain(inner)
        .chain(std::iter::once(hi))
        .filter(|v| v.is_finite())
        .collect();
    out.sort_by(f32::total_cmp);
    out.dedup();
    out
}

/// Index of the band `[b[i], b[i+1])` containing `v`.
///
/// The last boundary is exclusive, so `v == b[last]` is a miss.
fn band_index(boundaries: &[f32], v: f32) -> Option<usize> {
    let first_above = boundaries.iter().position(|&b| b > v)?;
    let idx = first_above.checked_sub(1)?;
    (idx + 1 < boundaries.len()).then_some(idx)
}

fn uniform_cell(tap: Point, area: &Rect, cols: usize, rows: usize) -> Option<GridCell> {
    if cols == 0 || rows == 0 {
        debug!("uniform grid needs at least one line per axis (cols={cols}, rows={rows})");
        return None;
    }
    if area.is_degenerate() {
        debug!("degenerate grid area {area:?}");
        return None;
    }
    if !area.contains(tap) {
        return None;
    }

    let cell_w = area.width() / cols as f32;
    let cell_h = area.height() / rows as f32;

    // Far-edge taps compute to `cols`/`rows`; fold them into the last band.
    let col = (((tap.x - area.left) / cell_w).floor() as usize).min(cols - 1);
    let row = (((tap.y - area.top) / cell_h).floor() as usize).min(rows - 1);

    let left = area.left + col as f32 * cell_w;
    let top = area.top + row as f32 * cell_h;
    Some(GridCell {
        row,
        col,
        rect: Rect::new(left, top, left + cell_w, top + cell_h),
    })
}

fn uniform_layout(area: &Rect, cols: usize, rows: usize) -> Option<GridLayout> {
    if cols == 0 || rows == 0 || area.is_degenerate() {
        return None;
    }
    let cell_w = area.width() / cols as f32;
    let cell_h = area.height() / rows as f32;
    Some(GridLayout {
        columns: (0..=cols).map(|i| area.left + i as f32 * cell_w).collect(),
        rows: (0..=rows).map(|j| area.top + j as f32 * cell_h).collect(),
    })
}
