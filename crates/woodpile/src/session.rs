//! Batch tagging sessions described in JSON.
//!
//! A session names a grid payload, a rule table and a list of taps in image
//! space. Running it resolves every tap, registers the tags and prices the
//! result, the same sequence the interactive UI goes through.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use woodpile_core::{Point, Rect, ScalingError, ScalingInfo, TagKind};
use woodpile_grid::{GridDescription, GridIoError, GridResolver, ResolverMode, TagSession, TaggedPoint};
use woodpile_penalty::{compute_summary, PenaltySummary, RuleIoError, RuleTable};

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("failed to read session file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid session file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to load grid: {0}")]
    Grid(#[from] GridIoError),
    #[error("failed to load penalty rules: {0}")]
    Rules(#[from] RuleIoError),
    #[error(transparent)]
    Scaling(#[from] ScalingError),
}

/// How payload coordinates map onto the image the taps were made on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalingSpec {
    Explicit(ScalingInfo),
    /// Bitmap resized to this width, keeping the payload's aspect ratio.
    FitWidth { screen_width: u32 },
}

impl ScalingSpec {
    /// Resolve against the grid's reference image size.
    ///
    /// A missing spec means taps are already in payload space. Explicit
    /// factors are validated like [`ScalingInfo::new`].
    pub fn resolve(spec: Option<&Self>, grid: &GridDescription) -> Result<ScalingInfo, ScalingError> {
        let dims = grid.image_dimensions;
        match spec {
            Some(ScalingSpec::Explicit(info)) => info.validated(),
            Some(ScalingSpec::FitWidth { screen_width }) => {
                ScalingInfo::fit_width(dims.width, dims.height, *screen_width)
            }
            None => ScalingInfo::identity(dims.width, dims.height),
        }
    }
}

/// One recorded tap, in image space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TapInput {
    pub x: f32,
    pub y: f32,
    pub tag: TagKind,
}

fn default_base_for_percent() -> f64 {
    0.0
}

/// JSON session description.
///
/// Relative paths are resolved against the directory of the session file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    pub grid_path: PathBuf,
    pub rules_path: PathBuf,
    #[serde(default)]
    pub mode: ResolverMode,
    #[serde(default)]
    pub crop_rect: Option<Rect>,
    #[serde(default)]
    pub scaling: Option<ScalingSpec>,
    #[serde(default = "default_base_for_percent")]
    pub base_for_percent: f64,
    #[serde(default)]
    pub taps: Vec<TapInput>,
}

impl SessionConfig {
    /// Load a JSON session from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn resolve_path(base_dir: &Path, p: &Path) -> PathBuf {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            base_dir.join(p)
        }
    }

    /// Load the referenced grid and rules and evaluate every tap.
    pub fn run(&self, base_dir: &Path) -> Result<SessionReport, SessionError> {
        let grid = GridDescription::load_json(Self::resolve_path(base_dir, &self.grid_path))?;
        let rules = RuleTable::load_json(Self::resolve_path(base_dir, &self.rules_path))?;
        let scaling = ScalingSpec::resolve(self.scaling.as_ref(), &grid)?;
        Ok(evaluate_taps(
            &grid,
            scaling,
            &rules,
            self.mode,
            self.crop_rect.as_ref(),
            &self.taps,
            self.base_for_percent,
        ))
    }
}

/// Outcome of a session run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub mode: ResolverMode,
    pub tagged_points: Vec<TaggedPoint>,
    /// Taps that missed the grid.
    pub skipped_taps: usize,
    /// Taps rejected because the cell already had that tag.
    pub duplicates: usize,
    pub summary: PenaltySummary,
}

impl SessionReport {
    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Resolve, register and price a sequence of taps.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(level = "info", skip_all, fields(taps = taps.len(), mode = ?mode))
)]
pub fn evaluate_taps(
    grid: &GridDescription,
    scaling: ScalingInfo,
    rules: &RuleTable,
    mode: ResolverMode,
    crop: Option<&Rect>,
    taps: &[TapInput],
    base_for_percent: f64,
) -> SessionReport {
    let resolver = GridResolver::new(grid, scaling);
    let mut session = TagSession::new();
    let mut skipped_taps = 0;
    let mut duplicates = 0;

    for tap in taps {
        let p = Point::new(tap.x, tap.y);
        let Some(cell) = resolver.resolve(p, mode, crop) else {
            info!("tap ({}, {}) is outside the grid, ignored", tap.x, tap.y);
            skipped_taps += 1;
            continue;
        };
        let offset = cell.percent_offset(p);
        if let Err(err) = session.register(cell, offset, tap.tag) {
            warn!("cell ({}, {}): {err}", cell.row, cell.col);
            duplicates += 1;
        }
    }

    let summary = compute_summary(&session.tags(), rules, base_for_percent);
    SessionReport {
        mode,
        tagged_points: session.points().to_vec(),
        skipped_taps,
        duplicates,
        summary,
    }
}
