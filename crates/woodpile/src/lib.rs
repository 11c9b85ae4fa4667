//! Facade crate for the `woodpile-*` workspace.
//!
//! Re-exports the geometry, grid and penalty crates and adds
//! [`session`], which runs a whole tagging session (taps in, priced report
//! out) from a JSON description.
//!
//! ## API map
//! - `woodpile::core`: points, rects, scaling, display fit, crop editing, tag kinds.
//! - `woodpile::grid`: grid payload, tap resolution, tag registration.
//! - `woodpile::penalty`: rule tables and penalty summaries.
//! - `woodpile::session`: batch evaluation used by the `woodpile` CLI.

pub use woodpile_core as core;
pub use woodpile_grid as grid;
pub use woodpile_penalty as penalty;

pub use woodpile_core::{Point, Rect, ScalingInfo, TagKind};
pub use woodpile_grid::{GridCell, GridDescription, GridResolver, ResolverMode, TaggedPoint};
pub use woodpile_penalty::{compute_summary, PenaltySummary, RuleTable};

pub mod session;
