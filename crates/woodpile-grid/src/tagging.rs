//! Recording abnormality tags against resolved cells.

use serde::{Deserialize, Serialize};
use woodpile_core::{Point, TagKind};

use crate::GridCell;

/// One marker placed by the user.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaggedPoint {
    pub cell: GridCell,
    /// Marker position relative to `cell.rect`, each axis in `[0, 1]`.
    pub percent_offset: Point,
    pub tag: TagKind,
}

/// The cell already carries a tag of this kind.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("penalty {tag} already recorded for this cell")]
pub struct DuplicateTag {
    pub tag: TagKind,
}

/// Build a new tagged point unless `(cell, tag)` is already present.
///
/// Nothing is inserted; on success the caller appends the returned point.
pub fn register_tag(
    existing: &[TaggedPoint],
    cell: GridCell,
    percent_offset: Point,
    tag: TagKind,
) -> Result<TaggedPoint, DuplicateTag> {
    if existing.iter().any(|p| p.cell == cell && p.tag == tag) {
        return Err(DuplicateTag { tag });
    }
    Ok(TaggedPoint {
        cell,
        percent_offset,
        tag,
    })
}

/// Owned collection of tagged points for one inspection session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TagSession {
    points: Vec<TaggedPoint>,
}

impl TagSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register and append a tag; the session is untouched on a duplicate.
    pub fn register(
        &mut self,
        cell: GridCell,
        percent_offset: Point,
        tag: TagKind,
    ) -> Result<&TaggedPoint, DuplicateTag> {
        let point = register_tag(&self.points, cell, percent_offset, tag)?;
        self.points.push(point);
        Ok(&self.points[self.points.len() - 1])
    }

    /// Remove the `(cell, tag)` marker. Returns whether one was removed.
    pub fn remove(&mut self, cell: &GridCell, tag: TagKind) -> bool {
        let before = self.points.len();
        self.points.retain(|p| !(p.cell == *cell && p.tag == tag));
        self.points.len() != before
    }

    /// Drop every marker, e.g. after the crop rect changed.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[TaggedPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Tag multiset in insertion order, ready for pricing.
    pub fn tags(&self) -> Vec<TagKind> {
        self.points.iter().map(|p| p.tag).collect()
    }

    /// Tags already placed on `cell`.
    pub fn tags_in(&self, cell: &GridCell) -> Vec<TagKind> {
        self.points
            .iter()
            .filter(|p| p.cell == *cell)
            .map(|p| p.tag)
            .collect()
    }
}
