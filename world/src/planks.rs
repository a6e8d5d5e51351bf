//! Plank entities and the registry that validates placement and removal.

use std::collections::BTreeMap;

use river_crossing_core::{
    Direction, Orientation, PlacementError, PlankId, TileContent, TileCoord,
};

use crate::grid::TileGrid;

/// A placed plank and the tiles it exclusively owns.
#[derive(Clone, Debug)]
pub(crate) struct Plank {
    pub(crate) id: PlankId,
    pub(crate) orientation: Orientation,
    /// Tiles the plank spans, ordered ascending from the lower endpoint.
    pub(crate) span: Vec<TileCoord>,
}

impl Plank {
    /// Number of tiles the plank spans.
    pub(crate) fn size(&self) -> u32 {
        self.span.len() as u32
    }

    /// Stump tiles bounding the span, derived by extending one tile outward
    /// along the plank's orientation.
    pub(crate) fn endpoints(&self) -> Option<(TileCoord, TileCoord)> {
        let first = self.span.first()?;
        let last = self.span.last()?;
        Some(match self.orientation {
            Orientation::Horizontal => (
                TileCoord::new(first.row(), first.column().saturating_sub(1)),
                TileCoord::new(last.row(), last.column() + 1),
            ),
            Orientation::Vertical => (
                TileCoord::new(first.row().saturating_sub(1), first.column()),
                TileCoord::new(last.row() + 1, last.column()),
            ),
        })
    }
}

/// Outcome reported for a successful placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PlacedPlank {
    pub(crate) id: PlankId,
    pub(crate) orientation: Orientation,
    pub(crate) size: u32,
}

/// Outcome reported for a successful removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RemovedPlank {
    pub(crate) size: u32,
}

/// Registry that stores planks and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct PlankRegistry {
    entries: BTreeMap<PlankId, Plank>,
    next_plank_id: PlankId,
}

impl PlankRegistry {
    /// Creates an empty plank registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_plank_id: PlankId::new(0),
        }
    }

    /// Discards every plank; the grid is reclassified separately on reload.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.next_plank_id = PlankId::new(0);
    }

    /// Iterator over the stored planks in identifier order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Plank> {
        self.entries.values()
    }

    /// Number of tiles strictly between two aligned, distinct tiles.
    ///
    /// `None` when the tiles share neither a row nor a column, or are the
    /// same tile. Adjacent tiles yield zero.
    pub(crate) fn distance_between(a: TileCoord, b: TileCoord) -> Option<u32> {
        if a.row() == b.row() && a.column() != b.column() {
            Some(a.column().abs_diff(b.column()) - 1)
        } else if a.column() == b.column() && a.row() != b.row() {
            Some(a.row().abs_diff(b.row()) - 1)
        } else {
            None
        }
    }

    /// Pure feasibility oracle shared by real placement and the ghost preview.
    pub(crate) fn can_place(grid: &TileGrid, a: TileCoord, b: TileCoord, size: u32) -> bool {
        validate(grid, a, b, size).is_ok()
    }

    /// Places a plank spanning the full gap between two stumps.
    pub(crate) fn place_between(
        &mut self,
        grid: &mut TileGrid,
        a: TileCoord,
        b: TileCoord,
    ) -> Result<PlacedPlank, PlacementError> {
        let size = Self::distance_between(a, b).unwrap_or(0);
        self.place_sized(grid, a, b, size)
    }

    /// Places a plank of a known held size between two stumps.
    ///
    /// Rejects with `WrongLength` when the stumps are farther apart or closer
    /// together than the plank being placed.
    pub(crate) fn place_sized(
        &mut self,
        grid: &mut TileGrid,
        a: TileCoord,
        b: TileCoord,
        size: u32,
    ) -> Result<PlacedPlank, PlacementError> {
        let span = validate(grid, a, b, size)?;
        let orientation = if a.row() == b.row() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };

        let id = self.allocate_id();
        for tile in &span {
            grid.set_plank_piece(*tile, id);
        }
        let size = span.len() as u32;
        let _ = self.entries.insert(
            id,
            Plank {
                id,
                orientation,
                span,
            },
        );

        Ok(PlacedPlank {
            id,
            orientation,
            size,
        })
    }

    /// Places a held plank from a stump toward the first stump in `direction`.
    pub(crate) fn place_toward(
        &mut self,
        grid: &mut TileGrid,
        stump: TileCoord,
        direction: Direction,
        size: u32,
    ) -> Result<PlacedPlank, PlacementError> {
        let target = grid.first_matching(stump, direction, TileContent::Stump);
        if target == stump {
            return Err(PlacementError::MissingStump);
        }
        self.place_sized(grid, stump, target, size)
    }

    /// Removes the plank covering the provided tile.
    ///
    /// `None` when the tile does not carry plank content; the board is left
    /// untouched in that case. On success every spanned tile reverts to
    /// water and the removed size is reported.
    pub(crate) fn remove_at(
        &mut self,
        grid: &mut TileGrid,
        tile: TileCoord,
    ) -> Option<RemovedPlank> {
        let id = grid.plank_at(tile)?;
        let plank = self.entries.remove(&id)?;
        for spanned in &plank.span {
            grid.set_content(*spanned, TileContent::Water);
        }
        Some(RemovedPlank { size: plank.size() })
    }

    /// Removes the plank between two stumps, resolved via the midpoint tile.
    pub(crate) fn remove_between(
        &mut self,
        grid: &mut TileGrid,
        a: TileCoord,
        b: TileCoord,
    ) -> Option<RemovedPlank> {
        if grid.content(a) != Some(TileContent::Stump)
            || grid.content(b) != Some(TileContent::Stump)
        {
            return None;
        }
        let midpoint = TileCoord::new((a.row() + b.row()) / 2, (a.column() + b.column()) / 2);
        self.remove_at(grid, midpoint)
    }

    /// Removes the plank starting at the stump's neighbor in `direction`.
    pub(crate) fn remove_toward(
        &mut self,
        grid: &mut TileGrid,
        stump: TileCoord,
        direction: Direction,
    ) -> Option<RemovedPlank> {
        let next = grid.neighbor(stump, direction)?;
        self.remove_at(grid, next)
    }

    fn allocate_id(&mut self) -> PlankId {
        let id = self.next_plank_id;
        self.next_plank_id = PlankId::new(id.get() + 1);
        id
    }
}

/// Tiles strictly between two aligned tiles, ordered from the lower endpoint.
///
/// Empty when the tiles are adjacent or share neither a row nor a column.
pub(crate) fn span_between(a: TileCoord, b: TileCoord) -> Vec<TileCoord> {
    if a.row() == b.row() {
        let row = a.row();
        let low = a.column().min(b.column());
        let high = a.column().max(b.column());
        ((low + 1)..high)
            .map(|column| TileCoord::new(row, column))
            .collect()
    } else if a.column() == b.column() {
        let column = a.column();
        let low = a.row().min(b.row());
        let high = a.row().max(b.row());
        ((low + 1)..high)
            .map(|row| TileCoord::new(row, column))
            .collect()
    } else {
        Vec::new()
    }
}

/// Runs the ordered placement checks and yields the span on success.
///
/// A plank spans at least one tile, so adjacent stumps reject with
/// `WrongLength` before a zero-length span could be created.
fn validate(
    grid: &TileGrid,
    a: TileCoord,
    b: TileCoord,
    size: u32,
) -> Result<Vec<TileCoord>, PlacementError> {
    if grid.content(a) != Some(TileContent::Stump) || grid.content(b) != Some(TileContent::Stump) {
        return Err(PlacementError::MissingStump);
    }
    let distance = PlankRegistry::distance_between(a, b).ok_or(PlacementError::Misaligned)?;
    if size == 0 || distance != size {
        return Err(PlacementError::WrongLength);
    }
    let span = span_between(a, b);
    if span
        .iter()
        .any(|tile| grid.content(*tile) == Some(TileContent::Plank))
    {
        return Err(PlacementError::Obstructed);
    }
    Ok(span)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Board with stumps at rows 12 and 8 of column 2 and water elsewhere.
    fn stump_pair_grid() -> TileGrid {
        let mut grid = TileGrid::new();
        grid.set_content(TileCoord::new(12, 2), TileContent::Stump);
        grid.set_content(TileCoord::new(8, 2), TileContent::Stump);
        grid
    }

    #[test]
    fn distance_counts_tiles_strictly_between() {
        assert_eq!(
            PlankRegistry::distance_between(TileCoord::new(12, 2), TileCoord::new(8, 2)),
            Some(3)
        );
        assert_eq!(
            PlankRegistry::distance_between(TileCoord::new(6, 2), TileCoord::new(6, 6)),
            Some(3)
        );
        assert_eq!(
            PlankRegistry::distance_between(TileCoord::new(6, 2), TileCoord::new(6, 3)),
            Some(0)
        );
    }

    #[test]
    fn distance_is_undefined_for_unaligned_or_identical_tiles() {
        assert_eq!(
            PlankRegistry::distance_between(TileCoord::new(12, 2), TileCoord::new(8, 3)),
            None
        );
        assert_eq!(
            PlankRegistry::distance_between(TileCoord::new(5, 5), TileCoord::new(5, 5)),
            None
        );
    }

    #[test]
    fn place_spans_the_gap_between_the_stumps() {
        let mut grid = stump_pair_grid();
        let mut registry = PlankRegistry::new();

        let placed = registry
            .place_between(&mut grid, TileCoord::new(12, 2), TileCoord::new(8, 2))
            .expect("aligned unobstructed stumps accept a plank");

        assert_eq!(placed.size, 3);
        assert_eq!(placed.orientation, Orientation::Vertical);
        for row in 9..12 {
            let tile = TileCoord::new(row, 2);
            assert_eq!(grid.content(tile), Some(TileContent::Plank));
            assert_eq!(grid.plank_at(tile), Some(placed.id));
        }
        assert_eq!(grid.content(TileCoord::new(12, 2)), Some(TileContent::Stump));
        assert_eq!(grid.content(TileCoord::new(8, 2)), Some(TileContent::Stump));
    }

    #[test]
    fn place_then_remove_restores_water_and_reports_the_size() {
        let mut grid = stump_pair_grid();
        let mut registry = PlankRegistry::new();
        let placed = registry
            .place_between(&mut grid, TileCoord::new(12, 2), TileCoord::new(8, 2))
            .expect("placement succeeds");

        let removed = registry
            .remove_at(&mut grid, TileCoord::new(10, 2))
            .expect("a spanned tile resolves its plank");

        assert_eq!(removed.size, placed.size);
        for row in 9..12 {
            let tile = TileCoord::new(row, 2);
            assert_eq!(grid.content(tile), Some(TileContent::Water));
            assert_eq!(grid.plank_at(tile), None);
        }
    }

    #[test]
    fn remove_from_water_reports_nothing_and_changes_nothing() {
        let mut grid = stump_pair_grid();
        let mut registry = PlankRegistry::new();

        assert!(registry.remove_at(&mut grid, TileCoord::new(5, 5)).is_none());
        assert_eq!(grid.content(TileCoord::new(5, 5)), Some(TileContent::Water));
    }

    #[test]
    fn remove_between_resolves_the_plank_via_the_midpoint() {
        let mut grid = stump_pair_grid();
        let mut registry = PlankRegistry::new();
        let placed = registry
            .place_between(&mut grid, TileCoord::new(12, 2), TileCoord::new(8, 2))
            .expect("placement succeeds");

        let removed = registry
            .remove_between(&mut grid, TileCoord::new(12, 2), TileCoord::new(8, 2))
            .expect("the midpoint tile carries the plank");

        assert_eq!(removed.size, placed.size);
    }

    #[test]
    fn placement_rejects_non_stump_endpoints() {
        let mut grid = stump_pair_grid();
        let mut registry = PlankRegistry::new();

        let result = registry.place_between(&mut grid, TileCoord::new(11, 2), TileCoord::new(8, 2));

        assert_eq!(result.unwrap_err(), PlacementError::MissingStump);
    }

    #[test]
    fn placement_rejects_unaligned_stumps() {
        let mut grid = stump_pair_grid();
        grid.set_content(TileCoord::new(8, 5), TileContent::Stump);
        let mut registry = PlankRegistry::new();

        let result = registry.place_between(&mut grid, TileCoord::new(12, 2), TileCoord::new(8, 5));

        assert_eq!(result.unwrap_err(), PlacementError::Misaligned);
    }

    #[test]
    fn placement_rejects_a_held_size_that_does_not_match_the_gap() {
        let mut grid = stump_pair_grid();
        let mut registry = PlankRegistry::new();

        let result = registry.place_sized(&mut grid, TileCoord::new(12, 2), TileCoord::new(8, 2), 2);

        assert_eq!(result.unwrap_err(), PlacementError::WrongLength);
    }

    #[test]
    fn placement_never_overwrites_an_existing_plank() {
        let mut grid = stump_pair_grid();
        let mut registry = PlankRegistry::new();
        let first = registry
            .place_between(&mut grid, TileCoord::new(12, 2), TileCoord::new(8, 2))
            .expect("first placement succeeds");

        let result = registry.place_between(&mut grid, TileCoord::new(12, 2), TileCoord::new(8, 2));

        assert_eq!(result.unwrap_err(), PlacementError::Obstructed);
        for row in 9..12 {
            assert_eq!(grid.plank_at(TileCoord::new(row, 2)), Some(first.id));
        }
    }

    #[test]
    fn place_toward_resolves_the_far_stump() {
        let mut grid = stump_pair_grid();
        let mut registry = PlankRegistry::new();

        let placed = registry
            .place_toward(&mut grid, TileCoord::new(12, 2), Direction::Up, 3)
            .expect("the stump three tiles up accepts the plank");

        assert_eq!(placed.size, 3);
    }

    #[test]
    fn place_toward_rejects_when_no_stump_lies_in_the_direction() {
        let mut grid = stump_pair_grid();
        let mut registry = PlankRegistry::new();

        let result = registry.place_toward(&mut grid, TileCoord::new(12, 2), Direction::Right, 3);

        assert_eq!(result.unwrap_err(), PlacementError::MissingStump);
    }

    #[test]
    fn span_between_orders_tiles_from_the_lower_endpoint() {
        let descending = span_between(TileCoord::new(12, 2), TileCoord::new(8, 2));
        let ascending = span_between(TileCoord::new(8, 2), TileCoord::new(12, 2));

        let expected = vec![
            TileCoord::new(9, 2),
            TileCoord::new(10, 2),
            TileCoord::new(11, 2),
        ];
        assert_eq!(descending, expected);
        assert_eq!(ascending, expected);
    }
}
