//! Dense tile grid storage and directional lookups.

use river_crossing_core::{Direction, PlankId, TileContent, TileCoord, GRID_COLUMNS, GRID_ROWS};

/// Fixed 13×9 tile arena backing the board.
///
/// Contents and plank back-references live in two row-major vectors sharing
/// one index space; a back-reference is present exactly when the content is
/// `Plank`.
#[derive(Clone, Debug)]
pub(crate) struct TileGrid {
    contents: Vec<TileContent>,
    plank_refs: Vec<Option<PlankId>>,
}

impl TileGrid {
    /// Creates a grid of open water with no plank back-references.
    pub(crate) fn new() -> Self {
        let capacity_u64 = u64::from(GRID_ROWS) * u64::from(GRID_COLUMNS);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            contents: vec![TileContent::Water; capacity],
            plank_refs: vec![None; capacity],
        }
    }

    /// Reclassifies every tile and drops all plank back-references.
    pub(crate) fn reset_with<F>(&mut self, mut classify: F)
    where
        F: FnMut(TileCoord) -> TileContent,
    {
        self.plank_refs.fill(None);
        for row in 0..GRID_ROWS {
            for column in 0..GRID_COLUMNS {
                let tile = TileCoord::new(row, column);
                if let Some(index) = self.index(tile) {
                    self.contents[index] = classify(tile);
                }
            }
        }
    }

    /// Content of the provided tile, or `None` outside the grid.
    pub(crate) fn content(&self, tile: TileCoord) -> Option<TileContent> {
        self.index(tile)
            .and_then(|index| self.contents.get(index).copied())
    }

    /// Plank occupying the provided tile, if any.
    pub(crate) fn plank_at(&self, tile: TileCoord) -> Option<PlankId> {
        self.index(tile)
            .and_then(|index| self.plank_refs.get(index).copied().flatten())
    }

    /// Sole content mutation primitive for non-plank content.
    ///
    /// Clears the plank back-reference whenever the new content is not
    /// `Plank`, keeping the two vectors consistent.
    pub(crate) fn set_content(&mut self, tile: TileCoord, content: TileContent) {
        if let Some(index) = self.index(tile) {
            self.contents[index] = content;
            if content != TileContent::Plank {
                self.plank_refs[index] = None;
            }
        }
    }

    /// Forces the tile's content to `Plank` and records the back-reference.
    pub(crate) fn set_plank_piece(&mut self, tile: TileCoord, plank: PlankId) {
        if let Some(index) = self.index(tile) {
            self.contents[index] = TileContent::Plank;
            self.plank_refs[index] = Some(plank);
        }
    }

    /// Returns the adjacent tile one step in `direction`, or `None` when the
    /// tile sits at the grid boundary in that direction.
    pub(crate) fn neighbor(&self, tile: TileCoord, direction: Direction) -> Option<TileCoord> {
        match direction {
            Direction::Left => tile
                .column()
                .checked_sub(1)
                .map(|column| TileCoord::new(tile.row(), column)),
            Direction::Right => {
                let column = tile.column() + 1;
                (column < GRID_COLUMNS).then(|| TileCoord::new(tile.row(), column))
            }
            Direction::Up => tile
                .row()
                .checked_sub(1)
                .map(|row| TileCoord::new(row, tile.column())),
            Direction::Down => {
                let row = tile.row() + 1;
                (row < GRID_ROWS).then(|| TileCoord::new(row, tile.column()))
            }
        }
    }

    /// Steps tile by tile until content matches, skipping the origin itself.
    ///
    /// Returns the original tile when the boundary is reached without a
    /// match. Callers detect "no match" by comparing against the origin, so
    /// this convention must not change.
    pub(crate) fn first_matching(
        &self,
        origin: TileCoord,
        direction: Direction,
        content: TileContent,
    ) -> TileCoord {
        let mut cursor = origin;
        while let Some(next) = self.neighbor(cursor, direction) {
            if self.content(next) == Some(content) {
                return next;
            }
            cursor = next;
        }
        origin
    }

    fn index(&self, tile: TileCoord) -> Option<usize> {
        if tile.row() < GRID_ROWS && tile.column() < GRID_COLUMNS {
            let row = usize::try_from(tile.row()).ok()?;
            let column = usize::try_from(tile.column()).ok()?;
            let width = usize::try_from(GRID_COLUMNS).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbor_returns_none_past_every_boundary() {
        let grid = TileGrid::new();

        assert_eq!(grid.neighbor(TileCoord::new(0, 4), Direction::Up), None);
        assert_eq!(
            grid.neighbor(TileCoord::new(GRID_ROWS - 1, 4), Direction::Down),
            None
        );
        assert_eq!(grid.neighbor(TileCoord::new(4, 0), Direction::Left), None);
        assert_eq!(
            grid.neighbor(TileCoord::new(4, GRID_COLUMNS - 1), Direction::Right),
            None
        );
    }

    #[test]
    fn neighbor_steps_one_tile_inside_the_grid() {
        let grid = TileGrid::new();
        let tile = TileCoord::new(6, 4);

        assert_eq!(
            grid.neighbor(tile, Direction::Up),
            Some(TileCoord::new(5, 4))
        );
        assert_eq!(
            grid.neighbor(tile, Direction::Down),
            Some(TileCoord::new(7, 4))
        );
        assert_eq!(
            grid.neighbor(tile, Direction::Left),
            Some(TileCoord::new(6, 3))
        );
        assert_eq!(
            grid.neighbor(tile, Direction::Right),
            Some(TileCoord::new(6, 5))
        );
    }

    #[test]
    fn first_matching_skips_the_origin_and_finds_content() {
        let mut grid = TileGrid::new();
        let origin = TileCoord::new(12, 2);
        let stump = TileCoord::new(8, 2);
        grid.set_content(origin, TileContent::Stump);
        grid.set_content(stump, TileContent::Stump);

        assert_eq!(
            grid.first_matching(origin, Direction::Up, TileContent::Stump),
            stump
        );
    }

    #[test]
    fn first_matching_returns_origin_when_boundary_reached() {
        let grid = TileGrid::new();
        let origin = TileCoord::new(6, 4);

        let found = grid.first_matching(origin, Direction::Up, TileContent::Stump);

        assert_eq!(found, origin, "no stump above means identity return");
    }

    #[test]
    fn set_content_clears_plank_back_reference() {
        let mut grid = TileGrid::new();
        let tile = TileCoord::new(5, 5);
        grid.set_plank_piece(tile, PlankId::new(3));
        assert_eq!(grid.content(tile), Some(TileContent::Plank));
        assert_eq!(grid.plank_at(tile), Some(PlankId::new(3)));

        grid.set_content(tile, TileContent::Water);

        assert_eq!(grid.content(tile), Some(TileContent::Water));
        assert_eq!(grid.plank_at(tile), None);
    }

    #[test]
    fn content_is_none_outside_the_grid() {
        let grid = TileGrid::new();

        assert_eq!(grid.content(TileCoord::new(GRID_ROWS, 0)), None);
        assert_eq!(grid.content(TileCoord::new(0, GRID_COLUMNS)), None);
    }
}
