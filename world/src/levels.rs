//! Static level catalog consumed during loads.

use river_crossing_core::{LevelId, TileContent, TileCoord, GRID_ROWS};

/// Declarative description of a single level layout.
///
/// Classification is pure data: listed coordinates are stumps, the first and
/// last rows are the banks, and everything else is open water. Planks never
/// appear in the initial classification; the listed stump pairs are seeded
/// through the registry's validated placement during the load.
#[derive(Clone, Copy, Debug)]
pub struct LevelDefinition {
    level: LevelId,
    stumps: &'static [TileCoord],
    planks: &'static [(TileCoord, TileCoord)],
    start: TileCoord,
    win: TileCoord,
}

impl LevelDefinition {
    /// Identifier of the level within the catalog.
    #[must_use]
    pub const fn level(&self) -> LevelId {
        self.level
    }

    /// Stump coordinates fixed into the level layout.
    #[must_use]
    pub const fn stumps(&self) -> &'static [TileCoord] {
        self.stumps
    }

    /// Stump pairs describing the level's initial plank placements.
    #[must_use]
    pub const fn planks(&self) -> &'static [(TileCoord, TileCoord)] {
        self.planks
    }

    /// Tile the player starts on.
    #[must_use]
    pub const fn start(&self) -> TileCoord {
        self.start
    }

    /// Tile whose occupation by the player completes the level.
    #[must_use]
    pub const fn win(&self) -> TileCoord {
        self.win
    }

    /// Initial classification of the provided tile.
    #[must_use]
    pub fn classify(&self, tile: TileCoord) -> TileContent {
        if self.stumps.contains(&tile) {
            TileContent::Stump
        } else if tile.row() == 0 || tile.row() == GRID_ROWS - 1 {
            TileContent::Land
        } else {
            TileContent::Water
        }
    }
}

/// Identifier of the first level in the shipped catalog.
pub const FIRST_LEVEL: LevelId = LevelId::new(1);

/// Looks up the catalog entry for the provided level identifier.
#[must_use]
pub fn definition(level: LevelId) -> Option<&'static LevelDefinition> {
    CATALOG.iter().find(|definition| definition.level == level)
}

/// Identifier of the level that follows the provided one, if any.
#[must_use]
pub fn next_level(level: LevelId) -> Option<LevelId> {
    definition(LevelId::new(level.get() + 1)).map(LevelDefinition::level)
}

/// Number of levels shipped in the catalog.
#[must_use]
pub fn count() -> usize {
    CATALOG.len()
}

const fn tile(row: u32, column: u32) -> TileCoord {
    TileCoord::new(row, column)
}

static CATALOG: [LevelDefinition; 5] = [
    LevelDefinition {
        level: LevelId::new(1),
        stumps: &[
            tile(12, 2),
            tile(8, 2),
            tile(6, 2),
            tile(6, 6),
            tile(4, 6),
            tile(0, 6),
        ],
        planks: &[
            (tile(12, 2), tile(8, 2)),
            (tile(8, 2), tile(6, 2)),
            (tile(6, 2), tile(6, 6)),
        ],
        start: tile(12, 2),
        win: tile(0, 6),
    },
    LevelDefinition {
        level: LevelId::new(2),
        stumps: &[
            tile(12, 6),
            tile(8, 6),
            tile(6, 6),
            tile(6, 2),
            tile(4, 2),
            tile(0, 2),
        ],
        planks: &[
            (tile(12, 6), tile(8, 6)),
            (tile(8, 6), tile(6, 6)),
            (tile(6, 6), tile(6, 2)),
        ],
        start: tile(12, 6),
        win: tile(0, 2),
    },
    LevelDefinition {
        level: LevelId::new(3),
        stumps: &[tile(12, 4), tile(8, 4), tile(4, 4), tile(0, 4)],
        planks: &[
            (tile(12, 4), tile(8, 4)),
            (tile(8, 4), tile(4, 4)),
            (tile(4, 4), tile(0, 4)),
        ],
        start: tile(12, 4),
        win: tile(0, 4),
    },
    LevelDefinition {
        level: LevelId::new(4),
        stumps: &[
            tile(12, 4),
            tile(9, 4),
            tile(6, 4),
            tile(3, 4),
            tile(0, 4),
        ],
        planks: &[(tile(12, 4), tile(9, 4))],
        start: tile(12, 4),
        win: tile(0, 4),
    },
    LevelDefinition {
        level: LevelId::new(5),
        stumps: &[
            tile(12, 2),
            tile(9, 2),
            tile(9, 6),
            tile(4, 6),
            tile(4, 2),
            tile(0, 2),
        ],
        planks: &[
            (tile(12, 2), tile(9, 2)),
            (tile(9, 2), tile(9, 6)),
            (tile(9, 6), tile(4, 6)),
        ],
        start: tile(12, 2),
        win: tile(0, 2),
    },
];
