#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the River Crossing engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to River Crossing.";

/// Number of tile rows laid out in the fixed puzzle grid.
pub const GRID_ROWS: u32 = 13;

/// Number of tile columns laid out in the fixed puzzle grid.
pub const GRID_COLUMNS: u32 = 9;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests a stop-the-world load of the identified level.
    LoadLevel {
        /// Identifier of the level to load from the catalog.
        level: LevelId,
    },
    /// Directional input that retargets the player's facing or crosses a plank.
    Move {
        /// Direction the input points toward.
        direction: Direction,
    },
    /// Context-sensitive plank interaction: places the held plank in front of
    /// the player, or picks up the plank the player is facing.
    Interact,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a level finished loading and all state was reset.
    LevelLoaded {
        /// Identifier of the level that became active.
        level: LevelId,
    },
    /// Reports that a load request named a level outside the catalog.
    LevelRejected {
        /// Identifier that failed to resolve to a catalog entry.
        level: LevelId,
    },
    /// Announces that the player turned to face a new direction.
    FacingChanged {
        /// Direction the player faces after the turn.
        facing: Direction,
    },
    /// Confirms that the player crossed a plank run between two stumps.
    PlayerMoved {
        /// Stump tile the player stood on before the crossing.
        from: TileCoord,
        /// Stump tile the player reached at the far end of the plank run.
        to: TileCoord,
    },
    /// Confirms that the held plank was placed onto the board.
    PlankPlaced {
        /// Identifier assigned to the new plank by the world.
        plank: PlankId,
        /// Orientation derived from the plank's endpoint stumps.
        orientation: Orientation,
        /// Number of tiles the new plank spans.
        size: u32,
    },
    /// Confirms that a plank was lifted off the board into the player's hands.
    PlankPickedUp {
        /// Number of tiles the removed plank spanned.
        size: u32,
    },
    /// Reports that a plank placement request was rejected.
    PlankPlacementRejected {
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Announces that the player reached the level's win tile.
    LevelCompleted {
        /// Identifier of the level that was completed.
        level: LevelId,
    },
}

/// Types of content a grid tile can hold.
///
/// Exactly one value holds for any tile at any time; `Plank` content is
/// always paired with a back-reference to the occupying plank entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileContent {
    /// Bank terrain the player never occupies.
    Land,
    /// Open river the player never occupies.
    Water,
    /// Fixed anchor post where planks begin and end.
    Stump,
    /// A tile covered by a placed plank.
    Plank,
}

/// Input directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
}

/// Orientation of a placed plank, derived from its endpoint stumps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// The plank's endpoints share a row.
    Horizontal,
    /// The plank's endpoints share a column.
    Vertical,
}

/// Unique identifier assigned to a placed plank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlankId(u32);

impl PlankId {
    /// Creates a new plank identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of a level within the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelId(u32);

impl LevelId {
    /// Creates a new level identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid tile expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    row: u32,
    column: u32,
}

impl TileCoord {
    /// Creates a new grid tile coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

/// Reasons a plank placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// An endpoint of the requested span is not a stump.
    MissingStump,
    /// The endpoint stumps share neither a row nor a column.
    Misaligned,
    /// The distance between the stumps does not match the plank size.
    WrongLength,
    /// A tile between the stumps already carries a plank.
    Obstructed,
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerSnapshot {
    /// Tile the player currently occupies.
    pub position: TileCoord,
    /// Direction the player is facing.
    pub facing: Direction,
    /// Size of the held plank, or zero when the player's hands are empty.
    pub held_plank_size: u32,
}

/// Immutable representation of a single plank's state used for queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlankSnapshot {
    /// Identifier allocated to the plank by the world.
    pub id: PlankId,
    /// Orientation derived from the plank's endpoint stumps.
    pub orientation: Orientation,
    /// Number of tiles the plank spans.
    pub size: u32,
    /// Tiles the plank occupies, ordered from the lower endpoint.
    pub span: Vec<TileCoord>,
}

/// Read-only snapshot describing all planks placed on the board.
#[derive(Clone, Debug, Default)]
pub struct PlankView {
    snapshots: Vec<PlankSnapshot>,
}

impl PlankView {
    /// Creates a new plank view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PlankSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured plank snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &PlankSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PlankSnapshot> {
        self.snapshots
    }
}
