//! Single-line level layout transfer for sharing between players.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use river_crossing_core::{Orientation, TileContent, TileCoord, GRID_COLUMNS, GRID_ROWS};
use river_crossing_world::{query, World};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SNAPSHOT_DOMAIN: &str = "crossing";
const SNAPSHOT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded snapshot payload.
pub(crate) const SNAPSHOT_HEADER: &str = "crossing:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Snapshot of a level layout: stumps, planks, start and win tiles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct LevelSnapshot {
    /// Number of tile rows contained in the grid.
    pub rows: u32,
    /// Number of tile columns contained in the grid.
    pub columns: u32,
    /// Stump coordinates fixed into the layout.
    pub stumps: Vec<TileCoord>,
    /// Stump pairs bridged by planks at the captured moment.
    pub planks: Vec<(TileCoord, TileCoord)>,
    /// Tile the player starts on.
    pub start: TileCoord,
    /// Tile whose occupation completes the level.
    pub win: TileCoord,
}

impl LevelSnapshot {
    /// Captures the currently loaded level from the world's query surface.
    pub(crate) fn capture(world: &World) -> Option<Self> {
        let start = query::start_tile(world)?;
        let win = query::win_tile(world)?;

        let mut stumps = Vec::new();
        for row in 0..GRID_ROWS {
            for column in 0..GRID_COLUMNS {
                let tile = TileCoord::new(row, column);
                if query::tile_content(world, tile) == Some(TileContent::Stump) {
                    stumps.push(tile);
                }
            }
        }

        let planks = query::plank_view(world)
            .iter()
            .filter_map(|plank| {
                let first = plank.span.first()?;
                let last = plank.span.last()?;
                Some(match plank.orientation {
                    Orientation::Horizontal => (
                        TileCoord::new(first.row(), first.column().saturating_sub(1)),
                        TileCoord::new(last.row(), last.column() + 1),
                    ),
                    Orientation::Vertical => (
                        TileCoord::new(first.row().saturating_sub(1), first.column()),
                        TileCoord::new(last.row() + 1, last.column()),
                    ),
                })
            })
            .collect();

        Some(Self {
            rows: GRID_ROWS,
            columns: GRID_COLUMNS,
            stumps,
            planks,
            start,
            win,
        })
    }

    /// Encodes the snapshot into a single-line string suitable for clipboard
    /// transfer.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let payload = SerializablePayload {
            stumps: self.stumps.clone(),
            planks: self.planks.clone(),
            start: self.start,
            win: self.win,
        };
        let json = serde_json::to_vec(&payload).expect("level snapshot serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!("{SNAPSHOT_HEADER}:{}x{}:{encoded}", self.rows, self.columns)
    }

    /// Decodes a snapshot from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, LevelTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LevelTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(LevelTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(LevelTransferError::MissingVersion)?;
        let dimensions = parts.next().ok_or(LevelTransferError::MissingDimensions)?;
        let payload = parts.next().ok_or(LevelTransferError::MissingPayload)?;

        if domain != SNAPSHOT_DOMAIN {
            return Err(LevelTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != SNAPSHOT_VERSION {
            return Err(LevelTransferError::UnsupportedVersion(version.to_owned()));
        }

        let (rows, columns) = parse_dimensions(dimensions)?;
        if rows != GRID_ROWS || columns != GRID_COLUMNS {
            return Err(LevelTransferError::WrongDimensions(rows, columns));
        }

        let bytes = STANDARD_NO_PAD.decode(payload.as_bytes())?;
        let decoded: SerializablePayload = serde_json::from_slice(&bytes)?;

        Ok(Self {
            rows,
            columns,
            stumps: decoded.stumps,
            planks: decoded.planks,
            start: decoded.start,
            win: decoded.win,
        })
    }

    /// Human-readable summary used by the inspect flag.
    #[must_use]
    pub(crate) fn describe(&self) -> String {
        format!(
            "{}x{} layout: {} stumps, {} planks, start ({}, {}), win ({}, {})",
            self.rows,
            self.columns,
            self.stumps.len(),
            self.planks.len(),
            self.start.row(),
            self.start.column(),
            self.win.row(),
            self.win.column(),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializablePayload {
    stumps: Vec<TileCoord>,
    planks: Vec<(TileCoord, TileCoord)>,
    start: TileCoord,
    win: TileCoord,
}

/// Errors that can occur while decoding level transfer strings.
#[derive(Debug, Error)]
pub(crate) enum LevelTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("transfer payload was empty")]
    EmptyPayload,
    /// The prefix segment was missing from the encoded snapshot.
    #[error("transfer string is missing the prefix")]
    MissingPrefix,
    /// The encoded snapshot did not contain a version segment.
    #[error("transfer string is missing the version")]
    MissingVersion,
    /// The encoded snapshot did not include grid dimensions.
    #[error("transfer string is missing the grid dimensions")]
    MissingDimensions,
    /// The encoded snapshot did not include the payload segment.
    #[error("transfer string is missing the payload")]
    MissingPayload,
    /// The encoded snapshot used an unexpected prefix segment.
    #[error("transfer prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded snapshot used an unsupported version identifier.
    #[error("transfer version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed from the encoded snapshot.
    #[error("could not parse grid dimensions '{0}'")]
    InvalidDimensions(String),
    /// The encoded dimensions describe a different board than this build.
    #[error("grid dimensions {0}x{1} do not match the {GRID_ROWS}x{GRID_COLUMNS} board")]
    WrongDimensions(u32, u32),
    /// The base64 payload could not be decoded.
    #[error("could not decode transfer payload: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    /// The decoded payload could not be deserialised.
    #[error("could not parse transfer payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), LevelTransferError> {
    let (rows, columns) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| LevelTransferError::InvalidDimensions(dimensions.to_owned()))?;

    let rows = rows
        .trim()
        .parse::<u32>()
        .map_err(|_| LevelTransferError::InvalidDimensions(dimensions.to_owned()))?;
    let columns = columns
        .trim()
        .parse::<u32>()
        .map_err(|_| LevelTransferError::InvalidDimensions(dimensions.to_owned()))?;

    if rows == 0 || columns == 0 {
        return Err(LevelTransferError::InvalidDimensions(
            dimensions.to_owned(),
        ));
    }

    Ok((rows, columns))
}
