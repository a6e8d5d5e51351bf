//! ASCII projection of the world state for the terminal.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use river_crossing_core::{
    Direction, Event, Orientation, PlacementError, TileContent, TileCoord, GRID_COLUMNS, GRID_ROWS,
};
use river_crossing_system_preview::Preview;
use river_crossing_world::{query, World};

/// Water glyph variants; index zero is the common calm surface.
const WATER_GLYPHS: [char; 4] = ['~', ',', '\'', '-'];

/// Renders the board with deterministic water variation.
pub(crate) struct BoardRenderer {
    seed: u64,
}

impl BoardRenderer {
    /// Creates a renderer whose water pattern derives from the seed.
    pub(crate) fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Projects the grid, the player, the planks and the ghost overlay into
    /// a multi-line string.
    pub(crate) fn render(&self, world: &World, preview: &Preview) -> String {
        let player = query::player(world);
        let win = query::win_tile(world);

        let mut orientations: HashMap<TileCoord, Orientation> = HashMap::new();
        for plank in query::plank_view(world).iter() {
            for tile in &plank.span {
                let _ = orientations.insert(*tile, plank.orientation);
            }
        }

        let mut ghost_tiles: HashMap<TileCoord, bool> = HashMap::new();
        if let Some(ghost) = preview.ghost() {
            for tile in &ghost.span {
                let _ = ghost_tiles.insert(*tile, ghost.placeable);
            }
        }

        // Water sparkles vary per tile but are stable for a given seed, the
        // same trick the original used with randomized water sprites.
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut out = String::new();
        for row in 0..GRID_ROWS {
            for column in 0..GRID_COLUMNS {
                let tile = TileCoord::new(row, column);
                let water_roll: usize = rng.gen_range(0..40);
                let glyph = if player.map(|snapshot| snapshot.position) == Some(tile) {
                    player.map_or('@', |snapshot| facing_glyph(snapshot.facing))
                } else if let Some(placeable) = ghost_tiles.get(&tile) {
                    if *placeable {
                        '+'
                    } else {
                        'x'
                    }
                } else {
                    match query::tile_content(world, tile) {
                        Some(TileContent::Land) => '=',
                        Some(TileContent::Stump) => {
                            if win == Some(tile) {
                                'O'
                            } else {
                                'o'
                            }
                        }
                        Some(TileContent::Plank) => match orientations.get(&tile) {
                            Some(Orientation::Horizontal) => '#',
                            _ => 'H',
                        },
                        Some(TileContent::Water) | None => {
                            if water_roll > 3 {
                                WATER_GLYPHS[0]
                            } else {
                                WATER_GLYPHS[water_roll]
                            }
                        }
                    }
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out.push_str(&status_line(world));
        out
    }
}

/// One-line summary of the session shown under the board.
fn status_line(world: &World) -> String {
    let Some(level) = query::current_level(world) else {
        return String::from("no level loaded");
    };
    let mut line = format!("level {}", level.get());
    if let Some(player) = query::player(world) {
        line.push_str(&format!(" | facing {}", direction_name(player.facing)));
        if player.held_plank_size > 0 {
            line.push_str(&format!(" | holding a size-{} plank", player.held_plank_size));
        }
    }
    if query::level_complete(world) {
        line.push_str(" | complete!");
    }
    line
}

/// Feedback line for an event, if the event deserves one.
pub(crate) fn report(event: &Event) -> Option<String> {
    match event {
        Event::LevelLoaded { level } => Some(format!("Level {}.", level.get())),
        Event::LevelRejected { level } => {
            Some(format!("Level {} is not in the catalog.", level.get()))
        }
        Event::PlankPlaced { size, .. } => Some(format!("Placed a plank of size {size}.")),
        Event::PlankPickedUp { size } => Some(format!("Picked up a plank of size {size}.")),
        Event::PlankPlacementRejected { reason } => Some(String::from(match reason {
            PlacementError::MissingStump => "No stump in reach.",
            PlacementError::Misaligned => "Those stumps are not aligned.",
            PlacementError::WrongLength => "The plank does not fit that gap.",
            PlacementError::Obstructed => "Another plank is in the way.",
        })),
        Event::LevelCompleted { level } => Some(format!("Level {} complete!", level.get())),
        Event::FacingChanged { .. } | Event::PlayerMoved { .. } => None,
    }
}

/// Key binding reminder printed at startup.
pub(crate) fn help_line() -> &'static str {
    "w/a/s/d to move, p or space to handle planks, r to reload, q to quit"
}

fn facing_glyph(facing: Direction) -> char {
    match facing {
        Direction::Left => '<',
        Direction::Right => '>',
        Direction::Up => '^',
        Direction::Down => 'v',
    }
}

fn direction_name(facing: Direction) -> &'static str {
    match facing {
        Direction::Left => "left",
        Direction::Right => "right",
        Direction::Up => "up",
        Direction::Down => "down",
    }
}
