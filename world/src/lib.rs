#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for River Crossing.
//!
//! The world owns the tile grid, the plank registry, and the player, and
//! mutates them exclusively through [`apply`]. Every command either fully
//! succeeds and changes state or fully fails and leaves state untouched;
//! failures surface as rejection events, never as panics.

mod grid;
pub mod levels;
mod planks;

use river_crossing_core::{
    Command, Direction, Event, LevelId, TileContent, TileCoord, WELCOME_BANNER,
};

use crate::{grid::TileGrid, levels::LevelDefinition, planks::PlankRegistry};

const DEFAULT_FACING: Direction = Direction::Up;

/// Represents the authoritative River Crossing world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: TileGrid,
    planks: PlankRegistry,
    session: Option<Session>,
}

/// State that exists only while a level is active.
#[derive(Debug)]
struct Session {
    level: LevelId,
    start: TileCoord,
    win: TileCoord,
    player: Player,
}

#[derive(Clone, Copy, Debug)]
struct Player {
    position: TileCoord,
    facing: Direction,
    held_plank_size: u32,
}

impl World {
    /// Creates a new world with an open-water board and no active level.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            grid: TileGrid::new(),
            planks: PlankRegistry::new(),
            session: None,
        }
    }

    fn load_level(&mut self, definition: &LevelDefinition, out_events: &mut Vec<Event>) {
        // Tear down the previous session's planks between their endpoint
        // stumps before reclassifying, so no back-reference survives.
        let endpoints: Vec<(TileCoord, TileCoord)> = self
            .planks
            .iter()
            .filter_map(planks::Plank::endpoints)
            .collect();
        for (a, b) in endpoints {
            let _ = self.planks.remove_between(&mut self.grid, a, b);
        }
        self.planks.clear();

        self.grid.reset_with(|tile| definition.classify(tile));
        for (a, b) in definition.planks() {
            // Catalog layouts are validated by tests; a malformed pair is
            // skipped rather than poisoning the load.
            let _ = self.planks.place_between(&mut self.grid, *a, *b);
        }

        self.session = Some(Session {
            level: definition.level(),
            start: definition.start(),
            win: definition.win(),
            player: Player {
                position: definition.start(),
                facing: DEFAULT_FACING,
                held_plank_size: 0,
            },
        });
        out_events.push(Event::LevelLoaded {
            level: definition.level(),
        });
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        // The level is complete once the player stands on the win tile;
        // further directional input is ignored until a reload.
        if session.player.position == session.win {
            return;
        }

        if direction != session.player.facing {
            session.player.facing = direction;
            out_events.push(Event::FacingChanged { facing: direction });
            return;
        }

        let from = session.player.position;
        let Some(next) = self.grid.neighbor(from, direction) else {
            return;
        };
        if self.grid.content(next) != Some(TileContent::Plank) {
            return;
        }

        // Crossing is a single action: the player is carried to the stump at
        // the far end of the plank run, never stopping mid-span.
        let to = self.grid.first_matching(from, direction, TileContent::Stump);
        if to == from {
            return;
        }
        session.player.position = to;
        out_events.push(Event::PlayerMoved { from, to });

        if to == session.win {
            out_events.push(Event::LevelCompleted {
                level: session.level,
            });
        }
    }

    fn interact(&mut self, out_events: &mut Vec<Event>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let player = &mut session.player;

        if player.held_plank_size > 0 {
            match self.planks.place_toward(
                &mut self.grid,
                player.position,
                player.facing,
                player.held_plank_size,
            ) {
                Ok(placed) => {
                    player.held_plank_size = 0;
                    out_events.push(Event::PlankPlaced {
                        plank: placed.id,
                        orientation: placed.orientation,
                        size: placed.size,
                    });
                }
                Err(reason) => out_events.push(Event::PlankPlacementRejected { reason }),
            }
            return;
        }

        let Some(next) = self.grid.neighbor(player.position, player.facing) else {
            return;
        };
        if self.grid.content(next) != Some(TileContent::Plank) {
            return;
        }
        if let Some(removed) = self
            .planks
            .remove_toward(&mut self.grid, player.position, player.facing)
        {
            player.held_plank_size = removed.size;
            out_events.push(Event::PlankPickedUp { size: removed.size });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadLevel { level } => match levels::definition(level) {
            Some(definition) => world.load_level(definition, out_events),
            None => out_events.push(Event::LevelRejected { level }),
        },
        Command::Move { direction } => world.move_player(direction, out_events),
        Command::Interact => world.interact(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{planks, World};
    use river_crossing_core::{
        Direction, LevelId, PlankId, PlankSnapshot, PlankView, PlayerSnapshot, TileContent,
        TileCoord,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Identifier of the currently loaded level, if any.
    #[must_use]
    pub fn current_level(world: &World) -> Option<LevelId> {
        world.session.as_ref().map(|session| session.level)
    }

    /// Start tile of the active level.
    #[must_use]
    pub fn start_tile(world: &World) -> Option<TileCoord> {
        world.session.as_ref().map(|session| session.start)
    }

    /// Win tile of the active level.
    #[must_use]
    pub fn win_tile(world: &World) -> Option<TileCoord> {
        world.session.as_ref().map(|session| session.win)
    }

    /// Captures the player's current state, if a level is active.
    #[must_use]
    pub fn player(world: &World) -> Option<PlayerSnapshot> {
        world.session.as_ref().map(|session| PlayerSnapshot {
            position: session.player.position,
            facing: session.player.facing,
            held_plank_size: session.player.held_plank_size,
        })
    }

    /// Content of the provided tile, or `None` outside the grid.
    #[must_use]
    pub fn tile_content(world: &World, tile: TileCoord) -> Option<TileContent> {
        world.grid.content(tile)
    }

    /// Plank occupying the provided tile, if any.
    #[must_use]
    pub fn plank_at(world: &World, tile: TileCoord) -> Option<PlankId> {
        world.grid.plank_at(tile)
    }

    /// Captures a read-only view of the planks placed on the board.
    #[must_use]
    pub fn plank_view(world: &World) -> PlankView {
        let snapshots: Vec<PlankSnapshot> = world
            .planks
            .iter()
            .map(|plank| PlankSnapshot {
                id: plank.id,
                orientation: plank.orientation,
                size: plank.size(),
                span: plank.span.clone(),
            })
            .collect();
        PlankView::from_snapshots(snapshots)
    }

    /// Pure placement feasibility oracle shared with the ghost preview.
    ///
    /// True iff both tiles are stumps, they share a row or column, the gap
    /// between them equals `size`, and no tile in the gap carries a plank.
    #[must_use]
    pub fn can_place(world: &World, a: TileCoord, b: TileCoord, size: u32) -> bool {
        planks::PlankRegistry::can_place(&world.grid, a, b, size)
    }

    /// First tile with the requested content from `origin` in `direction`.
    ///
    /// Returns `origin` itself when the grid boundary is reached without a
    /// match; callers detect "no match" by identity comparison.
    #[must_use]
    pub fn first_matching(
        world: &World,
        origin: TileCoord,
        direction: Direction,
        content: TileContent,
    ) -> TileCoord {
        world.grid.first_matching(origin, direction, content)
    }

    /// Tiles strictly between two aligned tiles, ordered from the lower end.
    ///
    /// Empty when the tiles are adjacent or share neither a row nor a column.
    #[must_use]
    pub fn span_between(a: TileCoord, b: TileCoord) -> Vec<TileCoord> {
        planks::span_between(a, b)
    }

    /// Reports whether the player is parked on the active level's win tile.
    #[must_use]
    pub fn level_complete(world: &World) -> bool {
        world
            .session
            .as_ref()
            .is_some_and(|session| session.player.position == session.win)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use river_crossing_core::{PlacementError, GRID_COLUMNS, GRID_ROWS};

    fn load(world: &mut World, level: u32) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::LoadLevel {
                level: LevelId::new(level),
            },
            &mut events,
        );
        events
    }

    fn press(world: &mut World, direction: Direction) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::Move { direction }, &mut events);
        events
    }

    fn interact(world: &mut World) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::Interact, &mut events);
        events
    }

    #[test]
    fn loading_level_one_seeds_the_original_layout() {
        let mut world = World::new();

        let events = load(&mut world, 1);

        assert_eq!(
            events,
            vec![Event::LevelLoaded {
                level: LevelId::new(1)
            }]
        );
        let player = query::player(&world).expect("load resets the player");
        assert_eq!(player.position, TileCoord::new(12, 2));
        assert_eq!(player.facing, Direction::Up);
        assert_eq!(player.held_plank_size, 0);
        assert_eq!(query::plank_view(&world).into_vec().len(), 3);
        assert_eq!(
            query::tile_content(&world, TileCoord::new(10, 2)),
            Some(TileContent::Plank)
        );
        assert_eq!(
            query::tile_content(&world, TileCoord::new(6, 4)),
            Some(TileContent::Plank)
        );
    }

    #[test]
    fn unknown_level_is_rejected_explicitly_and_changes_nothing() {
        let mut world = World::new();
        let _ = load(&mut world, 1);
        let before = query::player(&world);

        let events = load(&mut world, 99);

        assert_eq!(
            events,
            vec![Event::LevelRejected {
                level: LevelId::new(99)
            }]
        );
        assert_eq!(query::player(&world), before);
        assert_eq!(query::current_level(&world), Some(LevelId::new(1)));
    }

    #[test]
    fn catalog_layouts_seed_cleanly() {
        let mut world = World::new();
        for offset in 0..levels::count() as u32 {
            let level = LevelId::new(levels::FIRST_LEVEL.get() + offset);
            let definition = levels::definition(level).expect("contiguous catalog");

            let events = load(&mut world, level.get());

            assert_eq!(events, vec![Event::LevelLoaded { level }]);
            assert_eq!(
                query::plank_view(&world).into_vec().len(),
                definition.planks().len(),
                "level {} must seed every listed plank",
                level.get()
            );
        }
    }

    #[test]
    fn reload_restores_a_pristine_board() {
        let mut world = World::new();
        let _ = load(&mut world, 1);
        let _ = press(&mut world, Direction::Up);
        let _ = press(&mut world, Direction::Down);
        let _ = interact(&mut world);
        assert!(query::player(&world).expect("level active").held_plank_size > 0);

        let _ = load(&mut world, 1);

        let player = query::player(&world).expect("level active");
        assert_eq!(player.position, TileCoord::new(12, 2));
        assert_eq!(player.held_plank_size, 0);
        assert_eq!(query::plank_view(&world).into_vec().len(), 3);
    }

    #[test]
    fn pressing_a_new_direction_only_turns_the_player() {
        let mut world = World::new();
        let _ = load(&mut world, 1);

        let events = press(&mut world, Direction::Left);

        assert_eq!(
            events,
            vec![Event::FacingChanged {
                facing: Direction::Left
            }]
        );
        let player = query::player(&world).expect("level active");
        assert_eq!(player.position, TileCoord::new(12, 2));
        assert_eq!(player.facing, Direction::Left);
    }

    #[test]
    fn pressing_the_facing_direction_crosses_the_full_plank_run() {
        let mut world = World::new();
        let _ = load(&mut world, 1);

        let events = press(&mut world, Direction::Up);

        assert_eq!(
            events,
            vec![Event::PlayerMoved {
                from: TileCoord::new(12, 2),
                to: TileCoord::new(8, 2),
            }]
        );
    }

    #[test]
    fn moving_without_a_plank_ahead_is_rejected_silently() {
        let mut world = World::new();
        let _ = load(&mut world, 1);
        let _ = press(&mut world, Direction::Right);

        let events = press(&mut world, Direction::Right);

        assert!(events.is_empty(), "open water ahead means no move");
        assert_eq!(
            query::player(&world).expect("level active").position,
            TileCoord::new(12, 2)
        );
    }

    #[test]
    fn picking_up_and_replacing_a_plank_round_trips() {
        let mut world = World::new();
        let _ = load(&mut world, 4);
        let _ = press(&mut world, Direction::Up);
        assert_eq!(
            query::player(&world).expect("level active").position,
            TileCoord::new(9, 4)
        );

        let _ = press(&mut world, Direction::Down);
        let picked = interact(&mut world);
        assert_eq!(picked, vec![Event::PlankPickedUp { size: 2 }]);
        assert_eq!(
            query::tile_content(&world, TileCoord::new(10, 4)),
            Some(TileContent::Water)
        );

        let _ = press(&mut world, Direction::Up);
        let placed = interact(&mut world);
        assert!(
            matches!(
                placed.as_slice(),
                [Event::PlankPlaced { size: 2, .. }]
            ),
            "the held plank fits the gap above: {placed:?}"
        );
        assert_eq!(
            query::player(&world).expect("level active").held_plank_size,
            0
        );
        assert_eq!(
            query::tile_content(&world, TileCoord::new(8, 4)),
            Some(TileContent::Plank)
        );
    }

    #[test]
    fn placement_rejection_keeps_the_plank_in_hand() {
        let mut world = World::new();
        let _ = load(&mut world, 4);
        let _ = press(&mut world, Direction::Up);
        let _ = press(&mut world, Direction::Down);
        let _ = interact(&mut world);
        let _ = press(&mut world, Direction::Left);

        let events = interact(&mut world);

        assert_eq!(
            events,
            vec![Event::PlankPlacementRejected {
                reason: PlacementError::MissingStump
            }]
        );
        assert_eq!(
            query::player(&world).expect("level active").held_plank_size,
            2
        );
    }

    #[test]
    fn interact_with_empty_hands_and_no_plank_ahead_is_a_no_op() {
        let mut world = World::new();
        let _ = load(&mut world, 1);
        let _ = press(&mut world, Direction::Right);

        let events = interact(&mut world);

        assert!(events.is_empty());
    }

    #[test]
    fn walking_level_three_completes_it_exactly_once() {
        let mut world = World::new();
        let _ = load(&mut world, 3);

        let first = press(&mut world, Direction::Up);
        let second = press(&mut world, Direction::Up);
        let third = press(&mut world, Direction::Up);

        assert_eq!(
            first,
            vec![Event::PlayerMoved {
                from: TileCoord::new(12, 4),
                to: TileCoord::new(8, 4),
            }]
        );
        assert_eq!(
            second,
            vec![Event::PlayerMoved {
                from: TileCoord::new(8, 4),
                to: TileCoord::new(4, 4),
            }]
        );
        assert_eq!(
            third,
            vec![
                Event::PlayerMoved {
                    from: TileCoord::new(4, 4),
                    to: TileCoord::new(0, 4),
                },
                Event::LevelCompleted {
                    level: LevelId::new(3)
                },
            ]
        );
        assert!(query::level_complete(&world));

        let parked = press(&mut world, Direction::Up);
        assert!(
            parked.is_empty(),
            "directional input is ignored on the win tile"
        );
    }

    #[test]
    fn commands_without_an_active_level_are_ignored() {
        let mut world = World::new();

        assert!(press(&mut world, Direction::Up).is_empty());
        assert!(interact(&mut world).is_empty());
        assert_eq!(query::player(&world), None);
        assert!(!query::level_complete(&world));
    }

    #[test]
    fn can_place_tracks_board_state() {
        let mut world = World::new();
        let _ = load(&mut world, 1);
        let a = TileCoord::new(12, 2);
        let b = TileCoord::new(8, 2);

        assert!(!query::can_place(&world, a, b, 3), "the gap is occupied");

        let _ = press(&mut world, Direction::Up);
        let _ = press(&mut world, Direction::Down);
        let _ = interact(&mut world);

        assert!(
            query::can_place(&world, a, b, 3),
            "the picked-up plank freed the gap"
        );
        assert!(!query::can_place(&world, a, b, 2), "wrong size");
    }

    #[test]
    fn queries_stay_inside_the_grid() {
        let world = World::new();

        assert_eq!(
            query::tile_content(&world, TileCoord::new(GRID_ROWS, 0)),
            None
        );
        assert_eq!(
            query::tile_content(&world, TileCoord::new(0, GRID_COLUMNS)),
            None
        );
    }
}
