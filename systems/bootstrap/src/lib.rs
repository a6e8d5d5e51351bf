#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the River Crossing experience.

use river_crossing_core::{LevelId, PlayerSnapshot};
use river_crossing_world::{query, World};

/// Produces data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Identifier of the level the world currently hosts, if any.
    #[must_use]
    pub fn current_level(&self, world: &World) -> Option<LevelId> {
        query::current_level(world)
    }

    /// Exposes the player state required for the first rendered frame.
    #[must_use]
    pub fn player(&self, world: &World) -> Option<PlayerSnapshot> {
        query::player(world)
    }
}
