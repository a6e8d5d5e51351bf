#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Ghost-plank preview system for the rendering layer.
//!
//! The preview is advisory only: it reuses the world's placement oracle
//! through queries and never duplicates placement logic or mutates state.

use river_crossing_core::{Direction, Event, Orientation, TileContent, TileCoord};
use river_crossing_world::{query, World};

/// Declarative preview describing where the held plank would land.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GhostPlank {
    /// Orientation the plank would take between the player and the target.
    pub orientation: Orientation,
    /// Tiles the plank would cover, ordered from the lower endpoint.
    pub span: Vec<TileCoord>,
    /// Stump that would anchor the far end of the plank.
    pub target: TileCoord,
    /// Indicates whether the world would accept the placement.
    pub placeable: bool,
}

/// System that keeps the ghost-plank preview in sync with the world.
#[derive(Clone, Debug, Default)]
pub struct Preview {
    ghost: Option<GhostPlank>,
}

impl Preview {
    /// Creates a preview system with no ghost computed yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { ghost: None }
    }

    /// Consumes world events and recomputes the ghost when one of them
    /// could have changed where the held plank would land.
    pub fn handle(&mut self, events: &[Event], world: &World) {
        if events.iter().any(triggers_recompute) {
            self.ghost = compute_ghost(world);
        }
    }

    /// Currently computed ghost plank, if the player holds one.
    #[must_use]
    pub fn ghost(&self) -> Option<&GhostPlank> {
        self.ghost.as_ref()
    }
}

fn triggers_recompute(event: &Event) -> bool {
    matches!(
        event,
        Event::LevelLoaded { .. }
            | Event::FacingChanged { .. }
            | Event::PlayerMoved { .. }
            | Event::PlankPickedUp { .. }
            | Event::PlankPlaced { .. }
    )
}

fn compute_ghost(world: &World) -> Option<GhostPlank> {
    let player = query::player(world)?;
    if player.held_plank_size == 0 {
        return None;
    }

    let target = query::first_matching(world, player.position, player.facing, TileContent::Stump);
    if target == player.position {
        return None;
    }

    let orientation = match player.facing {
        Direction::Left | Direction::Right => Orientation::Horizontal,
        Direction::Up | Direction::Down => Orientation::Vertical,
    };

    Some(GhostPlank {
        orientation,
        span: query::span_between(player.position, target),
        target,
        placeable: query::can_place(world, player.position, target, player.held_plank_size),
    })
}
