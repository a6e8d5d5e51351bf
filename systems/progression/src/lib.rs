#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Course progression system that chains level loads after completions.

use river_crossing_core::{Command, Event, LevelId};
use river_crossing_world::levels;

/// Span of catalog levels played back to back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Course {
    /// The opening layouts that teach crossing and turning.
    Training,
    /// The later layouts built around carrying planks.
    Crossing,
    /// Every shipped layout in catalog order.
    Marathon,
}

impl Course {
    /// First level of the course.
    #[must_use]
    pub const fn start_level(self) -> LevelId {
        match self {
            Self::Training | Self::Marathon => LevelId::new(1),
            Self::Crossing => LevelId::new(3),
        }
    }

    /// Final level whose completion finishes the course.
    #[must_use]
    pub const fn final_level(self) -> LevelId {
        match self {
            Self::Training => LevelId::new(2),
            Self::Crossing | Self::Marathon => LevelId::new(5),
        }
    }
}

/// Pure system that reacts to level completions by queueing the next load.
#[derive(Clone, Copy, Debug)]
pub struct Progression {
    course: Course,
    finished: bool,
}

impl Progression {
    /// Creates a progression for the provided course.
    #[must_use]
    pub const fn new(course: Course) -> Self {
        Self {
            course,
            finished: false,
        }
    }

    /// Emits the command that starts the course from its first level.
    pub fn start(&mut self, out: &mut Vec<Command>) {
        self.finished = false;
        out.push(Command::LoadLevel {
            level: self.course.start_level(),
        });
    }

    /// Consumes world events and emits the next level load when one is due.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if let Event::LevelCompleted { level } = event {
                if *level == self.course.final_level() {
                    self.finished = true;
                } else if let Some(next) = levels::next_level(*level) {
                    out.push(Command::LoadLevel { level: next });
                }
            }
        }
    }

    /// Reports whether the course's final level has been completed.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Course this progression drives.
    #[must_use]
    pub const fn course(&self) -> Course {
        self.course
    }
}
