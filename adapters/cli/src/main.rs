#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the River Crossing experience.

mod level_transfer;
mod render;

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use river_crossing_core::{Command as WorldCommand, Direction, Event, LevelId};
use river_crossing_system_bootstrap::Bootstrap;
use river_crossing_system_preview::Preview;
use river_crossing_system_progression::{Course, Progression};
use river_crossing_world::{self as world, World};

use crate::render::BoardRenderer;

const WATER_VARIATION_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

#[derive(Debug, Parser)]
#[command(
    name = "river-crossing",
    about = "Cross the river by carrying planks between stumps."
)]
struct Cli {
    /// Level to load when no course is selected.
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// Play a fixed course of levels back to back.
    #[arg(long, value_enum)]
    course: Option<CourseArg>,

    /// Print the loaded level's transfer string and exit.
    #[arg(long)]
    export_level: bool,

    /// Decode a level transfer string, describe it, and exit.
    #[arg(long, value_name = "CODE")]
    inspect: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CourseArg {
    Training,
    Crossing,
    Marathon,
}

impl From<CourseArg> for Course {
    fn from(value: CourseArg) -> Self {
        match value {
            CourseArg::Training => Course::Training,
            CourseArg::Crossing => Course::Crossing,
            CourseArg::Marathon => Course::Marathon,
        }
    }
}

/// Entry point for the River Crossing command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(code) = cli.inspect.as_deref() {
        let snapshot = level_transfer::LevelSnapshot::decode(code)
            .context("decoding the level transfer string")?;
        println!("{}", snapshot.describe());
        return Ok(());
    }

    let mut world = World::new();
    let bootstrap = Bootstrap::default();
    let mut preview = Preview::new();
    let mut progression = cli.course.map(|course| Progression::new(course.into()));

    let mut commands: Vec<WorldCommand> = Vec::new();
    match progression.as_mut() {
        Some(progression) => progression.start(&mut commands),
        None => commands.push(WorldCommand::LoadLevel {
            level: LevelId::new(cli.level),
        }),
    }
    pump(&mut world, &mut preview, progression.as_mut(), commands, true);

    if bootstrap.current_level(&world).is_none() {
        bail!("level {} is not in the catalog", cli.level);
    }

    if cli.export_level {
        let snapshot = level_transfer::LevelSnapshot::capture(&world)
            .context("capturing the loaded level")?;
        println!("{}", snapshot.encode());
        return Ok(());
    }

    println!("{}", bootstrap.welcome_banner(&world));
    println!("{}", render::help_line());

    let renderer = BoardRenderer::new(WATER_VARIATION_SEED);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", renderer.render(&world, &preview));
        print!("> ");
        let _ = io::stdout().flush();

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("reading player input")?;

        let Some(commands) = parse_input(&line, bootstrap.current_level(&world)) else {
            break;
        };
        pump(&mut world, &mut preview, progression.as_mut(), commands, false);

        if progression.as_ref().is_some_and(Progression::is_finished) {
            println!("Course finished!");
            break;
        }
    }

    Ok(())
}

/// Drains commands into the world, echoing feedback and feeding the systems
/// until no follow-up commands remain.
fn pump(
    world: &mut World,
    preview: &mut Preview,
    mut progression: Option<&mut Progression>,
    mut commands: Vec<WorldCommand>,
    quiet: bool,
) {
    while !commands.is_empty() {
        let mut events: Vec<Event> = Vec::new();
        for command in commands.drain(..) {
            world::apply(world, command, &mut events);
        }
        if !quiet {
            for event in &events {
                if let Some(feedback) = render::report(event) {
                    println!("{feedback}");
                }
            }
        }
        preview.handle(&events, world);
        if let Some(progression) = progression.as_deref_mut() {
            progression.handle(&events, &mut commands);
        }
    }
}

/// Maps one line of input to world commands; `None` means quit.
fn parse_input(line: &str, current_level: Option<LevelId>) -> Option<Vec<WorldCommand>> {
    let mut commands = Vec::new();
    for key in line.trim().chars() {
        match key.to_ascii_lowercase() {
            'q' => return None,
            'a' => commands.push(WorldCommand::Move {
                direction: Direction::Left,
            }),
            'd' => commands.push(WorldCommand::Move {
                direction: Direction::Right,
            }),
            'w' => commands.push(WorldCommand::Move {
                direction: Direction::Up,
            }),
            's' => commands.push(WorldCommand::Move {
                direction: Direction::Down,
            }),
            'p' | ' ' => commands.push(WorldCommand::Interact),
            'r' => {
                if let Some(level) = current_level {
                    commands.push(WorldCommand::LoadLevel { level });
                }
            }
            _ => {}
        }
    }
    Some(commands)
}
