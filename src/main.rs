use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{bail, Context as _};
use clap::{Parser, ValueEnum};
use glam::Vec2;
use strum::IntoEnumIterator;
use tracing::{info, trace, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use minigames::config::Settings;
use minigames::constants::{maze::CELL_SIZE, LOOP_TIME};
use minigames::events::ScoreReport;
use minigames::games::dots::{DotsConfig, DotsGame, DotsInput};
use minigames::games::maze::{Direction, MazeConfig, MazeGame};
use minigames::games::waste::{Category, WasteConfig, WasteGame, WasteInput};
use minigames::input::{Bindings, Key};
use minigames::session::{Game, Session};

/// Upper bound on simulated frames for a game without a countdown (ten minutes).
const MAX_FRAMES: u32 = 60 * 60 * 10;

/// Every n-th waste decision is deliberately wrong.
const MISTAKE_EVERY: u32 = 7;

/// Plays the mini-games headless against a simulated clock
#[derive(Parser, Debug)]
#[clap(version, about)]
struct Cli {
    /// which game to play
    #[clap(short, long, value_enum, default_value_t = Which::All)]
    game: Which,

    /// TOML settings layered over the built-in defaults
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// seed for the waste item queue
    #[clap(short, long)]
    seed: Option<u64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Which {
    Maze,
    Dots,
    Waste,
    All,
}

fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish()
        .with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber).context("Could not set global default")?;

    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    if cli.seed.is_some() {
        settings.waste.seed = cli.seed;
    }

    let mut reports = Vec::new();
    if matches!(cli.game, Which::Maze | Which::All) {
        reports.push(("maze", play_maze(settings.maze)?));
    }
    if matches!(cli.game, Which::Dots | Which::All) {
        reports.push(("dots", play_dots(settings.dots)?));
    }
    if matches!(cli.game, Which::Waste | Which::All) {
        reports.push(("waste", play_waste(settings.waste)?));
    }

    for (game, report) in reports {
        info!(game, score = report.score, time_used = report.time_used, success = report.success, "Result");
    }
    Ok(())
}

/// Wraps `game` in a session whose single report lands in the returned slot.
fn observed<G: Game>(game: G) -> (Session<G>, Rc<RefCell<Option<ScoreReport>>>) {
    let slot = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&slot);
    let session = Session::new(game).on_score_submit(move |report| {
        *sink.borrow_mut() = Some(report);
    });
    (session, slot)
}

/// Advances one frame and hands any fresh projection to the (absent) display.
fn step<G: Game>(session: &mut Session<G>) {
    session.advance(LOOP_TIME);
    if let Some(primitives) = session.frame() {
        trace!(primitives = primitives.len(), "Frame presented");
    }
}

fn finish<G: Game>(session: &Session<G>, slot: &RefCell<Option<ScoreReport>>) -> anyhow::Result<ScoreReport> {
    match *slot.borrow() {
        Some(report) => Ok(report),
        None => bail!("{} did not finish (status: {})", session.game().name(), session.status()),
    }
}

fn key_for(direction: Direction) -> Key {
    match direction {
        Direction::Up => Key::Up,
        Direction::Down => Key::Down,
        Direction::Left => Key::Left,
        Direction::Right => Key::Right,
    }
}

/// Walks the shortest route to the nearest collectible, one cell per frame.
fn play_maze(config: MazeConfig) -> anyhow::Result<ScoreReport> {
    let moves_per_cell = (CELL_SIZE as f32 / config.step).round().max(1.0) as usize;
    let (mut session, slot) = observed(MazeGame::new(config)?);
    let bindings = Bindings::default();
    session.start()?;

    let mut frames = 0;
    while !session.status().is_ended() && frames < MAX_FRAMES {
        let Some(route) = session.game().route_to_nearest_collectible() else {
            bail!("No collectible is reachable from the actor");
        };
        if let Some(&direction) = route.first() {
            for _ in 0..moves_per_cell {
                session.press(&bindings, key_for(direction))?;
            }
        }
        step(&mut session);
        frames += 1;
    }

    finish(&session, &slot)
}

/// The next pair of waypoints to connect, unless the puzzle is cooling down.
fn next_connection(game: &DotsGame) -> Option<(Vec2, Vec2)> {
    if game.is_cooling_down() {
        return None;
    }
    let puzzle = game.puzzle()?;
    let expected = game.expected_next();
    Some((puzzle.waypoint(expected)?.position, puzzle.waypoint(expected + 1)?.position))
}

/// Connects one pair of dots per frame.
fn play_dots(config: DotsConfig) -> anyhow::Result<ScoreReport> {
    let (mut session, slot) = observed(DotsGame::new(config));
    session.start()?;

    let mut frames = 0;
    while !session.status().is_ended() && frames < MAX_FRAMES {
        if let Some((from, to)) = next_connection(session.game()) {
            session.input(DotsInput::Press(from));
            session.input(DotsInput::Drag(from.lerp(to, 0.5)));
            session.input(DotsInput::Release(to));
        }
        step(&mut session);
        frames += 1;
    }

    finish(&session, &slot)
}

/// Sorts every item as soon as it shows, making the occasional mistake.
fn play_waste(config: WasteConfig) -> anyhow::Result<ScoreReport> {
    let (mut session, slot) = observed(WasteGame::new(config));
    session.start()?;

    let mut decisions = 0;
    let mut frames = 0;
    while !session.status().is_ended() && frames < MAX_FRAMES {
        let game = session.game();
        let choice = match game.current() {
            Some(item) if !game.is_awaiting_next() => {
                decisions += 1;
                if decisions % MISTAKE_EVERY == 0 {
                    Category::iter().find(|category| *category != item.category)
                } else {
                    Some(item.category)
                }
            }
            _ => None,
        };
        if let Some(category) = choice {
            session.input(WasteInput::Sort(category));
        }
        step(&mut session);
        frames += 1;
    }

    if frames >= MAX_FRAMES {
        warn!("Waste round hit the frame limit");
    }
    finish(&session, &slot)
}
