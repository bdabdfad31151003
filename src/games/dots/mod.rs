//! Connect-the-dots: link numbered waypoints strictly in order.
//!
//! A connection starts with a press snapped to the expected waypoint and ends
//! with a release snapped to the one after it. Pointer samples in between are
//! only kept for drawing. Solving a puzzle awards its points and, after a short
//! cool-down, moves on to the next puzzle in the catalog.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::catalog;
use crate::clock::{Cadence, TimerHandle};
use crate::constants::{dots as defaults, COUNTDOWN_UNIT};
use crate::error::ConfigError;
use crate::events::FeedbackKind;
use crate::render::{Dirty, Primitive};
use crate::session::{Context, Game, Outcome};

pub mod puzzle;
mod render;

pub use puzzle::{Puzzle, Waypoint};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotsConfig {
    /// Played in order; the session is won after the last one.
    pub puzzles: Vec<Puzzle>,
    pub snap_radius: f32,
    pub advance_delay_ms: u64,
    pub time_budget_secs: u32,
}

impl Default for DotsConfig {
    fn default() -> Self {
        Self {
            puzzles: catalog::puzzles(),
            snap_radius: defaults::SNAP_RADIUS,
            advance_delay_ms: defaults::ADVANCE_DELAY.as_millis() as u64,
            time_budget_secs: defaults::TIME_BUDGET_SECS,
        }
    }
}

/// Pointer events in engine-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DotsInput {
    Press(Vec2),
    Drag(Vec2),
    Release(Vec2),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotsDeferred {
    NextPuzzle,
}

pub struct DotsGame {
    config: DotsConfig,
    index: usize,
    /// Finished connections of the current puzzle, as drawn.
    completed: Vec<Vec<Vec2>>,
    /// The connection in progress, starting at the snapped waypoint.
    drawing: Option<Vec<Vec2>>,
    advance: Option<TimerHandle>,
    solved: usize,
}

impl DotsGame {
    pub fn new(config: DotsConfig) -> Self {
        Self {
            config,
            index: 0,
            completed: Vec::new(),
            drawing: None,
            advance: None,
            solved: 0,
        }
    }

    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.config.puzzles.get(self.index)
    }

    pub fn puzzle_index(&self) -> usize {
        self.index
    }

    pub fn puzzle_count(&self) -> usize {
        self.config.puzzles.len()
    }

    /// The label the next connection has to start from.
    pub fn expected_next(&self) -> u32 {
        self.completed.len() as u32 + 1
    }

    /// The label the next connection has to end on.
    pub fn next_target(&self) -> u32 {
        self.expected_next() + 1
    }

    pub fn completed_paths(&self) -> &[Vec<Vec2>] {
        &self.completed
    }

    pub fn drawing(&self) -> Option<&[Vec2]> {
        self.drawing.as_deref()
    }

    /// Whether the solved puzzle is still on screen, waiting to be replaced.
    pub fn is_cooling_down(&self) -> bool {
        self.advance.is_some()
    }

    pub fn solved(&self) -> usize {
        self.solved
    }

    fn snapped(&self, point: Vec2) -> Option<(u32, Vec2)> {
        self.puzzle()?
            .snap(point, self.config.snap_radius)
            .map(|waypoint| (waypoint.label, waypoint.position))
    }

    fn press(&mut self, ctx: &mut Context<'_, DotsDeferred>, point: Vec2) {
        if self.is_cooling_down() {
            return;
        }

        let expected = self.expected_next();
        match self.snapped(point) {
            Some((label, position)) if label == expected => {
                trace!(label, "Connection started");
                self.drawing = Some(vec![position]);
                ctx.redraw(Dirty::PATHS);
            }
            snapped => {
                trace!(?snapped, expected, "Press rejected");
                ctx.notify(FeedbackKind::Warning, format!("Start from dot {expected}"));
            }
        }
    }

    fn drag(&mut self, ctx: &mut Context<'_, DotsDeferred>, point: Vec2) {
        if let Some(path) = &mut self.drawing {
            path.push(point);
            ctx.redraw(Dirty::PATHS);
        }
    }

    fn release(&mut self, ctx: &mut Context<'_, DotsDeferred>, point: Vec2) {
        let Some(mut path) = self.drawing.take() else {
            return;
        };
        ctx.redraw(Dirty::PATHS);

        let (from, target) = (self.expected_next(), self.next_target());
        match self.snapped(point) {
            Some((label, position)) if label == target => {
                path.push(position);
                self.completed.push(path);
                trace!(from, to = target, "Connection completed");

                let needed = self.puzzle().map_or(0, Puzzle::connections);
                if self.completed.len() >= needed {
                    self.solve(ctx);
                }
            }
            snapped => {
                trace!(?snapped, target, "Release rejected");
                ctx.notify(FeedbackKind::Error, format!("Connect dot {from} to dot {target}"));
            }
        }
    }

    fn solve(&mut self, ctx: &mut Context<'_, DotsDeferred>) {
        let Some(puzzle) = self.config.puzzles.get(self.index) else {
            return;
        };

        ctx.award(puzzle.points);
        ctx.notify(
            FeedbackKind::Success,
            format!("{} complete! +{}", puzzle.name, puzzle.points),
        );
        self.solved += 1;
        debug!(puzzle = %puzzle.name, points = puzzle.points, solved = self.solved, "Puzzle solved");

        if self.index + 1 >= self.config.puzzles.len() {
            ctx.end(Outcome::Won);
        } else {
            let delay = Duration::from_millis(self.config.advance_delay_ms);
            self.advance = Some(ctx.schedule(delay, DotsDeferred::NextPuzzle));
        }
    }
}

impl Game for DotsGame {
    type Input = DotsInput;
    type Deferred = DotsDeferred;

    fn name(&self) -> &'static str {
        "dots"
    }

    fn cadence(&self) -> Cadence {
        Cadence::Countdown {
            budget: self.config.time_budget_secs,
            unit: COUNTDOWN_UNIT,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.config.puzzles.is_empty() {
            return Err(ConfigError::NoPuzzles);
        }
        if self.config.time_budget_secs == 0 {
            return Err(ConfigError::NoTimeBudget);
        }
        let radius = self.config.snap_radius;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::InvalidSize {
                name: "Snap radius",
                value: radius,
            });
        }
        self.config.puzzles.iter().try_for_each(Puzzle::validate)
    }

    fn reset(&mut self) {
        self.index = 0;
        self.completed.clear();
        self.drawing = None;
        self.advance = None;
        self.solved = 0;
    }

    fn input(&mut self, ctx: &mut Context<'_, DotsDeferred>, input: DotsInput) {
        match input {
            DotsInput::Press(point) => self.press(ctx, point),
            DotsInput::Drag(point) => self.drag(ctx, point),
            DotsInput::Release(point) => self.release(ctx, point),
        }
    }

    fn deferred(&mut self, ctx: &mut Context<'_, DotsDeferred>, action: DotsDeferred) {
        match action {
            DotsDeferred::NextPuzzle => {
                self.advance = None;
                self.index += 1;
                self.completed.clear();
                self.drawing = None;
                ctx.redraw(Dirty::SCENE | Dirty::PATHS);
                debug!(index = self.index, "Advanced to next puzzle");
            }
        }
    }

    fn render(&self) -> Vec<Primitive> {
        render::scene(self)
    }

    fn hud_extras(&self) -> Vec<(&'static str, String)> {
        vec![
            ("PUZZLE", format!("{}/{}", self.index + 1, self.puzzle_count())),
            ("NEXT", self.expected_next().to_string()),
        ]
    }
}
