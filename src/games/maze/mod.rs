//! The maze runner: walk the actor over every collectible while avoiding obstacles.
//!
//! Movement is validated against the grid cell under the requested target point;
//! collisions are circle-vs-circle proximity tests run after every accepted move
//! and on every frame.

use std::convert::Infallible;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::catalog::MAZE_BOARD;
use crate::clock::Cadence;
use crate::constants::maze as defaults;
use crate::error::{ConfigError, GameResult};
use crate::events::FeedbackKind;
use crate::input::{Bindings, Command, Key};
use crate::render::{Dirty, Primitive};
use crate::session::{Context, Game, Outcome, Session};

pub mod actor;
pub mod collision;
pub mod grid;
mod render;
pub mod route;

pub use actor::{Actor, Direction, DIRECTIONS};
pub use collision::{Effect, Placement, StaticEntity};
pub use grid::{CellKind, Grid, GridParser};

/// Board and rules for the maze.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Rows of the board: `#` wall, `.`/space path, `o` collectible, `X` obstacle, `S` spawn.
    pub board: Vec<String>,
    pub step: f32,
    pub actor_size: f32,
    pub collectible_size: f32,
    pub collectible_points: u32,
    pub obstacle_size: f32,
    pub lives: u8,
    /// Seconds after which the completion bonus is exhausted.
    pub time_budget_secs: u32,
    pub bonus_rate: u32,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            board: MAZE_BOARD.iter().map(|row| row.to_string()).collect(),
            step: defaults::STEP_SIZE,
            actor_size: defaults::ACTOR_SIZE,
            collectible_size: defaults::COLLECTIBLE_SIZE,
            collectible_points: defaults::COLLECTIBLE_POINTS,
            obstacle_size: defaults::OBSTACLE_SIZE,
            lives: defaults::LIVES,
            time_budget_secs: defaults::TIME_BUDGET_SECS,
            bonus_rate: defaults::BONUS_RATE,
        }
    }
}

impl MazeConfig {
    fn placement(&self) -> Placement {
        Placement {
            collectible_size: self.collectible_size,
            collectible_points: self.collectible_points,
            obstacle_size: self.obstacle_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MazeInput {
    Move(Direction),
}

pub struct MazeGame {
    config: MazeConfig,
    grid: Grid,
    actor: Actor,
    entities: Vec<StaticEntity>,
    lives: u8,
}

impl MazeGame {
    /// Parses the configured board.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Board`] if the board is ragged, contains an unknown
    /// character or does not have exactly one spawn. Rule problems (sizes, lives,
    /// obstacle placement) are reported later by [`Game::validate`].
    pub fn new(config: MazeConfig) -> Result<Self, ConfigError> {
        let grid = GridParser::parse(config.board.as_slice())?;
        Ok(Self::with_grid(grid, config))
    }

    /// Builds a game around an already parsed grid; `config.board` is ignored.
    pub fn with_grid(grid: Grid, config: MazeConfig) -> Self {
        let entities = collision::place_entities(&grid, config.placement());
        Self {
            actor: Actor::new(Grid::cell_center(grid.spawn()), config.step),
            lives: config.lives,
            entities,
            grid,
            config,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn entities(&self) -> &[StaticEntity] {
        &self.entities
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn spawn_point(&self) -> Vec2 {
        Grid::cell_center(self.grid.spawn())
    }

    pub fn remaining_collectibles(&self) -> usize {
        self.entities
            .iter()
            .filter(|entity| entity.is_collectible() && !entity.is_consumed())
            .count()
    }

    /// Completion bonus for finishing after `elapsed_secs`.
    pub fn time_bonus(&self, elapsed_secs: u32) -> u32 {
        self.config
            .time_budget_secs
            .saturating_sub(elapsed_secs)
            .saturating_mul(self.config.bonus_rate)
    }

    /// Directions leading from the actor's cell to the nearest collectible.
    pub fn route_to_nearest_collectible(&self) -> Option<Vec<Direction>> {
        route::route_to_nearest_collectible(&self.grid, &self.entities, Grid::cell_at(self.actor.position))
    }

    fn try_move(&mut self, ctx: &mut Context<'_, Infallible>, direction: Direction) -> bool {
        let target = self.actor.target(direction);
        let cell = Grid::cell_at(target);

        if !self.grid.is_walkable(cell) {
            trace!(%direction, ?cell, "Move rejected");
            ctx.notify(FeedbackKind::Warning, "That way is blocked");
            return false;
        }

        self.actor.position = target;
        self.actor.facing = direction;
        ctx.redraw(Dirty::ACTOR);
        trace!(%direction, position = ?target, "Actor moved");
        true
    }

    fn resolve_contacts(&mut self, ctx: &mut Context<'_, Infallible>) {
        let contacts = collision::resolve_contacts(&mut self.entities, self.actor.position, self.config.actor_size);

        for points in &contacts.collected {
            ctx.award(*points);
            ctx.notify(FeedbackKind::Success, format!("+{points}"));
        }
        if !contacts.collected.is_empty() {
            ctx.redraw(Dirty::ENTITIES);
            trace!(
                collected = contacts.collected.len(),
                remaining = self.remaining_collectibles(),
                "Collectibles consumed"
            );
        }

        if self.remaining_collectibles() == 0 {
            let bonus = self.time_bonus(ctx.elapsed_secs());
            ctx.award(bonus);
            ctx.notify(FeedbackKind::Success, format!("Maze cleared! Time bonus +{bonus}"));
            debug!(bonus, score = ctx.score(), "Maze cleared");
            ctx.end(Outcome::Won);
            return;
        }

        if let Some(index) = contacts.obstacle {
            self.lives = self.lives.saturating_sub(1);
            self.actor.position = self.spawn_point();
            ctx.redraw(Dirty::ACTOR);
            debug!(obstacle = index, lives = self.lives, "Obstacle hit");

            if self.lives == 0 {
                ctx.notify(FeedbackKind::Error, "Out of lives!");
                ctx.end(Outcome::Lost);
            } else {
                ctx.notify(FeedbackKind::Error, format!("Ouch! {} lives left", self.lives));
            }
        }
    }
}

impl Game for MazeGame {
    type Input = MazeInput;
    type Deferred = Infallible;

    fn name(&self) -> &'static str {
        "maze"
    }

    fn cadence(&self) -> Cadence {
        Cadence::Frame
    }

    fn supports_pause(&self) -> bool {
        true
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.config.step.is_finite() && self.config.step > 0.0) {
            return Err(ConfigError::InvalidStep(self.config.step));
        }
        let sizes = [
            ("Actor size", self.config.actor_size),
            ("Collectible size", self.config.collectible_size),
            ("Obstacle size", self.config.obstacle_size),
        ];
        if let Some(&(name, value)) = sizes.iter().find(|(_, value)| !(value.is_finite() && *value > 0.0)) {
            return Err(ConfigError::InvalidSize { name, value });
        }
        if self.config.lives == 0 {
            return Err(ConfigError::NoLives);
        }
        // The spawn must sit clear of every obstacle.
        let spawn = self.spawn_point();
        if let Some(entity) = self
            .entities
            .iter()
            .find(|entity| !entity.is_collectible() && entity.collides_with(spawn, self.config.actor_size))
        {
            return Err(ConfigError::ObstacleAtSpawn(entity.cell));
        }
        if !self.entities.iter().any(StaticEntity::is_collectible) {
            return Err(ConfigError::NoCollectibles);
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.entities = collision::place_entities(&self.grid, self.config.placement());
        self.actor = Actor::new(self.spawn_point(), self.config.step);
        self.lives = self.config.lives;
    }

    fn input(&mut self, ctx: &mut Context<'_, Infallible>, input: MazeInput) {
        match input {
            MazeInput::Move(direction) => {
                if self.try_move(ctx, direction) {
                    self.resolve_contacts(ctx);
                }
            }
        }
    }

    fn frame(&mut self, ctx: &mut Context<'_, Infallible>, _dt: Duration) {
        self.resolve_contacts(ctx);
    }

    fn deferred(&mut self, _ctx: &mut Context<'_, Infallible>, action: Infallible) {
        match action {}
    }

    fn render(&self) -> Vec<Primitive> {
        render::scene(self)
    }

    fn hud_extras(&self) -> Vec<(&'static str, String)> {
        vec![
            ("LIVES", self.lives.to_string()),
            ("LEFT", self.remaining_collectibles().to_string()),
        ]
    }
}

impl Session<MazeGame> {
    /// Routes a host key through `bindings`, returning the command it resolved to.
    ///
    /// `Exit` is returned for the host to act on; everything else is applied here.
    pub fn press(&mut self, bindings: &Bindings, key: Key) -> GameResult<Option<Command>> {
        let Some(command) = bindings.command(key) else {
            return Ok(None);
        };

        match command {
            Command::Move(direction) => self.input(MazeInput::Move(direction)),
            Command::TogglePause => self.toggle_pause(),
            Command::Restart => {
                self.reset();
                self.start()?;
            }
            Command::Exit => {}
        }
        Ok(Some(command))
    }
}
