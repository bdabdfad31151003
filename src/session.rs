//! The generic session lifecycle shared by every game.
//!
//! A [`Session`] owns one [`Game`] together with everything the game must not
//! manage itself: status, score, clock, deferred timers and the host sinks.
//! Games only see a [`Context`] for the duration of a single event, which is how
//! scoring, scheduling and termination requests flow back to the session.
//!
//! ```text
//! idle ──start──▶ active ◀──resume/pause──▶ paused
//!                   │                          │
//!                   └──────── ended ◀──────────┘ (won | lost)
//! ```

use std::fmt::Debug;
use std::time::Duration;

use smallvec::SmallVec;
use strum_macros::Display;
use tracing::{debug, error, trace};

use crate::clock::{Cadence, Fire, GameClock, Tick, TimerHandle, Timers};
use crate::error::{ConfigError, GameError, GameResult};
use crate::events::{Feedback, FeedbackKind, FeedbackSink, LogSink, ScoreReport, ScoreSink};
use crate::render::{self, Dirty, Primitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Outcome {
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    Idle,
    Active,
    Paused,
    Ended(Outcome),
}

impl Status {
    pub fn is_ended(&self) -> bool {
        matches!(self, Status::Ended(_))
    }
}

/// A non-negative score, changed only through scoring events.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score(u32);

impl Score {
    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn award(&mut self, points: u32) {
        self.0 = self.0.saturating_add(points);
    }

    /// Deducts `points`, flooring at zero.
    pub fn penalize(&mut self, points: u32) {
        self.0 = self.0.saturating_sub(points);
    }
}

/// The scoring and termination policy a session runs.
pub trait Game {
    type Input: Debug;
    /// Transitions a game defers until after a visual delay.
    type Deferred: Debug;

    fn name(&self) -> &'static str;

    fn cadence(&self) -> Cadence;

    fn supports_pause(&self) -> bool {
        false
    }

    /// Checks catalog data and rules. Called once, when the session is built.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Restores every piece of per-game state to its initial value.
    fn reset(&mut self);

    fn input(&mut self, ctx: &mut Context<'_, Self::Deferred>, input: Self::Input);

    /// Called on every frame-cadence tick.
    fn frame(&mut self, _ctx: &mut Context<'_, Self::Deferred>, _dt: Duration) {}

    fn deferred(&mut self, ctx: &mut Context<'_, Self::Deferred>, action: Self::Deferred);

    /// Decides the outcome when the countdown runs out.
    fn time_expired(&mut self, _ctx: &mut Context<'_, Self::Deferred>) -> Outcome {
        Outcome::Lost
    }

    fn render(&self) -> Vec<Primitive>;

    /// Additional labelled counters shown in the HUD.
    fn hud_extras(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// The session services available to a game while it handles one event.
pub struct Context<'a, D> {
    score: &'a mut Score,
    timers: &'a mut Timers<D>,
    feedback: &'a mut dyn FeedbackSink,
    dirty: &'a mut Dirty,
    elapsed: Duration,
    remaining: Option<u32>,
    end: Option<Outcome>,
}

impl<D> Context<'_, D> {
    pub fn score(&self) -> u32 {
        self.score.value()
    }

    pub fn award(&mut self, points: u32) {
        self.score.award(points);
        *self.dirty |= Dirty::HUD;
    }

    pub fn penalize(&mut self, points: u32) {
        self.score.penalize(points);
        *self.dirty |= Dirty::HUD;
    }

    pub fn schedule(&mut self, delay: Duration, action: D) -> TimerHandle {
        self.timers.schedule(delay, action)
    }

    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.timers.cancel(handle)
    }

    pub fn notify(&mut self, kind: FeedbackKind, message: impl Into<String>) {
        self.feedback.notify(Feedback::new(kind, message));
    }

    pub fn redraw(&mut self, parts: Dirty) {
        *self.dirty |= parts;
    }

    /// Requests the session to end. The first request wins.
    pub fn end(&mut self, outcome: Outcome) {
        self.end.get_or_insert(outcome);
    }

    pub fn is_ending(&self) -> bool {
        self.end.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_secs(&self) -> u32 {
        u32::try_from(self.elapsed.as_secs()).unwrap_or(u32::MAX)
    }

    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }
}

pub struct Session<G: Game> {
    game: G,
    status: Status,
    score: Score,
    clock: GameClock,
    timers: Timers<G::Deferred>,
    dirty: Dirty,
    /// Seconds currently shown by the HUD for frame-cadence games.
    shown_secs: u32,
    config_error: Option<ConfigError>,
    scores: Box<dyn ScoreSink>,
    feedback: Box<dyn FeedbackSink>,
}

impl<G: Game> Session<G> {
    /// Wraps `game` in an idle session, validating its configuration.
    pub fn new(game: G) -> Self {
        let config_error = game.validate().err();
        if let Some(err) = &config_error {
            error!(game = game.name(), error = %err, "Invalid game configuration");
        }

        Self {
            clock: GameClock::new(game.cadence()),
            game,
            status: Status::Idle,
            score: Score::default(),
            timers: Timers::default(),
            dirty: Dirty::all(),
            shown_secs: 0,
            config_error,
            scores: Box::new(LogSink),
            feedback: Box::new(LogSink),
        }
    }

    pub fn on_score_submit(mut self, sink: impl ScoreSink + 'static) -> Self {
        self.scores = Box::new(sink);
        self
    }

    pub fn on_feedback(mut self, sink: impl FeedbackSink + 'static) -> Self {
        self.feedback = Box::new(sink);
        self
    }

    pub fn config_error(&self) -> Option<&ConfigError> {
        self.config_error.as_ref()
    }

    /// Starts a fresh round from `idle` or `ended`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if the game failed validation at construction,
    /// or [`GameError::InvalidTransition`] if the session is active or paused.
    pub fn start(&mut self) -> GameResult<()> {
        if let Some(err) = &self.config_error {
            return Err(GameError::Config(err.clone()));
        }
        if !matches!(self.status, Status::Idle | Status::Ended(_)) {
            return Err(GameError::InvalidTransition {
                from: self.status,
                action: "start",
            });
        }

        self.timers.cancel_all();
        self.score = Score::default();
        self.game.reset();
        self.clock.start();
        self.shown_secs = 0;
        self.status = Status::Active;
        self.dirty = Dirty::all();
        debug!(game = self.game.name(), "Session started");
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.status != Status::Active {
            return;
        }
        if !self.game.supports_pause() {
            trace!(game = self.game.name(), "Pause not supported");
            return;
        }

        self.clock.pause();
        self.status = Status::Paused;
        self.dirty |= Dirty::HUD;
        debug!(game = self.game.name(), "Session paused");
    }

    pub fn resume(&mut self) {
        if self.status != Status::Paused {
            return;
        }

        self.clock.resume();
        self.status = Status::Active;
        self.dirty |= Dirty::HUD;
        debug!(game = self.game.name(), "Session resumed");
    }

    pub fn toggle_pause(&mut self) {
        match self.status {
            Status::Active => self.pause(),
            Status::Paused => self.resume(),
            _ => {}
        }
    }

    /// Returns to `idle`, discarding the round without reporting a score.
    pub fn reset(&mut self) {
        self.timers.cancel_all();
        self.clock.reset();
        self.score = Score::default();
        self.game.reset();
        self.shown_secs = 0;
        self.status = Status::Idle;
        self.dirty = Dirty::all();
        debug!(game = self.game.name(), "Session reset");
    }

    /// Forwards a player input. Ignored unless the session is active.
    pub fn input(&mut self, input: G::Input) {
        if self.status != Status::Active {
            trace!(status = %self.status, ?input, "Ignoring input");
            return;
        }
        self.dispatch(|game, ctx| game.input(ctx, input));
    }

    /// Advances deferred timers and the clock by `dt` of real time, delivering
    /// everything that falls due.
    pub fn advance(&mut self, dt: Duration) {
        if self.status != Status::Active {
            return;
        }

        for action in self.timers.advance(dt) {
            if self.status != Status::Active {
                break;
            }
            self.dispatch(|game, ctx| game.deferred(ctx, action));
        }

        for fire in self.poll_clock(dt) {
            self.deliver(fire);
        }
    }

    /// Runs the clock without delivering its fires, for hosts that queue them.
    pub fn poll_clock(&mut self, dt: Duration) -> SmallVec<[Fire; 4]> {
        if self.status != Status::Active {
            return SmallVec::new();
        }
        self.clock.advance(dt)
    }

    /// Delivers one clock fire. Stale fires and fires outside `active` do nothing.
    pub fn deliver(&mut self, fire: Fire) {
        if self.status != Status::Active || !self.clock.is_current(&fire) {
            trace!(?fire, status = %self.status, "Dropping clock fire");
            return;
        }

        match fire.tick {
            Tick::Frame { dt } => {
                let secs = self.clock.elapsed_secs();
                if secs != self.shown_secs {
                    self.shown_secs = secs;
                    self.dirty |= Dirty::HUD;
                }
                self.dispatch(|game, ctx| game.frame(ctx, dt));
            }
            Tick::Countdown { remaining } => {
                trace!(remaining, "Countdown tick");
                self.dirty |= Dirty::HUD;
            }
            Tick::Exhausted => {
                debug!(game = self.game.name(), "Time is up");
                self.dispatch(|game, ctx| {
                    let outcome = game.time_expired(ctx);
                    ctx.end(outcome);
                });
            }
        }
    }

    fn dispatch(&mut self, handler: impl FnOnce(&mut G, &mut Context<'_, G::Deferred>)) {
        let mut ctx = Context {
            score: &mut self.score,
            timers: &mut self.timers,
            feedback: &mut *self.feedback,
            dirty: &mut self.dirty,
            elapsed: self.clock.elapsed(),
            remaining: self.clock.remaining(),
            end: None,
        };
        handler(&mut self.game, &mut ctx);

        if let Some(outcome) = ctx.end {
            self.finish(outcome);
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        if !matches!(self.status, Status::Active | Status::Paused) {
            return;
        }

        self.status = Status::Ended(outcome);
        self.clock.cancel();
        self.timers.cancel_all();
        self.dirty |= Dirty::HUD;

        let report = ScoreReport {
            score: self.score.value(),
            time_used: self.clock.elapsed_secs(),
            success: outcome == Outcome::Won,
        };
        debug!(game = self.game.name(), %outcome, score = report.score, time_used = report.time_used, "Session ended");
        self.scores.submit(report);
    }

    /// Returns a fresh projection if anything visual changed since the last call.
    pub fn frame(&mut self) -> Option<Vec<Primitive>> {
        if self.dirty.is_empty() {
            return None;
        }
        self.dirty = Dirty::empty();
        Some(self.render())
    }

    /// Projects the game scene followed by the HUD.
    pub fn render(&self) -> Vec<Primitive> {
        let time = match self.clock.remaining() {
            Some(remaining) => remaining,
            None => self.clock.elapsed_secs(),
        };
        let banner = match self.status {
            Status::Idle => Some("PRESS START"),
            Status::Active => None,
            Status::Paused => Some("PAUSED"),
            Status::Ended(Outcome::Won) => Some("WELL DONE!"),
            Status::Ended(Outcome::Lost) => Some("GAME OVER"),
        };

        let mut primitives = self.game.render();
        primitives.extend(render::hud(
            self.score.value(),
            &render::format_clock(time),
            banner,
            &self.game.hud_extras(),
        ));
        primitives
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score.value()
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    pub fn remaining(&self) -> Option<u32> {
        self.clock.remaining()
    }

    /// Deferred transitions waiting on the clock.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn game(&self) -> &G {
        &self.game
    }
}
