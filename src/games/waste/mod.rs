//! Waste sorting: route each item to one of four bins before the countdown ends.
//!
//! Every decision is final. A correct bin awards the item's points, a wrong one
//! costs a fixed penalty, and either way the item lands in the chosen bin. The
//! queue advances once the feedback delay has passed. When time runs out the
//! session is won if accuracy is strictly above the configured threshold.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, trace};

use crate::catalog;
use crate::clock::{Cadence, TimerHandle};
use crate::constants::{waste as defaults, COUNTDOWN_UNIT};
use crate::error::ConfigError;
use crate::events::FeedbackKind;
use crate::render::{Dirty, Primitive};
use crate::session::{Context, Game, Outcome};

pub mod item;
pub mod queue;
mod render;

pub use item::{Bin, Category, WasteItem};
pub use queue::ClassificationQueue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WasteConfig {
    pub catalog: Vec<WasteItem>,
    pub time_budget_secs: u32,
    pub penalty: u32,
    pub feedback_delay_ms: u64,
    pub accuracy_threshold: f32,
    /// Fixes the item sequence; drawn from OS entropy when unset.
    pub seed: Option<u64>,
}

impl Default for WasteConfig {
    fn default() -> Self {
        Self {
            catalog: catalog::waste_items(),
            time_budget_secs: defaults::TIME_BUDGET_SECS,
            penalty: defaults::PENALTY,
            feedback_delay_ms: defaults::FEEDBACK_DELAY.as_millis() as u64,
            accuracy_threshold: defaults::ACCURACY_THRESHOLD,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WasteInput {
    Sort(Category),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WasteDeferred {
    NextItem,
}

pub struct WasteGame {
    config: WasteConfig,
    queue: ClassificationQueue,
    bins: Vec<Bin>,
    processed: u32,
    correct_sorts: u32,
    incorrect_sorts: u32,
    /// Set while the last decision is on screen.
    pending: Option<TimerHandle>,
}

impl WasteGame {
    pub fn new(config: WasteConfig) -> Self {
        let mut queue = ClassificationQueue::new(config.seed);
        queue.refill(&config.catalog);

        Self {
            config,
            queue,
            bins: Category::iter().map(Bin::new).collect(),
            processed: 0,
            correct_sorts: 0,
            incorrect_sorts: 0,
            pending: None,
        }
    }

    pub fn current(&self) -> Option<&WasteItem> {
        self.queue.current()
    }

    pub fn upcoming(&self) -> impl Iterator<Item = &WasteItem> + '_ {
        self.queue.upcoming()
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn bin(&self, category: Category) -> Option<&Bin> {
        self.bins.iter().find(|bin| bin.category == category)
    }

    pub fn processed(&self) -> u32 {
        self.processed
    }

    pub fn correct_sorts(&self) -> u32 {
        self.correct_sorts
    }

    pub fn incorrect_sorts(&self) -> u32 {
        self.incorrect_sorts
    }

    /// Ratio of correct decisions, or 0 before the first one.
    pub fn accuracy(&self) -> f32 {
        if self.processed == 0 {
            0.0
        } else {
            self.correct_sorts as f32 / self.processed as f32
        }
    }

    pub fn is_awaiting_next(&self) -> bool {
        self.pending.is_some()
    }

    pub fn config(&self) -> &WasteConfig {
        &self.config
    }

    fn sort(&mut self, ctx: &mut Context<'_, WasteDeferred>, category: Category) {
        if self.pending.is_some() {
            trace!(%category, "Decision ignored while feedback is showing");
            return;
        }
        let Some(item) = self.queue.current().cloned() else {
            return;
        };
        let Some(bin) = self.bins.iter_mut().find(|bin| bin.category == category) else {
            return;
        };

        let (name, points, belongs) = (item.name.clone(), item.points, item.category);
        let correct = bin.receive(item);
        self.processed += 1;

        if correct {
            self.correct_sorts += 1;
            ctx.award(points);
            ctx.notify(FeedbackKind::Success, format!("Correct! {name} is {belongs}. +{points}"));
        } else {
            self.incorrect_sorts += 1;
            ctx.penalize(self.config.penalty);
            ctx.notify(
                FeedbackKind::Error,
                format!("{name} is {belongs}, not {category}. -{}", self.config.penalty),
            );
        }
        debug!(item = %name, %category, correct, processed = self.processed, "Item sorted");

        ctx.redraw(Dirty::BINS | Dirty::QUEUE);
        let delay = Duration::from_millis(self.config.feedback_delay_ms);
        self.pending = Some(ctx.schedule(delay, WasteDeferred::NextItem));
    }
}

impl Game for WasteGame {
    type Input = WasteInput;
    type Deferred = WasteDeferred;

    fn name(&self) -> &'static str {
        "waste"
    }

    fn cadence(&self) -> Cadence {
        Cadence::Countdown {
            budget: self.config.time_budget_secs,
            unit: COUNTDOWN_UNIT,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.config.catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if let Some(item) = self.config.catalog.iter().find(|item| item.points == 0) {
            return Err(ConfigError::WorthlessItem(item.name.clone()));
        }
        let threshold = self.config.accuracy_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::InvalidThreshold(threshold));
        }
        if self.config.time_budget_secs == 0 {
            return Err(ConfigError::NoTimeBudget);
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.bins = Category::iter().map(Bin::new).collect();
        self.processed = 0;
        self.correct_sorts = 0;
        self.incorrect_sorts = 0;
        self.pending = None;
        self.queue.refill(&self.config.catalog);
    }

    fn input(&mut self, ctx: &mut Context<'_, WasteDeferred>, input: WasteInput) {
        match input {
            WasteInput::Sort(category) => self.sort(ctx, category),
        }
    }

    fn deferred(&mut self, ctx: &mut Context<'_, WasteDeferred>, action: WasteDeferred) {
        match action {
            WasteDeferred::NextItem => {
                self.pending = None;
                let next = self.queue.advance(&self.config.catalog).map(|item| item.name.clone());
                trace!(?next, "Queue advanced");
                ctx.redraw(Dirty::QUEUE);
            }
        }
    }

    fn time_expired(&mut self, ctx: &mut Context<'_, WasteDeferred>) -> Outcome {
        let accuracy = self.accuracy();
        let passed = self.processed > 0 && accuracy > self.config.accuracy_threshold;
        ctx.notify(
            FeedbackKind::Info,
            format!(
                "Time's up! {}/{} sorted correctly ({:.0}%)",
                self.correct_sorts,
                self.processed,
                accuracy * 100.0
            ),
        );
        debug!(accuracy, threshold = self.config.accuracy_threshold, passed, "Sorting round over");

        if passed {
            Outcome::Won
        } else {
            Outcome::Lost
        }
    }

    fn render(&self) -> Vec<Primitive> {
        render::scene(self)
    }

    fn hud_extras(&self) -> Vec<(&'static str, String)> {
        vec![
            ("SORTED", self.processed.to_string()),
            ("ACCURACY", format!("{:.0}%", self.accuracy() * 100.0)),
        ]
    }
}
