//! The game clock and deferred, cancellable timers.
//!
//! Time never flows on its own here: the host feeds real elapsed time through
//! [`GameClock::advance`] and [`Timers::advance`], and the clock turns it into
//! [`Fire`]s for the session. Every fire is stamped with the clock's epoch;
//! pausing, resuming and cancelling bump the epoch, so a fire produced before
//! one of those calls is recognised as stale by [`GameClock::is_current`] and
//! dropped even if the host delivers it afterwards.

use std::time::Duration;

use smallvec::SmallVec;
use tracing::trace;

/// How the clock turns real time into ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Fires once per whole `unit`, counting `budget` units down to zero.
    Countdown { budget: u32, unit: Duration },
    /// Fires once per host frame with the real time since the previous frame.
    Frame,
}

/// What a single clock fire means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// One countdown unit elapsed; `remaining` units are left.
    Countdown { remaining: u32 },
    /// The countdown reached zero. Emitted once, after which the clock stops itself.
    Exhausted,
    Frame { dt: Duration },
}

/// A tick stamped with the epoch of the clock that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fire {
    pub epoch: u32,
    pub tick: Tick,
}

#[derive(Debug, Clone)]
pub struct GameClock {
    cadence: Cadence,
    running: bool,
    epoch: u32,
    /// Real time accumulated towards the next countdown unit.
    carry: Duration,
    remaining: u32,
    elapsed: Duration,
}

impl GameClock {
    pub fn new(cadence: Cadence) -> Self {
        let remaining = match cadence {
            Cadence::Countdown { budget, .. } => budget,
            Cadence::Frame => 0,
        };

        Self {
            cadence,
            running: false,
            epoch: 0,
            carry: Duration::ZERO,
            remaining,
            elapsed: Duration::ZERO,
        }
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Restores the counters to their initial values and begins firing.
    pub fn start(&mut self) {
        *self = Self {
            epoch: self.epoch.wrapping_add(1),
            running: true,
            ..Self::new(self.cadence)
        };
        trace!(epoch = self.epoch, cadence = ?self.cadence, "Clock started");
    }

    /// Stops firing and rewinds the counters, invalidating every earlier fire.
    pub fn reset(&mut self) {
        *self = Self {
            epoch: self.epoch.wrapping_add(1),
            ..Self::new(self.cadence)
        };
    }

    /// Stops firing. Counters stay where they are.
    pub fn pause(&mut self) {
        if self.running {
            self.running = false;
            self.epoch = self.epoch.wrapping_add(1);
        }
    }

    /// Restarts the cadence from the preserved counters.
    ///
    /// The partially accumulated unit is discarded, like re-arming an interval timer.
    pub fn resume(&mut self) {
        if !self.running {
            self.running = true;
            self.carry = Duration::ZERO;
            self.epoch = self.epoch.wrapping_add(1);
        }
    }

    /// Stops firing and invalidates every fire produced so far.
    pub fn cancel(&mut self) {
        self.running = false;
        self.carry = Duration::ZERO;
        self.epoch = self.epoch.wrapping_add(1);
        trace!(epoch = self.epoch, "Clock cancelled");
    }

    /// Converts `real` elapsed time into fires. Produces nothing while stopped.
    pub fn advance(&mut self, real: Duration) -> SmallVec<[Fire; 4]> {
        let mut fires = SmallVec::new();
        if !self.running {
            return fires;
        }

        match self.cadence {
            Cadence::Frame => {
                self.elapsed += real;
                fires.push(self.stamp(Tick::Frame { dt: real }));
            }
            Cadence::Countdown { unit, .. } => {
                self.carry += real;
                while self.remaining > 0 && self.carry >= unit {
                    self.carry -= unit;
                    self.remaining -= 1;
                    self.elapsed += unit;
                    fires.push(self.stamp(Tick::Countdown {
                        remaining: self.remaining,
                    }));
                }

                if self.remaining == 0 {
                    fires.push(self.stamp(Tick::Exhausted));
                    self.running = false;
                    self.carry = Duration::ZERO;
                }
            }
        }

        fires
    }

    fn stamp(&self, tick: Tick) -> Fire {
        Fire { epoch: self.epoch, tick }
    }

    /// Whether `fire` was produced since the last start, pause, resume or cancel.
    pub fn is_current(&self, fire: &Fire) -> bool {
        fire.epoch == self.epoch
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Countdown units left; `None` for frame cadence.
    pub fn remaining(&self) -> Option<u32> {
        match self.cadence {
            Cadence::Countdown { .. } => Some(self.remaining),
            Cadence::Frame => None,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed whole seconds, as reported to the host.
    pub fn elapsed_secs(&self) -> u32 {
        u32::try_from(self.elapsed.as_secs()).unwrap_or(u32::MAX)
    }
}

/// Identifies a scheduled deferred action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone)]
struct Pending<A> {
    handle: TimerHandle,
    due: Duration,
    action: A,
}

/// Deferred actions scheduled against the game clock's notion of time.
///
/// A `Timers` only moves forward when advanced, so a paused session freezes its
/// pending transitions along with its clock.
#[derive(Debug, Clone)]
pub struct Timers<A> {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending<A>>,
}

impl<A> Default for Timers<A> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<A> Timers<A> {
    pub fn schedule(&mut self, delay: Duration, action: A) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            handle,
            due: self.now + delay,
            action,
        });
        handle
    }

    /// Returns `true` if the timer was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        before != self.pending.len()
    }

    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            trace!(count = self.pending.len(), "Cancelling deferred actions");
        }
        self.pending.clear();
        self.now = Duration::ZERO;
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Moves time forward and returns every action that fell due, earliest first.
    pub fn advance(&mut self, dt: Duration) -> SmallVec<[A; 2]> {
        self.now += dt;
        let now = self.now;

        let mut due: SmallVec<[Pending<A>; 2]> = SmallVec::new();
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].due <= now {
                due.push(self.pending.remove(index));
            } else {
                index += 1;
            }
        }

        due.sort_by_key(|p| (p.due, p.handle.0));
        due.into_iter().map(|p| p.action).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countdown(budget: u32) -> GameClock {
        GameClock::new(Cadence::Countdown {
            budget,
            unit: Duration::from_secs(1),
        })
    }

    #[test]
    fn test_idle_clock_never_fires() {
        let mut clock = countdown(3);
        assert!(clock.advance(Duration::from_secs(10)).is_empty());
        assert_eq!(clock.remaining(), Some(3));
    }

    #[test]
    fn test_countdown_fires_per_whole_unit() {
        let mut clock = countdown(5);
        clock.start();

        assert!(clock.advance(Duration::from_millis(900)).is_empty());
        let fires = clock.advance(Duration::from_millis(1200));
        assert_eq!(fires.len(), 2);
        assert_eq!(fires[1].tick, Tick::Countdown { remaining: 3 });
        assert_eq!(clock.remaining(), Some(3));
    }

    #[test]
    fn test_countdown_exhausts_once() {
        let mut clock = countdown(1);
        clock.start();

        let fires = clock.advance(Duration::from_secs(5));
        let ticks: Vec<_> = fires.iter().map(|f| f.tick).collect();
        assert_eq!(ticks, vec![Tick::Countdown { remaining: 0 }, Tick::Exhausted]);
        assert!(!clock.is_running());
        assert!(clock.advance(Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_resume_preserves_counters_and_restarts_unit() {
        let mut clock = countdown(10);
        clock.start();
        clock.advance(Duration::from_millis(2500));
        clock.pause();
        assert!(clock.advance(Duration::from_secs(3)).is_empty());

        clock.resume();
        assert_eq!(clock.remaining(), Some(8));
        // The half second carried before pausing is gone.
        assert!(clock.advance(Duration::from_millis(600)).is_empty());
        assert_eq!(clock.advance(Duration::from_millis(400)).len(), 1);
    }

    #[test]
    fn test_cancel_invalidates_in_flight_fires() {
        let mut clock = GameClock::new(Cadence::Frame);
        clock.start();
        let fires = clock.advance(Duration::from_millis(16));
        clock.cancel();

        assert!(!clock.is_current(&fires[0]));
        assert!(clock.advance(Duration::from_millis(16)).is_empty());
    }

    #[test]
    fn test_reset_rewinds_and_invalidates() {
        let mut clock = countdown(4);
        clock.start();
        let fires = clock.advance(Duration::from_secs(1));
        clock.reset();

        assert!(!clock.is_running());
        assert!(!clock.is_current(&fires[0]));
        assert_eq!(clock.remaining(), Some(4));
        assert_eq!(clock.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_frame_accumulates_elapsed() {
        let mut clock = GameClock::new(Cadence::Frame);
        clock.start();
        for _ in 0..3 {
            clock.advance(Duration::from_millis(500));
        }
        assert_eq!(clock.elapsed(), Duration::from_millis(1500));
        assert_eq!(clock.elapsed_secs(), 1);
        assert_eq!(clock.remaining(), None);
    }

    #[test]
    fn test_timers_fire_in_due_order() {
        let mut timers = Timers::default();
        timers.schedule(Duration::from_millis(300), "late");
        timers.schedule(Duration::from_millis(100), "early");

        assert!(timers.advance(Duration::from_millis(50)).is_empty());
        let due = timers.advance(Duration::from_millis(300));
        assert_eq!(due.as_slice(), &["early", "late"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut timers = Timers::default();
        let handle = timers.schedule(Duration::from_millis(100), 1);
        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));
        assert!(timers.advance(Duration::from_secs(1)).is_empty());
    }
}
