//! Single-threaded run loop with repeating timers.
//!
//! Hosts own a `RunLoop<C>` where `C` is whatever the callbacks mutate
//! (usually the display surface). The host either blocks in [`RunLoop::run_for`]
//! or drives the loop itself by calling [`RunLoop::fire_due`] after waiting
//! [`RunLoop::time_until_next`], which lets it multiplex timers with input.

use std::fmt;
use std::time::{Duration, Instant};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

struct Timer<C> {
    id: u64,
    interval: Duration,
    next_fire: Instant,
    callback: Box<dyn FnMut(&mut C)>,
}

pub struct RunLoop<C> {
    timers: Vec<Timer<C>>,
    next_id: u64,
}

impl<C> Default for RunLoop<C> {
    fn default() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<C> fmt::Debug for RunLoop<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunLoop")
            .field("timers", &self.timers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl<C> RunLoop<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` to run every `interval`. The first run is due
    /// now when `fire_immediately` is set, otherwise one interval from now.
    pub fn schedule_repeating<F>(
        &mut self,
        interval: Duration,
        fire_immediately: bool,
        callback: F,
    ) -> Result<TimerHandle>
    where
        F: FnMut(&mut C) + 'static,
    {
        self.schedule_repeating_from(Instant::now(), interval, fire_immediately, callback)
    }

    /// Like [`schedule_repeating`](Self::schedule_repeating) with an explicit start instant.
    pub fn schedule_repeating_from<F>(
        &mut self,
        start: Instant,
        interval: Duration,
        fire_immediately: bool,
        callback: F,
    ) -> Result<TimerHandle>
    where
        F: FnMut(&mut C) + 'static,
    {
        if interval.is_zero() {
            return Err(Error::InvalidInterval(
                "repeating timer interval must be greater than zero".to_string(),
            ));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            interval,
            next_fire: if fire_immediately {
                start
            } else {
                start + interval
            },
            callback: Box::new(callback),
        });
        tracing::debug!(timer = id, interval_ms = interval.as_millis() as u64, "timer scheduled");

        Ok(TimerHandle(id))
    }

    /// Cancel a timer. Returns false if it was not registered.
    pub fn invalidate(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.id != handle.0);
        let removed = self.timers.len() != before;
        if removed {
            tracing::debug!(timer = handle.0, "timer invalidated");
        }
        removed
    }

    pub fn is_valid(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|timer| timer.id == handle.0)
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|timer| timer.next_fire).min()
    }

    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Run every timer whose deadline has passed, once each. A timer that fell
    /// more than one interval behind is rescheduled from `now` rather than
    /// firing a burst of catch-up ticks.
    pub fn fire_due(&mut self, now: Instant, ctx: &mut C) -> usize {
        let mut fired = 0;

        for timer in self.timers.iter_mut().filter(|t| t.next_fire <= now) {
            (timer.callback)(ctx);
            fired += 1;

            let next = timer.next_fire + timer.interval;
            timer.next_fire = if next <= now {
                tracing::warn!(
                    timer = timer.id,
                    late_ms = now.duration_since(timer.next_fire).as_millis() as u64,
                    "timer fell behind; coalescing missed ticks"
                );
                now + timer.interval
            } else {
                next
            };
        }

        fired
    }

    /// Block the current thread for `duration`, firing timers as they come due.
    pub fn run_for(&mut self, duration: Duration, ctx: &mut C) -> usize {
        let deadline = Instant::now() + duration;
        self.run_while(ctx, deadline, |_| true)
    }

    /// Block until `done` returns true (checked after every firing) or no
    /// timers remain.
    pub fn run_until<F>(&mut self, ctx: &mut C, done: F) -> usize
    where
        F: FnMut(&C) -> bool,
    {
        let mut done = done;
        let mut fired = 0;
        loop {
            if self.timers.is_empty() || done(ctx) {
                return fired;
            }
            let now = Instant::now();
            if let Some(wait) = self.time_until_next(now) {
                std::thread::sleep(wait);
            }
            fired += self.fire_due(Instant::now(), ctx);
        }
    }

    fn run_while<F>(&mut self, ctx: &mut C, deadline: Instant, mut keep_going: F) -> usize
    where
        F: FnMut(&C) -> bool,
    {
        let mut fired = 0;
        loop {
            let now = Instant::now();
            if now >= deadline || !keep_going(ctx) {
                return fired;
            }
            fired += self.fire_due(now, ctx);

            let wake = self
                .next_deadline()
                .map_or(deadline, |next| next.min(deadline));
            std::thread::sleep(wake.saturating_duration_since(Instant::now()));
        }
    }
}
