//! Deadline-ordered timers advanced by an external clock.
//!
//! Callbacks receive `&mut C`, so the state they drive lives in one place and
//! is only ever touched from whichever thread calls [`TimerQueue::advance_to`].
//! The window advances the queue from its frame clock; tests advance it by hand.

use std::ops::ControlFlow;
use std::time::Duration;

use anyhow::{bail, Result};

pub type TaskId = u64;

type RepeatFn<C> = Box<dyn FnMut(&mut C) -> ControlFlow<()>>;
type OnceFn<C> = Box<dyn FnOnce(&mut C)>;

pub trait Scheduler<C> {
    /// Runs `task` every `period` until it returns `ControlFlow::Break`.
    fn schedule_repeating<F>(&mut self, period: Duration, task: F) -> Result<TaskId>
    where
        F: FnMut(&mut C) -> ControlFlow<()> + 'static;

    /// Runs `task` once, `delay` after registration.
    fn schedule_once<F>(&mut self, delay: Duration, task: F) -> Result<TaskId>
    where
        F: FnOnce(&mut C) + 'static;
}

enum Task<C> {
    Repeating { period: Duration, run: RepeatFn<C> },
    Once(OnceFn<C>),
}

struct Timer<C> {
    id:       TaskId,
    deadline: Duration,
    task:     Task<C>,
}

pub struct TimerQueue<C> {
    elapsed: Duration,
    timers:  Vec<Timer<C>>,
    next_id: TaskId,
}

impl<C> Default for TimerQueue<C> {
    fn default() -> Self { Self::new() }
}

impl<C> TimerQueue<C> {
    pub fn new() -> Self {
        Self { elapsed: Duration::ZERO, timers: Vec::new(), next_id: 0 }
    }

    pub fn elapsed(&self) -> Duration { self.elapsed }

    pub fn pending(&self) -> usize { self.timers.len() }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.deadline).min()
    }

    /// Fires every timer due at or before `now`, earliest deadline first
    /// (registration order breaks ties). Repeating timers are re-armed at
    /// `deadline + period`, so a late call catches up instead of drifting.
    /// Returns the number of callbacks run.
    pub fn advance_to(&mut self, now: Duration, ctx: &mut C) -> usize {
        if now < self.elapsed {
            return 0;
        }
        let mut fired = 0;
        while let Some(timer) = self.pop_due(now) {
            self.elapsed = timer.deadline;
            fired += 1;
            match timer.task {
                Task::Repeating { period, mut run } => {
                    if run(ctx).is_continue() {
                        self.timers.push(Timer {
                            id: timer.id,
                            deadline: timer.deadline + period,
                            task: Task::Repeating { period, run },
                        });
                    }
                }
                Task::Once(run) => run(ctx),
            }
        }
        self.elapsed = now;
        fired
    }

    fn pop_due(&mut self, now: Duration) -> Option<Timer<C>> {
        let idx = self.timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(_, t)| (t.deadline, t.id))
            .map(|(i, _)| i)?;
        Some(self.timers.swap_remove(idx))
    }

    fn push(&mut self, delay: Duration, task: Task<C>) -> TaskId {
        let id = self.next_id;
        self.next_id += 1;
        self.timers.push(Timer { id, deadline: self.elapsed + delay, task });
        id
    }
}

impl<C> Scheduler<C> for TimerQueue<C> {
    fn schedule_repeating<F>(&mut self, period: Duration, task: F) -> Result<TaskId>
    where
        F: FnMut(&mut C) -> ControlFlow<()> + 'static,
    {
        if period.is_zero() {
            bail!("repeating timer needs a non-zero period");
        }
        Ok(self.push(period, Task::Repeating { period, run: Box::new(task) }))
    }

    fn schedule_once<F>(&mut self, delay: Duration, task: F) -> Result<TaskId>
    where
        F: FnOnce(&mut C) + 'static,
    {
        Ok(self.push(delay, Task::Once(Box::new(task))))
    }
}
