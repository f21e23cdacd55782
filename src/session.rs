use std::fmt;

use anyhow::{Context as _, Result};

use crate::animation::{AnimationController, CLOSE_AFTER, DOTS_PERIOD, PROGRESS_PERIOD};
use crate::scheduler::Scheduler;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    Timer,
    Destroyed,
    Dismissed,
    Interrupted,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CloseReason::Timer       => "close timer elapsed",
            CloseReason::Destroyed   => "window closed externally",
            CloseReason::Dismissed   => "dismissed",
            CloseReason::Interrupted => "interrupted",
        })
    }
}

/// Everything the timers drive. Lives on the UI thread and is handed to each
/// callback as `&mut Session`.
#[derive(Debug, Default)]
pub struct Session {
    pub animation: AnimationController,
    closed_by:     Option<CloseReason>,
    pending_close: bool,
}

impl Session {
    pub fn new() -> Self { Self::default() }

    /// Registers the progress, dots and close drivers.
    pub fn install_drivers<S: Scheduler<Session>>(sched: &mut S) -> Result<()> {
        sched
            .schedule_repeating(PROGRESS_PERIOD, |s| s.animation.progress_tick())
            .context("registering progress driver")?;
        sched
            .schedule_repeating(DOTS_PERIOD, |s| s.animation.dots_tick())
            .context("registering loading-dots driver")?;
        sched
            .schedule_once(CLOSE_AFTER, |s| { s.request_close(CloseReason::Timer); })
            .context("registering close timer")?;
        Ok(())
    }

    /// Only the first request counts; later ones from other sources are no-ops.
    pub fn request_close(&mut self, reason: CloseReason) -> bool {
        if self.closed_by.is_some() {
            log::debug!("ignoring close ({reason}), already closing");
            return false;
        }
        log::info!("closing splash: {reason}");
        self.closed_by = Some(reason);
        self.pending_close = true;
        true
    }

    /// Hands out the close request once, for the window to act on.
    pub fn take_close_request(&mut self) -> Option<CloseReason> {
        if std::mem::take(&mut self.pending_close) { self.closed_by } else { None }
    }

    pub fn closed_by(&self) -> Option<CloseReason> { self.closed_by }
}
