//! The splash animation state machine.
//!
//! Two independent drivers mutate [`SplashState`]: the progress tick fills the
//! bar and flips the phase to `Complete`, the dots tick cycles the trailing
//! periods of the loading text. Both report whether they want to keep running
//! so whatever scheduled them can drop them.

use std::ops::ControlFlow;
use std::time::Duration;

use crate::theme::{LOADING_BASE, WELCOME};

pub const PROGRESS_PERIOD: Duration = Duration::from_millis(40);
pub const PROGRESS_STEP:   f32 = 0.015;
pub const DOTS_PERIOD:     Duration = Duration::from_millis(300);
pub const CLOSE_AFTER:     Duration = Duration::from_millis(3500);
pub const MAX_DOTS:        u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase { Loading, Complete }

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplashState {
    pub progress:  f32,
    pub dot_count: u8,
    pub phase:     Phase,
}

impl Default for SplashState {
    fn default() -> Self {
        Self { progress: 0.0, dot_count: 0, phase: Phase::Loading }
    }
}

/// What the loading label should currently say.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadingText {
    Loading { dots: u8 },
    Welcome,
}

impl LoadingText {
    pub fn text(&self) -> String {
        match self {
            LoadingText::Loading { dots } => format!("{LOADING_BASE}{}", ".".repeat(*dots as usize)),
            LoadingText::Welcome => WELCOME.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct AnimationController {
    state: SplashState,
    label: Option<LoadingText>,
}

impl AnimationController {
    pub fn state(&self) -> SplashState { self.state }

    pub fn is_complete(&self) -> bool { self.state.phase == Phase::Complete }

    pub fn loading_text(&self) -> LoadingText {
        self.label.unwrap_or(LoadingText::Loading { dots: self.state.dot_count })
    }

    pub fn progress_tick(&mut self) -> ControlFlow<()> {
        if self.is_complete() {
            return ControlFlow::Break(());
        }
        self.state.progress += PROGRESS_STEP;
        if self.state.progress >= 1.0 {
            self.state.progress = 1.0;
            self.state.phase = Phase::Complete;
            self.label = Some(LoadingText::Welcome);
            log::debug!("progress complete");
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }

    pub fn dots_tick(&mut self) -> ControlFlow<()> {
        if self.is_complete() {
            return ControlFlow::Break(());
        }
        self.state.dot_count = (self.state.dot_count + 1) % (MAX_DOTS + 1);
        self.label = Some(LoadingText::Loading { dots: self.state.dot_count });
        ControlFlow::Continue(())
    }
}
