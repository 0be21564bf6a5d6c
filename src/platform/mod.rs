//! Platform abstraction layer
//!
//! - `FrameClock`: turns display-refresh timestamps into fixed simulation ticks
//! - `PageMounts`: owns mounted views until the page is really discarded
//! - `web` (wasm32 only): animation-frame loop and event listener guards

use std::fmt;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Errors while acquiring browser resources. All of them mean "don't start".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    NoWindow,
    /// Element id not found (or not the expected element type)
    MissingElement(String),
    /// Canvas has no 2D context
    NoContext(String),
    /// A JS call threw
    Js(String),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no window"),
            Self::MissingElement(id) => write!(f, "element '#{id}' not found"),
            Self::NoContext(id) => write!(f, "canvas '#{id}' has no 2d context"),
            Self::Js(msg) => write!(f, "js error: {msg}"),
        }
    }
}

impl std::error::Error for PlatformError {}

/// Fixed-step accumulator driven by frame timestamps (milliseconds)
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame timestamp; returns how many ticks to run.
    ///
    /// The first frame runs exactly one tick. Long stalls are clamped and at
    /// most `MAX_SUBSTEPS` ticks run per frame; backlog past that is dropped.
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => SIM_DT,
        };
        self.last_time = Some(now_ms);
        self.accumulator += dt;

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        ticks
    }

    /// Forget the last timestamp (e.g. after the tab was hidden)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}

/// Mounted views, dropped on a final `pagehide`.
///
/// A page kept in the back/forward cache fires `pagehide` with `persisted`
/// set and may be shown again, so its views stay mounted.
#[derive(Debug)]
pub struct PageMounts<T> {
    views: Option<T>,
}

impl<T> PageMounts<T> {
    pub fn new(views: T) -> Self {
        Self { views: Some(views) }
    }

    /// Handle `pagehide`; returns the views to drop when the page is going away
    pub fn page_hide(&mut self, persisted: bool) -> Option<T> {
        if persisted {
            return None;
        }
        self.views.take()
    }

    pub fn is_mounted(&self) -> bool {
        self.views.is_some()
    }
}
