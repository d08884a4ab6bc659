//! The autoscroll motion engine.
//!
//! Idle until [`MotionEngine::start`], then one [`MotionEngine::tick`] per
//! animation frame until a stop trigger fires. Velocity is derived from the
//! cursor's position relative to the gesture origin, not from its motion, so
//! only the latest pointer sample matters.

mod accumulator;
mod target;
mod velocity;

pub use accumulator::Accumulator;
pub use target::{ScrollTarget, is_scroll_container, resolve_scroll_target};
pub use velocity::{DEAD_ZONE, RESPONSE_EXPONENT, axis_velocity, velocity};

use crate::app::Disposition;
use crate::geometry::{Point, ScrollDelta, Velocity};
use crate::page::{
    FrameHandle, IndicatorId, Key, ListenerKind, ListenerOptions, MouseButton, Page, TimerHandle,
};
use crate::settings::{ScrollMode, Settings};
use std::time::Duration;
use tracing::{debug, warn};

/// Edge length of the on-screen indicator, in pixels.
pub const INDICATOR_SIZE: f64 = 32.0;

/// How long the context-menu suppressor outlives a gesture.
pub const SUPPRESSOR_LINGER: Duration = Duration::from_millis(50);

const MOVE_OPTIONS: ListenerOptions = ListenerOptions {
    capture: true,
    passive: true,
};

const CAPTURE_OPTIONS: ListenerOptions = ListenerOptions {
    capture: true,
    passive: false,
};

/// Listeners that live exactly as long as a gesture.
const GESTURE_LISTENERS: [(ListenerKind, ListenerOptions); 3] = [
    (ListenerKind::PointerMove, MOVE_OPTIONS),
    (ListenerKind::PointerUp, CAPTURE_OPTIONS),
    (ListenerKind::KeyDown, CAPTURE_OPTIONS),
];

/// State of a running gesture.
#[derive(Debug, Clone, Copy)]
pub struct ScrollSession {
    origin: Point,
    cursor: Point,
    accumulator: Accumulator,
    frame: Option<FrameHandle>,
    mode: ScrollMode,
}

impl ScrollSession {
    /// Where the gesture started.
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Latest pointer position.
    #[must_use]
    pub const fn cursor(&self) -> Point {
        self.cursor
    }

    /// Sub-pixel remainder carried into the next frame.
    #[must_use]
    pub const fn accumulator(&self) -> Accumulator {
        self.accumulator
    }

    /// Mode captured when the gesture started.
    #[must_use]
    pub const fn mode(&self) -> ScrollMode {
        self.mode
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Suppressor {
    Detached,
    Attached,
    Lingering(TimerHandle),
}

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Velocity computed for this frame.
    pub velocity: Velocity,
    /// Target and delta, when at least one whole pixel was applied.
    pub scrolled: Option<(ScrollTarget, ScrollDelta)>,
}

/// Owns the gesture lifecycle.
#[derive(Debug)]
#[expect(
    missing_copy_implementations,
    reason = "stateful engine; implicit copies would fork gesture state"
)]
pub struct MotionEngine {
    session: Option<ScrollSession>,
    indicator: Option<IndicatorId>,
    suppressor: Suppressor,
}

impl Default for MotionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionEngine {
    /// An idle engine.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            session: None,
            indicator: None,
            suppressor: Suppressor::Detached,
        }
    }

    /// Whether a gesture is running.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The running gesture, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&ScrollSession> {
        self.session.as_ref()
    }

    /// Begin a gesture at `origin`. Does nothing if one is already running.
    pub fn start<P: Page + ?Sized>(&mut self, page: &mut P, origin: Point, mode: ScrollMode) {
        if self.session.is_some() {
            return;
        }

        if let Some(stale) = self.indicator.take() {
            page.remove_indicator(stale);
        }
        let half = INDICATOR_SIZE / 2.0;
        self.indicator = Some(page.show_indicator(origin.offset(-half, -half), INDICATOR_SIZE));

        for (kind, options) in GESTURE_LISTENERS {
            page.add_listener(kind, options);
        }
        match self.suppressor {
            Suppressor::Detached => {
                page.add_listener(ListenerKind::ContextMenu, CAPTURE_OPTIONS);
            }
            Suppressor::Lingering(timer) => page.clear_timeout(timer),
            Suppressor::Attached => {}
        }
        self.suppressor = Suppressor::Attached;

        self.session = Some(ScrollSession {
            origin,
            cursor: origin,
            accumulator: Accumulator::default(),
            frame: Some(page.request_frame()),
            mode,
        });
        debug!("Autoscroll started at ({}, {}) in {} mode", origin.x, origin.y, mode);
    }

    /// End the gesture. Does nothing when idle.
    pub fn stop<P: Page + ?Sized>(&mut self, page: &mut P) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        session.accumulator.reset();

        if let Some(frame) = session.frame.take() {
            page.cancel_frame(frame);
        }
        if let Some(indicator) = self.indicator.take() {
            page.remove_indicator(indicator);
        }
        for (kind, options) in GESTURE_LISTENERS {
            page.remove_listener(kind, options);
        }
        if self.suppressor == Suppressor::Attached {
            self.suppressor = Suppressor::Lingering(page.set_timeout(SUPPRESSOR_LINGER));
        }
        debug!("Autoscroll stopped");
    }

    /// Record the latest pointer position.
    pub const fn on_pointer_move(&mut self, point: Point) {
        if let Some(session) = self.session.as_mut() {
            session.cursor = point;
        }
    }

    /// Apply one frame. Returns `None` when the frame does not belong to a
    /// running gesture, which ends the frame chain.
    pub fn tick<P: Page + ?Sized>(
        &mut self,
        page: &mut P,
        frame: FrameHandle,
        settings: &Settings,
    ) -> Option<TickReport> {
        let session = self.session.as_mut()?;
        if session.frame != Some(frame) {
            debug!("Ignoring stale frame {:?}", frame);
            return None;
        }

        let velocity = velocity(session.origin, session.cursor, settings);
        session.accumulator.add(velocity);
        let delta = session.accumulator.whole();

        let mut scrolled = None;
        if !delta.is_zero() {
            let target = resolve_scroll_target(page, session.origin);
            let applied = match target {
                ScrollTarget::Page => page.scroll_page_by(delta),
                ScrollTarget::Element(node) => page.scroll_element_by(node, delta),
            };
            if let Err(e) = applied {
                warn!("Failed to scroll {:?}: {:#}", target, e);
            }
            // Dropped on failure too, so a dead target cannot grow the remainder.
            session.accumulator.commit(delta);
            scrolled = Some((target, delta));
        }

        session.frame = Some(page.request_frame());
        Some(TickReport { velocity, scrolled })
    }

    /// Handle a button release while a gesture runs.
    pub fn on_pointer_up<P: Page + ?Sized>(
        &mut self,
        page: &mut P,
        button: MouseButton,
    ) -> Disposition {
        let Some(session) = self.session.as_ref() else {
            return Disposition::PassThrough;
        };
        let stops = match session.mode {
            ScrollMode::Toggle => matches!(button, MouseButton::Primary | MouseButton::Secondary),
            ScrollMode::Drag => true,
        };
        if !stops {
            return Disposition::PassThrough;
        }
        self.stop(page);
        Disposition::Consume
    }

    /// Handle a key press while a gesture runs.
    pub fn on_key_down<P: Page + ?Sized>(&mut self, page: &mut P, key: Key) -> Disposition {
        if key != Key::Escape || !self.is_active() {
            return Disposition::PassThrough;
        }
        self.stop(page);
        Disposition::Consume
    }

    /// Swallow context menus raised by the middle button while a gesture runs.
    ///
    /// The listener outlives the gesture briefly, but once idle it lets every
    /// menu through.
    #[must_use]
    pub const fn on_context_menu(&self, button: MouseButton) -> Disposition {
        if matches!(button, MouseButton::Middle) && self.is_active() {
            Disposition::PreventDefault
        } else {
            Disposition::PassThrough
        }
    }

    /// Handle a timer firing. Returns whether the timer belonged to the engine.
    pub fn on_timer<P: Page + ?Sized>(&mut self, page: &mut P, timer: TimerHandle) -> bool {
        if self.suppressor != Suppressor::Lingering(timer) {
            return false;
        }
        page.remove_listener(ListenerKind::ContextMenu, CAPTURE_OPTIONS);
        self.suppressor = Suppressor::Detached;
        true
    }
}
