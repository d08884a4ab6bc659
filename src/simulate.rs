//! Scripted gestures against an in-memory page.
//!
//! Used by the `simulate` command to show what a given pointer offset does
//! with the current settings, without a browser.

use crate::app::{Autoscroll, PageEvent};
use crate::engine::{ScrollTarget, resolve_scroll_target};
use crate::geometry::{Point, Rect};
use crate::page::{
    ElementSpec, Key, MouseButton, Overflow, OverflowStyle, Page, PageTree, ScrollMetrics,
    ScrollRecord,
};
use crate::settings::{Settings, SettingsStore};
use std::fmt;
use tracing::debug;

/// Viewport width of the simulated page.
pub const VIEWPORT_WIDTH: f64 = 1280.0;

/// Viewport height of the simulated page.
pub const VIEWPORT_HEIGHT: f64 = 800.0;

/// Most frames a scenario will run. `PageTree` keeps every scroll it applies,
/// so this bounds the record kept for one run.
pub const MAX_FRAMES: u32 = 10_000;

/// One scripted gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    /// Horizontal pointer offset from the origin, in pixels.
    pub dx: f64,
    /// Vertical pointer offset from the origin, in pixels.
    pub dy: f64,
    /// Frames to run before pressing Escape, at most [`MAX_FRAMES`].
    pub frames: u32,
    /// Put a vertical scroll container under the origin.
    pub scroller: bool,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            dx: 0.0,
            dy: 0.0,
            frames: 60,
            scroller: false,
        }
    }
}

/// What a scripted gesture did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    /// Settings in effect for the gesture.
    pub settings: Settings,
    /// Whether the press started a gesture.
    pub engaged: bool,
    /// Frames that ran.
    pub frames_run: u32,
    /// Element or viewport that received the deltas.
    pub target: ScrollTarget,
    /// Sum of every delta handed to the page.
    pub applied: (i64, i64),
    /// Final scroll position of the target.
    pub position: (i64, i64),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = match self.target {
            ScrollTarget::Page => "page".to_string(),
            ScrollTarget::Element(node) => format!("element #{}", node.0),
        };
        writeln!(f, "Target:   {target}")?;
        writeln!(f, "Frames:   {}", self.frames_run)?;
        writeln!(f, "Applied:  dx={} dy={}", self.applied.0, self.applied.1)?;
        write!(f, "Position: x={} y={}", self.position.0, self.position.1)
    }
}

/// The document a scenario runs against, and the gesture origin.
#[must_use]
pub fn build_page(scenario: &Scenario) -> (PageTree, Point) {
    let mut page = PageTree::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
    let origin = Point::new(VIEWPORT_WIDTH / 2.0, VIEWPORT_HEIGHT / 2.0);
    let main = page.append(
        page.body(),
        ElementSpec::new("main").bounds(Rect::new(0.0, 0.0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT)),
    );
    if scenario.scroller {
        let _ = page.append(
            main,
            ElementSpec::new("div")
                .bounds(Rect::new(origin.x - 200.0, origin.y - 200.0, 400.0, 400.0))
                .overflow(OverflowStyle {
                    x: Overflow::Hidden,
                    y: Overflow::Scroll,
                })
                .metrics(ScrollMetrics {
                    scroll_width: 400,
                    client_width: 400,
                    scroll_height: 100_000,
                    client_height: 400,
                }),
        );
    }
    (page, origin)
}

/// Run a scenario with the settings held by `store`.
///
/// The gesture is a middle click at the viewport center, one move to the
/// requested offset, the requested number of frames, then Escape.
pub fn run<S: SettingsStore>(scenario: &Scenario, store: S) -> Outcome {
    let (page, origin) = build_page(scenario);
    let mut app = Autoscroll::new(page, store);

    let press = PageEvent::PointerDown {
        button: MouseButton::Middle,
        point: origin,
        target: app.page().element_at(origin),
    };
    let engaged = app.handle(press).prevents_default();
    let _ = app.handle(PageEvent::PointerMove(
        origin.offset(scenario.dx, scenario.dy),
    ));

    let frames = scenario.frames.min(MAX_FRAMES);
    let mut frames_run = 0;
    while frames_run < frames {
        let Some(frame) = app.page_mut().take_frame() else {
            break;
        };
        let _ = app.handle(PageEvent::Frame(frame));
        frames_run += 1;
    }
    let _ = app.handle(PageEvent::KeyDown(Key::Escape));
    debug!("Simulated {} frames", frames_run);

    let page = app.page();
    let target = resolve_scroll_target(page, origin);
    let applied = page
        .scrolls()
        .iter()
        .map(|record| match record {
            ScrollRecord::Page(delta) | ScrollRecord::Element(_, delta) => delta,
        })
        .fold((0_i64, 0_i64), |(x, y), delta| {
            (x + i64::from(delta.dx), y + i64::from(delta.dy))
        });
    let position = match target {
        ScrollTarget::Page => page.page_scroll(),
        ScrollTarget::Element(node) => page.element_scroll(node),
    };

    Outcome {
        settings: *app.settings(),
        engaged,
        frames_run,
        target,
        applied,
        position,
    }
}
