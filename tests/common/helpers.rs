//! Helpers for feeding events to a controller

use std::time::Duration;

use autoscroll::geometry::Point;
use autoscroll::page::{MouseButton, Page, PageTree};
use autoscroll::settings::SettingsStore;
use autoscroll::{Autoscroll, Disposition, PageEvent};

/// Press a button at `point`, targeting whatever the page hit-tests there.
pub fn press<S: SettingsStore>(
    app: &mut Autoscroll<PageTree, S>,
    button: MouseButton,
    point: Point,
) -> Disposition {
    let target = app.page().element_at(point);
    app.handle(PageEvent::PointerDown {
        button,
        point,
        target,
    })
}

/// Release a button.
pub fn release<S: SettingsStore>(
    app: &mut Autoscroll<PageTree, S>,
    button: MouseButton,
) -> Disposition {
    app.handle(PageEvent::PointerUp(button))
}

/// Move the pointer.
pub fn move_to<S: SettingsStore>(app: &mut Autoscroll<PageTree, S>, point: Point) {
    let _ = app.handle(PageEvent::PointerMove(point));
}

/// Deliver up to `count` frames. Returns how many were actually pending.
pub fn run_frames<S: SettingsStore>(app: &mut Autoscroll<PageTree, S>, count: usize) -> usize {
    let mut delivered = 0;
    while delivered < count {
        let Some(frame) = app.page_mut().take_frame() else {
            break;
        };
        let _ = app.handle(PageEvent::Frame(frame));
        delivered += 1;
    }
    delivered
}

/// Advance the page clock and deliver every timer that came due.
pub fn fire_timers<S: SettingsStore>(app: &mut Autoscroll<PageTree, S>, by: Duration) {
    for timer in app.page_mut().advance(by) {
        let _ = app.handle(PageEvent::Timer(timer));
    }
}
