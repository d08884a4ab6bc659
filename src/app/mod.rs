//! The autoscroll controller
//!
//! [`Autoscroll`] owns the page handle, the settings store, the cached
//! settings and the motion engine. Hosts feed it one [`PageEvent`] at a time
//! and act on the returned [`Disposition`].

mod event;

pub use event::{Disposition, PageEvent};

use crate::engine::{MotionEngine, TickReport};
use crate::gate::{self, Verdict};
use crate::geometry::Point;
use crate::page::{FrameHandle, MouseButton, NodeId, Page};
use crate::settings::{ChangeNotice, ScrollMode, Settings, SettingsStore};
use std::sync::mpsc::Receiver;
use tracing::{debug, warn};

/// Middle-click autoscroll for one page.
#[derive(Debug)]
pub struct Autoscroll<P, S> {
    page: P,
    store: S,
    settings: Settings,
    engine: MotionEngine,
    changes: Receiver<ChangeNotice>,
}

impl<P: Page, S: SettingsStore> Autoscroll<P, S> {
    /// Attach to a page, reading settings once and subscribing to changes.
    ///
    /// An unreadable store is logged and the defaults are used.
    #[must_use]
    pub fn new(page: P, mut store: S) -> Self {
        let changes = store.subscribe();
        let settings = load_settings(&store);
        Self {
            page,
            store,
            settings,
            engine: MotionEngine::new(),
            changes,
        }
    }

    /// Dispatch one host event.
    pub fn handle(&mut self, event: PageEvent) -> Disposition {
        self.pump_settings();
        match event {
            PageEvent::PointerDown {
                button,
                point,
                target,
            } => self.on_pointer_down(button, point, target),
            PageEvent::PointerMove(point) => {
                self.engine.on_pointer_move(point);
                Disposition::PassThrough
            }
            PageEvent::PointerUp(button) => self.engine.on_pointer_up(&mut self.page, button),
            PageEvent::KeyDown(key) => self.engine.on_key_down(&mut self.page, key),
            PageEvent::ContextMenu(button) => self.engine.on_context_menu(button),
            PageEvent::Frame(frame) => {
                let _ = self.tick(frame);
                Disposition::PassThrough
            }
            PageEvent::Timer(timer) => {
                let _ = self.engine.on_timer(&mut self.page, timer);
                Disposition::PassThrough
            }
        }
    }

    /// Run one animation frame and report what it did.
    ///
    /// Returns `None` for a frame that does not belong to the running gesture.
    pub fn on_frame(&mut self, frame: FrameHandle) -> Option<TickReport> {
        self.pump_settings();
        self.tick(frame)
    }

    /// Apply every pending change notice to the cached settings.
    ///
    /// Returns how many values changed.
    pub fn pump_settings(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(notice) = self.changes.try_recv() {
            applied += self.settings.apply_changes(&notice);
        }
        applied
    }

    /// The page being scrolled.
    #[must_use]
    pub const fn page(&self) -> &P {
        &self.page
    }

    /// Mutable access to the page, for hosts that drive it directly.
    pub const fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// The backing settings store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the store. Writes reach the cache through the
    /// change feed on the next event.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Cached settings as of the last event.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The motion engine.
    #[must_use]
    pub const fn engine(&self) -> &MotionEngine {
        &self.engine
    }

    /// Stop any running gesture and release the page.
    #[must_use]
    pub fn detach(mut self) -> (P, S) {
        self.engine.stop(&mut self.page);
        (self.page, self.store)
    }

    fn tick(&mut self, frame: FrameHandle) -> Option<TickReport> {
        self.engine.tick(&mut self.page, frame, &self.settings)
    }

    fn on_pointer_down(
        &mut self,
        button: MouseButton,
        point: Point,
        target: Option<NodeId>,
    ) -> Disposition {
        if let Verdict::Ignore(reason) = gate::inspect(&self.page, button, target) {
            if button == MouseButton::Middle {
                debug!("Leaving middle press to the page: {:?}", reason);
            }
            return Disposition::PassThrough;
        }

        self.settings = load_settings(&self.store);
        match (self.settings.scroll_mode, self.engine.is_active()) {
            (ScrollMode::Toggle, true) => self.engine.stop(&mut self.page),
            (ScrollMode::Drag, true) => {}
            (mode, false) => self.engine.start(&mut self.page, point, mode),
        }
        Disposition::Consume
    }
}

fn load_settings<S: SettingsStore + ?Sized>(store: &S) -> Settings {
    store.get().unwrap_or_else(|e| {
        warn!("Failed to load settings, using defaults: {}", e);
        Settings::default()
    })
}
