//! Autoscroll - middle-click scrolling for pages
//!
//! Press the middle button on ordinary page content and the page scrolls in
//! the direction of the pointer, faster the further it moves from where the
//! press happened. Links, editable content and form controls keep their own
//! middle-click behavior.
//!
//! The host page is abstracted behind [`page::Page`]; [`page::PageTree`] is an
//! in-memory implementation used by the simulator and the tests.

pub mod app;
pub mod engine;
pub mod gate;
pub mod geometry;
pub mod page;
pub mod paths;
pub mod settings;
pub mod simulate;

pub use app::{Autoscroll, Disposition, PageEvent};
pub use engine::{MotionEngine, ScrollTarget};
pub use page::{Page, PageTree};
pub use settings::{JsonFileStore, MemoryStore, ScrollMode, Settings, SettingsStore};
