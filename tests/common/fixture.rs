//! Test fixture for a small document with one of each interesting element

use autoscroll::geometry::{Point, Rect};
use autoscroll::page::{
    ElementSpec, NodeId, Overflow, OverflowStyle, PageTree, ScrollMetrics,
};
use autoscroll::settings::{MemoryStore, ScrollMode, Settings};
use autoscroll::Autoscroll;

/// Viewport used by every fixture document
pub const VIEWPORT: (f64, f64) = (1024.0, 768.0);

/// A document laid out as:
///
/// - an `<article>` filling the viewport
/// - a link with an icon inside it, top left
/// - a content-editable box below the link
/// - a text input below that
/// - a vertically scrolling feed on the right
pub struct Document {
    /// The page itself
    pub page: PageTree,
    /// Plain content filling the viewport
    pub article: NodeId,
    /// `<a href>` element
    pub link: NodeId,
    /// Image nested inside the link
    pub link_icon: NodeId,
    /// Content-editable region
    pub editor: NodeId,
    /// Text input
    pub input: NodeId,
    /// Scroll container with tall content
    pub feed: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Plain content, away from every other element
    pub const PLAIN: Point = Point::new(300.0, 650.0);
    /// Over the icon inside the link
    pub const LINK: Point = Point::new(20.0, 15.0);
    /// Inside the editable region
    pub const EDITOR: Point = Point::new(50.0, 80.0);
    /// Over the text input
    pub const INPUT: Point = Point::new(50.0, 210.0);
    /// Inside the feed
    pub const FEED: Point = Point::new(700.0, 350.0);

    pub fn new() -> Self {
        let mut page = PageTree::new(VIEWPORT.0, VIEWPORT.1);
        let article = page.append(
            page.body(),
            ElementSpec::new("article").bounds(Rect::new(0.0, 0.0, VIEWPORT.0, VIEWPORT.1)),
        );
        let link = page.append(
            article,
            ElementSpec::new("a")
                .href("https://example.com/next")
                .bounds(Rect::new(10.0, 10.0, 100.0, 20.0)),
        );
        let link_icon = page.append(
            link,
            ElementSpec::new("img").bounds(Rect::new(10.0, 10.0, 20.0, 20.0)),
        );
        let editor = page.append(
            article,
            ElementSpec::new("div")
                .content_editable(true)
                .bounds(Rect::new(10.0, 50.0, 300.0, 100.0)),
        );
        let input = page.append(
            article,
            ElementSpec::new("INPUT").bounds(Rect::new(10.0, 200.0, 200.0, 30.0)),
        );
        let feed = page.append(
            article,
            ElementSpec::new("div")
                .bounds(Rect::new(500.0, 100.0, 400.0, 500.0))
                .overflow(OverflowStyle {
                    x: Overflow::Hidden,
                    y: Overflow::Auto,
                })
                .metrics(ScrollMetrics {
                    scroll_width: 400,
                    client_width: 400,
                    scroll_height: 5000,
                    client_height: 500,
                }),
        );

        Self {
            page,
            article,
            link,
            link_icon,
            editor,
            input,
            feed,
        }
    }

    /// Wrap the document in a controller whose store holds the given mode
    /// and default speed settings.
    pub fn controller(self, mode: ScrollMode) -> Autoscroll<PageTree, MemoryStore> {
        let settings = Settings {
            scroll_mode: mode,
            ..Settings::default()
        };
        Autoscroll::new(self.page, MemoryStore::with_settings(&settings))
    }
}
