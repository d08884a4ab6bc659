//! In-memory page used by tests and the simulator.
//!
//! Elements live in an arena. Hit testing picks the most recently appended
//! element whose bounds contain the point, falling back to `<body>` anywhere
//! inside the viewport. Every scroll, listener and indicator operation is
//! recorded so callers can assert on what the engine did.

use super::{
    FrameHandle, IndicatorId, ListenerKind, ListenerOptions, NodeId, OverflowStyle, Page,
    ScrollMetrics, TimerHandle,
};
use crate::geometry::{Point, Rect, ScrollDelta};
use anyhow::{Result, bail};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use tracing::debug;

/// Description of an element to append.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    href: Option<String>,
    content_editable: Option<bool>,
    overflow: OverflowStyle,
    metrics: ScrollMetrics,
    bounds: Option<Rect>,
}

impl ElementSpec {
    /// An element with the given tag and no layout box.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Set the `href` attribute.
    #[must_use]
    pub fn href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    /// Set `contenteditable` explicitly on this element.
    #[must_use]
    pub const fn content_editable(mut self, editable: bool) -> Self {
        self.content_editable = Some(editable);
        self
    }

    /// Set computed overflow.
    #[must_use]
    pub const fn overflow(mut self, overflow: OverflowStyle) -> Self {
        self.overflow = overflow;
        self
    }

    /// Set content and client sizes.
    #[must_use]
    pub const fn metrics(mut self, metrics: ScrollMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Give the element a hit-testable box in viewport coordinates.
    #[must_use]
    pub const fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// One applied scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRecord {
    /// The viewport scrolled.
    Page(ScrollDelta),
    /// An element scrolled.
    Element(NodeId, ScrollDelta),
}

#[derive(Debug, Clone)]
struct Node {
    spec: ElementSpec,
    parent: Option<NodeId>,
    scroll_left: i64,
    scroll_top: i64,
}

/// Arena-backed document with a simulated clock.
#[derive(Debug)]
pub struct PageTree {
    nodes: Vec<Node>,
    html: NodeId,
    body: NodeId,
    viewport: Rect,
    page_scroll: (i64, i64),
    scrolls: Vec<ScrollRecord>,
    indicators: BTreeMap<IndicatorId, (Point, f64)>,
    listeners: BTreeMap<(ListenerKind, ListenerOptions), usize>,
    frames: BTreeSet<FrameHandle>,
    timers: BTreeMap<TimerHandle, Duration>,
    now: Duration,
    next_handle: u64,
    scrolling_frozen: bool,
}

impl PageTree {
    /// A document with `<html>` and `<body>` covering a viewport of the given size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let viewport = Rect::new(0.0, 0.0, width, height);
        let html = Node {
            spec: ElementSpec::new("html").bounds(viewport),
            parent: None,
            scroll_left: 0,
            scroll_top: 0,
        };
        let body = Node {
            spec: ElementSpec::new("body").bounds(viewport),
            parent: Some(NodeId(0)),
            ..html.clone()
        };
        Self {
            nodes: vec![html, body],
            html: NodeId(0),
            body: NodeId(1),
            viewport,
            page_scroll: (0, 0),
            scrolls: Vec::new(),
            indicators: BTreeMap::new(),
            listeners: BTreeMap::new(),
            frames: BTreeSet::new(),
            timers: BTreeMap::new(),
            now: Duration::ZERO,
            next_handle: 1,
            scrolling_frozen: false,
        }
    }

    /// The `<html>` element.
    #[must_use]
    pub const fn html(&self) -> NodeId {
        self.html
    }

    /// The `<body>` element.
    #[must_use]
    pub const fn body(&self) -> NodeId {
        self.body
    }

    /// Append a child element and return its id.
    pub fn append(&mut self, parent: NodeId, spec: ElementSpec) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            spec,
            parent: Some(parent),
            scroll_left: 0,
            scroll_top: 0,
        });
        id
    }

    /// Make every scroll call fail until unfrozen, as a torn-down document would.
    pub const fn freeze_scrolling(&mut self, frozen: bool) {
        self.scrolling_frozen = frozen;
    }

    /// Total viewport scroll applied so far.
    #[must_use]
    pub const fn page_scroll(&self) -> (i64, i64) {
        self.page_scroll
    }

    /// Current `scrollLeft` / `scrollTop` of an element.
    #[must_use]
    pub fn element_scroll(&self, node: NodeId) -> (i64, i64) {
        self.nodes
            .get(node.0)
            .map_or((0, 0), |n| (n.scroll_left, n.scroll_top))
    }

    /// Every scroll applied so far, in order.
    ///
    /// The log is never trimmed, so it grows by one record per frame that scrolls.
    #[must_use]
    pub fn scrolls(&self) -> &[ScrollRecord] {
        &self.scrolls
    }

    /// Indicators currently on the page with their top-left corners.
    #[must_use]
    pub fn indicators(&self) -> Vec<(IndicatorId, Point)> {
        self.indicators
            .iter()
            .map(|(id, (top_left, _))| (*id, *top_left))
            .collect()
    }

    /// How many registrations exist for a kind, across all flag combinations.
    #[must_use]
    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.listeners
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|(_, count)| *count)
            .sum()
    }

    /// How many registrations exist in total.
    #[must_use]
    pub fn total_listeners(&self) -> usize {
        self.listeners.values().sum()
    }

    /// Number of frame requests not yet delivered or cancelled.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of timers not yet fired or cleared.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Hand out the oldest pending frame, as the display refresh would.
    pub fn take_frame(&mut self) -> Option<FrameHandle> {
        self.frames.pop_first()
    }

    /// Move the clock forward and return the timers that are now due.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerHandle> {
        self.now += by;
        let due: Vec<TimerHandle> = self
            .timers
            .iter()
            .filter(|(_, deadline)| **deadline <= self.now)
            .map(|(handle, _)| *handle)
            .collect();
        for handle in &due {
            self.timers.remove(handle);
        }
        due
    }

    const fn next_handle(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }
}

impl Page for PageTree {
    fn element_at(&self, point: Point) -> Option<NodeId> {
        if !self.viewport.contains(point) {
            return None;
        }
        let hit = self
            .nodes
            .iter()
            .enumerate()
            .skip(2)
            .rev()
            .find(|(_, n)| n.spec.bounds.is_some_and(|b| b.contains(point)))
            .map(|(i, _)| NodeId(i));
        Some(hit.unwrap_or(self.body))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    fn is_document_root(&self, node: NodeId) -> bool {
        node == self.html || node == self.body
    }

    fn tag_name(&self, node: NodeId) -> &str {
        self.node(node).map_or("", |n| n.spec.tag.as_str())
    }

    fn href(&self, node: NodeId) -> Option<&str> {
        self.node(node)
            .and_then(|n| n.spec.href.as_deref())
            .filter(|href| !href.is_empty())
    }

    fn is_content_editable(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(n) = self.node(id) else {
                return false;
            };
            if let Some(editable) = n.spec.content_editable {
                return editable;
            }
            current = n.parent;
        }
        false
    }

    fn overflow(&self, node: NodeId) -> OverflowStyle {
        self.node(node).map(|n| n.spec.overflow).unwrap_or_default()
    }

    fn scroll_metrics(&self, node: NodeId) -> ScrollMetrics {
        self.node(node).map(|n| n.spec.metrics).unwrap_or_default()
    }

    fn scroll_page_by(&mut self, delta: ScrollDelta) -> Result<()> {
        if self.scrolling_frozen {
            bail!("Viewport cannot be scrolled");
        }
        self.page_scroll.0 += i64::from(delta.dx);
        self.page_scroll.1 += i64::from(delta.dy);
        self.scrolls.push(ScrollRecord::Page(delta));
        Ok(())
    }

    fn scroll_element_by(&mut self, node: NodeId, delta: ScrollDelta) -> Result<()> {
        if self.scrolling_frozen {
            bail!("Element {node:?} cannot be scrolled");
        }
        let Some(n) = self.nodes.get_mut(node.0) else {
            bail!("No element {node:?}");
        };
        let metrics = n.spec.metrics;
        let max_left = i64::from(metrics.scroll_width.saturating_sub(metrics.client_width));
        let max_top = i64::from(metrics.scroll_height.saturating_sub(metrics.client_height));
        n.scroll_left = (n.scroll_left + i64::from(delta.dx)).clamp(0, max_left);
        n.scroll_top = (n.scroll_top + i64::from(delta.dy)).clamp(0, max_top);
        self.scrolls.push(ScrollRecord::Element(node, delta));
        Ok(())
    }

    fn show_indicator(&mut self, top_left: Point, size: f64) -> IndicatorId {
        let id = IndicatorId(self.next_handle());
        self.indicators.insert(id, (top_left, size));
        id
    }

    fn remove_indicator(&mut self, id: IndicatorId) {
        self.indicators.remove(&id);
    }

    fn add_listener(&mut self, kind: ListenerKind, options: ListenerOptions) {
        *self.listeners.entry((kind, options)).or_insert(0) += 1;
    }

    fn remove_listener(&mut self, kind: ListenerKind, options: ListenerOptions) {
        let key = (kind, options);
        match self.listeners.get_mut(&key) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.listeners.remove(&key);
            }
            None => debug!("No {:?} listener registered with {:?}", kind, options),
        }
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_handle());
        self.frames.insert(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.remove(&handle);
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_handle());
        self.timers.insert(handle, self.now + delay);
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle);
    }
}
