//! Events delivered by the host page

use crate::geometry::Point;
use crate::page::{FrameHandle, Key, MouseButton, NodeId, TimerHandle};

/// One callback from the host, delivered one per turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    /// A button went down.
    PointerDown {
        /// Button pressed
        button: MouseButton,
        /// Viewport coordinates of the press
        point: Point,
        /// Element under the pointer, if any
        target: Option<NodeId>,
    },
    /// The pointer moved.
    PointerMove(Point),
    /// A button was released.
    PointerUp(MouseButton),
    /// A key went down.
    KeyDown(Key),
    /// The host is about to show a context menu.
    ContextMenu(MouseButton),
    /// A requested animation frame fired.
    Frame(FrameHandle),
    /// A timeout fired.
    Timer(TimerHandle),
}

/// What the host should do with an event after it was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Let the page see it normally.
    PassThrough,
    /// Cancel the default action but keep propagating.
    PreventDefault,
    /// Cancel the default action and stop propagation.
    Consume,
}

impl Disposition {
    /// Whether the host's default action must be cancelled.
    #[must_use]
    pub const fn prevents_default(self) -> bool {
        !matches!(self, Self::PassThrough)
    }

    /// Whether propagation to other listeners must stop.
    #[must_use]
    pub const fn stops_propagation(self) -> bool {
        matches!(self, Self::Consume)
    }
}
