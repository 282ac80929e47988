#![forbid(unsafe_code)]

//! The canonical drag-drop lifecycle alphabet.
//!
//! Every modality reduces to this one event stream. For a single gesture
//! the sequence is:
//!
//! ```text
//! Grab* → DragStart → (Drag | DragEnter | DragOver | DragLeave)* → (Drop)? → DragEnd
//! ```
//!
//! with [`GestureEvent::DragCancel`] immediately preceding `DragEnd` when
//! the gesture was cancelled, and exactly one `DragEnd` per gesture no
//! matter how many termination paths race.
//!
//! `item` is always the dragged item; `target` is the drop target an
//! enter/over/leave/drop describes. Consumers must never care which
//! physical input produced an event.

use crate::geometry::Point;
use crate::item::ItemKey;

/// A canonical, modality-independent gesture event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// The item became grabbed (held and eligible to drag).
    Grab {
        /// The grabbed item.
        item: ItemKey,
    },

    /// The item was released without (or after) dragging.
    Release {
        /// The released item.
        item: ItemKey,
    },

    /// A drag began.
    DragStart {
        /// The dragged item.
        item: ItemKey,
        /// Position, page-relative.
        page: Point,
        /// Position relative to the dragged element.
        offset: Point,
    },

    /// The drag moved.
    Drag {
        /// The dragged item.
        item: ItemKey,
        /// Position, page-relative.
        page: Point,
        /// Position relative to the dragged element.
        offset: Point,
    },

    /// The drag entered a drop target.
    DragEnter {
        /// The dragged item.
        item: ItemKey,
        /// The entered target.
        target: ItemKey,
    },

    /// The drag is moving over a drop target.
    DragOver {
        /// The dragged item.
        item: ItemKey,
        /// The target under the drag.
        target: ItemKey,
        /// Position, page-relative.
        page: Point,
        /// Position relative to the target element.
        offset: Point,
    },

    /// The drag left a drop target.
    DragLeave {
        /// The dragged item.
        item: ItemKey,
        /// The target left.
        target: ItemKey,
    },

    /// The drag was dropped on a target.
    Drop {
        /// The dragged item.
        item: ItemKey,
        /// The drop target.
        target: ItemKey,
    },

    /// The gesture was explicitly cancelled (Escape, touch-cancel, focus
    /// loss). Always followed by `DragEnd`.
    DragCancel {
        /// The dragged item.
        item: ItemKey,
    },

    /// The gesture finished. Exactly once per gesture.
    DragEnd {
        /// The dragged item.
        item: ItemKey,
    },
}

impl GestureEvent {
    /// The dragged item this event belongs to.
    #[must_use]
    pub const fn item(&self) -> ItemKey {
        match *self {
            GestureEvent::Grab { item }
            | GestureEvent::Release { item }
            | GestureEvent::DragStart { item, .. }
            | GestureEvent::Drag { item, .. }
            | GestureEvent::DragEnter { item, .. }
            | GestureEvent::DragOver { item, .. }
            | GestureEvent::DragLeave { item, .. }
            | GestureEvent::Drop { item, .. }
            | GestureEvent::DragCancel { item }
            | GestureEvent::DragEnd { item } => item,
        }
    }

    /// The drop target, for target-side events.
    #[must_use]
    pub const fn target(&self) -> Option<ItemKey> {
        match *self {
            GestureEvent::DragEnter { target, .. }
            | GestureEvent::DragOver { target, .. }
            | GestureEvent::DragLeave { target, .. }
            | GestureEvent::Drop { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Whether this event closes the gesture.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, GestureEvent::DragEnd { .. })
    }

    /// Whether this event describes a drop target rather than the drag
    /// itself.
    #[must_use]
    pub const fn is_target_side(&self) -> bool {
        self.target().is_some()
    }
}

/// Observable state ladder of a per-item gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum GesturePhase {
    /// Nothing happening on the item.
    #[default]
    Idle,
    /// Pointer/finger over the item.
    Hovered,
    /// Press held, not (yet) eligible to drag.
    Pressed,
    /// Held and eligible to start dragging.
    Grabbed,
    /// A drag is in progress.
    Dragging,
}
