#![forbid(unsafe_code)]

//! Raw input alphabet fed by hosts.
//!
//! Hosts own the platform event loop and real hit-testing of their view
//! tree; by the time an event reaches this crate it is already routed to an
//! [`ItemKey`]. Pointer events include the platform's native drag stream
//! (the platform decides when a native drag starts and delivers per-target
//! enter/over/leave/drop); touch and keyboard events are raw and the
//! modality adapters synthesize the equivalent stream.
//!
//! # Design Notes
//!
//! - `page` coordinates are page-relative; `offset` is relative to the
//!   element the event describes.
//! - `part` names the sub-element a press landed on, for drag-handle
//!   gating. Hosts that don't use handles pass `None`.
//! - Key events are delivered to the focused item.

use bitflags::bitflags;

use crate::geometry::Point;
use crate::item::ItemKey;

/// A routed input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer moved over the item.
    PointerEnter {
        /// The item under the pointer.
        item: ItemKey,
    },

    /// Pointer left the item.
    PointerLeave {
        /// The item the pointer left.
        item: ItemKey,
    },

    /// Pointer press began on the item.
    PointerDown {
        /// The pressed item.
        item: ItemKey,
        /// Named sub-part the press landed on, if the host tracks one.
        part: Option<String>,
    },

    /// Pointer press ended on the item.
    PointerUp {
        /// The released item.
        item: ItemKey,
    },

    /// The platform started a native drag of the item.
    DragStarted {
        /// The dragged item.
        item: ItemKey,
        /// Pointer position, page-relative.
        page: Point,
        /// Pointer position relative to the dragged element.
        offset: Point,
    },

    /// The platform reported drag movement of the item.
    DragMoved {
        /// The dragged item.
        item: ItemKey,
        /// Pointer position, page-relative.
        page: Point,
        /// Pointer position relative to the dragged element.
        offset: Point,
    },

    /// The platform ended the native drag (with or without a drop).
    DragEnded {
        /// The dragged item.
        item: ItemKey,
    },

    /// A native drag entered this drop target.
    DragEntered {
        /// The target entered.
        item: ItemKey,
    },

    /// A native drag is moving over this drop target.
    DraggedOver {
        /// The target under the drag.
        item: ItemKey,
        /// Pointer position, page-relative.
        page: Point,
        /// Pointer position relative to the target element.
        offset: Point,
    },

    /// A native drag left this drop target.
    DragLeft {
        /// The target left.
        item: ItemKey,
    },

    /// A native drop landed on this target.
    Dropped {
        /// The drop target.
        item: ItemKey,
    },

    /// A touch began on the item.
    TouchStart {
        /// The touched item.
        item: ItemKey,
        /// Named sub-part the touch landed on.
        part: Option<String>,
        /// Touch position, page-relative.
        page: Point,
    },

    /// The touch point moved.
    TouchMove {
        /// The item the touch started on.
        item: ItemKey,
        /// Touch position, page-relative.
        page: Point,
        /// Touch position relative to the touched element.
        offset: Point,
    },

    /// The touch lifted.
    TouchEnd {
        /// The item the touch started on.
        item: ItemKey,
    },

    /// The platform cancelled the touch sequence.
    TouchCancel {
        /// The item the touch started on.
        item: ItemKey,
    },

    /// The item gained keyboard focus.
    FocusIn {
        /// The focused item.
        item: ItemKey,
    },

    /// The item lost keyboard focus.
    FocusOut {
        /// The blurred item.
        item: ItemKey,
    },

    /// A key event delivered to the focused item.
    Key {
        /// The focused item.
        item: ItemKey,
        /// The key event.
        key: KeyEvent,
    },
}

impl InputEvent {
    /// The item this event is addressed to.
    #[must_use]
    pub const fn item(&self) -> ItemKey {
        match *self {
            InputEvent::PointerEnter { item }
            | InputEvent::PointerLeave { item }
            | InputEvent::PointerDown { item, .. }
            | InputEvent::PointerUp { item }
            | InputEvent::DragStarted { item, .. }
            | InputEvent::DragMoved { item, .. }
            | InputEvent::DragEnded { item }
            | InputEvent::DragEntered { item }
            | InputEvent::DraggedOver { item, .. }
            | InputEvent::DragLeft { item }
            | InputEvent::Dropped { item }
            | InputEvent::TouchStart { item, .. }
            | InputEvent::TouchMove { item, .. }
            | InputEvent::TouchEnd { item }
            | InputEvent::TouchCancel { item }
            | InputEvent::FocusIn { item }
            | InputEvent::FocusOut { item }
            | InputEvent::Key { item, .. } => item,
        }
    }

    /// Which physical modality produced this event.
    #[must_use]
    pub const fn modality(&self) -> InputModality {
        match self {
            InputEvent::PointerEnter { .. }
            | InputEvent::PointerLeave { .. }
            | InputEvent::PointerDown { .. }
            | InputEvent::PointerUp { .. }
            | InputEvent::DragStarted { .. }
            | InputEvent::DragMoved { .. }
            | InputEvent::DragEnded { .. }
            | InputEvent::DragEntered { .. }
            | InputEvent::DraggedOver { .. }
            | InputEvent::DragLeft { .. }
            | InputEvent::Dropped { .. } => InputModality::Pointer,
            InputEvent::TouchStart { .. }
            | InputEvent::TouchMove { .. }
            | InputEvent::TouchEnd { .. }
            | InputEvent::TouchCancel { .. } => InputModality::Touch,
            InputEvent::FocusIn { .. } | InputEvent::FocusOut { .. } | InputEvent::Key { .. } => {
                InputModality::Keyboard
            }
        }
    }
}

/// The physical input source of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputModality {
    /// Mouse or pen, with a platform-native drag stream.
    Pointer,
    /// Touch points; drag stream is synthesized.
    Touch,
    /// Keyboard grab/navigate/commit; drag stream is synthesized.
    Keyboard,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,

    /// Shift+Tab (back-tab).
    BackTab,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_event_reports_its_item() {
        let k = ItemKey(7);
        let events = [
            InputEvent::PointerEnter { item: k },
            InputEvent::PointerDown { item: k, part: None },
            InputEvent::DragStarted {
                item: k,
                page: Point::ZERO,
                offset: Point::ZERO,
            },
            InputEvent::Dropped { item: k },
            InputEvent::TouchEnd { item: k },
            InputEvent::Key {
                item: k,
                key: KeyEvent::new(KeyCode::Enter),
            },
        ];
        for ev in events {
            assert_eq!(ev.item(), k);
        }
    }

    #[test]
    fn modality_classification() {
        let k = ItemKey(1);
        assert_eq!(
            InputEvent::DraggedOver {
                item: k,
                page: Point::ZERO,
                offset: Point::ZERO
            }
            .modality(),
            InputModality::Pointer
        );
        assert_eq!(
            InputEvent::TouchMove {
                item: k,
                page: Point::ZERO,
                offset: Point::ZERO
            }
            .modality(),
            InputModality::Touch
        );
        assert_eq!(
            InputEvent::FocusIn { item: k }.modality(),
            InputModality::Keyboard
        );
    }

    #[test]
    fn key_event_builders() {
        let ev = KeyEvent::new(KeyCode::Char('j')).with_modifiers(Modifiers::CTRL);
        assert!(ev.is_char('j'));
        assert!(!ev.is_char('k'));
        assert!(ev.modifiers.contains(Modifiers::CTRL));
        assert_eq!(ev.kind, KeyEventKind::Press);
    }
}
