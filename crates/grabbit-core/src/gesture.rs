#![forbid(unsafe_code)]

//! Per-item gesture state machine.
//!
//! One [`ItemGesture`] exists per registered item. It consumes
//! [`GestureSignal`]s — a small modality-blind alphabet the adapters
//! translate raw input into — and emits canonical [`GestureEvent`]s. The
//! machine never learns which physical input produced a signal; all
//! modality awareness lives in the adapters.
//!
//! # State ladder
//!
//! ```text
//! Idle → Hovered → Pressed → Grabbed → Dragging
//! ```
//!
//! Grabbed is derived, not stored: a press whose part satisfies the
//! configured handle (or no handle configured), or a keyboard grab latch
//! while focused — in both cases only while the item has the `DRAG`
//! capability. Transitions into and out of Grabbed emit
//! [`GestureEvent::Grab`] / [`GestureEvent::Release`]; a gesture that went
//! on to drag ends with `DragEnd` alone (the drop/cancel report is the
//! release notification in that case).
//!
//! # Invariants
//!
//! - At most one `DragEnd` per gesture: the first terminal signal wins and
//!   later end/cancel signals are silent no-ops, so racing termination
//!   paths (platform drag-end after a processed drop, touch-cancel after
//!   touch-end) cannot double-report.
//! - Invalid transitions are silent negative results: no events, no state
//!   change.
//! - Hover and press signals are frozen while the item drags; the real
//!   element no longer tracks the pointer, the ghost does.
//! - A press clears the hover flag and a release restores it (hover
//!   styling must drop the moment a press begins).
//! - Target-side signals honor the `DROP` capability at each delivery,
//!   including the final commit.
//!
//! # Failure Modes
//!
//! - A stale `Move`/`EndDrag` with no drag in flight is dropped.
//! - A `DropCommit` on an item whose `DROP` capability was revoked
//!   mid-gesture emits nothing; the gesture then ends as a drop outside.

use crate::geometry::Point;
use crate::item::{Capabilities, InteractionFlags, ItemConfig, ItemKey};
use crate::lifecycle::{GestureEvent, GesturePhase};

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

/// Modality-blind input alphabet for [`ItemGesture`].
///
/// Source-side signals address the item being (potentially) dragged;
/// target-side signals address a drop target and carry the dragged key so
/// the emitted canonical event names both ends.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureSignal {
    /// Pointer/finger moved over the item.
    HoverIn,
    /// Pointer/finger left the item.
    HoverOut,
    /// A press began, on the named sub-part if the host tracks one.
    Press {
        /// Sub-part the press landed on.
        part: Option<String>,
    },
    /// The press ended without (or after) a drag.
    Release,
    /// Keyboard grab latch toggle.
    GrabToggle,
    /// The item gained keyboard focus.
    FocusGained,
    /// The item lost keyboard focus.
    FocusLost,
    /// Start dragging at the given position.
    BeginDrag {
        /// Position, page-relative.
        page: Point,
        /// Position relative to the dragged element.
        offset: Point,
    },
    /// The drag moved.
    Move {
        /// Position, page-relative.
        page: Point,
        /// Position relative to the dragged element.
        offset: Point,
    },
    /// The gesture ended without an explicit cancel.
    EndDrag,
    /// The gesture was explicitly cancelled.
    CancelDrag,
    /// A drag entered this item as a drop target.
    DropEnter {
        /// The dragged item.
        dragged: ItemKey,
    },
    /// A drag is moving over this item as a drop target.
    DropOver {
        /// The dragged item.
        dragged: ItemKey,
        /// Position, page-relative.
        page: Point,
        /// Position relative to this target element.
        offset: Point,
    },
    /// A drag left this item as a drop target.
    DropLeave {
        /// The dragged item.
        dragged: ItemKey,
    },
    /// A drop committed on this item as a drop target.
    DropCommit {
        /// The dragged item.
        dragged: ItemKey,
    },
}

// ---------------------------------------------------------------------------
// Machine
// ---------------------------------------------------------------------------

/// Logical drag tracking while a gesture is in flight.
#[derive(Debug, Clone, Copy)]
struct DragTrack {
    page: Point,
    offset: Point,
}

/// Per-item gesture machine.
#[derive(Debug)]
pub struct ItemGesture {
    key: ItemKey,
    config: ItemConfig,
    flags: InteractionFlags,
    /// Whether the held press landed on a valid handle. Meaningful only
    /// while `PRESSED`.
    press_armed: bool,
    drag: Option<DragTrack>,
    /// Terminal event already emitted for the current gesture.
    ended: bool,
}

impl ItemGesture {
    /// New machine for `key` with the given configuration.
    #[must_use]
    pub fn new(key: ItemKey, config: ItemConfig) -> Self {
        Self {
            key,
            config,
            flags: InteractionFlags::empty(),
            press_armed: false,
            drag: None,
            ended: false,
        }
    }

    /// The item this machine belongs to.
    #[must_use]
    pub const fn key(&self) -> ItemKey {
        self.key
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &ItemConfig {
        &self.config
    }

    /// Mutable configuration access (capability and scope edits take
    /// effect at the next check that reads them).
    pub fn config_mut(&mut self) -> &mut ItemConfig {
        &mut self.config
    }

    /// Transient interaction flags.
    #[must_use]
    pub const fn flags(&self) -> InteractionFlags {
        self.flags
    }

    /// Whether a drag is logically in flight on this item.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Observable phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        if self.drag.is_some() {
            GesturePhase::Dragging
        } else if self.grabbed() {
            GesturePhase::Grabbed
        } else if self.flags.contains(InteractionFlags::PRESSED) {
            GesturePhase::Pressed
        } else if self.flags.contains(InteractionFlags::HOVERED) {
            GesturePhase::Hovered
        } else {
            GesturePhase::Idle
        }
    }

    /// Set or clear the deferred visual dragging flag. Called by the
    /// orchestrator from the deferred queue, never inline.
    pub fn set_visual_dragging(&mut self, on: bool) {
        self.flags.set(InteractionFlags::DRAGGING, on);
    }

    /// Silently drop the drop-target highlight. End-of-session sweep for
    /// targets whose leave or commit never arrived.
    pub fn clear_drop_highlight(&mut self) {
        self.flags.remove(InteractionFlags::DRAGGED_OVER);
    }

    /// Drop all transient state without emitting anything (stale-item
    /// cleanup).
    pub fn reset(&mut self) {
        self.flags = InteractionFlags::empty();
        self.press_armed = false;
        self.drag = None;
        self.ended = false;
    }

    /// Feed one signal; returns the canonical events it produced.
    pub fn apply(&mut self, signal: &GestureSignal) -> Vec<GestureEvent> {
        match signal {
            GestureSignal::HoverIn => self.on_hover(true),
            GestureSignal::HoverOut => self.on_hover(false),
            GestureSignal::Press { part } => self.on_press(part.as_deref()),
            GestureSignal::Release => self.on_release(),
            GestureSignal::GrabToggle => self.on_grab_toggle(),
            GestureSignal::FocusGained => self.on_focus(true),
            GestureSignal::FocusLost => self.on_focus(false),
            GestureSignal::BeginDrag { page, offset } => self.on_begin_drag(*page, *offset),
            GestureSignal::Move { page, offset } => self.on_move(*page, *offset),
            GestureSignal::EndDrag => self.on_end(false),
            GestureSignal::CancelDrag => self.on_end(true),
            GestureSignal::DropEnter { dragged } => self.on_drop_enter(*dragged),
            GestureSignal::DropOver {
                dragged,
                page,
                offset,
            } => self.on_drop_over(*dragged, *page, *offset),
            GestureSignal::DropLeave { dragged } => self.on_drop_leave(*dragged),
            GestureSignal::DropCommit { dragged } => self.on_drop_commit(*dragged),
        }
    }

    // -- source side ------------------------------------------------------

    fn grabbed(&self) -> bool {
        if !self.config.capabilities.contains(Capabilities::DRAG) {
            return false;
        }
        (self.flags.contains(InteractionFlags::PRESSED) && self.press_armed)
            || (self.flags.contains(InteractionFlags::KEY_GRAB)
                && self.flags.contains(InteractionFlags::FOCUSED))
    }

    /// Recompute the derived grab flag, emitting the transition event.
    fn sync_grab(&mut self, events: &mut Vec<GestureEvent>) {
        let was = self.flags.contains(InteractionFlags::GRABBED);
        let now = self.grabbed();
        if was == now {
            return;
        }
        self.flags.set(InteractionFlags::GRABBED, now);
        if now {
            events.push(GestureEvent::Grab { item: self.key });
        } else if self.drag.is_none() && !self.ended {
            events.push(GestureEvent::Release { item: self.key });
        }
    }

    fn on_hover(&mut self, entered: bool) -> Vec<GestureEvent> {
        if self.drag.is_some() {
            return Vec::new();
        }
        self.flags.set(InteractionFlags::HOVERED, entered);
        Vec::new()
    }

    fn on_press(&mut self, part: Option<&str>) -> Vec<GestureEvent> {
        if self.drag.is_some() {
            return Vec::new();
        }
        self.flags.remove(InteractionFlags::HOVERED);
        self.flags.insert(InteractionFlags::PRESSED);
        self.press_armed = match (&self.config.handle, part) {
            (None, _) => true,
            (Some(handle), Some(part)) => handle == part,
            (Some(_), None) => false,
        };
        self.ended = false;

        let mut events = Vec::new();
        self.sync_grab(&mut events);
        events
    }

    fn on_release(&mut self) -> Vec<GestureEvent> {
        if self.drag.is_some() {
            return Vec::new();
        }
        if !self.flags.contains(InteractionFlags::PRESSED) {
            return Vec::new();
        }
        self.flags.remove(InteractionFlags::PRESSED);
        self.flags.insert(InteractionFlags::HOVERED);
        self.press_armed = false;

        let mut events = Vec::new();
        self.sync_grab(&mut events);
        events
    }

    fn on_grab_toggle(&mut self) -> Vec<GestureEvent> {
        if self.drag.is_some() {
            return Vec::new();
        }
        if !self.flags.contains(InteractionFlags::FOCUSED) {
            return Vec::new();
        }
        if !self.flags.contains(InteractionFlags::KEY_GRAB)
            && !self.config.capabilities.contains(Capabilities::DRAG)
        {
            return Vec::new();
        }
        self.flags.toggle(InteractionFlags::KEY_GRAB);
        if self.flags.contains(InteractionFlags::KEY_GRAB) {
            self.ended = false;
        }

        let mut events = Vec::new();
        self.sync_grab(&mut events);
        events
    }

    fn on_focus(&mut self, gained: bool) -> Vec<GestureEvent> {
        self.flags.set(InteractionFlags::FOCUSED, gained);
        if !gained {
            self.flags.remove(InteractionFlags::KEY_GRAB);
        }

        let mut events = Vec::new();
        self.sync_grab(&mut events);
        events
    }

    fn on_begin_drag(&mut self, page: Point, offset: Point) -> Vec<GestureEvent> {
        if self.drag.is_some() || !self.grabbed() {
            return Vec::new();
        }
        self.drag = Some(DragTrack { page, offset });
        self.ended = false;
        vec![GestureEvent::DragStart {
            item: self.key,
            page,
            offset,
        }]
    }

    fn on_move(&mut self, page: Point, offset: Point) -> Vec<GestureEvent> {
        let Some(track) = self.drag.as_mut() else {
            return Vec::new();
        };
        track.page = page;
        track.offset = offset;
        vec![GestureEvent::Drag {
            item: self.key,
            page,
            offset,
        }]
    }

    fn on_end(&mut self, cancelled: bool) -> Vec<GestureEvent> {
        if self.drag.is_none() || self.ended {
            return Vec::new();
        }
        self.drag = None;
        self.ended = true;
        self.press_armed = false;
        self.flags.remove(
            InteractionFlags::PRESSED | InteractionFlags::GRABBED | InteractionFlags::KEY_GRAB,
        );

        if cancelled {
            vec![
                GestureEvent::DragCancel { item: self.key },
                GestureEvent::DragEnd { item: self.key },
            ]
        } else {
            vec![GestureEvent::DragEnd { item: self.key }]
        }
    }

    // -- target side ------------------------------------------------------

    fn droppable(&self) -> bool {
        self.config.capabilities.contains(Capabilities::DROP)
    }

    fn on_drop_enter(&mut self, dragged: ItemKey) -> Vec<GestureEvent> {
        if !self.droppable() {
            return Vec::new();
        }
        self.flags.insert(InteractionFlags::DRAGGED_OVER);
        vec![GestureEvent::DragEnter {
            item: dragged,
            target: self.key,
        }]
    }

    fn on_drop_over(&mut self, dragged: ItemKey, page: Point, offset: Point) -> Vec<GestureEvent> {
        if !self.droppable() || !self.flags.contains(InteractionFlags::DRAGGED_OVER) {
            return Vec::new();
        }
        vec![GestureEvent::DragOver {
            item: dragged,
            target: self.key,
            page,
            offset,
        }]
    }

    fn on_drop_leave(&mut self, dragged: ItemKey) -> Vec<GestureEvent> {
        if !self.droppable() || !self.flags.contains(InteractionFlags::DRAGGED_OVER) {
            return Vec::new();
        }
        self.flags.remove(InteractionFlags::DRAGGED_OVER);
        vec![GestureEvent::DragLeave {
            item: dragged,
            target: self.key,
        }]
    }

    fn on_drop_commit(&mut self, dragged: ItemKey) -> Vec<GestureEvent> {
        if !self.droppable() || !self.flags.contains(InteractionFlags::DRAGGED_OVER) {
            return Vec::new();
        }
        self.flags.remove(InteractionFlags::DRAGGED_OVER);
        vec![GestureEvent::Drop {
            item: dragged,
            target: self.key,
        }]
    }
}

// ---------------------------------------------------------------------------
// Target tracking
// ---------------------------------------------------------------------------

/// Result of a retarget: who to leave and who to enter, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Retarget {
    /// Target that must receive a leave, if any.
    pub left: Option<ItemKey>,
    /// Target that must receive an enter, if any.
    pub entered: Option<ItemKey>,
}

/// Tracks the drop target currently under a synthesized drag (touch,
/// keyboard).
///
/// Feeding it the candidate under the pointer yields exactly one leave for
/// the old target followed by one enter for the new on every change, and
/// nothing on repeats — so an over is never addressed to a stale target.
#[derive(Debug, Default)]
pub struct TargetTracker {
    current: Option<ItemKey>,
}

impl TargetTracker {
    /// New tracker with no target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The target currently under the drag.
    #[must_use]
    pub const fn current(&self) -> Option<ItemKey> {
        self.current
    }

    /// Update with the candidate under the drag.
    pub fn retarget(&mut self, new: Option<ItemKey>) -> Retarget {
        if self.current == new {
            return Retarget::default();
        }
        let left = self.current;
        self.current = new;
        Retarget { left, entered: new }
    }

    /// Forget the current target, returning who to leave.
    pub fn clear(&mut self) -> Option<ItemKey> {
        self.current.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(key: u64) -> ItemGesture {
        ItemGesture::new(ItemKey(key), ItemConfig::new())
    }

    fn machine_with(key: u64, config: ItemConfig) -> ItemGesture {
        ItemGesture::new(ItemKey(key), config)
    }

    fn press() -> GestureSignal {
        GestureSignal::Press { part: None }
    }

    fn begin() -> GestureSignal {
        GestureSignal::BeginDrag {
            page: Point::new(5.0, 5.0),
            offset: Point::new(1.0, 1.0),
        }
    }

    /// Walk a machine into the dragging state.
    fn dragging(key: u64) -> ItemGesture {
        let mut m = machine(key);
        m.apply(&press());
        m.apply(&begin());
        assert!(m.is_dragging());
        m
    }

    // --- hover and press ---

    #[test]
    fn hover_toggles_phase() {
        let mut m = machine(1);
        assert_eq!(m.phase(), GesturePhase::Idle);
        m.apply(&GestureSignal::HoverIn);
        assert_eq!(m.phase(), GesturePhase::Hovered);
        m.apply(&GestureSignal::HoverOut);
        assert_eq!(m.phase(), GesturePhase::Idle);
    }

    #[test]
    fn press_clears_hover_release_restores_it() {
        let mut m = machine(1);
        m.apply(&GestureSignal::HoverIn);
        m.apply(&press());
        assert!(!m.flags().contains(InteractionFlags::HOVERED));
        m.apply(&GestureSignal::Release);
        assert!(m.flags().contains(InteractionFlags::HOVERED));
    }

    #[test]
    fn release_without_press_is_noop() {
        let mut m = machine(1);
        assert!(m.apply(&GestureSignal::Release).is_empty());
        assert_eq!(m.phase(), GesturePhase::Idle);
    }

    // --- grab derivation ---

    #[test]
    fn press_without_handle_grabs() {
        let mut m = machine(1);
        let events = m.apply(&press());
        assert_eq!(events, vec![GestureEvent::Grab { item: ItemKey(1) }]);
        assert_eq!(m.phase(), GesturePhase::Grabbed);
    }

    #[test]
    fn handle_gating_arms_only_matching_part() {
        let config = ItemConfig::new().with_handle("title");
        let mut m = machine_with(1, config.clone());
        m.apply(&GestureSignal::Press {
            part: Some("body".into()),
        });
        assert_eq!(m.phase(), GesturePhase::Pressed);

        let mut m = machine_with(1, config);
        let events = m.apply(&GestureSignal::Press {
            part: Some("title".into()),
        });
        assert_eq!(events, vec![GestureEvent::Grab { item: ItemKey(1) }]);
    }

    #[test]
    fn handle_with_unknown_part_stays_pressed() {
        let mut m = machine_with(1, ItemConfig::new().with_handle("title"));
        m.apply(&GestureSignal::Press { part: None });
        assert_eq!(m.phase(), GesturePhase::Pressed);
        assert!(m.apply(&begin()).is_empty());
    }

    #[test]
    fn release_of_grab_emits_release() {
        let mut m = machine(1);
        m.apply(&press());
        let events = m.apply(&GestureSignal::Release);
        assert_eq!(events, vec![GestureEvent::Release { item: ItemKey(1) }]);
    }

    #[test]
    fn non_draggable_item_never_grabs() {
        let caps = Capabilities::all() - Capabilities::DRAG;
        let mut m = machine_with(1, ItemConfig::new().with_capabilities(caps));
        assert!(m.apply(&press()).is_empty());
        assert_eq!(m.phase(), GesturePhase::Pressed);
        assert!(m.apply(&begin()).is_empty());
    }

    // --- keyboard grab latch ---

    #[test]
    fn grab_toggle_requires_focus() {
        let mut m = machine(1);
        assert!(m.apply(&GestureSignal::GrabToggle).is_empty());

        m.apply(&GestureSignal::FocusGained);
        let events = m.apply(&GestureSignal::GrabToggle);
        assert_eq!(events, vec![GestureEvent::Grab { item: ItemKey(1) }]);
        assert_eq!(m.phase(), GesturePhase::Grabbed);
    }

    #[test]
    fn grab_toggle_off_releases() {
        let mut m = machine(1);
        m.apply(&GestureSignal::FocusGained);
        m.apply(&GestureSignal::GrabToggle);
        let events = m.apply(&GestureSignal::GrabToggle);
        assert_eq!(events, vec![GestureEvent::Release { item: ItemKey(1) }]);
    }

    #[test]
    fn focus_loss_drops_latch() {
        let mut m = machine(1);
        m.apply(&GestureSignal::FocusGained);
        m.apply(&GestureSignal::GrabToggle);
        let events = m.apply(&GestureSignal::FocusLost);
        assert_eq!(events, vec![GestureEvent::Release { item: ItemKey(1) }]);
        assert_eq!(m.phase(), GesturePhase::Idle);
    }

    #[test]
    fn grab_toggle_on_non_draggable_is_negative() {
        let caps = Capabilities::all() - Capabilities::DRAG;
        let mut m = machine_with(1, ItemConfig::new().with_capabilities(caps));
        m.apply(&GestureSignal::FocusGained);
        assert!(m.apply(&GestureSignal::GrabToggle).is_empty());
    }

    // --- drag lifecycle ---

    #[test]
    fn full_pointer_sequence() {
        let mut m = machine(1);
        let mut log = Vec::new();
        log.extend(m.apply(&press()));
        log.extend(m.apply(&begin()));
        log.extend(m.apply(&GestureSignal::Move {
            page: Point::new(9.0, 9.0),
            offset: Point::new(1.0, 1.0),
        }));
        log.extend(m.apply(&GestureSignal::EndDrag));

        assert!(matches!(log[0], GestureEvent::Grab { .. }));
        assert!(matches!(log[1], GestureEvent::DragStart { .. }));
        assert!(matches!(log[2], GestureEvent::Drag { .. }));
        assert!(matches!(log[3], GestureEvent::DragEnd { .. }));
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn begin_without_grab_is_negative() {
        let mut m = machine(1);
        assert!(m.apply(&begin()).is_empty());
        assert_eq!(m.phase(), GesturePhase::Idle);
    }

    #[test]
    fn begin_twice_is_negative() {
        let mut m = dragging(1);
        assert!(m.apply(&begin()).is_empty());
    }

    #[test]
    fn move_without_drag_is_stale_noop() {
        let mut m = machine(1);
        assert!(
            m.apply(&GestureSignal::Move {
                page: Point::ZERO,
                offset: Point::ZERO,
            })
            .is_empty()
        );
    }

    #[test]
    fn cancel_emits_cancel_then_end() {
        let mut m = dragging(1);
        let events = m.apply(&GestureSignal::CancelDrag);
        assert_eq!(
            events,
            vec![
                GestureEvent::DragCancel { item: ItemKey(1) },
                GestureEvent::DragEnd { item: ItemKey(1) },
            ]
        );
    }

    #[test]
    fn exactly_one_drag_end() {
        let mut m = dragging(1);
        assert_eq!(m.apply(&GestureSignal::EndDrag).len(), 1);
        assert!(m.apply(&GestureSignal::EndDrag).is_empty());
        assert!(m.apply(&GestureSignal::CancelDrag).is_empty());
    }

    #[test]
    fn cancel_then_end_yields_one_end() {
        let mut m = dragging(1);
        let first = m.apply(&GestureSignal::CancelDrag);
        assert_eq!(first.len(), 2);
        assert!(m.apply(&GestureSignal::EndDrag).is_empty());
    }

    #[test]
    fn end_clears_grab_without_release_event() {
        let mut m = dragging(1);
        let events = m.apply(&GestureSignal::EndDrag);
        assert_eq!(events, vec![GestureEvent::DragEnd { item: ItemKey(1) }]);
        assert!(!m.flags().contains(InteractionFlags::GRABBED));
        assert!(!m.flags().contains(InteractionFlags::PRESSED));
    }

    #[test]
    fn hover_frozen_while_dragging() {
        let mut m = machine(1);
        m.apply(&GestureSignal::HoverIn);
        m.apply(&press());
        m.apply(&begin());
        m.apply(&GestureSignal::HoverOut);
        // The flag keeps whatever value it had at drag start.
        assert!(!m.flags().contains(InteractionFlags::HOVERED));
        m.apply(&GestureSignal::EndDrag);
        m.apply(&GestureSignal::HoverOut);
        assert!(!m.flags().contains(InteractionFlags::HOVERED));
    }

    #[test]
    fn new_gesture_after_end_works() {
        let mut m = dragging(1);
        m.apply(&GestureSignal::EndDrag);
        m.apply(&GestureSignal::Release);

        let events = m.apply(&press());
        assert_eq!(events, vec![GestureEvent::Grab { item: ItemKey(1) }]);
        let events = m.apply(&begin());
        assert_eq!(events.len(), 1);
    }

    // --- target side ---

    #[test]
    fn target_sequence_sets_and_clears_flag() {
        let mut m = machine(2);
        let dragged = ItemKey(1);

        let events = m.apply(&GestureSignal::DropEnter { dragged });
        assert_eq!(
            events,
            vec![GestureEvent::DragEnter {
                item: dragged,
                target: ItemKey(2)
            }]
        );
        assert!(m.flags().contains(InteractionFlags::DRAGGED_OVER));

        let events = m.apply(&GestureSignal::DropOver {
            dragged,
            page: Point::ZERO,
            offset: Point::ZERO,
        });
        assert!(matches!(events[0], GestureEvent::DragOver { .. }));

        let events = m.apply(&GestureSignal::DropLeave { dragged });
        assert_eq!(
            events,
            vec![GestureEvent::DragLeave {
                item: dragged,
                target: ItemKey(2)
            }]
        );
        assert!(!m.flags().contains(InteractionFlags::DRAGGED_OVER));
    }

    #[test]
    fn commit_emits_drop_and_clears_flag() {
        let mut m = machine(2);
        let dragged = ItemKey(1);
        m.apply(&GestureSignal::DropEnter { dragged });
        let events = m.apply(&GestureSignal::DropCommit { dragged });
        assert_eq!(
            events,
            vec![GestureEvent::Drop {
                item: dragged,
                target: ItemKey(2)
            }]
        );
        assert!(!m.flags().contains(InteractionFlags::DRAGGED_OVER));
    }

    #[test]
    fn non_droppable_target_ignores_everything() {
        let caps = Capabilities::all() - Capabilities::DROP;
        let mut m = machine_with(2, ItemConfig::new().with_capabilities(caps));
        let dragged = ItemKey(1);
        assert!(m.apply(&GestureSignal::DropEnter { dragged }).is_empty());
        assert!(m.apply(&GestureSignal::DropCommit { dragged }).is_empty());
        assert!(m.flags().is_empty());
    }

    #[test]
    fn drop_capability_rechecked_at_commit() {
        let mut m = machine(2);
        let dragged = ItemKey(1);
        m.apply(&GestureSignal::DropEnter { dragged });
        m.config_mut().capabilities.remove(Capabilities::DROP);
        assert!(m.apply(&GestureSignal::DropCommit { dragged }).is_empty());
    }

    #[test]
    fn target_signals_without_an_enter_are_swallowed() {
        // A suppressed enter (scope mismatch upstream) must also mute the
        // over/leave/commit that follow it.
        let mut m = machine(2);
        let dragged = ItemKey(1);
        assert!(
            m.apply(&GestureSignal::DropOver {
                dragged,
                page: Point::ZERO,
                offset: Point::ZERO,
            })
            .is_empty()
        );
        assert!(m.apply(&GestureSignal::DropLeave { dragged }).is_empty());
        assert!(m.apply(&GestureSignal::DropCommit { dragged }).is_empty());
        assert!(m.flags().is_empty());
    }

    // --- reset and visual flag ---

    #[test]
    fn reset_clears_everything_silently() {
        let mut m = dragging(1);
        m.set_visual_dragging(true);
        m.reset();
        assert!(m.flags().is_empty());
        assert!(!m.is_dragging());
        assert_eq!(m.phase(), GesturePhase::Idle);
    }

    #[test]
    fn visual_dragging_is_manager_driven() {
        let mut m = dragging(1);
        // Logical drag is on, visual flag is not yet.
        assert!(!m.flags().contains(InteractionFlags::DRAGGING));
        m.set_visual_dragging(true);
        assert!(m.flags().contains(InteractionFlags::DRAGGING));
        m.set_visual_dragging(false);
        assert!(!m.flags().contains(InteractionFlags::DRAGGING));
    }

    // --- target tracker ---

    #[test]
    fn tracker_enters_and_leaves_on_change() {
        let mut t = TargetTracker::new();
        assert_eq!(
            t.retarget(Some(ItemKey(1))),
            Retarget {
                left: None,
                entered: Some(ItemKey(1))
            }
        );
        assert_eq!(
            t.retarget(Some(ItemKey(2))),
            Retarget {
                left: Some(ItemKey(1)),
                entered: Some(ItemKey(2))
            }
        );
        assert_eq!(t.current(), Some(ItemKey(2)));
    }

    #[test]
    fn tracker_is_quiet_on_repeat() {
        let mut t = TargetTracker::new();
        t.retarget(Some(ItemKey(1)));
        assert_eq!(t.retarget(Some(ItemKey(1))), Retarget::default());
    }

    #[test]
    fn tracker_leaves_on_none_and_clear() {
        let mut t = TargetTracker::new();
        t.retarget(Some(ItemKey(1)));
        assert_eq!(
            t.retarget(None),
            Retarget {
                left: Some(ItemKey(1)),
                entered: None
            }
        );
        t.retarget(Some(ItemKey(2)));
        assert_eq!(t.clear(), Some(ItemKey(2)));
        assert_eq!(t.current(), None);
    }
}
