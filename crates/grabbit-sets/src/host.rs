#![forbid(unsafe_code)]

//! Host collaborator contracts.
//!
//! The engine is headless: everything visual or platform-bound crosses one
//! of the traits here. A host implements all four on a single type (every
//! method has a default, so a pure-logic host implements nothing) and
//! passes it to the manager per dispatch; [`DragDropHost`] is the blanket
//! umbrella the manager bounds on.
//!
//! - [`GeometryProvider`] answers fresh bounding boxes; results are never
//!   cached across gesture steps.
//! - [`GhostHost`] owns the visual drag proxy. Removal is idempotent and a
//!   move after removal is a tolerated no-op.
//! - [`Animator`] receives before/after orders plus resolved start
//!   offsets; it reports completion through a ticket the host later hands
//!   back to the manager.
//! - [`DragDropHooks`] is the notification sink for every lifecycle
//!   payload.

use grabbit_core::geometry::{Point, Rect};
use grabbit_core::item::{DropEffect, ItemKey, SetId};
use grabbit_core::scope::Scope;

use crate::set::{DropReport, OrderChange};

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Fresh bounding boxes for registered items.
pub trait GeometryProvider {
    /// Current page-relative rectangle of `item`, if the host renders it.
    ///
    /// Hosts that never use touch hit-testing, keyboard stepping, or
    /// animation can leave the default.
    fn rect_of(&self, item: ItemKey) -> Option<Rect> {
        let _ = item;
        None
    }
}

// ---------------------------------------------------------------------------
// Ghost
// ---------------------------------------------------------------------------

/// Visual drag proxy lifecycle.
pub trait GhostHost {
    /// Create a proxy for the dragged item.
    fn ghost_create(&mut self, item: ItemKey, page: Point, offset: Point) {
        let _ = (item, page, offset);
    }

    /// Reposition the proxy. May be called after removal; treat as no-op.
    fn ghost_move(&mut self, item: ItemKey, page: Point, offset: Point) {
        let _ = (item, page, offset);
    }

    /// Remove the proxy. Must be idempotent.
    fn ghost_remove(&mut self, item: ItemKey) {
        let _ = item;
    }
}

// ---------------------------------------------------------------------------
// Animation
// ---------------------------------------------------------------------------

/// Opaque handle for one in-flight animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationTicket(pub u64);

/// A planned visual move: the element to animate and where it starts.
///
/// `offset` is the displacement to apply to the element before animating
/// it back to its natural (zero-offset) position — it points from the
/// element's current rectangle to the rectangle of whichever item now
/// occupies its old slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMove {
    /// Element to animate.
    pub key: ItemKey,
    /// Initial displacement from the rest position.
    pub offset: Point,
}

/// Reorder animation runner.
pub trait Animator {
    /// Start animating `moves` for a mutated set.
    ///
    /// Return `Some(ticket)` to run asynchronously — the host must later
    /// call the manager's `animation_finished` with the same ticket — or
    /// `None` when the animation completed synchronously (or is skipped).
    fn animate(
        &mut self,
        set: SetId,
        change: &OrderChange,
        moves: &[ResolvedMove],
    ) -> Option<AnimationTicket> {
        let _ = (set, change, moves);
        None
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Everything known at the instant a drag starts, for payload priming.
#[derive(Debug, Clone, PartialEq)]
pub struct DragStartData {
    /// The dragged item.
    pub dragged: ItemKey,
    /// Set the gesture started in.
    pub set: SetId,
    /// Scope the drag offers, resolved once at start.
    pub scope: Scope,
    /// Platform transfer-effect hint of the dragged item.
    pub effect: DropEffect,
    /// Pointer position, page-relative.
    pub page: Point,
    /// Pointer position relative to the dragged element.
    pub offset: Point,
}

/// Lifecycle notification sink. Every method defaults to a no-op.
pub trait DragDropHooks {
    /// An item became grabbed (held and eligible to drag).
    fn after_grab(&mut self, item: ItemKey) {
        let _ = item;
    }

    /// A grabbed item was released without having dragged.
    fn after_release(&mut self, item: ItemKey) {
        let _ = item;
    }

    /// A drag session opened. Native-pointer hosts prime their platform
    /// payload here.
    fn drag_started(&mut self, data: &DragStartData) {
        let _ = data;
    }

    /// The drag position updated.
    fn drag_moved(&mut self, item: ItemKey, page: Point, offset: Point) {
        let _ = (item, page, offset);
    }

    /// A drag-over reordered a set.
    fn after_drag_over(&mut self, set: SetId, dragged: ItemKey, target: ItemKey, change: &OrderChange) {
        let _ = (set, dragged, target, change);
    }

    /// The dragged item left a set through a cross-set transfer.
    fn after_drag_out(&mut self, set: SetId, item: ItemKey, change: &OrderChange) {
        let _ = (set, item, change);
    }

    /// The dragged item joined a set through a cross-set transfer.
    fn after_drag_in(&mut self, set: SetId, item: ItemKey, index: usize, change: &OrderChange) {
        let _ = (set, item, index, change);
    }

    /// A finished gesture restored a set's starting order.
    fn after_revert(&mut self, set: SetId, change: &OrderChange) {
        let _ = (set, change);
    }

    /// Terminal outcome of an uncancelled gesture, reported once on the
    /// origin set.
    fn after_drop(&mut self, set: SetId, report: &DropReport) {
        let _ = (set, report);
    }

    /// Terminal outcome of a cancelled gesture, reported once on the
    /// origin set.
    fn after_cancel(&mut self, set: SetId, report: &DropReport) {
        let _ = (set, report);
    }

    /// The deferred visual dragging flag was applied.
    fn dragging_changed(&mut self, item: ItemKey, dragging: bool) {
        let _ = (item, dragging);
    }

    /// The host should return keyboard focus to the item (after-render
    /// tier, once re-rendering settled).
    fn focus_restored(&mut self, item: ItemKey) {
        let _ = item;
    }
}

/// Umbrella bound for everything a host provides.
pub trait DragDropHost: GeometryProvider + GhostHost + Animator + DragDropHooks {}

impl<T: GeometryProvider + GhostHost + Animator + DragDropHooks> DragDropHost for T {}

/// Host that renders nothing and listens to nothing.
#[derive(Debug, Default)]
pub struct NullHost;

impl GeometryProvider for NullHost {}
impl GhostHost for NullHost {}
impl Animator for NullHost {}
impl DragDropHooks for NullHost {}
