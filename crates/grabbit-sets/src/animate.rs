#![forbid(unsafe_code)]

//! Reorder animation planning.
//!
//! After a set mutates, elements that changed slots should appear to slide
//! from where they were into where they are. The planner works backwards
//! from the *previous* order: for each key, the item now occupying its old
//! slot marks where the key should appear to start. Resolving a plan turns
//! those anchors into concrete offsets against live geometry, which the
//! host applies as an initial displacement and animates back to zero.
//!
//! # Invariants
//!
//! - Planning is pure: no geometry is consulted until [`resolve_moves`].
//! - A key absent from the current order is never planned (it left the
//!   set; the destination set plans its arrival, if at all).
//! - A key whose old slot no longer exists, or is still occupied by
//!   itself, did not visually move and is skipped.
//!
//! # Design Notes
//!
//! Geometry is sampled once, at resolve time, after the host re-rendered
//! the new order. Items the host cannot measure are dropped from the plan
//! rather than animated from a guessed position.

use grabbit_core::geometry::Rect;
use grabbit_core::item::ItemKey;

use crate::host::ResolvedMove;

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// One planned slide: `key` starts from wherever `start_anchor` is now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemMove {
    /// Element to animate.
    pub key: ItemKey,
    /// Item whose current rectangle is the starting position.
    pub start_anchor: ItemKey,
}

/// Plan the visual moves for an order change.
///
/// Iterates `previous`; for each key still present in `current`, the item
/// now sitting at the key's old index anchors its starting position.
/// Unmoved keys and keys whose old index fell off the end produce nothing.
#[must_use]
pub fn plan_moves(previous: &[ItemKey], current: &[ItemKey]) -> Vec<ItemMove> {
    let mut plan = Vec::new();
    for (old_index, key) in previous.iter().enumerate() {
        if !current.contains(key) {
            continue;
        }
        let Some(occupant) = current.get(old_index) else {
            continue;
        };
        if occupant == key {
            continue;
        }
        plan.push(ItemMove {
            key: *key,
            start_anchor: *occupant,
        });
    }
    plan
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve a plan against live geometry.
///
/// `rect_of` answers the post-render rectangle of an item. Moves whose key
/// or anchor cannot be measured are dropped. The offset points from the
/// element's rest position to its starting position.
#[must_use]
pub fn resolve_moves(
    plan: &[ItemMove],
    rect_of: impl Fn(ItemKey) -> Option<Rect>,
) -> Vec<ResolvedMove> {
    plan.iter()
        .filter_map(|mv| {
            let own = rect_of(mv.key)?;
            let anchor = rect_of(mv.start_anchor)?;
            Some(ResolvedMove {
                key: mv.key,
                offset: anchor.origin().delta(own.origin()),
            })
        })
        .collect()
}
