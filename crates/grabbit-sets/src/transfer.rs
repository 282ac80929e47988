#![forbid(unsafe_code)]

//! Cross-set transfer of the dragged item.
//!
//! When a drag enters a target belonging to a different set than the one
//! currently hosting the dragged item, the coordinator moves the item
//! atomically: remove from the hosting set, insert into the entered set at
//! the hovered target's position, and repoint the session's source set so
//! subsequent drag-overs route to the new host. One crossing performs at
//! most one reassignment; entering another target of the same set is not a
//! crossing.
//!
//! The session's source-set pointer is owned here — no other code
//! reassigns which set hosts the dragged item mid-gesture.
//!
//! # Invariants
//!
//! - After a completed transfer the item is present in exactly one set.
//!   A state where it would end up in zero or two is reported as a fatal
//!   [`TransferError`] and nothing is mutated.
//! - The entered set's pre-transfer order is captured into the session
//!   before insertion, so a later revert can undo the adoption. The first
//!   capture per set wins across repeated crossings.
//!
//! Eligibility is the caller's business: scope matching and capability
//! checks happen before a transfer is requested.

use std::fmt;

use grabbit_core::item::{ItemKey, SetId};
use grabbit_core::session::DragSession;

use crate::set::{ItemSet, OrderChange};

/// What one completed transfer did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    /// Set the item left.
    pub from: SetId,
    /// Set the item joined.
    pub to: SetId,
    /// Position the item was inserted at in the new set.
    pub index: usize,
    /// Before/after order of the set the item left.
    pub source_change: OrderChange,
    /// Before/after order of the set the item joined.
    pub dest_change: OrderChange,
}

/// Fatal membership invariant violations.
///
/// These indicate a broken registry, not an input race, and must surface
/// to the caller rather than be repaired silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferError {
    /// The item is already present in the destination; inserting would
    /// leave it in two sets.
    Duplicate {
        /// The dragged item.
        item: ItemKey,
        /// The destination set that already contains it.
        set: SetId,
    },
    /// The item is missing from the set the session says hosts it;
    /// removing would leave it in zero sets.
    Orphaned {
        /// The dragged item.
        item: ItemKey,
        /// The set that should have contained it.
        expected: SetId,
    },
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::Duplicate { item, set } => {
                write!(f, "item {item:?} already present in destination {set:?}")
            }
            TransferError::Orphaned { item, expected } => {
                write!(f, "item {item:?} missing from hosting set {expected:?}")
            }
        }
    }
}

impl std::error::Error for TransferError {}

/// Broker for cross-set handoff during one drag session.
#[derive(Debug, Default)]
pub struct TransferCoordinator;

impl TransferCoordinator {
    /// New coordinator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Move the session's dragged item from `source` into `dest` at the
    /// position of the hovered `target`, if this enter is a boundary
    /// crossing.
    ///
    /// Returns `Ok(None)` when there is nothing to do: the entered set
    /// already hosts the item, the caller routed a set that is not the
    /// current host, or `target` is no longer a member of `dest` (a stale
    /// event).
    ///
    /// # Errors
    ///
    /// [`TransferError`] when completing the move would violate the
    /// exactly-one-set membership invariant; no mutation happens.
    pub fn transfer(
        &self,
        session: &mut DragSession,
        source: &mut ItemSet,
        dest: &mut ItemSet,
        target: ItemKey,
    ) -> Result<Option<TransferOutcome>, TransferError> {
        let dragged = session.dragged;
        if dest.id() == session.source_set || source.id() != session.source_set {
            return Ok(None);
        }
        let Some(index) = dest.index_of(target) else {
            return Ok(None);
        };

        // Validate both memberships before touching either order.
        if !source.contains(dragged) {
            return Err(TransferError::Orphaned {
                item: dragged,
                expected: source.id(),
            });
        }
        if dest.contains(dragged) {
            return Err(TransferError::Duplicate {
                item: dragged,
                set: dest.id(),
            });
        }

        session.snapshot_order(dest.id(), dest.order());

        let source_previous = source.order().to_vec();
        let dest_previous = dest.order().to_vec();
        source.remove(dragged);
        dest.insert_at(index, dragged);
        session.source_set = dest.id();

        Ok(Some(TransferOutcome {
            from: source.id(),
            to: dest.id(),
            index,
            source_change: OrderChange {
                previous: source_previous,
                current: source.order().to_vec(),
            },
            dest_change: OrderChange {
                previous: dest_previous,
                current: dest.order().to_vec(),
            },
        }))
    }
}
