#![forbid(unsafe_code)]

//! Sets: ordered collections, reorder strategies, and orchestration.
//!
//! # Role in grabbit
//! `grabbit-sets` turns the canonical gesture stream from `grabbit-core`
//! into list mutations. It owns the ordered item sets, the insertion and
//! swap reorder strategies, revert policies, directional target
//! resolution, cross-set transfer, slide-animation planning, and the
//! [`DragManager`] that wires all of it to a host.
//!
//! # Primary responsibilities
//! - **ItemSet**: an ordered set with a reorder strategy and revert
//!   policy; pure list algebra, no session knowledge.
//! - **resolver**: nearest-target ranking along a direction, for keyboard
//!   stepping.
//! - **TransferCoordinator**: membership-safe moves between sets during a
//!   drag.
//! - **plan_moves / resolve_moves**: backwards-planned slide animations
//!   resolved against post-render geometry.
//! - **DragManager**: registration, dispatch, scope admission, session
//!   bookkeeping, deferred work, and host notification.
//!
//! # How it fits in the system
//! Hosts implement the traits in [`host`] (all methods defaulted), feed
//! input through [`DragManager::dispatch`], re-render the orders they
//! observe, and call [`DragManager::flush_deferred`]. The `grabbit`
//! facade re-exports both layers as one surface.

pub mod animate;
pub mod error;
pub mod host;
pub mod manager;
pub mod resolver;
pub mod set;
pub mod transfer;

pub use animate::{ItemMove, plan_moves, resolve_moves};
pub use error::{DragDropError, Result};
pub use host::{
    AnimationTicket, Animator, DragDropHooks, DragDropHost, DragStartData, GeometryProvider,
    GhostHost, NullHost, ResolvedMove,
};
pub use manager::DragManager;
pub use set::{DropReport, ItemSet, OrderChange, ReorderStrategy, RevertPolicy, SetConfig};
pub use transfer::{TransferCoordinator, TransferError, TransferOutcome};
