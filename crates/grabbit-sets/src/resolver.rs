#![forbid(unsafe_code)]

//! Directional target resolution for keyboard navigation and dragging.
//!
//! Pure geometry over a snapshot the caller provides: no rectangle is ever
//! cached here, so callers must query their geometry provider fresh at
//! each resolution. Nearest-in-direction semantics match directional form
//! navigation and do not wrap around list boundaries.
//!
//! # Algorithm
//!
//! Displacement is measured between top-left corners. For each candidate:
//!
//! 1. `along = dot(direction, displacement)`; candidates with
//!    `along <= extent` are discarded, where `extent` is the origin's own
//!    size on the movement axis. This keeps only candidates strictly
//!    beyond the origin, not overlapping it along the axis.
//! 2. `cross = |dot(perpendicular, displacement)|` measures lateral
//!    misalignment and breaks ties.
//! 3. Candidates rank ascending by `(along, cross)`.
//!
//! Scope filtering is the caller's job: during a grabbed drag the
//! candidate list is pre-filtered to scope-compatible drop targets, while
//! plain focus movement passes every neighbor.

use grabbit_core::geometry::{Direction, Rect};
use grabbit_core::item::ItemKey;

/// All candidates strictly in `direction` from `origin`, nearest first.
///
/// `candidates` must not include the origin item itself.
#[must_use]
pub fn rank(origin: Rect, direction: Direction, candidates: &[(ItemKey, Rect)]) -> Vec<ItemKey> {
    let (ux, uy) = direction.unit();
    let extent = if direction.is_horizontal() {
        origin.width
    } else {
        origin.height
    };

    let mut scored: Vec<(f32, f32, ItemKey)> = candidates
        .iter()
        .filter_map(|&(key, rect)| {
            let disp = rect.origin().delta(origin.origin());
            let along = ux * disp.x + uy * disp.y;
            if along <= extent {
                return None;
            }
            let cross = (-uy * disp.x + ux * disp.y).abs();
            Some((along, cross, key))
        })
        .collect();

    scored.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    scored.into_iter().map(|(_, _, key)| key).collect()
}

/// The nearest candidate strictly in `direction` from `origin`, if any.
///
/// ```
/// use grabbit_core::geometry::{Direction, Rect};
/// use grabbit_core::item::ItemKey;
/// use grabbit_sets::resolver::resolve;
///
/// let origin = Rect::new(0.0, 0.0, 10.0, 10.0);
/// let candidates = [
///     (ItemKey(1), Rect::new(20.0, 0.0, 10.0, 10.0)),
///     (ItemKey(2), Rect::new(0.0, 20.0, 10.0, 10.0)),
/// ];
/// assert_eq!(resolve(origin, Direction::Right, &candidates), Some(ItemKey(1)));
/// assert_eq!(resolve(origin, Direction::Down, &candidates), Some(ItemKey(2)));
/// assert_eq!(resolve(origin, Direction::Left, &candidates), None);
/// ```
#[must_use]
pub fn resolve(
    origin: Rect,
    direction: Direction,
    candidates: &[(ItemKey, Rect)],
) -> Option<ItemKey> {
    rank(origin, direction, candidates).into_iter().next()
}
