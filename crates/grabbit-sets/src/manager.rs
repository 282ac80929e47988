#![forbid(unsafe_code)]

//! Drag-and-drop orchestrator.
//!
//! [`DragManager`] owns everything the interaction needs to stay
//! coherent: one gesture machine per item, set membership, the single
//! session slot, the modality adapters, and the deferred work queue. A
//! host feeds it raw [`InputEvent`]s and gets back mutated orders, hook
//! notifications, and deferred work to flush after rendering.
//!
//! # Invariants
//!
//! - At most one drag session exists at any time. Adapters suppress
//!   competing starts; a start that still reaches an occupied slot is
//!   state corruption and surfaces as an error.
//! - Canonical event order per gesture: grab, drag start, any number of
//!   moves and target events, at most one drop, exactly one drag end.
//! - Events naming unregistered items are absorbed silently. The `Err`
//!   channel is reserved for invariant violations and registration
//!   misuse.
//! - A cross-set transfer moves the dragged item's membership at the
//!   moment it enters the foreign set, never at drop time.
//!
//! # Design Notes
//!
//! Dispatch is two-phase. Translation borrows the manager immutably (the
//! adapter consults geometry, phases, and the active session through
//! [`AdapterContext`]); routing then feeds the resulting signals through
//! the machines with full mutable access. This keeps adapters blind to
//! orchestration and machines blind to modality.
//!
//! Reorders mutate immediately. Visual side effects (the dragging flag,
//! focus restoration, slide animations) queue into two tiers and run at
//! [`DragManager::flush_deferred`], which the host calls after it has
//! re-rendered; animations resolve against post-render geometry.
//!
//! # Failure Modes
//!
//! A returned error means interaction state can no longer be trusted.
//! [`DragManager::reset_interactions`] restores quiescence without
//! touching registered orders.

use ahash::AHashMap;

use grabbit_core::defer::{DeferPhase, DeferQueue, DeferredAction};
use grabbit_core::event::{InputEvent, InputModality};
use grabbit_core::geometry::{Direction, Point, Rect};
use grabbit_core::gesture::{GestureSignal, ItemGesture};
use grabbit_core::item::{Capabilities, InteractionFlags, ItemConfig, ItemKey, SetId};
use grabbit_core::lifecycle::{GestureEvent, GesturePhase};
use grabbit_core::modality::{
    AdapterContext, KeyboardAdapter, KeyboardBindings, Modality, PointerAdapter, RoutedSignal,
    TouchAdapter,
};
use grabbit_core::scope::Scope;
use grabbit_core::session::{DragSession, SessionSlot};
use grabbit_core::{debug, trace};

use crate::animate::{plan_moves, resolve_moves};
use crate::error::{DragDropError, Result};
use crate::host::{AnimationTicket, DragDropHost, DragStartData, GeometryProvider};
use crate::resolver;
use crate::set::{DropReport, ItemSet, OrderChange, RevertPolicy};
use crate::transfer::TransferCoordinator;

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

/// Headless drag-and-drop orchestrator over any number of item sets.
#[derive(Debug)]
pub struct DragManager {
    machines: AHashMap<ItemKey, ItemGesture>,
    membership: AHashMap<ItemKey, SetId>,
    /// Registration order doubles as hit-test z-order.
    sets: Vec<ItemSet>,
    slot: SessionSlot,
    queue: DeferQueue,
    pointer: PointerAdapter,
    touch: TouchAdapter,
    keyboard: KeyboardAdapter,
    coordinator: TransferCoordinator,
    /// In-flight animation tickets and the set each one belongs to.
    animating: AHashMap<u64, SetId>,
}

impl DragManager {
    /// Empty manager with default keyboard bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_keyboard_bindings(KeyboardBindings::new())
    }

    /// Empty manager with custom keyboard bindings.
    #[must_use]
    pub fn with_keyboard_bindings(bindings: KeyboardBindings) -> Self {
        Self {
            machines: AHashMap::new(),
            membership: AHashMap::new(),
            sets: Vec::new(),
            slot: SessionSlot::new(),
            queue: DeferQueue::new(),
            pointer: PointerAdapter::new(),
            touch: TouchAdapter::new(),
            keyboard: KeyboardAdapter::with_bindings(bindings),
            coordinator: TransferCoordinator::new(),
            animating: AHashMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Register a set. Keys already in its order get default-configured
    /// machines; use [`register_item`] for per-item configuration.
    ///
    /// [`register_item`]: DragManager::register_item
    pub fn add_set(&mut self, set: ItemSet) -> Result<()> {
        if self.sets.iter().any(|s| s.id() == set.id()) {
            return Err(DragDropError::DuplicateSet { set: set.id() });
        }
        for key in set.order() {
            if let Some(owner) = self.membership.get(key) {
                return Err(DragDropError::DuplicateItem {
                    item: *key,
                    set: *owner,
                });
            }
        }
        for key in set.order() {
            self.machines.insert(*key, ItemGesture::new(*key, ItemConfig::new()));
            self.membership.insert(*key, set.id());
        }
        self.sets.push(set);
        Ok(())
    }

    /// Register an item at the end of a set's order.
    pub fn register_item(&mut self, key: ItemKey, set: SetId, config: ItemConfig) -> Result<()> {
        if let Some(owner) = self.membership.get(&key) {
            return Err(DragDropError::DuplicateItem { item: key, set: *owner });
        }
        let Some(target) = self.sets.iter_mut().find(|s| s.id() == set) else {
            return Err(DragDropError::UnknownSet { set });
        };
        target.push(key);
        self.machines.insert(key, ItemGesture::new(key, config));
        self.membership.insert(key, set);
        Ok(())
    }

    /// Register an item at `index` in a set's order, clamped to the end.
    pub fn insert_item_at(
        &mut self,
        key: ItemKey,
        set: SetId,
        index: usize,
        config: ItemConfig,
    ) -> Result<()> {
        if let Some(owner) = self.membership.get(&key) {
            return Err(DragDropError::DuplicateItem { item: key, set: *owner });
        }
        let Some(target) = self.sets.iter_mut().find(|s| s.id() == set) else {
            return Err(DragDropError::UnknownSet { set });
        };
        target.insert_at(index, key);
        self.machines.insert(key, ItemGesture::new(key, config));
        self.membership.insert(key, set);
        Ok(())
    }

    /// Unregister an item. Unknown keys are a no-op.
    ///
    /// Removing the item a live session is dragging aborts the session
    /// silently: no terminal hooks fire because no clean terminal exists.
    pub fn remove_item<H: DragDropHost>(&mut self, key: ItemKey, host: &mut H) {
        if self.machines.remove(&key).is_none() {
            return;
        }
        if let Some(set_id) = self.membership.remove(&key)
            && let Some(set) = self.sets.iter_mut().find(|s| s.id() == set_id)
        {
            set.remove(key);
        }
        if self.slot.dragged() == Some(key) {
            self.abort_session(key, host);
        }
    }

    /// Unregister a whole set and every item it holds. Unknown ids are a
    /// no-op.
    ///
    /// Removing the set whose member a live session is dragging aborts
    /// the session the way [`remove_item`] does; in-flight animation
    /// tickets for the set are discarded.
    ///
    /// [`remove_item`]: DragManager::remove_item
    pub fn remove_set<H: DragDropHost>(&mut self, id: SetId, host: &mut H) {
        let Some(index) = self.sets.iter().position(|s| s.id() == id) else {
            return;
        };
        let set = self.sets.remove(index);
        for key in set.order() {
            self.machines.remove(key);
            self.membership.remove(key);
        }
        self.animating.retain(|_, owner| *owner != id);
        if let Some(dragged) = self.slot.dragged()
            && !self.machines.contains_key(&dragged)
        {
            self.abort_session(dragged, host);
        }
    }

    /// Tear a session down with no terminal hooks: the dragged item left
    /// the registry, so no clean terminal exists.
    fn abort_session<H: DragDropHost>(&mut self, item: ItemKey, host: &mut H) {
        debug!(item = item.0, "dragged item unregistered, session aborted");
        self.slot.release();
        self.touch.reset();
        self.keyboard.reset();
        host.ghost_remove(item);
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// A registered set.
    #[must_use]
    pub fn set(&self, id: SetId) -> Option<&ItemSet> {
        self.sets.iter().find(|s| s.id() == id)
    }

    /// Mutable access to a registered set.
    pub fn set_mut(&mut self, id: SetId) -> Option<&mut ItemSet> {
        self.sets.iter_mut().find(|s| s.id() == id)
    }

    /// Current order of a set.
    #[must_use]
    pub fn order_of(&self, id: SetId) -> Option<&[ItemKey]> {
        self.set(id).map(ItemSet::order)
    }

    /// Set an item currently belongs to.
    #[must_use]
    pub fn set_of(&self, key: ItemKey) -> Option<SetId> {
        self.membership.get(&key).copied()
    }

    /// An item's configuration.
    #[must_use]
    pub fn item_config(&self, key: ItemKey) -> Option<&ItemConfig> {
        self.machines.get(&key).map(ItemGesture::config)
    }

    /// Mutable access to an item's configuration. Scope and capability
    /// edits take effect at the next check that reads them.
    pub fn item_config_mut(&mut self, key: ItemKey) -> Option<&mut ItemConfig> {
        self.machines.get_mut(&key).map(ItemGesture::config_mut)
    }

    /// Observable phase of an item.
    #[must_use]
    pub fn phase_of(&self, key: ItemKey) -> GesturePhase {
        self.machines.get(&key).map_or(GesturePhase::Idle, ItemGesture::phase)
    }

    /// Transient interaction flags of an item, for styling. Unknown keys
    /// read as empty.
    #[must_use]
    pub fn flags_of(&self, key: ItemKey) -> InteractionFlags {
        self.machines
            .get(&key)
            .map_or(InteractionFlags::empty(), ItemGesture::flags)
    }

    /// The dragged item of the active session, if one is in flight.
    #[must_use]
    pub fn active_drag(&self) -> Option<ItemKey> {
        self.slot.dragged()
    }

    /// The active session, if one is in flight.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.slot.get()
    }

    /// Whether deferred work is waiting for [`flush_deferred`].
    ///
    /// [`flush_deferred`]: DragManager::flush_deferred
    #[must_use]
    pub fn has_deferred_work(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Whether any reorder animation is still in flight.
    #[must_use]
    pub fn any_animating(&self) -> bool {
        !self.animating.is_empty()
    }

    /// Whether a reorder animation is in flight for one specific set.
    #[must_use]
    pub fn is_animating(&self, set: SetId) -> bool {
        self.animating.values().any(|owner| *owner == set)
    }

    /// Mark a host-run animation as finished. Returns whether the ticket
    /// was known; stale tickets are a no-op.
    pub fn animation_finished(&mut self, ticket: AnimationTicket) -> bool {
        self.animating.remove(&ticket.0).is_some()
    }

    /// Drop all transient interaction state: the session, adapters,
    /// machine flags, queued work, and animation tickets. Registered sets
    /// keep their current orders.
    pub fn reset_interactions(&mut self) {
        self.slot.release();
        self.queue = DeferQueue::new();
        self.pointer.reset();
        self.touch.reset();
        self.keyboard.reset();
        for machine in self.machines.values_mut() {
            machine.reset();
        }
        self.animating.clear();
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Feed one input event.
    ///
    /// Returns the item the host should move keyboard focus to, if the
    /// event implies focus movement. An `Err` means interaction state is
    /// corrupt; see [`reset_interactions`].
    ///
    /// [`reset_interactions`]: DragManager::reset_interactions
    pub fn dispatch<H: DragDropHost>(
        &mut self,
        event: &InputEvent,
        host: &mut H,
    ) -> Result<Option<ItemKey>> {
        if !self.machines.contains_key(&event.item()) {
            trace!(item = event.item().0, "event for unregistered item dropped");
            return Ok(None);
        }
        if !self.admits(event) {
            return Ok(None);
        }

        let effects = {
            let ctx = CtxView {
                machines: &self.machines,
                membership: &self.membership,
                sets: &self.sets,
                slot: &self.slot,
                host: &*host,
            };
            match event.modality() {
                InputModality::Pointer => self.pointer.translate(event, &ctx),
                InputModality::Touch => self.touch.translate(event, &ctx),
                InputModality::Keyboard => self.keyboard.translate(event, &ctx),
            }
        };

        for routed in &effects.signals {
            self.route_signal(routed, host)?;
        }
        Ok(effects.focus_request)
    }

    /// Gesture initiation gates. Continuations of an active sequence
    /// always flow; otherwise touch and keyboard honor per-item
    /// capabilities, per-set toggles, and the animation lock.
    fn admits(&self, event: &InputEvent) -> bool {
        match event {
            InputEvent::TouchStart { item, .. } => {
                !self.any_animating() && self.touch_enabled(*item)
            }
            InputEvent::Key { item, .. } => {
                if !self.keyboard_enabled(*item) {
                    return false;
                }
                // Keys that steer the live session keep working while an
                // animation plays; fresh grabs wait it out.
                self.slot.is_active() || !self.any_animating()
            }
            _ => true,
        }
    }

    fn touch_enabled(&self, item: ItemKey) -> bool {
        self.machines
            .get(&item)
            .is_some_and(|m| m.config().capabilities.contains(Capabilities::TOUCH))
            && self
                .membership
                .get(&item)
                .and_then(|id| self.set(*id))
                .is_some_and(|s| s.config().enable_touch)
    }

    fn keyboard_enabled(&self, item: ItemKey) -> bool {
        self.machines
            .get(&item)
            .is_some_and(|m| m.config().capabilities.contains(Capabilities::KEYBOARD))
            && self
                .membership
                .get(&item)
                .and_then(|id| self.set(*id))
                .is_some_and(|s| s.config().enable_keyboard)
    }

    // -----------------------------------------------------------------------
    // Routing
    // -----------------------------------------------------------------------

    fn route_signal<H: DragDropHost>(
        &mut self,
        routed: &RoutedSignal,
        host: &mut H,
    ) -> Result<()> {
        let item = routed.item;
        let signal = &routed.signal;

        // Target-side signals are only meaningful inside the session that
        // produced them.
        if let GestureSignal::DropEnter { dragged }
        | GestureSignal::DropOver { dragged, .. }
        | GestureSignal::DropLeave { dragged }
        | GestureSignal::DropCommit { dragged } = signal
            && self.slot.dragged() != Some(*dragged)
        {
            return Ok(());
        }

        // Scope admission happens at the session boundary: a mismatched
        // enter never latches the target highlight, which mutes the
        // over/leave that would follow; a commit re-checks in case
        // configuration moved mid-flight.
        if let GestureSignal::DropEnter { .. } | GestureSignal::DropCommit { .. } = signal
            && !self.scope_admits(item)
        {
            trace!(target = item.0, "drop target rejected by scope");
            return Ok(());
        }

        let Some(machine) = self.machines.get_mut(&item) else {
            return Ok(());
        };
        for event in machine.apply(signal) {
            self.handle_event(event, host)?;
        }
        Ok(())
    }

    /// Whether the active session's drag scope reaches `target`.
    fn scope_admits(&self, target: ItemKey) -> bool {
        let Some(session) = self.slot.get() else {
            return false;
        };
        let Some(machine) = self.machines.get(&target) else {
            return false;
        };
        let Some(set) = self.membership.get(&target).and_then(|id| self.set(*id)) else {
            return false;
        };
        session
            .drag_scope
            .matches(set.config().drop_scope_for(machine.config()))
    }

    // -----------------------------------------------------------------------
    // Canonical event reactions
    // -----------------------------------------------------------------------

    fn handle_event<H: DragDropHost>(&mut self, event: GestureEvent, host: &mut H) -> Result<()> {
        match event {
            GestureEvent::Grab { item } => host.after_grab(item),
            GestureEvent::Release { item } => host.after_release(item),
            GestureEvent::DragStart { item, page, offset } => {
                self.begin_session(item, page, offset, host)?;
            }
            GestureEvent::Drag { item, page, offset } => {
                if let Some(session) = self.slot.get_mut()
                    && session.dragged == item
                {
                    session.page = page;
                    session.offset = offset;
                    host.ghost_move(item, page, offset);
                    host.drag_moved(item, page, offset);
                }
            }
            GestureEvent::DragEnter { item, target } => self.enter_target(item, target, host)?,
            GestureEvent::DragOver { item, target, .. } => self.over_target(item, target, host),
            GestureEvent::DragLeave { .. } => {}
            GestureEvent::Drop { item, .. } => {
                if let Some(session) = self.slot.get_mut()
                    && session.dragged == item
                {
                    session.drop_succeeded = true;
                }
            }
            GestureEvent::DragCancel { item } => {
                if let Some(session) = self.slot.get_mut()
                    && session.dragged == item
                {
                    session.cancelled = true;
                }
            }
            GestureEvent::DragEnd { item } => self.end_session(item, host),
        }
        Ok(())
    }

    fn begin_session<H: DragDropHost>(
        &mut self,
        item: ItemKey,
        page: Point,
        offset: Point,
        host: &mut H,
    ) -> Result<()> {
        let Some(set_id) = self.membership.get(&item).copied() else {
            return Ok(());
        };
        let (scope, effect, order) = {
            let Some(machine) = self.machines.get(&item) else {
                return Ok(());
            };
            let Some(set) = self.set(set_id) else {
                return Ok(());
            };
            (
                set.config().drag_scope_for(machine.config()).clone(),
                machine.config().effect,
                set.order().to_vec(),
            )
        };
        debug!(item = item.0, set = set_id.0, "drag session opened");

        let mut session = DragSession::new(item, scope.clone(), set_id);
        session.page = page;
        session.offset = offset;
        session.snapshot_order(set_id, &order);
        self.slot.acquire(session)?;

        host.drag_started(&DragStartData {
            dragged: item,
            set: set_id,
            scope,
            effect,
            page,
            offset,
        });
        host.ghost_create(item, page, offset);
        self.queue
            .schedule(DeferPhase::Next, DeferredAction::DraggingFlag { item, on: true });
        Ok(())
    }

    /// The dragged item entered a target. Entering an item of a foreign
    /// set pulls the dragged item across, before the target's position.
    fn enter_target<H: DragDropHost>(
        &mut self,
        dragged: ItemKey,
        target: ItemKey,
        host: &mut H,
    ) -> Result<()> {
        let Some(target_set) = self.membership.get(&target).copied() else {
            return Ok(());
        };
        let outcome = {
            let Some(session) = self.slot.get_mut() else {
                return Ok(());
            };
            if session.dragged != dragged || target_set == session.source_set {
                return Ok(());
            }
            let from = session.source_set;
            let Some((source, dest)) = split_two(&mut self.sets, from, target_set) else {
                return Ok(());
            };
            self.coordinator.transfer(session, source, dest, target)?
        };
        let Some(outcome) = outcome else {
            return Ok(());
        };
        debug!(
            item = dragged.0,
            from = outcome.from.0,
            to = outcome.to.0,
            "dragged item crossed sets"
        );
        self.membership.insert(dragged, outcome.to);
        host.after_drag_out(outcome.from, dragged, &outcome.source_change);
        host.after_drag_in(outcome.to, dragged, outcome.index, &outcome.dest_change);
        self.queue_animation(outcome.from, &outcome.source_change);
        self.queue_animation(outcome.to, &outcome.dest_change);
        Ok(())
    }

    /// The dragged item is over a target: remember it as the prospective
    /// drop position, and re-sort unless it is the dragged item itself.
    fn over_target<H: DragDropHost>(&mut self, dragged: ItemKey, target: ItemKey, host: &mut H) {
        {
            let Some(session) = self.slot.get_mut() else {
                return;
            };
            if session.dragged != dragged {
                return;
            }
            session.note_target(target);
        }
        if target == dragged {
            return;
        }
        let Some(set_id) = self.membership.get(&target).copied() else {
            return;
        };
        let Some(set) = self.sets.iter_mut().find(|s| s.id() == set_id) else {
            return;
        };
        let Some(change) = set.reorder(dragged, target) else {
            return;
        };
        trace!(item = dragged.0, target = target.0, set = set_id.0, "order updated");
        host.after_drag_over(set_id, dragged, target, &change);
        self.queue_animation(set_id, &change);
    }

    fn end_session<H: DragDropHost>(&mut self, item: ItemKey, host: &mut H) {
        if self.slot.dragged() != Some(item) {
            return;
        }
        let Some(mut session) = self.slot.release() else {
            return;
        };
        let policy = match self.set(session.origin_set) {
            Some(set) => set.config().revert,
            None => RevertPolicy::default(),
        };
        let did_revert = policy.should_reset(session.cancelled, session.drop_succeeded);
        if did_revert {
            for (set_id, snapshot) in session.take_snapshots() {
                let Some(set) = self.sets.iter_mut().find(|s| s.id() == set_id) else {
                    continue;
                };
                let Some(change) = set.restore(snapshot) else {
                    continue;
                };
                host.after_revert(set_id, &change);
                self.queue_animation(set_id, &change);
            }
            // Restored orders are the source of truth: a transferred item
            // follows its snapshot back to the set that holds it now.
            if let Some(owner) = self.sets.iter().find(|s| s.contains(item)) {
                self.membership.insert(item, owner.id());
            }
        }

        let report = DropReport {
            dragged: item,
            drop_target: session.last_drop_target,
            drop_succeeded: session.drop_succeeded,
            cancelled: session.cancelled,
            did_revert,
        };
        debug!(
            item = item.0,
            succeeded = report.drop_succeeded,
            cancelled = report.cancelled,
            reverted = report.did_revert,
            "drag session closed"
        );
        if session.cancelled {
            host.after_cancel(session.origin_set, &report);
        } else {
            host.after_drop(session.origin_set, &report);
        }
        host.ghost_remove(item);

        // Sweep any target highlight whose leave or commit got swallowed.
        for machine in self.machines.values_mut() {
            machine.clear_drop_highlight();
        }
        self.queue
            .schedule(DeferPhase::Next, DeferredAction::DraggingFlag { item, on: false });
        self.queue
            .schedule(DeferPhase::AfterRender, DeferredAction::RestoreFocus { item });
    }

    fn queue_animation(&mut self, set_id: SetId, change: &OrderChange) {
        if self.set(set_id).is_some_and(|s| s.config().enable_animation) {
            self.queue.schedule(
                DeferPhase::AfterRender,
                DeferredAction::Animate {
                    set: set_id,
                    previous: change.previous.clone(),
                },
            );
        }
    }

    // -----------------------------------------------------------------------
    // Deferred work
    // -----------------------------------------------------------------------

    /// Run queued deferred work. Call after rendering the effects of the
    /// preceding dispatches: the first tier applies visual flags, the
    /// second restores focus and starts animations against the geometry
    /// the render produced.
    pub fn flush_deferred<H: DragDropHost>(&mut self, host: &mut H) {
        // Actions may queue follow-ups into their own tier.
        loop {
            let batch = self.queue.drain_next();
            if batch.is_empty() {
                break;
            }
            for action in batch {
                self.run_deferred(action, host);
            }
        }

        // Animations coalesce per set: the first queued `previous` is the
        // order before the earliest change, the current order at flush
        // time is the net result.
        let mut animations: Vec<(SetId, Vec<ItemKey>)> = Vec::new();
        for action in self.queue.drain_after_render() {
            if let DeferredAction::Animate { set, previous } = action {
                if !animations.iter().any(|(s, _)| *s == set) {
                    animations.push((set, previous));
                }
            } else {
                self.run_deferred(action, host);
            }
        }
        for (set_id, previous) in animations {
            self.run_animation(set_id, previous, host);
        }
    }

    fn run_deferred<H: DragDropHost>(&mut self, action: DeferredAction, host: &mut H) {
        match action {
            DeferredAction::DraggingFlag { item, on } => {
                if let Some(machine) = self.machines.get_mut(&item) {
                    machine.set_visual_dragging(on);
                    host.dragging_changed(item, on);
                }
            }
            DeferredAction::RestoreFocus { item } => {
                if self.machines.contains_key(&item) {
                    host.focus_restored(item);
                }
            }
            DeferredAction::Animate { set, previous } => self.run_animation(set, previous, host),
        }
    }

    fn run_animation<H: DragDropHost>(
        &mut self,
        set_id: SetId,
        previous: Vec<ItemKey>,
        host: &mut H,
    ) {
        let Some(set) = self.set(set_id) else {
            return;
        };
        let current = set.order().to_vec();
        if previous == current {
            return;
        }
        let change = OrderChange { previous, current };
        let plan = plan_moves(&change.previous, &change.current);
        let moves = resolve_moves(&plan, |key| host.rect_of(key));
        if let Some(ticket) = host.animate(set_id, &change, &moves) {
            trace!(set = set_id.0, ticket = ticket.0, "animation in flight");
            self.animating.insert(ticket.0, set_id);
        }
    }
}

impl Default for DragManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Disjoint mutable access to two sets by id.
fn split_two(sets: &mut [ItemSet], a: SetId, b: SetId) -> Option<(&mut ItemSet, &mut ItemSet)> {
    let ia = sets.iter().position(|s| s.id() == a)?;
    let ib = sets.iter().position(|s| s.id() == b)?;
    if ia == ib {
        return None;
    }
    if ia < ib {
        let (left, right) = sets.split_at_mut(ib);
        Some((&mut left[ia], &mut right[0]))
    } else {
        let (left, right) = sets.split_at_mut(ia);
        Some((&mut right[0], &mut left[ib]))
    }
}

// ---------------------------------------------------------------------------
// Adapter context
// ---------------------------------------------------------------------------

/// Immutable orchestrator view handed to adapters during translation.
struct CtxView<'a, H: GeometryProvider> {
    machines: &'a AHashMap<ItemKey, ItemGesture>,
    membership: &'a AHashMap<ItemKey, SetId>,
    sets: &'a [ItemSet],
    slot: &'a SessionSlot,
    host: &'a H,
}

impl<H: GeometryProvider> CtxView<'_, H> {
    fn set_of(&self, item: ItemKey) -> Option<&ItemSet> {
        let id = *self.membership.get(&item)?;
        self.sets.iter().find(|s| s.id() == id)
    }

    fn drag_scope_of(&self, item: ItemKey) -> Option<&Scope> {
        let machine = self.machines.get(&item)?;
        let set = self.set_of(item)?;
        Some(set.config().drag_scope_for(machine.config()))
    }

    fn drop_scope_of(&self, item: ItemKey) -> Option<&Scope> {
        let machine = self.machines.get(&item)?;
        let set = self.set_of(item)?;
        Some(set.config().drop_scope_for(machine.config()))
    }
}

impl<H: GeometryProvider> AdapterContext for CtxView<'_, H> {
    /// First hit in registration order wins; sets registered earlier sit
    /// on top for overlap purposes.
    fn hit_test(&self, page: Point) -> Option<ItemKey> {
        for set in self.sets {
            for key in set.order() {
                if self.host.rect_of(*key).is_some_and(|r| r.contains(page)) {
                    return Some(*key);
                }
            }
        }
        None
    }

    fn item_rect(&self, item: ItemKey) -> Option<Rect> {
        self.host.rect_of(item)
    }

    fn resolve_drop_target(&self, from: ItemKey, direction: Direction) -> Option<ItemKey> {
        let origin = self.host.rect_of(from)?;
        let drag_scope: &Scope = match self.slot.get() {
            Some(session) => &session.drag_scope,
            None => self.drag_scope_of(from)?,
        };
        let dragged = self.slot.dragged();
        let mut candidates = Vec::new();
        for set in self.sets {
            for key in set.order().iter().copied() {
                if key == from || Some(key) == dragged {
                    continue;
                }
                let Some(machine) = self.machines.get(&key) else {
                    continue;
                };
                if !machine.config().capabilities.contains(Capabilities::DROP) {
                    continue;
                }
                let Some(drop_scope) = self.drop_scope_of(key) else {
                    continue;
                };
                if !drag_scope.matches(drop_scope) {
                    continue;
                }
                let Some(rect) = self.host.rect_of(key) else {
                    continue;
                };
                candidates.push((key, rect));
            }
        }
        resolver::resolve(origin, direction, &candidates)
    }

    fn resolve_neighbor(&self, from: ItemKey, direction: Direction) -> Option<ItemKey> {
        let origin = self.host.rect_of(from)?;
        let mut candidates = Vec::new();
        for set in self.sets {
            for key in set.order().iter().copied() {
                if key == from {
                    continue;
                }
                let Some(rect) = self.host.rect_of(key) else {
                    continue;
                };
                candidates.push((key, rect));
            }
        }
        resolver::resolve(origin, direction, &candidates)
    }

    fn phase(&self, item: ItemKey) -> GesturePhase {
        self.machines.get(&item).map_or(GesturePhase::Idle, ItemGesture::phase)
    }

    fn active_drag(&self) -> Option<ItemKey> {
        self.slot.dragged()
    }
}
