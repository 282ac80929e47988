#![forbid(unsafe_code)]

//! Scripted headless walkthrough of the grabbit drag-drop lifecycle.
//!
//! Drives a [`DragManager`] with a hand-written event script — no real
//! input devices, no view tree — and prints every hook the orchestrator
//! fires along the way. Three acts: a pointer reorder within one set, a
//! pointer drag across sets, and a keyboard grab that gets cancelled.
//!
//! # Running
//!
//! ```sh
//! cargo run -p grabbit-demo
//! ```

use std::collections::HashMap;

use grabbit::prelude::*;
use grabbit::{
    Animator, DragDropHooks, DragStartData, GeometryProvider, GhostHost, InputEvent, KeyCode,
    KeyEvent, OrderChange, Point, Rect,
};

/// Host that renders to stdout: one row of 10x10 tiles, 20 apart, laid
/// out set by set in order.
#[derive(Debug, Default)]
struct ConsoleHost {
    rects: HashMap<u64, Rect>,
}

impl ConsoleHost {
    fn lay(&mut self, orders: &[&[ItemKey]]) {
        self.rects.clear();
        let mut slot = 0u32;
        for order in orders {
            for key in *order {
                self.rects
                    .insert(key.0, Rect::new(slot as f32 * 20.0, 0.0, 10.0, 10.0));
                slot += 1;
            }
        }
    }

    fn center(&self, id: u64) -> Point {
        self.rects[&id].center()
    }
}

impl GeometryProvider for ConsoleHost {
    fn rect_of(&self, item: ItemKey) -> Option<Rect> {
        self.rects.get(&item.0).copied()
    }
}

impl GhostHost for ConsoleHost {
    fn ghost_create(&mut self, item: ItemKey, _page: Point, _offset: Point) {
        println!("  [ghost] created for item {}", item.0);
    }
    fn ghost_remove(&mut self, item: ItemKey) {
        println!("  [ghost] removed for item {}", item.0);
    }
}

impl Animator for ConsoleHost {}

impl DragDropHooks for ConsoleHost {
    fn drag_started(&mut self, data: &DragStartData) {
        println!("  [hook] drag of item {} started", data.dragged.0);
    }
    fn after_drag_over(&mut self, set: SetId, dragged: ItemKey, target: ItemKey, _: &OrderChange) {
        println!(
            "  [hook] item {dragged} re-sorted past {target} in set {set}",
            dragged = dragged.0,
            target = target.0,
            set = set.0
        );
    }
    fn after_drag_out(&mut self, set: SetId, item: ItemKey, _: &OrderChange) {
        println!("  [hook] item {} left set {}", item.0, set.0);
    }
    fn after_drag_in(&mut self, set: SetId, item: ItemKey, index: usize, _: &OrderChange) {
        println!("  [hook] item {} joined set {} at slot {}", item.0, set.0, index);
    }
    fn after_revert(&mut self, set: SetId, _: &OrderChange) {
        println!("  [hook] set {} restored to its pre-drag order", set.0);
    }
    fn after_drop(&mut self, set: SetId, report: &DropReport) {
        println!(
            "  [hook] drop finished in set {} (target {:?}, reverted: {})",
            set.0,
            report.drop_target.map(|t| t.0),
            report.did_revert
        );
    }
    fn after_cancel(&mut self, set: SetId, report: &DropReport) {
        println!(
            "  [hook] drag cancelled in set {} (reverted: {})",
            set.0, report.did_revert
        );
    }
}

fn print_board(mgr: &DragManager) {
    let backlog: Vec<u64> = mgr
        .order_of(SetId(1))
        .unwrap_or_default()
        .iter()
        .map(|k| k.0)
        .collect();
    let doing: Vec<u64> = mgr
        .order_of(SetId(2))
        .unwrap_or_default()
        .iter()
        .map(|k| k.0)
        .collect();
    println!("  backlog: {backlog:?}   doing: {doing:?}");
}

fn relayout(mgr: &DragManager, host: &mut ConsoleHost) {
    let backlog = mgr.order_of(SetId(1)).unwrap_or_default();
    let doing = mgr.order_of(SetId(2)).unwrap_or_default();
    host.lay(&[backlog, doing]);
}

fn pointer_drag(
    mgr: &mut DragManager,
    host: &mut ConsoleHost,
    dragged: u64,
    targets: &[u64],
) -> Result<()> {
    mgr.dispatch(
        &InputEvent::PointerDown {
            item: ItemKey(dragged),
            part: None,
        },
        host,
    )?;
    mgr.dispatch(
        &InputEvent::DragStarted {
            item: ItemKey(dragged),
            page: host.center(dragged),
            offset: Point::ZERO,
        },
        host,
    )?;
    for &target in targets {
        mgr.dispatch(&InputEvent::DragEntered { item: ItemKey(target) }, host)?;
        mgr.dispatch(
            &InputEvent::DraggedOver {
                item: ItemKey(target),
                page: host.center(target),
                offset: Point::ZERO,
            },
            host,
        )?;
        relayout(mgr, host);
    }
    let last = *targets.last().unwrap_or(&dragged);
    mgr.dispatch(&InputEvent::Dropped { item: ItemKey(last) }, host)?;
    mgr.dispatch(&InputEvent::DragEnded { item: ItemKey(dragged) }, host)?;
    mgr.flush_deferred(host);
    Ok(())
}

fn run() -> Result<()> {
    let mut mgr = DragManager::new();
    mgr.add_set(ItemSet::new(SetId(1)))?;
    mgr.add_set(ItemSet::new(SetId(2)))?;
    for id in [1, 2, 3] {
        mgr.register_item(ItemKey(id), SetId(1), ItemConfig::new())?;
    }
    for id in [4, 5] {
        mgr.register_item(ItemKey(id), SetId(2), ItemConfig::new())?;
    }
    let mut host = ConsoleHost::default();
    relayout(&mgr, &mut host);

    println!("initial board");
    print_board(&mgr);

    println!("\nact 1: pointer drags item 1 past item 3, then drops");
    pointer_drag(&mut mgr, &mut host, 1, &[3])?;
    print_board(&mgr);

    println!("\nact 2: pointer carries item 2 into the doing column");
    pointer_drag(&mut mgr, &mut host, 2, &[4])?;
    print_board(&mgr);

    println!("\nact 3: keyboard grabs item 5, steps left, then thinks better of it");
    mgr.dispatch(&InputEvent::FocusIn { item: ItemKey(5) }, &mut host)?;
    mgr.dispatch(
        &InputEvent::Key {
            item: ItemKey(5),
            key: KeyEvent::new(KeyCode::Char(' ')),
        },
        &mut host,
    )?;
    mgr.dispatch(
        &InputEvent::Key {
            item: ItemKey(5),
            key: KeyEvent::new(KeyCode::Left),
        },
        &mut host,
    )?;
    relayout(&mgr, &mut host);
    print_board(&mgr);
    mgr.dispatch(
        &InputEvent::Key {
            item: ItemKey(5),
            key: KeyEvent::new(KeyCode::Escape),
        },
        &mut host,
    )?;
    mgr.flush_deferred(&mut host);
    relayout(&mgr, &mut host);
    print_board(&mgr);

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("demo failed: {error}");
        std::process::exit(1);
    }
}
