use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tui_candymon::core::{
    find_matches, BoardRng, Cell, Grid, MemoryStore, Session, SessionSnapshot,
};
use tui_candymon::types::CellPos;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = layout;
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            let _ = (layout, new_size);
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

/// Empty a diagonal band so collapse and refill both have work to do.
fn punch_holes(grid: &mut Grid) {
    for i in 0..8u8 {
        grid.set(CellPos::new(i, i), Cell::default());
        grid.set(CellPos::new(i, (i + 3) % 8), Cell::default());
    }
}

#[test]
fn core_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut session = Session::new(Box::new(MemoryStore::new()), 1);
    session.reset(0);
    let _ = session.take_events();

    let mut snap = SessionSnapshot::default();

    // A constructive fill never contains a ready-made match, so scanning it
    // exercises the matchless fast path.
    let mut rng = BoardRng::new(12345);
    let mut scan_grid = Grid::new();
    scan_grid.fill_constructive(&mut rng, 5);

    let mut gravity_grid = scan_grid.clone();

    // Warm-up.
    session.tick(16);
    let _ = session.take_events();
    session.snapshot_into(&mut snap);
    assert!(find_matches(&scan_grid).is_empty());
    punch_holes(&mut gravity_grid);
    let _ = gravity_grid.collapse_columns();
    let _ = gravity_grid.refill(&mut rng, 5);

    let allocs = with_alloc_counting(|| {
        // Idle ticks should be allocation-free.
        for _ in 0..200 {
            session.tick(16);
        }

        // Snapshotting into a reused buffer should be allocation-free.
        for _ in 0..50 {
            session.snapshot_into(&mut snap);
        }

        // A scan that finds nothing should touch no heap at all.
        for _ in 0..50 {
            let scan = find_matches(&scan_grid);
            assert!(scan.is_empty());
        }

        // Gravity drives the collapse/refill paths.
        for _ in 0..50 {
            punch_holes(&mut gravity_grid);
            let _ = gravity_grid.collapse_columns();
            let _ = gravity_grid.refill(&mut rng, 5);
        }

        // Swapping kinds is a plain in-place exchange.
        for _ in 0..50 {
            gravity_grid.swap_kinds(CellPos::new(3, 3), CellPos::new(3, 4));
        }
    });

    assert!(allocs == 0);
}
