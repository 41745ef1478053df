use std::sync::Arc;
use std::thread;

use mandelforge_core::{Classifier, PointClass, Viewport};

use crate::grid::MemoGrid;
use crate::tile::Tile;
use crate::work_queue::WorkQueue;

/// Run Mariani–Silver adaptive subdivision over the whole image using
/// `threads` worker threads, filling `grid` (§4.5).
///
/// Blocks until every pixel in the image has a grid entry.
pub fn subdivide(viewport: &Viewport, classifier: &Classifier, grid: &MemoGrid, threads: usize) {
    let seed = Tile::seed(viewport.width, viewport.height);
    let queue: Arc<WorkQueue<Tile>> = Arc::new(WorkQueue::new(threads, [seed]));

    thread::scope(|scope| {
        for _ in 0..threads {
            let queue = Arc::clone(&queue);
            scope.spawn(move || worker_loop(&queue, viewport, classifier, grid));
        }
    });

    debug_assert!(
        grid.is_complete(),
        "Mariani-Silver subdivision must fill every grid slot before returning"
    );
}

fn worker_loop(queue: &WorkQueue<Tile>, viewport: &Viewport, classifier: &Classifier, grid: &MemoGrid) {
    while let Some(tile) = queue.pop() {
        process_tile(tile, viewport, classifier, grid, queue);
    }
}

fn process_tile(tile: Tile, viewport: &Viewport, classifier: &Classifier, grid: &MemoGrid, queue: &WorkQueue<Tile>) {
    let w = viewport.width;
    let h = viewport.height;

    if tile.is_leaf() {
        for (i, j) in tile.pixels(w, h) {
            classify_pixel(i, j, viewport, classifier, grid);
        }
        return;
    }

    let boundary = tile.boundary(w, h);
    let mut all_same = true;
    let mut reference: Option<PointClass> = None;
    for &(i, j) in &boundary {
        let class = classify_pixel(i, j, viewport, classifier, grid);
        match reference {
            None => reference = Some(class),
            Some(r) if r == class => {}
            Some(_) => all_same = false,
        }
    }

    // The seed tile spans the full image and must always be subdivided
    // even if its boundary happens to be uniform: the interior is not
    // simply connected with the boundary (§4.5 step 3).
    if tile.w as u64 * 2 > w as u64 {
        all_same = false;
    }

    if all_same {
        let pd = reference.expect("boundary is non-empty for a non-degenerate tile");
        for (i, j) in tile.pixels(w, h) {
            grid.put(i, j, pd);
        }
    } else {
        let children = tile.split();
        queue.push_all(children);
    }
}

fn classify_pixel(i: u32, j: u32, viewport: &Viewport, classifier: &Classifier, grid: &MemoGrid) -> PointClass {
    grid.get_or_compute(i, j, || {
        let c = viewport.pixel_to_complex(i, j);
        classifier.classify(c)
    })
}
