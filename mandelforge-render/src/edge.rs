use mandelforge_core::PointClass;

use crate::aa_mask::AaMask;
use crate::grid::MemoGrid;

/// Single-threaded pre-pass over the full grid: finds boundary pixels and
/// seeds the AA queue with disc-shaped halos around them (§4.7).
///
/// Returns the pixels to enqueue for the AA phase.
pub fn seed_boundary(grid: &MemoGrid, mask: &AaMask, border_radius: u32) -> Vec<(u32, u32)> {
    let width = grid.width();
    let height = grid.height();
    let mut seeded = Vec::new();

    for j in 0..height {
        for i in 0..width {
            let center = grid
                .try_get(i, j)
                .expect("grid must be complete before edge detection");
            let (has_escaped_neighbor, has_interior_neighbor) = scan_neighbors(grid, i, j, width, height);

            let is_boundary = (!center.is_escaped() && has_escaped_neighbor)
                || (center.is_escaped() && has_interior_neighbor);

            if is_boundary {
                seed_disc(i, j, border_radius, width, height, mask, &mut seeded);
            }
        }
    }

    seeded
}

fn scan_neighbors(grid: &MemoGrid, i: u32, j: u32, width: u32, height: u32) -> (bool, bool) {
    let mut has_escaped = false;
    let mut has_interior = false;
    for dj in -1i64..=1 {
        for di in -1i64..=1 {
            if di == 0 && dj == 0 {
                continue;
            }
            let ni = i as i64 + di;
            let nj = j as i64 + dj;
            if ni < 0 || nj < 0 || ni >= width as i64 || nj >= height as i64 {
                continue;
            }
            match grid.try_get(ni as u32, nj as u32) {
                Some(class) if matches!(class, PointClass::Escaped { .. }) => has_escaped = true,
                Some(_) => has_interior = true,
                None => {}
            }
        }
    }
    (has_escaped, has_interior)
}

/// Enqueue every pixel within `radius` of `(i, j)` (by `(x-i)^2+(y-j)^2 <= R^2`)
/// whose mask bit was not already set. The mask mutex makes "check + set +
/// push" atomic per pixel.
fn seed_disc(i: u32, j: u32, radius: u32, width: u32, height: u32, mask: &AaMask, out: &mut Vec<(u32, u32)>) {
    let r = radius as i64;
    let r_sq = r * r;
    let lo_x = (i as i64 - r).max(0);
    let hi_x = (i as i64 + r).min(width as i64 - 1);
    let lo_y = (j as i64 - r).max(0);
    let hi_y = (j as i64 + r).min(height as i64 - 1);

    for y in lo_y..=hi_y {
        for x in lo_x..=hi_x {
            let dx = x - i as i64;
            let dy = y - j as i64;
            if dx * dx + dy * dy > r_sq {
                continue;
            }
            if mask.check_and_set(x as u32, y as u32) {
                out.push((x as u32, y as u32));
            }
        }
    }
}
