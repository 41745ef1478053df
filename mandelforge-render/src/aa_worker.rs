use std::sync::Arc;
use std::thread;

use mandelforge_core::{Classifier, Viewport};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::aa_mask::AaMask;
use crate::color::color_for;
use crate::palette::Palette;
use crate::raster::{Pixel, Raster};
use crate::work_queue::WorkQueue;

/// Run boundary-seeking anti-aliasing resampling over `seed` pixels using
/// `threads` worker threads (§4.8). Blocks until the queue (including any
/// pixels discovered by propagation) is drained.
#[allow(clippy::too_many_arguments)]
pub fn resample(
    viewport: &Viewport,
    classifier: &Classifier,
    palette: &Palette,
    raster: &Raster,
    mask: &AaMask,
    seed: Vec<(u32, u32)>,
    samples: u32,
    border_radius: u32,
    threads: usize,
) {
    let queue: Arc<WorkQueue<(u32, u32)>> = Arc::new(WorkQueue::new(threads, seed));

    thread::scope(|scope| {
        for worker_id in 0..threads {
            let queue = Arc::clone(&queue);
            scope.spawn(move || {
                let mut rng = ChaCha8Rng::seed_from_u64(worker_id as u64);
                while let Some((i, j)) = queue.pop() {
                    resample_pixel(
                        i,
                        j,
                        viewport,
                        classifier,
                        palette,
                        raster,
                        mask,
                        &queue,
                        &mut rng,
                        samples,
                        border_radius,
                    );
                }
            });
        }
    });
}

#[allow(clippy::too_many_arguments)]
fn resample_pixel(
    i: u32,
    j: u32,
    viewport: &Viewport,
    classifier: &Classifier,
    palette: &Palette,
    raster: &Raster,
    mask: &AaMask,
    queue: &WorkQueue<(u32, u32)>,
    rng: &mut ChaCha8Rng,
    samples: u32,
    border_radius: u32,
) {
    let half_dx = viewport.dx() / 2.0;
    let half_dy = viewport.dy() / 2.0;

    let mut sum_r = 0u32;
    let mut sum_g = 0u32;
    let mut sum_b = 0u32;

    let base = viewport.pixel_to_complex(i, j);
    for _ in 0..samples {
        let jitter_x = rng.gen_range(-half_dx..=half_dx);
        let jitter_y = rng.gen_range(-half_dy..=half_dy);
        let c = mandelforge_core::Complex::new(base.re + jitter_x, base.im + jitter_y);
        let class = classifier.classify(c);
        let pixel = color_for(class, palette);
        sum_r += pixel.r as u32;
        sum_g += pixel.g as u32;
        sum_b += pixel.b as u32;
    }

    let n = samples.max(1);
    let resampled = Pixel::new((sum_r / n) as u8, (sum_g / n) as u8, (sum_b / n) as u8);

    let current = raster.get(i, j);
    if resampled != current {
        raster.set(i, j, resampled);
        propagate(i, j, viewport.width, viewport.height, border_radius, mask, queue);
    }
}

/// A color change indicates newly discovered detail: re-queue every
/// disc-radius neighbor not already in the mask (§4.8 step 4).
fn propagate(i: u32, j: u32, width: u32, height: u32, radius: u32, mask: &AaMask, queue: &WorkQueue<(u32, u32)>) {
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
                queue.push((x as u32, y as u32));
            }
        }
    }
}
