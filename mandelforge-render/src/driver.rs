use std::time::Instant;

use mandelforge_core::{Classifier, Mode, RenderConfig};
use tracing::{debug, info};

use crate::aa_mask::AaMask;
use crate::aa_worker;
use crate::bmp;
use crate::color::color_for;
use crate::error::RenderError;
use crate::edge;
use crate::grid::MemoGrid;
use crate::mariani;
use crate::palette::Palette;
use crate::raster::Raster;

/// Run the full pipeline described in spec.md §2/§5 for `config`, writing
/// the result to `config.output_path`.
///
/// Phases run in strict sequence, separated by join barriers: palette
/// init, subdivision (or brute force), color translation, edge detection +
/// AA seeding, AA resampling, BMP write.
pub fn render(config: &RenderConfig) -> Result<(), RenderError> {
    let viewport = config.viewport();
    let classifier = Classifier::new(config.classifier_params());

    info!(
        width = config.width,
        height = config.height,
        mode = ?config.mode,
        threads = config.threads,
        "starting render"
    );

    let palette_start = Instant::now();
    let palette = Palette::new(config.max_period);
    debug!(elapsed = ?palette_start.elapsed(), "palette initialized");

    let grid = MemoGrid::new(config.width, config.height);

    let subdivide_start = Instant::now();
    match config.mode {
        Mode::Mariani => {
            mariani::subdivide(&viewport, &classifier, &grid, config.threads);
        }
        Mode::BruteForce => {
            brute_force(&viewport, &classifier, &grid);
        }
    }
    debug!(elapsed = ?subdivide_start.elapsed(), "classification pass complete");

    let raster = Raster::new(config.width, config.height);
    let color_start = Instant::now();
    for j in 0..config.height {
        for i in 0..config.width {
            let class = grid
                .try_get(i, j)
                .expect("every pixel must be classified before the color pass");
            raster.set(i, j, color_for(class, &palette));
        }
    }
    debug!(elapsed = ?color_start.elapsed(), "color pass complete");

    if config.aa {
        let edge_start = Instant::now();
        let mask = AaMask::new(config.width, config.height);
        let seed = edge::seed_boundary(&grid, &mask, config.border_radius);
        debug!(
            elapsed = ?edge_start.elapsed(),
            seeded = seed.len(),
            "edge detection + AA seeding complete"
        );

        let aa_start = Instant::now();
        aa_worker::resample(
            &viewport,
            &classifier,
            &palette,
            &raster,
            &mask,
            seed,
            config.aa_samples,
            config.border_radius,
            config.threads,
        );
        debug!(elapsed = ?aa_start.elapsed(), "AA resampling complete");
    }

    let write_start = Instant::now();
    bmp::write(&raster, &config.output_path)?;
    debug!(elapsed = ?write_start.elapsed(), path = %config.output_path, "BMP written");

    info!("render complete");
    Ok(())
}

/// Classify every pixel independently, bypassing Mariani-Silver
/// subdivision. Used by `Mode::BruteForce`, mostly useful as a ground
/// truth for testing the subdivider against.
fn brute_force(viewport: &mandelforge_core::Viewport, classifier: &Classifier, grid: &MemoGrid) {
    for j in 0..viewport.height {
        for i in 0..viewport.width {
            grid.get_or_compute(i, j, || classifier.classify(viewport.pixel_to_complex(i, j)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandelforge_core::Mode;

    fn tmp_output(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("mandelforge_{name}_{}.bmp", std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn renders_small_image_with_mariani_mode() {
        let path = tmp_output("driver_mariani");
        let config = RenderConfig::new(
            32, 32, -2.0, 1.0, -1.5, 1.5, 128, 16, true, 4, 2, 2, Mode::Mariani, path.as_str(),
        )
        .unwrap();
        render(&config).unwrap();
        assert!(std::fs::metadata(&path).is_ok());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn renders_small_image_with_brute_force_mode() {
        let path = tmp_output("driver_brute");
        let config = RenderConfig::new(
            24, 24, -2.0, 1.0, -1.5, 1.5, 128, 16, false, 4, 2, 2, Mode::BruteForce, path.as_str(),
        )
        .unwrap();
        render(&config).unwrap();
        assert!(std::fs::metadata(&path).is_ok());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn mariani_and_brute_force_agree_on_classification() {
        let viewport = mandelforge_core::Viewport::new(20, 20, -2.0, 1.0, -1.5, 1.5).unwrap();
        let classifier = Classifier::new(mandelforge_core::ClassifierParams {
            iterations: 128,
            max_period: 16,
        });

        let mariani_grid = MemoGrid::new(20, 20);
        mariani::subdivide(&viewport, &classifier, &mariani_grid, 2);

        let brute_grid = MemoGrid::new(20, 20);
        brute_force(&viewport, &classifier, &brute_grid);

        for j in 0..20 {
            for i in 0..20 {
                assert_eq!(mariani_grid.try_get(i, j), brute_grid.try_get(i, j));
            }
        }
    }
}
