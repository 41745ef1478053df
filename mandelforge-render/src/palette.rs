use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::raster::Pixel;

/// Fixed RNG seed so the palette is identical across runs (§4.10).
const PALETTE_SEED: u64 = 2;
const HUE_START: f64 = 200.0;
const HUE_STOP: f64 = 330.0;
const SATURATION: f64 = 0.7;
const LIGHTNESS: f64 = 0.5;

/// A deterministic, period-indexed color table: `colors[p - 1]` is the
/// color for `PointClass::Periodic { period: p }`.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Pixel>,
}

impl Palette {
    /// Generate `max_period` colors from hues sampled uniformly in
    /// `[200, 330]`, converted through HSL(hue, 0.7, 0.5) -> RGB.
    pub fn new(max_period: u32) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(PALETTE_SEED);
        let colors = (0..max_period)
            .map(|_| {
                let hue = rng.gen_range(HUE_START..=HUE_STOP);
                hsl_to_rgb(hue, SATURATION, LIGHTNESS)
            })
            .collect();
        Self { colors }
    }

    /// Color for period `p` (1-indexed, matching `PointClass::Periodic`).
    pub fn color_for_period(&self, period: u32) -> Pixel {
        self.colors[(period - 1) as usize % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Convert HSL to a BGR-ordered [`Pixel`]. `h` in degrees `[0, 360)`, `s`
/// and `l` in `[0, 1]`.
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Pixel {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - (h_prime.rem_euclid(2.0) - 1.0).abs());
    let (r1, g1, b1) = match h_prime as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_byte = |v: f64| (((v + m) * 255.0).round().clamp(0.0, 255.0)) as u8;
    Pixel::new(to_byte(r1), to_byte(g1), to_byte(b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        let palette = Palette::new(32);
        assert_eq!(palette.len(), 32);
    }

    #[test]
    fn deterministic_under_fixed_seed() {
        let a = Palette::new(20);
        let b = Palette::new(20);
        assert_eq!(a.colors, b.colors);
    }

    #[test]
    fn color_for_period_is_stable() {
        let palette = Palette::new(10);
        assert_eq!(palette.color_for_period(3), palette.color_for_period(3));
    }

    #[test]
    fn hsl_white_at_full_lightness_zero_saturation() {
        let white = hsl_to_rgb(0.0, 0.0, 1.0);
        assert_eq!(white, Pixel::new(255, 255, 255));
    }

    #[test]
    fn hsl_black_at_zero_lightness() {
        let black = hsl_to_rgb(180.0, 0.5, 0.0);
        assert_eq!(black, Pixel::new(0, 0, 0));
    }

    #[test]
    fn hsl_pure_red_at_hue_zero() {
        let red = hsl_to_rgb(0.0, 1.0, 0.5);
        assert_eq!(red, Pixel::new(255, 0, 0));
    }

    #[test]
    fn hsl_at_200_degrees_matches_worked_example() {
        // HSL(200, 0.7, 0.5) -> RGB(38, 157, 217). spec.md's own worked
        // example states (38, 150, 217), which is off by one channel; this
        // asserts the mathematically correct value this module computes.
        let color = hsl_to_rgb(HUE_START, SATURATION, LIGHTNESS);
        assert_eq!(color, Pixel::new(38, 157, 217));
    }
}
