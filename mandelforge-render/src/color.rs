use mandelforge_core::PointClass;

use crate::palette::Palette;
use crate::raster::Pixel;

/// Escape times at or below this are rendered as a fast-escape ring in
/// white; deeper escapees render black (§4.6).
const FAST_ESCAPE_THRESHOLD: u32 = 100;

/// Map a classified point to its final color.
pub fn color_for(class: PointClass, palette: &Palette) -> Pixel {
    match class {
        PointClass::Escaped { escape_time } if escape_time > FAST_ESCAPE_THRESHOLD => Pixel::BLACK,
        PointClass::Escaped { .. } => Pixel::WHITE,
        PointClass::Periodic { period: 0 } => Pixel::BLACK,
        PointClass::Periodic { period } => palette.color_for_period(period),
        PointClass::Undetermined => Pixel::BLACK,
    }
}
