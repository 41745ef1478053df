pub mod aa_mask;
pub mod aa_worker;
pub mod bmp;
pub mod color;
pub mod driver;
pub mod edge;
pub mod error;
pub mod grid;
pub mod mariani;
pub mod palette;
pub mod raster;
pub mod tile;
pub mod work_queue;

pub use driver::render;
pub use error::RenderError;
pub use grid::MemoGrid;
pub use palette::Palette;
pub use raster::{Pixel, Raster};
pub use tile::Tile;
pub use work_queue::WorkQueue;

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
