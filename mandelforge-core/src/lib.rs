pub mod classifier;
pub mod complex;
pub mod config;
pub mod error;
pub mod point_class;
pub mod viewport;

pub use classifier::{Classifier, ClassifierParams};
pub use complex::Complex;
pub use config::{Mode, RenderConfig};
pub use error::CoreError;
pub use point_class::PointClass;
pub use viewport::Viewport;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
