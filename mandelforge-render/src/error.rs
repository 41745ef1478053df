use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("BMP write failed")]
    Io(#[source] std::io::Error),

    #[error(transparent)]
    Core(#[from] mandelforge_core::CoreError),
}
