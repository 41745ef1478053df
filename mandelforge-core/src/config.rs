use serde::{Deserialize, Serialize};

use crate::classifier::ClassifierParams;
use crate::error::CoreError;
use crate::viewport::Viewport;

/// Which algorithm drives the classification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Classify every pixel independently, no subdivision.
    BruteForce,
    /// Mariani–Silver recursive subdivision with memoized boundary reuse.
    Mariani,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Mariani
    }
}

/// Every named, optional configuration knob from the external interface,
/// gathered behind a single validating constructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub iterations: u32,
    pub max_period: u32,
    pub aa: bool,
    pub aa_samples: u32,
    pub border_radius: u32,
    pub threads: usize,
    pub mode: Mode,
    pub output_path: String,
}

impl RenderConfig {
    pub const DEFAULT_WIDTH: u32 = 1920;
    pub const DEFAULT_HEIGHT: u32 = 1080;
    pub const DEFAULT_AA_SAMPLES: u32 = 16;
    pub const DEFAULT_BORDER_RADIUS: u32 = 5;

    /// Validate and construct a config. Rejects zero dimensions, a
    /// degenerate viewport, zero iteration/period/sample budgets, and a
    /// zero thread count.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        width: u32,
        height: u32,
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
        iterations: u32,
        max_period: u32,
        aa: bool,
        aa_samples: u32,
        border_radius: u32,
        threads: usize,
        mode: Mode,
        output_path: impl Into<String>,
    ) -> Result<Self, CoreError> {
        // Delegate bounds/dimension checks to Viewport so the two never
        // disagree about what counts as valid.
        Viewport::new(width, height, xmin, xmax, ymin, ymax)?;

        if iterations == 0 {
            return Err(CoreError::InvalidConfig {
                reason: "iterations must be >= 1".to_string(),
            });
        }
        if max_period == 0 {
            return Err(CoreError::InvalidConfig {
                reason: "max_period must be >= 1".to_string(),
            });
        }
        if aa && aa_samples == 0 {
            return Err(CoreError::InvalidConfig {
                reason: "aa_samples must be >= 1 when aa is enabled".to_string(),
            });
        }
        if threads == 0 {
            return Err(CoreError::InvalidConfig {
                reason: "threads must be >= 1".to_string(),
            });
        }

        Ok(Self {
            width,
            height,
            xmin,
            xmax,
            ymin,
            ymax,
            iterations,
            max_period,
            aa,
            aa_samples,
            border_radius,
            threads,
            mode,
            output_path: output_path.into(),
        })
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height, self.xmin, self.xmax, self.ymin, self.ymax)
            .expect("RenderConfig invariant: viewport bounds were validated at construction")
    }

    pub fn classifier_params(&self) -> ClassifierParams {
        ClassifierParams {
            iterations: self.iterations,
            max_period: self.max_period,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_WIDTH,
            Self::DEFAULT_HEIGHT,
            -2.5,
            1.0,
            -1.0,
            1.0,
            ClassifierParams::DEFAULT_ITERATIONS,
            ClassifierParams::DEFAULT_MAX_PERIOD,
            true,
            Self::DEFAULT_AA_SAMPLES,
            Self::DEFAULT_BORDER_RADIUS,
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            Mode::default(),
            "test.bmp",
        )
        .expect("default render config is always valid")
    }
}
