use crate::complex::Complex;
use crate::error::CoreError;

/// The process-wide, immutable mapping from pixel coordinates to the
/// complex plane.
///
/// Pixel `(i, j)` maps to `c = (xmin + (i/W)(xmax-xmin), ymin + (j/H)(ymax-ymin))`.
/// `dx`/`dy` are precomputed once so every pixel's mapping is a single
/// multiply-add rather than a fresh division, which keeps neighboring
/// tiles' boundary coordinates bit-identical.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    dx: f64,
    dy: f64,
}

impl Viewport {
    /// Construct a viewport, validating dimensions and bounds.
    pub fn new(
        width: u32,
        height: u32,
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
    ) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidViewport {
                reason: format!("dimensions must be > 0, got {width}x{height}"),
            });
        }
        if ![xmin, xmax, ymin, ymax].into_iter().all(f64::is_finite) {
            return Err(CoreError::InvalidViewport {
                reason: "bounds must be finite".to_string(),
            });
        }
        if xmax <= xmin || ymax <= ymin {
            return Err(CoreError::InvalidViewport {
                reason: format!(
                    "bounds must satisfy xmin < xmax and ymin < ymax, got \
                     x=[{xmin}, {xmax}], y=[{ymin}, {ymax}]"
                ),
            });
        }
        let dx = (xmax - xmin) / width as f64;
        let dy = (ymax - ymin) / height as f64;
        Ok(Self {
            width,
            height,
            xmin,
            xmax,
            ymin,
            ymax,
            dx,
            dy,
        })
    }

    /// The default view: the classic full-set framing used throughout the
    /// worked examples (`[-2.5, 1] x [-1, 1]`).
    pub fn default_mandelbrot(width: u32, height: u32) -> Self {
        Self::new(width, height, -2.5, 1.0, -1.0, 1.0)
            .expect("default Mandelbrot bounds are always valid")
    }

    /// Map a pixel coordinate to its complex-plane point.
    ///
    /// `i` runs along `x`, increasing toward `xmax`; `j` runs along `y`,
    /// increasing toward `ymax` from `ymin` at `j = 0`. This says nothing
    /// about which edge of the output image `j = 0` lands on — that is
    /// the sink's concern (see `Raster::rows_by_increasing_j`).
    #[inline]
    pub fn pixel_to_complex(&self, i: u32, j: u32) -> Complex {
        self.subpixel_to_complex(i as f64, j as f64)
    }

    /// Like [`pixel_to_complex`](Self::pixel_to_complex) but accepts
    /// fractional pixel coordinates, used by AA re-sampling.
    #[inline]
    pub fn subpixel_to_complex(&self, i: f64, j: f64) -> Complex {
        Complex::new(self.xmin + i * self.dx, self.ymin + j * self.dy)
    }

    /// Complex-plane units spanned by one pixel along `x`.
    #[inline]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Complex-plane units spanned by one pixel along `y`.
    #[inline]
    pub fn dy(&self) -> f64 {
        self.dy
    }
}
