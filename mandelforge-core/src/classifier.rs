use crate::complex::Complex;
use crate::point_class::PointClass;

/// The bailout radius squared. A point has escaped once `|z|² > 4`.
pub const ESCAPE_NORM_SQ: f64 = 4.0;

/// Parameters controlling point classification.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassifierParams {
    /// Escape budget: a point that has not escaped after this many
    /// iterations is handed to the period probe instead.
    pub iterations: u32,
    /// Ceiling on the period probed for by [`Classifier::classify`].
    pub max_period: u32,
}

impl ClassifierParams {
    pub const DEFAULT_ITERATIONS: u32 = 7000;
    pub const DEFAULT_MAX_PERIOD: u32 = 32;
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            iterations: Self::DEFAULT_ITERATIONS,
            max_period: Self::DEFAULT_MAX_PERIOD,
        }
    }
}

/// The Mandelbrot set: `z_{n+1} = z_n² + c`, starting from `z₀ = 0`.
///
/// Classifies a point as escaped, periodic (with a detected attracting
/// cycle), or undetermined. Pure and side-effect-free: safe to share a
/// single `Classifier` across worker threads.
#[derive(Debug, Clone)]
pub struct Classifier {
    params: ClassifierParams,
}

impl Classifier {
    pub fn new(params: ClassifierParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ClassifierParams {
        &self.params
    }

    /// Classify a single point on the complex plane.
    pub fn classify(&self, c: Complex) -> PointClass {
        let mut z = Complex::ZERO;
        let mut n_done = 0u32;

        // Step 1+2: iterate until |z|² exceeds the bailout radius or the
        // iteration budget runs out. A value that merely *reaches* the
        // radius (|z|² == 4) is not classified as escaped — it falls
        // through to the period probe below, which is what keeps exact
        // boundary points like the real-axis fixed points from being
        // misclassified as escapees.
        while n_done < self.params.iterations {
            z = z * z + c;
            n_done += 1;
            if z.norm_sq() > ESCAPE_NORM_SQ {
                return PointClass::Escaped { escape_time: n_done };
            }
        }

        // Step 3: probe for an attracting cycle.
        for period in 1..=self.params.max_period {
            if is_period(period, z, c, self.params.max_period) {
                return PointClass::Periodic { period };
            }
        }

        // Step 4: no escape, no detected cycle.
        PointClass::Undetermined
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ClassifierParams::default())
    }
}

/// Apply `z ← z² + c` exactly `n` times and return the resulting `z`.
#[inline]
pub fn iterate(mut z: Complex, c: Complex, n: u32) -> Complex {
    for _ in 0..n {
        z = z * z + c;
    }
    z
}

/// Compute `Λ = ∏_{k=0..n-1} φ'(z_k)` where `φ'(z) = 2z` and
/// `z_{k+1} = z_k² + c`, starting from `z0`.
///
/// Returns `(Λ, z_n)` so callers can slide the window forward without
/// recomputing the orbit from scratch.
pub fn multiplier(n: u32, mut z: Complex, c: Complex) -> (Complex, Complex) {
    let mut lambda = Complex::new(1.0, 0.0);
    for _ in 0..n {
        lambda = lambda * (z * 2.0);
        z = z * z + c;
    }
    (lambda, z)
}

/// Return `true` iff `|multiplier(n, z_k, c)| < 1` for every orbit offset
/// `k` in `0..max(n, max_period)`.
///
/// Checking a window of successive offsets — rather than a single sample —
/// resists false positives from orbits that are merely close to, but not
/// actually converging on, a period-`n` cycle.
pub fn is_period(n: u32, mut z: Complex, c: Complex, max_period: u32) -> bool {
    let horizon = n.max(max_period);
    for _ in 0..horizon {
        let (lambda, _) = multiplier(n, z, c);
        if lambda.norm() >= 1.0 {
            return false;
        }
        z = z * z + c;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::default()
    }

    #[test]
    fn origin_classifies_as_period_one() {
        // c = 0: the orbit is 0, 0, 0, ... — a superattracting fixed point.
        assert_eq!(
            classifier().classify(Complex::new(0.0, 0.0)),
            PointClass::Periodic { period: 1 }
        );
    }

    #[test]
    fn far_point_escapes_immediately() {
        match classifier().classify(Complex::new(10.0, 0.0)) {
            PointClass::Escaped { escape_time } => assert_eq!(escape_time, 1),
            other => panic!("expected escape, got {other:?}"),
        }
    }

    #[test]
    fn positive_real_axis_escapes() {
        // c = 0.5 is outside the set.
        let result = classifier().classify(Complex::new(0.5, 0.0));
        assert!(matches!(result, PointClass::Escaped { .. }));
    }

    #[test]
    fn known_escape_count() {
        // c = 1.0: z1 = 1 (|z|²=1), z2 = 2 (|z|²=4, not > 4), z3 = 5 (|z|²=25 > 4).
        match classifier().classify(Complex::new(1.0, 0.0)) {
            PointClass::Escaped { escape_time } => assert_eq!(escape_time, 3),
            other => panic!("expected escape, got {other:?}"),
        }
    }

    #[test]
    fn cardioid_center_is_periodic() {
        // c = -0.5 lies deep in the main cardioid.
        let result = classifier().classify(Complex::new(-0.5, 0.0));
        assert!(matches!(result, PointClass::Periodic { period: 1 }));
    }

    #[test]
    fn period_two_bulb_center_is_periodic_two() {
        // c = -1.0 is the centre of the period-2 bulb: orbit 0, -1, 0, -1, ...
        let result = classifier().classify(Complex::new(-1.0, 0.0));
        assert!(matches!(result, PointClass::Periodic { period: 2 }));
    }

    #[test]
    fn deterministic_results() {
        let c = classifier();
        let points = [
            Complex::new(0.0, 0.0),
            Complex::new(-0.75, 0.1),
            Complex::new(0.3, 0.5),
            Complex::new(-2.0, 0.0),
            Complex::new(1.0, 1.0),
        ];
        let run1: Vec<_> = points.iter().map(|&c0| c.classify(c0)).collect();
        let run2: Vec<_> = points.iter().map(|&c0| c.classify(c0)).collect();
        assert_eq!(run1, run2, "classification must be deterministic");
    }

    #[test]
    fn multiplier_of_fixed_point_at_origin() {
        // z=0 is a fixed point of c=0; the derivative there is 0.
        let (lambda, z1) = multiplier(1, Complex::ZERO, Complex::ZERO);
        assert_eq!(lambda, Complex::ZERO);
        assert_eq!(z1, Complex::ZERO);
    }

    #[test]
    fn is_period_true_for_superattracting_fixed_point() {
        assert!(is_period(1, Complex::ZERO, Complex::ZERO, 8));
    }

    #[test]
    fn is_period_false_for_repelling_fixed_point() {
        // c = -2: the orbit lands exactly on the repelling fixed point z=2
        // (|2z| = 4 there), so no attracting period-1 cycle exists.
        let c = Complex::new(-2.0, 0.0);
        let z = iterate(Complex::ZERO, c, 50);
        assert!(!is_period(1, z, c, 8));
    }
}
