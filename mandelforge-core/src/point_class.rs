/// The classification of a single pixel's complex coordinate.
///
/// Two `PointClass` values are equal only when they are the same variant
/// with matching fields — `Escaped` values compare `escape_time`,
/// `Periodic` values compare `period`, and `Undetermined` only equals
/// itself. This is deliberately stricter than "visual" equality (where,
/// say, two different escape times might render the same color): it is
/// the equality the Mariani–Silver subdivider uses to decide whether a
/// tile's border is uniform enough to flood-fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointClass {
    /// The orbit left the bailout radius after `escape_time` iterations.
    Escaped { escape_time: u32 },
    /// The orbit never escaped and was found to approach an attracting
    /// cycle of length `period` (`1..=MAX_PERIOD`).
    Periodic { period: u32 },
    /// The orbit never escaped and no attracting cycle up to `MAX_PERIOD`
    /// was detected. Common near the set boundary and for chaotic but
    /// bounded orbits.
    Undetermined,
}

impl PointClass {
    /// `true` for the `Escaped` variant.
    ///
    /// Used by the edge detector (spec.md §4.7), which treats anything
    /// that is not `Escaped` — including `Undetermined` — as "interior"
    /// for the purposes of boundary tracing.
    #[inline]
    pub fn is_escaped(&self) -> bool {
        matches!(self, Self::Escaped { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaped_equality_compares_escape_time() {
        assert_eq!(
            PointClass::Escaped { escape_time: 10 },
            PointClass::Escaped { escape_time: 10 }
        );
        assert_ne!(
            PointClass::Escaped { escape_time: 10 },
            PointClass::Escaped { escape_time: 11 }
        );
    }

    #[test]
    fn periodic_equality_compares_period() {
        assert_eq!(
            PointClass::Periodic { period: 3 },
            PointClass::Periodic { period: 3 }
        );
        assert_ne!(
            PointClass::Periodic { period: 3 },
            PointClass::Periodic { period: 4 }
        );
    }

    #[test]
    fn undetermined_equals_only_itself() {
        assert_eq!(PointClass::Undetermined, PointClass::Undetermined);
    }

    #[test]
    fn cross_variant_always_unequal() {
        assert_ne!(
            PointClass::Escaped { escape_time: 1 },
            PointClass::Periodic { period: 1 }
        );
        assert_ne!(PointClass::Escaped { escape_time: 1 }, PointClass::Undetermined);
        assert_ne!(PointClass::Periodic { period: 1 }, PointClass::Undetermined);
    }

    #[test]
    fn is_escaped_flags_only_escaped_variant() {
        assert!(PointClass::Escaped { escape_time: 5 }.is_escaped());
        assert!(!PointClass::Periodic { period: 1 }.is_escaped());
        assert!(!PointClass::Undetermined.is_escaped());
    }
}
