// ─────────────────────────────────────────────────────────────────────
// Geometrodynamics of Entropy — Canonical Parameters
// ─────────────────────────────────────────────────────────────────────
//! Canonical geometry constants. Runtime defaults live in
//! `goe_types::MetricConfig`; these are the catalogue values it uses
//! plus derived constants that are not tunable.

use std::f64::consts::PI;

/// First compactification radius (m).
pub const R1_CANONICAL: f64 = 1.0e-18;
/// Second compactification radius (m).
pub const R2_CANONICAL: f64 = 1.1e-16;
/// Third compactification radius (m).
pub const R3_CANONICAL: f64 = 2.0e-16;
/// Torsion UV cutoff Λτ (GeV).
pub const LAMBDA_TAU: f64 = 1.8;

/// Fractional shift of π induced by the compact directions.
pub const DELTA_PI: f64 = 8.854e-10;
/// π(1 + δπ).
pub const PI_MODIFIED: f64 = PI * (1.0 + DELTA_PI);
/// (1 + √5) / 2.
pub const PHI_GOLDEN: f64 = 1.618_033_988_749_895;
/// Cosmological constant scale (eV).
pub const LAMBDA_COSMOLOGICAL: f64 = 2.036e-3;

/// Regulator below which a metric determinant counts as singular.
pub const SINGULAR_DET_THRESHOLD: f64 = f64::EPSILON;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_ratio() {
        assert!((PHI_GOLDEN - (1.0 + 5f64.sqrt()) / 2.0).abs() < 1e-15);
        assert!((PHI_GOLDEN * PHI_GOLDEN - PHI_GOLDEN - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pi_modified_exceeds_pi() {
        assert!(PI_MODIFIED > PI);
        assert!(((PI_MODIFIED / PI) - 1.0 - DELTA_PI).abs() < 1e-15);
    }

    #[test]
    #[allow(clippy::assertions_on_constants)]
    fn test_radii_ordering() {
        assert!(R1_CANONICAL < R2_CANONICAL && R2_CANONICAL < R3_CANONICAL);
    }
}
