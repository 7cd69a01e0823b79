// ─────────────────────────────────────────────────────────────────────
// Geometrodynamics of Entropy — Torsion Field
// ─────────────────────────────────────────────────────────────────────
//! Massless spin-1 torsion field sourced by the fibre geometry.
//!
//!   V(θ, ξ) = κ cos(θ/R2) + κ cos(ξ/R3) + κ sin(θ/R2 + ξ/R3)
//!   D(k)    = −i / (k² + iε),  × exp(−(k² − Λτ²)/Λτ²) above the cutoff

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use goe_geometry::{MetricSpace, TorsionTensor};
use goe_types::{Coordinates, DIM};

/// Imaginary shift keeping the propagator finite at k² = 0.
pub const PROPAGATOR_EPSILON: f64 = 1e-10;

/// Coupling used by `TorsionField::with_defaults`.
pub const DEFAULT_COUPLING: f64 = 1.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TorsionField {
    metric: MetricSpace,
    /// Coupling κ.
    pub coupling: f64,
    /// Field mass (massless).
    pub mass: f64,
    /// Field spin (vector).
    pub spin: u8,
}

impl TorsionField {
    pub fn new(metric: &MetricSpace, coupling: f64) -> Self {
        Self {
            metric: *metric,
            coupling,
            mass: 0.0,
            spin: 1,
        }
    }

    /// Unit coupling (`DEFAULT_COUPLING`).
    pub fn with_defaults(metric: &MetricSpace) -> Self {
        Self::new(metric, DEFAULT_COUPLING)
    }

    pub fn metric(&self) -> &MetricSpace {
        &self.metric
    }

    pub fn potential(&self, coords: &Coordinates) -> f64 {
        let phase_theta = coords.theta() / self.metric.r2();
        let phase_xi = coords.xi() / self.metric.r3();
        self.coupling * (phase_theta.cos() + phase_xi.cos() + (phase_theta + phase_xi).sin())
    }

    /// Momentum-space propagator; `regularize` applies the exponential
    /// suppression above the torsion cutoff Λτ.
    pub fn propagator(&self, k: &[f64; DIM], regularize: bool) -> Complex64 {
        let k_squared: f64 = k.iter().map(|ki| ki * ki).sum();
        let prop = -Complex64::i() / Complex64::new(k_squared, PROPAGATOR_EPSILON);
        let cutoff_sq = self.metric.lambda_tau().powi(2);
        if regularize && k_squared > cutoff_sq {
            prop * (-(k_squared - cutoff_sq) / cutoff_sq).exp()
        } else {
            prop
        }
    }

    /// κ T^ρ_{μν}: the metric torsion scaled by the field coupling.
    pub fn interaction_vertex(&self, coords: &Coordinates) -> TorsionTensor {
        self.metric.torsion_tensor(coords).scaled(self.coupling)
    }
}

/// Regularized propagator at unit coupling.
pub fn torsion_propagator(metric: &MetricSpace, k: &[f64; DIM]) -> Complex64 {
    TorsionField::with_defaults(metric).propagator(k, true)
}
