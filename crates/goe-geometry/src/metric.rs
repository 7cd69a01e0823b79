// ─────────────────────────────────────────────────────────────────────
// Geometrodynamics of Entropy — Camargo Metric
// ─────────────────────────────────────────────────────────────────────
//! Point evaluation of the 6-D metric and its derived tensors.
//!
//!   g = diag(−1, 1, 1, 1, g_θθ, g_ξξ) + g_θξ (off-diagonal)
//!   g_θθ = α(1 + κ cos(θ/R2)),  g_ξξ = β(1 + κ cos(ξ/R3))
//!   g_θξ = κ √(αβ) sin(θ/R2 + ξ/R3)
//!
//! Non-finite coordinates are not trapped: they yield non-finite
//! components. Use `Coordinates::ensure_finite` for guarded evaluation.

use nalgebra::{Matrix6, SymmetricEigen};
use serde::{Deserialize, Serialize};

use goe_types::{Coordinates, GoeResult, MetricConfig, DIM};

use crate::params::SINGULAR_DET_THRESHOLD;
use crate::tensors::{
    ChristoffelSymbols, Inversion, MetricDerivatives, MetricTensor, RiemannTensor, TorsionTensor,
};

const THETA: usize = 4;
const XI: usize = 5;

/// Jacobi sweeps allowed for the pseudo-inverse eigendecomposition.
const EIGEN_MAX_ITER: usize = 1000;

/// Parameters of one Camargo geometry. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSpace {
    config: MetricConfig,
    alpha: f64,
    beta: f64,
}

impl Default for MetricSpace {
    fn default() -> Self {
        Self::from_valid(MetricConfig::default())
    }
}

impl MetricSpace {
    /// Validates radii, cutoff and step; κ may take any finite value,
    /// including ones that make the metric singular somewhere.
    pub fn new(config: MetricConfig) -> GoeResult<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: MetricConfig) -> Self {
        Self {
            alpha: (config.r2 / config.r1).powi(2),
            beta: (config.r3 / config.r1).powi(2),
            config,
        }
    }

    pub fn config(&self) -> &MetricConfig {
        &self.config
    }

    pub fn r1(&self) -> f64 {
        self.config.r1
    }

    pub fn r2(&self) -> f64 {
        self.config.r2
    }

    pub fn r3(&self) -> f64 {
        self.config.r3
    }

    pub fn kappa(&self) -> f64 {
        self.config.kappa
    }

    pub fn lambda_tau(&self) -> f64 {
        self.config.lambda_tau
    }

    /// α = (R2/R1)².
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// β = (R3/R1)².
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// g_{μν} at `coords`.
    pub fn metric_tensor(&self, coords: &Coordinates) -> MetricTensor {
        let MetricConfig { r2, r3, kappa, .. } = self.config;
        let (theta, xi) = (coords.theta(), coords.xi());

        let mut g = Matrix6::zeros();
        g[(0, 0)] = -1.0;
        g[(1, 1)] = 1.0;
        g[(2, 2)] = 1.0;
        g[(3, 3)] = 1.0;

        g[(THETA, THETA)] = self.alpha * (1.0 + kappa * (theta / r2).cos());
        g[(XI, XI)] = self.beta * (1.0 + kappa * (xi / r3).cos());

        let cross = kappa * (self.alpha * self.beta).sqrt() * (theta / r2 + xi / r3).sin();
        g[(THETA, XI)] = cross;
        g[(XI, THETA)] = cross;

        MetricTensor::from_matrix(g)
    }

    pub fn determinant(&self, coords: &Coordinates) -> f64 {
        self.metric_tensor(coords).matrix().determinant()
    }

    /// g^{μν} at `coords`; see [`MetricSpace::inverse_metric_with_kind`].
    pub fn inverse_metric(&self, coords: &Coordinates) -> MetricTensor {
        self.inverse_metric_with_kind(coords).0
    }

    /// g^{μν} together with how it was obtained.
    ///
    /// A singular metric (|det g| ≤ ε, or an LU inverse that fails or is
    /// non-finite) falls back to the Moore–Penrose pseudo-inverse with a
    /// warning. Non-finite metrics are passed straight through.
    pub fn inverse_metric_with_kind(&self, coords: &Coordinates) -> (MetricTensor, Inversion) {
        invert_metric(&self.metric_tensor(coords))
    }

    /// ∂_ρ g_{μν} by central differences with step `fd_step`.
    ///
    /// The metric is sampled once per displaced point (12 samples).
    pub fn metric_derivatives(&self, coords: &Coordinates) -> MetricDerivatives {
        let eps = self.config.fd_step;
        let samples: Vec<(MetricTensor, MetricTensor)> = (0..DIM)
            .map(|rho| {
                (
                    self.metric_tensor(&coords.shifted(rho, eps)),
                    self.metric_tensor(&coords.shifted(rho, -eps)),
                )
            })
            .collect();

        MetricDerivatives::from_fn(|rho, mu, nu| {
            let (g_plus, g_minus) = &samples[rho];
            (g_plus[(mu, nu)] - g_minus[(mu, nu)]) / (2.0 * eps)
        })
    }

    /// Γ^σ_{μν} at `coords`.
    pub fn christoffel_symbols(&self, coords: &Coordinates) -> ChristoffelSymbols {
        let inverse = self.inverse_metric(coords);
        let derivatives = self.metric_derivatives(coords);
        ChristoffelSymbols::from_metric(&inverse, &derivatives)
    }

    /// Connection-only R^μ_{νρσ} at `coords`.
    pub fn riemann_tensor(&self, coords: &Coordinates) -> RiemannTensor {
        RiemannTensor::from_connection(&self.christoffel_symbols(coords))
    }

    /// T^μ_{νρ} at `coords`, defined analytically from the fibre angles.
    pub fn torsion_tensor(&self, coords: &Coordinates) -> TorsionTensor {
        let MetricConfig { r2, r3, kappa, .. } = self.config;
        let (theta, xi) = (coords.theta(), coords.xi());
        let mut torsion = TorsionTensor::zero();

        torsion.set_antisymmetric(THETA, 0, 1, kappa * (theta / r2).sin() / r2);
        torsion.set_antisymmetric(XI, 0, 2, kappa * (xi / r3).sin() / r3);

        let cross = kappa * (theta / r2 + xi / r3).cos() / (r2 * r3);
        torsion.set_antisymmetric(THETA, XI, 0, cross);
        torsion.set_antisymmetric(XI, THETA, 0, -cross);

        torsion
    }
}

/// Inverts a metric, falling back to the pseudo-inverse when singular.
pub fn invert_metric(metric: &MetricTensor) -> (MetricTensor, Inversion) {
    let g = *metric.matrix();
    if !metric.is_finite() {
        let inv = g.try_inverse().unwrap_or_else(|| Matrix6::repeat(f64::NAN));
        return (MetricTensor::from_matrix(inv), Inversion::NonFinite);
    }

    let det = g.determinant();
    if det.abs() > SINGULAR_DET_THRESHOLD {
        if let Some(inv) = g.try_inverse() {
            if inv.iter().all(|v| v.is_finite()) {
                return (MetricTensor::from_matrix(inv), Inversion::Exact);
            }
        }
    }

    log::warn!("metric tensor is singular (det = {det:e}), using pseudo-inverse");
    (MetricTensor::from_matrix(pseudo_inverse(&g)), Inversion::Pseudo)
}

/// Moore–Penrose inverse of a symmetric matrix via its eigendecomposition.
///
/// Eigenvalues below max|λ|·n·ε are treated as zero.
fn pseudo_inverse(g: &Matrix6<f64>) -> Matrix6<f64> {
    let eig = match SymmetricEigen::try_new(*g, f64::EPSILON, EIGEN_MAX_ITER) {
        Some(eig) => eig,
        None => {
            log::warn!("pseudo-inverse eigendecomposition did not converge");
            return Matrix6::repeat(f64::NAN);
        }
    };

    let largest = eig.eigenvalues.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    let cutoff = largest * DIM as f64 * f64::EPSILON;

    let mut pinv = Matrix6::zeros();
    for k in 0..DIM {
        let lambda = eig.eigenvalues[k];
        if lambda.abs() > cutoff {
            let v = eig.eigenvectors.column(k);
            pinv += (v * v.transpose()) / lambda;
        }
    }
    pinv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{R1_CANONICAL, R2_CANONICAL, R3_CANONICAL};

    fn unit_space(kappa: f64) -> MetricSpace {
        MetricSpace::new(MetricConfig::with_radii(1.0, 1.1, 2.0, kappa)).unwrap()
    }

    fn sample_points() -> Vec<Coordinates> {
        vec![
            Coordinates::origin(),
            Coordinates::new(1.0, -2.0, 0.5, 3.0, 0.3, 0.2),
            Coordinates::new(0.0, 0.0, 0.0, 0.0, 2.5, -1.7),
            Coordinates::new(-4.0, 1.0, 1.0, 1.0, 1e-16, 3e-16),
        ]
    }

    #[test]
    fn test_default_matches_canonical_params() {
        let m = MetricSpace::default();
        assert_eq!(m.r1(), R1_CANONICAL);
        assert_eq!(m.r2(), R2_CANONICAL);
        assert_eq!(m.r3(), R3_CANONICAL);
        assert!((m.alpha() - 12_100.0).abs() / 12_100.0 < 1e-12, "alpha={}", m.alpha());
        assert!((m.beta() - 40_000.0).abs() / 40_000.0 < 1e-12, "beta={}", m.beta());
    }

    #[test]
    fn test_invalid_radius_rejected() {
        assert!(MetricSpace::new(MetricConfig::with_radii(0.0, 1.0, 2.0, 1.0)).is_err());
        assert!(MetricSpace::new(MetricConfig::with_radii(1.0, f64::NAN, 2.0, 1.0)).is_err());
    }

    #[test]
    fn test_minkowski_block_and_symmetry() {
        for space in [MetricSpace::default(), unit_space(0.7)] {
            for c in sample_points() {
                let g = space.metric_tensor(&c);
                assert!(g.is_symmetric(0.0), "asymmetric at {c:?}");
                let expected = [-1.0, 1.0, 1.0, 1.0];
                for mu in 0..4 {
                    for nu in 0..4 {
                        let want = if mu == nu { expected[mu] } else { 0.0 };
                        assert_eq!(g[(mu, nu)], want, "g[{mu},{nu}] at {c:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_inverse_roundtrip_canonical_origin() {
        let space = MetricSpace::default();
        let c = Coordinates::origin();
        let (inv, kind) = space.inverse_metric_with_kind(&c);
        assert_eq!(kind, Inversion::Exact);
        let product = inv.matrix() * space.metric_tensor(&c).matrix();
        let err = (product - Matrix6::identity()).abs().max();
        assert!(err < 1e-6, "max |g⁻¹g − I| = {err}");
    }

    #[test]
    fn test_inverse_roundtrip_unit_space() {
        let space = unit_space(0.5);
        for c in sample_points() {
            let product = space.inverse_metric(&c).matrix() * space.metric_tensor(&c).matrix();
            let err = (product - Matrix6::identity()).abs().max();
            assert!(err < 1e-9, "at {c:?}: {err}");
        }
    }

    #[test]
    fn test_determinant_canonical_origin() {
        let space = MetricSpace::default();
        let det = space.determinant(&Coordinates::origin());
        let expected = -4.0 * space.alpha() * space.beta();
        assert!(((det - expected) / expected).abs() < 1e-9, "det={det}, expected={expected}");
    }

    #[test]
    fn test_degenerate_metric_uses_pseudo_inverse() {
        // κ = −1 zeroes both fibre entries and the cross term at the origin.
        let space = MetricSpace::new(MetricConfig::with_radii(1.0e-18, 1.1e-16, 2.0e-16, -1.0)).unwrap();
        let c = Coordinates::origin();
        assert_eq!(space.determinant(&c), 0.0);

        let (pinv, kind) = space.inverse_metric_with_kind(&c);
        assert_eq!(kind, Inversion::Pseudo);
        assert!(pinv.is_finite());

        let g = *space.metric_tensor(&c).matrix();
        let p = *pinv.matrix();
        let reconstructed = g * p * g;
        let scale = g.abs().max();
        assert!((reconstructed - g).abs().max() / scale < 1e-9);
        assert!(pinv[(THETA, THETA)].abs() < 1e-12);
    }

    #[test]
    fn test_nan_coordinates_propagate() {
        let space = unit_space(1.0);
        let c = Coordinates::new(0.0, 0.0, 0.0, 0.0, f64::NAN, 0.0);
        let g = space.metric_tensor(&c);
        assert!(g[(THETA, THETA)].is_nan());
        assert_eq!(g[(0, 0)], -1.0);
        let (inv, kind) = space.inverse_metric_with_kind(&c);
        assert_eq!(kind, Inversion::NonFinite);
        assert!(!inv.is_finite());
    }

    #[test]
    fn test_infinite_metric_is_tagged_non_finite() {
        let mut m = Matrix6::identity();
        m[(1, 1)] = f64::INFINITY;
        let (_, kind) = invert_metric(&MetricTensor::from_matrix(m));
        assert_eq!(kind, Inversion::NonFinite);
    }

    #[test]
    fn test_christoffel_symmetric_lower_indices() {
        for space in [MetricSpace::default(), unit_space(0.5)] {
            for c in sample_points() {
                let gamma = space.christoffel_symbols(&c);
                for sigma in 0..DIM {
                    for mu in 0..DIM {
                        for nu in 0..DIM {
                            let a = gamma.coefficient(sigma, mu, nu);
                            let b = gamma.coefficient(sigma, nu, mu);
                            let tol = 1e-8 * a.abs().max(1.0);
                            assert!((a - b).abs() <= tol, "Γ[{sigma},{mu},{nu}]={a} vs {b}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_christoffel_flat_directions_vanish() {
        let space = unit_space(0.5);
        let gamma = space.christoffel_symbols(&Coordinates::new(1.0, 2.0, 3.0, 4.0, 0.3, 0.2));
        for sigma in 0..4 {
            for mu in 0..DIM {
                for nu in 0..DIM {
                    assert_eq!(gamma.coefficient(sigma, mu, nu), 0.0, "Γ[{sigma},{mu},{nu}]");
                }
            }
        }
    }

    #[test]
    fn test_christoffel_matches_analytic_derivatives() {
        let space = unit_space(0.5);
        let c = Coordinates::new(0.0, 0.0, 0.0, 0.0, 0.3, 0.2);
        let (a, b, k) = (space.alpha(), space.beta(), space.kappa());
        let (r2, r3) = (space.r2(), space.r3());
        let (theta, xi) = (c.theta(), c.xi());
        let phase = theta / r2 + xi / r3;
        let cross = k * (a * b).sqrt() * phase.cos();

        let analytic = MetricDerivatives::from_fn(|rho, mu, nu| match (rho, mu, nu) {
            (THETA, THETA, THETA) => -a * k * (theta / r2).sin() / r2,
            (THETA, THETA, XI) | (THETA, XI, THETA) => cross / r2,
            (XI, XI, XI) => -b * k * (xi / r3).sin() / r3,
            (XI, THETA, XI) | (XI, XI, THETA) => cross / r3,
            _ => 0.0,
        });
        let expected = ChristoffelSymbols::from_metric(&space.inverse_metric(&c), &analytic);
        let got = space.christoffel_symbols(&c);

        for sigma in 0..DIM {
            for mu in 0..DIM {
                for nu in 0..DIM {
                    let e = expected.coefficient(sigma, mu, nu);
                    let g = got.coefficient(sigma, mu, nu);
                    assert!((e - g).abs() < 1e-6, "Γ[{sigma},{mu},{nu}]: fd={g}, analytic={e}");
                }
            }
        }
    }

    #[test]
    fn test_torsion_antisymmetric() {
        for space in [MetricSpace::default(), unit_space(0.8)] {
            for c in sample_points() {
                let t = space.torsion_tensor(&c);
                for i in 0..DIM {
                    for j in 0..DIM {
                        for k in 0..DIM {
                            assert_eq!(
                                t.component(i, j, k),
                                -t.component(i, k, j),
                                "T[{i},{j},{k}] at {c:?}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_torsion_components() {
        let space = unit_space(0.8);
        let c = Coordinates::new(0.0, 0.0, 0.0, 0.0, 0.3, 0.2);
        let t = space.torsion_tensor(&c);
        let want_theta = 0.8 * (0.3f64 / 1.1).sin() / 1.1;
        let want_xi = 0.8 * (0.2f64 / 2.0).sin() / 2.0;
        let want_cross = 0.8 * (0.3f64 / 1.1 + 0.2 / 2.0).cos() / (1.1 * 2.0);
        assert!((t.component(THETA, 0, 1) - want_theta).abs() < 1e-15);
        assert!((t.component(XI, 0, 2) - want_xi).abs() < 1e-15);
        assert!((t.component(THETA, XI, 0) - want_cross).abs() < 1e-15);
        assert!((t.component(XI, THETA, 0) + want_cross).abs() < 1e-15);
        // Spacetime directions carry no torsion.
        assert!(t.components()[..4].iter().flatten().flatten().all(|&v| v == 0.0));
    }

    #[test]
    fn test_riemann_antisymmetric_in_last_pair() {
        let space = unit_space(0.5);
        let r = space.riemann_tensor(&Coordinates::new(0.0, 0.0, 0.0, 0.0, 0.9, -0.4));
        for mu in 0..DIM {
            for nu in 0..DIM {
                for rho in 0..DIM {
                    for sigma in 0..DIM {
                        let a = r.component(mu, nu, rho, sigma);
                        let b = r.component(mu, nu, sigma, rho);
                        assert!((a + b).abs() < 1e-12, "R[{mu},{nu},{rho},{sigma}]");
                    }
                }
            }
        }
    }

    #[test]
    fn test_riemann_nonzero_on_fibres() {
        let space = unit_space(0.5);
        let r = space.riemann_tensor(&Coordinates::new(0.0, 0.0, 0.0, 0.0, 0.9, -0.4));
        let norm: f64 = r.components().iter().flatten().flatten().flatten().map(|v| v * v).sum();
        assert!(norm > 0.0 && norm.is_finite(), "norm={norm}");
    }
}
