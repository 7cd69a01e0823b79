// ─────────────────────────────────────────────────────────────────────
// Geometrodynamics of Entropy — Friedmann–Cartan Integrator
// ─────────────────────────────────────────────────────────────────────
//! Modified Friedmann equations with a torsion scalar φ, y = (a, H, φ, φ̇):
//!
//!   ȧ = aH
//!   Ḣ = −½ · 8πG (ρ_m + ρ_r + 3ρ_Λ + p_τ)
//!   φ̈ = −3Hφ̇ − α_τ K cos(φK),   K = √α / R2
//!
//!   ρ_τ = α_τ H0²/(8πG) (1 + δ_b sin(φK)) a⁻⁶,   p_τ = −ρ_τ/3
//!
//! G is Newton's constant rescaled to Mpc² and solar masses.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use goe_geometry::MetricSpace;
use goe_types::{
    CosmicState, CosmologyConfig, GoeError, GoeResult, InitialConditions, OdeMethod, SolverConfig,
};

use crate::solver::{EmbeddedRk, State, Trajectory};

/// Newton's constant in cosmological units: 6.67e-11 · (3.086e22)² / 1.989e30.
pub const G_NEWTON: f64 = 6.67e-11 * (3.086e22 * 3.086e22) / 1.989e30;

/// Floor applied to a non-positive scale factor inside the right-hand side.
pub const SCALE_FACTOR_FLOOR: f64 = 1e-10;

/// Uniformly sampled solution of one integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosmicHistory {
    pub t: Vec<f64>,
    pub a: Vec<f64>,
    #[serde(rename = "H")]
    pub h: Vec<f64>,
    pub phi: Vec<f64>,
    pub dphi: Vec<f64>,
    /// z = 1/a − 1.
    pub z: Vec<f64>,
    /// ρ_m + ρ_r + ρ_Λ + ρ_τ at each sample.
    pub rho_total: Vec<f64>,
    pub success: bool,
    pub message: String,
    /// Accepted solver steps.
    pub n_steps: usize,
    pub n_rhs_evals: usize,
}

impl CosmicHistory {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn state(&self, index: usize) -> Option<CosmicState> {
        Some(CosmicState {
            a: *self.a.get(index)?,
            h: *self.h.get(index)?,
            phi: *self.phi.get(index)?,
            dphi: *self.dphi.get(index)?,
        })
    }

    pub fn final_state(&self) -> Option<CosmicState> {
        self.state(self.len().checked_sub(1)?)
    }
}

/// Friedmann–Cartan system bound to one geometry. Immutable; initial
/// conditions are supplied per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CosmicIntegrator {
    metric: MetricSpace,
    cosmology: CosmologyConfig,
    solver: SolverConfig,
}

impl CosmicIntegrator {
    pub fn new(
        metric: &MetricSpace,
        cosmology: CosmologyConfig,
        solver: SolverConfig,
    ) -> GoeResult<Self> {
        cosmology.validate()?;
        solver.validate()?;
        Ok(Self {
            metric: *metric,
            cosmology,
            solver,
        })
    }

    /// Default cosmology and solver settings.
    pub fn with_defaults(metric: &MetricSpace) -> Self {
        Self {
            metric: *metric,
            cosmology: CosmologyConfig::default(),
            solver: SolverConfig::default(),
        }
    }

    pub fn metric(&self) -> &MetricSpace {
        &self.metric
    }

    pub fn cosmology(&self) -> &CosmologyConfig {
        &self.cosmology
    }

    pub fn solver(&self) -> &SolverConfig {
        &self.solver
    }

    /// H0² / (8πG): converts a density parameter into a density.
    #[inline]
    fn critical_scale(&self) -> f64 {
        self.cosmology.h0.powi(2) / (8.0 * PI * G_NEWTON)
    }

    /// K = √α / R2, the torsion field wavenumber.
    #[inline]
    pub fn torsion_wavenumber(&self) -> f64 {
        self.metric.alpha().sqrt() / self.metric.r2()
    }

    pub fn rho_matter(&self, a: f64) -> f64 {
        self.cosmology.omega_m * self.critical_scale() * a.powi(-3)
    }

    pub fn rho_radiation(&self, a: f64) -> f64 {
        self.cosmology.omega_r * self.critical_scale() * a.powi(-4)
    }

    /// Constant; `a` is accepted for symmetry with the other densities.
    pub fn rho_lambda(&self, _a: f64) -> f64 {
        self.cosmology.omega_lambda * self.critical_scale()
    }

    pub fn rho_torsion(&self, a: f64, phi: f64) -> f64 {
        let oscillation = (phi * self.torsion_wavenumber()).sin();
        self.cosmology.alpha_torsion
            * self.critical_scale()
            * (1.0 + self.cosmology.delta_bounce * oscillation)
            * a.powi(-6)
    }

    pub fn pressure_torsion(&self, a: f64, phi: f64) -> f64 {
        -self.rho_torsion(a, phi) / 3.0
    }

    /// dV/dφ = α_τ K cos(φK).
    pub fn torsion_potential_derivative(&self, phi: f64) -> f64 {
        let k = self.torsion_wavenumber();
        self.cosmology.alpha_torsion * k * (phi * k).cos()
    }

    pub fn rho_total(&self, a: f64, phi: f64) -> f64 {
        self.rho_matter(a) + self.rho_radiation(a) + self.rho_lambda(a) + self.rho_torsion(a, phi)
    }

    /// Right-hand side dy/dt. Time-independent.
    pub fn derivatives(&self, _t: f64, y: &State) -> State {
        let [a, h, phi, dphi] = *y;
        let a = if a <= 0.0 { SCALE_FACTOR_FLOOR } else { a };
        let source = self.rho_matter(a)
            + self.rho_radiation(a)
            + 3.0 * self.rho_lambda(a)
            + self.pressure_torsion(a, phi);
        let dh_dt = -0.5 * 8.0 * PI * G_NEWTON * source;
        let d2phi_dt2 = -3.0 * h * dphi - self.torsion_potential_derivative(phi);
        [a * h, dh_dt, dphi, d2phi_dt2]
    }

    /// Integrate from `initial` over `t_span` (default: the solver span).
    ///
    /// Any solver failure is logged and mapped to `None`; use
    /// `try_integrate` to inspect the cause.
    pub fn integrate(
        &self,
        initial: &InitialConditions,
        t_span: Option<(f64, f64)>,
        method: Option<OdeMethod>,
    ) -> Option<CosmicHistory> {
        match self.try_integrate(initial, t_span, method) {
            Ok(history) => Some(history),
            Err(e) => {
                log::warn!("Integration failed: {e}");
                None
            }
        }
    }

    pub fn try_integrate(
        &self,
        initial: &InitialConditions,
        t_span: Option<(f64, f64)>,
        method: Option<OdeMethod>,
    ) -> GoeResult<CosmicHistory> {
        initial.validate()?;
        let t_span = t_span.unwrap_or(self.solver.t_span);
        let method = method.unwrap_or(self.solver.method);
        let y0 = initial.as_state().to_array();

        let mut solver = EmbeddedRk::new(method, &self.solver, |t, y: &State| {
            self.derivatives(t, y)
        });
        let trajectory = solver.solve(t_span, y0)?;
        if let Some(bad) = trajectory.y.iter().position(|y| y.iter().any(|v| !v.is_finite())) {
            return Err(GoeError::Numerical(format!(
                "non-finite sample at t={}",
                trajectory.t[bad]
            )));
        }
        log::debug!(
            "{method} over ({:e}, {:e}): {} accepted, {} rejected, {} rhs evals",
            t_span.0,
            t_span.1,
            trajectory.n_accepted,
            trajectory.n_rejected,
            trajectory.n_rhs_evals
        );
        Ok(self.history_from(trajectory))
    }

    fn history_from(&self, trajectory: Trajectory) -> CosmicHistory {
        let n = trajectory.t.len();
        let mut a = Vec::with_capacity(n);
        let mut h = Vec::with_capacity(n);
        let mut phi = Vec::with_capacity(n);
        let mut dphi = Vec::with_capacity(n);
        for y in &trajectory.y {
            a.push(y[0]);
            h.push(y[1]);
            phi.push(y[2]);
            dphi.push(y[3]);
        }
        let z = a.iter().map(|&ai| 1.0 / ai - 1.0).collect();
        let rho_total = a
            .iter()
            .zip(phi.iter())
            .map(|(&ai, &pi)| self.rho_total(ai, pi))
            .collect();
        CosmicHistory {
            t: trajectory.t,
            a,
            h,
            phi,
            dphi,
            z,
            rho_total,
            success: true,
            message: "The solver successfully reached the end of the integration interval."
                .to_string(),
            n_steps: trajectory.n_accepted,
            n_rhs_evals: trajectory.n_rhs_evals,
        }
    }
}
