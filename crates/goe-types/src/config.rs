// ─────────────────────────────────────────────────────────────────────
// Geometrodynamics of Entropy — Kernel Configuration
// ─────────────────────────────────────────────────────────────────────

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GoeError, GoeResult};
use crate::state::InitialConditions;

fn require_positive(name: &str, value: f64) -> GoeResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(GoeError::Config(format!(
            "{name} must be finite and > 0, got {value}"
        )));
    }
    Ok(())
}

fn require_finite(name: &str, value: f64) -> GoeResult<()> {
    if !value.is_finite() {
        return Err(GoeError::Config(format!("{name} must be finite, got {value}")));
    }
    Ok(())
}

fn require_span(name: &str, span: (f64, f64)) -> GoeResult<()> {
    require_finite(name, span.0)?;
    require_finite(name, span.1)?;
    if span.0 == span.1 {
        return Err(GoeError::Config(format!(
            "{name} must have distinct endpoints, got ({}, {})",
            span.0, span.1
        )));
    }
    Ok(())
}

/// Geometry of the Camargo metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricConfig {
    /// First compactification radius (m). Default: 1.0e-18.
    pub r1: f64,
    /// Second compactification radius (m). Default: 1.1e-16.
    pub r2: f64,
    /// Third compactification radius (m). Default: 2.0e-16.
    pub r3: f64,
    /// Torsion coupling κ. Default: 1.0.
    pub kappa: f64,
    /// Torsion UV cutoff Λτ (GeV). Default: 1.8.
    pub lambda_tau: f64,
    /// Central finite-difference step for metric derivatives. Default: 1e-8.
    pub fd_step: f64,
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            r1: 1.0e-18,
            r2: 1.1e-16,
            r3: 2.0e-16,
            kappa: 1.0,
            lambda_tau: 1.8,
            fd_step: 1e-8,
        }
    }
}

impl MetricConfig {
    /// Radii and κ only; everything else at default.
    pub fn with_radii(r1: f64, r2: f64, r3: f64, kappa: f64) -> Self {
        Self {
            r1,
            r2,
            r3,
            kappa,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> GoeResult<()> {
        require_positive("r1", self.r1)?;
        require_positive("r2", self.r2)?;
        require_positive("r3", self.r3)?;
        require_finite("kappa", self.kappa)?;
        require_positive("lambda_tau", self.lambda_tau)?;
        require_positive("fd_step", self.fd_step)?;
        Ok(())
    }
}

/// Mode truncation and units for the fibre quantizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantizationConfig {
    /// UV cutoff scale (GeV). Default: 1.8.
    pub cutoff_scale: f64,
    /// Modes kept along θ. Default: 100.
    pub n_modes_theta: usize,
    /// Modes kept along ξ. Default: 100.
    pub n_modes_xi: usize,
    /// Reduced Planck constant; natural units. Default: 1.0.
    pub hbar: f64,
}

impl Default for QuantizationConfig {
    fn default() -> Self {
        Self {
            cutoff_scale: 1.8,
            n_modes_theta: 100,
            n_modes_xi: 100,
            hbar: 1.0,
        }
    }
}

impl QuantizationConfig {
    pub fn validate(&self) -> GoeResult<()> {
        require_positive("cutoff_scale", self.cutoff_scale)?;
        require_positive("hbar", self.hbar)?;
        if self.n_modes_theta == 0 || self.n_modes_xi == 0 {
            return Err(GoeError::Config(format!(
                "mode counts must be >= 1, got theta={} xi={}",
                self.n_modes_theta, self.n_modes_xi
            )));
        }
        Ok(())
    }
}

/// Background cosmology and torsion-sector amplitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CosmologyConfig {
    /// Hubble constant (km/s/Mpc). Default: 67.0.
    pub h0: f64,
    /// Matter density parameter. Default: 0.31.
    pub omega_m: f64,
    /// Dark-energy density parameter. Default: 0.69.
    pub omega_lambda: f64,
    /// Radiation density parameter. Default: 5.4e-5.
    pub omega_r: f64,
    /// Bounce redshift. Default: 1e6.
    pub z_bounce: f64,
    /// Torsion density amplitude α_τ. Default: 0.03.
    pub alpha_torsion: f64,
    /// Bounce oscillation amplitude δ_b. Default: 0.001.
    pub delta_bounce: f64,
}

impl Default for CosmologyConfig {
    fn default() -> Self {
        Self {
            h0: 67.0,
            omega_m: 0.31,
            omega_lambda: 0.69,
            omega_r: 5.4e-5,
            z_bounce: 1e6,
            alpha_torsion: 0.03,
            delta_bounce: 0.001,
        }
    }
}

impl CosmologyConfig {
    pub fn validate(&self) -> GoeResult<()> {
        require_positive("h0", self.h0)?;
        for (name, value) in [
            ("omega_m", self.omega_m),
            ("omega_lambda", self.omega_lambda),
            ("omega_r", self.omega_r),
        ] {
            require_finite(name, value)?;
            if value < 0.0 {
                return Err(GoeError::Config(format!("{name} must be >= 0, got {value}")));
            }
        }
        require_finite("z_bounce", self.z_bounce)?;
        require_finite("alpha_torsion", self.alpha_torsion)?;
        require_finite("delta_bounce", self.delta_bounce)?;
        Ok(())
    }
}

/// Embedded Runge–Kutta pair used by the cosmic integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OdeMethod {
    /// Dormand–Prince 5(4).
    #[default]
    #[serde(rename = "RK45")]
    Rk45,
    /// Bogacki–Shampine 3(2).
    #[serde(rename = "RK23")]
    Rk23,
}

impl fmt::Display for OdeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OdeMethod::Rk45 => write!(f, "RK45"),
            OdeMethod::Rk23 => write!(f, "RK23"),
        }
    }
}

impl FromStr for OdeMethod {
    type Err = GoeError;

    fn from_str(s: &str) -> GoeResult<Self> {
        match s.to_ascii_uppercase().as_str() {
            "RK45" => Ok(OdeMethod::Rk45),
            "RK23" => Ok(OdeMethod::Rk23),
            other => Err(GoeError::Config(format!("unknown ODE method: {other}"))),
        }
    }
}

/// Solver tolerances and output sampling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Default: RK45.
    pub method: OdeMethod,
    /// Relative tolerance. Default: 1e-8.
    pub rtol: f64,
    /// Absolute tolerance. Default: 1e-10.
    pub atol: f64,
    /// Uniform output samples per integration. Default: 10 000.
    pub n_points: usize,
    /// Accepted + rejected step budget. Default: 1 000 000.
    pub max_steps: usize,
    /// Span used when the caller passes none: 0 to present age (years).
    pub t_span: (f64, f64),
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            method: OdeMethod::Rk45,
            rtol: 1e-8,
            atol: 1e-10,
            n_points: 10_000,
            max_steps: 1_000_000,
            t_span: (0.0, 13.8e9),
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> GoeResult<()> {
        require_positive("rtol", self.rtol)?;
        require_positive("atol", self.atol)?;
        if self.n_points < 2 {
            return Err(GoeError::Config(format!(
                "n_points must be >= 2, got {}",
                self.n_points
            )));
        }
        if self.max_steps == 0 {
            return Err(GoeError::Config("max_steps must be > 0".to_string()));
        }
        require_span("t_span", self.t_span)?;
        Ok(())
    }
}

/// Two-phase bounce schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceConfig {
    /// Minimum scale factor at the bounce. Default: 1e-6.
    pub bounce_scale: f64,
    /// Time of the bounce (phase join). Default: 0.0.
    pub bounce_time: f64,
    /// Contraction span. Default: (-1e6, 0).
    pub pre_span: (f64, f64),
    /// Expansion span. Default: (0, 13.8e9).
    pub post_span: (f64, f64),
    /// Contraction start. Default: a = 1, H = -100.
    pub pre_initial: InitialConditions,
    /// Expansion start. Default: a = 1e-6, H = 1e6.
    pub post_initial: InitialConditions,
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            bounce_scale: 1e-6,
            bounce_time: 0.0,
            pre_span: (-1e6, 0.0),
            post_span: (0.0, 13.8e9),
            pre_initial: InitialConditions::contraction(),
            post_initial: InitialConditions::expansion(),
        }
    }
}

impl BounceConfig {
    pub fn validate(&self) -> GoeResult<()> {
        require_positive("bounce_scale", self.bounce_scale)?;
        require_finite("bounce_time", self.bounce_time)?;
        require_span("pre_span", self.pre_span)?;
        require_span("post_span", self.post_span)?;
        self.pre_initial
            .validate()
            .map_err(|e| GoeError::Config(format!("pre_initial: {e}")))?;
        self.post_initial
            .validate()
            .map_err(|e| GoeError::Config(format!("post_initial: {e}")))?;
        Ok(())
    }
}

/// Full kernel configuration; every section falls back to its default.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GoeConfig {
    pub metric: MetricConfig,
    pub quantization: QuantizationConfig,
    pub cosmology: CosmologyConfig,
    pub solver: SolverConfig,
    pub bounce: BounceConfig,
}

impl GoeConfig {
    pub fn validate(&self) -> GoeResult<()> {
        self.metric.validate()?;
        self.quantization.validate()?;
        self.cosmology.validate()?;
        self.solver.validate()?;
        self.bounce.validate()?;
        Ok(())
    }

    /// Load from JSON string.
    pub fn from_json(json: &str) -> GoeResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| GoeError::Config(format!("JSON parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
