// ─────────────────────────────────────────────────────────────────────
// Geometrodynamics of Entropy — Cosmological Bounce
// ─────────────────────────────────────────────────────────────────────
//! Contraction → bounce → expansion, run as two independent integrations
//! joined at the bounce time. Each phase takes its own initial
//! conditions; the integrator is never mutated.

use serde::{Deserialize, Serialize};

use goe_geometry::MetricSpace;
use goe_types::{BounceConfig, GoeResult, InitialConditions};

use crate::friedmann::{CosmicHistory, CosmicIntegrator};

/// Concatenated pre- and post-bounce samples.
///
/// The join time appears once at the end of the contraction and again at
/// the start of the expansion, so `t` is non-decreasing rather than
/// strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BounceHistory {
    pub t: Vec<f64>,
    pub a: Vec<f64>,
    #[serde(rename = "H")]
    pub h: Vec<f64>,
    pub phi: Vec<f64>,
    pub z: Vec<f64>,
    pub pre_len: usize,
    pub post_len: usize,
}

impl BounceHistory {
    pub fn join(pre: &CosmicHistory, post: &CosmicHistory) -> Self {
        fn cat(a: &[f64], b: &[f64]) -> Vec<f64> {
            let mut out = Vec::with_capacity(a.len() + b.len());
            out.extend_from_slice(a);
            out.extend_from_slice(b);
            out
        }
        Self {
            t: cat(&pre.t, &post.t),
            a: cat(&pre.a, &post.a),
            h: cat(&pre.h, &post.h),
            phi: cat(&pre.phi, &post.phi),
            z: cat(&pre.z, &post.z),
            pre_len: pre.len(),
            post_len: post.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Index and value of the smallest scale factor.
    pub fn min_scale_factor(&self) -> Option<(usize, f64)> {
        self.a
            .iter()
            .copied()
            .enumerate()
            .min_by(|x, y| x.1.total_cmp(&y.1))
    }
}

/// Drives the two phases of a bounce through one integrator.
#[derive(Debug, Clone)]
pub struct BounceController<'a> {
    integrator: &'a CosmicIntegrator,
    config: BounceConfig,
}

impl<'a> BounceController<'a> {
    pub fn new(integrator: &'a CosmicIntegrator, config: BounceConfig) -> GoeResult<Self> {
        config.validate()?;
        Ok(Self { integrator, config })
    }

    pub fn with_defaults(integrator: &'a CosmicIntegrator) -> Self {
        Self {
            integrator,
            config: BounceConfig::default(),
        }
    }

    pub fn config(&self) -> &BounceConfig {
        &self.config
    }

    pub fn bounce_scale(&self) -> f64 {
        self.config.bounce_scale
    }

    pub fn bounce_time(&self) -> f64 {
        self.config.bounce_time
    }

    /// Expanding (H > 0) at or below the bounce scale. φ does not enter.
    pub fn bounce_conditions(&self, a: f64, h: f64, _phi: f64) -> bool {
        h > 0.0 && a <= self.config.bounce_scale
    }

    /// Contraction phase from the configured pre-bounce initial conditions.
    pub fn pre_bounce_evolution(&self, t_span: (f64, f64)) -> Option<CosmicHistory> {
        self.integrator
            .integrate(&self.config.pre_initial, Some(t_span), None)
    }

    /// Expansion phase from the configured post-bounce initial conditions.
    pub fn post_bounce_evolution(&self, t_span: (f64, f64)) -> Option<CosmicHistory> {
        self.integrator
            .integrate(&self.config.post_initial, Some(t_span), None)
    }

    /// Both phases over the configured spans; `None` if either fails.
    pub fn full_bounce_evolution(&self) -> Option<BounceHistory> {
        let pre = self.pre_bounce_evolution(self.config.pre_span);
        let post = self.post_bounce_evolution(self.config.post_span);
        match (pre, post) {
            (Some(pre), Some(post)) => {
                log::debug!(
                    "bounce joined at t={}: {} + {} samples",
                    self.config.bounce_time,
                    pre.len(),
                    post.len()
                );
                Some(BounceHistory::join(&pre, &post))
            }
            _ => {
                log::warn!("Bounce evolution incomplete: a phase failed to integrate");
                None
            }
        }
    }
}

/// Result of `cosmic_evolution`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CosmicEvolution {
    Bounce(BounceHistory),
    Expansion(CosmicHistory),
}

/// Default-configured run: full bounce, or the plain expansion history.
pub fn cosmic_evolution(metric: &MetricSpace, include_bounce: bool) -> Option<CosmicEvolution> {
    let integrator = CosmicIntegrator::with_defaults(metric);
    if include_bounce {
        BounceController::with_defaults(&integrator)
            .full_bounce_evolution()
            .map(CosmicEvolution::Bounce)
    } else {
        integrator
            .integrate(&InitialConditions::default(), None, None)
            .map(CosmicEvolution::Expansion)
    }
}

/// One-shot integration with default cosmology and solver settings.
pub fn integrate_friedmann(
    metric: &MetricSpace,
    initial: Option<InitialConditions>,
    t_span: Option<(f64, f64)>,
) -> Option<CosmicHistory> {
    CosmicIntegrator::with_defaults(metric).integrate(&initial.unwrap_or_default(), t_span, None)
}

/// Bounce through an existing integrator with the default schedule.
pub fn bounce_dynamics(integrator: &CosmicIntegrator) -> Option<BounceHistory> {
    BounceController::with_defaults(integrator).full_bounce_evolution()
}
