// ─────────────────────────────────────────────────────────────────────
// Geometrodynamics of Entropy — Friedmann–Cartan Cosmology
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Background cosmology of the Camargo geometry: the Friedmann equations
//! sourced by a torsion scalar, integrated through a contraction–expansion
//! bounce.
//!
//! Architecture:
//!   - solver: adaptive embedded Runge–Kutta (RK45 / RK23), uniform output
//!   - friedmann: CosmicIntegrator, densities, CosmicHistory
//!   - bounce: BounceController, BounceHistory, one-shot helpers
//!   - scale_factor: redshift conversions and lookback time

pub mod bounce;
pub mod friedmann;
pub mod scale_factor;
pub mod solver;

pub use bounce::{
    bounce_dynamics, cosmic_evolution, integrate_friedmann, BounceController, BounceHistory,
    CosmicEvolution,
};
pub use friedmann::{CosmicHistory, CosmicIntegrator, G_NEWTON, SCALE_FACTOR_FLOOR};
pub use scale_factor::{
    lookback_time, lookback_times, redshift_to_scale_factor, scale_factor_to_redshift,
};
pub use solver::{EmbeddedRk, State, Trajectory, STATE_DIM};
