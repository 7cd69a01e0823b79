// ─────────────────────────────────────────────────────────────────────
// Geometrodynamics of Entropy — Kernel Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy shared by the
//! geometry, fibre-quantization and cosmology crates.

pub mod config;
pub mod error;
pub mod state;

pub use config::{
    BounceConfig, CosmologyConfig, GoeConfig, MetricConfig, OdeMethod, QuantizationConfig,
    SolverConfig,
};
pub use error::{GoeError, GoeResult};
pub use state::{Coordinates, CosmicState, InitialConditions, COORDINATE_NAMES, DIM};
