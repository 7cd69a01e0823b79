// ─────────────────────────────────────────────────────────────────────
// Geometrodynamics of Entropy — Camargo Geometry
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! 6-D Camargo metric with signature (-,+,+,+,+,+): three flat spatial
//! directions plus two compact fibres (θ, ξ) whose radii set the
//! couplings α = (R2/R1)² and β = (R3/R1)².
//!
//! Architecture:
//!   - MetricSpace: parameters + point evaluation of every tensor
//!   - MetricTensor / inverse with pseudo-inverse fallback
//!   - MetricDerivatives: central finite differences, 12 metric samples
//!   - ChristoffelSymbols → RiemannTensor (connection terms only)
//!   - TorsionTensor: analytic, antisymmetric in its lower pair

pub mod metric;
pub mod params;
pub mod tensors;

pub use metric::MetricSpace;
pub use params::{DELTA_PI, LAMBDA_COSMOLOGICAL, PHI_GOLDEN, PI_MODIFIED};
pub use tensors::{
    lower_index_rank2, lower_index_rank3, raise_index_rank2, raise_index_rank3,
    ChristoffelSymbols, Inversion, MetricDerivatives, MetricTensor, Rank3, Rank4, RiemannTensor,
    TorsionTensor,
};
