// ─────────────────────────────────────────────────────────────────────
// Geometrodynamics of Entropy — Fibre Quantization
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Canonical quantization of fields on the compact fibres Θ (radius R2)
//! and Ξ (radius R3).
//!
//! Architecture:
//!   - modes: Hermite–Gauss oscillator basis per fibre
//!   - FieldQuantizer: spectrum, vacuum amplitude, mode-sum field value
//!   - TorsionField: potential, momentum-space propagator, vertex
//!   - OperatorAlgebra: ladder-operator registry + canonical commutator

pub mod modes;
pub mod operators;
pub mod quantizer;
pub mod torsion_field;

pub use modes::{hermite, mode_energy, mode_frequency, oscillator_mode, scaled_hermite};
pub use operators::{LadderKind, LadderOperator, OperatorAlgebra};
pub use quantizer::{quantize_field, EnergySpectrum, FieldQuantizer, ModeAmplitudes, ModeIndex};
pub use torsion_field::{torsion_propagator, TorsionField};

pub use num_complex::Complex64;
