// ─────────────────────────────────────────────────────────────────────
// Geometrodynamics of Entropy — Shared State Types
// ─────────────────────────────────────────────────────────────────────

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::{GoeError, GoeResult};

/// Dimension of the Camargo manifold: 4 spacetime + 2 compact directions.
pub const DIM: usize = 6;

/// Coordinate labels, in storage order.
pub const COORDINATE_NAMES: [&str; DIM] = ["t", "x", "y", "z", "theta", "xi"];

/// A point on the 6-D manifold, ordered (t, x, y, z, θ, ξ).
///
/// No unit conversion is applied anywhere in the kernel; the caller's
/// numbers are used as given.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates(pub [f64; DIM]);

impl Coordinates {
    pub fn new(t: f64, x: f64, y: f64, z: f64, theta: f64, xi: f64) -> Self {
        Self([t, x, y, z, theta, xi])
    }

    pub fn origin() -> Self {
        Self([0.0; DIM])
    }

    pub fn t(&self) -> f64 {
        self.0[0]
    }

    pub fn theta(&self) -> f64 {
        self.0[4]
    }

    pub fn xi(&self) -> f64 {
        self.0[5]
    }

    pub fn as_array(&self) -> &[f64; DIM] {
        &self.0
    }

    /// Copy of this point displaced by `delta` along coordinate `axis`.
    pub fn shifted(&self, axis: usize, delta: f64) -> Self {
        let mut out = *self;
        out.0[axis] += delta;
        out
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }

    /// Reject NaN/Inf components.
    ///
    /// Tensor evaluations never call this themselves; non-finite input
    /// propagates into non-finite output unless the caller guards here.
    pub fn ensure_finite(&self) -> GoeResult<()> {
        for (name, &value) in COORDINATE_NAMES.iter().zip(self.0.iter()) {
            if !value.is_finite() {
                return Err(GoeError::Validation(format!(
                    "coordinate {name} is not finite: {value}"
                )));
            }
        }
        Ok(())
    }
}

impl From<[f64; DIM]> for Coordinates {
    fn from(value: [f64; DIM]) -> Self {
        Self(value)
    }
}

impl Index<usize> for Coordinates {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

/// Initial conditions for one Friedmann–Cartan integration.
///
/// Serialised keys match the historical mapping
/// (`a_initial`, `H_initial`, `phi_initial`, `dphi_initial`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialConditions {
    pub a_initial: f64,
    #[serde(rename = "H_initial")]
    pub h_initial: f64,
    pub phi_initial: f64,
    pub dphi_initial: f64,
}

impl InitialConditions {
    pub fn new(a_initial: f64, h_initial: f64, phi_initial: f64, dphi_initial: f64) -> Self {
        Self {
            a_initial,
            h_initial,
            phi_initial,
            dphi_initial,
        }
    }

    /// Standard expansion start: a = 1e-6, H = 1e6, field at rest.
    pub fn expansion() -> Self {
        Self::new(1e-6, 1e6, 0.0, 0.0)
    }

    /// Contraction start used before the bounce: a = 1, H = -100.
    pub fn contraction() -> Self {
        Self::new(1.0, -1e2, 0.0, 0.0)
    }

    pub fn as_state(&self) -> CosmicState {
        CosmicState {
            a: self.a_initial,
            h: self.h_initial,
            phi: self.phi_initial,
            dphi: self.dphi_initial,
        }
    }

    pub fn validate(&self) -> GoeResult<()> {
        let values = [
            ("a_initial", self.a_initial),
            ("H_initial", self.h_initial),
            ("phi_initial", self.phi_initial),
            ("dphi_initial", self.dphi_initial),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(GoeError::Validation(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.a_initial <= 0.0 {
            return Err(GoeError::Validation(format!(
                "a_initial must be > 0, got {}",
                self.a_initial
            )));
        }
        Ok(())
    }
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self::expansion()
    }
}

/// Snapshot of the cosmological state vector (a, H, φ, φ̇).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CosmicState {
    /// Scale factor.
    pub a: f64,
    /// Hubble parameter; negative while contracting.
    pub h: f64,
    /// Torsion scalar field.
    pub phi: f64,
    /// Field time derivative.
    pub dphi: f64,
}

impl CosmicState {
    pub fn to_array(self) -> [f64; 4] {
        [self.a, self.h, self.phi, self.dphi]
    }

    pub fn from_array(y: [f64; 4]) -> Self {
        Self {
            a: y[0],
            h: y[1],
            phi: y[2],
            dphi: y[3],
        }
    }

    /// z = 1/a - 1.
    pub fn redshift(&self) -> f64 {
        1.0 / self.a - 1.0
    }
}
