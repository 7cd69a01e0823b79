// ─────────────────────────────────────────────────────────────────────
// Geometrodynamics of Entropy — Tensor Value Types
// ─────────────────────────────────────────────────────────────────────
//! Point-evaluated tensors on the 6-D manifold and index gymnastics.
//!
//! Nothing here is cached: every value is a pure function of the metric
//! parameters and the evaluation point.

use std::ops::Index;

use nalgebra::Matrix6;

use goe_types::{GoeError, GoeResult, DIM};

pub type Rank3 = [[[f64; DIM]; DIM]; DIM];
pub type Rank4 = [[[[f64; DIM]; DIM]; DIM]; DIM];

/// Symmetric 6×6 metric (or inverse metric) evaluated at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricTensor(Matrix6<f64>);

impl MetricTensor {
    pub fn from_matrix(matrix: Matrix6<f64>) -> Self {
        Self(matrix)
    }

    pub fn matrix(&self) -> &Matrix6<f64> {
        &self.0
    }

    pub fn component(&self, mu: usize, nu: usize) -> f64 {
        self.0[(mu, nu)]
    }

    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..DIM).all(|mu| (0..DIM).all(|nu| (self.0[(mu, nu)] - self.0[(nu, mu)]).abs() <= tolerance))
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl Index<(usize, usize)> for MetricTensor {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.0[index]
    }
}

/// How an inverse metric was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inversion {
    /// LU inverse of a non-singular metric.
    Exact,
    /// Moore–Penrose fallback for a numerically singular metric.
    Pseudo,
    /// Metric had NaN or infinite entries; the result carries them through.
    NonFinite,
}

/// First derivatives ∂_ρ g_{μν}, stored as `partials[ρ][μ][ν]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDerivatives {
    partials: Rank3,
}

impl MetricDerivatives {
    pub fn zero() -> Self {
        Self {
            partials: [[[0.0; DIM]; DIM]; DIM],
        }
    }

    /// Builds the table from a closure `f(ρ, μ, ν)`.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> f64,
    {
        let mut partials = [[[0.0; DIM]; DIM]; DIM];
        for (rho, plane) in partials.iter_mut().enumerate() {
            for (mu, row) in plane.iter_mut().enumerate() {
                for (nu, cell) in row.iter_mut().enumerate() {
                    *cell = f(rho, mu, nu);
                }
            }
        }
        Self { partials }
    }

    /// Returns ∂_ρ g_{μν}.
    pub fn partial(&self, rho: usize, mu: usize, nu: usize) -> f64 {
        self.partials[rho][mu][nu]
    }
}

/// Christoffel symbols Γ^σ_{μν}, stored as `coefficients[σ][μ][ν]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChristoffelSymbols {
    coefficients: Rank3,
}

impl ChristoffelSymbols {
    /// Γ^σ_{μν} = ½ g^{σρ}(∂_ν g_{μρ} + ∂_μ g_{νρ} − ∂_ρ g_{μν}).
    pub fn from_metric(inverse: &MetricTensor, derivatives: &MetricDerivatives) -> Self {
        let mut coefficients = [[[0.0; DIM]; DIM]; DIM];
        for (sigma, plane) in coefficients.iter_mut().enumerate() {
            for (mu, row) in plane.iter_mut().enumerate() {
                for (nu, cell) in row.iter_mut().enumerate() {
                    let mut sum = 0.0;
                    for rho in 0..DIM {
                        let term = derivatives.partial(nu, mu, rho)
                            + derivatives.partial(mu, nu, rho)
                            - derivatives.partial(rho, mu, nu);
                        sum += inverse[(sigma, rho)] * term;
                    }
                    *cell = 0.5 * sum;
                }
            }
        }
        Self { coefficients }
    }

    /// Returns Γ^σ_{μν}.
    pub fn coefficient(&self, sigma: usize, mu: usize, nu: usize) -> f64 {
        self.coefficients[sigma][mu][nu]
    }

    pub fn coefficients(&self) -> &Rank3 {
        &self.coefficients
    }
}

/// Connection-only Riemann contraction R^μ_{νρσ}.
///
/// The derivative-of-Γ terms are omitted; only
/// Γ^μ_{λρ}Γ^λ_{νσ} − Γ^μ_{λσ}Γ^λ_{νρ} is accumulated.
#[derive(Debug, Clone, PartialEq)]
pub struct RiemannTensor {
    components: Box<Rank4>,
}

impl RiemannTensor {
    pub fn from_connection(gamma: &ChristoffelSymbols) -> Self {
        let mut components = Box::new([[[[0.0; DIM]; DIM]; DIM]; DIM]);
        for mu in 0..DIM {
            for nu in 0..DIM {
                for rho in 0..DIM {
                    for sigma in 0..DIM {
                        let mut sum = 0.0;
                        for lam in 0..DIM {
                            sum += gamma.coefficient(mu, lam, rho) * gamma.coefficient(lam, nu, sigma)
                                - gamma.coefficient(mu, lam, sigma) * gamma.coefficient(lam, nu, rho);
                        }
                        components[mu][nu][rho][sigma] = sum;
                    }
                }
            }
        }
        Self { components }
    }

    /// Returns R^μ_{νρσ}.
    pub fn component(&self, mu: usize, nu: usize, rho: usize, sigma: usize) -> f64 {
        self.components[mu][nu][rho][sigma]
    }

    pub fn components(&self) -> &Rank4 {
        &self.components
    }
}

/// Torsion T^μ_{νρ}; antisymmetric in (ν, ρ).
#[derive(Debug, Clone, PartialEq)]
pub struct TorsionTensor {
    components: Rank3,
}

impl TorsionTensor {
    pub fn zero() -> Self {
        Self {
            components: [[[0.0; DIM]; DIM]; DIM],
        }
    }

    /// Sets T^μ_{νρ} = value and T^μ_{ρν} = −value together, so the
    /// antisymmetry cannot be broken by construction.
    pub fn set_antisymmetric(&mut self, mu: usize, nu: usize, rho: usize, value: f64) {
        self.components[mu][nu][rho] = value;
        self.components[mu][rho][nu] = -value;
    }

    pub fn component(&self, mu: usize, nu: usize, rho: usize) -> f64 {
        self.components[mu][nu][rho]
    }

    pub fn components(&self) -> &Rank3 {
        &self.components
    }

    pub fn scaled(&self, factor: f64) -> Self {
        let mut out = self.clone();
        for v in out.components.iter_mut().flatten().flatten() {
            *v *= factor;
        }
        out
    }
}

fn check_position(position: usize, rank: usize) -> GoeResult<()> {
    if position >= rank {
        return Err(GoeError::Validation(format!(
            "index position {position} out of range for rank-{rank} tensor"
        )));
    }
    Ok(())
}

/// Contracts index `position` of a rank-2 tensor with `metric`.
fn contract_rank2(tensor: &Matrix6<f64>, metric: &MetricTensor, position: usize) -> GoeResult<Matrix6<f64>> {
    check_position(position, 2)?;
    let g = metric.matrix();
    Ok(match position {
        0 => g * tensor,
        _ => tensor * g.transpose(),
    })
}

/// Contracts index `position` of a rank-3 tensor with `metric`.
fn contract_rank3(tensor: &Rank3, metric: &MetricTensor, position: usize) -> GoeResult<Rank3> {
    check_position(position, 3)?;
    let mut out = [[[0.0; DIM]; DIM]; DIM];
    for a in 0..DIM {
        for b in 0..DIM {
            for c in 0..DIM {
                let mut sum = 0.0;
                for j in 0..DIM {
                    sum += match position {
                        0 => metric[(a, j)] * tensor[j][b][c],
                        1 => metric[(b, j)] * tensor[a][j][c],
                        _ => metric[(c, j)] * tensor[a][b][j],
                    };
                }
                out[a][b][c] = sum;
            }
        }
    }
    Ok(out)
}

/// Raise index `position` of a rank-2 tensor with g^{μν}.
pub fn raise_index_rank2(
    tensor: &Matrix6<f64>,
    inverse: &MetricTensor,
    position: usize,
) -> GoeResult<Matrix6<f64>> {
    contract_rank2(tensor, inverse, position)
}

/// Lower index `position` of a rank-2 tensor with g_{μν}.
pub fn lower_index_rank2(
    tensor: &Matrix6<f64>,
    metric: &MetricTensor,
    position: usize,
) -> GoeResult<Matrix6<f64>> {
    contract_rank2(tensor, metric, position)
}

/// Raise index `position` of a rank-3 tensor with g^{μν}.
pub fn raise_index_rank3(tensor: &Rank3, inverse: &MetricTensor, position: usize) -> GoeResult<Rank3> {
    contract_rank3(tensor, inverse, position)
}

/// Lower index `position` of a rank-3 tensor with g_{μν}.
pub fn lower_index_rank3(tensor: &Rank3, metric: &MetricTensor, position: usize) -> GoeResult<Rank3> {
    contract_rank3(tensor, metric, position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag_metric() -> MetricTensor {
        MetricTensor::from_matrix(Matrix6::from_diagonal(&nalgebra::Vector6::new(
            -1.0, 1.0, 1.0, 1.0, 2.0, 4.0,
        )))
    }

    fn diag_inverse() -> MetricTensor {
        MetricTensor::from_matrix(Matrix6::from_diagonal(&nalgebra::Vector6::new(
            -1.0, 1.0, 1.0, 1.0, 0.5, 0.25,
        )))
    }

    #[test]
    fn test_set_antisymmetric_pairs() {
        let mut t = TorsionTensor::zero();
        t.set_antisymmetric(4, 0, 1, 3.0);
        assert_eq!(t.component(4, 0, 1), 3.0);
        assert_eq!(t.component(4, 1, 0), -3.0);
    }

    #[test]
    fn test_scaled_torsion() {
        let mut t = TorsionTensor::zero();
        t.set_antisymmetric(5, 0, 2, 1.5);
        let s = t.scaled(2.0);
        assert_eq!(s.component(5, 0, 2), 3.0);
        assert_eq!(s.component(5, 2, 0), -3.0);
    }

    #[test]
    fn test_christoffel_of_constant_metric_vanishes() {
        let gamma = ChristoffelSymbols::from_metric(&diag_inverse(), &MetricDerivatives::zero());
        assert!(gamma.coefficients().iter().flatten().flatten().all(|&v| v == 0.0));
    }

    #[test]
    fn test_raise_rank2_metric_gives_identity() {
        let g = diag_metric();
        let raised = raise_index_rank2(g.matrix(), &diag_inverse(), 0).unwrap();
        assert!((raised - Matrix6::identity()).abs().max() < 1e-12);
    }

    #[test]
    fn test_raise_then_lower_rank3_roundtrip() {
        let mut t = [[[0.0; DIM]; DIM]; DIM];
        for (a, plane) in t.iter_mut().enumerate() {
            for (b, row) in plane.iter_mut().enumerate() {
                for (c, cell) in row.iter_mut().enumerate() {
                    *cell = (a * 36 + b * 6 + c) as f64 * 0.1;
                }
            }
        }
        for position in 0..3 {
            let up = raise_index_rank3(&t, &diag_inverse(), position).unwrap();
            let back = lower_index_rank3(&up, &diag_metric(), position).unwrap();
            for a in 0..DIM {
                for b in 0..DIM {
                    for c in 0..DIM {
                        assert!(
                            (back[a][b][c] - t[a][b][c]).abs() < 1e-12,
                            "position {position}: [{a},{b},{c}]"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_bad_index_position_rejected() {
        let g = diag_metric();
        assert!(raise_index_rank2(g.matrix(), &diag_inverse(), 2).is_err());
        let t = [[[0.0; DIM]; DIM]; DIM];
        assert!(lower_index_rank3(&t, &g, 3).is_err());
    }

    #[test]
    fn test_riemann_antisymmetric_last_pair() {
        let d = MetricDerivatives::from_fn(|rho, mu, nu| {
            if mu == nu && mu >= 4 {
                0.3 * (rho as f64 + 1.0)
            } else {
                0.0
            }
        });
        let gamma = ChristoffelSymbols::from_metric(&diag_inverse(), &d);
        let r = RiemannTensor::from_connection(&gamma);
        for mu in 0..DIM {
            for nu in 0..DIM {
                for rho in 0..DIM {
                    for sigma in 0..DIM {
                        let a = r.component(mu, nu, rho, sigma);
                        let b = r.component(mu, nu, sigma, rho);
                        assert!((a + b).abs() < 1e-12);
                    }
                }
            }
        }
    }
}
