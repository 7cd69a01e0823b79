// ─────────────────────────────────────────────────────────────────────
// Geometrodynamics of Entropy — Fibre Oscillator Modes
// ─────────────────────────────────────────────────────────────────────
//! Harmonic-oscillator basis on one compact fibre of radius R:
//!
//!   ω_n = √(n + ½) / R,   u = coord / R
//!   ψ_n(u) = √(ω_n / πħ) · H_n(√(ω_n/ħ) u) · exp(−ω_n u² / 2ħ)
//!
//! H_n is the physicists' Hermite polynomial.

use std::f64::consts::PI;

/// Magnitude above which the recurrence is rescaled by `RESCALE`.
const RESCALE_THRESHOLD: f64 = 1e100;
const RESCALE: f64 = 1e-100;

/// Physicists' Hermite polynomial H_n(x) via the three-term recurrence
/// H_{k+1} = 2x H_k − 2k H_{k−1}.
///
/// Overflows to ±∞ for large n; `scaled_hermite` keeps the exponent apart.
pub fn hermite(n: usize, x: f64) -> f64 {
    let (mantissa, log_scale) = scaled_hermite(n, x);
    mantissa * log_scale.exp()
}

/// H_n(x) as `(m, s)` with H_n(x) = m · e^s and |m| ≤ 1e100.
pub fn scaled_hermite(n: usize, x: f64) -> (f64, f64) {
    let mut prev = 1.0;
    if n == 0 {
        return (prev, 0.0);
    }
    let mut curr = 2.0 * x;
    let mut log_scale = 0.0;
    for k in 1..n {
        let next = 2.0 * x * curr - 2.0 * k as f64 * prev;
        prev = curr;
        curr = next;
        if curr.abs() > RESCALE_THRESHOLD {
            prev *= RESCALE;
            curr *= RESCALE;
            log_scale -= RESCALE.ln();
        }
    }
    (curr, log_scale)
}

/// ω_n = √(n + ½) / R.
#[inline]
pub fn mode_frequency(n: usize, radius: f64) -> f64 {
    (n as f64 + 0.5).sqrt() / radius
}

/// E_n = ħ ω_n.
#[inline]
pub fn mode_energy(n: usize, radius: f64, hbar: f64) -> f64 {
    hbar * mode_frequency(n, radius)
}

/// ψ_n evaluated at fibre coordinate `coord`.
///
/// The Hermite exponent and the Gaussian exponent are combined before
/// exponentiating, so high orders stay finite wherever ψ_n fits in an f64.
/// Values beyond that saturate to ±∞; an underflowing product is exactly 0.
pub fn oscillator_mode(n: usize, coord: f64, radius: f64, hbar: f64) -> f64 {
    let omega = mode_frequency(n, radius);
    let u = coord / radius;
    let (mantissa, log_scale) = scaled_hermite(n, (omega / hbar).sqrt() * u);
    if mantissa == 0.0 {
        return 0.0;
    }
    let weight = (log_scale - omega * u * u / (2.0 * hbar)).exp();
    if weight == 0.0 {
        return 0.0;
    }
    let norm = (omega / (PI * hbar)).sqrt();
    norm * mantissa * weight
}
