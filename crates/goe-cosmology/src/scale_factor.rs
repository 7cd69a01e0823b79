// ─────────────────────────────────────────────────────────────────────
// Geometrodynamics of Entropy — Scale Factor Conversions
// ─────────────────────────────────────────────────────────────────────
//! a = 1/(1 + z) and the flat ΛCDM lookback time
//!
//!   t_L(z) = t_H ∫₀^z dz' / ((1 + z') √(Ω_m (1 + z')³ + Ω_Λ)),
//!   t_H = 9.78e9 / (H0/100) years.
//!
//! Evaluated in u = ln(1 + z), where the integrand 1/√(Ω_m e^{3u} + Ω_Λ)
//! is smooth and decays over the whole range.

/// Hubble time for H0 = 100 km/s/Mpc, in years.
pub const HUBBLE_TIME_H100: f64 = 9.78e9;

/// Simpson panels used by `lookback_time` (even).
const SIMPSON_PANELS: usize = 2000;

pub fn redshift_to_scale_factor(z: f64) -> f64 {
    1.0 / (1.0 + z)
}

pub fn scale_factor_to_redshift(a: f64) -> f64 {
    1.0 / a - 1.0
}

/// Lookback time in years. Negative z integrates backwards (negative result).
pub fn lookback_time(z: f64, h0: f64, omega_m: f64, omega_lambda: f64) -> f64 {
    let t_hubble = HUBBLE_TIME_H100 / (h0 / 100.0);
    let integrand = |u: f64| 1.0 / (omega_m * (3.0 * u).exp() + omega_lambda).sqrt();
    t_hubble * simpson(integrand, 0.0, z.ln_1p(), SIMPSON_PANELS)
}

/// Lookback times for several redshifts.
pub fn lookback_times(z: &[f64], h0: f64, omega_m: f64, omega_lambda: f64) -> Vec<f64> {
    z.iter()
        .map(|&zi| lookback_time(zi, h0, omega_m, omega_lambda))
        .collect()
}

/// Composite Simpson rule over `panels` (rounded up to even) subintervals.
fn simpson<F: Fn(f64) -> f64>(f: F, lo: f64, hi: f64, panels: usize) -> f64 {
    if lo == hi {
        return 0.0;
    }
    let n = (panels.max(2) + 1) & !1;
    let step = (hi - lo) / n as f64;
    let interior: f64 = (1..n)
        .map(|i| {
            let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
            weight * f(lo + step * i as f64)
        })
        .sum();
    (f(lo) + interior + f(hi)) * step / 3.0
}
