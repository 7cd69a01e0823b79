// ─────────────────────────────────────────────────────────────────────
// Geometrodynamics of Entropy — Fibre Field Quantizer
// ─────────────────────────────────────────────────────────────────────
//! Mode expansion of a scalar field on Θ × Ξ:
//!
//!   u_nm(θ, ξ) = ψ_n(θ; R2) ψ_m(ξ; R3)
//!   E_nm       = ħ√(n+½)/R2 + ħ√(m+½)/R3
//!   φ(x)       = Σ a_nm u_nm e^{−iE_nm t/ħ} + a†_nm ū_nm e^{+iE_nm t/ħ}

use std::collections::BTreeMap;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use goe_geometry::MetricSpace;
use goe_types::{Coordinates, GoeResult, QuantizationConfig};

use crate::modes::{mode_energy, oscillator_mode};

/// Mode label (n along Θ, m along Ξ).
pub type ModeIndex = (usize, usize);

/// Operator amplitudes keyed by mode. Ordered so mode sums are reproducible.
pub type ModeAmplitudes = BTreeMap<ModeIndex, Complex64>;

/// Single-fibre energy ladders truncated at `n_max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergySpectrum {
    /// ħ√(n+½)/R2 for n in 0..n_max.
    pub theta_modes: Vec<f64>,
    /// ħ√(m+½)/R3 for m in 0..n_max.
    pub xi_modes: Vec<f64>,
}

impl EnergySpectrum {
    /// Combined energies E_nm, row-major over (n, m).
    ///
    /// Produced on demand; the full grid is `total_len()` entries.
    pub fn total_modes(&self) -> impl Iterator<Item = f64> + '_ {
        self.theta_modes
            .iter()
            .flat_map(move |&e_theta| self.xi_modes.iter().map(move |&e_xi| e_theta + e_xi))
    }

    pub fn total_len(&self) -> usize {
        self.theta_modes.len() * self.xi_modes.len()
    }

    /// E_nm for one pair, if both indices are inside the truncation.
    pub fn total_mode(&self, mode: ModeIndex) -> Option<f64> {
        let (n, m) = mode;
        Some(self.theta_modes.get(n)? + self.xi_modes.get(m)?)
    }
}

/// Canonical quantization on the two fibres of one geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldQuantizer {
    metric: MetricSpace,
    config: QuantizationConfig,
}

impl FieldQuantizer {
    pub fn new(metric: &MetricSpace, config: QuantizationConfig) -> GoeResult<Self> {
        config.validate()?;
        Ok(Self {
            metric: *metric,
            config,
        })
    }

    pub fn metric(&self) -> &MetricSpace {
        &self.metric
    }

    pub fn config(&self) -> &QuantizationConfig {
        &self.config
    }

    pub fn cutoff_scale(&self) -> f64 {
        self.config.cutoff_scale
    }

    pub fn mode_function_theta(&self, n: usize, theta: f64) -> f64 {
        oscillator_mode(n, theta, self.metric.r2(), self.config.hbar)
    }

    pub fn mode_function_xi(&self, m: usize, xi: f64) -> f64 {
        oscillator_mode(m, xi, self.metric.r3(), self.config.hbar)
    }

    /// E_nm for an arbitrary pair, ignoring the truncation.
    pub fn mode_energy(&self, mode: ModeIndex) -> f64 {
        let (n, m) = mode;
        mode_energy(n, self.metric.r2(), self.config.hbar)
            + mode_energy(m, self.metric.r3(), self.config.hbar)
    }

    /// Defaults to n_max = min(n_modes_theta, n_modes_xi).
    pub fn energy_spectrum(&self, n_max: Option<usize>) -> EnergySpectrum {
        let n_max =
            n_max.unwrap_or_else(|| self.config.n_modes_theta.min(self.config.n_modes_xi));
        let hbar = self.config.hbar;
        EnergySpectrum {
            theta_modes: (0..n_max)
                .map(|n| mode_energy(n, self.metric.r2(), hbar))
                .collect(),
            xi_modes: (0..n_max)
                .map(|m| mode_energy(m, self.metric.r3(), hbar))
                .collect(),
        }
    }

    /// ψ_0(θ) ψ_0(ξ) e^{−iE_0 t/ħ} with E_0 = ħ/(2R2) + ħ/(2R3).
    pub fn vacuum_state(&self, coords: &Coordinates) -> Complex64 {
        let hbar = self.config.hbar;
        let amplitude =
            self.mode_function_theta(0, coords.theta()) * self.mode_function_xi(0, coords.xi());
        let e0 = hbar * 0.5 / self.metric.r2() + hbar * 0.5 / self.metric.r3();
        amplitude * phase(e0, coords.t(), hbar)
    }

    /// Mode sum over every annihilation entry inside the truncation.
    ///
    /// Modes outside `n_modes_theta × n_modes_xi` are skipped; a mode with
    /// no creation amplitude contributes only its annihilation term.
    pub fn field_operator(
        &self,
        coords: &Coordinates,
        creation: &ModeAmplitudes,
        annihilation: &ModeAmplitudes,
    ) -> Complex64 {
        let hbar = self.config.hbar;
        let (theta, xi, t) = (coords.theta(), coords.xi(), coords.t());
        annihilation
            .iter()
            .filter(|&(&(n, m), _)| n < self.config.n_modes_theta && m < self.config.n_modes_xi)
            .fold(Complex64::new(0.0, 0.0), |acc, (&mode, &a)| {
                let (n, m) = mode;
                let u = self.mode_function_theta(n, theta) * self.mode_function_xi(m, xi);
                let time_factor = phase(self.mode_energy(mode), t, hbar);
                let a_dag = creation.get(&mode).copied().unwrap_or_default();
                acc + a * u * time_factor + a_dag * u * time_factor.conj()
            })
    }
}

#[inline]
fn phase(energy: f64, t: f64, hbar: f64) -> Complex64 {
    Complex64::from_polar(1.0, -energy * t / hbar)
}

/// Quantizer with default truncation at the given UV cutoff.
pub fn quantize_field(metric: &MetricSpace, cutoff_scale: f64) -> GoeResult<FieldQuantizer> {
    FieldQuantizer::new(
        metric,
        QuantizationConfig {
            cutoff_scale,
            ..QuantizationConfig::default()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use goe_types::MetricConfig;
    use std::f64::consts::PI;

    fn unit_space() -> MetricSpace {
        MetricSpace::new(MetricConfig::with_radii(1.0, 1.1, 2.0, 0.5)).unwrap()
    }

    fn small_quantizer(n: usize) -> FieldQuantizer {
        let cfg = QuantizationConfig {
            n_modes_theta: n,
            n_modes_xi: n,
            ..QuantizationConfig::default()
        };
        FieldQuantizer::new(&unit_space(), cfg).unwrap()
    }

    #[test]
    fn test_rejects_zero_modes() {
        let cfg = QuantizationConfig {
            n_modes_xi: 0,
            ..QuantizationConfig::default()
        };
        assert!(FieldQuantizer::new(&unit_space(), cfg).is_err());
    }

    #[test]
    fn test_energy_spectrum_default_lengths() {
        let q = FieldQuantizer::new(&unit_space(), QuantizationConfig::default()).unwrap();
        let spectrum = q.energy_spectrum(None);
        assert_eq!(spectrum.theta_modes.len(), 100);
        assert_eq!(spectrum.xi_modes.len(), 100);
        assert_eq!(spectrum.total_len(), 10_000);
        assert_eq!(spectrum.total_modes().count(), 10_000);
    }

    #[test]
    fn test_energy_spectrum_five_modes() {
        let q = FieldQuantizer::new(&MetricSpace::default(), QuantizationConfig::default()).unwrap();
        let spectrum = q.energy_spectrum(Some(5));
        assert_eq!(spectrum.theta_modes.len(), 5);
        assert_eq!(spectrum.xi_modes.len(), 5);
        let totals: Vec<f64> = spectrum.total_modes().collect();
        assert_eq!(totals.len(), 25);
        assert!(totals.iter().all(|&e| e > 0.0));
        assert!(spectrum.theta_modes.windows(2).all(|w| w[1] >= w[0]));
        assert!(spectrum.xi_modes.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_energy_spectrum_ordering() {
        let q = small_quantizer(10);
        let spectrum = q.energy_spectrum(Some(3));
        let totals: Vec<f64> = spectrum.total_modes().collect();
        assert_eq!(totals.len(), 9);
        // Row-major: index 1 is (n=0, m=1), index 3 is (n=1, m=0).
        assert!((totals[1] - (spectrum.theta_modes[0] + spectrum.xi_modes[1])).abs() < 1e-15);
        assert!((totals[3] - (spectrum.theta_modes[1] + spectrum.xi_modes[0])).abs() < 1e-15);
        assert!((totals[4] - q.mode_energy((1, 1))).abs() < 1e-14);
        assert_eq!(spectrum.total_mode((3, 0)), None);
    }

    #[test]
    fn test_theta_levels_strictly_increase() {
        let spectrum = small_quantizer(20).energy_spectrum(None);
        assert!(spectrum.theta_modes.windows(2).all(|w| w[1] > w[0]));
        assert!(spectrum.xi_modes.windows(2).all(|w| w[1] > w[0]));
        assert!((spectrum.theta_modes[0] - 0.5f64.sqrt() / 1.1).abs() < 1e-14);
    }

    #[test]
    fn test_vacuum_state_at_origin() {
        let q = small_quantizer(4);
        let v = q.vacuum_state(&Coordinates::origin());
        let w2 = 0.5f64.sqrt() / 1.1;
        let w3 = 0.5f64.sqrt() / 2.0;
        let expected = (w2 / PI).sqrt() * (w3 / PI).sqrt();
        assert!((v.re - expected).abs() < 1e-14, "re={}", v.re);
        assert!(v.im.abs() < 1e-15);
    }

    #[test]
    fn test_vacuum_modulus_time_independent() {
        let q = small_quantizer(4);
        let c0 = Coordinates::new(0.0, 0.0, 0.0, 0.0, 0.3, -0.2);
        let c1 = Coordinates::new(7.5, 0.0, 0.0, 0.0, 0.3, -0.2);
        let (v0, v1) = (q.vacuum_state(&c0), q.vacuum_state(&c1));
        assert!((v0.norm() - v1.norm()).abs() < 1e-14);
        assert!((v0 - v1).norm() > 1e-6, "phase should rotate");
    }

    #[test]
    fn test_field_operator_hermitian_pair_is_real() {
        let q = small_quantizer(4);
        let coords = Coordinates::new(1.3, 0.0, 0.0, 0.0, 0.2, 0.4);
        let one = Complex64::new(1.0, 0.0);
        let ops: ModeAmplitudes = [((1, 2), one)].into_iter().collect();
        let value = q.field_operator(&coords, &ops, &ops);
        let u = q.mode_function_theta(1, 0.2) * q.mode_function_xi(2, 0.4);
        let expected = 2.0 * u * (q.mode_energy((1, 2)) * 1.3).cos();
        assert!(value.im.abs() < 1e-14, "im={}", value.im);
        assert!((value.re - expected).abs() < 1e-12);
    }

    #[test]
    fn test_field_operator_missing_creation_counts_as_zero() {
        let q = small_quantizer(4);
        let coords = Coordinates::new(0.0, 0.0, 0.0, 0.0, 0.1, 0.1);
        let ann: ModeAmplitudes = [((0, 0), Complex64::new(2.0, 0.0))].into_iter().collect();
        let value = q.field_operator(&coords, &ModeAmplitudes::new(), &ann);
        let u = q.mode_function_theta(0, 0.1) * q.mode_function_xi(0, 0.1);
        assert!((value.re - 2.0 * u).abs() < 1e-14);
    }

    #[test]
    fn test_field_operator_skips_out_of_range_modes() {
        let q = small_quantizer(2);
        let one = Complex64::new(1.0, 0.0);
        let ops: ModeAmplitudes = [((5, 0), one), ((0, 2), one)].into_iter().collect();
        let value = q.field_operator(&Coordinates::origin(), &ops, &ops);
        assert_eq!(value, Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_quantize_field_sets_cutoff() {
        let q = quantize_field(&unit_space(), 2.5).unwrap();
        assert_eq!(q.cutoff_scale(), 2.5);
        assert_eq!(q.config().n_modes_theta, 100);
        assert!(quantize_field(&unit_space(), -1.0).is_err());
    }

    #[test]
    fn test_canonical_radii_vacuum_finite() {
        let q = FieldQuantizer::new(&MetricSpace::default(), QuantizationConfig::default()).unwrap();
        let v = q.vacuum_state(&Coordinates::new(1e-20, 0.0, 0.0, 0.0, 1e-17, 0.0));
        assert!(v.re.is_finite() && v.im.is_finite());
    }
}
