// ─────────────────────────────────────────────────────────────────────
// Geometrodynamics of Entropy — Embedded Runge–Kutta Solver
// ─────────────────────────────────────────────────────────────────────
//! Adaptive explicit Runge–Kutta for the 4-component cosmic state.
//!
//!   - Dormand–Prince 5(4) and Bogacki–Shampine 3(2), both FSAL
//!   - error norm: RMS of err_i / (atol + rtol · max(|y_i|, |y_new_i|))
//!   - step factor: clamp(0.9 · err^(−1/(q+1)), 0.2, 10), q = estimator order
//!   - output: uniform grid, filled by cubic Hermite interpolation of each
//!     accepted step as the integrator passes it
//!
//! Works in either time direction. Scratch stages live on the stack.

use goe_types::{GoeError, GoeResult, OdeMethod, SolverConfig};

/// (a, H, φ, φ̇).
pub const STATE_DIM: usize = 4;

pub type State = [f64; STATE_DIM];

const SAFETY: f64 = 0.9;
const MIN_FACTOR: f64 = 0.2;
const MAX_FACTOR: f64 = 10.0;
const MAX_STAGES: usize = 7;

/// Butcher tableau of an embedded pair; `e` includes the FSAL stage.
struct Tableau {
    error_order: i32,
    c: &'static [f64],
    a: &'static [&'static [f64]],
    b: &'static [f64],
    e: &'static [f64],
}

impl Tableau {
    fn stages(&self) -> usize {
        self.b.len()
    }

    fn exponent(&self) -> f64 {
        -1.0 / (self.error_order as f64 + 1.0)
    }
}

static DORMAND_PRINCE: Tableau = Tableau {
    error_order: 4,
    c: &[0.0, 1.0 / 5.0, 3.0 / 10.0, 4.0 / 5.0, 8.0 / 9.0, 1.0],
    a: &[
        &[],
        &[1.0 / 5.0],
        &[3.0 / 40.0, 9.0 / 40.0],
        &[44.0 / 45.0, -56.0 / 15.0, 32.0 / 9.0],
        &[19372.0 / 6561.0, -25360.0 / 2187.0, 64448.0 / 6561.0, -212.0 / 729.0],
        &[
            9017.0 / 3168.0,
            -355.0 / 33.0,
            46732.0 / 5247.0,
            49.0 / 176.0,
            -5103.0 / 18656.0,
        ],
    ],
    b: &[
        35.0 / 384.0,
        0.0,
        500.0 / 1113.0,
        125.0 / 192.0,
        -2187.0 / 6784.0,
        11.0 / 84.0,
    ],
    e: &[
        71.0 / 57600.0,
        0.0,
        -71.0 / 16695.0,
        71.0 / 1920.0,
        -17253.0 / 339200.0,
        22.0 / 525.0,
        -1.0 / 40.0,
    ],
};

static BOGACKI_SHAMPINE: Tableau = Tableau {
    error_order: 2,
    c: &[0.0, 1.0 / 2.0, 3.0 / 4.0],
    a: &[&[], &[1.0 / 2.0], &[0.0, 3.0 / 4.0]],
    b: &[2.0 / 9.0, 1.0 / 3.0, 4.0 / 9.0],
    e: &[5.0 / 72.0, -1.0 / 12.0, -1.0 / 9.0, 1.0 / 8.0],
};

fn tableau(method: OdeMethod) -> &'static Tableau {
    match method {
        OdeMethod::Rk45 => &DORMAND_PRINCE,
        OdeMethod::Rk23 => &BOGACKI_SHAMPINE,
    }
}

/// Uniformly sampled solution plus solver statistics.
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub t: Vec<f64>,
    pub y: Vec<State>,
    /// Accepted steps.
    pub n_accepted: usize,
    /// Rejected steps (error too large or non-finite trial).
    pub n_rejected: usize,
    pub n_rhs_evals: usize,
}

/// Sample points t0 + (t1 − t0)·i/(n − 1); the last is exactly t1.
pub fn sample_times(t_span: (f64, f64), n_points: usize) -> Vec<f64> {
    let (t0, t1) = t_span;
    let last = n_points.saturating_sub(1).max(1) as f64;
    let mut ts: Vec<f64> = (0..n_points)
        .map(|i| t0 + (t1 - t0) * i as f64 / last)
        .collect();
    if let Some(end) = ts.last_mut() {
        *end = t1;
    }
    ts
}

fn rms_norm(values: &State, scale: &State) -> f64 {
    let sum: f64 = values
        .iter()
        .zip(scale.iter())
        .map(|(v, s)| (v / s).powi(2))
        .sum();
    (sum / STATE_DIM as f64).sqrt()
}

fn axpy(y: &State, h: f64, k: &State) -> State {
    let mut out = *y;
    for i in 0..STATE_DIM {
        out[i] += h * k[i];
    }
    out
}

fn is_finite(y: &State) -> bool {
    y.iter().all(|v| v.is_finite())
}

/// Cubic Hermite interpolant on [t, t + dt] at fraction s.
fn hermite(s: f64, dt: f64, y0: &State, f0: &State, y1: &State, f1: &State) -> State {
    let s2 = s * s;
    let s3 = s2 * s;
    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;
    let mut out = [0.0; STATE_DIM];
    for i in 0..STATE_DIM {
        out[i] = h00 * y0[i] + h10 * dt * f0[i] + h01 * y1[i] + h11 * dt * f1[i];
    }
    out
}

/// Adaptive integrator over one span with a fixed output grid.
pub struct EmbeddedRk<F> {
    tableau: &'static Tableau,
    rtol: f64,
    atol: f64,
    n_points: usize,
    max_steps: usize,
    rhs: F,
    n_rhs_evals: usize,
}

impl<F> EmbeddedRk<F>
where
    F: FnMut(f64, &State) -> State,
{
    pub fn new(method: OdeMethod, config: &SolverConfig, rhs: F) -> Self {
        Self {
            tableau: tableau(method),
            rtol: config.rtol,
            atol: config.atol,
            n_points: config.n_points,
            max_steps: config.max_steps,
            rhs,
            n_rhs_evals: 0,
        }
    }

    fn eval(&mut self, t: f64, y: &State) -> State {
        self.n_rhs_evals += 1;
        (self.rhs)(t, y)
    }

    fn scale(&self, y: &State, y_new: &State) -> State {
        let mut s = [0.0; STATE_DIM];
        for i in 0..STATE_DIM {
            s[i] = self.atol + self.rtol * y[i].abs().max(y_new[i].abs());
        }
        s
    }

    /// Starting step from the local derivative scale.
    fn initial_step(&mut self, t0: f64, y0: &State, f0: &State, direction: f64, span: f64) -> f64 {
        let scale = self.scale(y0, y0);
        let d0 = rms_norm(y0, &scale);
        let d1 = rms_norm(f0, &scale);
        let h0 = if d0 < 1e-5 || d1 < 1e-5 {
            1e-6
        } else {
            0.01 * d0 / d1
        }
        .min(span);
        let y1 = axpy(y0, h0 * direction, f0);
        let f1 = self.eval(t0 + h0 * direction, &y1);
        let mut diff = [0.0; STATE_DIM];
        for i in 0..STATE_DIM {
            diff[i] = f1[i] - f0[i];
        }
        let d2 = rms_norm(&diff, &scale) / h0;
        let h1 = if d1 <= 1e-15 && d2 <= 1e-15 {
            (h0 * 1e-3).max(1e-6)
        } else {
            (0.01 / d1.max(d2)).powf(1.0 / (self.tableau.error_order as f64 + 1.0))
        };
        (100.0 * h0).min(h1).min(span)
    }

    /// One trial step of signed size `dt`. Returns (y_new, f_new, error norm).
    fn trial(&mut self, t: f64, y: &State, f: &State, dt: f64) -> (State, State, f64) {
        let tab = self.tableau;
        let stages = tab.stages();
        let mut k = [[0.0; STATE_DIM]; MAX_STAGES];
        k[0] = *f;
        for s in 1..stages {
            let mut ys = *y;
            for (j, &a_sj) in tab.a[s].iter().enumerate() {
                for i in 0..STATE_DIM {
                    ys[i] += dt * a_sj * k[j][i];
                }
            }
            k[s] = self.eval(t + tab.c[s] * dt, &ys);
        }
        let mut y_new = *y;
        for (j, &b_j) in tab.b.iter().enumerate() {
            for i in 0..STATE_DIM {
                y_new[i] += dt * b_j * k[j][i];
            }
        }
        k[stages] = self.eval(t + dt, &y_new);
        let mut err = [0.0; STATE_DIM];
        for (j, &e_j) in tab.e.iter().enumerate() {
            for i in 0..STATE_DIM {
                err[i] += dt * e_j * k[j][i];
            }
        }
        let norm = rms_norm(&err, &self.scale(y, &y_new));
        (y_new, k[stages], norm)
    }

    /// Integrate `y0` over `t_span`, sampling `n_points` uniform times.
    pub fn solve(&mut self, t_span: (f64, f64), y0: State) -> GoeResult<Trajectory> {
        let (t0, t1) = t_span;
        if !t0.is_finite() || !t1.is_finite() || t0 == t1 {
            return Err(GoeError::Validation(format!(
                "t_span must be finite with distinct endpoints, got ({t0}, {t1})"
            )));
        }
        if !is_finite(&y0) {
            return Err(GoeError::Numerical(format!(
                "initial state is not finite: {y0:?}"
            )));
        }

        let direction = if t1 > t0 { 1.0 } else { -1.0 };
        let span = (t1 - t0).abs();
        let ts = sample_times(t_span, self.n_points);
        let mut out = Vec::with_capacity(ts.len());

        let mut t = t0;
        let mut y = y0;
        let mut f = self.eval(t, &y);
        if !is_finite(&f) {
            return Err(GoeError::Numerical(format!(
                "derivative is not finite at t={t0}"
            )));
        }
        let mut h = self.initial_step(t0, &y0, &f, direction, span);

        while out.len() < ts.len() && ts[out.len()] == t0 {
            out.push(y0);
        }

        let exponent = self.tableau.exponent();
        let (mut n_accepted, mut n_rejected) = (0usize, 0usize);
        while direction * (t1 - t) > 0.0 {
            if n_accepted + n_rejected >= self.max_steps {
                return Err(GoeError::StepBudget {
                    max_steps: self.max_steps,
                });
            }
            let remaining = (t1 - t).abs();
            let min_step = 10.0 * (next_up(t.abs()) - t.abs());
            // A step leaving less than `min_step` to go is stretched to the bound.
            let last = h >= remaining - min_step;
            if last {
                h = remaining;
            } else if h < min_step {
                return Err(GoeError::Integration(format!(
                    "step size underflow at t={t:e} (h={h:e})"
                )));
            }

            let dt = h * direction;
            let (y_new, f_new, err) = self.trial(t, &y, &f, dt);
            if !is_finite(&y_new) || !err.is_finite() {
                n_rejected += 1;
                h *= MIN_FACTOR;
                continue;
            }
            if err > 1.0 {
                n_rejected += 1;
                h *= (SAFETY * err.powf(exponent)).max(MIN_FACTOR);
                continue;
            }

            let t_new = if last { t1 } else { t + dt };
            let step = t_new - t;
            while out.len() < ts.len() && direction * (ts[out.len()] - t_new) <= 0.0 {
                let s = (ts[out.len()] - t) / step;
                out.push(hermite(s, step, &y, &f, &y_new, &f_new));
            }

            let factor = if err == 0.0 {
                MAX_FACTOR
            } else {
                (SAFETY * err.powf(exponent)).min(MAX_FACTOR)
            };
            n_accepted += 1;
            t = t_new;
            y = y_new;
            f = f_new;
            h *= factor;
        }

        while out.len() < ts.len() {
            out.push(y);
        }

        Ok(Trajectory {
            t: ts,
            y: out,
            n_accepted,
            n_rejected,
            n_rhs_evals: self.n_rhs_evals,
        })
    }
}

/// Smallest double strictly above a non-negative finite `x`.
fn next_up(x: f64) -> f64 {
    if x == 0.0 {
        return f64::from_bits(1);
    }
    f64::from_bits(x.to_bits() + 1)
}
