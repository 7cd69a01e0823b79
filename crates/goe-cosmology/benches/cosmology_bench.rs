// ─────────────────────────────────────────────────────────────────────
// Geometrodynamics of Entropy — Cosmology Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for the Friedmann–Cartan path:
//!   - right-hand side evaluation
//!   - short RK45 / RK23 integrations on a unit-scale geometry
//!   - two-phase bounce
//!   - lookback-time quadrature

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use goe_cosmology::{lookback_time, BounceController, CosmicIntegrator};
use goe_geometry::MetricSpace;
use goe_types::{
    BounceConfig, CosmologyConfig, InitialConditions, MetricConfig, OdeMethod, SolverConfig,
};

// ── Helpers ───────────────────────────────────────────────────────────

fn make_integrator(n_points: usize) -> CosmicIntegrator {
    let space = MetricSpace::new(MetricConfig::with_radii(1.0, 1.1, 2.0, 0.5)).expect("valid radii");
    let solver = SolverConfig {
        n_points,
        t_span: (0.0, 1e-3),
        ..SolverConfig::default()
    };
    CosmicIntegrator::new(&space, CosmologyConfig::default(), solver).expect("valid config")
}

// ── RHS ───────────────────────────────────────────────────────────────

fn bench_derivatives(c: &mut Criterion) {
    let integ = make_integrator(10);
    let y = [1.0, 10.0, 0.1, 0.0];
    c.bench_function("friedmann_rhs", |b| {
        b.iter(|| integ.derivatives(0.0, black_box(&y)))
    });
}

// ── Integration ───────────────────────────────────────────────────────

fn bench_integrate_rk45(c: &mut Criterion) {
    let integ = make_integrator(1000);
    let ic = InitialConditions::new(1.0, 10.0, 0.0, 0.0);
    c.bench_function("integrate_rk45_1000pts", |b| {
        b.iter(|| integ.integrate(black_box(&ic), None, Some(OdeMethod::Rk45)))
    });
}

fn bench_integrate_rk23(c: &mut Criterion) {
    let integ = make_integrator(1000);
    let ic = InitialConditions::new(1.0, 10.0, 0.0, 0.0);
    c.bench_function("integrate_rk23_1000pts", |b| {
        b.iter(|| integ.integrate(black_box(&ic), None, Some(OdeMethod::Rk23)))
    });
}

fn bench_full_bounce(c: &mut Criterion) {
    let integ = make_integrator(500);
    let schedule = BounceConfig {
        pre_span: (-1e-3, 0.0),
        post_span: (0.0, 1e-3),
        post_initial: InitialConditions::new(0.5, 50.0, 0.0, 0.0),
        ..BounceConfig::default()
    };
    let ctl = BounceController::new(&integ, schedule).expect("valid schedule");
    c.bench_function("full_bounce_2x500pts", |b| {
        b.iter(|| ctl.full_bounce_evolution())
    });
}

// ── Quadrature ────────────────────────────────────────────────────────

fn bench_lookback(c: &mut Criterion) {
    c.bench_function("lookback_time_z1", |b| {
        b.iter(|| lookback_time(black_box(1.0), 67.0, 0.31, 0.69))
    });
}

// ── Groups ────────────────────────────────────────────────────────────

criterion_group!(rhs, bench_derivatives,);

criterion_group!(
    integration,
    bench_integrate_rk45,
    bench_integrate_rk23,
    bench_full_bounce,
);

criterion_group!(quadrature, bench_lookback,);

criterion_main!(rhs, integration, quadrature);
