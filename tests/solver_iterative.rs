//! Tests for the residual-based solvers (Richardson, steepest descent, PCG) against direct
//! solvers on random and fixed matrices.
//!
//! Random SPD systems are drawn from a seeded generator; reference solutions come from
//! faer's full-pivoting LU.

use approx::assert_abs_diff_eq;
use faer::Mat;
use faer::linalg::solvers::SolveCore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use relaxa::error::IterError;
use relaxa::matrix::{banded_test_system, from_rows};
use relaxa::preconditioner::Jacobi;
use relaxa::solver::{GradientSolver, LinearSolver, PcgSolver, RichardsonSolver, StationarySolver};

/// Helper function to generate a random symmetric positive definite (SPD) matrix `A` and a random right-hand side `b`.
///
/// The SPD matrix is constructed as `A = Mᵀ M + I`, where `M` is a random matrix and `I` is the identity.
fn random_spd(n: usize, seed: u64) -> (Mat<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<f64> = (0..n * n).map(|_| rng.r#gen()).collect();
    let m = Mat::from_fn(n, n, |i, j| data[j * n + i]);
    let m_t = m.transpose();
    let a = &m_t * &m + Mat::<f64>::identity(n, n);
    let b: Vec<f64> = (0..n).map(|_| rng.r#gen()).collect();
    (a, b)
}

fn direct_solve(a: &Mat<f64>, b: &[f64]) -> Vec<f64> {
    let n = b.len();
    let mut x = b.to_vec();
    let lu = faer::linalg::solvers::FullPivLu::new(a.as_ref());
    let x_mat = faer::MatMut::from_column_major_slice_mut(&mut x, n, 1);
    lu.solve_in_place_with_conj(faer::Conj::No, x_mat);
    x
}

/// Tridiagonal SPD test matrix `tridiag(-1, 4, -1)`.
fn tridiag5() -> Mat<f64> {
    Mat::from_fn(5, 5, |i, j| match i.abs_diff(j) {
        0 => 4.0,
        1 => -1.0,
        _ => 0.0,
    })
}

/// PCG matches the direct LU solution on a random SPD system.
#[test]
fn pcg_vs_direct_on_spd() {
    let n = 10;
    let (a, b) = random_spd(n, 42);
    let mut x = vec![0.0; n];
    let stats = PcgSolver::new(1e-10, 1000).solve(&a, None, &b, &mut x).unwrap();
    assert!(stats.converged);
    let x_direct = direct_solve(&a, &b);
    for i in 0..n {
        assert_abs_diff_eq!(x[i], x_direct[i], epsilon = 1e-6);
    }
}

/// Jacobi-preconditioned PCG on the same kind of system.
#[test]
fn jacobi_pcg_vs_direct_on_spd() {
    let n = 12;
    let (a, b) = random_spd(n, 7);
    let pc = Jacobi::from_matrix(&a).unwrap();
    let mut x = vec![0.0; n];
    let stats = PcgSolver::new(1e-10, 1000).solve(&a, Some(&pc), &b, &mut x).unwrap();
    assert!(stats.converged);
    let x_direct = direct_solve(&a, &b);
    for i in 0..n {
        assert_abs_diff_eq!(x[i], x_direct[i], epsilon = 1e-6);
    }
}

/// A 5×5 SPD system reaches `res < 1e-6` within 5 iterations with the identity preconditioner.
#[test]
fn pcg_finite_termination() {
    let a = tridiag5();
    let b = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let mut x = vec![0.0; 5];
    let stats = PcgSolver::new(1e-6, 100).solve(&a, None, &b, &mut x).unwrap();
    assert!(stats.converged);
    assert_eq!(stats.res[0], 1.0);
    assert_eq!(stats.res.len(), stats.iterations + 1);
    let first_below = stats.res.iter().position(|&r| r < 1e-6).unwrap();
    assert!(first_below <= 5, "residual ratio below 1e-6 only after {first_below} iterations");
    let x_direct = direct_solve(&a, &b);
    for i in 0..5 {
        assert_abs_diff_eq!(x[i], x_direct[i], epsilon = 1e-10);
    }
}

/// The residual ratio never increases on these well-conditioned SPD systems.
#[test]
fn pcg_residual_is_monotone() {
    let mut systems = vec![(tridiag5(), vec![1.0, 2.0, 3.0, 4.0, 5.0])];
    for (n, eps) in [(6, 0.2), (8, 0.3), (10, 0.45)] {
        systems.push(banded_test_system(n, eps));
    }
    for (a, b) in systems {
        let n = b.len();
        let mut x = vec![0.0; n];
        let stats = PcgSolver::new(1e-6, 100).solve(&a, None, &b, &mut x).unwrap();
        assert!(stats.converged);
        assert!(stats.iterations <= n + 1);
        for w in stats.res.windows(2) {
            assert!(w[1] <= w[0], "residual grew: {} -> {}", w[0], w[1]);
        }
    }
}

/// Steepest descent matches the direct solution.
#[test]
fn gradient_vs_direct_on_spd() {
    let n = 6;
    let (a, b) = random_spd(n, 3);
    let pc = Jacobi::from_matrix(&a).unwrap();
    let mut x = vec![0.0; n];
    let stats = GradientSolver::new(1e-12, 20_000).solve(&a, Some(&pc), &b, &mut x).unwrap();
    assert!(stats.converged);
    let x_direct = direct_solve(&a, &b);
    for i in 0..n {
        assert_abs_diff_eq!(x[i], x_direct[i], epsilon = 1e-6);
    }
}

/// Richardson with P = diag(A) and α = 1 is exactly the Jacobi iteration.
#[test]
fn richardson_with_diagonal_preconditioner_is_jacobi() {
    let a = from_rows(&[&[4.0, 1.0, 0.5], &[1.0, 5.0, -1.0], &[0.5, -1.0, 3.0]]);
    let b = vec![1.0, 2.0, 3.0];
    let pc = Jacobi::from_matrix(&a).unwrap();

    let mut x_rich = vec![0.0; 3];
    let s_rich = RichardsonSolver::new(0.0, 15).solve(&a, Some(&pc), &b, &mut x_rich).unwrap();
    let mut x_jac = vec![0.0; 3];
    let s_jac = StationarySolver::jacobi(0.0, 15).solve(&a, None, &b, &mut x_jac).unwrap();

    assert_eq!(s_rich.iterations, 15);
    assert_eq!(s_jac.iterations, 15);
    for (r, j) in s_rich.inc.iter().zip(&s_jac.inc) {
        assert_abs_diff_eq!(*r, *j, epsilon = 1e-12);
    }
    for i in 0..3 {
        assert_abs_diff_eq!(x_rich[i], x_jac[i], epsilon = 1e-12);
    }
}

/// Richardson stops on whichever of residual and increment drops first.
#[test]
fn richardson_histories_have_expected_shape() {
    let (a, b) = banded_test_system(8, 0.1);
    let mut x = vec![0.0; 8];
    let stats = RichardsonSolver::new(1e-8, 200).solve(&a, None, &b, &mut x).unwrap();
    assert!(stats.converged);
    assert_eq!(stats.inc.len(), stats.iterations);
    assert_eq!(stats.res.len(), stats.iterations + 1);
    assert!(stats.final_residual().unwrap() < 1e-8 || stats.final_increment().unwrap() < 1e-8);
    for xi in x {
        assert_abs_diff_eq!(xi, 1.0, epsilon = 1e-7);
    }
}

/// Identical inputs give identical outputs.
#[test]
fn deterministic() {
    let (a, b) = random_spd(8, 99);
    let pc = Jacobi::from_matrix(&a).unwrap();
    let run = |which: usize| {
        let mut x = vec![0.0; 8];
        let stats = match which {
            0 => RichardsonSolver::new(1e-8, 50).with_alpha(0.05).solve(&a, Some(&pc), &b, &mut x),
            1 => GradientSolver::new(1e-8, 50).solve(&a, Some(&pc), &b, &mut x),
            _ => PcgSolver::new(1e-8, 50).solve(&a, Some(&pc), &b, &mut x),
        }
        .unwrap();
        (x, stats)
    };
    for which in 0..3 {
        assert_eq!(run(which), run(which));
    }
}

/// Every residual-based solver rejects a rectangular matrix before iterating.
#[test]
fn rectangular_matrix_is_rejected() {
    let a = Mat::from_fn(3, 2, |i, j| (i + j) as f64 + 1.0);
    let b = vec![1.0, 1.0, 1.0];
    let mut x = vec![0.0; 3];
    let errs = [
        RichardsonSolver::new(1e-6, 10).solve(&a, None, &b, &mut x).unwrap_err(),
        GradientSolver::new(1e-6, 10).solve(&a, None, &b, &mut x).unwrap_err(),
        PcgSolver::new(1e-6, 10).solve(&a, None, &b, &mut x).unwrap_err(),
    ];
    for err in errs {
        assert!(matches!(err, IterError::DimensionMismatch { expected: 3, found: 2, .. }));
    }
    assert_eq!(x, vec![0.0; 3]);
}

/// Running out of budget is reported through the stats, not as an error.
#[test]
fn budget_exhaustion_returns_history() {
    let (a, b) = random_spd(10, 5);
    let mut x = vec![0.0; 10];
    let stats = GradientSolver::new(1e-14, 3).solve(&a, None, &b, &mut x).unwrap();
    assert!(!stats.converged);
    assert_eq!(stats.iterations, 3);
    assert_eq!(stats.inc.len(), 3);
    assert_eq!(stats.res.len(), 4);
}
