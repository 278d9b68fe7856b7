use criterion::{black_box, Criterion, criterion_group, criterion_main};
use relaxa::matrix::banded_test_system;
use relaxa::solver::{LinearSolver, Method, PcgSolver, StationarySolver, Strategy};

fn bench_sweep_strategies(c: &mut Criterion) {
    let n = 200;
    let (a, b) = banded_test_system(n, 0.3);
    let mut x = vec![0.0; n];

    for method in [Method::Jacobi, Method::GaussSeidel, Method::Sor { omega: 1.2 }] {
        for strategy in [Strategy::Elementwise, Strategy::MatrixForm] {
            let name = format!("{} {:?}", method.name(), strategy);
            c.bench_function(&name, |ben| {
                let mut solver = StationarySolver::new(method, 1e-8, 200).with_strategy(strategy);
                ben.iter(|| {
                    x.fill(0.0);
                    let _stats = solver.solve(black_box(&a), None, black_box(&b), black_box(&mut x)).unwrap();
                })
            });
        }
    }

    c.bench_function("pcg", |ben| {
        let mut solver = PcgSolver::new(1e-8, 200);
        ben.iter(|| {
            x.fill(0.0);
            let _stats = solver.solve(black_box(&a), None, black_box(&b), black_box(&mut x)).unwrap();
        })
    });
}

criterion_group!(benches, bench_sweep_strategies);
criterion_main!(benches);
