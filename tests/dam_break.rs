use approx::assert_abs_diff_eq;
use tsunami::{
    setup::{DamBreak1d, RareRare1d, ShockShock1d},
    Driver, Setup, SimConfig, Simulation, SolverKind,
};

fn run(setup: impl Setup, solver: SolverKind, cells: usize, end_time: f32) -> Simulation {
    let config = SimConfig::default()
        .with_x(10.0, cells)
        .with_end_time(end_time)
        .with_solver(solver);
    let mut driver = Driver::new(Simulation::new(setup, config).unwrap());
    driver.run().unwrap();
    driver.into_simulation()
}

#[test]
fn dam_break_reaches_middle_state() {
    // h* of the exact solution for 10 | 5 is about 7.27
    for solver in [SolverKind::Roe, SolverKind::FWave] {
        let sim = run(DamBreak1d::new(10.0, 5.0, 5.0), solver, 500, 0.25);
        let h = sim.patch().height();
        let hu = sim.patch().momentum_x();

        for i in 250..300 {
            let depth = h.read(i, 0);
            assert!(depth > 7.1 && depth < 7.45, "{solver}: h[{i}] = {depth}");
            assert!(hu.read(i, 0) > 19.0, "{solver}: hu[{i}] = {}", hu.read(i, 0));
        }
        // undisturbed far field
        assert_abs_diff_eq!(h.read(0, 0), 10.0, epsilon = 1e-4);
        assert_abs_diff_eq!(h.read(499, 0), 5.0, epsilon = 1e-4);
    }
}

#[test]
fn shock_shock_is_symmetric() {
    for solver in [SolverKind::Roe, SolverKind::FWave] {
        let sim = run(ShockShock1d::new(10.0, 20.0, 5.0), solver, 200, 0.3);
        let h = sim.patch().height();
        let hu = sim.patch().momentum_x();

        assert!(h.read(100, 0) > 10.0);
        assert!(hu.read(100, 0).abs() < 1.0);
        for i in 0..100 {
            assert_abs_diff_eq!(h.read(i, 0), h.read(199 - i, 0), epsilon = 1e-3);
            assert_abs_diff_eq!(hu.read(i, 0), -hu.read(199 - i, 0), epsilon = 1e-3);
        }
    }
}

#[test]
fn rare_rare_lowers_the_middle() {
    for solver in [SolverKind::Roe, SolverKind::FWave] {
        let sim = run(RareRare1d::new(10.0, 20.0, 5.0), solver, 200, 0.3);
        let h = sim.patch().height();

        assert!(h.read(100, 0) < 10.0);
        assert!(h.read(99, 0) < 10.0);
        for i in 0..100 {
            assert_abs_diff_eq!(h.read(i, 0), h.read(199 - i, 0), epsilon = 1e-3);
        }
        assert!(sim.patch().is_finite());
    }
}
