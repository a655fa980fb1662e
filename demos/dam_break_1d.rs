use std::{fs, io};

use tsunami::{
    setup::DamBreak1d, Boundaries, Boundary, CsvWriter, Driver, Logger, SimConfig, Simulation,
    SolverKind, Stations,
};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = SimConfig::default()
        .with_x(10.0, 500)
        .with_end_time(1.25)
        .with_solver(SolverKind::FWave)
        .with_boundaries(Boundaries::x(Boundary::Reflecting, Boundary::Outflow))
        .with_sampling(25);

    let sim = Simulation::new(DamBreak1d::new(10.0, 5.0, 5.0), config.clone())
        .expect("invalid configuration");
    println!("{sim}");

    fs::create_dir_all("out/stations").expect("couldn't create output directory");

    let stations = Stations::new(
        &config,
        [
            ("wall".to_string(), 0.5, 0.0),
            ("dam".to_string(), 5.0, 0.0),
        ],
        |name: &str| fs::File::create(format!("out/stations/{name}.csv")).map(io::BufWriter::new),
    )
    .expect("invalid station");

    Driver::new(sim)
        .with_observer(Logger)
        .with_observer(CsvWriter::new(|frame: usize| {
            fs::File::create(format!("out/dam_break_1d_{frame}.csv")).map(io::BufWriter::new)
        }))
        .with_observer(stations)
        .run()
        .expect("failed to run simulation");
}
