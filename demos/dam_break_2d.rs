use std::{fs, io};

use tsunami::{
    setup::DamBreak2d, Boundaries, Boundary, Driver, Logger, SimConfig, Simulation, SnapshotWriter,
};

fn main() {
    tracing_subscriber::fmt::init();

    let config = SimConfig::default()
        .with_x(100.0, 200)
        .with_y(100.0, 200)
        .with_end_time(10.0)
        .with_boundaries(Boundaries::uniform(Boundary::Outflow))
        .with_sampling(20);

    let sim = Simulation::new(DamBreak2d::default(), config).expect("invalid configuration");
    println!("{sim}");

    fs::create_dir_all("out").expect("couldn't create output directory");
    let mut output = io::BufWriter::new(
        fs::File::create("out/dam_break_2d.swe").expect("couldn't create output file"),
    );

    Driver::new(sim)
        .with_observer(Logger)
        .with_observer(SnapshotWriter::new(&mut output))
        .run()
        .expect("failed to run simulation");
}
