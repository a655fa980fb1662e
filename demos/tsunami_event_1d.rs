use std::{env, fs, io};

use tsunami::{
    read_profile, setup::TsunamiEvent1d, Boundaries, Boundary, CsvWriter, Driver, Logger,
    SimConfig, Simulation,
};

/// Usage: `tsunami_event_1d <profile.csv>`, bathymetry in the last column
/// sampled every 250 m.
fn main() {
    tracing_subscriber::fmt::init();

    let path = env::args().nth(1).expect("missing bathymetry profile");
    let file = io::BufReader::new(fs::File::open(path).expect("couldn't open profile"));
    let profile = read_profile(file).expect("couldn't read profile");
    let setup = TsunamiEvent1d::new(profile).expect("invalid profile");

    let config = SimConfig::default()
        .with_x_range(0.0, setup.length(), 1)
        .with_resolution(250.0)
        .with_end_time(3600.0)
        .with_boundaries(Boundaries::uniform(Boundary::Outflow))
        .with_sampling(100);

    let sim = Simulation::new(&setup, config).expect("invalid configuration");
    println!("{sim}");

    fs::create_dir_all("out").expect("couldn't create output directory");
    Driver::new(sim)
        .with_observer(Logger)
        .with_observer(CsvWriter::new(|frame: usize| {
            fs::File::create(format!("out/tsunami_event_1d_{frame}.csv")).map(io::BufWriter::new)
        }))
        .run()
        .expect("failed to run simulation");
}
