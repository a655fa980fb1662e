//! Shallow water wave propagation on regular Cartesian grids.
//!
//! The crate is layered leaf-first:
//!
//! * [`riemann`]: Roe and F-Wave approximate Riemann solvers producing
//!   per-interface net-updates.
//! * [`patch`]: double-buffered grids with a ring of ghost cells, advanced by
//!   a wave-propagation sweep (1D) or dimensional splitting (2D).
//! * [`sim`] and [`driver`]: initial conditions from a [`setup::Setup`], a
//!   CFL-bounded time step, and a time loop notifying [`driver::Observer`]s.

pub mod bc;
pub mod config;
pub mod driver;
pub mod io;
pub mod mesh;
pub mod patch;
pub mod riemann;
pub mod setup;
pub mod sim;
pub mod state;

/// Floating point type used for every physical quantity.
pub type Float = f32;

/// Gravitational acceleration in m/s².
pub const GRAVITY: Float = 9.80665;

pub use bc::{Boundaries, Boundary};
pub use config::{ConfigError, PatchConfig, SimConfig};
pub use driver::{Driver, Logger, ObsCtx, Observer, SimError};
pub use io::{read_profile, CsvWriter, SnapshotWriter, Stations};
pub use patch::{WavePropagation, WavePropagation1d, WavePropagation2d};
pub use riemann::{Cell, FWave, NetUpdates, RiemannSolver, Roe, SolverKind};
pub use setup::Setup;
pub use sim::Simulation;
