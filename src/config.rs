use thiserror::Error;

use crate::{bc::Boundaries, mesh::Grid, patch::Dimension, riemann::SolverKind, Float};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown solver `{0}`, expected `roe` or `fwave`")]
    UnknownSolver(String),
    #[error("unknown boundary condition `{0}`, expected `outflow` or `reflecting`")]
    UnknownBoundary(String),
    #[error("a patch needs at least one cell in every direction")]
    EmptyGrid,
    #[error("domain extent must be positive and finite, got {0}")]
    InvalidExtent(Float),
    #[error("end time must be positive and finite, got {0}")]
    InvalidEndTime(Float),
    #[error("CFL factor must lie in (0, 1], got {0}")]
    InvalidCfl(Float),
    #[error("output sampling period must be at least one step")]
    ZeroSampling,
    #[error("station `{name}` at ({x}, {y}) lies outside the domain")]
    StationOutsideDomain { name: String, x: Float, y: Float },
    #[error("initial state has no wet cell, cannot derive a time step")]
    NoWetCell,
    #[error("bathymetry profile is empty")]
    EmptyProfile,
}

/// Immutable configuration of a patch: solver choice and the four walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatchConfig {
    pub solver: SolverKind,
    pub boundaries: Boundaries,
}

impl PatchConfig {
    pub fn new(solver: SolverKind, boundaries: Boundaries) -> Self {
        Self { solver, boundaries }
    }
}

/// Run-level configuration.
///
/// Runs are one-dimensional until a `y` extent is configured.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub(crate) dimension: Dimension,
    pub(crate) x: Grid,
    pub(crate) y: Grid,
    pub(crate) end_time: Float,
    pub(crate) cfl: Float,
    pub(crate) sampling: usize,
    pub(crate) patch: PatchConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dimension: Dimension::One,
            x: Grid::from_cells(0.0, 10.0, 100),
            y: Grid::from_cells(0.0, 10.0, 1),
            end_time: 1.25,
            cfl: 0.5,
            sampling: 25,
            patch: PatchConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn with_x(self, length: Float, cells: usize) -> Self {
        self.with_x_range(0.0, length, cells)
    }

    pub fn with_x_range(mut self, lower: Float, upper: Float, cells: usize) -> Self {
        self.x = Grid::from_cells(lower, upper, cells);
        self
    }

    /// Switches to a two-dimensional run, even with a single row of cells.
    pub fn with_y(self, length: Float, cells: usize) -> Self {
        self.with_y_range(0.0, length, cells)
    }

    pub fn with_y_range(mut self, lower: Float, upper: Float, cells: usize) -> Self {
        self.dimension = Dimension::Two;
        self.y = Grid::from_cells(lower, upper, cells);
        self
    }

    /// Re-grids the configured extents with cells of size at most `delta`,
    /// which must be positive.
    pub fn with_resolution(mut self, delta: Float) -> Self {
        self.x = Grid::from_delta(self.x.lower, self.x.upper, delta);
        if self.dimension == Dimension::Two {
            self.y = Grid::from_delta(self.y.lower, self.y.upper, delta);
        }
        self
    }

    pub fn with_end_time(mut self, end_time: Float) -> Self {
        self.end_time = end_time;
        self
    }

    pub fn with_cfl(mut self, cfl: Float) -> Self {
        self.cfl = cfl;
        self
    }

    /// Observers are notified every `sampling` steps.
    pub fn with_sampling(mut self, sampling: usize) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_solver(mut self, solver: SolverKind) -> Self {
        self.patch.solver = solver;
        self
    }

    pub fn with_boundaries(mut self, boundaries: Boundaries) -> Self {
        self.patch.boundaries = boundaries;
        self
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn x(&self) -> Grid {
        self.x
    }

    pub fn y(&self) -> Grid {
        self.y
    }

    pub fn end_time(&self) -> Float {
        self.end_time
    }

    pub fn cfl(&self) -> Float {
        self.cfl
    }

    pub fn sampling(&self) -> usize {
        self.sampling
    }

    pub fn patch(&self) -> PatchConfig {
        self.patch
    }

    pub fn is_one_dimensional(&self) -> bool {
        self.dimension == Dimension::One
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for grid in [self.x, self.y] {
            if grid.cells == 0 {
                return Err(ConfigError::EmptyGrid);
            }
            let extent = grid.upper - grid.lower;
            if !(extent.is_finite() && extent > 0.0) {
                return Err(ConfigError::InvalidExtent(extent));
            }
        }
        if !(self.end_time.is_finite() && self.end_time > 0.0) {
            return Err(ConfigError::InvalidEndTime(self.end_time));
        }
        if !(self.cfl > 0.0 && self.cfl <= 1.0) {
            return Err(ConfigError::InvalidCfl(self.cfl));
        }
        if self.sampling == 0 {
            return Err(ConfigError::ZeroSampling);
        }
        Ok(())
    }
}
