use faer_core::{Mat, MatRef};

use super::sweep_lines;
use crate::{
    config::{ConfigError, PatchConfig},
    riemann::{FWave, Roe, SolverKind},
    state::{Axis, DoubleBuffer},
    Float,
};

/// One-dimensional wave propagation patch.
///
/// Storage is a single column of `nx + 2` cells; cells `0` and `nx + 1` are
/// ghosts.
#[derive(Debug, Clone)]
pub struct WavePropagation1d {
    cells: usize,
    config: PatchConfig,
    state: DoubleBuffer,
    b: Mat<Float>,
}

impl WavePropagation1d {
    pub fn new(cells: usize, config: PatchConfig) -> Result<Self, ConfigError> {
        if cells == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        tracing::debug!(
            cells,
            solver = %config.solver,
            left = %config.boundaries.left,
            right = %config.boundaries.right,
            "allocating 1d patch"
        );

        Ok(Self {
            cells,
            config,
            state: DoubleBuffer::zeros(cells + 2, 1),
            b: Mat::zeros(cells + 2, 1),
        })
    }

    pub fn cells(&self) -> usize {
        self.cells
    }

    pub fn config(&self) -> PatchConfig {
        self.config
    }

    /// Fills both ghost cells of the active buffer from their neighbours.
    pub fn set_ghost_cells(&mut self) {
        let walls = self.config.boundaries;
        let n = self.cells;
        let q = self.state.active_mut();

        walls.left.fill(q, &mut self.b, Axis::X, (0, 0), (1, 0));
        walls.right.fill(q, &mut self.b, Axis::X, (n + 1, 0), (n, 0));
    }

    /// Advances the interior by one step, `scaling = dt / dx`.
    pub fn time_step(&mut self, scaling: Float) {
        let (current, next) = self.state.seed();
        let b = self.b.as_ref();

        match self.config.solver {
            SolverKind::Roe => sweep_lines(&Roe, current, next, b, Axis::X, 0..1, scaling),
            SolverKind::FWave => sweep_lines(&FWave, current, next, b, Axis::X, 0..1, scaling),
        }

        self.state.swap();
    }

    pub fn stride(&self) -> usize {
        self.state.active().h.as_ref().col_stride() as usize
    }

    pub fn height(&self) -> MatRef<'_, Float> {
        self.interior(&self.state.active().h)
    }

    pub fn momentum_x(&self) -> MatRef<'_, Float> {
        self.interior(&self.state.active().hu)
    }

    /// Always zero.
    pub fn momentum_y(&self) -> MatRef<'_, Float> {
        self.interior(&self.state.active().hv)
    }

    pub fn bathymetry(&self) -> MatRef<'_, Float> {
        self.interior(&self.b)
    }

    pub fn set_height(&mut self, ix: usize, h: Float) {
        self.state.active_mut().h.write(ix + 1, 0, h);
    }

    pub fn set_momentum_x(&mut self, ix: usize, hu: Float) {
        self.state.active_mut().hu.write(ix + 1, 0, hu);
    }

    pub fn set_bathymetry(&mut self, ix: usize, b: Float) {
        self.b.write(ix + 1, 0, b);
    }

    fn interior<'a>(&self, m: &'a Mat<Float>) -> MatRef<'a, Float> {
        m.as_ref().submatrix(1, 0, self.cells, 1)
    }
}
