use std::ops::Range;

use faer_core::{Mat, MatRef};

use super::sweep_lines;
use crate::{
    config::{ConfigError, PatchConfig},
    riemann::{FWave, RiemannSolver, Roe, SolverKind},
    state::{Axis, DoubleBuffer},
    Float,
};

/// Two-dimensional wave propagation patch using dimensional splitting.
///
/// Cell `(ix, iy)` is stored at row `ix + 1`, column `iy + 1` of
/// `(nx + 2) × (ny + 2)` matrices; `left`/`right` walls bound `x`,
/// `bottom`/`top` walls bound `y`.
#[derive(Debug, Clone)]
pub struct WavePropagation2d {
    nx: usize,
    ny: usize,
    config: PatchConfig,
    state: DoubleBuffer,
    b: Mat<Float>,
}

impl WavePropagation2d {
    pub fn new(nx: usize, ny: usize, config: PatchConfig) -> Result<Self, ConfigError> {
        if nx == 0 || ny == 0 {
            return Err(ConfigError::EmptyGrid);
        }

        tracing::debug!(
            nx,
            ny,
            solver = %config.solver,
            boundaries = %config.boundaries,
            "allocating 2d patch"
        );

        Ok(Self {
            nx,
            ny,
            config,
            state: DoubleBuffer::zeros(nx + 2, ny + 2),
            b: Mat::zeros(nx + 2, ny + 2),
        })
    }

    pub fn cells(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    pub fn config(&self) -> PatchConfig {
        self.config
    }

    /// Fills the ghost ring of the active buffer.
    pub fn set_ghost_cells(&mut self) {
        self.fill_x_ghosts(1..self.ny + 1);
        // full range, so the corners copy the freshly written x ghosts
        self.fill_y_ghosts(0..self.nx + 2);
    }

    fn fill_x_ghosts(&mut self, columns: Range<usize>) {
        let walls = self.config.boundaries;
        let n = self.nx;
        let q = self.state.active_mut();

        for j in columns {
            walls.left.fill(q, &mut self.b, Axis::X, (0, j), (1, j));
            walls.right.fill(q, &mut self.b, Axis::X, (n + 1, j), (n, j));
        }
    }

    fn fill_y_ghosts(&mut self, rows: Range<usize>) {
        let walls = self.config.boundaries;
        let n = self.ny;
        let q = self.state.active_mut();

        for i in rows {
            walls.bottom.fill(q, &mut self.b, Axis::Y, (i, 0), (i, 1));
            walls.top.fill(q, &mut self.b, Axis::Y, (i, n + 1), (i, n));
        }
    }

    /// Advances the interior by one step on square cells, `scaling = dt / dx`.
    pub fn time_step(&mut self, scaling: Float) {
        self.time_step_xy(scaling, scaling);
    }

    /// x-sweep on every interior row, then y-sweep on every interior column
    /// of the x-sweep's result.
    ///
    /// Between the two sweeps the bottom/top ghost cells are re-derived from
    /// the intermediate state, so the y-sweep sees boundary values consistent
    /// with the interior it is applied to.
    pub fn time_step_xy(&mut self, scaling_x: Float, scaling_y: Float) {
        match self.config.solver {
            SolverKind::Roe => self.split_step(&Roe, scaling_x, scaling_y),
            SolverKind::FWave => self.split_step(&FWave, scaling_x, scaling_y),
        }
    }

    fn split_step<S: RiemannSolver>(&mut self, solver: &S, scaling_x: Float, scaling_y: Float) {
        let (nx, ny) = (self.nx, self.ny);

        let (current, next) = self.state.seed();
        sweep_lines(
            solver,
            current,
            next,
            self.b.as_ref(),
            Axis::X,
            1..ny + 1,
            scaling_x,
        );
        self.state.swap();

        self.fill_y_ghosts(1..nx + 1);

        let (current, next) = self.state.seed();
        sweep_lines(
            solver,
            current,
            next,
            self.b.as_ref(),
            Axis::Y,
            1..nx + 1,
            scaling_y,
        );
        self.state.swap();
    }

    /// Column stride of the storage: interior cell `(ix, iy)` of a getter
    /// view sits `ix * row_stride + iy * stride` elements from its origin.
    pub fn stride(&self) -> usize {
        self.state.active().h.as_ref().col_stride() as usize
    }

    pub fn height(&self) -> MatRef<'_, Float> {
        self.interior(&self.state.active().h)
    }

    pub fn momentum_x(&self) -> MatRef<'_, Float> {
        self.interior(&self.state.active().hu)
    }

    pub fn momentum_y(&self) -> MatRef<'_, Float> {
        self.interior(&self.state.active().hv)
    }

    pub fn bathymetry(&self) -> MatRef<'_, Float> {
        self.interior(&self.b)
    }

    pub fn set_height(&mut self, ix: usize, iy: usize, h: Float) {
        self.state.active_mut().h.write(ix + 1, iy + 1, h);
    }

    pub fn set_momentum_x(&mut self, ix: usize, iy: usize, hu: Float) {
        self.state.active_mut().hu.write(ix + 1, iy + 1, hu);
    }

    pub fn set_momentum_y(&mut self, ix: usize, iy: usize, hv: Float) {
        self.state.active_mut().hv.write(ix + 1, iy + 1, hv);
    }

    pub fn set_bathymetry(&mut self, ix: usize, iy: usize, b: Float) {
        self.b.write(ix + 1, iy + 1, b);
    }

    fn interior<'a>(&self, m: &'a Mat<Float>) -> MatRef<'a, Float> {
        m.as_ref().submatrix(1, 1, self.nx, self.ny)
    }
}
