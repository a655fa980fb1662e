//! Wave propagation patches.
//!
//! A patch owns the conserved quantities of a regular grid surrounded by one
//! ring of ghost cells. A tick is always `set_ghost_cells` followed by
//! `time_step`: the boundary procedure is the only writer of ghost cells, and
//! the Riemann update only writes interior cells of the scratch buffer.

use faer_core::{zipped, MatMut, MatRef};
use reborrow::*;

use crate::{
    config::{ConfigError, PatchConfig},
    riemann::{Cell, RiemannSolver},
    state::{Axis, Quantities},
    Float,
};

mod one_d;
mod two_d;

pub use one_d::WavePropagation1d;
pub use two_d::WavePropagation2d;

/// One line of cells (ghosts included) read by a sweep, as column vectors.
#[derive(Clone, Copy)]
pub(crate) struct Line<'a> {
    h: MatRef<'a, Float>,
    hu: MatRef<'a, Float>,
    b: MatRef<'a, Float>,
}

impl<'a> Line<'a> {
    #[inline]
    fn cell(&self, i: usize) -> Cell {
        Cell::new(self.h.read(i, 0), self.hu.read(i, 0), self.b.read(i, 0))
    }

    #[inline]
    fn len(&self) -> usize {
        self.h.nrows()
    }
}

/// Line `index` along `axis` of a full field, as a column vector.
fn lane(m: MatRef<'_, Float>, axis: Axis, index: usize) -> MatRef<'_, Float> {
    match axis {
        Axis::X => m.col(index),
        Axis::Y => m.row(index).transpose(),
    }
}

fn lane_mut(m: MatMut<'_, Float>, axis: Axis, index: usize) -> MatMut<'_, Float> {
    match axis {
        Axis::X => m.col(index),
        Axis::Y => m.row(index).transpose(),
    }
}

/// Extracts line `index` along `axis` from `q` (normal momentum) and `b`.
pub(crate) fn line<'a>(
    q: &'a Quantities,
    b: MatRef<'a, Float>,
    axis: Axis,
    index: usize,
) -> Line<'a> {
    Line {
        h: lane(q.h.as_ref(), axis, index),
        hu: lane(q.normal_momentum(axis).as_ref(), axis, index),
        b: lane(b, axis, index),
    }
}

/// Wave propagation along one line.
///
/// Every interface `i | i+1`, the two boundary interfaces included, is
/// solved on `current`; `scaling * update` is subtracted from the interior
/// cells of the seeded `h`/`hu` next-step line. Ghost cells are left
/// untouched.
pub(crate) fn sweep<S: RiemannSolver>(
    solver: &S,
    current: Line<'_>,
    mut h: MatMut<'_, Float>,
    mut hu: MatMut<'_, Float>,
    scaling: Float,
) {
    let last = current.len() - 1;
    debug_assert!(h.nrows() == current.len() && hu.nrows() == current.len());

    let mut apply = |i: usize, update: [Float; 2]| {
        if i == 0 || i == last {
            return;
        }
        h.write(i, 0, h.read(i, 0) - scaling * update[0]);
        hu.write(i, 0, hu.read(i, 0) - scaling * update[1]);
    };

    let mut left = current.cell(0);
    for edge in 0..last {
        let right = current.cell(edge + 1);
        let updates = solver.net_updates(left, right);

        apply(edge, updates.left);
        apply(edge + 1, updates.right);

        left = right;
    }
}

/// Applies [`sweep`] to every line in `lines` along `axis`, reading `current`
/// and accumulating into `next`.
pub(crate) fn sweep_lines<S: RiemannSolver>(
    solver: &S,
    current: &Quantities,
    next: &mut Quantities,
    b: MatRef<'_, Float>,
    axis: Axis,
    lines: std::ops::Range<usize>,
    scaling: Float,
) {
    let (h, hu, _) = next.split_mut(axis);
    let (mut h, mut hu) = (h.as_mut(), hu.as_mut());
    for index in lines {
        sweep(
            solver,
            line(current, b, axis, index),
            lane_mut(h.rb_mut(), axis, index),
            lane_mut(hu.rb_mut(), axis, index),
            scaling,
        );
    }
}

/// Dimension of a patch, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    One,
    Two,
}

/// A one- or two-dimensional patch.
#[derive(Debug, Clone)]
pub enum WavePropagation {
    OneD(WavePropagation1d),
    TwoD(WavePropagation2d),
}

macro_rules! delegate {
    ($self:ident, $patch:ident => $body:expr) => {
        match $self {
            WavePropagation::OneD($patch) => $body,
            WavePropagation::TwoD($patch) => $body,
        }
    };
}

impl WavePropagation {
    pub fn one_d(nx: usize, config: PatchConfig) -> Result<Self, ConfigError> {
        WavePropagation1d::new(nx, config).map(WavePropagation::OneD)
    }

    pub fn two_d(nx: usize, ny: usize, config: PatchConfig) -> Result<Self, ConfigError> {
        WavePropagation2d::new(nx, ny, config).map(WavePropagation::TwoD)
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            WavePropagation::OneD(_) => Dimension::One,
            WavePropagation::TwoD(_) => Dimension::Two,
        }
    }

    pub fn config(&self) -> PatchConfig {
        delegate!(self, p => p.config())
    }

    /// Interior cells `(nx, ny)`; `ny == 1` in one dimension.
    pub fn cells(&self) -> (usize, usize) {
        match self {
            WavePropagation::OneD(p) => (p.cells(), 1),
            WavePropagation::TwoD(p) => p.cells(),
        }
    }

    pub fn set_ghost_cells(&mut self) {
        delegate!(self, p => p.set_ghost_cells())
    }

    /// Advances the patch by `dt` with `scaling = dt / dx` (`dx == dy`).
    pub fn time_step(&mut self, scaling: Float) {
        delegate!(self, p => p.time_step(scaling))
    }

    /// Advances the patch with distinct scalings `dt/dx` and `dt/dy`; the
    /// one-dimensional patch ignores `scaling_y`.
    pub fn time_step_xy(&mut self, scaling_x: Float, scaling_y: Float) {
        match self {
            WavePropagation::OneD(p) => p.time_step(scaling_x),
            WavePropagation::TwoD(p) => p.time_step_xy(scaling_x, scaling_y),
        }
    }

    pub fn stride(&self) -> usize {
        delegate!(self, p => p.stride())
    }

    pub fn height(&self) -> MatRef<'_, Float> {
        delegate!(self, p => p.height())
    }

    pub fn momentum_x(&self) -> MatRef<'_, Float> {
        delegate!(self, p => p.momentum_x())
    }

    pub fn momentum_y(&self) -> MatRef<'_, Float> {
        delegate!(self, p => p.momentum_y())
    }

    pub fn bathymetry(&self) -> MatRef<'_, Float> {
        delegate!(self, p => p.bathymetry())
    }

    /// `iy` must be zero in one dimension.
    pub fn set_height(&mut self, ix: usize, iy: usize, h: Float) {
        match self {
            WavePropagation::OneD(p) => {
                assert_eq!(iy, 0);
                p.set_height(ix, h)
            }
            WavePropagation::TwoD(p) => p.set_height(ix, iy, h),
        }
    }

    pub fn set_momentum_x(&mut self, ix: usize, iy: usize, hu: Float) {
        match self {
            WavePropagation::OneD(p) => {
                assert_eq!(iy, 0);
                p.set_momentum_x(ix, hu)
            }
            WavePropagation::TwoD(p) => p.set_momentum_x(ix, iy, hu),
        }
    }

    /// Ignored in one dimension, where `hv` stays zero.
    pub fn set_momentum_y(&mut self, ix: usize, iy: usize, hv: Float) {
        if let WavePropagation::TwoD(p) = self {
            p.set_momentum_y(ix, iy, hv)
        }
    }

    pub fn set_bathymetry(&mut self, ix: usize, iy: usize, b: Float) {
        match self {
            WavePropagation::OneD(p) => {
                assert_eq!(iy, 0);
                p.set_bathymetry(ix, b)
            }
            WavePropagation::TwoD(p) => p.set_bathymetry(ix, iy, b),
        }
    }

    /// Whether every interior height and momentum is finite.
    pub fn is_finite(&self) -> bool {
        [self.height(), self.momentum_x(), self.momentum_y()]
            .into_iter()
            .all(all_finite)
    }
}

pub(crate) fn all_finite(m: MatRef<'_, Float>) -> bool {
    let mut finite = true;
    zipped!(m).for_each(|x| finite &= x.read().is_finite());
    finite
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riemann::{FWave, Roe};
    use faer_core::Mat;

    fn column(values: &[Float]) -> Mat<Float> {
        Mat::from_fn(values.len(), 1, |i, _| values[i])
    }

    #[test]
    fn sweep_leaves_ghost_cells_alone() {
        let h = column(&[10.0, 10.0, 8.0, 8.0]);
        let hu = column(&[0.0; 4]);
        let b = column(&[0.0; 4]);
        let current = Line {
            h: h.as_ref(),
            hu: hu.as_ref(),
            b: b.as_ref(),
        };

        let mut h_next = h.clone();
        let mut hu_next = hu.clone();
        sweep(&Roe, current, h_next.as_mut(), hu_next.as_mut(), 0.1);

        assert_eq!(h_next.read(0, 0), 10.0);
        assert_eq!(h_next.read(3, 0), 8.0);
        assert_eq!(hu_next.read(0, 0), 0.0);
        assert_eq!(hu_next.read(3, 0), 0.0);
        assert!(h_next.read(1, 0) < 10.0);
        assert!(h_next.read(2, 0) > 8.0);
    }

    #[test]
    fn sweep_over_rows_matches_sweep_over_columns() {
        let mut q = Quantities::zeros(4, 4);
        let b = Mat::<Float>::zeros(4, 4);
        for k in 0..4 {
            let h = if k < 2 { 6.0 } else { 2.0 };
            q.h.write(k, 1, h);
            q.h.write(1, k, h);
        }

        let mut along_x = q.clone();
        sweep_lines(&FWave, &q, &mut along_x, b.as_ref(), Axis::X, 1..2, 0.05);
        let mut along_y = q.clone();
        sweep_lines(&FWave, &q, &mut along_y, b.as_ref(), Axis::Y, 1..2, 0.05);

        for k in 0..4 {
            assert_eq!(along_x.h.read(k, 1), along_y.h.read(1, k));
            assert_eq!(along_x.hu.read(k, 1), along_y.hv.read(1, k));
        }
    }

    #[test]
    fn enum_dispatch_reports_shape() {
        let config = PatchConfig::default();
        let one = WavePropagation::one_d(7, config).unwrap();
        assert_eq!(one.dimension(), Dimension::One);
        assert_eq!(one.cells(), (7, 1));
        assert_eq!(one.height().nrows(), 7);

        let two = WavePropagation::two_d(3, 5, config).unwrap();
        assert_eq!(two.dimension(), Dimension::Two);
        assert_eq!(two.cells(), (3, 5));
        assert_eq!(two.height().ncols(), 5);
        assert!(two.is_finite());

        let mut broken = WavePropagation::two_d(3, 5, config).unwrap();
        broken.set_momentum_y(2, 4, Float::NAN);
        assert!(!broken.is_finite());

        assert!(matches!(
            WavePropagation::two_d(3, 0, config),
            Err(ConfigError::EmptyGrid)
        ));
    }
}
