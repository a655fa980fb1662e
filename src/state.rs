//! Conserved quantities and their double buffer.

use faer_core::Mat;

use crate::Float;

/// Sweep direction. `X` runs along the rows of the storage, `Y` along its
/// columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Height and momenta of every cell, ghost cells included.
///
/// Cell `(ix, iy)` lives at row `ix`, column `iy`.
#[derive(Debug, Clone)]
pub struct Quantities {
    pub h: Mat<Float>,
    pub hu: Mat<Float>,
    pub hv: Mat<Float>,
}

impl Quantities {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            h: Mat::zeros(rows, cols),
            hu: Mat::zeros(rows, cols),
            hv: Mat::zeros(rows, cols),
        }
    }

    /// Momentum component normal to interfaces crossed by a sweep along `axis`.
    pub fn normal_momentum(&self, axis: Axis) -> &Mat<Float> {
        match axis {
            Axis::X => &self.hu,
            Axis::Y => &self.hv,
        }
    }

    /// `(h, normal momentum, tangential momentum)` for a sweep along `axis`.
    pub fn split_mut(
        &mut self,
        axis: Axis,
    ) -> (&mut Mat<Float>, &mut Mat<Float>, &mut Mat<Float>) {
        let Self { h, hu, hv } = self;
        match axis {
            Axis::X => (h, hu, hv),
            Axis::Y => (h, hv, hu),
        }
    }

    /// Overwrites every cell with the values of `other`; shapes must agree.
    pub fn copy_from(&mut self, other: &Quantities) {
        self.h.as_mut().clone_from(other.h.as_ref());
        self.hu.as_mut().clone_from(other.hu.as_ref());
        self.hv.as_mut().clone_from(other.hv.as_ref());
    }
}

/// Two full sets of [`Quantities`]: the `active` one readable by callers and
/// a scratch one written by a sweep before the two are swapped.
#[derive(Debug, Clone)]
pub struct DoubleBuffer {
    buffers: [Quantities; 2],
    active: usize,
}

impl DoubleBuffer {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            buffers: [Quantities::zeros(rows, cols), Quantities::zeros(rows, cols)],
            active: 0,
        }
    }

    #[inline]
    pub fn active(&self) -> &Quantities {
        &self.buffers[self.active]
    }

    #[inline]
    pub fn active_mut(&mut self) -> &mut Quantities {
        &mut self.buffers[self.active]
    }

    /// `(active, scratch)`.
    pub fn split(&mut self) -> (&Quantities, &mut Quantities) {
        let [first, second] = &mut self.buffers;
        if self.active == 0 {
            (first, second)
        } else {
            (second, first)
        }
    }

    /// Seeds the scratch buffer with a copy of the active one.
    pub fn seed(&mut self) -> (&Quantities, &mut Quantities) {
        let (active, scratch) = self.split();
        scratch.copy_from(active);
        (active, scratch)
    }

    /// Exposes the scratch buffer.
    #[inline]
    pub fn swap(&mut self) {
        self.active ^= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_exposes_scratch() {
        let mut buffer = DoubleBuffer::zeros(4, 1);
        buffer.active_mut().h.write(1, 0, 3.0);

        {
            let (active, scratch) = buffer.seed();
            assert_eq!(active.h.read(1, 0), 3.0);
            scratch.h.write(1, 0, 5.0);
        }
        assert_eq!(buffer.active().h.read(1, 0), 3.0);

        buffer.swap();
        assert_eq!(buffer.active().h.read(1, 0), 5.0);

        buffer.swap();
        assert_eq!(buffer.active().h.read(1, 0), 3.0);
    }

    #[test]
    fn split_mut_orders_momenta_by_axis() {
        let mut q = Quantities::zeros(2, 2);
        q.hu.write(0, 0, 1.0);
        q.hv.write(0, 0, 2.0);

        let (_, normal, tangential) = q.split_mut(Axis::Y);
        assert_eq!(normal.read(0, 0), 2.0);
        assert_eq!(tangential.read(0, 0), 1.0);
        assert_eq!(q.normal_momentum(Axis::X).read(0, 0), 1.0);
    }
}
