use crate::Float;

/// Uniform partition of `[lower, upper]` into `cells` finite volumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub(crate) lower: Float,
    pub(crate) upper: Float,
    pub(crate) delta: Float,
    pub(crate) cells: usize,
}

impl Grid {
    pub fn from_cells(lower: Float, upper: Float, cells: usize) -> Self {
        let delta = (upper - lower) / cells as Float;
        Self {
            lower,
            upper,
            delta,
            cells,
        }
    }

    pub fn from_delta(lower: Float, upper: Float, delta: Float) -> Self {
        let cells = ((upper - lower) / delta).ceil() as usize;
        Self::from_cells(lower, upper, cells)
    }

    pub fn lower(&self) -> Float {
        self.lower
    }

    pub fn upper(&self) -> Float {
        self.upper
    }

    pub fn delta(&self) -> Float {
        self.delta
    }

    pub fn cells(&self) -> usize {
        self.cells
    }

    /// Centre of cell `i`.
    #[inline]
    pub fn center(&self, i: usize) -> Float {
        self.lower + self.delta * (i as Float + 0.5)
    }

    pub fn centers(self) -> impl Iterator<Item = Float> {
        (0..self.cells).map(move |i| self.center(i))
    }

    /// Cell containing `x`, the upper edge belonging to the last cell.
    pub fn locate(&self, x: Float) -> Option<usize> {
        if !(self.lower..=self.upper).contains(&x) {
            return None;
        }
        let i = ((x - self.lower) / self.delta) as usize;
        Some(i.min(self.cells - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_are_midpoints() {
        let grid = Grid::from_cells(0.0, 10.0, 4);
        assert_eq!(grid.delta(), 2.5);
        let centers: Vec<_> = grid.centers().collect();
        assert_eq!(centers, vec![1.25, 3.75, 6.25, 8.75]);
    }

    #[test]
    fn from_delta_rounds_up() {
        let grid = Grid::from_delta(0.0, 1.0, 0.3);
        assert_eq!(grid.cells(), 4);
        assert_eq!(grid.delta(), 0.25);
    }

    #[test]
    fn locate_clamps_upper_edge() {
        let grid = Grid::from_cells(-5.0, 5.0, 10);
        assert_eq!(grid.locate(-5.0), Some(0));
        assert_eq!(grid.locate(0.5), Some(5));
        assert_eq!(grid.locate(5.0), Some(9));
        assert_eq!(grid.locate(5.5), None);
        assert_eq!(grid.locate(Float::NAN), None);
    }
}
