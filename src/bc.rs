use std::{fmt, str::FromStr};

use faer_core::Mat;

use crate::{
    config::ConfigError,
    state::{Axis, Quantities},
    Float,
};

/// Condition imposed on one wall through its ghost cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boundary {
    /// Zero gradient: the ghost cell copies its interior neighbour.
    #[default]
    Outflow,
    /// Wall: like outflow, with the momentum normal to the wall negated.
    Reflecting,
}

impl Boundary {
    #[inline]
    fn normal_sign(self) -> Float {
        match self {
            Boundary::Outflow => 1.0,
            Boundary::Reflecting => -1.0,
        }
    }

    /// Writes ghost cell `ghost` from the interior cell `inner` of a wall
    /// crossed by sweeps along `axis`.
    pub(crate) fn fill(
        self,
        q: &mut Quantities,
        b: &mut Mat<Float>,
        axis: Axis,
        ghost: (usize, usize),
        inner: (usize, usize),
    ) {
        let (h, normal, tangential) = q.split_mut(axis);

        h.write(ghost.0, ghost.1, h.read(inner.0, inner.1));
        normal.write(
            ghost.0,
            ghost.1,
            self.normal_sign() * normal.read(inner.0, inner.1),
        );
        tangential.write(ghost.0, ghost.1, tangential.read(inner.0, inner.1));
        b.write(ghost.0, ghost.1, b.read(inner.0, inner.1));
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Outflow => f.write_str("outflow"),
            Boundary::Reflecting => f.write_str("reflecting"),
        }
    }
}

impl FromStr for Boundary {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "outflow" | "open" => Ok(Boundary::Outflow),
            "reflecting" | "closed" | "wall" => Ok(Boundary::Reflecting),
            _ => Err(ConfigError::UnknownBoundary(s.to_string())),
        }
    }
}

/// The four walls of a patch. A one-dimensional patch only uses `left` and
/// `right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Boundaries {
    pub left: Boundary,
    pub right: Boundary,
    pub bottom: Boundary,
    pub top: Boundary,
}

impl Boundaries {
    pub fn new(left: Boundary, right: Boundary, bottom: Boundary, top: Boundary) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    pub fn uniform(boundary: Boundary) -> Self {
        Self::new(boundary, boundary, boundary, boundary)
    }

    pub fn x(left: Boundary, right: Boundary) -> Self {
        Self {
            left,
            right,
            ..Self::default()
        }
    }
}

impl FromStr for Boundaries {
    type Err = ConfigError;

    /// `"left,right"` or `"left,right,bottom,top"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let walls = s
            .split(',')
            .map(str::parse)
            .collect::<Result<Vec<Boundary>, _>>()?;

        match *walls.as_slice() {
            [left, right] => Ok(Self::x(left, right)),
            [left, right, bottom, top] => Ok(Self::new(left, right, bottom, top)),
            _ => Err(ConfigError::UnknownBoundary(s.to_string())),
        }
    }
}

impl fmt::Display for Boundaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.left, self.right, self.bottom, self.top
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_boundaries() {
        assert_eq!("open".parse::<Boundary>(), Ok(Boundary::Outflow));
        assert_eq!(" Closed ".parse::<Boundary>(), Ok(Boundary::Reflecting));
        assert_eq!(
            "outflow,reflecting".parse::<Boundaries>(),
            Ok(Boundaries::x(Boundary::Outflow, Boundary::Reflecting))
        );
        assert_eq!(
            "reflecting,outflow,outflow,reflecting".parse::<Boundaries>(),
            Ok(Boundaries::new(
                Boundary::Reflecting,
                Boundary::Outflow,
                Boundary::Outflow,
                Boundary::Reflecting
            ))
        );
        assert!(matches!(
            "periodic".parse::<Boundary>(),
            Err(ConfigError::UnknownBoundary(_))
        ));
        assert!(matches!(
            "outflow,outflow,outflow".parse::<Boundaries>(),
            Err(ConfigError::UnknownBoundary(_))
        ));
    }

    #[test]
    fn display_roundtrips() {
        let walls = Boundaries::new(
            Boundary::Outflow,
            Boundary::Reflecting,
            Boundary::Reflecting,
            Boundary::Outflow,
        );
        assert_eq!(walls.to_string().parse::<Boundaries>(), Ok(walls));
    }

    #[test]
    fn reflecting_negates_normal_momentum_only() {
        let mut q = Quantities::zeros(3, 3);
        let mut b = Mat::<Float>::zeros(3, 3);
        q.h.write(1, 1, 4.0);
        q.hu.write(1, 1, 2.0);
        q.hv.write(1, 1, -3.0);
        b.write(1, 1, -7.0);

        Boundary::Reflecting.fill(&mut q, &mut b, Axis::X, (0, 1), (1, 1));
        assert_eq!(q.h.read(0, 1), 4.0);
        assert_eq!(q.hu.read(0, 1), -2.0);
        assert_eq!(q.hv.read(0, 1), -3.0);
        assert_eq!(b.read(0, 1), -7.0);

        Boundary::Reflecting.fill(&mut q, &mut b, Axis::Y, (1, 2), (1, 1));
        assert_eq!(q.hu.read(1, 2), 2.0);
        assert_eq!(q.hv.read(1, 2), 3.0);

        Boundary::Outflow.fill(&mut q, &mut b, Axis::Y, (1, 0), (1, 1));
        assert_eq!(q.hu.read(1, 0), 2.0);
        assert_eq!(q.hv.read(1, 0), -3.0);
        assert_eq!(b.read(1, 0), -7.0);
    }
}
