//! Approximate Riemann solvers for the one-dimensional shallow water equations.
//!
//! A solver receives the two cells adjacent to an interface, projected on the
//! sweep axis (`hu` is the momentum normal to the interface), and returns the
//! net-updates the interface contributes to each of them. The update scheme
//! subtracts `scaling * update` from the respective cell.
//!
//! Both variants share the same skeleton: Roe-averaged wave speeds, wave
//! strengths obtained by inverting the matrix of right eigenvectors
//! `[[1, 1], [s1, s2]]`, and upwinding of the resulting waves. They differ in
//! the decomposed jump (quantities for [`Roe`], fluxes plus the bathymetry
//! source term for [`FWave`]).

use std::{fmt, str::FromStr};

use crate::{config::ConfigError, Float, GRAVITY};

mod fwave;
mod roe;

pub use fwave::FWave;
pub use roe::Roe;

/// State of one cell as seen by an interface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cell {
    /// Water height, `<= 0` marks a dry cell.
    pub h: Float,
    /// Momentum normal to the interface.
    pub hu: Float,
    /// Bathymetry.
    pub b: Float,
}

impl Cell {
    pub fn new(h: Float, hu: Float, b: Float) -> Self {
        Self { h, hu, b }
    }

    #[inline]
    pub fn is_dry(&self) -> bool {
        self.h <= 0.0
    }

    #[inline]
    pub fn velocity(&self) -> Float {
        self.hu / self.h
    }

    // wall state mirroring `self`
    #[inline]
    fn reflected(self) -> Self {
        Self {
            h: self.h,
            hu: -self.hu,
            b: self.b,
        }
    }
}

/// Net-updates `(Δh, Δhu)` for the left and right cell of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NetUpdates {
    pub left: [Float; 2],
    pub right: [Float; 2],
}

pub trait RiemannSolver {
    /// Net-updates between two wet cells.
    ///
    /// Callers go through [`RiemannSolver::net_updates`], which guarantees
    /// `left.h > 0` and `right.h > 0` here.
    fn wet_net_updates(&self, left: Cell, right: Cell) -> NetUpdates;

    fn name(&self) -> &'static str;

    /// Net-updates across the interface `left | right`.
    ///
    /// Dry cells are normalised before any shared math runs: a dry/dry
    /// interface produces no update, a wet/dry interface is solved against a
    /// reflecting wall built from the wet cell, and the synthetic wall side
    /// never receives an update.
    #[inline]
    fn net_updates(&self, left: Cell, right: Cell) -> NetUpdates {
        match (left.is_dry(), right.is_dry()) {
            (true, true) => NetUpdates::default(),
            (true, false) => NetUpdates {
                left: [0.0; 2],
                ..self.wet_net_updates(right.reflected(), right)
            },
            (false, true) => NetUpdates {
                right: [0.0; 2],
                ..self.wet_net_updates(left, left.reflected())
            },
            (false, false) => self.wet_net_updates(left, right),
        }
    }
}

/// Solver selection, fixed for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverKind {
    Roe,
    #[default]
    FWave,
}

impl SolverKind {
    /// One-off dispatch. Hot loops should match once and stay monomorphic.
    pub fn net_updates(self, left: Cell, right: Cell) -> NetUpdates {
        match self {
            SolverKind::Roe => Roe.net_updates(left, right),
            SolverKind::FWave => FWave.net_updates(left, right),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SolverKind::Roe => Roe.name(),
            SolverKind::FWave => FWave.name(),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolverKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "roe" => Ok(SolverKind::Roe),
            "fwave" | "f-wave" | "f_wave" => Ok(SolverKind::FWave),
            _ => Err(ConfigError::UnknownSolver(s.to_string())),
        }
    }
}

/// Roe-averaged characteristic speeds `(s1, s2)`, `s1 < s2`.
///
/// Both cells must be wet.
pub(crate) fn wave_speeds(left: Cell, right: Cell) -> (Float, Float) {
    debug_assert!(left.h > 0.0 && right.h > 0.0);

    let sqrt_l = left.h.sqrt();
    let sqrt_r = right.h.sqrt();

    let h_roe = 0.5 * (left.h + right.h);
    let u_roe = (left.velocity() * sqrt_l + right.velocity() * sqrt_r) / (sqrt_l + sqrt_r);

    let c_roe = (GRAVITY * h_roe).sqrt();
    (u_roe - c_roe, u_roe + c_roe)
}

/// Coefficients of `jump` in the eigenvector basis `[[1, 1], [s1, s2]]`.
pub(crate) fn wave_strengths((s1, s2): (Float, Float), jump: [Float; 2]) -> (Float, Float) {
    let inv_det = 1.0 / (s2 - s1);

    let a1 = inv_det * (s2 * jump[0] - jump[1]);
    let a2 = inv_det * (jump[1] - s1 * jump[0]);
    (a1, a2)
}

/// Routes each `(speed, wave)` pair to the side it travels to.
///
/// Negative speeds go left, everything else (zero included) goes right.
pub(crate) fn upwind(waves: [(Float, [Float; 2]); 2]) -> NetUpdates {
    let mut updates = NetUpdates::default();

    for (speed, wave) in waves {
        let side = if speed < 0.0 {
            &mut updates.left
        } else {
            &mut updates.right
        };
        side[0] += wave[0];
        side[1] += wave[1];
    }

    updates
}
