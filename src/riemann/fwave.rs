use super::{upwind, wave_speeds, wave_strengths, Cell, NetUpdates, RiemannSolver};
use crate::{Float, GRAVITY};

/// F-Wave solver with bathymetry source term.
///
/// Decomposes the jump in fluxes minus the discretised source term
/// `ψ = (0, -g (bR - bL) (hL + hR) / 2)`. The resulting waves `α (1, s)`
/// already live in flux space and are upwinded unscaled.
///
/// The scheme is well balanced: for `hL + bL == hR + bR` and zero momentum
/// the hydrostatic part of the flux jump and the source term cancel exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct FWave;

impl FWave {
    // f(qR) - f(qL) - ψ, with the hydrostatic pressure difference and the
    // source term sharing the factor g (hL + hR) / 2
    fn decomposition_jump(left: Cell, right: Cell) -> [Float; 2] {
        let pressure = 0.5 * GRAVITY * (left.h + right.h);

        let advection = right.hu * right.velocity() - left.hu * left.velocity();
        let hydrostatic = pressure * (right.h - left.h) + pressure * (right.b - left.b);

        [right.hu - left.hu, advection + hydrostatic]
    }
}

impl RiemannSolver for FWave {
    fn wet_net_updates(&self, left: Cell, right: Cell) -> NetUpdates {
        let (s1, s2) = wave_speeds(left, right);
        let (a1, a2) = wave_strengths((s1, s2), Self::decomposition_jump(left, right));

        upwind([(s1, [a1, a1 * s1]), (s2, [a2, a2 * s2])])
    }

    fn name(&self) -> &'static str {
        "F-Wave"
    }
}
