use super::{upwind, wave_speeds, wave_strengths, Cell, NetUpdates, RiemannSolver};

/// Roe solver for a flat sea floor.
///
/// Decomposes the jump in quantities `(hR - hL, huR - huL)`; bathymetry is
/// ignored. Each net-update is the speed-scaled wave `s α (1, s)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Roe;

impl RiemannSolver for Roe {
    fn wet_net_updates(&self, left: Cell, right: Cell) -> NetUpdates {
        let (s1, s2) = wave_speeds(left, right);
        let (a1, a2) = wave_strengths((s1, s2), [right.h - left.h, right.hu - left.hu]);

        let sa1 = s1 * a1;
        let sa2 = s2 * a2;

        upwind([(s1, [sa1, sa1 * s1]), (s2, [sa2, sa2 * s2])])
    }

    fn name(&self) -> &'static str {
        "Roe"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_updates_eq(actual: [f32; 2], expected: [f32; 2]) {
        assert_relative_eq!(actual[0], expected[0], max_relative = 1e-4);
        assert_relative_eq!(actual[1], expected[1], max_relative = 1e-4);
    }

    #[test]
    fn net_updates_subsonic() {
        // h: 10 | 9, hu: -30 | 27
        let updates = Roe.net_updates(Cell::new(10.0, -30.0, 0.0), Cell::new(9.0, 27.0, 0.0));
        assert_updates_eq(updates.left, [33.559, -326.566_3]);
        assert_updates_eq(updates.right, [23.441, 224.403_14]);
    }

    #[test]
    fn net_updates_dam_break() {
        let updates = Roe.net_updates(Cell::new(10.0, 0.0, 0.0), Cell::new(8.0, 0.0, 0.0));
        assert_updates_eq(updates.left, [9.394_671_4, -88.25985]);
        assert_updates_eq(updates.right, [-9.394_671_4, -88.25985]);
    }

    #[test]
    fn steady_state_has_no_updates() {
        let updates = Roe.net_updates(Cell::new(10.0, 0.0, 0.0), Cell::new(10.0, 0.0, 0.0));
        assert_eq!(updates, NetUpdates::default());
    }

    #[test]
    fn bathymetry_is_ignored() {
        let flat = Roe.net_updates(Cell::new(10.0, 3.0, 0.0), Cell::new(8.0, -1.0, 0.0));
        let step = Roe.net_updates(Cell::new(10.0, 3.0, -12.0), Cell::new(8.0, -1.0, 4.0));
        assert_eq!(flat, step);
    }

    #[test]
    fn mirrored_problem_mirrors_updates() {
        let states = [
            (10.0, 8.0, 0.0, 0.0),
            (10.0, 9.0, -30.0, 27.0),
            (3.5, 1.25, 4.0, -2.0),
            (1.0, 1.0, 100.0, 10.0),
        ];

        for (h_l, h_r, hu_l, hu_r) in states {
            let direct = Roe.net_updates(Cell::new(h_l, hu_l, 0.0), Cell::new(h_r, hu_r, 0.0));
            let mirror = Roe.net_updates(Cell::new(h_r, -hu_r, 0.0), Cell::new(h_l, -hu_l, 0.0));

            assert_relative_eq!(direct.left[0], mirror.right[0], max_relative = 1e-5);
            assert_relative_eq!(direct.left[1], -mirror.right[1], max_relative = 1e-5);
            assert_relative_eq!(direct.right[0], mirror.left[0], max_relative = 1e-5);
            assert_relative_eq!(direct.right[1], -mirror.left[1], max_relative = 1e-5);
        }
    }
}
