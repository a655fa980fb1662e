use std::fmt;

use faer_core::zipped;

use crate::{
    config::{ConfigError, SimConfig},
    patch::{Dimension, WavePropagation},
    setup::Setup,
    Float, GRAVITY,
};

/// A patch initialised from a [`Setup`], advanced with a constant time step.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(crate) name: String,
    pub(crate) config: SimConfig,
    pub(crate) patch: WavePropagation,
    pub(crate) dt: Float,
    pub(crate) step: usize,
    pub(crate) time: Float,
}

impl Simulation {
    pub fn new(setup: impl Setup, config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let (x, y) = (config.x(), config.y());
        let mut patch = match config.dimension() {
            Dimension::One => WavePropagation::one_d(x.cells(), config.patch())?,
            Dimension::Two => WavePropagation::two_d(x.cells(), y.cells(), config.patch())?,
        };

        // a 1d patch is sampled on the line y = 0
        let ys: Vec<Float> = match patch.dimension() {
            Dimension::One => vec![0.0],
            Dimension::Two => y.centers().collect(),
        };

        for (ix, cx) in x.centers().enumerate() {
            for (iy, &cy) in ys.iter().enumerate() {
                patch.set_height(ix, iy, setup.height(cx, cy));
                patch.set_momentum_x(ix, iy, setup.momentum_x(cx, cy));
                patch.set_momentum_y(ix, iy, setup.momentum_y(cx, cy));
                patch.set_bathymetry(ix, iy, setup.bathymetry(cx, cy));
            }
        }

        let speed = max_wave_speed(&patch).ok_or(ConfigError::NoWetCell)?;
        let spacing = match patch.dimension() {
            Dimension::One => x.delta(),
            Dimension::Two => x.delta().min(y.delta()),
        };
        let dt = config.cfl() * spacing / speed;

        tracing::debug!(
            setup = setup.name(),
            max_speed = speed,
            dt,
            "initialised simulation"
        );

        Ok(Self {
            name: setup.name().to_string(),
            config,
            patch,
            dt,
            step: 0,
            time: 0.0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn patch(&self) -> &WavePropagation {
        &self.patch
    }

    pub fn dt(&self) -> Float {
        self.dt
    }

    /// `(dt / dx, dt / dy)`.
    pub fn scalings(&self) -> (Float, Float) {
        (self.dt / self.config.x().delta(), self.dt / self.config.y().delta())
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn time(&self) -> Float {
        self.time
    }

    pub fn is_finished(&self) -> bool {
        self.time >= self.config.end_time()
    }

    /// Number of steps needed to reach the end time.
    pub fn total_steps(&self) -> usize {
        (self.config.end_time() / self.dt).ceil() as usize
    }

    /// One tick: ghost cells, then the update of the interior.
    pub fn advance(&mut self) {
        let (sx, sy) = self.scalings();
        self.patch.set_ghost_cells();
        self.patch.time_step_xy(sx, sy);

        self.step += 1;
        self.time += self.dt;
    }
}

/// Largest `|u| + sqrt(g h)` over wet cells, `None` if every cell is dry.
pub fn max_wave_speed(patch: &WavePropagation) -> Option<Float> {
    let (h, hu, hv) = (patch.height(), patch.momentum_x(), patch.momentum_y());

    let mut max: Option<Float> = None;
    zipped!(h, hu, hv).for_each(|h, hu, hv| {
        let depth = h.read();
        if depth > 0.0 {
            let flow = hu.read().abs().max(hv.read().abs()) / depth;
            let speed = flow + (GRAVITY * depth).sqrt();
            max = Some(max.map_or(speed, |m| m.max(speed)));
        }
    });
    max
}

impl fmt::Display for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = (self.config.x(), self.config.y());
        write!(
            f,
            "simulation of `{}` setup:\n\t- `{}` solver\n\t- Δx = {:e} ({} cells)",
            self.name,
            self.config.patch().solver,
            x.delta(),
            x.cells(),
        )?;
        if let Dimension::Two = self.patch.dimension() {
            write!(f, "\n\t- Δy = {:e} ({} cells)", y.delta(), y.cells())?;
        }
        write!(
            f,
            "\n\t- Δt = {:e} ({} steps)",
            self.dt,
            self.total_steps()
        )
    }
}
