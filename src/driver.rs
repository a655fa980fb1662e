use faer_core::MatRef;
use thiserror::Error;

use crate::{
    config::{ConfigError, SimConfig},
    patch::WavePropagation,
    sim::Simulation,
    Float,
};

#[derive(Error, Debug)]
pub enum SimError {
    #[error("output error")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration")]
    Config(#[from] ConfigError),
    #[error("line {line}: `{value}` is not a number")]
    Parse { line: usize, value: String },
}

/// What an observer sees of a running simulation.
#[derive(Clone, Copy)]
pub struct ObsCtx<'ctx> {
    // Meta
    name: &'ctx str,
    config: &'ctx SimConfig,
    dt: Float,
    total_steps: usize,
    time_sampling: usize,

    // Iteration info
    step: usize,
    time: Float,
    patch: &'ctx WavePropagation,
}

impl<'ctx> ObsCtx<'ctx> {
    fn new(sim: &'ctx Simulation, time_sampling: usize) -> Self {
        Self {
            name: &sim.name,
            config: &sim.config,
            dt: sim.dt,
            total_steps: sim.total_steps(),
            time_sampling,
            step: sim.step,
            time: sim.time,
            patch: &sim.patch,
        }
    }

    pub fn name(&self) -> &'ctx str {
        self.name
    }

    pub fn config(&self) -> &'ctx SimConfig {
        self.config
    }

    pub fn dt(&self) -> Float {
        self.dt
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn sampling_period(&self) -> usize {
        self.time_sampling
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn time(&self) -> Float {
        self.time
    }

    pub fn patch(&self) -> &'ctx WavePropagation {
        self.patch
    }

    /// Current heights *without* ghost cells.
    pub fn height(&self) -> MatRef<'ctx, Float> {
        self.patch.height()
    }

    pub fn momentum_x(&self) -> MatRef<'ctx, Float> {
        self.patch.momentum_x()
    }

    pub fn momentum_y(&self) -> MatRef<'ctx, Float> {
        self.patch.momentum_y()
    }

    pub fn bathymetry(&self) -> MatRef<'ctx, Float> {
        self.patch.bathymetry()
    }
}

#[allow(unused_variables)]
pub trait Observer {
    fn at_startup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        Ok(())
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        Ok(())
    }

    fn at_cleanup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        Ok(())
    }
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn at_startup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        (**self).at_startup(ctx)
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        (**self).at_each_iteration(ctx)
    }

    fn at_cleanup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        (**self).at_cleanup(ctx)
    }
}

pub struct Driver<'d> {
    pub(crate) sim: Simulation,
    pub(crate) observers: Vec<Box<dyn Observer + 'd>>,
    pub(crate) time_sampling: usize,
}

impl<'d> Driver<'d> {
    pub fn new(sim: Simulation) -> Self {
        let time_sampling = sim.config.sampling();
        Self {
            sim,
            observers: Vec::new(),
            time_sampling,
        }
    }

    /// Observers are notified every `sampling_period` steps; zero is
    /// rejected by [`Driver::run`].
    pub fn with_time_sampling(mut self, sampling_period: usize) -> Self {
        self.time_sampling = sampling_period;
        self
    }

    pub fn with_observer(mut self, observer: impl Observer + 'd) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn into_simulation(self) -> Simulation {
        self.sim
    }

    /// Runs the simulation up to its end time.
    ///
    /// Each step fills the ghost cells and updates the interior; observers
    /// see the initial state, every sampled step and the final state.
    pub fn run(&mut self) -> Result<(), SimError> {
        if self.time_sampling == 0 {
            return Err(ConfigError::ZeroSampling.into());
        }
        let sampling = self.time_sampling;

        for o in self.observers.iter_mut() {
            o.at_startup(ObsCtx::new(&self.sim, sampling))?;
        }

        while !self.sim.is_finished() {
            self.sim.advance();

            if self.sim.step % sampling == 0 {
                for o in self.observers.iter_mut() {
                    o.at_each_iteration(ObsCtx::new(&self.sim, sampling))?;
                }
            }
        }

        for o in self.observers.iter_mut() {
            o.at_cleanup(ObsCtx::new(&self.sim, sampling))?;
        }

        Ok(())
    }
}

pub struct Logger;

impl Observer for Logger {
    fn at_startup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        let (nx, ny) = ctx.patch().cells();
        tracing::event!(
            tracing::Level::INFO,
            "start of simulation of setup `{}` (`{}` solver, {}x{} cells, Δx={:e}, Δt={:e} ({} steps))",
            ctx.name(),
            ctx.config().patch().solver,
            nx,
            ny,
            ctx.config().x().delta(),
            ctx.dt(),
            ctx.total_steps(),
        );
        Ok(())
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        tracing::event!(
            tracing::Level::TRACE,
            "setup `{}`: step {} (t = {:e})",
            ctx.name(),
            ctx.step(),
            ctx.time()
        );
        if !ctx.patch().is_finite() {
            tracing::event!(
                tracing::Level::WARN,
                "setup `{}`: non-finite values at step {}",
                ctx.name(),
                ctx.step()
            );
        }
        Ok(())
    }

    fn at_cleanup(&mut self, ctx: ObsCtx) -> Result<(), SimError> {
        if !ctx.patch().is_finite() {
            tracing::event!(
                tracing::Level::WARN,
                "setup `{}`: final state is not finite",
                ctx.name()
            );
        }
        tracing::event!(
            tracing::Level::INFO,
            "finished simulation of setup `{}` after {} steps",
            ctx.name(),
            ctx.step()
        );
        Ok(())
    }
}
