use crate::{
    body::Body,
    boundary::Boundary,
    config::{ConfigError, Dimension, SimulationConfig},
    forces,
    utils::{self, PolarSample},
    vector::Vector,
};

use ultraviolet::{DVec2, DVec3};

/// Manages the direct-summation N-body simulation state and logic.
///
/// The simulation owns its bodies exclusively. Callers observe them through
/// [`Simulation::bodies`] and [`Simulation::positions`]; nothing outside
/// [`Simulation::step`] mutates them.
#[derive(Clone, Debug)]
pub struct Simulation<V> {
    config: SimulationConfig,
    /// Number of completed steps.
    frame: usize,
    bodies: Vec<Body<V>>,
    /// Reflecting walls, bounded systems only.
    boundary: Option<Boundary>,
}

impl<V: PolarSample> Simulation<V> {
    /// Samples a fresh system from `config`.
    ///
    /// Bounded systems are recentered and rescaled to the unit radius before
    /// the first step; unbounded systems keep their sampled state.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        Self::check(&config)?;

        let bodies = Self::initial_bodies(&config);
        let sim = Self::assemble(bodies, config);
        tracing::info!(
            bodies = sim.bodies.len(),
            dimension = V::DIM,
            bounded = sim.boundary.is_some(),
            dt = sim.config.dt,
            "initialized simulation"
        );
        Ok(sim)
    }

    /// Replaces the system with `n` freshly sampled bodies from the stored configuration.
    /// `n = 0` is ignored and the current system is kept.
    pub fn reset(&mut self, n: usize) {
        if n == 0 {
            tracing::warn!("ignoring reset to an empty system");
            return;
        }
        self.config.body_count = n;
        self.bodies = Self::initial_bodies(&self.config);
        self.frame = 0;
        tracing::info!(bodies = n, "reset simulation");
    }

    fn initial_bodies(config: &SimulationConfig) -> Vec<Body<V>> {
        let mut bodies = utils::sample_bodies(config);
        if config.bounded {
            utils::normalize(&mut bodies);
        }
        bodies
    }
}

impl<V: Vector> Simulation<V> {
    /// Wraps an existing set of bodies. No sampling or normalization is done;
    /// `dt` and the boundary come from `config`, `body_count` from `bodies`.
    ///
    /// `config` is validated like in `new`, and its dimension must match `V`.
    pub fn with_bodies(
        bodies: Vec<Body<V>>,
        mut config: SimulationConfig,
    ) -> Result<Self, ConfigError> {
        config.body_count = bodies.len();
        Self::check(&config)?;
        Ok(Self::assemble(bodies, config))
    }

    fn check(config: &SimulationConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if config.dimension.get() != V::DIM {
            return Err(ConfigError::DimensionMismatch {
                expected: V::DIM,
                found: config.dimension.get(),
            });
        }
        Ok(())
    }

    fn assemble(bodies: Vec<Body<V>>, config: SimulationConfig) -> Self {
        let boundary = config.bounded.then(|| Boundary::new(config.half_extent));
        Self {
            config,
            frame: 0,
            bodies,
            boundary,
        }
    }

    /// Advances the simulation by one step of `dt`:
    /// accumulate pairwise forces, integrate every body, then apply the walls.
    pub fn step(&mut self) {
        self.attract();
        self.iterate();
        self.reflect();
        self.frame += 1;
        tracing::trace!(frame = self.frame, "step");
    }

    /// Fills every body's acceleration from all pairwise interactions.
    pub fn attract(&mut self) {
        forces::accumulate(&mut self.bodies);
    }

    /// Updates position and velocity of all bodies from their accumulated acceleration.
    pub fn iterate(&mut self) {
        let dt = self.config.dt;
        self.bodies.iter_mut().for_each(|body| body.update(dt));
    }

    /// Reflects velocities of bodies on or past a wall. No-op when unbounded.
    pub fn reflect(&mut self) {
        if let Some(boundary) = self.boundary {
            self.bodies.iter_mut().for_each(|body| boundary.reflect(body));
        }
    }

    pub fn dt(&self) -> f64 {
        self.config.dt
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn boundary(&self) -> Option<Boundary> {
        self.boundary
    }

    pub fn bodies(&self) -> &[Body<V>] {
        &self.bodies
    }

    /// Positions in body order. The index of each entry is stable for the
    /// lifetime of the simulation.
    pub fn positions(&self) -> impl ExactSizeIterator<Item = V> + '_ {
        self.bodies.iter().map(|body| body.pos)
    }

    /// Sum of `mass * vel`.
    pub fn total_momentum(&self) -> V {
        self.bodies
            .iter()
            .fold(V::zero(), |acc, body| acc + body.momentum())
    }

    /// Mass-weighted mean position. Zero for an empty system.
    pub fn center_of_mass(&self) -> V {
        utils::mass_weighted_means(&self.bodies).1
    }

    /// Sum of `mass * |vel|² / 2`.
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies
            .iter()
            .map(|body| 0.5 * body.mass * body.vel.length_squared())
            .sum()
    }
}

/// A simulation whose dimension is only known at runtime, e.g. from a config file.
#[derive(Clone, Debug)]
pub enum SimulationState {
    Planar(Simulation<DVec2>),
    Spatial(Simulation<DVec3>),
}

/// Builds the simulation described by `config`, 2D or 3D.
pub fn initialize(config: SimulationConfig) -> Result<SimulationState, ConfigError> {
    Ok(match config.dimension {
        Dimension::Two => SimulationState::Planar(Simulation::new(config)?),
        Dimension::Three => SimulationState::Spatial(Simulation::new(config)?),
    })
}

impl SimulationState {
    pub fn step(&mut self) {
        match self {
            SimulationState::Planar(sim) => sim.step(),
            SimulationState::Spatial(sim) => sim.step(),
        }
    }

    pub fn reset(&mut self, n: usize) {
        match self {
            SimulationState::Planar(sim) => sim.reset(n),
            SimulationState::Spatial(sim) => sim.reset(n),
        }
    }

    pub fn dimension(&self) -> usize {
        match self {
            SimulationState::Planar(_) => 2,
            SimulationState::Spatial(_) => 3,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SimulationState::Planar(sim) => sim.bodies().len(),
            SimulationState::Spatial(sim) => sim.bodies().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn frame(&self) -> usize {
        match self {
            SimulationState::Planar(sim) => sim.frame(),
            SimulationState::Spatial(sim) => sim.frame(),
        }
    }

    pub fn kinetic_energy(&self) -> f64 {
        match self {
            SimulationState::Planar(sim) => sim.kinetic_energy(),
            SimulationState::Spatial(sim) => sim.kinetic_energy(),
        }
    }

    /// Magnitude of the total momentum.
    pub fn momentum_magnitude(&self) -> f64 {
        match self {
            SimulationState::Planar(sim) => sim.total_momentum().length(),
            SimulationState::Spatial(sim) => sim.total_momentum().length(),
        }
    }

    /// Positions flattened as `[x0, y0, (z0,) x1, y1, ...]`, `dimension()` values per body.
    pub fn positions_flat(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.len() * self.dimension());
        match self {
            SimulationState::Planar(sim) => sim.positions().for_each(|p| p.extend_into(&mut out)),
            SimulationState::Spatial(sim) => sim.positions().for_each(|p| p.extend_into(&mut out)),
        }
        out
    }
}
