use crate::vector::Vector;

/// Represents a point mass in the simulation.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body<V> {
    /// Position vector.
    pub pos: V,
    /// Velocity vector.
    pub vel: V,
    /// Acceleration accumulated during the current step (zero between steps).
    pub acc: V,
    /// Mass of the body.
    pub mass: f64,
}

impl<V: Vector> Default for Body<V> {
    fn default() -> Self {
        Self::new(V::zero(), V::zero(), 1.0)
    }
}

impl<V: Vector> Body<V> {
    /// Creates a new Body with the given properties.
    /// Initial acceleration is zero.
    pub fn new(pos: V, vel: V, mass: f64) -> Self {
        Self {
            pos,
            vel,
            acc: V::zero(),
            mass,
        }
    }

    /// Momentum `mass * vel`.
    pub fn momentum(&self) -> V {
        self.vel * self.mass
    }

    /// Advances the body by `dt` with semi-implicit (symplectic) Euler.
    ///
    /// Position moves with the velocity from the previous step, then velocity
    /// takes the accumulated acceleration. Acceleration is cleared so the next
    /// accumulation pass starts from zero.
    pub fn update(&mut self, dt: f64) {
        self.pos += self.vel * dt;
        self.vel += self.acc * dt;
        self.acc = V::zero();
    }
}
