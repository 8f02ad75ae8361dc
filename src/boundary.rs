use crate::{body::Body, vector::Vector};

/// Square (or cubic) domain `[-half_extent, half_extent]` on every axis with reflecting walls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boundary {
    pub half_extent: f64,
}

impl Boundary {
    pub fn new(half_extent: f64) -> Self {
        Self { half_extent }
    }

    /// Negates each velocity component whose coordinate is on or past a wall.
    ///
    /// The position is left where it is, so a body can sit outside the domain
    /// for a frame before its reversed velocity carries it back.
    pub fn reflect<V: Vector>(&self, body: &mut Body<V>) {
        for axis in 0..V::DIM {
            let coord = body.pos.axis(axis);
            if coord <= -self.half_extent || coord >= self.half_extent {
                let v = body.vel.axis_mut(axis);
                *v = -*v;
            }
        }
    }
}
