use crate::{body::Body, config::SimulationConfig, vector::Vector};
use std::f64::consts::{PI, TAU};
use ultraviolet::{DVec2, DVec3};

/// Random point drawn with a polar (2D) or spherical (3D) sampling law.
///
/// The radius is uniform in `[0, 1)`, not area/volume-uniform, so points
/// cluster toward the center.
pub trait PolarSample: Vector {
    fn sample_polar(rng: &mut fastrand::Rng) -> Self;
}

impl PolarSample for DVec2 {
    fn sample_polar(rng: &mut fastrand::Rng) -> Self {
        let a = rng.f64() * TAU;
        let r = rng.f64();
        let (sin, cos) = a.sin_cos();
        DVec2::new(cos, sin) * r
    }
}

impl PolarSample for DVec3 {
    fn sample_polar(rng: &mut fastrand::Rng) -> Self {
        let theta = rng.f64() * TAU;
        let phi = rng.f64() * PI;
        let r = rng.f64();
        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_p, cos_p) = phi.sin_cos();
        DVec3::new(sin_p * cos_t, sin_p * sin_t, cos_p) * r
    }
}

/// Generates `config.body_count` bodies of `config.mass` inside the unit disc (or ball).
/// Each body draws its position, then its velocity scaled by `config.velocity_scale`.
pub fn sample_bodies<V: PolarSample>(config: &SimulationConfig) -> Vec<Body<V>> {
    let mut rng = fastrand::Rng::with_seed(config.seed);

    (0..config.body_count)
        .map(|_| {
            let pos = V::sample_polar(&mut rng);
            let vel = V::sample_polar(&mut rng) * config.velocity_scale;
            Body::new(pos, vel, config.mass)
        })
        .collect()
}

/// Mass-weighted mean velocity `Σ mᵢvᵢ / Σ mᵢ` and mean position `Σ mᵢpᵢ / Σ mᵢ`.
/// Returns zero vectors for an empty (or massless) system.
pub fn mass_weighted_means<V: Vector>(bodies: &[Body<V>]) -> (V, V) {
    let mut momentum = V::zero();
    let mut moment = V::zero();
    let mut total_mass = 0.0;

    for body in bodies {
        momentum += body.vel * body.mass;
        moment += body.pos * body.mass;
        total_mass += body.mass;
    }

    if total_mass > 0.0 {
        (momentum / total_mass, moment / total_mass)
    } else {
        (V::zero(), V::zero())
    }
}

/// Removes bulk drift and moves the center of mass to the origin.
pub fn recenter<V: Vector>(bodies: &mut [Body<V>]) {
    let (mean_vel, mean_pos) = mass_weighted_means(bodies);

    for body in bodies.iter_mut() {
        body.vel -= mean_vel;
        body.pos -= mean_pos;
    }
}

/// Divides every position by the largest distance from the origin.
/// Returns that distance; positions are untouched when it is zero.
pub fn rescale_to_unit<V: Vector>(bodies: &mut [Body<V>]) -> f64 {
    let max_radius = bodies
        .iter()
        .map(|body| body.pos.length())
        .fold(0.0, f64::max);

    if max_radius > 0.0 {
        for body in bodies.iter_mut() {
            body.pos /= max_radius;
        }
    }

    max_radius
}

/// Recenters, then rescales so the farthest body sits on the unit circle (or sphere).
pub fn normalize<V: Vector>(bodies: &mut [Body<V>]) {
    recenter(bodies);
    let max_radius = rescale_to_unit(bodies);
    tracing::debug!(bodies = bodies.len(), max_radius, "normalized initial state");
}
