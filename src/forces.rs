use crate::{body::Body, vector::Vector};

/// Lower bound on the separation used as the linear factor of the force term.
/// Keeps near-contact pairs from blowing up.
pub const MIN_DISTANCE: f64 = 1.0;

/// Lower bound on the squared separation, so coincident bodies never divide by zero.
pub const MIN_EPS: f64 = 1e-4;

/// Force term between two bodies separated by `r` (pointing from the first to the second).
///
/// Equals `r / (max(|r|², MIN_EPS) * max(|r|, MIN_DISTANCE))`, i.e. `r̂ / r²` with G = 1
/// for separations of at least `MIN_DISTANCE`.
#[inline]
pub fn force_dir<V: Vector>(r: V) -> V {
    let mag_sq = r.length_squared();
    let mag = mag_sq.sqrt().max(MIN_DISTANCE);
    let denom = mag_sq.max(MIN_EPS) * mag;
    r / denom
}

/// Adds the gravitational acceleration of every unordered pair into both bodies.
///
/// Pairs are visited in ascending index order (`i < j`), so the summation order
/// is fixed and repeated runs are bit-identical. Body `i` gains `+mass_j * f`,
/// body `j` gains `-mass_i * f`.
///
/// Accelerations are expected to be zero on entry; see [`Body::update`].
pub fn accumulate<V: Vector>(bodies: &mut [Body<V>]) {
    let n = bodies.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let f = force_dir(bodies[j].pos - bodies[i].pos);
            let (mass_i, mass_j) = (bodies[i].mass, bodies[j].mass);

            bodies[i].acc += f * mass_j;
            bodies[j].acc -= f * mass_i;
        }
    }
}
