use crate::{
    config::{Dimension, SimulationConfig},
    simulation::{self, SimulationState},
};

fn create(config: SimulationConfig) -> *mut SimulationState {
    match simulation::initialize(config) {
        Ok(state) => Box::into_raw(Box::new(state)),
        Err(err) => {
            tracing::warn!(%err, "refusing to create simulation");
            std::ptr::null_mut()
        }
    }
}

/// Creates the reference bounded 2D simulation.
#[unsafe(no_mangle)]
pub extern "C" fn Simulation_CreateDefault() -> *mut SimulationState {
    create(SimulationConfig::default())
}

/// Creates a simulation from explicit parameters. Returns null if they are invalid.
#[unsafe(no_mangle)]
pub extern "C" fn Simulation_Create(
    dimension: u8,
    bounded: bool,
    n: usize,
    dt: f64,
    mass: f64,
    half_extent: f64,
    seed: u64,
) -> *mut SimulationState {
    let dimension = match Dimension::try_from(dimension) {
        Ok(dimension) => dimension,
        Err(err) => {
            tracing::warn!(%err, "refusing to create simulation");
            return std::ptr::null_mut();
        }
    };

    create(SimulationConfig {
        dimension,
        dt,
        body_count: n,
        mass,
        bounded,
        half_extent,
        seed,
        ..SimulationConfig::default()
    })
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Destroy(handle: *mut SimulationState) {
    if !handle.is_null() {
        unsafe { drop(Box::from_raw(handle)) };
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Step(handle: *mut SimulationState) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.step();
    }
}

/// Re-samples `n` bodies. `n = 0` leaves the simulation unchanged.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_Reset(handle: *mut SimulationState, n: usize) {
    if let Some(sim) = unsafe { handle.as_mut() } {
        sim.reset(n);
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetBodyCount(handle: *const SimulationState) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.len())
}

/// Number of coordinates per body (2 or 3), 0 for a null handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetDimension(handle: *const SimulationState) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.dimension())
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_GetFrame(handle: *const SimulationState) -> usize {
    unsafe { handle.as_ref() }.map_or(0, |sim| sim.frame())
}

/// Copies up to `len` coordinates (`[x, y(, z)]` per body, in body order) into `out`.
/// Returns the number of values written.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn Simulation_CopyPositions(
    handle: *const SimulationState,
    out: *mut f64,
    len: usize,
) -> usize {
    let Some(sim) = (unsafe { handle.as_ref() }) else {
        return 0;
    };
    if out.is_null() {
        return 0;
    }

    let positions = sim.positions_flat();
    let count = positions.len().min(len);
    // SAFETY: the caller guarantees `out` points to at least `len` writable f64s.
    let out = unsafe { std::slice::from_raw_parts_mut(out, count) };
    out.copy_from_slice(&positions[..count]);
    count
}
