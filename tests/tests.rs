use gravsim::{
    forces, initialize, utils, Body, DVec2, DVec3, Dimension, Simulation, SimulationConfig,
    SimulationState, Vector,
};

/// Config for hand-built bodies: only the dimension, `dt` and the walls matter.
fn free(dimension: Dimension, dt: f64) -> SimulationConfig {
    SimulationConfig {
        dimension,
        dt,
        bounded: false,
        ..SimulationConfig::bounded_2d()
    }
}

fn walled(dt: f64) -> SimulationConfig {
    SimulationConfig {
        dt,
        ..SimulationConfig::bounded_2d()
    }
}

// ==================================================================================
// Force accumulation
// ==================================================================================

#[test]
fn pairwise_contributions_obey_third_law() {
    let mut bodies = vec![
        Body::new(DVec3::new(0.0, 0.0, 0.0), DVec3::zero(), 1.0),
        Body::new(DVec3::new(2.0, 0.5, -1.0), DVec3::zero(), 3.0),
        Body::new(DVec3::new(-0.4, 0.2, 0.3), DVec3::zero(), 0.5),
        Body::new(DVec3::new(5.0, -4.0, 2.0), DVec3::zero(), 7.0),
    ];
    forces::accumulate(&mut bodies);

    let net = bodies
        .iter()
        .fold(DVec3::zero(), |acc, b| acc + b.acc * b.mass);
    assert!(net.mag() < 1e-12, "net force not zero: {net:?}");
}

#[test]
fn accumulation_is_order_fixed_and_repeatable() {
    let config = SimulationConfig {
        body_count: 64,
        seed: 5,
        ..SimulationConfig::unbounded_3d()
    };
    let mut a: Vec<Body<DVec3>> = utils::sample_bodies(&config);
    let mut b = a.clone();

    forces::accumulate(&mut a);
    forces::accumulate(&mut b);

    assert_eq!(a, b);
}

// ==================================================================================
// Integration
// ==================================================================================

#[test]
fn lone_body_moves_in_a_straight_line() {
    let p0 = DVec3::new(0.5, -1.0, 2.0);
    let v0 = DVec3::new(0.3, 0.1, -0.2);
    let dt = 0.01;
    let bodies = vec![Body::new(p0, v0, 4.0)];
    let mut sim = Simulation::with_bodies(bodies, free(Dimension::Three, dt)).unwrap();

    for _ in 0..1000 {
        sim.step();
        let body = sim.bodies()[0];
        assert_eq!(body.acc, DVec3::zero());
        assert_eq!(body.vel, v0);
    }

    let expected = p0 + v0 * (1000.0 * dt);
    assert!((sim.bodies()[0].pos - expected).mag() < 1e-10);
}

#[test]
fn hand_built_bodies_must_match_config_dimension() {
    let lone = vec![Body::new(DVec3::new(0.0, 1.0, 0.0), DVec3::zero(), 1.0)];
    assert!(Simulation::with_bodies(lone.clone(), free(Dimension::Two, 0.01)).is_err());
    assert!(Simulation::with_bodies(lone.clone(), free(Dimension::Three, -0.01)).is_err());

    let sim = Simulation::with_bodies(lone, free(Dimension::Three, 0.01)).unwrap();
    assert_eq!(sim.config().dimension, Dimension::Three);
}

#[test]
fn reference_two_body_step() {
    let bodies = vec![
        Body::new(DVec2::new(-1.0, 0.0), DVec2::zero(), 1.0),
        Body::new(DVec2::new(1.0, 0.0), DVec2::zero(), 1.0),
    ];
    let mut sim = Simulation::with_bodies(bodies, free(Dimension::Two, 0.01)).unwrap();

    sim.step();

    let left = sim.bodies()[0];
    let right = sim.bodies()[1];
    // position moved with the previous (zero) velocity
    assert_eq!(left.pos, DVec2::new(-1.0, 0.0));
    assert_eq!(right.pos, DVec2::new(1.0, 0.0));
    assert!((left.vel.x - 0.0025).abs() < 1e-15);
    assert!((right.vel.x + 0.0025).abs() < 1e-15);
    assert_eq!(left.vel.y, 0.0);

    sim.step();
    let dx = sim.bodies()[0].pos.x + 1.0;
    assert!(dx > 0.0, "left body should move right");
    assert!((dx - 0.25 * 0.01 * 0.01).abs() < 1e-12);
}

#[test]
fn mirrored_pair_stays_mirrored() {
    let bodies = vec![
        Body::new(DVec2::new(-1.5, 0.4), DVec2::new(0.1, -0.3), 1.0),
        Body::new(DVec2::new(1.5, -0.4), DVec2::new(-0.1, 0.3), 1.0),
    ];
    let mut sim = Simulation::with_bodies(bodies, free(Dimension::Two, 0.01)).unwrap();

    for _ in 0..2000 {
        sim.step();
        let b = sim.bodies();
        assert!((b[0].pos + b[1].pos).mag() < 1e-9);
        assert!((b[0].vel + b[1].vel).mag() < 1e-9);
    }
}

#[test]
fn unbounded_system_conserves_momentum() {
    let mut sim = Simulation::<DVec3>::new(SimulationConfig {
        body_count: 50,
        seed: 17,
        ..SimulationConfig::unbounded_3d()
    })
    .unwrap();
    let before = sim.total_momentum();

    for _ in 0..200 {
        sim.step();
    }

    assert!((sim.total_momentum() - before).mag() < 1e-8);
}

// ==================================================================================
// Boundary
// ==================================================================================

#[test]
fn crossing_the_wall_reverses_velocity() {
    let bodies = vec![Body::new(DVec2::new(2.99, 0.0), DVec2::new(2.0, 0.0), 1.0)];
    let mut sim = Simulation::with_bodies(bodies, walled(0.01)).unwrap();

    sim.step();

    let body = sim.bodies()[0];
    assert!(body.pos.x >= 3.0, "position is not clamped back inside");
    assert!(body.vel.x < 0.0);

    sim.step();
    assert!(sim.bodies()[0].pos.x < body.pos.x);
}

#[test]
fn walls_do_nothing_strictly_inside() {
    let bodies = vec![Body::new(DVec2::new(0.0, 2.0), DVec2::new(1.0, 0.5), 1.0)];
    let mut sim = Simulation::with_bodies(bodies, walled(0.01)).unwrap();

    sim.step();

    assert_eq!(sim.bodies()[0].vel, DVec2::new(1.0, 0.5));
}

#[test]
fn unbounded_bodies_pass_through_the_wall_position() {
    let bodies = vec![Body::new(DVec2::new(2.99, 0.0), DVec2::new(2.0, 0.0), 1.0)];
    let mut sim = Simulation::with_bodies(bodies, free(Dimension::Two, 0.01)).unwrap();

    sim.step();

    assert_eq!(sim.bodies()[0].vel, DVec2::new(2.0, 0.0));
}

// ==================================================================================
// Initialization
// ==================================================================================

#[test]
fn bounded_initialization_is_centered_and_unit_sized() {
    let sim = Simulation::<DVec2>::new(SimulationConfig::bounded_2d()).unwrap();
    let bodies = sim.bodies();
    let n = bodies.len() as f64;
    assert_eq!(bodies.len(), 100);

    let mean_momentum = bodies
        .iter()
        .fold(DVec2::zero(), |acc, b| acc + b.vel * b.mass)
        / n;
    let mean_moment = bodies
        .iter()
        .fold(DVec2::zero(), |acc, b| acc + b.pos * b.mass)
        / n;
    let max_radius = bodies.iter().map(|b| b.pos.length()).fold(0.0, f64::max);

    assert!(mean_momentum.mag() < 1e-9, "{mean_momentum:?}");
    assert!(mean_moment.mag() < 1e-9, "{mean_moment:?}");
    assert!((max_radius - 1.0).abs() < 1e-9);
    assert!(bodies.iter().all(|b| b.acc == DVec2::zero()));
}

#[test]
fn centering_holds_for_non_unit_mass() {
    let sim = Simulation::<DVec2>::new(SimulationConfig {
        mass: 0.25,
        seed: 99,
        ..SimulationConfig::bounded_2d()
    })
    .unwrap();

    assert!(sim.total_momentum().mag() < 1e-9);
    assert!(sim.center_of_mass().mag() < 1e-9);
}

#[test]
fn unbounded_initialization_is_left_as_sampled() {
    let config = SimulationConfig {
        body_count: 30,
        seed: 4,
        ..SimulationConfig::unbounded_3d()
    };
    let sim = Simulation::<DVec3>::new(config.clone()).unwrap();
    let sampled: Vec<Body<DVec3>> = utils::sample_bodies(&config);

    assert_eq!(sim.bodies(), sampled.as_slice());
    assert!(sim.bodies().iter().all(|b| b.pos.length() < 1.0));
}

// ==================================================================================
// Driver
// ==================================================================================

#[test]
fn identical_runs_are_bit_identical() {
    let run = || {
        let mut state = initialize(SimulationConfig {
            seed: 2024,
            ..SimulationConfig::bounded_2d()
        })
        .unwrap();
        for _ in 0..300 {
            state.step();
        }
        state.positions_flat()
    };

    let a = run();
    let b = run();
    assert_eq!(a.len(), 200);
    assert!(a.iter().zip(&b).all(|(x, y)| x.to_bits() == y.to_bits()));
}

#[test]
fn positions_keep_body_order() {
    let bodies = vec![
        Body::new(DVec2::new(10.0, 0.0), DVec2::zero(), 1.0),
        Body::new(DVec2::new(-10.0, 0.0), DVec2::zero(), 1.0),
        Body::new(DVec2::new(0.0, 10.0), DVec2::zero(), 1.0),
    ];
    let mut sim = Simulation::with_bodies(bodies, free(Dimension::Two, 0.01)).unwrap();
    sim.step();

    let positions: Vec<DVec2> = sim.positions().collect();
    assert_eq!(positions.len(), 3);
    assert!(positions[0].x > 9.0);
    assert!(positions[1].x < -9.0);
    assert!(positions[2].y > 9.0);
}

#[test]
fn long_bounded_run_stays_finite() {
    let mut state = initialize(SimulationConfig::bounded_2d()).unwrap();
    for _ in 0..2000 {
        state.step();
    }
    assert_eq!(state.frame(), 2000);
    assert!(state.positions_flat().iter().all(|c| c.is_finite()));

    let SimulationState::Planar(sim) = &state else {
        panic!("expected the 2D variant");
    };
    assert!(sim.bodies().iter().all(|b| b.vel.x.is_finite() && b.vel.y.is_finite()));
}

#[test]
fn yaml_scenarios_load() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios");

    let bounded = SimulationConfig::load(root.join("bounded_2d.yaml")).unwrap();
    assert_eq!(bounded, SimulationConfig::bounded_2d());

    let unbounded = SimulationConfig::load(root.join("unbounded_3d.yaml")).unwrap();
    assert_eq!(unbounded, SimulationConfig::unbounded_3d());
    assert_eq!(initialize(unbounded).unwrap().dimension(), 3);
}
