pub mod body;
pub mod boundary;
pub mod config;
pub mod forces;
pub mod simulation;
pub mod utils;
pub mod vector;
pub mod c_api;

pub use body::Body;
pub use boundary::Boundary;
pub use config::{ConfigError, Dimension, SimulationConfig};
pub use simulation::{initialize, Simulation, SimulationState};
pub use vector::Vector;
pub use ultraviolet::{DVec2, DVec3};
