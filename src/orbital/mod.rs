pub mod classify;
pub mod elements;
pub mod propagator;

pub use classify::{OrbitClass, OrbitClassThresholds};
pub use elements::{KeplerianElements, MU_EARTH_KM};
pub use propagator::{KeplerPropagator, OrbitalState, Propagator};
