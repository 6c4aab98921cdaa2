pub mod config;
pub mod ephemeris;
pub mod error;
pub mod footprint;
pub mod frames;
pub mod geodesy;
pub mod io;
pub mod orbital;
pub mod projection;
pub mod time;
pub mod tracker;

pub use config::SceneConfig;
pub use error::{Error, Result};
pub use tracker::{SatelliteView, Snapshot, Tracker};
