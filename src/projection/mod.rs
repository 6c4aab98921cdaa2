//! Everything between core vectors and pixels: the 3D scene and screen
//! projection, and the 2D Mercator map with terminator and ground track.

pub mod ground_track;
pub mod mercator;
pub mod scene;
pub mod screen;
pub mod terminator;

pub use ground_track::{ground_track, sample_geodetic, subsatellite_point, GroundTrack, TrackPoint};
pub use mercator::{clamp_latitude, MercatorCanvas, MercatorPoint, MAX_MERCATOR_LAT_DEG};
pub use scene::SceneAxes;
pub use screen::{axis_label_anchors, Camera, ScreenPoint, ViewProjection, Viewport};
pub use terminator::{night_polygon, pixel_columns, terminator_curve, terminator_latitude};
