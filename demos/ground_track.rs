//! Ground track of a Molniya-type orbit driven through a closure
//! propagator, written as CSV to stdout.
//!
//! cargo run --example ground_track > track.csv

use chrono::{Duration, Utc};

use sat_frames::io::csv::write_ground_track;
use sat_frames::orbital::{KeplerianElements, OrbitalState, MU_EARTH_KM};
use sat_frames::projection::{ground_track, MercatorCanvas};

fn main() -> std::io::Result<()> {
    env_logger::init();

    let epoch = Utc::now();
    let molniya = KeplerianElements {
        sma: 26_600.0, // km
        ecc: 0.74,
        inc: 63.4_f64.to_radians(),
        raan: 0.0,
        argp: 270.0_f64.to_radians(),
        true_anom: 0.0,
    };

    // any Fn(DateTime<Utc>) -> Option<OrbitalState> is a propagator
    let propagate = |t: chrono::DateTime<Utc>| {
        let dt = (t - epoch).num_milliseconds() as f64 / 1000.0;
        let (r, v) = molniya.advanced_by_mu(dt, MU_EARTH_KM).to_state_vector();
        Some(OrbitalState::new(r, v))
    };

    let canvas = MercatorCanvas::new(1024.0, 512.0);
    let track = ground_track(&propagate, epoch, Duration::minutes(5), Duration::hours(24), &canvas);
    eprintln!(
        "{} points in {} segments, period {:.1} h",
        track.len(),
        track.segments().len(),
        molniya.period() / 3600.0
    );

    let stdout = std::io::stdout();
    write_ground_track(&mut stdout.lock(), &track)
}
