use std::path::PathBuf;

use chrono::Utc;

use sat_frames::frames::{ReferenceFrame, YprBias};
use sat_frames::io::{csv, json};
use sat_frames::orbital::{KeplerPropagator, KeplerianElements, Propagator};
use sat_frames::{geodesy, SceneConfig, Tracker};

struct Args {
    config: Option<PathBuf>,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
}

fn parse_args() -> sat_frames::Result<Args> {
    let mut args = Args { config: None, csv: None, json: None };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        let mut value = |flag: &str| {
            it.next()
                .map(PathBuf::from)
                .ok_or_else(|| sat_frames::Error::InvalidConfig(format!("{flag} needs a path")))
        };
        match arg.as_str() {
            "--csv" => args.csv = Some(value("--csv")?),
            "--json" => args.json = Some(value("--json")?),
            _ => args.config = Some(PathBuf::from(&arg)),
        }
    }
    Ok(args)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> sat_frames::Result<()> {
    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => SceneConfig::from_file(path)?,
        None => SceneConfig::default(),
    };

    // -----------------------------------------------------------------------
    // Satellite: ISS-like low orbit, two-body propagation
    // -----------------------------------------------------------------------
    let now = Utc::now();
    let elements = KeplerianElements {
        sma: geodesy::WGS84.a + 420.0, // km
        ecc: 0.000_5,
        inc: 51.64_f64.to_radians(),
        raan: 120.0_f64.to_radians(),
        argp: 90.0_f64.to_radians(),
        true_anom: 0.0,
    };
    let propagator = KeplerPropagator::new("STATION-1", now, elements);

    let mut tracker = Tracker::new(config);
    if tracker.bias().is_zero() {
        tracker.set_bias(YprBias::new(10.0, 5.0, 0.0));
    }

    let snapshot = tracker.tick(&propagator, now);
    let track = tracker.ground_track(&propagator, now);
    let night = tracker.night_polygon(&snapshot);

    // -----------------------------------------------------------------------
    // Print results
    // -----------------------------------------------------------------------
    println!();
    println!("====================================================================");
    println!("  SATELLITE FRAME REPORT: {}", propagator.name());
    println!("====================================================================");
    println!();
    println!("  Orbit");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  SMA:           {:>8.1} km    Eccentricity: {:>8.4}",
        elements.sma, elements.ecc
    );
    println!(
        "  Inclination:   {:>8.2} deg   RAAN:         {:>8.2} deg",
        elements.inc.to_degrees(),
        elements.raan.to_degrees()
    );
    println!("  Period:        {:>8.1} min", elements.period() / 60.0);
    println!();

    println!("  Time & Sun");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  UTC:           {}", snapshot.time.format("%Y-%m-%d %H:%M:%S"));
    println!(
        "  Julian day:    {:>14.5}   GMST: {:>8.3} deg",
        snapshot.julian_day,
        snapshot.gmst_rad.to_degrees()
    );
    println!(
        "  Sun (ECI):     ({:>7.4}, {:>7.4}, {:>7.4})",
        snapshot.sun_eci.x, snapshot.sun_eci.y, snapshot.sun_eci.z
    );
    println!(
        "  Sub-solar:     lat {:>7.2} deg   lon {:>8.2} deg",
        snapshot.subsolar.lat_deg(),
        snapshot.subsolar.lon_deg()
    );
    println!("  Night polygon: {} vertices", night.len());
    println!();

    match &snapshot.satellite {
        Some(sat) => {
            println!("  Satellite ({})", sat.class.label());
            println!("  ──────────────────────────────────────────────────────────────────");
            println!(
                "  Position:      lat {:>7.2} deg   lon {:>8.2} deg   h {:>7.1} km",
                sat.geodetic.lat_deg, sat.geodetic.lon_deg, sat.geodetic.height_km
            );
            println!(
                "  Mercator:      x {:>7.1} px     y {:>7.1} px",
                sat.mercator.x, sat.mercator.y
            );
            println!("  Speed:         {:>8.3} km/s", sat.state.speed());
            println!();
            if let Some(lvlh) = &sat.orbit_frame {
                print_frame("Orbit frame (LVLH)", lvlh, ["x", "y", "z nadir"]);
            }
            if let Some(body) = &sat.body_frame {
                let b = tracker.bias();
                let title = format!(
                    "Body frame (yaw {:.1}, pitch {:.1}, roll {:.1})",
                    b.yaw_deg, b.pitch_deg, b.roll_deg
                );
                print_frame(&title, body, ["roll", "pitch", "yaw"]);
            }
        }
        None => {
            println!("  Satellite: no state at this instant");
            println!();
        }
    }

    // -----------------------------------------------------------------------
    // Ground track table (sampled)
    // -----------------------------------------------------------------------
    println!("  Ground Track");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>8}  {:>9}  {:>10}  {:>8}  {:>8}",
        "t (min)", "lat (deg)", "lon (deg)", "x (px)", "y (px)"
    );
    println!("  {}", "─".repeat(52));

    let points = track.points();
    let sample_interval = (points.len() / 15).max(1);
    for (i, p) in points.iter().enumerate() {
        if i % sample_interval != 0 && i != points.len() - 1 {
            continue;
        }
        let minutes = (p.time - snapshot.time).num_seconds() as f64 / 60.0;
        println!(
            "  {:>8.1}  {:>9.2}  {:>10.2}  {:>8.1}  {:>8.1}",
            minutes, p.lat_deg, p.lon_deg, p.pixel.x, p.pixel.y
        );
    }

    println!();
    println!(
        "  Track: {} points, {} segments{}",
        track.len(),
        track.segments().len(),
        if track.is_collapsed() { " (stationary)" } else { "" }
    );
    println!("====================================================================");
    println!();

    if let Some(path) = &args.csv {
        csv::write_ground_track_file(path, &track)?;
    }
    if let Some(path) = &args.json {
        json::write_report_file(path, propagator.name(), &snapshot, &track)?;
    }
    Ok(())
}

fn print_frame(title: &str, frame: &ReferenceFrame, names: [&str; 3]) {
    println!("  {}", title);
    println!("  ──────────────────────────────────────────────────────────────────");
    for (name, axis) in names.iter().zip(frame.axes().iter()) {
        println!(
            "  {:<8} ({:>8.5}, {:>8.5}, {:>8.5})",
            name, axis.x, axis.y, axis.z
        );
    }
    println!();
}
