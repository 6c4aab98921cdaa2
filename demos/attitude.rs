//! Yaw/pitch/roll sweep on a circular LEO orbit: LVLH triad, biased body
//! triad and where their axis labels land on an 800x600 viewport.

use chrono::Utc;
use nalgebra::{Point3, Vector3};

use sat_frames::frames::{ReferenceFrame, YprBias};
use sat_frames::orbital::{KeplerPropagator, KeplerianElements};
use sat_frames::projection::{Camera, Viewport};
use sat_frames::{geodesy, SceneConfig, Tracker};

fn show(name: &str, f: &ReferenceFrame) {
    println!("  {name}");
    for (axis, v) in ["x", "y", "z"].iter().zip(f.axes().iter()) {
        println!("    {axis}: ({:>8.4}, {:>8.4}, {:>8.4})", v.x, v.y, v.z);
    }
}

fn main() {
    env_logger::init();

    let now = Utc::now();
    let sat = KeplerPropagator::new(
        "DEMO",
        now,
        KeplerianElements::circular(geodesy::WGS84.a + 550.0, 53.0_f64.to_radians()),
    );
    let mut tracker = Tracker::new(SceneConfig::default());

    let viewport = Viewport::new(800.0, 600.0);
    let camera = Camera {
        eye: Point3::new(0.0, -40.0, 25.0),
        target: Point3::origin(),
        up: Vector3::z(),
        fov_y: 50_f64.to_radians(),
        near: 0.1,
        far: 500.0,
    };
    let view = camera.view_projection(&viewport);

    for bias in [
        YprBias::default(),
        YprBias::new(90.0, 0.0, 0.0),
        YprBias::new(0.0, 30.0, 0.0),
        YprBias::new(30.0, 20.0, 10.0),
    ] {
        tracker.set_bias(bias);
        let snap = tracker.tick(&sat, now);
        let Some(view_sat) = snap.satellite else {
            println!("no state");
            continue;
        };
        println!(
            "yaw {:>5.1}  pitch {:>5.1}  roll {:>5.1}",
            bias.yaw_deg, bias.pitch_deg, bias.roll_deg
        );
        if let Some(lvlh) = &view_sat.orbit_frame {
            show("LVLH", lvlh);
        }
        if let Some(body) = &view_sat.body_frame {
            show("body", body);
            for (label, anchor) in ["roll", "pitch", "yaw"].iter().zip(tracker.axis_labels(body, &view, &viewport)) {
                match anchor {
                    Some(p) if p.visible => println!("    {label} label at ({:.0}, {:.0}) px", p.x, p.y),
                    _ => println!("    {label} label off screen"),
                }
            }
        }
        println!();
    }
}
