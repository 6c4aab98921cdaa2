use chrono::Utc;
use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points, Polygon};

use sat_frames::orbital::{KeplerPropagator, KeplerianElements};
use sat_frames::projection::MercatorPoint;
use sat_frames::{geodesy, SceneConfig, Tracker};

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::from_file(&path).unwrap_or_else(|e| {
            log::warn!("{e}; using default scene config");
            SceneConfig::default()
        }),
        None => SceneConfig::default(),
    };

    let now = Utc::now();
    let satellites = vec![
        KeplerPropagator::new(
            "LEO-51",
            now,
            KeplerianElements::circular(geodesy::WGS84.a + 420.0, 51.64_f64.to_radians()),
        ),
        KeplerPropagator::new(
            "SSO-98",
            now,
            KeplerianElements::circular(geodesy::WGS84.a + 700.0, 98.2_f64.to_radians()),
        ),
        KeplerPropagator::new("GEO-0", now, KeplerianElements::circular(42_164.17, 0.0)),
    ];

    let app = MapViz { tracker: Tracker::new(config), satellites, selected: 0, shown: 0 };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native("Satellite Ground Track", options, Box::new(|_| Ok(Box::new(app))))
}

struct MapViz {
    tracker: Tracker,
    satellites: Vec<KeplerPropagator>,
    selected: usize,
    // satellite the tracker's frame cache belongs to
    shown: usize,
}

/// Canvas pixels to plot coordinates (plot y grows upward).
fn plot_xy(p: &MercatorPoint, height: f64) -> [f64; 2] {
    [p.x, height - p.y]
}

impl eframe::App for MapViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Utc::now();
        if self.selected != self.shown {
            self.tracker.reset_frame();
            self.shown = self.selected;
        }
        let sat = &self.satellites[self.selected];
        let snapshot = self.tracker.tick(sat, now);
        let track = self.tracker.ground_track(sat, now);
        let night = self.tracker.night_polygon(&snapshot);
        let canvas = self.tracker.config().mercator;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for (i, s) in self.satellites.iter().enumerate() {
                    ui.selectable_value(&mut self.selected, i, s.name.as_str());
                }
            });
            let sat_line = match &snapshot.satellite {
                Some(v) => format!(
                    "{} {}  |  lat {:.2}  lon {:.2}  h {:.0} km{}",
                    v.class.label(),
                    self.satellites[self.selected].name,
                    v.geodetic.lat_deg,
                    v.geodetic.lon_deg,
                    v.geodetic.height_km,
                    if v.stale { "  (frame stale)" } else { "" },
                ),
                None => "no state".to_string(),
            };
            ui.label(format!(
                "{}  |  GMST {:.2} deg  |  Sub-solar {:.2}, {:.2}  |  {}",
                snapshot.time.format("%Y-%m-%d %H:%M:%S UTC"),
                snapshot.gmst_rad.to_degrees(),
                snapshot.subsolar.lat_deg(),
                snapshot.subsolar.lon_deg(),
                sat_line,
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let h = canvas.height;
            Plot::new("mercator")
                .data_aspect(1.0)
                .include_x(0.0)
                .include_x(canvas.width)
                .include_y(0.0)
                .include_y(h)
                .show(ui, |plot_ui| {
                    let night_pts: PlotPoints = night.iter().map(|p| plot_xy(p, h)).collect();
                    plot_ui.polygon(
                        Polygon::new("Night", night_pts)
                            .fill_color(egui::Color32::from_black_alpha(90)),
                    );

                    for segment in track.segments() {
                        let pts: PlotPoints = segment.iter().map(|p| plot_xy(&p.pixel, h)).collect();
                        plot_ui.line(Line::new("Ground track", pts));
                    }

                    let sun = canvas.project(snapshot.subsolar.lat_deg(), snapshot.subsolar.lon_deg());
                    plot_ui.points(
                        Points::new("Sub-solar", vec![plot_xy(&sun, h)])
                            .radius(6.0)
                            .color(egui::Color32::YELLOW),
                    );

                    if let Some(v) = &snapshot.satellite {
                        plot_ui.points(
                            Points::new("Satellite", vec![plot_xy(&v.mercator, h)])
                                .radius(5.0)
                                .color(egui::Color32::LIGHT_RED),
                        );
                    }
                });
        });

        ctx.request_repaint_after(std::time::Duration::from_secs(1));
    }
}
