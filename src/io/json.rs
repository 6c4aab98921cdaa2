use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::{io_err, Result};
use crate::projection::GroundTrack;
use crate::tracker::Snapshot;

/// Summary statistics of a sampled ground track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSummary {
    pub points: usize,
    pub segments: usize,
    pub min_lat_deg: f64,
    pub max_lat_deg: f64,
    pub span_s: f64,
    pub stationary: bool,
}

impl TrackSummary {
    /// `None` for an empty track.
    pub fn from_track(track: &GroundTrack) -> Option<Self> {
        let pts = track.points();
        let first = pts.first()?;
        let last = pts.last()?;

        let min_lat_deg = pts.iter().map(|p| p.lat_deg).fold(f64::INFINITY, f64::min);
        let max_lat_deg = pts.iter().map(|p| p.lat_deg).fold(f64::NEG_INFINITY, f64::max);

        Some(TrackSummary {
            points: pts.len(),
            segments: track.segments().len(),
            min_lat_deg,
            max_lat_deg,
            span_s: (last.time - first.time).num_milliseconds() as f64 / 1000.0,
            stationary: track.is_collapsed(),
        })
    }
}

#[derive(Serialize)]
struct Report<'a> {
    satellite: &'a str,
    snapshot: &'a Snapshot,
    ground_track: Option<TrackSummary>,
}

/// Write one snapshot as pretty JSON.
pub fn write_snapshot<W: Write>(writer: &mut W, snapshot: &Snapshot) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, snapshot)?;
    writeln!(writer).map_err(serde_json::Error::io)?;
    Ok(())
}

/// Write snapshot plus ground-track summary for a named satellite.
pub fn write_report<W: Write>(
    writer: &mut W,
    satellite: &str,
    snapshot: &Snapshot,
    track: &GroundTrack,
) -> Result<()> {
    let report = Report { satellite, snapshot, ground_track: TrackSummary::from_track(track) };
    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer).map_err(serde_json::Error::io)?;
    Ok(())
}

/// Write the report JSON to `path`.
pub fn write_report_file(
    path: impl AsRef<Path>,
    satellite: &str,
    snapshot: &Snapshot,
    track: &GroundTrack,
) -> Result<()> {
    let path = path.as_ref();
    let mut file = std::fs::File::create(path).map_err(|e| io_err(path, e))?;
    write_report(&mut file, satellite, snapshot, track)?;
    log::info!("wrote report for {} to {}", satellite, path.display());
    Ok(())
}
