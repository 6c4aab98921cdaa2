use std::io::{self, Write};
use std::path::Path;

use crate::error::{io_err, Result};
use crate::projection::GroundTrack;

/// Write a ground track to CSV.
///
/// Columns: time (RFC 3339), segment, lat_deg, lon_deg, x_px, y_px.
/// `segment` increments at every antimeridian break.
pub fn write_ground_track<W: Write>(writer: &mut W, track: &GroundTrack) -> io::Result<()> {
    writeln!(writer, "time,segment,lat_deg,lon_deg,x_px,y_px")?;

    for (seg_idx, segment) in track.segments().iter().enumerate() {
        for p in segment.iter() {
            writeln!(
                writer,
                "{},{},{:.5},{:.5},{:.2},{:.2}",
                p.time.to_rfc3339(),
                seg_idx,
                p.lat_deg,
                p.lon_deg,
                p.pixel.x,
                p.pixel.y,
            )?;
        }
    }

    Ok(())
}

/// Write a ground track CSV to `path`.
pub fn write_ground_track_file(path: impl AsRef<Path>, track: &GroundTrack) -> Result<()> {
    let path = path.as_ref();
    let mut file = std::fs::File::create(path).map_err(|e| io_err(path, e))?;
    write_ground_track(&mut file, track).map_err(|e| io_err(path, e))?;
    log::info!("wrote {} ground-track points to {}", track.len(), path.display());
    Ok(())
}
