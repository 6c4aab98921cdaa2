//! RF footprint ingestion.
//!
//! Footprints arrive either as a GeoJSON `FeatureCollection` of
//! (Multi)Polygons or as a flat array of beam/EIRP samples. The shape is
//! resolved once here; consumers only ever see [`FootprintPolygon`]s.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{io_err, Error, Result};
use crate::projection::{MercatorCanvas, MercatorPoint};

/// Beam colours, cycled by beam id.
pub const BEAM_PALETTE: [&str; 7] = ["#ff4c4c", "#ff8c1a", "#ffd21a", "#66cc33", "#3399ff", "#9966ff", "#ff66cc"];

pub const EIRP_MIN_DBW: f64 = 30.0;
pub const EIRP_MAX_DBW: f64 = 60.0;

// ---------------------------------------------------------------------------
// Input shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FootprintProperties {
    #[serde(rename = "eirp_dBW")]
    pub eirp_dbw: Option<f64>,
    #[serde(rename = "beamId")]
    pub beam_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Feature {
    pub properties: Option<FootprintProperties>,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// One sample of the flat array form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FootprintSample {
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "eirp_dBW")]
    pub eirp_dbw: Option<f64>,
    #[serde(rename = "beamId")]
    pub beam_id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FootprintData {
    FeatureCollection(FeatureCollection),
    Points(Vec<FootprintSample>),
}

/// Filled outline on the map, vertices as (lat, lon) degrees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FootprintPolygon {
    pub path: Vec<(f64, f64)>,
    pub color: String,
}

impl FootprintPolygon {
    pub fn mercator_path(&self, canvas: &MercatorCanvas) -> Vec<MercatorPoint> {
        self.path.iter().map(|&(lat, lon)| canvas.project(lat, lon)).collect()
    }
}

// ---------------------------------------------------------------------------
// Colours
// ---------------------------------------------------------------------------

pub fn beam_color(beam_id: u32) -> &'static str {
    BEAM_PALETTE[beam_id as usize % BEAM_PALETTE.len()]
}

/// Heat colour for an EIRP level: blue at 30 dBW through red at 60 dBW.
pub fn eirp_color(eirp_dbw: f64) -> String {
    let k = ((eirp_dbw - EIRP_MIN_DBW) / (EIRP_MAX_DBW - EIRP_MIN_DBW)).clamp(0.0, 1.0);
    hsl_to_hex(0.66 - 0.66 * k, 1.0, 0.5)
}

fn properties_color(eirp_dbw: Option<f64>, beam_id: Option<u32>) -> String {
    match eirp_dbw {
        Some(v) => eirp_color(v),
        None => beam_color(beam_id.unwrap_or(0)).to_string(),
    }
}

fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f64| {
        let t = t.rem_euclid(1.0);
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * 6.0 * (2.0 / 3.0 - t)
        } else {
            p
        };
        (v.clamp(0.0, 1.0) * 255.0).round() as u8
    };
    format!("#{:02x}{:02x}{:02x}", channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}

// ---------------------------------------------------------------------------
// Ingestion
// ---------------------------------------------------------------------------

impl FootprintData {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(value)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        Self::from_json_str(&text)
    }

    /// Resolve a parsed document into one of the two shapes.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| {
            log::warn!("footprint format not recognised: {}", e);
            Error::InvalidFootprint(e.to_string())
        })
    }

    /// Outlines to draw. Array samples are grouped by beam id in first-seen
    /// order; samples without a beam id form one shared group.
    pub fn polygons(&self) -> Vec<FootprintPolygon> {
        match self {
            FootprintData::FeatureCollection(fc) => fc.features.iter().flat_map(feature_polygons).collect(),
            FootprintData::Points(samples) => {
                let mut groups: Vec<(Option<u32>, Vec<&FootprintSample>)> = Vec::new();
                for s in samples {
                    match groups.iter_mut().find(|(k, _)| *k == s.beam_id) {
                        Some((_, members)) => members.push(s),
                        None => groups.push((s.beam_id, vec![s])),
                    }
                }
                groups
                    .into_iter()
                    .map(|(beam, members)| FootprintPolygon {
                        color: properties_color(members[0].eirp_dbw, beam),
                        path: members.iter().map(|s| (s.lat, s.lon)).collect(),
                    })
                    .collect()
            }
        }
    }
}

fn ring_to_path(ring: &[[f64; 2]]) -> Vec<(f64, f64)> {
    // GeoJSON positions are [lon, lat]
    ring.iter().map(|&[lon, lat]| (lat, lon)).collect()
}

fn feature_polygons(feature: &Feature) -> Vec<FootprintPolygon> {
    let props = feature.properties.clone().unwrap_or_default();
    let color = properties_color(props.eirp_dbw, props.beam_id);
    let Some(geometry) = &feature.geometry else {
        return Vec::new();
    };

    // only the outer ring of each polygon is drawn
    let outer_rings: Vec<Vec<[f64; 2]>> = match geometry.kind.as_str() {
        "Polygon" => serde_json::from_value::<Vec<Vec<[f64; 2]>>>(geometry.coordinates.clone())
            .map(|rings| rings.into_iter().take(1).collect())
            .unwrap_or_default(),
        "MultiPolygon" => serde_json::from_value::<Vec<Vec<Vec<[f64; 2]>>>>(geometry.coordinates.clone())
            .map(|polys| polys.into_iter().filter_map(|p| p.into_iter().next()).collect())
            .unwrap_or_default(),
        other => {
            log::warn!("skipping footprint geometry of type {}", other);
            Vec::new()
        }
    };

    outer_rings
        .iter()
        .map(|ring| FootprintPolygon { path: ring_to_path(ring), color: color.clone() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEOJSON: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "beamId": 2 },
                "geometry": { "type": "Polygon", "coordinates": [[[10, 20], [12, 20], [12, 22], [10, 20]]] }
            },
            {
                "type": "Feature",
                "properties": { "eirp_dBW": 60 },
                "geometry": { "type": "MultiPolygon", "coordinates": [
                    [[[0, 0], [1, 0], [1, 1], [0, 0]]],
                    [[[5, 5], [6, 5], [6, 6], [5, 5]]]
                ] }
            },
            {
                "type": "Feature",
                "properties": null,
                "geometry": { "type": "Point", "coordinates": [1, 2] }
            }
        ]
    }"#;

    #[test]
    fn geojson_polygons_swap_to_lat_lon() {
        let data = FootprintData::from_json_str(GEOJSON).unwrap();
        assert!(matches!(data, FootprintData::FeatureCollection(_)));
        let polys = data.polygons();
        assert_eq!(polys.len(), 3, "polygon + two multipolygon parts, point skipped");
        assert_eq!(polys[0].path[0], (20.0, 10.0));
        assert_eq!(polys[0].color, "#ffd21a");
        assert_eq!(polys[1].color, "#ff0000");
        assert_eq!(polys[2].path[1], (5.0, 6.0));
    }

    #[test]
    fn flat_samples_group_by_beam() {
        let json = r#"[
            { "lat": 1, "lon": 1, "beamId": 0 },
            { "lat": 2, "lon": 2, "beamId": 1 },
            { "lat": 3, "lon": 3, "beamId": 0 },
            { "lat": 4, "lon": 4, "beamId": 8 }
        ]"#;
        let polys = FootprintData::from_json_str(json).unwrap().polygons();
        assert_eq!(polys.len(), 3);
        assert_eq!(polys[0].path, vec![(1.0, 1.0), (3.0, 3.0)]);
        assert_eq!(polys[0].color, BEAM_PALETTE[0]);
        assert_eq!(polys[2].color, BEAM_PALETTE[1], "palette wraps");
    }

    #[test]
    fn eirp_samples_share_one_group() {
        let json = r#"[{ "lat": 0, "lon": 0, "eirp_dBW": 30 }, { "lat": 1, "lon": 0, "eirp_dBW": 50 }]"#;
        let polys = FootprintData::from_json_str(json).unwrap().polygons();
        assert_eq!(polys.len(), 1);
        assert_eq!(polys[0].color, eirp_color(30.0));
    }

    #[test]
    fn eirp_scale_runs_blue_to_red() {
        // hue 0.66 is just short of pure blue
        assert_eq!(eirp_color(20.0), eirp_color(30.0));
        assert!(eirp_color(30.0).ends_with("ff"));
        assert_eq!(eirp_color(60.0), "#ff0000");
        assert_eq!(eirp_color(75.0), "#ff0000");
    }

    #[test]
    fn unknown_shape_is_rejected() {
        let err = FootprintData::from_json_str(r#"{ "type": "Feature" }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidFootprint(_)));
        assert!(matches!(FootprintData::from_json_str("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn mercator_path_projects_each_vertex() {
        let poly = FootprintPolygon { path: vec![(0.0, 0.0), (0.0, 90.0)], color: "#fff".into() };
        let pts = poly.mercator_path(&MercatorCanvas::new(360.0, 180.0));
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[0].x, 180.0);
        assert_eq!(pts[1].x, 270.0);
    }
}
