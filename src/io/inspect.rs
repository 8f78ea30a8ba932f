//! Decoding compressed tiles back into a per-layer, per-feature summary.

use std::fmt;

use anyhow::{anyhow, Result};
use geo_types::Geometry;
use mvt_reader::Reader;

use super::deflate::inflate;

/// Decoded shape of one feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSummary {
    /// Geometry kind as decoded, e.g. "LineString" or "MultiLineString".
    pub kind: &'static str,
    /// Number of line strings in the geometry.
    pub parts: usize,
    /// Total number of vertices.
    pub vertices: usize,
    /// Debug rendering of the feature's properties.
    pub properties: String,
}

/// One decoded layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSummary {
    pub name: String,
    pub features: Vec<FeatureSummary>,
}

impl fmt::Display for LayerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "layer {:?}: {} features", self.name, self.features.len())?;
        for (i, feature) in self.features.iter().enumerate() {
            writeln!(
                f, "  #{i} {} parts={} vertices={} {}",
                feature.kind, feature.parts, feature.vertices, feature.properties,
            )?;
        }
        Ok(())
    }
}

fn summarize_geometry(geometry: &Geometry<f32>) -> (&'static str, usize, usize) {
    match geometry {
        Geometry::Point(_) => ("Point", 1, 1),
        Geometry::MultiPoint(mp) => ("MultiPoint", mp.0.len(), mp.0.len()),
        Geometry::LineString(ls) => ("LineString", 1, ls.0.len()),
        Geometry::MultiLineString(mls) => {
            ("MultiLineString", mls.0.len(), mls.0.iter().map(|ls| ls.0.len()).sum())
        }
        Geometry::Polygon(_) => ("Polygon", 1, 0),
        Geometry::MultiPolygon(mp) => ("MultiPolygon", mp.0.len(), 0),
        _ => ("Other", 0, 0),
    }
}

/// Inflate and decode a compressed tile.
pub fn inspect_tile(compressed: &[u8]) -> Result<Vec<LayerSummary>> {
    let raw = inflate(compressed)?;
    let reader = Reader::new(raw)
        .map_err(|e| anyhow!("[io::inspect] Failed to parse tile: {e:?}"))?;
    let names = reader.get_layer_names()
        .map_err(|e| anyhow!("[io::inspect] Failed to read layer names: {e:?}"))?;

    names.into_iter().enumerate().map(|(idx, name)| -> Result<LayerSummary> {
        let features = reader.get_features(idx)
            .map_err(|e| anyhow!("[io::inspect] Failed to read features of layer {name:?}: {e:?}"))?;
        let features = features.iter().map(|feature| {
            let (kind, parts, vertices) = summarize_geometry(feature.get_geometry());
            FeatureSummary { kind, parts, vertices, properties: format!("{:?}", feature.properties) }
        }).collect();
        Ok(LayerSummary { name, features })
    }).collect()
}
