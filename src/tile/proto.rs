//! Vector-tile protobuf messages and the conversion from the in-memory model.

use prost::Message;

use super::{Feature, GeomType, Layer, Tile};

#[derive(Clone, PartialEq, prost::Message)]
struct VectorTile {
    #[prost(message, repeated, tag = "3")]
    layers: Vec<VectorTileLayer>,
}

#[derive(Clone, PartialEq, prost::Message)]
struct VectorTileLayer {
    #[prost(string, required, tag = "1")]
    name: String,
    #[prost(message, repeated, tag = "2")]
    features: Vec<VectorTileFeature>,
    #[prost(string, repeated, tag = "3")]
    keys: Vec<String>,
    #[prost(message, repeated, tag = "4")]
    values: Vec<VectorTileValue>,
    #[prost(uint32, optional, tag = "5")]
    extent: Option<u32>,
    #[prost(uint32, required, tag = "15")]
    version: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
struct VectorTileFeature {
    #[prost(uint64, optional, tag = "1")]
    id: Option<u64>,
    #[prost(uint32, repeated, packed = "true", tag = "2")]
    tags: Vec<u32>,
    #[prost(enumeration = "GeomType", optional, tag = "3")]
    geometry_type: Option<i32>,
    #[prost(uint32, repeated, packed = "true", tag = "4")]
    geometry: Vec<u32>,
}

/// Only the integer variant is ever set here.
#[derive(Clone, PartialEq, prost::Message)]
struct VectorTileValue {
    #[prost(int64, optional, tag = "4")]
    int_value: Option<i64>,
}

impl From<&Feature> for VectorTileFeature {
    fn from(feature: &Feature) -> Self {
        Self {
            id: None,
            tags: feature.tags.clone(),
            geometry_type: Some(feature.geom_type as i32),
            geometry: feature.geometry.clone(),
        }
    }
}

impl From<&Layer> for VectorTileLayer {
    fn from(layer: &Layer) -> Self {
        Self {
            name: layer.name.clone(),
            features: layer.features.iter().map(VectorTileFeature::from).collect(),
            keys: layer.keys.clone(),
            values: layer.values.iter().map(|&v| VectorTileValue { int_value: Some(v) }).collect(),
            extent: Some(layer.extent),
            version: layer.version,
        }
    }
}

/// Serialize a whole tile.
pub(super) fn encode_tile(tile: &Tile) -> Vec<u8> {
    VectorTile { layers: tile.layers.iter().map(VectorTileLayer::from).collect() }.encode_to_vec()
}
