//! In-memory model of a vector tile: layers, their key/value tables, and features.

mod proto;

/// Tile extent in units per axis.
pub const EXTENT: u32 = 4096;

/// Side length of the down-sampled cell grid used for dedup and point routing.
pub const GRID_SIZE: usize = 256;

/// Tile units covered by one grid cell along each axis.
pub const CELL_SIZE: i32 = (EXTENT as usize / GRID_SIZE) as i32;

/// Maximum number of primitives held by a single chain node.
pub const MAX_POINTS: usize = 10_000;

/// Layer version written into every layer.
pub const LAYER_VERSION: u32 = 1;

/// The only key in every layer's key table.
pub const META_KEY: &str = "meta";

/// Name of the layer holding line segments.
pub const LINES_LAYER: &str = "lines";

/// Name of the layer holding points (encoded as 1-unit segments).
pub const POINTS_LAYER: &str = "points";

/// Feature geometry type, numbered as in the vector-tile schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, prost::Enumeration)]
#[repr(i32)]
pub enum GeomType {
    Unknown = 0,
    Point = 1,
    LineString = 2,
    Polygon = 3,
}

/// One feature: a tag list of (key, value) index pairs and a packed command stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    tags: Vec<u32>,
    geom_type: GeomType,
    geometry: Vec<u32>,
}

impl Feature {
    pub fn new(geom_type: GeomType) -> Self {
        Self { tags: Vec::new(), geom_type, geometry: Vec::new() }
    }

    /// Append a (key index, value index) pair.
    pub fn add_tag(&mut self, key: u32, value: u32) {
        self.tags.push(key);
        self.tags.push(value);
    }

    /// Replace the geometry with an already-encoded command stream.
    pub fn set_geometry(&mut self, geometry: Vec<u32>) { self.geometry = geometry }

    #[inline] pub fn tags(&self) -> &[u32] { &self.tags }

    #[inline] pub fn geom_type(&self) -> GeomType { self.geom_type }

    #[inline] pub fn geometry(&self) -> &[u32] { &self.geometry }
}

/// A named layer with its own key and value tables.
///
/// Values are always integers here; every bucket contributes exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    name: String,
    version: u32,
    extent: u32,
    keys: Vec<String>,
    values: Vec<i64>,
    features: Vec<Feature>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: LAYER_VERSION,
            extent: EXTENT,
            keys: Vec::new(),
            values: Vec::new(),
            features: Vec::new(),
        }
    }

    /// Append a key and return its index.
    pub fn add_key(&mut self, key: impl Into<String>) -> u32 {
        self.keys.push(key.into());
        (self.keys.len() - 1) as u32
    }

    /// Append an integer value and return its index.
    pub fn add_value(&mut self, value: i64) -> u32 {
        self.values.push(value);
        (self.values.len() - 1) as u32
    }

    pub fn add_feature(&mut self, feature: Feature) { self.features.push(feature) }

    #[inline] pub fn name(&self) -> &str { &self.name }

    #[inline] pub fn version(&self) -> u32 { self.version }

    #[inline] pub fn extent(&self) -> u32 { self.extent }

    #[inline] pub fn keys(&self) -> &[String] { &self.keys }

    #[inline] pub fn values(&self) -> &[i64] { &self.values }

    #[inline] pub fn features(&self) -> &[Feature] { &self.features }
}

/// An ordered list of layers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tile {
    layers: Vec<Layer>,
}

impl Tile {
    pub fn new() -> Self { Self::default() }

    pub fn add_layer(&mut self, layer: Layer) { self.layers.push(layer) }

    #[inline] pub fn layers(&self) -> &[Layer] { &self.layers }

    /// Look up a layer by name.
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    /// Total number of features across all layers.
    pub fn num_features(&self) -> usize {
        self.layers.iter().map(|layer| layer.features.len()).sum()
    }

    /// Serialize to the canonical protobuf encoding of the vector-tile schema.
    pub fn to_bytes(&self) -> Vec<u8> { proto::encode_tile(self) }
}
