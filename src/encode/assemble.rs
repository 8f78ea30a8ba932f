use crate::store::{PointNode, PointStore, SegmentNode, SegmentStore};
use crate::tile::{Feature, GeomType, Layer, Tile, LINES_LAYER, META_KEY, POINTS_LAYER};

use super::command::GeometryEncoder;

/// Feature for one chain node, tagged with the bucket's value index.
fn tagged_feature(value: u32, geometry: Vec<u32>) -> Feature {
    let mut feature = Feature::new(GeomType::LineString);
    feature.add_tag(0, value);
    feature.set_geometry(geometry);
    feature
}

/// Encode a segment node, moving the pen only where a segment does not continue the last one.
fn segment_geometry(node: &SegmentNode) -> Vec<u32> {
    let mut encoder = GeometryEncoder::new();
    for s in node.segments() {
        if !encoder.is_active() || encoder.position() != (s.x0, s.y0) {
            encoder.move_to(s.x0, s.y0);
        }
        encoder.line_to(s.x1, s.y1);
    }
    encoder.finish()
}

/// Encode a point node; each point becomes a 1-unit horizontal segment.
fn point_geometry(node: &PointNode) -> Vec<u32> {
    let mut encoder = GeometryEncoder::new();
    for p in node.points() {
        encoder.move_to(p.x, p.y);
        encoder.line_to(p.x.wrapping_add(1), p.y);
    }
    encoder.finish()
}

/// Build the "lines" layer: one value per bucket, one feature per non-empty chain node.
pub fn lines_layer(store: &SegmentStore) -> Layer {
    let mut layer = Layer::new(LINES_LAYER);
    layer.add_key(META_KEY);
    for (meta, nodes) in store.buckets() {
        let value = layer.add_value(meta);
        for node in nodes.filter(|node| !node.is_empty()) {
            layer.add_feature(tagged_feature(value, segment_geometry(node)));
        }
    }
    layer
}

/// Build the "points" layer: one value per bucket, one feature per non-empty chain node.
pub fn points_layer(store: &PointStore) -> Layer {
    let mut layer = Layer::new(POINTS_LAYER);
    layer.add_key(META_KEY);
    for (meta, nodes) in store.buckets() {
        let value = layer.add_value(meta);
        for node in nodes.filter(|node| !node.is_empty()) {
            layer.add_feature(tagged_feature(value, point_geometry(node)));
        }
    }
    layer
}

/// Assemble both stores into a two-layer tile (lines first, then points).
pub fn assemble_tile(segments: &SegmentStore, points: &PointStore) -> Tile {
    let mut tile = Tile::new();
    tile.add_layer(lines_layer(segments));
    tile.add_layer(points_layer(points));
    log::debug!(
        "[encode::assemble] {} line buckets, {} point buckets, {} features",
        segments.num_buckets(), points.num_buckets(), tile.num_features(),
    );
    tile
}
