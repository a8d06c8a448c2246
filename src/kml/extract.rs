//! Placemark extraction.
//!
//! Walks Document and Folder nodes depth-first in document order and turns
//! every Placemark into one [`PlacemarkRecord`]. A Folder's `name` becomes
//! the layer of everything beneath it; Documents are passed through without
//! touching the layer.

use roxmltree::{Document, Node};
use tracing::debug;

use super::{StyleSheet, child, child_text, clean_text, descendant};
use crate::classify::Classification;
use crate::record::PlacemarkRecord;

/// Layer reported for placemarks outside any named Folder
pub const UNKNOWN_LAYER: &str = "Unknown Layer";

/// Extract one record per placemark, in document order
pub fn extract(doc: &Document, table: &Classification) -> Vec<PlacemarkRecord> {
    let styles = StyleSheet::from_document(doc);
    let mut records = Vec::new();

    for node in doc.root_element().children() {
        walk(node, UNKNOWN_LAYER, &styles, table, &mut records);
    }

    debug!(placemarks = records.len(), "extraction finished");
    records
}

fn walk(
    node: Node,
    layer: &str,
    styles: &StyleSheet,
    table: &Classification,
    out: &mut Vec<PlacemarkRecord>,
) {
    if !node.is_element() {
        return;
    }

    match node.tag_name().name() {
        "Folder" | "Document" => {
            let layer = match child(node, "name") {
                Some(name) if node.tag_name().name() == "Folder" => name.text().unwrap_or(""),
                _ => layer,
            };
            for next in node.children() {
                walk(next, layer, styles, table, out);
            }
        }
        "Placemark" => out.push(placemark(node, layer, styles, table)),
        _ => {}
    }
}

fn placemark(
    node: Node,
    layer: &str,
    styles: &StyleSheet,
    table: &Classification,
) -> PlacemarkRecord {
    let mut record = PlacemarkRecord {
        name: clean_text(child_text(node, "name")),
        description: clean_text(child_text(node, "description")),
        layer: clean_text(Some(layer)),
        ..Default::default()
    };

    if let Some((lon, lat)) = descendant(node, "Point")
        .and_then(|point| child_text(point, "coordinates"))
        .and_then(parse_coordinates)
    {
        record.longitude = lon.to_string();
        record.latitude = lat.to_string();
    }

    let raw_ref = child_text(node, "styleUrl").map(str::trim).unwrap_or("");
    if raw_ref.is_empty() {
        return record;
    }
    record.style_url = raw_ref.to_string();

    // Classification keys on the raw reference, `#` and all; appearance keys
    // on the reference after StyleMap resolution.
    if let Some(class) = table.lookup(raw_ref) {
        record.fruit_type = class.fruit.clone();
        record.legitimacy = class.legitimacy.as_str().to_string();
    }
    if let Some(style) = styles.resolve(raw_ref) {
        record.color = style.color.clone().unwrap_or_default();
        record.icon = style.icon_href.clone().unwrap_or_default();
    }

    record
}

/// Split `lon,lat[,alt]` into its first two components
fn parse_coordinates(text: &str) -> Option<(&str, &str)> {
    let mut parts = text.trim().split(',');
    match (parts.next(), parts.next()) {
        (Some(lon), Some(lat)) => Some((lon.trim(), lat.trim())),
        _ => None,
    }
}
