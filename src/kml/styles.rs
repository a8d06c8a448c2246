use roxmltree::{Document, Node};
use std::collections::HashMap;
use tracing::{debug, warn};

use super::{child, child_text, descendant, descendants, is_tag};

/// Appearance of a `Style` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDefinition {
    pub color: Option<String>,
    pub icon_href: Option<String>,
}

/// Document-wide `Style` and `StyleMap` tables.
///
/// Built in one pass over the whole tree, regardless of which folder a style
/// is declared in. Duplicate ids overwrite earlier ones.
#[derive(Debug, Default)]
pub struct StyleSheet {
    styles: HashMap<String, StyleDefinition>,
    /// StyleMap id -> id of the style its "normal" pair points at
    maps: HashMap<String, String>,
}

impl StyleSheet {
    pub fn from_document(doc: &Document) -> Self {
        let root = doc.root();
        let mut sheet = Self::default();

        for style in descendants(root, "Style") {
            let Some(id) = style.attribute("id") else {
                continue;
            };
            if sheet
                .styles
                .insert(id.to_string(), parse_style(style))
                .is_some()
            {
                warn!(id, "duplicate Style id, keeping the last one");
            }
        }

        for map in descendants(root, "StyleMap") {
            let Some(id) = map.attribute("id") else {
                continue;
            };
            if let Some(target) = normal_target(map) {
                if sheet.maps.insert(id.to_string(), target).is_some() {
                    warn!(id, "duplicate StyleMap id, keeping the last one");
                }
            }
        }

        debug!(
            styles = sheet.styles.len(),
            style_maps = sheet.maps.len(),
            "collected style tables"
        );
        sheet
    }

    pub fn style(&self, id: &str) -> Option<&StyleDefinition> {
        self.styles.get(id)
    }

    pub fn map_target(&self, id: &str) -> Option<&str> {
        self.maps.get(id).map(String::as_str)
    }

    /// Resolve a raw `styleUrl` through the StyleMap table to a style.
    ///
    /// `#` is stripped before lookup; a StyleMap id is replaced by its
    /// "normal" target before the Style table is consulted.
    pub fn resolve(&self, raw_ref: &str) -> Option<&StyleDefinition> {
        let mut id = raw_ref.trim_matches('#');
        if let Some(target) = self.map_target(id) {
            id = target;
        }
        self.style(id)
    }

    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    pub fn map_count(&self) -> usize {
        self.maps.len()
    }
}

fn parse_style(style: Node) -> StyleDefinition {
    let Some(icon_style) = descendant(style, "IconStyle") else {
        return StyleDefinition::default();
    };

    StyleDefinition {
        color: child_text(icon_style, "color").map(|c| c.trim().to_string()),
        icon_href: descendant(icon_style, "href")
            .and_then(|n| n.text())
            .map(|h| h.trim().to_string()),
    }
}

/// Target of the first `Pair` keyed "normal", without its `#`
fn normal_target(map: Node) -> Option<String> {
    let pair = map
        .children()
        .filter(|n| is_tag(*n, "Pair"))
        .find(|pair| child_text(*pair, "key") == Some("normal"))?;

    let target = child(pair, "styleUrl")?.text()?.trim().trim_matches('#');
    if target.is_empty() {
        None
    } else {
        Some(target.to_string())
    }
}
