//! Structure inspection for exploring an unfamiliar KML document.

use roxmltree::{Document, Node};
use std::collections::BTreeSet;

use super::{child_text, descendant, descendants, is_tag};

/// One Folder or Document in the outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub depth: usize,
    /// `Folder` or `Document`
    pub kind: String,
    pub name: Option<String>,
    /// Placemarks that are direct children of this container
    pub placemarks: usize,
    /// `styleUrl` of the first such placemark
    pub sample_style: Option<String>,
}

/// Folder/Document tree of a document, pre-order
pub fn outline(doc: &Document) -> Vec<OutlineEntry> {
    let mut entries = Vec::new();
    outline_walk(doc.root_element(), 0, &mut entries);
    entries
}

fn outline_walk(node: Node, depth: usize, out: &mut Vec<OutlineEntry>) {
    for container in node
        .children()
        .filter(|n| is_tag(*n, "Folder") || is_tag(*n, "Document"))
    {
        let mut placemarks = container.children().filter(|n| is_tag(*n, "Placemark"));
        let first = placemarks.next();
        out.push(OutlineEntry {
            depth,
            kind: container.tag_name().name().to_string(),
            name: child_text(container, "name").map(str::to_string),
            placemarks: first.map_or(0, |_| 1 + placemarks.count()),
            sample_style: first
                .and_then(|pm| child_text(pm, "styleUrl"))
                .map(str::to_string),
        });
        outline_walk(container, depth + 1, out);
    }
}

/// A Style or StyleMap found by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleLookup {
    Style {
        id: String,
        /// `None` when the style has no IconStyle at all
        icon_style: Option<IconStyleInfo>,
    },
    StyleMap {
        id: String,
        /// (key, styleUrl) for every pair
        pairs: Vec<(Option<String>, Option<String>)>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconStyleInfo {
    pub color: Option<String>,
    pub scale: Option<String>,
    pub href: Option<String>,
}

/// Find a Style, or failing that a StyleMap, by id. A leading `#` is ignored.
pub fn find_style(doc: &Document, id: &str) -> Option<StyleLookup> {
    let id = id.trim_matches('#');
    let root = doc.root();

    if let Some(style) = descendants(root, "Style").find(|s| s.attribute("id") == Some(id)) {
        let icon_style = descendant(style, "IconStyle").map(|icon| IconStyleInfo {
            color: child_text(icon, "color").map(str::to_string),
            scale: child_text(icon, "scale").map(str::to_string),
            href: descendant(icon, "href")
                .and_then(|n| n.text())
                .map(str::to_string),
        });
        return Some(StyleLookup::Style {
            id: id.to_string(),
            icon_style,
        });
    }

    let map = descendants(root, "StyleMap").find(|m| m.attribute("id") == Some(id))?;
    let pairs = map
        .children()
        .filter(|n| is_tag(*n, "Pair"))
        .map(|pair| {
            (
                child_text(pair, "key").map(str::to_string),
                child_text(pair, "styleUrl").map(str::to_string),
            )
        })
        .collect();
    Some(StyleLookup::StyleMap {
        id: id.to_string(),
        pairs,
    })
}

/// Tags and ExtendedData fields used across all placemarks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldInventory {
    pub placemarks: usize,
    /// Local names of direct Placemark children
    pub tags: BTreeSet<String>,
    /// `Data: <name>` and `SimpleData: <name>` entries
    pub extended_fields: BTreeSet<String>,
}

pub fn field_inventory(doc: &Document) -> FieldInventory {
    let mut inventory = FieldInventory::default();

    for placemark in descendants(doc.root(), "Placemark") {
        inventory.placemarks += 1;
        for tag in placemark.children().filter(|n| n.is_element()) {
            let name = tag.tag_name().name();
            inventory.tags.insert(name.to_string());
            if name == "ExtendedData" {
                collect_extended(tag, &mut inventory.extended_fields);
            }
        }
    }
    inventory
}

fn collect_extended(extended: Node, fields: &mut BTreeSet<String>) {
    for data in extended.children().filter(|n| n.is_element()) {
        match data.tag_name().name() {
            "Data" => {
                fields.insert(format!("Data: {}", data.attribute("name").unwrap_or("")));
            }
            "SchemaData" => {
                for simple in data.children().filter(|n| is_tag(*n, "SimpleData")) {
                    fields.insert(format!(
                        "SimpleData: {}",
                        simple.attribute("name").unwrap_or("")
                    ));
                }
            }
            _ => {}
        }
    }
}

/// First placemark that carries a LineString
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineStringSample {
    pub name: Option<String>,
    pub description: Option<String>,
    /// At most the first 100 characters of the coordinate text
    pub coordinates: Option<String>,
}

pub fn first_linestring(doc: &Document) -> Option<LineStringSample> {
    descendants(doc.root(), "Placemark").find_map(|pm| {
        let line = descendant(pm, "LineString")?;
        Some(LineStringSample {
            name: child_text(pm, "name").map(str::to_string),
            description: child_text(pm, "description").map(str::to_string),
            coordinates: child_text(line, "coordinates").map(|c| c.chars().take(100).collect()),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r##"<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>Survey</name>
    <Style id="s1">
      <IconStyle>
        <color>ff0000ff</color>
        <scale>1.1</scale>
        <Icon><href>images/a.png</href></Icon>
      </IconStyle>
    </Style>
    <Style id="bare"><LineStyle/></Style>
    <StyleMap id="m1">
      <Pair><key>normal</key><styleUrl>#s1</styleUrl></Pair>
      <Pair><key>highlight</key><styleUrl>#s2</styleUrl></Pair>
    </StyleMap>
    <Folder>
      <name>Citrus</name>
      <Placemark>
        <name>a</name>
        <styleUrl>#m1</styleUrl>
        <ExtendedData>
          <Data name="planted"><value>2019</value></Data>
          <SchemaData schemaUrl="#schema">
            <SimpleData name="owner">city</SimpleData>
          </SchemaData>
        </ExtendedData>
        <Point><coordinates>1,2</coordinates></Point>
      </Placemark>
      <Placemark>
        <name>b</name>
        <LineString><coordinates>1,2 3,4</coordinates></LineString>
      </Placemark>
      <Folder/>
    </Folder>
  </Document>
</kml>"##;

    #[test]
    fn test_outline() {
        let doc = Document::parse(DOC).unwrap();
        let entries = outline(&doc);
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].kind, "Document");
        assert_eq!(entries[0].name.as_deref(), Some("Survey"));
        assert_eq!(entries[0].placemarks, 0);

        assert_eq!(entries[1].depth, 1);
        assert_eq!(entries[1].name.as_deref(), Some("Citrus"));
        assert_eq!(entries[1].placemarks, 2);
        assert_eq!(entries[1].sample_style.as_deref(), Some("#m1"));

        assert_eq!(entries[2].depth, 2);
        assert_eq!(entries[2].name, None);
    }

    #[test]
    fn test_find_style() {
        let doc = Document::parse(DOC).unwrap();

        match find_style(&doc, "#s1") {
            Some(StyleLookup::Style { id, icon_style }) => {
                assert_eq!(id, "s1");
                let icon = icon_style.unwrap();
                assert_eq!(icon.color.as_deref(), Some("ff0000ff"));
                assert_eq!(icon.scale.as_deref(), Some("1.1"));
                assert_eq!(icon.href.as_deref(), Some("images/a.png"));
            }
            other => panic!("unexpected lookup: {other:?}"),
        }

        assert_eq!(
            find_style(&doc, "bare"),
            Some(StyleLookup::Style {
                id: "bare".to_string(),
                icon_style: None
            })
        );

        match find_style(&doc, "m1") {
            Some(StyleLookup::StyleMap { pairs, .. }) => {
                assert_eq!(pairs.len(), 2);
                assert_eq!(pairs[0].0.as_deref(), Some("normal"));
                assert_eq!(pairs[1].1.as_deref(), Some("#s2"));
            }
            other => panic!("unexpected lookup: {other:?}"),
        }

        assert!(find_style(&doc, "#nope").is_none());
    }

    #[test]
    fn test_field_inventory() {
        let doc = Document::parse(DOC).unwrap();
        let inventory = field_inventory(&doc);
        assert_eq!(inventory.placemarks, 2);
        let tags: Vec<_> = inventory.tags.iter().map(String::as_str).collect();
        assert_eq!(
            tags,
            ["ExtendedData", "LineString", "Point", "name", "styleUrl"]
        );
        let fields: Vec<_> = inventory.extended_fields.iter().map(String::as_str).collect();
        assert_eq!(fields, ["Data: planted", "SimpleData: owner"]);
    }

    #[test]
    fn test_first_linestring() {
        let doc = Document::parse(DOC).unwrap();
        let sample = first_linestring(&doc).unwrap();
        assert_eq!(sample.name.as_deref(), Some("b"));
        assert_eq!(sample.description, None);
        assert_eq!(sample.coordinates.as_deref(), Some("1,2 3,4"));

        let points_only = Document::parse("<kml><Placemark><Point/></Placemark></kml>").unwrap();
        assert!(first_linestring(&points_only).is_none());
    }
}
