//! KML document loading and the tree helpers shared by the extractor and
//! the inspection commands.
//!
//! Tags are always matched by local name, so a document that declares the
//! `http://www.opengis.net/kml/2.2` default namespace behaves exactly like
//! one that declares none.

mod extract;
pub mod inspect;
mod styles;

pub use extract::{UNKNOWN_LAYER, extract};
pub use styles::{StyleDefinition, StyleSheet};

use roxmltree::{Document, Node};
use tracing::info;

use crate::error::{Error, Result};
use crate::io::ReadAt;
use crate::zip::KmzArchive;

/// Left-to-right mark sprinkled through right-to-left survey text
const LRM: char = '\u{200E}';

/// The text of a KML document and the archive entry it came from
#[derive(Debug, Clone)]
pub struct KmlSource {
    pub entry: String,
    pub text: String,
}

impl KmlSource {
    /// Read the first `.kml` entry of an archive
    pub fn from_archive<R: ReadAt>(archive: &KmzArchive<R>) -> Result<Self> {
        let entry = archive.find_document()?;
        info!("Processing KML file: {}", entry.file_name);
        let bytes = archive.read(entry)?;
        Self::from_bytes(&entry.file_name, bytes)
    }

    pub fn from_bytes(entry: &str, bytes: Vec<u8>) -> Result<Self> {
        let mut text = String::from_utf8(bytes).map_err(|e| Error::InvalidEncoding {
            entry: entry.to_string(),
            source: e.utf8_error(),
        })?;
        if text.starts_with('\u{FEFF}') {
            text.replace_range(..'\u{FEFF}'.len_utf8(), "");
        }
        Ok(Self {
            entry: entry.to_string(),
            text,
        })
    }

    /// Parse the text into a read-only XML tree
    pub fn parse(&self) -> Result<Document<'_>> {
        Document::parse(&self.text).map_err(|source| Error::MalformedDocument {
            entry: self.entry.clone(),
            source,
        })
    }
}

/// Whether `node` is an element with local name `name`
pub(crate) fn is_tag(node: Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

/// First direct child element named `name`
pub(crate) fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_tag(*n, name))
}

/// First element named `name` anywhere beneath `node`
pub(crate) fn descendant<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.descendants().skip(1).find(|n| is_tag(*n, name))
}

/// Every element named `name` anywhere beneath `node`, in document order
pub(crate) fn descendants<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.descendants().skip(1).filter(move |n| is_tag(*n, name))
}

/// Text of the first direct child named `name`
pub(crate) fn child_text<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    child(node, name).and_then(|n| n.text())
}

/// Drop left-to-right marks and surrounding whitespace
pub fn clean_text(text: Option<&str>) -> String {
    match text {
        Some(text) => text.replace(LRM, "").trim().to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text(None), "");
        assert_eq!(clean_text(Some("  \u{200E}עץ לימון\u{200E} \n")), "עץ לימון");
        assert_eq!(clean_text(Some("a\u{200E}b")), "ab");
    }

    #[test]
    fn test_tag_matching_ignores_namespace() {
        let text = r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Document><name>x</name></Document></kml>"#;
        let doc = Document::parse(text).unwrap();
        let document = child(doc.root_element(), "Document").unwrap();
        assert_eq!(child_text(document, "name"), Some("x"));
        assert!(descendant(doc.root_element(), "name").is_some());
        assert!(descendant(document, "Document").is_none());
    }

    #[test]
    fn test_source_strips_bom() {
        let bytes = "\u{FEFF}<kml/>".as_bytes().to_vec();
        let source = KmlSource::from_bytes("doc.kml", bytes).unwrap();
        assert_eq!(source.text, "<kml/>");
        assert!(source.parse().is_ok());
    }

    #[test]
    fn test_source_rejects_bad_utf8() {
        let err = KmlSource::from_bytes("doc.kml", vec![b'<', 0xFF, b'>']).unwrap_err();
        assert!(matches!(err, Error::InvalidEncoding { .. }));
    }

    #[test]
    fn test_malformed_xml() {
        let source = KmlSource::from_bytes("doc.kml", b"<kml><Document></kml>".to_vec()).unwrap();
        match source.parse() {
            Err(Error::MalformedDocument { entry, .. }) => assert_eq!(entry, "doc.kml"),
            Err(other) => panic!("expected MalformedDocument, got {other}"),
            Ok(_) => panic!("expected MalformedDocument"),
        }
    }
}
