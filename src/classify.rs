//! Style classification table.
//!
//! Maps a raw `styleUrl` reference (e.g. `#icon-ci-5`) to the fruit type and
//! legitimacy category it encodes. The table is data, produced by hand for a
//! specific survey, and is loaded from TOML:
//!
//! ```toml
//! [styles."#icon-ci-5"]
//! fruit = "Lemon"
//! legitimacy = "Semi-Legitimate"
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};

/// Table shipped with the crate for the 2022 fruit-tree survey
const BUILTIN_TABLE: &str = include_str!("../data/fruit_trees_2022.toml");

/// Legitimacy category of a planting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Legitimacy {
    Legitimate,
    #[serde(rename = "Semi-Legitimate")]
    SemiLegitimate,
    #[serde(rename = "Not Legitimate")]
    NotLegitimate,
}

impl Legitimacy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Legitimacy::Legitimate => "Legitimate",
            Legitimacy::SemiLegitimate => "Semi-Legitimate",
            Legitimacy::NotLegitimate => "Not Legitimate",
        }
    }
}

impl fmt::Display for Legitimacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification attached to one style reference
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StyleClass {
    pub fruit: String,
    pub legitimacy: Legitimacy,
}

/// Lookup from raw style reference to [`StyleClass`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Classification {
    #[serde(default)]
    styles: HashMap<String, StyleClass>,
}

impl Classification {
    /// The table for the 2022 fruit-tree survey
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_TABLE, "<builtin>")
    }

    /// Load a table from a TOML file
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text, &path.display().to_string())
    }

    /// Parse a table from TOML text; `origin` names it in errors
    pub fn from_toml(text: &str, origin: &str) -> Result<Self> {
        let table: Self = toml::from_str(text).map_err(|source| Error::InvalidConfig {
            path: origin.to_string(),
            source,
        })?;
        debug!(origin, styles = table.len(), "loaded classification table");
        Ok(table)
    }

    /// Exact-match lookup of a raw reference, `#` included
    pub fn lookup(&self, raw_ref: &str) -> Option<&StyleClass> {
        self.styles.get(raw_ref)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_parses() {
        let table = Classification::builtin().unwrap();
        assert_eq!(table.len(), 63);
    }

    #[test]
    fn test_builtin_lookups() {
        let table = Classification::builtin().unwrap();

        let lemon = table.lookup("#icon-ci-5").unwrap();
        assert_eq!(lemon.fruit, "Lemon");
        assert_eq!(lemon.legitimacy, Legitimacy::SemiLegitimate);

        // Judgment calls are carried as data.
        assert_eq!(
            table.lookup("#icon-ci-17").unwrap().legitimacy,
            Legitimacy::SemiLegitimate
        );
        assert_eq!(
            table.lookup("#icon-ci-45").unwrap().legitimacy,
            Legitimacy::NotLegitimate
        );

        let olive = table.lookup("#icon-959-009D57").unwrap();
        assert_eq!(olive.fruit, "Olive/Pomegranate/Fig");
        assert_eq!(olive.legitimacy, Legitimacy::Legitimate);
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = Classification::builtin().unwrap();
        assert!(table.lookup("icon-ci-5").is_none());
        assert!(table.lookup("#icon-ci-5 ").is_none());
        assert!(table.lookup("").is_none());
    }

    #[test]
    fn test_custom_table() {
        let text = r##"
            [styles."#apple"]
            fruit = "Apple"
            legitimacy = "Not Legitimate"
        "##;
        let table = Classification::from_toml(text, "custom.toml").unwrap();
        assert_eq!(table.len(), 1);
        let apple = table.lookup("#apple").unwrap();
        assert_eq!(apple.legitimacy.to_string(), "Not Legitimate");
    }

    #[test]
    fn test_empty_table() {
        let table = Classification::from_toml("", "empty.toml").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_unknown_legitimacy_is_config_error() {
        let text = r##"
            [styles."#x"]
            fruit = "Apple"
            legitimacy = "Maybe"
        "##;
        let err = Classification::from_toml(text, "bad.toml").unwrap_err();
        match err {
            Error::InvalidConfig { path, .. } => assert_eq!(path, "bad.toml"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("table.toml");
        fs::write(
            &path,
            "[styles.\"#fig\"]\nfruit = \"Fig\"\nlegitimacy = \"Legitimate\"\n",
        )
        .unwrap();
        let table = Classification::from_path(&path).unwrap();
        assert_eq!(table.lookup("#fig").unwrap().fruit, "Fig");
    }
}
