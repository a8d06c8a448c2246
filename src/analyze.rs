//! Per-style summary of converted records.
//!
//! Groups records by their raw `style_url` and reports how many records use
//! each style, which layer they most often sit in, and how their free-text
//! descriptions describe legitimacy.

use std::collections::HashMap;
use std::fmt;

use crate::record::PlacemarkRecord;

/// Description phrase for semi-legitimate plantings
pub const SEMI_KEYWORD: &str = "חצי לגיטימי";
/// Description phrase for plantings that are not legitimate
pub const NOT_KEYWORD: &str = "לא לגיטימי";
/// Bare "legitimate"; also a substring of both phrases above
pub const YES_KEYWORD: &str = "לגיטימי";

/// Legitimacy keyword counts for one style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordTally {
    pub yes: usize,
    pub semi: usize,
    pub no: usize,
}

impl KeywordTally {
    /// Count one description under at most one keyword.
    ///
    /// The two phrases contain the bare keyword, so they are checked first.
    pub fn add(&mut self, description: &str) {
        if description.contains(SEMI_KEYWORD) {
            self.semi += 1;
        } else if description.contains(NOT_KEYWORD) {
            self.no += 1;
        } else if description.contains(YES_KEYWORD) {
            self.yes += 1;
        }
    }
}

impl fmt::Display for KeywordTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Yes:{}, Semi:{}, No:{}", self.yes, self.semi, self.no)
    }
}

/// Summary of all records sharing one raw style reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSummary {
    pub style_url: String,
    pub count: usize,
    /// Most frequent layer; ties go to the layer seen first
    pub common_layer: String,
    pub keywords: KeywordTally,
}

#[derive(Default)]
struct Group<'a> {
    count: usize,
    /// (layer, count) in order of first appearance
    layers: Vec<(&'a str, usize)>,
    keywords: KeywordTally,
}

impl<'a> Group<'a> {
    fn add(&mut self, record: &'a PlacemarkRecord) {
        self.count += 1;
        match self.layers.iter_mut().find(|entry| entry.0 == record.layer) {
            Some((_, n)) => *n += 1,
            None => self.layers.push((record.layer.as_str(), 1)),
        }
        self.keywords.add(&record.description);
    }

    fn common_layer(&self) -> &'a str {
        let mut best: Option<(&'a str, usize)> = None;
        for &(layer, n) in &self.layers {
            if best.is_none_or(|(_, top)| n > top) {
                best = Some((layer, n));
            }
        }
        best.map(|(layer, _)| layer).unwrap_or("None")
    }
}

/// Summarize records by style, in order of each style's first appearance
pub fn summarize(records: &[PlacemarkRecord]) -> Vec<StyleSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Group> = HashMap::new();

    for record in records {
        let key = record.style_url.as_str();
        let group = groups.entry(key).or_insert_with(|| {
            order.push(key);
            Group::default()
        });
        group.add(record);
    }

    order
        .into_iter()
        .filter_map(|key| {
            let group = groups.get(key)?;
            Some(StyleSummary {
                style_url: key.to_string(),
                count: group.count,
                common_layer: group.common_layer().to_string(),
                keywords: group.keywords,
            })
        })
        .collect()
}

/// Render summaries as the fixed-width report printed by `kmz2csv analyze`
pub fn render(summaries: &[StyleSummary]) -> String {
    let mut out = format!(
        "{:<20} | {:<5} | {:<30} | Legitimacy Keywords\n",
        "Style", "Count", "Common Layer"
    );
    out.push_str(&"-".repeat(100));
    out.push('\n');

    for s in summaries {
        let layer: String = s.common_layer.chars().take(30).collect();
        out.push_str(&format!(
            "{:<20} | {:<5} | {:<30} | {}\n",
            s.style_url, s.count, layer, s.keywords
        ));
    }
    out
}
