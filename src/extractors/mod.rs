//! Reference document extractors
//!
//! Each module handles one document shape: the navigation sidebar, the
//! category/tag table and the labeled pair of example blocks.

mod example_extractor;
mod link_list_extractor;
mod tag_table_extractor;

pub use example_extractor::*;
pub use link_list_extractor::*;
pub use tag_table_extractor::*;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

/// Sidebar page link
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct LinkRecord {
    pub name: String,
    pub link: String,
}

/// Single row of a category/tag table
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct TagRecord {
    pub tag: String,
    pub description: String,
    pub link: Option<String>,
}

/// Sample code and rendered output shown on a tag page
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct ExamplePair {
    pub sample_code: Option<String>,
    pub html_output_image: Option<String>,
}

/// Insertion-ordered mapping from category name to its rows
///
/// Serializes as a JSON object whose keys keep header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedTable<V> {
    entries: Vec<(String, Vec<V>)>,
}

pub type CategoryTable = OrderedTable<TagRecord>;

impl<V> OrderedTable<V> {
    pub fn new() -> Self {
        Self { entries: vec![] }
    }

    /// Start (or restart) a category with an empty row list.
    /// A repeated name keeps its original position but loses earlier rows.
    pub fn reset(&mut self, name: &str) {
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some((_, rows)) => rows.clear(),
            None => self.entries.push((name.to_string(), vec![])),
        }
    }

    /// Append a row to an existing category; unknown names are ignored
    pub fn push(&mut self, name: &str, value: V) {
        if let Some((_, rows)) = self.entries.iter_mut().find(|(key, _)| key == name) {
            rows.push(value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&[V]> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, rows)| rows.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[V])> {
        self.entries
            .iter()
            .map(|(key, rows)| (key.as_str(), rows.as_slice()))
    }

    /// Rebuild the table with every row converted, keeping category order
    pub fn map_rows<W>(self, mut f: impl FnMut(V) -> W) -> OrderedTable<W> {
        OrderedTable {
            entries: self
                .entries
                .into_iter()
                .map(|(key, rows)| (key, rows.into_iter().map(&mut f).collect()))
                .collect(),
        }
    }
}

impl<V> Default for OrderedTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Serialize> Serialize for OrderedTable<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, rows) in &self.entries {
            map.serialize_entry(key, rows)?;
        }
        map.end()
    }
}

/// Marker for links relative to the reference root
const PARENT_DIR: &str = "../";

/// Strip the `#fragment` part of a URL
pub fn canonical_url(link: &str) -> &str {
    match link.split_once('#') {
        Some((base, _)) => base,
        None => link,
    }
}

/// Rewrite `../x` links onto `base_path`.
///
/// Every leading `.` is dropped, so `../a` becomes `{base_path}/a` and
/// `../../a` becomes `{base_path}/../a`. Other links pass through.
pub fn resolve_relative_link(link: &str, base_path: &str) -> String {
    if link.starts_with(PARENT_DIR) {
        format!("{}{}", base_path, link.trim_start_matches('.'))
    } else {
        link.to_string()
    }
}
