//! Reference catalog assembly
//!
//! Combines the three extractors: sidebar pages, then each page's tag table,
//! then the example pair of every linked tag. Fetching is delegated to a
//! [`DocumentSource`] supplied by the caller.

use serde::Serialize;

use crate::config::ExtractorConfig;
use crate::document::Document;
use crate::error::Result;
use crate::extractors::{
    extract_code_and_output_with, extract_link_list, extract_tags_from_table, ExamplePair,
    OrderedTable, TagRecord,
};

/// Supplies raw markup for a URL
pub trait DocumentSource {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Tag row, with its example blocks once the tag page has been read
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagEntry {
    #[serde(flatten)]
    pub record: TagRecord,
    #[serde(flatten)]
    pub example: Option<ExamplePair>,
}

pub type CatalogTable = OrderedTable<TagEntry>;

/// One sidebar page with its categorized tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEntry {
    pub name: String,
    pub link: String,
    pub tags: CatalogTable,
}

/// Walk the whole reference starting from the sidebar page.
///
/// Index and page fetch failures abort; a failed tag page fetch only leaves
/// that tag without examples.
pub fn build_catalog<S: DocumentSource>(
    source: &S,
    config: &ExtractorConfig,
) -> Result<Vec<PageEntry>> {
    let index = Document::parse(&source.fetch(&config.index_url())?);
    let pages = extract_link_list(&index, &config.base_path);

    let mut out = Vec::with_capacity(pages.len());
    for page in pages {
        tracing::info!("Processing {}...", page.name);
        let page_doc = Document::parse(&source.fetch(&page.link)?);
        let tags = extract_tags_from_table(&page_doc, &config.base_path);
        if !tags.is_empty() {
            tracing::info!("  Found {} tags.", tags.len());
        }

        let tags = tags.map_rows(|record| {
            let example = record
                .link
                .as_deref()
                .and_then(|link| fetch_example(source, link, config));
            TagEntry { record, example }
        });

        out.push(PageEntry {
            name: page.name,
            link: page.link,
            tags,
        });
    }

    Ok(out)
}

fn fetch_example<S: DocumentSource>(
    source: &S,
    link: &str,
    config: &ExtractorConfig,
) -> Option<ExamplePair> {
    match source.fetch(link) {
        Ok(html) => Some(extract_code_and_output_with(&Document::parse(&html), config)),
        Err(e) => {
            tracing::warn!("Error fetching {}: {}", link, e);
            None
        }
    }
}

/// Pretty JSON for the assembled catalog, non-ASCII text kept as is
pub fn catalog_to_json(pages: &[PageEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(pages)?)
}
