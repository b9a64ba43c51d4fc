//! Navigation sidebar extraction
//!
//! Reads the collapsible sidebar (`li.toggle > details`) and returns one
//! record per distinct page, with relative links resolved and display names
//! taken from the group headers.

use std::collections::HashSet;

use super::{canonical_url, resolve_relative_link, LinkRecord};
use crate::document::{attr, text_content, Document};
use crate::error::Result;

const LINK_PATH: &str = r#"li[class="toggle"] > details > ul > li > a"#;
const HEADING_PATH: &str = r#"li[class="toggle"] > details > summary"#;

/// The sidebar lists introduction pages as anchors without a matching group
/// header, so anchor N pairs with header N - 3. Do not change this value
/// without checking the live sidebar.
const HEADING_OFFSET: usize = 3;

/// Pages whose link contains this keep their own anchor text
const INTRODUCTION_MARKER: &str = "introduction";

/// Extract the deduplicated page list from the sidebar.
///
/// A traversal failure yields an empty list and one diagnostic.
pub fn extract_link_list(document: &Document, base_path: &str) -> Vec<LinkRecord> {
    try_extract_link_list(document, base_path).unwrap_or_else(|e| {
        tracing::warn!("An error occurred while extracting the link list: {}", e);
        vec![]
    })
}

pub fn try_extract_link_list(document: &Document, base_path: &str) -> Result<Vec<LinkRecord>> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut links: Vec<LinkRecord> = vec![];

    for anchor in document.select_all(LINK_PATH)? {
        let Some(href) = attr(anchor, "href") else {
            continue;
        };
        let canonical = canonical_url(href);
        if !seen.insert(canonical.to_string()) {
            continue;
        }
        links.push(LinkRecord {
            name: text_content(anchor),
            link: canonical.to_string(),
        });
    }

    let headings: Vec<String> = document
        .select_all(HEADING_PATH)?
        .into_iter()
        .map(|summary| text_content(summary).trim().to_string())
        .collect();

    for (idx, item) in links.iter_mut().enumerate() {
        item.link = resolve_relative_link(&item.link, base_path);
        if item.link.contains(INTRODUCTION_MARKER) {
            continue;
        }
        if let Some(heading) = idx
            .checked_sub(HEADING_OFFSET)
            .and_then(|pos| headings.get(pos))
        {
            item.name = heading.clone();
        }
    }

    tracing::debug!(count = links.len(), "extracted sidebar links");
    Ok(links)
}
