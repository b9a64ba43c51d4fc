//! Category/tag table extraction
//!
//! Walks the rows of the first `<tbody>` as a two-state machine. A row holding
//! a `<th colspan="2">` opens a category, any later row with at least two
//! `<td>` cells becomes a tag record in that category.

use scraper::ElementRef;

use super::{resolve_relative_link, CategoryTable, TagRecord};
use crate::document::{
    attr, select_first_within, select_within, selector, text_content, Document,
};
use crate::error::{ExtractError, Result};

/// Extract the category-grouped tag rows of the page.
///
/// All or nothing: a missing `<tbody>` or any traversal failure yields an
/// empty table and one diagnostic.
pub fn extract_tags_from_table(document: &Document, base_path: &str) -> CategoryTable {
    try_extract_tags_from_table(document, base_path).unwrap_or_else(|e| {
        tracing::warn!("An error occurred during HTML parsing or processing: {}", e);
        CategoryTable::new()
    })
}

pub fn try_extract_tags_from_table(document: &Document, base_path: &str) -> Result<CategoryTable> {
    let tbody = document
        .select_first("tbody")?
        .ok_or(ExtractError::MissingElement("tbody"))?;

    let row_sel = selector("tbody > tr")?;
    let header_sel = selector(r#"th[colspan="2"]"#)?;
    let cell_sel = selector("td")?;
    let link_sel = selector("a")?;

    let mut result = CategoryTable::new();
    let mut current_category: Option<String> = None;

    // Direct rows only; rows of nested tables belong to their own tbody
    let rows = select_within(tbody, &row_sel)
        .into_iter()
        .filter(|row| row.parent().map(|p| p.id()) == Some(tbody.id()));

    for row in rows {
        if let Some(header) = select_first_within(row, &header_sel) {
            let name = text_content(header).trim().to_string();
            if name.is_empty() {
                current_category = None;
            } else {
                result.reset(&name);
                current_category = Some(name);
            }
            continue;
        }

        let Some(category) = current_category.as_deref() else {
            continue;
        };
        let cells = select_within(row, &cell_sel);
        if cells.len() < 2 {
            continue;
        }
        let record = tag_record(cells[0], cells[1], &link_sel, base_path);
        result.push(category, record);
    }

    tracing::debug!(categories = result.len(), "extracted tag table");
    Ok(result)
}

fn tag_record(
    tag_cell: ElementRef<'_>,
    description_cell: ElementRef<'_>,
    link_sel: &scraper::Selector,
    base_path: &str,
) -> TagRecord {
    let link = select_first_within(description_cell, link_sel)
        .and_then(|a| attr(a, "href"))
        .map(|href| resolve_relative_link(href, base_path));

    TagRecord {
        tag: text_content(tag_cell).trim().to_string(),
        description: text_content(description_cell).trim().to_string(),
        link,
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    const BASE: &str = "https://x/y";

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with a subscriber that records formatted events
    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let captured = Captured::default();
        let sink = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        let value = tracing::subscriber::with_default(subscriber, f);
        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        (value, output)
    }

    fn record(tag: &str, description: &str, link: Option<&str>) -> TagRecord {
        TagRecord {
            tag: tag.to_string(),
            description: description.to_string(),
            link: link.map(String::from),
        }
    }

    #[test]
    fn test_rows_grouped_under_headers() {
        let html = r#"
        <table>
            <tbody>
                <tr><th colspan="2"> Layout </th></tr>
                <tr><td> {% header %} </td><td class="tag-description"><a href="../tags/header.html">Header</a> part</td></tr>
                <tr><td>{% footer %}</td><td>Footer part</td></tr>
                <tr><th colspan="2">Product</th></tr>
                <tr><td>{{ product.name }}</td><td><a href="https://example.com/p.html">Name</a></td></tr>
            </tbody>
        </table>
        "#;
        let doc = Document::parse(html);
        let table = try_extract_tags_from_table(&doc, BASE).unwrap();

        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["Layout", "Product"]);
        assert_eq!(
            table.get("Layout").unwrap(),
            &[
                record(
                    "{% header %}",
                    "Header part",
                    Some("https://x/y/tags/header.html")
                ),
                record("{% footer %}", "Footer part", None),
            ]
        );
        assert_eq!(
            table.get("Product").unwrap(),
            &[record(
                "{{ product.name }}",
                "Name",
                Some("https://example.com/p.html")
            )]
        );
    }

    #[test]
    fn test_blank_header_orphans_following_rows() {
        let html = r#"
        <table><tbody>
            <tr><th colspan="2">A</th></tr>
            <tr><td>a1</td><td>one</td></tr>
            <tr><td>a2</td><td>two</td></tr>
            <tr><th colspan="2">   </th></tr>
            <tr><td>b1</td><td>three</td></tr>
            <tr><td>b2</td><td>four</td></tr>
        </tbody></table>
        "#;
        let doc = Document::parse(html);
        let table = try_extract_tags_from_table(&doc, BASE).unwrap();

        assert_eq!(table.len(), 1);
        let rows = table.get("A").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].tag, "a1");
        assert_eq!(rows[1].tag, "a2");
    }

    #[test]
    fn test_rows_before_first_header_and_short_rows_are_dropped() {
        let html = r#"
        <table><tbody>
            <tr><td>early</td><td>dropped</td></tr>
            <tr><th colspan="2">A</th></tr>
            <tr><td colspan="2">single cell</td></tr>
            <tr><th>plain th</th><td>still one td</td></tr>
            <tr><td>kept</td><td>row</td><td>extra</td></tr>
        </tbody></table>
        "#;
        let doc = Document::parse(html);
        let table = try_extract_tags_from_table(&doc, BASE).unwrap();

        assert_eq!(table.get("A").unwrap(), &[record("kept", "row", None)]);
    }

    #[test]
    fn test_repeated_header_resets_rows() {
        let html = r#"
        <table><tbody>
            <tr><th colspan="2">A</th></tr>
            <tr><td>first</td><td>x</td></tr>
            <tr><th colspan="2">B</th></tr>
            <tr><td>second</td><td>y</td></tr>
            <tr><th colspan="2">A</th></tr>
            <tr><td>third</td><td>z</td></tr>
        </tbody></table>
        "#;
        let doc = Document::parse(html);
        let table = try_extract_tags_from_table(&doc, BASE).unwrap();

        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(table.get("A").unwrap(), &[record("third", "z", None)]);
        assert_eq!(table.get("B").unwrap(), &[record("second", "y", None)]);
    }

    #[test]
    fn test_header_without_rows_is_kept_empty() {
        let html = r#"<table><tbody><tr><th colspan="2">Empty</th></tr></tbody></table>"#;
        let doc = Document::parse(html);
        let table = try_extract_tags_from_table(&doc, BASE).unwrap();
        assert_eq!(table.get("Empty"), Some(&[][..]));
    }

    #[test]
    fn test_only_first_tbody_is_read() {
        let html = r#"
        <table><tbody><tr><th colspan="2">First</th></tr></tbody></table>
        <table><tbody><tr><th colspan="2">Second</th></tr></tbody></table>
        "#;
        let doc = Document::parse(html);
        let table = try_extract_tags_from_table(&doc, BASE).unwrap();
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["First"]);
    }

    #[test]
    fn test_missing_tbody_returns_empty_with_one_diagnostic() {
        let doc = Document::parse("<html><body><p>No table here</p></body></html>");

        assert!(matches!(
            try_extract_tags_from_table(&doc, BASE),
            Err(ExtractError::MissingElement("tbody"))
        ));

        let (table, logs) = with_captured_logs(|| extract_tags_from_table(&doc, BASE));
        assert!(table.is_empty());
        assert_eq!(logs.lines().count(), 1);
        assert!(logs.contains("WARN"));
        assert!(logs.contains("tbody"));
    }

    #[test]
    fn test_serializes_absent_link_as_null() {
        let html = r#"
        <table><tbody>
            <tr><th colspan="2">A</th></tr>
            <tr><td>t</td><td>d</td></tr>
        </tbody></table>
        "#;
        let doc = Document::parse(html);
        let table = extract_tags_from_table(&doc, BASE);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"A":[{"tag":"t","description":"d","link":null}]}"#);
    }
}
