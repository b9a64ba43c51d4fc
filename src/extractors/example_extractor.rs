//! Sample code / rendered output extraction
//!
//! Expected layout on a tag page:
//!
//! ```html
//! <h3>サンプルコード</h3>
//! <div class="code-ex docs"><pre><code>...</code></pre></div>
//! <h3>HTML出力イメージ</h3>
//! <div class="code-ex docs"><pre><code>...</code></pre></div>
//! ```

use scraper::{ElementRef, Selector};

use super::ExamplePair;
use crate::config::ExtractorConfig;
use crate::document::{
    following_siblings, has_direct_text, select_first_within, selector, text_content, Document,
};
use crate::error::Result;

const MARKER_HEADING: &str = "h3";
const BLOCK_PATH: &str = r#"div[class="code-ex docs"]"#;
const CODE_PATH: &str = "pre > code";

/// Extract both example blocks using the default marker headings
pub fn extract_code_and_output_from_html(document: &Document) -> ExamplePair {
    extract_code_and_output_with(document, &ExtractorConfig::default())
}

/// Extract both example blocks using the configured marker headings.
///
/// Each field is looked up on its own; a traversal failure blanks both and
/// emits one diagnostic.
pub fn extract_code_and_output_with(document: &Document, config: &ExtractorConfig) -> ExamplePair {
    try_extract_code_and_output(
        document,
        &config.sample_code_heading,
        &config.output_image_heading,
    )
    .unwrap_or_else(|e| {
        tracing::warn!("An error occurred during HTML parsing or processing: {}", e);
        ExamplePair::default()
    })
}

pub fn try_extract_code_and_output(
    document: &Document,
    sample_code_heading: &str,
    output_image_heading: &str,
) -> Result<ExamplePair> {
    let headings = document.select_all(MARKER_HEADING)?;
    let block_sel = selector(BLOCK_PATH)?;
    let code_sel = selector(CODE_PATH)?;

    let block_text = |marker: &str| -> Option<String> {
        let block = headings
            .iter()
            .filter(|h| has_direct_text(**h, marker))
            .find_map(|h| following_siblings(*h).find(|el| block_sel.matches(el)))?;
        code_text(block, &code_sel)
    };

    Ok(ExamplePair {
        sample_code: block_text(sample_code_heading),
        html_output_image: block_text(output_image_heading),
    })
}

/// Untrimmed text of the first `pre > code` inside `block`
fn code_text(block: ElementRef<'_>, code_sel: &Selector) -> Option<String> {
    select_first_within(block, code_sel).map(text_content)
}
