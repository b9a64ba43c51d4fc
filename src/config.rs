//! Extraction settings shared by the extractors, the catalog and the FFI layer.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_PATH: &str = "https://reference.makeshop.jp/creator-mode/contents";
pub const DEFAULT_SAMPLE_CODE_HEADING: &str = "サンプルコード";
pub const DEFAULT_OUTPUT_IMAGE_HEADING: &str = "HTML出力イメージ";

/// Sidebar start page, relative to the base path
const INDEX_PAGE: &str = "/introduction/about.html";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Prefix for links starting with `../`
    pub base_path: String,
    /// Marker heading text preceding the sample code block
    pub sample_code_heading: String,
    /// Marker heading text preceding the rendered output block
    pub output_image_heading: String,
}

impl ExtractorConfig {
    pub fn with_base_path(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            ..Self::default()
        }
    }

    /// Page holding the navigation sidebar for the whole reference
    pub fn index_url(&self) -> String {
        format!("{}{}", self.base_path, INDEX_PAGE)
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            sample_code_heading: DEFAULT_SAMPLE_CODE_HEADING.to_string(),
            output_image_heading: DEFAULT_OUTPUT_IMAGE_HEADING.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: ExtractorConfig =
            serde_json::from_str(r#"{"base_path": "https://x/y"}"#).unwrap();
        assert_eq!(config.base_path, "https://x/y");
        assert_eq!(config.sample_code_heading, DEFAULT_SAMPLE_CODE_HEADING);
        assert_eq!(config.output_image_heading, DEFAULT_OUTPUT_IMAGE_HEADING);
    }

    #[test]
    fn test_index_url() {
        let config = ExtractorConfig::default();
        assert_eq!(
            config.index_url(),
            "https://reference.makeshop.jp/creator-mode/contents/introduction/about.html"
        );
    }
}
