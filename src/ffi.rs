//! FFI interface for C/C++ interop
//!
//! Provides C-compatible functions for running the reference extractors.
//! All results are passed back as JSON.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use serde::{Deserialize, Serialize};

use crate::config::ExtractorConfig;
use crate::document::Document;
use crate::error::{ExtractError, Result};
use crate::extractors::{
    extract_code_and_output_with, extract_link_list, extract_tags_from_table,
};

/// Which document shape to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionKind {
    Links,
    Tags,
    Example,
}

/// Request passed as JSON to `extract_from_html`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRequest {
    pub kind: ExtractionKind,
    #[serde(default)]
    pub config: ExtractorConfig,
}

/// Result struct returned to the caller
/// Both pointers are owned by Rust and must be freed via free_extraction_result
#[repr(C)]
pub struct ExtractionResultFFI {
    /// JSON-serialized result (null-terminated)
    pub json_ptr: *mut c_char,
    /// Error message if extraction failed (null-terminated), or null on success
    pub error_ptr: *mut c_char,
}

/// Run one extractor over HTML according to the request.
///
/// # Arguments
/// * `html_ptr` - Pointer to HTML content (UTF-8, not necessarily null-terminated)
/// * `html_len` - Length of HTML content in bytes
/// * `request_json` - JSON-serialized ExtractionRequest (null-terminated)
///
/// # Safety
/// - `html_ptr` must point to valid memory of at least `html_len` bytes
/// - `request_json` must be a valid null-terminated C string
/// - Caller must free the result via `free_extraction_result`
#[no_mangle]
pub unsafe extern "C" fn extract_from_html(
    html_ptr: *const c_char,
    html_len: usize,
    request_json: *const c_char,
) -> ExtractionResultFFI {
    let outcome = read_html(html_ptr, html_len).and_then(|html| {
        let request_str = read_c_str(request_json, "request JSON")?
            .ok_or_else(|| ExtractError::InvalidInput("Request JSON is null".to_string()))?;
        let request: ExtractionRequest = serde_json::from_str(request_str).map_err(|e| {
            ExtractError::InvalidInput(format!("Failed to parse request JSON: {}", e))
        })?;
        perform_extraction(&html, &request)
    });

    into_ffi(outcome)
}

/// Extract the sidebar page list (convenience function)
///
/// # Safety
/// Same as extract_from_html; `base_path` may be null to use the default.
#[no_mangle]
pub unsafe extern "C" fn extract_link_list_ffi(
    html_ptr: *const c_char,
    html_len: usize,
    base_path: *const c_char,
) -> ExtractionResultFFI {
    let outcome = read_html(html_ptr, html_len).and_then(|html| {
        let config = config_with_base_path(base_path)?;
        let document = Document::parse(&html);
        to_json(&extract_link_list(&document, &config.base_path))
    });

    into_ffi(outcome)
}

/// Extract the category/tag table (convenience function)
///
/// # Safety
/// Same as extract_from_html; `base_path` may be null to use the default.
#[no_mangle]
pub unsafe extern "C" fn extract_tags_ffi(
    html_ptr: *const c_char,
    html_len: usize,
    base_path: *const c_char,
) -> ExtractionResultFFI {
    let outcome = read_html(html_ptr, html_len).and_then(|html| {
        let config = config_with_base_path(base_path)?;
        let document = Document::parse(&html);
        to_json(&extract_tags_from_table(&document, &config.base_path))
    });

    into_ffi(outcome)
}

/// Extract the sample code / output pair (convenience function)
///
/// # Safety
/// Same as extract_from_html
#[no_mangle]
pub unsafe extern "C" fn extract_example_ffi(
    html_ptr: *const c_char,
    html_len: usize,
) -> ExtractionResultFFI {
    let outcome = read_html(html_ptr, html_len).and_then(|html| {
        let document = Document::parse(&html);
        to_json(&extract_code_and_output_with(&document, &ExtractorConfig::default()))
    });

    into_ffi(outcome)
}

/// Free an ExtractionResultFFI returned by any extraction function
///
/// # Safety
/// - `result` must have been returned by this module
/// - Must only be called once per result
#[no_mangle]
pub unsafe extern "C" fn free_extraction_result(result: ExtractionResultFFI) {
    if !result.json_ptr.is_null() {
        drop(CString::from_raw(result.json_ptr));
    }
    if !result.error_ptr.is_null() {
        drop(CString::from_raw(result.error_ptr));
    }
}

fn perform_extraction(html: &str, request: &ExtractionRequest) -> Result<String> {
    let document = Document::parse(html);
    let config = &request.config;

    match request.kind {
        ExtractionKind::Links => to_json(&extract_link_list(&document, &config.base_path)),
        ExtractionKind::Tags => to_json(&extract_tags_from_table(&document, &config.base_path)),
        ExtractionKind::Example => to_json(&extract_code_and_output_with(&document, config)),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

// Null or empty input is treated as an empty document
unsafe fn read_html(html_ptr: *const c_char, html_len: usize) -> Result<String> {
    if html_ptr.is_null() || html_len == 0 {
        return Ok(String::new());
    }
    let slice = std::slice::from_raw_parts(html_ptr as *const u8, html_len);
    std::str::from_utf8(slice)
        .map(str::to_string)
        .map_err(|_| ExtractError::InvalidInput("Invalid UTF-8 in HTML content".to_string()))
}

unsafe fn read_c_str<'a>(ptr: *const c_char, what: &str) -> Result<Option<&'a str>> {
    if ptr.is_null() {
        return Ok(None);
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(Some)
        .map_err(|_| ExtractError::InvalidInput(format!("Invalid UTF-8 in {}", what)))
}

unsafe fn config_with_base_path(base_path: *const c_char) -> Result<ExtractorConfig> {
    Ok(match read_c_str(base_path, "base path")? {
        Some(base) => ExtractorConfig::with_base_path(base),
        None => ExtractorConfig::default(),
    })
}

fn into_ffi(outcome: Result<String>) -> ExtractionResultFFI {
    match outcome {
        Ok(json) => match CString::new(json) {
            Ok(cstr) => ExtractionResultFFI {
                json_ptr: cstr.into_raw(),
                error_ptr: ptr::null_mut(),
            },
            Err(_) => make_error_result("Result JSON contains null bytes"),
        },
        Err(e) => make_error_result(&e.to_string()),
    }
}

// Helper to create error result
fn make_error_result(msg: &str) -> ExtractionResultFFI {
    let error_cstr = CString::new(msg).unwrap_or_else(|_| CString::from(c"Unknown error"));
    ExtractionResultFFI {
        json_ptr: ptr::null_mut(),
        error_ptr: error_cstr.into_raw(),
    }
}
