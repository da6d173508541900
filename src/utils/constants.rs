//! Shared constants for marksnip
//!
//! Default limits and fixed character sets used across the pipeline.

/// Characters that are never allowed in a generated file name.
pub const ILLEGAL_FILENAME_CHARS: &[char] = &['/', '?', '<', '>', '\\', ':', '*', '|', '"'];

/// Maximum input HTML size accepted by the clipper: 10 MB
pub const MAX_HTML_SIZE: usize = 10 * 1024 * 1024;

/// Maximum size of a single fetched image: 10 MB
pub const DEFAULT_MAX_RESOURCE_BYTES: usize = 10 * 1024 * 1024;

/// Timeout for a single resource fetch: 30 seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// File extension used for clipped documents.
pub const MARKDOWN_EXTENSION: &str = "md";

/// File stem used when the filled title sanitizes to nothing.
pub const UNTITLED_FILENAME: &str = "untitled";
