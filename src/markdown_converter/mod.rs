//! HTML to Markdown conversion pipeline
//!
//! One conversion runs these stages in order:
//! 1. Normalize the raw page tree so callouts, wrapped tables and link-wrapped
//!    headings survive extraction ([`html_preprocessing`])
//! 2. Extract the article through a [`ContentExtractor`](crate::content_extractor::ContentExtractor)
//! 3. Fetch images for `base64` embedding, if configured
//! 4. Render the article body to Markdown ([`htmd`])
//! 5. Fill the title, folder, image prefix and front/back matter templates
//!
//! # Usage
//!
//! ```rust
//! # use marksnip::{ConversionOptions, MarkdownClipper, OfflineFetcher, SelectorExtractor};
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let html = "<html><head><title>Hello</title></head><body><article><p>World</p></article></body></html>";
//! let clipper = MarkdownClipper::new(SelectorExtractor::new(), OfflineFetcher, ConversionOptions::default());
//! let document = clipper.clip_str(html, "https://example.com/hello").await?;
//! assert_eq!(document.filename, "Hello.md");
//! assert_eq!(document.markdown, "World");
//! # Ok::<(), marksnip::ClipError>(())
//! # }).unwrap();
//! ```

mod clipper;
pub mod html_preprocessing;
pub mod htmd;

pub use clipper::{ClippedDocument, MarkdownClipper, assemble_document};
pub use html_preprocessing::{NormalizeReport, normalize};
pub use htmd::{
    ImageDownload, RenderOptions, RenderedMarkdown, format_table, render, render_document,
    render_html, render_table,
};
