//! Clip web articles into Markdown.
//!
//! A page is normalized, reduced to its article by a [`ContentExtractor`],
//! rendered to Markdown and wrapped in templated front and back matter. The
//! resulting [`ClippedDocument`] carries its filename, folder and the images it
//! expects next to it; [`save_clipped_document`] writes all of that to disk.

pub mod config;
pub mod content_extractor;
pub mod content_saver;
pub mod error;
pub mod markdown_converter;
pub mod resource_fetch;
pub mod template;
pub mod utils;

pub use config::{
    CodeBlockStyle, ConversionOptions, ConversionOptionsBuilder, HeadingStyle, ImageRefStyle,
    ImageStyle, LinkReferenceStyle, LinkStyle, TableFormatting,
};
pub use content_extractor::{Article, ContentExtractor, SelectorExtractor};
pub use content_saver::save_clipped_document;
pub use error::{ClipError, ClipResult};
pub use markdown_converter::{
    ClippedDocument, ImageDownload, MarkdownClipper, NormalizeReport, RenderOptions,
    RenderedMarkdown, assemble_document, format_table, normalize, render_html,
};
pub use resource_fetch::{FetchedResource, HttpFetcher, OfflineFetcher, ResourceFetcher};
pub use template::{TemplateContext, fill, fill_at};
pub use utils::{image_filename, resolve_url, sanitize_filename};
