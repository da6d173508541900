//! Fluent builder for `ConversionOptions`
//!
//! Starts from the defaults and validates once in [`ConversionOptionsBuilder::build`].

use super::types::{
    CodeBlockStyle, ConversionOptions, HeadingStyle, ImageRefStyle, ImageStyle,
    LinkReferenceStyle, LinkStyle, TableFormatting,
};
use crate::error::ClipResult;

#[derive(Debug, Clone, Default)]
pub struct ConversionOptionsBuilder {
    options: ConversionOptions,
}

impl ConversionOptionsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn heading_style(mut self, style: HeadingStyle) -> Self {
        self.options.heading_style = style;
        self
    }

    #[must_use]
    pub fn hr(mut self, hr: impl Into<String>) -> Self {
        self.options.hr = hr.into();
        self
    }

    #[must_use]
    pub fn bullet_list_marker(mut self, marker: impl Into<String>) -> Self {
        self.options.bullet_list_marker = marker.into();
        self
    }

    #[must_use]
    pub fn code_block_style(mut self, style: CodeBlockStyle) -> Self {
        self.options.code_block_style = style;
        self
    }

    #[must_use]
    pub fn fence(mut self, fence: impl Into<String>) -> Self {
        self.options.fence = fence.into();
        self
    }

    #[must_use]
    pub fn em_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.options.em_delimiter = delimiter.into();
        self
    }

    #[must_use]
    pub fn strong_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.options.strong_delimiter = delimiter.into();
        self
    }

    #[must_use]
    pub fn link_style(mut self, style: LinkStyle) -> Self {
        self.options.link_style = style;
        self
    }

    #[must_use]
    pub fn link_reference_style(mut self, style: LinkReferenceStyle) -> Self {
        self.options.link_reference_style = style;
        self
    }

    #[must_use]
    pub fn image_style(mut self, style: ImageStyle) -> Self {
        self.options.image_style = style;
        self
    }

    #[must_use]
    pub fn image_ref_style(mut self, style: ImageRefStyle) -> Self {
        self.options.image_ref_style = style;
        self
    }

    /// Set the title template. The filled title also names the output file.
    #[must_use]
    pub fn title(mut self, template: impl Into<String>) -> Self {
        self.options.title = template.into();
        self
    }

    #[must_use]
    pub fn frontmatter(mut self, template: impl Into<String>) -> Self {
        self.options.frontmatter = template.into();
        self
    }

    #[must_use]
    pub fn backmatter(mut self, template: impl Into<String>) -> Self {
        self.options.backmatter = template.into();
        self
    }

    #[must_use]
    pub fn include_template(mut self, include: bool) -> Self {
        self.options.include_template = include;
        self
    }

    #[must_use]
    pub fn disallowed_chars(mut self, chars: impl Into<String>) -> Self {
        self.options.disallowed_chars = chars.into();
        self
    }

    #[must_use]
    pub fn download_images(mut self, download: bool) -> Self {
        self.options.download_images = download;
        self
    }

    #[must_use]
    pub fn image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.image_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn md_clips_folder(mut self, folder: impl Into<String>) -> Self {
        self.options.md_clips_folder = folder.into();
        self
    }

    #[must_use]
    pub fn escape_markdown(mut self, escape: bool) -> Self {
        self.options.escape_markdown = escape;
        self
    }

    #[must_use]
    pub fn table_formatting(mut self, formatting: TableFormatting) -> Self {
        self.options.table_formatting = formatting;
        self
    }

    /// Validate and return the options.
    ///
    /// # Errors
    ///
    /// Returns `ClipError::InvalidOptions` when a token option cannot produce
    /// valid Markdown (see [`ConversionOptions::validate`]).
    pub fn build(self) -> ClipResult<ConversionOptions> {
        self.options.validate()?;
        Ok(self.options)
    }
}
