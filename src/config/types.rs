//! Core configuration types for Markdown conversion
//!
//! `ConversionOptions` is read-only for the duration of one conversion. The serde
//! layout mirrors the persisted options of the browser extension (camelCase keys,
//! every key optional) so an exported options file can be loaded as-is.

use serde::{Deserialize, Serialize};

/// Heading emission style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingStyle {
    /// `# Heading`
    #[default]
    Atx,
    /// Underlined with `=`/`-` for levels 1-2, ATX for deeper levels.
    Setext,
}

/// Code block emission style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeBlockStyle {
    #[default]
    Fenced,
    Indented,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LinkStyle {
    /// `[text](url "title")`
    #[default]
    Inlined,
    /// `[text][n]` plus a reference list after the body
    Referenced,
    /// Link text only
    StripLinks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkReferenceStyle {
    #[default]
    Full,
    Collapsed,
    Shortcut,
}

/// How `<img>` elements are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageStyle {
    /// `![alt](src "title")`
    #[default]
    #[serde(rename = "markdown")]
    Markdown,
    /// Markdown image whose source is an inline `data:` URI
    #[serde(rename = "base64")]
    Base64,
    /// Images are dropped
    #[serde(rename = "noImage")]
    NoImage,
    /// Wiki-style embed `![[src]]`
    #[serde(rename = "obsidian")]
    Obsidian,
    /// Wiki-style embed with any folder prefix removed from the source
    #[serde(rename = "obsidian-nofolder")]
    ObsidianNoFolder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageRefStyle {
    #[default]
    Inlined,
    Referenced,
}

/// Independent table formatting toggles. All four compose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableFormatting {
    /// Reduce links inside cells to their text
    pub strip_links: bool,
    /// Drop emphasis/strong delimiters inside cells
    pub strip_formatting: bool,
    /// Pad cells so the pipes line up
    pub pretty_print: bool,
    /// Center every column (`:---:`)
    pub center_text: bool,
}

/// Configuration options for HTML to Markdown conversion and output templating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionOptions {
    pub heading_style: HeadingStyle,
    /// Horizontal rule token
    pub hr: String,
    pub bullet_list_marker: String,
    pub code_block_style: CodeBlockStyle,
    /// Opening fence for fenced code blocks; its first character picks the fence char
    pub fence: String,
    pub em_delimiter: String,
    pub strong_delimiter: String,
    pub link_style: LinkStyle,
    pub link_reference_style: LinkReferenceStyle,
    pub image_style: ImageStyle,
    pub image_ref_style: ImageRefStyle,

    /// Template for the document title, which also names the output file
    pub title: String,
    pub frontmatter: String,
    pub backmatter: String,
    /// Whether front/back matter are added around the body
    pub include_template: bool,
    /// Characters removed from template values and filenames
    pub disallowed_chars: String,

    /// Rewrite image sources to local filenames and report them for download
    pub download_images: bool,
    /// Template prepended to downloaded image filenames (may contain a folder)
    pub image_prefix: String,
    /// Template for the sub-folder the clip is saved into
    pub md_clips_folder: String,

    /// Backslash-escape Markdown metacharacters found in text
    #[serde(alias = "turndownEscape")]
    pub escape_markdown: bool,

    pub table_formatting: TableFormatting,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            heading_style: HeadingStyle::Atx,
            hr: "---".to_string(),
            bullet_list_marker: "-".to_string(),
            code_block_style: CodeBlockStyle::Fenced,
            fence: "```".to_string(),
            em_delimiter: "_".to_string(),
            strong_delimiter: "**".to_string(),
            link_style: LinkStyle::Inlined,
            link_reference_style: LinkReferenceStyle::Full,
            image_style: ImageStyle::Markdown,
            image_ref_style: ImageRefStyle::Inlined,
            title: "{title}".to_string(),
            frontmatter: String::new(),
            backmatter: String::new(),
            include_template: true,
            disallowed_chars: "[]#^".to_string(),
            download_images: false,
            image_prefix: "image-".to_string(),
            md_clips_folder: String::new(),
            escape_markdown: true,
            table_formatting: TableFormatting::default(),
        }
    }
}
