//! Configuration module for Markdown conversion
//!
//! This module provides the `ConversionOptions` struct, its builder, and the
//! JSON loading used by the command line tool.

// Sub-modules
pub mod builder;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use builder::ConversionOptionsBuilder;
pub use types::{
    CodeBlockStyle, ConversionOptions, HeadingStyle, ImageRefStyle, ImageStyle,
    LinkReferenceStyle, LinkStyle, TableFormatting,
};
