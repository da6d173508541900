//! Loading and validation for `ConversionOptions`

use std::path::Path;

use super::builder::ConversionOptionsBuilder;
use super::types::ConversionOptions;
use crate::error::{ClipError, ClipResult};

impl ConversionOptions {
    #[must_use]
    pub fn builder() -> ConversionOptionsBuilder {
        ConversionOptionsBuilder::new()
    }

    /// Parse options from JSON. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the options fail validation.
    pub fn from_json_str(json: &str) -> ClipResult<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Read and parse an options file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> ClipResult<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        tracing::debug!("Loaded conversion options from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Check that every token option can produce valid Markdown.
    ///
    /// # Errors
    ///
    /// Returns `ClipError::InvalidOptions` naming the first offending option.
    pub fn validate(&self) -> ClipResult<()> {
        if !matches!(self.bullet_list_marker.as_str(), "-" | "*" | "+") {
            return Err(ClipError::InvalidOptions(format!(
                "bulletListMarker must be one of '-', '*', '+', got '{}'",
                self.bullet_list_marker
            )));
        }

        let fence_char = self.fence.chars().next();
        let uniform = fence_char.is_some_and(|c| self.fence.chars().all(|x| x == c));
        if !uniform || !matches!(fence_char, Some('`' | '~')) || self.fence.chars().count() < 3 {
            return Err(ClipError::InvalidOptions(format!(
                "fence must be three or more backticks or tildes, got '{}'",
                self.fence
            )));
        }

        if !matches!(self.em_delimiter.as_str(), "_" | "*") {
            return Err(ClipError::InvalidOptions(format!(
                "emDelimiter must be '_' or '*', got '{}'",
                self.em_delimiter
            )));
        }

        if !matches!(self.strong_delimiter.as_str(), "**" | "__") {
            return Err(ClipError::InvalidOptions(format!(
                "strongDelimiter must be '**' or '__', got '{}'",
                self.strong_delimiter
            )));
        }

        if self.hr.trim().is_empty() {
            return Err(ClipError::InvalidOptions("hr must not be empty".to_string()));
        }

        Ok(())
    }

    /// The character used to build code fences.
    #[must_use]
    pub fn fence_char(&self) -> char {
        self.fence.chars().next().unwrap_or('`')
    }
}
