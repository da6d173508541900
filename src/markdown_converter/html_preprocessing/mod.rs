//! HTML preprocessing before content extraction.
//!
//! Readability-style extractors score nodes by class names and link density and
//! routinely throw away callouts, wrapped tables and link-wrapped headings.
//! [`normalize`] rewrites the raw page tree in place so those survive:
//!
//! 1. callouts get a preservation marker plus content classes, and are lifted
//!    out of a generic `el-div` wrapper
//! 2. tables inside an `el-table` wrapper are marked and lifted out of it
//! 3. any `el-div` wrapper still holding a callout, table, `pre` or `code` is unwrapped
//! 4. an anchor whose only child is a heading is replaced by that heading
//! 5. heading class attributes are cleared
//!
//! Rule 3 runs after 1 and 2. None of the rules touch text.

mod callouts;
mod headings;
pub(crate) mod tree_edit;
mod wrappers;

use scraper::Html;

/// Attribute set on elements the extractor must keep.
pub const PRESERVE_ATTR: &str = "data-marksnip-preserve";

/// Classes that extraction heuristics read as main content.
pub const CONTENT_CLASSES: [&str; 3] = ["article", "content", "main"];

/// Generic wrapper class that holds callouts and code blocks.
pub const DIV_WRAPPER_CLASS: &str = "el-div";

/// Wrapper class placed around tables.
pub const TABLE_WRAPPER_CLASS: &str = "el-table";

/// Counts of the edits one [`normalize`] pass made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Callouts that received the preservation marker or content classes
    pub callouts_marked: usize,
    /// Tables that received the preservation marker or content classes
    pub tables_marked: usize,
    /// Wrappers replaced by the callout or table they held
    pub wrappers_replaced: usize,
    /// Wrappers replaced by their children
    pub wrappers_unwrapped: usize,
    /// Anchors replaced by their sole heading
    pub anchors_replaced: usize,
    /// Headings whose class attribute was cleared
    pub headings_cleared: usize,
}

impl NormalizeReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.callouts_marked
            + self.tables_marked
            + self.wrappers_replaced
            + self.wrappers_unwrapped
            + self.anchors_replaced
            + self.headings_cleared
    }

    /// True when the pass left the tree untouched.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.total() == 0
    }
}

/// Normalize `html` in place. Running it again on its own output changes nothing.
pub fn normalize(html: &mut Html) -> NormalizeReport {
    let mut report = NormalizeReport::default();

    callouts::preserve_callouts(html, &mut report);
    wrappers::lift_wrapped_tables(html, &mut report);
    wrappers::unwrap_content_wrappers(html, &mut report);
    headings::replace_heading_anchors(html, &mut report);
    headings::clear_heading_classes(html, &mut report);

    tracing::debug!(
        callouts = report.callouts_marked,
        tables = report.tables_marked,
        replaced = report.wrappers_replaced,
        unwrapped = report.wrappers_unwrapped,
        anchors = report.anchors_replaced,
        headings = report.headings_cleared,
        "Normalized HTML tree"
    );

    report
}
