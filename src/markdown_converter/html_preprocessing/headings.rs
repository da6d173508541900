//! Heading cleanup: link-wrapped headings and heading classes.
//!
//! An anchor counts as wrapping a lone heading when everything beside the
//! heading is whitespace-only text. Replacing the anchor drops that
//! whitespace along with it; no visible text is lost.

use scraper::Html;

use super::tree_edit::{edit_attributes, find_elements, is_attached, remove_attr, replace_with};
use super::{NormalizeReport, PRESERVE_ATTR};
use crate::markdown_converter::htmd::node_util::{is_heading_tag, sole_heading_child};

pub(super) fn replace_heading_anchors(html: &mut Html, report: &mut NormalizeReport) {
    for anchor in find_elements(html, |element| element.name() == "a") {
        if !is_attached(html, anchor) {
            continue;
        }
        let heading = html
            .tree
            .get(anchor)
            .and_then(|node| sole_heading_child(&node))
            .map(|node| node.id());

        if let Some(heading) = heading
            && replace_with(html, anchor, heading)
        {
            report.anchors_replaced += 1;
        }
    }
}

// Preserved elements keep the classes rule 1 gave them.
pub(super) fn clear_heading_classes(html: &mut Html, report: &mut NormalizeReport) {
    let headings = find_elements(html, |element| {
        is_heading_tag(element.name())
            && element.attr("class").is_some()
            && element.attr(PRESERVE_ATTR).is_none()
    });

    for heading in headings {
        if edit_attributes(html, heading, |attrs| remove_attr(attrs, "class")) {
            report.headings_cleared += 1;
        }
    }
}
