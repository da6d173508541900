//! Callout preservation.

use scraper::Html;
use scraper::node::Element;

use super::tree_edit::{add_classes, edit_attributes, find_elements, is_attached, replace_with, set_attr};
use super::{CONTENT_CLASSES, DIV_WRAPPER_CLASS, NormalizeReport, PRESERVE_ATTR};
use crate::markdown_converter::htmd::node_util::has_class;

/// `.callout, [data-callout]`
pub(crate) fn is_callout(element: &Element) -> bool {
    has_class(element, "callout") || element.attr("data-callout").is_some()
}

pub(super) fn preserve_callouts(html: &mut Html, report: &mut NormalizeReport) {
    for id in find_elements(html, is_callout) {
        if !is_attached(html, id) {
            continue;
        }

        let marked = edit_attributes(html, id, |attrs| {
            set_attr(attrs, PRESERVE_ATTR, "callout");
            add_classes(attrs, &CONTENT_CLASSES);
        });
        if marked {
            report.callouts_marked += 1;
        }

        let wrapper = html
            .tree
            .get(id)
            .and_then(|node| node.parent())
            .filter(|parent| {
                parent
                    .value()
                    .as_element()
                    .is_some_and(|element| has_class(element, DIV_WRAPPER_CLASS))
            })
            .map(|parent| parent.id());
        if let Some(wrapper) = wrapper
            && replace_with(html, wrapper, id)
        {
            report.wrappers_replaced += 1;
        }
    }
}
