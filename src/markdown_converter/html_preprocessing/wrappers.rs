//! Table wrapper lifting and content wrapper unwrapping.

use scraper::Html;
use scraper::node::Element;

use super::callouts::is_callout;
use super::tree_edit::{
    add_classes, edit_attributes, find_descendant, find_elements, is_attached, replace_with,
    set_attr, unwrap,
};
use super::{CONTENT_CLASSES, DIV_WRAPPER_CLASS, NormalizeReport, PRESERVE_ATTR, TABLE_WRAPPER_CLASS};
use crate::markdown_converter::htmd::node_util::has_class;

fn is_table(element: &Element) -> bool {
    element.name() == "table"
}

// `.callout, [data-callout], table, pre, code`
fn is_protected_content(element: &Element) -> bool {
    is_callout(element) || matches!(element.name(), "table" | "pre" | "code")
}

pub(super) fn lift_wrapped_tables(html: &mut Html, report: &mut NormalizeReport) {
    let wrappers = find_elements(html, |element| has_class(element, TABLE_WRAPPER_CLASS));

    for wrapper in wrappers {
        if !is_attached(html, wrapper) {
            continue;
        }
        let Some(table) = find_descendant(html, wrapper, is_table) else {
            continue;
        };

        let marked = edit_attributes(html, table, |attrs| {
            set_attr(attrs, PRESERVE_ATTR, "table");
            add_classes(attrs, &CONTENT_CLASSES);
        });
        if marked {
            report.tables_marked += 1;
        }
        if replace_with(html, wrapper, table) {
            report.wrappers_replaced += 1;
        }
    }
}

pub(super) fn unwrap_content_wrappers(html: &mut Html, report: &mut NormalizeReport) {
    let wrappers = find_elements(html, |element| has_class(element, DIV_WRAPPER_CLASS));

    for wrapper in wrappers {
        if !is_attached(html, wrapper)
            || find_descendant(html, wrapper, is_protected_content).is_none()
        {
            continue;
        }
        if unwrap(html, wrapper) {
            report.wrappers_unwrapped += 1;
        }
    }
}
