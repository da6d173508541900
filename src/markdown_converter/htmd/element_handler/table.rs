//! Table formatter.
//!
//! Every `tr` of the table is collected in document order, thead and tbody
//! alike, and written as a pipe-delimited line:
//! ```text
//! | Header1 | Header2 |
//! | --- | --- |
//! | Cell1 | Cell2 |
//! ```
//! The separator always follows the first row, header cells or not.

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

use super::super::node_util::get_node_tag_name;
use super::super::text_util::{JoinOnStringIterator, concat_strings};
use super::super::{Element, Scope};
use super::{HandlerResult, Handlers};
use crate::config::TableFormatting;

const SEPARATOR: &str = "---";
const CENTERED_SEPARATOR: &str = ":---:";

pub(crate) fn table_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    Some(render_table_element(handlers, element.node, element.scope).into())
}

pub(crate) fn render_table_element(
    handlers: &dyn Handlers,
    table: ElementRef<'_>,
    scope: Scope,
) -> String {
    let formatting = handlers.options().conversion.table_formatting;
    let cell_scope = scope.for_table_cell(&formatting);

    let caption = table
        .children()
        .filter_map(ElementRef::wrap)
        .find(|child| child.value().name() == "caption")
        .map(|caption| {
            let content = handlers.walk_children(&caption, scope).content;
            content.split_whitespace().join(" ")
        })
        .filter(|caption| !caption.is_empty());

    let rows: Vec<Vec<String>> = table_rows(table)
        .map(|row| {
            row.children()
                .filter(|cell| matches!(get_node_tag_name(cell), Some("td" | "th")))
                .map(|cell| render_cell(handlers, &cell, cell_scope))
                .collect::<Vec<_>>()
        })
        .filter(|cells| !cells.is_empty())
        .collect();

    let body = format_table(&rows, &formatting);
    tracing::trace!(rows = rows.len(), "formatted table");

    match (caption, body.is_empty()) {
        (None, true) => String::new(),
        (Some(caption), true) => concat_strings!("\n\n", caption, "\n\n"),
        (None, false) => concat_strings!("\n\n", body, "\n\n"),
        (Some(caption), false) => concat_strings!("\n\n", caption, "\n\n", body, "\n\n"),
    }
}

/// Rows owned by `table`; rows of nested tables stay inside their cell.
fn table_rows<'a>(table: ElementRef<'a>) -> impl Iterator<Item = NodeRef<'a, Node>> + use<'a> {
    let table_id = table.id();
    table.descendants().filter(move |node| {
        get_node_tag_name(node) == Some("tr")
            && node
                .ancestors()
                .find(|ancestor| get_node_tag_name(ancestor) == Some("table"))
                .is_some_and(|owner| owner.id() == table_id)
    })
}

/// Cell content on a single line: newlines become `<br>`, pipes are escaped.
fn render_cell(handlers: &dyn Handlers, cell: &NodeRef<'_, Node>, scope: Scope) -> String {
    let content = handlers.walk_children(cell, scope).content;
    content
        .trim()
        .split('\n')
        .map(str::trim_end)
        .join("<br>")
        .replace('|', "\\|")
}

/// Lay out already rendered cells as a Markdown table.
///
/// Rows may differ in length. A short row renders only the cells it has; for
/// column widths a missing cell counts as zero.
#[must_use]
pub fn format_table(rows: &[Vec<String>], formatting: &TableFormatting) -> String {
    let Some(first_row) = rows.first() else {
        return String::new();
    };

    let separator_cell = if formatting.center_text {
        CENTERED_SEPARATOR
    } else {
        SEPARATOR
    };
    let separator_len = first_row.len();

    if !formatting.pretty_print {
        let mut lines = Vec::with_capacity(rows.len() + 1);
        for (index, row) in rows.iter().enumerate() {
            lines.push(table_line(row.iter()));
            if index == 0 {
                lines.push(table_line(std::iter::repeat_n(separator_cell, separator_len)));
            }
        }
        return lines.join("\n");
    }

    let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; column_count];
    for (column, width) in widths.iter_mut().enumerate() {
        if column < separator_len {
            *width = separator_cell.len();
        }
        for row in rows {
            if let Some(cell) = row.get(column) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let pad = |cell: &str, width: usize| -> String {
        let padding = width.saturating_sub(cell.chars().count());
        if formatting.center_text {
            let left = padding / 2;
            concat_strings!(" ".repeat(left), cell, " ".repeat(padding - left))
        } else {
            concat_strings!(cell, " ".repeat(padding))
        }
    };

    let separator_row = widths[..separator_len]
        .iter()
        .map(|&width| {
            if formatting.center_text {
                concat_strings!(":", "-".repeat(width - 2), ":")
            } else {
                "-".repeat(width)
            }
        })
        .collect::<Vec<_>>();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    for (index, row) in rows.iter().enumerate() {
        let cells = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| pad(cell, width));
        lines.push(table_line(cells));
        if index == 0 {
            lines.push(table_line(separator_row.iter()));
        }
    }
    lines.join("\n")
}

fn table_line<I, S>(cells: I) -> String
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    concat_strings!("| ", cells.join(" | "), " |")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect()
    }

    #[test]
    fn plain_layout() {
        let table = format_table(&rows(&[&["A", "B"], &["1", "2"]]), &TableFormatting::default());
        assert_eq!(table, "| A | B |\n| --- | --- |\n| 1 | 2 |");
    }

    #[test]
    fn pretty_centered_layout() {
        let formatting = TableFormatting {
            pretty_print: true,
            center_text: true,
            ..TableFormatting::default()
        };
        let table = format_table(&rows(&[&["Name", "N"], &["x", "100000"]]), &formatting);
        assert_eq!(
            table,
            "| Name  |   N    |\n| :---: | :----: |\n|   x   | 100000 |"
        );
    }

    #[test]
    fn empty_rows_yield_nothing() {
        assert_eq!(format_table(&[], &TableFormatting::default()), "");
    }
}
