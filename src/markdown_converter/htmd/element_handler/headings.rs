use super::super::Element;
use super::super::text_util::{JoinOnStringIterator, concat_strings};
use super::{HandlerResult, Handlers};
use crate::config::HeadingStyle;

pub(super) fn headings_handler(handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
    let level = element.tag.strip_prefix('h')?.parse::<usize>().ok()?;

    let content = handlers
        .walk_children(&element.tree_node(), element.scope)
        .content;
    // A heading is one line.
    let content = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .join(" ");
    if content.is_empty() {
        return Some("".into());
    }

    let heading = match handlers.options().conversion.heading_style {
        HeadingStyle::Setext if level <= 2 => {
            let underline_char = if level == 1 { "=" } else { "-" };
            let underline = underline_char.repeat(content.chars().count());
            concat_strings!(content, "\n", underline)
        }
        _ => concat_strings!("#".repeat(level), " ", content),
    };

    Some(concat_strings!("\n\n", heading, "\n\n").into())
}
