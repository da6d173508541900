use super::super::Element;
use super::super::text_util::concat_strings;
use super::{HandlerResult, Handlers};

pub(super) fn hr_handler(handlers: &dyn Handlers, _element: Element) -> Option<HandlerResult> {
    Some(concat_strings!("\n\n", handlers.options().conversion.hr, "\n\n").into())
}
