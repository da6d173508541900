use super::super::Element;
use super::{HandlerResult, Handlers};

/// Hard line break: two trailing spaces. Table cells turn the newline into `<br>`.
pub(super) fn br_handler(_handlers: &dyn Handlers, _element: Element) -> Option<HandlerResult> {
    Some("  \n".into())
}
