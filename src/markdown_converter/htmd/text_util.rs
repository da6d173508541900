//! Small string helpers shared by the element handlers.

/// Concatenate string-like values with a single allocation.
macro_rules! concat_strings {
    ($($value:expr),+ $(,)?) => {
        [$(AsRef::<str>::as_ref(&$value)),+].concat()
    };
}
pub(crate) use concat_strings;

pub(crate) trait JoinOnStringIterator {
    fn join(self, separator: &str) -> String;
}

impl<I, S> JoinOnStringIterator for I
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    fn join(self, separator: &str) -> String {
        let mut result = String::new();
        for (idx, item) in self.enumerate() {
            if idx > 0 {
                result.push_str(separator);
            }
            result.push_str(item.as_ref());
        }
        result
    }
}

/// Splits leading/trailing whitespace off so emphasis and link markers hug the text.
pub(crate) trait StripWhitespace {
    fn strip_leading_whitespace(&self) -> (&str, Option<&str>);
    fn strip_trailing_whitespace(&self) -> (&str, Option<&str>);
}

impl StripWhitespace for str {
    fn strip_leading_whitespace(&self) -> (&str, Option<&str>) {
        let trimmed = self.trim_start();
        let stripped = &self[..self.len() - trimmed.len()];
        (trimmed, (!stripped.is_empty()).then_some(stripped))
    }

    fn strip_trailing_whitespace(&self) -> (&str, Option<&str>) {
        let trimmed = self.trim_end();
        let stripped = &self[trimmed.len()..];
        (trimmed, (!stripped.is_empty()).then_some(stripped))
    }
}

/// Collapse runs of HTML whitespace into a single space.
pub(crate) fn compress_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for c in text.chars() {
        if matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0c') {
            if !in_whitespace {
                result.push(' ');
            }
            in_whitespace = true;
        } else {
            result.push(c);
            in_whitespace = false;
        }
    }
    result
}

/// `# `, `## ` ... `###### ` (or a bare run of 1-6 `#`).
pub(crate) fn is_markdown_atx_heading(text: &str) -> bool {
    let hashes = text.bytes().take_while(|&b| b == b'#').count();
    (1..=6).contains(&hashes) && matches!(text.as_bytes().get(hashes), None | Some(b' '))
}

/// Byte index of the dot in a leading `123. ` ordered-list marker.
pub(crate) fn index_of_markdown_ordered_item_dot(text: &str) -> Option<usize> {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || text.as_bytes().get(digits) != Some(&b'.') {
        return None;
    }
    matches!(text.as_bytes().get(digits + 1), None | Some(b' ')).then_some(digits)
}

/// Indent every non-empty line after the first by `width` spaces.
pub(crate) fn indent_continuation_lines(text: &str, width: usize) -> String {
    let indent = " ".repeat(width);
    text.lines()
        .enumerate()
        .map(|(idx, line)| {
            if idx == 0 || line.is_empty() {
                line.to_string()
            } else {
                concat_strings!(indent, line)
            }
        })
        .join("\n")
}

/// Longest run of `needle` in `text`.
pub(crate) fn longest_run(text: &str, needle: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == needle {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
