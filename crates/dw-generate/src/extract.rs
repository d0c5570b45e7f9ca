//! Splits a markdown reply into its single code block and the prose around it.

use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::error::{GenerationError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub code: String,
    pub description: String,
}

/// Extracts the only code block (fenced or indented) from `markdown`.
///
/// Zero or several blocks are rejected since there is no way to tell which
/// one is authoritative.
pub fn extract_code_block(markdown: &str) -> Result<Extracted> {
    let mut blocks = Vec::new();
    let mut block_ranges = Vec::new();
    let mut current: Option<String> = None;

    for (event, range) in Parser::new_ext(markdown, Options::empty()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                current = Some(String::new());
                block_ranges.push(range);
            }
            Event::Text(text) => {
                if let Some(code) = current.as_mut() {
                    code.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(code) = current.take() {
                    blocks.push(code.trim().to_string());
                }
            }
            _ => {}
        }
    }

    if blocks.len() != 1 {
        return Err(GenerationError::AmbiguousOutput {
            found: blocks.len(),
        });
    }

    Ok(Extracted {
        code: blocks.remove(0),
        description: strip_ranges(markdown, &block_ranges),
    })
}

fn strip_ranges(text: &str, ranges: &[Range<usize>]) -> String {
    let mut kept = String::with_capacity(text.len());
    let mut cursor = 0;
    for range in ranges {
        if range.start > cursor {
            kept.push_str(&text[cursor..range.start]);
        }
        cursor = cursor.max(range.end);
    }
    if cursor < text.len() {
        kept.push_str(&text[cursor..]);
    }

    let mut description = String::with_capacity(kept.len());
    let mut newlines = 0;
    for ch in kept.trim().chars() {
        if ch == '\n' {
            newlines += 1;
            if newlines > 2 {
                continue;
            }
        } else {
            newlines = 0;
        }
        description.push(ch);
    }
    description
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_single_fenced_block() {
        let reply = "Here is the component.\n\n```jsx\nexport default function Preview() {\n  return <p>hi</p>;\n}\n```\n\nIt renders a greeting.\n";
        let extracted = extract_code_block(reply).unwrap();

        assert_eq!(
            extracted.code,
            "export default function Preview() {\n  return <p>hi</p>;\n}"
        );
        assert_eq!(
            extracted.description,
            "Here is the component.\n\nIt renders a greeting."
        );
    }

    #[test]
    fn rejects_missing_block() {
        let err = extract_code_block("No code here, sorry.").unwrap_err();
        assert!(matches!(err, GenerationError::AmbiguousOutput { found: 0 }));
    }

    #[test]
    fn rejects_multiple_blocks() {
        let reply = "```js\nconst a = 1;\n```\n\nand\n\n```js\nconst b = 2;\n```\n";
        let err = extract_code_block(reply).unwrap_err();
        assert!(matches!(err, GenerationError::AmbiguousOutput { found: 2 }));
    }

    #[test]
    fn accepts_reply_that_is_only_code() {
        let reply = "```tsx\n<div />\n```";
        let extracted = extract_code_block(reply).unwrap();

        assert_eq!(extracted.code, "<div />");
        assert_eq!(extracted.description, "");
    }
}
