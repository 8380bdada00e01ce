// src/render/codeblock.rs
// =============================================================================
// Formats gist content as a fenced Markdown code block.
//
// Output shape (indent level 1, language "python"):
//
//   <blank line>
//       ```python
//       first line
//       second line
//       ```
//   <blank line>
//
// Each indent level is four spaces, applied to the fences and to every body
// line, so the block can sit inside a list item or an admonition. Levels
// above MAX_INDENT are clamped.
//
// Body lines break on "\r\n", a lone '\r', '\n' and the other Unicode line
// separators (vertical tab, form feed, 0x1C-0x1E, NEL, U+2028, U+2029). A
// trailing break does not add an empty line.
// =============================================================================

/// Removes the backslash from `\$`, `` \` ``, `\{` and `\}`.
///
/// Gists written for templated docs escape these so the template engine
/// leaves them alone; the rendered block should show the plain characters.
pub fn unescape(body: &str) -> String {
    body.replace("\\$", "$")
        .replace("\\`", "`")
        .replace("\\{", "{")
        .replace("\\}", "}")
}

/// Deepest indent level `codeblock` will pad to.
pub const MAX_INDENT: usize = 64;

pub fn codeblock(body: &str, language: &str, indent: usize) -> String {
    let pad = " ".repeat(4 * indent.min(MAX_INDENT));
    let body = unescape(body);
    let body_lines = split_lines(&body);

    let mut lines = Vec::with_capacity(body_lines.len() + 4);
    lines.push(String::new());
    lines.push(format!("{pad}```{language}"));
    lines.extend(body_lines.iter().map(|line| format!("{pad}{line}")));
    lines.push(format!("{pad}```"));
    lines.push(String::new());

    lines.join("\n")
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();

        // "\r\n" is one break
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_round_trip() {
        let rendered = codeblock(r"a\$b\`c\{d\}e", "text", 0);
        assert!(rendered.lines().any(|line| line == "a$b`c{d}e"));
    }

    #[test]
    fn test_exact_layout() {
        let rendered = codeblock("print('hi')\nprint('bye')", "python", 0);
        assert_eq!(rendered, "\n```python\nprint('hi')\nprint('bye')\n```\n");
    }

    #[test]
    fn test_indent_level_two() {
        let rendered = codeblock("one\ntwo\nthree", "rust", 2);
        let pad = " ".repeat(8);

        let lines: Vec<&str> = rendered.split('\n').collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], format!("{pad}```rust"));
        assert_eq!(lines[2], format!("{pad}one"));
        assert_eq!(lines[3], format!("{pad}two"));
        assert_eq!(lines[4], format!("{pad}three"));
        assert_eq!(lines[5], format!("{pad}```"));
        assert_eq!(lines[6], "");
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(codeblock("", "text", 1), "\n    ```text\n    ```\n");
    }

    #[test]
    fn test_crlf_and_trailing_newline() {
        let rendered = codeblock("a\r\nb\n", "text", 0);
        assert_eq!(rendered, "\n```text\na\nb\n```\n");
    }

    #[test]
    fn test_lone_carriage_return_splits_lines() {
        assert_eq!(codeblock("a\rb", "text", 0), "\n```text\na\nb\n```\n");
        assert_eq!(
            codeblock("a\rb\r\nc", "text", 1),
            "\n    ```text\n    a\n    b\n    c\n    ```\n"
        );
    }

    #[test]
    fn test_split_lines() {
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("a\n"), vec!["a"]);
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(split_lines("a\r\rb"), vec!["a", "", "b"]);
        assert_eq!(split_lines("a\u{2028}b\x0cc"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("\r\n"), vec![""]);
    }

    #[test]
    fn test_huge_indent_is_clamped() {
        let rendered = codeblock("x", "text", usize::MAX);
        let pad = " ".repeat(4 * MAX_INDENT);
        assert_eq!(rendered, format!("\n{pad}```text\n{pad}x\n{pad}```\n"));
    }

    #[test]
    fn test_other_backslashes_untouched() {
        assert_eq!(unescape(r"C:\path\n \\$"), r"C:\path\n \$");
    }
}
