const FENCE: &str = "```";

/// Turn raw model output into file-ready content.
///
/// Trims surrounding whitespace and strips an enclosing markdown fence
/// (an opening ```` ```lang ```` line and/or a closing ```` ``` ````). Only the
/// outer boundary is touched: fenced blocks inside the body keep their
/// markers. Stripping repeats until the text is stable, so the result is
/// always a fixed point.
pub fn sanitize(raw: &str) -> String {
    let mut text = raw.trim();

    loop {
        let stripped = strip_wrapper(text).trim();
        if stripped.len() == text.len() {
            break;
        }
        text = stripped;
    }

    text.to_string()
}

/// One pass: an opening fence and the closing fence it pairs with.
fn strip_wrapper(text: &str) -> &str {
    match strip_opening_fence(text) {
        Some(body) => strip_closing_fence(body, true),
        None => strip_closing_fence(text, false),
    }
}

/// Remove a leading ```` ``` ```` plus an optional language tag and its newline.
fn strip_opening_fence(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(FENCE)?;

    match rest.split_once('\n') {
        Some((tag, body)) if is_language_tag(tag) => Some(body),
        None if is_language_tag(rest) => Some(""),
        _ => None,
    }
}

/// Remove a trailing ```` ``` ````. Without an opening fence in the same
/// pass, a trailing fence line that balances the body closes an interior
/// block and is kept.
fn strip_closing_fence(text: &str, opened: bool) -> &str {
    let Some(body) = text.strip_suffix(FENCE) else {
        return text;
    };

    let last_line = text.rsplit('\n').next().unwrap_or(text);
    if !opened && is_fence_line(last_line) && fence_lines(text) % 2 == 0 {
        return text;
    }

    body
}

fn fence_lines(text: &str) -> usize {
    text.lines().filter(|line| is_fence_line(line)).count()
}

/// A line that opens or closes a fenced block. Inline spans such as
/// `` ```x``` `` do not count.
fn is_fence_line(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with(FENCE) && !line.trim_start_matches('`').contains('`')
}

/// Info strings such as `python`, `c++`, `objective-c` or none at all.
fn is_language_tag(tag: &str) -> bool {
    tag.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '#' | '.' | '_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_passes_through() {
        let code = "def add(a, b):\n    return a + b";
        assert_eq!(sanitize(code), code);
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(sanitize("\n\n  SELECT 1;  \n"), "SELECT 1;");
    }

    #[test]
    fn test_strips_tagged_fence() {
        let response = "```python\ndef f(n): ...\n```";
        assert_eq!(sanitize(response), "def f(n): ...");
    }

    #[test]
    fn test_strips_plain_fence() {
        let response = "```\n{\"a\": 1}\n```";
        assert_eq!(sanitize(response), "{\"a\": 1}");
    }

    #[test]
    fn test_strips_fence_with_symbolic_tag() {
        let response = "```c++\nint main() {}\n```";
        assert_eq!(sanitize(response), "int main() {}");
    }

    #[test]
    fn test_strips_closing_fence_preceded_by_whitespace() {
        let response = "```bash\necho hi\n   ```  \n";
        assert_eq!(sanitize(response), "echo hi");
    }

    #[test]
    fn test_strips_opening_fence_only() {
        assert_eq!(sanitize("```css\nbody { margin: 0; }"), "body { margin: 0; }");
    }

    #[test]
    fn test_keeps_interior_fences() {
        let body = "# Usage\n\n```js\nimport lib from 'lib';\n```\n\nThat's it.";
        let wrapped = format!("```markdown\n{body}\n```");
        assert_eq!(sanitize(&wrapped), body);
    }

    #[test]
    fn test_keeps_fence_that_is_not_a_wrapper() {
        // Opening line carries code, not a language tag.
        let text = "```not a tag\nbody";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn test_keeps_trailing_interior_block() {
        let text = "Example:\n```\ncode\n```";
        assert_eq!(sanitize(text), text);
    }

    #[test]
    fn test_strips_leading_marker_of_unterminated_wrapper() {
        let text = "```js\nx()\n```\n\nMore prose.";
        assert_eq!(sanitize(text), "x()\n```\n\nMore prose.");
    }

    #[test]
    fn test_strips_closing_fence_glued_to_code() {
        assert_eq!(sanitize("```python\nprint(1)```"), "print(1)");
    }

    #[test]
    fn test_unwraps_nested_wrappers() {
        assert_eq!(sanitize("```\n```\nnested\n```\n```"), "nested");
    }

    #[test]
    fn test_wrapped_body_ending_in_block_keeps_markers() {
        let body = "# Title\n\n```sh\nls\n```";
        assert_eq!(sanitize(&format!("```md\n{body}\n```")), body);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   \n\t "), "");
        assert_eq!(sanitize("```"), "");
        assert_eq!(sanitize("```python\n```"), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "plain",
            "```python\nprint(1)\n```",
            "```\n```\nnested\n```\n```",
            "Example:\n```\ncode\n```",
            "``````",
            "```python print(1)```",
            "```js\nx()\n```\n\nMore prose.",
            "```markdown\nOpen a block with:\n```\nthen write code\n```",
            "  ```md\n# Title\n\n```sh\nls\n```\n```  ",
        ];

        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_wrapper_stripping_equals_trimmed_body() {
        let bodies = [
            "x = 1",
            "  indented\nlines  ",
            "",
            "a\n\n```inner```\nb",
            "Open a block with:\n```\nthen write code",
        ];
        for body in bodies {
            let wrapped = format!("```python\n{body}\n```");
            assert_eq!(sanitize(&wrapped), body.trim(), "body {body:?}");
        }
    }
}
