//! Allow-list sanitization of article HTML before it is stored.
//!
//! Starts from ammonia's default allow-list (paragraphs, emphasis, lists,
//! links, tables, images) and additionally permits a `style` attribute on every
//! element, since the editor expresses colour and alignment as inline styles.
//! Script-capable constructs (`<script>`, `on*` handlers, `javascript:` URLs)
//! are removed.

use ammonia::Builder;

/// Upper bound on re-cleaning passes while looking for a fixed point.
const MAX_PASSES: usize = 4;

fn builder() -> Builder<'static> {
    let mut builder = Builder::default();
    builder.add_generic_attributes(&["style"]);
    builder
}

/// Sanitize untrusted HTML into a safe fragment.
///
/// Never fails: anything that is not well-formed HTML is parsed leniently and
/// stripped to whatever text and allowed markup survive. The result is a fixed
/// point, so `sanitize(&sanitize(x)) == sanitize(x)`.
pub fn sanitize(raw: &str) -> String {
    let builder = builder();
    let mut current = builder.clean(raw).to_string();
    // Reparsing can re-parent misnested markup once more; iterate until stable.
    for _ in 0..MAX_PASSES {
        let next = builder.clean(&current).to_string();
        if next == current {
            break;
        }
        current = next;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_and_keeps_text() {
        let out = sanitize("<script>alert(1)</script>hello");
        assert!(!out.contains("<script"));
        assert!(!out.contains("alert"));
        assert!(out.contains("hello"));
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn plain_text_survives() {
        assert_eq!(sanitize("just words"), "just words");
    }

    #[test]
    fn removes_event_handlers() {
        let out = sanitize(r#"<p onclick="steal()">hi</p>"#);
        assert_eq!(out, "<p>hi</p>");
    }

    #[test]
    fn removes_javascript_urls() {
        let out = sanitize(r#"<a href="javascript:alert(1)">x</a>"#);
        assert!(!out.contains("javascript"));
        assert!(out.contains(">x</a>"));
    }

    #[test]
    fn keeps_inline_style_on_any_element() {
        let out = sanitize(r#"<p style="text-align: center"><span style="color: red">red</span></p>"#);
        assert!(out.contains(r#"<p style="text-align: center">"#));
        assert!(out.contains(r#"<span style="color: red">"#));
    }

    #[test]
    fn keeps_formatting_tags() {
        let html = "<h1>T</h1><p><strong>b</strong><em>i</em><u>u</u><s>s</s></p><ol><li>one</li></ol>";
        assert_eq!(sanitize(html), html);
    }

    #[test]
    fn is_idempotent() {
        let inputs = [
            "",
            "hello",
            "<script>alert(1)</script>hello",
            r#"<a href="https://example.com" rel="nofollow">link</a>"#,
            "<p><div>misnested</div></p>",
            "<table><tr><td>cell</td></tr></table>",
            "<<<>>>&&&",
            "<p style=\"color: blue\" onmouseover=\"x()\">a<b>b<i>c</b>d</i></p>",
            "<img src=x onerror=alert(1)>",
            "<svg><script>alert(1)</script></svg><style>p{}</style>",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn tolerates_non_html_and_binary_like_input() {
        let weird = "\u{0}\u{FFFD}<\u{7f}/>\"'`";
        let _ = sanitize(weird);
    }
}
