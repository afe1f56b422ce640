//! Best-effort markup and text sanitizing.
//!
//! Both functions are total over string input and never fail; empty input
//! yields an empty string.
//!
//! **Not a security boundary.** [`sanitize_html`] is a short denylist of pattern
//! substitutions over raw text. It does not parse markup, so nested, split, or
//! malformed tags can slip through. Do not feed it untrusted input and expect
//! safe output; render untrusted text through [`sanitize_text`] (or an
//! auto-escaping template) instead.

use regex::Regex;
use std::sync::LazyLock;

/// `<script ...> ... </script>`, shortest match, across lines, any case.
/// Tag names and the boundary after `script` are ASCII-only, so `<scriptя>`
/// still counts and `<ſcript>` does not.
static SCRIPT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(?-u:<script\b).*?(?-u:</script>)").expect("static pattern compiles")
});

static JAVASCRIPT_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u)javascript:").expect("static pattern compiles"));

/// Event-handler attribute names: `onclick=`, `onload=`, ...
/// Case folding here and in the patterns above is ASCII-only (no `ſ` or
/// Kelvin sign).
static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u)on[a-z0-9_]+=").expect("static pattern compiles"));

/// Strip script blocks, `javascript:` schemes, and `on*=` handlers from markup.
///
/// Applied in order, each as a single pass:
///
/// 1. NUL bytes removed
/// 2. `<script>...</script>` blocks removed
/// 3. `javascript:` → `removed:`
/// 4. `on<word>=` → `data-removed=`
///
/// Step 4 matches anywhere in the text, including inside longer words
/// (`content=` becomes `cdata-removed=`).
pub fn sanitize_html(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    let content = content.replace('\0', "");
    let content = SCRIPT_BLOCK.replace_all(&content, "");
    let content = JAVASCRIPT_SCHEME.replace_all(&content, "removed:");
    EVENT_HANDLER
        .replace_all(&content, "data-removed=")
        .into_owned()
}

/// Remove NUL bytes and entity-escape `& < > " '`.
///
/// Ampersands are escaped first, so entities produced for the other four
/// characters are never escaped a second time.
pub fn sanitize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\0' => {}
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // sanitize_html
    // =========================================================================

    #[test]
    fn html_empty_is_empty() {
        assert_eq!(sanitize_html(""), "");
    }

    #[test]
    fn html_strips_script_block() {
        assert_eq!(sanitize_html("<script>alert(1)</script>safe"), "safe");
    }

    #[test]
    fn html_strips_script_with_attributes_case_insensitive() {
        let input = r#"<p>a</p><SCRIPT type="text/javascript">x()</Script><p>b</p>"#;
        assert_eq!(sanitize_html(input), "<p>a</p><p>b</p>");
    }

    #[test]
    fn html_strips_multiline_script() {
        let input = "before<script>\nlet x = 1;\nlet y = '<b>';\n</script>after";
        assert_eq!(sanitize_html(input), "beforeafter");
    }

    #[test]
    fn html_strips_each_script_block_separately() {
        let input = "<script>a</script>keep<script>b</script>";
        assert_eq!(sanitize_html(input), "keep");
    }

    #[test]
    fn html_leaves_unclosed_script() {
        assert_eq!(sanitize_html("<script>alert(1)"), "<script>alert(1)");
    }

    #[test]
    fn html_does_not_match_script_prefix_words() {
        assert_eq!(
            sanitize_html("<scripts>x</scripts>"),
            "<scripts>x</scripts>"
        );
    }

    #[test]
    fn html_script_boundary_is_ascii_only() {
        assert_eq!(sanitize_html("<scriptя>x</script>ok"), "ok");
    }

    #[test]
    fn html_tag_and_scheme_ignore_unicode_case_folds() {
        assert_eq!(
            sanitize_html("<\u{17F}cript>x</script>"),
            "<\u{17F}cript>x</script>"
        );
        assert_eq!(sanitize_html("java\u{17F}cript:"), "java\u{17F}cript:");
    }

    #[test]
    fn html_event_handler_ignores_unicode_case_folds() {
        assert_eq!(sanitize_html("on\u{17F}="), "on\u{17F}=");
        assert_eq!(sanitize_html("on\u{212A}="), "on\u{212A}=");
        assert_eq!(sanitize_html("onKEY="), "data-removed=");
    }

    #[test]
    fn html_neutralizes_javascript_scheme() {
        assert_eq!(
            sanitize_html(r#"<a href="JavaScript:go()">x</a>"#),
            r#"<a href="removed:go()">x</a>"#
        );
    }

    #[test]
    fn html_rewrites_event_handlers() {
        assert_eq!(sanitize_html("onclick="), "data-removed=");
        assert_eq!(
            sanitize_html(r#"<img src="a.png" OnError="x()">"#),
            r#"<img src="a.png" data-removed="x()">"#
        );
    }

    #[test]
    fn html_event_handler_matches_inside_words() {
        assert_eq!(
            sanitize_html(r#"<meta content="x">"#),
            r#"<meta cdata-removed="x">"#
        );
    }

    #[test]
    fn html_removes_nul_bytes() {
        assert_eq!(sanitize_html("a\0b"), "ab");
    }

    #[test]
    fn html_nul_removal_happens_before_patterns() {
        assert_eq!(sanitize_html("<scr\0ipt>x</script>ok"), "ok");
    }

    #[test]
    fn html_keeps_ordinary_markup() {
        let input = r#"<h1 class="title">Ben Mak</h1><p>Expert witness</p>"#;
        assert_eq!(sanitize_html(input), input);
    }

    // =========================================================================
    // sanitize_text
    // =========================================================================

    #[test]
    fn text_empty_is_empty() {
        assert_eq!(sanitize_text(""), "");
    }

    #[test]
    fn text_escapes_without_double_escaping() {
        assert_eq!(sanitize_text("<a>&"), "&lt;a&gt;&amp;");
    }

    #[test]
    fn text_escapes_quotes() {
        assert_eq!(
            sanitize_text(r#"say "hi" & 'bye'"#),
            "say &quot;hi&quot; &amp; &#039;bye&#039;"
        );
    }

    #[test]
    fn text_escapes_existing_entities() {
        assert_eq!(sanitize_text("&amp;"), "&amp;amp;");
    }

    #[test]
    fn text_removes_nul_bytes() {
        assert_eq!(sanitize_text("a\0<"), "a&lt;");
    }

    #[test]
    fn text_preserves_unicode() {
        assert_eq!(sanitize_text("Café › “quote”"), "Café › “quote”");
    }
}
