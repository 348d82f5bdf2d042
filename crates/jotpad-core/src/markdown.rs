//! Minimal Markdown to HTML renderer for note previews.
//!
//! Only a small subset is supported: fenced and inline code, `#`..`###`
//! headings, bold, italic, `-` lists, and paragraphs. All HTML-significant
//! characters are escaped before any markup is produced, so nothing from
//! the source survives as a raw tag.

use std::sync::LazyLock;

use regex::Regex;

static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^```[^\n`]*\n(.*?)^```[ \t]*$").expect("Invalid fence regex")
});
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("Invalid inline code regex"));
static HEADING_3: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^### (.*)$").expect("Invalid heading regex"));
static HEADING_2: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## (.*)$").expect("Invalid heading regex"));
static HEADING_1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^# (.*)$").expect("Invalid heading regex"));
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("Invalid bold regex"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("Invalid italic regex"));
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*-[ \t]+(.*)$").expect("Invalid list regex"));
static BLOCK_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("Invalid block regex"));

/// Render untrusted Markdown into HTML safe for direct insertion.
///
/// # Examples
///
/// ```
/// use jotpad_core::markdown::render;
///
/// assert_eq!(render("# Hi"), "<h1>Hi</h1>");
/// assert_eq!(render("<b>"), "<p>&lt;b&gt;</p>");
/// ```
#[must_use]
pub fn render(markdown: &str) -> String {
    if markdown.is_empty() {
        return String::new();
    }

    let normalized = markdown.replace("\r\n", "\n");
    let escaped = escape_html(&normalized);

    // Fenced regions become standalone blocks and skip the inline passes.
    let mut blocks = Vec::new();
    let mut cursor = 0;
    for captures in FENCE.captures_iter(&escaped) {
        let (Some(whole), Some(code)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        render_text(&escaped[cursor..whole.start()], &mut blocks);
        let code = code.as_str();
        let code = code.strip_suffix('\n').unwrap_or(code);
        blocks.push(format!("<pre><code>{code}</code></pre>"));
        cursor = whole.end();
    }
    render_text(&escaped[cursor..], &mut blocks);

    blocks.join("\n")
}

/// Escape `&`, `<` and `>`.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Run the inline and block passes over escaped text outside code fences.
fn render_text(text: &str, blocks: &mut Vec<String>) {
    if text.trim().is_empty() {
        return;
    }

    let text = INLINE_CODE.replace_all(text, "<code>${1}</code>");
    let text = HEADING_3.replace_all(&text, "<h3>${1}</h3>");
    let text = HEADING_2.replace_all(&text, "<h2>${1}</h2>");
    let text = HEADING_1.replace_all(&text, "<h1>${1}</h1>");
    let text = BOLD.replace_all(&text, "<strong>${1}</strong>");
    let text = ITALIC.replace_all(&text, "<em>${1}</em>");
    let text = LIST_ITEM.replace_all(&text, "<li>${1}</li>");
    let text = isolate_list_runs(&text);

    for block in BLOCK_BREAK.split(&text) {
        let block = block.trim_matches('\n');
        if block.trim().is_empty() {
            continue;
        }
        blocks.push(wrap_block(block));
    }
}

/// Put a blank line between a run of `<li>` lines and adjacent text so each
/// run lands in a block of its own.
fn isolate_list_runs(text: &str) -> String {
    let mut output = String::with_capacity(text.len() + 8);
    let mut previous: Option<&str> = None;

    for line in text.split('\n') {
        if let Some(previous) = previous {
            output.push('\n');
            let boundary = is_list_line(previous) != is_list_line(line);
            if boundary && !previous.is_empty() && !line.is_empty() {
                output.push('\n');
            }
        }
        output.push_str(line);
        previous = Some(line);
    }

    output
}

fn is_list_line(line: &str) -> bool {
    line.starts_with("<li>") && line.ends_with("</li>")
}

fn wrap_block(block: &str) -> String {
    let is_heading = ["<h1>", "<h2>", "<h3>"]
        .iter()
        .any(|tag| block.starts_with(tag));
    if is_heading || block.starts_with("<pre>") || block.starts_with("<ul>") {
        return block.to_string();
    }

    if block.starts_with("<li>") {
        let items: String = block.split('\n').filter(|line| !line.is_empty()).collect();
        return format!("<ul>{items}</ul>");
    }

    format!("<p>{}</p>", block.replace('\n', "<br/>"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(render(""), "");
        assert_eq!(render("\n\n"), "");
    }

    #[test]
    fn headings_by_level() {
        assert_eq!(render("# Hi"), "<h1>Hi</h1>");
        assert_eq!(render("## Sub"), "<h2>Sub</h2>");
        assert_eq!(render("### Deep"), "<h3>Deep</h3>");
        assert_eq!(render("#### Four"), "<p>#### Four</p>");
        assert_eq!(render("#NoSpace"), "<p>#NoSpace</p>");
    }

    #[test]
    fn bold_and_italic() {
        assert_eq!(
            render("**bold** and *italic*"),
            "<p><strong>bold</strong> and <em>italic</em></p>"
        );
    }

    #[test]
    fn inline_code() {
        assert_eq!(render("run `jot add`"), "<p>run <code>jot add</code></p>");
    }

    #[test]
    fn raw_html_is_escaped() {
        assert_eq!(
            render("<script>alert('x')</script> & co"),
            "<p>&lt;script&gt;alert('x')&lt;/script&gt; &amp; co</p>"
        );
    }

    #[test]
    fn fenced_code_is_escaped_verbatim() {
        assert_eq!(
            render("```\n<script>\n```"),
            "<pre><code>&lt;script&gt;</code></pre>"
        );
    }

    #[test]
    fn fenced_code_is_not_reinterpreted() {
        let rendered = render("```rust\n# not a heading\n- not a list\n\n**not bold**\n```");
        assert_eq!(
            rendered,
            "<pre><code># not a heading\n- not a list\n\n**not bold**</code></pre>"
        );
    }

    #[test]
    fn fence_splits_surrounding_paragraphs() {
        assert_eq!(
            render("before\n```\ncode\n```\nafter"),
            "<p>before</p>\n<pre><code>code</code></pre>\n<p>after</p>"
        );
    }

    #[test]
    fn unterminated_fence_stays_text() {
        assert_eq!(render("```\ncode"), "<p>```<br/>code</p>");
    }

    #[test]
    fn adjacent_items_form_one_list() {
        assert_eq!(render("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn blank_line_splits_lists() {
        assert_eq!(
            render("- a\n\n- b"),
            "<ul><li>a</li></ul>\n<ul><li>b</li></ul>"
        );
    }

    #[test]
    fn indented_items_are_list_items() {
        assert_eq!(render("  - nested"), "<ul><li>nested</li></ul>");
    }

    #[test]
    fn list_is_separated_from_surrounding_text() {
        assert_eq!(
            render("Shopping:\n- milk\n- eggs\nThanks"),
            "<p>Shopping:</p>\n<ul><li>milk</li><li>eggs</li></ul>\n<p>Thanks</p>"
        );
    }

    #[test]
    fn paragraphs_and_line_breaks() {
        assert_eq!(
            render("line one\nline two\n\nnext"),
            "<p>line one<br/>line two</p>\n<p>next</p>"
        );
    }

    #[test]
    fn crlf_is_normalized() {
        assert_eq!(render("a\r\nb\r\n\r\nc"), "<p>a<br/>b</p>\n<p>c</p>");
    }

    #[test]
    fn heading_after_text_in_one_block_stays_inside_paragraph() {
        assert_eq!(render("text\n# H"), "<p>text<br/><h1>H</h1></p>");
    }

    #[test]
    fn inline_code_across_blank_line_is_split_between_paragraphs() {
        assert_eq!(render("`a\n\nb`"), "<p><code>a</p>\n<p>b</code></p>");
    }

    #[test]
    fn renders_welcome_note() {
        let rendered = render(crate::store::WELCOME_CONTENT);
        assert!(rendered.starts_with("<h1>Welcome</h1>\n<p>This is your first note."));
        assert!(rendered.contains("<ul><li>Create notes with <code>jot add</code></li>"));
        assert!(rendered.ends_with("<p>Enjoy writing!</p>"));
    }

    #[test]
    fn escape_html_handles_all_significant_characters() {
        assert_eq!(escape_html("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }
}
