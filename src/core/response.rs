//! Copy-ready Markdown output
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.1.0: Body kept byte-for-byte, trailing newlines included
//! - 1.0.0: Fenced copy block that survives code blocks inside the course

/// Shortest fence that cannot be closed by any backtick run in `text`
pub fn fence_for(text: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for ch in text.chars() {
        if ch == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}

/// Wrap the course in a `markdown` fenced block for copying into Obsidian.
///
/// The body is kept byte-for-byte; a newline is added before the closing
/// fence only when the body does not already end with one.
pub fn copy_block(markdown: &str) -> String {
    let fence = fence_for(markdown);
    let separator = if markdown.is_empty() || markdown.ends_with('\n') {
        ""
    } else {
        "\n"
    };
    format!("{fence}markdown\n{markdown}{separator}{fence}")
}
