//! Terminal preview of generated Markdown
//!
//! Walks the `pulldown-cmark` event stream into styled lines, then paints
//! them with `console`. Layout and painting are split so the layout can be
//! checked without a terminal.

use console::Style;
use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};

const LIST_INDENT_WIDTH: usize = 2;
const CODE_INDENT: &str = "    ";
const QUOTE_PREFIX: &str = "│ ";

/// Inline styling carried by a segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub heading: Option<u8>,
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub link: bool,
    pub code: bool,
    /// List bullets, quote bars and code indentation
    pub prefix: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub style: SpanStyle,
    pub text: String,
}

/// One terminal line of the preview
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewLine {
    pub segments: Vec<Segment>,
}

impl PreviewLine {
    /// Text without styling
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn is_blank(&self) -> bool {
        self.segments.iter().all(|s| s.text.trim().is_empty())
    }

    fn push(&mut self, style: SpanStyle, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(last) = self.segments.last_mut() {
            if last.style == style {
                last.text.push_str(text);
                return;
            }
        }
        self.segments.push(Segment {
            style,
            text: text.to_string(),
        });
    }
}

struct ListState {
    next: Option<u64>,
}

#[derive(Default)]
struct Layout {
    lines: Vec<PreviewLine>,
    current: PreviewLine,
    style_stack: Vec<SpanStyle>,
    quote_depth: usize,
    lists: Vec<ListState>,
    pending_bullet: Option<String>,
    in_code_block: bool,
}

impl Layout {
    fn style(&self) -> SpanStyle {
        self.style_stack.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, f: impl FnOnce(&mut SpanStyle)) {
        let mut style = self.style();
        f(&mut style);
        self.style_stack.push(style);
    }

    fn pop_style(&mut self) {
        self.style_stack.pop();
    }

    /// Quote bars plus either the pending bullet or the list continuation
    fn prefix(&mut self) -> String {
        let mut prefix = QUOTE_PREFIX.repeat(self.quote_depth);
        match self.pending_bullet.take() {
            Some(bullet) => prefix.push_str(&bullet),
            None => prefix.push_str(&" ".repeat(self.lists.len() * LIST_INDENT_WIDTH)),
        }
        prefix
    }

    fn append(&mut self, style: SpanStyle, text: &str) {
        if self.current.segments.is_empty() {
            let prefix = self.prefix();
            let prefix_style = SpanStyle {
                prefix: true,
                ..SpanStyle::default()
            };
            self.current.push(prefix_style, &prefix);
        }
        self.current.push(style, text);
    }

    fn flush(&mut self) {
        if !self.current.segments.is_empty() {
            let line = std::mem::take(&mut self.current);
            self.lines.push(line);
        }
    }

    fn blank(&mut self) {
        self.flush();
        if self.lines.last().is_some_and(|l| !l.is_blank()) {
            self.lines.push(PreviewLine::default());
        }
    }

    fn code_text(&mut self, text: &str) {
        let style = SpanStyle {
            code: true,
            ..SpanStyle::default()
        };
        for line in text.lines() {
            let prefix = format!("{}{CODE_INDENT}", self.prefix());
            let mut preview = PreviewLine::default();
            preview.push(
                SpanStyle {
                    prefix: true,
                    ..SpanStyle::default()
                },
                &prefix,
            );
            preview.push(style, line);
            self.lines.push(preview);
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading(level, ..) => {
                self.flush();
                let level = heading_number(level);
                self.push_style(|s| s.heading = Some(level));
            }
            Tag::BlockQuote => {
                self.flush();
                self.quote_depth += 1;
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(ListState { next: start });
            }
            Tag::Item => {
                self.flush();
                let depth = self.lists.len().saturating_sub(1);
                let indent = " ".repeat(depth * LIST_INDENT_WIDTH);
                let bullet = match self.lists.last_mut().and_then(|l| l.next.as_mut()) {
                    Some(next) => {
                        let bullet = format!("{indent}{next}. ");
                        *next += 1;
                        bullet
                    }
                    None => format!("{indent}• "),
                };
                self.pending_bullet = Some(bullet);
            }
            Tag::Emphasis => self.push_style(|s| s.italic = true),
            Tag::Strong => self.push_style(|s| s.bold = true),
            Tag::Strikethrough => self.push_style(|s| s.strikethrough = true),
            Tag::Link(..) | Tag::Image(..) => self.push_style(|s| s.link = true),
            Tag::CodeBlock(_) => {
                self.flush();
                self.in_code_block = true;
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.blank(),
            Tag::Heading(..) => {
                self.pop_style();
                self.blank();
            }
            Tag::BlockQuote => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank();
            }
            Tag::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            Tag::Item => {
                self.flush();
                self.pending_bullet = None;
            }
            Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link(..) | Tag::Image(..) => {
                self.pop_style()
            }
            Tag::CodeBlock(_) => {
                self.in_code_block = false;
                self.blank();
            }
            _ => {}
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) if self.in_code_block => self.code_text(&text),
            Event::Text(text) => {
                let style = self.style();
                self.append(style, &text);
            }
            Event::Code(text) => {
                let style = SpanStyle {
                    code: true,
                    ..self.style()
                };
                self.append(style, &text);
            }
            Event::Html(html) => {
                let style = self.style();
                for (i, line) in html.lines().enumerate() {
                    if i > 0 {
                        self.flush();
                    }
                    self.append(style, line);
                }
                self.flush();
            }
            Event::SoftBreak | Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                let mut line = PreviewLine::default();
                line.push(
                    SpanStyle {
                        prefix: true,
                        ..SpanStyle::default()
                    },
                    &"─".repeat(50),
                );
                self.lines.push(line);
                self.blank();
            }
            Event::TaskListMarker(checked) => {
                let style = self.style();
                self.append(style, if checked { "[x] " } else { "[ ] " });
            }
            Event::FootnoteReference(reference) => {
                let style = self.style();
                self.append(style, &format!("[^{reference}]"));
            }
        }
    }

    fn finish(mut self) -> Vec<PreviewLine> {
        self.flush();
        while self.lines.last().is_some_and(PreviewLine::is_blank) {
            self.lines.pop();
        }
        self.lines
    }
}

fn heading_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Lay the Markdown out as styled lines
pub fn layout(markdown: &str) -> Vec<PreviewLine> {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS);
    let mut layout = Layout::default();
    for event in parser {
        layout.event(event);
    }
    layout.finish()
}

fn terminal_style(style: SpanStyle) -> Style {
    let mut out = Style::new();
    if style.prefix {
        return out.cyan().dim();
    }
    match style.heading {
        Some(1) => out = out.yellow().bold().underlined(),
        Some(2) => out = out.yellow().bold(),
        Some(_) => out = out.yellow(),
        None => {}
    }
    if style.bold {
        out = out.bold();
    }
    if style.italic {
        out = out.italic();
    }
    if style.strikethrough {
        out = out.dim();
    }
    if style.link {
        out = out.cyan().underlined();
    }
    if style.code {
        out = out.green();
    }
    out
}

/// Render the preview with terminal styling
pub fn render_preview(markdown: &str) -> String {
    layout(markdown)
        .iter()
        .map(|line| {
            line.segments
                .iter()
                .map(|s| terminal_style(s.style).apply_to(&s.text).to_string())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
