//! Text surface - the frame model renderers produce.
//!
//! Controls emit [`Line`]s of styled [`Span`]s; the dispatch composes them
//! into a [`Surface`] that a backend presents. Tests assert against the
//! plain-text projection (`Surface::text`), so styling never obscures
//! structure.

use crossterm::style::Color;
use unicode_width::UnicodeWidthStr;

bitflags::bitflags! {
    /// Text attributes applied to a span.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const BOLD      = 1 << 0;
        const DIM       = 1 << 1;
        const ITALIC    = 1 << 2;
        const UNDERLINE = 1 << 3;
        const REVERSE   = 1 << 4;
    }
}

/// Foreground/background colors plus attribute flags.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attrs: Attr,
}

impl Style {
    pub const PLAIN: Self = Self {
        fg: None,
        bg: None,
        attrs: Attr::empty(),
    };

    pub fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            ..Self::PLAIN
        }
    }

    pub fn with_attrs(mut self, attrs: Attr) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }
}

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::PLAIN)
    }

    /// Display width in terminal cells.
    pub fn width(&self) -> usize {
        self.text.width()
    }
}

/// One row of the rendered panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            spans: vec![Span::plain(text)],
        }
    }

    pub fn push(&mut self, span: Span) {
        self.spans.push(span);
    }

    /// Prefix the line with a span (used for row labels and indentation).
    pub fn prepend(&mut self, span: Span) {
        self.spans.insert(0, span);
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    /// Plain-text projection of the line.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Strip all styling, keeping the text.
    pub fn unstyled(mut self) -> Self {
        for span in &mut self.spans {
            span.style = Style::PLAIN;
        }
        self
    }
}

/// A full rendered frame: the ordered rows of the panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Surface {
    pub lines: Vec<Line>,
}

impl Surface {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Plain-text projection of the frame, one row per line.
    pub fn text(&self) -> String {
        let rows: Vec<String> = self.lines.iter().map(Line::text).collect();
        rows.join("\n")
    }
}

/// Pad or truncate `text` to exactly `width` terminal cells.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    while used < width {
        out.push(' ');
        used += 1;
    }
    out
}
