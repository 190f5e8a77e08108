//! TextBlock Widget
//!
//! A borderless text region that wraps each line to the area width.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use textwrap::wrap;
use unicode_width::UnicodeWidthChar;

/// A borderless, wrapped text block
pub struct TextBlock<'a> {
    lines: Vec<(&'a str, Style)>,
}

impl<'a> TextBlock<'a> {
    /// Create an empty block
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append a logical line (wrapped at render time)
    #[must_use]
    pub fn line(mut self, text: &'a str, style: Style) -> Self {
        self.lines.push((text, style));
        self
    }

    /// Wrap every logical line to `width` columns
    pub fn wrapped(&self, width: usize) -> Vec<(String, Style)> {
        let width = width.max(1);
        self.lines
            .iter()
            .flat_map(|&(text, style)| {
                if text.is_empty() {
                    vec![(String::new(), style)]
                } else {
                    wrap(text, width)
                        .into_iter()
                        .map(|cow| (cow.into_owned(), style))
                        .collect()
                }
            })
            .collect()
    }
}

impl Default for TextBlock<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TextBlock<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let wrapped = self.wrapped(area.width as usize);
        for (i, (line, style)) in wrapped.iter().take(area.height as usize).enumerate() {
            let y = area.y + i as u16;
            buf.set_stringn(area.x, y, line, area.width as usize, *style);
        }
    }
}

/// Truncate `text` to at most `width` terminal columns, marking the cut with `…`
pub fn fit_width(text: &str, width: usize) -> String {
    let total: usize = text.chars().filter_map(UnicodeWidthChar::width).sum();
    if total <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
