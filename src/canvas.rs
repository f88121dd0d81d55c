//! Drawing surface handed to screens.
//!
//! Screens lay themselves out in a fixed logical viewport of [`WIDTH`] x
//! [`HEIGHT`] terminal cells. The canvas translates those coordinates onto the
//! real frame buffer and clips anything falling outside, so screens never have
//! to care about the terminal size.

use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::theme::Theme;

pub const WIDTH: u16 = 80;
pub const HEIGHT: u16 = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paint {
    Filled,
    Outlined,
}

pub struct Canvas<'a> {
    buf: &'a mut Buffer,
    viewport: Rect,
    theme: Theme,
}

impl<'a> Canvas<'a> {
    /// `viewport` must lie inside the buffer area.
    pub fn new(buf: &'a mut Buffer, viewport: Rect, theme: Theme) -> Self {
        let viewport = viewport.intersection(buf.area);
        Self { buf, viewport, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    fn cell(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if x >= self.viewport.width || y >= self.viewport.height {
            return None;
        }
        self.buf.cell_mut((self.viewport.x + x, self.viewport.y + y))
    }

    /// Paint the whole viewport with the theme background.
    pub fn clear(&mut self) {
        let style = Style::default().fg(self.theme.text()).bg(self.theme.background());
        for y in 0..self.viewport.height {
            for x in 0..self.viewport.width {
                if let Some(cell) = self.cell(x, y) {
                    cell.reset();
                    cell.set_style(style);
                }
            }
        }
    }

    pub fn rect(&mut self, region: Rect, color: Color, paint: Paint) {
        if region.width == 0 || region.height == 0 {
            return;
        }
        let right = region.x + region.width - 1;
        let bottom = region.y + region.height - 1;
        for y in region.y..=bottom {
            for x in region.x..=right {
                let Some(cell) = self.cell(x, y) else { continue };
                match paint {
                    Paint::Filled => {
                        cell.set_char(' ');
                        cell.set_bg(color);
                    }
                    Paint::Outlined => {
                        let ch = match (x == region.x, x == right, y == region.y, y == bottom) {
                            (true, _, true, _) => '┌',
                            (_, true, true, _) => '┐',
                            (true, _, _, true) => '└',
                            (_, true, _, true) => '┘',
                            (_, _, true, _) | (_, _, _, true) => '─',
                            (true, _, _, _) | (_, true, _, _) => '│',
                            _ => continue,
                        };
                        cell.set_char(ch);
                        cell.set_fg(color);
                    }
                }
            }
        }
    }

    pub fn circle(&mut self, x: u16, y: u16, radius: u16, color: Color) {
        let r = i32::from(radius);
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let (cx, cy) = (i32::from(x) + dx, i32::from(y) + dy);
                if cx < 0 || cy < 0 {
                    continue;
                }
                if let Some(cell) = self.cell(cx as u16, cy as u16) {
                    cell.set_char(if radius == 0 { '·' } else { '█' });
                    cell.set_fg(color);
                }
            }
        }
    }

    /// Display width of `text` in cells.
    pub fn measure(text: &str) -> u16 {
        Span::raw(text).width() as u16
    }

    /// Draw `text` starting at (`x`, `y`), keeping whatever background is
    /// already there. Returns the width drawn.
    pub fn text(&mut self, x: u16, y: u16, text: &str, color: Color) -> u16 {
        if x >= self.viewport.width || y >= self.viewport.height {
            return 0;
        }
        let max_width = (self.viewport.width - x) as usize;
        let (end, _) = self.buf.set_stringn(
            self.viewport.x + x,
            self.viewport.y + y,
            text,
            max_width,
            Style::default().fg(color),
        );
        end - (self.viewport.x + x)
    }

    pub fn text_centered(&mut self, y: u16, text: &str, color: Color) -> u16 {
        let x = WIDTH.saturating_sub(Self::measure(text)) / 2;
        self.text(x, y, text, color)
    }

    /// Center `text` inside `region`.
    pub fn text_in(&mut self, region: Rect, text: &str, color: Color) -> u16 {
        let x = region.x + region.width.saturating_sub(Self::measure(text)) / 2;
        let y = region.y + region.height.saturating_sub(1) / 2;
        self.text(x, y, text, color)
    }
}

/// Greedy word wrap to lines no wider than `max_width`.
pub fn wrap_words(text: &str, max_width: u16) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() { word.to_string() } else { format!("{line} {word}") };
        if Canvas::measure(&candidate) <= max_width || line.is_empty() {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
