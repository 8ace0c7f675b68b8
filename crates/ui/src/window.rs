//! Character-cell window owned by the UI manager.
//!
//! The window keeps one row per terminal line, each padded to the window
//! width, plus a style per cell. Scenes paint into it during a render pass and
//! the manager flushes it to the terminal through ratatui.

use std::collections::HashMap;

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use textwrap::Options;

use crate::art::{ANSI_CELL_COLUMNS, AnsiArt, AsciiArt};
use crate::error::{ArtKind, Result, UiError};

#[derive(Clone, Debug)]
struct Row {
    glyphs: Vec<char>,
    styles: Vec<Style>,
}

impl Row {
    fn blank(cols: usize) -> Self {
        Self {
            glyphs: vec![' '; cols],
            styles: vec![Style::default(); cols],
        }
    }
}

/// Bounded character surface with named art registries.
#[derive(Debug)]
pub struct ConsoleWindow {
    rows: usize,
    cols: usize,
    buffer: Vec<Row>,
    ascii_art: HashMap<String, AsciiArt>,
    ansi_art: HashMap<String, AnsiArt>,
    changed: bool,
}

impl ConsoleWindow {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            buffer: vec![Row::blank(cols); rows],
            ascii_art: HashMap::new(),
            ansi_art: HashMap::new(),
            changed: true,
        }
    }

    /// Returns `(rows, cols)`.
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Reallocates the buffer for a new terminal size. Content is cleared.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        tracing::debug!("Window resized to {}x{}", rows, cols);
        self.rows = rows;
        self.cols = cols;
        self.buffer = vec![Row::blank(cols); rows];
        self.changed = true;
    }

    /// Returns row `index` as text, always `cols` characters long.
    pub fn line(&self, index: usize) -> Result<String> {
        let row = self.row(index)?;
        Ok(row.glyphs.iter().collect())
    }

    /// Replaces row `index`, truncating or padding `text` to the window width.
    pub fn set_line(&mut self, index: usize, text: &str) -> Result<()> {
        let cols = self.cols;
        let rows = self.rows;
        let row = self
            .buffer
            .get_mut(index)
            .ok_or(UiError::LineOutOfRange { index, rows })?;

        let mut glyphs: Vec<char> = text.chars().take(cols).collect();
        glyphs.resize(cols, ' ');
        row.glyphs = glyphs;
        row.styles = vec![Style::default(); cols];
        self.changed = true;
        Ok(())
    }

    /// Style of the cell at `(x, y)`.
    pub fn style_at(&self, x: usize, y: usize) -> Option<Style> {
        self.buffer.get(y)?.styles.get(x).copied()
    }

    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            *row = Row::blank(self.cols);
        }
        self.changed = true;
    }

    pub fn draw_text(&mut self, x: usize, y: usize, text: &str) {
        self.draw_styled_text(x, y, text, Style::default());
    }

    /// Writes `text` starting at `(x, y)`. Characters past the edge are dropped.
    pub fn draw_styled_text(&mut self, x: usize, y: usize, text: &str, style: Style) {
        for (offset, ch) in text.chars().enumerate() {
            self.put(x + offset, y, ch, style);
        }
        self.changed = true;
    }

    /// Writes `text` horizontally centered on row `y`.
    pub fn draw_centered_text(&mut self, y: usize, text: &str) {
        self.draw_centered_styled_text(y, text, Style::default());
    }

    pub fn draw_centered_styled_text(&mut self, y: usize, text: &str, style: Style) {
        let x = self.centered_x(text.chars().count());
        self.draw_styled_text(x, y, text, style);
    }

    /// Column at which content of `width` columns is horizontally centered.
    pub fn centered_x(&self, width: usize) -> usize {
        self.cols.saturating_sub(width) / 2
    }

    /// Word-wraps `text` into a column of `width` at `(x, y)`.
    ///
    /// Returns the number of rows written.
    pub fn draw_wrapped_text(&mut self, x: usize, y: usize, width: usize, text: &str) -> usize {
        if width == 0 {
            return 0;
        }
        let lines = textwrap::wrap(text, Options::new(width));
        for (offset, line) in lines.iter().enumerate() {
            self.draw_text(x, y + offset, line);
        }
        lines.len()
    }

    /// Paints a `width` x `height` rectangle with spaces in `style`.
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, style: Style) {
        for row in y..y + height {
            for col in x..x + width {
                self.put(col, row, ' ', style);
            }
        }
        self.changed = true;
    }

    /// Frames the whole window with box-drawing characters.
    pub fn draw_border(&mut self) {
        if self.rows < 2 || self.cols < 2 {
            return;
        }
        let (bottom, right) = (self.rows - 1, self.cols - 1);
        let style = Style::default();
        for x in 1..right {
            self.put(x, 0, '─', style);
            self.put(x, bottom, '─', style);
        }
        for y in 1..bottom {
            self.put(0, y, '│', style);
            self.put(right, y, '│', style);
        }
        self.put(0, 0, '┌', style);
        self.put(right, 0, '┐', style);
        self.put(0, bottom, '└', style);
        self.put(right, bottom, '┘', style);
        self.changed = true;
    }

    pub fn add_ascii_art(&mut self, art: AsciiArt) -> Result<()> {
        if self.ascii_art.contains_key(art.name()) {
            return Err(UiError::DuplicateArt {
                kind: ArtKind::Ascii,
                name: art.name().to_string(),
            });
        }
        self.ascii_art.insert(art.name().to_string(), art);
        Ok(())
    }

    pub fn add_ansi_art(&mut self, art: AnsiArt) -> Result<()> {
        if self.ansi_art.contains_key(art.name()) {
            return Err(UiError::DuplicateArt {
                kind: ArtKind::Ansi,
                name: art.name().to_string(),
            });
        }
        self.ansi_art.insert(art.name().to_string(), art);
        Ok(())
    }

    pub fn ascii_art(&self, name: &str) -> Result<&AsciiArt> {
        self.ascii_art.get(name).ok_or_else(|| UiError::ArtNotFound {
            kind: ArtKind::Ascii,
            name: name.to_string(),
        })
    }

    pub fn ansi_art(&self, name: &str) -> Result<&AnsiArt> {
        self.ansi_art.get(name).ok_or_else(|| UiError::ArtNotFound {
            kind: ArtKind::Ansi,
            name: name.to_string(),
        })
    }

    /// Draws registered ASCII art with its top-left corner at `(x, y)`.
    pub fn draw_ascii_art(&mut self, name: &str, x: usize, y: usize) -> Result<()> {
        let lines = self.ascii_art(name)?.lines().to_vec();
        for (offset, line) in lines.iter().enumerate() {
            self.draw_text(x, y + offset, line);
        }
        Ok(())
    }

    /// Draws registered ASCII art at the position it was created with.
    pub fn draw_ascii_art_placed(&mut self, name: &str) -> Result<()> {
        let art = self.ascii_art(name)?;
        let (x, y) = (usize::from(art.x()), usize::from(art.y()));
        self.draw_ascii_art(name, x, y)
    }

    /// Draws registered ANSI art at `(x, y)`; each cell spans two columns.
    pub fn draw_ansi_art(&mut self, name: &str, x: usize, y: usize) -> Result<()> {
        let art = self.ansi_art(name)?.clone();
        for row in 0..art.height() {
            for col in 0..art.width() {
                let Some((glyph, code)) = art.cell(row, col) else {
                    continue;
                };
                let style = code.style();
                for column in 0..ANSI_CELL_COLUMNS {
                    self.put(x + col * ANSI_CELL_COLUMNS + column, y + row, glyph, style);
                }
            }
        }
        self.changed = true;
        Ok(())
    }

    pub fn draw_ansi_art_placed(&mut self, name: &str) -> Result<()> {
        let art = self.ansi_art(name)?;
        let (x, y) = (usize::from(art.x()), usize::from(art.y()));
        self.draw_ansi_art(name, x, y)
    }

    /// Returns true if the buffer changed since the last flush.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn mark_flushed(&mut self) {
        self.changed = false;
    }

    fn row(&self, index: usize) -> Result<&Row> {
        self.buffer.get(index).ok_or(UiError::LineOutOfRange {
            index,
            rows: self.rows,
        })
    }

    fn put(&mut self, x: usize, y: usize, ch: char, style: Style) {
        if let Some(row) = self.buffer.get_mut(y)
            && x < row.glyphs.len()
        {
            row.glyphs[x] = ch;
            row.styles[x] = style;
        }
    }
}

impl Widget for &ConsoleWindow {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (y, row) in self.buffer.iter().enumerate().take(usize::from(area.height)) {
            let cells = row.glyphs.iter().zip(&row.styles);
            for (x, (glyph, style)) in cells.enumerate().take(usize::from(area.width)) {
                // Both bounds were checked against `area`, so the casts cannot truncate.
                let position = (area.x + x as u16, area.y + y as u16);
                if let Some(cell) = buf.cell_mut(position) {
                    cell.set_char(*glyph).set_style(*style);
                }
            }
        }
    }
}
