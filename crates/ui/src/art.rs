//! Immutable art blocks that a [`ConsoleWindow`](crate::ConsoleWindow) can register and draw.
//!
//! [`AsciiArt`] is a block of plain text rows. [`AnsiArt`] is a grid of glyph
//! cells, each paired with an SGR code; every cell occupies
//! [`ANSI_CELL_COLUMNS`] terminal columns so square pixels line up.

use ratatui::style::{Color, Modifier, Style};

use crate::error::{Result, UiError};

/// Terminal columns covered by one ANSI art cell.
pub const ANSI_CELL_COLUMNS: usize = 2;

/// Plain-text art block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsciiArt {
    name: String,
    lines: Vec<String>,
    width: usize,
    x: u16,
    y: u16,
}

impl AsciiArt {
    pub fn new(name: impl Into<String>, lines: Vec<String>, x: u16, y: u16) -> Self {
        let width = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        Self {
            name: name.into(),
            lines,
            width,
            x,
            y,
        }
    }

    /// Splits `text` on newlines. Blank lines are kept.
    pub fn from_text(name: impl Into<String>, text: &str, x: u16, y: u16) -> Self {
        Self::new(name, text.lines().map(str::to_owned).collect(), x, y)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    pub fn x(&self) -> u16 {
        self.x
    }

    pub fn y(&self) -> u16 {
        self.y
    }
}

/// A single SGR parameter with a direct terminal style mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct AnsiCode(u8);

impl AnsiCode {
    pub const RESET: Self = Self(0);

    /// Returns `None` for codes without a one-to-one style mapping.
    pub fn new(code: u8) -> Option<Self> {
        match code {
            0..=4 | 7 | 30..=37 | 39 | 40..=47 | 49 | 90..=97 | 100..=107 => Some(Self(code)),
            _ => None,
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn style(self) -> Style {
        let base = Style::default();
        match self.0 {
            1 => base.add_modifier(Modifier::BOLD),
            2 => base.add_modifier(Modifier::DIM),
            3 => base.add_modifier(Modifier::ITALIC),
            4 => base.add_modifier(Modifier::UNDERLINED),
            7 => base.add_modifier(Modifier::REVERSED),
            code @ 30..=37 => base.fg(normal_color(code - 30)),
            39 => base.fg(Color::Reset),
            code @ 40..=47 => base.bg(normal_color(code - 40)),
            49 => base.bg(Color::Reset),
            code @ 90..=97 => base.fg(bright_color(code - 90)),
            code @ 100..=107 => base.bg(bright_color(code - 100)),
            _ => base,
        }
    }
}

fn normal_color(offset: u8) -> Color {
    match offset {
        0 => Color::Black,
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Blue,
        5 => Color::Magenta,
        6 => Color::Cyan,
        _ => Color::Gray,
    }
}

fn bright_color(offset: u8) -> Color {
    match offset {
        0 => Color::DarkGray,
        1 => Color::LightRed,
        2 => Color::LightGreen,
        3 => Color::LightYellow,
        4 => Color::LightBlue,
        5 => Color::LightMagenta,
        6 => Color::LightCyan,
        _ => Color::White,
    }
}

/// Color-coded art: `width * height` glyph cells with one code per cell, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnsiArt {
    name: String,
    width: usize,
    height: usize,
    glyphs: Vec<char>,
    codes: Vec<AnsiCode>,
    x: u16,
    y: u16,
}

impl AnsiArt {
    pub fn new(
        name: impl Into<String>,
        width: usize,
        height: usize,
        glyphs: Vec<char>,
        codes: Vec<AnsiCode>,
        x: u16,
        y: u16,
    ) -> Result<Self> {
        let name = name.into();
        let Some(cells) = width.checked_mul(height) else {
            return Err(UiError::invalid_art(
                &name,
                format!("{width}x{height} is too large"),
            ));
        };
        if glyphs.len() != cells {
            return Err(UiError::invalid_art(
                &name,
                format!("{width}x{height} needs {cells} glyph cells, got {}", glyphs.len()),
            ));
        }
        if codes.len() != glyphs.len() {
            return Err(UiError::invalid_art(
                &name,
                format!("{} codes for {} glyph cells", codes.len(), glyphs.len()),
            ));
        }
        Ok(Self {
            name,
            width,
            height,
            glyphs,
            codes,
            x,
            y,
        })
    }

    /// Parses the cell grid text form.
    ///
    /// One row per line, cells separated by whitespace. A cell is `CODE`
    /// (blank glyph), `CODE:GLYPH`, or `.` for a reset blank. Blank lines are
    /// skipped and every row must have the same number of cells.
    pub fn parse(name: impl Into<String>, text: &str, x: u16, y: u16) -> Result<Self> {
        let name = name.into();
        let mut width = None;
        let mut height = 0;
        let mut glyphs = Vec::new();
        let mut codes = Vec::new();

        for row in text.lines().filter(|row| !row.trim().is_empty()) {
            let mut cells = 0;
            for cell in row.split_whitespace() {
                let (code, glyph) = parse_cell(&name, cell)?;
                codes.push(code);
                glyphs.push(glyph);
                cells += 1;
            }
            match width {
                None => width = Some(cells),
                Some(expected) if expected != cells => {
                    return Err(UiError::invalid_art(
                        &name,
                        format!("row {height} has {cells} cells, expected {expected}"),
                    ));
                }
                Some(_) => {}
            }
            height += 1;
        }

        Self::new(name, width.unwrap_or(0), height, glyphs, codes, x, y)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    pub fn codes(&self) -> &[AnsiCode] {
        &self.codes
    }

    pub fn x(&self) -> u16 {
        self.x
    }

    pub fn y(&self) -> u16 {
        self.y
    }

    /// Columns covered on screen.
    pub fn display_width(&self) -> usize {
        self.width * ANSI_CELL_COLUMNS
    }

    /// Glyph and code of the cell at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Option<(char, AnsiCode)> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let index = row * self.width + col;
        Some((self.glyphs[index], self.codes[index]))
    }
}

fn parse_cell(name: &str, cell: &str) -> Result<(AnsiCode, char)> {
    if cell == "." {
        return Ok((AnsiCode::RESET, ' '));
    }
    let (code, glyph) = match cell.split_once(':') {
        Some((code, glyph)) => {
            let mut chars = glyph.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => (code, ch),
                _ => {
                    return Err(UiError::invalid_art(
                        name,
                        format!("cell '{cell}' must carry exactly one glyph"),
                    ));
                }
            }
        }
        None => (cell, ' '),
    };
    let code = code
        .parse::<u8>()
        .ok()
        .and_then(AnsiCode::new)
        .ok_or_else(|| UiError::invalid_art(name, format!("unsupported code '{code}'")))?;
    Ok((code, glyph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;

    #[test]
    fn ascii_art_measures_widest_line() {
        let art = AsciiArt::from_text("title", "ab\nabcd\n\nx", 1, 2);
        assert_eq!(art.width(), 4);
        assert_eq!(art.height(), 4);
        assert_eq!(art.lines()[2], "");
        assert_eq!((art.x(), art.y()), (1, 2));
    }

    #[test]
    fn rejects_unmapped_codes() {
        assert!(AnsiCode::new(5).is_none());
        assert!(AnsiCode::new(38).is_none());
        assert!(AnsiCode::new(108).is_none());
        assert_eq!(AnsiCode::new(91).map(AnsiCode::style), Some(Style::default().fg(Color::LightRed)));
        assert_eq!(AnsiCode::new(44).map(AnsiCode::style), Some(Style::default().bg(Color::Blue)));
    }

    #[test]
    fn size_must_match_cells() {
        let err = AnsiArt::new("bad", 2, 2, vec![' '; 3], vec![AnsiCode::RESET; 3], 0, 0)
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::Configuration);

        let err = AnsiArt::new("bad", 2, 1, vec![' '; 2], vec![AnsiCode::RESET; 1], 0, 0)
            .unwrap_err();
        assert!(matches!(err, UiError::InvalidArt { .. }));

        let err = AnsiArt::new("huge", usize::MAX, 2, Vec::new(), Vec::new(), 0, 0).unwrap_err();
        assert!(matches!(err, UiError::InvalidArt { .. }));
    }

    #[test]
    fn parses_cell_grid() {
        let art = AnsiArt::parse("heart", "41 . 41\n41 41:# 41\n", 0, 0).unwrap();
        assert_eq!((art.width(), art.height()), (3, 2));
        assert_eq!(art.display_width(), 6);
        assert_eq!(art.cell(0, 1), Some((' ', AnsiCode::RESET)));
        assert_eq!(art.cell(1, 1).map(|(glyph, code)| (glyph, code.value())), Some(('#', 41)));
        assert_eq!(art.cell(2, 0), None);
    }

    #[test]
    fn parse_rejects_ragged_rows_and_bad_cells() {
        assert!(AnsiArt::parse("ragged", "41 41\n41\n", 0, 0).is_err());
        assert!(AnsiArt::parse("code", "38\n", 0, 0).is_err());
        assert!(AnsiArt::parse("glyph", "31:ab\n", 0, 0).is_err());
    }
}
