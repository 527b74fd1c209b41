use std::fmt;

/// Row-major characters, one per resampled pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextGrid {
    pub width: u32,
    pub height: u32,
    chars: Vec<char>,
}

impl TextGrid {
    pub fn new(width: u32, height: u32, chars: Vec<char>) -> Self {
        assert_eq!(width as usize * height as usize, chars.len());
        Self { width, height, chars }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        let width = (self.width as usize).max(1);
        self.chars.chunks(width).map(|row| row.iter().collect::<String>())
    }
}

/// Lines joined by `\n`, without a trailing line break.
impl fmt::Display for TextGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.rows().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&row)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellGlyph {
    pub ch: char,
    /// Foreground color encoded as RGB bytes.
    pub fg: [u8; 3],
}

/// Text grid with a display color attached to every cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphGrid {
    pub width: u32,
    pub height: u32,
    pub cells: Vec<CellGlyph>,
}

impl GlyphGrid {
    pub fn new(width: u32, height: u32, cells: Vec<CellGlyph>) -> Self {
        assert_eq!(width as usize * height as usize, cells.len());
        Self { width, height, cells }
    }

    /// Pairs each character with its sampled color.
    pub fn colorize(text: &TextGrid, colors: &[[u8; 3]]) -> Self {
        assert_eq!(text.chars().len(), colors.len());
        let cells = text
            .chars()
            .iter()
            .zip(colors)
            .map(|(&ch, &fg)| CellGlyph { ch, fg })
            .collect();
        Self::new(text.width, text.height, cells)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellGlyph]> + '_ {
        self.cells.chunks((self.width as usize).max(1))
    }
}
