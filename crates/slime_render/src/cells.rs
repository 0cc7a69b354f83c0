use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Color, Print, SetBackgroundColor, SetForegroundColor};
use image::Rgba;

/// Color encoded as RGB bytes.
pub type Rgb = [u8; 3];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Blank,
    UpperHalf,
    LowerHalf,
}

impl Glyph {
    pub fn as_char(self) -> char {
        match self {
            Glyph::Blank => ' ',
            Glyph::UpperHalf => '▀',
            Glyph::LowerHalf => '▄',
        }
    }
}

/// One terminal cell covering two vertically stacked pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerminalCell {
    pub glyph: Glyph,
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
}

impl TerminalCell {
    /// Picks glyph and colors for an upper/lower pixel pair.
    ///
    /// Alpha is binary here: zero is transparent, anything else is opaque.
    pub fn compose(upper: Rgba<u8>, lower: Rgba<u8>) -> Self {
        match (upper[3] == 0, lower[3] == 0) {
            (true, true) => Self { glyph: Glyph::Blank, fg: None, bg: None },
            (true, false) => Self { glyph: Glyph::LowerHalf, fg: Some(rgb(lower)), bg: None },
            (false, true) => Self { glyph: Glyph::UpperHalf, fg: Some(rgb(upper)), bg: None },
            (false, false) => {
                Self { glyph: Glyph::LowerHalf, fg: Some(rgb(lower)), bg: Some(rgb(upper)) }
            },
        }
    }

    /// Writes the cell, resetting any color it set so no state leaks into
    /// the next cell.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if let Some(fg) = self.fg {
            queue!(out, SetForegroundColor(true_color(fg)))?;
        }
        if let Some(bg) = self.bg {
            queue!(out, SetBackgroundColor(true_color(bg)))?;
        }

        queue!(out, Print(self.glyph.as_char()))?;

        if self.fg.is_some() {
            queue!(out, SetForegroundColor(Color::Reset))?;
        }
        if self.bg.is_some() {
            queue!(out, SetBackgroundColor(Color::Reset))?;
        }
        Ok(())
    }
}

fn rgb(pixel: Rgba<u8>) -> Rgb {
    [pixel[0], pixel[1], pixel[2]]
}

fn true_color([r, g, b]: Rgb) -> Color {
    Color::Rgb { r, g, b }
}
