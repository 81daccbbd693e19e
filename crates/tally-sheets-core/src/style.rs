//! Visual style payloads
//!
//! A deliberately small model: the engine adapter translates these into the
//! wrapped library's native format objects. Anything beyond fill, font
//! emphasis, and wrapping is out of scope.

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    /// White (0xFFFFFF)
    pub const WHITE: Color = Color(0xFF_FF_FF);
    /// Black (0x000000)
    pub const BLACK: Color = Color(0x00_00_00);
    /// Dark blue (0x00008B), the header fill of the default preset
    pub const DARK_BLUE: Color = Color(0x00_00_8B);
    /// Dark green (0x006400)
    pub const DARK_GREEN: Color = Color(0x00_64_00);
    /// Red (0xFF0000)
    pub const RED: Color = Color(0xFF_00_00);

    /// The raw RGB value
    pub fn rgb(&self) -> u32 {
        self.0
    }
}

/// A visual style applied to one or more cells
///
/// Applied verbatim by the workbook engine; the layout algorithm only
/// decides *where* a style lands, never what it means.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Solid fill color
    pub fill: Option<Color>,
    /// Bold font
    pub bold: bool,
    /// Italic font
    pub italic: bool,
    /// Font color
    pub font_color: Option<Color>,
    /// Wrap text within the cell
    pub text_wrap: bool,
}

impl Style {
    /// Create an empty style
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fill color
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    /// Set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Set the font color
    pub fn with_font_color(mut self, color: Color) -> Self {
        self.font_color = Some(color);
        self
    }

    /// Enable text wrapping
    pub fn with_text_wrap(mut self) -> Self {
        self.text_wrap = true;
        self
    }

    /// The default header preset: solid dark-blue fill, bold white font,
    /// wrapped text
    pub fn header() -> Self {
        Style::new()
            .with_fill(Color::DARK_BLUE)
            .with_bold()
            .with_font_color(Color::WHITE)
            .with_text_wrap()
    }

    /// Check if this style sets nothing
    pub fn is_plain(&self) -> bool {
        *self == Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_preset() {
        let style = Style::header();
        assert_eq!(style.fill, Some(Color::DARK_BLUE));
        assert_eq!(style.font_color, Some(Color::WHITE));
        assert!(style.bold);
        assert!(style.text_wrap);
        assert!(!style.italic);
    }

    #[test]
    fn builder_chain() {
        let style = Style::new().with_italic().with_font_color(Color::RED);
        assert!(style.italic);
        assert!(!style.bold);
        assert_eq!(style.font_color, Some(Color::RED));
        assert!(!style.is_plain());
        assert!(Style::new().is_plain());
    }
}
