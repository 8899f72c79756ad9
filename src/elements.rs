//! Layout elements built on top of `genpdf` primitives.
//!
//! `genpdf` ships neither fixed-height gaps nor filled table cells, both of which the report
//! needs.  The elements here draw directly into the render area the same way the stock elements
//! do.

use genpdf::error::Error;
use genpdf::style::{Color, Style, StyledString};
use genpdf::{render, Element, Mm, Position, RenderResult, Size};

use crate::model::HorizontalAlignment;

/// Distance between the strokes used to paint a background fill.
const FILL_STEP_MM: f64 = 0.25;

/// Converts a millimetre value into the layout engine's unit type.
pub fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

/// Converts the layout engine's unit type back into plain millimetres.
pub fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

/// Converts typographic points into millimetres.
pub fn mm_from_pt(points: f64) -> Mm {
    Mm::from(printpdf::Mm::from(printpdf::Pt(points)))
}

/// A vertical gap of fixed height.
///
/// The gap never asks for more room than the current page has left, so a gap at the bottom of a
/// page simply ends it instead of being carried over.
#[derive(Clone, Copy, Debug)]
pub struct VerticalSpace {
    height: Mm,
}

impl VerticalSpace {
    /// Creates a gap of `height`.
    pub fn new(height: impl Into<Mm>) -> Self {
        Self {
            height: height.into(),
        }
    }

    /// Creates a gap measured in points.
    pub fn from_pt(points: f64) -> Self {
        Self::new(mm_from_pt(points))
    }
}

impl Element for VerticalSpace {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let available = area.size().height;
        let height = if self.height > available {
            available
        } else {
            self.height
        };

        let mut result = RenderResult::default();
        result.size = Size::new(0, height);
        Ok(result)
    }
}

/// Padding around the text of a [`ShadedCell`].
#[derive(Clone, Copy, Debug)]
pub struct CellPadding {
    top: Mm,
    bottom: Mm,
    horizontal: Mm,
}

impl CellPadding {
    /// Uniform padding given in points.
    pub fn uniform_pt(points: f64) -> Self {
        let padding = mm_from_pt(points);
        Self {
            top: padding,
            bottom: padding,
            horizontal: padding,
        }
    }

    /// Replaces the bottom padding, given in points.
    pub fn with_bottom_pt(mut self, points: f64) -> Self {
        self.bottom = mm_from_pt(points);
        self
    }
}

/// A single-line table cell with an optional background fill.
///
/// The fill covers the whole cell width and the padded text height.  Text wider than the cell is
/// not wrapped.
pub struct ShadedCell {
    text: String,
    style: Style,
    background: Option<Color>,
    alignment: HorizontalAlignment,
    padding: CellPadding,
}

impl ShadedCell {
    /// Creates a cell with the given text and default padding.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::new(),
            background: None,
            alignment: HorizontalAlignment::Left,
            padding: CellPadding::uniform_pt(3.0),
        }
    }

    /// Sets the text style and returns the updated cell.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Sets the background fill and returns the updated cell.
    pub fn with_background(mut self, background: impl Into<Option<Color>>) -> Self {
        self.background = background.into();
        self
    }

    /// Sets the horizontal alignment and returns the updated cell.
    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Sets the padding and returns the updated cell.
    pub fn with_padding(mut self, padding: CellPadding) -> Self {
        self.padding = padding;
        self
    }

    fn fill(area: &render::Area<'_>, color: Color, width: Mm, height: Mm) {
        let line_style = Style::new().with_color(color);
        let height_mm = mm_to_f64(height);
        let mut offset = 0.0;
        while offset <= height_mm {
            let y = mm_from_f64(offset);
            area.draw_line(
                vec![Position::new(0, y), Position::new(width, y)],
                line_style,
            );
            offset += FILL_STEP_MM;
        }
    }
}

impl Element for ShadedCell {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let style = style.and(self.style);
        let mut result = RenderResult::default();

        let line_height = style.line_height(&context.font_cache);
        let height = self.padding.top + line_height + self.padding.bottom;
        if height > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let width = area.size().width;
        if let Some(color) = self.background {
            Self::fill(&area, color, width, height);
        }

        let text_width = StyledString::new(self.text.clone(), style).width(&context.font_cache);
        let x_offset = match self.alignment {
            HorizontalAlignment::Left => self.padding.horizontal,
            HorizontalAlignment::Center => (width - text_width) / 2.0,
            HorizontalAlignment::Right => width - text_width - self.padding.horizontal,
        };

        match area.text_section(
            &context.font_cache,
            Position::new(x_offset, self.padding.top),
            style,
        ) {
            Some(mut section) => section.print_str(&self.text, style)?,
            None => {
                result.has_more = true;
                return Ok(result);
            }
        }

        result.size = Size::new(width, height);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_convert_to_millimetres() {
        let inch = mm_to_f64(mm_from_pt(72.0));
        assert!((inch - 25.4).abs() < 1e-3, "72pt should be one inch, got {inch}mm");
    }

    #[test]
    fn millimetres_round_trip() {
        assert!((mm_to_f64(mm_from_f64(12.5)) - 12.5).abs() < 1e-9);
    }
}
