//! Data structures describing the logical content of a report document.
//!
//! The types in this module form the ordered content model handed to the layout engine.  They
//! avoid referencing `genpdf` elements directly so the sequence can be built and inspected without
//! loading fonts or touching the filesystem; only colours are shared with the renderer.

use genpdf::style::Color;

use crate::richtext::{self, Span};

/// Horizontal placement of text and tables within the text column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
    /// Right aligned content.
    Right,
}

impl From<HorizontalAlignment> for genpdf::Alignment {
    fn from(alignment: HorizontalAlignment) -> Self {
        match alignment {
            HorizontalAlignment::Left => genpdf::Alignment::Left,
            HorizontalAlignment::Center => genpdf::Alignment::Center,
            HorizontalAlignment::Right => genpdf::Alignment::Right,
        }
    }
}

/// Rich text paragraph carrying inline styling information and paragraph-level styling.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RichParagraph {
    spans: Vec<Span>,
    alignment: HorizontalAlignment,
    font_size: Option<u8>,
    color: Option<Color>,
}

impl RichParagraph {
    /// Creates a paragraph from the provided spans using left alignment and the body style.
    pub fn new(spans: impl Into<Vec<Span>>) -> Self {
        Self {
            spans: spans.into(),
            ..Self::default()
        }
    }

    /// Returns the spans that make up the paragraph.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Returns the configured alignment.
    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    /// Returns the font size override in points, if any.
    pub fn font_size(&self) -> Option<u8> {
        self.font_size
    }

    /// Returns the paragraph colour, if any.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Returns the text of the paragraph without styling.
    pub fn plain_text(&self) -> String {
        richtext::plain_text(&self.spans)
    }

    /// Sets the alignment and returns the updated paragraph.
    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Overrides the font size and returns the updated paragraph.
    pub fn with_font_size(mut self, font_size: impl Into<Option<u8>>) -> Self {
        self.font_size = font_size.into();
        self
    }

    /// Sets the paragraph colour and returns the updated paragraph.
    pub fn with_color(mut self, color: impl Into<Option<Color>>) -> Self {
        self.color = color.into();
        self
    }
}

/// Heading levels used by the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeadingLevel {
    /// Large, centred document title.
    Title,
    /// Section heading inside the body.
    Section,
}

impl HeadingLevel {
    /// Font size in points.
    pub fn font_size(self) -> u8 {
        match self {
            HeadingLevel::Title => 24,
            HeadingLevel::Section => 14,
        }
    }

    /// Gap above the heading in points.
    pub fn space_before_pt(self) -> f64 {
        match self {
            HeadingLevel::Title => 0.0,
            HeadingLevel::Section => 10.0,
        }
    }

    /// Gap below the heading in points.
    pub fn space_after_pt(self) -> f64 {
        match self {
            HeadingLevel::Title => 30.0,
            HeadingLevel::Section => 6.0,
        }
    }

    /// Default alignment for the level.
    pub fn alignment(self) -> HorizontalAlignment {
        match self {
            HeadingLevel::Title => HorizontalAlignment::Center,
            HeadingLevel::Section => HorizontalAlignment::Left,
        }
    }
}

/// A bold heading line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heading {
    text: String,
    level: HeadingLevel,
}

impl Heading {
    /// Creates a heading with the given level.
    pub fn new(text: impl Into<String>, level: HeadingLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }

    /// Returns the heading text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the heading level.
    pub fn level(&self) -> HeadingLevel {
        self.level
    }
}

/// Visual styling of a [`TableBlock`].
#[derive(Clone, Debug, PartialEq)]
pub struct TableStyle {
    /// Fill behind the header row.
    pub header_background: Color,
    /// Text colour of the header row.
    pub header_foreground: Color,
    /// Whether header text is bold.
    pub header_bold: bool,
    /// Extra space below header text, in points.
    pub header_bottom_padding_pt: f64,
    /// Fill behind body rows.
    pub body_background: Color,
    /// Whether inner and outer grid lines are drawn.
    pub grid: bool,
    /// Alignment of every cell.
    pub cell_alignment: HorizontalAlignment,
    /// Padding around cell text, in points.
    pub cell_padding_pt: f64,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            header_background: Color::Rgb(255, 255, 255),
            header_foreground: Color::Rgb(0, 0, 0),
            header_bold: false,
            header_bottom_padding_pt: 3.0,
            body_background: Color::Rgb(255, 255, 255),
            grid: false,
            cell_alignment: HorizontalAlignment::Left,
            cell_padding_pt: 3.0,
        }
    }
}

/// A table whose first row is the header.
#[derive(Clone, Debug, PartialEq)]
pub struct TableBlock {
    rows: Vec<Vec<String>>,
    column_widths_pt: Vec<f64>,
    style: TableStyle,
}

impl TableBlock {
    /// Creates a table with the header row followed by `rows`.
    pub fn new<H, R, C>(header: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let mut all_rows = vec![header.into_iter().map(Into::into).collect::<Vec<_>>()];
        all_rows.extend(
            rows.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect()),
        );
        let columns = all_rows[0].len();
        Self {
            rows: all_rows,
            column_widths_pt: vec![1.0; columns],
            style: TableStyle::default(),
        }
    }

    /// Returns every row, header first.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns the header row.
    pub fn header(&self) -> &[String] {
        &self.rows[0]
    }

    /// Returns the rows below the header.
    pub fn body(&self) -> &[Vec<String>] {
        &self.rows[1..]
    }

    /// Returns the number of columns.
    pub fn column_count(&self) -> usize {
        self.column_widths_pt.len()
    }

    /// Returns the fixed column widths in points.
    pub fn column_widths_pt(&self) -> &[f64] {
        &self.column_widths_pt
    }

    /// Returns the combined width of all columns in points.
    pub fn width_pt(&self) -> f64 {
        self.column_widths_pt.iter().sum()
    }

    /// Returns the table styling.
    pub fn style(&self) -> &TableStyle {
        &self.style
    }

    /// Sets fixed column widths and returns the updated table.
    ///
    /// Widths beyond the number of columns are ignored; missing ones keep their previous value.
    pub fn with_column_widths_pt(mut self, widths: impl IntoIterator<Item = f64>) -> Self {
        for (slot, width) in self.column_widths_pt.iter_mut().zip(widths) {
            *slot = width;
        }
        self
    }

    /// Sets the styling and returns the updated table.
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }
}

/// Individual content blocks in reading order.
#[derive(Clone, Debug, PartialEq)]
pub enum DocumentBlock {
    /// Title or section heading.
    Heading(Heading),
    /// Styled paragraph content.
    Paragraph(RichParagraph),
    /// Vertical gap with a height in points.
    Spacer(f64),
    /// Styled table.
    Table(TableBlock),
}

impl DocumentBlock {
    /// Convenience helper for building a heading block.
    pub fn heading(text: impl Into<String>, level: HeadingLevel) -> Self {
        Self::Heading(Heading::new(text, level))
    }

    /// Convenience helper for building a paragraph block.
    pub fn paragraph(spans: impl Into<Vec<Span>>) -> Self {
        Self::Paragraph(RichParagraph::new(spans))
    }

    /// Convenience helper for a vertical gap of `height_pt` points.
    pub fn spacer(height_pt: f64) -> Self {
        Self::Spacer(height_pt)
    }

    /// Returns the textual content of the block; table cells are joined with ` | ` per row and
    /// rows with newlines.  Spacers have no text.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Heading(heading) => heading.text().to_owned(),
            Self::Paragraph(paragraph) => paragraph.plain_text(),
            Self::Spacer(_) => String::new(),
            Self::Table(table) => table
                .rows()
                .iter()
                .map(|row| row.join(" | "))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Returns whether the block is a spacer.
    pub fn is_spacer(&self) -> bool {
        matches!(self, Self::Spacer(_))
    }
}

impl From<RichParagraph> for DocumentBlock {
    fn from(paragraph: RichParagraph) -> Self {
        Self::Paragraph(paragraph)
    }
}

impl From<TableBlock> for DocumentBlock {
    fn from(table: TableBlock) -> Self {
        Self::Table(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_keeps_header_first() {
        let table = TableBlock::new(["Metric", "Value"], [["Risk Level", "Low"]]);
        assert_eq!(table.header(), ["Metric", "Value"]);
        assert_eq!(table.body().len(), 1);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn column_widths_apply_in_order() {
        let table = TableBlock::new(["a", "b"], Vec::<Vec<String>>::new())
            .with_column_widths_pt([200.0, 150.0, 99.0]);
        assert_eq!(table.column_widths_pt(), [200.0, 150.0]);
        assert_eq!(table.width_pt(), 350.0);
    }

    #[test]
    fn table_plain_text_joins_cells() {
        let block = DocumentBlock::from(TableBlock::new(["a", "b"], [["c", "d"]]));
        assert_eq!(block.plain_text(), "a | b\nc | d");
    }

    #[test]
    fn spacers_have_no_text() {
        let block = DocumentBlock::spacer(12.0);
        assert!(block.is_spacer());
        assert!(block.plain_text().is_empty());
    }
}
