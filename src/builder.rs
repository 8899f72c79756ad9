//! Document construction on top of `genpdf`.
//!
//! [`DocumentBuilder`] prepares an empty `genpdf::Document` with the page geometry from
//! [`RenderOptions`]; [`PdfBuilder`] turns a sequence of [`DocumentBlock`]s into elements on that
//! document and encodes it.  Pagination is left entirely to `genpdf`.

use std::path::{Path, PathBuf};

use genpdf::elements::{FrameCellDecorator, Paragraph, StyledElement, TableLayout};
use genpdf::style::Style;
use genpdf::{self, Element, Margins, Mm, SimplePageDecorator, Size};
use log::debug;

use crate::elements::{mm_from_f64, mm_from_pt, mm_to_f64, CellPadding, ShadedCell, VerticalSpace};
use crate::error::PdfBuildError;
use crate::fonts;
use crate::model::{DocumentBlock, Heading, RichParagraph, TableBlock};

/// US Letter width in millimetres (8.5in).
pub const LETTER_WIDTH_MM: f64 = 215.9;
/// US Letter height in millimetres (11in).
pub const LETTER_HEIGHT_MM: f64 = 279.4;
/// Margin applied on every side of the page by default, in millimetres (one inch).
pub const DEFAULT_MARGIN_MM: f64 = 25.4;
/// Body text size in points.
pub const DEFAULT_FONT_SIZE: u8 = 10;
/// Line spacing factor applied to body text.
pub const DEFAULT_LINE_SPACING: f64 = 1.2;

/// Exact US Letter page size; `genpdf::PaperSize::Letter` is rounded to whole millimetres.
pub fn letter_size() -> Size {
    Size::new(mm_from_f64(LETTER_WIDTH_MM), mm_from_f64(LETTER_HEIGHT_MM))
}

/// Settings for turning a block sequence into a PDF.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    paper_size: Size,
    margin_mm: f64,
    font_size: u8,
    title: Option<String>,
    fonts_dir: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            paper_size: letter_size(),
            margin_mm: DEFAULT_MARGIN_MM,
            font_size: DEFAULT_FONT_SIZE,
            title: None,
            fonts_dir: None,
        }
    }
}

impl RenderOptions {
    /// Creates the default options: letter paper, one inch margins, 10pt body text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the paper size.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = paper_size.into();
        self
    }

    /// Sets the margin applied on every side, in millimetres.
    pub fn with_margin_mm(mut self, margin_mm: f64) -> Self {
        self.margin_mm = margin_mm;
        self
    }

    /// Sets the body font size in points.
    pub fn with_font_size(mut self, font_size: u8) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the title stored in the PDF metadata.
    pub fn with_title(mut self, title: impl Into<Option<String>>) -> Self {
        self.title = title.into();
        self
    }

    /// Searches `fonts_dir` for fonts before any other location.
    pub fn with_fonts_dir(mut self, fonts_dir: impl Into<Option<PathBuf>>) -> Self {
        self.fonts_dir = fonts_dir.into();
        self
    }

    /// Returns the paper size.
    pub fn paper_size(&self) -> Size {
        self.paper_size
    }

    /// Returns the metadata title, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the font directory override, if any.
    pub fn fonts_dir(&self) -> Option<&Path> {
        self.fonts_dir.as_deref()
    }

    /// Width available to content between the side margins.
    pub fn text_width(&self) -> Mm {
        let width = mm_to_f64(self.paper_size.width) - 2.0 * self.margin_mm;
        mm_from_f64(width.max(0.0))
    }
}

/// Builder for `genpdf::Document` instances configured from [`RenderOptions`].
pub struct DocumentBuilder<'a> {
    options: &'a RenderOptions,
}

impl<'a> DocumentBuilder<'a> {
    /// Creates a new builder for the given options.
    pub fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }

    /// Loads fonts and builds an empty document.
    pub fn build(self) -> Result<genpdf::Document, PdfBuildError> {
        let font_family =
            fonts::default_font_family(self.options.fonts_dir()).map_err(PdfBuildError::FontLoad)?;
        let mut document = genpdf::Document::new(font_family);

        document.set_paper_size(self.options.paper_size);
        document.set_font_size(self.options.font_size);
        document.set_line_spacing(DEFAULT_LINE_SPACING);
        if let Some(title) = &self.options.title {
            document.set_title(title.clone());
        }

        let mut decorator = SimplePageDecorator::new();
        let margin = mm_from_f64(self.options.margin_mm);
        decorator.set_margins(Margins::trbl(margin, margin, margin, margin));
        document.set_page_decorator(decorator);

        Ok(document)
    }
}

/// The encoded PDF document.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    /// Raw PDF bytes.
    pub bytes: Vec<u8>,
}

/// Collects blocks and renders them into a PDF held in memory.
#[derive(Default)]
pub struct PdfBuilder {
    options: RenderOptions,
    blocks: Vec<DocumentBlock>,
}

impl PdfBuilder {
    /// Creates a builder with default options and no content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Appends a block.
    pub fn add_block(mut self, block: DocumentBlock) -> Self {
        self.blocks.push(block);
        self
    }

    /// Appends blocks in order.
    pub fn add_blocks<I>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = DocumentBlock>,
    {
        self.blocks.extend(blocks);
        self
    }

    /// Returns the collected blocks.
    pub fn blocks(&self) -> &[DocumentBlock] {
        &self.blocks
    }

    /// Lays out all blocks and encodes the document.
    pub fn render(self) -> Result<RenderedPdf, PdfBuildError> {
        let mut document = DocumentBuilder::new(&self.options).build()?;
        let text_width = self.options.text_width();

        for block in &self.blocks {
            push_block(&mut document, block, text_width)?;
        }

        let mut bytes = Vec::new();
        document.render(&mut bytes).map_err(PdfBuildError::Layout)?;
        debug!(
            "Rendered {} blocks into {} bytes",
            self.blocks.len(),
            bytes.len()
        );
        Ok(RenderedPdf { bytes })
    }
}

fn push_block(
    document: &mut genpdf::Document,
    block: &DocumentBlock,
    text_width: Mm,
) -> Result<(), PdfBuildError> {
    match block {
        DocumentBlock::Heading(heading) => push_heading(document, heading),
        DocumentBlock::Paragraph(paragraph) => document.push(paragraph_element(paragraph)),
        DocumentBlock::Spacer(height_pt) => document.push(VerticalSpace::from_pt(*height_pt)),
        DocumentBlock::Table(table) => {
            let padding = table_side_padding(table, text_width);
            document.push(table_element(table)?.padded(Margins::trbl(0, padding, 0, padding)));
        }
    }
    Ok(())
}

fn push_heading(document: &mut genpdf::Document, heading: &Heading) {
    let level = heading.level();
    if level.space_before_pt() > 0.0 {
        document.push(VerticalSpace::from_pt(level.space_before_pt()));
    }

    let mut paragraph = Paragraph::new(heading.text());
    paragraph.set_alignment(level.alignment().into());
    document.push(paragraph.styled(Style::new().bold().with_font_size(level.font_size())));

    if level.space_after_pt() > 0.0 {
        document.push(VerticalSpace::from_pt(level.space_after_pt()));
    }
}

fn paragraph_element(paragraph: &RichParagraph) -> StyledElement<Paragraph> {
    let mut element = Paragraph::default();
    for span in paragraph.spans() {
        element.push(span);
    }
    element.set_alignment(paragraph.alignment().into());

    let mut style = Style::new();
    if let Some(size) = paragraph.font_size() {
        style.set_font_size(size);
    }
    if let Some(color) = paragraph.color() {
        style.set_color(color);
    }
    element.styled(style)
}

/// Horizontal padding that centres a fixed-width table in the text column.
fn table_side_padding(table: &TableBlock, text_width: Mm) -> Mm {
    let spare = mm_to_f64(text_width) - mm_to_f64(mm_from_pt(table.width_pt()));
    mm_from_f64((spare / 2.0).max(0.0))
}

fn column_weights(table: &TableBlock) -> Vec<usize> {
    table
        .column_widths_pt()
        .iter()
        .map(|width| width.round().max(1.0) as usize)
        .collect()
}

fn table_element(table: &TableBlock) -> Result<TableLayout, PdfBuildError> {
    let style = table.style();
    let mut layout = TableLayout::new(column_weights(table));
    if style.grid {
        layout.set_cell_decorator(FrameCellDecorator::new(true, true, false));
    }

    for (index, cells) in table.rows().iter().enumerate() {
        let is_header = index == 0;
        let mut text_style = Style::new();
        let (background, padding) = if is_header {
            text_style.set_color(style.header_foreground);
            if style.header_bold {
                text_style.set_bold();
            }
            let padding = CellPadding::uniform_pt(style.cell_padding_pt)
                .with_bottom_pt(style.header_bottom_padding_pt);
            (style.header_background, padding)
        } else {
            (
                style.body_background,
                CellPadding::uniform_pt(style.cell_padding_pt),
            )
        };

        let mut row = layout.row();
        for column in 0..table.column_count() {
            let text = cells.get(column).map(String::as_str).unwrap_or_default();
            row.push_element(
                ShadedCell::new(text)
                    .with_style(text_style)
                    .with_background(background)
                    .with_alignment(style.cell_alignment)
                    .with_padding(padding),
            );
        }
        row.push().map_err(PdfBuildError::Layout)?;
    }

    Ok(layout)
}
