//! Assembles the report's content model from an [`AnalysisReport`].

use genpdf::style::Color;

use crate::model::{
    DocumentBlock, HeadingLevel, HorizontalAlignment, RichParagraph, TableBlock, TableStyle,
};
use crate::report::{AnalysisReport, BiasFlag};
use crate::richtext::{labeled, Span};

/// Title printed at the top of every report.
pub const REPORT_TITLE: &str = "BiasAudit.ai - Resume Analysis Report";
/// Heading of the findings section.
pub const FINDINGS_HEADING: &str = "Detailed Bias Findings";
/// Sentence printed when the report carries no flags.
pub const NO_FINDINGS_TEXT: &str = "No significant bias markers detected.";
/// Disclaimer printed at the end of every report.
pub const DISCLAIMER_TEXT: &str =
    "Legal Disclaimer: This tool provides bias risk indicators only and does not determine protected attributes.";

/// Width of each score table column, in points.
pub const SCORE_COLUMN_WIDTH_PT: f64 = 200.0;

const GREY: Color = Color::Rgb(128, 128, 128);
const WHITE_SMOKE: Color = Color::Rgb(245, 245, 245);
const BEIGE: Color = Color::Rgb(245, 245, 220);

const SMALL_GAP_PT: f64 = 12.0;
const TABLE_GAP_PT: f64 = 24.0;
const DISCLAIMER_GAP_PT: f64 = 48.0;
const DISCLAIMER_FONT_SIZE: u8 = 8;

/// Builds the ordered block sequence for `report`.
///
/// The structure never depends on the report beyond the number of flags: title, metadata, score
/// table, findings heading, findings (or the no-findings sentence), disclaimer.
pub fn build_blocks(report: &AnalysisReport) -> Vec<DocumentBlock> {
    let mut blocks = vec![
        DocumentBlock::heading(REPORT_TITLE, HeadingLevel::Title),
        DocumentBlock::spacer(SMALL_GAP_PT),
        DocumentBlock::paragraph(labeled("Filename", report.filename())),
        DocumentBlock::paragraph(labeled("Timestamp", report.timestamp())),
        DocumentBlock::spacer(SMALL_GAP_PT),
        score_table(report).into(),
        DocumentBlock::spacer(TABLE_GAP_PT),
        DocumentBlock::heading(FINDINGS_HEADING, HeadingLevel::Section),
        DocumentBlock::spacer(SMALL_GAP_PT),
    ];

    if report.bias_flags().is_empty() {
        blocks.push(DocumentBlock::paragraph(vec![Span::new(NO_FINDINGS_TEXT)]));
    } else {
        for flag in report.bias_flags() {
            blocks.extend(flag_blocks(flag));
        }
    }

    blocks.push(DocumentBlock::spacer(DISCLAIMER_GAP_PT));
    blocks.push(disclaimer().into());
    blocks
}

/// The fixed styling of the score table.
pub fn score_table_style() -> TableStyle {
    TableStyle {
        header_background: GREY,
        header_foreground: WHITE_SMOKE,
        header_bold: true,
        header_bottom_padding_pt: 12.0,
        body_background: BEIGE,
        grid: true,
        cell_alignment: HorizontalAlignment::Center,
        ..TableStyle::default()
    }
}

fn score_table(report: &AnalysisReport) -> TableBlock {
    TableBlock::new(
        ["Metric", "Value"],
        [
            [
                "Overall Fairness Score".to_owned(),
                format!("{}/100", report.score()),
            ],
            ["Risk Level".to_owned(), report.risk_level().to_owned()],
        ],
    )
    .with_column_widths_pt([SCORE_COLUMN_WIDTH_PT, SCORE_COLUMN_WIDTH_PT])
    .with_style(score_table_style())
}

fn flag_blocks(flag: &BiasFlag) -> [DocumentBlock; 5] {
    [
        DocumentBlock::paragraph(labeled("Category", flag.category())),
        DocumentBlock::paragraph(labeled("Description", flag.description())),
        DocumentBlock::paragraph(labeled("Severity", flag.severity())),
        DocumentBlock::paragraph(labeled("AI Suggestion", flag.suggestion())),
        DocumentBlock::spacer(SMALL_GAP_PT),
    ]
}

fn disclaimer() -> RichParagraph {
    RichParagraph::new(vec![Span::new(DISCLAIMER_TEXT)])
        .with_alignment(HorizontalAlignment::Center)
        .with_font_size(DISCLAIMER_FONT_SIZE)
        .with_color(GREY)
}
