//! Renders resume bias-audit results into paginated PDF reports.
//!
//! The pipeline is linear: the JSON payload is resolved into an [`AnalysisReport`], turned into an
//! ordered list of [`DocumentBlock`]s by [`content::build_blocks`], and laid out by `genpdf`
//! through [`PdfBuilder`].  The PDF is encoded in memory and only written out once layout has
//! succeeded, so a failed run never leaves a file behind.

pub mod builder;
pub mod content;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod model;
pub mod report;
pub mod richtext;

use std::fs;
use std::path::Path;

use log::debug;

pub use builder::{PdfBuilder, RenderOptions, RenderedPdf};
pub use error::{PdfBuildError, ReportError};
pub use model::DocumentBlock;
pub use report::{AnalysisReport, BiasFlag, Score};

/// Renders `json_text` into a letter-size PDF at `output_path`.
pub fn render(json_text: &str, output_path: impl AsRef<Path>) -> Result<(), ReportError> {
    render_with_options(json_text, output_path, &RenderOptions::default())
}

/// Renders `json_text` into a PDF at `output_path` using `options`.
pub fn render_with_options(
    json_text: &str,
    output_path: impl AsRef<Path>,
    options: &RenderOptions,
) -> Result<(), ReportError> {
    let output_path = output_path.as_ref();
    let bytes = render_to_bytes(json_text, options)?;
    fs::write(output_path, &bytes).map_err(|err| ReportError::io(output_path, err))?;
    debug!("Wrote {} ({} bytes)", output_path.display(), bytes.len());
    Ok(())
}

/// Renders `json_text` into PDF bytes without touching the filesystem.
pub fn render_to_bytes(json_text: &str, options: &RenderOptions) -> Result<Vec<u8>, ReportError> {
    let report = AnalysisReport::from_json(json_text)?;
    debug!(
        "Parsed report for {} with {} flags",
        report.filename(),
        report.bias_flags().len()
    );

    let mut options = options.clone();
    if options.title().is_none() {
        options = options.with_title(content::REPORT_TITLE.to_owned());
    }

    let pdf = PdfBuilder::new()
        .with_options(options)
        .add_blocks(content::build_blocks(&report))
        .render()?;
    Ok(pdf.bytes)
}
