//! Styled text fragments for report paragraphs.
//!
//! The report only ever emphasises the label of a key/value line, so a [`Span`] is plain text
//! with an optional bold flag.  Spans stay independent of `genpdf` elements so the content model
//! can be inspected in tests before anything is laid out.

use genpdf::style::{Style, StyledString};

/// A slice of paragraph text, optionally bold.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Span {
    text: String,
    bold: bool,
}

impl Span {
    /// Creates an unstyled span.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    /// Returns the raw text contained in this span.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the span should be rendered in bold.
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Marks the span as bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Converts the span to a [`StyledString`] for use in `genpdf` paragraphs.
    pub fn to_styled_string(&self) -> StyledString {
        let mut style = Style::new();
        if self.bold {
            style.set_bold();
        }
        StyledString::new(self.text.clone(), style)
    }
}

impl From<&Span> for StyledString {
    fn from(span: &Span) -> Self {
        span.to_styled_string()
    }
}

/// Builds the `Label: value` span pair used for the report's key/value lines.
///
/// Only the label (including its colon) is bold; the value is kept verbatim so user supplied text
/// is never interpreted as markup.
pub fn labeled(label: &str, value: impl Into<String>) -> Vec<Span> {
    vec![
        Span::new(format!("{}:", label)).bold(),
        Span::new(format!(" {}", value.into())),
    ]
}

/// Concatenates the text of all spans, dropping styling.
pub fn plain_text<'a, I>(spans: I) -> String
where
    I: IntoIterator<Item = &'a Span>,
{
    spans.into_iter().map(Span::text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_spans_carry_a_bold_style() {
        let styled = Span::new("Severity:").bold().to_styled_string();
        assert_eq!(styled.s, "Severity:");
        assert!(styled.style.is_bold());
        assert!(!Span::new("High").to_styled_string().style.is_bold());
    }

    #[test]
    fn labeled_only_bolds_the_label() {
        let spans = labeled("Filename", "resume **final**.pdf");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text(), "Filename:");
        assert!(spans[0].is_bold());
        assert_eq!(spans[1].text(), " resume **final**.pdf");
        assert!(!spans[1].is_bold());
    }

    #[test]
    fn plain_text_joins_spans() {
        let spans = labeled("Severity", "High");
        assert_eq!(plain_text(&spans), "Severity: High");
    }
}
