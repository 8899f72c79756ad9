//! The analysis report consumed by the renderer.
//!
//! Upstream producers are not trusted to send complete documents, so every field is optional on
//! the wire.  Missing values are resolved to the defaults below while deserializing; nothing else
//! in the crate needs to know which fields were present.  Values of an unexpected type are not
//! rejected: they are carried through as their JSON text and end up verbatim in the document.

use std::fmt;

use chrono::{DateTime, Local, TimeZone};
use serde::Deserialize;
use serde_json::{Map, Number, Value};

use crate::error::ReportError;

/// Filename shown when the report does not name one.
pub const DEFAULT_FILENAME: &str = "Unknown";
/// Risk level shown when the report does not carry one.
pub const DEFAULT_RISK_LEVEL: &str = "N/A";
/// Category shown for a flag without one.
pub const DEFAULT_CATEGORY: &str = "General";
/// Description shown for a flag without one.
pub const DEFAULT_DESCRIPTION: &str = "N/A";
/// Severity shown for a flag without one.
pub const DEFAULT_SEVERITY: &str = "Low";
/// Suggestion shown for a flag without one.
pub const DEFAULT_SUGGESTION: &str = "[Placeholder: Consider using more inclusive language]";
/// `strftime` pattern used for the fallback timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Overall fairness score as received from the analysis engine.
#[derive(Clone, Debug, PartialEq)]
pub enum Score {
    /// A JSON number, printed as it was written unless it overflows a double.
    Numeric(Number),
    /// Anything else, kept as text.
    Raw(String),
}

impl Default for Score {
    fn default() -> Self {
        Self::Numeric(Number::from(0))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(number) => {
                let text = number.to_string();
                match text.parse::<f64>() {
                    Ok(value) if value.is_infinite() => {
                        f.write_str(if value > 0.0 { "inf" } else { "-inf" })
                    }
                    _ => f.write_str(&text),
                }
            }
            Self::Raw(text) => f.write_str(text),
        }
    }
}

impl From<Value> for Score {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(number) => Self::Numeric(number),
            other => Self::Raw(value_text(other)),
        }
    }
}

/// One detected bias indicator.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawFlag")]
pub struct BiasFlag {
    category: String,
    description: String,
    severity: String,
    suggestion: String,
}

impl BiasFlag {
    /// Creates a flag from fully resolved values.
    pub fn new(
        category: impl Into<String>,
        description: impl Into<String>,
        severity: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            description: description.into(),
            severity: severity.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Returns the bias category, e.g. `Age`.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the human readable finding.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the severity label.
    pub fn severity(&self) -> &str {
        &self.severity
    }

    /// Returns the suggested remediation.
    pub fn suggestion(&self) -> &str {
        &self.suggestion
    }
}

impl Default for BiasFlag {
    fn default() -> Self {
        RawFlag::default().into()
    }
}

/// The result of a resume bias audit with all defaults resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisReport {
    filename: String,
    timestamp: String,
    score: Score,
    risk_level: String,
    bias_flags: Vec<BiasFlag>,
}

impl AnalysisReport {
    /// Parses a report, using the current local time when no timestamp is present.
    pub fn from_json(json_text: &str) -> Result<Self, ReportError> {
        Self::from_json_at(json_text, &Local::now())
    }

    /// Parses a report, using `now` when no timestamp is present.
    pub fn from_json_at<Tz>(json_text: &str, now: &DateTime<Tz>) -> Result<Self, ReportError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        // Parse as a map first: serde would otherwise accept a JSON array positionally.
        let object: Map<String, Value> = serde_json::from_str(json_text)?;
        let raw: RawReport = serde_json::from_value(Value::Object(object))?;
        Ok(raw.resolve(|| now.format(TIMESTAMP_FORMAT).to_string()))
    }

    /// Returns the analysed file name.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the analysis timestamp as displayed in the report.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Returns the overall fairness score.
    pub fn score(&self) -> &Score {
        &self.score
    }

    /// Returns the risk level label.
    pub fn risk_level(&self) -> &str {
        &self.risk_level
    }

    /// Returns the bias flags in input order.
    pub fn bias_flags(&self) -> &[BiasFlag] {
        &self.bias_flags
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawReport {
    filename: Option<Value>,
    timestamp: Option<Value>,
    score: Option<Value>,
    risk_level: Option<Value>,
    analysis: Option<Value>,
}

impl RawReport {
    fn resolve(self, now: impl FnOnce() -> String) -> AnalysisReport {
        AnalysisReport {
            filename: text_or(self.filename, DEFAULT_FILENAME),
            timestamp: self.timestamp.map(value_text).unwrap_or_else(now),
            score: self.score.map(Score::from).unwrap_or_default(),
            risk_level: text_or(self.risk_level, DEFAULT_RISK_LEVEL),
            bias_flags: self.analysis.map(bias_flags).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFlag {
    category: Option<Value>,
    description: Option<Value>,
    severity: Option<Value>,
    suggestion: Option<Value>,
}

impl From<RawFlag> for BiasFlag {
    fn from(raw: RawFlag) -> Self {
        Self {
            category: text_or(raw.category, DEFAULT_CATEGORY),
            description: text_or(raw.description, DEFAULT_DESCRIPTION),
            severity: text_or(raw.severity, DEFAULT_SEVERITY),
            suggestion: text_or(raw.suggestion, DEFAULT_SUGGESTION),
        }
    }
}

fn bias_flags(analysis: Value) -> Vec<BiasFlag> {
    let flags = match analysis {
        Value::Object(mut map) => map.remove("biasFlags"),
        _ => None,
    };

    match flags {
        Some(Value::Array(entries)) => entries
            .into_iter()
            // Entries that are not objects still count as a finding, just with every default.
            .map(|entry| match entry {
                Value::Object(_) => serde_json::from_value(entry).unwrap_or_default(),
                _ => BiasFlag::default(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn text_or(value: Option<Value>, default: &str) -> String {
    value
        .map(value_text)
        .unwrap_or_else(|| default.to_owned())
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}
