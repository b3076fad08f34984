//! Diagnostics reported by the transform.
//!
//! Parse errors from oxc and the transform's own warnings (such as a
//! previously generated table entry that could not be reused) share this
//! shape. None of them abort the transform.

use oxc_span::Span;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Hint,
}

/// A labeled source span within a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticLabel {
    pub text: Option<String>,
    /// Byte offset of the span start.
    pub start: u32,
    /// Byte offset of the span end (exclusive).
    pub end: u32,
    /// 1-based line number.
    pub line: u32,
    /// 0-based column number.
    pub column: u32,
}

impl DiagnosticLabel {
    /// Create a label from byte offsets, computing line/column from source text.
    pub fn new(text: Option<String>, start: u32, end: u32, source_text: &str) -> Self {
        let (line, column) = byte_offset_to_line_column(source_text, start as usize);
        Self { text, start, end, line, column }
    }
}

/// A single diagnostic message.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub text: String,
    /// Hint for fixing the issue; empty when there is none.
    pub hint: String,
    pub labels: Vec<DiagnosticLabel>,
}

impl Diagnostic {
    /// A warning pointing at `span`.
    pub fn warning(text: impl Into<String>, span: Span, source_text: &str) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            text: text.into(),
            hint: String::new(),
            labels: vec![DiagnosticLabel::new(None, span.start, span.end, source_text)],
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    /// Create a diagnostic from an oxc `OxcDiagnostic`.
    #[expect(clippy::cast_possible_truncation)]
    pub fn from_oxc(source_text: &str, diag: &oxc_diagnostics::OxcDiagnostic) -> Self {
        let severity = match diag.severity {
            oxc_diagnostics::Severity::Error => DiagnosticSeverity::Error,
            oxc_diagnostics::Severity::Warning => DiagnosticSeverity::Warning,
            oxc_diagnostics::Severity::Advice => DiagnosticSeverity::Hint,
        };

        let hint = diag.help.as_ref().map(ToString::to_string).unwrap_or_default();

        let labels = diag
            .labels
            .as_ref()
            .map(|labels| {
                labels
                    .iter()
                    .map(|label| {
                        DiagnosticLabel::new(
                            label.label().map(ToString::to_string),
                            label.offset() as u32,
                            (label.offset() + label.len()) as u32,
                            source_text,
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { severity, text: diag.message.to_string(), hint, labels }
    }

    /// Batch-convert a list of oxc diagnostics.
    pub fn from_oxc_list(
        source_text: &str,
        diagnostics: &[oxc_diagnostics::OxcDiagnostic],
    ) -> Vec<Self> {
        diagnostics.iter().map(|d| Self::from_oxc(source_text, d)).collect()
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }
}

/// Convert a UTF-8 byte offset to a 1-based line and 0-based column.
fn byte_offset_to_line_column(source: &str, offset: usize) -> (u32, u32) {
    let mut line = 1u32;
    let mut col = 0u32;
    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (line, col)
}
