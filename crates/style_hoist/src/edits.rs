//! Span-addressed text edits.
//!
//! Every rewrite in the pipeline is expressed as "replace the text covered
//! by this span". Untouched text is copied through byte for byte, so
//! formatting and comments outside the rewritten expressions survive.

use oxc_span::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub span: Span,
    pub replacement: String,
}

/// An unordered collection of edits against one source text.
#[derive(Debug, Default)]
pub struct TextEdits {
    edits: Vec<Edit>,
}

impl TextEdits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, span: Span, replacement: impl Into<String>) {
        self.edits.push(Edit { span, replacement: replacement.into() });
    }

    pub fn remove(&mut self, span: Span) {
        self.replace(span, String::new());
    }

    /// Apply all edits to `source_text`.
    ///
    /// Edits are applied in source order. An edit overlapping one that was
    /// already applied is dropped.
    pub fn apply(mut self, source_text: &str) -> String {
        self.edits.sort_by_key(|edit| (edit.span.start, edit.span.end));

        let mut out = String::with_capacity(source_text.len());
        let mut cursor = 0usize;
        for edit in self.edits {
            let start = edit.span.start as usize;
            let end = edit.span.end as usize;
            if start < cursor || end > source_text.len() {
                tracing::debug!(start, end, "dropping overlapping edit");
                continue;
            }
            out.push_str(&source_text[cursor..start]);
            out.push_str(&edit.replacement);
            cursor = end;
        }
        out.push_str(&source_text[cursor..]);
        out
    }
}
