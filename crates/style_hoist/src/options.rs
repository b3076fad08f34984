//! Options for the style hoisting transform.
//!
//! The defaults reproduce the output the React Native codemod has always
//! produced: a `fixedStyles` table built with `StyleSheet.create`, single
//! quotes and ES5 trailing commas.

use oxc_span::SourceType;

/// Default name of the generated stylesheet table.
pub const DEFAULT_TABLE_NAME: &str = "fixedStyles";

/// Default callee wrapping the generated table.
pub const DEFAULT_FACTORY: &str = "StyleSheet.create";

/// Quote character used for string values in the emitted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
}

impl QuoteStyle {
    pub fn quote(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
        }
    }
}

/// Whether the last entry of a multi-line object or array gets a comma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingComma {
    None,
    /// Trailing commas wherever ES5 allows them (objects and arrays).
    #[default]
    Es5,
}

/// Options for [`transform`](crate::transform).
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Path of the source unit. Used to pick the parser dialect
    /// (`.tsx` vs `.jsx`) and in diagnostics.
    pub filename: Option<String>,

    /// Reserved identifier of the generated table.
    ///
    /// A top-level declaration with this name is treated as the output of a
    /// previous run: its entries are reused and the declaration regenerated.
    pub table_name: String,

    /// Callee the table object is passed to, e.g. `StyleSheet.create`.
    pub factory: String,

    /// JSX attribute names whose values are style expressions.
    pub style_attributes: Vec<String>,

    /// Quote style for string values in the emitted table.
    pub quote_style: QuoteStyle,

    /// Trailing comma policy for the emitted table.
    pub trailing_comma: TrailingComma,

    /// Spaces per indentation level in the emitted table.
    pub indent_width: usize,

    /// Drop table entries that no `table.<id>` reference uses.
    ///
    /// Off by default: entries carried over from a previous run are kept even
    /// when the content that produced them was edited away.
    pub prune_unreferenced: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            filename: None,
            table_name: DEFAULT_TABLE_NAME.to_string(),
            factory: DEFAULT_FACTORY.to_string(),
            style_attributes: vec!["style".to_string()],
            quote_style: QuoteStyle::default(),
            trailing_comma: TrailingComma::default(),
            indent_width: 2,
            prune_unreferenced: false,
        }
    }
}

impl TransformOptions {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filename.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the generated table name.
    #[must_use]
    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = name.into();
        self
    }

    /// Set the callee wrapping the generated table.
    #[must_use]
    pub fn with_factory(mut self, factory: impl Into<String>) -> Self {
        self.factory = factory.into();
        self
    }

    /// Replace the list of style-bearing attribute names.
    #[must_use]
    pub fn with_style_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.style_attributes = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the quote style of emitted strings.
    #[must_use]
    pub fn with_quote_style(mut self, quote_style: QuoteStyle) -> Self {
        self.quote_style = quote_style;
        self
    }

    /// Set the trailing comma policy.
    #[must_use]
    pub fn with_trailing_comma(mut self, trailing_comma: TrailingComma) -> Self {
        self.trailing_comma = trailing_comma;
        self
    }

    /// Set the indentation width of the emitted table.
    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Enable or disable pruning of unreferenced table entries.
    #[must_use]
    pub fn with_prune_unreferenced(mut self, enabled: bool) -> Self {
        self.prune_unreferenced = enabled;
        self
    }

    /// Whether `name` is one of the style-bearing attributes.
    pub fn is_style_attribute(&self, name: &str) -> bool {
        self.style_attributes.iter().any(|attr| attr == name)
    }

    /// Parser dialect for the source unit.
    ///
    /// Inferred from the filename extension when there is one. JSX is enabled
    /// for every dialect except plain TypeScript (`.ts`, `.mts`, `.cts`), where
    /// `<T>expr` is a type assertion.
    pub fn source_type(&self) -> SourceType {
        let source_type = self
            .filename
            .as_deref()
            .and_then(|path| SourceType::from_path(path).ok())
            .unwrap_or_else(SourceType::jsx);
        if source_type.is_typescript() {
            source_type
        } else {
            source_type.with_jsx(true)
        }
    }
}
