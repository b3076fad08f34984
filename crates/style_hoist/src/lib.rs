//! Style Hoist
//!
//! Moves constant inline style objects out of JSX markup into one named,
//! deduplicated stylesheet table appended to the file.
//!
//! ## Example
//!
//! ```jsx
//! <Text style={{ color: active ? 'red' : 'blue', fontSize: 12 }} />
//! ```
//!
//! becomes
//!
//! ```jsx
//! <Text style={[fixedStyles.fontSize, active ? fixedStyles.colorRed : fixedStyles.colorBlue]} />
//!
//! const fixedStyles = StyleSheet.create({
//!   fontSize: {
//!     fontSize: 12,
//!   },
//!   colorRed: {
//!     color: 'red',
//!   },
//!   colorBlue: {
//!     color: 'blue',
//!   },
//! });
//! ```
//!
//! Running the transform again on its own output changes nothing: the table
//! from the previous run is read back, its identifiers are reused for
//! unchanged content, and the declaration is regenerated in place.
//!
//! ## Usage
//!
//! ```ignore
//! use style_hoist::{TransformOptions, transform};
//!
//! let options = TransformOptions::new().with_filename("Screen.tsx");
//! let result = transform(&source_text, &options);
//! for diagnostic in &result.diagnostics {
//!     eprintln!("{}", diagnostic.text);
//! }
//! std::fs::write("Screen.tsx", result.code)?;
//! ```

mod diagnostic;
mod edits;
mod jsx;
mod literal;
mod naming;
mod options;
mod store;
mod transform;
mod value;

pub use diagnostic::{Diagnostic, DiagnosticLabel, DiagnosticSeverity};
pub use edits::{Edit, TextEdits};
pub use literal::{LiteralError, MAX_LITERAL_DEPTH, constant_value, object_content};
pub use naming::{NamingStrategy, base_name, name_for, strategy_for};
pub use options::{
    DEFAULT_FACTORY, DEFAULT_TABLE_NAME, QuoteStyle, TrailingComma, TransformOptions,
};
pub use store::{NameCounter, RecordId, StyleContext, StyleRecord, StyleStore, StylesheetTable};
pub use transform::{
    FragmentSite, Harvest, PreviousTable, PropertyClassification, Rewrite, StyleEntry,
    TransformResult, classify_property, emit_table, harvest_fragments, load_previous_table,
    partition_styles, quote_string, rewrite_fragments, table_reference, transform,
};
pub use value::{Fingerprint, StyleObject, StyleValue};
