//! Inline style hoisting for JavaScript codemod runners.

mod error;

#[cfg(all(
    feature = "allocator",
    not(any(
        target_arch = "arm",
        target_os = "freebsd",
        target_os = "windows",
        target_family = "wasm"
    ))
))]
#[global_allocator]
static ALLOC: mimalloc_safe::MiMalloc = mimalloc_safe::MiMalloc;

use std::mem;

use napi::{Task, bindgen_prelude::AsyncTask};
use napi_derive::napi;

use crate::error::HoistError;

/// Quote style of strings in the generated table.
#[napi(string_enum)]
pub enum QuoteStyle {
    #[napi(value = "single")]
    Single,
    #[napi(value = "double")]
    Double,
}

/// Trailing comma policy of the generated table.
#[napi(string_enum)]
pub enum TrailingComma {
    #[napi(value = "none")]
    None,
    #[napi(value = "es5")]
    Es5,
}

/// Options for hoisting the inline styles of one file.
#[napi(object)]
#[derive(Default)]
pub struct HoistOptions {
    /// Path of the file. Picks the parser dialect (`.tsx`, `.jsx`, ...).
    pub filename: Option<String>,

    /// Name of the generated table. A top-level declaration with this name is
    /// treated as the output of a previous run.
    ///
    /// @default "fixedStyles"
    pub table_name: Option<String>,

    /// Callee wrapping the table object.
    ///
    /// @default "StyleSheet.create"
    pub factory: Option<String>,

    /// JSX attributes holding style expressions.
    ///
    /// @default ["style"]
    pub style_attributes: Option<Vec<String>>,

    /// @default "single"
    #[napi(ts_type = "'single' | 'double'")]
    pub quote_style: Option<QuoteStyle>,

    /// @default "es5"
    #[napi(ts_type = "'none' | 'es5'")]
    pub trailing_comma: Option<TrailingComma>,

    /// @default 2
    pub indent_width: Option<u32>,

    /// Drop table entries that nothing in the file references.
    ///
    /// @default false
    pub prune_unreferenced: Option<bool>,
}

/// One entry of the generated table.
#[napi(object)]
#[derive(Clone)]
pub struct HoistedStyle {
    /// Identifier inside the table.
    pub id: String,
    /// Usage count of the content. Entries from a previous table start at 1.
    pub usage_count: u32,
    /// Style expressions rewritten to this entry in this run.
    pub uses: u32,
    /// Elements using the content, first use first.
    pub element_names: Vec<String>,
    /// Carried over from the previous table.
    pub seeded: bool,
}

/// Result of hoisting the inline styles of one file.
#[napi(object)]
pub struct HoistResult {
    /// The rewritten file, including the regenerated table.
    pub code: String,
    /// The generated table, in table order.
    pub styles: Vec<HoistedStyle>,
    /// Parse errors and warnings. On parse errors `code` is the input.
    pub errors: Vec<HoistError>,
}

fn napi_to_hoist_options(options: &HoistOptions) -> style_hoist::TransformOptions {
    let mut hoist_options = style_hoist::TransformOptions::new();
    if let Some(filename) = &options.filename {
        hoist_options = hoist_options.with_filename(filename.clone());
    }
    if let Some(table_name) = &options.table_name {
        hoist_options = hoist_options.with_table_name(table_name.clone());
    }
    if let Some(factory) = &options.factory {
        hoist_options = hoist_options.with_factory(factory.clone());
    }
    if let Some(attributes) = &options.style_attributes {
        hoist_options = hoist_options.with_style_attributes(attributes.iter().cloned());
    }
    if let Some(quote_style) = &options.quote_style {
        hoist_options = hoist_options.with_quote_style(match quote_style {
            QuoteStyle::Single => style_hoist::QuoteStyle::Single,
            QuoteStyle::Double => style_hoist::QuoteStyle::Double,
        });
    }
    if let Some(trailing_comma) = &options.trailing_comma {
        hoist_options = hoist_options.with_trailing_comma(match trailing_comma {
            TrailingComma::None => style_hoist::TrailingComma::None,
            TrailingComma::Es5 => style_hoist::TrailingComma::Es5,
        });
    }
    if let Some(width) = options.indent_width {
        hoist_options = hoist_options.with_indent_width(width as usize);
    }
    hoist_options.with_prune_unreferenced(options.prune_unreferenced.unwrap_or(false))
}

#[expect(clippy::cast_possible_truncation)]
fn transform_impl(source_text: &str, options: &HoistOptions) -> HoistResult {
    let result = style_hoist::transform(source_text, &napi_to_hoist_options(options));

    let styles = result
        .entries
        .into_iter()
        .map(|entry| HoistedStyle {
            id: entry.id,
            usage_count: entry.usage_count as u32,
            uses: entry.uses as u32,
            element_names: entry.element_names,
            seeded: entry.seeded,
        })
        .collect();

    HoistResult {
        code: result.code,
        styles,
        errors: HoistError::from_diagnostics(result.diagnostics),
    }
}

/// Hoist inline styles synchronously on the current thread.
///
/// @example
/// ```javascript
/// import { transformSync } from 'style-hoist';
///
/// const result = transformSync(`<Text style={{ color: 'red' }} />`, {
///   filename: 'Label.jsx',
/// });
///
/// console.log(result.code); // <Text style={fixedStyles.colorRed} /> ...
/// ```
#[napi]
pub fn transform_sync(source_text: String, options: Option<HoistOptions>) -> HoistResult {
    let options = options.unwrap_or_default();
    transform_impl(&source_text, &options)
}

pub struct TransformTask {
    source_text: String,
    options: HoistOptions,
}

#[napi]
impl Task for TransformTask {
    type JsValue = HoistResult;
    type Output = HoistResult;

    fn compute(&mut self) -> napi::Result<Self::Output> {
        let source_text = mem::take(&mut self.source_text);
        Ok(transform_impl(&source_text, &self.options))
    }

    fn resolve(&mut self, _: napi::Env, result: Self::Output) -> napi::Result<Self::JsValue> {
        Ok(result)
    }
}

/// Hoist inline styles asynchronously on a separate thread.
///
/// Every call works on its own state, so many files can be processed
/// concurrently.
#[napi]
pub fn transform(source_text: String, options: Option<HoistOptions>) -> AsyncTask<TransformTask> {
    let options = options.unwrap_or_default();
    AsyncTask::new(TransformTask { source_text, options })
}
