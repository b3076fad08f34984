//! The hoisting pipeline.
//!
//! ```text
//! parse ─ continuity ─ partition ─ apply edits
//!       ─ parse ─ harvest ─ name/rewrite ─ apply edits ─ emit table
//! ```
//!
//! Each stage completes before the next one starts. The naming stage needs
//! the usage counts of the whole unit, so harvesting cannot be interleaved
//! with rewriting.

mod continuity;
mod emit;
mod harvest;
mod partition;
mod rewrite;


use oxc_allocator::Allocator;
use oxc_parser::Parser;
use rustc_hash::FxHashMap;

pub use continuity::{PreviousTable, load_previous_table};
pub use emit::{emit_table, quote_string};
pub use harvest::{FragmentSite, Harvest, harvest_fragments};
pub use partition::{PropertyClassification, classify_property, partition_styles};
pub use rewrite::{Rewrite, rewrite_fragments, table_reference};

use crate::TransformOptions;
use crate::diagnostic::Diagnostic;
use crate::store::StyleContext;

/// One entry of the emitted stylesheet table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEntry {
    /// Identifier inside the table.
    pub id: String,
    /// Usage count of the underlying record. Entries loaded from a previous
    /// table start at 1.
    pub usage_count: usize,
    /// Fragments rewritten to this identifier in this run.
    pub uses: usize,
    /// Tag names of the elements using the content, first use first.
    pub element_names: Vec<String>,
    /// Carried over from the previous table.
    pub seeded: bool,
}

/// Output of [`transform`].
#[derive(Debug)]
pub struct TransformResult {
    /// The rewritten source unit, including the regenerated table.
    pub code: String,
    /// The emitted table, in table order.
    pub entries: Vec<StyleEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

impl TransformResult {
    fn unchanged(source_text: &str, diagnostics: Vec<Diagnostic>) -> Self {
        Self { code: source_text.to_string(), entries: Vec::new(), diagnostics }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Hoist the static inline styles of one source unit into the stylesheet
/// table.
///
/// All bookkeeping lives in a [`StyleContext`] created for this call, so
/// transforming several units one after another (or in parallel) never
/// shares counts or names between them.
///
/// Unparsable input is returned unchanged together with the parse errors.
pub fn transform(source_text: &str, options: &TransformOptions) -> TransformResult {
    let mut context = StyleContext::new();

    let (partitioned, mut diagnostics) = match partition_pass(source_text, options, &mut context)
    {
        Ok(pass) => pass,
        Err(diagnostics) => return TransformResult::unchanged(source_text, diagnostics),
    };

    let (rewritten, harvest, uses) = match rewrite_pass(&partitioned, options, &mut context) {
        Ok(pass) => pass,
        Err(errors) => {
            diagnostics.extend(errors);
            return TransformResult::unchanged(source_text, diagnostics);
        }
    };

    if options.prune_unreferenced {
        let before = context.table.len();
        context
            .table
            .retain(|id| harvest.references.contains(id) || uses.contains_key(id));
        tracing::debug!(pruned = before - context.table.len(), "pruned unreferenced entries");
    }

    let entries = summarize(&context, &uses);
    tracing::debug!(
        filename = options.filename.as_deref().unwrap_or("<unknown>"),
        fragments = harvest.sites.len(),
        skipped = harvest.skipped,
        entries = entries.len(),
        "hoisted inline styles"
    );

    let code = if context.table.is_empty() {
        rewritten
    } else {
        let table = emit_table(&context.table, options);
        let body = rewritten.trim_end();
        if body.is_empty() { table } else { format!("{body}\n\n{table}") }
    };

    TransformResult { code, entries, diagnostics }
}

/// Stages 1 and 2: seed from the previous table, remove it, and split
/// style objects into hoistable pieces.
fn partition_pass(
    source_text: &str,
    options: &TransformOptions,
    context: &mut StyleContext,
) -> Result<(String, Vec<Diagnostic>), Vec<Diagnostic>> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source_text, options.source_type()).parse();
    if ret.panicked || !ret.errors.is_empty() {
        tracing::debug!(errors = ret.errors.len(), "source does not parse; leaving it unchanged");
        return Err(Diagnostic::from_oxc_list(source_text, &ret.errors));
    }

    let previous = load_previous_table(&ret.program, source_text, options, context);
    if previous.conflict.is_some() {
        return Err(previous.diagnostics);
    }
    let mut edits = partition_styles(&ret.program, source_text, options);
    if let Some(span) = previous.removal {
        edits.remove(span);
    }
    Ok((edits.apply(source_text), previous.diagnostics))
}

/// Stages 3 and 4 on the re-parsed output of the partitioner.
fn rewrite_pass(
    source_text: &str,
    options: &TransformOptions,
    context: &mut StyleContext,
) -> Result<(String, Harvest, FxHashMap<String, usize>), Vec<Diagnostic>> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source_text, options.source_type()).parse();
    if ret.panicked || !ret.errors.is_empty() {
        tracing::debug!(errors = ret.errors.len(), "partitioned source does not parse");
        return Err(Diagnostic::from_oxc_list(source_text, &ret.errors));
    }

    let harvest = harvest_fragments(&ret.program, options, context);
    let Rewrite { edits, uses } = rewrite_fragments(&harvest, options, context);
    Ok((edits.apply(source_text), harvest, uses))
}

fn summarize(context: &StyleContext, uses: &FxHashMap<String, usize>) -> Vec<StyleEntry> {
    context
        .table
        .iter()
        .map(|(id, content)| {
            let record = context.store.find(content);
            // Only the first entry of duplicated content owns the record.
            let owner = record.filter(|r| r.assigned_id.as_deref() == Some(id));
            StyleEntry {
                id: id.to_string(),
                usage_count: owner.map_or(1, |r| r.usage_count),
                uses: uses.get(id).copied().unwrap_or(0),
                element_names: owner
                    .map(|r| r.element_names.iter().cloned().collect())
                    .unwrap_or_default(),
                seeded: record.is_some_and(|r| r.seeded),
            }
        })
        .collect()
}
