//! Namer/rewriter: replaces harvested fragments with table references.

use oxc_syntax::identifier::is_identifier_name;
use rustc_hash::FxHashMap;

use crate::TransformOptions;
use crate::edits::TextEdits;
use crate::naming::name_for;
use crate::store::StyleContext;
use crate::transform::emit::quote_string;
use crate::transform::harvest::Harvest;

/// Result of the rewrite pass.
#[derive(Debug, Default)]
pub struct Rewrite {
    pub edits: TextEdits,
    /// Number of fragments rewritten to each identifier.
    pub uses: FxHashMap<String, usize>,
}

/// Name every harvested fragment and replace it with a reference.
pub fn rewrite_fragments(
    harvest: &Harvest,
    options: &TransformOptions,
    context: &mut StyleContext,
) -> Rewrite {
    let mut rewrite = Rewrite::default();
    for site in &harvest.sites {
        let name = name_for(context, site.record);
        rewrite.edits.replace(site.span, table_reference(options, &name));
        *rewrite.uses.entry(name).or_insert(0) += 1;
    }
    rewrite
}

/// `fixedStyles.colorRed`, or `fixedStyles['color-red']` for names that are
/// not identifiers.
pub fn table_reference(options: &TransformOptions, name: &str) -> String {
    if is_identifier_name(name) {
        format!("{}.{name}", options.table_name)
    } else {
        format!("{}[{}]", options.table_name, quote_string(name, options.quote_style))
    }
}
