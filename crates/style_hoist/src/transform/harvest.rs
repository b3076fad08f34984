//! Harvester: registers every hoistable fragment before anything is named.
//!
//! Naming depends on the final usage count and the full set of elements
//! using each piece of content, so this pass must see the whole unit before
//! the rewriter assigns a single identifier.

use oxc_ast::ast::*;
use oxc_ast_visit::{Visit, walk};
use oxc_span::Span;
use rustc_hash::FxHashSet;

use crate::TransformOptions;
use crate::jsx::{attribute_expression, get_jsx_attribute_name, get_jsx_element_name};
use crate::literal::object_content;
use crate::store::{RecordId, StyleContext};

/// A fragment in the source that will be replaced by a table reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentSite {
    pub span: Span,
    pub record: RecordId,
}

/// Everything the harvest pass collected.
#[derive(Debug, Default)]
pub struct Harvest {
    /// Fragment sites in document order.
    pub sites: Vec<FragmentSite>,
    /// Table identifiers already referenced in the source (`table.id`).
    pub references: FxHashSet<String>,
    /// Fragments that looked hoistable but were not constant.
    pub skipped: usize,
}

/// Register the fragments of every style attribute in `program`.
pub fn harvest_fragments(
    program: &Program<'_>,
    options: &TransformOptions,
    context: &mut StyleContext,
) -> Harvest {
    let mut harvester = Harvester { options, context, harvest: Harvest::default() };
    harvester.visit_program(program);
    harvester.harvest
}

struct Harvester<'c> {
    options: &'c TransformOptions,
    context: &'c mut StyleContext,
    harvest: Harvest,
}

impl Harvester<'_> {
    fn harvest_expression(&mut self, expr: &Expression<'_>, element_name: &str) {
        match expr.without_parentheses() {
            Expression::ObjectExpression(object) => self.register(object, element_name),
            Expression::ArrayExpression(array) => {
                for element in &array.elements {
                    if let Some(element) = element.as_expression() {
                        self.harvest_expression(element, element_name);
                    }
                }
            }
            Expression::ConditionalExpression(cond) => {
                self.harvest_expression(&cond.consequent, element_name);
                self.harvest_expression(&cond.alternate, element_name);
            }
            Expression::LogicalExpression(logical) => {
                self.harvest_expression(&logical.left, element_name);
                self.harvest_expression(&logical.right, element_name);
            }
            _ => {}
        }
    }

    fn register(&mut self, object: &ObjectExpression<'_>, element_name: &str) {
        if object.properties.is_empty() {
            return;
        }
        match object_content(object) {
            Ok(content) => {
                let record = self.context.store.register(content, Some(element_name), None);
                self.harvest.sites.push(FragmentSite { span: object.span, record });
            }
            Err(err) => {
                tracing::debug!(
                    element = element_name,
                    start = err.span().start,
                    end = err.span().end,
                    "leaving style fragment inline: {err}"
                );
                self.harvest.skipped += 1;
            }
        }
    }

    fn is_table(&self, expr: &Expression<'_>) -> bool {
        matches!(expr, Expression::Identifier(ident) if ident.name.as_str() == self.options.table_name)
    }
}

impl<'a> Visit<'a> for Harvester<'_> {
    fn visit_jsx_opening_element(&mut self, el: &JSXOpeningElement<'a>) {
        let element_name = get_jsx_element_name(&el.name);
        for item in &el.attributes {
            if let JSXAttributeItem::Attribute(attr) = item
                && self.options.is_style_attribute(&get_jsx_attribute_name(&attr.name))
                && let Some(expr) = attribute_expression(attr)
            {
                self.harvest_expression(expr, &element_name);
            }
        }
        walk::walk_jsx_opening_element(self, el);
    }

    fn visit_static_member_expression(&mut self, it: &StaticMemberExpression<'a>) {
        if self.is_table(&it.object) {
            self.harvest.references.insert(it.property.name.to_string());
        }
        walk::walk_static_member_expression(self, it);
    }

    fn visit_computed_member_expression(&mut self, it: &ComputedMemberExpression<'a>) {
        if self.is_table(&it.object)
            && let Expression::StringLiteral(lit) = &it.expression
        {
            self.harvest.references.insert(lit.value.to_string());
        }
        walk::walk_computed_member_expression(self, it);
    }
}

#[cfg(test)]
mod tests {
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    use super::*;

    fn harvest(source: &str) -> (Harvest, StyleContext) {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::jsx()).parse();
        assert!(ret.errors.is_empty(), "{:?}", ret.errors);
        let mut context = StyleContext::new();
        let harvest = harvest_fragments(&ret.program, &TransformOptions::default(), &mut context);
        (harvest, context)
    }

    #[test]
    fn counts_identical_content_once() {
        let (harvest, context) = harvest(
            "<>
                <Text style={{ color: 'red', fontSize: 12 }} />
                <Text style={{ fontSize: 12, color: \"red\" }} />
                <View style={[{ color: 'red', fontSize: 12 }]} />
            </>;",
        );
        assert_eq!(harvest.sites.len(), 3);
        assert_eq!(context.store.len(), 1);

        let record = context.store.get(harvest.sites[0].record);
        assert_eq!(record.usage_count, 3);
        assert_eq!(record.element_names.iter().collect::<Vec<_>>(), ["Text", "View"]);
    }

    #[test]
    fn walks_arrays_conditionals_and_logical_expressions() {
        let (harvest, context) = harvest(
            "<View style={[on ? { flex: 1 } : { flex: 2 }, off && { opacity: 0 }, (({ margin: 4 }))]} />;",
        );
        assert_eq!(harvest.sites.len(), 4);
        assert_eq!(context.store.len(), 4);
    }

    #[test]
    fn skips_dynamic_and_empty_objects() {
        let (harvest, context) =
            harvest("<View style={[{}, { width: size }, { flex: 1 }, compute({ flex: 2 })]} />;");
        assert_eq!(harvest.sites.len(), 1);
        assert_eq!(harvest.skipped, 1);
        assert_eq!(context.store.len(), 1);
    }

    #[test]
    fn ignores_objects_outside_style_attributes() {
        let (harvest, context) = harvest("const a = { flex: 1 }; <View extra={{ flex: 1 }} />;");
        assert!(harvest.sites.is_empty());
        assert!(context.store.is_empty());
    }

    #[test]
    fn collects_existing_table_references() {
        let (harvest, _) = harvest(
            "<View style={[fixedStyles.flex, fixedStyles['odd-name'], other.row]} />; use(fixedStyles.outside);",
        );
        let mut references: Vec<_> = harvest.references.into_iter().collect();
        references.sort();
        assert_eq!(references, ["flex", "odd-name", "outside"]);
    }

    #[test]
    fn element_names_include_member_expressions() {
        let (harvest, context) = harvest("<Animated.View style={{ flex: 1 }} />;");
        let record = context.store.get(harvest.sites[0].record);
        assert_eq!(record.element_names[0], "Animated.View");
    }
}
