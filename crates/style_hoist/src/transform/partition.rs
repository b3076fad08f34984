//! Partitioner: splits style expressions into hoistable and inline parts.
//!
//! For every style-bearing attribute whose value is an object or an array of
//! objects, each object is split into
//!
//! 1. one object with all static properties,
//! 2. one `test ? { key: a } : { key: b }` per conditional property with a
//!    literal branch,
//! 3. one object with everything else,
//!
//! in that order. Keys inside a partitioned object are unique, so the pieces
//! never override each other and the order change cannot alter the result.

use oxc_ast::ast::*;
use oxc_ast_visit::Visit;
use oxc_span::{GetSpan, Span};
use rustc_hash::FxHashSet;

use crate::TransformOptions;
use crate::edits::TextEdits;
use crate::jsx::{attribute_expression, get_jsx_attribute_name, slice};
use crate::literal::{is_constant, property_key_name};

/// How a single style property is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyClassification {
    /// The value is a constant and can be hoisted.
    Static,
    /// The value is `test ? a : b` with at least one constant branch.
    ConditionalLiteral,
    /// Anything that depends on runtime state.
    Dynamic,
}

/// Classify one object property.
pub fn classify_property(prop: &ObjectProperty<'_>) -> PropertyClassification {
    if prop.computed || prop.method || !matches!(prop.kind, PropertyKind::Init) {
        return PropertyClassification::Dynamic;
    }
    let value = prop.value.without_parentheses();
    if is_constant(value) {
        return PropertyClassification::Static;
    }
    match value {
        Expression::ConditionalExpression(cond)
            if is_constant(&cond.consequent) || is_constant(&cond.alternate) =>
        {
            PropertyClassification::ConditionalLiteral
        }
        _ => PropertyClassification::Dynamic,
    }
}

/// Collect the partitioning edits for every style attribute in `program`.
pub fn partition_styles(
    program: &Program<'_>,
    source_text: &str,
    options: &TransformOptions,
) -> TextEdits {
    let mut partitioner =
        Partitioner { source_text, comments: &program.comments, options, edits: TextEdits::new() };
    partitioner.visit_program(program);
    partitioner.edits
}

/// One element of a partitioned style expression.
enum Piece {
    /// Original source text, untouched.
    Kept(Span),
    /// Newly assembled source text.
    Built(String),
}

struct Partitioner<'s> {
    source_text: &'s str,
    comments: &'s [Comment],
    options: &'s TransformOptions,
    edits: TextEdits,
}

impl Partitioner<'_> {
    fn partition_attribute(&mut self, expr: &Expression<'_>) {
        let (pieces, changed) = match expr {
            Expression::ObjectExpression(object) => {
                let pieces = self.split_object(object);
                let changed = !is_kept(&pieces, object.span);
                (pieces, changed)
            }
            Expression::ArrayExpression(array) => {
                let mut pieces = Vec::with_capacity(array.elements.len());
                let mut changed = false;
                for element in &array.elements {
                    // Holes and spreads make the array opaque.
                    let Some(element) = element.as_expression() else {
                        return;
                    };
                    if let Expression::ObjectExpression(object) = element {
                        let split = self.split_object(object);
                        changed |= !is_kept(&split, object.span);
                        pieces.extend(split);
                    } else {
                        pieces.push(Piece::Kept(element.span()));
                    }
                }
                // A single remaining element replaces the array.
                changed |= pieces.len() == 1;
                (pieces, changed)
            }
            _ => return,
        };

        if pieces.is_empty() || !changed {
            return;
        }
        let replacement = if pieces.len() == 1 {
            self.piece_text(&pieces[0])
        } else {
            let parts: Vec<String> = pieces.iter().map(|piece| self.piece_text(piece)).collect();
            format!("[{}]", parts.join(", "))
        };
        self.edits.replace(expr.span(), replacement);
    }

    fn split_object(&self, object: &ObjectExpression<'_>) -> Vec<Piece> {
        if object.properties.is_empty() {
            return Vec::new();
        }
        let Some(properties) = partitionable_properties(object) else {
            return vec![Piece::Kept(object.span)];
        };

        let mut clean = Vec::new();
        let mut conditions = Vec::new();
        let mut dirty = Vec::new();
        // Comments between properties travel with the property that follows
        // them; comments after the last property travel with the last one.
        let mut previous_end = object.span.start + 1;
        let last = properties.len() - 1;
        for (index, prop) in properties.iter().enumerate() {
            let leading = self.comments_between(previous_end, prop.span.start);
            let trailing = if index == last {
                self.comments_between(prop.span.end, object.span.end - 1)
            } else {
                String::new()
            };
            previous_end = prop.span.end;

            let classification = classify_property(prop);
            let text = match classification {
                PropertyClassification::ConditionalLiteral => self.conditional_text(prop),
                PropertyClassification::Static | PropertyClassification::Dynamic => {
                    slice(self.source_text, prop.span).to_string()
                }
            };
            let text = [leading.as_str(), text.as_str(), trailing.as_str()]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            match classification {
                PropertyClassification::Static => clean.push(text),
                PropertyClassification::ConditionalLiteral => conditions.push(text),
                PropertyClassification::Dynamic => dirty.push(text),
            }
        }

        if conditions.is_empty() && (clean.is_empty() || dirty.is_empty()) {
            return vec![Piece::Kept(object.span)];
        }

        let mut pieces = Vec::with_capacity(conditions.len() + 2);
        if !clean.is_empty() {
            pieces.push(Piece::Built(object_text(&clean)));
        }
        pieces.extend(conditions.into_iter().map(Piece::Built));
        if !dirty.is_empty() {
            pieces.push(Piece::Built(object_text(&dirty)));
        }
        pieces
    }

    /// `key: test ? a : b` → `test ? { key: a } : { key: b }`
    fn conditional_text(&self, prop: &ObjectProperty<'_>) -> String {
        let Expression::ConditionalExpression(cond) = prop.value.without_parentheses() else {
            return object_text(&[slice(self.source_text, prop.span).to_string()]);
        };
        let key = slice(self.source_text, prop.key.span());
        let test = slice(self.source_text, cond.test.span());
        let consequent = slice(self.source_text, cond.consequent.span());
        let alternate = slice(self.source_text, cond.alternate.span());
        format!("{test} ? {{ {key}: {consequent} }} : {{ {key}: {alternate} }}")
    }

    /// Comments lying entirely within `start..end`, as block comments.
    fn comments_between(&self, start: u32, end: u32) -> String {
        self.comments
            .iter()
            .filter(|comment| comment.span.start >= start && comment.span.end <= end)
            .filter_map(|comment| self.block_comment(comment))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// A line comment would swallow the rest of a rebuilt one-line piece.
    fn block_comment(&self, comment: &Comment) -> Option<String> {
        if comment.is_block() {
            return Some(slice(self.source_text, comment.span).to_string());
        }
        let content = slice(self.source_text, comment.content_span());
        if content.contains("*/") {
            tracing::debug!(
                start = comment.span.start,
                "dropping line comment of a split style object"
            );
            return None;
        }
        Some(format!("/*{content} */"))
    }

    fn piece_text(&self, piece: &Piece) -> String {
        match piece {
            Piece::Kept(span) => slice(self.source_text, *span).to_string(),
            Piece::Built(text) => text.clone(),
        }
    }
}

impl<'a> Visit<'a> for Partitioner<'_> {
    fn visit_jsx_opening_element(&mut self, el: &JSXOpeningElement<'a>) {
        for item in &el.attributes {
            if let JSXAttributeItem::Attribute(attr) = item
                && self.options.is_style_attribute(&get_jsx_attribute_name(&attr.name))
            {
                if let Some(expr) = attribute_expression(attr) {
                    self.partition_attribute(expr);
                }
                // Nothing inside a style expression is partitioned twice.
                continue;
            }
            self.visit_jsx_attribute_item(item);
        }
    }
}

fn is_kept(pieces: &[Piece], span: Span) -> bool {
    matches!(pieces, [Piece::Kept(kept)] if *kept == span)
}

fn object_text(properties: &[String]) -> String {
    format!("{{ {} }}", properties.join(", "))
}

/// The object's properties, if re-ordering them cannot change its meaning.
///
/// Spreads, methods, accessors, computed keys and repeated keys all make the
/// final value depend on property order.
fn partitionable_properties<'b, 'a>(
    object: &'b ObjectExpression<'a>,
) -> Option<Vec<&'b ObjectProperty<'a>>> {
    let mut seen = FxHashSet::default();
    let mut properties = Vec::with_capacity(object.properties.len());
    for property in &object.properties {
        let ObjectPropertyKind::ObjectProperty(prop) = property else {
            return None;
        };
        if prop.computed || prop.method || !matches!(prop.kind, PropertyKind::Init) {
            return None;
        }
        let key = property_key_name(&prop.key)?;
        if !seen.insert(key) {
            return None;
        }
        properties.push(&**prop);
    }
    Some(properties)
}
