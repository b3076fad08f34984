//! Strict literal sub-parser.
//!
//! Rebuilds a [`StyleValue`] from an expression node if, and only if, the node
//! is a compile-time constant: nested object, array and scalar literals.
//! Identifiers, calls, member access, operators (other than a sign on a
//! number) and interpolated templates are rejected. Nothing is evaluated.

use oxc_ast::ast::*;
use oxc_span::{GetSpan, Span};
use oxc_syntax::operator::UnaryOperator;
use thiserror::Error;

use crate::value::{StyleObject, StyleValue, format_number};

/// Maximum nesting of arrays/objects accepted in a single fragment.
pub const MAX_LITERAL_DEPTH: usize = 32;

/// Why an expression could not be reconstructed as constant data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("expression is not a compile-time constant")]
    NotConstant(Span),
    #[error("template literal contains interpolations")]
    Interpolated(Span),
    #[error("object property cannot be reconstructed as data")]
    UnsupportedProperty(Span),
    #[error("array contains a hole or a spread element")]
    UnsupportedElement(Span),
    #[error("literal nesting exceeds {} levels", MAX_LITERAL_DEPTH)]
    TooDeep(Span),
}

impl LiteralError {
    pub fn span(&self) -> Span {
        match self {
            Self::NotConstant(span)
            | Self::Interpolated(span)
            | Self::UnsupportedProperty(span)
            | Self::UnsupportedElement(span)
            | Self::TooDeep(span) => *span,
        }
    }
}

/// Reconstruct an object literal as a property mapping.
pub fn object_content(object: &ObjectExpression<'_>) -> Result<StyleObject, LiteralError> {
    object_value(object, 1)
}

/// Reconstruct any constant expression.
pub fn constant_value(expr: &Expression<'_>) -> Result<StyleValue, LiteralError> {
    value(expr, 0)
}

/// Whether `expr` is accepted by [`constant_value`].
pub fn is_constant(expr: &Expression<'_>) -> bool {
    constant_value(expr).is_ok()
}

/// The static name of a non-computed property key.
pub fn property_key_name(key: &PropertyKey<'_>) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(ident) => Some(ident.name.to_string()),
        PropertyKey::StringLiteral(lit) => Some(lit.value.to_string()),
        PropertyKey::NumericLiteral(lit) if lit.value.is_finite() => Some(format_number(lit.value)),
        _ => None,
    }
}

fn value(expr: &Expression<'_>, depth: usize) -> Result<StyleValue, LiteralError> {
    if depth > MAX_LITERAL_DEPTH {
        return Err(LiteralError::TooDeep(expr.span()));
    }
    match expr {
        Expression::NullLiteral(_) => Ok(StyleValue::Null),
        Expression::BooleanLiteral(lit) => Ok(StyleValue::Bool(lit.value)),
        Expression::NumericLiteral(lit) => finite_number(lit).map(StyleValue::Number),
        Expression::StringLiteral(lit) => Ok(StyleValue::String(lit.value.to_string())),
        Expression::TemplateLiteral(template) => template_value(template),
        Expression::UnaryExpression(unary) => signed_number(unary),
        Expression::ParenthesizedExpression(paren) => value(&paren.expression, depth + 1),
        Expression::ArrayExpression(array) => {
            let mut items = Vec::with_capacity(array.elements.len());
            for element in &array.elements {
                let Some(item) = element.as_expression() else {
                    return Err(LiteralError::UnsupportedElement(element.span()));
                };
                items.push(value(item, depth + 1)?);
            }
            Ok(StyleValue::Array(items))
        }
        Expression::ObjectExpression(object) => {
            object_value(object, depth + 1).map(StyleValue::Object)
        }
        _ => Err(LiteralError::NotConstant(expr.span())),
    }
}

fn object_value(object: &ObjectExpression<'_>, depth: usize) -> Result<StyleObject, LiteralError> {
    if depth > MAX_LITERAL_DEPTH {
        return Err(LiteralError::TooDeep(object.span));
    }
    let mut content = StyleObject::with_capacity(object.properties.len());
    for property in &object.properties {
        let ObjectPropertyKind::ObjectProperty(prop) = property else {
            return Err(LiteralError::UnsupportedProperty(property.span()));
        };
        if prop.computed || prop.method || !matches!(prop.kind, PropertyKind::Init) {
            return Err(LiteralError::UnsupportedProperty(prop.span));
        }
        let Some(key) = property_key_name(&prop.key) else {
            return Err(LiteralError::UnsupportedProperty(prop.span));
        };
        // A repeated key keeps its first position and its last value, as in JS.
        content.insert(key, value(&prop.value, depth + 1)?);
    }
    Ok(content)
}

fn template_value(template: &TemplateLiteral<'_>) -> Result<StyleValue, LiteralError> {
    if !template.expressions.is_empty() {
        return Err(LiteralError::Interpolated(template.span));
    }
    let mut text = String::new();
    for quasi in &template.quasis {
        let Some(cooked) = &quasi.value.cooked else {
            return Err(LiteralError::NotConstant(template.span));
        };
        text.push_str(cooked.as_str());
    }
    Ok(StyleValue::String(text))
}

fn signed_number(unary: &UnaryExpression<'_>) -> Result<StyleValue, LiteralError> {
    let Expression::NumericLiteral(lit) = &unary.argument else {
        return Err(LiteralError::NotConstant(unary.span));
    };
    match unary.operator {
        UnaryOperator::UnaryNegation => finite_number(lit).map(|value| StyleValue::Number(-value)),
        UnaryOperator::UnaryPlus => finite_number(lit).map(StyleValue::Number),
        _ => Err(LiteralError::NotConstant(unary.span)),
    }
}

/// `1e999` overflows to infinity, which has no literal spelling in the table.
fn finite_number(lit: &NumericLiteral<'_>) -> Result<f64, LiteralError> {
    if lit.value.is_finite() { Ok(lit.value) } else { Err(LiteralError::NotConstant(lit.span)) }
}

#[cfg(test)]
mod tests {
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    use super::*;

    fn parse_value(source: &str) -> Result<StyleValue, LiteralError> {
        let allocator = Allocator::default();
        let expr = Parser::new(&allocator, source, SourceType::jsx())
            .parse_expression()
            .unwrap();
        constant_value(&expr)
    }

    fn string(value: &str) -> StyleValue {
        StyleValue::String(value.to_string())
    }

    #[test]
    fn accepts_scalars() {
        assert_eq!(parse_value("'red'"), Ok(string("red")));
        assert_eq!(parse_value("\"red\""), Ok(string("red")));
        assert_eq!(parse_value("10"), Ok(StyleValue::Number(10.0)));
        assert_eq!(parse_value("-1.5"), Ok(StyleValue::Number(-1.5)));
        assert_eq!(parse_value("true"), Ok(StyleValue::Bool(true)));
        assert_eq!(parse_value("null"), Ok(StyleValue::Null));
        assert_eq!(parse_value("`plain`"), Ok(string("plain")));
        assert_eq!(parse_value("('wrapped')"), Ok(string("wrapped")));
    }

    #[test]
    fn accepts_nested_structures() {
        let value = parse_value("{ transform: [{ rotate: '45deg' }], shadowOffset: { width: 0, height: 2 } }")
            .unwrap();
        let StyleValue::Object(object) = value else {
            panic!("expected an object");
        };
        assert_eq!(object.len(), 2);
        let StyleValue::Array(transform) = &object["transform"] else {
            panic!("expected an array");
        };
        assert_eq!(transform.len(), 1);
        let StyleValue::Object(offset) = &object["shadowOffset"] else {
            panic!("expected an object");
        };
        assert_eq!(offset["height"], StyleValue::Number(2.0));
    }

    #[test]
    fn accepts_quoted_and_numeric_keys() {
        let value = parse_value("{ 'font-size': 12, 1: 'one' }").unwrap();
        let StyleValue::Object(object) = value else {
            panic!("expected an object");
        };
        assert_eq!(object.keys().collect::<Vec<_>>(), ["font-size", "1"]);
    }

    #[test]
    fn repeated_keys_keep_first_position_and_last_value() {
        let value = parse_value("{ color: 'red', flex: 1, color: 'blue' }").unwrap();
        let StyleValue::Object(object) = value else {
            panic!("expected an object");
        };
        assert_eq!(object.keys().collect::<Vec<_>>(), ["color", "flex"]);
        assert_eq!(object["color"], string("blue"));
    }

    #[test]
    fn rejects_runtime_values() {
        assert!(matches!(parse_value("width"), Err(LiteralError::NotConstant(_))));
        assert!(matches!(parse_value("theme.color"), Err(LiteralError::NotConstant(_))));
        assert!(matches!(parse_value("getColor()"), Err(LiteralError::NotConstant(_))));
        assert!(matches!(parse_value("1 + 1"), Err(LiteralError::NotConstant(_))));
        assert!(matches!(parse_value("-size"), Err(LiteralError::NotConstant(_))));
        assert!(matches!(parse_value("`${size}px`"), Err(LiteralError::Interpolated(_))));
        assert!(matches!(parse_value("undefined"), Err(LiteralError::NotConstant(_))));
    }

    #[test]
    fn rejects_numbers_that_overflow() {
        assert!(matches!(parse_value("1e999"), Err(LiteralError::NotConstant(_))));
        assert!(matches!(parse_value("-1e999"), Err(LiteralError::NotConstant(_))));
        assert!(matches!(parse_value("[1, 1e400]"), Err(LiteralError::NotConstant(_))));
        assert!(matches!(parse_value("{ 1e999: 'big' }"), Err(LiteralError::UnsupportedProperty(_))));
        assert_eq!(parse_value("1e308"), Ok(StyleValue::Number(1e308)));
    }

    #[test]
    fn rejects_non_data_objects_and_arrays() {
        assert!(matches!(parse_value("{ ...base }"), Err(LiteralError::UnsupportedProperty(_))));
        assert!(matches!(parse_value("{ [key]: 1 }"), Err(LiteralError::UnsupportedProperty(_))));
        assert!(matches!(parse_value("{ get a() { return 1 } }"), Err(LiteralError::UnsupportedProperty(_))));
        assert!(matches!(parse_value("{ a() {} }"), Err(LiteralError::UnsupportedProperty(_))));
        assert!(matches!(parse_value("{ color }"), Err(LiteralError::NotConstant(_))));
        assert!(matches!(parse_value("[1, , 2]"), Err(LiteralError::UnsupportedElement(_))));
        assert!(matches!(parse_value("[...items]"), Err(LiteralError::UnsupportedElement(_))));
    }

    #[test]
    fn rejects_excessive_nesting() {
        let source = format!("{}1{}", "[".repeat(40), "]".repeat(40));
        assert!(matches!(parse_value(&source), Err(LiteralError::TooDeep(_))));
    }

    #[test]
    fn error_reports_offending_span() {
        let err = parse_value("{ color: 'red', width: size }").unwrap_err();
        assert_eq!(err.span(), Span::new(23, 27));
    }
}
