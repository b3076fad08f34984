//! JSX helpers shared by the pipeline stages.

use oxc_ast::ast::*;
use oxc_span::Span;

pub fn get_jsx_element_name(name: &JSXElementName<'_>) -> String {
    match name {
        JSXElementName::Identifier(ident) => ident.name.to_string(),
        JSXElementName::IdentifierReference(ident) => ident.name.to_string(),
        JSXElementName::NamespacedName(ns) => {
            format!("{}:{}", ns.namespace.name, ns.name.name)
        }
        JSXElementName::MemberExpression(expr) => get_jsx_member_expression_name(expr),
        JSXElementName::ThisExpression(_) => "this".to_string(),
    }
}

fn get_jsx_member_expression_name(expr: &JSXMemberExpression<'_>) -> String {
    let object_name = match &expr.object {
        JSXMemberExpressionObject::IdentifierReference(ident) => ident.name.to_string(),
        JSXMemberExpressionObject::MemberExpression(inner) => get_jsx_member_expression_name(inner),
        JSXMemberExpressionObject::ThisExpression(_) => "this".to_string(),
    };
    format!("{object_name}.{}", expr.property.name)
}

pub fn get_jsx_attribute_name(name: &JSXAttributeName<'_>) -> String {
    match name {
        JSXAttributeName::Identifier(ident) => ident.name.to_string(),
        JSXAttributeName::NamespacedName(ns) => {
            format!("{}:{}", ns.namespace.name, ns.name.name)
        }
    }
}

/// The expression bound to `attr` when written as `attr={expression}`.
pub fn attribute_expression<'b, 'a>(attr: &'b JSXAttribute<'a>) -> Option<&'b Expression<'a>> {
    match &attr.value {
        Some(JSXAttributeValue::ExpressionContainer(container)) => {
            container.expression.as_expression()
        }
        _ => None,
    }
}

/// Source text covered by `span`.
pub fn slice(source_text: &str, span: Span) -> &str {
    &source_text[span.start as usize..span.end as usize]
}
