//! Continuity loader: reads a table emitted by a previous run.
//!
//! The table declaration is recognized at the top level only:
//!
//! ```js
//! const fixedStyles = StyleSheet.create({ colorRed: { color: 'red' } });
//! export const fixedStyles = { colorRed: { color: 'red' } };
//! ```
//!
//! Every well-formed entry seeds the store with its identifier, so content
//! that is still in use keeps its name. The declaration itself is always
//! removed; the emitter regenerates it at the end of the unit.
//!
//! Any other top-level binding of the table name (an import, a function, a
//! declaration with several declarators) is a conflict: appending the table
//! would redeclare it, so the unit is left alone.

use oxc_ast::ast::*;
use oxc_span::{GetSpan, Span};

use crate::TransformOptions;
use crate::diagnostic::Diagnostic;
use crate::literal::{object_content, property_key_name};
use crate::store::StyleContext;

/// What was found of a previously emitted table.
#[derive(Debug, Default)]
pub struct PreviousTable {
    /// Span of the declaration, including its line terminator.
    pub removal: Option<Span>,
    /// Number of entries carried over.
    pub seeded: usize,
    /// Top-level statement binding the table name that is not a table.
    pub conflict: Option<Span>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Seed `context` from the table declaration in `program`, if any.
pub fn load_previous_table(
    program: &Program<'_>,
    source_text: &str,
    options: &TransformOptions,
    context: &mut StyleContext,
) -> PreviousTable {
    let mut previous = PreviousTable::default();
    if let Some(span) = conflicting_binding(program, &options.table_name) {
        previous.conflict = Some(span);
        previous.diagnostics.push(
            Diagnostic::warning(
                format!("`{}` is already bound; inline styles are left in place", options.table_name),
                span,
                source_text,
            )
            .with_hint("Rename the binding or choose another table name"),
        );
        return previous;
    }

    let Some((span, declarator)) = program
        .body
        .iter()
        .find_map(|stmt| table_declarator(stmt, &options.table_name))
    else {
        return previous;
    };
    previous.removal = Some(with_line_terminator(span, source_text));

    let Some(object) = declarator.init.as_ref().and_then(table_object) else {
        previous.diagnostics.push(
            Diagnostic::warning(
                format!("`{}` is not a stylesheet table; it will be regenerated", options.table_name),
                span,
                source_text,
            )
            .with_hint("Expected an object literal, optionally wrapped in a single call"),
        );
        return previous;
    };

    for property in &object.properties {
        match seed_entry(property, context) {
            Ok(()) => previous.seeded += 1,
            Err(reason) => previous.diagnostics.push(Diagnostic::warning(
                format!("Dropping stylesheet entry: {reason}"),
                property.span(),
                source_text,
            )),
        }
    }
    tracing::debug!(
        table = %options.table_name,
        seeded = previous.seeded,
        dropped = previous.diagnostics.len(),
        "loaded previous stylesheet table"
    );
    previous
}

/// The single declarator binding `table_name` in a top-level statement.
fn table_declarator<'b, 'a>(
    stmt: &'b Statement<'a>,
    table_name: &str,
) -> Option<(Span, &'b VariableDeclarator<'a>)> {
    let decl = match stmt {
        Statement::VariableDeclaration(decl) => decl,
        Statement::ExportNamedDeclaration(export) => match &export.declaration {
            Some(Declaration::VariableDeclaration(decl)) => decl,
            _ => return None,
        },
        _ => return None,
    };
    let [declarator] = decl.declarations.as_slice() else {
        return None;
    };
    let ident = declarator.id.get_binding_identifier()?;
    (ident.name.as_str() == table_name).then_some((stmt.span(), declarator))
}

fn conflicting_binding(program: &Program<'_>, name: &str) -> Option<Span> {
    program
        .body
        .iter()
        .filter(|stmt| table_declarator(stmt, name).is_none())
        .find(|stmt| binds_name(stmt, name))
        .map(GetSpan::span)
}

/// Whether a top-level statement introduces a value binding called `name`.
fn binds_name(stmt: &Statement<'_>, name: &str) -> bool {
    let is_name = |ident: &BindingIdentifier<'_>| ident.name.as_str() == name;
    let declaration = match stmt {
        Statement::ImportDeclaration(import) => {
            return import.specifiers.iter().flatten().any(|specifier| is_name(specifier.local()));
        }
        Statement::ExportDefaultDeclaration(export) => {
            return match &export.declaration {
                ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                    func.id.as_ref().is_some_and(is_name)
                }
                ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                    class.id.as_ref().is_some_and(is_name)
                }
                _ => false,
            };
        }
        Statement::ExportNamedDeclaration(export) => export.declaration.as_ref(),
        _ => stmt.as_declaration(),
    };
    match declaration {
        Some(Declaration::VariableDeclaration(decl)) => decl
            .declarations
            .iter()
            .any(|declarator| declarator.id.get_binding_identifiers().into_iter().any(is_name)),
        Some(Declaration::TSTypeAliasDeclaration(_) | Declaration::TSInterfaceDeclaration(_))
        | None => false,
        Some(decl) => decl.id().is_some_and(is_name),
    }
}

/// `factory({...})` or a bare `{...}`.
fn table_object<'b, 'a>(init: &'b Expression<'a>) -> Option<&'b ObjectExpression<'a>> {
    match init.without_parentheses() {
        Expression::ObjectExpression(object) => Some(object),
        Expression::CallExpression(call) if call.arguments.len() == 1 => {
            match call.arguments[0].as_expression()?.without_parentheses() {
                Expression::ObjectExpression(object) => Some(object),
                _ => None,
            }
        }
        _ => None,
    }
}

fn seed_entry(
    property: &ObjectPropertyKind<'_>,
    context: &mut StyleContext,
) -> Result<(), &'static str> {
    let ObjectPropertyKind::ObjectProperty(prop) = property else {
        return Err("spread entries cannot be reused");
    };
    if prop.computed || prop.method || !matches!(prop.kind, PropertyKind::Init) {
        return Err("entry key is not static");
    }
    let id = property_key_name(&prop.key).ok_or("entry key is not static")?;
    if context.table.contains(&id) {
        return Err("duplicate entry name");
    }
    let Expression::ObjectExpression(object) = prop.value.without_parentheses() else {
        return Err("entry value is not an object literal");
    };
    let content = object_content(object).map_err(|_| "entry value is not constant")?;
    if content.is_empty() {
        return Err("entry is empty");
    }

    context.store.register(content.clone(), None, Some(&id));
    context.table.insert(id, content);
    Ok(())
}

/// Extend `span` over the line break that ends the statement, if any.
fn with_line_terminator(span: Span, source_text: &str) -> Span {
    let rest = &source_text[span.end as usize..];
    let extra = if rest.starts_with("\r\n") {
        2
    } else if rest.starts_with('\n') {
        1
    } else {
        0
    };
    Span::new(span.start, span.end + extra)
}

#[cfg(test)]
mod tests {
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    use super::*;
    use crate::value::StyleValue;

    fn load(source: &str) -> (PreviousTable, StyleContext) {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::jsx()).parse();
        assert!(ret.errors.is_empty(), "{:?}", ret.errors);
        let mut context = StyleContext::new();
        let previous =
            load_previous_table(&ret.program, source, &TransformOptions::default(), &mut context);
        (previous, context)
    }

    #[test]
    fn seeds_entries_with_their_names() {
        let source = "import x from 'y';
const fixedStyles = StyleSheet.create({
  headerStyle: { fontSize: 20, color: 'navy' },
  'odd-name': { flex: 1 },
});
";
        let (previous, context) = load(source);
        assert_eq!(previous.seeded, 2);
        assert!(previous.diagnostics.is_empty());

        let removal = previous.removal.unwrap();
        assert_eq!(removal.start, 19);
        assert_eq!(removal.end as usize, source.len());

        let names: Vec<_> = context.table.iter().map(|(id, _)| id).collect();
        assert_eq!(names, ["headerStyle", "odd-name"]);
        let record = context.store.iter().next().unwrap();
        assert_eq!(record.assigned_id.as_deref(), Some("headerStyle"));
        assert_eq!(record.usage_count, 1);
        assert!(record.seeded);
        assert_eq!(record.content["fontSize"], StyleValue::Number(20.0));
    }

    #[test]
    fn accepts_exported_bare_objects() {
        let (previous, context) = load("export const fixedStyles = { flex: { flex: 1 } };");
        assert_eq!(previous.seeded, 1);
        assert!(context.table.contains("flex"));
    }

    #[test]
    fn duplicate_content_keeps_the_first_name() {
        let (previous, context) =
            load("const fixedStyles = StyleSheet.create({ a: { flex: 1 }, b: { flex: 1 } });");
        assert_eq!(previous.seeded, 2);
        assert_eq!(context.store.len(), 1);
        assert_eq!(context.table.len(), 2);
        let record = context.store.iter().next().unwrap();
        assert_eq!(record.assigned_id.as_deref(), Some("a"));
    }

    #[test]
    fn malformed_entries_are_dropped_with_a_warning() {
        let (previous, context) = load(
            "const fixedStyles = StyleSheet.create({
  good: { flex: 1 },
  dynamic: { width: size },
  [computed]: { flex: 2 },
  notObject: 'red',
  ...rest,
  good: { flex: 3 },
  empty: {},
});",
        );
        assert_eq!(previous.seeded, 1);
        assert_eq!(previous.diagnostics.len(), 6);
        assert!(previous.diagnostics.iter().all(|d| !d.is_error()));
        assert_eq!(context.table.len(), 1);
    }

    #[test]
    fn malformed_table_is_still_removed() {
        let (previous, context) = load("let fixedStyles = makeStyles();\nfoo();\n");
        assert_eq!(previous.removal, Some(Span::new(0, 32)));
        assert_eq!(previous.diagnostics.len(), 1);
        assert!(context.table.is_empty());
    }

    #[test]
    fn ignores_nested_bindings() {
        let (previous, _) = load("function f() { const fixedStyles = { a: { flex: 1 } }; }");
        assert_eq!(previous.removal, None);
        assert_eq!(previous.conflict, None);
        assert!(previous.diagnostics.is_empty());
    }

    #[test]
    fn other_top_level_bindings_conflict() {
        for source in [
            "import { fixedStyles } from './styles';",
            "import * as fixedStyles from './styles';",
            "const fixedStyles = { a: { flex: 1 } }, other = 1;",
            "const { fixedStyles } = theme;",
            "function fixedStyles() {}",
            "export class fixedStyles {}",
            "export default function fixedStyles() {}",
        ] {
            let (previous, context) = load(source);
            assert!(previous.conflict.is_some(), "{source}");
            assert_eq!(previous.removal, None, "{source}");
            assert_eq!(previous.diagnostics.len(), 1, "{source}");
            assert!(!previous.diagnostics[0].is_error());
            assert!(context.table.is_empty());
        }
    }
}
