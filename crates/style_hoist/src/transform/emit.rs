//! Stylesheet emitter.
//!
//! Serializes the final table as
//!
//! ```js
//! const fixedStyles = StyleSheet.create({
//!   colorRed: {
//!     color: 'red',
//!   },
//! });
//! ```
//!
//! Objects are always expanded one property per line. Arrays of scalars stay
//! on one line; arrays holding objects or arrays are expanded.

use oxc_data_structures::code_buffer::CodeBuffer;
use oxc_syntax::identifier::is_identifier_name;

use crate::options::{QuoteStyle, TrailingComma, TransformOptions};
use crate::store::StylesheetTable;
use crate::value::{StyleObject, StyleValue, format_number};

/// Render the table declaration, including the final newline.
pub fn emit_table(table: &StylesheetTable, options: &TransformOptions) -> String {
    let mut emitter = TableEmitter { code: CodeBuffer::default(), options, depth: 0 };
    emitter.print("const ");
    emitter.print(&options.table_name);
    emitter.print(" = ");
    emitter.print(&options.factory);
    emitter.print("(");
    let entries: Vec<_> = table.iter().collect();
    emitter.print_block(&entries, TableEmitter::print_object);
    emitter.print(");\n");
    emitter.code.into_string()
}

struct TableEmitter<'o> {
    code: CodeBuffer,
    options: &'o TransformOptions,
    depth: usize,
}

impl TableEmitter<'_> {
    fn print(&mut self, s: &str) {
        self.code.print_str(s);
    }

    fn newline_and_indent(&mut self) {
        self.code.print_char('\n');
        for _ in 0..self.depth * self.options.indent_width {
            self.code.print_char(' ');
        }
    }

    fn trailing_comma(&mut self) {
        if self.options.trailing_comma == TrailingComma::Es5 {
            self.print(",");
        }
    }

    /// Print `{ key: value, ... }` expanded one entry per line.
    fn print_block<V>(&mut self, entries: &[(&str, &V)], print_value: fn(&mut Self, &V)) {
        if entries.is_empty() {
            self.print("{}");
            return;
        }
        self.print("{");
        self.depth += 1;
        for (index, (key, value)) in entries.iter().enumerate() {
            self.newline_and_indent();
            self.print_key(key);
            self.print(": ");
            print_value(self, value);
            if index + 1 < entries.len() {
                self.print(",");
            } else {
                self.trailing_comma();
            }
        }
        self.depth -= 1;
        self.newline_and_indent();
        self.print("}");
    }

    fn print_object(&mut self, object: &StyleObject) {
        let entries: Vec<_> = object.iter().map(|(key, value)| (key.as_str(), value)).collect();
        self.print_block(&entries, Self::print_value);
    }

    fn print_key(&mut self, key: &str) {
        if is_identifier_name(key) {
            self.print(key);
        } else {
            let quoted = quote_string(key, self.options.quote_style);
            self.print(&quoted);
        }
    }

    fn print_value(&mut self, value: &StyleValue) {
        match value {
            StyleValue::Null => self.print("null"),
            StyleValue::Bool(value) => self.print(if *value { "true" } else { "false" }),
            StyleValue::Number(value) => {
                let text = format_number(*value);
                self.print(&text);
            }
            StyleValue::String(value) => {
                let quoted = quote_string(value, self.options.quote_style);
                self.print(&quoted);
            }
            StyleValue::Array(items) => self.print_array(items),
            StyleValue::Object(object) => self.print_object(object),
        }
    }

    fn print_array(&mut self, items: &[StyleValue]) {
        let nested = items
            .iter()
            .any(|item| matches!(item, StyleValue::Array(_) | StyleValue::Object(_)));
        if !nested {
            self.print("[");
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    self.print(", ");
                }
                self.print_value(item);
            }
            self.print("]");
            return;
        }

        self.print("[");
        self.depth += 1;
        for (index, item) in items.iter().enumerate() {
            self.newline_and_indent();
            self.print_value(item);
            if index + 1 < items.len() {
                self.print(",");
            } else {
                self.trailing_comma();
            }
        }
        self.depth -= 1;
        self.newline_and_indent();
        self.print("]");
    }
}

/// Quote and escape `value` as a JavaScript string literal.
pub fn quote_string(value: &str, quote_style: QuoteStyle) -> String {
    let quote = quote_style.quote();
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            ch if ch == quote => {
                out.push('\\');
                out.push(ch);
            }
            ch if ch.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(ch))),
            ch => out.push(ch),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(entries: &[(&str, StyleValue)]) -> StyleObject {
        entries.iter().map(|(key, value)| ((*key).to_string(), value.clone())).collect()
    }

    fn string(value: &str) -> StyleValue {
        StyleValue::String(value.to_string())
    }

    #[test]
    fn emits_one_property_per_line() {
        let mut table = StylesheetTable::default();
        table.insert("colorRed".to_string(), object(&[("color", string("red"))]));
        table.insert(
            "textCommon".to_string(),
            object(&[("fontSize", StyleValue::Number(12.0)), ("fontWeight", string("bold"))]),
        );

        assert_eq!(
            emit_table(&table, &TransformOptions::default()),
            "const fixedStyles = StyleSheet.create({
  colorRed: {
    color: 'red',
  },
  textCommon: {
    fontSize: 12,
    fontWeight: 'bold',
  },
});
"
        );
    }

    #[test]
    fn honors_quote_comma_and_indent_options() {
        let mut table = StylesheetTable::default();
        table.insert("flex".to_string(), object(&[("flex", StyleValue::Number(1.0))]));
        table.insert("color-red".to_string(), object(&[("color", string("red"))]));
        let options = TransformOptions::new()
            .with_table_name("styles")
            .with_factory("create")
            .with_quote_style(QuoteStyle::Double)
            .with_trailing_comma(TrailingComma::None)
            .with_indent_width(4);

        assert_eq!(
            emit_table(&table, &options),
            "const styles = create({
    flex: {
        flex: 1
    },
    \"color-red\": {
        color: \"red\"
    }
});
"
        );
    }

    #[test]
    fn expands_nested_arrays_and_objects() {
        let transform = StyleValue::Array(vec![
            StyleValue::Object(object(&[("rotate", string("90deg"))])),
            StyleValue::Object(object(&[("scale", StyleValue::Number(-0.5))])),
        ]);
        let mut table = StylesheetTable::default();
        table.insert(
            "transform".to_string(),
            object(&[
                ("transform", transform),
                ("margin", StyleValue::Array(vec![StyleValue::Number(1.0), StyleValue::Null])),
                ("flex-grow", StyleValue::Bool(true)),
            ]),
        );

        assert_eq!(
            emit_table(&table, &TransformOptions::default()),
            "const fixedStyles = StyleSheet.create({
  transform: {
    transform: [
      {
        rotate: '90deg',
      },
      {
        scale: -0.5,
      },
    ],
    margin: [1, null],
    'flex-grow': true,
  },
});
"
        );
    }

    #[test]
    fn escapes_strings() {
        assert_eq!(quote_string("it's", QuoteStyle::Single), r"'it\'s'");
        assert_eq!(quote_string("say \"hi\"", QuoteStyle::Single), "'say \"hi\"'");
        assert_eq!(quote_string("a\\b\nc", QuoteStyle::Double), r#""a\\b\nc""#);
        assert_eq!(quote_string("\u{0}", QuoteStyle::Single), r"'\u0000'");
    }
}
