//! Camel-casing of property names, values and element names.
//!
//! Words are split on any non-alphanumeric character, on lower-to-upper case
//! transitions, before the last capital of an acronym (`XMLHttp` → `XML`,
//! `Http`) and between letters and digits. `space-between` becomes
//! `spaceBetween`, `Animated.View` becomes `animatedView`, `10px` becomes
//! `10Px`.

use convert_case::{Boundary, Case, Converter, Pattern};

const BOUNDARIES: [Boundary; 10] = [
    Boundary::Hyphen,
    Boundary::Underscore,
    Boundary::Space,
    Boundary::LowerUpper,
    Boundary::Acronym,
    Boundary::LowerDigit,
    Boundary::UpperDigit,
    Boundary::DigitLower,
    Boundary::DigitUpper,
    // `.`, `#`, `%`, `/` and the rest of the punctuation in values.
    Boundary::Custom { condition: is_separator, start: 0, len: 1 },
];

fn is_separator(graphemes: &[&str]) -> bool {
    graphemes.first().is_some_and(|grapheme| !grapheme.chars().all(char::is_alphanumeric))
}

fn converter(case: Case<'_>) -> Converter {
    // Leading and repeated separators leave empty words behind.
    Converter::new().set_boundaries(&BOUNDARIES).add_pattern(Pattern::RemoveEmpty).to_case(case)
}

/// `fontWeight`, `space-between` → `spaceBetween`.
pub fn lower_camel_case(input: &str) -> String {
    converter(Case::Camel).convert(input)
}

/// `space-between` → `SpaceBetween`.
pub fn upper_camel_case(input: &str) -> String {
    converter(Case::Pascal).convert(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_camel_case_of_property_names() {
        assert_eq!(lower_camel_case("fontWeight"), "fontWeight");
        assert_eq!(lower_camel_case("backgroundColor"), "backgroundColor");
        assert_eq!(lower_camel_case("font-weight"), "fontWeight");
        assert_eq!(lower_camel_case("WebkitBoxShadow"), "webkitBoxShadow");
    }

    #[test]
    fn lower_camel_case_of_values() {
        assert_eq!(lower_camel_case("space-between"), "spaceBetween");
        assert_eq!(lower_camel_case("flex-start"), "flexStart");
        assert_eq!(lower_camel_case("Helvetica Neue"), "helveticaNeue");
        assert_eq!(lower_camel_case("line-through underline"), "lineThroughUnderline");
        assert_eq!(lower_camel_case("#fff"), "fff");
        assert_eq!(lower_camel_case("50%"), "50");
        assert_eq!(lower_camel_case("snake_case"), "snakeCase");
        assert_eq!(lower_camel_case(""), "");
    }

    #[test]
    fn lower_camel_case_of_element_names() {
        assert_eq!(lower_camel_case("View"), "view");
        assert_eq!(lower_camel_case("Animated.View"), "animatedView");
        assert_eq!(lower_camel_case("TouchableOpacity"), "touchableOpacity");
        assert_eq!(lower_camel_case("XMLHttpRequest"), "xmlHttpRequest");
    }

    #[test]
    fn digits_start_new_words() {
        assert_eq!(lower_camel_case("10px"), "10Px");
        assert_eq!(lower_camel_case("h1"), "h1");
        assert_eq!(upper_camel_case("700"), "700");
    }

    #[test]
    fn upper_camel_case_capitalizes_every_word() {
        assert_eq!(upper_camel_case("row"), "Row");
        assert_eq!(upper_camel_case("row-reverse"), "RowReverse");
        assert_eq!(upper_camel_case("bold"), "Bold");
        assert_eq!(upper_camel_case("small-caps"), "SmallCaps");
        assert_eq!(upper_camel_case("#fff"), "Fff");
    }
}
