//! Naming engine.
//!
//! Derives a stable, readable identifier for each unique style record.
//! Single-property content is named after its property (and sometimes its
//! value) using a per-property [`NamingStrategy`]; anything larger is named
//! after the elements that use it. Collisions are resolved by the
//! [`NameCounter`](crate::store::NameCounter) alone.

mod case;

use oxc_syntax::identifier::is_identifier_name;

use crate::store::{RecordId, StyleContext, StyleRecord};
use crate::value::StyleValue;

pub use case::{lower_camel_case, upper_camel_case};

/// Name used when nothing better can be derived.
const FALLBACK_NAME: &str = "style";

/// How a single-property style is turned into a base name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingStrategy {
    /// `zIndex: 1` → `zIndex`
    KeyOnly,
    /// `flexDirection: 'row'` → `flexDirectionRow`
    KeyPlusValue,
    /// `position: 'absolute'` → `absolute`
    ValueOnly,
    /// `color: 'red'` → `colorRed`, but `color: '#f00'` → `color`
    ColorAware,
    /// `marginTop: 10` → `margin`
    FixedLiteral(&'static str),
    /// `textTransform: 'none'` → `textTransformNone`, otherwise the value
    KeywordOrValue(&'static str),
}

/// Look up the naming strategy for a property name.
pub fn strategy_for(property: &str) -> NamingStrategy {
    match property {
        "direction" | "textAlign" | "fontWeight" | "flexDirection" | "alignItems"
        | "fontStyle" | "fontVariant" => NamingStrategy::KeyPlusValue,
        "justifyContent" | "position" | "fontFamily" | "textDecorationStyle" => {
            NamingStrategy::ValueOnly
        }
        "color" | "backgroundColor" | "textDecorationColor" | "textShadowColor" => {
            NamingStrategy::ColorAware
        }
        "marginTop" | "marginBottom" | "marginLeft" | "marginRight" | "marginVertical"
        | "marginHorizontal" => NamingStrategy::FixedLiteral("margin"),
        "paddingTop" | "paddingBottom" | "paddingLeft" | "paddingRight" | "paddingVertical"
        | "paddingHorizontal" => NamingStrategy::FixedLiteral("padding"),
        "textDecorationLine" | "textTransform" => NamingStrategy::KeywordOrValue("none"),
        _ => NamingStrategy::KeyOnly,
    }
}

impl NamingStrategy {
    /// Base name for the single property `key: value`.
    pub fn apply(self, key: &str, value: &StyleValue) -> String {
        match self {
            Self::KeyOnly => lower_camel_case(key),
            Self::KeyPlusValue => match value.name_text().filter(|text| !text.is_empty()) {
                Some(text) => lower_camel_case(key) + &upper_camel_case(&text),
                None => Self::KeyOnly.apply(key, value),
            },
            Self::ValueOnly => match value.name_text().filter(|text| !text.is_empty()) {
                Some(text) => lower_camel_case(&text),
                None => Self::KeyOnly.apply(key, value),
            },
            Self::ColorAware => {
                let is_color_code = value
                    .name_text()
                    .is_none_or(|text| text.contains('#') || text.contains('('));
                if is_color_code {
                    Self::KeyOnly.apply(key, value)
                } else {
                    Self::KeyPlusValue.apply(key, value)
                }
            }
            Self::FixedLiteral(name) => name.to_string(),
            Self::KeywordOrValue(keyword) => {
                if value.is_keyword(keyword) {
                    Self::KeyPlusValue.apply(key, value)
                } else {
                    Self::ValueOnly.apply(key, value)
                }
            }
        }
    }
}

/// Candidate base name for a record, before collision handling.
pub fn base_name(record: &StyleRecord) -> String {
    if record.content.len() == 1
        && let Some((key, value)) = record.content.first()
    {
        let name = strategy_for(key).apply(key, value);
        if is_identifier_name(&name) {
            return name;
        }
        let key_name = lower_camel_case(key);
        return if is_identifier_name(&key_name) { key_name } else { FALLBACK_NAME.to_string() };
    }

    let name = match record.element_names.len() {
        0 => FALLBACK_NAME.to_string(),
        1 => {
            let element = lower_camel_case(&record.element_names[0]);
            if record.usage_count > 1 { element + "Common" } else { element }
        }
        _ => "common".to_string(),
    };
    if is_identifier_name(&name) { name } else { FALLBACK_NAME.to_string() }
}

/// Assign (or return the already assigned) identifier of a record.
///
/// A fresh identifier is claimed from the name counter and added to the
/// stylesheet table together with the record's content. Claims that land on
/// an identifier already present in the table are skipped; every claim
/// yields a new suffix, so this always terminates.
pub fn name_for(context: &mut StyleContext, id: RecordId) -> String {
    let record = context.store.get(id);
    if let Some(assigned) = &record.assigned_id {
        return assigned.clone();
    }

    let base = base_name(record);
    let name = loop {
        let candidate = context.names.claim(&base);
        if !context.table.contains(&candidate) {
            break candidate;
        }
    };
    tracing::trace!(
        name = %name,
        fingerprint = %record.fingerprint,
        usage_count = record.usage_count,
        "assigned style name"
    );

    let content = record.content.clone();
    context.table.insert(name.clone(), content);
    context.store.get_mut(id).assigned_id = Some(name.clone());
    name
}
