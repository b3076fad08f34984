//! Per-unit state shared by the pipeline stages.
//!
//! [`StyleContext`] owns the reference store, the name counters and the
//! stylesheet table. A new context is built for every source unit, so usage
//! counts and claimed names can never leak from one file into the next.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHashMap;

use crate::value::{Fingerprint, StyleObject};

/// Index of a record inside a [`StyleStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(usize);

/// One unique piece of hoistable style content.
#[derive(Debug, Clone)]
pub struct StyleRecord {
    pub fingerprint: Fingerprint,
    pub content: StyleObject,
    pub usage_count: usize,
    /// Tag names of the elements that referenced this content, first use first.
    pub element_names: IndexSet<String>,
    pub assigned_id: Option<String>,
    /// Created from a previously emitted table entry.
    pub seeded: bool,
}

/// Content-addressed store of [`StyleRecord`]s.
///
/// Records are bucketed by fingerprint and matched on content, so two
/// different objects with colliding fingerprints stay separate records.
#[derive(Debug, Default)]
pub struct StyleStore {
    records: Vec<StyleRecord>,
    by_fingerprint: FxHashMap<Fingerprint, Vec<RecordId>>,
}

impl StyleStore {
    /// Record one use of `content`.
    ///
    /// The first registration of some content creates its record; later ones
    /// bump the usage count and add the element name. An explicit id only
    /// sticks if the record has no id yet.
    pub fn register(
        &mut self,
        content: StyleObject,
        element_name: Option<&str>,
        explicit_id: Option<&str>,
    ) -> RecordId {
        let fingerprint = Fingerprint::of(&content);
        self.register_with_fingerprint(fingerprint, content, element_name, explicit_id)
    }

    fn register_with_fingerprint(
        &mut self,
        fingerprint: Fingerprint,
        content: StyleObject,
        element_name: Option<&str>,
        explicit_id: Option<&str>,
    ) -> RecordId {
        if let Some(id) = self.lookup(fingerprint, &content) {
            let record = &mut self.records[id.0];
            record.usage_count += 1;
            if let Some(name) = element_name {
                record.element_names.insert(name.to_string());
            }
            if record.assigned_id.is_none()
                && let Some(explicit_id) = explicit_id
            {
                record.assigned_id = Some(explicit_id.to_string());
                record.seeded = true;
            }
            return id;
        }

        let id = RecordId(self.records.len());
        self.records.push(StyleRecord {
            fingerprint,
            content,
            usage_count: 1,
            element_names: element_name.map(ToString::to_string).into_iter().collect(),
            assigned_id: explicit_id.map(ToString::to_string),
            seeded: explicit_id.is_some(),
        });
        self.by_fingerprint.entry(fingerprint).or_default().push(id);
        id
    }

    fn lookup(&self, fingerprint: Fingerprint, content: &StyleObject) -> Option<RecordId> {
        // `IndexMap` equality ignores property order, like the fingerprint.
        self.by_fingerprint
            .get(&fingerprint)?
            .iter()
            .copied()
            .find(|id| self.records[id.0].content == *content)
    }

    pub fn get(&self, id: RecordId) -> &StyleRecord {
        &self.records[id.0]
    }

    pub fn get_mut(&mut self, id: RecordId) -> &mut StyleRecord {
        &mut self.records[id.0]
    }

    /// The record holding exactly `content`.
    pub fn find(&self, content: &StyleObject) -> Option<&StyleRecord> {
        self.lookup(Fingerprint::of(content), content).map(|id| &self.records[id.0])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleRecord> {
        self.records.iter()
    }
}

/// Number of claims made on each candidate base name.
#[derive(Debug, Default)]
pub struct NameCounter {
    claims: FxHashMap<String, usize>,
}

impl NameCounter {
    /// Claim `base`: the first claim gets `base`, then `base1`, `base2`, ...
    pub fn claim(&mut self, base: &str) -> String {
        let count = self.claims.entry(base.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 { base.to_string() } else { format!("{base}{}", *count - 1) }
    }
}

/// The emitted identifier → content mapping, in assignment order.
#[derive(Debug, Default)]
pub struct StylesheetTable {
    entries: IndexMap<String, StyleObject>,
}

impl StylesheetTable {
    pub fn insert(&mut self, id: String, content: StyleObject) {
        self.entries.insert(id, content);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&StyleObject> {
        self.entries.get(id)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|id, _| keep(id));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleObject)> {
        self.entries.iter().map(|(id, content)| (id.as_str(), content))
    }
}

/// All mutable state for transforming one source unit.
#[derive(Debug, Default)]
pub struct StyleContext {
    pub store: StyleStore,
    pub names: NameCounter,
    pub table: StylesheetTable,
}

impl StyleContext {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::StyleValue;

    fn content(key: &str, value: &str) -> StyleObject {
        let mut object = StyleObject::new();
        object.insert(key.to_string(), StyleValue::String(value.to_string()));
        object
    }

    #[test]
    fn register_deduplicates_by_content() {
        let mut store = StyleStore::default();
        let a = store.register(content("color", "red"), Some("Text"), None);
        let b = store.register(content("color", "red"), Some("View"), None);
        let c = store.register(content("color", "red"), Some("Text"), None);

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(store.len(), 1);

        let record = store.get(a);
        assert_eq!(record.usage_count, 3);
        assert_eq!(record.element_names.iter().collect::<Vec<_>>(), ["Text", "View"]);
        assert_eq!(record.assigned_id, None);
    }

    #[test]
    fn first_explicit_id_wins() {
        let mut store = StyleStore::default();
        let id = store.register(content("fontWeight", "bold"), None, Some("headerStyle"));
        store.register(content("fontWeight", "bold"), None, Some("titleStyle"));

        let record = store.get(id);
        assert_eq!(record.assigned_id.as_deref(), Some("headerStyle"));
        assert!(record.seeded);
        assert!(record.element_names.is_empty());
    }

    #[test]
    fn explicit_id_fills_an_unnamed_record() {
        let mut store = StyleStore::default();
        let id = store.register(content("color", "red"), Some("Text"), None);
        store.register(content("color", "red"), None, Some("danger"));
        assert_eq!(store.get(id).assigned_id.as_deref(), Some("danger"));
    }

    #[test]
    fn colliding_fingerprints_keep_content_apart() {
        let mut store = StyleStore::default();
        let fingerprint = Fingerprint::of(&content("color", "red"));
        let red = store.register_with_fingerprint(
            fingerprint,
            content("color", "red"),
            Some("View"),
            None,
        );
        let blue = store.register_with_fingerprint(
            fingerprint,
            content("color", "blue"),
            Some("Text"),
            None,
        );
        let red_again = store.register_with_fingerprint(
            fingerprint,
            content("color", "red"),
            Some("View"),
            None,
        );

        assert_ne!(red, blue);
        assert_eq!(red, red_again);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(red).usage_count, 2);
        assert_eq!(store.get(blue).usage_count, 1);
        assert_eq!(store.get(blue).content["color"], StyleValue::String("blue".into()));
    }

    #[test]
    fn find_matches_content_in_any_order() {
        let mut store = StyleStore::default();
        let mut object = content("color", "red");
        object.insert("flex".to_string(), StyleValue::Number(1.0));
        store.register(object, None, Some("box"));

        let mut permuted = StyleObject::new();
        permuted.insert("flex".to_string(), StyleValue::Number(1.0));
        permuted.insert("color".to_string(), StyleValue::String("red".into()));
        assert_eq!(store.find(&permuted).and_then(|r| r.assigned_id.as_deref()), Some("box"));
        assert!(store.find(&content("color", "blue")).is_none());
    }

    #[test]
    fn name_counter_suffixes_repeated_claims() {
        let mut names = NameCounter::default();
        assert_eq!(names.claim("margin"), "margin");
        assert_eq!(names.claim("margin"), "margin1");
        assert_eq!(names.claim("padding"), "padding");
        assert_eq!(names.claim("margin"), "margin2");
    }

    #[test]
    fn table_keeps_assignment_order() {
        let mut table = StylesheetTable::default();
        table.insert("zIndex".to_string(), content("zIndex", "1"));
        table.insert("absolute".to_string(), content("position", "absolute"));
        let ids: Vec<_> = table.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["zIndex", "absolute"]);

        table.retain(|id| id != "zIndex");
        assert!(!table.contains("zIndex"));
        assert_eq!(table.len(), 1);
    }
}
