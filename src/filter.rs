//! Record filtering over in-memory collection snapshots.
//!
//! The backend returns whole collections; the listing pages narrow them down
//! here. Filtering is pure and allocation-light so it can run on every
//! request: a free-text predicate matched case-insensitively against a set of
//! dotted field paths, AND-combined with an exact-match facet predicate.
//! Records are inspected through their `serde_json` form, which keeps the
//! engine independent of any one record shape.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;

/// Facet value meaning "no facet filter".
pub const FACET_ALL: &str = "all";

/// Resolves a dotted path (`"author.full_name"`) inside a record value.
///
/// Any missing or non-object segment resolves to `None`; malformed records
/// must degrade to "does not match", never to a panic.
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// String form of a record field, with `""` as the sentinel for anything
/// that cannot be matched: missing paths, nulls, objects and arrays.
pub fn field_text<'a>(value: &'a Value, path: &str) -> Cow<'a, str> {
    match get_path(value, path) {
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(Value::Number(n)) => Cow::Owned(n.to_string()),
        Some(Value::Bool(b)) => Cow::Owned(b.to_string()),
        _ => Cow::Borrowed(""),
    }
}

/// One selectable facet chip.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Facet {
    pub value: String,
    pub label: String,
}

impl Facet {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// The sentinel chip that clears the facet filter.
    pub fn all() -> Self {
        Self::new(FACET_ALL, "All")
    }
}

/// Filter description for one listing request.
///
/// Starts from the searchable fields, then chains the optional narrowing
/// clauses.
#[derive(Debug, Clone)]
pub struct RecordFilter {
    search_lower: String,
    fields: Vec<String>,
    facet: Option<(String, String)>,
}

impl RecordFilter {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            search_lower: String::new(),
            fields: fields.into_iter().map(Into::into).collect(),
            facet: None,
        }
    }

    /// Sets the free-text term; an empty term matches every record.
    pub fn search(mut self, text: impl AsRef<str>) -> Self {
        self.search_lower = text.as_ref().to_lowercase();
        self
    }

    /// Sets the facet clause; the [`FACET_ALL`] sentinel disables it.
    pub fn facet(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.facet = Some((field.into(), value.into()));
        self
    }

    /// Combined predicate: text match on any searchable field AND the facet.
    pub fn matches(&self, record: &Value) -> bool {
        self.matches_text(record) && self.matches_facet(record)
    }

    fn matches_text(&self, record: &Value) -> bool {
        if self.search_lower.is_empty() {
            return true;
        }
        self.fields
            .iter()
            .any(|field| field_text(record, field).to_lowercase().contains(&self.search_lower))
    }

    fn matches_facet(&self, record: &Value) -> bool {
        match &self.facet {
            None => true,
            Some((_, value)) if value == FACET_ALL => true,
            // Exact and case-sensitive, unlike the text predicate.
            Some((field, value)) => field_text(record, field).as_ref() == value,
        }
    }
}

/// Stable filter over a typed snapshot: input order is preserved and records
/// that fail serialization are treated as non-matching.
pub fn filter_records<'a, T: Serialize>(records: &'a [T], filter: &RecordFilter) -> Vec<&'a T> {
    records
        .iter()
        .filter(|record| {
            serde_json::to_value(record)
                .map(|value| filter.matches(&value))
                .unwrap_or(false)
        })
        .collect()
}

/// Distinct values of `field` across the snapshot, in first-seen order.
///
/// Facet chips are derived from the data itself, so a category list never
/// drifts out of sync with the records it narrows.
pub fn available_facets<T: Serialize>(records: &[T], field: &str) -> Vec<Facet> {
    let mut seen: Vec<Facet> = Vec::new();
    for record in records {
        let Ok(value) = serde_json::to_value(record) else {
            continue;
        };
        let text = field_text(&value, field);
        if text.is_empty() || seen.iter().any(|f| f.value == text.as_ref()) {
            continue;
        }
        seen.push(Facet::new(text.as_ref(), text.as_ref()));
    }
    seen
}

/// Latest `limit` records by `date_field`, newest first.
///
/// A deliberate, explicit operation separate from filtering: the sidebars ask
/// for it, the grids never re-sort. Chrono's serde form is ISO-8601, which
/// orders lexicographically; records without a usable date sort last.
pub fn latest_records<'a, T: Serialize>(
    records: &'a [T],
    date_field: &str,
    limit: usize,
) -> Vec<&'a T> {
    let mut keyed: Vec<(String, &T)> = records
        .iter()
        .map(|record| {
            let key = serde_json::to_value(record)
                .map(|value| field_text(&value, date_field).into_owned())
                .unwrap_or_default();
            (key, record)
        })
        .collect();

    keyed.sort_by(|a, b| match (a.0.is_empty(), b.0.is_empty()) {
        (true, true) => std::cmp::Ordering::Equal,
        (true, false) => std::cmp::Ordering::Greater,
        (false, true) => std::cmp::Ordering::Less,
        (false, false) => b.0.cmp(&a.0),
    });

    keyed.into_iter().take(limit).map(|(_, record)| record).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> Vec<Value> {
        vec![
            json!({"title": "AI Research", "category": "tech",
                   "author": {"full_name": "Dr. Amal"}, "published_at": "2026-03-01T10:00:00"}),
            json!({"title": "Bio Notes", "category": "science",
                   "author": {"full_name": "Prof. Said"}, "published_at": "2026-05-11T10:00:00"}),
            json!({"title": "Field Survey", "category": "science",
                   "author": null, "published_at": "2025-12-01T10:00:00"}),
        ]
    }

    #[test]
    fn get_path_resolves_nested_and_missing() {
        let record = json!({"author": {"full_name": "Amal"}});
        assert_eq!(
            get_path(&record, "author.full_name"),
            Some(&json!("Amal"))
        );
        assert_eq!(get_path(&record, "author.email"), None);
        assert_eq!(get_path(&record, "author.full_name.x"), None);
    }

    #[test]
    fn field_text_degrades_to_empty() {
        let record = json!({"n": 42, "b": true, "none": null, "list": [1], "obj": {}});
        assert_eq!(field_text(&record, "n"), "42");
        assert_eq!(field_text(&record, "b"), "true");
        assert_eq!(field_text(&record, "none"), "");
        assert_eq!(field_text(&record, "list"), "");
        assert_eq!(field_text(&record, "obj"), "");
        assert_eq!(field_text(&record, "missing.path"), "");
    }

    #[test]
    fn empty_search_matches_everything() {
        let records = sample();
        let filter = RecordFilter::new(["title"]);
        assert_eq!(filter_records(&records, &filter).len(), records.len());
    }

    #[test]
    fn search_is_case_insensitive_substring_over_any_field() {
        let records = sample();
        let filter = RecordFilter::new(["title", "author.full_name"]).search("ai");
        let hits = filter_records(&records, &filter);
        // "AI Research" via title, "Prof. Said" via author.
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0]["title"], "AI Research");
        assert_eq!(hits[1]["title"], "Bio Notes");
    }

    #[test]
    fn facet_is_exact_and_case_sensitive() {
        let records = sample();
        let filter = RecordFilter::new(["title"]).facet("category", "science");
        assert_eq!(filter_records(&records, &filter).len(), 2);

        let filter = RecordFilter::new(["title"]).facet("category", "Science");
        assert!(filter_records(&records, &filter).is_empty());

        let filter = RecordFilter::new(["title"]).facet("category", FACET_ALL);
        assert_eq!(filter_records(&records, &filter).len(), 3);
    }

    #[test]
    fn text_and_facet_combine_with_and() {
        let records = sample();
        let filter = RecordFilter::new(["title"])
            .search("notes")
            .facet("category", "science");
        let hits = filter_records(&records, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["title"], "Bio Notes");

        let filter = RecordFilter::new(["title"])
            .search("notes")
            .facet("category", "tech");
        assert!(filter_records(&records, &filter).is_empty());
    }

    #[test]
    fn filter_preserves_input_order() {
        let records = sample();
        let filter = RecordFilter::new(["category"]).search("sc");
        let hits = filter_records(&records, &filter);
        assert_eq!(hits[0]["title"], "Bio Notes");
        assert_eq!(hits[1]["title"], "Field Survey");
    }

    #[test]
    fn malformed_records_never_match_nor_panic() {
        let records = sample();
        let filter = RecordFilter::new(["author.full_name"]).search("said");
        let hits = filter_records(&records, &filter);
        // The record with `author: null` simply does not match.
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["title"], "Bio Notes");
    }

    #[test]
    fn available_facets_deduplicate_in_first_seen_order() {
        let records = sample();
        let facets = available_facets(&records, "category");
        assert_eq!(
            facets,
            vec![Facet::new("tech", "tech"), Facet::new("science", "science")]
        );
    }

    #[test]
    fn latest_records_sorts_newest_first_with_blanks_last() {
        let records = vec![
            json!({"title": "a", "published_at": "2026-01-01T00:00:00"}),
            json!({"title": "no-date"}),
            json!({"title": "b", "published_at": "2026-06-01T00:00:00"}),
        ];
        let latest = latest_records(&records, "published_at", 2);
        assert_eq!(latest[0]["title"], "b");
        assert_eq!(latest[1]["title"], "a");

        let all = latest_records(&records, "published_at", 10);
        assert_eq!(all[2]["title"], "no-date");
    }
}
