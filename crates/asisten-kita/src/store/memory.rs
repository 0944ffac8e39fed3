use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde_json::{json, Value};

use super::{Document, DocumentStore, ListResult, Predicate, StoreError};

/// Page size applied when a list query carries no `Limit` predicate.
const FALLBACK_LIMIT: usize = 25;

/// In-process implementation of [`DocumentStore`] used by the service binary
/// and by tests. Applies the full predicate set: filtering, ordering with an
/// id tiebreak, and limit/offset windowing after the total is counted.
#[derive(Default, Clone)]
pub struct MemoryStore {
    collections: Arc<Mutex<HashMap<String, BTreeMap<String, Document>>>>,
    sequence: Arc<AtomicU64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> String {
        let id = self.sequence.fetch_add(1, AtomicOrdering::Relaxed) + 1;
        format!("doc-{id:06}")
    }
}

impl DocumentStore for MemoryStore {
    fn list(&self, collection: &str, queries: &[Predicate]) -> Result<ListResult, StoreError> {
        let candidates: Vec<Document> = {
            let guard = self.collections.lock().expect("store mutex poisoned");
            guard
                .get(collection)
                .map(|bucket| bucket.values().cloned().collect())
                .unwrap_or_default()
        };

        let mut matched: Vec<Document> = candidates
            .into_iter()
            .filter(|document| matches_filters(document, queries))
            .collect();
        sort_documents(&mut matched, queries);

        let total = matched.len();
        let offset = queries
            .iter()
            .find_map(|query| match query {
                Predicate::Offset(count) => Some(*count),
                _ => None,
            })
            .unwrap_or(0);
        let limit = queries
            .iter()
            .find_map(|query| match query {
                Predicate::Limit(count) => Some(*count),
                _ => None,
            })
            .unwrap_or(FALLBACK_LIMIT);

        let documents = matched.into_iter().skip(offset).take(limit).collect();
        Ok(ListResult { documents, total })
    }

    fn get(&self, collection: &str, id: &str) -> Result<Document, StoreError> {
        let guard = self.collections.lock().expect("store mutex poisoned");
        guard
            .get(collection)
            .and_then(|bucket| bucket.get(id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })
    }

    fn create(
        &self,
        collection: &str,
        id: Option<&str>,
        mut data: Document,
    ) -> Result<Document, StoreError> {
        let id = match id {
            Some(given) => given.to_string(),
            None => self.next_id(),
        };

        let mut guard = self.collections.lock().expect("store mutex poisoned");
        let bucket = guard.entry(collection.to_string()).or_default();
        if bucket.contains_key(&id) {
            return Err(StoreError::Conflict);
        }

        let now = json!(Utc::now());
        data.insert("id".to_string(), Value::String(id.clone()));
        data.insert("created_at".to_string(), now.clone());
        data.insert("updated_at".to_string(), now);
        bucket.insert(id, data.clone());
        Ok(data)
    }

    fn update(&self, collection: &str, id: &str, data: Document) -> Result<Document, StoreError> {
        let mut guard = self.collections.lock().expect("store mutex poisoned");
        let document = guard
            .get_mut(collection)
            .and_then(|bucket| bucket.get_mut(id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        for (attribute, value) in data {
            document.insert(attribute, value);
        }
        document.insert("updated_at".to_string(), json!(Utc::now()));
        Ok(document.clone())
    }

    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut guard = self.collections.lock().expect("store mutex poisoned");
        let removed = guard
            .get_mut(collection)
            .and_then(|bucket| bucket.remove(id));
        match removed {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            }),
        }
    }
}

fn matches_filters(document: &Document, queries: &[Predicate]) -> bool {
    queries.iter().all(|query| match query {
        Predicate::Equal { attribute, value } => document
            .get(attribute)
            .is_some_and(|field| field == value),
        Predicate::ContainsAny { attribute, values } => {
            document.get(attribute).is_some_and(|field| match field {
                Value::Array(items) => items.iter().any(|item| values.contains(item)),
                scalar => values.contains(scalar),
            })
        }
        Predicate::GreaterThan { attribute, value } => {
            compare_field(document, attribute, value, |ordering| {
                ordering == Ordering::Greater
            })
        }
        Predicate::GreaterThanEqual { attribute, value } => {
            compare_field(document, attribute, value, |ordering| {
                ordering != Ordering::Less
            })
        }
        Predicate::LessThan { attribute, value } => {
            compare_field(document, attribute, value, |ordering| {
                ordering == Ordering::Less
            })
        }
        Predicate::LessThanEqual { attribute, value } => {
            compare_field(document, attribute, value, |ordering| {
                ordering != Ordering::Greater
            })
        }
        Predicate::Search { attribute, term } => document
            .get(attribute)
            .and_then(Value::as_str)
            .is_some_and(|text| text.to_lowercase().contains(&term.to_lowercase())),
        Predicate::Limit(_)
        | Predicate::Offset(_)
        | Predicate::OrderAsc(_)
        | Predicate::OrderDesc(_) => true,
    })
}

fn compare_field(
    document: &Document,
    attribute: &str,
    bound: &Value,
    accept: impl Fn(Ordering) -> bool,
) -> bool {
    document
        .get(attribute)
        .and_then(|field| compare_values(field, bound))
        .is_some_and(accept)
}

fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn sort_documents(documents: &mut [Document], queries: &[Predicate]) {
    let orders: Vec<(&str, bool)> = queries
        .iter()
        .filter_map(|query| match query {
            Predicate::OrderAsc(attribute) => Some((attribute.as_str(), false)),
            Predicate::OrderDesc(attribute) => Some((attribute.as_str(), true)),
            _ => None,
        })
        .collect();
    if orders.is_empty() {
        return;
    }

    documents.sort_by(|a, b| {
        for (attribute, descending) in &orders {
            let ordering = match (a.get(*attribute), b.get(*attribute)) {
                (Some(left), Some(right)) => {
                    compare_values(left, right).unwrap_or(Ordering::Equal)
                }
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            };
            let ordering = if *descending { ordering.reverse() } else { ordering };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        // ties resolve on id so repeated queries page identically
        let left = a.get("id").and_then(Value::as_str).unwrap_or_default();
        let right = b.get("id").and_then(Value::as_str).unwrap_or_default();
        left.cmp(right)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fields;

    fn store_with_people() -> MemoryStore {
        let store = MemoryStore::new();
        let people = [
            ("p1", "Siti", "Malang", 4.8, vec!["memasak", "menyetrika"]),
            ("p2", "Dewi", "Malang", 4.2, vec!["mengasuh anak"]),
            ("p3", "Budi", "Surabaya", 3.9, vec!["memasak"]),
            ("p4", "Rina", "Jakarta", 4.8, vec!["merawat lansia"]),
        ];
        for (id, name, city, rating, skills) in people {
            store
                .create(
                    "people",
                    Some(id),
                    fields(json!({
                        "name": name,
                        "city": city,
                        "rating_avg": rating,
                        "skills": skills,
                    })),
                )
                .expect("seed document");
        }
        store
    }

    #[test]
    fn create_assigns_sequential_ids_and_timestamps() {
        let store = MemoryStore::new();
        let first = store
            .create("people", None, fields(json!({ "name": "Siti" })))
            .expect("create");
        let second = store
            .create("people", None, fields(json!({ "name": "Dewi" })))
            .expect("create");

        assert_eq!(first.get("id"), Some(&json!("doc-000001")));
        assert_eq!(second.get("id"), Some(&json!("doc-000002")));
        assert!(first.contains_key("created_at"));
        assert!(first.contains_key("updated_at"));
    }

    #[test]
    fn create_rejects_duplicate_explicit_id() {
        let store = MemoryStore::new();
        store
            .create("people", Some("p1"), fields(json!({ "name": "Siti" })))
            .expect("first create");
        let result = store.create("people", Some("p1"), fields(json!({ "name": "Siti" })));
        assert!(matches!(result, Err(StoreError::Conflict)));
    }

    #[test]
    fn update_merges_fields_and_keeps_the_rest() {
        let store = store_with_people();
        let updated = store
            .update("people", "p1", fields(json!({ "rating_avg": 4.9 })))
            .expect("update");
        assert_eq!(updated.get("rating_avg"), Some(&json!(4.9)));
        assert_eq!(updated.get("name"), Some(&json!("Siti")));
    }

    #[test]
    fn list_counts_total_before_windowing() {
        let store = store_with_people();
        let result = store
            .list(
                "people",
                &[
                    Predicate::limit(1),
                    Predicate::offset(1),
                    Predicate::contains_any("city", vec![json!("Malang")]),
                ],
            )
            .expect("list");
        assert_eq!(result.total, 2);
        assert_eq!(result.documents.len(), 1);
    }

    #[test]
    fn contains_any_matches_scalar_and_array_fields() {
        let store = store_with_people();
        let by_city = store
            .list(
                "people",
                &[Predicate::contains_any(
                    "city",
                    vec![json!("Malang"), json!("Jakarta")],
                )],
            )
            .expect("list");
        assert_eq!(by_city.total, 3);

        let by_skill = store
            .list(
                "people",
                &[Predicate::contains_any("skills", vec![json!("memasak")])],
            )
            .expect("list");
        assert_eq!(by_skill.total, 2);
    }

    #[test]
    fn range_predicates_are_inclusive() {
        let store = store_with_people();
        let result = store
            .list(
                "people",
                &[Predicate::greater_than_equal("rating_avg", 4.8)],
            )
            .expect("list");
        assert_eq!(result.total, 2);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let store = store_with_people();
        let result = store
            .list("people", &[Predicate::search("name", "sit")])
            .expect("list");
        assert_eq!(result.total, 1);
        assert_eq!(result.documents[0].get("name"), Some(&json!("Siti")));
    }

    #[test]
    fn order_desc_breaks_ties_on_id() {
        let store = store_with_people();
        let result = store
            .list("people", &[Predicate::order_desc("rating_avg")])
            .expect("list");
        let ids: Vec<&str> = result
            .documents
            .iter()
            .map(|document| document.get("id").and_then(Value::as_str).unwrap())
            .collect();
        // p1 and p4 share 4.8; the id tiebreak keeps p1 first
        assert_eq!(ids, vec!["p1", "p4", "p2", "p3"]);
    }

    #[test]
    fn get_and_delete_report_missing_documents() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.get("people", "nope"),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete("people", "nope"),
            Err(StoreError::NotFound { .. })
        ));
    }
}
