//! Text search over inventory records.

use serde::{Deserialize, Serialize};

use crate::record::{InventoryRecord, RecordKind};

/// Queries shorter than this get no suggestions.
pub const SUGGESTION_MIN_CHARS: usize = 2;

/// Suggestions returned per kind.
pub const SUGGESTIONS_PER_KIND: usize = 5;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchBy {
    #[default]
    Name,
    Id,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub name: String,
    pub kind: RecordKind,
}

/// Case-insensitive match on name, manufacturer or id.
pub fn matches(rec: &InventoryRecord, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    rec.name().to_lowercase().contains(&q)
        || rec.manufacturer().to_lowercase().contains(&q)
        || rec.id.to_string().contains(&q)
}

/// Listing filter: by id (exact) or by name/manufacturer (substring).
pub fn filter_matches(rec: &InventoryRecord, query: &str, by: SearchBy) -> bool {
    let q = query.trim();
    if q.is_empty() {
        return true;
    }
    match by {
        SearchBy::Id => rec.id.to_string() == q,
        SearchBy::Name => {
            let q = q.to_lowercase();
            rec.name().to_lowercase().contains(&q) || rec.manufacturer().to_lowercase().contains(&q)
        }
    }
}

pub fn search<'a>(
    records: impl IntoIterator<Item = &'a InventoryRecord>,
    query: &str,
) -> Vec<&'a InventoryRecord> {
    records.into_iter().filter(|r| matches(r, query)).collect()
}

pub fn suggestions<'a>(
    records: impl IntoIterator<Item = &'a InventoryRecord>,
    query: &str,
) -> Vec<Suggestion> {
    let q = query.trim().to_lowercase();
    if q.chars().count() < SUGGESTION_MIN_CHARS {
        return Vec::new();
    }

    let hits: Vec<&InventoryRecord> = records
        .into_iter()
        .filter(|r| {
            r.name().to_lowercase().contains(&q) || r.manufacturer().to_lowercase().contains(&q)
        })
        .collect();

    RecordKind::ALL
        .into_iter()
        .flat_map(|kind| {
            hits.iter()
                .filter(move |r| r.kind() == kind)
                .take(SUGGESTIONS_PER_KIND)
                .map(move |r| Suggestion {
                    name: r.name().to_string(),
                    kind,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::tests::{equipment, medicine, ymd};

    #[test]
    fn matches_name_manufacturer_and_id() {
        let rec = medicine(42, 10, ymd(2027, 1, 1));
        assert!(matches(&rec, "para"));
        assert!(matches(&rec, "gsk"));
        assert!(matches(&rec, "42"));
        assert!(!matches(&rec, "ibuprofen"));
    }

    #[test]
    fn id_filter_is_exact() {
        let rec = medicine(42, 10, ymd(2027, 1, 1));
        assert!(filter_matches(&rec, "42", SearchBy::Id));
        assert!(!filter_matches(&rec, "4", SearchBy::Id));
        assert!(filter_matches(&rec, "PARA", SearchBy::Name));
    }

    #[test]
    fn suggestions_need_two_chars_and_cap_per_kind() {
        let mut records: Vec<_> = (1..=7).map(|i| medicine(i, 10, ymd(2027, 1, 1))).collect();
        records.push(equipment(1, ymd(2026, 1, 1), ymd(2026, 12, 1)));

        assert!(suggestions(&records, "p").is_empty());
        let s = suggestions(&records, "pa");
        assert_eq!(s.len(), SUGGESTIONS_PER_KIND);
        assert!(s.iter().all(|x| x.kind == RecordKind::Medicine));

        let s = suggestions(&records, "siem");
        assert_eq!(
            s,
            vec![Suggestion {
                name: "X-Ray Machine".into(),
                kind: RecordKind::Equipment
            }]
        );
    }
}
