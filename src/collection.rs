//! Host collection contract
//!
//! A paging controller reads from a host collection but never owns or
//! mutates it. The host exposes its live length, a truncating slice over a
//! half-open index range, and a plain JSON form for each record.

use crate::types::JsonValue;
use serde::Serialize;
use std::collections::VecDeque;

/// A record that can be rendered as plain JSON data
pub trait Record {
    /// Serialize this record for a visible slice
    fn to_json(&self) -> JsonValue;
}

impl Record for JsonValue {
    fn to_json(&self) -> JsonValue {
        self.clone()
    }
}

/// Adapter that renders any `Serialize` type as a [`Record`]
///
/// Values serde cannot represent as JSON (e.g. maps with non-string keys)
/// render as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SerdeRecord<T>(pub T);

impl<T: Serialize> Record for SerdeRecord<T> {
    fn to_json(&self) -> JsonValue {
        serde_json::to_value(&self.0).unwrap_or(JsonValue::Null)
    }
}

impl<T> From<T> for SerdeRecord<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

/// An ordered, sliceable container of records
pub trait Collection {
    /// Record type held by the collection
    type Record: Record;

    /// Number of records currently held
    fn len(&self) -> usize;

    /// Whether the collection holds no records
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records in `[start, end)`, in order
    ///
    /// Implementations truncate `end` to `len()` and return an empty
    /// sequence when `start >= len()`.
    fn slice(&self, start: usize, end: usize) -> Vec<&Self::Record>;
}

/// Clamp a half-open range to a collection length
fn bounded(start: usize, end: usize, len: usize) -> (usize, usize) {
    let end = end.min(len);
    (start.min(end), end)
}

impl<R: Record> Collection for [R] {
    type Record = R;

    fn len(&self) -> usize {
        <[R]>::len(self)
    }

    fn slice(&self, start: usize, end: usize) -> Vec<&R> {
        let (start, end) = bounded(start, end, <[R]>::len(self));
        self[start..end].iter().collect()
    }
}

impl<R: Record> Collection for Vec<R> {
    type Record = R;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn slice(&self, start: usize, end: usize) -> Vec<&R> {
        self.as_slice().slice(start, end)
    }
}

impl<R: Record> Collection for VecDeque<R> {
    type Record = R;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn slice(&self, start: usize, end: usize) -> Vec<&R> {
        let (start, end) = bounded(start, end, VecDeque::len(self));
        self.range(start..end).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn numbers(n: i64) -> Vec<JsonValue> {
        (0..n).map(|i| json!(i)).collect()
    }

    #[test]
    fn test_vec_slice_in_range() {
        let records = numbers(10);
        let slice: Vec<JsonValue> = records.slice(2, 5).into_iter().map(Record::to_json).collect();
        assert_eq!(slice, vec![json!(2), json!(3), json!(4)]);
    }

    #[test]
    fn test_vec_slice_truncates_end() {
        let records = numbers(5);
        assert_eq!(records.slice(3, 100).len(), 2);
    }

    #[test]
    fn test_vec_slice_start_past_end() {
        let records = numbers(5);
        assert!(records.slice(5, 10).is_empty());
        assert!(records.slice(50, 60).is_empty());
        assert!(records.slice(4, 2).is_empty());
    }

    #[test]
    fn test_vecdeque_slice() {
        let mut records: VecDeque<JsonValue> = numbers(4).into();
        records.push_front(json!(-1));
        let slice: Vec<JsonValue> = records.slice(0, 2).into_iter().map(Record::to_json).collect();
        assert_eq!(slice, vec![json!(-1), json!(0)]);
        assert_eq!(Collection::len(&records), 5);
    }

    #[test]
    fn test_empty_collection() {
        let records: Vec<JsonValue> = Vec::new();
        assert!(Collection::is_empty(&records));
        assert!(records.slice(0, 10).is_empty());
    }

    #[test]
    fn test_serde_record() {
        #[derive(Serialize)]
        struct User {
            id: u32,
            name: &'static str,
        }

        let record = SerdeRecord(User { id: 7, name: "Ada" });
        assert_eq!(record.to_json(), json!({"id": 7, "name": "Ada"}));
    }

    #[test]
    fn test_serde_record_unrepresentable_is_null() {
        let mut map = BTreeMap::new();
        map.insert((1, 2), "tuple key");
        assert_eq!(SerdeRecord(map).to_json(), JsonValue::Null);
    }
}
