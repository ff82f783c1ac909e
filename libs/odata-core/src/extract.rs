//! Record extraction from `$expand`-nested response bodies.
//!
//! Traversal is depth-first and pre-order. Object entries are visited in the
//! order the payload listed them, array elements in index order, and scalars
//! end the descent.

use serde_json::{Map, Value};

/// Callbacks fired by [`walk`].
pub trait JsonVisitor<'a> {
    /// Called on entering an object, before any of its entries.
    fn enter_object(&mut self, _object: &'a Map<String, Value>) {}

    /// Called for each object entry, before descending into its value.
    fn visit_entry(&mut self, _key: &'a str, _value: &'a Value) {}
}

pub fn walk<'a, V: JsonVisitor<'a>>(value: &'a Value, visitor: &mut V) {
    match value {
        Value::Object(map) => {
            visitor.enter_object(map);
            for (key, child) in map {
                visitor.visit_entry(key, child);
                walk(child, visitor);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, visitor);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

struct KeyCollector<'a, 'k> {
    key: &'k str,
    found: Vec<&'a Value>,
}

impl<'a> JsonVisitor<'a> for KeyCollector<'a, '_> {
    fn visit_entry(&mut self, key: &'a str, value: &'a Value) {
        if key != self.key {
            return;
        }
        match value {
            Value::Array(items) => self.found.extend(items.iter()),
            other => self.found.push(other),
        }
    }
}

/// Every value stored under `key`, at any depth. Array values are flattened
/// one level; matched values are searched again for nested matches.
pub fn find_by_key<'a>(payload: &'a Value, key: &str) -> Vec<&'a Value> {
    let mut collector = KeyCollector {
        key,
        found: Vec::new(),
    };
    walk(payload, &mut collector);
    collector.found
}

struct PairCollector<'a, 'f> {
    field: &'f str,
    expected: &'f Value,
    found: Vec<&'a Map<String, Value>>,
}

impl<'a> JsonVisitor<'a> for PairCollector<'a, '_> {
    fn enter_object(&mut self, object: &'a Map<String, Value>) {
        if object.get(self.field) == Some(self.expected) {
            self.found.push(object);
        }
    }
}

/// Every object holding `field == expected`, at any depth, e.g. all records
/// whose `EntityTypeName` is `MOUSE_SAMPLE`.
pub fn find_by_pair<'a>(
    payload: &'a Value,
    field: &str,
    expected: &Value,
) -> Vec<&'a Map<String, Value>> {
    let mut collector = PairCollector {
        field,
        expected,
        found: Vec::new(),
    };
    walk(payload, &mut collector);
    collector.found
}
