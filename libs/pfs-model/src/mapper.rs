use std::borrow::Borrow;

use serde_json::{Map, Value};

use crate::{EntityKind, FieldMap, ModelError};

/// Rename the keys of one raw record. Keys are lower-cased first (colliding
/// keys keep the last value seen), then renamed through `fields`; values are
/// untouched.
pub fn map_record(record: &Map<String, Value>, fields: &FieldMap) -> Map<String, Value> {
    let mut mapped = Map::with_capacity(record.len());
    for (key, value) in record {
        mapped.insert(fields.translate(key), value.clone());
    }
    mapped
}

pub fn map_records_for<I, R>(records: I, kind: EntityKind) -> Vec<Map<String, Value>>
where
    I: IntoIterator<Item = R>,
    R: Borrow<Map<String, Value>>,
{
    let fields = FieldMap::for_kind(kind);
    let mapped: Vec<_> = records
        .into_iter()
        .map(|r| map_record(r.borrow(), &fields))
        .collect();
    tracing::debug!(kind = %kind, count = mapped.len(), "mapped entity attributes");
    mapped
}

/// Map records using the dictionary named by an entity-kind token such as
/// `"SAMPLE"` or `"sample_lot"`.
pub fn map_records<I, R>(records: I, kind: &str) -> Result<Vec<Map<String, Value>>, ModelError>
where
    I: IntoIterator<Item = R>,
    R: Borrow<Map<String, Value>>,
{
    let kind: EntityKind = kind.parse()?;
    Ok(map_records_for(records, kind))
}
