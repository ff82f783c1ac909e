//! Domain model for Platform for Science mouse records.
//!
//! Raw entity objects are renamed into the consumer vocabulary by
//! [`map_records`] and then turned into typed records through [`Record`].

mod entity;
mod error;
pub mod field_map;
mod mapper;
mod records;
mod zygosity;

pub use entity::EntityKind;
pub use error::ModelError;
pub use field_map::FieldMap;
pub use mapper::{map_record, map_records, map_records_for};
pub use records::{build_records, EntityHeader, Record, Sample, SampleLot, Strain};
pub use zygosity::Zygosity;
