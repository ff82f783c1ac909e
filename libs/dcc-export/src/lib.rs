//! Specimen manifest export.
//!
//! Mouse [`Sample`](pfs_model::Sample) records are flattened into
//! [`SpecimenRecord`]s and written as a `centreSpecimenSet` XML document
//! accepted by the phenotyping data coordination centre.

mod config;
mod error;
mod specimen;
mod writer;

pub use config::ExportConfig;
pub use error::ExportError;
pub use specimen::{gender_of, parse_colony, Colony, SpecimenRecord};
pub use writer::{write_specimen_file, write_specimen_set, SPECIMEN_NS};
