//! Typed records built from mapped attribute dictionaries.

use std::borrow::Borrow;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{EntityKind, ModelError, Zygosity};

/// A record type that can be built from a mapped dictionary.
pub trait Record: Sized {
    const KIND: EntityKind;

    /// Fails with `MissingField` when a required attribute is absent or null.
    fn from_mapped(map: &Map<String, Value>) -> Result<Self, ModelError>;
}

/// Build one record per mapped dictionary, stopping at the first failure.
pub fn build_records<R, I, M>(maps: I) -> Result<Vec<R>, ModelError>
where
    R: Record,
    I: IntoIterator<Item = M>,
    M: Borrow<Map<String, Value>>,
{
    maps.into_iter()
        .map(|m| R::from_mapped(m.borrow()))
        .collect()
}

/// Typed access to a mapped dictionary, reporting failures by field name.
struct FieldReader<'a> {
    kind: EntityKind,
    map: &'a Map<String, Value>,
}

impl<'a> FieldReader<'a> {
    fn new(kind: EntityKind, map: &'a Map<String, Value>) -> Self {
        Self { kind, map }
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        match self.map.get(field) {
            None | Some(Value::Null) => None,
            Some(v) => Some(v),
        }
    }

    fn decode<T: DeserializeOwned>(&self, field: &str, value: &Value) -> Result<T, ModelError> {
        serde_json::from_value(value.clone())
            .map_err(|e| ModelError::invalid_field(self.kind.as_str(), field, e.to_string()))
    }

    fn required<T: DeserializeOwned>(&self, field: &str) -> Result<T, ModelError> {
        let value = self
            .present(field)
            .ok_or_else(|| ModelError::missing_field(self.kind.as_str(), field))?;
        self.decode(field, value)
    }

    fn optional<T: DeserializeOwned>(&self, field: &str) -> Result<Option<T>, ModelError> {
        self.present(field)
            .map(|value| self.decode(field, value))
            .transpose()
    }
}

/// Attributes shared by every platform entity. Only the type name is
/// required; a bare entity carrying just `EntityTypeName` still builds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityHeader {
    pub entity_type: String,
    pub id: Option<i64>,
    pub name: Option<String>,
    pub barcode: Option<String>,
    pub data_created: Option<String>,
    pub date_modified: Option<String>,
    pub active: Option<bool>,
    pub likeby: Option<i64>,
}

impl EntityHeader {
    fn read(r: &FieldReader<'_>) -> Result<Self, ModelError> {
        Ok(Self {
            entity_type: r.required("entity_type")?,
            id: r.optional("id")?,
            name: r.optional("name")?,
            barcode: r.optional("barcode")?,
            data_created: r.optional("data_created")?,
            date_modified: r.optional("date_modified")?,
            active: r.optional("active")?,
            likeby: r.optional("likeby")?,
        })
    }
}

/// A mouse sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    #[serde(flatten)]
    pub entity: EntityHeader,
    pub treatment_group: Option<String>,
    pub diet: Option<String>,
    pub bedding: Option<String>,
    pub received_alive: Option<bool>,
    pub filler_mouse: Option<bool>,
    pub accomodation: Option<String>,
    pub current_clinical_observation: Option<String>,
    pub anticipated_clinical_observation: Option<String>,
    pub additional_notes: Option<String>,
    pub immune_status: Option<String>,
    pub customer_mouse_id: Option<String>,
    pub litter_number: Option<String>,
    pub primary_id: Option<String>,
    pub primary_id_value: Option<String>,
    pub secondary_id: Option<String>,
    pub secondary_id_value: Option<String>,
    pub cohort_name: Option<String>,
    pub blind_id: Option<String>,
    pub mep_id: Option<String>,
    pub nbp_group_id: Option<String>,
    pub role: Option<String>,
    pub source_pen_id: Option<String>,
    pub sex: Option<String>,
    pub mouse_room_of_origin: Option<String>,
    pub section_of_origin: Option<String>,
    pub date_of_birth: Option<String>,
    pub comments: Option<String>,
    pub date_of_death: Option<String>,
    pub reason_for_death: Option<String>,
    pub user_defined_strain_name: Option<String>,
    pub genotype: Option<String>,
    pub allele: Option<String>,
    pub coat_color: Option<String>,
    pub pedigree: Option<String>,
    pub whole_mouse_fail: Option<bool>,
    pub fail_reason: Option<String>,
    pub explanation: Option<String>,
    pub lot_report: Option<String>,
    pub use_for_mouse_name: Option<String>,
    pub mouse_manifest_version: Option<String>,
    pub active_status_tracker: Option<String>,
}

impl Sample {
    /// `Unknown` without a warning when no genotype was recorded.
    pub fn zygosity(&self) -> Zygosity {
        self.genotype
            .as_deref()
            .map_or(Zygosity::Unknown, Zygosity::from_genotype)
    }
}

impl Record for Sample {
    const KIND: EntityKind = EntityKind::Sample;

    fn from_mapped(map: &Map<String, Value>) -> Result<Self, ModelError> {
        let r = FieldReader::new(Self::KIND, map);
        Ok(Self {
            entity: EntityHeader::read(&r)?,
            treatment_group: r.optional("treatment_group")?,
            diet: r.optional("diet")?,
            bedding: r.optional("bedding")?,
            received_alive: r.optional("received_alive")?,
            filler_mouse: r.optional("filler_mouse")?,
            accomodation: r.optional("accomodation")?,
            current_clinical_observation: r.optional("current_clinical_observation")?,
            anticipated_clinical_observation: r.optional("anticipated_clinical_observation")?,
            additional_notes: r.optional("additional_notes")?,
            immune_status: r.optional("immune_status")?,
            customer_mouse_id: r.optional("customer_mouse_id")?,
            litter_number: r.optional("litter_number")?,
            primary_id: r.optional("primary_id")?,
            primary_id_value: r.optional("primary_id_value")?,
            secondary_id: r.optional("secondary_id")?,
            secondary_id_value: r.optional("secondary_id_value")?,
            cohort_name: r.optional("cohort_name")?,
            blind_id: r.optional("blind_id")?,
            mep_id: r.optional("mep_id")?,
            nbp_group_id: r.optional("nbp_group_id")?,
            role: r.optional("role")?,
            source_pen_id: r.optional("source_pen_id")?,
            sex: r.optional("sex")?,
            mouse_room_of_origin: r.optional("mouse_room_of_origin")?,
            section_of_origin: r.optional("section_of_origin")?,
            date_of_birth: r.optional("date_of_birth")?,
            comments: r.optional("comments")?,
            date_of_death: r.optional("date_of_death")?,
            reason_for_death: r.optional("reason_for_death")?,
            user_defined_strain_name: r.optional("user_defined_strain_name")?,
            genotype: r.optional("genotype")?,
            allele: r.optional("allele")?,
            coat_color: r.optional("coat_color")?,
            pedigree: r.optional("pedigree")?,
            whole_mouse_fail: r.optional("whole_mouse_fail")?,
            fail_reason: r.optional("fail_reason")?,
            explanation: r.optional("explanation")?,
            lot_report: r.optional("lot_report")?,
            use_for_mouse_name: r.optional("use_for_mouse_name")?,
            mouse_manifest_version: r.optional("mouse_manifest_version")?,
            active_status_tracker: r.optional("active_status_tracker")?,
        })
    }
}

/// A lot of material collected from one or more samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleLot {
    #[serde(flatten)]
    pub entity: EntityHeader,
    pub sample_lot_status: Option<String>,
    pub date_collected: Option<String>,
    pub date_received: Option<String>,
    pub collection_method: Option<String>,
    pub transport_media: Option<String>,
    pub source: Option<String>,
    pub comment: Option<String>,
    pub all_lot_failed: Option<bool>,
    pub failed_reason: Option<String>,
    pub fundus_required: Option<bool>,
    pub fundus_comment: Option<String>,
}

impl Record for SampleLot {
    const KIND: EntityKind = EntityKind::SampleLot;

    fn from_mapped(map: &Map<String, Value>) -> Result<Self, ModelError> {
        let r = FieldReader::new(Self::KIND, map);
        Ok(Self {
            entity: EntityHeader::read(&r)?,
            sample_lot_status: r.optional("sample_lot_status")?,
            date_collected: r.optional("date_collected")?,
            date_received: r.optional("date_received")?,
            collection_method: r.optional("collection_method")?,
            transport_media: r.optional("transport_media")?,
            source: r.optional("source")?,
            comment: r.optional("comment")?,
            all_lot_failed: r.optional("all_lot_failed")?,
            failed_reason: r.optional("failed_reason")?,
            fundus_required: r.optional("fundus_required")?,
            fundus_comment: r.optional("fundus_comment")?,
        })
    }
}

/// A mouse strain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Strain {
    #[serde(flatten)]
    pub entity: EntityHeader,
    pub stock_number: Option<String>,
    pub nomenclature: Option<String>,
    pub background: Option<String>,
    pub strain_status: Option<String>,
    pub eap_status: Option<String>,
    pub mgi_id: Option<String>,
}

impl Record for Strain {
    const KIND: EntityKind = EntityKind::Strain;

    fn from_mapped(map: &Map<String, Value>) -> Result<Self, ModelError> {
        let r = FieldReader::new(Self::KIND, map);
        Ok(Self {
            entity: EntityHeader::read(&r)?,
            stock_number: r.optional("stock_number")?,
            nomenclature: r.optional("nomenclature")?,
            background: r.optional("background")?,
            strain_status: r.optional("strain_status")?,
            eap_status: r.optional("eap_status")?,
            mgi_id: r.optional("mgi_id")?,
        })
    }
}
