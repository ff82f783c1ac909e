use dcc_export::{write_specimen_file, write_specimen_set, ExportConfig, SPECIMEN_NS};
use odata_core::find_by_pair;
use pfs_client::session::records_from_payload;
use pfs_model::{build_records, map_records_for, EntityKind, Sample};
use serde_json::{json, Value};

fn samples_from(payload: &Value) -> Vec<Sample> {
    let raw = find_by_pair(payload, "EntityTypeName", &json!("MOUSE_SAMPLE"));
    let mapped = map_records_for(raw, EntityKind::Sample);
    build_records(&mapped).unwrap()
}

fn render(samples: &[Sample]) -> String {
    let mut out = Vec::new();
    write_specimen_set(&mut out, samples, &ExportConfig::default()).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn bare_entity_exports_gender() {
    let payload = json!({"EXPERIMENT_SAMPLE": [{"ENTITY": {
        "EntityTypeName": "MOUSE_SAMPLE",
        "JAX_MOUSESAMPLE_SEX": "M"
    }}]});
    let samples = records_from_payload::<Sample>(&payload).unwrap();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].sex.as_deref(), Some("M"));
    assert_eq!(samples[0].entity.id, None);

    let xml = render(&samples);
    assert_eq!(xml.matches("<mouse ").count(), 1);
    assert!(xml.contains(r#"specimenID="""#), "{xml}");
    assert!(xml.contains(r#"gender="male""#), "{xml}");
}

#[test]
fn document_shape() {
    let payload = json!({"value": [
        {"EXPERIMENT_SAMPLE": [{"ENTITY": {
            "EntityTypeName": "MOUSE_SAMPLE",
            "Id": 1,
            "Name": "MS-1",
            "Barcode": "MS-1",
            "JAX_SAMPLE_EXTERNALID": "EXT-1",
            "JAX_MOUSESAMPLE_SEX": "F",
            "JAX_MOUSESAMPLE_DATEOFBIRTH": "2023-06-20T00:00:00Z",
            "JAX_MOUSESAMPLE_GENOTYPE": "+/-",
            "JAX_MOUSESAMPLE_LITTERNUMBER": "L1",
            "JAX_MOUSESAMPLE_ALLELE": "C57BL/6NJ-Rnf217<em1(IMPC)J>/Mmjax (JR034213)"
        }}]},
        {"EXPERIMENT_SAMPLE": [{"ENTITY": {
            "EntityTypeName": "MOUSE_SAMPLE",
            "Id": 2,
            "Name": "MS-2",
            "Barcode": "MS-2",
            "JAX_MOUSESAMPLE_ALLELE": "C57BL/6NJ(JR005304)"
        }}]}
    ]});
    let xml = render(&samples_from(&payload));

    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml.contains(&format!(r#"<centreSpecimenSet xmlns="{SPECIMEN_NS}">"#)));
    assert!(xml.contains(r#"  <centre centreID="J">"#));
    assert_eq!(xml.matches("<mouse ").count(), 2);
    assert!(xml.contains(
        r#"<mouse pipeline="JAX_001" productionCenter="J" phenotypingCenter="J" project="JAX" strainID="MGI:3056279" specimenID="EXT-1" DOB="2023-06-20" gender="female" zygosity="heterozygous" litterId="L1" colonyID="JR34213" isBaseline="false"/>"#
    ), "{xml}");
    assert!(xml.contains(
        r#"specimenID="MS-2" gender="female" zygosity="?/?" litterId=" " isBaseline="true"/>"#
    ), "{xml}");
    assert!(xml.trim_end().ends_with("</centreSpecimenSet>"));
}

#[test]
fn empty_sample_list_still_writes_centre() {
    let xml = render(&[]);
    assert!(xml.contains(r#"<centre centreID="J">"#));
    assert!(!xml.contains("<mouse"));
}

#[test]
fn custom_centre_settings() {
    let cfg = ExportConfig {
        centre_id: "H".into(),
        pipeline: "HRWL_001".into(),
        ..ExportConfig::default()
    };
    let payload = json!({
        "EntityTypeName": "MOUSE_SAMPLE", "Id": 5, "Name": "MS-5", "Barcode": "MS-5"
    });
    let mut out = Vec::new();
    write_specimen_set(&mut out, &samples_from(&payload), &cfg).unwrap();
    let xml = String::from_utf8(out).unwrap();
    assert!(xml.contains(r#"centreID="H""#));
    assert!(xml.contains(r#"pipeline="HRWL_001""#));
}

#[test]
fn writes_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("specimens.xml");
    let payload = json!({
        "EntityTypeName": "MOUSE_SAMPLE", "Id": 5, "Name": "MS-5", "Barcode": "MS-5"
    });
    write_specimen_file(&path, &samples_from(&payload), &ExportConfig::default()).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains(r#"specimenID="MS-5""#));
}

#[test]
fn missing_directory_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no/such/dir/specimens.xml");
    let err = write_specimen_file(&path, &[], &ExportConfig::default()).unwrap_err();
    assert!(err.to_string().contains("specimens.xml"));
}
