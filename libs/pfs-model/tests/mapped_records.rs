use pfs_model::{build_records, map_records, map_records_for, EntityKind, Record, Sample, SampleLot};
use serde_json::{json, Map, Value};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn full_sample_payload() -> Map<String, Value> {
    let raw = r#"{
        "EntityTypeName": "MOUSE_SAMPLE",
        "Id": 5501,
        "Name": "MS-5501",
        "Barcode": "MS5501",
        "Created": "2023-06-01T10:00:00Z",
        "Modified": "2023-06-02T10:00:00Z",
        "Active": true,
        "LikedBy": 0,
        "JAX_MOUSESAMPLE_TREATMENTGROUP": "control",
        "JAX_MOUSESAMPLE_DIETGRAINTYPE": "5K52",
        "JAX_MOUSESAMPLE_BEDDING": "pine",
        "JAX_MOUSESAMPLE_ISALIVE": true,
        "JAX_MOUSESAMPLE_ISFILLER": false,
        "JAX_MOUSESAMPLE_ACCOMODATION": "group",
        "JAX_SAMPLE_CURRENTCLINICALOBS": "none",
        "JAX_MOUSESAMPLE_ANTICIPATEDPHENOTYPE": "none",
        "JAX_MOUSESAMPLE_ADDITIONALINFORMATION": "n/a",
        "JAX_MOUSESAMPLE_IMMUNOSUFFICIENCY": "competent",
        "JAX_SAMPLE_EXTERNALID": "A-17",
        "JAX_MOUSESAMPLE_LITTERNUMBER": "L42",
        "JAX_MOUSESAMPLE_PRIMARYID": "ear tag",
        "JAX_MOUSESAMPLE_PRIMARYIDVALUE": "17",
        "JAX_MOUSESAMPLE_SECONDARYID": "tail",
        "JAX_MOUSESAMPLE_SECONDARYIDVALUE": "3",
        "JAX_SAMPLE_COHORTNAME": "cohort-1",
        "JAX_MOUSESAMPLE_BLINDID": "B1",
        "JAX_MOUSESAMPLE_MEPID": "MEP1",
        "JAX_MOUSESAMPLE_NBPID": "NBP1",
        "JAX_MOUSESAMPLE_POOLEDROLE": "single",
        "JAX_MOUSESAMPLE_SOURCEPENID": "P-9",
        "JAX_MOUSESAMPLE_SEX": "F",
        "JAX_SAMPLE_MOUSECOLONYROOM": "G3",
        "JAX_SAMPLE_MOUSEROOMSECTION": "A",
        "JAX_MOUSESAMPLE_DATEOFBIRTH": "2023-04-01T00:00:00Z",
        "JAX_SAMPLE_COMMENTS": "healthy",
        "JAX_MOUSESAMPLE_DATEOFDEATH": "2023-09-01T00:00:00Z",
        "JAX_MOUSESAMPLE_REASONFORDEATH": "end of study",
        "JAX_MOUSESAMPLE_USERSDEFINEDSTRAINNAME": "B6N",
        "JAX_MOUSESAMPLE_GENOTYPE": "-/-",
        "JAX_MOUSESAMPLE_ALLELE": "C57BL/6NJ-Rnf217<em1(IMPC)J>/Mmjax (JR034213)",
        "JAX_MOUSESAMPLE_COATCOLOR": "black",
        "JAX_MOUSESAMPLE_PEDIGREE": "P1",
        "JAX_MOUSESAMPLE_WHOLEMOUSEFAIL": false,
        "JAX_MOUSESAMPLE_WHOLEMOUSEFAILREASONS": "none",
        "JAX_MOUSESAMPLE_WHOLEMOUSEFAILEXPLANATION": "none",
        "JAX_MOUSESAMPLE_LOTREPORT": "ok",
        "JAX_UUID_USEFORNAME": "yes",
        "JAX_MOUSESAMPLE_MOUSEMANIFESTVERSION": "2",
        "JAX_MOUSESAMPLE_ACTIVESTATUSVERSIONTRACKER": "v1"
    }"#;
    object(serde_json::from_str(raw).unwrap())
}

#[test]
fn fully_populated_sample_round_trips_every_field() {
    let mapped = map_records_for([full_sample_payload()], EntityKind::Sample);
    let sample = Sample::from_mapped(&mapped[0]).unwrap();

    let serialized = match serde_json::to_value(&sample).unwrap() {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    };
    assert_eq!(serialized.len(), mapped[0].len());
    for (field, value) in &serialized {
        assert_eq!(Some(value), mapped[0].get(field), "field {field}");
    }
    assert_eq!(sample.zygosity().as_str(), "homozygous");
}

#[test]
fn sample_lots_build_from_token_selected_map() {
    let raw = vec![object(json!({
        "EntityTypeName": "MOUSE_SAMPLE_LOT",
        "Id": 9,
        "Name": "LOT-9",
        "Barcode": "LOT9",
        "JAX_SAMPLELOT_STATUS": "Received",
        "JAX_SAMPLELOT_FUNDUS_REQUIRED": true,
    }))];

    let mapped = map_records(&raw, "SAMPLE LOT").unwrap();
    let lots: Vec<SampleLot> = build_records(&mapped).unwrap();
    assert_eq!(lots[0].entity.barcode.as_deref(), Some("LOT9"));
    assert_eq!(lots[0].sample_lot_status.as_deref(), Some("Received"));
    assert_eq!(lots[0].fundus_required, Some(true));
    assert_eq!(lots[0].date_received, None);
}
