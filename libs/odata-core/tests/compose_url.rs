use odata_core::{compose_url, FilterTriple, OrderBy, QueryIntent};

const BASE: &str = "https://jacksonlabstest.platformforscience.com/DEV_KOMP/odata/";

#[test]
fn assay_query_orders_then_filters() {
    let intent = QueryIntent::new()
        .filter(FilterTriple::new("JAX_ASSAY_STRAINNAME", "=", "TFJR0002").unwrap())
        .order_by(OrderBy::parse("JAX_ASSAY_DATEOFBIRTH", "asc").unwrap());

    let url = compose_url(BASE, "KOMP_BODY_WEIGHT_ASSAY_DATA", &intent);
    assert_eq!(
        url,
        format!(
            "{BASE}KOMP_BODY_WEIGHT_ASSAY_DATA?$orderby=JAX_ASSAY_DATEOFBIRTH asc&$filter=JAX_ASSAY_STRAINNAME eq 'TFJR0002'"
        )
    );
}

#[test]
fn all_parameters_in_stable_order() {
    let intent = QueryIntent::new()
        .expand("EXPERIMENT_SAMPLE($expand=ENTITY)")
        .select(["JAX_ASSAY_STRAINNAME", "JAX_ASSAY_DATEOFBIRTH"])
        .filter(FilterTriple::parse("JAX_ASSAY_DATEOFBIRTH >= 2023-06-20").unwrap())
        .order_by(OrderBy::desc("JAX_ASSAY_DATEOFBIRTH"));

    let url = compose_url(BASE, "KOMP_BODY_WEIGHT_ASSAY_DATA", &intent);
    assert_eq!(
        url,
        format!(
            "{BASE}KOMP_BODY_WEIGHT_ASSAY_DATA?$orderby=JAX_ASSAY_DATEOFBIRTH dsc\
             &$filter=JAX_ASSAY_DATEOFBIRTH ge 2023-06-20\
             &$select=JAX_ASSAY_STRAINNAME,JAX_ASSAY_DATEOFBIRTH\
             &$expand=EXPERIMENT_SAMPLE($expand=ENTITY)"
        )
    );
}

#[test]
fn direct_key_ignores_everything_else() {
    let intent = QueryIntent::with_key("MS123")
        .filter(FilterTriple::parse("NAME = x").unwrap())
        .order_by(OrderBy::asc("NAME"))
        .select(["NAME"])
        .expand("SAMPLE");

    let url = compose_url(BASE, "MOUSE_SAMPLE", &intent);
    assert_eq!(url, format!("{BASE}MOUSE_SAMPLE('MS123')"));
}

#[test]
fn empty_intent_has_no_query_string() {
    let url = compose_url(BASE, "KOMP_BODY_WEIGHT_EXPERIMENT", &QueryIntent::new());
    assert_eq!(url, format!("{BASE}KOMP_BODY_WEIGHT_EXPERIMENT"));
}

#[test]
fn filter_prefix_qualifies_fields_across_expansion() {
    let intent = QueryIntent::new()
        .filter(FilterTriple::parse("JAX_STRAIN_KOMP_EAP_STATUS = In Progress").unwrap())
        .filter_prefix("STRAIN/")
        .expand("STRAIN");

    let url = compose_url(BASE, "MOUSE_SAMPLE", &intent);
    assert_eq!(
        url,
        format!(
            "{BASE}MOUSE_SAMPLE?$filter=STRAIN/JAX_STRAIN_KOMP_EAP_STATUS eq 'In Progress'&$expand=STRAIN"
        )
    );
}

#[test]
fn special_characters_are_not_percent_encoded() {
    let intent = QueryIntent::new().filter(FilterTriple::parse("NAME = a&b c").unwrap());
    let url = compose_url(BASE, "MOUSE_SAMPLE", &intent);
    assert!(url.ends_with("$filter=NAME eq 'a&b c'"));
}
