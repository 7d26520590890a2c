use airportdb::{
    airport::AirportRecord,
    engine::query::{ListParams, ListQuery, ListResponse, run_query},
    types::SortOrder,
};

fn airport(icao: &str, iata: &str, name: &str, state: &str, elevation: i64, tz: &str) -> AirportRecord {
    AirportRecord {
        icao: icao.to_string(),
        iata: iata.to_string(),
        name: name.to_string(),
        city: String::new(),
        state: state.to_string(),
        country: "US".to_string(),
        elevation,
        elevation_raw: None,
        lat: 0.0,
        lon: 0.0,
        tz: tz.to_string(),
    }
}

fn fixture() -> Vec<AirportRecord> {
    vec![
        airport("00AZ", "", "Cordes Airport", "Arizona", 3810, "America/Phoenix"),
        airport("01AL", "ABC", "Epps Airpark", "Alabama", 820, "America/Chicago"),
        airport("02AK", "XYZ", "Wasilla Airport", "Alaska", 378, "America/Anchorage"),
    ]
}

fn names(out: &ListResponse) -> Vec<&str> {
    out.data().iter().map(|v| v.record.name.as_str()).collect()
}

#[test]
fn cordes_filter_sorted_desc_paginated() {
    let params = ListParams {
        filter: Some("Cordes".to_string()),
        sort_by: Some("elevation".to_string()),
        order: Some("desc".to_string()),
        page: Some("1".to_string()),
        limit: Some("10".to_string()),
        paginated: None,
    };
    let out = run_query(&fixture(), &ListQuery::from(params));

    assert_eq!(out.total(), 1);
    assert_eq!(out.data().len(), 1);
    assert_eq!(out.data()[0].record.name, "Cordes Airport");
    match out {
        ListResponse::Page { page, limit, .. } => assert_eq!((page, limit), (1, 10)),
        ListResponse::All { .. } => panic!("expected a page"),
    }
}

#[test]
fn default_query_sorts_by_name_and_adds_region() {
    let out = run_query(&fixture(), &ListQuery::default());
    assert_eq!(names(&out), ["Cordes Airport", "Epps Airpark", "Wasilla Airport"]);
    assert_eq!(out.data()[0].region.as_deref(), Some("US-Arizona"));
    assert_eq!(out.data()[0].id, "00AZ");
}

#[test]
fn filter_is_case_insensitive_substring() {
    let query = ListQuery {
        filter: "AIRPORT".to_string(),
        ..ListQuery::default()
    };
    let out = run_query(&fixture(), &query);
    assert_eq!(out.total(), 2);
    assert_eq!(names(&out), ["Cordes Airport", "Wasilla Airport"]);
}

#[test]
fn numeric_sort_desc_puts_highest_first() {
    let query = ListQuery {
        sort_by: "elevation".to_string(),
        order: SortOrder::Desc,
        ..ListQuery::default()
    };
    let out = run_query(&fixture(), &query);
    let elevations: Vec<i64> = out.data().iter().map(|v| v.record.elevation).collect();
    assert_eq!(elevations, [3810, 820, 378]);
}

#[test]
fn sort_on_derived_region() {
    let query = ListQuery {
        sort_by: "region".to_string(),
        ..ListQuery::default()
    };
    let out = run_query(&fixture(), &query);
    assert_eq!(names(&out), ["Epps Airpark", "Wasilla Airport", "Cordes Airport"]);
}

#[test]
fn unknown_sort_field_keeps_input_order() {
    let query = ListQuery {
        sort_by: "runway_length".to_string(),
        order: SortOrder::Desc,
        ..ListQuery::default()
    };
    let out = run_query(&fixture(), &query);
    assert_eq!(out.total(), 3);
    assert_eq!(names(&out), ["Cordes Airport", "Epps Airpark", "Wasilla Airport"]);
}

#[test]
fn missing_values_sort_first_ascending() {
    let mut records = fixture();
    records[2].iata.clear();
    let query = ListQuery {
        sort_by: "iata".to_string(),
        ..ListQuery::default()
    };
    let out = run_query(&records, &query);
    let iatas: Vec<&str> = out.data().iter().map(|v| v.record.iata.as_str()).collect();
    assert_eq!(iatas, ["", "", "ABC"]);
    assert_eq!(names(&out)[..2], ["Cordes Airport", "Wasilla Airport"]);
}

#[test]
fn unpaginated_returns_everything() {
    let query = ListQuery {
        limit: 1,
        paginated: false,
        ..ListQuery::default()
    };
    let out = run_query(&fixture(), &query);
    assert!(matches!(out, ListResponse::All { total: 3, .. }));
    assert_eq!(out.data().len(), 3);

    let json = serde_json::to_value(&out).expect("json");
    assert!(json.get("page").is_none());
    assert_eq!(json["total"], 3);
}

#[test]
fn second_page_slices_after_offset() {
    let query = ListQuery {
        page: 2,
        limit: 2,
        ..ListQuery::default()
    };
    let out = run_query(&fixture(), &query);
    assert_eq!(out.total(), 3);
    assert_eq!(names(&out), ["Wasilla Airport"]);
}
