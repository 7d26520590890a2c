use std::cmp::Ordering;

use proptest::prelude::*;

use airportdb::{
    airport::{AirportRecord, with_region},
    engine::query::{ListQuery, compare_views, run_query},
    types::SortOrder,
};

const NAMES: [&str; 8] = [
    "Cordes Airport",
    "Epps Airpark",
    "Wasilla Airport",
    "heathrow",
    "Gatwick",
    "Big Sky Field",
    "airstrip nine",
    "PORT Elizabeth",
];
const STATES: [&str; 4] = ["", "Arizona", "alaska", "Ontario"];
const FIELDS: [&str; 7] = ["name", "elevation", "lat", "state", "region", "iata", "bogus"];

fn record_strategy() -> impl Strategy<Value = AirportRecord> {
    (0usize..NAMES.len(), 0usize..STATES.len(), -200i64..15_000, -90.0f64..90.0, 0u8..3)
        .prop_map(|(name_idx, state_idx, elevation, lat, iata_idx)| AirportRecord {
            icao: String::new(),
            iata: ["", "ABC", "xyz"][usize::from(iata_idx)].to_string(),
            name: NAMES[name_idx].to_string(),
            city: String::new(),
            state: STATES[state_idx].to_string(),
            country: "US".to_string(),
            elevation,
            elevation_raw: None,
            lat,
            lon: 0.0,
            tz: String::new(),
        })
}

fn records_strategy() -> impl Strategy<Value = Vec<AirportRecord>> {
    prop::collection::vec(record_strategy(), 0..40).prop_map(|mut recs| {
        for (i, rec) in recs.iter_mut().enumerate() {
            rec.icao = format!("K{i:03}");
        }
        recs
    })
}

fn filter_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("air".to_string()),
        Just("AIR".to_string()),
        Just("port".to_string()),
        Just("zzz".to_string()),
        Just("a".to_string()),
    ]
}

proptest! {
    #[test]
    fn filter_keeps_exactly_matching_names(records in records_strategy(), filter in filter_strategy()) {
        let query = ListQuery { filter: filter.clone(), paginated: false, ..ListQuery::default() };
        let out = run_query(&records, &query);
        let needle = filter.to_lowercase();

        for view in out.data() {
            prop_assert!(view.record.name.to_lowercase().contains(&needle));
        }
        let expected = records
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .count();
        prop_assert_eq!(out.total(), expected);
        prop_assert_eq!(out.data().len(), expected);
    }

    #[test]
    fn sort_is_monotonic_and_stable(
        records in records_strategy(),
        field_idx in 0usize..FIELDS.len(),
        desc in any::<bool>(),
    ) {
        let field = FIELDS[field_idx];
        let order = if desc { SortOrder::Desc } else { SortOrder::Asc };
        let query = ListQuery {
            sort_by: field.to_string(),
            order,
            paginated: false,
            ..ListQuery::default()
        };
        let out = run_query(&records, &query);
        let position = |icao: &str| records.iter().position(|r| r.icao == icao);

        for pair in out.data().windows(2) {
            let ord = compare_views(&pair[0], &pair[1], field, order);
            prop_assert_ne!(ord, Ordering::Greater);
            if ord == Ordering::Equal {
                prop_assert!(position(&pair[0].record.icao) < position(&pair[1].record.icao));
            }
        }
    }

    #[test]
    fn pagination_slices_the_filtered_total(
        records in records_strategy(),
        filter in filter_strategy(),
        page in 1usize..6,
        limit in 1usize..12,
    ) {
        let query = ListQuery { filter, page, limit, ..ListQuery::default() };
        let out = run_query(&records, &query);
        let whole = run_query(&records, &ListQuery { paginated: false, ..query.clone() });

        let total = whole.total();
        let offset = (page - 1) * limit;
        prop_assert_eq!(out.total(), total);
        prop_assert_eq!(out.data().len(), limit.min(total.saturating_sub(offset)));
        prop_assert_eq!(out.data(), &whole.data()[offset.min(total)..(offset + out.data().len()).min(total)]);
    }

    #[test]
    fn region_derivation_is_idempotent(rec in record_strategy()) {
        let once = with_region(rec);
        let twice = once.clone().with_region();
        prop_assert_eq!(once, twice);
    }
}
