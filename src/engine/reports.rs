//! Read-only aggregate reports over the full record set.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::airport::{AirportRecord, AirportView, with_region};

/// Number of timezones returned when no usable limit is given.
pub const DEFAULT_TOP_TIMEZONES: usize = 10;

/// Mean elevation for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryElevation {
    /// Country as stored.
    pub country: String,
    /// Mean elevation rounded to two decimals.
    pub average: f64,
}

/// Occurrence count for one timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneCount {
    /// Timezone name.
    pub timezone: String,
    /// Number of airports in it.
    pub count: usize,
}

/// Rounded mean of every known elevation, 0 when there is none.
pub fn average_elevation<'a, I>(records: I) -> i64
where
    I: IntoIterator<Item = &'a AirportRecord>,
{
    let (sum, count) = records
        .into_iter()
        .filter_map(AirportRecord::known_elevation)
        .fold((0i128, 0usize), |(sum, count), feet| (sum + i128::from(feet), count + 1));
    if count == 0 {
        return 0;
    }
    round_half_up(sum as f64 / count as f64) as i64
}

/// Mean elevation per country, in order of first appearance.
///
/// Unparseable elevations are left out of the mean; a country with none
/// left reports 0.
pub fn average_elevation_per_country<'a, I>(records: I) -> Vec<CountryElevation>
where
    I: IntoIterator<Item = &'a AirportRecord>,
{
    let mut seen: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, (i128, usize)> = HashMap::new();

    for rec in records {
        let entry = totals.entry(rec.country.as_str()).or_insert_with(|| {
            seen.push(rec.country.as_str());
            (0, 0)
        });
        if let Some(feet) = rec.known_elevation() {
            entry.0 += i128::from(feet);
            entry.1 += 1;
        }
    }

    seen.into_iter()
        .map(|country| {
            let (sum, count) = totals[country];
            let average = if count == 0 {
                0.0
            } else {
                round_half_up(sum as f64 / count as f64 * 100.0) / 100.0
            };
            CountryElevation {
                country: country.to_string(),
                average,
            }
        })
        .collect()
}

/// Records without an IATA code, in store order.
pub fn missing_iata<'a, I>(records: I) -> Vec<AirportView>
where
    I: IntoIterator<Item = &'a AirportRecord>,
{
    records
        .into_iter()
        .filter(|rec| rec.iata.is_empty())
        .cloned()
        .map(with_region)
        .collect()
}

/// Most common non-empty timezones, count descending then name ascending.
pub fn top_timezones<'a, I>(records: I, limit: usize) -> Vec<TimezoneCount>
where
    I: IntoIterator<Item = &'a AirportRecord>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for rec in records {
        if !rec.tz.is_empty() {
            *counts.entry(rec.tz.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<TimezoneCount> = counts
        .into_iter()
        .map(|(tz, count)| TimezoneCount {
            timezone: tz.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.timezone.cmp(&b.timezone)));
    ranked.truncate(limit);
    ranked
}

/// Parses the top-timezones `limit`; missing, non-numeric, or non-positive input uses the default.
pub fn parse_top_limit(raw: Option<&str>) -> usize {
    match raw.and_then(|s| s.trim().parse::<usize>().ok()) {
        Some(limit) if limit >= 1 => limit,
        _ => DEFAULT_TOP_TIMEZONES,
    }
}

/// Halves round toward positive infinity, so -1.5 becomes -1.
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(icao: &str, country: &str, elevation: i64, iata: &str, tz: &str) -> AirportRecord {
        AirportRecord {
            icao: icao.to_string(),
            iata: iata.to_string(),
            name: format!("{icao} Airport"),
            city: String::new(),
            state: String::new(),
            country: country.to_string(),
            elevation,
            elevation_raw: None,
            lat: 0.0,
            lon: 0.0,
            tz: tz.to_string(),
        }
    }

    #[test]
    fn two_record_scenario() {
        let records = vec![
            rec("A", "US", 100, "", "America/Chicago"),
            rec("B", "US", 200, "", "America/Chicago"),
        ];

        assert_eq!(average_elevation(&records), 150);
        let no_iata = missing_iata(&records);
        assert_eq!(no_iata.len(), 2);
        assert_eq!(no_iata[0].record.icao, "A");
        assert_eq!(
            top_timezones(&records, DEFAULT_TOP_TIMEZONES),
            vec![TimezoneCount {
                timezone: "America/Chicago".to_string(),
                count: 2
            }]
        );
    }

    #[test]
    fn empty_set_reports_zero_and_nothing() {
        let records: Vec<AirportRecord> = Vec::new();
        assert_eq!(average_elevation(&records), 0);
        assert!(average_elevation_per_country(&records).is_empty());
        assert!(missing_iata(&records).is_empty());
        assert!(top_timezones(&records, 10).is_empty());
    }

    #[test]
    fn mean_elevation_rounds_to_nearest() {
        let records = vec![rec("A", "US", 1, "X", ""), rec("B", "US", 2, "Y", "")];
        assert_eq!(average_elevation(&records), 2);
        let records = vec![
            rec("A", "US", 1, "X", ""),
            rec("B", "US", 1, "Y", ""),
            rec("C", "US", 2, "Z", ""),
        ];
        assert_eq!(average_elevation(&records), 1);
    }

    #[test]
    fn per_country_keeps_first_encounter_order_and_two_decimals() {
        let records = vec![
            rec("A", "US", 100, "", ""),
            rec("B", "CA", 10, "", ""),
            rec("C", "US", 101, "", ""),
            rec("D", "CA", 11, "", ""),
            rec("E", "CA", 11, "", ""),
        ];
        let out = average_elevation_per_country(&records);
        assert_eq!(
            out,
            vec![
                CountryElevation {
                    country: "US".to_string(),
                    average: 100.5
                },
                CountryElevation {
                    country: "CA".to_string(),
                    average: 10.67
                },
            ]
        );
    }

    #[test]
    fn timezone_ties_break_by_name_and_truncate() {
        let records = vec![
            rec("A", "US", 0, "", "Zulu/Zone"),
            rec("B", "US", 0, "", "Alpha/Zone"),
            rec("C", "US", 0, "", "Mid/Zone"),
            rec("D", "US", 0, "", "Mid/Zone"),
            rec("E", "US", 0, "", ""),
        ];
        let out = top_timezones(&records, 2);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].timezone, "Mid/Zone");
        assert_eq!(out[0].count, 2);
        assert_eq!(out[1].timezone, "Alpha/Zone");
    }

    #[test]
    fn top_limit_falls_back_to_default() {
        assert_eq!(parse_top_limit(None), DEFAULT_TOP_TIMEZONES);
        assert_eq!(parse_top_limit(Some("abc")), DEFAULT_TOP_TIMEZONES);
        assert_eq!(parse_top_limit(Some("0")), DEFAULT_TOP_TIMEZONES);
        assert_eq!(parse_top_limit(Some("-3")), DEFAULT_TOP_TIMEZONES);
        assert_eq!(parse_top_limit(Some("3")), 3);
    }

    #[test]
    fn negative_halves_round_toward_positive() {
        let records = vec![rec("A", "US", -1, "X", ""), rec("B", "US", -2, "Y", "")];
        assert_eq!(average_elevation(&records), -1);

        let records = vec![
            rec("A", "US", -1, "X", ""),
            rec("B", "US", -1, "Y", ""),
            rec("C", "US", -1, "Z", ""),
            rec("D", "US", -2, "W", ""),
            rec("E", "US", -2, "V", ""),
            rec("F", "US", -2, "U", ""),
            rec("G", "US", -2, "T", ""),
            rec("H", "US", -2, "S", ""),
        ];
        // -13 / 8 = -1.625, stays below the half-up boundary
        assert_eq!(average_elevation(&records), -2);

        let records = vec![rec("A", "US", -1, "", ""), rec("B", "US", 0, "", "")];
        assert_eq!(average_elevation(&records), 0);
        assert_eq!(average_elevation_per_country(&records)[0].average, -0.5);
    }

    #[test]
    fn unparseable_elevations_are_left_out_of_means() {
        let mut bad = rec("B", "US", 0, "", "");
        bad.elevation_raw = Some(serde_json::json!("abc"));
        let mut only_bad = rec("C", "CA", 0, "", "");
        only_bad.elevation_raw = Some(serde_json::json!("n/a"));
        let records = vec![rec("A", "US", 100, "", ""), bad, only_bad];

        assert_eq!(average_elevation(&records), 100);
        assert_eq!(
            average_elevation_per_country(&records),
            vec![
                CountryElevation {
                    country: "US".to_string(),
                    average: 100.0
                },
                CountryElevation {
                    country: "CA".to_string(),
                    average: 0.0
                },
            ]
        );
        assert_eq!(average_elevation(&records[1..]), 0);
    }
}
