//! Listing pipeline: derive region, filter by name, sort, paginate.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{
    airport::{AirportRecord, AirportView, FieldValue, with_region},
    types::SortOrder,
};

/// Default sort attribute.
pub const DEFAULT_SORT_FIELD: &str = "name";
/// First page number.
pub const DEFAULT_PAGE: usize = 1;
/// Default page size.
pub const DEFAULT_LIMIT: usize = 50;

/// Raw listing parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// Case-insensitive substring matched against `name`.
    pub filter: Option<String>,
    /// Attribute to sort by.
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    /// `"desc"` for descending, anything else ascending.
    pub order: Option<String>,
    /// 1-based page number.
    pub page: Option<String>,
    /// Page size.
    pub limit: Option<String>,
    /// `false`, `0`, or `no` disables pagination.
    pub paginated: Option<String>,
}

/// Normalized listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Name filter; empty matches everything.
    pub filter: String,
    /// Attribute name, never validated.
    pub sort_by: String,
    /// Sort direction.
    pub order: SortOrder,
    /// 1-based page number, at least 1.
    pub page: usize,
    /// Page size, at least 1.
    pub limit: usize,
    /// Whether to slice the result into a page.
    pub paginated: bool,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filter: String::new(),
            sort_by: DEFAULT_SORT_FIELD.to_string(),
            order: SortOrder::Asc,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            paginated: true,
        }
    }
}

impl From<ListParams> for ListQuery {
    fn from(params: ListParams) -> Self {
        Self {
            filter: params.filter.unwrap_or_default(),
            sort_by: params
                .sort_by
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SORT_FIELD.to_string()),
            order: params
                .order
                .as_deref()
                .map(SortOrder::parse)
                .unwrap_or_default(),
            page: parse_positive(params.page.as_deref(), DEFAULT_PAGE),
            limit: parse_positive(params.limit.as_deref(), DEFAULT_LIMIT),
            paginated: params.paginated.as_deref().is_none_or(parse_toggle),
        }
    }
}

/// Listing result, paginated or whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    /// One page of the filtered, sorted set.
    Page {
        /// Filtered count before pagination.
        total: usize,
        /// Page number served.
        page: usize,
        /// Page size served.
        limit: usize,
        /// Records on this page.
        data: Vec<AirportView>,
    },
    /// The whole filtered, sorted set.
    All {
        /// Filtered count.
        total: usize,
        /// Every matching record.
        data: Vec<AirportView>,
    },
}

impl ListResponse {
    /// Filtered count before pagination.
    pub fn total(&self) -> usize {
        match self {
            Self::Page { total, .. } | Self::All { total, .. } => *total,
        }
    }

    /// Records carried by the response.
    pub fn data(&self) -> &[AirportView] {
        match self {
            Self::Page { data, .. } | Self::All { data, .. } => data,
        }
    }
}

/// Runs the listing pipeline over `records`.
pub fn run_query<'a, I>(records: I, query: &ListQuery) -> ListResponse
where
    I: IntoIterator<Item = &'a AirportRecord>,
{
    let needle = query.filter.to_lowercase();
    let mut views: Vec<AirportView> = records
        .into_iter()
        .cloned()
        .map(with_region)
        .filter(|view| matches_filter(view, &needle))
        .collect();

    // sort_by is stable, so ties keep store order in both directions.
    views.sort_by(|a, b| compare_views(a, b, &query.sort_by, query.order));

    let total = views.len();
    if !query.paginated {
        return ListResponse::All { total, data: views };
    }

    let page = query.page.max(1);
    let limit = query.limit.max(1);
    let offset = (page - 1).saturating_mul(limit);
    let data = views.into_iter().skip(offset).take(limit).collect();
    ListResponse::Page {
        total,
        page,
        limit,
        data,
    }
}

fn matches_filter(view: &AirportView, needle: &str) -> bool {
    needle.is_empty() || view.record.name.to_lowercase().contains(needle)
}

/// Orders two views on `field`, reversed for [`SortOrder::Desc`].
pub fn compare_views(a: &AirportView, b: &AirportView, field: &str, order: SortOrder) -> Ordering {
    let ord = compare_values(a.field(field), b.field(field));
    match order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    }
}

/// Numbers compare numerically; any other pairing compares string forms.
pub fn compare_values(a: FieldValue<'_>, b: FieldValue<'_>) -> Ordering {
    match (a, b) {
        (FieldValue::Number(x), FieldValue::Number(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (a, b) => collate(&a.as_text(), &b.as_text()),
    }
}

/// Locale-style string ordering.
///
/// Letters compare case-insensitively first; among strings equal under case
/// folding, lowercase sorts before uppercase at the first differing position.
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a
        .cmp(folded_b)
        .then_with(|| case_tiebreak(a, b))
        .then_with(|| a.cmp(b))
}

fn case_tiebreak(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}

/// Parses a positive integer parameter.
///
/// Missing or unparseable input yields `default`; zero and negatives clamp to 1.
pub fn parse_positive(raw: Option<&str>, default: usize) -> usize {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<i64>() {
        Ok(v) if v < 1 => 1,
        Ok(v) => usize::try_from(v).unwrap_or(default),
        Err(_) => default,
    }
}

fn parse_toggle(raw: &str) -> bool {
    !matches!(raw.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no")
}
