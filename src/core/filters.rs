use std::cmp::Ordering;
use std::collections::HashMap;

use crate::core::traits::numeric_trait_keys;
use crate::models::{Answer, Breed, DealbreakerMode, Scalar, TraitValue};

/// Does the breed's value match any of the user's values?
///
/// A missing breed value never matches. List values match on intersection.
pub fn value_matches(breed_value: Option<&TraitValue>, user_values: &[Scalar]) -> bool {
    match breed_value {
        None => false,
        Some(TraitValue::Numeric(n)) => {
            let n = f64::from(*n);
            user_values.iter().filter_map(Scalar::as_number).any(|v| v == n)
        }
        Some(TraitValue::Text(value)) => {
            user_values.iter().any(|v| v.as_text() == Some(value.as_str()))
        }
        Some(TraitValue::TextSet(values)) => user_values
            .iter()
            .filter_map(Scalar::as_text)
            .any(|v| values.contains(v)),
    }
}

/// Check whether a dealbreaker answer removes the breed from the results
///
/// Exclude mode drops breeds that match; accept mode drops breeds that don't.
/// Non-dealbreaker answers never exclude.
#[inline]
pub fn dealbreaker_excludes(answer: &Answer, breed_value: Option<&TraitValue>) -> bool {
    if !answer.dealbreaker {
        return false;
    }
    let hit = value_matches(breed_value, answer.value.values());
    match answer.mode {
        DealbreakerMode::Exclude => hit,
        DealbreakerMode::Accept => !hit,
    }
}

const RANGE_FIELDS: [&str; 3] = ["weight", "height", "lifeExpectancy"];
const MEMBERSHIP_FIELDS: [&str; 3] = ["livingEnvironment", "coatType", "coatLength"];

pub const DEFAULT_PAGE_LIMIT: usize = 20;
pub const MAX_PAGE_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct RangeFilter {
    pub field: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortOrder {
    pub field: String,
    pub descending: bool,
}

/// Catalog browsing query: filters, sorting and pagination
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQuery {
    pub page: usize,
    pub limit: usize,
    pub sort: SortOrder,
    pub numeric: Vec<(String, f64)>,
    pub ranges: Vec<RangeFilter>,
    pub memberships: Vec<(String, String)>,
}

/// One page of a filtered catalog
#[derive(Debug, Clone)]
pub struct CatalogPage<T = Breed> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub pages: usize,
}

fn parse_number(raw: Option<&String>) -> Option<f64> {
    raw.and_then(|v| v.trim().parse::<f64>().ok()).filter(|v| v.is_finite())
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            sort: SortOrder { field: "name".to_string(), descending: false },
            numeric: Vec::new(),
            ranges: Vec::new(),
            memberships: Vec::new(),
        }
    }
}

impl CatalogQuery {
    /// Build a query from raw query-string parameters
    ///
    /// Unparseable values are ignored rather than rejected.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let mut query = Self::default();

        if let Some(page) = params.get("page").and_then(|p| p.trim().parse::<usize>().ok()) {
            query.page = page.max(1);
        }
        if let Some(limit) = params.get("limit").and_then(|l| l.trim().parse::<usize>().ok()) {
            query.limit = limit.clamp(1, MAX_PAGE_LIMIT);
        }
        if let Some(sort) = params.get("sort").map(|s| s.trim()).filter(|s| !s.is_empty()) {
            query.sort = match sort.strip_prefix('-') {
                Some(field) => SortOrder { field: field.to_string(), descending: true },
                None => SortOrder { field: sort.to_string(), descending: false },
            };
        }

        for key in numeric_trait_keys() {
            if let Some(value) = parse_number(params.get(key)) {
                query.numeric.push((key.to_string(), value));
            }
        }

        for field in RANGE_FIELDS {
            let min = parse_number(params.get(&format!("{}.min", field)));
            let max = parse_number(params.get(&format!("{}.max", field)));
            if min.is_some() || max.is_some() {
                query.ranges.push(RangeFilter { field: field.to_string(), min, max });
            }
        }

        for field in MEMBERSHIP_FIELDS {
            if let Some(value) = params.get(field).filter(|v| !v.is_empty()) {
                query.memberships.push((field.to_string(), value.clone()));
            }
        }

        query
    }

    pub fn matches(&self, breed: &Breed) -> bool {
        let numeric_ok = self
            .numeric
            .iter()
            .all(|(key, value)| breed.numeric_trait(key).map(f64::from) == Some(*value));

        let ranges_ok = self.ranges.iter().all(|filter| match breed.range_field(&filter.field) {
            Some(range) => {
                filter.min.map_or(true, |min| range.min >= min)
                    && filter.max.map_or(true, |max| range.max <= max)
            }
            None => false,
        });

        let memberships_ok = self.memberships.iter().all(|(field, value)| {
            breed
                .categorical_trait(field)
                .is_some_and(|categorical| categorical.contains(value))
        });

        numeric_ok && ranges_ok && memberships_ok
    }

    fn sort_key(&self, breed: &Breed) -> Option<f64> {
        let field = self.sort.field.as_str();
        match breed.range_field(field) {
            Some(range) => Some(range.max),
            None => breed.numeric_trait(field).map(f64::from),
        }
    }

    fn compare(&self, a: &Breed, b: &Breed) -> Ordering {
        if self.sort.field == "name" {
            let ordering = a.name.cmp(&b.name);
            return if self.sort.descending { ordering.reverse() } else { ordering };
        }

        // Missing values sort last in either direction
        match (self.sort_key(a), self.sort_key(b)) {
            (Some(x), Some(y)) => {
                let ordering = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
                if self.sort.descending { ordering.reverse() } else { ordering }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Filter, sort and paginate a catalog snapshot
    pub fn apply(&self, breeds: Vec<Breed>) -> CatalogPage {
        let mut filtered: Vec<Breed> = breeds.into_iter().filter(|b| self.matches(b)).collect();
        filtered.sort_by(|a, b| self.compare(a, b));

        self.paginate(filtered)
    }

    /// Cut one page out of already filtered and sorted items
    pub fn paginate<T>(&self, items: Vec<T>) -> CatalogPage<T> {
        let total = items.len();
        let skip = (self.page - 1).saturating_mul(self.limit);

        CatalogPage {
            items: items.into_iter().skip(skip).take(self.limit).collect(),
            total,
            page: self.page,
            pages: total.div_ceil(self.limit),
        }
    }
}
