//! Translation of structured filter specifications into query predicates.
//!
//! A [`FilterSpec`] is the contract consumed from the presentation layer:
//! four dimensions, where an empty selection means "no filtering", the same
//! rule across all four. Resolution against a caller-supplied "today" turns
//! named presets into concrete bounds and rejects inverted ranges before any
//! query runs.

use crate::record::{Category, Region, SalesRecord, Segment};
use chrono::{Datelike, Duration, NaiveDate};
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

/// Named date-range presets, resolved to concrete bounds at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePreset {
    #[serde(rename = "last_30_days")]
    Last30Days,
    #[serde(rename = "last_90_days")]
    Last90Days,
    LastYear,
    YearToDate,
    AllTime,
}

impl DatePreset {
    /// Resolves the preset against `today`.
    ///
    /// Returns `None` for `AllTime` (no date constraint); otherwise the
    /// inclusive `(start, end)` bounds ending at `today`.
    pub fn resolve(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            DatePreset::Last30Days => Some((today - Duration::days(30), today)),
            DatePreset::Last90Days => Some((today - Duration::days(90), today)),
            DatePreset::LastYear => Some((today - Duration::days(365), today)),
            DatePreset::YearToDate => {
                let start = NaiveDate::from_ymd_opt(today.year(), 1, 1)
                    .unwrap_or(today);
                Some((start, today))
            }
            DatePreset::AllTime => None,
        }
    }
}

/// Date dimension of a filter: everything, a preset, or explicit bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFilter {
    All,
    Preset(DatePreset),
    Range { start: NaiveDate, end: NaiveDate },
}

/// Errors raised while resolving a filter specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Start date after end date
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

impl std::fmt::Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterError::InvalidRange { start, end } => {
                write!(f, "Invalid date range: start {} is after end {}", start, end)
            }
        }
    }
}

impl std::error::Error for FilterError {}

/// Structured filter specification.
///
/// Empty `categories`/`regions`/`segments` selections mean "all values";
/// selecting every value behaves identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default = "default_date_filter")]
    pub date_range: DateFilter,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub regions: Vec<Region>,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

fn default_date_filter() -> DateFilter {
    DateFilter::All
}

impl Default for FilterSpec {
    /// The select-all filter: no constraint on any dimension.
    fn default() -> Self {
        FilterSpec {
            date_range: DateFilter::All,
            categories: Vec::new(),
            regions: Vec::new(),
            segments: Vec::new(),
        }
    }
}

impl FilterSpec {
    /// Resolves the specification against `today`, validating date bounds.
    ///
    /// # Errors
    /// Returns `FilterError::InvalidRange` if explicit bounds are inverted.
    /// Presets cannot produce inverted bounds.
    pub fn resolve(&self, today: NaiveDate) -> Result<ResolvedFilter, FilterError> {
        let bounds = match self.date_range {
            DateFilter::All => None,
            DateFilter::Preset(preset) => preset.resolve(today),
            DateFilter::Range { start, end } => {
                if start > end {
                    return Err(FilterError::InvalidRange { start, end });
                }
                Some((start, end))
            }
        };
        Ok(ResolvedFilter {
            bounds,
            categories: self.categories.clone(),
            regions: self.regions.clone(),
            segments: self.segments.clone(),
        })
    }
}

/// A filter with concrete date bounds, ready to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFilter {
    bounds: Option<(NaiveDate, NaiveDate)>,
    categories: Vec<Category>,
    regions: Vec<Region>,
    segments: Vec<Segment>,
}

impl ResolvedFilter {
    /// Concrete inclusive date bounds, if the filter constrains dates.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.bounds
    }

    /// In-memory predicate over a validated record.
    pub fn matches(&self, record: &SalesRecord) -> bool {
        if let Some((start, end)) = self.bounds {
            if record.transaction_date < start || record.transaction_date > end {
                return false;
            }
        }
        if !self.categories.is_empty() && !self.categories.contains(&record.category) {
            return false;
        }
        if !self.regions.is_empty() && !self.regions.contains(&record.region) {
            return false;
        }
        if !self.segments.is_empty() && !self.segments.contains(&record.customer_segment) {
            return false;
        }
        true
    }

    /// Renders the filter as a SQL predicate over the transactions table.
    ///
    /// Returns the conditions (joined with `AND`, empty when unconstrained)
    /// and the positional parameters they reference. Dates are compared as
    /// ISO 8601 text, which orders correctly.
    pub fn to_sql(&self) -> (String, Vec<Value>) {
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        if let Some((start, end)) = self.bounds {
            conditions.push("transaction_date >= ?".to_string());
            params.push(Value::Text(start.format("%Y-%m-%d").to_string()));
            conditions.push("transaction_date <= ?".to_string());
            params.push(Value::Text(end.format("%Y-%m-%d").to_string()));
        }

        push_in_clause(
            &mut conditions,
            &mut params,
            "category",
            self.categories.iter().map(|c| c.as_str()),
        );
        push_in_clause(
            &mut conditions,
            &mut params,
            "region",
            self.regions.iter().map(|r| r.as_str()),
        );
        push_in_clause(
            &mut conditions,
            &mut params,
            "customer_segment",
            self.segments.iter().map(|s| s.as_str()),
        );

        (conditions.join(" AND "), params)
    }
}

fn push_in_clause<'a>(
    conditions: &mut Vec<String>,
    params: &mut Vec<Value>,
    column: &str,
    values: impl Iterator<Item = &'a str>,
) {
    let values: Vec<&str> = values.collect();
    if values.is_empty() {
        return;
    }
    let placeholders = vec!["?"; values.len()].join(", ");
    conditions.push(format!("{} IN ({})", column, placeholders));
    for value in values {
        params.push(Value::Text(value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
    }

    fn record(date: NaiveDate, category: Category) -> SalesRecord {
        SalesRecord {
            id: 1,
            transaction_date: date,
            category,
            product_name: "Laptop".to_string(),
            quantity: 1,
            unit_price: 100.0,
            region: Region::Europe,
            customer_segment: Segment::Consumer,
            revenue: 100.0,
        }
    }

    #[test]
    fn test_select_all_matches_everything() {
        let resolved = FilterSpec::default().resolve(today()).unwrap();
        let r = record(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), Category::Clothing);
        assert!(resolved.matches(&r));
        let (clause, params) = resolved.to_sql();
        assert!(clause.is_empty());
        assert!(params.is_empty());
    }

    #[test]
    fn test_explicit_range_bounds_are_inclusive() {
        let spec = FilterSpec {
            date_range: DateFilter::Range {
                start: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            },
            ..FilterSpec::default()
        };
        let resolved = spec.resolve(today()).unwrap();
        assert!(resolved.matches(&record(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            Category::Electronics
        )));
        assert!(resolved.matches(&record(
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            Category::Electronics
        )));
        assert!(!resolved.matches(&record(
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            Category::Electronics
        )));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let spec = FilterSpec {
            date_range: DateFilter::Range {
                start: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            },
            ..FilterSpec::default()
        };
        let result = spec.resolve(today());
        assert_eq!(
            result.err(),
            Some(FilterError::InvalidRange {
                start: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            })
        );
    }

    #[test]
    fn test_preset_resolution_against_fixed_today() {
        let (start, end) = DatePreset::Last30Days.resolve(today()).unwrap();
        assert_eq!(end, today());
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());

        let (start, end) = DatePreset::YearToDate.resolve(today()).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(end, today());

        assert_eq!(DatePreset::AllTime.resolve(today()), None);
    }

    #[test]
    fn test_empty_selection_equals_full_selection() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let empty = FilterSpec::default().resolve(today()).unwrap();
        let full = FilterSpec {
            categories: Category::all().to_vec(),
            regions: Region::all().to_vec(),
            segments: Segment::all().to_vec(),
            ..FilterSpec::default()
        }
        .resolve(today())
        .unwrap();

        for category in Category::all() {
            let r = record(date, *category);
            assert_eq!(empty.matches(&r), full.matches(&r));
        }
    }

    #[test]
    fn test_category_selection_filters() {
        let spec = FilterSpec {
            categories: vec![Category::Electronics],
            ..FilterSpec::default()
        };
        let resolved = spec.resolve(today()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(resolved.matches(&record(date, Category::Electronics)));
        assert!(!resolved.matches(&record(date, Category::Clothing)));
    }

    #[test]
    fn test_to_sql_renders_bounds_and_in_lists() {
        let spec = FilterSpec {
            date_range: DateFilter::Range {
                start: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            },
            categories: vec![Category::Electronics, Category::Clothing],
            regions: vec![Region::Europe],
            segments: vec![],
        };
        let (clause, params) = spec.resolve(today()).unwrap().to_sql();
        assert_eq!(
            clause,
            "transaction_date >= ? AND transaction_date <= ? AND \
             category IN (?, ?) AND region IN (?)"
        );
        assert_eq!(params.len(), 5);
    }

    #[test]
    fn test_filter_spec_deserializes_presets() {
        let spec: FilterSpec = serde_json::from_str(
            r#"{"date_range": {"preset": "last_30_days"}, "categories": [], "regions": [], "segments": []}"#,
        )
        .unwrap();
        assert_eq!(
            spec.date_range,
            DateFilter::Preset(DatePreset::Last30Days)
        );
    }
}
