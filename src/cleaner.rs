//! Validation and cleaning of raw record sets.
//!
//! Policy (documented, deterministic):
//! - Exact duplicates (same id, or same full non-id field tuple) collapse to
//!   the first occurrence.
//! - Missing or unrecognized category/region/segment values are substituted
//!   with the `Unknown` member of the closed set and counted. A missing
//!   product name is substituted with a placeholder and counted.
//! - Records with a missing or unparseable date, a date outside the window,
//!   a missing or non-positive quantity, or a missing or non-positive unit
//!   price are dropped and counted.
//! - Revenue is always recomputed from quantity and unit price; the raw
//!   value, if any, is never trusted.

use crate::record::{Category, DateWindow, RawRecord, Region, SalesRecord, Segment};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Placeholder product name used when the raw record carries none.
pub const UNLISTED_PRODUCT: &str = "Unlisted Item";

/// Counts of every correction the cleaner applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub input_records: usize,
    pub output_records: usize,
    pub duplicates_removed: usize,
    pub category_substitutions: usize,
    pub region_substitutions: usize,
    pub segment_substitutions: usize,
    pub product_substitutions: usize,
    pub dropped_bad_date: usize,
    pub dropped_out_of_window: usize,
    pub dropped_bad_quantity: usize,
    pub dropped_bad_price: usize,
}

impl CleaningReport {
    /// Total number of default substitutions applied.
    pub fn total_substitutions(&self) -> usize {
        self.category_substitutions
            + self.region_substitutions
            + self.segment_substitutions
            + self.product_substitutions
    }

    /// Total number of records dropped for unrestorable invariants.
    pub fn total_dropped(&self) -> usize {
        self.dropped_bad_date
            + self.dropped_out_of_window
            + self.dropped_bad_quantity
            + self.dropped_bad_price
    }

    /// True when the input needed no corrections at all.
    pub fn is_untouched(&self) -> bool {
        self.duplicates_removed == 0 && self.total_substitutions() == 0 && self.total_dropped() == 0
    }
}

/// Error raised when a cleaned set still violates invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Number of records that could not be reconciled to the invariants
    Unreconciled { count: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Unreconciled { count } => {
                write!(f, "{} record(s) violate invariants after cleaning", count)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Cleans a raw record set into validated records plus a correction report.
///
/// The output satisfies every record invariant; callers that persist the
/// result should still run [`verify_invariants`] and abort on failure rather
/// than writing partial data.
pub fn clean(raw: Vec<RawRecord>, window: &DateWindow) -> (Vec<SalesRecord>, CleaningReport) {
    let mut report = CleaningReport {
        input_records: raw.len(),
        ..CleaningReport::default()
    };

    let mut seen_ids: HashSet<i64> = HashSet::new();
    let mut seen_tuples: HashSet<FieldTuple> = HashSet::new();
    let mut cleaned = Vec::with_capacity(raw.len());

    for record in raw {
        if !seen_ids.insert(record.id) || !seen_tuples.insert(field_tuple(&record)) {
            report.duplicates_removed += 1;
            continue;
        }

        let date = match record
            .transaction_date
            .as_deref()
            .and_then(|value| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok())
        {
            Some(date) => date,
            None => {
                report.dropped_bad_date += 1;
                continue;
            }
        };
        if !window.contains(date) {
            report.dropped_out_of_window += 1;
            continue;
        }

        let quantity = match record.quantity {
            Some(quantity) if quantity >= 1 && quantity <= i64::from(u32::MAX) => quantity as u32,
            _ => {
                report.dropped_bad_quantity += 1;
                continue;
            }
        };

        let unit_price = match record.unit_price {
            Some(price) if price > 0.0 && price.is_finite() => price,
            _ => {
                report.dropped_bad_price += 1;
                continue;
            }
        };

        let category = match record.category.as_deref().and_then(Category::parse) {
            Some(category) => category,
            None => {
                report.category_substitutions += 1;
                Category::Unknown
            }
        };
        let region = match record.region.as_deref().and_then(Region::parse) {
            Some(region) => region,
            None => {
                report.region_substitutions += 1;
                Region::Unknown
            }
        };
        let segment = match record.customer_segment.as_deref().and_then(Segment::parse) {
            Some(segment) => segment,
            None => {
                report.segment_substitutions += 1;
                Segment::Unknown
            }
        };

        let product_name = match record.product_name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => {
                report.product_substitutions += 1;
                UNLISTED_PRODUCT.to_string()
            }
        };

        cleaned.push(SalesRecord {
            id: record.id,
            transaction_date: date,
            category,
            product_name,
            quantity,
            unit_price,
            region,
            customer_segment: segment,
            revenue: quantity as f64 * unit_price,
        });
    }

    report.output_records = cleaned.len();
    (cleaned, report)
}

/// Verifies every record invariant on a cleaned set.
///
/// # Errors
/// Returns `ValidationError::Unreconciled` with the number of offending
/// records if any invariant does not hold. Initialization must abort rather
/// than persist when this fails.
pub fn verify_invariants(
    records: &[SalesRecord],
    window: &DateWindow,
) -> Result<(), ValidationError> {
    let mut ids: HashSet<i64> = HashSet::new();
    let mut bad = 0usize;

    for record in records {
        let valid = ids.insert(record.id)
            && record.quantity >= 1
            && record.unit_price > 0.0
            && record.unit_price.is_finite()
            && window.contains(record.transaction_date)
            && record.revenue == record.computed_revenue();
        if !valid {
            bad += 1;
        }
    }

    if bad > 0 {
        return Err(ValidationError::Unreconciled { count: bad });
    }
    Ok(())
}

/// Hashable projection of a raw record's non-id fields, used for
/// full-tuple duplicate detection. Prices compare by bit pattern.
type FieldTuple = (
    Option<String>,
    Option<String>,
    Option<String>,
    Option<i64>,
    Option<u64>,
    Option<String>,
    Option<String>,
);

fn field_tuple(record: &RawRecord) -> FieldTuple {
    (
        record.transaction_date.clone(),
        record.category.clone(),
        record.product_name.clone(),
        record.quantity,
        record.unit_price.map(f64::to_bits),
        record.region.clone(),
        record.customer_segment.clone(),
    )
}
