//! Aggregation of filtered record sets.
//!
//! Every function here is a pure computation over a record slice: the store
//! query (filtering) happens upstream, so each record is visited exactly
//! once per aggregate and grouped outputs sum back to the ungrouped totals.
//! Empty inputs produce zero-valued summaries rather than errors.

use crate::record::{Category, SalesRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Ungrouped totals over a filtered record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub record_count: usize,
    pub total_revenue: f64,
    pub total_quantity: u64,
    /// Mean revenue per transaction; 0.0 for an empty set.
    pub avg_order_value: f64,
    pub unique_products: usize,
    pub unique_categories: usize,
}

/// Revenue accumulated on a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
}

/// Revenue accumulated in a calendar month ("YYYY-MM").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: f64,
}

/// Revenue and record count for one value of a grouping dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub label: String,
    pub revenue: f64,
    pub record_count: usize,
}

/// Per-category performance metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPerformance {
    pub category: Category,
    pub revenue: f64,
    pub units_sold: u64,
    pub transactions: usize,
    pub avg_unit_price: f64,
    pub avg_order_value: f64,
}

/// Computes ungrouped summary totals.
pub fn summarize(records: &[SalesRecord]) -> SalesSummary {
    if records.is_empty() {
        return SalesSummary::default();
    }

    let total_revenue: f64 = records.iter().map(|r| r.revenue).sum();
    let total_quantity: u64 = records.iter().map(|r| r.quantity as u64).sum();
    let products: HashSet<&str> = records.iter().map(|r| r.product_name.as_str()).collect();
    let categories: HashSet<Category> = records.iter().map(|r| r.category).collect();

    SalesSummary {
        record_count: records.len(),
        total_revenue,
        total_quantity,
        avg_order_value: total_revenue / records.len() as f64,
        unique_products: products.len(),
        unique_categories: categories.len(),
    }
}

/// Revenue grouped by day, ordered chronologically.
pub fn revenue_by_day(records: &[SalesRecord]) -> Vec<DailyRevenue> {
    let mut buckets: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        *buckets.entry(record.transaction_date).or_insert(0.0) += record.revenue;
    }
    buckets
        .into_iter()
        .map(|(date, revenue)| DailyRevenue { date, revenue })
        .collect()
}

/// Revenue grouped by calendar month, ordered chronologically.
pub fn revenue_by_month(records: &[SalesRecord]) -> Vec<MonthlyRevenue> {
    let mut buckets: BTreeMap<String, f64> = BTreeMap::new();
    for record in records {
        let month = record.transaction_date.format("%Y-%m").to_string();
        *buckets.entry(month).or_insert(0.0) += record.revenue;
    }
    buckets
        .into_iter()
        .map(|(month, revenue)| MonthlyRevenue { month, revenue })
        .collect()
}

/// Revenue and count grouped by category, descending by revenue.
pub fn breakdown_by_category(records: &[SalesRecord]) -> Vec<BreakdownRow> {
    breakdown(records, |r| r.category.as_str())
}

/// Revenue and count grouped by region, descending by revenue.
pub fn breakdown_by_region(records: &[SalesRecord]) -> Vec<BreakdownRow> {
    breakdown(records, |r| r.region.as_str())
}

/// Revenue and count grouped by customer segment, descending by revenue.
pub fn breakdown_by_segment(records: &[SalesRecord]) -> Vec<BreakdownRow> {
    breakdown(records, |r| r.customer_segment.as_str())
}

/// Top `n` products by revenue, descending.
pub fn top_products(records: &[SalesRecord], n: usize) -> Vec<BreakdownRow> {
    let mut rows = breakdown(records, |r| r.product_name.as_str());
    rows.truncate(n);
    rows
}

/// Detailed per-category metrics, descending by revenue.
pub fn category_performance(records: &[SalesRecord]) -> Vec<CategoryPerformance> {
    struct Acc {
        revenue: f64,
        units: u64,
        transactions: usize,
        price_sum: f64,
    }

    let mut buckets: BTreeMap<Category, Acc> = BTreeMap::new();
    for record in records {
        let acc = buckets.entry(record.category).or_insert(Acc {
            revenue: 0.0,
            units: 0,
            transactions: 0,
            price_sum: 0.0,
        });
        acc.revenue += record.revenue;
        acc.units += record.quantity as u64;
        acc.transactions += 1;
        acc.price_sum += record.unit_price;
    }

    let mut rows: Vec<CategoryPerformance> = buckets
        .into_iter()
        .map(|(category, acc)| CategoryPerformance {
            category,
            revenue: acc.revenue,
            units_sold: acc.units,
            transactions: acc.transactions,
            avg_unit_price: acc.price_sum / acc.transactions as f64,
            avg_order_value: acc.revenue / acc.transactions as f64,
        })
        .collect();
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    rows
}

fn breakdown<'a>(
    records: &'a [SalesRecord],
    key: impl Fn(&'a SalesRecord) -> &'a str,
) -> Vec<BreakdownRow> {
    let mut buckets: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for record in records {
        let entry = buckets.entry(key(record)).or_insert((0.0, 0));
        entry.0 += record.revenue;
        entry.1 += 1;
    }
    let mut rows: Vec<BreakdownRow> = buckets
        .into_iter()
        .map(|(label, (revenue, record_count))| BreakdownRow {
            label: label.to_string(),
            revenue,
            record_count,
        })
        .collect();
    // Stable order for equal revenues: the BTreeMap already sorted labels.
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    rows
}
