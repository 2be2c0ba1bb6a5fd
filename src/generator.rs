//! Synthetic sales data generation.
//!
//! Generation is deterministic for a fixed [`GeneratorConfig`]: the seed is
//! explicit configuration, never global state, so two runs with the same
//! config produce identical record sets.

use crate::catalog::{category_catalog, products_for, CategoryInfo};
use crate::record::{Category, DateWindow, RawRecord, Region, Segment};
use chrono::{Datelike, Duration, NaiveDate};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Quantity bounds for generated records (inclusive).
const QUANTITY_RANGE: std::ops::RangeInclusive<i64> = 1..=20;

/// How transaction dates are distributed across the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Seasonality {
    /// Every day in the window is equally likely.
    Uniform,
    /// Per-month relative weights (January first). Days inherit the weight
    /// of their calendar month, so heavier months receive proportionally
    /// more transactions.
    Monthly([f64; 12]),
}

impl Seasonality {
    /// Built-in profile with a Q4 holiday peak and a quiet late summer.
    pub fn holiday_peak() -> Self {
        Seasonality::Monthly([
            0.9, 0.8, 0.9, 1.0, 1.0, 1.1, 1.0, 0.9, 1.0, 1.1, 1.5, 1.8,
        ])
    }
}

/// Configuration for synthetic data generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// RNG seed. Identical seeds reproduce identical record sets.
    pub seed: u64,
    /// Number of records to generate.
    pub record_count: usize,
    /// Historical window transaction dates are sampled from.
    pub window: DateWindow,
    /// Date distribution across the window.
    pub seasonality: Seasonality,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            seed: 42,
            record_count: 1000,
            window: DateWindow::new(
                NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
                NaiveDate::from_ymd_opt(2025, 12, 31).expect("valid date"),
            ),
            seasonality: Seasonality::Uniform,
        }
    }
}

impl GeneratorConfig {
    /// Creates a config with uniform date distribution.
    pub fn new(seed: u64, record_count: usize, window: DateWindow) -> Self {
        GeneratorConfig {
            seed,
            record_count,
            window,
            seasonality: Seasonality::Uniform,
        }
    }
}

/// Errors that can occur when constructing or running a generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// Window end precedes window start, so no date can be sampled
    EmptyWindow,
    /// Seasonality weights are all zero or otherwise unusable
    InvalidWeights(String),
}

impl std::fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorError::EmptyWindow => write!(f, "Date window contains no days"),
            GeneratorError::InvalidWeights(msg) => {
                write!(f, "Invalid seasonality weights: {}", msg)
            }
        }
    }
}

impl std::error::Error for GeneratorError {}

/// Seeded synthetic sales record generator.
///
/// Sampling rules:
/// - transaction_date: uniform over the window, or weighted by calendar
///   month under [`Seasonality::Monthly`]
/// - category, region, segment: independent uniform draws from the closed
///   sets (a uniform weighting; the dimension sets themselves are fixed)
/// - quantity: uniform integer in 1..=20
/// - unit_price: uniform within the category's price band, rounded to cents
#[derive(Debug)]
pub struct SalesGenerator {
    config: GeneratorConfig,
    price_bands: HashMap<Category, (f64, f64)>,
}

impl SalesGenerator {
    /// Creates a generator for the given config.
    ///
    /// # Errors
    /// Returns `GeneratorError::EmptyWindow` if the window is inverted.
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        if config.window.start > config.window.end {
            return Err(GeneratorError::EmptyWindow);
        }
        let price_bands = category_catalog()
            .into_iter()
            .map(|CategoryInfo { category, price_min, price_max, .. }| {
                (category, (price_min, price_max))
            })
            .collect();
        Ok(SalesGenerator { config, price_bands })
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the configured number of raw records.
    ///
    /// Ids are assigned sequentially starting at 1. Every field is populated;
    /// the cleaner's missing-value handling exists for ingested data, not for
    /// generator output.
    ///
    /// # Errors
    /// Returns `GeneratorError::InvalidWeights` if a monthly profile assigns
    /// zero weight to every day in the window.
    pub fn generate(&self) -> Result<Vec<RawRecord>, GeneratorError> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let date_sampler = DateSampler::new(&self.config.window, &self.config.seasonality)?;

        let mut records = Vec::with_capacity(self.config.record_count);
        for i in 0..self.config.record_count {
            let date = date_sampler.sample(&mut rng);
            let category = Category::all()[rng.gen_range(0..Category::all().len())];
            let products = products_for(category);
            let product = products[rng.gen_range(0..products.len())];
            let quantity = rng.gen_range(QUANTITY_RANGE);
            let (price_min, price_max) = self.price_bands[&category];
            let unit_price = round_cents(rng.gen_range(price_min..price_max));
            let region = Region::all()[rng.gen_range(0..Region::all().len())];
            let segment = Segment::all()[rng.gen_range(0..Segment::all().len())];

            records.push(RawRecord {
                id: (i + 1) as i64,
                transaction_date: Some(date.format("%Y-%m-%d").to_string()),
                category: Some(category.as_str().to_string()),
                product_name: Some(product.to_string()),
                quantity: Some(quantity),
                unit_price: Some(unit_price),
                region: Some(region.as_str().to_string()),
                customer_segment: Some(segment.as_str().to_string()),
            });
        }

        Ok(records)
    }
}

/// Samples dates from a window, optionally weighted by month.
enum DateSampler {
    Uniform { start: NaiveDate, days: i64 },
    Weighted { start: NaiveDate, index: WeightedIndex<f64> },
}

impl DateSampler {
    fn new(window: &DateWindow, seasonality: &Seasonality) -> Result<Self, GeneratorError> {
        let days = window.num_days();
        match seasonality {
            Seasonality::Uniform => Ok(DateSampler::Uniform {
                start: window.start,
                days,
            }),
            Seasonality::Monthly(month_weights) => {
                let weights: Vec<f64> = (0..days)
                    .map(|offset| {
                        let date = window.start + Duration::days(offset);
                        month_weights[date.month0() as usize]
                    })
                    .collect();
                let index = WeightedIndex::new(&weights)
                    .map_err(|e| GeneratorError::InvalidWeights(e.to_string()))?;
                Ok(DateSampler::Weighted {
                    start: window.start,
                    index,
                })
            }
        }
    }

    fn sample(&self, rng: &mut StdRng) -> NaiveDate {
        match self {
            DateSampler::Uniform { start, days } => {
                *start + Duration::days(rng.gen_range(0..*days))
            }
            DateSampler::Weighted { start, index } => {
                *start + Duration::days(index.sample(rng) as i64)
            }
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
