use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product category dimension.
///
/// Closed set: every persisted record carries exactly one of these values.
/// `Unknown` is the documented substitution target for missing or
/// unrecognized category values and is never produced by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    #[serde(rename = "Food & Beverage")]
    FoodAndBeverage,
    #[serde(rename = "Home & Garden")]
    HomeAndGarden,
    #[serde(rename = "Sports & Outdoors")]
    SportsAndOutdoors,
    Unknown,
}

impl Category {
    /// Returns the display/storage form of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::FoodAndBeverage => "Food & Beverage",
            Category::HomeAndGarden => "Home & Garden",
            Category::SportsAndOutdoors => "Sports & Outdoors",
            Category::Unknown => "Unknown",
        }
    }

    /// Parses a stored category string. Leading/trailing whitespace is ignored.
    ///
    /// Returns `None` for values outside the closed set, including `Unknown`
    /// itself when parsing raw input (callers decide whether to substitute).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Electronics" => Some(Category::Electronics),
            "Clothing" => Some(Category::Clothing),
            "Food & Beverage" => Some(Category::FoodAndBeverage),
            "Home & Garden" => Some(Category::HomeAndGarden),
            "Sports & Outdoors" => Some(Category::SportsAndOutdoors),
            "Unknown" => Some(Category::Unknown),
            _ => None,
        }
    }

    /// All real categories, excluding the `Unknown` fallback.
    pub fn all() -> &'static [Category] {
        &[
            Category::Electronics,
            Category::Clothing,
            Category::FoodAndBeverage,
            Category::HomeAndGarden,
            Category::SportsAndOutdoors,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sales region dimension. Closed set with `Unknown` fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "North America")]
    NorthAmerica,
    Europe,
    #[serde(rename = "Asia Pacific")]
    AsiaPacific,
    Africa,
    #[serde(rename = "Latin America")]
    LatinAmerica,
    #[serde(rename = "Middle East")]
    MiddleEast,
    Oceania,
    Unknown,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "North America",
            Region::Europe => "Europe",
            Region::AsiaPacific => "Asia Pacific",
            Region::Africa => "Africa",
            Region::LatinAmerica => "Latin America",
            Region::MiddleEast => "Middle East",
            Region::Oceania => "Oceania",
            Region::Unknown => "Unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "North America" => Some(Region::NorthAmerica),
            "Europe" => Some(Region::Europe),
            "Asia Pacific" => Some(Region::AsiaPacific),
            "Africa" => Some(Region::Africa),
            "Latin America" => Some(Region::LatinAmerica),
            "Middle East" => Some(Region::MiddleEast),
            "Oceania" => Some(Region::Oceania),
            "Unknown" => Some(Region::Unknown),
            _ => None,
        }
    }

    /// All real regions, excluding the `Unknown` fallback.
    pub fn all() -> &'static [Region] {
        &[
            Region::NorthAmerica,
            Region::Europe,
            Region::AsiaPacific,
            Region::Africa,
            Region::LatinAmerica,
            Region::MiddleEast,
            Region::Oceania,
        ]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Customer segment dimension. Closed set with `Unknown` fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Segment {
    Consumer,
    Corporate,
    #[serde(rename = "Home Office")]
    HomeOffice,
    Unknown,
}

impl Segment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Segment::Consumer => "Consumer",
            Segment::Corporate => "Corporate",
            Segment::HomeOffice => "Home Office",
            Segment::Unknown => "Unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Consumer" => Some(Segment::Consumer),
            "Corporate" => Some(Segment::Corporate),
            "Home Office" => Some(Segment::HomeOffice),
            "Unknown" => Some(Segment::Unknown),
            _ => None,
        }
    }

    /// All real segments, excluding the `Unknown` fallback.
    pub fn all() -> &'static [Segment] {
        &[Segment::Consumer, Segment::Corporate, Segment::HomeOffice]
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive historical window that all persisted transaction dates must
/// fall within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// Start date (inclusive)
    pub start: NaiveDate,
    /// End date (inclusive)
    pub end: NaiveDate,
}

impl DateWindow {
    /// Creates a new window. Callers are expected to pass `start <= end`;
    /// an inverted window simply contains no dates.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateWindow { start, end }
    }

    /// Returns `true` if `date` falls inside the window (both ends inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days covered by the window, inclusive of both ends.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// An unvalidated sales record as produced by generation or ingestion.
///
/// Every field that the cleaner may need to repair or reject is optional or
/// stringly typed here. The cleaner converts raw records into
/// [`SalesRecord`]s, which carry the validated representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: i64,
    /// ISO 8601 date string ("YYYY-MM-DD"), if present.
    pub transaction_date: Option<String>,
    pub category: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<i64>,
    pub unit_price: Option<f64>,
    pub region: Option<String>,
    pub customer_segment: Option<String>,
}

/// A validated sales transaction.
///
/// Invariants (enforced by the cleaner, assumed everywhere else):
/// - `quantity >= 1`
/// - `unit_price > 0.0`
/// - `transaction_date` lies inside the configured historical window
/// - `revenue == quantity as f64 * unit_price`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub id: i64,
    pub transaction_date: NaiveDate,
    pub category: Category,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub region: Region,
    pub customer_segment: Segment,
    /// Derived, never stored independently of quantity and unit price.
    pub revenue: f64,
}

impl SalesRecord {
    /// Recomputes revenue from quantity and unit price.
    pub fn computed_revenue(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for category in Category::all() {
            assert_eq!(Category::parse(category.as_str()), Some(*category));
        }
    }

    #[test]
    fn test_category_parse_trims_whitespace() {
        assert_eq!(Category::parse("  Electronics "), Some(Category::Electronics));
    }

    #[test]
    fn test_category_parse_rejects_unrecognized() {
        assert_eq!(Category::parse("Groceries"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn test_all_lists_exclude_unknown() {
        assert!(!Category::all().contains(&Category::Unknown));
        assert!(!Region::all().contains(&Region::Unknown));
        assert!(!Segment::all().contains(&Segment::Unknown));
    }

    #[test]
    fn test_region_round_trip() {
        for region in Region::all() {
            assert_eq!(Region::parse(region.as_str()), Some(*region));
        }
    }

    #[test]
    fn test_segment_round_trip() {
        for segment in Segment::all() {
            assert_eq!(Segment::parse(segment.as_str()), Some(*segment));
        }
        assert_eq!(Segment::parse("Unknown"), Some(Segment::Unknown));
    }

    #[test]
    fn test_computed_revenue() {
        let record = SalesRecord {
            id: 1,
            transaction_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            category: Category::Electronics,
            product_name: "Laptop".to_string(),
            quantity: 3,
            unit_price: 199.99,
            region: Region::Europe,
            customer_segment: Segment::Consumer,
            revenue: 599.97,
        };
        assert!((record.computed_revenue() - 599.97).abs() < 1e-9);
    }
}
