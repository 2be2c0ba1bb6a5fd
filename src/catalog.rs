//! Static reference data: region and category lookup rows.
//!
//! These are immutable after initialization. The category rows also carry the
//! per-category unit-price band the generator samples from, so that price
//! levels stay realistic per category (Electronics above Food & Beverage).

use crate::record::{Category, Region};
use serde::{Deserialize, Serialize};

/// Reference row for a sales region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionInfo {
    pub region: Region,
    pub territory: String,
    pub population: i64,
    pub avg_income: f64,
}

/// Reference row for a product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub category: Category,
    pub description: String,
    pub margin_percentage: f64,
    /// Inclusive lower bound for generated unit prices in this category.
    pub price_min: f64,
    /// Exclusive upper bound for generated unit prices in this category.
    pub price_max: f64,
}

/// Returns the full region catalog, one row per real region.
pub fn region_catalog() -> Vec<RegionInfo> {
    let rows = [
        (Region::NorthAmerica, "USA/Canada/Mexico", 580_000_000, 68_000.0),
        (Region::Europe, "EU & UK", 750_000_000, 48_000.0),
        (Region::AsiaPacific, "APAC Region", 4_500_000_000, 38_000.0),
        (Region::Africa, "African Continent", 1_450_000_000, 22_000.0),
        (Region::LatinAmerica, "LATAM", 670_000_000, 30_000.0),
        (Region::MiddleEast, "MENA Region", 450_000_000, 45_000.0),
        (Region::Oceania, "Australia/NZ/Pacific", 45_000_000, 52_000.0),
    ];
    rows.iter()
        .map(|(region, territory, population, avg_income)| RegionInfo {
            region: *region,
            territory: territory.to_string(),
            population: *population,
            avg_income: *avg_income,
        })
        .collect()
}

/// Returns the full category catalog, one row per real category.
pub fn category_catalog() -> Vec<CategoryInfo> {
    let rows = [
        (
            Category::Electronics,
            "Electronic devices and accessories",
            25.5,
            80.0,
            1500.0,
        ),
        (Category::Clothing, "Apparel and fashion items", 45.0, 15.0, 180.0),
        (
            Category::FoodAndBeverage,
            "Food and drink products",
            20.0,
            2.0,
            45.0,
        ),
        (
            Category::HomeAndGarden,
            "Home improvement and garden items",
            35.0,
            20.0,
            600.0,
        ),
        (
            Category::SportsAndOutdoors,
            "Sports equipment and outdoor gear",
            30.0,
            10.0,
            450.0,
        ),
    ];
    rows.iter()
        .map(
            |(category, description, margin, price_min, price_max)| CategoryInfo {
                category: *category,
                description: description.to_string(),
                margin_percentage: *margin,
                price_min: *price_min,
                price_max: *price_max,
            },
        )
        .collect()
}

/// Product names offered within a category.
///
/// Free text on the record, but generation draws from these fixed lists.
pub fn products_for(category: Category) -> &'static [&'static str] {
    match category {
        Category::Electronics => &["Laptop", "Smartphone", "Tablet", "Headphones", "Camera"],
        Category::Clothing => &["T-Shirt", "Jeans", "Jacket", "Sneakers", "Dress"],
        Category::FoodAndBeverage => {
            &["Coffee", "Tea", "Snacks", "Bottled Water", "Energy Drink"]
        }
        Category::HomeAndGarden => &["Plant", "Furniture", "Cookware", "Bedding", "Decor"],
        Category::SportsAndOutdoors => {
            &["Yoga Mat", "Dumbbell", "Bicycle", "Tent", "Running Shoes"]
        }
        Category::Unknown => &["Unlisted Item"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_catalog_covers_all_regions() {
        let catalog = region_catalog();
        assert_eq!(catalog.len(), Region::all().len());
        for region in Region::all() {
            assert!(catalog.iter().any(|row| row.region == *region));
        }
    }

    #[test]
    fn test_category_catalog_covers_all_categories() {
        let catalog = category_catalog();
        assert_eq!(catalog.len(), Category::all().len());
        for category in Category::all() {
            assert!(catalog.iter().any(|row| row.category == *category));
        }
    }

    #[test]
    fn test_price_bands_are_positive_and_ordered() {
        for row in category_catalog() {
            assert!(row.price_min > 0.0);
            assert!(row.price_max > row.price_min);
        }
    }

    #[test]
    fn test_electronics_priced_above_food() {
        let catalog = category_catalog();
        let electronics = catalog
            .iter()
            .find(|row| row.category == Category::Electronics)
            .unwrap();
        let food = catalog
            .iter()
            .find(|row| row.category == Category::FoodAndBeverage)
            .unwrap();
        assert!(electronics.price_min > food.price_min);
        assert!(electronics.price_max > food.price_max);
    }

    #[test]
    fn test_every_category_has_products() {
        for category in Category::all() {
            assert!(!products_for(*category).is_empty());
        }
    }
}
