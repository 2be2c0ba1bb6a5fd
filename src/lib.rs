pub mod record;
pub mod catalog;
pub mod generator;
pub mod cleaner;
pub mod filter;
pub mod store;
pub mod aggregate;
pub mod export;
pub mod bootstrap;
pub mod server;


pub use record::{Category, DateWindow, RawRecord, Region, SalesRecord, Segment};
pub use catalog::{category_catalog, products_for, region_catalog, CategoryInfo, RegionInfo};
pub use generator::{GeneratorConfig, GeneratorError, SalesGenerator, Seasonality};
pub use cleaner::{clean, verify_invariants, CleaningReport, ValidationError};
pub use filter::{DateFilter, DatePreset, FilterError, FilterSpec, ResolvedFilter};
pub use store::{SalesStore, StoreError};
pub use aggregate::{
    breakdown_by_category,
    breakdown_by_region,
    breakdown_by_segment,
    category_performance,
    revenue_by_day,
    revenue_by_month,
    summarize,
    top_products,
    BreakdownRow,
    CategoryPerformance,
    DailyRevenue,
    MonthlyRevenue,
    SalesSummary,
};
pub use export::{ExportError, Exporter};
pub use bootstrap::{initialize_store, InitError, InitReport};
pub use server::{create_router, run_server, ApiError, AppState, ServerConfig};
