use crate::catalog::{CategoryInfo, RegionInfo};
use crate::filter::ResolvedFilter;
use crate::record::{Category, Region, SalesRecord, Segment};
use chrono::NaiveDate;
use rusqlite::{params_from_iter, Connection};
use std::path::Path;

/// Errors raised by the persisted store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Store file missing or holding no transactions
    NotInitialized,
    /// Underlying SQLite error
    Sqlite(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotInitialized => write!(
                f,
                "Store is not initialized; run the init-db binary (or POST /init) to generate data"
            ),
            StoreError::Sqlite(msg) => write!(f, "SQLite error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Sqlite(err.to_string())
    }
}

/// SQLite-backed store for sales transactions and reference lookups.
///
/// Owns the connection; callers pass the store (and thus the connection)
/// explicitly rather than reaching for process-wide state. Writes happen
/// only inside [`SalesStore::initialize`]; every other operation reads.
#[derive(Debug)]
pub struct SalesStore {
    conn: Connection,
}

impl SalesStore {
    /// Opens (creating if necessary) a file-based store.
    ///
    /// # Errors
    /// Returns an error if the connection cannot be established or the
    /// schema cannot be created.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(db_path)?;
        let store = SalesStore { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Opens an in-memory store. Useful for testing.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = SalesStore { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Ensures the schema exists, creating tables and indexes if missing.
    fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY,
                transaction_date TEXT NOT NULL,
                category TEXT NOT NULL,
                product_name TEXT NOT NULL,
                quantity INTEGER NOT NULL,
                unit_price REAL NOT NULL,
                region TEXT NOT NULL,
                customer_segment TEXT NOT NULL,
                revenue REAL NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS regions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                region_name TEXT NOT NULL UNIQUE,
                territory TEXT NOT NULL,
                population INTEGER NOT NULL,
                avg_income REAL NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category_name TEXT NOT NULL UNIQUE,
                description TEXT NOT NULL,
                margin_percentage REAL NOT NULL,
                price_min REAL NOT NULL,
                price_max REAL NOT NULL
            )",
            [],
        )?;

        for index in [
            "CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(transaction_date)",
            "CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category)",
            "CREATE INDEX IF NOT EXISTS idx_transactions_region ON transactions(region)",
            "CREATE INDEX IF NOT EXISTS idx_transactions_segment ON transactions(customer_segment)",
        ] {
            self.conn.execute(index, [])?;
        }

        Ok(())
    }

    /// Checks if a table exists in the database.
    fn table_exists(&self, table_name: &str) -> Result<bool, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
        Ok(stmt.exists([table_name])?)
    }

    /// Returns `true` when the store holds at least one transaction.
    pub fn is_initialized(&self) -> Result<bool, StoreError> {
        if !self.table_exists("transactions")? {
            return Ok(false);
        }
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Fails with `StoreError::NotInitialized` unless data has been loaded.
    fn ensure_initialized(&self) -> Result<(), StoreError> {
        if self.is_initialized()? {
            Ok(())
        } else {
            Err(StoreError::NotInitialized)
        }
    }

    /// Replaces the store contents with the given records and reference rows.
    ///
    /// Truncate-and-reload inside a single transaction: against an empty
    /// store this is a plain load, against an existing one it is
    /// destructive. Nothing is persisted if any insert fails.
    pub fn initialize(
        &mut self,
        records: &[SalesRecord],
        regions: &[RegionInfo],
        categories: &[CategoryInfo],
    ) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;

        tx.execute("DELETE FROM transactions", [])?;
        tx.execute("DELETE FROM regions", [])?;
        tx.execute("DELETE FROM categories", [])?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO transactions
                 (id, transaction_date, category, product_name, quantity,
                  unit_price, region, customer_segment, revenue)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for record in records {
                stmt.execute(rusqlite::params![
                    record.id,
                    record.transaction_date.format("%Y-%m-%d").to_string(),
                    record.category.as_str(),
                    record.product_name,
                    record.quantity,
                    record.unit_price,
                    record.region.as_str(),
                    record.customer_segment.as_str(),
                    record.revenue,
                ])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO regions (region_name, territory, population, avg_income)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for region in regions {
                stmt.execute(rusqlite::params![
                    region.region.as_str(),
                    region.territory,
                    region.population,
                    region.avg_income,
                ])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO categories
                 (category_name, description, margin_percentage, price_min, price_max)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for category in categories {
                stmt.execute(rusqlite::params![
                    category.category.as_str(),
                    category.description,
                    category.margin_percentage,
                    category.price_min,
                    category.price_max,
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Queries transactions matching the resolved filter, ordered by date
    /// then id.
    ///
    /// # Errors
    /// Returns `StoreError::NotInitialized` when the store holds no data.
    pub fn query_records(&self, filter: &ResolvedFilter) -> Result<Vec<SalesRecord>, StoreError> {
        self.ensure_initialized()?;

        let (clause, params) = filter.to_sql();
        let sql = if clause.is_empty() {
            "SELECT id, transaction_date, category, product_name, quantity,
                    unit_price, region, customer_segment, revenue
             FROM transactions ORDER BY transaction_date, id"
                .to_string()
        } else {
            format!(
                "SELECT id, transaction_date, category, product_name, quantity,
                        unit_price, region, customer_segment, revenue
                 FROM transactions WHERE {} ORDER BY transaction_date, id",
                clause
            )
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(params), row_to_record)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Total number of persisted transactions.
    pub fn record_count(&self) -> Result<usize, StoreError> {
        self.ensure_initialized()?;
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Reads back the region reference rows.
    pub fn region_catalog(&self) -> Result<Vec<RegionInfo>, StoreError> {
        self.ensure_initialized()?;
        let mut stmt = self.conn.prepare(
            "SELECT region_name, territory, population, avg_income FROM regions ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            let name: String = row.get(0)?;
            let region = Region::parse(&name).ok_or_else(|| bad_column(0, &name))?;
            Ok(RegionInfo {
                region,
                territory: row.get(1)?,
                population: row.get(2)?,
                avg_income: row.get(3)?,
            })
        })?;
        collect_rows(rows)
    }

    /// Reads back the category reference rows.
    pub fn category_catalog(&self) -> Result<Vec<CategoryInfo>, StoreError> {
        self.ensure_initialized()?;
        let mut stmt = self.conn.prepare(
            "SELECT category_name, description, margin_percentage, price_min, price_max
             FROM categories ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            let name: String = row.get(0)?;
            let category = Category::parse(&name).ok_or_else(|| bad_column(0, &name))?;
            Ok(CategoryInfo {
                category,
                description: row.get(1)?,
                margin_percentage: row.get(2)?,
                price_min: row.get(3)?,
                price_max: row.get(4)?,
            })
        })?;
        collect_rows(rows)
    }

    /// Returns a reference to the underlying SQLite connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<SalesRecord> {
    let date_str: String = row.get(1)?;
    let transaction_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| bad_column(1, &date_str))?;

    let category_str: String = row.get(2)?;
    let category = Category::parse(&category_str).ok_or_else(|| bad_column(2, &category_str))?;

    let region_str: String = row.get(6)?;
    let region = Region::parse(&region_str).ok_or_else(|| bad_column(6, &region_str))?;

    let segment_str: String = row.get(7)?;
    let customer_segment =
        Segment::parse(&segment_str).ok_or_else(|| bad_column(7, &segment_str))?;

    Ok(SalesRecord {
        id: row.get(0)?,
        transaction_date,
        category,
        product_name: row.get(3)?,
        quantity: row.get(4)?,
        unit_price: row.get(5)?,
        region,
        customer_segment,
        revenue: row.get(8)?,
    })
}

fn bad_column(index: usize, value: &str) -> rusqlite::Error {
    rusqlite::Error::InvalidColumnType(
        index,
        format!("Unrecognized stored value: {}", value),
        rusqlite::types::Type::Text,
    )
}

fn collect_rows<T>(
    rows: impl Iterator<Item = rusqlite::Result<T>>,
) -> Result<Vec<T>, StoreError> {
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
