//! CSV export of records and aggregates.
//!
//! The export destination is a plain directory of CSV files. The summary
//! report mirrors the multi-sheet workbook idea as one directory per report
//! with one CSV per sheet, the generation timestamp embedded in the name.
//! Export failures never disturb in-memory state; the caller just loses the
//! requested file.

use crate::aggregate::{self, BreakdownRow};
use crate::record::SalesRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised while writing export files.
#[derive(Debug)]
pub enum ExportError {
    /// Destination path could not be created or written
    Io(String),
    /// CSV serialization failed
    Csv(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(msg) => write!(f, "Export I/O error: {}", msg),
            ExportError::Csv(msg) => write!(f, "CSV error: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err.to_string())
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        // csv wraps I/O errors; report them as such so the caller sees the
        // unwritable-destination case distinctly.
        if err.is_io_error() {
            ExportError::Io(err.to_string())
        } else {
            ExportError::Csv(err.to_string())
        }
    }
}

/// Writes CSV files into a configured output directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    out_dir: PathBuf,
}

impl Exporter {
    /// Creates an exporter rooted at `out_dir`. The directory is created on
    /// first use, not here.
    pub fn new<P: AsRef<Path>>(out_dir: P) -> Self {
        Exporter {
            out_dir: out_dir.as_ref().to_path_buf(),
        }
    }

    /// Exports filtered raw records as a flat CSV.
    ///
    /// Returns the path of the written file,
    /// `export_<YYYYMMDD_HHMMSS>.csv` under the output directory.
    pub fn export_records(
        &self,
        records: &[SalesRecord],
        generated_at: DateTime<Utc>,
    ) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self
            .out_dir
            .join(format!("export_{}.csv", timestamp(generated_at)));
        write_csv(&path, records)?;
        Ok(path)
    }

    /// Exports a single breakdown as CSV, named after the breakdown.
    pub fn export_breakdown(
        &self,
        name: &str,
        rows: &[BreakdownRow],
        generated_at: DateTime<Utc>,
    ) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self
            .out_dir
            .join(format!("{}_{}.csv", name, timestamp(generated_at)));
        write_csv(&path, rows)?;
        Ok(path)
    }

    /// Writes the full summary report: a timestamped directory holding one
    /// CSV per breakdown from the aggregation engine.
    ///
    /// Returns the report directory path.
    pub fn export_summary_report(
        &self,
        records: &[SalesRecord],
        generated_at: DateTime<Utc>,
    ) -> Result<PathBuf, ExportError> {
        let report_dir = self
            .out_dir
            .join(format!("summary_report_{}", timestamp(generated_at)));
        fs::create_dir_all(&report_dir)?;

        write_csv(
            &report_dir.join("summary.csv"),
            &[aggregate::summarize(records)],
        )?;
        write_csv(
            &report_dir.join("revenue_by_category.csv"),
            &aggregate::breakdown_by_category(records),
        )?;
        write_csv(
            &report_dir.join("revenue_by_region.csv"),
            &aggregate::breakdown_by_region(records),
        )?;
        write_csv(
            &report_dir.join("revenue_by_segment.csv"),
            &aggregate::breakdown_by_segment(records),
        )?;
        write_csv(
            &report_dir.join("daily_revenue.csv"),
            &aggregate::revenue_by_day(records),
        )?;
        write_csv(
            &report_dir.join("monthly_revenue.csv"),
            &aggregate::revenue_by_month(records),
        )?;
        write_csv(
            &report_dir.join("top_products.csv"),
            &aggregate::top_products(records, 20),
        )?;
        write_csv(
            &report_dir.join("category_performance.csv"),
            &aggregate::category_performance(records),
        )?;

        Ok(report_dir)
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Category, Region, Segment};
    use chrono::{NaiveDate, TimeZone};

    fn sample_records() -> Vec<SalesRecord> {
        vec![
            SalesRecord {
                id: 1,
                transaction_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                category: Category::Electronics,
                product_name: "Laptop".to_string(),
                quantity: 2,
                unit_price: 300.0,
                region: Region::Europe,
                customer_segment: Segment::Consumer,
                revenue: 600.0,
            },
            SalesRecord {
                id: 2,
                transaction_date: NaiveDate::from_ymd_opt(2024, 2, 6).unwrap(),
                category: Category::Clothing,
                product_name: "Jacket".to_string(),
                quantity: 1,
                unit_price: 80.0,
                region: Region::Oceania,
                customer_segment: Segment::Corporate,
                revenue: 80.0,
            },
        ]
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dashboard_export_{}_{}", tag, std::process::id()))
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 45).unwrap()
    }

    #[test]
    fn test_export_records_writes_timestamped_csv() {
        let dir = scratch_dir("records");
        let exporter = Exporter::new(&dir);
        let path = exporter.export_records(&sample_records(), fixed_time()).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "export_20240601_123045.csv"
        );
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("id,transaction_date,category"));
        assert!(contents.contains("Laptop"));
        assert!(contents.contains("2024-02-06,Clothing,Jacket,1,80.0,Oceania,Corporate,80.0"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_summary_report_contains_one_csv_per_breakdown() {
        let dir = scratch_dir("report");
        let exporter = Exporter::new(&dir);
        let report_dir = exporter
            .export_summary_report(&sample_records(), fixed_time())
            .unwrap();

        assert!(report_dir.ends_with("summary_report_20240601_123045"));
        for sheet in [
            "summary.csv",
            "revenue_by_category.csv",
            "revenue_by_region.csv",
            "revenue_by_segment.csv",
            "daily_revenue.csv",
            "monthly_revenue.csv",
            "top_products.csv",
            "category_performance.csv",
        ] {
            assert!(report_dir.join(sheet).exists(), "missing {}", sheet);
        }

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unwritable_destination_reports_io_error() {
        // A file where the directory should be makes creation fail.
        let blocker = scratch_dir("blocked");
        fs::create_dir_all(&blocker).unwrap();
        let file_path = blocker.join("not_a_dir");
        fs::write(&file_path, b"x").unwrap();

        let exporter = Exporter::new(&file_path);
        let result = exporter.export_records(&sample_records(), fixed_time());
        assert!(matches!(result, Err(ExportError::Io(_))));

        fs::remove_dir_all(&blocker).unwrap();
    }

    #[test]
    fn test_export_failure_leaves_records_intact() {
        let records = sample_records();
        let exporter = Exporter::new("/proc/definitely/not/writable");
        let _ = exporter.export_records(&records, fixed_time());
        assert_eq!(records.len(), 2);
    }
}
