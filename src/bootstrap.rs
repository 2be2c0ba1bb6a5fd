//! Store initialization: generate, clean, verify, persist.
//!
//! This is the single write path. Verification runs before anything touches
//! the store, so a failed run never leaves partial or inconsistent data
//! behind; re-running against a populated store truncates and regenerates.

use crate::catalog;
use crate::cleaner::{self, CleaningReport, ValidationError};
use crate::generator::{GeneratorConfig, GeneratorError, SalesGenerator};
use crate::store::{SalesStore, StoreError};
use serde::{Deserialize, Serialize};

/// Outcome of a completed initialization run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitReport {
    /// Records the generator produced
    pub generated: usize,
    /// Records persisted after cleaning
    pub persisted: usize,
    /// Corrections the cleaner applied
    pub cleaning: CleaningReport,
}

/// Errors raised by the initialization pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum InitError {
    Generator(GeneratorError),
    Validation(ValidationError),
    Store(StoreError),
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitError::Generator(err) => write!(f, "Generation failed: {}", err),
            InitError::Validation(err) => {
                write!(f, "Validation failed, nothing persisted: {}", err)
            }
            InitError::Store(err) => write!(f, "Store write failed: {}", err),
        }
    }
}

impl std::error::Error for InitError {}

impl From<GeneratorError> for InitError {
    fn from(err: GeneratorError) -> Self {
        InitError::Generator(err)
    }
}

impl From<ValidationError> for InitError {
    fn from(err: ValidationError) -> Self {
        InitError::Validation(err)
    }
}

impl From<StoreError> for InitError {
    fn from(err: StoreError) -> Self {
        InitError::Store(err)
    }
}

/// Runs the full initialization pipeline against `store`.
///
/// Generator output is cleaned, the cleaned set is verified against every
/// record invariant, and only then is the store truncated and reloaded
/// together with the reference catalogs.
///
/// # Errors
/// Returns `InitError::Validation` (and persists nothing) if the cleaned
/// set still violates invariants; generator and store errors pass through.
pub fn initialize_store(
    store: &mut SalesStore,
    config: &GeneratorConfig,
) -> Result<InitReport, InitError> {
    tracing::info!(
        records = config.record_count,
        seed = config.seed,
        start = %config.window.start,
        end = %config.window.end,
        "generating synthetic sales data"
    );

    let generator = SalesGenerator::new(config.clone())?;
    let raw = generator.generate()?;
    let generated = raw.len();

    let (records, cleaning) = cleaner::clean(raw, &config.window);
    if !cleaning.is_untouched() {
        tracing::warn!(
            duplicates = cleaning.duplicates_removed,
            substitutions = cleaning.total_substitutions(),
            dropped = cleaning.total_dropped(),
            "cleaner applied corrections to generated data"
        );
    }

    cleaner::verify_invariants(&records, &config.window)?;

    store.initialize(
        &records,
        &catalog::region_catalog(),
        &catalog::category_catalog(),
    )?;

    tracing::info!(persisted = records.len(), "store initialized");
    Ok(InitReport {
        generated,
        persisted: records.len(),
        cleaning,
    })
}
