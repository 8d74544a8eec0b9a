//! Best-effort batch generation.
//!
//! Each row is validated, generated, built and exported on its own. A row
//! that fails at any stage is logged and reported in
//! [`BatchReport::skipped`]; the rest of the batch carries on.

use std::collections::HashMap;

use partgen_profile::ProfileGenerator;

use crate::kernel::{build_solid, GeometryKernel};
use crate::{BomEntry, InputRow, PartError, PartRecord, Result};

/// A row that produced no part.
#[derive(Debug)]
pub struct Skipped {
    /// Source line of the row.
    pub line: u64,
    /// Part name, if the row got far enough to have one.
    pub name: Option<String>,
    /// Why it was skipped.
    pub error: PartError,
}

/// Outcome of [`run_batch`].
#[derive(Debug, Default)]
pub struct BatchReport {
    /// BOM lines for generated parts, in input order.
    pub generated: Vec<BomEntry>,
    /// Rows that failed, in input order.
    pub skipped: Vec<Skipped>,
}

/// Generate every usable row with `kernel`, calling `export` on each built
/// solid.
///
/// Names repeated within a batch get a `_2`, `_3`, ... suffix so exports do
/// not overwrite each other.
pub fn run_batch<K, F>(
    generator: &ProfileGenerator,
    kernel: &mut K,
    rows: Vec<InputRow>,
    mut export: F,
) -> BatchReport
where
    K: GeometryKernel + ?Sized,
    F: FnMut(&mut K, &PartRecord, K::Solid) -> Result<()>,
{
    let mut report = BatchReport::default();
    let mut seen: HashMap<String, u32> = HashMap::new();

    for InputRow { line, record } in rows {
        let mut record = match record {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!("Skipping line {}: {}", line, error);
                report.skipped.push(Skipped {
                    line,
                    name: None,
                    error,
                });
                continue;
            }
        };

        let count = seen.entry(record.name.clone()).or_insert(0);
        *count += 1;
        if *count > 1 {
            record.name = format!("{}_{}", record.name, count);
        }

        match generate_one(generator, kernel, &record, &mut export) {
            Ok(()) => {
                tracing::info!("Generated {} (x{})", record.name, record.quantity);
                report
                    .generated
                    .push(BomEntry::from_record(&record, generator.config()));
            }
            Err(error) => {
                tracing::warn!(
                    "Skipping {} at line {} ({}): {}",
                    record.name,
                    line,
                    record.spec.describe(),
                    error
                );
                report.skipped.push(Skipped {
                    line,
                    name: Some(record.name),
                    error,
                });
            }
        }
    }

    tracing::debug!(
        "Batch finished: {} generated, {} skipped",
        report.generated.len(),
        report.skipped.len()
    );
    report
}

fn generate_one<K, F>(
    generator: &ProfileGenerator,
    kernel: &mut K,
    record: &PartRecord,
    export: &mut F,
) -> Result<()>
where
    K: GeometryKernel + ?Sized,
    F: FnMut(&mut K, &PartRecord, K::Solid) -> Result<()>,
{
    let request = generator.generate(&record.spec)?;
    tracing::debug!(
        "{}: {} boolean steps, height {}",
        record.name,
        request.steps.len(),
        request.height()
    );
    let solid = build_solid(kernel, &request)?;
    export(kernel, record, solid)
}
