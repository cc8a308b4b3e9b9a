//! Output module: the Result Sink
//!
//! This module handles:
//! - Dropping duplicate records by `(name, sku)`
//! - Writing the table as JSON, CSV and XLSX
//! - Recording crawl statistics

pub mod stats;
mod traits;
mod writer;

pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputResult, RecordSink};
pub use writer::{write_csv, write_json, write_xlsx, TabularWriter};

use crate::record::BookRecord;
use std::collections::HashSet;
use std::path::PathBuf;

/// What the final write produced
#[derive(Debug, Clone, Default)]
pub struct FinalizeReport {
    /// Records accumulated by the crawl
    pub before: usize,

    /// Records left after removing duplicates
    pub after: usize,

    /// Files written by the sink
    pub files: Vec<PathBuf>,

    /// The deduplicated records, in output order
    pub records: Vec<BookRecord>,
}

/// Removes records whose `(name, sku)` pair was already seen
///
/// The first occurrence wins and the relative order of kept records is
/// preserved.
pub fn dedup_records(records: Vec<BookRecord>) -> Vec<BookRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::new();

    records
        .into_iter()
        .filter(|record| {
            let (name, sku) = record.dedup_key();
            seen.insert((name.to_string(), sku.to_string()))
        })
        .collect()
}

/// Deduplicates the accumulated records and hands them to `sink`
///
/// Runs for an empty record set too, so every run leaves output files.
///
/// # Arguments
///
/// * `records` - Everything the crawl accumulated, in crawl order
/// * `sink` - Destination of the final table
/// * `basename` - File name shared by every output format
pub fn finalize(
    records: Vec<BookRecord>,
    sink: &dyn RecordSink,
    basename: &str,
) -> OutputResult<FinalizeReport> {
    let before = records.len();
    let records = dedup_records(records);
    let after = records.len();

    let files = sink.write_records(&records, basename)?;

    tracing::info!("Final save complete");
    tracing::info!("Books before removing duplicates: {}", before);
    tracing::info!("Books after removing duplicates: {}", after);

    Ok(FinalizeReport {
        before,
        after,
        files,
        records,
    })
}
