// Results archive extraction: zip in memory -> tab-separated documents -> rows.
use crate::acquire::metrics::{AcquisitionStage, MetricsCollector};
use crate::acquire::{AcquireError, Result};
use crate::formats::ncsbe::read_rows;
use crate::model::ParsedRow;
use log::{debug, info, warn};
use std::future::Future;
use std::io::{Cursor, Read};

/// Every `.txt` entry of the archive, in archive order, as `(name, contents)`.
pub fn extract_results_files(bytes: &[u8]) -> Result<Vec<(String, String)>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut files = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() || !entry.name().ends_with(".txt") {
            debug!("Skipping archive entry: {}", entry.name());
            continue;
        }

        let name = entry.name().to_string();
        let mut buf = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut buf)?;
        let contents = match String::from_utf8(buf) {
            Ok(s) => s,
            Err(e) => {
                warn!("Archive entry {} is not valid UTF-8, decoding lossily", name);
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        files.push((name, contents));
    }

    Ok(files)
}

/// Parses each results file on its own (each carries its own header line) and
/// concatenates the rows. Records the extract and parse stages.
pub fn extract_rows(bytes: &[u8], metrics: &mut MetricsCollector) -> Result<Vec<ParsedRow>> {
    metrics.start_stage(AcquisitionStage::Extract);
    let files = extract_results_files(bytes)?;
    metrics.end_stage(AcquisitionStage::Extract, Some(files.len() as u64));
    if files.is_empty() {
        return Err(AcquireError::NoResultsFiles(format!(
            "{} byte archive",
            bytes.len()
        )));
    }

    metrics.start_stage(AcquisitionStage::Parse);
    let mut rows = Vec::new();
    for (name, contents) in files {
        let mut file_rows = read_rows(contents.as_bytes())?;
        debug!("Read {} rows from {}", file_rows.len(), name);
        rows.append(&mut file_rows);
    }
    metrics.end_stage(AcquisitionStage::Parse, Some(rows.len() as u64));
    Ok(rows)
}

/// Awaits `download` as the fetch stage, then extracts and parses the archive
/// it yields.
pub async fn read_archive(
    download: impl Future<Output = Result<Vec<u8>>>,
    metrics: &mut MetricsCollector,
) -> Result<Vec<ParsedRow>> {
    metrics.start_stage(AcquisitionStage::Fetch);
    let bytes = download.await?;
    metrics.end_stage(AcquisitionStage::Fetch, Some(bytes.len() as u64));

    let rows = extract_rows(&bytes, metrics)?;
    info!(
        "Read {} rows from a {} KiB archive",
        rows.len(),
        bytes.len() / 1024
    );
    Ok(rows)
}
