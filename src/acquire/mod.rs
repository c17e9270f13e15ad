pub mod archive;
pub mod http;
pub mod metrics;

use crate::model::ParsedRow;
use metrics::MetricsCollector;
use std::future::Future;
use std::time::Duration;

pub use http::HttpAcquirer;

#[derive(Debug, thiserror::Error)]
pub enum AcquireError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] csv::Error),
    #[error("No results files found in {0}")]
    NoResultsFiles(String),
}

pub type Result<T> = std::result::Result<T, AcquireError>;

/// Produces the flat row sequence for a results source.
///
/// Implementations hide transport, archive format and text parsing, and may
/// record their own stages into `metrics`. The production implementation is
/// [`HttpAcquirer`].
pub trait Acquire {
    fn acquire(
        &self,
        source_url: &str,
        metrics: &mut MetricsCollector,
    ) -> impl Future<Output = Result<Vec<ParsedRow>>> + Send;
}

pub const BASE_URL: &str = "https://s3.amazonaws.com/dl.ncsbe.gov/ENRS";

/// Default results archive location for an election date in `YYYY-MM-DD` form.
///
/// The date is not validated: a bogus date only fails later, at acquisition.
pub fn source_url(election_date: &str) -> String {
    format!(
        "{}/{}/results_pct_{}.zip",
        BASE_URL,
        election_date.replace('-', "_"),
        election_date.replace('-', "")
    )
}

/// HTTP client settings for [`HttpAcquirer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquirerConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for AcquirerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(120),
            user_agent: format!("ncsbe-results/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
