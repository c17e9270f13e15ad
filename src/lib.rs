//! Fetch and query precinct-level election results published by the North
//! Carolina State Board of Elections.
//!
//! The results archive for an election date is downloaded, its tab-separated
//! files parsed into [`model::ParsedRow`]s, and the rows aggregated into a
//! contest -> county -> precinct -> candidate [`model::Dataset`]. Queries run
//! through [`ElectionResults`].

pub mod acquire;
pub mod aggregate;
pub mod formats;
pub mod model;
pub mod reports;

pub use acquire::{source_url, Acquire, AcquireError, AcquirerConfig, HttpAcquirer};
pub use model::{CandidateResult, ContestResult, CountyResult, Dataset, ParsedRow, PrecinctResult};
pub use reports::{ElectionResults, RefreshSummary, ResultsError, ResultsState};
