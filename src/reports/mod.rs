use crate::acquire::metrics::{AcquisitionStage, MetricsCollector, StageMetrics};
use crate::acquire::{self, Acquire, AcquireError, AcquirerConfig, HttpAcquirer};
use crate::aggregate;
use crate::model::{CandidateResult, ContestResult, CountyResult, Dataset, PrecinctResult};
use chrono::{DateTime, Utc};
use instant::Instant;
use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;

pub mod generator;
pub mod tabulation;

#[derive(Debug, thiserror::Error)]
pub enum ResultsError {
    #[error("Acquisition failed for {source_url}: {source}")]
    Acquisition {
        source_url: String,
        #[source]
        source: AcquireError,
    },
}

pub type ResultsResult<T> = std::result::Result<T, ResultsError>;

/// Whether a dataset has been loaded yet. There is no way back to
/// `Uninitialized`: a failed refresh keeps the last good snapshot.
#[derive(Debug, Clone)]
pub enum ResultsState {
    Uninitialized,
    Ready {
        dataset: Arc<Dataset>,
        refreshed_at: DateTime<Utc>,
    },
}

/// Outcome of a successful initialize/refresh round trip.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    pub source_url: String,
    pub contests: usize,
    pub rows: u64,
    pub total_duration_ms: u64,
    pub refreshed_at: DateTime<Utc>,
    pub stages: Vec<StageMetrics>,
}

/// Query engine over one election's results.
///
/// ```no_run
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// use ncsbe_results::ElectionResults;
///
/// let mut results = ElectionResults::new("2024-11-05")?;
/// results.initialize().await?;
/// for contest in results.list_contests() {
///     println!("{}: {:?}", contest, results.get_contest_winner(contest));
/// }
/// # Ok(())
/// # }
/// ```
pub struct ElectionResults<A = HttpAcquirer> {
    election_date: String,
    source_url: String,
    acquirer: A,
    state: ResultsState,
}

impl ElectionResults<HttpAcquirer> {
    /// Fails only if the HTTP client cannot be built.
    pub fn new(election_date: &str) -> acquire::Result<Self> {
        Self::with_config(election_date, &AcquirerConfig::default())
    }

    pub fn with_config(election_date: &str, config: &AcquirerConfig) -> acquire::Result<Self> {
        let acquirer = HttpAcquirer::new(config)?;
        Ok(Self::with_acquirer(election_date, acquirer))
    }
}

impl<A: Acquire> ElectionResults<A> {
    pub fn with_acquirer(election_date: &str, acquirer: A) -> Self {
        Self::with_source(election_date, &acquire::source_url(election_date), acquirer)
    }

    /// Like [`ElectionResults::with_acquirer`] but reading from an explicit
    /// source instead of the location derived from the date.
    pub fn with_source(election_date: &str, source_url: &str, acquirer: A) -> Self {
        Self {
            election_date: election_date.to_string(),
            source_url: source_url.to_string(),
            acquirer,
            state: ResultsState::Uninitialized,
        }
    }

    pub async fn initialize(&mut self) -> ResultsResult<RefreshSummary> {
        info!(
            "Initializing results for election {} from {}",
            self.election_date, self.source_url
        );
        self.refresh().await
    }

    /// Re-acquire the source and replace the dataset wholesale.
    ///
    /// The new snapshot is only swapped in once it is fully built; on error,
    /// or if this future is dropped early, the previous state stays in place.
    pub async fn refresh(&mut self) -> ResultsResult<RefreshSummary> {
        let start = Instant::now();
        let mut metrics = MetricsCollector::new();

        metrics.start_stage(AcquisitionStage::Acquire);
        let rows = match self.acquirer.acquire(&self.source_url, &mut metrics).await {
            Ok(rows) => rows,
            Err(source) => {
                if self.is_ready() {
                    warn!(
                        "Refresh from {} failed, keeping previous results: {}",
                        self.source_url, source
                    );
                } else {
                    warn!("Initial load from {} failed: {}", self.source_url, source);
                }
                return Err(ResultsError::Acquisition {
                    source_url: self.source_url.clone(),
                    source,
                });
            }
        };
        let row_count = rows.len() as u64;
        metrics.end_stage(AcquisitionStage::Acquire, Some(row_count));

        metrics.start_stage(AcquisitionStage::Aggregate);
        let dataset = aggregate::build(rows);
        metrics.end_stage(AcquisitionStage::Aggregate, Some(row_count));

        let refreshed_at = Utc::now();
        let contests = dataset.len();
        self.state = ResultsState::Ready {
            dataset: Arc::new(dataset),
            refreshed_at,
        };

        let summary = RefreshSummary {
            source_url: self.source_url.clone(),
            contests,
            rows: row_count,
            total_duration_ms: start.elapsed().as_millis() as u64,
            refreshed_at,
            stages: metrics.into_recorded(),
        };
        info!(
            "Loaded {} contests from {} rows in {} ms",
            summary.contests, summary.rows, summary.total_duration_ms
        );
        Ok(summary)
    }
}

impl<A> ElectionResults<A> {
    pub fn election_date(&self) -> &str {
        &self.election_date
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn state(&self) -> &ResultsState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ResultsState::Ready { .. })
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            ResultsState::Ready { refreshed_at, .. } => Some(*refreshed_at),
            ResultsState::Uninitialized => None,
        }
    }

    fn dataset(&self) -> Option<&Dataset> {
        match &self.state {
            ResultsState::Ready { dataset, .. } => Some(dataset.as_ref()),
            ResultsState::Uninitialized => None,
        }
    }

    fn contests(&self) -> &[ContestResult] {
        self.dataset().map(|d| d.contests()).unwrap_or(&[])
    }

    /// The current snapshot. It stays valid even after a later refresh swaps in a new one.
    pub fn get_dataset(&self) -> Option<Arc<Dataset>> {
        match &self.state {
            ResultsState::Ready { dataset, .. } => Some(Arc::clone(dataset)),
            ResultsState::Uninitialized => None,
        }
    }

    pub fn list_contests(&self) -> Vec<&str> {
        dedup(self.contests().iter().map(|c| c.contest_name.as_str()))
    }

    pub fn has_contest(&self, contest: &str) -> bool {
        self.get_contest(contest).is_some()
    }

    pub fn list_counties(&self, contest: &str) -> Vec<&str> {
        dedup(self.get_counties(contest).iter().map(|c| c.county.as_str()))
    }

    pub fn list_precincts(&self, contest: &str, county: &str) -> Vec<&str> {
        self.get_county_results(contest, county)
            .map(|c| c.precincts.iter().map(|p| p.precinct.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn list_candidates(&self, contest: &str) -> Vec<&str> {
        dedup(self.get_candidates(contest).iter().map(|c| c.candidate.as_str()))
    }

    pub fn has_candidate(&self, candidate: &str) -> bool {
        self.contests()
            .iter()
            .any(|c| c.candidate(candidate).is_some())
    }

    pub fn get_contest(&self, contest: &str) -> Option<&ContestResult> {
        self.dataset().and_then(|d| d.contest(contest))
    }

    /// Contest-wide totals for one candidate.
    pub fn get_candidate_info(&self, contest: &str, candidate: &str) -> Option<&CandidateResult> {
        self.get_contest(contest).and_then(|c| c.candidate(candidate))
    }

    pub fn get_county_results(&self, contest: &str, county: &str) -> Option<&CountyResult> {
        self.get_contest(contest).and_then(|c| c.county(county))
    }

    /// One contest-wide entry per contest the candidate appears in.
    pub fn get_all_candidate_results(&self, candidate: &str) -> Vec<&CandidateResult> {
        self.contests()
            .iter()
            .flat_map(|c| c.candidates.iter())
            .filter(|c| c.candidate == candidate)
            .collect()
    }

    pub fn get_candidate_vote_total(&self, contest: &str, candidate: &str) -> u64 {
        self.get_contest(contest)
            .map(|c| tabulation::candidate_vote_total(c, candidate))
            .unwrap_or(0)
    }

    /// Per-candidate totals in candidate encounter order.
    pub fn get_contest_vote_totals(&self, contest: &str) -> Vec<(&str, u64)> {
        self.get_contest(contest)
            .map(tabulation::contest_vote_totals)
            .unwrap_or_default()
    }

    pub fn get_candidate_vote_percentage(&self, contest: &str, candidate: &str) -> f64 {
        self.get_contest(contest)
            .map(|c| tabulation::vote_percentage(c, candidate))
            .unwrap_or(0.0)
    }

    pub fn get_contest_winner(&self, contest: &str) -> Option<&CandidateResult> {
        self.get_contest(contest).and_then(tabulation::winner)
    }

    pub fn get_total_votes_for_contest(&self, contest: &str) -> u64 {
        self.get_contest(contest)
            .map(tabulation::total_votes)
            .unwrap_or(0)
    }

    /// The contest with the smallest gap between its top two candidates.
    /// Contests with fewer than two candidates are not considered; on equal
    /// gaps the contest seen first wins.
    pub fn get_closest_race(&self) -> Option<&ContestResult> {
        let mut closest: Option<(&ContestResult, u64)> = None;
        for contest in self.contests() {
            let Some(margin) = tabulation::top_two_margin(contest) else {
                continue;
            };
            match closest {
                Some((_, best)) if margin >= best => {}
                _ => closest = Some((contest, margin)),
            }
        }
        closest.map(|(contest, _)| contest)
    }

    pub fn get_contests_by_candidate(&self, candidate: &str) -> Vec<&ContestResult> {
        self.contests()
            .iter()
            .filter(|c| c.candidate(candidate).is_some())
            .collect()
    }

    pub fn get_candidates(&self, contest: &str) -> &[CandidateResult] {
        self.get_contest(contest)
            .map(|c| c.candidates.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_counties(&self, contest: &str) -> &[CountyResult] {
        self.get_contest(contest)
            .map(|c| c.counties.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_precincts(&self, contest: &str) -> Vec<&PrecinctResult> {
        self.get_contest(contest)
            .map(|c| c.precincts().collect())
            .unwrap_or_default()
    }
}

fn dedup<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = std::collections::HashSet::new();
    names.filter(|n| seen.insert(*n)).collect()
}
