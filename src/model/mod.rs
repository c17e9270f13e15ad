// In-memory election results hierarchy: contest -> county -> precinct -> candidate.
use serde::Serialize;

/// One candidate's vote count at a given level (precinct or contest-wide).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateResult {
    pub candidate: String,
    pub party: String,
    pub votes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrecinctResult {
    pub precinct: String,
    pub candidates: Vec<CandidateResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountyResult {
    pub county: String,
    pub precincts: Vec<PrecinctResult>,
}

impl CountyResult {
    /// Sum of every precinct entry in this county.
    pub fn total_votes(&self) -> u64 {
        self.precincts
            .iter()
            .flat_map(|p| p.candidates.iter())
            .map(|c| c.votes)
            .fold(0, u64::saturating_add)
    }
}

/// A single race on the ballot.
///
/// `candidates` holds the contest-wide totals, accumulated from the same rows as
/// the nested county/precinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestResult {
    pub contest_name: String,
    pub counties: Vec<CountyResult>,
    pub candidates: Vec<CandidateResult>,
}

impl ContestResult {
    pub fn county(&self, county: &str) -> Option<&CountyResult> {
        self.counties.iter().find(|c| c.county == county)
    }

    pub fn candidate(&self, candidate: &str) -> Option<&CandidateResult> {
        self.candidates.iter().find(|c| c.candidate == candidate)
    }

    pub fn precincts(&self) -> impl Iterator<Item = &PrecinctResult> {
        self.counties.iter().flat_map(|c| c.precincts.iter())
    }
}

/// A full snapshot of one election's results, in first-seen contest order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    contests: Vec<ContestResult>,
}

impl Dataset {
    pub fn new(contests: Vec<ContestResult>) -> Self {
        Self { contests }
    }

    pub fn contests(&self) -> &[ContestResult] {
        &self.contests
    }

    pub fn contest(&self, contest_name: &str) -> Option<&ContestResult> {
        self.contests
            .iter()
            .find(|c| c.contest_name == contest_name)
    }

    pub fn len(&self) -> usize {
        self.contests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contests.is_empty()
    }
}

/// One normalized row of the precinct-level results file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRow {
    pub county: String,
    pub election_date: String,
    pub precinct: String,
    pub contest_group_id: u64,
    pub contest_type: String,
    pub contest_name: String,
    pub choice: String,
    pub choice_party: String,
    pub vote_for: u64,
    pub election_day: u64,
    pub early_voting: u64,
    pub absentee_by_mail: u64,
    pub provisional: u64,
    pub total_votes: u64,
    pub real_precinct: bool,
}
