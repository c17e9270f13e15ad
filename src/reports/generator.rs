use super::tabulation;
use crate::model::ContestResult;
use serde::Serialize;

/// Serializable summary of one contest, as printed by `results --json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestReport {
    pub contest_name: String,
    pub total_votes: u64,
    pub winner: Option<String>,
    pub margin: Option<u64>,
    pub candidates: Vec<CandidateSummary>,
    pub counties: Vec<CountySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateSummary {
    pub name: String,
    pub party: String,
    pub votes: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountySummary {
    pub county: String,
    pub precincts: usize,
    pub votes: u64,
}

/// Generate a contest report. Candidates are listed by descending total, ties
/// in encounter order.
pub fn generate_contest_report(contest: &ContestResult) -> ContestReport {
    let mut candidates: Vec<CandidateSummary> = contest
        .candidates
        .iter()
        .map(|c| CandidateSummary {
            name: c.candidate.clone(),
            party: c.party.clone(),
            votes: c.votes,
            percentage: tabulation::vote_percentage(contest, &c.candidate),
        })
        .collect();
    candidates.sort_by(|a, b| b.votes.cmp(&a.votes));

    let counties = contest
        .counties
        .iter()
        .map(|c| CountySummary {
            county: c.county.clone(),
            precincts: c.precincts.len(),
            votes: c.total_votes(),
        })
        .collect();

    ContestReport {
        contest_name: contest.contest_name.clone(),
        total_votes: tabulation::total_votes(contest),
        winner: tabulation::winner(contest).map(|w| w.candidate.clone()),
        margin: tabulation::top_two_margin(contest),
        candidates,
        counties,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::build;
    use crate::aggregate::tests::{row, sample_rows};

    #[test]
    fn report_for_senate_race() {
        let dataset = build(sample_rows());
        let report = generate_contest_report(dataset.contest("US_SENATE").unwrap());

        assert_eq!(report.contest_name, "US_SENATE");
        assert_eq!(report.total_votes, 33000);
        assert_eq!(report.winner.as_deref(), Some("Felix"));
        assert_eq!(report.margin, Some(3000));
        assert_eq!(report.candidates[0].name, "Felix");
        assert_eq!(report.candidates[1].name, "Alex");
        assert_eq!(
            report.counties,
            vec![CountySummary {
                county: "Wake".to_string(),
                precincts: 1,
                votes: 33000
            }]
        );
    }

    #[test]
    fn report_serializes_with_camel_case_keys() {
        let dataset = build(vec![row("C", "Wake", "1", "A", "DEM", 4)]);
        let report = generate_contest_report(dataset.contest("C").unwrap());
        let js = serde_json::to_value(&report).unwrap();

        assert_eq!(js["contestName"], "C");
        assert_eq!(js["totalVotes"], 4);
        assert_eq!(js["winner"], "A");
        assert!(js["margin"].is_null());
        assert_eq!(js["candidates"][0]["percentage"], 100.0);
    }
}
