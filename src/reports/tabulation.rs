// Derived statistics over a single contest: totals, shares, winner and margin.

use crate::model::{CandidateResult, ContestResult};

/// Sum of a candidate's entries across every precinct of every county.
pub fn candidate_vote_total(contest: &ContestResult, candidate: &str) -> u64 {
    contest
        .precincts()
        .flat_map(|p| p.candidates.iter())
        .filter(|c| c.candidate == candidate)
        .map(|c| c.votes)
        .fold(0, u64::saturating_add)
}

/// Every candidate of the contest with their precinct-summed total, in
/// encounter order.
pub fn contest_vote_totals(contest: &ContestResult) -> Vec<(&str, u64)> {
    contest
        .candidates
        .iter()
        .map(|c| {
            (
                c.candidate.as_str(),
                candidate_vote_total(contest, &c.candidate),
            )
        })
        .collect()
}

pub fn total_votes(contest: &ContestResult) -> u64 {
    contest
        .candidates
        .iter()
        .map(|c| c.votes)
        .fold(0, u64::saturating_add)
}

/// Candidate share of the contest in percent; 0 when the candidate is absent
/// or nobody received a vote.
pub fn vote_percentage(contest: &ContestResult, candidate: &str) -> f64 {
    if contest.candidate(candidate).is_none() {
        return 0.0;
    }
    let total = total_votes(contest);
    if total == 0 {
        return 0.0;
    }
    100.0 * candidate_vote_total(contest, candidate) as f64 / total as f64
}

/// The candidate with the most votes. On a tie the candidate seen first wins.
pub fn winner(contest: &ContestResult) -> Option<&CandidateResult> {
    let mut best: Option<&CandidateResult> = None;
    for candidate in &contest.candidates {
        match best {
            Some(b) if candidate.votes <= b.votes => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// The two leading candidates, best first, with the same tie rule as [`winner`].
pub fn top_two(contest: &ContestResult) -> Option<(&CandidateResult, &CandidateResult)> {
    if contest.candidates.len() < 2 {
        return None;
    }
    let mut ranked: Vec<&CandidateResult> = contest.candidates.iter().collect();
    // stable: equal totals keep encounter order
    ranked.sort_by(|a, b| b.votes.cmp(&a.votes));
    Some((ranked[0], ranked[1]))
}

/// Vote gap between the two leading candidates; `None` with fewer than two.
pub fn top_two_margin(contest: &ContestResult) -> Option<u64> {
    top_two(contest).map(|(first, second)| first.votes - second.votes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::build;
    use crate::aggregate::tests::{row, sample_rows};

    #[test]
    fn totals_and_percentages() {
        let dataset = build(sample_rows());
        let president = dataset.contest("US_PRESIDENT").unwrap();

        assert_eq!(total_votes(president), 201050);
        assert_eq!(candidate_vote_total(president, "John"), 100050);
        assert_eq!(candidate_vote_total(president, "Nobody"), 0);

        let pct = vote_percentage(president, "John");
        assert!((pct - 100050.0 / 201050.0 * 100.0).abs() < 1e-9);
        assert_eq!(vote_percentage(president, "Nobody"), 0.0);
    }

    #[test]
    fn zero_vote_contest_has_zero_percentages() {
        let dataset = build(vec![row("C", "Wake", "1", "A", "DEM", 0)]);
        assert_eq!(vote_percentage(dataset.contest("C").unwrap(), "A"), 0.0);
    }

    #[test]
    fn ties_go_to_first_encountered() {
        let dataset = build(vec![
            row("C", "Wake", "1", "First", "DEM", 50),
            row("C", "Wake", "1", "Second", "REP", 50),
            row("C", "Wake", "1", "Third", "LIB", 10),
        ]);
        let contest = dataset.contest("C").unwrap();
        assert_eq!(winner(contest).unwrap().candidate, "First");

        let (first, second) = top_two(contest).unwrap();
        assert_eq!(first.candidate, "First");
        assert_eq!(second.candidate, "Second");
        assert_eq!(top_two_margin(contest), Some(0));
    }

    #[test]
    fn single_candidate_has_no_margin() {
        let dataset = build(vec![row("C", "Wake", "1", "Only", "DEM", 9)]);
        let contest = dataset.contest("C").unwrap();
        assert_eq!(winner(contest).unwrap().candidate, "Only");
        assert_eq!(top_two_margin(contest), None);
    }

    #[test]
    fn vote_totals_cover_every_candidate() {
        let dataset = build(sample_rows());
        let totals = contest_vote_totals(dataset.contest("US_SENATE").unwrap());
        assert_eq!(totals, vec![("Alex", 15000), ("Felix", 18000)]);
    }

    #[test]
    fn sums_saturate_instead_of_overflowing() {
        let dataset = build(vec![
            row("C", "Wake", "1", "A", "DEM", u64::MAX),
            row("C", "Wake", "1", "B", "REP", 5),
            row("C", "Wake", "2", "B", "REP", u64::MAX),
        ]);
        let contest = dataset.contest("C").unwrap();
        assert_eq!(total_votes(contest), u64::MAX);
        assert_eq!(candidate_vote_total(contest, "B"), u64::MAX);
        assert_eq!(winner(contest).unwrap().candidate, "A");
    }
}
