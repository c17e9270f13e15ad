// Single-pass aggregation of normalized rows into the results hierarchy.
use crate::model::{CandidateResult, ContestResult, CountyResult, Dataset, ParsedRow, PrecinctResult};
use log::debug;
use std::collections::HashMap;

/// String-keyed map that iterates in first-insertion order.
#[derive(Debug)]
struct OrderedMap<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V> OrderedMap<V> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> V) -> &mut V {
        let idx = match self.index.get(key) {
            Some(idx) => *idx,
            None => {
                self.entries.push((key.to_string(), make()));
                let idx = self.entries.len() - 1;
                self.index.insert(key.to_string(), idx);
                idx
            }
        };
        &mut self.entries[idx].1
    }

    fn into_entries(self) -> impl Iterator<Item = (String, V)> {
        self.entries.into_iter()
    }
}

struct ContestAccumulator {
    counties: OrderedMap<OrderedMap<Vec<CandidateResult>>>,
    candidates: OrderedMap<CandidateResult>,
}

/// Builds a [`Dataset`] from a flat row sequence.
///
/// Each row appends one entry to its precinct, so repeated rows for the same
/// contest/county/precinct/candidate show up more than once at precinct level.
/// The contest-wide total for a candidate sums every row, and is seeded with the
/// party of the first row seen for that candidate.
pub fn build(rows: impl IntoIterator<Item = ParsedRow>) -> Dataset {
    let mut contests: OrderedMap<ContestAccumulator> = OrderedMap::new();
    let mut row_count = 0usize;

    for row in rows {
        row_count += 1;
        let contest = contests.get_or_insert_with(&row.contest_name, || ContestAccumulator {
            counties: OrderedMap::new(),
            candidates: OrderedMap::new(),
        });

        contest
            .counties
            .get_or_insert_with(&row.county, OrderedMap::new)
            .get_or_insert_with(&row.precinct, Vec::new)
            .push(CandidateResult {
                candidate: row.choice.clone(),
                party: row.choice_party.clone(),
                votes: row.total_votes,
            });

        let total = contest
            .candidates
            .get_or_insert_with(&row.choice, || CandidateResult {
                candidate: row.choice.clone(),
                party: row.choice_party.clone(),
                votes: 0,
            });
        total.votes = total.votes.saturating_add(row.total_votes);
    }

    let contests: Vec<ContestResult> = contests
        .into_entries()
        .map(|(contest_name, acc)| ContestResult {
            contest_name,
            counties: acc
                .counties
                .into_entries()
                .map(|(county, precincts)| CountyResult {
                    county,
                    precincts: precincts
                        .into_entries()
                        .map(|(precinct, candidates)| PrecinctResult {
                            precinct,
                            candidates,
                        })
                        .collect(),
                })
                .collect(),
            candidates: acc.candidates.into_entries().map(|(_, c)| c).collect(),
        })
        .collect();

    debug!(
        "build: {} rows aggregated into {} contests",
        row_count,
        contests.len()
    );
    Dataset::new(contests)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn row(contest: &str, county: &str, precinct: &str, choice: &str, party: &str, votes: u64) -> ParsedRow {
        ParsedRow {
            county: county.to_string(),
            precinct: precinct.to_string(),
            contest_name: contest.to_string(),
            choice: choice.to_string(),
            choice_party: party.to_string(),
            total_votes: votes,
            real_precinct: true,
            ..ParsedRow::default()
        }
    }

    /// The two-contest fixture used across the query tests.
    pub(crate) fn sample_rows() -> Vec<ParsedRow> {
        vec![
            row("US_PRESIDENT", "Orange", "1", "John", "DEM", 100050),
            row("US_PRESIDENT", "Orange", "1", "Mark", "REP", 100000),
            row("US_PRESIDENT", "Orange", "1", "Alex", "DEM", 1000),
            row("US_SENATE", "Wake", "2", "Alex", "DEM", 15000),
            row("US_SENATE", "Wake", "2", "Felix", "REP", 18000),
        ]
    }

    #[test]
    fn builds_nested_hierarchy() {
        let dataset = build(sample_rows());
        assert_eq!(dataset.len(), 2);

        let president = dataset.contest("US_PRESIDENT").unwrap();
        assert_eq!(president.counties.len(), 1);
        assert_eq!(president.counties[0].county, "Orange");
        assert_eq!(president.counties[0].precincts[0].precinct, "1");
        assert_eq!(president.counties[0].precincts[0].candidates.len(), 3);

        let names: Vec<&str> = president.candidates.iter().map(|c| c.candidate.as_str()).collect();
        assert_eq!(names, vec!["John", "Mark", "Alex"]);
    }

    #[test]
    fn preserves_first_seen_order() {
        let rows = vec![
            row("B", "Wake", "2", "X", "DEM", 1),
            row("A", "Orange", "1", "Y", "REP", 1),
            row("B", "Durham", "9", "Z", "DEM", 1),
            row("B", "Wake", "1", "X", "DEM", 1),
        ];
        let dataset = build(rows);
        let contests: Vec<&str> = dataset.contests().iter().map(|c| c.contest_name.as_str()).collect();
        assert_eq!(contests, vec!["B", "A"]);

        let b = dataset.contest("B").unwrap();
        let counties: Vec<&str> = b.counties.iter().map(|c| c.county.as_str()).collect();
        assert_eq!(counties, vec!["Wake", "Durham"]);
        let wake: Vec<&str> = b.counties[0].precincts.iter().map(|p| p.precinct.as_str()).collect();
        assert_eq!(wake, vec!["2", "1"]);
    }

    #[test]
    fn contest_totals_sum_across_precincts() {
        let rows = vec![
            row("NC_GOVERNOR", "Wake", "01", "Stein", "DEM", 10),
            row("NC_GOVERNOR", "Wake", "02", "Stein", "DEM", 20),
            row("NC_GOVERNOR", "Orange", "01", "Stein", "DEM", 5),
            row("NC_GOVERNOR", "Orange", "01", "Robinson", "REP", 7),
        ];
        let dataset = build(rows);
        let contest = dataset.contest("NC_GOVERNOR").unwrap();

        assert_eq!(contest.candidate("Stein").unwrap().votes, 35);
        assert_eq!(contest.candidate("Robinson").unwrap().votes, 7);

        let nested: u64 = contest
            .precincts()
            .flat_map(|p| p.candidates.iter())
            .filter(|c| c.candidate == "Stein")
            .map(|c| c.votes)
            .sum();
        assert_eq!(nested, 35);
    }

    #[test]
    fn duplicate_rows_append_at_precinct_level() {
        let rows = vec![
            row("C", "Wake", "01", "Smith", "DEM", 3),
            row("C", "Wake", "01", "Smith", "DEM", 4),
        ];
        let dataset = build(rows);
        let contest = dataset.contest("C").unwrap();
        assert_eq!(contest.counties[0].precincts.len(), 1);
        assert_eq!(contest.counties[0].precincts[0].candidates.len(), 2);
        assert_eq!(contest.candidates.len(), 1);
        assert_eq!(contest.candidate("Smith").unwrap().votes, 7);
    }

    #[test]
    fn first_party_seen_wins_for_contest_total() {
        let rows = vec![
            row("C", "Wake", "01", "Smith", "DEM", 3),
            row("C", "Wake", "02", "Smith", "UNA", 4),
        ];
        let dataset = build(rows);
        assert_eq!(dataset.contest("C").unwrap().candidate("Smith").unwrap().party, "DEM");
    }

    #[test]
    fn out_of_range_count_does_not_overflow() {
        let data = format!(
            "{}\nWAKE\t11/05/2024\t01\t1\tS\tC\tA\tDEM\t1\t0\t0\t0\t0\t1e20\tY\n\
             WAKE\t11/05/2024\t02\t1\tS\tC\tA\tDEM\t1\t0\t0\t0\t0\t5\tY\n",
            crate::acquire::archive::tests::HEADER
        );
        let rows = crate::formats::ncsbe::read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows[0].total_votes, 0);

        let dataset = build(rows);
        assert_eq!(dataset.contest("C").unwrap().candidate("A").unwrap().votes, 5);
    }

    #[test]
    fn huge_totals_saturate() {
        let rows = vec![
            row("C", "Wake", "01", "A", "DEM", u64::MAX),
            row("C", "Wake", "02", "A", "DEM", 5),
        ];
        let dataset = build(rows);
        let contest = dataset.contest("C").unwrap();
        assert_eq!(contest.candidate("A").unwrap().votes, u64::MAX);
        assert_eq!(contest.counties[0].total_votes(), u64::MAX);
    }

    #[test]
    fn empty_input_builds_empty_dataset() {
        assert!(build(Vec::new()).is_empty());
    }
}
