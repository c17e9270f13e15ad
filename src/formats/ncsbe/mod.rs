use crate::model::ParsedRow;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::Deserialize;
use std::io::Read;

/// A record of the precinct-level results file, exactly as it appears on disk.
///
/// Every column is optional: a short row or a renamed column degrades to an
/// empty value instead of failing the whole file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    #[serde(rename = "County", default)]
    pub county: String,
    #[serde(rename = "Election Date", default)]
    pub election_date: String,
    #[serde(rename = "Precinct", default)]
    pub precinct: String,
    #[serde(rename = "Contest Group ID", default)]
    pub contest_group_id: String,
    #[serde(rename = "Contest Type", default)]
    pub contest_type: String,
    #[serde(rename = "Contest Name", default)]
    pub contest_name: String,
    #[serde(rename = "Choice", default)]
    pub choice: String,
    #[serde(rename = "Choice Party", default)]
    pub choice_party: String,
    #[serde(rename = "Vote For", default)]
    pub vote_for: String,
    #[serde(rename = "Election Day", default)]
    pub election_day: String,
    #[serde(rename = "Early Voting", default)]
    pub early_voting: String,
    #[serde(rename = "Absentee by Mail", default)]
    pub absentee_by_mail: String,
    #[serde(rename = "Provisional", default)]
    pub provisional: String,
    #[serde(rename = "Total Votes", default)]
    pub total_votes: String,
    #[serde(rename = "Real Precinct", default)]
    pub real_precinct: String,
}

impl From<RawRow> for ParsedRow {
    fn from(raw: RawRow) -> Self {
        ParsedRow {
            contest_group_id: coerce_count(&raw.contest_group_id),
            contest_name: normalize_contest_name(&raw.contest_name),
            vote_for: coerce_count(&raw.vote_for),
            election_day: coerce_count(&raw.election_day),
            early_voting: coerce_count(&raw.early_voting),
            absentee_by_mail: coerce_count(&raw.absentee_by_mail),
            provisional: coerce_count(&raw.provisional),
            total_votes: coerce_count(&raw.total_votes),
            real_precinct: raw.real_precinct == "Y",
            county: raw.county,
            election_date: raw.election_date,
            precinct: raw.precinct,
            contest_type: raw.contest_type,
            choice: raw.choice,
            choice_party: raw.choice_party,
        }
    }
}

/// Strips parentheses and turns every whitespace run into a single underscore,
/// e.g. `US SENATE (VOTE FOR 1)` becomes `US_SENATE_VOTE_FOR_1`.
pub fn normalize_contest_name(contest_name: &str) -> String {
    lazy_static! {
        static ref PARENS_RX: Regex = Regex::new(r"[()]").unwrap();
        static ref WHITESPACE_RX: Regex = Regex::new(r"\s+").unwrap();
    }

    let stripped = PARENS_RX.replace_all(contest_name, "");
    WHITESPACE_RX.replace_all(&stripped, "_").into_owned()
}

/// Lenient numeric coercion for count columns. Anything that is not a
/// non-negative number reads as zero, and so does a float too large for `u64`.
pub fn coerce_count(value: &str) -> u64 {
    let value = value.trim();
    if value.is_empty() {
        return 0;
    }
    if let Ok(n) = value.parse::<u64>() {
        return n;
    }
    match value.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f < u64::MAX as f64 => f as u64,
        _ => 0,
    }
}

/// Reads a tab-separated results document, header line first.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<ParsedRow>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.deserialize::<RawRow>() {
        rows.push(ParsedRow::from(record?));
    }
    debug!("read_rows: parsed {} rows", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "County\tElection Date\tPrecinct\tContest Group ID\tContest Type\tContest Name\tChoice\tChoice Party\tVote For\tElection Day\tEarly Voting\tAbsentee by Mail\tProvisional\tTotal Votes\tReal Precinct";

    #[test]
    fn contest_names_are_normalized() {
        assert_eq!(
            normalize_contest_name("US SENATE (VOTE FOR 1)"),
            "US_SENATE_VOTE_FOR_1"
        );
        assert_eq!(normalize_contest_name("NC  HOUSE\tDISTRICT 12"), "NC_HOUSE_DISTRICT_12");
        assert_eq!(normalize_contest_name("US_PRESIDENT"), "US_PRESIDENT");
    }

    #[test]
    fn malformed_counts_read_as_zero() {
        assert_eq!(coerce_count("1234"), 1234);
        assert_eq!(coerce_count(" 42 "), 42);
        assert_eq!(coerce_count(""), 0);
        assert_eq!(coerce_count("abc"), 0);
        assert_eq!(coerce_count("-5"), 0);
        assert_eq!(coerce_count("NaN"), 0);
        assert_eq!(coerce_count("12.0"), 12);
        assert_eq!(coerce_count("1e3"), 1000);
        assert_eq!(coerce_count("1e20"), 0);
        assert_eq!(coerce_count("inf"), 0);
    }

    #[test]
    fn reads_tab_separated_rows() {
        let data = format!(
            "{}\nWAKE\t11/05/2024\t01-01\t1373\tS\tUS SENATE (VOTE FOR 1)\tFelix\tREP\t1\t10\t5\t2\t1\t18\tY\n\
             ORANGE\t11/05/2024\tABS\t1373\tS\tUS SENATE (VOTE FOR 1)\tAlex\tDEM\t1\tx\t5\t2\t1\tbogus\tN\n",
            HEADER
        );
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.county, "WAKE");
        assert_eq!(first.precinct, "01-01");
        assert_eq!(first.contest_group_id, 1373);
        assert_eq!(first.contest_name, "US_SENATE_VOTE_FOR_1");
        assert_eq!(first.choice, "Felix");
        assert_eq!(first.choice_party, "REP");
        assert_eq!(first.total_votes, 18);
        assert!(first.real_precinct);

        let second = &rows[1];
        assert_eq!(second.election_day, 0);
        assert_eq!(second.total_votes, 0);
        assert!(!second.real_precinct);
    }

    #[test]
    fn short_rows_fill_with_defaults() {
        let data = format!("{}\nDURHAM\t11/05/2024\t05\n", HEADER);
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].county, "DURHAM");
        assert_eq!(rows[0].contest_name, "");
        assert_eq!(rows[0].total_votes, 0);
        assert!(!rows[0].real_precinct);
    }
}
